//! The seam between frontend code and the backend API transport.

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::core::error::ApiError;

/// Raw outcome of an endpoint call, before envelope decoding.
pub type DispatchResult = Result<Value, ApiError>;

/// Performs the actual remote call for an endpoint path.
///
/// Implementations must issue the call (or at least capture everything they
/// need) synchronously inside `call_endpoint`; the returned future only waits
/// for the outcome. The future is `'static` so it can outlive the borrow of
/// `args`.
pub trait EndpointDispatcher {
    fn call_endpoint(&self, path: &str, args: &[Value]) -> LocalBoxFuture<'static, DispatchResult>;
}

impl<F> EndpointDispatcher for F
where
    F: Fn(&str, &[Value]) -> LocalBoxFuture<'static, DispatchResult>,
{
    fn call_endpoint(&self, path: &str, args: &[Value]) -> LocalBoxFuture<'static, DispatchResult> {
        self(path, args)
    }
}
