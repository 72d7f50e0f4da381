//! Network fetching utilities with timeout support.
//!
//! Provides the Fetch API based [`FetchDispatcher`] and the promise racing it
//! uses to enforce request timeouts.

use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Array, Promise};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::{DispatcherConfig, JSON_CONTENT_TYPE};
use crate::core::error::{ApiError, FetchError};
use crate::core::{DispatchResult, EndpointDispatcher};

use super::url::endpoint_url;

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timer of `timeout_ms`.
///
/// The timer is cleared once the race settles, whichever side won, so a
/// finished request leaves no callback pending on the window.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    let mut timer: Option<i32> = None;
    // Resolves to undefined when the timer fires.
    let timeout_promise = Promise::new(&mut |resolve, _| {
        timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms)
            .ok();
    });

    let contenders = Array::of2(&promise, &timeout_promise);
    let settled = JsFuture::from(Promise::race(&contenders)).await;

    if let Some(handle) = timer {
        window.clear_timeout_with_handle(handle);
    }

    match settled {
        Ok(value) if value.is_undefined() => RaceResult::TimedOut,
        Ok(value) => RaceResult::Completed(value),
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Fetch Dispatcher
// =============================================================================

/// [`EndpointDispatcher`] over the browser Fetch API.
///
/// Each call is a `POST {base_url}/{path}` (dots in the path become slashes)
/// with the JSON argument array as body; the JSON response body is the raw
/// envelope.
#[derive(Debug, Clone, Default)]
pub struct FetchDispatcher {
    config: DispatcherConfig,
}

impl FetchDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }
}

impl EndpointDispatcher for FetchDispatcher {
    fn call_endpoint(&self, path: &str, args: &[Value]) -> LocalBoxFuture<'static, DispatchResult> {
        let url = endpoint_url(&self.config.base_url, path);
        let timeout_ms = self.config.timeout_ms;
        let body = Value::Array(args.to_vec()).to_string();

        async move {
            let text = post_json(&url, &body, timeout_ms).await?;
            serde_json::from_str(&text)
                .map_err(|e| ApiError::from(FetchError::JsonParseError(e.to_string())))
        }
        .boxed_local()
    }
}

/// POST a JSON body and return the response text.
///
/// Uses [`race_with_timeout`] to implement timeout behavior. If the request
/// takes longer than `timeout_ms`, returns `FetchError::Timeout`.
async fn post_json(url: &str, body: &str, timeout_ms: i32) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    request
        .headers()
        .set("Content-Type", JSON_CONTENT_TYPE)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, timeout_ms).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

            if !resp.ok() {
                return Err(FetchError::HttpError(resp.status()));
            }

            let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;

            text.as_string().ok_or(FetchError::InvalidContent)
        }
    }
}
