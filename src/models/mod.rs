//! Data models and types for the library.
//!
//! Contains domain types for:
//! - [`ApiResponse`] / [`ApiOutcome`] - Endpoint response envelope and its decoded meaning
//! - [`QueryParams`] - Parsed, read-only URI query parameters

mod query;
mod response;

pub use query::QueryParams;
pub use response::{is_truthy, ApiOutcome, ApiResponse};
