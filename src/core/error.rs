//! Custom error types for the library.
//!
//! Provides structured error handling for each domain:
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`ApiError`] - Endpoint dispatch, response and data model errors
//! - [`DomError`] - Browser window and DOM manipulation errors
//! - [`Base58Error`] - Base58 decoding errors
//!
//! Every error is `Clone`, since a single dispatch outcome is handed to every
//! caller sharing the same in-flight request.

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Errors surfaced by endpoint dispatchers and the data object model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure from the fetch dispatcher.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A custom dispatcher rejected the call.
    #[error("endpoint call rejected: {0}")]
    Rejected(String),
    /// The endpoint answered with an application error payload.
    #[error("{0}")]
    Application(String),
    /// The endpoint answered without a usable `result` value.
    #[error("Missing response, or response.result value: {0}")]
    MissingResult(String),
    /// A required endpoint or object id was not configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// Browser window and DOM manipulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Document or document body not available
    #[error("Document body not available")]
    NoDocument,
    /// Failed to create or configure an element
    #[error("Failed to create element: {0}")]
    ElementCreationFailed(String),
    /// Failed to attach or detach an element
    #[error("Failed to update the document: {0}")]
    MutationFailed(String),
}

/// Base58 decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    /// Character outside the base58 alphabet.
    #[error("invalid base58 character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
}
