//! Library configuration.
//!
//! Centralizes the constants used throughout the crate, plus the
//! runtime configuration of the fetch-based endpoint dispatcher.

use serde::Deserialize;

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Content type sent with endpoint requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Runtime configuration for [`FetchDispatcher`](crate::utils::FetchDispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Base URL that endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: i32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

// =============================================================================
// Window Configuration
// =============================================================================

/// Target used when opening a window without an explicit target.
pub const DEFAULT_WINDOW_TARGET: &str = "_blank";

// =============================================================================
// GUID Configuration
// =============================================================================

/// Number of random bytes in a generated GUID.
pub const GUID_BYTE_LENGTH: usize = 16;

/// Base58 alphabet (Bitcoin ordering, no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// =============================================================================
// Data Model Configuration
// =============================================================================

/// Argument field carrying the object id in data model requests.
pub const OID_FIELD: &str = "_oid";

/// Argument field carrying the model payload in data model saves.
pub const DATA_FIELD: &str = "data";
