//! Utility modules for web, DOM, and data encoding operations.
//!
//! Provides:
//! - [`FetchDispatcher`] - Endpoint calls over the Fetch API with timeout
//! - [`open_new_window`] - Open a URL in a new tab
//! - [`uri_parameter`], [`parse_query`] - Cached query string parsing
//! - [`guid58`] - Client-side base58 GUIDs
//! - [`random_int`] - Random integers in a half-open range

pub mod dom;
mod fetch;
mod guid58;
mod random;
mod url;

pub use dom::{open_new_window, resolve_target};
pub use fetch::{race_with_timeout, FetchDispatcher, RaceResult};
pub use guid58::{decode58, encode58, guid58};
pub use random::{random_bytes, random_int};
pub use url::{endpoint_url, parse_query, uri_parameter, uri_parameters, QueryCache};
