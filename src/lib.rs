//! Browser frontend helpers.
//!
//! - [`RequestResultCache`] merges concurrent endpoint calls and memoizes
//!   successful results until cleared
//! - [`DataObjectModel`] and [`merge_into`] bridge backend data objects into
//!   (reactive) UI state
//! - [`utils`] covers query parameters, window opening, base58 GUIDs and
//!   random integers
//!
//! ```ignore
//! use frontkit::{api_call, DispatcherConfig, FetchDispatcher, RequestResultCache};
//!
//! let api = RequestResultCache::new(FetchDispatcher::new(DispatcherConfig::default()));
//! let user = api_call!(api, "user.get", 7).await?;
//! api.clear("user.get");
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use config::DispatcherConfig;
pub use crate::core::error::{ApiError, Base58Error, DomError, FetchError};
pub use crate::core::{
    merge_into, ApiFuture, ApiResult, DataObjectModel, EndpointDispatcher, EntryState, MergeMode,
    MergeTarget, RequestResultCache,
};
pub use models::{ApiOutcome, ApiResponse, QueryParams};
pub use utils::FetchDispatcher;
