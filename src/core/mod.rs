//! Core logic shared by frontend code.
//!
//! This module provides:
//! - [`RequestResultCache`] memoized, de-duplicated endpoint calls
//! - [`EndpointDispatcher`] the seam to the backend transport
//! - [`merge_into`] and [`MergeTarget`] for bridging data objects into UI state
//! - [`DataObjectModel`] load/save of a single backend object

pub mod api_cache;
mod dispatcher;
pub mod error;
mod merge;
mod model;

pub use api_cache::{canonical_key, ApiFuture, ApiResult, EntryState, RequestResultCache};
pub use dispatcher::{DispatchResult, EndpointDispatcher};
pub use merge::{merge_into, MergeMode, MergeTarget};
pub use model::DataObjectModel;
