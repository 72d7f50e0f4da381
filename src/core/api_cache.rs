//! Request/result memoization for endpoint calls.
//!
//! [`RequestResultCache`] sits in front of an [`EndpointDispatcher`] and
//!
//! - merges concurrent calls with the same path and arguments into a single
//!   dispatch (the *pending* table), and
//! - keeps calls that settled with a truthy `result` for reuse until the path
//!   is cleared (the *resolved* table).
//!
//! Per `(path, arguments)` key the entry moves `Absent -> Pending`, then to
//! `Resolved` or back to `Absent` when the call settles. Only [`clear`] moves
//! a key from `Resolved` back to `Absent`; there is no expiry.
//!
//! The cache is single-threaded (`Rc`/`RefCell`), matching the browser event
//! loop. Table borrows never span an await point.
//!
//! [`clear`]: RequestResultCache::clear

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use leptos::logging::debug_warn;
use serde_json::Value;

use crate::core::dispatcher::EndpointDispatcher;
use crate::core::error::ApiError;
use crate::models::ApiResponse;

/// Outcome of a memoized endpoint call.
pub type ApiResult = Result<ApiResponse, ApiError>;

/// A cloneable handle to an endpoint call. Every clone settles to the same outcome.
pub type ApiFuture = Shared<LocalBoxFuture<'static, ApiResult>>;

/// Lifecycle state of a single `(path, arguments)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Absent,
    Pending,
    Resolved,
}

struct PendingCall {
    id: u64,
    future: ApiFuture,
}

type PathTable<T> = HashMap<String, HashMap<String, T>>;

#[derive(Default)]
struct CacheTables {
    pending: PathTable<PendingCall>,
    resolved: PathTable<ApiFuture>,
    next_call_id: u64,
}

impl CacheTables {
    fn lookup(&self, path: &str, key: &str) -> Option<ApiFuture> {
        if let Some(call) = self.pending.get(path).and_then(|calls| calls.get(key)) {
            return Some(call.future.clone());
        }
        self.resolved
            .get(path)
            .and_then(|results| results.get(key))
            .cloned()
    }

    fn state(&self, path: &str, key: &str) -> EntryState {
        if self.pending.get(path).is_some_and(|calls| calls.contains_key(key)) {
            EntryState::Pending
        } else if self.resolved.get(path).is_some_and(|results| results.contains_key(key)) {
            EntryState::Resolved
        } else {
            EntryState::Absent
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_call_id += 1;
        self.next_call_id
    }

    fn insert_pending(&mut self, path: &str, key: String, call: PendingCall) {
        self.pending
            .entry(path.to_string())
            .or_default()
            .insert(key, call);
    }

    /// Retire the pending call `id`, promoting it to the resolved table when
    /// `cacheable`.
    ///
    /// Returns `false` when the call is no longer the pending entry for its
    /// key (the path was cleared while it was in flight); nothing is written
    /// back in that case.
    fn settle(&mut self, path: &str, key: &str, id: u64, cacheable: bool) -> bool {
        let Some(calls) = self.pending.get_mut(path) else {
            return false;
        };
        if calls.get(key).is_none_or(|call| call.id != id) {
            return false;
        }
        let Some(call) = calls.remove(key) else {
            return false;
        };
        if calls.is_empty() {
            self.pending.remove(path);
        }

        if cacheable {
            self.resolved
                .entry(path.to_string())
                .or_default()
                .insert(key.to_string(), call.future);
        }
        true
    }

    fn clear(&mut self, path: &str) {
        self.pending.remove(path);
        self.resolved.remove(path);
    }
}

/// Memoizing, de-duplicating front for an [`EndpointDispatcher`].
///
/// Construct one per application and hold it for the application's lifetime.
/// Clones share the same tables.
pub struct RequestResultCache<D> {
    dispatcher: Rc<D>,
    tables: Rc<RefCell<CacheTables>>,
}

impl<D> Clone for RequestResultCache<D> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Rc::clone(&self.dispatcher),
            tables: Rc::clone(&self.tables),
        }
    }
}

impl<D> fmt::Debug for RequestResultCache<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.borrow();
        f.debug_struct("RequestResultCache")
            .field("pending_paths", &tables.pending.len())
            .field("resolved_paths", &tables.resolved.len())
            .finish()
    }
}

impl<D: EndpointDispatcher + 'static> RequestResultCache<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher: Rc::new(dispatcher),
            tables: Rc::new(RefCell::new(CacheTables::default())),
        }
    }

    /// The wrapped dispatcher.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Call `path` with `args`, reusing an in-flight or memoized call when one
    /// exists for the same key.
    ///
    /// The dispatcher is invoked synchronously on a miss. The returned future
    /// settles to exactly the dispatcher's outcome: the full envelope wrapped
    /// in an [`ApiResponse`], sibling fields included.
    pub fn call(&self, path: &str, args: Vec<Value>) -> ApiFuture {
        let key = canonical_key(&args);

        if let Some(hit) = self.tables.borrow().lookup(path, &key) {
            return hit;
        }

        let id = self.tables.borrow_mut().next_id();
        let dispatch = self.dispatcher.call_endpoint(path, &args);
        let future = Self::settling(dispatch, Rc::downgrade(&self.tables), path, &key, id);

        self.tables.borrow_mut().insert_pending(
            path,
            key,
            PendingCall {
                id,
                future: future.clone(),
            },
        );

        // Drive the call even if nobody awaits it, like a browser promise.
        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(future.clone().map(|_| ()));

        future
    }

    /// Like [`call`](Self::call), treating an absent argument vector as empty.
    pub fn call_raw(&self, path: &str, args: Option<Vec<Value>>) -> ApiFuture {
        self.call(path, args.unwrap_or_default())
    }

    /// Drop every pending and resolved entry for `path`.
    ///
    /// In-flight calls are not cancelled. Their callers still receive the
    /// outcome, but it is not written back into the cache.
    pub fn clear(&self, path: &str) {
        self.tables.borrow_mut().clear(path);
    }

    /// Current lifecycle state of the `(path, args)` key.
    pub fn state(&self, path: &str, args: &[Value]) -> EntryState {
        self.tables.borrow().state(path, &canonical_key(args))
    }

    fn settling(
        dispatch: LocalBoxFuture<'static, Result<Value, ApiError>>,
        tables: Weak<RefCell<CacheTables>>,
        path: &str,
        key: &str,
        id: u64,
    ) -> ApiFuture {
        let path = path.to_string();
        let key = key.to_string();

        async move {
            let outcome = dispatch.await.map(ApiResponse::from_value);
            let cacheable = matches!(&outcome, Ok(response) if response.is_cacheable());

            if let Some(tables) = tables.upgrade()
                && !tables.borrow_mut().settle(&path, &key, id, cacheable)
            {
                debug_warn!("{path}: call settled after its cache entry was cleared");
            }

            outcome
        }
        .boxed_local()
        .shared()
    }
}

/// Call an endpoint through a [`RequestResultCache`] with variadic arguments.
///
/// Each argument is converted with [`serde_json::json!`].
///
/// ```ignore
/// let user = api_call!(cache, "user.get", 7).await?;
/// ```
#[macro_export]
macro_rules! api_call {
    ($cache:expr, $path:expr $(, $arg:expr)* $(,)?) => {
        $cache.call($path, vec![$(::serde_json::json!($arg)),*])
    };
}

/// Deterministic cache key for an argument vector.
///
/// The vector is serialized as compact JSON with object fields emitted in
/// sorted key order at every depth, so structurally equal arguments map to
/// the same key regardless of field insertion order.
pub fn canonical_key(args: &[Value]) -> String {
    let mut out = String::new();
    out.push('[');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_canonical(arg, &mut out);
    }
    out.push(']');
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            let mut entries: Vec<_> = fields.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (name, field)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(name.clone()).to_string());
                out.push(':');
                write_canonical(field, out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
