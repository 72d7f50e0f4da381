//! URL utilities: query string parsing and endpoint URL construction.
//!
//! Query parameters are parsed once per distinct search string and shared as
//! read-only [`QueryParams`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use percent_encoding::percent_decode_str;

use crate::models::QueryParams;

use super::dom;

/// Parse a query string such as `?a=1&b=two%20words`.
///
/// - A leading '?' is optional.
/// - Empty segments are skipped.
/// - A segment without '=' maps to an empty value.
/// - Values are percent-decoded; '+' is kept as-is.
/// - For repeated names, the last occurrence wins.
pub fn parse_query(search: &str) -> QueryParams {
    let query = search.strip_prefix('?').unwrap_or(search);

    let params = query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            (name.to_string(), decode_component(value))
        })
        .collect::<HashMap<_, _>>();

    QueryParams::new(params)
}

/// Percent-decode a URI component, falling back to the raw text when the
/// decoded bytes are not valid UTF-8.
fn decode_component(value: &str) -> String {
    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

// =============================================================================
// Query Cache
// =============================================================================

/// Memoizes the parse of the most recent search string.
#[derive(Debug, Default)]
pub struct QueryCache {
    last: Option<(String, Rc<QueryParams>)>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for `search`, re-parsing only when it changed since the
    /// previous call.
    pub fn params(&mut self, search: &str) -> Rc<QueryParams> {
        if let Some((cached, params)) = &self.last
            && cached == search
        {
            return Rc::clone(params);
        }

        let params = Rc::new(parse_query(search));
        self.last = Some((search.to_string(), Rc::clone(&params)));
        params
    }
}

thread_local! {
    static LOCATION_QUERY: RefCell<QueryCache> = RefCell::new(QueryCache::new());
}

/// All query parameters of the current page.
pub fn uri_parameters() -> Rc<QueryParams> {
    let search = dom::location_search();
    LOCATION_QUERY.with(|cache| cache.borrow_mut().params(&search))
}

/// A single query parameter of the current page.
pub fn uri_parameter(name: &str) -> Option<String> {
    uri_parameters().get(name).map(str::to_string)
}

// =============================================================================
// Endpoint URLs
// =============================================================================

/// Build the URL for a dot-notation endpoint path.
///
/// `endpoint_url("https://host/api/", "user.get")` yields
/// `https://host/api/user/get`.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('.').replace('.', "/");
    format!("{}/{}", base, path)
}
