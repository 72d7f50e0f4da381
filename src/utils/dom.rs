//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlElement, Window};

use crate::config::DEFAULT_WINDOW_TARGET;
use crate::core::error::DomError;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the document of the current window.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Get the current query string, including the leading '?'.
pub fn location_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

// =============================================================================
// Window Opening
// =============================================================================

/// Normalize a window target, falling back to `_blank`.
pub fn resolve_target(target: Option<&str>) -> &str {
    match target {
        Some(target) if !target.trim().is_empty() => target,
        _ => DEFAULT_WINDOW_TARGET,
    }
}

/// Open `url` in a new browsing context (usually a new tab).
///
/// Clicks a temporary, zero-sized anchor instead of calling `window.open`,
/// which popup blockers treat more leniently. The browser may still refuse,
/// so never rely on this for navigation the user cannot easily redo.
pub fn open_new_window(url: &str, target: Option<&str>) -> Result<(), DomError> {
    let document = document().ok_or(DomError::NoWindow)?;
    let body = document.body().ok_or(DomError::NoDocument)?;

    let link = create_hidden_link(&document, url, resolve_target(target))?;

    body.append_child(&link)
        .map_err(|e| DomError::MutationFailed(format!("{:?}", e)))?;
    link.click();
    body.remove_child(&link)
        .map_err(|e| DomError::MutationFailed(format!("{:?}", e)))?;

    Ok(())
}

fn create_hidden_link(
    document: &Document,
    url: &str,
    target: &str,
) -> Result<HtmlAnchorElement, DomError> {
    let link = document
        .create_element("a")
        .map_err(|e| DomError::ElementCreationFailed(format!("{:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| DomError::ElementCreationFailed("not an anchor element".to_string()))?;

    link.set_href(url);
    link.set_target(target);

    // Keep the link from affecting layout while it is attached.
    let style = HtmlElement::style(&link);
    for (property, value) in [("width", "0px"), ("height", "0px"), ("overflow", "hidden")] {
        style
            .set_property(property, value)
            .map_err(|e| DomError::ElementCreationFailed(format!("{:?}", e)))?;
    }

    Ok(link)
}
