//! Thin wrappers over `window.location`.
//!
//! Outside the browser every getter returns `None` and `assign` is a no-op.

/// Current URL fragment without the leading `#`.
pub fn fragment() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        Some(hash.trim_start_matches('#').to_owned())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Current query string without the leading `?`.
pub fn query() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let search = web_sys::window()?.location().search().ok()?;
        Some(search.trim_start_matches('?').to_owned())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Scheme, host and port of the running app.
pub fn origin() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Full-page navigation, leaving the SPA (login provider, checkout).
pub fn assign(href: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().set_href(href) {
            log::warn!("navigation to {href} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = href;
    }
}
