//! Redirect login: build the identity-provider URL.
//!
//! The provider hosts the login page and sends the browser back to
//! `redirect` with `#session_id=...` appended.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use url::Url;

use crate::route::Route;

/// Identity-provider URL carrying the callback target as `redirect`.
///
/// # Errors
///
/// Returns a parse error if `auth_url` is not an absolute URL.
pub fn login_url(auth_url: &str, redirect: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(auth_url)?;
    url.query_pairs_mut().append_pair("redirect", redirect);
    Ok(url)
}

/// Where the provider should send the user back to.
#[must_use]
pub fn callback_url(app_url: &str) -> String {
    format!("{}{}", app_url.trim_end_matches('/'), Route::AuthCallback.path())
}
