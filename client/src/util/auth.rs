//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical guard behavior, and every "Sign in"
//! button sends the browser to the same hosted login page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use quickthumb::config::DEFAULT_AUTH_URL;
use quickthumb::route::{self, Route};
use quickthumb::{SessionContext, login};

/// Identity-provider login page baked in at build time.
#[must_use]
pub fn build_auth_url() -> &'static str {
    option_env!("QUICKTHUMB_AUTH_URL").unwrap_or(DEFAULT_AUTH_URL)
}

/// Login URL for an app served from `origin`, or `None` if either URL is
/// malformed.
#[must_use]
pub fn login_href(auth_url: &str, origin: &str) -> Option<String> {
    login::login_url(auth_url, &login::callback_url(origin)).ok().map(String::from)
}

/// Full-page navigation to the hosted login page.
pub fn redirect_to_login() {
    let Some(origin) = crate::util::location::origin() else {
        return;
    };
    match login_href(build_auth_url(), &origin) {
        Some(href) => crate::util::location::assign(&href),
        None => {
            #[cfg(feature = "csr")]
            log::warn!("cannot build login url for origin {origin}");
        }
    }
}

/// Redirect away from `route` whenever the session says it is off limits.
pub fn install_route_guard<F>(route: Route, session: RwSignal<SessionContext>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = session.with(|s| route::guard(route, s)) {
            navigate(target.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
