//! App routes and the authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components and the CLI share one notion of where a flow ends up, so
//! the callback state machine can return a [`Route`] instead of a string.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::session::SessionContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Pricing,
    Dashboard,
    AuthCallback,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Pricing => "/pricing",
            Self::Dashboard => "/dashboard",
            Self::AuthCallback => "/auth/callback",
        }
    }

    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

/// Where to send the user instead of `route`, if anywhere.
///
/// Nothing is decided while the session bootstrap is still running.
#[must_use]
pub fn guard(route: Route, session: &SessionContext) -> Option<Route> {
    if !route.requires_auth() || session.is_loading() {
        return None;
    }
    if session.is_authenticated() { None } else { Some(Route::Home) }
}
