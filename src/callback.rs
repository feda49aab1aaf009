//! Login callback: exchange the one-time session identifier for a user.
//!
//! DESIGN
//! ======
//! The identity provider redirects back with `#session_id=<id>` in the URL
//! fragment. The exchange must happen at most once per page load, so the flow
//! is an explicit state machine instead of a "processed" flag:
//!
//! ```text
//! Idle --begin(no marker)--> Done            => home, no backend call
//! Idle --begin(marker)-----> Exchanging      => exchange request goes out
//! Exchanging --complete(ok)--> Done          => dashboard, user stored
//! Exchanging --complete(err)-> Done          => home, session cleared
//! Exchanging | Done --begin--> (unchanged)   => AlreadyHandled
//! ```
//!
//! `Done` is terminal. Failures are never retried and never distinguished:
//! network errors, invalid ids and expired ids all land on the home page.

#[cfg(test)]
#[path = "callback_test.rs"]
mod callback_test;

use crate::api::ThumbApi;
use crate::error::ApiError;
use crate::route::Route;
use crate::session::SessionContext;
use crate::types::{SessionData, SessionId};

/// Fragment key carrying the session identifier.
pub const SESSION_MARKER: &str = "session_id";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallbackPhase {
    #[default]
    Idle,
    Exchanging,
    Done,
}

/// What the caller must do after [`CallbackFlow::begin`].
#[derive(Debug, PartialEq, Eq)]
pub enum CallbackStep {
    /// The flow already ran for this page load. Do nothing.
    AlreadyHandled,
    /// No usable identifier. Navigate home without calling the backend.
    RedirectHome,
    /// Call the exchange endpoint with this identifier, then `complete`.
    Exchange(SessionId),
}

/// One-shot callback state machine. Create one per page load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallbackFlow {
    phase: CallbackPhase,
}

impl CallbackFlow {
    #[must_use]
    pub fn phase(&self) -> CallbackPhase {
        self.phase
    }

    pub fn begin(&mut self, fragment: &str) -> CallbackStep {
        if self.phase != CallbackPhase::Idle {
            return CallbackStep::AlreadyHandled;
        }
        if let Some(session_id) = parse_session_fragment(fragment) {
            self.phase = CallbackPhase::Exchanging;
            CallbackStep::Exchange(session_id)
        } else {
            tracing::debug!("callback without session marker");
            self.phase = CallbackPhase::Done;
            CallbackStep::RedirectHome
        }
    }

    /// Apply the exchange result. Returns `None` unless an exchange was pending.
    pub fn complete(&mut self, result: Result<SessionData, ApiError>, session: &mut SessionContext) -> Option<Route> {
        if self.phase != CallbackPhase::Exchanging {
            return None;
        }
        self.phase = CallbackPhase::Done;
        match result {
            Ok(data) => {
                session.sign_in(data.user);
                Some(Route::Dashboard)
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), "session exchange failed");
                session.sign_out();
                Some(Route::Home)
            }
        }
    }

    /// Run the whole flow against `api`.
    ///
    /// Returns where to navigate, or `None` if the flow had already run.
    pub async fn run<A: ThumbApi + ?Sized>(
        &mut self,
        api: &A,
        session: &mut SessionContext,
        fragment: &str,
    ) -> Option<Route> {
        match self.begin(fragment) {
            CallbackStep::AlreadyHandled => None,
            CallbackStep::RedirectHome => Some(Route::Home),
            CallbackStep::Exchange(session_id) => {
                let result = api.exchange_session(session_id).await;
                self.complete(result, session)
            }
        }
    }
}

/// True if the fragment carries a session marker worth handing to the flow.
#[must_use]
pub fn has_session_marker(fragment: &str) -> bool {
    parse_session_fragment(fragment).is_some()
}

/// Extract the session identifier from a URL fragment such as
/// `#session_id=abc&foo=bar`. The leading `#` is optional and values are
/// form-url-decoded. The first non-empty `session_id` wins.
#[must_use]
pub fn parse_session_fragment(fragment: &str) -> Option<SessionId> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    url::form_urlencoded::parse(fragment.as_bytes())
        .filter(|(key, _)| key == SESSION_MARKER)
        .find_map(|(_, value)| SessionId::new(value.into_owned()))
}

/// Pull the fragment out of a full URL, or accept a bare fragment.
#[must_use]
pub fn fragment_of(input: &str) -> &str {
    input.split_once('#').map_or(input, |(_, fragment)| fragment)
}
