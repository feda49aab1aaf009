//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionContext` is created by the app shell (or the CLI) and handed
//! to whoever needs it. Route guards read it, the callback flow and logout
//! write it, and the generation flow updates the advisory credit balance.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::api::ThumbApi;
use crate::error::ApiError;
use crate::types::User;

/// Authentication state tracking the current user and bootstrap status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionContext {
    user: Option<User>,
    loading: bool,
}

impl SessionContext {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True between `begin_bootstrap` and `finish_bootstrap`.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Advisory balance of the signed-in user.
    #[must_use]
    pub fn credits(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.credits)
    }

    pub fn begin_bootstrap(&mut self) {
        self.loading = true;
    }

    /// Apply the result of `GET /api/auth/me`.
    ///
    /// Any error counts as "not signed in"; the user can still log in.
    pub fn finish_bootstrap(&mut self, result: Result<Option<User>, ApiError>) {
        self.loading = false;
        match result {
            Ok(user) => self.user = user,
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), "session bootstrap failed");
                self.user = None;
            }
        }
    }

    pub fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = %user.user_id, credits = user.credits, "signed in");
        self.loading = false;
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.user_id, "signed out");
        }
    }

    /// Replace the advisory balance with a value the backend reported.
    pub fn set_credits(&mut self, credits: i64) {
        if let Some(user) = self.user.as_mut() {
            user.credits = credits;
        }
    }

    /// Ask the backend who we are and record the answer.
    pub async fn bootstrap<A: ThumbApi + ?Sized>(&mut self, api: &A) {
        self.begin_bootstrap();
        let result = api.current_user().await;
        self.finish_bootstrap(result);
    }

    /// Log out on the backend, then clear local state.
    ///
    /// Local state is cleared once the backend call has resolved, whatever
    /// its outcome; the result is handed back so the caller can show a notice.
    ///
    /// # Errors
    ///
    /// Returns the backend error, after local state has been cleared.
    pub async fn logout<A: ThumbApi + ?Sized>(&mut self, api: &A) -> Result<(), ApiError> {
        let result = api.logout().await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "logout request failed");
        }
        self.sign_out();
        result
    }
}
