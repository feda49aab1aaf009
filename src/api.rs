//! Backend contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`ThumbApi`] is the seam between view-state and transport. The native
//! implementation is [`HttpApi`](crate::http::HttpApi) (reqwest); the browser
//! app implements it with `gloo-net`; tests use a scripted mock.
//!
//! Futures are `?Send` so one trait serves both WASM and native callers.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::ApiError;
use crate::types::{GenerateRequest, GenerateResponse, SessionData, SessionId, ThumbnailRecord, User};

/// Backend paths, relative to the API base URL.
pub mod endpoints {
    pub const HEALTH: &str = "/api/";
    pub const ME: &str = "/api/auth/me";
    pub const LOGOUT: &str = "/api/auth/logout";
    pub const SESSION_DATA: &str = "/api/auth/session-data";
    pub const CHECKOUT: &str = "/api/create-checkout-session";
    pub const GENERATE: &str = "/api/generate";
    pub const THUMBNAILS: &str = "/api/thumbnails";
}

/// Header carrying the one-time session identifier on the exchange call.
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

/// Cookie the backend sets after a successful exchange.
pub const SESSION_COOKIE: &str = "session_token";

/// Join an API base URL and an endpoint path.
///
/// An empty base yields the bare path, which browsers resolve against the
/// current origin.
#[must_use]
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[async_trait::async_trait(?Send)]
pub trait ThumbApi {
    /// `GET /api/`: liveness check.
    async fn health(&self) -> Result<(), ApiError>;

    /// `GET /api/auth/me`. A 401 is not an error: it yields `Ok(None)`.
    async fn current_user(&self) -> Result<Option<User>, ApiError>;

    /// `POST /api/auth/logout`.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /api/auth/session-data` with the identifier in [`SESSION_ID_HEADER`].
    ///
    /// Takes the identifier by value: it is single-use.
    async fn exchange_session(&self, session_id: SessionId) -> Result<SessionData, ApiError>;

    /// `POST /api/create-checkout-session`. Returns the hosted checkout URL.
    async fn create_checkout_session(&self, pack_id: Option<&str>) -> Result<String, ApiError>;

    /// `POST /api/generate`.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError>;

    /// `GET /api/thumbnails`.
    async fn thumbnails(&self) -> Result<Vec<ThumbnailRecord>, ApiError>;
}
