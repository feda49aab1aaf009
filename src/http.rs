//! Native [`ThumbApi`] transport over reqwest.
//!
//! Browsers carry the session in an `HttpOnly` cookie. A native client has no
//! cookie jar, so it keeps the token returned by the session exchange and
//! sends it back as a `Cookie` header. Pure parsing lives in `parse_json` for
//! testability.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::{SESSION_COOKIE, SESSION_ID_HEADER, ThumbApi, endpoint_url, endpoints};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::{
    CheckoutRequest, CheckoutResponse, GenerateRequest, GenerateResponse, SessionData, SessionId, ThumbnailRecord,
    User,
};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    session_token: Mutex<Option<String>>,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.trim_end_matches('/').to_owned(), session_token: Mutex::new(None) })
    }

    /// Start with a previously issued session token.
    #[must_use]
    pub fn with_session_token(self, token: impl Into<String>) -> Self {
        self.set_session_token(Some(token.into()));
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        self.session_token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_session_token(&self, token: Option<String>) {
        *self.session_token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!(%method, %url, "backend request");
        let builder = self.http.request(method, url);
        match self.session_token() {
            Some(token) => builder.header(COOKIE, format!("{SESSION_COOKIE}={token}")),
            None => builder,
        }
    }

    /// Send and return `(status, body)` without interpreting the status.
    async fn send(&self, builder: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Http(e.to_string()))?;
        if !(200..300).contains(&status) {
            tracing::warn!(status, "backend returned error status");
        }
        Ok((status, text))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let (status, text) = self.send(builder).await?;
        check_status(status, &text)?;
        parse_json(&text)
    }
}

fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(ApiError::from_status(status, body)) }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// CONTRACT
// =============================================================================

#[async_trait::async_trait(?Send)]
impl ThumbApi for HttpApi {
    async fn health(&self) -> Result<(), ApiError> {
        let (status, text) = self.send(self.request(Method::GET, endpoints::HEALTH)).await?;
        check_status(status, &text)
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let (status, text) = self.send(self.request(Method::GET, endpoints::ME)).await?;
        if status == 401 {
            return Ok(None);
        }
        check_status(status, &text)?;
        parse_json(&text).map(Some)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let result = self.send(self.request(Method::POST, endpoints::LOGOUT)).await;
        self.set_session_token(None);
        let (status, text) = result?;
        check_status(status, &text)
    }

    async fn exchange_session(&self, session_id: SessionId) -> Result<SessionData, ApiError> {
        let builder = self
            .request(Method::GET, endpoints::SESSION_DATA)
            .header(SESSION_ID_HEADER, session_id.into_inner());
        let data: SessionData = self.send_json(builder).await?;
        if let Some(token) = &data.session_token {
            self.set_session_token(Some(token.clone()));
        }
        Ok(data)
    }

    async fn create_checkout_session(&self, pack_id: Option<&str>) -> Result<String, ApiError> {
        let body = CheckoutRequest { pack_id: pack_id.map(ToOwned::to_owned) };
        let response: CheckoutResponse =
            self.send_json(self.request(Method::POST, endpoints::CHECKOUT).json(&body)).await?;
        Ok(response.url)
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.send_json(self.request(Method::POST, endpoints::GENERATE).json(request)).await
    }

    async fn thumbnails(&self) -> Result<Vec<ThumbnailRecord>, ApiError> {
        self.send_json(self.request(Method::GET, endpoints::THUMBNAILS)).await
    }
}
