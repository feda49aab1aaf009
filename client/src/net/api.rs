//! Browser implementation of the backend contract.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, with cookies included so
//! the backend's `session_token` cookie rides along.
//! Native builds (tests, tooling): every call fails with
//! [`ApiError::Unavailable`], since these endpoints only make sense in a
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to a `Result`; pages turn failures into notices so a
//! flaky backend never breaks rendering.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "csr"))]
use quickthumb::api::endpoints;
use quickthumb::api::{ThumbApi, endpoint_url};
use quickthumb::types::{GenerateRequest, GenerateResponse, SessionData, SessionId, ThumbnailRecord, User};
use quickthumb::ApiError;
#[cfg(any(test, feature = "csr"))]
use serde::de::DeserializeOwned;

/// Backend base URL baked in at build time. Empty means same origin.
#[must_use]
pub fn build_api_base() -> &'static str {
    option_env!("QUICKTHUMB_API_URL").unwrap_or_default()
}

/// `fetch`-based [`ThumbApi`]. Cheap to clone; provided via context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrowserApi {
    base: String,
}

impl BrowserApi {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(build_api_base())
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        endpoint_url(&self.base, path)
    }
}

/// Interpret a finished response: status first, then JSON body.
#[cfg(any(test, feature = "csr"))]
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(any(test, feature = "csr"))]
fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(ApiError::from_status(status, body)) }
}

#[cfg(feature = "csr")]
mod fetch {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use quickthumb::ApiError;
    use web_sys::RequestCredentials;

    pub(super) fn get(url: &str) -> RequestBuilder {
        Request::get(url).credentials(RequestCredentials::Include)
    }

    pub(super) fn post(url: &str) -> RequestBuilder {
        Request::post(url).credentials(RequestCredentials::Include)
    }

    pub(super) fn json<B: serde::Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
        builder.json(body).map_err(|e| ApiError::Http(e.to_string()))
    }

    pub(super) async fn read(response: Response) -> Result<(u16, String), ApiError> {
        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Http(e.to_string()))?;
        Ok((status, text))
    }

    pub(super) async fn send(builder: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Http(e.to_string()))?;
        read(response).await
    }

    pub(super) async fn send_request(request: Request) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Http(e.to_string()))?;
        read(response).await
    }
}

#[async_trait::async_trait(?Send)]
impl ThumbApi for BrowserApi {
    async fn health(&self) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let (status, body) = fetch::send(fetch::get(&self.url(endpoints::HEALTH))).await?;
            check_status(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let (status, body) = fetch::send(fetch::get(&self.url(endpoints::ME))).await?;
            if status == 401 {
                return Ok(None);
            }
            decode_body(status, &body).map(Some)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let (status, body) = fetch::send(fetch::post(&self.url(endpoints::LOGOUT))).await?;
            check_status(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn exchange_session(&self, session_id: SessionId) -> Result<SessionData, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = fetch::get(&self.url(endpoints::SESSION_DATA))
                .header(quickthumb::api::SESSION_ID_HEADER, &session_id.into_inner());
            let (status, body) = fetch::send(builder).await?;
            decode_body(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            drop(session_id);
            Err(ApiError::Unavailable)
        }
    }

    async fn create_checkout_session(&self, pack_id: Option<&str>) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let body = quickthumb::types::CheckoutRequest { pack_id: pack_id.map(ToOwned::to_owned) };
            let request = fetch::json(fetch::post(&self.url(endpoints::CHECKOUT)), &body)?;
            let (status, text) = fetch::send_request(request).await?;
            decode_body::<quickthumb::types::CheckoutResponse>(status, &text).map(|r| r.url)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = pack_id;
            Err(ApiError::Unavailable)
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let request = fetch::json(fetch::post(&self.url(endpoints::GENERATE)), request)?;
            let (status, text) = fetch::send_request(request).await?;
            decode_body(status, &text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn thumbnails(&self) -> Result<Vec<ThumbnailRecord>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let (status, body) = fetch::send(fetch::get(&self.url(endpoints::THUMBNAILS))).await?;
            decode_body(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }
}
