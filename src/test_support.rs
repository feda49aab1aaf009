//! Scripted `ThumbApi` for state-machine tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::api::ThumbApi;
use crate::error::ApiError;
use crate::types::{GenerateRequest, GenerateResponse, SessionData, SessionId, ThumbnailRecord, User};

/// Build a user with the given balance.
#[must_use]
pub fn sample_user(credits: i64) -> User {
    User {
        user_id: "user_0123456789ab".to_owned(),
        email: "ana@example.com".to_owned(),
        name: "Ana".to_owned(),
        picture: None,
        credits,
        created_at: None,
    }
}

#[must_use]
pub fn sample_record(id: &str) -> ThumbnailRecord {
    ThumbnailRecord {
        id: id.to_owned(),
        description: format!("thumbnail {id}"),
        style: Some("modern".to_owned()),
        aspect_ratio: Some("16:9".to_owned()),
        image_url: None,
        created_at: "2025-01-01T00:00:00".to_owned(),
    }
}

/// Responses are queued per endpoint and popped in order. Every call is
/// recorded by name so tests can assert what went over the wire.
#[derive(Default)]
pub struct MockApi {
    pub calls: RefCell<Vec<String>>,
    pub me: RefCell<VecDeque<Result<Option<User>, ApiError>>>,
    pub logout: RefCell<VecDeque<Result<(), ApiError>>>,
    pub exchange: RefCell<VecDeque<Result<SessionData, ApiError>>>,
    pub checkout: RefCell<VecDeque<Result<String, ApiError>>>,
    pub generate: RefCell<VecDeque<Result<GenerateResponse, ApiError>>>,
    pub thumbnails: RefCell<VecDeque<Result<Vec<ThumbnailRecord>, ApiError>>>,
    pub exchanged_ids: RefCell<Vec<String>>,
    pub checkout_packs: RefCell<Vec<Option<String>>>,
}

impl MockApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_owned());
    }
}

fn next<T>(queue: &RefCell<VecDeque<Result<T, ApiError>>>, name: &str) -> Result<T, ApiError> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Decode(format!("no scripted response for {name}"))))
}

#[async_trait::async_trait(?Send)]
impl ThumbApi for MockApi {
    async fn health(&self) -> Result<(), ApiError> {
        self.record("health");
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        self.record("me");
        next(&self.me, "me")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout");
        next(&self.logout, "logout")
    }

    async fn exchange_session(&self, session_id: SessionId) -> Result<SessionData, ApiError> {
        self.record("exchange");
        self.exchanged_ids.borrow_mut().push(session_id.into_inner());
        next(&self.exchange, "exchange")
    }

    async fn create_checkout_session(&self, pack_id: Option<&str>) -> Result<String, ApiError> {
        self.record("checkout");
        self.checkout_packs.borrow_mut().push(pack_id.map(ToOwned::to_owned));
        next(&self.checkout, "checkout")
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.record("generate");
        next(&self.generate, "generate")
    }

    async fn thumbnails(&self) -> Result<Vec<ThumbnailRecord>, ApiError> {
        self.record("thumbnails");
        next(&self.thumbnails, "thumbnails")
    }
}
