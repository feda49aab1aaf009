//! Backend call errors.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is caught where the call is made and turned into a
//! [`Notice`](crate::notice::Notice); nothing here is fatal and nothing is
//! retried. `error_code` exists for log correlation only.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by [`ThumbApi`](crate::api::ThumbApi) implementations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("http request failed: {0}")]
    Http(String),

    /// The backend answered 401.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend answered 402 on a generation request.
    #[error("no credits left")]
    InsufficientCredits,

    /// Any other non-success status.
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// A URL returned by the backend or built from config could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The selected pricing tier cannot be bought.
    #[error("pricing tier `{0}` is not purchasable")]
    NotPurchasable(String),

    /// No transport is compiled into this build.
    #[error("backend not available in this build")]
    Unavailable,
}

impl ApiError {
    /// Map a non-success HTTP status and its raw body onto an error.
    ///
    /// FastAPI-style `{"detail": "..."}` bodies are unwrapped so the detail
    /// string is what ends up in logs and notices.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthenticated,
            402 => Self::InsufficientCredits,
            _ => Self::Status { status, detail: detail_from_body(body) },
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "E_HTTP",
            Self::Unauthenticated => "E_UNAUTHENTICATED",
            Self::InsufficientCredits => "E_NO_CREDITS",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidUrl(_) => "E_INVALID_URL",
            Self::NotPurchasable(_) => "E_NOT_PURCHASABLE",
            Self::Unavailable => "E_UNAVAILABLE",
        }
    }

    /// Short user-facing text for a transient notice.
    #[must_use]
    pub fn notice_message(&self) -> String {
        match self {
            Self::Http(_) => "Network error. Please try again.".to_owned(),
            Self::Unauthenticated => "Please sign in to continue.".to_owned(),
            Self::InsufficientCredits => "You're out of credits. Buy a pack to keep generating.".to_owned(),
            Self::Status { detail, .. } if is_displayable(detail) => detail.clone(),
            Self::Status { status, .. } => format!("Request failed ({status})."),
            Self::Decode(_) => "Unexpected response from server.".to_owned(),
            Self::InvalidUrl(_) => "The server returned an invalid link.".to_owned(),
            Self::NotPurchasable(_) => "That plan can't be purchased.".to_owned(),
            Self::Unavailable => "Not available right now.".to_owned(),
        }
    }
}

/// Longest backend detail shown verbatim in a notice.
const MAX_NOTICE_DETAIL: usize = 160;

/// Short single-line prose. Markup, JSON and empty bodies stay in logs only.
fn is_displayable(detail: &str) -> bool {
    !detail.is_empty()
        && detail.chars().count() <= MAX_NOTICE_DETAIL
        && !detail.contains('\n')
        && !detail.starts_with(['<', '{', '['])
}

fn detail_from_body(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(detail) = value.get("detail").and_then(serde_json::Value::as_str) {
            return detail.to_owned();
        }
    }
    trimmed.to_owned()
}
