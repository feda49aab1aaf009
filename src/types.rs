//! Wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON. Where the backend has used more
//! than one name for the same field, serde aliases accept both so history
//! written by older backends still renders.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::generate::AspectRatio;

/// One-time identifier handed back by the identity provider.
///
/// Deliberately not `Clone`: exchanging it consumes it, so a second exchange
/// with the same value cannot be written by accident.
#[derive(PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw identifier, trimmed. Blank values are rejected.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == raw.len() {
            Some(Self(raw))
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionId(<redacted>)")
    }
}

/// An authenticated user as returned by `/api/auth/me` and the session exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier (e.g. `user_1a2b3c4d5e6f`).
    pub user_id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar URL from the identity provider, if any.
    #[serde(default)]
    pub picture: Option<String>,
    /// Advisory credit balance. The backend value is authoritative.
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub credits: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `GET /api/auth/session-data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: User,
    /// Long-lived session token. Browsers receive it as a cookie as well;
    /// native clients keep it and send it back themselves.
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Body of `POST /api/generate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    /// Reference images as `data:<mime>;base64,...` URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Response of `POST /api/generate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Data URL or remote URL of the generated image.
    pub image: String,
    /// Balance after this generation was charged.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub credits: i64,
}

/// A past generation listed by `GET /api/thumbnails`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailRecord {
    pub id: String,
    #[serde(alias = "prompt")]
    pub description: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /api/create-checkout-session`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
}

/// Response of `POST /api/create-checkout-session`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
