//! # quickthumb
//!
//! Client core for the QuickThumb thumbnail-generation service.
//!
//! This crate owns everything the browser app (`client/`) and the command
//! line tool (`cli/`) share: wire types, the backend contract
//! ([`api::ThumbApi`]), the session context, the one-shot login callback
//! state machine, and the request/response view-state for generation,
//! history, and checkout. The backend itself lives elsewhere; this crate only
//! talks to it over HTTPS/JSON.
//!
//! ARCHITECTURE
//! ============
//! State types never perform I/O on their own. Each operation is split into
//! `begin` (synchronous, decides whether a request goes out) and `finish`
//! (synchronous, applies the result), with an `async` convenience that wires
//! the two around a [`api::ThumbApi`] call. The split lets reactive UIs keep
//! state in signals without holding borrows across `.await`.

pub mod api;
pub mod callback;
pub mod config;
pub mod error;
pub mod generate;
pub mod history;
#[cfg(feature = "http")]
pub mod http;
pub mod login;
pub mod notice;
pub mod pricing;
pub mod route;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::ThumbApi;
pub use callback::{CallbackFlow, CallbackPhase, CallbackStep};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use generate::{AspectRatio, FormError, GenerateForm, GenerationState, ImageAttachment};
pub use history::HistoryState;
#[cfg(feature = "http")]
pub use http::HttpApi;
pub use notice::{Notice, NoticeLevel};
pub use pricing::{PaymentStatus, PricingTier};
pub use route::Route;
pub use session::SessionContext;
pub use types::{GenerateRequest, GenerateResponse, SessionData, SessionId, ThumbnailRecord, User};
