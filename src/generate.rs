//! Thumbnail generation: form validation and request/response view-state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form is assembled client-side and never persisted. Reference images
//! travel inline as base64 data URLs. The backend charges one credit per
//! successful generation and reports the new balance, which replaces the
//! local one verbatim.

#[cfg(test)]
#[path = "generate_test.rs"]
mod generate_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::api::ThumbApi;
use crate::error::ApiError;
use crate::notice::Notice;
use crate::session::SessionContext;
use crate::types::{GenerateRequest, GenerateResponse};

/// Maximum number of reference images per request.
pub const MAX_IMAGES: usize = 3;
/// Maximum size of one reference image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Style presets offered by the form. Free text is accepted too.
pub const STYLE_PRESETS: &[&str] = &["modern", "bold", "minimal", "gaming", "vlog", "tech"];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Describe your thumbnail first.")]
    EmptyDescription,
    #[error("Attach at most {max} images.")]
    TooManyImages { max: usize },
    #[error("{name} is larger than {max_mb} MB.")]
    ImageTooLarge { name: String, max_mb: usize },
    #[error("{name} is not an image ({mime}).")]
    UnsupportedImageType { name: String, mime: String },
    #[error("not a base64 data URL")]
    InvalidDataUrl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Classic,
}

impl AspectRatio {
    pub const ALL: [Self; 4] = [Self::Landscape, Self::Portrait, Self::Square, Self::Classic];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Square => "1:1",
            Self::Classic => "4:3",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ratio| ratio.label() == label.trim())
    }
}

/// A reference image picked by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAttachment {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// # Errors
    ///
    /// Rejects non-`image/*` MIME types and files over [`MAX_IMAGE_BYTES`].
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FormError> {
        let name = name.into();
        let mime = mime.into().trim().to_ascii_lowercase();
        if !mime.starts_with("image/") {
            return Err(FormError::UnsupportedImageType { name, mime });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(FormError::ImageTooLarge { name, max_mb: MAX_IMAGE_BYTES / (1024 * 1024) });
        }
        Ok(Self { name, mime, bytes })
    }

    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Guess an image MIME type from a file name.
#[must_use]
pub fn mime_for_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// A decoded `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decode `data:<mime>;base64,<payload>`.
///
/// # Errors
///
/// Returns [`FormError::InvalidDataUrl`] for anything else, including
/// non-base64 data URLs.
pub fn decode_data_url(input: &str) -> Result<DataUrl, FormError> {
    let rest = input.trim().strip_prefix("data:").ok_or(FormError::InvalidDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(FormError::InvalidDataUrl)?;
    let mime = meta.strip_suffix(";base64").ok_or(FormError::InvalidDataUrl)?;
    let bytes = STANDARD.decode(payload).map_err(|_| FormError::InvalidDataUrl)?;
    Ok(DataUrl { mime: mime.to_owned(), bytes })
}

/// User inputs for one generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateForm {
    pub description: String,
    pub style: Option<String>,
    pub aspect_ratio: Option<AspectRatio>,
    pub images: Vec<ImageAttachment>,
}

impl GenerateForm {
    /// Add a reference image, keeping the form under [`MAX_IMAGES`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError::TooManyImages`] when the form is already full.
    pub fn attach(&mut self, image: ImageAttachment) -> Result<(), FormError> {
        if self.images.len() >= MAX_IMAGES {
            return Err(FormError::TooManyImages { max: MAX_IMAGES });
        }
        self.images.push(image);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Validate and assemble the request body.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn to_request(&self) -> Result<GenerateRequest, FormError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::EmptyDescription);
        }
        if self.images.len() > MAX_IMAGES {
            return Err(FormError::TooManyImages { max: MAX_IMAGES });
        }
        let style = self
            .style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);
        Ok(GenerateRequest {
            description: description.to_owned(),
            style,
            aspect_ratio: self.aspect_ratio,
            images: self.images.iter().map(ImageAttachment::to_data_url).collect(),
        })
    }
}

/// View-state of the generation panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationState {
    /// Most recent generated image (data URL or remote URL).
    pub image: Option<String>,
    pub busy: bool,
    pub notice: Option<Notice>,
}

impl GenerationState {
    /// Start a generation. Returns `None` if one is already in flight or the
    /// form is invalid (a notice explains why).
    pub fn begin(&mut self, form: &GenerateForm) -> Option<GenerateRequest> {
        if self.busy {
            return None;
        }
        match form.to_request() {
            Ok(request) => {
                self.busy = true;
                self.notice = None;
                Some(request)
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                None
            }
        }
    }

    /// Apply the backend's answer.
    ///
    /// On failure the previous image and credit balance are left untouched.
    pub fn finish(&mut self, result: Result<GenerateResponse, ApiError>, session: &mut SessionContext) {
        self.busy = false;
        match result {
            Ok(response) => {
                tracing::info!(credits = response.credits, "thumbnail generated");
                session.set_credits(response.credits);
                self.image = Some(response.image);
                self.notice = Some(Notice::success("Thumbnail ready."));
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), "generation failed");
                self.notice = Some(Notice::from(&err));
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Run one generation against `api`. Returns whether a request was sent.
    pub async fn submit<A: ThumbApi + ?Sized>(
        &mut self,
        api: &A,
        session: &mut SessionContext,
        form: &GenerateForm,
    ) -> bool {
        let Some(request) = self.begin(form) else {
            return false;
        };
        let result = api.generate(&request).await;
        self.finish(result, session);
        true
    }
}
