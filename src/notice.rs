//! Transient, dismissible user notifications.

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Error,
}

/// A message shown after an operation completes. Never blocks the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Self::error(err.notice_message())
    }
}
