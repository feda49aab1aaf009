//! Dashboard history of past generations.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::api::ThumbApi;
use crate::error::ApiError;
use crate::notice::Notice;
use crate::types::ThumbnailRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryState {
    /// Newest first, as returned by the backend.
    pub records: Vec<ThumbnailRecord>,
    pub loading: bool,
    /// Set after the first successful load; distinguishes "empty" from "not yet fetched".
    pub loaded: bool,
    pub notice: Option<Notice>,
}

impl HistoryState {
    /// Returns false if a fetch is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish(&mut self, result: Result<Vec<ThumbnailRecord>, ApiError>) {
        self.loading = false;
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "history loaded");
                self.records = records;
                self.loaded = true;
                self.notice = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), "history fetch failed");
                self.notice = Some(Notice::from(&err));
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded && self.records.is_empty()
    }

    /// Fetch `/api/thumbnails`. Returns whether a request was sent.
    pub async fn refresh<A: ThumbApi + ?Sized>(&mut self, api: &A) -> bool {
        if !self.begin() {
            return false;
        }
        let result = api.thumbnails().await;
        self.finish(result);
        true
    }
}
