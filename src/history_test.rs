use super::*;
use crate::test_support::{MockApi, sample_record};

#[test]
fn begin_refuses_while_loading() {
    let mut state = HistoryState::default();
    assert!(state.begin());
    assert!(!state.begin());
    state.finish(Ok(vec![]));
    assert!(state.begin());
}

#[test]
fn finish_success_replaces_records() {
    let mut state = HistoryState { records: vec![sample_record("old")], ..HistoryState::default() };
    state.begin();
    state.finish(Ok(vec![sample_record("a"), sample_record("b")]));

    let ids: Vec<&str> = state.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(state.loaded);
    assert!(!state.loading);
}

#[test]
fn finish_failure_keeps_records_and_sets_notice() {
    let mut state = HistoryState { records: vec![sample_record("old")], loaded: true, ..HistoryState::default() };
    state.begin();
    state.finish(Err(ApiError::Http("connection reset".to_owned())));

    assert_eq!(state.records.len(), 1);
    assert!(state.notice.as_ref().is_some_and(Notice::is_error));
    assert!(!state.loading);
}

#[test]
fn is_empty_only_after_load() {
    let mut state = HistoryState::default();
    assert!(!state.is_empty());
    state.finish(Ok(vec![]));
    assert!(state.is_empty());
}

#[tokio::test]
async fn refresh_calls_backend_once() {
    let api = MockApi::default();
    api.thumbnails.borrow_mut().push_back(Ok(vec![sample_record("x")]));
    let mut state = HistoryState::default();

    assert!(state.refresh(&api).await);
    assert_eq!(api.calls(), vec!["thumbnails"]);
    assert_eq!(state.records.len(), 1);
}

#[tokio::test]
async fn refresh_while_loading_skips_backend() {
    let api = MockApi::default();
    let mut state = HistoryState { loading: true, ..HistoryState::default() };

    assert!(!state.refresh(&api).await);
    assert!(api.calls().is_empty());
}
