use super::*;
use crate::test_support::{MockApi, sample_user};

fn session_data(credits: i64) -> SessionData {
    SessionData { user: sample_user(credits), session_token: Some("tok".to_owned()) }
}

// =============================================================
// parse_session_fragment
// =============================================================

#[test]
fn parse_fragment_with_hash() {
    let id = parse_session_fragment("#session_id=abc123").unwrap();
    assert_eq!(id.as_str(), "abc123");
}

#[test]
fn parse_fragment_without_hash_and_extra_pairs() {
    let id = parse_session_fragment("state=x&session_id=abc&foo=bar").unwrap();
    assert_eq!(id.as_str(), "abc");
}

#[test]
fn parse_fragment_decodes_percent_escapes() {
    let id = parse_session_fragment("#session_id=a%2Bb%3D").unwrap();
    assert_eq!(id.as_str(), "a+b=");
}

#[test]
fn parse_fragment_trims_surrounding_whitespace() {
    let id = parse_session_fragment("#session_id=%20abc%20").unwrap();
    assert_eq!(id.as_str(), "abc");
    assert!(parse_session_fragment("#session_id=%20%20").is_none());
}

#[test]
fn parse_fragment_skips_empty_value() {
    assert!(parse_session_fragment("#session_id=").is_none());
    let id = parse_session_fragment("#session_id=&session_id=second").unwrap();
    assert_eq!(id.as_str(), "second");
}

#[test]
fn parse_fragment_without_marker_is_none() {
    assert!(parse_session_fragment("").is_none());
    assert!(parse_session_fragment("#").is_none());
    assert!(parse_session_fragment("#section-2").is_none());
    assert!(parse_session_fragment("#my_session_id=abc").is_none());
}

#[test]
fn has_session_marker_matches_parse() {
    assert!(has_session_marker("#session_id=x"));
    assert!(!has_session_marker("#other=x"));
}

#[test]
fn fragment_of_extracts_from_full_url() {
    assert_eq!(fragment_of("http://localhost:3000/auth/callback#session_id=x"), "session_id=x");
    assert_eq!(fragment_of("session_id=x"), "session_id=x");
}

// =============================================================
// begin / complete
// =============================================================

#[test]
fn begin_without_marker_redirects_home_and_finishes() {
    let mut flow = CallbackFlow::default();
    assert_eq!(flow.begin("#nothing"), CallbackStep::RedirectHome);
    assert_eq!(flow.phase(), CallbackPhase::Done);
}

#[test]
fn begin_with_marker_moves_to_exchanging() {
    let mut flow = CallbackFlow::default();
    let step = flow.begin("#session_id=abc");
    assert!(matches!(step, CallbackStep::Exchange(ref id) if id.as_str() == "abc"));
    assert_eq!(flow.phase(), CallbackPhase::Exchanging);
}

#[test]
fn begin_twice_is_already_handled() {
    let mut flow = CallbackFlow::default();
    let _first = flow.begin("#session_id=abc");
    assert_eq!(flow.begin("#session_id=abc"), CallbackStep::AlreadyHandled);
    assert_eq!(flow.phase(), CallbackPhase::Exchanging);
}

#[test]
fn complete_success_signs_in_and_targets_dashboard() {
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();
    let _step = flow.begin("#session_id=abc");

    let route = flow.complete(Ok(session_data(5)), &mut session);

    assert_eq!(route, Some(Route::Dashboard));
    assert_eq!(flow.phase(), CallbackPhase::Done);
    assert_eq!(session.credits(), Some(5));
}

#[test]
fn complete_failure_clears_session_and_targets_home() {
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();
    session.sign_in(sample_user(1));
    let _step = flow.begin("#session_id=abc");

    let route = flow.complete(Err(ApiError::Unauthenticated), &mut session);

    assert_eq!(route, Some(Route::Home));
    assert!(!session.is_authenticated());
}

#[test]
fn complete_without_pending_exchange_is_ignored() {
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();
    assert_eq!(flow.complete(Ok(session_data(5)), &mut session), None);
    assert!(!session.is_authenticated());
    assert_eq!(flow.phase(), CallbackPhase::Idle);
}

#[test]
fn complete_twice_applies_once() {
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();
    let _step = flow.begin("#session_id=abc");
    assert_eq!(flow.complete(Ok(session_data(5)), &mut session), Some(Route::Dashboard));
    assert_eq!(flow.complete(Ok(session_data(99)), &mut session), None);
    assert_eq!(session.credits(), Some(5));
}

// =============================================================
// run
// =============================================================

#[tokio::test]
async fn run_without_marker_never_calls_backend() {
    let api = MockApi::default();
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();

    let route = flow.run(&api, &mut session, "").await;

    assert_eq!(route, Some(Route::Home));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn run_exchanges_exactly_once_under_repeated_renders() {
    let api = MockApi::default();
    api.exchange.borrow_mut().push_back(Ok(session_data(5)));
    api.exchange.borrow_mut().push_back(Ok(session_data(5)));
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();

    let first = flow.run(&api, &mut session, "#session_id=abc").await;
    let second = flow.run(&api, &mut session, "#session_id=abc").await;
    let third = flow.run(&api, &mut session, "#session_id=abc").await;

    assert_eq!(first, Some(Route::Dashboard));
    assert_eq!(second, None);
    assert_eq!(third, None);
    assert_eq!(api.calls(), vec!["exchange"]);
    assert_eq!(api.exchanged_ids.borrow().as_slice(), ["abc".to_owned()]);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn run_failed_exchange_is_terminal() {
    let api = MockApi::default();
    api.exchange.borrow_mut().push_back(Err(ApiError::Http("offline".to_owned())));
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();

    let route = flow.run(&api, &mut session, "#session_id=abc").await;
    let retry = flow.run(&api, &mut session, "#session_id=abc").await;

    assert_eq!(route, Some(Route::Home));
    assert_eq!(retry, None);
    assert_eq!(api.calls(), vec!["exchange"]);
    assert!(!session.is_authenticated());
}
