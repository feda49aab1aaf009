use super::*;

// =============================================================
// from_status
// =============================================================

#[test]
fn from_status_401_is_unauthenticated() {
    assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthenticated));
}

#[test]
fn from_status_402_is_insufficient_credits() {
    assert!(matches!(
        ApiError::from_status(402, r#"{"detail":"No credits left"}"#),
        ApiError::InsufficientCredits
    ));
}

#[test]
fn from_status_unwraps_fastapi_detail() {
    let err = ApiError::from_status(500, r#"{"detail":"No image generated"}"#);
    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "No image generated");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn from_status_keeps_plain_text_body() {
    let err = ApiError::from_status(502, "  bad gateway \n");
    assert_eq!(err.to_string(), "server returned 502: bad gateway");
}

// =============================================================
// notice_message
// =============================================================

#[test]
fn notice_message_for_empty_detail_mentions_status() {
    let err = ApiError::Status { status: 503, detail: String::new() };
    assert_eq!(err.notice_message(), "Request failed (503).");
}

#[test]
fn notice_message_prefers_backend_detail() {
    let err = ApiError::from_status(400, r#"{"detail":"Missing X-Session-ID"}"#);
    assert_eq!(err.notice_message(), "Missing X-Session-ID");
}

#[test]
fn notice_message_hides_html_error_page() {
    let body = format!("<html><head><title>502 Bad Gateway</title></head><body>{}</body></html>", "x".repeat(2000));
    let err = ApiError::from_status(502, &body);
    assert_eq!(err.notice_message(), "Request failed (502).");
    assert!(matches!(err, ApiError::Status { ref detail, .. } if detail.starts_with("<html>")));
}

#[test]
fn notice_message_hides_validation_error_list() {
    let body = r#"{"detail":[{"loc":["body","text"],"msg":"field required","type":"value_error.missing"}]}"#;
    let err = ApiError::from_status(422, body);
    assert_eq!(err.notice_message(), "Request failed (422).");
}

#[test]
fn notice_message_hides_overlong_plain_text() {
    let err = ApiError::from_status(500, &"e".repeat(500));
    assert_eq!(err.notice_message(), "Request failed (500).");
}

#[test]
fn notice_message_shows_short_plain_text() {
    let err = ApiError::from_status(503, "Service temporarily unavailable");
    assert_eq!(err.notice_message(), "Service temporarily unavailable");
}

#[test]
fn notice_message_hides_transport_details() {
    let err = ApiError::Http("tcp connect error: Connection refused".to_owned());
    assert_eq!(err.notice_message(), "Network error. Please try again.");
}

#[test]
fn error_codes_are_distinct() {
    let errors = [
        ApiError::Http(String::new()),
        ApiError::Unauthenticated,
        ApiError::InsufficientCredits,
        ApiError::Status { status: 500, detail: String::new() },
        ApiError::Decode(String::new()),
        ApiError::NotPurchasable("free".to_owned()),
        ApiError::Unavailable,
    ];
    for (i, a) in errors.iter().enumerate() {
        for (j, b) in errors.iter().enumerate() {
            if i != j {
                assert_ne!(a.error_code(), b.error_code());
            }
        }
    }
}
