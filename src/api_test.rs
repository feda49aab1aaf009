use super::*;

#[test]
fn endpoint_url_joins_base_and_path() {
    assert_eq!(endpoint_url("https://api.example.com", endpoints::ME), "https://api.example.com/api/auth/me");
}

#[test]
fn endpoint_url_trims_trailing_slashes() {
    assert_eq!(
        endpoint_url("https://api.example.com//", endpoints::GENERATE),
        "https://api.example.com/api/generate"
    );
}

#[test]
fn endpoint_url_keeps_base_path_prefix() {
    assert_eq!(
        endpoint_url("https://example.com/backend", endpoints::THUMBNAILS),
        "https://example.com/backend/api/thumbnails"
    );
}

#[test]
fn endpoint_url_empty_base_is_same_origin() {
    assert_eq!(endpoint_url("", endpoints::SESSION_DATA), "/api/auth/session-data");
}
