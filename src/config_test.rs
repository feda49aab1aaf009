use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(
        cfg.timeouts,
        HttpTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("QUICKTHUMB_API_URL", "https://api.quickthumb.test/"),
        ("QUICKTHUMB_AUTH_URL", "https://login.example.test/"),
        ("QUICKTHUMB_APP_URL", "https://quickthumb.test/"),
        ("QUICKTHUMB_REQUEST_TIMEOUT_SECS", "30"),
        ("QUICKTHUMB_CONNECT_TIMEOUT_SECS", " 3 "),
    ]))
    .unwrap();

    assert_eq!(cfg.api_url, "https://api.quickthumb.test");
    assert_eq!(cfg.auth_url, "https://login.example.test/");
    assert_eq!(cfg.app_url, "https://quickthumb.test");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 30, connect_secs: 3 });
}

#[test]
fn from_lookup_blank_value_uses_default() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("QUICKTHUMB_API_URL", "   ")])).unwrap();
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
}

#[test]
fn from_lookup_bad_number_falls_back() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("QUICKTHUMB_REQUEST_TIMEOUT_SECS", "soon")])).unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn from_lookup_rejects_relative_url() {
    let err = ClientConfig::from_lookup(lookup_from(&[("QUICKTHUMB_API_URL", "/api")])).unwrap_err();
    assert!(err.to_string().contains("QUICKTHUMB_API_URL"));
}

#[test]
fn from_lookup_rejects_non_http_scheme() {
    let err = ClientConfig::from_lookup(lookup_from(&[("QUICKTHUMB_AUTH_URL", "ftp://auth.example.test/")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { var: "QUICKTHUMB_AUTH_URL", .. }));
}

#[test]
fn login_url_uses_callback_route() {
    let cfg = ClientConfig::default();
    let url = cfg.login_url().unwrap();
    assert!(url.as_str().starts_with(DEFAULT_AUTH_URL));
    assert!(url.as_str().ends_with("redirect=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"));
}
