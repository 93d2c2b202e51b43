use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn defaults_apply_with_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base, DEFAULT_API_BASE);
    assert_eq!(cfg.user_email, None);
    assert_eq!(cfg.user_name, None);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.page_size, 6);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn overrides_are_honored() {
    let mut map = HashMap::new();
    map.insert("SYNVO_API_BASE", "http://localhost:5000");
    map.insert("SYNVO_USER_EMAIL", "me@example.com");
    map.insert("SYNVO_USER_NAME", "Me");
    map.insert("SYNVO_REQUEST_TIMEOUT_SECS", "5");
    map.insert("SYNVO_PAGE_SIZE", "12");
    map.insert("SYNVO_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base, "http://localhost:5000");
    assert_eq!(cfg.user_email.as_deref(), Some("me@example.com"));
    assert_eq!(cfg.user_name.as_deref(), Some("Me"));
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.page_size, 12);
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn blank_email_means_signed_out() {
    let mut map = HashMap::new();
    map.insert("SYNVO_USER_EMAIL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_email, None);
}

#[test]
fn invalid_timeout_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SYNVO_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SYNVO_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SYNVO_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn invalid_page_size_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SYNVO_PAGE_SIZE", "six");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SYNVO_PAGE_SIZE"),
        "expected InvalidEnvVar(SYNVO_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn zero_page_size_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SYNVO_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SYNVO_PAGE_SIZE"),
        "expected InvalidEnvVar(SYNVO_PAGE_SIZE), got: {result:?}"
    );
}
