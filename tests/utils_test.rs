use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{Local, TimeZone, Utc};
use spotauth::utils::*;

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("abc", "def"), "Basic YWJjOmRlZg==");
}

#[test]
fn test_basic_auth_header_keeps_colons_verbatim() {
    // id "a:b" and secret "c" encode the same bytes as id "a" and secret "b:c";
    // the header never escapes or drops separators
    assert_eq!(basic_auth_header("a:b", "c"), "Basic YTpiOmM=");
    assert_eq!(basic_auth_header("a", "b:c"), "Basic YTpiOmM=");

    let pairs = [
        ("client", "secret"),
        ("id:with:colons", "s3cr3t"),
        ("", ""),
        ("~!@#$%^&*()", "pass word"),
    ];
    for (id, secret) in pairs {
        let header = basic_auth_header(id, secret);
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, format!("{id}:{secret}"));
    }
}

#[test]
fn test_format_expiration() {
    let expires_at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
    let expected = expires_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let formatted = format_expiration(&expires_at);
    assert_eq!(formatted, expected);
    assert_eq!(formatted.len(), "2030-01-02 03:04:05".len());
}

#[test]
fn test_quote_env_value() {
    assert_eq!(quote_env_value("BQD4x-_abc123"), "BQD4x-_abc123");
    assert_eq!(quote_env_value("http://localhost:8888/callback"), "http://localhost:8888/callback");
    assert_eq!(quote_env_value(""), "''");
    assert_eq!(quote_env_value("two words"), "'two words'");
    assert_eq!(quote_env_value("a#b"), "'a#b'");
    assert_eq!(quote_env_value("$HOME"), "'$HOME'");
    assert_eq!(quote_env_value("it's"), "\"it's\"");
    assert_eq!(quote_env_value("it's \"quoted\""), "\"it's \\\"quoted\\\"\"");
}

#[test]
fn test_env_line_key() {
    assert_eq!(env_line_key("KEY=value"), Some("KEY"));
    assert_eq!(env_line_key("  export KEY = value"), Some("KEY"));
    assert_eq!(env_line_key("KEY="), Some("KEY"));
    assert_eq!(env_line_key("# KEY=value"), None);
    assert_eq!(env_line_key("no assignment"), None);
    assert_eq!(env_line_key("=value"), None);
    assert_eq!(env_line_key(""), None);
}

#[test]
fn test_expand_home() {
    assert_eq!(expand_home(Path::new(".env")), PathBuf::from(".env"));
    assert_eq!(
        expand_home(Path::new("/etc/app/.env")),
        PathBuf::from("/etc/app/.env")
    );

    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_home(Path::new("~/app/.env")), home.join("app/.env"));
    }
}
