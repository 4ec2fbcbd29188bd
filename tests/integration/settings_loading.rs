//! Integration tests for layered client settings

use super::test_utils::with_env;
use scc_bootstrap::settings::SettingsLoader;
use std::time::Duration;
use tempfile::TempDir;

const SCC_VARS: [&str; 4] = ["SCC_URL", "SCC_AUTHORIZATION", "SCC_DISABLE_TLS", "SCC_RETRY_COUNT"];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    SCC_VARS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_settings_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("scc.toml");
    std::fs::write(
        &config_file,
        r#"
url = "https://config.local/orders/prod"
authorization = "Bearer file-token"
timeout_secs = 3
retry_wait_ms = 250

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let settings = with_env(&cleared(), || SettingsLoader::load_from_file(&config_file)).unwrap();

    assert_eq!(settings.url, "https://config.local/orders/prod");
    assert_eq!(settings.authorization, "Bearer file-token");
    assert!(!settings.disable_tls);
    assert_eq!(settings.retry_count, 3);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");

    let policy = settings.policy();
    assert_eq!(policy.timeout, Duration::from_secs(3));
    assert_eq!(policy.retry_wait, Duration::from_millis(250));
}

#[test]
fn test_environment_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("scc.toml");
    std::fs::write(
        &config_file,
        r#"
url = "https://config.local/orders/prod"
authorization = "Bearer file-token"
"#,
    )
    .unwrap();

    let vars = [
        ("SCC_URL", Some("https://override.local/orders/dev")),
        ("SCC_AUTHORIZATION", None),
        ("SCC_DISABLE_TLS", Some("true")),
        ("SCC_RETRY_COUNT", Some("1")),
    ];
    let settings = with_env(&vars, || SettingsLoader::load_from_file(&config_file)).unwrap();

    assert_eq!(settings.url, "https://override.local/orders/dev");
    assert_eq!(settings.authorization, "Bearer file-token");
    assert!(settings.disable_tls);
    assert_eq!(settings.retry_count, 1);

    let request = settings.to_request();
    assert_eq!(request.url, "https://override.local/orders/dev");
    assert!(!request.policy.verify_tls);
}

#[test]
fn test_missing_settings_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let result = with_env(&cleared(), || SettingsLoader::load_from_file(&missing));
    assert!(result.is_err());
}

#[test]
fn test_invalid_url_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("scc.toml");
    std::fs::write(&config_file, "url = \"coba\"\n").unwrap();

    let result = with_env(&cleared(), || SettingsLoader::load_from_file(&config_file));
    assert!(result.is_err());
}

#[test]
fn test_environment_authorization_is_kept_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("scc.toml");
    std::fs::write(&config_file, "url = \"https://config.local/orders/prod\"\n").unwrap();

    for token in ["007", "TRUE", "1.50", "Bearer 0042"] {
        let vars = [
            ("SCC_URL", None),
            ("SCC_AUTHORIZATION", Some(token)),
            ("SCC_DISABLE_TLS", None),
            ("SCC_RETRY_COUNT", Some("2")),
        ];
        let settings = with_env(&vars, || SettingsLoader::load_from_file(&config_file)).unwrap();

        assert_eq!(settings.authorization, token);
        assert_eq!(settings.to_request().authorization, token);
        assert_eq!(settings.retry_count, 2);
    }
}
