//! Shared test utilities for integration tests

use serde_json::{json, Value};
use std::sync::Mutex;

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`None` removes), restoring the previous
/// values afterwards.
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
        .collect();

    for (key, value) in vars {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }

    result
}

/// Config server environment body with the given `(name, source)` groups.
pub fn environment_body(sources: Value) -> Value {
    json!({
        "name": "test-app",
        "profiles": ["default"],
        "label": "main",
        "version": "1.0.0",
        "state": "active",
        "propertySources": sources
    })
}
