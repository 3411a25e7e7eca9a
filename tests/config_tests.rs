//! Tests for environment-driven configuration.

use std::io::Write;
use std::sync::{Mutex, OnceLock};

use cora::config::CoraConfig;
use cora::error::CoraError;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 6] = [
    "VAPI_API_KEY",
    "VAPI_PRIVATE_KEY",
    "VAPI_BASE_URL",
    "VAPI_PHONE_NUMBER_ID",
    "VAPI_MODEL_PROVIDER",
    "VAPI_MODEL_NAME",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Snapshot the config variables and clear them for the test.
    fn clean() -> Self {
        let saved = CONFIG_ENV_VARS
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        for key in CONFIG_ENV_VARS {
            std::env::remove_var(key);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn from_env_prefers_api_key_over_legacy_private_key() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_API_KEY", "primary");
    std::env::set_var("VAPI_PRIVATE_KEY", "legacy");

    let config = CoraConfig::from_env();

    assert_eq!(config.api_key(), Some("primary"));
}

#[test]
fn from_env_falls_back_to_legacy_private_key() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_PRIVATE_KEY", "legacy");

    let config = CoraConfig::from_env();

    assert_eq!(config.api_key(), Some("legacy"));
    assert!(config.has_credentials());
}

#[test]
fn from_env_without_key_fails_when_key_is_required() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();

    let config = CoraConfig::from_env();

    assert!(!config.has_credentials());
    let err = config.require_api_key().unwrap_err();
    assert!(matches!(err, CoraError::Configuration(ref m) if m.contains("VAPI_API_KEY")));
}

#[test]
fn from_env_reads_model_and_base_url_overrides() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_BASE_URL", "http://localhost:9000/");
    std::env::set_var("VAPI_MODEL_PROVIDER", "anthropic");
    std::env::set_var("VAPI_MODEL_NAME", "claude-3-5-haiku");

    let config = CoraConfig::from_env();

    assert_eq!(config.base_url(), "http://localhost:9000");
    assert_eq!(config.model_provider(), "anthropic");
    assert_eq!(config.model_name(), "claude-3-5-haiku");
}

#[test]
fn from_env_uses_defaults_when_unset() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();

    let config = CoraConfig::from_env();

    assert_eq!(config.base_url(), "https://api.vapi.ai");
    assert_eq!(config.model_provider(), "openai");
    assert_eq!(config.model_name(), "gpt-4o-mini");
    assert_eq!(config.default_phone_number_id(), None);
}

#[test]
fn phone_number_id_is_parsed_leniently() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var(
        "VAPI_PHONE_NUMBER_ID",
        "  \"6f1b3c2a-9d4e-4f6a-8b7c-1a2b3c4d5e6f\"  # main line",
    );

    let config = CoraConfig::from_env();

    assert_eq!(
        config.default_phone_number_id(),
        Some("6f1b3c2a-9d4e-4f6a-8b7c-1a2b3c4d5e6f")
    );
}

#[test]
fn comment_only_phone_number_id_is_unset() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_PHONE_NUMBER_ID", "   # fill me in");

    let config = CoraConfig::from_env();

    assert_eq!(config.default_phone_number_id(), None);
}

#[test]
fn from_env_file_loads_variables_from_the_given_file() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "VAPI_API_KEY=file-key").unwrap();
    writeln!(file, "VAPI_MODEL_NAME=gpt-4o").unwrap();

    let config = CoraConfig::from_env_file(file.path()).unwrap();

    assert_eq!(config.api_key(), Some("file-key"));
    assert_eq!(config.model_name(), "gpt-4o");
}

#[test]
fn from_env_file_does_not_override_process_environment() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_API_KEY", "process-key");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "VAPI_API_KEY=file-key").unwrap();

    let config = CoraConfig::from_env_file(file.path()).unwrap();

    assert_eq!(config.api_key(), Some("process-key"));
}

#[test]
fn from_env_file_with_missing_path_falls_back_to_environment() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_API_KEY", "process-key");
    let dir = tempfile::tempdir().unwrap();

    let config = CoraConfig::from_env_file(dir.path().join("missing.env")).unwrap();

    assert_eq!(config.api_key(), Some("process-key"));
}

#[test]
fn explicit_values_override_environment() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::clean();
    std::env::set_var("VAPI_API_KEY", "env-key");

    let config = CoraConfig::from_env()
        .with_api_key("code-key")
        .with_model("groq", "llama-3.1-8b-instant");

    assert_eq!(config.api_key(), Some("code-key"));
    assert_eq!(config.model_provider(), "groq");
    assert_eq!(config.model_name(), "llama-3.1-8b-instant");
}
