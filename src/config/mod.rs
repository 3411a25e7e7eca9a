//! Configuration system (layered: code > env > `.env` file).

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::CoraError;
use crate::phone::parse_phone_number_id;

/// Default Vapi API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.vapi.ai";
/// Preferred API key variable.
pub const API_KEY_ENV: &str = "VAPI_API_KEY";
/// Legacy key variable, consulted when `VAPI_API_KEY` is unset.
pub const LEGACY_PRIVATE_KEY_ENV: &str = "VAPI_PRIVATE_KEY";
pub const BASE_URL_ENV: &str = "VAPI_BASE_URL";
pub const PHONE_NUMBER_ID_ENV: &str = "VAPI_PHONE_NUMBER_ID";
pub const MODEL_PROVIDER_ENV: &str = "VAPI_MODEL_PROVIDER";
pub const MODEL_NAME_ENV: &str = "VAPI_MODEL_NAME";

const DEFAULT_MODEL_PROVIDER: &str = "openai";
const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<CoraConfig> = OnceLock::new();

/// Layered configuration for Cora.
///
/// Resolution order for every setting:
/// 1. Values set in code (`with_*`)
/// 2. Process environment variables
/// 3. A `.env` file, which never overrides variables already set
#[derive(Clone)]
pub struct CoraConfig {
    api_key: Option<String>,
    base_url: String,
    default_phone_number_id: Option<String>,
    model_provider: String,
    model_name: String,
}

impl fmt::Debug for CoraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoraConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("default_phone_number_id", &self.default_phone_number_id)
            .field("model_provider", &self.model_provider)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl Default for CoraConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CoraConfig {
    /// Create a config with built-in defaults and no credentials.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_phone_number_id: None,
            model_provider: DEFAULT_MODEL_PROVIDER.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }

    /// Load from environment variables, reading `.env` from the working directory if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_process_env()
    }

    /// Load from environment variables, reading the given dotenv file first.
    ///
    /// Falls back to the default `.env` lookup when `path` does not exist.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, CoraError> {
        let path = path.as_ref();
        if path.exists() {
            dotenvy::from_path(path).map_err(|err| {
                CoraError::Configuration(format!(
                    "Failed to load env file {}: {err}",
                    path.display()
                ))
            })?;
        } else {
            let _ = dotenvy::dotenv();
        }
        Ok(Self::from_process_env())
    }

    fn from_process_env() -> Self {
        let mut config = Self::new();

        config.api_key = non_empty_var(API_KEY_ENV).or_else(|| non_empty_var(LEGACY_PRIVATE_KEY_ENV));
        if let Some(url) = non_empty_var(BASE_URL_ENV) {
            config = config.with_base_url(url);
        }
        config.default_phone_number_id = std::env::var(PHONE_NUMBER_ID_ENV)
            .ok()
            .and_then(|raw| parse_phone_number_id(&raw));
        if let Some(provider) = non_empty_var(MODEL_PROVIDER_ENV) {
            config.model_provider = provider;
        }
        if let Some(name) = non_empty_var(MODEL_NAME_ENV) {
            config.model_name = name;
        }

        config
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static CoraConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the phone number used when a call request does not name one.
    ///
    /// The value goes through the same lenient parsing as `VAPI_PHONE_NUMBER_ID`.
    pub fn with_default_phone_number_id(mut self, id: impl AsRef<str>) -> Self {
        self.default_phone_number_id = parse_phone_number_id(id.as_ref());
        self
    }

    pub fn with_model(mut self, provider: impl Into<String>, name: impl Into<String>) -> Self {
        self.model_provider = provider.into();
        self.model_name = name.into();
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Resolve the API key or explain where it should come from.
    pub fn require_api_key(&self) -> Result<&str, CoraError> {
        self.api_key().ok_or_else(|| {
            CoraError::Configuration(format!(
                "Missing Vapi credentials. Provide {API_KEY_ENV} (or legacy \
                 {LEGACY_PRIVATE_KEY_ENV}) via code, environment variable, or .env file."
            ))
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_phone_number_id(&self) -> Option<&str> {
        self.default_phone_number_id.as_deref()
    }

    pub fn model_provider(&self) -> &str {
        &self.model_provider
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if an API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
