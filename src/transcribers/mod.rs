//! Transcriber profiles and the Deepgram preset catalog.

use serde_json::{json, Map, Value};

pub const DEEPGRAM_PROVIDER: &str = "deepgram";
pub const DEEPGRAM_DEFAULT_MODEL: &str = "nova-2";

/// A speech-to-text configuration that renders the assistant `transcriber` payload.
///
/// `options` carries provider-specific flags (keywords, endpointing, ...)
/// copied verbatim into the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriberProfile {
    pub provider: String,
    pub model: String,
    pub language: Option<String>,
    pub options: Map<String, Value>,
}

impl TranscriberProfile {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            language: None,
            options: Map::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Render `{provider, model, language?, ...options}`.
    pub fn payload(&self) -> Value {
        self.payload_with(None, None, Map::new())
    }

    /// Render the payload with send-time overrides.
    ///
    /// `overrides` are applied last and win over both the stored options and
    /// the base fields. An empty language omits the `language` key.
    pub fn payload_with(
        &self,
        model: Option<&str>,
        language: Option<&str>,
        overrides: Map<String, Value>,
    ) -> Value {
        let mut payload = Map::new();
        payload.insert("provider".into(), json!(self.provider));
        payload.insert("model".into(), json!(model.unwrap_or(&self.model)));

        let language = language.or(self.language.as_deref());
        if let Some(language) = language.filter(|l| !l.is_empty()) {
            payload.insert("language".into(), json!(language));
        }

        payload.extend(self.options.clone());
        payload.extend(overrides);
        Value::Object(payload)
    }
}

/// Deepgram transcriber presets.
///
/// ```
/// use cora::transcribers::Deepgram;
///
/// let english = Deepgram::default().english();
/// assert_eq!(english.payload()["language"], "en");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Deepgram {
    default_model: String,
}

impl Default for Deepgram {
    fn default() -> Self {
        Self::new(DEEPGRAM_DEFAULT_MODEL)
    }
}

impl Deepgram {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
        }
    }

    pub fn english(&self) -> TranscriberProfile {
        self.custom(Some("en"), None, Map::new())
    }

    pub fn spanish(&self) -> TranscriberProfile {
        self.custom(Some("es"), None, Map::new())
    }

    /// Any language/model combination not covered by a preset.
    pub fn custom(
        &self,
        language: Option<&str>,
        model: Option<&str>,
        options: Map<String, Value>,
    ) -> TranscriberProfile {
        TranscriberProfile {
            provider: DEEPGRAM_PROVIDER.to_string(),
            model: model.unwrap_or(&self.default_model).to_string(),
            language: language.map(str::to_string),
            options,
        }
    }
}
