//! Voice profile value object.

use serde_json::{json, Value};

/// A provider voice that renders itself into the assistant `voice` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfile {
    pub provider: String,
    pub voice_id: String,
    pub model: Option<String>,
    pub speed: Option<f64>,
}

impl VoiceProfile {
    pub fn new(provider: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            voice_id: voice_id.into(),
            model: None,
            speed: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Render `{provider, voiceId, model?, speed?}`.
    pub fn payload(&self) -> Value {
        self.payload_with(None, None)
    }

    /// Render the payload with send-time model/speed overrides.
    ///
    /// An empty model string, from either source, omits `model`.
    pub fn payload_with(&self, model: Option<&str>, speed: Option<f64>) -> Value {
        let mut payload = json!({
            "provider": self.provider,
            "voiceId": self.voice_id,
        });

        let model = model.or(self.model.as_deref());
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            payload["model"] = json!(model);
        }
        if let Some(speed) = speed.or(self.speed) {
            payload["speed"] = json!(speed);
        }

        payload
    }
}
