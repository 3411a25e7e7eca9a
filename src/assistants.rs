//! Assistant creation with the project's common defaults.

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::analysis_plan::{pass_fail_plan, AnalysisPlan};
use crate::client::VapiClient;
use crate::config::CoraConfig;
use crate::error::CoraError;
use crate::transcribers::TranscriberProfile;
use crate::voices::VoiceProfile;

/// Voice for an assistant: a profile, or a raw provider payload.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceConfig {
    Profile(VoiceProfile),
    Raw(Value),
}

impl VoiceConfig {
    pub fn payload(&self) -> Value {
        match self {
            Self::Profile(profile) => profile.payload(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<VoiceProfile> for VoiceConfig {
    fn from(profile: VoiceProfile) -> Self {
        Self::Profile(profile)
    }
}

impl From<Value> for VoiceConfig {
    fn from(raw: Value) -> Self {
        Self::Raw(raw)
    }
}

/// Transcriber for an assistant: a profile, or a raw provider payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriberConfig {
    Profile(TranscriberProfile),
    Raw(Value),
}

impl TranscriberConfig {
    pub fn payload(&self) -> Value {
        match self {
            Self::Profile(profile) => profile.payload(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<TranscriberProfile> for TranscriberConfig {
    fn from(profile: TranscriberProfile) -> Self {
        Self::Profile(profile)
    }
}

impl From<Value> for TranscriberConfig {
    fn from(raw: Value) -> Self {
        Self::Raw(raw)
    }
}

/// Request to create an assistant.
///
/// Model provider and name default to the configured values; tools default
/// to a single `endCall` tool and the analysis plan to [`pass_fail_plan`].
///
/// ```
/// use cora::assistants::CreateAssistantRequest;
/// use cora::transcribers::Deepgram;
/// use cora::voices::VoiceCatalog;
///
/// let request = CreateAssistantRequest::builder()
///     .name("demo-patient")
///     .system_prompt("You are a helpful scheduling assistant.")
///     .voice(VoiceCatalog::openai().voice("nova").unwrap())
///     .transcriber(Deepgram::default().english())
///     .first_message("Hi! I'm calling about your upcoming appointment.")
///     .build();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CreateAssistantRequest {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub system_prompt: String,
    #[builder(into)]
    pub voice: VoiceConfig,
    #[builder(into)]
    pub transcriber: TranscriberConfig,
    pub analysis_plan: Option<AnalysisPlan>,
    #[builder(into)]
    pub first_message: Option<String>,
    #[builder(into)]
    pub model_provider: Option<String>,
    #[builder(into)]
    pub model_name: Option<String>,
    pub tools: Option<Vec<Value>>,
    pub tool_ids: Option<Vec<String>>,
    /// Merged into the `model` block last, overriding generated keys.
    pub model_overrides: Option<Map<String, Value>>,
}

impl CreateAssistantRequest {
    /// Render the `POST /assistant` body.
    pub fn to_body(&self, config: &CoraConfig) -> Result<Value, CoraError> {
        let tools = self
            .tools
            .clone()
            .unwrap_or_else(|| vec![json!({"type": "endCall"})]);

        let mut model = Map::new();
        model.insert(
            "provider".into(),
            json!(self.model_provider.as_deref().unwrap_or(config.model_provider())),
        );
        model.insert(
            "model".into(),
            json!(self.model_name.as_deref().unwrap_or(config.model_name())),
        );
        model.insert(
            "messages".into(),
            json!([{"role": "system", "content": self.system_prompt}]),
        );
        model.insert("tools".into(), Value::Array(tools));
        if let Some(ids) = self.tool_ids.as_ref().filter(|ids| !ids.is_empty()) {
            model.insert("toolIds".into(), json!(ids));
        }
        if let Some(overrides) = &self.model_overrides {
            model.extend(overrides.clone());
        }

        let plan = match &self.analysis_plan {
            Some(plan) => plan.clone(),
            None => pass_fail_plan(),
        };

        let mut body = json!({
            "name": self.name,
            "model": model,
            "voice": self.voice.payload(),
            "transcriber": self.transcriber.payload(),
            "analysisPlan": serde_json::to_value(plan)?,
        });
        if let Some(first_message) = &self.first_message {
            body["firstMessage"] = json!(first_message);
        }

        Ok(body)
    }
}

/// An assistant as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VapiClient {
    pub async fn create_assistant(
        &self,
        request: &CreateAssistantRequest,
    ) -> Result<Assistant, CoraError> {
        let body = request.to_body(self.config())?;
        debug!(name = %request.name, "Creating assistant");
        self.post_json("assistant", &body).await
    }

    pub async fn get_assistant(&self, assistant_id: &str) -> Result<Assistant, CoraError> {
        self.get_json(&format!("assistant/{assistant_id}"), &[]).await
    }

    /// Delete an assistant, returning the deleted record.
    pub async fn delete_assistant(&self, assistant_id: &str) -> Result<Assistant, CoraError> {
        self.delete_json(&format!("assistant/{assistant_id}")).await
    }
}
