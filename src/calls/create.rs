//! Outbound call creation.

use bon::Builder;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::record::CallRecord;
use crate::client::VapiClient;
use crate::config::CoraConfig;
use crate::error::CoraError;
use crate::phone::{normalize_phone, parse_phone_number_id, validate_phone_number_id};

/// The person being called or texted.
#[derive(Debug, Clone, PartialEq)]
pub enum Customer {
    /// A bare phone number.
    Number(String),
    /// A customer object; must contain a `number` field.
    Details(Map<String, Value>),
}

impl Customer {
    fn number(&self) -> Result<&str, CoraError> {
        match self {
            Self::Number(number) => Ok(number),
            Self::Details(details) => details
                .get("number")
                .and_then(Value::as_str)
                .filter(|number| !number.is_empty())
                .ok_or_else(|| CoraError::invalid("customer must include a 'number' field")),
        }
    }

    /// Customer block for a call: only the normalized number is sent.
    pub fn call_payload(&self) -> Result<Value, CoraError> {
        Ok(json!({ "number": normalize_phone(self.number()?) }))
    }

    /// Customer block for a chat transport: extra fields are kept, the number normalized.
    pub fn chat_payload(&self) -> Result<Value, CoraError> {
        let number = normalize_phone(self.number()?);
        let mut payload = match self {
            Self::Number(_) => Map::new(),
            Self::Details(details) => details.clone(),
        };
        payload.insert("number".into(), Value::String(number));
        Ok(Value::Object(payload))
    }
}

impl From<&str> for Customer {
    fn from(number: &str) -> Self {
        Self::Number(number.to_string())
    }
}

impl From<String> for Customer {
    fn from(number: String) -> Self {
        Self::Number(number)
    }
}

impl From<Map<String, Value>> for Customer {
    fn from(details: Map<String, Value>) -> Self {
        Self::Details(details)
    }
}

/// Request to place an outbound phone call with an assistant.
///
/// ```
/// use cora::calls::CreateCallRequest;
///
/// let request = CreateCallRequest::builder()
///     .assistant_id("asst_123")
///     .customer("(956) 670-7155")
///     .build();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CreateCallRequest {
    #[builder(into)]
    pub assistant_id: String,
    /// Falls back to the configured default phone number id.
    #[builder(into)]
    pub phone_number_id: Option<String>,
    #[builder(into)]
    pub customer: Customer,
    /// Per-call assistant tweaks that leave the stored assistant untouched.
    pub assistant_overrides: Option<Map<String, Value>>,
    pub background_speech_denoising_plan: Option<Value>,
}

impl CreateCallRequest {
    /// Render the `POST /call` body.
    pub fn to_body(&self, config: &CoraConfig) -> Result<Value, CoraError> {
        let phone_number_id = self
            .phone_number_id
            .as_deref()
            .and_then(parse_phone_number_id)
            .or_else(|| config.default_phone_number_id().map(str::to_string))
            .ok_or_else(|| {
                CoraError::invalid(
                    "phone_number_id is required; pass it explicitly or set VAPI_PHONE_NUMBER_ID",
                )
            })?;
        validate_phone_number_id(&phone_number_id)?;

        let mut body = json!({
            "assistantId": self.assistant_id,
            "phoneNumberId": phone_number_id,
            "customer": self.customer.call_payload()?,
        });

        let mut overrides = self.assistant_overrides.clone().unwrap_or_default();
        if let Some(plan) = &self.background_speech_denoising_plan {
            overrides.insert("backgroundSpeechDenoisingPlan".into(), plan.clone());
        }
        if !overrides.is_empty() {
            body["assistantOverrides"] = Value::Object(overrides);
        }

        Ok(body)
    }
}

impl VapiClient {
    /// Place an outbound call.
    pub async fn create_call(&self, request: &CreateCallRequest) -> Result<CallRecord, CoraError> {
        let body = request.to_body(self.config())?;
        debug!(assistant_id = %request.assistant_id, "Creating call");
        self.post_json("call", &body).await
    }
}
