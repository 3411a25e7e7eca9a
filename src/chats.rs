//! Text chats (SMS threads) with an assistant.

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::calls::Customer;
use crate::client::VapiClient;
use crate::error::CoraError;
use crate::plain::null_as_default;

/// What to send: plain text or a list of chat messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatInput {
    Text(String),
    Messages(Vec<Value>),
}

impl From<&str> for ChatInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ChatInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Value>> for ChatInput {
    fn from(messages: Vec<Value>) -> Self {
        Self::Messages(messages)
    }
}

/// Request to create (or continue) a chat.
///
/// A new SMS thread needs both `customer` and `phone_number_id`; an existing
/// thread is continued with `session_id` alone. By default `input` is sent to
/// the customer verbatim; set `use_llm_generated_message_for_outbound` to let
/// the assistant write the outbound text from it instead.
#[derive(Debug, Clone, Builder)]
pub struct CreateChatRequest {
    #[builder(into)]
    pub assistant_id: String,
    #[builder(into)]
    pub input: ChatInput,
    #[builder(into)]
    pub customer: Option<Customer>,
    #[builder(into)]
    pub phone_number_id: Option<String>,
    #[builder(into)]
    pub session_id: Option<String>,
    #[builder(default)]
    pub stream: bool,
    #[builder(into)]
    pub name: Option<String>,
    /// Earlier chat whose messages give the model context.
    #[builder(into)]
    pub previous_chat_id: Option<String>,
    pub assistant_overrides: Option<Map<String, Value>>,
    #[builder(into)]
    pub squad_id: Option<String>,
    #[builder(default)]
    pub use_llm_generated_message_for_outbound: bool,
}

impl CreateChatRequest {
    /// Render the `POST /chat` body, validating the transport arguments.
    pub fn to_body(&self) -> Result<Value, CoraError> {
        if self.session_id.is_some() && (self.phone_number_id.is_some() || self.customer.is_some()) {
            return Err(CoraError::invalid(
                "session_id cannot be combined with phone_number_id/customer transport arguments",
            ));
        }

        let mut body = json!({
            "assistantId": self.assistant_id,
            "input": self.input,
            "stream": self.stream,
        });

        match &self.session_id {
            Some(session_id) => body["sessionId"] = json!(session_id),
            None => body["transport"] = self.transport()?,
        }
        if let Some(name) = &self.name {
            body["name"] = json!(name);
        }
        if let Some(previous_chat_id) = &self.previous_chat_id {
            body["previousChatId"] = json!(previous_chat_id);
        }
        if let Some(overrides) = &self.assistant_overrides {
            body["assistantOverrides"] = Value::Object(overrides.clone());
        }
        if let Some(squad_id) = &self.squad_id {
            body["squadId"] = json!(squad_id);
        }

        Ok(body)
    }

    fn transport(&self) -> Result<Value, CoraError> {
        let phone_number_id = self
            .phone_number_id
            .as_deref()
            .ok_or_else(|| CoraError::invalid("phone_number_id is required when creating a new chat"))?;
        let customer = self
            .customer
            .as_ref()
            .ok_or_else(|| CoraError::invalid("customer is required when creating a new chat"))?;

        Ok(json!({
            "type": "twilio.sms",
            "conversationType": "chat",
            "phoneNumberId": phone_number_id,
            "customer": customer.chat_payload()?,
            "useLLMGeneratedMessageForOutbound": self.use_llm_generated_message_for_outbound,
        }))
    }
}

/// A chat as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Chat {
    pub fn last_message(&self) -> Option<&Value> {
        self.messages.last()
    }
}

impl VapiClient {
    pub async fn create_chat(&self, request: &CreateChatRequest) -> Result<Chat, CoraError> {
        let body = request.to_body()?;
        debug!(assistant_id = %request.assistant_id, "Creating chat");
        self.post_json("chat", &body).await
    }

    /// Alias for [`VapiClient::create_chat`].
    pub async fn chat(&self, request: &CreateChatRequest) -> Result<Chat, CoraError> {
        self.create_chat(request).await
    }
}
