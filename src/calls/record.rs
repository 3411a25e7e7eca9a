//! Call records as returned by the Vapi call endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::EnumString;

use crate::plain::null_as_default;

/// Statuses after which a call is not expected to change.
pub const TERMINAL_STATUSES: [&str; 5] = ["ended", "failed", "noAnswer", "busy", "canceled"];

/// Lifecycle status of a call.
///
/// The remote set of statuses is open; anything unrecognized is kept
/// verbatim in [`CallStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallStatus {
    #[strum(serialize = "scheduled")]
    Scheduled,
    #[strum(serialize = "queued")]
    Queued,
    #[strum(serialize = "ringing")]
    Ringing,
    #[strum(serialize = "in-progress")]
    InProgress,
    #[strum(serialize = "forwarding")]
    Forwarding,
    #[strum(serialize = "ended")]
    Ended,
    #[strum(serialize = "failed")]
    Failed,
    #[strum(serialize = "noAnswer")]
    NoAnswer,
    #[strum(serialize = "busy")]
    Busy,
    #[strum(serialize = "canceled")]
    Canceled,
    /// No status was ever observed.
    #[strum(serialize = "unknown")]
    Unknown,
    #[strum(default)]
    Other(String),
}

impl CallStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Queued => "queued",
            Self::Ringing => "ringing",
            Self::InProgress => "in-progress",
            Self::Forwarding => "forwarding",
            Self::Ended => "ended",
            Self::Failed => "failed",
            Self::NoAnswer => "noAnswer",
            Self::Busy => "busy",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }

    /// Whether this status is in the fixed terminal set.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Ended | Self::Failed | Self::NoAnswer | Self::Busy | Self::Canceled
        )
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CallStatus {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(status) => status,
            Err(_) => Self::Other(raw),
        }
    }
}

impl From<CallStatus> for String {
    fn from(status: CallStatus) -> Self {
        match status {
            CallStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A timestamp field on a call record.
///
/// RFC 3339 strings parse into [`Timestamp::At`]; anything else the API
/// sends (epoch millis, other date layouts) is kept as [`Timestamp::Raw`]
/// so its presence still counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    At(DateTime<Utc>),
    Raw(Value),
}

impl Timestamp {
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(at) => Some(*at),
            Self::Raw(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

/// Read-only snapshot of a remote call.
///
/// Fields the crate does not model are kept in `extra` so nothing the API
/// returns is lost when the record is logged or tabulated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(default, alias = "ended_at", skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<Timestamp>,
    #[serde(default, alias = "ended_reason", skip_serializing_if = "Option::is_none")]
    pub ended_reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Value>,
    #[serde(default, alias = "assistant_id", skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
    #[serde(default, alias = "phone_number_id", skip_serializing_if = "Option::is_none")]
    pub phone_number_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Value>,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, alias = "started_at", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CallRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<CallStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_message(mut self, message: Value) -> Self {
        self.messages.push(message);
        self
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Value> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_statuses_parse_to_variants() {
        assert_eq!("in-progress".parse::<CallStatus>().unwrap(), CallStatus::InProgress);
        assert_eq!(CallStatus::from("noAnswer".to_string()), CallStatus::NoAnswer);
        assert_eq!(
            CallStatus::from("on-hold".to_string()),
            CallStatus::Other("on-hold".to_string())
        );
    }

    #[test]
    fn terminal_status_table_matches_variants() {
        for raw in TERMINAL_STATUSES {
            assert!(CallStatus::from(raw.to_string()).is_terminal(), "{raw} should be terminal");
        }
        assert!(!CallStatus::Queued.is_terminal());
        assert!(!CallStatus::Other("hold".into()).is_terminal());
    }

    #[test]
    fn status_serializes_as_wire_string() {
        assert_eq!(serde_json::to_value(CallStatus::NoAnswer).unwrap(), json!("noAnswer"));
        assert_eq!(
            serde_json::to_value(CallStatus::Other("custom".into())).unwrap(),
            json!("custom")
        );
    }

    #[test]
    fn record_deserializes_camel_case_payload_and_keeps_unknown_fields() {
        let record: CallRecord = serde_json::from_value(json!({
            "id": "call-1",
            "status": "ended",
            "endedAt": "2024-05-01T12:00:00.000Z",
            "endedReason": "customer-ended-call",
            "messages": [{"role": "bot", "message": "hi"}],
            "assistantId": "asst-1",
            "type": "outboundPhoneCall"
        }))
        .unwrap();

        assert_eq!(record.id, "call-1");
        assert_eq!(record.status, Some(CallStatus::Ended));
        assert!(record.ended_at.as_ref().and_then(Timestamp::as_datetime).is_some());
        assert_eq!(record.ended_reason.as_deref(), Some("customer-ended-call"));
        assert_eq!(record.assistant_id.as_deref(), Some("asst-1"));
        assert_eq!(record.extra.get("type"), Some(&json!("outboundPhoneCall")));
        assert_eq!(record.last_message(), Some(&json!({"role": "bot", "message": "hi"})));
    }

    #[test]
    fn record_tolerates_null_messages_and_snake_case_fields() {
        let record: CallRecord = serde_json::from_value(json!({
            "id": "call-2",
            "status": "queued",
            "messages": null,
            "ended_reason": "silence-timed-out"
        }))
        .unwrap();

        assert!(record.messages.is_empty());
        assert_eq!(record.ended_reason.as_deref(), Some("silence-timed-out"));
    }

    #[test]
    fn loose_timestamps_are_kept_raw() {
        let record: CallRecord = serde_json::from_value(json!({
            "id": "call-3",
            "status": "in-progress",
            "endedAt": "2024-05-01 12:00:00",
            "startedAt": 1714564800000_u64,
            "createdAt": "2024-05-01T11:59:00Z"
        }))
        .unwrap();

        assert_eq!(record.ended_at, Some(Timestamp::Raw(json!("2024-05-01 12:00:00"))));
        assert_eq!(record.started_at, Some(Timestamp::Raw(json!(1714564800000_u64))));
        assert!(record.created_at.as_ref().and_then(Timestamp::as_datetime).is_some());
        assert_eq!(
            serde_json::to_value(&record).unwrap()["endedAt"],
            json!("2024-05-01 12:00:00")
        );
    }
}
