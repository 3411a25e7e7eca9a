//! Flat, table-friendly rows for call records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::CallRecord;
use super::view::first_field;
use crate::plain::{serialize_messages, to_plain_value};

/// One row describing a call, suitable for CSV export or a dataframe.
///
/// Built from the plain JSON form of a record, so it works the same for
/// camelCase API payloads and snake_case exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallPayload {
    pub call_id: Option<String>,
    pub status: Option<String>,
    pub assistant_id: Option<String>,
    pub phone_number_id: Option<String>,
    pub customer_number: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub ended_reason: Option<String>,
    pub cost: Option<f64>,
    pub transcript: Option<String>,
    /// All messages as one JSON string.
    pub messages: Option<String>,
    pub first_message: Option<String>,
    pub metadata: Option<Value>,
    pub analysis_summary: Option<String>,
    pub analysis_success_evaluation: Option<Value>,
    pub analysis_structured_data: Option<Value>,
    pub analysis_structured_data_multi: Option<Value>,
    pub analysis_outcomes: Option<Value>,
}

impl CallPayload {
    pub fn from_record(record: &CallRecord) -> Self {
        Self::from_value(&to_plain_value(record))
    }

    /// Tabulate a raw call payload. Missing fields become `None`.
    pub fn from_value(call: &Value) -> Self {
        let analysis = first_field(call, &["analysis"]);
        let analysis_field = |names: &[&str]| analysis.and_then(|a| first_field(a, names)).cloned();

        let customer_number = first_field(call, &["customer", "customer_number", "customerNumber"])
            .and_then(|customer| match customer {
                Value::Object(_) => first_field(customer, &["number", "phoneNumber"]).map(text),
                other => Some(text(other)),
            });

        let messages = first_field(call, &["messages"])
            .and_then(Value::as_array)
            .and_then(|messages| serialize_messages(messages));

        Self {
            call_id: string_field(call, &["id", "call_id"]),
            status: string_field(call, &["status"]),
            assistant_id: string_field(call, &["assistant_id", "assistantId"]),
            phone_number_id: string_field(call, &["phone_number_id", "phoneNumberId"]),
            customer_number,
            created_at: string_field(call, &["created_at", "createdAt"]),
            updated_at: string_field(call, &["updated_at", "updatedAt"]),
            started_at: string_field(call, &["started_at", "startedAt"]),
            ended_at: string_field(call, &["ended_at", "endedAt"]),
            ended_reason: string_field(call, &["ended_reason", "endedReason"]),
            cost: first_field(call, &["cost"]).and_then(Value::as_f64),
            transcript: string_field(call, &["transcript"]),
            messages,
            first_message: string_field(call, &["first_message", "firstMessage"]),
            metadata: first_field(call, &["metadata"]).cloned(),
            analysis_summary: analysis
                .and_then(|a| first_field(a, &["summary"]))
                .map(text),
            analysis_success_evaluation: analysis_field(&["success_evaluation", "successEvaluation"]),
            analysis_structured_data: analysis_field(&["structured_data", "structuredData"]),
            analysis_structured_data_multi: analysis_field(&[
                "structured_data_multi",
                "structuredDataMulti",
            ]),
            analysis_outcomes: analysis_field(&["outcomes"]),
        }
    }
}

fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    first_field(value, names).map(text)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
