//! Post-call analysis plans (summary, success evaluation, structured data).
//!
//! Each builder returns an [`AnalysisPlan`] with only its own section set,
//! serialized in the camelCase shape the assistant endpoint expects.

pub mod prompts;

pub use prompts::DEFAULT_RUBRIC;

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoraError;

/// One prompt message inside a plan. Content may use `{{transcript}}`-style
/// template variables that the platform fills in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMessage {
    pub role: String,
    pub content: String,
}

impl PlanMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_messages_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_plan: Option<SummaryPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_evaluation_plan: Option<SuccessEvaluationPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data_plan: Option<StructuredDataPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data_multi_plan: Option<Vec<StructuredDataMultiPlan>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPlan {
    pub messages: Vec<PlanMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEvaluationPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<String>,
    pub messages: Vec<PlanMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDataPlan {
    pub messages: Vec<PlanMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// JSON Schema describing the data to extract.
    pub schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

impl StructuredDataPlan {
    /// A plan for `schema` with the default extraction prompt.
    pub fn new(schema: Value) -> Self {
        Self {
            messages: prompts::default_structured_data_messages(),
            enabled: Some(true),
            schema,
            timeout_seconds: None,
        }
    }

    /// Parse a plan from loose JSON, e.g. loaded from a config file.
    ///
    /// Accepts `schema` or `schema_` for the schema key and fills in the
    /// default messages when none are given. A missing schema is an error.
    pub fn from_value(value: Value) -> Result<Self, CoraError> {
        let Value::Object(mut fields) = value else {
            return Err(CoraError::invalid("Structured data plan must be a JSON object."));
        };
        if let Some(schema) = fields.remove("schema_") {
            fields.entry("schema").or_insert(schema);
        }
        if !fields.get("schema").is_some_and(|s| !s.is_null()) {
            return Err(CoraError::invalid(
                "Structured data plan requires a 'schema' entry.",
            ));
        }
        if !fields.contains_key("messages") {
            fields.insert(
                "messages".into(),
                serde_json::to_value(prompts::default_structured_data_messages())?,
            );
        }
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDataMultiPlan {
    pub key: String,
    pub plan: StructuredDataPlan,
}

/// Shared knobs for the summary, success-evaluation and structured-data builders.
#[derive(Debug, Clone, Builder)]
pub struct PlanOptions {
    /// Prompt messages; each builder falls back to its default prompt.
    pub messages: Option<Vec<PlanMessage>>,
    #[builder(default = true)]
    pub enabled: bool,
    pub timeout_seconds: Option<f64>,
    pub min_messages_threshold: Option<f64>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            messages: None,
            enabled: true,
            timeout_seconds: None,
            min_messages_threshold: None,
        }
    }
}

/// The pass/fail success evaluation used by default for new assistants.
pub fn pass_fail_plan() -> AnalysisPlan {
    pass_fail_plan_with(DEFAULT_RUBRIC, None)
}

/// Pass/fail evaluation with a custom rubric and, optionally, custom messages.
pub fn pass_fail_plan_with(rubric: &str, messages: Option<Vec<PlanMessage>>) -> AnalysisPlan {
    AnalysisPlan {
        success_evaluation_plan: Some(SuccessEvaluationPlan {
            rubric: Some(rubric.to_string()),
            messages: messages.unwrap_or_else(prompts::default_eval_messages),
            enabled: None,
            timeout_seconds: None,
        }),
        ..Default::default()
    }
}

/// A plan with only the call summary enabled.
pub fn summary_plan(options: PlanOptions) -> AnalysisPlan {
    AnalysisPlan {
        min_messages_threshold: options.min_messages_threshold,
        summary_plan: Some(SummaryPlan {
            messages: options
                .messages
                .unwrap_or_else(prompts::default_summary_messages),
            enabled: Some(options.enabled),
            timeout_seconds: options.timeout_seconds,
        }),
        ..Default::default()
    }
}

/// A plan that only evaluates the call outcome against `rubric`.
pub fn success_evaluation_plan(rubric: &str, options: PlanOptions) -> AnalysisPlan {
    AnalysisPlan {
        min_messages_threshold: options.min_messages_threshold,
        success_evaluation_plan: Some(SuccessEvaluationPlan {
            rubric: Some(rubric.to_string()),
            messages: options
                .messages
                .unwrap_or_else(prompts::default_success_eval_messages),
            enabled: Some(options.enabled),
            timeout_seconds: options.timeout_seconds,
        }),
        ..Default::default()
    }
}

/// A plan that extracts data matching a JSON Schema.
pub fn structured_data_plan(schema: Value, options: PlanOptions) -> AnalysisPlan {
    AnalysisPlan {
        min_messages_threshold: options.min_messages_threshold,
        structured_data_plan: Some(StructuredDataPlan {
            messages: options
                .messages
                .unwrap_or_else(prompts::default_structured_data_messages),
            enabled: Some(options.enabled),
            schema,
            timeout_seconds: options.timeout_seconds,
        }),
        ..Default::default()
    }
}

/// A plan that runs several keyed structured-data extractions in one pass.
pub fn structured_data_multi_plan<K>(
    plans: impl IntoIterator<Item = (K, StructuredDataPlan)>,
    min_messages_threshold: Option<f64>,
) -> AnalysisPlan
where
    K: Into<String>,
{
    AnalysisPlan {
        min_messages_threshold,
        structured_data_multi_plan: Some(
            plans
                .into_iter()
                .map(|(key, plan)| StructuredDataMultiPlan {
                    key: key.into(),
                    plan,
                })
                .collect(),
        ),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn pass_fail_plan_serializes_only_success_evaluation() {
        let value = serde_json::to_value(pass_fail_plan()).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["successEvaluationPlan"]);
        assert_eq!(value["successEvaluationPlan"]["rubric"], json!("PassFail"));
        assert_eq!(
            value["successEvaluationPlan"]["messages"].as_array().unwrap().len(),
            3
        );
        assert!(value["successEvaluationPlan"].get("enabled").is_none());
    }

    #[test]
    fn pass_fail_plan_accepts_custom_messages() {
        let plan = pass_fail_plan_with("NumericScale", Some(vec![PlanMessage::system("Score it.")]));
        let evaluation = plan.success_evaluation_plan.unwrap();

        assert_eq!(evaluation.rubric.as_deref(), Some("NumericScale"));
        assert_eq!(evaluation.messages, vec![PlanMessage::system("Score it.")]);
    }

    #[test]
    fn summary_plan_applies_options() {
        let plan = summary_plan(
            PlanOptions::builder()
                .enabled(false)
                .timeout_seconds(10.0)
                .min_messages_threshold(2.0)
                .build(),
        );

        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["minMessagesThreshold"], json!(2.0));
        assert_eq!(value["summaryPlan"]["enabled"], json!(false));
        assert_eq!(value["summaryPlan"]["timeoutSeconds"], json!(10.0));
        assert_eq!(value["summaryPlan"]["messages"][0]["role"], json!("system"));
    }

    #[test]
    fn success_evaluation_plan_uses_generic_prompt() {
        let plan = success_evaluation_plan("Likert", PlanOptions::default());
        let evaluation = plan.success_evaluation_plan.unwrap();

        assert_eq!(evaluation.enabled, Some(true));
        assert!(evaluation.messages[0].content.contains("objectives"));
    }

    #[test]
    fn structured_data_plan_embeds_schema() {
        let schema = json!({"type": "object", "properties": {"booked": {"type": "boolean"}}});
        let value = serde_json::to_value(structured_data_plan(schema.clone(), PlanOptions::default()))
            .unwrap();

        assert_eq!(value["structuredDataPlan"]["schema"], schema);
        assert_eq!(value["structuredDataPlan"]["enabled"], json!(true));
    }

    #[test]
    fn multi_plan_keeps_entry_order() {
        let plan = structured_data_multi_plan(
            [
                ("booking", StructuredDataPlan::new(json!({"type": "object"}))),
                ("sentiment", StructuredDataPlan::new(json!({"type": "string"}))),
            ],
            None,
        );

        let value = serde_json::to_value(plan).unwrap();
        let entries = value["structuredDataMultiPlan"].as_array().unwrap();
        assert_eq!(entries[0]["key"], json!("booking"));
        assert_eq!(entries[1]["key"], json!("sentiment"));
        assert_eq!(entries[1]["plan"]["schema"], json!({"type": "string"}));
    }

    #[test]
    fn loose_plan_accepts_schema_alias_and_requires_schema() {
        let plan = StructuredDataPlan::from_value(json!({"schema_": {"type": "object"}, "enabled": false}))
            .unwrap();
        assert_eq!(plan.schema, json!({"type": "object"}));
        assert_eq!(plan.enabled, Some(false));
        assert!(!plan.messages.is_empty());

        let err = StructuredDataPlan::from_value(json!({"enabled": true})).unwrap_err();
        assert!(matches!(err, CoraError::InvalidArgument(_)));
        assert!(StructuredDataPlan::from_value(json!([1])).is_err());
    }
}
