//! Default prompt messages for the post-call analysis plans.

use super::PlanMessage;

pub const DEFAULT_RUBRIC: &str = "PassFail";

/// Pass/fail evaluation of whether an appointment was booked.
pub fn default_eval_messages() -> Vec<PlanMessage> {
    vec![
        PlanMessage::system(
            "You are an expert call evaluator. You will be given a transcript \
             of a call and the system prompt of the Ai participant. If the Ai \
             successfully booked an appointment for the patient, label the \
             call as `true`. If the patient answered but no appointment was \
             scheduled, label the call as `false`. If a voicemail was left or \
             the patient did not answer, label the call as `false`.\n\nRubric:\n\n\
             {{rubric}}\n\nOnly respond with the evaluation result.",
        ),
        PlanMessage::user(
            "Here is the transcript of the call:\n\n{{transcript}}\n\n. Here \
             is the ended reason of the call:\n\n{{endedReason}}\n\n",
        ),
        PlanMessage::user("Here was the system prompt of the call:\n\n{{systemPrompt}}\n\n"),
    ]
}

pub fn default_summary_messages() -> Vec<PlanMessage> {
    vec![
        PlanMessage::system(
            "You are an expert note-taker. You will be given a transcript of a call. \
             Summarize the call in 2-3 sentences. DO NOT return anything except the summary.",
        ),
        PlanMessage::user(
            "Here is the transcript:\n\n{{transcript}}\n\n. Here is the ended reason of the call:\n\n\
             {{endedReason}}\n\n",
        ),
    ]
}

/// Generic success evaluation against objectives inferred from the system prompt.
pub fn default_success_eval_messages() -> Vec<PlanMessage> {
    vec![
        PlanMessage::system(
            "You are an expert call evaluator. You will be given a transcript of a call and the system \
             prompt of the AI participant. Determine if the call was successful based on the objectives \
             inferred from the system prompt. DO NOT return anything except the result.\n\nRubric:\n\
             {{rubric}}\n\nOnly respond with the result.",
        ),
        PlanMessage::user("Here is the transcript:\n\n{{transcript}}\n\n"),
        PlanMessage::user(
            "Here was the system prompt of the call:\n\n{{systemPrompt}}\n\n. Here is the ended \
             reason of the call:\n\n{{endedReason}}\n\n",
        ),
    ]
}

pub fn default_structured_data_messages() -> Vec<PlanMessage> {
    vec![
        PlanMessage::system(
            "You are an expert data extractor. You will be given a transcript of a call. \
             Extract structured data per the JSON Schema. DO NOT return anything except \
             the structured data.\n\nJson Schema:\n{{schema}}\n\nOnly respond with the JSON.",
        ),
        PlanMessage::user(
            "Here is the transcript:\n\n{{transcript}}\n\n. Here is the ended reason of the call:\n\n\
             {{endedReason}}\n\n",
        ),
    ]
}
