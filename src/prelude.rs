//! Convenience re-exports for common use.

pub use crate::analysis_plan::{pass_fail_plan, AnalysisPlan, PlanOptions};
pub use crate::assistants::{Assistant, CreateAssistantRequest};
pub use crate::calls::{
    is_terminal, poll_until_terminal, wait_for_terminal, watch_call, CallAccessor, CallRecord,
    CallSnapshot, CallStatus, CallSummary, CreateCallRequest, Customer, WaitOptions,
};
pub use crate::chats::{Chat, CreateChatRequest};
pub use crate::client::VapiClient;
pub use crate::config::CoraConfig;
pub use crate::error::{CoraError, Result};
pub use crate::phone::normalize_phone;
pub use crate::plain::to_plain_value;
pub use crate::transcribers::{Deepgram, TranscriberProfile};
pub use crate::voices::{VoiceCatalog, VoiceProfile};
