//! Calls: creation, records, and lifecycle monitoring.

pub mod create;
pub mod monitor;
pub mod payload;
pub mod record;
pub mod view;

pub use create::{CreateCallRequest, Customer};
pub use monitor::{
    poll_until_terminal, wait_for_terminal, watch_call, CallSnapshot, CallSummary, MessageSink,
    WaitOptions, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL,
};
pub use payload::CallPayload;
pub use record::{CallRecord, CallStatus, Timestamp, TERMINAL_STATUSES};
pub use view::{first_field, is_terminal, CallView};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoraError;

/// Fetches the current remote state of a call.
///
/// Implemented by [`crate::client::VapiClient`]; tests and callers with
/// their own transport can supply another implementation.
#[async_trait]
pub trait CallAccessor: Send + Sync {
    async fn get_call(&self, call_id: &str) -> Result<CallRecord, CoraError>;
}

#[async_trait]
impl<T: CallAccessor + ?Sized> CallAccessor for Arc<T> {
    async fn get_call(&self, call_id: &str) -> Result<CallRecord, CoraError> {
        (**self).get_call(call_id).await
    }
}

