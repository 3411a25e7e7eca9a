//! Call lifecycle monitoring.
//!
//! Three ways to follow a call until it finishes, all built on repeated
//! [`CallAccessor::get_call`] fetches separated by a fixed interval:
//!
//! - [`poll_until_terminal`]: bounded loop returning a [`CallSummary`]
//! - [`wait_for_terminal`]: bounded loop returning the last raw record,
//!   optionally echoing each new message once
//! - [`watch_call`]: lazy stream of [`CallSnapshot`]s
//!
//! Running out of time is not an error for any of them; the caller gets
//! whatever was last observed. Fetch errors propagate immediately and are
//! never retried.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bon::Builder;
use futures::stream::BoxStream;
use serde::Serialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info};

use super::record::{CallRecord, CallStatus, Timestamp};
use super::view::is_terminal;
use super::CallAccessor;
use crate::error::CoraError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2500);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(600);

/// Receives each newly observed call message.
pub type MessageSink = Arc<dyn Fn(&Value) + Send + Sync>;

/// Reduced view of a call produced by [`poll_until_terminal`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallSummary {
    /// Last observed status, or [`CallStatus::Unknown`] if nothing was fetched.
    pub status: CallStatus,
    pub id: String,
    #[serde(rename = "endedAt")]
    pub ended_at: Option<Timestamp>,
    #[serde(rename = "endedReason")]
    pub ended_reason: Option<String>,
    pub last_message: Option<Value>,
}

/// One watch event: the call's state at a single fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallSnapshot {
    pub id: String,
    pub status: Option<CallStatus>,
    /// Set only when the latest message differs from the one last surfaced.
    pub last_message: Option<Value>,
}

/// Options for [`wait_for_terminal`].
#[derive(Clone, Builder)]
pub struct WaitOptions {
    #[builder(default = DEFAULT_MAX_WAIT)]
    pub timeout: Duration,
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    pub interval: Duration,
    /// Emit each newly seen message once. Without a sink, messages are logged.
    #[builder(default = true)]
    pub echo_messages: bool,
    pub message_sink: Option<MessageSink>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_MAX_WAIT,
            interval: DEFAULT_POLL_INTERVAL,
            echo_messages: true,
            message_sink: None,
        }
    }
}

impl fmt::Debug for WaitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitOptions")
            .field("timeout", &self.timeout)
            .field("interval", &self.interval)
            .field("echo_messages", &self.echo_messages)
            .field("message_sink", &self.message_sink.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Poll a call until it is terminal or `max_wait` elapses.
///
/// If the deadline passes before the first fetch, the summary carries the
/// requested id and an `unknown` status.
pub async fn poll_until_terminal<A>(
    accessor: &A,
    call_id: &str,
    max_wait: Duration,
    interval: Duration,
) -> Result<CallSummary, CoraError>
where
    A: CallAccessor + ?Sized,
{
    let deadline = Instant::now() + max_wait;
    let mut last_message: Option<Value> = None;
    let mut last_call: Option<CallRecord> = None;

    while Instant::now() < deadline {
        let call = accessor.get_call(call_id).await?;
        if let Some(message) = call.last_message() {
            last_message = Some(message.clone());
        }
        let terminal = is_terminal(&call);
        debug!(call_id, status = ?call.status, terminal, "Polled call");
        last_call = Some(call);
        if terminal {
            break;
        }
        tokio::time::sleep(interval).await;
    }

    Ok(match last_call {
        Some(call) => CallSummary {
            status: call.status.unwrap_or(CallStatus::Unknown),
            id: record_id(call.id, call_id),
            ended_at: call.ended_at,
            ended_reason: call.ended_reason,
            last_message,
        },
        None => CallSummary {
            status: CallStatus::Unknown,
            id: call_id.to_string(),
            ended_at: None,
            ended_reason: None,
            last_message,
        },
    })
}

/// Block until a call is terminal or the timeout passes, returning the last record.
///
/// The call is always fetched at least once. The deadline is checked after
/// each fetch, so the returned record may still be non-terminal.
pub async fn wait_for_terminal<A>(
    accessor: &A,
    call_id: &str,
    options: WaitOptions,
) -> Result<CallRecord, CoraError>
where
    A: CallAccessor + ?Sized,
{
    let deadline = Instant::now() + options.timeout;
    let mut seen_messages: HashSet<String> = HashSet::new();
    let mut last_status: Option<CallStatus> = None;

    loop {
        let call = accessor.get_call(call_id).await?;

        if call.status != last_status {
            debug!(call_id, from = ?last_status, to = ?call.status, "Call status changed");
            last_status = call.status.clone();
        }

        if options.echo_messages {
            if let Some(latest) = call.last_message() {
                if seen_messages.insert(message_key(latest)) {
                    match &options.message_sink {
                        Some(sink) => sink(latest),
                        None => info!(call_id, message = %latest, "Call message"),
                    }
                }
            }
        }

        if is_terminal(&call) || Instant::now() > deadline {
            return Ok(call);
        }

        tokio::time::sleep(options.interval).await;
    }
}

/// Stream snapshots of a call until it reaches a terminal state.
///
/// One snapshot is yielded per fetch; the stream ends right after the
/// snapshot whose fetch first found the call terminal. A fetch error is
/// yielded as the final item. Dropping the stream stops polling.
pub fn watch_call<'a, A>(
    accessor: &'a A,
    call_id: &'a str,
    interval: Duration,
) -> BoxStream<'a, Result<CallSnapshot, CoraError>>
where
    A: CallAccessor + ?Sized,
{
    let stream = async_stream::try_stream! {
        let mut seen: Option<String> = None;
        loop {
            let call = accessor.get_call(call_id).await?;

            let mut last_message = None;
            if let Some(latest) = call.last_message() {
                let key = message_key(latest);
                if seen.as_deref() != Some(key.as_str()) {
                    last_message = Some(latest.clone());
                    seen = Some(key);
                }
            }

            let terminal = is_terminal(&call);
            debug!(call_id, status = ?call.status, terminal, "Watched call");
            yield CallSnapshot {
                id: record_id(call.id, call_id),
                status: call.status,
                last_message,
            };

            if terminal {
                break;
            }
            tokio::time::sleep(interval).await;
        }
    };

    Box::pin(stream)
}

/// The record's id, or the requested one when the API omitted it.
fn record_id(id: String, requested: &str) -> String {
    if id.is_empty() {
        requested.to_string()
    } else {
        id
    }
}

/// Content identity of a message, used to surface each message once.
fn message_key(message: &Value) -> String {
    message.to_string()
}
