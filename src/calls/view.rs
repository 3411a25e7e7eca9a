//! Narrow read interface over call records.
//!
//! The monitor only ever needs a status, the two "ended" markers and the
//! message list. [`CallView`] exposes exactly that, with one adapter for the
//! typed [`CallRecord`] and one for raw JSON payloads whose field names may
//! be camelCase or snake_case.

use serde_json::Value;

use super::record::{CallRecord, CallStatus};

/// Read-only view of the parts of a call that decide its lifecycle.
pub trait CallView {
    fn status(&self) -> Option<CallStatus>;

    fn has_ended_at(&self) -> bool;

    fn has_ended_reason(&self) -> bool;

    fn messages(&self) -> &[Value];

    fn last_message(&self) -> Option<&Value> {
        self.messages().last()
    }
}

/// Whether a call has finished.
///
/// A terminal status wins outright. Otherwise an `endedAt` or `endedReason`
/// marker also counts, since the remote record may report that the call
/// ended before its status field catches up.
pub fn is_terminal<V: CallView + ?Sized>(call: &V) -> bool {
    if call.status().is_some_and(|status| status.is_terminal()) {
        return true;
    }
    call.has_ended_at() || call.has_ended_reason()
}

impl CallView for CallRecord {
    fn status(&self) -> Option<CallStatus> {
        self.status.clone()
    }

    fn has_ended_at(&self) -> bool {
        self.ended_at.is_some()
    }

    fn has_ended_reason(&self) -> bool {
        self.ended_reason.is_some()
    }

    fn messages(&self) -> &[Value] {
        &self.messages
    }
}

impl CallView for Value {
    fn status(&self) -> Option<CallStatus> {
        first_field(self, &["status"])
            .and_then(Value::as_str)
            .map(|status| CallStatus::from(status.to_string()))
    }

    fn has_ended_at(&self) -> bool {
        first_field(self, &["endedAt", "ended_at"]).is_some()
    }

    fn has_ended_reason(&self) -> bool {
        first_field(self, &["endedReason", "ended_reason"]).is_some()
    }

    fn messages(&self) -> &[Value] {
        first_field(self, &["messages"])
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Return the first non-null field among `candidates`, in order.
///
/// Non-object values have no fields and always resolve to `None`.
pub fn first_field<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    candidates
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|field| !field.is_null())
}
