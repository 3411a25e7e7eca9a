//! Conversion of API records into plain JSON values.
//!
//! Used to make records safe to log, persist, or tabulate without depending
//! on the exact shape of the typed models.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Convert any serializable value into a plain JSON value. Never fails.
///
/// Primitives, maps and sequences go through as-is and structured types
/// export their serialized fields (`#[serde(skip)]` fields stay hidden).
/// When the serializer rejects the value, for example a map keyed by
/// tuples or a field whose `Serialize` impl errors, the value degrades to
/// its `Debug` rendering as a JSON string.
pub fn to_plain_value<T>(value: &T) -> Value
where
    T: Serialize + fmt::Debug + ?Sized,
{
    match serde_json::to_value(value) {
        Ok(plain) => plain,
        Err(err) => {
            debug!(error = %err, "value is not JSON-serializable, using debug rendering");
            Value::String(format!("{value:?}"))
        }
    }
}

/// Render a message list as one JSON string, or `None` when empty.
pub fn serialize_messages(messages: &[Value]) -> Option<String> {
    if messages.is_empty() {
        return None;
    }
    Some(Value::Array(messages.to_vec()).to_string())
}

/// Deserialize `null` as the type's default (e.g. an empty `Vec`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
