//! Shared test helpers: a scripted call accessor.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use cora::calls::{CallAccessor, CallRecord};
use cora::error::CoraError;

/// Accessor that replays a fixed script of fetch results.
///
/// Once the script is exhausted the last record is returned forever, which
/// models a call that never changes again.
pub struct ScriptedAccessor {
    script: Mutex<Vec<Result<CallRecord, String>>>,
    last: Mutex<Option<CallRecord>>,
    fetches: AtomicUsize,
}

impl ScriptedAccessor {
    pub fn new(records: Vec<CallRecord>) -> Self {
        Self::with_results(records.into_iter().map(Ok).collect())
    }

    /// `Err(message)` entries fail the fetch with `CoraError::NotFound(message)`.
    pub fn with_results(results: Vec<Result<CallRecord, String>>) -> Self {
        Self {
            script: Mutex::new(results),
            last: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallAccessor for ScriptedAccessor {
    async fn get_call(&self, _call_id: &str) -> Result<CallRecord, CoraError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                None
            } else {
                Some(script.remove(0))
            }
        };
        match next {
            Some(Ok(record)) => {
                *self.last.lock().unwrap() = Some(record.clone());
                Ok(record)
            }
            Some(Err(message)) => Err(CoraError::NotFound(message)),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| CoraError::NotFound("script is empty".to_string())),
        }
    }
}

pub fn message(text: &str) -> Value {
    json!({"role": "bot", "message": text})
}

pub fn record(status: &str) -> CallRecord {
    CallRecord::new("call-1").with_status(status.to_string())
}

pub fn record_with(status: &str, text: &str) -> CallRecord {
    record(status).with_message(message(text))
}

pub fn ended_without_status_update(text: &str) -> CallRecord {
    let mut record = record_with("in-progress", text);
    record.ended_at = Some(Utc::now().into());
    record.ended_reason = Some("customer-ended-call".to_string());
    record
}
