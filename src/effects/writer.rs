//! Log accumulation.
//!
//! A wrapped value carries named log channels next to the value:
//! `{"value": .., "logs": {"channel": [..]}}`. Binding a step merges the
//! logs the step returns into the logs already carried, so channels only
//! ever grow and each channel keeps its entries in emission order.

use super::{Monad, StepFn};
use crate::errors::{ComposadError, Result};
use im::OrdMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Log channels keyed by name.
///
/// Entries are normally arrays; a lone non-array entry counts as a
/// one-element array when merged.
pub type Logs = OrdMap<String, Value>;

/// Typed log-accumulating value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logged {
    pub value: Value,
    pub logs: Logs,
}

impl Logged {
    /// Wrap a value with no logs.
    pub fn unit(value: Value) -> Self {
        Self {
            value,
            logs: Logs::new(),
        }
    }

    /// Append one entry to a channel, creating the channel if needed.
    pub fn with_log(mut self, channel: impl Into<String>, entry: impl Into<Value>) -> Self {
        let channel = channel.into();
        let mut entries = self.logs.remove(&channel).map(as_sequence).unwrap_or_default();
        entries.push(entry.into());
        self.logs.insert(channel, Value::Array(entries));
        self
    }

    /// Entries recorded on a channel, oldest first.
    pub fn channel(&self, channel: &str) -> Vec<Value> {
        self.logs.get(channel).cloned().map(as_sequence).unwrap_or_default()
    }

    /// Parse a record produced by [`Logged::unit`] or a writer step.
    pub fn from_value(record: Value) -> Result<Self> {
        serde_json::from_value(record).map_err(|e| ComposadError::malformed("writer", e.to_string()))
    }
}

impl From<Logged> for Value {
    fn from(logged: Logged) -> Self {
        let logs: Map<String, Value> = logged.logs.into_iter().collect();
        json!({ "value": logged.value, "logs": Value::Object(logs) })
    }
}

/// Thread `step` through a typed value, merging the logs it emits.
pub fn bind<F>(step: F, logged: Logged) -> Logged
where
    F: FnOnce(Value) -> Logged,
{
    let result = step(logged.value);
    Logged {
        value: result.value,
        logs: merge_logs(&logged.logs, &result.logs),
    }
}

/// Merge two log mappings.
///
/// Every channel of either side is present in the result. Channels found on
/// both sides are concatenated with `log1`'s entries first; channels only in
/// `log1` are left untouched.
pub fn merge_logs(log1: &Logs, log2: &Logs) -> Logs {
    let seeded = log2.keys().fold(log1.clone(), |acc, key| {
        if acc.contains_key(key) {
            acc
        } else {
            acc.update(key.clone(), Value::Array(Vec::new()))
        }
    });

    seeded
        .into_iter()
        .map(|(key, entries)| match log2.get(&key) {
            Some(more) => {
                let mut merged = as_sequence(entries);
                merged.extend(as_sequence(more.clone()));
                (key, Value::Array(merged))
            }
            None => (key, entries),
        })
        .collect()
}

/// Arrays pass through; any other value becomes a one-element sequence.
pub fn as_sequence(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// The log-accumulating effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterEffect;

impl Monad for WriterEffect {
    fn unit(&self, value: Value) -> Value {
        Logged::unit(value).into()
    }

    fn bind(&self, step: StepFn<'_>, wrapped: Value) -> Result<Value> {
        let carried = Logged::from_value(wrapped)?;
        let result = Logged::from_value(step(carried.value)?)?;
        Ok(Logged {
            value: result.value,
            logs: merge_logs(&carried.logs, &result.logs),
        }
        .into())
    }
}
