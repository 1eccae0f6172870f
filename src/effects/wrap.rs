//! Identifier tagging.
//!
//! [`make_wrap`] builds an effect whose `unit` produces `{"id": .., "val": ..}`.
//! Its `bind` reports the bound record to a sink and re-wraps `val` under the
//! effect's own identifier; the step function is never called. It carries no
//! absence, log or short-circuit semantics and is meant as a starting point
//! for custom tagged effects.

use super::{tracing_sink, Effect, Monad, Sink, SinkLevel, StepFn};
use crate::errors::{ComposadError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Typed tagged value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagged {
    pub id: String,
    pub val: Value,
}

impl Tagged {
    pub fn from_value(record: Value) -> Result<Self> {
        serde_json::from_value(record).map_err(|e| ComposadError::malformed("wrap", e.to_string()))
    }
}

impl From<Tagged> for Value {
    fn from(tagged: Tagged) -> Self {
        json!({ "id": tagged.id, "val": tagged.val })
    }
}

/// The tagging effect for one identifier.
#[derive(Clone)]
pub struct WrapEffect {
    id: String,
    sink: Sink,
}

impl fmt::Debug for WrapEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapEffect").field("id", &self.id).finish_non_exhaustive()
    }
}

impl WrapEffect {
    pub fn new(id: impl Into<String>, sink: Sink) -> Self {
        Self {
            id: id.into(),
            sink,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self, value: Value) -> Tagged {
        Tagged {
            id: self.id.clone(),
            val: value,
        }
    }
}

impl Monad for WrapEffect {
    fn unit(&self, value: Value) -> Value {
        self.tag(value).into()
    }

    fn bind(&self, _step: StepFn<'_>, wrapped: Value) -> Result<Value> {
        let bound = Tagged::from_value(wrapped.clone())?;
        (self.sink)(&wrapped);
        Ok(self.unit(bound.val))
    }
}

/// Tagging effect that reports bound values as `debug` tracing events.
pub fn make_wrap(id: impl Into<String>) -> Effect {
    make_wrap_with_sink(id, tracing_sink(SinkLevel::Debug))
}

/// Tagging effect that reports bound values to `sink`.
pub fn make_wrap_with_sink(id: impl Into<String>, sink: Sink) -> Effect {
    Effect::wrap(WrapEffect::new(id, sink))
}
