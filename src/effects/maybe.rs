//! Absence tracking.
//!
//! A value is either absent (`{"hasValue": false}`) or present
//! (`{"hasValue": true, "value": ..}`). Binding a step over an absent value
//! skips the step entirely. The step is expected to return an absence-tracking
//! record itself; `bind` does not re-wrap it.
//!
//! Records without a `hasValue` tag but with a `value` field are accepted as
//! present unless the effect is built with [`MaybeEffect::strict`].

use super::{Monad, StepFn};
use crate::errors::{ComposadError, Result};
use serde_json::{json, Map, Value};

const HAS_VALUE: &str = "hasValue";
const VALUE: &str = "value";

/// Typed absence-tracking value.
#[derive(Debug, Clone, PartialEq)]
pub enum Maybe {
    Nothing,
    Just(Value),
}

impl Maybe {
    /// `null` becomes [`Maybe::Nothing`], anything else is present.
    pub fn unit(value: Value) -> Self {
        if value.is_null() {
            Self::Nothing
        } else {
            Self::Just(value)
        }
    }

    pub fn has_value(&self) -> bool {
        matches!(self, Self::Just(_))
    }

    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Just(value) => Some(value),
            Self::Nothing => None,
        }
    }

    /// Parse a record, accepting the legacy untagged `{ value }` shape.
    pub fn from_value(record: Value) -> Result<Self> {
        Self::parse(record, true)
    }

    /// Parse a record that must carry a `hasValue` tag.
    pub fn from_value_strict(record: Value) -> Result<Self> {
        Self::parse(record, false)
    }

    fn parse(record: Value, accept_untagged: bool) -> Result<Self> {
        let mut fields = match record {
            Value::Object(fields) => fields,
            other => {
                return Err(ComposadError::malformed(
                    "maybe",
                    format!("expected an object, got {}", other),
                ))
            }
        };

        if !accept_untagged && !fields.contains_key(HAS_VALUE) {
            return Err(ComposadError::malformed(
                "maybe",
                "record has no `hasValue` tag",
            ));
        }

        if !record_has_value(&fields) {
            return Ok(Self::Nothing);
        }

        Ok(fields
            .remove(VALUE)
            .map(Self::Just)
            .unwrap_or(Self::Nothing))
    }
}

impl From<Maybe> for Value {
    fn from(maybe: Maybe) -> Self {
        match maybe {
            Maybe::Nothing => json!({ "hasValue": false }),
            Maybe::Just(value) => json!({ "hasValue": true, "value": value }),
        }
    }
}

impl From<Option<Value>> for Maybe {
    fn from(option: Option<Value>) -> Self {
        option.map(Maybe::unit).unwrap_or(Maybe::Nothing)
    }
}

/// Thread `step` through a typed value, skipping it when absent.
pub fn bind<F>(step: F, maybe: Maybe) -> Maybe
where
    F: FnOnce(Value) -> Maybe,
{
    match maybe {
        Maybe::Just(value) => step(value),
        Maybe::Nothing => Maybe::Nothing,
    }
}

/// True when a raw record carries a value.
///
/// The record must own a `value` field and either have no `hasValue` tag or
/// a truthy one.
pub fn has_value(record: &Value) -> bool {
    record.as_object().is_some_and(record_has_value)
}

fn record_has_value(fields: &Map<String, Value>) -> bool {
    fields.contains_key(VALUE) && fields.get(HAS_VALUE).is_none_or(truthy)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The absence-tracking effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeEffect {
    accept_untagged: bool,
}

impl Default for MaybeEffect {
    fn default() -> Self {
        Self {
            accept_untagged: true,
        }
    }
}

impl MaybeEffect {
    pub fn strict() -> Self {
        Self {
            accept_untagged: false,
        }
    }

    pub fn accepts_untagged(&self) -> bool {
        self.accept_untagged
    }
}

impl Monad for MaybeEffect {
    fn unit(&self, value: Value) -> Value {
        Maybe::unit(value).into()
    }

    fn bind(&self, step: StepFn<'_>, wrapped: Value) -> Result<Value> {
        match Maybe::parse(wrapped, self.accept_untagged)? {
            Maybe::Just(value) => step(value),
            Maybe::Nothing => Ok(Maybe::Nothing.into()),
        }
    }
}
