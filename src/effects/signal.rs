//! Carry/result signaling.
//!
//! Values are tagged `carry` (keep processing) or `result` (a terminal value
//! was produced). `bind` over a `result` unwraps it and returns the raw value
//! without calling the step; over a `carry` it returns whatever the step
//! returns. Nothing re-tags a value as `result` except an explicit
//! [`Signal::result`], and `unit` tags as `carry` just like [`Signal::carry`].

use super::{Monad, StepFn};
use crate::errors::{ComposadError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Which way a signaled value is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Carry,
    Result,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Carry => "carry",
            Self::Result => "result",
        }
    }
}

/// Typed short-circuit-signaling value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub value: Value,
}

impl Signal {
    pub fn unit(value: Value) -> Self {
        Self::carry(value)
    }

    pub fn carry(value: Value) -> Self {
        Self {
            kind: SignalKind::Carry,
            value,
        }
    }

    pub fn result(value: Value) -> Self {
        Self {
            kind: SignalKind::Result,
            value,
        }
    }

    pub fn is_result(&self) -> bool {
        self.kind == SignalKind::Result
    }

    pub fn from_value(record: Value) -> Result<Self> {
        serde_json::from_value(record).map_err(|e| ComposadError::malformed("result", e.to_string()))
    }
}

impl From<Signal> for Value {
    fn from(signal: Signal) -> Self {
        json!({ "type": signal.kind.as_str(), "value": signal.value })
    }
}

/// Unwrap a `result`, or hand a `carry`'s value to `step`.
pub fn bind<F>(step: F, bound: Signal) -> Value
where
    F: FnOnce(Value) -> Value,
{
    match bound.kind {
        SignalKind::Result => bound.value,
        SignalKind::Carry => step(bound.value),
    }
}

/// The short-circuit-signaling effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultEffect;

impl ResultEffect {
    pub fn carry(&self, value: Value) -> Value {
        Signal::carry(value).into()
    }

    pub fn result(&self, value: Value) -> Value {
        Signal::result(value).into()
    }
}

impl Monad for ResultEffect {
    fn unit(&self, value: Value) -> Value {
        Signal::unit(value).into()
    }

    fn bind(&self, step: StepFn<'_>, wrapped: Value) -> Result<Value> {
        let bound = Signal::from_value(wrapped)?;
        match bound.kind {
            SignalKind::Result => Ok(bound.value),
            SignalKind::Carry => step(bound.value),
        }
    }
}
