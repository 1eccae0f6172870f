//! Effect handlers that can be stacked onto a pipeline.
//!
//! An effect is anything with a `unit` (wrap a raw value) and a `bind`
//! (thread a step function through a wrapped value). Four effects ship with
//! the crate:
//!
//! - [`maybe`]: absence tracking, short-circuits once a value is missing
//! - [`writer`]: accumulates named log channels across steps
//! - [`signal`]: carry/result tagging for early termination
//! - [`wrap`]: tags values with an identifier and reports them to a sink
//!
//! Effects operate on [`serde_json::Value`] so that any number of them can be
//! layered by a [`Composad`](crate::Composad) without knowing about each other.
//! Each effect also exposes a typed record (`Maybe`, `Logged`, `Signal`,
//! `Tagged`) for callers that use it directly.
//!
//! # Example
//!
//! ```rust
//! use composad::effects::{Effect, Monad};
//! use serde_json::json;
//!
//! let maybe = Effect::maybe();
//! assert_eq!(maybe.unit(json!(1)), json!({"hasValue": true, "value": 1}));
//! assert_eq!(maybe.unit(json!(null)), json!({"hasValue": false}));
//! ```

pub mod maybe;
pub mod signal;
pub mod wrap;
pub mod writer;

pub use maybe::{Maybe, MaybeEffect};
pub use signal::{ResultEffect, Signal, SignalKind};
pub use wrap::{make_wrap, make_wrap_with_sink, Tagged, WrapEffect};
pub use writer::{as_sequence, merge_logs, Logged, Logs, WriterEffect};

use crate::errors::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Raw step threaded through an effect's `bind`.
pub type StepFn<'a> = &'a dyn Fn(Value) -> Result<Value>;

/// Receiver for values handed out of the core by `tee` and wrap effects.
pub type Sink = Arc<dyn Fn(&Value) + Send + Sync>;

/// The capability every stackable effect provides.
///
/// `bind` receives the step function and a value in this effect's wrapped
/// form. Mis-shaped input must produce an error rather than a guess.
pub trait Monad: Send + Sync {
    /// Wrap a raw value.
    fn unit(&self, value: Value) -> Value;

    /// Thread `step` through `wrapped`.
    fn bind(&self, step: StepFn<'_>, wrapped: Value) -> Result<Value>;
}

/// Which effect an [`Effect`] dispatches to.
#[derive(Clone)]
pub enum EffectKind {
    Maybe(MaybeEffect),
    Writer(WriterEffect),
    Result(ResultEffect),
    Wrap(WrapEffect),
    Custom(Arc<dyn Monad>),
}

impl fmt::Debug for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maybe(m) => f.debug_tuple("Maybe").field(m).finish(),
            Self::Writer(_) => f.write_str("Writer"),
            Self::Result(_) => f.write_str("Result"),
            Self::Wrap(w) => f.debug_tuple("Wrap").field(w).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// A stackable effect: a handler plus its stack metadata.
///
/// Effects are not removable unless built with [`Effect::removable`].
#[derive(Debug, Clone)]
pub struct Effect {
    kind: EffectKind,
    name: String,
    can_be_removed: bool,
}

impl Effect {
    fn from_kind(kind: EffectKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            can_be_removed: false,
        }
    }

    /// Absence tracking that also accepts untagged `{ "value": .. }` records.
    pub fn maybe() -> Self {
        Self::from_kind(EffectKind::Maybe(MaybeEffect::default()), "maybe")
    }

    /// Absence tracking that only accepts records carrying `hasValue`.
    pub fn maybe_strict() -> Self {
        Self::from_kind(EffectKind::Maybe(MaybeEffect::strict()), "maybe")
    }

    /// Log accumulation.
    pub fn writer() -> Self {
        Self::from_kind(EffectKind::Writer(WriterEffect), "makeWriter")
    }

    /// Carry/result signaling.
    pub fn result() -> Self {
        Self::from_kind(EffectKind::Result(ResultEffect), "result")
    }

    /// Identifier tagging, see [`make_wrap`].
    pub fn wrap(wrap: WrapEffect) -> Self {
        let name = wrap.id().to_string();
        Self::from_kind(EffectKind::Wrap(wrap), name)
    }

    /// Any user-provided [`Monad`].
    pub fn custom(name: impl Into<String>, monad: impl Monad + 'static) -> Self {
        Self::from_kind(EffectKind::Custom(Arc::new(monad)), name)
    }

    /// Rename the effect (used in refusal messages and logs).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Allow `remove_monad` to pop this effect.
    pub fn removable(mut self) -> Self {
        self.can_be_removed = true;
        self
    }

    /// Make an absence-tracking effect reject untagged records.
    ///
    /// Other kinds are returned unchanged.
    pub fn into_strict_absence(self) -> Self {
        match self.kind {
            EffectKind::Maybe(_) => Self {
                kind: EffectKind::Maybe(MaybeEffect::strict()),
                ..self
            },
            _ => self,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn can_be_removed(&self) -> bool {
        self.can_be_removed
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }
}

impl Monad for Effect {
    fn unit(&self, value: Value) -> Value {
        match &self.kind {
            EffectKind::Maybe(m) => m.unit(value),
            EffectKind::Writer(w) => w.unit(value),
            EffectKind::Result(r) => r.unit(value),
            EffectKind::Wrap(w) => w.unit(value),
            EffectKind::Custom(c) => c.unit(value),
        }
    }

    fn bind(&self, step: StepFn<'_>, wrapped: Value) -> Result<Value> {
        match &self.kind {
            EffectKind::Maybe(m) => m.bind(step, wrapped),
            EffectKind::Writer(w) => w.bind(step, wrapped),
            EffectKind::Result(r) => r.bind(step, wrapped),
            EffectKind::Wrap(w) => w.bind(step, wrapped),
            EffectKind::Custom(c) => c.bind(step, wrapped),
        }
    }
}

/// Sink that reports values as `tracing` events on the `composad::sink` target.
pub fn tracing_sink(level: SinkLevel) -> Sink {
    Arc::new(move |value: &Value| match level {
        SinkLevel::Trace => tracing::trace!(target: "composad::sink", %value, "sink"),
        SinkLevel::Debug => tracing::debug!(target: "composad::sink", %value, "sink"),
        SinkLevel::Info => tracing::info!(target: "composad::sink", %value, "sink"),
    })
}

/// Level at which the default sink reports values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkLevel {
    Trace,
    #[default]
    Debug,
    Info,
}
