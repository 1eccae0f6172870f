//! Stackable effect handlers and conditional combinators for pipelines of
//! unary functions.
//!
//! - [`effects`]: absence tracking, log accumulation, carry/result signalling
//!   and tag-and-report wrapping, all behind the [`Monad`] trait
//! - [`Composad`]: an ordered stack of effects with a combined `unit` and
//!   `bind`, mutated by stages placed in the pipeline itself
//! - [`pipeline`]: `pipe`, `pipe_if`, `pipe_if_else`, `pipe_switch` and
//!   friends, usable with or without a stack
//!
//! # Example
//!
//! ```rust
//! use composad::{pipe, Composad, Effect, Stage};
//! use serde_json::{json, Value};
//!
//! let stack = Composad::new();
//! let double = |v: Value| -> composad::Result<Value> { Ok(json!(v.as_i64().unwrap_or(0) * 2)) };
//!
//! let pipeline = pipe!(
//!     stack.add_monad(Effect::maybe()),
//!     composad::pipeline::step(|_| stack.unit(json!(21))),
//!     stack.binder(double),
//! );
//!
//! let out = pipeline.execute(Value::Null).unwrap();
//! assert_eq!(out, json!({ "hasValue": true, "value": 42 }));
//! ```

// Export modules for library usage
pub mod composad;
pub mod config;
pub mod effects;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod testkit;

pub use crate::composad::{AddMonad, Bind, Composad, RemoveMonad};

pub use crate::config::{validate_config, validate_config_result, ComposadConfig};

pub use crate::effects::{
    make_wrap, make_wrap_with_sink, tracing_sink, Effect, EffectKind, Maybe, Monad, Sink,
    SinkLevel,
};

pub use crate::errors::{ComposadError, Result};

// Paths for the exported test macros.
#[doc(hidden)]
pub use serde_json;
#[doc(hidden)]
pub use stillwater;

pub use crate::pipeline::{
    echo, equal, equals, pipe_if, pipe_if_else, pipe_switch, BoxedStage, Pipe, PipelineBuilder,
    Stage,
};
