//! The effect stack.
//!
//! A [`Composad`] owns an ordered list of [`Effect`]s and derives a `unit` and
//! a `bind` that apply every stacked effect to a raw value or a raw step
//! function. Effects added first sit innermost: `unit` applies them in
//! insertion order, and `bind` peels them off from the last-added one inward,
//! runs the step on the raw value and re-wraps each layer on the way out.
//!
//! The list only changes through [`Composad::add_monad`] and
//! [`Composad::remove_monad`], both of which can be used as pipeline stages.
//!
//! # Example
//!
//! ```rust
//! use composad::{Composad, Effect, Stage};
//! use serde_json::json;
//!
//! let stack = Composad::new();
//! let seeded = stack.add_monad(Effect::maybe()).execute(json!(2)).unwrap();
//! stack.add_monad(Effect::writer()).execute(json!(null)).unwrap();
//!
//! let wrapped = stack.unit(json!(2));
//! assert_eq!(seeded, json!({ "hasValue": true, "value": 2 }));
//! assert_eq!(
//!     wrapped,
//!     json!({ "value": { "hasValue": true, "value": 2 }, "logs": {} })
//! );
//!
//! let doubled = stack
//!     .bind(|v| Ok(json!(v.as_i64().unwrap_or(0) * 2)), wrapped)
//!     .unwrap();
//! assert_eq!(
//!     doubled,
//!     json!({ "value": { "hasValue": true, "value": 4 }, "logs": {} })
//! );
//! ```

use crate::config::ComposadConfig;
use crate::effects::{tracing_sink, Effect, Monad, Sink};
use crate::errors::{ComposadError, Result};
use crate::pipeline::Stage;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;

/// An ordered, growable stack of effects.
///
/// A stack is meant to be driven by one pipeline at a time; `add_monad` and
/// `remove_monad` calls from different call sites interleave in call order.
pub struct Composad {
    monads: RefCell<Vec<Effect>>,
    config: ComposadConfig,
    sink: Sink,
}

impl fmt::Debug for Composad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composad")
            .field("monads", &self.effect_names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Composad {
    fn default() -> Self {
        Self::new()
    }
}

impl Composad {
    /// Create an empty stack with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ComposadConfig::default())
    }

    /// Create an empty stack; `tee` reports at the configured sink level.
    pub fn with_config(config: ComposadConfig) -> Self {
        let sink = tracing_sink(config.sink.level);
        Self {
            monads: RefCell::new(Vec::new()),
            config,
            sink,
        }
    }

    /// Replace the sink `tee` reports to.
    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ComposadConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.monads.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.monads.borrow().is_empty()
    }

    /// Names of the stacked effects, innermost first.
    pub fn effect_names(&self) -> Vec<String> {
        self.monads
            .borrow()
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    fn snapshot(&self) -> Vec<Effect> {
        self.monads.borrow().clone()
    }

    /// Wrap a raw seed in every stacked effect, first-added innermost.
    ///
    /// With no effects this is the identity.
    pub fn unit(&self, seed: Value) -> Value {
        let wrapped = self
            .snapshot()
            .iter()
            .fold(seed, |acc, monad| monad.unit(acc));
        if self.config.stack.trace {
            tracing::trace!(depth = self.len(), %wrapped, "unit");
        }
        wrapped
    }

    /// Thread a raw step through every stacked effect.
    ///
    /// The last-added effect is bound outermost. Each layer hands its inner
    /// value to the layers below it and wraps their result with its own
    /// `unit`, so a stack of `[maybe, writer]` turns `v -> f(v)` into a step
    /// that skips absent values and keeps the carried logs. With no effects
    /// this is plain application of `step`.
    ///
    /// The effects are read once when binding starts; steps that grow or
    /// shrink the stack only affect later calls.
    pub fn bind<F>(&self, step: F, wrapped: Value) -> Result<Value>
    where
        F: Fn(Value) -> Result<Value>,
    {
        let monads = self.snapshot();
        if self.config.stack.trace {
            tracing::trace!(depth = monads.len(), %wrapped, "bind");
        }
        bind_layers(&monads, &step, wrapped)
    }

    /// Curried form of [`Composad::bind`]: a stage that binds `step`.
    pub fn binder<F>(&self, step: F) -> Bind<'_, F>
    where
        F: Fn(Value) -> Result<Value>,
    {
        Bind { stack: self, step }
    }

    /// The absence-tracking effect selected by this stack's configuration.
    pub fn maybe(&self) -> Effect {
        self.config.absence.effect()
    }

    /// A stage that pushes `effect` and wraps its input with `effect.unit`.
    ///
    /// Every execution of the stage pushes the effect again. When the stack
    /// is configured with `absence.accept_untagged = false`, absence-tracking
    /// effects are made strict before they are stacked.
    pub fn add_monad(&self, effect: Effect) -> AddMonad<'_> {
        let effect = if self.config.absence.accept_untagged {
            effect
        } else {
            effect.into_strict_absence()
        };
        AddMonad {
            stack: self,
            effect,
        }
    }

    fn push(&self, effect: &Effect) -> Result<()> {
        let mut monads = self.monads.borrow_mut();
        if let Some(max) = self.config.stack.max_depth {
            if monads.len() >= max {
                tracing::debug!(effect = effect.name(), max, "stack depth limit reached");
                return Err(ComposadError::DepthExceeded { max });
            }
        }
        monads.push(effect.clone());
        tracing::debug!(effect = effect.name(), depth = monads.len(), "added monad");
        Ok(())
    }

    /// Pop the last-added effect and pass `seed` through unchanged.
    ///
    /// Refused, without touching the stack, when the top effect is not
    /// removable.
    pub fn remove_monad(&self, seed: Value) -> Result<Value> {
        let mut monads = self.monads.borrow_mut();
        let Some(top) = monads.last() else {
            return Err(ComposadError::EmptyStack);
        };

        if !top.can_be_removed() {
            tracing::debug!(effect = top.name(), "refused to remove monad");
            return Err(ComposadError::removal_refused(top.name()));
        }

        if let Some(removed) = monads.pop() {
            tracing::debug!(effect = removed.name(), depth = monads.len(), "removed monad");
        }
        Ok(seed)
    }

    /// [`Composad::remove_monad`] as a pipeline stage.
    pub fn remover(&self) -> RemoveMonad<'_> {
        RemoveMonad { stack: self }
    }

    /// Wrap `seed` with [`Composad::unit`] and report it to the sink.
    pub fn tee(&self, seed: Value) -> Value {
        let wrapped = self.unit(seed);
        (self.sink)(&wrapped);
        wrapped
    }
}

fn bind_layers(
    layers: &[Effect],
    step: &dyn Fn(Value) -> Result<Value>,
    wrapped: Value,
) -> Result<Value> {
    match layers.split_last() {
        None => step(wrapped),
        Some((outer, inner)) => outer.bind(
            &|layer| Ok(outer.unit(bind_layers(inner, step, layer)?)),
            wrapped,
        ),
    }
}

/// Stage returned by [`Composad::binder`].
pub struct Bind<'a, F> {
    stack: &'a Composad,
    step: F,
}

impl<F> Stage<Value> for Bind<'_, F>
where
    F: Fn(Value) -> Result<Value>,
{
    fn execute(&self, input: Value) -> Result<Value> {
        self.stack.bind(&self.step, input)
    }

    fn name(&self) -> &str {
        "bind"
    }
}

/// Stage returned by [`Composad::add_monad`].
pub struct AddMonad<'a> {
    stack: &'a Composad,
    effect: Effect,
}

impl Stage<Value> for AddMonad<'_> {
    fn execute(&self, input: Value) -> Result<Value> {
        self.stack.push(&self.effect)?;
        Ok(self.effect.unit(input))
    }

    fn name(&self) -> &str {
        self.effect.name()
    }
}

/// Stage returned by [`Composad::remover`].
pub struct RemoveMonad<'a> {
    stack: &'a Composad,
}

impl Stage<Value> for RemoveMonad<'_> {
    fn execute(&self, input: Value) -> Result<Value> {
        self.stack.remove_monad(input)
    }

    fn name(&self) -> &str {
        "remove_monad"
    }
}
