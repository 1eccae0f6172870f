//! Conditional pipeline combinators.
//!
//! All combinators take ordinary stages and produce a single stage:
//!
//! - [`pipe`]: run stages left to right
//! - [`pipe_if`]: run stages only when a guard accepts the input
//! - [`pipe_if_else`]: choose between two stage lists
//! - [`pipe_switch`]: choose a stage list by key, pass through on no match
//!
//! Guards always see the combinator's own input, never an intermediate
//! result. [`equal`] and [`echo`] help build guards and inject constants.

use super::builder::StageTiming;
use super::stage::{BoxedStage, Stage};
use crate::errors::Result;
use crate::observability::context;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

/// Execute one stage inside its tracing span and stage-path context.
///
/// Failures are reported with the path of the innermost failing stage.
pub(crate) fn run_stage<T>(stage: &dyn Stage<T>, input: T) -> Result<T> {
    let _path = context::enter_stage(stage.name());
    let _span = tracing::trace_span!("stage", name = stage.name()).entered();
    tracing::trace!("executing stage");
    stage
        .execute(input)
        .map_err(|e| e.in_stage(context::current_stage_path()))
}

/// Left-to-right composition of stages.
///
/// An empty pipe is the identity.
pub struct Pipe<'a, T> {
    name: String,
    stages: Vec<BoxedStage<'a, T>>,
}

impl<'a, T> Pipe<'a, T> {
    pub fn new(stages: Vec<BoxedStage<'a, T>>) -> Self {
        Self {
            name: "pipe".to_string(),
            stages,
        }
    }

    /// Append a stage.
    pub fn then<S>(mut self, stage: S) -> Self
    where
        S: Stage<T> + 'a,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Execute and collect how long each top-level stage took.
    pub fn execute_with_timing(&self, input: T) -> Result<(T, Vec<StageTiming>)> {
        let mut timings = Vec::with_capacity(self.stages.len());
        let mut data = input;

        for stage in &self.stages {
            let start = Instant::now();
            data = run_stage(stage.as_ref(), data)?;
            timings.push(StageTiming {
                name: stage.name().to_string(),
                duration: start.elapsed(),
            });
        }

        Ok((data, timings))
    }
}

impl<T> Default for Pipe<'_, T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Stage<T> for Pipe<'_, T> {
    fn execute(&self, input: T) -> Result<T> {
        self.stages
            .iter()
            .try_fold(input, |data, stage| run_stage(stage.as_ref(), data))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Runs its stages only when the guard accepts the input.
pub struct PipeIf<'a, T, G> {
    guard: G,
    body: Pipe<'a, T>,
}

impl<'a, T, G> PipeIf<'a, T, G>
where
    G: Fn(&T) -> bool,
{
    pub fn new(guard: G, stages: Vec<BoxedStage<'a, T>>) -> Self {
        Self {
            guard,
            body: Pipe::new(stages),
        }
    }
}

impl<T, G> Stage<T> for PipeIf<'_, T, G>
where
    G: Fn(&T) -> bool,
{
    fn execute(&self, input: T) -> Result<T> {
        if (self.guard)(&input) {
            self.body.execute(input)
        } else {
            Ok(input)
        }
    }

    fn name(&self) -> &str {
        "pipe_if"
    }
}

/// Chooses between two stage lists.
pub struct PipeIfElse<'a, T, G> {
    guard: G,
    on_true: Pipe<'a, T>,
    on_false: Pipe<'a, T>,
}

impl<'a, T, G> PipeIfElse<'a, T, G>
where
    G: Fn(&T) -> bool,
{
    pub fn new(
        guard: G,
        on_true: Vec<BoxedStage<'a, T>>,
        on_false: Vec<BoxedStage<'a, T>>,
    ) -> Self {
        Self {
            guard,
            on_true: Pipe::new(on_true),
            on_false: Pipe::new(on_false),
        }
    }
}

impl<T, G> Stage<T> for PipeIfElse<'_, T, G>
where
    G: Fn(&T) -> bool,
{
    fn execute(&self, input: T) -> Result<T> {
        if (self.guard)(&input) {
            self.on_true.execute(input)
        } else {
            self.on_false.execute(input)
        }
    }

    fn name(&self) -> &str {
        "pipe_if_else"
    }
}

/// Chooses a stage list by the key the guard computes.
///
/// A key with no case passes the input through unchanged.
pub struct PipeSwitch<'a, T, K, G> {
    guard: G,
    cases: HashMap<K, Pipe<'a, T>>,
}

impl<'a, T, K, G> PipeSwitch<'a, T, K, G>
where
    K: Eq + Hash,
    G: Fn(&T) -> K,
{
    pub fn new(guard: G, cases: HashMap<K, Vec<BoxedStage<'a, T>>>) -> Self {
        Self {
            guard,
            cases: cases
                .into_iter()
                .map(|(key, stages)| (key, Pipe::new(stages)))
                .collect(),
        }
    }
}

impl<T, K, G> Stage<T> for PipeSwitch<'_, T, K, G>
where
    K: Eq + Hash,
    G: Fn(&T) -> K,
{
    fn execute(&self, input: T) -> Result<T> {
        let key = (self.guard)(&input);
        match self.cases.get(&key) {
            Some(case) => case.execute(input),
            None => Ok(input),
        }
    }

    fn name(&self) -> &str {
        "pipe_switch"
    }
}

/// Ignores its input and yields a clone of a constant.
pub struct Echo<T> {
    value: T,
}

impl<T: Clone> Echo<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> Stage<T> for Echo<T> {
    fn execute(&self, _input: T) -> Result<T> {
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Compose stages left to right.
pub fn pipe<'a, T>(stages: Vec<BoxedStage<'a, T>>) -> Pipe<'a, T> {
    Pipe::new(stages)
}

/// Run `stages` when `guard` accepts the input, otherwise pass it through.
pub fn pipe_if<'a, T, G>(guard: G, stages: Vec<BoxedStage<'a, T>>) -> BoxedStage<'a, T>
where
    T: 'a,
    G: Fn(&T) -> bool + 'a,
{
    Box::new(PipeIf::new(guard, stages))
}

/// Run `on_true` when `guard` accepts the input, `on_false` otherwise.
pub fn pipe_if_else<'a, T, G>(
    guard: G,
    on_true: Vec<BoxedStage<'a, T>>,
    on_false: Vec<BoxedStage<'a, T>>,
) -> BoxedStage<'a, T>
where
    T: 'a,
    G: Fn(&T) -> bool + 'a,
{
    Box::new(PipeIfElse::new(guard, on_true, on_false))
}

/// Run the case selected by `guard`; pass through when no case matches.
pub fn pipe_switch<'a, T, K, G>(
    guard: G,
    cases: HashMap<K, Vec<BoxedStage<'a, T>>>,
) -> BoxedStage<'a, T>
where
    T: 'a,
    K: Eq + Hash + 'a,
    G: Fn(&T) -> K + 'a,
{
    Box::new(PipeSwitch::new(guard, cases))
}

/// Curried equality, for use as a guard: `equal(a)(&b)` is `a == b`.
///
/// Equality is structural (`PartialEq`).
pub fn equal<T: PartialEq>(expected: T) -> impl Fn(&T) -> bool {
    move |actual: &T| *actual == expected
}

/// Uncurried form of [`equal`].
pub fn equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// A stage that always yields `value`.
pub fn echo<'a, T>(value: T) -> BoxedStage<'a, T>
where
    T: Clone + 'a,
{
    Box::new(Echo::new(value))
}
