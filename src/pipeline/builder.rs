//! Fluent construction of pipelines.

use super::combinators::Pipe;
use super::stage::{BoxedStage, FallibleStage, PureStage, Stage};
use crate::errors::ComposadError;
use std::time::Duration;

/// Builder for constructing a [`Pipe`].
///
/// # Example
///
/// ```rust
/// use composad::pipeline::{PipelineBuilder, Stage};
///
/// let pipeline = PipelineBuilder::new()
///     .step("Add 1", |x: i32| x + 1)
///     .when(false, |p| p.step("Add 10", |x: i32| x + 10))
///     .step("Double", |x: i32| x * 2)
///     .build();
///
/// assert_eq!(pipeline.execute(1).unwrap(), 4);
/// ```
pub struct PipelineBuilder<'a, T> {
    name: Option<String>,
    stages: Vec<BoxedStage<'a, T>>,
}

impl<T> PipelineBuilder<'_, T> {
    /// Create a new empty pipeline builder.
    pub fn new() -> Self {
        Self {
            name: None,
            stages: Vec::new(),
        }
    }
}

impl<T> Default for PipelineBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: 'a> PipelineBuilder<'a, T> {
    /// Add a stage to the pipeline.
    pub fn stage<S>(mut self, stage: S) -> Self
    where
        S: Stage<T> + 'a,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add a named infallible step.
    pub fn step<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(T) -> T + 'a,
    {
        self.stage(PureStage::new(name, func))
    }

    /// Add a named fallible step.
    pub fn try_step<F, E>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + 'a,
        E: Into<ComposadError> + 'a,
    {
        self.stage(FallibleStage::new(name, func))
    }

    /// Add stages only when `condition` holds at build time.
    ///
    /// For a decision made on each input, use
    /// [`pipe_if`](super::combinators::pipe_if).
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }

    /// Name the built pipeline.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the final pipeline ready for execution.
    pub fn build(self) -> Pipe<'a, T> {
        let pipe = Pipe::new(self.stages);
        match self.name {
            Some(name) => pipe.named(name),
            None => pipe,
        }
    }
}

/// Timing information for a pipeline stage.
#[derive(Debug, Clone)]
pub struct StageTiming {
    /// Name of the stage
    pub name: String,

    /// Time taken to execute the stage
    pub duration: Duration,
}

impl StageTiming {
    /// Format the timing as a human-readable string.
    pub fn format(&self) -> String {
        format!("{}: {:.2}s", self.name, self.duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::combinators::pipe_if;
    use crate::pipeline::stage::step;

    #[test]
    fn test_pipeline_builder() {
        let pipeline = PipelineBuilder::new()
            .step("Add 1", |x: i32| x + 1)
            .step("Double", |x: i32| x * 2)
            .try_step("Check", |x: i32| if x < 100 { Ok(x) } else { Err("too big") })
            .build();

        assert_eq!(pipeline.execute(0).unwrap(), 2);
        assert!(pipeline.execute(60).is_err());
    }

    #[test]
    fn test_pipeline_conditional() {
        let with_extra = PipelineBuilder::new()
            .step("Start", |_: i32| 1)
            .when(true, |p| p.step("Add 10", |x: i32| x + 10))
            .step("Double", |x: i32| x * 2)
            .build();

        let without_extra = PipelineBuilder::new()
            .step("Start", |_: i32| 1)
            .when(false, |p| p.step("Add 10", |x: i32| x + 10))
            .step("Double", |x: i32| x * 2)
            .build();

        assert_eq!(with_extra.execute(0).unwrap(), 22); // (1 + 10) * 2
        assert_eq!(without_extra.execute(0).unwrap(), 2); // 1 * 2
    }

    #[test]
    fn test_builder_accepts_combinators() {
        let pipeline = PipelineBuilder::new()
            .stage(pipe_if(|x: &i32| *x > 0, vec![step(|x: i32| x * 100)]))
            .named("scale")
            .build();

        assert_eq!(pipeline.name(), "scale");
        assert_eq!(pipeline.execute(2).unwrap(), 200);
        assert_eq!(pipeline.execute(-2).unwrap(), -2);
    }

    #[test]
    fn test_stage_count() {
        let pipeline = PipelineBuilder::new()
            .step("S1", |x: i32| x)
            .step("S2", |x: i32| x + 1)
            .step("S3", |x: i32| x * 2)
            .build();

        assert_eq!(pipeline.stage_count(), 3);
    }

    #[test]
    fn test_timing_format() {
        let timing = StageTiming {
            name: "Parse".to_string(),
            duration: Duration::from_millis(1500),
        };
        assert_eq!(timing.format(), "Parse: 1.50s");
    }
}
