//! Pipelines of unary stages.
//!
//! Stages are plain `T -> Result<T>` steps. The combinators in
//! [`combinators`] assemble them into a single stage independent of whether
//! any effect stack is in use; [`builder`] offers a fluent alternative.
//!
//! # Example
//!
//! ```rust
//! use composad::pipe;
//! use composad::pipeline::{echo, equal, pipe_if, Stage};
//! use serde_json::{json, Value};
//!
//! let pipeline = pipe!(
//!     echo(json!("asdf")),
//!     pipe_if(equal(json!("not equal")), vec![echo(json!("correct"))])
//! );
//! assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("asdf"));
//! ```

pub mod builder;
pub mod combinators;
pub mod stage;

pub use builder::{PipelineBuilder, StageTiming};
pub use combinators::{
    echo, equal, equals, pipe, pipe_if, pipe_if_else, pipe_switch, Echo, Pipe, PipeIf,
    PipeIfElse, PipeSwitch,
};
pub use stage::{step, try_step, BoxedStage, FallibleStage, PureStage, Stage};

/// Compose any number of stages left to right into a [`Pipe`].
///
/// `pipe!()` with no stages is the identity.
#[macro_export]
macro_rules! pipe {
    () => {
        $crate::pipeline::Pipe::default()
    };
    ($($stage:expr),+ $(,)?) => {
        $crate::pipeline::Pipe::default()$(.then($stage))+
    };
}
