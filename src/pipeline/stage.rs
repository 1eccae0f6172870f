//! Pipeline stage abstractions.
//!
//! A [`Stage`] is a named unary step `T -> Result<T>`. Plain closures become
//! stages through [`PureStage`] (cannot fail) or [`FallibleStage`] (returns a
//! `Result`), and every combinator in this crate is itself a stage, so
//! pipelines nest freely.

use crate::errors::{ComposadError, Result};
use std::marker::PhantomData;

/// A named step in a pipeline.
pub trait Stage<T> {
    /// Execute this stage with the given input.
    fn execute(&self, input: T) -> Result<T>;

    /// Get the stage name for tracing and error reports.
    fn name(&self) -> &str;
}

/// Type-erased stage, as stored by combinators.
pub type BoxedStage<'a, T> = Box<dyn Stage<T> + 'a>;

impl<T, S> Stage<T> for Box<S>
where
    S: Stage<T> + ?Sized,
{
    fn execute(&self, input: T) -> Result<T> {
        (**self).execute(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T, S> Stage<T> for &S
where
    S: Stage<T> + ?Sized,
{
    fn execute(&self, input: T) -> Result<T> {
        (**self).execute(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A stage built from an infallible function.
///
/// ```rust
/// use composad::pipeline::{PureStage, Stage};
///
/// let stage = PureStage::new("Double", |x: i32| x * 2);
/// assert_eq!(stage.execute(21).unwrap(), 42);
/// ```
pub struct PureStage<F, T> {
    name: String,
    func: F,
    _phantom: PhantomData<fn(T) -> T>,
}

impl<F, T> PureStage<F, T>
where
    F: Fn(T) -> T,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, T> Stage<T> for PureStage<F, T>
where
    F: Fn(T) -> T,
{
    fn execute(&self, input: T) -> Result<T> {
        Ok((self.func)(input))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A stage built from a function that can fail.
///
/// Any error convertible into [`ComposadError`] is accepted, including
/// `anyhow::Error` and plain strings.
pub struct FallibleStage<F, T, E> {
    name: String,
    func: F,
    _phantom: PhantomData<fn(T) -> std::result::Result<T, E>>,
}

impl<F, T, E> FallibleStage<F, T, E>
where
    F: Fn(T) -> std::result::Result<T, E>,
    E: Into<ComposadError>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, T, E> Stage<T> for FallibleStage<F, T, E>
where
    F: Fn(T) -> std::result::Result<T, E>,
    E: Into<ComposadError>,
{
    fn execute(&self, input: T) -> Result<T> {
        (self.func)(input).map_err(Into::into)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Box an infallible closure as an anonymous stage.
pub fn step<'a, T, F>(func: F) -> BoxedStage<'a, T>
where
    F: Fn(T) -> T + 'a,
    T: 'a,
{
    Box::new(PureStage::new("step", func))
}

/// Box a fallible closure as an anonymous stage.
pub fn try_step<'a, T, E, F>(func: F) -> BoxedStage<'a, T>
where
    F: Fn(T) -> std::result::Result<T, E> + 'a,
    E: Into<ComposadError> + 'a,
    T: 'a,
{
    Box::new(FallibleStage::new("try_step", func))
}
