//! Unified error type for composad operations.
//!
//! Every fallible operation in the crate returns [`ComposadError`]. The
//! variants separate the failures a caller can act on (a refused stack
//! removal, a mis-shaped wrapped value, a failing pipeline stage) from
//! configuration problems.
//!
//! # Example
//!
//! ```rust
//! use composad::errors::ComposadError;
//!
//! let refused = ComposadError::removal_refused("writer");
//! assert_eq!(refused.category(), "Stack");
//! assert!(refused.to_string().contains("writer"));
//!
//! // Convert to anyhow for callers that use dynamic errors
//! let dynamic: anyhow::Error = refused.into_anyhow();
//! let back: ComposadError = dynamic.into();
//! assert_eq!(back.category(), "Error");
//! ```

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ComposadError>;

/// Error type for effect stacks, effects and pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposadError {
    /// The top of the stack declares that it cannot be removed.
    #[error("monad {name} cannot be removed")]
    RemovalRefused { name: String },

    /// `remove_monad` was called on a stack with no effects.
    #[error("cannot remove a monad from an empty stack")]
    EmptyStack,

    /// Growing the stack would exceed the configured depth.
    #[error("stack depth limit of {max} effects reached")]
    DepthExceeded { max: usize },

    /// A wrapped value does not have the shape its effect produces.
    #[error("malformed {effect} value: {message}")]
    Malformed {
        effect: &'static str,
        message: String,
    },

    /// A pipeline stage failed with `source`.
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        source: Box<ComposadError>,
    },

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Catch-all for errors raised by user step functions.
    #[error("{0}")]
    Other(String),
}

impl ComposadError {
    /// Create a refusal for the effect with the given name.
    pub fn removal_refused(name: impl Into<String>) -> Self {
        Self::RemovalRefused { name: name.into() }
    }

    /// Create a shape error for the named effect.
    pub fn malformed(effect: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            effect,
            message: message.into(),
        }
    }

    /// Wrap an error with the name of the stage that produced it.
    ///
    /// Errors that already carry a stage are returned unchanged so nested
    /// pipelines report the innermost failing stage.
    pub fn in_stage(self, stage: impl Into<String>) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::Stage {
                stage: stage.into(),
                source: Box::new(other),
            },
        }
    }

    /// The error underneath any stage context.
    ///
    /// ```rust
    /// use composad::errors::ComposadError;
    ///
    /// let err = ComposadError::EmptyStack.in_stage("remove_monad");
    /// assert_eq!(err.root_cause(), &ComposadError::EmptyStack);
    /// ```
    pub fn root_cause(&self) -> &ComposadError {
        match self {
            Self::Stage { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an error from any message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::RemovalRefused { .. } | Self::EmptyStack | Self::DepthExceeded { .. } => "Stack",
            Self::Malformed { .. } => "Shape",
            Self::Stage { .. } => "Stage",
            Self::Config(_) => "Config",
            Self::Other(_) => "Error",
        }
    }

    /// Convert this error to an `anyhow::Error`.
    pub fn into_anyhow(self) -> anyhow::Error {
        anyhow::Error::from(self)
    }
}

impl From<anyhow::Error> for ComposadError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<&str> for ComposadError {
    fn from(message: &str) -> Self {
        Self::Other(message.to_string())
    }
}

impl From<String> for ComposadError {
    fn from(message: String) -> Self {
        Self::Other(message)
    }
}

// Needed for pipeline stages that can never fail.
impl From<std::convert::Infallible> for ComposadError {
    fn from(infallible: std::convert::Infallible) -> Self {
        match infallible {}
    }
}

/// Format a list of errors for display.
///
/// ```rust
/// use composad::errors::{format_error_list, ComposadError};
///
/// let errors = vec![ComposadError::EmptyStack, ComposadError::config("bad depth")];
/// let formatted = format_error_list(&errors);
/// assert!(formatted.contains("1. cannot remove"));
/// assert!(formatted.contains("2. config error"));
/// ```
pub fn format_error_list(errors: &[ComposadError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}
