//! Validation with error accumulation for configuration.
//!
//! Uses stillwater's `Validation` so that every problem in a configuration
//! is reported at once instead of stopping at the first.

use stillwater::{NonEmptyVec, Validation};

use super::core::{ComposadConfig, StackConfig};
use crate::errors::{format_error_list, ComposadError, Result};

/// Validation result carrying every configuration error found.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ComposadError>>;

/// Validate the whole configuration, accumulating all errors.
///
/// ```rust
/// use composad::config::{validate_config, ComposadConfig};
///
/// assert!(validate_config(&ComposadConfig::default()).is_success());
/// ```
pub fn validate_config(config: &ComposadConfig) -> ConfigValidation<()> {
    let errors = validate_stack(&config.stack);

    match NonEmptyVec::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Validate and convert to a fail-fast `Result`.
pub fn validate_config_result(config: &ComposadConfig) -> Result<()> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => {
            let mut errors: Vec<ComposadError> = errors.into_iter().collect();
            match errors.len() {
                1 => Err(errors.remove(0)),
                n => Err(ComposadError::config(format!(
                    "{} problems:\n{}",
                    n,
                    format_error_list(&errors)
                ))),
            }
        }
    }
}

fn validate_stack(stack: &StackConfig) -> Vec<ComposadError> {
    let mut errors = Vec::new();

    if stack.max_depth == Some(0) {
        errors.push(ComposadError::config(
            "stack.max_depth must allow at least one effect",
        ));
    }

    errors
}
