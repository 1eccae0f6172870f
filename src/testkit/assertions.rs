//! Assertion macros for composad results.
//!
//! - [`crate::assert_result_ok!`] unwraps an `Ok`, showing the error otherwise
//! - [`crate::assert_result_err!`] unwraps an `Err`
//! - [`crate::assert_contains_error!`] checks the error's display text
//! - [`crate::assert_stage_error!`] checks which pipeline stage failed
//! - [`crate::assert_absent!`] / [`crate::assert_present!`] inspect
//!   absence-tracking records
//! - [`crate::assert_validation_error_count!`] counts accumulated
//!   configuration errors
//!
//! ```rust
//! use composad::{assert_contains_error, assert_result_ok, ComposadError};
//!
//! let ok: Result<i32, ComposadError> = Ok(3);
//! assert_eq!(assert_result_ok!(ok), 3);
//!
//! let err: Result<i32, ComposadError> = Err(ComposadError::EmptyStack);
//! assert_contains_error!(err, "empty stack");
//! ```

/// Assert that a Result is Ok and extract the value.
#[macro_export]
macro_rules! assert_result_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "Expected Ok, got Err: {:?}\n  at {}:{}:{}",
                e,
                file!(),
                line!(),
                column!()
            ),
        }
    };
    ($result:expr, $($msg:tt)+) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "{}: Expected Ok, got Err: {:?}\n  at {}:{}:{}",
                format!($($msg)+),
                e,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Assert that a Result is Err and extract the error.
#[macro_export]
macro_rules! assert_result_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err, got Ok: {:?}\n  at {}:{}:{}",
                value,
                file!(),
                line!(),
                column!()
            ),
            Err(e) => e,
        }
    };
}

/// Assert that an error's display text contains `pattern`, returning the error.
#[macro_export]
macro_rules! assert_contains_error {
    ($result:expr, $pattern:expr) => {{
        let err = $crate::assert_result_err!($result);
        let text = err.to_string();
        assert!(
            text.contains($pattern),
            "Error '{}' does not contain '{}'\n  at {}:{}:{}",
            text,
            $pattern,
            file!(),
            line!(),
            column!()
        );
        err
    }};
}

/// Assert that a pipeline failed inside the stage path `stage`, returning
/// the error the stage raised.
#[macro_export]
macro_rules! assert_stage_error {
    ($result:expr, $stage:expr) => {
        match $crate::assert_result_err!($result) {
            $crate::ComposadError::Stage { stage, source } => {
                assert_eq!(stage, $stage, "failing stage path");
                *source
            }
            other => panic!(
                "Expected a stage error from '{}', got: {:?}\n  at {}:{}:{}",
                $stage,
                other,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Assert that a value is an absent absence-tracking record.
#[macro_export]
macro_rules! assert_absent {
    ($value:expr) => {{
        let value: &$crate::serde_json::Value = &$value;
        assert!(
            !$crate::effects::maybe::has_value(value),
            "Expected an absent record, got: {}\n  at {}:{}:{}",
            value,
            file!(),
            line!(),
            column!()
        );
    }};
}

/// Assert that a value is a present record and extract its payload.
#[macro_export]
macro_rules! assert_present {
    ($value:expr) => {
        match $crate::effects::Maybe::from_value($crate::serde_json::Value::clone(&$value)) {
            Ok($crate::effects::Maybe::Just(inner)) => inner,
            other => panic!(
                "Expected a present record, got: {:?}\n  at {}:{}:{}",
                other,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Assert that a Validation failed with exactly `count` errors.
#[macro_export]
macro_rules! assert_validation_error_count {
    ($validation:expr, $count:expr) => {
        match $validation {
            $crate::stillwater::Validation::Success(value) => panic!(
                "Expected {} validation errors, got success with: {:?}\n  at {}:{}:{}",
                $count,
                value,
                file!(),
                line!(),
                column!()
            ),
            $crate::stillwater::Validation::Failure(errors) => {
                assert_eq!(
                    errors.len(),
                    $count,
                    "Expected {} errors, got {}: {:?}",
                    $count,
                    errors.len(),
                    errors,
                );
                errors
            }
        }
    };
}
