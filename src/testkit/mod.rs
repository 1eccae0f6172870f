//! Test helpers for code built on composad.
//!
//! - **Assertion macros** for `Result` and stillwater `Validation` values,
//!   exported at the crate root
//! - **[`Spy`]** counts how often a step function is invoked, which is how
//!   short-circuiting is observed
//! - **[`RecordingSink`]** captures everything a wrap effect or `tee` reports
//!
//! ```rust
//! use composad::pipeline::Stage;
//! use composad::testkit::Spy;
//! use composad::{Composad, Effect};
//! use serde_json::{json, Value};
//!
//! let stack = Composad::new();
//! stack.add_monad(Effect::maybe()).execute(Value::Null).unwrap();
//!
//! let spy = Spy::new(|v: Value| Ok(v));
//! stack.bind(spy.step(), json!({ "hasValue": false })).unwrap();
//! assert_eq!(spy.calls(), 0);
//! ```

pub mod assertions;
pub mod helpers;

pub use helpers::{RecordingSink, Spy};
