//! Configuration for effect stacks.
//!
//! Configuration is optional: `ComposadConfig::default()` reproduces the
//! stock behavior. It can be read from TOML, adjusted through environment
//! variables and validated with every problem reported at once.
//!
//! ```toml
//! [stack]
//! max_depth = 8
//! trace = false
//!
//! [absence]
//! accept_untagged = true
//!
//! [sink]
//! level = "debug"
//! ```

mod core;
mod loader;
pub mod validation;

pub use self::core::{AbsenceConfig, ComposadConfig, SinkConfig, StackConfig};
pub use loader::{MAX_DEPTH_ENV, TRACE_ENV};
pub use validation::{validate_config, validate_config_result, ConfigValidation};
