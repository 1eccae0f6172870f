use super::core::ComposadConfig;
use crate::errors::{ComposadError, Result};

/// Environment variable that turns on stack tracing.
pub const TRACE_ENV: &str = "COMPOSAD_TRACE";

/// Environment variable that overrides the stack depth limit.
pub const MAX_DEPTH_ENV: &str = "COMPOSAD_MAX_DEPTH";

impl ComposadConfig {
    /// Parse configuration from TOML text.
    ///
    /// ```rust
    /// use composad::config::ComposadConfig;
    ///
    /// let config = ComposadConfig::from_toml_str("[stack]\nmax_depth = 4\n").unwrap();
    /// assert_eq!(config.stack.max_depth, Some(4));
    /// assert!(config.absence.accept_untagged);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ComposadError::config(format!("failed to parse config: {}", e)))
    }

    /// Apply `COMPOSAD_TRACE` / `COMPOSAD_MAX_DEPTH` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(trace) = lookup(TRACE_ENV) {
            self.stack.trace = parse_flag(&trace).ok_or_else(|| {
                ComposadError::config(format!("{} must be a boolean, got '{}'", TRACE_ENV, trace))
            })?;
        }

        if let Some(depth) = lookup(MAX_DEPTH_ENV) {
            let depth = depth.trim().parse::<usize>().map_err(|e| {
                ComposadError::config(format!("{} must be a number: {}", MAX_DEPTH_ENV, e))
            })?;
            self.stack.max_depth = Some(depth);
        }

        tracing::debug!(config = ?self, "resolved configuration");
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
