use serde::{Deserialize, Serialize};

use crate::effects::{Effect, SinkLevel};

/// Root configuration for a [`Composad`](crate::Composad).
///
/// Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposadConfig {
    /// Stack growth and tracing
    pub stack: StackConfig,

    /// Absence-tracking ingestion rules
    pub absence: AbsenceConfig,

    /// Where `tee` output goes
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Refuse `add_monad` once this many effects are stacked.
    pub max_depth: Option<usize>,

    /// Emit a `trace` event for every stack-level `unit` and `bind`.
    pub trace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsenceConfig {
    /// Treat untagged `{ value }` records as present.
    pub accept_untagged: bool,
}

impl Default for AbsenceConfig {
    fn default() -> Self {
        Self {
            accept_untagged: true,
        }
    }
}

impl AbsenceConfig {
    /// The absence-tracking effect these rules select.
    pub fn effect(&self) -> Effect {
        if self.accept_untagged {
            Effect::maybe()
        } else {
            Effect::maybe_strict()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub level: SinkLevel,
}
