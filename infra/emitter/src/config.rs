use serde::Deserialize;

/// `0` disables the leak warning.
pub const UNLIMITED_LISTENERS: usize = 0;

/// Tuning knobs for an [`Emitter`](crate::Emitter).
///
/// Every field has a default, so partial documents deserialize fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Listener count per event above which a possible leak is reported.
    pub max_listeners: usize,
    /// Number of event names to pre-allocate room for.
    pub initial_capacity: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self { max_listeners: UNLIMITED_LISTENERS, initial_capacity: 0 }
    }
}
