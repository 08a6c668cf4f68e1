//! Engine configuration.

use serde::{Deserialize, Serialize};

/// What `play()` does from the `Finished` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestartPolicy {
    /// Rewind to zero and play again.
    #[default]
    FromStart,
    /// Stay in the terminal state; a fresh `load()` is required.
    Ignore,
}

/// Configuration for the playback controller.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum events buffered per tick; excess is dropped with a warning.
    pub max_events_per_tick: usize,
    /// Speed multiplier applied until the host changes it. Must be positive
    /// and finite; invalid values fall back to 1.0 at construction.
    pub default_speed: f32,
    /// Behavior of `play()` from the `Finished` state.
    pub restart: RestartPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_events_per_tick: 1024,
            default_speed: 1.0,
            restart: RestartPolicy::FromStart,
        }
    }
}
