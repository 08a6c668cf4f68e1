//! Output contracts and the progress-observer boundary.
//!
//! The controller buffers everything it emits into an [`Outputs`] value
//! (cleared at the start of every tick) and simultaneously relays each event
//! to the observer injected at construction. Hosts can consume either side:
//! poll the buffer returned by `tick`, or react to the observer callbacks.

use serde::{Deserialize, Serialize};

use crate::data::HighlightTarget;
use crate::time::AnimTime;

/// Per-tick progress report for the active step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Index of the active step on the current timeline.
    pub step_index: usize,
    /// Fraction of the active step already played, in `[0, 1]`; 1.0 for
    /// zero-duration markers.
    pub local_progress: f32,
    /// Position on the whole timeline, in `[0, 100]`.
    pub normalized_position: f32,
}

/// Discrete signals emitted while driving a timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChoreoEvent {
    /// A new timeline replaced the previous one.
    TimelineLoaded { total_duration: AnimTime },
    PlaybackStarted,
    PlaybackPaused,
    PlaybackFinished { at: AnimTime },
    SpeedChanged { speed: f32 },
    /// The clock was repositioned by a seek.
    Seeked { normalized_position: f32 },
    /// Streamed while playing and after repositioning, so the renderer can
    /// paint partial transitions.
    Progress(ProgressUpdate),
    /// The active step changed; carries the step's code-highlight target
    /// for the highlight collaborator.
    StepEntered {
        step_index: usize,
        highlight: Option<HighlightTarget>,
    },
}

/// Event buffer filled by the controller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<ChoreoEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: ChoreoEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Receives every event the controller emits.
///
/// Injected at construction so the scheduling core stays independent of any
/// concrete UI widget (a position slider, a code panel) and remains
/// independently testable.
pub trait ProgressObserver {
    fn on_event(&mut self, event: &ChoreoEvent);
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_event(&mut self, _event: &ChoreoEvent) {}
}
