//! Timeline scheduler: converts sequences into timelines and drives the
//! clock.
//!
//! The scheduler owns the single active [`Timeline`] and the low-level
//! playback primitives over absolute time. It is driven cooperatively by an
//! external per-frame tick; no call blocks. The normalized (0-100) surface
//! lives in `controller.rs`.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::data::Sequence;
use crate::error::{ChoreoError, Result};
use crate::time::AnimTime;
use crate::timeline::Timeline;

/// Playback state of the scheduler/controller pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlayState {
    /// Timeline loaded (or nothing loaded) and not yet started.
    #[default]
    Idle,
    Playing,
    Paused,
    /// The clock reached the end, or `finish()` was called.
    Finished,
}

impl PlayState {
    /// Get the name of this playback state.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }

    /// Check if the clock is advancing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if `play()` can arm the clock without a restart policy.
    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Idle | Self::Paused)
    }

    /// Check if `pause()` has an effect.
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Transition produced by `play()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayTransition {
    /// No state change (already playing, finished, or nothing loaded).
    None,
    /// Armed the clock.
    Started,
    /// Zero-duration timeline: finished immediately.
    Finished,
}

/// Outcome of one cooperative tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Clock not advancing (not playing, no timeline, or rejected dt).
    Idle,
    /// Clock advanced; `finished` is set when it reached the end.
    Advanced { finished: bool },
}

/// Low-level playback primitives over an owned [`Timeline`].
#[derive(Debug)]
pub struct Scheduler {
    timeline: Option<Timeline>,
    speed: f32,
    state: PlayState,
    /// Last reported active step, for boundary-crossing detection.
    last_active: Option<usize>,
}

impl Scheduler {
    /// Create a scheduler with no timeline loaded.
    pub fn new(default_speed: f32) -> Self {
        let speed = if default_speed.is_finite() && default_speed > 0.0 {
            default_speed
        } else {
            warn!(
                "default speed {} is not positive and finite, falling back to 1.0",
                default_speed
            );
            1.0
        };
        Self {
            timeline: None,
            speed,
            state: PlayState::Idle,
            last_active: None,
        }
    }

    /// Convert `sequence` into the active timeline.
    ///
    /// Validates first, swaps second: on error the prior timeline and the
    /// play state are left untouched. On success the previous timeline is
    /// discarded in its entirety and the clock resets to zero.
    pub fn build(&mut self, sequence: &Sequence) -> Result<()> {
        let timeline = Timeline::build(sequence)?;
        self.timeline = Some(timeline);
        self.state = PlayState::Idle;
        self.last_active = None;
        Ok(())
    }

    #[inline]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Total duration of the active timeline; zero when none is loaded.
    #[inline]
    pub fn total_duration(&self) -> AnimTime {
        self.timeline
            .as_ref()
            .map(Timeline::total_duration)
            .unwrap_or(AnimTime::ZERO)
    }

    /// Clock position on the active timeline; zero when none is loaded.
    #[inline]
    pub fn current_time(&self) -> AnimTime {
        self.timeline
            .as_ref()
            .map(Timeline::current_time)
            .unwrap_or(AnimTime::ZERO)
    }

    /// Arm the clock. Idempotent while playing. A zero-duration timeline
    /// finishes immediately. Returns the transition that occurred.
    pub fn play(&mut self) -> PlayTransition {
        let Some(timeline) = self.timeline.as_ref() else {
            warn!("play() ignored: no timeline loaded");
            return PlayTransition::None;
        };
        match self.state {
            PlayState::Playing | PlayState::Finished => PlayTransition::None,
            PlayState::Idle | PlayState::Paused => {
                if timeline.total_duration().is_zero() {
                    self.state = PlayState::Finished;
                    PlayTransition::Finished
                } else {
                    self.state = PlayState::Playing;
                    PlayTransition::Started
                }
            }
        }
    }

    /// Freeze the clock. Only meaningful while playing; idempotent.
    /// Returns true when a transition occurred.
    pub fn pause(&mut self) -> bool {
        if self.state.can_pause() {
            self.state = PlayState::Paused;
            true
        } else {
            false
        }
    }

    /// Reposition the clock to absolute time `time`, clamped into range.
    ///
    /// A request strictly past the end clamps and is treated as `finish()`;
    /// any in-range or exact-end request leaves the play state unchanged.
    pub fn jump_to_time(&mut self, time: AnimTime) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        let past_end = time > timeline.total_duration();
        timeline.set_time(time);
        if past_end {
            self.state = PlayState::Finished;
        }
    }

    /// Update the rate multiplier applied to subsequent clock advancement.
    /// Rejects non-positive and non-finite multipliers without mutating.
    pub fn set_speed(&mut self, multiplier: f32) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            warn!("set_speed({multiplier}) rejected");
            return Err(ChoreoError::InvalidSpeed { speed: multiplier });
        }
        self.speed = multiplier;
        Ok(())
    }

    /// Fast-forward the clock to the end and stop. Idempotent; returns true
    /// on the transition into `Finished`.
    pub fn finish(&mut self) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            warn!("finish() ignored: no timeline loaded");
            return false;
        };
        let total = timeline.total_duration();
        timeline.set_time(total);
        if self.state != PlayState::Finished {
            self.state = PlayState::Finished;
            true
        } else {
            false
        }
    }

    /// Rewind to zero and return to `Idle` (restart-policy support).
    pub fn rewind(&mut self) {
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.set_time(AnimTime::ZERO);
        }
        self.state = PlayState::Idle;
        self.last_active = None;
    }

    /// Advance the clock by `dt * speed` seconds of animation time.
    pub fn tick(&mut self, dt: f32) -> TickResult {
        if !self.state.is_playing() {
            return TickResult::Idle;
        }
        let Some(timeline) = self.timeline.as_mut() else {
            return TickResult::Idle;
        };
        if !dt.is_finite() || dt < 0.0 {
            warn!("tick({dt}) ignored: dt must be non-negative and finite");
            return TickResult::Idle;
        }
        let advance = match AnimTime::from_seconds(f64::from(dt) * f64::from(self.speed)) {
            Ok(advance) => advance,
            Err(_) => return TickResult::Idle,
        };
        let total = timeline.total_duration();
        let target = timeline.current_time() + advance;
        if target >= total {
            timeline.set_time(total);
            self.state = PlayState::Finished;
            TickResult::Advanced { finished: true }
        } else {
            timeline.set_time(target);
            TickResult::Advanced { finished: false }
        }
    }

    /// Report the active step index if it changed since the last call.
    pub fn take_step_change(&mut self) -> Option<usize> {
        let now = self.timeline.as_ref().and_then(Timeline::active_index);
        if now != self.last_active {
            self.last_active = now;
            now
        } else {
            None
        }
    }
}
