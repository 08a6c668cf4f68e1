//! Playback controller: the public control surface over a timeline.
//!
//! The controller is the only component exposed to the UI. Positions cross
//! this boundary normalized to a 0-100 scale; everything below it works in
//! absolute [`AnimTime`]. Invalid input is rejected here, before any state
//! mutates. Progress flows outward through the [`Outputs`] buffer returned
//! by `tick()` and through the observer injected at construction.

use log::warn;

use crate::config::{Config, RestartPolicy};
use crate::data::Sequence;
use crate::error::{ChoreoError, Result};
use crate::outputs::{ChoreoEvent, Outputs, ProgressObserver, ProgressUpdate};
use crate::scheduler::{PlayState, PlayTransition, Scheduler, TickResult};
use crate::time::AnimTime;

/// Public control surface used by the UI: normalized positions in, progress
/// notifications out.
pub struct Controller {
    scheduler: Scheduler,
    observer: Box<dyn ProgressObserver>,
    outputs: Outputs,
    max_events_per_tick: usize,
    restart: RestartPolicy,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("scheduler", &self.scheduler)
            .field("outputs", &self.outputs)
            .field("restart", &self.restart)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Create a controller with an explicit progress observer.
    pub fn new(cfg: Config, observer: Box<dyn ProgressObserver>) -> Self {
        Self {
            scheduler: Scheduler::new(cfg.default_speed),
            observer,
            outputs: Outputs::default(),
            max_events_per_tick: cfg.max_events_per_tick,
            restart: cfg.restart,
        }
    }

    /// Replace the active timeline with one built from `sequence`.
    ///
    /// On success the prior timeline is discarded in its entirety, the clock
    /// resets to zero and the play state to `Idle`. On error the engine is
    /// left exactly as it was.
    pub fn load(&mut self, sequence: &Sequence) -> Result<()> {
        self.scheduler.build(sequence)?;
        self.emit(ChoreoEvent::TimelineLoaded {
            total_duration: self.scheduler.total_duration(),
        });
        Ok(())
    }

    /// Start or resume playback. Idempotent while playing. From `Finished`
    /// the configured [`RestartPolicy`] applies. An empty timeline finishes
    /// immediately.
    pub fn play(&mut self) {
        if self.scheduler.state() == PlayState::Finished {
            match self.restart {
                RestartPolicy::FromStart => self.scheduler.rewind(),
                RestartPolicy::Ignore => return,
            }
        }
        match self.scheduler.play() {
            PlayTransition::Started => self.emit(ChoreoEvent::PlaybackStarted),
            PlayTransition::Finished => self.emit(ChoreoEvent::PlaybackFinished {
                at: self.scheduler.current_time(),
            }),
            PlayTransition::None => {}
        }
    }

    /// Freeze the clock at the current position. Only meaningful from
    /// `Playing`; a no-op otherwise. Idempotent.
    pub fn pause(&mut self) {
        if self.scheduler.pause() {
            self.emit(ChoreoEvent::PlaybackPaused);
        }
    }

    /// Fast-forward to the end of the timeline. Idempotent.
    pub fn finish(&mut self) {
        if self.scheduler.finish() {
            self.emit_position();
            self.emit(ChoreoEvent::PlaybackFinished {
                at: self.scheduler.current_time(),
            });
        }
    }

    /// Reposition playback to `percent` of the total duration.
    ///
    /// The input is clamped into `[0, 100]`; non-finite input is rejected
    /// without mutation. Never changes the play state.
    pub fn seek(&mut self, percent: f32) -> Result<()> {
        if !percent.is_finite() {
            warn!("seek({percent}) rejected");
            return Err(ChoreoError::InvalidPosition { position: percent });
        }
        if self.scheduler.timeline().is_none() {
            return Ok(());
        }
        let percent = percent.clamp(0.0, 100.0);
        let total = self.scheduler.total_duration();
        let nanos = (total.as_nanos() as f64 * f64::from(percent) / 100.0).round() as u64;
        self.scheduler.jump_to_time(AnimTime::from_nanos(nanos));
        self.emit(ChoreoEvent::Seeked {
            normalized_position: self.normalized_position(),
        });
        self.emit_position();
        Ok(())
    }

    /// Update the playback-rate multiplier. Rejects non-positive or
    /// non-finite multipliers. Does not move the clock.
    pub fn set_speed(&mut self, multiplier: f32) -> Result<()> {
        self.scheduler.set_speed(multiplier)?;
        self.emit(ChoreoEvent::SpeedChanged { speed: multiplier });
        Ok(())
    }

    /// Current position on the timeline in `[0, 100]`; 0 when the total
    /// duration is zero.
    #[inline]
    pub fn normalized_position(&self) -> f32 {
        self.scheduler
            .current_time()
            .fraction_of(self.scheduler.total_duration())
            * 100.0
    }

    #[inline]
    pub fn play_state(&self) -> PlayState {
        self.scheduler.state()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.scheduler.speed()
    }

    #[inline]
    pub fn total_duration(&self) -> AnimTime {
        self.scheduler.total_duration()
    }

    #[inline]
    pub fn current_time(&self) -> AnimTime {
        self.scheduler.current_time()
    }

    /// Drive the clock by one cooperative tick of `dt` wall-clock seconds.
    ///
    /// Clears the event buffer, advances `dt * speed` of animation time
    /// while playing, and emits the per-tick progress report (plus
    /// `StepEntered` on boundary crossings and `PlaybackFinished` when the
    /// clock reaches the end). Returns the buffer of everything emitted.
    pub fn tick(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        match self.scheduler.tick(dt) {
            TickResult::Idle => {}
            TickResult::Advanced { finished } => {
                self.emit_position();
                if finished {
                    self.emit(ChoreoEvent::PlaybackFinished {
                        at: self.scheduler.current_time(),
                    });
                }
            }
        }
        &self.outputs
    }

    /// Emit `StepEntered` when the active step changed, then the progress
    /// report for the position indicator.
    fn emit_position(&mut self) {
        if let Some(step_index) = self.scheduler.take_step_change() {
            let highlight = self
                .scheduler
                .timeline()
                .and_then(|t| t.steps().get(step_index))
                .and_then(|s| s.step.highlight.clone());
            self.emit(ChoreoEvent::StepEntered {
                step_index,
                highlight,
            });
        }
        let Some(timeline) = self.scheduler.timeline() else {
            return;
        };
        let Some(step_index) = timeline.active_index() else {
            return;
        };
        let update = ProgressUpdate {
            step_index,
            local_progress: timeline.local_progress(step_index),
            normalized_position: timeline.progress_fraction() * 100.0,
        };
        self.emit(ChoreoEvent::Progress(update));
    }

    /// Buffer the event (bounded per tick) and relay it to the observer.
    fn emit(&mut self, event: ChoreoEvent) {
        if self.outputs.events.len() >= self.max_events_per_tick {
            warn!("event buffer full ({} events), dropping", self.outputs.events.len());
            return;
        }
        self.observer.on_event(&event);
        self.outputs.push_event(event);
    }
}
