//! Timeline: a sequence with absolute start offsets and a playback clock.
//!
//! Offsets are cumulative: `start_offset[i]` is the sum of the durations of
//! all preceding steps, so `start_offset[i] + duration[i] ==
//! start_offset[i+1]` and the first offset is zero.
//!
//! Boundary convention: a step's window is the half-open interval
//! `[start_offset, start_offset + duration)` and a shared boundary instant
//! belongs to the *later* step. The single exception is the exact end of the
//! timeline, which reports the final step at local progress 1.0. Zero
//! duration steps always report local progress 1.0.

use serde::{Deserialize, Serialize};

use crate::data::{Sequence, Step};
use crate::error::ChoreoError;
use crate::time::AnimTime;

/// A step placed at an absolute offset on a timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledStep {
    pub step: Step,
    pub start_offset: AnimTime,
}

/// A sequence with absolute start offsets and a mutable clock.
///
/// Created fresh per `build` and replaced wholesale; only `current_time`
/// mutates in place.
#[derive(Clone, Debug)]
pub struct Timeline {
    steps: Vec<ScheduledStep>,
    total_duration: AnimTime,
    current_time: AnimTime,
}

impl Timeline {
    /// Assign cumulative offsets to every step of `sequence`.
    ///
    /// Re-validates the sequence: offsets are overflow-checked and the final
    /// offset must match the sequence's cached total (a deserialized
    /// sequence can disagree). On error nothing is built.
    pub fn build(sequence: &Sequence) -> Result<Timeline, ChoreoError> {
        let mut steps = Vec::with_capacity(sequence.len());
        let mut offset = AnimTime::ZERO;
        for step in sequence.steps() {
            steps.push(ScheduledStep {
                step: step.clone(),
                start_offset: offset,
            });
            offset = offset
                .checked_add(step.duration)
                .ok_or_else(|| ChoreoError::MalformedSequence {
                    reason: "step offsets overflow the time representation".to_string(),
                })?;
        }
        if offset != sequence.total_duration() {
            return Err(ChoreoError::MalformedSequence {
                reason: format!(
                    "cached total duration {}ms does not match summed step durations {}ms",
                    sequence.total_duration().as_millis(),
                    offset.as_millis()
                ),
            });
        }
        Ok(Timeline {
            steps,
            total_duration: offset,
            current_time: AnimTime::ZERO,
        })
    }

    #[inline]
    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn total_duration(&self) -> AnimTime {
        self.total_duration
    }

    #[inline]
    pub fn current_time(&self) -> AnimTime {
        self.current_time
    }

    /// Move the clock, clamping into `[0, total_duration]`.
    #[inline]
    pub fn set_time(&mut self, time: AnimTime) {
        self.current_time = time.clamp(AnimTime::ZERO, self.total_duration);
    }

    /// Index of the step whose window contains the current clock position.
    ///
    /// `None` only for an empty timeline. See the module docs for the
    /// boundary convention.
    pub fn active_index(&self) -> Option<usize> {
        if self.steps.is_empty() {
            return None;
        }
        // Last step whose offset is <= current_time. The first offset is
        // zero, so the partition point is always >= 1.
        let idx = self
            .steps
            .partition_point(|s| s.start_offset <= self.current_time);
        Some(idx - 1)
    }

    /// Local progress fraction of step `index` at the current clock, in
    /// `[0, 1]`; 1.0 for zero-duration markers.
    pub fn local_progress(&self, index: usize) -> f32 {
        let Some(scheduled) = self.steps.get(index) else {
            return 0.0;
        };
        if scheduled.step.duration.is_zero() {
            return 1.0;
        }
        (self.current_time - scheduled.start_offset).fraction_of(scheduled.step.duration)
    }

    /// Position of the clock as a fraction of the total duration.
    #[inline]
    pub fn progress_fraction(&self) -> f32 {
        self.current_time.fraction_of(self.total_duration)
    }
}
