//! Canonical step/sequence data model.
//!
//! A `Step` is the atomic unit of choreography: one timed visual mutation
//! plus an optional code-highlight target. A `Sequence` is the ordered,
//! immutable list of steps produced for a single semantic operation
//! (a traversal, an insertion, ...). Scheduling is layered on top in
//! `timeline.rs`; nothing here knows about clocks.

use serde::{Deserialize, Serialize};

use crate::error::ChoreoError;
use crate::time::AnimTime;

/// Opaque handle naming a visual mutation.
///
/// Owned by the rendering collaborator; the engine never inspects its
/// content, it only schedules when and how far along the mutation should be
/// painted. Handles are canonical string paths ("bst/node:5/visit").
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectHandle(String);

impl EffectHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EffectHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A region of source code to highlight while a step plays.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightTarget {
    /// Identifier of the snippet being displayed ("bst/traverse/inorder").
    pub snippet: String,
    /// 1-based line within the snippet.
    pub line: u32,
}

impl HighlightTarget {
    pub fn new(snippet: impl Into<String>, line: u32) -> Self {
        Self {
            snippet: snippet.into(),
            line,
        }
    }
}

/// The atomic unit of choreography: one timed visual mutation.
///
/// A zero-duration step is a valid instantaneous marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub duration: AnimTime,
    pub effect: EffectHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightTarget>,
}

impl Step {
    pub fn new(duration: AnimTime, effect: impl Into<EffectHandle>) -> Self {
        Self {
            duration,
            effect: effect.into(),
            highlight: None,
        }
    }

    /// Attach a code-highlight target.
    pub fn with_highlight(mut self, highlight: HighlightTarget) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Whether this step is an instantaneous marker.
    #[inline]
    pub fn is_marker(&self) -> bool {
        self.duration.is_zero()
    }
}

/// Ordered, immutable list of steps for one semantic operation.
///
/// Order is fixed at production time. The cached total duration is computed
/// by [`Sequence::from_steps`]; a `Sequence` arriving through serde may
/// carry an inconsistent cache, which the scheduler's `build` re-validates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    steps: Vec<Step>,
    total_duration: AnimTime,
}

impl Sequence {
    /// The empty sequence (zero steps, zero duration).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a sequence, computing the cached total duration.
    ///
    /// Fails with [`ChoreoError::MalformedSequence`] if the summed durations
    /// overflow the time representation.
    pub fn from_steps(steps: Vec<Step>) -> Result<Self, ChoreoError> {
        let mut total = AnimTime::ZERO;
        for step in &steps {
            total = total
                .checked_add(step.duration)
                .ok_or_else(|| ChoreoError::MalformedSequence {
                    reason: "total duration overflows the time representation".to_string(),
                })?;
        }
        Ok(Self {
            steps,
            total_duration: total,
        })
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
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

    /// Cached sum of all step durations.
    #[inline]
    pub fn total_duration(&self) -> AnimTime {
        self.total_duration
    }
}
