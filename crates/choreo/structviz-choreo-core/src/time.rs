//! Time handling for choreography playback.
//!
//! Durations and clock positions share one representation: unsigned
//! nanoseconds. Host-facing constructors take floating-point seconds or
//! milliseconds and validate them, so a negative or non-finite quantity can
//! never enter the engine.

use serde::{Deserialize, Serialize};

use crate::error::ChoreoError;

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// A non-negative quantity of animation time (a duration or a clock
/// position).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct AnimTime(u64);

impl AnimTime {
    /// Zero time.
    pub const ZERO: AnimTime = AnimTime(0);

    /// Create animation time from nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Create animation time from milliseconds.
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Result<Self, ChoreoError> {
        Self::from_seconds(milliseconds / 1000.0)
    }

    /// Create animation time from seconds.
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, ChoreoError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(ChoreoError::InvalidTime { time: seconds });
        }
        Ok(Self((seconds * NANOS_PER_SECOND).round() as u64))
    }

    /// Get time in nanoseconds.
    #[inline]
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Get time in milliseconds.
    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / NANOS_PER_MILLI
    }

    /// Get time in seconds.
    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / NANOS_PER_SECOND
    }

    /// Whether this is the zero quantity.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Overflow-checked addition.
    #[inline]
    pub fn checked_add(self, other: AnimTime) -> Option<AnimTime> {
        self.0.checked_add(other.0).map(AnimTime)
    }

    /// Clamp time to a range.
    #[inline]
    pub fn clamp(&self, min: AnimTime, max: AnimTime) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            max
        } else {
            *self
        }
    }

    /// Fraction of `total` this time represents, in `[0, 1]`.
    ///
    /// Defined as 0.0 when `total` is zero, matching the zero-duration
    /// normalization convention of the playback surface.
    #[inline]
    pub fn fraction_of(&self, total: AnimTime) -> f32 {
        if total.0 == 0 {
            return 0.0;
        }
        ((self.0 as f64 / total.0 as f64).clamp(0.0, 1.0)) as f32
    }
}

impl std::ops::Add for AnimTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::ops::AddAssign for AnimTime {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::Sub for AnimTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::ops::SubAssign for AnimTime {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}
