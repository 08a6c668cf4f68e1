//! The shared producer capability.

use crate::data::Sequence;
use crate::error::Result;

/// Derives an ordered [`Sequence`] from an algorithm operation against a
/// logical structure state.
///
/// Contracts:
/// - Pure with respect to scheduling: producing has no effect on any
///   timeline or controller; only the structure state is read.
/// - Deterministic: identical operation and state always yield the
///   identical sequence (steps, durations, highlight targets).
/// - Never returns a malformed sequence; an operation that has nothing to
///   animate yields an empty sequence or a marker step, and a semantically
///   impossible request is an error.
pub trait SequenceProducer {
    /// Tagged enumeration of the operation kinds this family supports.
    type Operation;
    /// Logical structure state the operations run against.
    type State;

    fn produce(&self, operation: &Self::Operation, state: &Self::State) -> Result<Sequence>;
}
