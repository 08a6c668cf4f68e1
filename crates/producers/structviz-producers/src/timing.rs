//! Step timing shared by the producer families.
//!
//! Hosts that need to pre-compute layout against the choreography (e.g. a
//! lesson progress bar) can rely on these being the only durations the
//! producers emit.

use structviz_choreo_core::AnimTime;

const fn millis(ms: u64) -> AnimTime {
    AnimTime::from_nanos(ms * 1_000_000)
}

/// Cursor moving along an edge or to the next cell.
pub const TRAVERSE: AnimTime = millis(350);
/// A key/value comparison at the current node.
pub const COMPARE: AnimTime = millis(300);
/// Visiting (emitting) a node during a traversal, or a found flash.
pub const VISIT: AnimTime = millis(450);
/// A structural mutation: attach, unlink, promote, splice.
pub const LINK: AnimTime = millis(600);
/// Instantaneous marker (search/delete miss).
pub const MARKER: AnimTime = AnimTime::ZERO;
