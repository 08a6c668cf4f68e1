//! Singly-linked-list snapshots and their producer.
//!
//! The list is the simplest structure the platform animates; its snapshot
//! is just the ordered cell values. Effects address cells by position
//! ("list/cell:2/compare"), which is stable because a snapshot is immutable
//! while its choreography plays.

use serde::{Deserialize, Serialize};

use structviz_choreo_core::{
    ChoreoError, HighlightTarget, Result, Sequence, SequenceProducer, Step,
};

use crate::snippets::{ids, list_delete_lines, list_insert_lines, list_search_lines};
use crate::timing;

/// Immutable logical state of a singly linked list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    values: Vec<i64>,
}

impl ListSnapshot {
    /// The empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }

    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }
}

/// Operations the list producer can choreograph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListOperation {
    Append { value: i64 },
    Prepend { value: i64 },
    InsertAt { index: usize, value: i64 },
    DeleteAt { index: usize },
    Search { value: i64 },
}

/// Produces choreography for singly-linked-list operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListProducer;

impl SequenceProducer for ListProducer {
    type Operation = ListOperation;
    type State = ListSnapshot;

    fn produce(&self, operation: &ListOperation, state: &ListSnapshot) -> Result<Sequence> {
        match *operation {
            ListOperation::Append { value } => insert_at(state, state.len(), value),
            ListOperation::Prepend { value } => insert_at(state, 0, value),
            ListOperation::InsertAt { index, value } => {
                if index > state.len() {
                    return Err(ChoreoError::UnsupportedOperation {
                        reason: format!(
                            "insert index {index} out of bounds for list of length {}",
                            state.len()
                        ),
                    });
                }
                insert_at(state, index, value)
            }
            ListOperation::DeleteAt { index } => {
                if index >= state.len() {
                    return Err(ChoreoError::UnsupportedOperation {
                        reason: format!(
                            "delete index {index} out of bounds for list of length {}",
                            state.len()
                        ),
                    });
                }
                delete_at(state, index)
            }
            ListOperation::Search { value } => search(state, value),
        }
    }
}

fn hl(snippet: &str, line: u32) -> HighlightTarget {
    HighlightTarget::new(snippet, line)
}

const MISS_EFFECT: &str = "list/cursor/miss";

fn insert_at(_state: &ListSnapshot, index: usize, value: i64) -> Result<Sequence> {
    let mut steps = Vec::new();
    for i in 0..index {
        steps.push(
            Step::new(timing::TRAVERSE, format!("list/cell:{i}/cursor"))
                .with_highlight(hl(ids::LIST_INSERT, list_insert_lines::ADVANCE)),
        );
    }
    steps.push(
        Step::new(timing::LINK, format!("list/node:{value}/create"))
            .with_highlight(hl(ids::LIST_INSERT, list_insert_lines::CREATE)),
    );
    steps.push(
        Step::new(timing::LINK, format!("list/cell:{index}/splice"))
            .with_highlight(hl(ids::LIST_INSERT, list_insert_lines::SPLICE)),
    );
    Sequence::from_steps(steps)
}

fn delete_at(_state: &ListSnapshot, index: usize) -> Result<Sequence> {
    let mut steps = Vec::new();
    for i in 0..index {
        steps.push(
            Step::new(timing::TRAVERSE, format!("list/cell:{i}/cursor"))
                .with_highlight(hl(ids::LIST_DELETE, list_delete_lines::ADVANCE)),
        );
    }
    steps.push(
        Step::new(timing::LINK, format!("list/cell:{index}/unlink"))
            .with_highlight(hl(ids::LIST_DELETE, list_delete_lines::UNLINK)),
    );
    steps.push(
        Step::new(timing::LINK, format!("list/cell:{index}/bypass"))
            .with_highlight(hl(ids::LIST_DELETE, list_delete_lines::BYPASS)),
    );
    Sequence::from_steps(steps)
}

fn search(state: &ListSnapshot, value: i64) -> Result<Sequence> {
    let mut steps = Vec::new();
    for (i, &cell) in state.values().iter().enumerate() {
        steps.push(
            Step::new(timing::COMPARE, format!("list/cell:{i}/compare"))
                .with_highlight(hl(ids::LIST_SEARCH, list_search_lines::COMPARE)),
        );
        if cell == value {
            steps.push(
                Step::new(timing::VISIT, format!("list/cell:{i}/found"))
                    .with_highlight(hl(ids::LIST_SEARCH, list_search_lines::COMPARE)),
            );
            return Sequence::from_steps(steps);
        }
        if i + 1 < state.len() {
            steps.push(
                Step::new(timing::TRAVERSE, format!("list/cell:{i}/advance"))
                    .with_highlight(hl(ids::LIST_SEARCH, list_search_lines::ADVANCE)),
            );
        }
    }
    steps.push(
        Step::new(timing::MARKER, MISS_EFFECT)
            .with_highlight(hl(ids::LIST_SEARCH, list_search_lines::MISS)),
    );
    Sequence::from_steps(steps)
}
