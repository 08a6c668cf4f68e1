//! Binary-search-tree snapshots and their producer.
//!
//! A [`BstSnapshot`] is the immutable logical state the producer walks:
//! nodes live in an arena in insertion order, linked by index. The producer
//! emits effect handles as canonical string paths ("bst/node:5/visit") that
//! the rendering collaborator resolves; the engine never interprets them.

use serde::{Deserialize, Serialize};

use structviz_choreo_core::{
    ChoreoError, HighlightTarget, Result, Sequence, SequenceProducer, Step,
};

use crate::snippets::{
    delete_lines, ids, inorder_lines, insert_lines, postorder_lines, preorder_lines, search_lines,
};
use crate::timing;

/// A node in the snapshot arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BstNode {
    pub key: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Immutable logical state of a binary search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BstSnapshot {
    nodes: Vec<BstNode>,
    root: Option<usize>,
}

impl BstSnapshot {
    /// The empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot by inserting `keys` in order. Duplicates are
    /// ignored, so the shape is fully determined by the key order.
    pub fn from_keys(keys: &[i64]) -> Self {
        let mut snapshot = Self::default();
        for &key in keys {
            snapshot.insert_key(key);
        }
        snapshot
    }

    fn insert_key(&mut self, key: i64) {
        let Some(mut id) = self.root else {
            self.root = Some(self.push(key));
            return;
        };
        loop {
            let node = self.nodes[id];
            if key == node.key {
                return;
            }
            let next = if key < node.key { node.left } else { node.right };
            match next {
                Some(child) => id = child,
                None => {
                    let new = self.push(key);
                    let node = &mut self.nodes[id];
                    if key < node.key {
                        node.left = Some(new);
                    } else {
                        node.right = Some(new);
                    }
                    return;
                }
            }
        }
    }

    fn push(&mut self, key: i64) -> usize {
        self.nodes.push(BstNode {
            key,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    #[inline]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    #[inline]
    pub fn node(&self, id: usize) -> Option<&BstNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: i64) -> bool {
        let mut cur = self.root;
        while let Some(node) = cur.and_then(|id| self.node(id)) {
            if key == node.key {
                return true;
            }
            cur = if key < node.key { node.left } else { node.right };
        }
        false
    }

    /// Validate arena invariants: child indices in range, no node with two
    /// parents, the root is nobody's child. Guarantees that walks from the
    /// root terminate, so a deserialized snapshot cannot hang a producer.
    pub fn validate(&self) -> Result<()> {
        let mut is_child = vec![false; self.nodes.len()];
        for node in &self.nodes {
            for child in [node.left, node.right].into_iter().flatten() {
                if child >= self.nodes.len() {
                    return Err(ChoreoError::UnsupportedOperation {
                        reason: format!("snapshot references node {child} out of range"),
                    });
                }
                if is_child[child] {
                    return Err(ChoreoError::UnsupportedOperation {
                        reason: format!("snapshot node {child} has more than one parent"),
                    });
                }
                is_child[child] = true;
            }
        }
        match self.root {
            Some(root) if root >= self.nodes.len() => Err(ChoreoError::UnsupportedOperation {
                reason: format!("snapshot root {root} out of range"),
            }),
            Some(root) if is_child[root] => Err(ChoreoError::UnsupportedOperation {
                reason: "snapshot root is the child of another node".to_string(),
            }),
            None if !self.nodes.is_empty() => Err(ChoreoError::UnsupportedOperation {
                reason: "snapshot has nodes but no root".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Traversal orders supported by [`BstOperation::Traverse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
}

/// Operations the BST producer can choreograph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BstOperation {
    Traverse(TraversalOrder),
    Search { key: i64 },
    Insert { key: i64 },
    Delete { key: i64 },
}

/// Produces choreography for binary-search-tree operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct BstProducer;

impl SequenceProducer for BstProducer {
    type Operation = BstOperation;
    type State = BstSnapshot;

    fn produce(&self, operation: &BstOperation, state: &BstSnapshot) -> Result<Sequence> {
        state.validate()?;
        match *operation {
            BstOperation::Traverse(order) => traversal(state, order),
            BstOperation::Search { key } => search(state, key),
            BstOperation::Insert { key } => insert(state, key),
            BstOperation::Delete { key } => delete(state, key),
        }
    }
}

fn hl(snippet: &str, line: u32) -> HighlightTarget {
    HighlightTarget::new(snippet, line)
}

fn visit_effect(key: i64) -> String {
    format!("bst/node:{key}/visit")
}

fn compare_effect(key: i64) -> String {
    format!("bst/node:{key}/compare")
}

fn found_effect(key: i64) -> String {
    format!("bst/node:{key}/found")
}

fn exists_effect(key: i64) -> String {
    format!("bst/node:{key}/exists")
}

fn unlink_effect(key: i64) -> String {
    format!("bst/node:{key}/unlink")
}

fn promote_effect(successor: i64, removed: i64) -> String {
    format!("bst/node:{successor}/promote:{removed}")
}

fn edge_effect(parent: i64, child: i64) -> String {
    format!("bst/edge:{parent}-{child}/traverse")
}

fn attach_effect(parent: Option<i64>, key: i64) -> String {
    match parent {
        Some(parent) => format!("bst/edge:{parent}-{key}/attach"),
        None => format!("bst/node:{key}/attach"),
    }
}

const MISS_EFFECT: &str = "bst/cursor/miss";

fn traversal(state: &BstSnapshot, order: TraversalOrder) -> Result<Sequence> {
    let mut steps = Vec::new();
    if let Some(root) = state.root() {
        walk(state, root, order, &mut steps);
    }
    Sequence::from_steps(steps)
}

fn walk(state: &BstSnapshot, id: usize, order: TraversalOrder, steps: &mut Vec<Step>) {
    let Some(node) = state.node(id).copied() else {
        return;
    };
    let (snippet, left_line, right_line, visit_line) = match order {
        TraversalOrder::Inorder => (
            ids::BST_INORDER,
            inorder_lines::RECURSE_LEFT,
            inorder_lines::RECURSE_RIGHT,
            inorder_lines::VISIT,
        ),
        TraversalOrder::Preorder => (
            ids::BST_PREORDER,
            preorder_lines::RECURSE_LEFT,
            preorder_lines::RECURSE_RIGHT,
            preorder_lines::VISIT,
        ),
        TraversalOrder::Postorder => (
            ids::BST_POSTORDER,
            postorder_lines::RECURSE_LEFT,
            postorder_lines::RECURSE_RIGHT,
            postorder_lines::VISIT,
        ),
    };

    let descend_left = |steps: &mut Vec<Step>| {
        if let Some(child) = node.left.and_then(|c| state.node(c)) {
            steps.push(
                Step::new(timing::TRAVERSE, edge_effect(node.key, child.key))
                    .with_highlight(hl(snippet, left_line)),
            );
        }
    };
    let descend_right = |steps: &mut Vec<Step>| {
        if let Some(child) = node.right.and_then(|c| state.node(c)) {
            steps.push(
                Step::new(timing::TRAVERSE, edge_effect(node.key, child.key))
                    .with_highlight(hl(snippet, right_line)),
            );
        }
    };
    let visit = |steps: &mut Vec<Step>| {
        steps.push(
            Step::new(timing::VISIT, visit_effect(node.key)).with_highlight(hl(snippet, visit_line)),
        );
    };

    match order {
        TraversalOrder::Inorder => {
            if let Some(left) = node.left {
                descend_left(steps);
                walk(state, left, order, steps);
            }
            visit(steps);
            if let Some(right) = node.right {
                descend_right(steps);
                walk(state, right, order, steps);
            }
        }
        TraversalOrder::Preorder => {
            visit(steps);
            if let Some(left) = node.left {
                descend_left(steps);
                walk(state, left, order, steps);
            }
            if let Some(right) = node.right {
                descend_right(steps);
                walk(state, right, order, steps);
            }
        }
        TraversalOrder::Postorder => {
            if let Some(left) = node.left {
                descend_left(steps);
                walk(state, left, order, steps);
            }
            if let Some(right) = node.right {
                descend_right(steps);
                walk(state, right, order, steps);
            }
            visit(steps);
        }
    }
}

fn search(state: &BstSnapshot, key: i64) -> Result<Sequence> {
    let mut steps = Vec::new();
    let mut cur = state.root();
    while let Some(node) = cur.and_then(|id| state.node(id)) {
        steps.push(
            Step::new(timing::COMPARE, compare_effect(node.key))
                .with_highlight(hl(ids::BST_SEARCH, search_lines::COMPARE)),
        );
        if key == node.key {
            steps.push(
                Step::new(timing::VISIT, found_effect(key))
                    .with_highlight(hl(ids::BST_SEARCH, search_lines::COMPARE)),
            );
            return Sequence::from_steps(steps);
        }
        let next = if key < node.key { node.left } else { node.right };
        if let Some(child) = next.and_then(|c| state.node(c)) {
            steps.push(
                Step::new(timing::TRAVERSE, edge_effect(node.key, child.key))
                    .with_highlight(hl(ids::BST_SEARCH, search_lines::DESCEND)),
            );
        }
        cur = next;
    }
    steps.push(
        Step::new(timing::MARKER, MISS_EFFECT)
            .with_highlight(hl(ids::BST_SEARCH, search_lines::MISS)),
    );
    Sequence::from_steps(steps)
}

fn insert(state: &BstSnapshot, key: i64) -> Result<Sequence> {
    let mut steps = Vec::new();
    let Some(root) = state.root() else {
        steps.push(
            Step::new(timing::LINK, attach_effect(None, key))
                .with_highlight(hl(ids::BST_INSERT, insert_lines::ATTACH)),
        );
        return Sequence::from_steps(steps);
    };

    let mut cur = Some(root);
    while let Some(node) = cur.and_then(|id| state.node(id)) {
        if key == node.key {
            steps.push(
                Step::new(timing::COMPARE, exists_effect(key))
                    .with_highlight(hl(ids::BST_INSERT, insert_lines::EXISTS)),
            );
            break;
        }
        let (line, next) = if key < node.key {
            (insert_lines::GO_LEFT, node.left)
        } else {
            (insert_lines::GO_RIGHT, node.right)
        };
        steps.push(
            Step::new(timing::COMPARE, compare_effect(node.key))
                .with_highlight(hl(ids::BST_INSERT, line)),
        );
        match next.and_then(|c| state.node(c)) {
            Some(child) => {
                steps.push(
                    Step::new(timing::TRAVERSE, edge_effect(node.key, child.key))
                        .with_highlight(hl(ids::BST_INSERT, line)),
                );
            }
            None => {
                steps.push(
                    Step::new(timing::LINK, attach_effect(Some(node.key), key))
                        .with_highlight(hl(ids::BST_INSERT, insert_lines::ATTACH)),
                );
                break;
            }
        }
        cur = next;
    }
    Sequence::from_steps(steps)
}

fn delete(state: &BstSnapshot, key: i64) -> Result<Sequence> {
    let mut steps = Vec::new();
    let mut cur = state.root();
    let mut found: Option<BstNode> = None;
    while let Some(node) = cur.and_then(|id| state.node(id)) {
        if key == node.key {
            found = Some(*node);
            break;
        }
        let (line, next) = if key < node.key {
            (delete_lines::GO_LEFT, node.left)
        } else {
            (delete_lines::GO_RIGHT, node.right)
        };
        steps.push(
            Step::new(timing::COMPARE, compare_effect(node.key))
                .with_highlight(hl(ids::BST_DELETE, line)),
        );
        if let Some(child) = next.and_then(|c| state.node(c)) {
            steps.push(
                Step::new(timing::TRAVERSE, edge_effect(node.key, child.key))
                    .with_highlight(hl(ids::BST_DELETE, line)),
            );
        }
        cur = next;
    }

    let Some(node) = found else {
        steps.push(
            Step::new(timing::MARKER, MISS_EFFECT)
                .with_highlight(hl(ids::BST_DELETE, delete_lines::MISS)),
        );
        return Sequence::from_steps(steps);
    };

    match (node.left, node.right) {
        (None, _) => {
            steps.push(
                Step::new(timing::LINK, unlink_effect(node.key))
                    .with_highlight(hl(ids::BST_DELETE, delete_lines::PROMOTE_RIGHT)),
            );
        }
        (_, None) => {
            steps.push(
                Step::new(timing::LINK, unlink_effect(node.key))
                    .with_highlight(hl(ids::BST_DELETE, delete_lines::PROMOTE_LEFT)),
            );
        }
        (Some(_), Some(right)) => {
            // In-order successor: leftmost node of the right subtree.
            let mut succ = right;
            let mut parent_key = node.key;
            while let Some(succ_node) = state.node(succ) {
                steps.push(
                    Step::new(timing::TRAVERSE, edge_effect(parent_key, succ_node.key))
                        .with_highlight(hl(ids::BST_DELETE, delete_lines::TWO_CHILDREN)),
                );
                match succ_node.left {
                    Some(left) => {
                        parent_key = succ_node.key;
                        succ = left;
                    }
                    None => break,
                }
            }
            if let Some(succ_node) = state.node(succ) {
                steps.push(
                    Step::new(timing::LINK, promote_effect(succ_node.key, node.key))
                        .with_highlight(hl(ids::BST_DELETE, delete_lines::TWO_CHILDREN)),
                );
                steps.push(
                    Step::new(timing::LINK, unlink_effect(succ_node.key))
                        .with_highlight(hl(ids::BST_DELETE, delete_lines::TWO_CHILDREN)),
                );
            }
        }
    }
    Sequence::from_steps(steps)
}
