use structviz_choreo_core::{parse_stored_sequence_json, ChoreoError, Sequence, SequenceProducer};
use structviz_producers::{
    snippets::{delete_lines, ids, insert_lines},
    timing, BstOperation, BstProducer, BstSnapshot, TraversalOrder,
};

const BALANCED: &[i64] = &[4, 2, 6, 1, 3, 5, 7];

fn produce(op: BstOperation, keys: &[i64]) -> Sequence {
    BstProducer
        .produce(&op, &BstSnapshot::from_keys(keys))
        .expect("operation supported")
}

/// Keys of the visit steps, in emission order.
fn visit_keys(seq: &Sequence) -> Vec<i64> {
    seq.steps()
        .iter()
        .filter_map(|s| {
            s.effect
                .as_str()
                .strip_prefix("bst/node:")?
                .strip_suffix("/visit")?
                .parse()
                .ok()
        })
        .collect()
}

/// it should visit keys in sorted order for an inorder traversal
#[test]
fn inorder_visits_sorted() {
    let seq = produce(BstOperation::Traverse(TraversalOrder::Inorder), BALANCED);
    assert_eq!(visit_keys(&seq), vec![1, 2, 3, 4, 5, 6, 7]);
}

/// it should visit root before subtrees for a preorder traversal
#[test]
fn preorder_visits_root_first() {
    let seq = produce(BstOperation::Traverse(TraversalOrder::Preorder), BALANCED);
    assert_eq!(visit_keys(&seq), vec![4, 2, 1, 3, 6, 5, 7]);
}

/// it should visit root last for a postorder traversal
#[test]
fn postorder_visits_root_last() {
    let seq = produce(BstOperation::Traverse(TraversalOrder::Postorder), BALANCED);
    assert_eq!(visit_keys(&seq), vec![1, 3, 2, 5, 7, 6, 4]);
}

/// it should emit one descend step per edge and one visit per node
#[test]
fn traversal_step_budget() {
    let seq = produce(BstOperation::Traverse(TraversalOrder::Inorder), BALANCED);
    // 6 edges + 7 visits on the balanced seven-node tree.
    assert_eq!(seq.len(), 13);
    let expected = timing::TRAVERSE.as_millis() * 6.0 + timing::VISIT.as_millis() * 7.0;
    assert!((seq.total_duration().as_millis() - expected).abs() < 1e-6);
}

/// it should produce identical sequences for identical inputs
#[test]
fn traversal_is_deterministic() {
    let snapshot = BstSnapshot::from_keys(BALANCED);
    let op = BstOperation::Traverse(TraversalOrder::Postorder);
    let a = BstProducer.produce(&op, &snapshot).unwrap();
    let b = BstProducer.produce(&op, &snapshot).unwrap();
    assert_eq!(a, b);
}

/// it should yield an empty sequence for traversal of an empty tree
#[test]
fn traversal_of_empty_tree_is_empty() {
    let seq = produce(BstOperation::Traverse(TraversalOrder::Inorder), &[]);
    assert!(seq.is_empty());
}

/// it should highlight the traversal snippet lines the walk executes
#[test]
fn traversal_highlights_match_snippet() {
    use structviz_producers::snippets::inorder_lines;

    let seq = produce(BstOperation::Traverse(TraversalOrder::Inorder), &[2, 1, 3]);
    let lines: Vec<u32> = seq
        .steps()
        .iter()
        .map(|s| {
            let h = s.highlight.as_ref().expect("every step highlighted");
            assert_eq!(h.snippet, ids::BST_INORDER);
            h.line
        })
        .collect();
    assert_eq!(
        lines,
        vec![
            inorder_lines::RECURSE_LEFT,
            inorder_lines::VISIT,
            inorder_lines::VISIT,
            inorder_lines::RECURSE_RIGHT,
            inorder_lines::VISIT,
        ]
    );
}

/// it should choreograph the comparison path down to a found key
#[test]
fn search_hit_walks_comparison_path() {
    let seq = produce(BstOperation::Search { key: 5 }, BALANCED);
    let effects: Vec<&str> = seq.steps().iter().map(|s| s.effect.as_str()).collect();
    assert_eq!(
        effects,
        vec![
            "bst/node:4/compare",
            "bst/edge:4-6/traverse",
            "bst/node:6/compare",
            "bst/edge:6-5/traverse",
            "bst/node:5/compare",
            "bst/node:5/found",
        ]
    );
}

/// it should end a failed search with a zero-duration miss marker
#[test]
fn search_miss_ends_with_marker() {
    let seq = produce(BstOperation::Search { key: 8 }, BALANCED);
    let last = seq.steps().last().unwrap();
    assert!(last.is_marker());
    assert_eq!(last.effect.as_str(), "bst/cursor/miss");
    // The comparison path is still animated: 4 -> 6 -> 7.
    assert_eq!(
        seq.steps()
            .iter()
            .filter(|s| s.effect.as_str().ends_with("/compare"))
            .count(),
        3
    );
}

/// it should reduce search of an empty tree to the miss marker
#[test]
fn search_empty_tree_is_just_the_marker() {
    let seq = produce(BstOperation::Search { key: 1 }, &[]);
    assert_eq!(seq.len(), 1);
    assert!(seq.steps()[0].is_marker());
}

/// it should attach directly at the root when inserting into an empty tree
#[test]
fn insert_into_empty_attaches_root() {
    let seq = produce(BstOperation::Insert { key: 9 }, &[]);
    assert_eq!(seq.len(), 1);
    let step = &seq.steps()[0];
    assert_eq!(step.effect.as_str(), "bst/node:9/attach");
    assert_eq!(
        step.highlight.as_ref().unwrap().line,
        insert_lines::ATTACH
    );
}

/// it should walk the comparison path and attach under the final parent
#[test]
fn insert_attaches_under_parent() {
    let seq = produce(BstOperation::Insert { key: 8 }, BALANCED);
    let last = seq.steps().last().unwrap();
    assert_eq!(last.effect.as_str(), "bst/edge:7-8/attach");
    assert_eq!(last.duration, timing::LINK);
}

/// it should flash the existing node when inserting a duplicate key
#[test]
fn insert_duplicate_flashes_existing() {
    let seq = produce(BstOperation::Insert { key: 6 }, BALANCED);
    let last = seq.steps().last().unwrap();
    assert_eq!(last.effect.as_str(), "bst/node:6/exists");
    assert_eq!(
        last.highlight.as_ref().unwrap().line,
        insert_lines::EXISTS
    );
}

/// it should unlink a leaf after the comparison path
#[test]
fn delete_leaf_unlinks() {
    let seq = produce(BstOperation::Delete { key: 1 }, BALANCED);
    let last = seq.steps().last().unwrap();
    assert_eq!(last.effect.as_str(), "bst/node:1/unlink");
    assert_eq!(
        last.highlight.as_ref().unwrap().line,
        delete_lines::PROMOTE_RIGHT
    );
}

/// it should promote the only child when deleting a one-child node
#[test]
fn delete_one_child_promotes() {
    let seq = produce(BstOperation::Delete { key: 2 }, &[4, 2, 1]);
    let last = seq.steps().last().unwrap();
    assert_eq!(last.effect.as_str(), "bst/node:2/unlink");
    assert_eq!(
        last.highlight.as_ref().unwrap().line,
        delete_lines::PROMOTE_LEFT
    );
}

/// it should walk to the inorder successor for a two-child delete
#[test]
fn delete_two_children_promotes_successor() {
    let seq = produce(BstOperation::Delete { key: 4 }, BALANCED);
    let effects: Vec<&str> = seq.steps().iter().map(|s| s.effect.as_str()).collect();
    assert_eq!(
        effects,
        vec![
            "bst/edge:4-6/traverse",
            "bst/edge:6-5/traverse",
            "bst/node:5/promote:4",
            "bst/node:5/unlink",
        ]
    );
}

/// it should reduce deleting a missing key to the comparison path and marker
#[test]
fn delete_missing_key_misses() {
    let seq = produce(BstOperation::Delete { key: 10 }, BALANCED);
    let last = seq.steps().last().unwrap();
    assert!(last.is_marker());
    assert_eq!(last.highlight.as_ref().unwrap().line, delete_lines::MISS);
}

/// it should refuse to walk a corrupt snapshot
#[test]
fn corrupt_snapshot_rejected() {
    let corrupt: BstSnapshot =
        serde_json::from_str(r#"{"nodes":[{"key":1,"left":null,"right":null}],"root":5}"#).unwrap();
    let err = BstProducer
        .produce(&BstOperation::Search { key: 1 }, &corrupt)
        .unwrap_err();
    assert!(matches!(err, ChoreoError::UnsupportedOperation { .. }));

    let headless: BstSnapshot =
        serde_json::from_str(r#"{"nodes":[{"key":1,"left":null,"right":null}],"root":null}"#)
            .unwrap();
    assert!(BstProducer
        .produce(&BstOperation::Search { key: 1 }, &headless)
        .is_err());
}

/// it should build the documented shape from a key list
#[test]
fn from_keys_shape() {
    let snapshot = BstSnapshot::from_keys(BALANCED);
    assert_eq!(snapshot.len(), 7);
    assert!(snapshot.contains(5));
    assert!(!snapshot.contains(8));
    assert!(snapshot.validate().is_ok());

    // Duplicates are ignored.
    let deduped = BstSnapshot::from_keys(&[4, 4, 4]);
    assert_eq!(deduped.len(), 1);
}

/// it should load the balanced fixture as the same snapshot from_keys builds
#[test]
fn balanced_fixture_matches_from_keys() {
    let fixture: BstSnapshot =
        structviz_test_fixtures::snapshots::load("bst-balanced").unwrap();
    assert_eq!(fixture, BstSnapshot::from_keys(BALANCED));
}

/// it should produce exactly the stored inorder-walk fixture
#[test]
fn inorder_walk_matches_stored_fixture() {
    let produced = produce(BstOperation::Traverse(TraversalOrder::Inorder), &[2, 1, 3]);
    let json = structviz_test_fixtures::sequences::json("bst-inorder-walk").unwrap();
    let stored = parse_stored_sequence_json(&json).unwrap();
    assert_eq!(produced, stored.sequence);
}
