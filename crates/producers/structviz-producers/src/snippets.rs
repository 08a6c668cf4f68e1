//! Source snippets shown beside the animations.
//!
//! One snippet per operation. Line numbers are 1-based and stable; the
//! producers' highlight targets reference them through the `*_lines`
//! constants, so a step's highlight always names the line that logically
//! executes while it plays.

/// Snippet identifiers, as referenced by `HighlightTarget::snippet`.
pub mod ids {
    pub const BST_INORDER: &str = "bst/traverse/inorder";
    pub const BST_PREORDER: &str = "bst/traverse/preorder";
    pub const BST_POSTORDER: &str = "bst/traverse/postorder";
    pub const BST_SEARCH: &str = "bst/search";
    pub const BST_INSERT: &str = "bst/insert";
    pub const BST_DELETE: &str = "bst/delete";
    pub const LIST_SEARCH: &str = "list/search";
    pub const LIST_INSERT: &str = "list/insert";
    pub const LIST_DELETE: &str = "list/delete";
}

pub const BST_INORDER: &str = "\
fn inorder(node: Option<&Node>) {
    let Some(node) = node else { return };
    inorder(node.left.as_deref());
    visit(node);
    inorder(node.right.as_deref());
}";

pub mod inorder_lines {
    pub const RECURSE_LEFT: u32 = 3;
    pub const VISIT: u32 = 4;
    pub const RECURSE_RIGHT: u32 = 5;
}

pub const BST_PREORDER: &str = "\
fn preorder(node: Option<&Node>) {
    let Some(node) = node else { return };
    visit(node);
    preorder(node.left.as_deref());
    preorder(node.right.as_deref());
}";

pub mod preorder_lines {
    pub const VISIT: u32 = 3;
    pub const RECURSE_LEFT: u32 = 4;
    pub const RECURSE_RIGHT: u32 = 5;
}

pub const BST_POSTORDER: &str = "\
fn postorder(node: Option<&Node>) {
    let Some(node) = node else { return };
    postorder(node.left.as_deref());
    postorder(node.right.as_deref());
    visit(node);
}";

pub mod postorder_lines {
    pub const RECURSE_LEFT: u32 = 3;
    pub const RECURSE_RIGHT: u32 = 4;
    pub const VISIT: u32 = 5;
}

pub const BST_SEARCH: &str = "\
fn search(mut node: Option<&Node>, key: i64) -> bool {
    while let Some(n) = node {
        if key == n.key { return true; }
        node = if key < n.key { n.left.as_deref() } else { n.right.as_deref() };
    }
    false
}";

pub mod search_lines {
    pub const COMPARE: u32 = 3;
    pub const DESCEND: u32 = 4;
    pub const MISS: u32 = 6;
}

pub const BST_INSERT: &str = "\
fn insert(node: &mut Option<Box<Node>>, key: i64) {
    match node {
        None => *node = Some(Box::new(Node::leaf(key))),
        Some(n) if key < n.key => insert(&mut n.left, key),
        Some(n) if key > n.key => insert(&mut n.right, key),
        Some(_) => {}
    }
}";

pub mod insert_lines {
    pub const ATTACH: u32 = 3;
    pub const GO_LEFT: u32 = 4;
    pub const GO_RIGHT: u32 = 5;
    pub const EXISTS: u32 = 6;
}

pub const BST_DELETE: &str = "\
fn delete(node: &mut Option<Box<Node>>, key: i64) {
    let Some(n) = node else { return };
    if key < n.key { delete(&mut n.left, key); }
    else if key > n.key { delete(&mut n.right, key); }
    else if n.left.is_none() { *node = n.right.take(); }
    else if n.right.is_none() { *node = n.left.take(); }
    else { n.key = take_min(&mut n.right); }
}";

pub mod delete_lines {
    pub const MISS: u32 = 2;
    pub const GO_LEFT: u32 = 3;
    pub const GO_RIGHT: u32 = 4;
    pub const PROMOTE_RIGHT: u32 = 5;
    pub const PROMOTE_LEFT: u32 = 6;
    pub const TWO_CHILDREN: u32 = 7;
}

pub const LIST_SEARCH: &str = "\
fn search(list: &List, value: i64) -> bool {
    let mut cur = list.head.as_deref();
    while let Some(node) = cur {
        if node.value == value { return true; }
        cur = node.next.as_deref();
    }
    false
}";

pub mod list_search_lines {
    pub const COMPARE: u32 = 4;
    pub const ADVANCE: u32 = 5;
    pub const MISS: u32 = 7;
}

pub const LIST_INSERT: &str = "\
fn insert_at(list: &mut List, index: usize, value: i64) {
    let mut cur = &mut list.head;
    for _ in 0..index {
        cur = &mut cur.as_mut().expect(\"index in bounds\").next;
    }
    let node = Box::new(Node { value, next: cur.take() });
    *cur = Some(node);
}";

pub mod list_insert_lines {
    pub const ADVANCE: u32 = 4;
    pub const CREATE: u32 = 6;
    pub const SPLICE: u32 = 7;
}

pub const LIST_DELETE: &str = "\
fn delete_at(list: &mut List, index: usize) {
    let mut cur = &mut list.head;
    for _ in 0..index {
        cur = &mut cur.as_mut().expect(\"index in bounds\").next;
    }
    let removed = cur.take();
    *cur = removed.and_then(|node| node.next);
}";

pub mod list_delete_lines {
    pub const ADVANCE: u32 = 4;
    pub const UNLINK: u32 = 6;
    pub const BYPASS: u32 = 7;
}

/// Look up a snippet's source text by id.
pub fn snippet_source(id: &str) -> Option<&'static str> {
    match id {
        ids::BST_INORDER => Some(BST_INORDER),
        ids::BST_PREORDER => Some(BST_PREORDER),
        ids::BST_POSTORDER => Some(BST_POSTORDER),
        ids::BST_SEARCH => Some(BST_SEARCH),
        ids::BST_INSERT => Some(BST_INSERT),
        ids::BST_DELETE => Some(BST_DELETE),
        ids::LIST_SEARCH => Some(LIST_SEARCH),
        ids::LIST_INSERT => Some(LIST_INSERT),
        ids::LIST_DELETE => Some(LIST_DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_IDS: &[&str] = &[
        ids::BST_INORDER,
        ids::BST_PREORDER,
        ids::BST_POSTORDER,
        ids::BST_SEARCH,
        ids::BST_INSERT,
        ids::BST_DELETE,
        ids::LIST_SEARCH,
        ids::LIST_INSERT,
        ids::LIST_DELETE,
    ];

    #[test]
    fn every_id_resolves_to_source() {
        for &id in ALL_IDS {
            assert!(snippet_source(id).is_some(), "missing source for {id}");
        }
        assert!(snippet_source("bst/unknown").is_none());
    }

    #[test]
    fn referenced_lines_exist() {
        assert!(BST_INORDER.lines().count() >= inorder_lines::RECURSE_RIGHT as usize);
        assert!(BST_PREORDER.lines().count() >= preorder_lines::RECURSE_RIGHT as usize);
        assert!(BST_POSTORDER.lines().count() >= postorder_lines::VISIT as usize);
        assert!(BST_SEARCH.lines().count() >= search_lines::MISS as usize);
        assert!(BST_INSERT.lines().count() >= insert_lines::EXISTS as usize);
        assert!(BST_DELETE.lines().count() >= delete_lines::TWO_CHILDREN as usize);
        assert!(LIST_SEARCH.lines().count() >= list_search_lines::MISS as usize);
        assert!(LIST_INSERT.lines().count() >= list_insert_lines::SPLICE as usize);
        assert!(LIST_DELETE.lines().count() >= list_delete_lines::BYPASS as usize);
    }
}
