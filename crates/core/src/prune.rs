//! Depth-limited view pruning.

use crate::tree::{CommentTree, NodeId};

/// Detach the children of every node at `max_depth` or beyond.
///
/// `0` means unlimited and leaves the tree untouched. Pruning runs after
/// aggregation and aggregates are deliberately not recomputed: a surviving
/// ancestor's `total_likes`/`total_descendants` keep reflecting the full
/// original subtree, so engagement totals stay meaningful when display
/// depth is capped.
///
/// This is a view transform over the `children` arrays only. Detached nodes
/// remain in the arena and registry, so id/user lookups and hot-comment
/// scans still see them. Callers that need both shapes should prune a
/// clone.
pub fn prune_depth(tree: &mut CommentTree, max_depth: u32) {
    if max_depth == 0 {
        return;
    }
    let mut stack: Vec<NodeId> = tree.roots().to_vec();
    while let Some(id) = stack.pop() {
        if tree.node(id).depth >= max_depth {
            tree.node_mut(id).children.clear();
            continue;
        }
        stack.extend_from_slice(&tree.node(id).children);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NormalizedRecord, ParentRef};
    use crate::stats;

    fn rec(id: &str, parent: Option<&str>, likes: u64) -> NormalizedRecord {
        NormalizedRecord {
            id: id.to_string(),
            parent: match parent {
                Some(p) => ParentRef::Id(p.to_string()),
                None => ParentRef::Root,
            },
            content: format!("comment {id}"),
            created_at: None,
            like_count: likes,
            reply_count: 0,
            author_id: String::new(),
            author_name: None,
        }
    }

    fn chain() -> CommentTree {
        let mut tree = CommentTree::assemble(vec![
            rec("a", None, 5),
            rec("b", Some("a"), 10),
            rec("c", Some("b"), 2),
        ]);
        stats::aggregate(&mut tree);
        tree
    }

    fn node<'a>(tree: &'a CommentTree, id: &str) -> &'a crate::tree::CommentNode {
        tree.node(tree.lookup(id).unwrap())
    }

    #[test]
    fn caps_visible_depth() {
        let mut tree = chain();
        prune_depth(&mut tree, 1);

        assert_eq!(node(&tree, "a").children.len(), 1);
        assert!(node(&tree, "b").children.is_empty());
    }

    #[test]
    fn zero_means_unlimited() {
        let mut tree = chain();
        prune_depth(&mut tree, 0);
        assert_eq!(node(&tree, "b").children.len(), 1);
    }

    #[test]
    fn aggregates_survive_pruning_unchanged() {
        let mut tree = chain();
        prune_depth(&mut tree, 1);

        // Totals still reflect all three nodes.
        assert_eq!(node(&tree, "a").total_descendants, 2);
        assert_eq!(node(&tree, "a").total_likes, 17);
    }

    #[test]
    fn pruning_never_shrinks_the_registry() {
        let mut tree = chain();
        let before = tree.len();
        prune_depth(&mut tree, 1);

        assert_eq!(tree.len(), before);
        // The detached node is still findable by id.
        assert!(tree.lookup("c").is_some());
        assert_eq!(node(&tree, "c").depth, 2);
    }

    #[test]
    fn pruned_subtree_leaves_the_visible_walk() {
        let mut tree = chain();
        prune_depth(&mut tree, 1);
        assert_eq!(tree.preorder().len(), 2);
    }

    #[test]
    fn clone_keeps_the_full_shape() {
        let full = chain();
        let mut view = full.clone();
        prune_depth(&mut view, 1);

        assert!(node(&view, "b").children.is_empty());
        assert_eq!(node(&full, "b").children.len(), 1);
    }

    #[test]
    fn empty_tree_is_a_no_op() {
        let mut tree = CommentTree::assemble(Vec::new());
        prune_depth(&mut tree, 3);
        assert!(tree.is_empty());
    }
}
