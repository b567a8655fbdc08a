//! Subtree aggregate computation.

use crate::tree::CommentTree;

/// Compute `total_descendants` and `total_likes` for every node.
///
/// Children are folded before their parents by walking a preorder work list
/// in reverse, so arbitrarily deep reply chains cannot overflow the call
/// stack. Idempotent: re-running on an unchanged tree yields identical
/// results.
pub fn aggregate(tree: &mut CommentTree) {
    let order = tree.preorder();
    let mut descendants = vec![0u64; tree.len()];
    let mut likes = vec![0u64; tree.len()];

    for &id in order.iter().rev() {
        let node = tree.node(id);
        let mut subtree_descendants = node.children.len() as u64;
        let mut subtree_likes = node.record.like_count;
        for &child in &node.children {
            subtree_descendants += descendants[child.index()];
            subtree_likes += likes[child.index()];
        }
        descendants[id.index()] = subtree_descendants;
        likes[id.index()] = subtree_likes;
    }

    for &id in &order {
        let node = tree.node_mut(id);
        node.total_descendants = descendants[id.index()];
        node.total_likes = likes[id.index()];
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
