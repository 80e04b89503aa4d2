use allocator_api2::alloc::Allocator;
use std::cmp::Ordering;
use crate::error::InvariantError;
use super::{
    compare::{ TreeCompare, TreeDestroy },
    node::{ Node, NodeDirection },
    tree::Tree
};

/// Shape of a tree that passed [`Tree::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    pub len: usize,
    /// Nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Black nodes on every root-to-leaf path, nil leaves not counted.
    pub black_height: usize
}

impl TreeStats {
    /// Upper bound on the height of any red-black tree holding `len` records.
    pub fn height_bound(len: usize) -> f64 { 2.0 * ((len + 1) as f64).log2() }
}

impl<T, C, D, A> Tree<T, C, D, A>
where C: TreeCompare<T>,
      D: TreeDestroy<T>,
      A: Allocator
{
    /// Validate the whole structure:
    /// * Root is black.
    /// * No red node has a red child.
    /// * Every path from a node down to its nil leaves has the same number of blacks.
    /// * In-order records are strictly ascending under the tree's comparator.
    /// * Each child's parent link points back at the node holding it.
    /// * The number of reachable nodes matches `len()`.
    pub fn validate(&self) -> Result<TreeStats, InvariantError> {
        let mut stats = TreeStats::default();
        if let Some(root) = self.root() {
            if root.is_red() { return Err(InvariantError::RedRoot) }
            if root.parent().is_some() { return Err(InvariantError::BrokenParentLink) }
            let black_height = Self::validate_node(root, 1, &mut stats)?;
            stats.black_height = black_height;
        }
        if stats.len != self.len() {
            return Err(InvariantError::SizeMismatch { expected: self.len(), found: stats.len });
        }
        let mut records = self.iter();
        if let Some(mut prev) = records.next() {
            for v in records {
                if self.comparator().compare(prev, v) != Ordering::Less {
                    return Err(InvariantError::OutOfOrder);
                }
                prev = v;
            }
        }
        Ok(stats)
    }

    fn validate_node(node: &Node<T>, depth: usize, stats: &mut TreeStats) -> Result<usize, InvariantError> {
        stats.len += 1;
        stats.height = stats.height.max(depth);
        let mut blacks = [0; 2];
        for (i, dir) in [NodeDirection::Left, NodeDirection::Right].into_iter().enumerate() {
            if let Some(child) = node.child(dir) {
                if !child.parent().is_some_and(|p| std::ptr::eq(p, node)) {
                    return Err(InvariantError::BrokenParentLink);
                }
                if node.is_red() && child.is_red() {
                    return Err(InvariantError::ConsecutiveReds);
                }
                blacks[i] = Self::validate_node(child, depth + 1, stats)?;
            }
        }
        if blacks[0] != blacks[1] {
            return Err(InvariantError::UnbalancedBlacks { left: blacks[0], right: blacks[1] });
        }
        Ok(blacks[0] + if node.is_red() { 0 } else { 1 })
    }

    /// Nodes on the longest root-to-leaf path, 0 for an empty tree.
    pub fn height(&self) -> usize {
        fn walk<T>(node: Option<&Node<T>>) -> usize {
            match node {
                Some(n) => 1 + walk(n.left()).max(walk(n.right())),
                None => 0
            }
        }
        walk(self.root())
    }
}
