/// Reasons a record was not adopted by the tree. The record is always handed back.
#[derive(Debug, thiserror::Error)]
pub enum InsertError<T> {
    /// An equal record is already stored; the tree is unchanged.
    #[error("an equal record is already present")]
    Duplicate(T),
    /// The node for the record could not be allocated; the tree is unchanged.
    #[error("failed to allocate a tree node")]
    AllocFailed(T)
}

impl<T> InsertError<T> {
    pub fn into_inner(self) -> T {
        match self {
            InsertError::Duplicate(v) | InsertError::AllocFailed(v) => v
        }
    }
    pub fn is_duplicate(&self) -> bool { matches!(self, InsertError::Duplicate(_)) }
}

/// Red-black or search-tree rule broken somewhere in the structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("root node is red")]
    RedRoot,
    #[error("red node has a red child")]
    ConsecutiveReds,
    #[error("unbalanced blacks, left: {left} right: {right}")]
    UnbalancedBlacks { left: usize, right: usize },
    #[error("records are out of order")]
    OutOfOrder,
    #[error("parent link does not match child link")]
    BrokenParentLink,
    #[error("size is {expected} but {found} nodes are reachable")]
    SizeMismatch { expected: usize, found: usize }
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("cannot snapshot an empty tree")]
    EmptyTree,
    #[error("failed to write dot file")]
    Io(#[from] std::io::Error)
}
