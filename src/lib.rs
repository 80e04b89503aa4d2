pub mod rb {
    pub mod compare;
    pub mod node;
    pub mod tree;
    pub mod validate;
}
pub mod dot;
pub mod error;
pub mod structs;

pub use error::{ InsertError, InvariantError, TraceError };
pub use rb::{
    compare::{ CompareGreater, CompareLess, DropRecord, TreeCompare, TreeDestroy },
    node::{ Node, NodeColor, NodeDirection },
    tree::{ Iter, Tree },
    validate::TreeStats
};
