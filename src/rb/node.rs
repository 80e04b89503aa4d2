use std::{
    fmt::Debug,
    ptr::NonNull
};

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeColor {
    Red = 0,
    Black
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeDirection {
    Left = 0,
    Right
}

impl NodeDirection {
    pub fn opposite(self) -> Self {
        match self {
            NodeDirection::Left => NodeDirection::Right,
            NodeDirection::Right => NodeDirection::Left
        }
    }
}

/// A tree vertex. Children are owned by their parent; `parent` is a plain
/// back-reference used for rotations and fix-up, never for releasing memory.
/// Nodes are only reachable through a shared borrow of their tree.
pub struct Node<T> {
    pub(crate) left: Link<T>,
    pub(crate) parent: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) color: NodeColor,
    pub(crate) data: T
}

impl<T> Node<T> {
    // new nodes always start red, insert fix-up recolors them
    pub(crate) fn new(data: T, parent: Link<T>) -> Self {
        Self { left: None, parent, right: None, color: NodeColor::Red, data }
    }

    pub fn data(&self) -> &T { &self.data }
    pub fn color(&self) -> NodeColor { self.color }
    pub fn is_red(&self) -> bool { self.color == NodeColor::Red }
    pub fn is_root(&self) -> bool { self.parent.is_none() }

    // SAFETY (all link accessors): links only ever point at live nodes owned by
    // the same tree, and the returned borrow is tied to the borrow of `self`,
    // which in turn is tied to a shared borrow of the tree.
    pub fn left(&self) -> Option<&Self> { self.left.map(|n| unsafe { &*n.as_ptr() }) }
    pub fn right(&self) -> Option<&Self> { self.right.map(|n| unsafe { &*n.as_ptr() }) }
    pub fn parent(&self) -> Option<&Self> { self.parent.map(|n| unsafe { &*n.as_ptr() }) }

    pub fn child(&self, dir: NodeDirection) -> Option<&Self> {
        match dir {
            NodeDirection::Left => self.left(),
            NodeDirection::Right => self.right()
        }
    }

    /// Address of this node, stable for as long as the record stays in the tree.
    pub fn addr(&self) -> *const () { self as *const Self as *const () }

    pub(crate) fn child_link(&self, dir: NodeDirection) -> Link<T> {
        match dir {
            NodeDirection::Left => self.left,
            NodeDirection::Right => self.right
        }
    }

    pub(crate) fn child_link_mut(&mut self, dir: NodeDirection) -> &mut Link<T> {
        match dir {
            NodeDirection::Left => &mut self.left,
            NodeDirection::Right => &mut self.right
        }
    }

    // absent children are the conceptual black nil leaves
    pub(crate) fn color_of(link: Link<T>) -> NodeColor {
        match link {
            Some(n) => unsafe { (*n.as_ptr()).color },
            None => NodeColor::Black
        }
    }
}

impl<T> Debug for Node<T>
where T: Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("color", &self.color)
            .field("left", &self.left().map(|n| &n.data))
            .field("right", &self.right().map(|n| &n.data))
            .field("parent", &self.parent().map(|n| &n.data))
            .finish()
    }
}
