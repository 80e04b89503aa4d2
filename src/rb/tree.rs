use allocator_api2::alloc::{ Allocator, Global };
use std::{
    alloc::{ handle_alloc_error, Layout },
    cmp::Ordering,
    fmt::Debug,
    iter::FusedIterator,
    marker::PhantomData,
    ptr::NonNull
};
use crate::error::InsertError;
use super::{
    compare::{ CompareLess, DropRecord, TreeCompare, TreeDestroy },
    node::{ Link, Node, NodeColor, NodeDirection }
};

/// Ordered, duplicate-free set of records kept in a red-black tree.
///
/// Ordering comes from `C` and cleanup of stored records from `D`, both supplied
/// at construction. Every record that was successfully inserted is handed to `D`
/// exactly once, when the tree is cleared, destroyed or dropped. Node storage is
/// requested from `A`.
pub struct Tree<T, C = CompareLess, D = DropRecord, A = Global>
where C: TreeCompare<T>,
      D: TreeDestroy<T>,
      A: Allocator
{
    pub(super) root: Link<T>,
    pub(super) size: usize,
    compare: C,
    destroy: D,
    _allocator: A,
    _owns: PhantomData<Box<Node<T>>>
}

enum SearchResult<T> {
    Empty,
    Found(NonNull<Node<T>>),
    // parent of the vacant slot, and which side of it the slot is on
    Vacant(NonNull<Node<T>>, NodeDirection)
}

impl<T> Tree<T, CompareLess, DropRecord, Global>
where T: Ord
{
    pub fn new() -> Self { Self::new_in(CompareLess, DropRecord, Global) }
}

impl<T> Default for Tree<T, CompareLess, DropRecord, Global>
where T: Ord
{
    fn default() -> Self { Self::new() }
}

impl<T, C, D> Tree<T, C, D, Global>
where C: TreeCompare<T>,
      D: TreeDestroy<T>
{
    pub fn with_capabilities(compare: C, destroy: D) -> Self { Self::new_in(compare, destroy, Global) }
}

impl<T, C, D, A> Tree<T, C, D, A>
where C: TreeCompare<T>,
      D: TreeDestroy<T>,
      A: Allocator
{
    pub fn new_in(compare: C, destroy: D, alloc: A) -> Self {
        Self { root: None, size: 0, compare, destroy, _allocator: alloc, _owns: PhantomData }
    }
    pub fn len(&self) -> usize { self.size }
    pub fn is_empty(&self) -> bool { self.size == 0 }

    /// Read-only access to the top of the structure, for diagnostics.
    pub fn root(&self) -> Option<&Node<T>> { self.root.map(|n| unsafe { &*n.as_ptr() }) }
    pub fn comparator(&self) -> &C { &self.compare }

    fn new_node(&self, value: T, parent: Link<T>) -> Result<NonNull<Node<T>>, T> {
        match self._allocator.allocate(Layout::new::<Node<T>>()) {
            Ok(ptr) => {
                let node = ptr.cast::<Node<T>>();
                unsafe { node.as_ptr().write(Node::new(value, parent)) };
                Ok(node)
            },
            Err(_) => Err(value)
        }
    }

    // SAFETY: node must be owned by this tree and already unlinked from it
    unsafe fn free_node(&self, node: NonNull<Node<T>>) -> T {
        let Node { data, .. } = node.as_ptr().read();
        self._allocator.deallocate(node.cast(), Layout::new::<Node<T>>());
        data
    }

    fn search(&self, value: &T) -> SearchResult<T> {
        let mut current = match self.root {
            Some(v) => v,
            None => return SearchResult::Empty
        };
        loop {
            let node = unsafe { &*current.as_ptr() };
            let dir = match self.compare.compare(value, &node.data) {
                Ordering::Less => NodeDirection::Left,
                Ordering::Greater => NodeDirection::Right,
                Ordering::Equal => return SearchResult::Found(current)
            };
            current = match node.child_link(dir) {
                Some(v) => v,
                None => return SearchResult::Vacant(current, dir)
            };
        }
    }

    //
    //      p           p
    //     /           /
    //    n           r
    //   / \    =>   / \
    //  x   r       n   y
    //     / \     / \
    //    o  y    x   o
    //
    // Drawn for `dir == Left`; `Right` is the mirror image. The child on the
    // opposite side of `dir` rises into n's place.
    unsafe fn rotate(&mut self, n: NonNull<Node<T>>, dir: NodeDirection) {
        let node = n.as_ptr();
        let r = match (*node).child_link(dir.opposite()) {
            Some(v) => v,
            None => unreachable!("rotation needs a child on the rising side")
        };
        let o = (*r.as_ptr()).child_link(dir);
        *(*node).child_link_mut(dir.opposite()) = o;
        if let Some(o) = o { (*o.as_ptr()).parent = Some(n) }
        let p = (*node).parent;
        *(*r.as_ptr()).child_link_mut(dir) = Some(n);
        (*node).parent = Some(r);
        (*r.as_ptr()).parent = p;
        match p {
            None => self.root = Some(r),
            Some(p) => match (*p.as_ptr()).left == Some(n) {
                true => (*p.as_ptr()).left = Some(r),
                false => (*p.as_ptr()).right = Some(r)
            }
        }
    }

    // NOTE: Assume that n has a parent
    unsafe fn get_direction(n: NonNull<Node<T>>, parent: NonNull<Node<T>>) -> NodeDirection {
        match (*parent.as_ptr()).left == Some(n) {
            true => NodeDirection::Left,
            false => NodeDirection::Right
        }
    }

    unsafe fn post_insert_maintain_rbt(&mut self, n: NonNull<Node<T>>) {
        let mut node = n;
        loop {
            let parent = match (*node.as_ptr()).parent {
                Some(v) => v,
                None => {
                    (*node.as_ptr()).color = NodeColor::Black;
                    return
                }
            };
            if (*parent.as_ptr()).color == NodeColor::Black { return }
            let grandparent = match (*parent.as_ptr()).parent {
                Some(v) => v,
                // red root, only possible transiently. painting it black is enough
                None => {
                    (*parent.as_ptr()).color = NodeColor::Black;
                    return
                }
            };
            let parent_dir = Self::get_direction(parent, grandparent);
            let uncle = (*grandparent.as_ptr()).child_link(parent_dir.opposite());
            if let (Some(uncle), NodeColor::Red) = (uncle, Node::color_of(uncle)) {
                log::trace!("insert fix-up: red uncle, recolor and continue from grandparent");
                (*parent.as_ptr()).color = NodeColor::Black;
                (*uncle.as_ptr()).color = NodeColor::Black;
                (*grandparent.as_ptr()).color = NodeColor::Red;
                // travel up 2 tree levels
                node = grandparent;
                continue;
            }
            let mut top = parent;
            if Self::get_direction(node, parent) != parent_dir {
                log::trace!("insert fix-up: inner grandchild, rotate {:?} at parent", parent_dir);
                self.rotate(parent, parent_dir);
                top = node;
            }
            log::trace!("insert fix-up: outer grandchild, rotate {:?} at grandparent", parent_dir.opposite());
            (*top.as_ptr()).color = NodeColor::Black;
            (*grandparent.as_ptr()).color = NodeColor::Red;
            self.rotate(grandparent, parent_dir.opposite());
            return;
        }
    }

    /// Adds `value` to the tree. On failure the tree is left untouched and the
    /// record is returned to the caller inside the error.
    pub fn try_insert(&mut self, value: T) -> Result<(), InsertError<T>> {
        let (parent, dir) = match self.search(&value) {
            SearchResult::Found(_) => {
                log::debug!("rejected duplicate record, tree size stays {}", self.size);
                return Err(InsertError::Duplicate(value));
            },
            SearchResult::Empty => (None, NodeDirection::Left),
            SearchResult::Vacant(p, d) => (Some(p), d)
        };
        let node = match self.new_node(value, parent) {
            Ok(v) => v,
            Err(value) => {
                log::warn!("node allocation failed with {} records stored", self.size);
                return Err(InsertError::AllocFailed(value));
            }
        };
        unsafe {
            match parent {
                // We are the only node!
                None => self.root = Some(node),
                Some(p) => *(*p.as_ptr()).child_link_mut(dir) = Some(node)
            }
            self.size += 1;
            self.post_insert_maintain_rbt(node);
        }
        Ok(())
    }

    /// Returns `true` if the record was added and `false` if an equal one was
    /// already stored, in which case `value` is dropped here without reaching
    /// the tree's destructor.
    pub fn insert(&mut self, value: T) -> bool {
        match self.try_insert(value) {
            Ok(()) => true,
            Err(InsertError::Duplicate(_)) => false,
            Err(InsertError::AllocFailed(_)) => handle_alloc_error(Layout::new::<Node<T>>())
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        matches!(self.search(value), SearchResult::Found(_))
    }

    pub fn get(&self, value: &T) -> Option<&T> {
        self.find_node(value).map(Node::data)
    }

    /// The node holding a record equal to `value`, for diagnostics.
    pub fn find_node(&self, value: &T) -> Option<&Node<T>> {
        match self.search(value) {
            SearchResult::Found(n) => Some(unsafe { &*n.as_ptr() }),
            _ => None
        }
    }

    pub fn first(&self) -> Option<&T> { self.edge(NodeDirection::Left) }
    pub fn last(&self) -> Option<&T> { self.edge(NodeDirection::Right) }

    fn edge(&self, dir: NodeDirection) -> Option<&T> {
        let mut current = self.root()?;
        while let Some(next) = current.child(dir) { current = next }
        Some(current.data())
    }

    pub fn iter(&self) -> Iter<'_, T> { self.into_iter() }

    /// Visits every record in ascending order until `f` returns `false`.
    /// Returns `true` only if no visit asked to stop.
    pub fn for_each<'a, F>(&'a self, mut f: F) -> bool
    where F: FnMut(&'a T) -> bool
    {
        for value in self.iter() {
            if !f(value) {
                log::trace!("traversal stopped early");
                return false;
            }
        }
        true
    }

    /// [`Tree::for_each`] with a caller context threaded through every visit.
    /// Visited records outlive the call, so the context may keep references to them.
    pub fn for_each_with<'a, X, F>(&'a self, context: &mut X, mut f: F) -> bool
    where F: FnMut(&'a T, &mut X) -> bool
    {
        self.for_each(|v| f(v, context))
    }

    /// Releases every node, handing each record to the destructor. The tree is
    /// empty and usable afterwards. If the destructor panics, the tree is still
    /// empty and consistent; records not yet released are leaked.
    pub fn clear(&mut self) {
        // Walk down to a leaf, detaching it from its parent on the way, release it
        // and climb back up. Needs no stack, so deep trees are fine.
        let mut current = self.root.take();
        // nothing is reachable from here on
        self.size = 0;
        let mut released = 0;
        while let Some(node) = current {
            unsafe {
                let n = node.as_ptr();
                if let Some(left) = (*n).left.take() {
                    current = Some(left);
                    continue;
                }
                if let Some(right) = (*n).right.take() {
                    current = Some(right);
                    continue;
                }
                current = (*n).parent;
                let data = self.free_node(node);
                self.destroy.destroy(data);
            }
            released += 1;
        }
        if released > 0 {
            log::debug!("released {} records", released);
        }
    }

    /// Tears the tree down. The tree can't be touched afterwards.
    pub fn destroy(self) { drop(self) }
}

impl<T, C, D, A> Drop for Tree<T, C, D, A>
where C: TreeCompare<T>,
      D: TreeDestroy<T>,
      A: Allocator
{
    fn drop(&mut self) { self.clear() }
}

impl<T, C, D, A> Debug for Tree<T, C, D, A>
where T: Debug,
      C: TreeCompare<T>,
      D: TreeDestroy<T>,
      A: Allocator
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C, D, A> IntoIterator for &'a Tree<T, C, D, A>
where C: TreeCompare<T>,
      D: TreeDestroy<T>,
      A: Allocator
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        // inorder traversal, the first call to next walks down to the leftmost node
        Iter { current: self.root(), stack: vec![], remaining: self.size }
    }
}

pub struct Iter<'a, T> {
    current: Option<&'a Node<T>>,
    stack: Vec<&'a Node<T>>,
    remaining: usize
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(n) = self.current {
            self.stack.push(n);
            self.current = n.left();
        }
        let out = self.stack.pop()?;
        self.current = out.right();
        self.remaining -= 1;
        Some(out.data())
    }
    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
pub mod tests {
    use super::{ Node, NodeColor, Tree };
    use crate::{
        error::InsertError,
        rb::compare::{ CompareGreater, CompareLess }
    };
    use allocator_api2::alloc::{ AllocError, Allocator, Global };
    use std::{
        alloc::Layout,
        cell::{ Cell, RefCell },
        error::Error,
        ptr::NonNull,
        rc::Rc
    };

    type TestReturn = Result<(), Box<dyn Error>>;

    fn init_logging() {
        let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
    }

    fn int_tree(values: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        for v in values { assert!(tree.insert(*v), "{} should be new", v) }
        tree
    }

    #[test]
    pub fn create_blank_tree() -> TestReturn {
        let tree: Tree<u32> = Tree::new();
        assert!(tree.len() == 0, "Length for new tree should be zero");
        assert!(tree.is_empty(), "is_empty should be true for new tree");
        assert!(tree.root().is_none(), "New tree should have no root");
        assert!(tree.for_each(|_| false), "Traversal of an empty tree visits everything");
        Ok(())
    }

    #[test]
    pub fn basic_operations() -> TestReturn {
        init_logging();
        let mut tree = int_tree(&[0, 1, 2]);
        assert_eq!(tree.len(), 3);
        assert!(tree.contains(&0) && tree.contains(&1) && tree.contains(&2));
        assert!(!tree.contains(&3), "3 was never inserted");
        assert!(!tree.insert(2), "Duplicate insert should fail");
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        Ok(())
    }

    #[test]
    pub fn duplicate_is_handed_back() -> TestReturn {
        let mut tree = Tree::new();
        tree.try_insert("hey".to_string())?;
        match tree.try_insert("hey".to_string()) {
            Err(e) => {
                assert!(e.is_duplicate());
                assert_eq!(e.into_inner(), "hey");
            },
            Ok(()) => panic!("Duplicate insert should be rejected")
        }
        assert_eq!(tree.len(), 1);
        Ok(())
    }

    #[test]
    pub fn ten_elements_in_order() -> TestReturn {
        init_logging();
        let tree = int_tree(&[-3, 2, -4, 1, 3, -5, -1, 4, 0, -2]);
        assert_eq!(tree.len(), 10);
        let mut count = 0;
        assert!(tree.for_each(|_| { count += 1; true }));
        assert_eq!(count, 10);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), (-5..=4).collect::<Vec<_>>());
        tree.validate()?;
        Ok(())
    }

    #[test]
    pub fn for_each_sum_and_early_stop() -> TestReturn {
        let tree = int_tree(&[3, 1, 0, 2]);
        let mut sum = 0;
        assert!(tree.for_each_with(&mut sum, |v, sum| { *sum += *v; true }));
        assert_eq!(sum, 6);

        let mut visited = vec![];
        assert!(!tree.for_each(|v| { visited.push(*v); false }), "Stopped traversal should report false");
        assert_eq!(visited, vec![0]);
        Ok(())
    }

    #[test]
    pub fn first_last_and_get() -> TestReturn {
        let tree = int_tree(&[5, 9, 1, 7]);
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&9));
        assert_eq!(tree.get(&7), Some(&7));
        assert_eq!(tree.get(&8), None);
        let empty: Tree<i32> = Tree::new();
        assert_eq!(empty.first(), None);
        Ok(())
    }

    #[test]
    pub fn iterator_is_exact() -> TestReturn {
        let tree = int_tree(&[4, 2, 6]);
        let mut it = tree.iter();
        assert_eq!(it.len(), 3);
        it.next();
        assert_eq!(it.len(), 2);
        assert_eq!(it.collect::<Vec<_>>(), vec![&4, &6]);
        Ok(())
    }

    #[test]
    pub fn reverse_comparator() -> TestReturn {
        let mut tree = Tree::with_capabilities(CompareGreater, |_: i32| {});
        for v in [3, 1, 2] { tree.insert(v); }
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        tree.validate()?;
        Ok(())
    }

    #[test]
    pub fn string_tree_destroys_each_record_once() -> TestReturn {
        let freed = Rc::new(RefCell::new(vec![]));
        let sink = freed.clone();
        let mut tree = Tree::with_capabilities(
            |a: &String, b: &String| a.cmp(b),
            move |s: String| sink.borrow_mut().push(s)
        );
        for s in ["test", "hey"] { tree.insert(s.to_string()); }
        assert!(!tree.insert("hey".to_string()));
        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec!["hey", "test"]);
        tree.destroy();
        let mut freed = freed.borrow().clone();
        freed.sort();
        assert_eq!(freed, vec!["hey", "test"], "Each stored record is destroyed exactly once");
        Ok(())
    }

    #[test]
    pub fn clear_then_reuse() -> TestReturn {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut tree = Tree::with_capabilities(CompareLess, move |_: u32| counter.set(counter.get() + 1));
        for v in 0..100 { tree.insert(v); }
        tree.clear();
        assert_eq!(count.get(), 100);
        assert!(tree.is_empty() && tree.root().is_none());
        tree.insert(42);
        drop(tree);
        assert_eq!(count.get(), 101, "Drop releases what is left");
        Ok(())
    }

    #[test]
    pub fn panicking_destructor_leaves_tree_consistent() -> TestReturn {
        let freed = Rc::new(Cell::new(0));
        let counter = freed.clone();
        let mut tree = Tree::with_capabilities(CompareLess, move |v: i32| {
            if v == 3 { panic!("refusing to release {}", v) }
            counter.set(counter.get() + 1);
        });
        for v in [5, 2, 8, 1, 3, 7, 9, 4] { tree.insert(v); }
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| tree.clear()));
        assert!(result.is_err(), "Destructor should have panicked");
        assert_eq!(tree.len(), 0, "Size should match the reachable nodes");
        assert!(tree.root().is_none());
        tree.validate()?;
        assert!(tree.insert(10));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10]);
        tree.validate()?;
        let before = freed.get();
        drop(tree);
        assert_eq!(freed.get(), before + 1, "Drop releases the record added after the panic");
        Ok(())
    }

    #[test]
    pub fn teardown_of_empty_tree_never_destroys() -> TestReturn {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let tree = Tree::with_capabilities(CompareLess, move |_: u32| counter.set(counter.get() + 1));
        tree.destroy();
        assert_eq!(count.get(), 0);
        Ok(())
    }

    #[derive(Clone)]
    struct LimitedAlloc {
        budget: Rc<Cell<usize>>
    }

    unsafe impl Allocator for LimitedAlloc {
        fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
            match self.budget.get() {
                0 => Err(AllocError),
                n => {
                    self.budget.set(n - 1);
                    Global.allocate(layout)
                }
            }
        }
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            Global.deallocate(ptr, layout)
        }
    }

    #[test]
    pub fn allocation_failure_leaves_tree_intact() -> TestReturn {
        init_logging();
        let budget = Rc::new(Cell::new(5));
        let mut tree = Tree::new_in(CompareLess, |_: i32| {}, LimitedAlloc { budget: budget.clone() });
        for v in 0..5 { tree.try_insert(v)?; }
        match tree.try_insert(5) {
            Err(InsertError::AllocFailed(v)) => assert_eq!(v, 5),
            _ => panic!("Insert should fail once the allocator is exhausted")
        }
        assert_eq!(tree.len(), 5);
        assert!(!tree.contains(&5));
        assert!(tree.try_insert(3).is_err_and(|e| e.is_duplicate()), "Duplicates are found before allocating");
        tree.validate()?;
        budget.set(1);
        tree.try_insert(5)?;
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
        Ok(())
    }

    pub struct TreeAssertion;
    impl TreeAssertion {
        fn check_node(n: &Node<u32>, color: NodeColor, left: Option<&Node<u32>>,
            parent: Option<&Node<u32>>, right: Option<&Node<u32>>) {
            assert!(n.color() == color, "<{}> should be *{:?}* instead of {:?}", n.data(), color, n.color());
            match left {
                Some(v) => assert!(n.left().is_some_and(|l| std::ptr::eq(l, v)), "Left child for <{}> should be <{}>", n.data(), v.data()),
                None => assert!(n.left().is_none(), "Left child for <{}> should be nil", n.data())
            }
            match parent {
                Some(v) => assert!(n.parent().is_some_and(|p| std::ptr::eq(p, v)), "Parent node for <{}> should be <{}>", n.data(), v.data()),
                None => assert!(n.parent().is_none(), "Parent node for <{}> should be nil", n.data())
            }
            match right {
                Some(v) => assert!(n.right().is_some_and(|r| std::ptr::eq(r, v)), "Right child for <{}> should be <{}>", n.data(), v.data()),
                None => assert!(n.right().is_none(), "Right child for <{}> should be nil", n.data())
            }
        }
    }

    // shape checks: expected is (value, color, left, parent, right)
    fn check_shape(tree: &Tree<u32>, expected: &[(u32, NodeColor, Option<u32>, Option<u32>, Option<u32>)]) {
        assert_eq!(tree.len(), expected.len());
        let node = |v: Option<u32>| v.map(|v| tree.find_node(&v).unwrap_or_else(|| panic!("{} should be in the tree", v)));
        for (value, color, left, parent, right) in expected {
            TreeAssertion::check_node(node(Some(*value)).unwrap(), *color, node(*left), node(*parent), node(*right));
        }
        assert!(std::ptr::eq(tree.root().unwrap(), node(Some(expected.iter()
            .find(|e| e.3.is_none()).unwrap().0)).unwrap()), "Root should be the node without a parent");
    }

    #[test]
    pub fn tree_insert_entries() -> TestReturn {
        use NodeColor::{ Black as B, Red as R };
        init_logging();
        let mut tree: Tree<u32> = Tree::new();
        // Final result:
        //
        //      4
        //     / \
        //    2   6
        //  / \  / \
        // 1  3 5  8
        //        / \
        //       7  9
        //
        // --------------
        // Insert 1:
        //
        //      1B
        tree.insert(1);
        check_shape(&tree, &[(1, B, None, None, None)]);
        // Insert 4
        //      1B
        //       \
        //        4R
        tree.insert(4);
        check_shape(&tree, &[(1, B, None, None, Some(4)), (4, R, None, Some(1), None)]);
        // Insert 6
        //      4B
        //     /  \
        //   1R   6R
        tree.insert(6);
        check_shape(&tree, &[
            (1, R, None, Some(4), None),
            (4, B, Some(1), None, Some(6)),
            (6, R, None, Some(4), None)
        ]);
        // Insert 3
        //      4B
        //     /  \
        //   1B   6B
        //    \
        //    3R
        tree.insert(3);
        check_shape(&tree, &[
            (1, B, None, Some(4), Some(3)),
            (3, R, None, Some(1), None),
            (4, B, Some(1), None, Some(6)),
            (6, B, None, Some(4), None)
        ]);
        // Insert 5
        //      4B
        //     /  \
        //   1B    6B
        //    \   /
        //    3R 5R
        tree.insert(5);
        check_shape(&tree, &[
            (1, B, None, Some(4), Some(3)),
            (3, R, None, Some(1), None),
            (4, B, Some(1), None, Some(6)),
            (5, R, None, Some(6), None),
            (6, B, Some(5), Some(4), None)
        ]);
        // Insert 7
        //      4B
        //     /  \
        //   1B    6B
        //    \   /  \
        //    3R 5R  7R
        tree.insert(7);
        check_shape(&tree, &[
            (1, B, None, Some(4), Some(3)),
            (3, R, None, Some(1), None),
            (4, B, Some(1), None, Some(6)),
            (5, R, None, Some(6), None),
            (6, B, Some(5), Some(4), Some(7)),
            (7, R, None, Some(6), None)
        ]);
        // Insert 8
        //      4B
        //     /  \
        //   1B    6R
        //    \   /  \
        //    3R 5B  7B
        //            \
        //             8R
        tree.insert(8);
        check_shape(&tree, &[
            (1, B, None, Some(4), Some(3)),
            (3, R, None, Some(1), None),
            (4, B, Some(1), None, Some(6)),
            (5, B, None, Some(6), None),
            (6, R, Some(5), Some(4), Some(7)),
            (7, B, None, Some(6), Some(8)),
            (8, R, None, Some(7), None)
        ]);
        // Insert 2
        //      4B
        //     /  \
        //   2B    6R
        //  / \   /  \
        // 1R 3R 5B  7B
        //            \
        //             8R
        tree.insert(2);
        check_shape(&tree, &[
            (1, R, None, Some(2), None),
            (2, B, Some(1), Some(4), Some(3)),
            (3, R, None, Some(2), None),
            (4, B, Some(2), None, Some(6)),
            (5, B, None, Some(6), None),
            (6, R, Some(5), Some(4), Some(7)),
            (7, B, None, Some(6), Some(8)),
            (8, R, None, Some(7), None)
        ]);
        // Insert 9
        //      4B
        //     /  \
        //   2B    6R
        //  / \   /  \
        // 1R 3R 5B  8B
        //          /  \
        //         7R  9R
        tree.insert(9);
        check_shape(&tree, &[
            (1, R, None, Some(2), None),
            (2, B, Some(1), Some(4), Some(3)),
            (3, R, None, Some(2), None),
            (4, B, Some(2), None, Some(6)),
            (5, B, None, Some(6), None),
            (6, R, Some(5), Some(4), Some(8)),
            (7, R, None, Some(8), None),
            (8, B, Some(7), Some(6), Some(9)),
            (9, R, None, Some(8), None)
        ]);
        tree.validate()?;
        Ok(())
    }
}
