use std::cmp::Ordering;

/// Three-way ordering over stored records.
///
/// Implementations must describe a total order that stays consistent for as long
/// as the tree holds records; the tree does not detect a violation and its
/// behaviour is unspecified if one happens.
pub trait TreeCompare<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Cleanup routine run once per stored record when the tree is torn down.
pub trait TreeDestroy<T> {
    fn destroy(&mut self, record: T);
}

pub struct CompareLess; // natural ascending order
impl<T> TreeCompare<T> for CompareLess
where T: Ord
{
    fn compare(&self, a: &T, b: &T) -> Ordering { a.cmp(b) }
}

pub struct CompareGreater; // reverse order
impl<T> TreeCompare<T> for CompareGreater
where T: Ord
{
    fn compare(&self, a: &T, b: &T) -> Ordering { b.cmp(a) }
}

impl<T, F> TreeCompare<T> for F
where F: Fn(&T, &T) -> Ordering
{
    fn compare(&self, a: &T, b: &T) -> Ordering { self(a, b) }
}

pub struct DropRecord; // records need nothing beyond their own Drop
impl<T> TreeDestroy<T> for DropRecord {
    fn destroy(&mut self, record: T) { drop(record) }
}

impl<T, F> TreeDestroy<T> for F
where F: FnMut(T)
{
    fn destroy(&mut self, record: T) { self(record) }
}
