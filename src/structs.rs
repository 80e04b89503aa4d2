use allocator_api2::alloc::Allocator;
use std::{
    cmp::Ordering,
    fmt::Display
};
use crate::rb::{
    compare::{ TreeCompare, TreeDestroy },
    tree::Tree
};

/// Numeric vector record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    values: Vec<f64>
}

impl Vector {
    pub fn new(values: Vec<f64>) -> Self { Self { values } }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn as_slice(&self) -> &[f64] { &self.values }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self { Self::new(values) }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(values: [f64; N]) -> Self { Self::new(values.to_vec()) }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 { write!(f, ",")? }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// Orders vectors by their first differing element. When one vector is a
/// prefix of the other, the shorter one comes first.
pub fn compare_one_by_one(a: &Vector, b: &Vector) -> Ordering {
    a.values.iter()
        .zip(b.values.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

pub struct CompareOneByOne; // element by element, see compare_one_by_one
impl TreeCompare<Vector> for CompareOneByOne {
    fn compare(&self, a: &Vector, b: &Vector) -> Ordering { compare_one_by_one(a, b) }
}

/// Copy of the stored vector with the largest Euclidean norm. The first one in
/// tree order wins a tie. Vectors holding a NaN have no norm and are skipped.
pub fn find_max_norm_vector<C, D, A>(tree: &Tree<Vector, C, D, A>) -> Option<Vector>
where C: TreeCompare<Vector>,
      D: TreeDestroy<Vector>,
      A: Allocator
{
    let mut best: Option<(&Vector, f64)> = None;
    tree.for_each_with(&mut best, |v, best| {
        let norm = v.norm();
        if !norm.is_nan() && best.map_or(true, |(_, n)| norm > n) {
            *best = Some((v, norm));
        }
        true
    });
    best.map(|(v, _)| v.clone())
}

/// Every record in order, each followed by a newline.
pub fn concatenate<C, D, A>(tree: &Tree<String, C, D, A>) -> String
where C: TreeCompare<String>,
      D: TreeDestroy<String>,
      A: Allocator
{
    let mut out = String::new();
    tree.for_each_with(&mut out, |s, out| {
        out.push_str(s);
        out.push('\n');
        true
    });
    out
}
