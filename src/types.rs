//! Record shapes flowing through the ranking pipeline.

use std::cmp::Ordering;

/// The node identifier type; identifiers are `1..=N`.
pub type NodeId = u32;

/// An input edge `(i, n(i))` or a ranked node `(i, r(i))`.
pub type Pair = [u32; 2];

/// A weighted edge `(i, n(i), w(i))`.
pub type Weighted = [u32; 3];

/// A weighted edge with this round's coin flip appended.
pub type Flagged = [u32; 4];

/// A node joined with its successor's view:
/// `(i, n(i), n(n(i)), w(i), f(i), f(n(i)))`.
pub type Linked = [u32; 6];

/// One contraction trace row:
/// `(p(j), d(p(j)), w(p(j)), j, n(j), d(j), w(j))`.
pub type Trace = [u32; 7];

/// Orders records by a single field.
pub fn by_field<const K: usize>(field: usize) -> impl Fn(&[u32; K], &[u32; K]) -> Ordering + Copy {
    move |a, b| a[field].cmp(&b[field])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_field() {
        let cmp = by_field::<2>(1);
        assert_eq!(cmp(&[9, 1], &[0, 2]), Ordering::Less);
        assert_eq!(cmp(&[0, 2], &[9, 2]), Ordering::Equal);
        assert_eq!(cmp(&[0, 3], &[9, 2]), Ordering::Greater);
    }
}
