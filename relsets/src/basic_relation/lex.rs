//! Lexicographic-order and orthant constructors: `less_at`, `more_at`
//! and their non-strict counterparts, `identity`, `positive_orthant`,
//! `interval`.

use num_bigint::BigInt;
use num_traits::Zero;

use super::BasicRelation;
use crate::space::{Component, Space};

fn zero_row(width: usize) -> Vec<BigInt> {
    vec![BigInt::zero(); width]
}

impl BasicRelation {
    /// Equal on the first `pos` output coordinates, strictly less (`in <
    /// out`) at coordinate `pos`. `pos` must be `< n_out(space)`.
    pub fn less_at(space: Space, pos: usize) -> Option<BasicRelation> {
        Self::ordered_at(space, pos, -1, false)
    }

    /// As [`less_at`](Self::less_at) but non-strict (`in <= out`) at `pos`.
    pub fn less_or_equal_at(space: Space, pos: usize) -> Option<BasicRelation> {
        Self::ordered_at(space, pos, -1, true)
    }

    /// Equal on the first `pos` output coordinates, strictly greater (`in
    /// > out`) at coordinate `pos`.
    pub fn more_at(space: Space, pos: usize) -> Option<BasicRelation> {
        Self::ordered_at(space, pos, 1, false)
    }

    /// As [`more_at`](Self::more_at) but non-strict (`in >= out`) at `pos`.
    pub fn more_or_equal_at(space: Space, pos: usize) -> Option<BasicRelation> {
        Self::ordered_at(space, pos, 1, true)
    }

    /// Shared body: `sign = -1` encodes `in < out` (less), `sign = 1`
    /// encodes `in > out` (more); `or_equal` drops the strict `-1` slack.
    fn ordered_at(space: Space, pos: usize, sign: i64, or_equal: bool) -> Option<BasicRelation> {
        if pos >= space.n_out() {
            return None;
        }
        let mut b = BasicRelation::alloc(space.clone(), 0, pos, 1);
        {
            let in_off = space.offset(Component::In);
            let out_off = space.offset(Component::Out);
            for k in 0..pos {
                let mut row = zero_row(b.0.width());
                row[in_off + k] = BigInt::from(1);
                row[out_off + k] = BigInt::from(-1);
                b.add_eq(row).ok()?;
            }
            let mut row = zero_row(b.0.width());
            // sign < 0: out - in [- 1] >= 0   (in < out, or in <= out)
            // sign > 0: in - out [- 1] >= 0   (in > out, or in >= out)
            if sign < 0 {
                row[out_off + pos] = BigInt::from(1);
                row[in_off + pos] = BigInt::from(-1);
            } else {
                row[in_off + pos] = BigInt::from(1);
                row[out_off + pos] = BigInt::from(-1);
            }
            if !or_equal {
                row[0] = BigInt::from(-1);
            }
            b.add_ineq(row).ok()?;
        }
        Some(b)
    }

    /// `{ x -> x }`: one equality `in_k = out_k` per output coordinate.
    /// Requires `n_in(space) == n_out(space)`.
    pub fn identity(space: Space) -> Option<BasicRelation> {
        if space.n_in() != space.n_out() {
            return None;
        }
        let n = space.n_out();
        let mut b = BasicRelation::alloc(space.clone(), 0, n, 0);
        let in_off = space.offset(Component::In);
        let out_off = space.offset(Component::Out);
        for k in 0..n {
            let mut row = zero_row(b.0.width());
            row[in_off + k] = BigInt::from(1);
            row[out_off + k] = BigInt::from(-1);
            b.add_eq(row).ok()?;
        }
        Some(b)
    }

    /// `{ x | x_i >= 0 for every set coordinate }`. Requires `space` to be
    /// a set space (`n_in == 0`).
    pub fn positive_orthant(space: Space) -> Option<BasicRelation> {
        if !space.is_set() {
            return None;
        }
        let n = space.n_out();
        let mut b = BasicRelation::alloc(space.clone(), 0, 0, n);
        let out_off = space.offset(Component::Out);
        for k in 0..n {
            let mut row = zero_row(b.0.width());
            row[out_off + k] = BigInt::from(1);
            b.add_ineq(row).ok()?;
        }
        Some(b)
    }

    /// `{ x | lo <= x <= hi }` over a one-dimensional set space.
    pub fn interval(space: Space, lo: BigInt, hi: BigInt) -> Option<BasicRelation> {
        if !space.is_set() || space.n_out() != 1 {
            return None;
        }
        let mut b = BasicRelation::alloc(space.clone(), 0, 0, 2);
        let out_off = space.offset(Component::Out);
        let mut lower = zero_row(b.0.width());
        lower[0] = -lo;
        lower[out_off] = BigInt::from(1);
        b.add_ineq(lower).ok()?;
        let mut upper = zero_row(b.0.width());
        upper[0] = hi;
        upper[out_off] = BigInt::from(-1);
        b.add_ineq(upper).ok()?;
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn less_at_orders_strictly() {
        let space = Space::alloc(0, 2, 2);
        let b = BasicRelation::less_at(space, 1).unwrap();
        // equal at coord 0, strictly less at coord 1: (1,2) -> (1,3) holds,
        // (1,2) -> (1,2) does not.
        assert!(b.contains(&[
            BigInt::from(1),
            BigInt::from(1),
            BigInt::from(2),
            BigInt::from(1),
            BigInt::from(3)
        ]));
        assert!(!b.contains(&[
            BigInt::from(1),
            BigInt::from(1),
            BigInt::from(2),
            BigInt::from(1),
            BigInt::from(2)
        ]));
    }

    #[test]
    fn identity_requires_matching_arity() {
        assert!(BasicRelation::identity(Space::alloc(0, 2, 2)).is_some());
        assert!(BasicRelation::identity(Space::alloc(0, 2, 3)).is_none());
    }

    #[test]
    fn positive_orthant_excludes_negative_point() {
        let b = BasicRelation::positive_orthant(Space::alloc_set(0, 1)).unwrap();
        assert!(b.contains(&[BigInt::from(1), BigInt::from(3)]));
        assert!(!b.contains(&[BigInt::from(1), BigInt::from(-1)]));
    }

    #[test]
    fn interval_bounds_both_sides() {
        let b = BasicRelation::interval(Space::alloc_set(0, 1), BigInt::from(2), BigInt::from(5)).unwrap();
        assert!(b.contains(&[BigInt::from(1), BigInt::from(3)]));
        assert!(!b.contains(&[BigInt::from(1), BigInt::from(6)]));
    }
}
