//! Shared builder helpers for the integration suite: small named spaces
//! and basic relations built from plain coordinate lists, playing the
//! same role as the teacher's own VM-building test helpers.

use num_bigint::BigInt;
use relsets::basic_relation::BasicRelation;
use relsets::space::{Component, Space};

pub fn set_space(n: usize) -> Space {
    Space::alloc_set(0, n)
}

pub fn map_space(n_in: usize, n_out: usize) -> Space {
    Space::alloc(0, n_in, n_out)
}

pub fn ints(v: &[i64]) -> Vec<BigInt> {
    v.iter().map(|&x| BigInt::from(x)).collect()
}

/// `{ x | lo_k <= x_k <= hi_k }` over a set space, one pair of bounds per
/// coordinate.
pub fn box_set(bounds: &[(i64, i64)]) -> BasicRelation {
    let space = set_space(bounds.len());
    let width = 1 + space.total();
    let mut b = BasicRelation::alloc(space.clone(), 0, 0, bounds.len() * 2);
    let off = space.offset(Component::Out);
    for (k, &(lo, hi)) in bounds.iter().enumerate() {
        let mut lower = vec![BigInt::from(0); width];
        lower[0] = BigInt::from(-lo);
        lower[off + k] = BigInt::from(1);
        b.add_ineq(lower).unwrap();
        let mut upper = vec![BigInt::from(0); width];
        upper[0] = BigInt::from(hi);
        upper[off + k] = BigInt::from(-1);
        b.add_ineq(upper).unwrap();
    }
    b
}
