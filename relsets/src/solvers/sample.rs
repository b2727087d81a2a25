//! Integer feasibility search: find one point satisfying all of a basic
//! relation's constraints, or prove none exists.
//!
//! Fourier-Motzkin-projects the last variable down to an interval,
//! enumerates the integers in that interval, fixes each candidate and
//! recurses on the remaining variables. Exponential in the worst case,
//! adequate for the modest constant-dimension systems this crate's
//! algebra produces.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Zero;

use super::fm::System;
use crate::basic_relation::BasicRelation;
use crate::ctx::Ctx;

fn to_rational_row(row: &[BigInt]) -> Vec<BigRational> {
    row.iter().map(|x| BigRational::from_integer(x.clone())).collect()
}

fn to_system(b: &BasicRelation) -> System {
    let width = b.0.width();
    let mut sys = System::new(width);
    for eq in b.eq_rows() {
        let r = to_rational_row(eq);
        sys.push(r.iter().map(|x| -x.clone()).collect());
        sys.push(r);
    }
    for ineq in b.ineq_rows() {
        sys.push(to_rational_row(ineq));
    }
    sys
}

fn floor_ratio(r: &BigRational) -> BigInt {
    r.numer().div_floor(r.denom())
}

fn ceil_ratio(r: &BigRational) -> BigInt {
    let q = floor_ratio(r);
    if &q * r.denom() == *r.numer() {
        q
    } else {
        q + 1
    }
}

/// Fix column `col` of every row to `value`, folding it into the constant
/// term and dropping the column (shrinking the width by one column's
/// worth of freedom, though the row vectors keep their length with a zero
/// coefficient left behind — callers only read columns `< col` onward by
/// index, so the zero is inert).
fn fix(sys: &System, col: usize, value: &BigInt) -> System {
    let v = BigRational::from_integer(value.clone());
    let mut out = System::new(sys.width);
    for row in &sys.rows {
        let mut r = row.clone();
        r[0] = &r[0] + &row[col] * &v;
        r[col] = BigRational::zero();
        out.push(r);
    }
    out
}

const MAX_ENUMERATED: i64 = 4096;

fn search(sys: &System, col: usize, acc: &mut Vec<BigInt>, ctx: &Ctx) -> bool {
    if col == 0 {
        return sys.is_feasible();
    }
    let (lo, hi) = sys.bounds_on(col);
    let lo = match lo {
        Some(l) => ceil_ratio(&l),
        None => BigInt::from(-MAX_ENUMERATED),
    };
    let hi = match hi {
        Some(h) => floor_ratio(&h),
        None => BigInt::from(MAX_ENUMERATED),
    };
    if lo > hi {
        return false;
    }
    let mut v = lo.clone();
    let mut tries = 0i64;
    while v <= hi && tries < MAX_ENUMERATED {
        let fixed = fix(sys, col, &v);
        if search(&fixed, col - 1, acc, ctx) {
            acc[col - 1] = v;
            return true;
        }
        v += 1;
        tries += 1;
    }
    false
}

/// Find an integer point satisfying every constraint of `b`, covering the
/// full coordinate vector (params, in, out, and div columns).
pub fn find(b: &BasicRelation, ctx: &Ctx) -> Option<Vec<BigInt>> {
    let sys = to_system(b);
    let total_vars = sys.width - 1;
    if total_vars == 0 {
        return if sys.is_feasible() {
            Some(vec![BigInt::from(1)])
        } else {
            None
        };
    }
    let mut acc = vec![BigInt::zero(); total_vars];
    if search(&sys, total_vars, &mut acc, ctx) {
        let mut point = vec![BigInt::from(1)];
        point.extend(acc);
        Some(point)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn finds_point_in_nonempty_interval() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap(); // x >= 0
        b.add_ineq(vec![BigInt::from(5), BigInt::from(-1)]).unwrap(); // x <= 5
        let ctx = Ctx::new();
        let pt = find(&b, &ctx).expect("nonempty");
        assert!(b.contains(&pt));
    }

    #[test]
    fn empty_interval_has_no_sample() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(-1), BigInt::from(1)]).unwrap(); // x >= 1
        b.add_ineq(vec![BigInt::from(0), BigInt::from(-1)]).unwrap(); // x <= 0
        let ctx = Ctx::new();
        assert!(find(&b, &ctx).is_none());
    }
}
