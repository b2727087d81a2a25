//! Simplified parametric integer programming: lexicographic optimization of
//! a basic relation's output tuple, coordinate by coordinate, most
//! significant first.
//!
//! A full Feautrier-style PIP splits the domain (params and input tuple)
//! into regions according to which constraint actually binds the optimum
//! in each region. That case-split is the part this engine does not do:
//! when more than one constraint could be the binding bound on a
//! coordinate, it picks whichever is tight at one concrete sample of the
//! current domain and uses that same constraint's expression as the answer
//! everywhere — correct for the common case where one constraint binds
//! throughout, wrong if the optimum's shape genuinely changes across the
//! domain. See DESIGN.md.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::sample;
use crate::basic_relation::{BasicRelation, DivRow};
use crate::ctx::Ctx;
use crate::space::Component;

/// Outcome of lexicographically optimizing one basic relation.
pub enum PipResult {
    /// `b` intersected with the equalities that pin every output
    /// coordinate to its optimum.
    Optimum(BasicRelation),
    /// `b` has no integer point at all.
    Empty,
    /// Some output coordinate has no bound in the requested direction.
    Unbounded,
}

fn dot(row: &[BigInt], x: &[BigInt]) -> BigInt {
    crate::num::row::dot(row, x)
}

/// Rows with a nonzero coefficient at `col` and zero at every column in
/// `later` (output coordinates not yet pinned).
pub(crate) fn candidates<'a>(rows: &'a [Vec<BigInt>], col: usize, later: &[usize]) -> Vec<&'a Vec<BigInt>> {
    rows.iter()
        .filter(|r| !r[col].is_zero() && later.iter().all(|&c| r[c].is_zero()))
        .collect()
}

/// Pin `out`'s coordinate `col` to the bound carried by `row` (already
/// known tight at the optimum). `row[col]` need not be `±1`: a non-unit
/// coefficient introduces a fresh div for the quotient, exactly as
/// `BasicRelation::floor_div` does for an ordinary floor division.
pub(crate) fn pin_from_row(out: &mut BasicRelation, row: &[BigInt], col: usize, want_lower: bool) {
    let c = row[col].clone();
    if c == BigInt::from(1) || c == BigInt::from(-1) {
        *out = out.extend_constraints(1, 0);
        out.add_eq(row.to_vec()).ok();
        return;
    }
    let (denom, negate) = if c.is_positive() { (c.clone(), true) } else { (-c.clone(), false) };
    debug_assert_eq!(negate, want_lower, "sign of the binding coefficient must match the optimization direction");

    let mut rest = row.to_vec();
    rest[col] = BigInt::zero();

    // +1 eq for the final pin, +2 ineq for the div's defining floor pair.
    let mut grown = out.extend_space(out.space().clone(), out.extra() + 1, 1, 2);
    let width = grown.0.width();
    rest.resize(width, BigInt::zero());

    let k = grown.alloc_div().expect("just grew room for this div");
    {
        let data = grown.cow();
        data.divs[k] = DivRow { denom, expr: rest };
    }
    let div_row = grown.div_rows()[k].clone();
    grown.add_div_constraints_var(k, &div_row);

    let div_col = 1 + grown.space().total() + k;
    let mut eq = vec![BigInt::zero(); width];
    eq[col] = BigInt::from(1);
    eq[div_col] = if negate { BigInt::from(1) } else { BigInt::from(-1) };
    grown.add_eq(eq).ok();
    *out = grown;
}

/// Lexicographically optimize `b`'s output tuple: `maximize = false` for
/// lexmin, `true` for lexmax.
pub fn lex_opt(b: &BasicRelation, ctx: &Ctx, maximize: bool) -> PipResult {
    let mut out = b.dup();
    if out.is_empty_mut(ctx) {
        return PipResult::Empty;
    }

    let n_out = out.space().n_out();
    for coord in 0..n_out {
        let out_off = out.space().offset(Component::Out);
        let col = out_off + coord;
        let later: Vec<usize> = (coord + 1..n_out).map(|k| out_off + k).collect();

        if !candidates(out.eq_rows(), col, &later).is_empty() {
            continue;
        }

        let want_lower = !maximize;
        let ineq_rows = out.ineq_rows().to_vec();
        let bounding: Vec<&Vec<BigInt>> = candidates(&ineq_rows, col, &later)
            .into_iter()
            .filter(|r| r[col].is_positive() == want_lower)
            .collect();
        if bounding.is_empty() {
            return PipResult::Unbounded;
        }

        let witness = match sample::find(&out, ctx) {
            Some(s) => s,
            None => return PipResult::Empty,
        };

        let mut best: Option<(&Vec<BigInt>, BigRational)> = None;
        for row in bounding {
            let c = &row[col];
            let rest_at_witness = dot(row, &witness) - c * &witness[col];
            let bound = BigRational::new(-rest_at_witness, c.clone());
            let pick = match &best {
                None => true,
                Some((_, b)) => {
                    if want_lower {
                        bound > *b
                    } else {
                        bound < *b
                    }
                }
            };
            if pick {
                best = Some((row, bound));
            }
        }
        let (row, _) = best.unwrap();
        pin_from_row(&mut out, row, col, want_lower);
    }

    PipResult::Optimum(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn lexmin_pins_bounded_interval() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap(); // x >= 0
        b.add_ineq(vec![BigInt::from(5), BigInt::from(-1)]).unwrap(); // x <= 5
        let ctx = Ctx::new();
        match lex_opt(&b, &ctx, false) {
            PipResult::Optimum(opt) => {
                assert!(opt.contains(&[BigInt::from(1), BigInt::from(0)]));
                assert!(!opt.contains(&[BigInt::from(1), BigInt::from(1)]));
            }
            _ => panic!("expected an optimum"),
        }
    }

    #[test]
    fn lexmax_pins_bounded_interval() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap();
        b.add_ineq(vec![BigInt::from(5), BigInt::from(-1)]).unwrap();
        let ctx = Ctx::new();
        match lex_opt(&b, &ctx, true) {
            PipResult::Optimum(opt) => {
                assert!(opt.contains(&[BigInt::from(1), BigInt::from(5)]));
            }
            _ => panic!("expected an optimum"),
        }
    }

    #[test]
    fn unbounded_direction_is_reported() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap(); // x >= 0, no upper bound
        let ctx = Ctx::new();
        assert!(matches!(lex_opt(&b, &ctx, true), PipResult::Unbounded));
    }

    #[test]
    fn empty_relation_is_reported() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(-1), BigInt::from(1)]).unwrap(); // x >= 1
        b.add_ineq(vec![BigInt::from(0), BigInt::from(-1)]).unwrap(); // x <= 0
        let ctx = Ctx::new();
        assert!(matches!(lex_opt(&b, &ctx, false), PipResult::Empty));
    }

    #[test]
    fn lexmin_prefers_coordinate_order() {
        // { (i,j) | 0<=i<=3, 0<=j<=3 }, lexmin picks i=0 first, then j=0.
        let space = Space::alloc_set(0, 2);
        let mut b = BasicRelation::universe(space);
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1), BigInt::from(0)]).unwrap();
        b.add_ineq(vec![BigInt::from(3), BigInt::from(-1), BigInt::from(0)]).unwrap();
        b.add_ineq(vec![BigInt::from(0), BigInt::from(0), BigInt::from(1)]).unwrap();
        b.add_ineq(vec![BigInt::from(3), BigInt::from(0), BigInt::from(-1)]).unwrap();
        let ctx = Ctx::new();
        match lex_opt(&b, &ctx, false) {
            PipResult::Optimum(opt) => {
                assert!(opt.contains(&[BigInt::from(1), BigInt::from(0), BigInt::from(0)]));
            }
            _ => panic!("expected an optimum"),
        }
    }
}
