//! Gaussian elimination, variable compression, and redundancy removal on
//! a single basic relation.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::basic_relation::{BasicRelation, BrFlags};
use crate::num::row;
use crate::solvers::tableau::Tab;

/// Find a pivot column with coefficient `±1` in `eq_row`, preferring a
/// non-div column (divs are existential and make worse pivots since
/// eliminating through them can reintroduce them elsewhere).
fn find_pivot(eq_row: &[BigInt], non_div_end: usize) -> Option<usize> {
    for c in 1..non_div_end {
        if eq_row[c] == BigInt::one() || eq_row[c] == -BigInt::one() {
            return Some(c);
        }
    }
    for c in non_div_end..eq_row.len() {
        if eq_row[c] == BigInt::one() || eq_row[c] == -BigInt::one() {
            return Some(c);
        }
    }
    None
}

/// Eliminate one unit-coefficient equality at a time against every other
/// row (eq, ineq, div-expr), then normalize every row by its content and
/// detect the `1 = 0` contradiction.
pub fn simplify(b: &BasicRelation) -> BasicRelation {
    let mut out = b.dup();
    let n_eq0 = out.n_eq();
    let mut used_pivot_cols = std::collections::HashSet::new();
    for i in 0..n_eq0 {
        let non_div_end = 1 + out.space().total();
        let data = out.cow();
        let eq_row_snapshot = data.mat.eq_rows()[i].clone();
        let c = match find_pivot(&eq_row_snapshot, non_div_end) {
            Some(c) if !used_pivot_cols.contains(&c) => c,
            _ => continue,
        };
        used_pivot_cols.insert(c);
        let eq_row = eq_row_snapshot;
        let s = eq_row[c].clone();
        let n_eq = data.mat.eq_rows().len();
        for j in 0..n_eq {
            if j == i {
                continue;
            }
            let k = data.mat.eq_rows()[j][c].clone();
            if k.is_zero() {
                continue;
            }
            let coef = -(&k * &s);
            row::add_scaled(&mut data.mat.eq_rows_mut()[j], &eq_row, &coef);
        }
        let n_ineq = data.mat.ineq_rows().len();
        for j in 0..n_ineq {
            let k = data.mat.ineq_rows()[j][c].clone();
            if k.is_zero() {
                continue;
            }
            let coef = -(&k * &s);
            row::add_scaled(&mut data.mat.ineq_rows_mut()[j], &eq_row, &coef);
        }
        for div in data.divs.iter_mut() {
            let k = div.expr[c].clone();
            if !k.is_zero() {
                let coef = -(&k * &s);
                row::add_scaled(&mut div.expr, &eq_row, &coef);
            }
        }
    }
    {
        let data = out.cow();
        for eq in data.mat.eq_rows_mut().iter_mut() {
            row::normalize_eq(eq);
        }
        for ineq in data.mat.ineq_rows_mut().iter_mut() {
            row::normalize_ineq(ineq);
        }
        let contradiction = data
            .mat
            .eq_rows()
            .iter()
            .any(|r| !r[0].is_zero() && r[1..].iter().all(|x| x.is_zero()));
        if contradiction {
            data.flags.insert(BrFlags::EMPTY);
        }
    }
    out
}

/// Drop any inequality implied by the rest of the constraint set (tested
/// by checking that its strict negation is infeasible together with
/// everything else).
pub fn remove_redundant(b: &BasicRelation) -> BasicRelation {
    let mut out = b.dup();
    let mut i = 0;
    while i < out.n_ineq() {
        let width = out.0.width();
        let row = out.ineq_rows()[i].clone();
        let mut others = out.dup();
        others.drop_inequality(i);
        let mut tab = Tab::from_basic_relation(&others);
        let mut neg = vec![BigInt::zero(); width];
        for (k, x) in row.iter().enumerate() {
            neg[k] = -x.clone();
        }
        neg[0] -= 1;
        tab.add_inequality(neg);
        if tab.is_empty() {
            out.drop_inequality(i);
        } else {
            i += 1;
        }
    }
    out
}
