//! Existentially quantified div bookkeeping: emitting the defining
//! inequality pair, topologically ordering divs, and aligning one basic
//! relation's divs onto another's.

use num_bigint::BigInt;
use num_traits::Zero;

use super::div::DivRow;
use super::BasicRelation;
use crate::num::row;

fn div_col(space_total: usize, k: usize) -> usize {
    1 + space_total + k
}

impl BasicRelation {
    /// Emit the canonical pair of inequalities representing `x_pos =
    /// floor(f/d)`: `f - d*x_pos >= 0` and `-f + d*x_pos + (d-1) >= 0`.
    pub fn add_div_constraints_var(&mut self, pos: usize, div: &DivRow) {
        let col = div_col(self.space().total(), pos);
        let mut lower = div.expr.clone();
        lower[col] -= &div.denom;
        let _ = self.add_ineq(lower);

        let mut upper: Vec<BigInt> = div.expr.iter().map(|x| -x).collect();
        upper[col] += &div.denom;
        upper[0] += &div.denom - BigInt::from(1);
        let _ = self.add_ineq(upper);
    }

    /// Topologically order the div block: bubble each div that refers to
    /// the column of its immediate successor past it, until a full pass
    /// makes no swap (every div only refers to earlier divs).
    pub fn order_divs(&self) -> BasicRelation {
        let mut out = self.dup();
        let n = out.n_div();
        if n < 2 {
            return out;
        }
        let total = out.space().total();
        loop {
            let mut moved = false;
            for i in 0..n - 1 {
                let col = div_col(total, i + 1);
                if !out.div_rows()[i].expr[col].is_zero() {
                    out.swap_div(i, i + 1);
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }
        out
    }

    /// Find a div in `self` structurally identical to `other` (same
    /// denominator, same affine expression including later-div columns),
    /// if any.
    fn find_identical_div(&self, other_expr: &[BigInt], other_denom: &BigInt, upto_width: usize) -> Option<usize> {
        self.div_rows().iter().position(|d| {
            &d.denom == other_denom && d.expr[..upto_width] == other_expr[..upto_width]
        })
    }

    /// Align `self`'s divs onto `src`'s: order `src`, enlarge `self` by up
    /// to `n_div(src)` extra divs, then for each div in (ordered) `src`
    /// either reuse an identical div already in `self` or append a fresh
    /// one with its defining constraints, finally permuting `self`'s divs
    /// to match `src`'s order.
    pub fn align_divs(&self, src: &BasicRelation) -> BasicRelation {
        let src = src.order_divs();
        let mut out = self.extend_space(self.space().clone(), self.extra() + src.n_div(), 0, src.n_div() * 2);
        let total = out.space().total();

        let mut matched = Vec::with_capacity(src.n_div());
        for (k, d) in src.div_rows().iter().enumerate() {
            let upto = div_col(total, k);
            if let Some(pos) = out.find_identical_div(&d.expr, &d.denom, upto) {
                matched.push(pos);
                continue;
            }
            let new_pos = out.alloc_div().expect("extended for this many divs");
            {
                let data = out.cow();
                data.divs[new_pos] = DivRow {
                    denom: d.denom.clone(),
                    expr: {
                        let mut e = vec![BigInt::zero(); data.width()];
                        let n = e.len().min(d.expr.len());
                        e[..n].copy_from_slice(&d.expr[..n]);
                        e
                    },
                };
            }
            let row_copy = out.div_rows()[new_pos].clone();
            out.add_div_constraints_var(new_pos, &row_copy);
            matched.push(new_pos);
        }

        for target in 0..matched.len() {
            let current = matched[target];
            if current != target {
                out.swap_div(target, current);
                for m in matched.iter_mut() {
                    if *m == target {
                        *m = current;
                    }
                }
                matched[target] = target;
            }
        }
        let data = out.cow();
        data.mat.eq_rows_mut().iter_mut().for_each(|r| row::normalize_eq(r));
        out
    }
}
