//! Simplex-tableau collaborator: build from constraints, add/rollback an
//! inequality, detect emptiness. Backed by Fourier-Motzkin feasibility
//! (an exact decision procedure for rational linear systems), so the
//! tableau itself only needs to track pushed rows and support rollback.

use num_bigint::BigInt;
use num_rational::BigRational;

use super::fm::System;
use super::lp::{self, LpResult};
use super::pip::{self, PipResult};
use super::sample;
use crate::basic_relation::BasicRelation;
use crate::ctx::Ctx;
use crate::space::Component;

/// Opaque rollback mark: the row count before a push.
pub type Mark = usize;

#[derive(Debug, Clone)]
pub struct Tab {
    width: usize,
    pub(crate) base_rows: Vec<Vec<BigRational>>,
    pub(crate) pushed: Vec<Vec<BigRational>>,
}

fn to_rational_row(row: &[BigInt]) -> Vec<BigRational> {
    row.iter().map(|x| BigRational::from_integer(x.clone())).collect()
}

impl Tab {
    pub fn from_basic_relation(b: &BasicRelation) -> Tab {
        let width = b.0.width();
        let mut base_rows = Vec::new();
        for eq in b.eq_rows() {
            let r = to_rational_row(eq);
            base_rows.push(r.iter().map(|x| -x.clone()).collect::<Vec<_>>());
            base_rows.push(r);
        }
        for ineq in b.ineq_rows() {
            base_rows.push(to_rational_row(ineq));
        }
        Tab {
            width,
            base_rows,
            pushed: Vec::new(),
        }
    }

    /// Push an extra inequality (integer row, same width), return a mark
    /// to roll back to.
    pub fn add_inequality(&mut self, row: Vec<BigInt>) -> Mark {
        let mark = self.pushed.len();
        self.pushed.push(to_rational_row(&row));
        mark
    }

    pub fn rollback(&mut self, mark: Mark) {
        self.pushed.truncate(mark);
    }

    pub fn is_empty(&self) -> bool {
        let mut sys = System::new(self.width);
        for row in self.base_rows.iter().chain(self.pushed.iter()) {
            sys.push(row.clone());
        }
        !sys.is_feasible()
    }
}

/// Lexicographic optimization via the LP solver instead of `pip`'s
/// witness-extremization: each coordinate's bound is the true LP optimum
/// of the current tableau (via [`lp::maximize`]), and the candidate row
/// whose value at a sample point matches that bound is the one pinned.
/// Shares `pip`'s candidate search and pinning logic — the two backends
/// differ only in how they settle on which row is tight.
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

        if !pip::candidates(out.eq_rows(), col, &later).is_empty() {
            continue;
        }

        let want_lower = !maximize;
        let ineq_rows = out.ineq_rows().to_vec();
        let bounding: Vec<&Vec<BigInt>> = pip::candidates(&ineq_rows, col, &later)
            .into_iter()
            .filter(|r| r[col].is_positive() == want_lower)
            .collect();
        if bounding.is_empty() {
            return PipResult::Unbounded;
        }

        let tab = Tab::from_basic_relation(&out);
        let width = out.0.width();
        let mut objective = vec![BigRational::from_integer(0.into()); width];
        objective[col] = if want_lower {
            BigRational::from_integer((-1).into())
        } else {
            BigRational::from_integer(1.into())
        };
        let lp_bound = match lp::maximize(&tab, &objective) {
            LpResult::Max(v) => {
                if want_lower {
                    -v
                } else {
                    v
                }
            }
            LpResult::Unbounded => return PipResult::Unbounded,
            LpResult::Empty => return PipResult::Empty,
        };

        let witness = match sample::find(&out, ctx) {
            Some(s) => s,
            None => return PipResult::Empty,
        };

        let row: &Vec<BigInt> = bounding
            .into_iter()
            .find(|row: &&Vec<BigInt>| {
                let row: &Vec<BigInt> = *row;
                let c = &row[col];
                let rest_at_witness = crate::num::row::dot(row, &witness) - c * &witness[col];
                BigRational::new(-rest_at_witness, c.clone()) == lp_bound
            })
            .expect("the LP bound must be tight at one of the candidate rows");
        pip::pin_from_row(&mut out, row, col, want_lower);
    }

    PipResult::Optimum(out)
}

#[cfg(test)]
mod lex_opt_tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn lexmin_matches_pip_over_a_box() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 2));
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

    #[test]
    fn lexmax_reports_unbounded_direction() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap();
        let ctx = Ctx::new();
        assert!(matches!(lex_opt(&b, &ctx, true), PipResult::Unbounded));
    }
}
