//! Emptiness, containment, equality, hashing, sign, and boundedness.

use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::flags::BrFlags;
use super::BasicRelation;
use crate::ctx::Ctx;
use crate::solvers::{sample, tableau};
use crate::space::Component;

impl BasicRelation {
    /// `fast_is_empty(B) ≡ EMPTY flag`.
    pub fn fast_is_empty(&self) -> bool {
        self.is_empty_flag()
    }

    /// `is_empty(B)`.
    ///
    /// If a sample is already cached, test it against the constraints
    /// (cheap). Otherwise delegate to the integer feasibility search. The
    /// sample slot is only ever populated by an owning caller (there is no
    /// interior mutability here — caching across calls requires the
    /// caller hold `&mut BasicRelation`, matching this crate's
    /// ownership-transfer discipline).
    pub fn is_empty(&self, ctx: &Ctx) -> bool {
        if self.is_empty_flag() {
            return true;
        }
        if self.is_rational() {
            return self.fast_is_empty();
        }
        if let Some(s) = &self.0.sample {
            if self.contains(s) {
                return false;
            }
        }
        sample::find(self, ctx).is_none()
    }

    /// Search for and cache an integer sample; sets the EMPTY flag if
    /// none exists. Returns whether the relation is empty.
    pub fn is_empty_mut(&mut self, ctx: &Ctx) -> bool {
        if self.is_empty_flag() {
            return true;
        }
        if let Some(s) = self.0.sample.clone() {
            if self.contains(&s) {
                return false;
            }
        }
        match sample::find(self, ctx) {
            Some(s) => {
                self.cow().sample = Some(s);
                false
            }
            None => {
                self.cow().flags.insert(BrFlags::EMPTY);
                true
            }
        }
    }

    /// `∀ eq. eq·x = 0 ∧ ∀ ineq. ineq·x ≥ 0`.
    pub fn contains(&self, x: &[BigInt]) -> bool {
        debug_assert_eq!(x.len(), self.0.width());
        self.eq_rows()
            .iter()
            .all(|row| crate::num::row::dot(row, x).is_zero())
            && self
                .ineq_rows()
                .iter()
                .all(|row| crate::num::row::dot(row, x) >= BigInt::zero())
    }

    /// Lexicographic compare on normalized basic relations — cheap exact
    /// equality check that does not invoke a solver.
    pub fn fast_is_equal(&self, other: &BasicRelation) -> bool {
        if !self.space().equal(other.space()) {
            return false;
        }
        let a = self.normalize();
        let b = other.normalize();
        a.n_eq() == b.n_eq()
            && a.n_ineq() == b.n_ineq()
            && a.n_div() == b.n_div()
            && a.eq_rows() == b.eq_rows()
            && a.ineq_rows() == b.ineq_rows()
            && a.div_rows() == b.div_rows()
    }

    /// Stable under `normalize`: mixes in counts and every eq/ineq row and
    /// every div row with a non-zero denominator.
    pub fn hash_value(&self) -> u64 {
        let n = self.normalize();
        let mut h = std::collections::hash_map::DefaultHasher::new();
        n.space().nparam().hash(&mut h);
        n.space().n_in().hash(&mut h);
        n.space().n_out().hash(&mut h);
        n.n_eq().hash(&mut h);
        n.n_ineq().hash(&mut h);
        n.n_div().hash(&mut h);
        for row in n.eq_rows() {
            row.hash(&mut h);
        }
        for row in n.ineq_rows() {
            row.hash(&mut h);
        }
        for div in n.div_rows() {
            if !div.is_unknown() {
                div.denom.hash(&mut h);
                div.expr.hash(&mut h);
            }
        }
        h.finish()
    }

    /// `dim_is_bounded`: an equality on the coordinate, or both a
    /// positive and a negative coefficient across the inequalities.
    pub fn dim_is_bounded(&self, col: usize) -> bool {
        if self.eq_rows().iter().any(|r| !r[col].is_zero()) {
            return true;
        }
        let mut has_pos = false;
        let mut has_neg = false;
        for r in self.ineq_rows() {
            use std::cmp::Ordering;
            match r[col].cmp(&BigInt::zero()) {
                Ordering::Greater => has_pos = true,
                Ordering::Less => has_neg = true,
                Ordering::Equal => {}
            }
        }
        has_pos && has_neg
    }

    /// For each target coordinate, push a bound into the tableau, test
    /// emptiness, and roll back: `+1` if forced negative, `-1` if forced
    /// positive, `0` if neither.
    pub fn vars_get_sign(&self, cols: &[usize]) -> Vec<i8> {
        let mut tab = tableau::Tab::from_basic_relation(self);
        let mut out = Vec::with_capacity(cols.len());
        for &col in cols {
            let width = self.0.width();
            let mut upper = vec![BigInt::zero(); width];
            upper[0] = BigInt::from(-1);
            upper[col] = BigInt::from(-1); // -1 - x_col >= 0  <=>  x_col <= -1
            let mark = tab.add_inequality(upper);
            let neg_forced = tab.is_empty();
            tab.rollback(mark);

            let mut lower = vec![BigInt::zero(); width];
            lower[0] = BigInt::from(-1);
            lower[col] = BigInt::from(1); // x_col - 1 >= 0 <=> x_col >= 1
            let mark = tab.add_inequality(lower);
            let pos_forced = tab.is_empty();
            tab.rollback(mark);

            out.push(if neg_forced {
                1
            } else if pos_forced {
                -1
            } else {
                0
            });
        }
        out
    }

    /// No divs, and every set (output) coordinate is constrained either by
    /// a single-variable equality or by at least one single-variable lower
    /// bound and one single-variable upper bound (coefficient `±1`).
    /// Parameter columns are not required to be boxed and may appear with
    /// a nonzero coefficient in a bounding row (e.g. `x <= N` for a
    /// parameter `N` is still a valid box bound).
    pub fn is_box(&self) -> bool {
        if self.n_div() > 0 {
            return false;
        }
        let out_off = self.space().offset(Component::Out);
        let n_out = self.space().n_out();
        for col in out_off..out_off + n_out {
            let eq_single = self.eq_rows().iter().any(|r| {
                r[col].abs() == BigInt::from(1)
                    && (out_off..out_off + n_out).all(|c| c == col || r[c].is_zero())
            });
            if eq_single {
                continue;
            }
            let mut lower = false;
            let mut upper = false;
            for r in self.ineq_rows() {
                if r[col].is_zero() || (out_off..out_off + n_out).any(|c| c != col && !r[c].is_zero()) {
                    continue;
                }
                if r[col] == BigInt::from(1) {
                    lower = true;
                } else if r[col] == BigInt::from(-1) {
                    upper = true;
                }
            }
            if !(lower && upper) {
                return false;
            }
        }
        true
    }
}
