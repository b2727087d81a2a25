//! Put a basic relation into canonical form: eliminate unit-coefficient
//! equalities, drop redundant inequalities, then sort what remains so two
//! basic relations describing the same polyhedron compare byte-for-byte.

use super::flags::BrFlags;
use super::BasicRelation;
use crate::num::row;
use crate::solvers::gauss;

impl BasicRelation {
    /// `simplify`: Gaussian-eliminate the equality block, normalizing every
    /// row's content afterward. Does not touch redundancy or ordering.
    pub fn simplify(&self) -> BasicRelation {
        gauss::simplify(self)
    }

    /// Full normal form: simplify, drop redundant inequalities, sort both
    /// blocks lexicographically, and set the `NORMALIZED` flag so repeat
    /// calls are a no-op.
    pub fn normalize(&self) -> BasicRelation {
        if self.is_normalized() {
            return self.clone();
        }
        let simplified = self.simplify();
        if simplified.is_empty_flag() {
            return simplified;
        }
        let mut out = gauss::remove_redundant(&simplified);
        {
            let data = out.cow();
            data.mat.eq_rows_mut().sort_by(|a, b| row::lex_cmp(a, b));
            data.mat.ineq_rows_mut().sort_by(|a, b| row::lex_cmp(a, b));
            data.flags.insert(BrFlags::NORMALIZED | BrFlags::NO_REDUNDANT);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;
    use num_bigint::BigInt;

    #[test]
    fn normalize_sorts_and_dedupes_implied_inequality() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap(); // x >= 0
        b.add_ineq(vec![BigInt::from(1), BigInt::from(1)]).unwrap(); // x >= -1 (redundant)
        let n = b.normalize();
        assert_eq!(n.n_ineq(), 1);
        assert!(n.is_normalized());
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap();
        let once = b.normalize();
        let twice = once.normalize();
        assert_eq!(once.ineq_rows(), twice.ineq_rows());
    }
}
