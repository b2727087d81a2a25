//! Emptiness/equality at the relation level, normalization, div
//! re-derivation, and lexicographic optimization over a union of parts.

use std::cmp::Ordering;

use super::{RFlags, Relation};
use crate::basic_relation::BasicRelation;
use crate::ctx::{Ctx, ParametricBackend};
use crate::num::row;
use crate::solvers::pip::{self, PipResult};
use crate::solvers::tableau;

impl Relation {
    /// Conjunction of `is_empty` over every part.
    pub fn is_empty(&self, ctx: &Ctx) -> bool {
        self.parts().iter().all(|p| p.is_empty(ctx))
    }

    /// Normalize both sides, compare part counts, then pairwise
    /// `fast_is_equal`.
    pub fn fast_is_equal(&self, other: &Relation) -> bool {
        let a = self.normalize();
        let b = other.normalize();
        a.n() == b.n() && a.parts().iter().zip(b.parts().iter()).all(|(x, y)| x.fast_is_equal(y))
    }

    /// Per-part normalize, total-sort with a tie-breaking comparator, then
    /// drop adjacent duplicates.
    pub fn normalize(&self) -> Relation {
        if self.is_normalized() {
            return self.clone();
        }
        let mut parts: Vec<BasicRelation> = self.parts().iter().map(|p| p.normalize()).collect();
        parts.sort_by(basic_cmp);
        parts.dedup_by(|a, b| basic_cmp(a, b) == Ordering::Equal);
        let flags = RFlags::NORMALIZED | if parts.len() <= 1 { RFlags::DISJOINT } else { RFlags::empty() };
        Relation::from_parts(self.space().clone(), parts, flags)
    }

    /// Walk from the tail dropping EMPTY-flagged parts; clears NORMALIZED
    /// if the surviving order differs from the original.
    pub fn remove_empty_parts(&self) -> Relation {
        let mut changed = false;
        let mut parts = Vec::with_capacity(self.n());
        for p in self.parts() {
            if p.is_empty_flag() {
                changed = true;
            } else {
                parts.push(p.clone());
            }
        }
        let flags = if changed {
            self.0.flags & !RFlags::NORMALIZED
        } else {
            self.0.flags
        };
        Relation::from_parts(self.space().clone(), parts, flags)
    }

    /// If every div of every part is known, return unchanged. Otherwise
    /// cheaply normalize (Gaussian elimination already resolves some
    /// divs); any div still unknown after that is left unknown — this
    /// engine does not implement the full re-parameterized-projection
    /// re-derivation a production PIP engine would use here. See
    /// DESIGN.md.
    pub fn compute_divs(&self, _ctx: &Ctx) -> Relation {
        let all_known = self.parts().iter().all(|p| p.div_rows().iter().all(|d| !d.is_unknown()));
        if all_known {
            return self.dup();
        }
        let parts = self.parts().iter().map(|p| p.normalize()).collect();
        Relation::from_parts(self.space().clone(), parts, RFlags::empty())
    }

    /// Lexicographically optimize each part's output tuple independently
    /// and union the results; `D` (if given) restricts the domain first.
    /// This is a union-of-per-part-optima simplification of the full
    /// recursive algorithm: when two parts' domains overlap, both
    /// contribute an image rather than only the one that truly wins,
    /// wrong only where such overlaps exist with differing optima. See
    /// DESIGN.md.
    pub fn partial_lex_opt(&self, domain: Option<&Relation>, ctx: &Ctx, maximize: bool) -> (Relation, Relation) {
        let restricted: Vec<BasicRelation> = match domain {
            None => self.parts().to_vec(),
            Some(d) => self
                .parts()
                .iter()
                .flat_map(|p| d.parts().iter().filter_map(move |q| p.intersect_domain(q, ctx)))
                .collect(),
        };

        let mut lex_parts = Vec::with_capacity(restricted.len());
        for b in &restricted {
            let result = match ctx.backend {
                ParametricBackend::ParametricIntegerProgram => pip::lex_opt(b, ctx, maximize),
                ParametricBackend::SimplexTableau => tableau::lex_opt(b, ctx, maximize),
            };
            if let PipResult::Optimum(opt) = result {
                lex_parts.push(opt);
            }
        }

        let lex = Relation::from_parts(self.space().clone(), lex_parts, RFlags::empty());
        let domain_space = self.space().domain();
        let full_domain = match domain {
            Some(d) => d.dup(),
            None => Relation::universe(domain_space),
        };
        // A faithful residual would be `full_domain - domain(lex)`, which
        // needs set difference this engine does not implement (see the
        // module doc comment). Approximate: no residual once at least one
        // part produced an optimum, the whole domain otherwise.
        let empty = if lex.fast_is_empty() {
            full_domain
        } else {
            Relation::empty(self.space().domain())
        };
        (lex, empty)
    }

    pub fn lexmin(&self, ctx: &Ctx) -> Relation {
        self.partial_lex_opt(None, ctx, false).0
    }

    pub fn lexmax(&self, ctx: &Ctx) -> Relation {
        self.partial_lex_opt(None, ctx, true).0
    }
}

/// Tie-break order used by `normalize`: space counts first (constant
/// across one relation's parts but kept for parity with the per-basic
/// comparator), then emptiness, then row counts, then the rows
/// themselves lexicographically.
fn basic_cmp(a: &BasicRelation, b: &BasicRelation) -> Ordering {
    a.space()
        .total()
        .cmp(&b.space().total())
        .then(a.is_empty_flag().cmp(&b.is_empty_flag()))
        .then(a.n_eq().cmp(&b.n_eq()))
        .then(a.n_ineq().cmp(&b.n_ineq()))
        .then(a.n_div().cmp(&b.n_div()))
        .then_with(|| rows_cmp(a.eq_rows(), b.eq_rows()))
        .then_with(|| rows_cmp(a.ineq_rows(), b.ineq_rows()))
        .then_with(|| {
            a.div_rows()
                .iter()
                .map(|d| &d.expr)
                .zip(b.div_rows().iter().map(|d| &d.expr))
                .fold(Ordering::Equal, |acc, (x, y)| acc.then(row::lex_cmp(x, y)))
        })
}

fn rows_cmp(a: &[Vec<num_bigint::BigInt>], b: &[Vec<num_bigint::BigInt>]) -> Ordering {
    a.iter().zip(b.iter()).fold(Ordering::Equal, |acc, (x, y)| acc.then(row::lex_cmp(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;
    use num_bigint::BigInt;

    #[test]
    fn normalize_dedupes_identical_parts() {
        let space = Space::alloc_set(0, 1);
        let a = BasicRelation::interval(space.clone(), BigInt::from(0), BigInt::from(5)).unwrap();
        let b = BasicRelation::interval(space.clone(), BigInt::from(0), BigInt::from(5)).unwrap();
        let r = Relation::from_basic(a).union_disjoint(&Relation::from_basic(b)).unwrap();
        let n = r.normalize();
        assert_eq!(n.n(), 1);
        assert!(n.is_normalized());
    }

    #[test]
    fn remove_empty_parts_drops_empty_flagged() {
        let space = Space::alloc_set(0, 1);
        let ok = BasicRelation::interval(space.clone(), BigInt::from(0), BigInt::from(5)).unwrap();
        let e = BasicRelation::empty(space.clone());
        let r = Relation::from_parts(space, vec![ok, e], RFlags::empty());
        let cleaned = r.remove_empty_parts();
        assert_eq!(cleaned.n(), 1);
    }

    #[test]
    fn lexmin_over_single_part_matches_basic_pip() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap();
        b.add_ineq(vec![BigInt::from(5), BigInt::from(-1)]).unwrap();
        let r = Relation::from_basic(b);
        let ctx = Ctx::new();
        let min = r.lexmin(&ctx);
        assert_eq!(min.n(), 1);
        assert!(min.parts()[0].contains(&[BigInt::from(1), BigInt::from(0)]));
    }

    #[test]
    fn lexmax_with_tableau_backend_matches_pip_backend() {
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap();
        b.add_ineq(vec![BigInt::from(5), BigInt::from(-1)]).unwrap();
        let r = Relation::from_basic(b);

        let pip_ctx = Ctx::with_backend(ParametricBackend::ParametricIntegerProgram);
        let tableau_ctx = Ctx::with_backend(ParametricBackend::SimplexTableau);
        let pip_max = r.lexmax(&pip_ctx);
        let tableau_max = r.lexmax(&tableau_ctx);
        assert!(pip_max.fast_is_equal(&tableau_max));
        assert!(tableau_max.parts()[0].contains(&[BigInt::from(1), BigInt::from(5)]));
    }
}
