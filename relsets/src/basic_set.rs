//! `BasicSet`: a basic relation shape-restricted to `n_in == 0`, i.e. a
//! single convex integer polyhedron with no input tuple — a plain set of
//! points over parameters and one output tuple.
//!
//! This is a thin wrapper, not a parallel implementation: every operation
//! delegates to [`BasicRelation`] and re-checks the `n_in == 0` shape on
//! the way back out.

use num_bigint::BigInt;

use crate::basic_relation::BasicRelation;
use crate::ctx::Ctx;
use crate::space::{Component, Space};

#[derive(Debug, Clone)]
pub struct BasicSet(BasicRelation);

impl BasicSet {
    /// Wrap `b`, requiring `b.space().is_set()`.
    pub fn new(b: BasicRelation) -> Option<BasicSet> {
        if b.space().is_set() {
            Some(BasicSet(b))
        } else {
            None
        }
    }

    pub fn as_basic_relation(&self) -> &BasicRelation {
        &self.0
    }

    pub fn into_basic_relation(self) -> BasicRelation {
        self.0
    }

    pub fn space(&self) -> &Space {
        self.0.space()
    }

    pub fn universe(space: Space) -> Option<BasicSet> {
        BasicSet::new(BasicRelation::universe(space))
    }

    pub fn empty(space: Space) -> Option<BasicSet> {
        BasicSet::new(BasicRelation::empty(space))
    }

    pub fn positive_orthant(space: Space) -> Option<BasicSet> {
        BasicSet::new(BasicRelation::positive_orthant(space)?)
    }

    pub fn interval(space: Space, lo: BigInt, hi: BigInt) -> Option<BasicSet> {
        BasicSet::new(BasicRelation::interval(space, lo, hi)?)
    }

    pub fn contains(&self, x: &[BigInt]) -> bool {
        self.0.contains(x)
    }

    pub fn fast_is_empty(&self) -> bool {
        self.0.fast_is_empty()
    }

    pub fn is_empty(&self, ctx: &Ctx) -> bool {
        self.0.is_empty(ctx)
    }

    pub fn is_empty_mut(&mut self, ctx: &Ctx) -> bool {
        self.0.is_empty_mut(ctx)
    }

    pub fn fast_is_equal(&self, other: &BasicSet) -> bool {
        self.0.fast_is_equal(&other.0)
    }

    pub fn is_box(&self) -> bool {
        self.0.is_box()
    }

    pub fn dim_is_bounded(&self, col: usize) -> bool {
        self.0.dim_is_bounded(col)
    }

    pub fn vars_get_sign(&self, cols: &[usize]) -> Vec<i8> {
        self.0.vars_get_sign(cols)
    }

    pub fn intersect(&self, other: &BasicSet, ctx: &Ctx) -> Option<BasicSet> {
        BasicSet::new(self.0.intersect(&other.0, ctx)?)
    }

    pub fn fix(&self, pos: usize, v: BigInt) -> BasicSet {
        BasicSet(self.0.fix(Component::Out, pos, v))
    }

    pub fn lower_bound(&self, pos: usize, v: BigInt) -> BasicSet {
        BasicSet(self.0.lower_bound(Component::Out, pos, v))
    }

    pub fn project_out(&self, pos: usize, n: usize) -> BasicSet {
        BasicSet(self.0.project_out(Component::Out, pos, n))
    }

    pub fn normalize(&self) -> BasicSet {
        BasicSet(self.0.normalize())
    }

    /// Flatten onto a raw matrix space, losing named structure.
    pub fn underlying_set(&self) -> BasicSet {
        BasicSet(self.0.underlying_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn new_rejects_relations_with_input_dims() {
        let r = BasicRelation::universe(Space::alloc(0, 1, 1));
        assert!(BasicSet::new(r).is_none());
    }

    #[test]
    fn interval_contains_its_bounds() {
        let s = BasicSet::interval(Space::alloc_set(0, 1), BigInt::from(0), BigInt::from(3)).unwrap();
        assert!(s.contains(&[BigInt::from(1), BigInt::from(3)]));
        assert!(!s.contains(&[BigInt::from(1), BigInt::from(4)]));
    }
}
