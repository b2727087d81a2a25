//! `Set`: a relation shape-restricted to `n_in == 0` — a finite union of
//! [`BasicSet`]s. As with `BasicSet`, every operation delegates to
//! [`Relation`] and re-checks the shape invariant on the way back out.

use num_bigint::BigInt;

use crate::basic_set::BasicSet;
use crate::ctx::Ctx;
use crate::relation::Relation;
use crate::space::{Component, Space};

#[derive(Debug, Clone)]
pub struct Set(Relation);

impl Set {
    pub fn new(r: Relation) -> Option<Set> {
        if r.space().is_set() {
            Some(Set(r))
        } else {
            None
        }
    }

    pub fn as_relation(&self) -> &Relation {
        &self.0
    }

    pub fn into_relation(self) -> Relation {
        self.0
    }

    pub fn space(&self) -> &Space {
        self.0.space()
    }

    pub fn n(&self) -> usize {
        self.0.n()
    }

    pub fn empty(space: Space) -> Option<Set> {
        Set::new(Relation::empty(space))
    }

    pub fn universe(space: Space) -> Option<Set> {
        Set::new(Relation::universe(space))
    }

    pub fn from_basic_set(b: BasicSet) -> Set {
        Set(Relation::from_basic(b.into_basic_relation()))
    }

    pub fn fast_is_empty(&self) -> bool {
        self.0.fast_is_empty()
    }

    pub fn is_empty(&self, ctx: &Ctx) -> bool {
        self.0.is_empty(ctx)
    }

    pub fn fast_is_equal(&self, other: &Set) -> bool {
        self.0.fast_is_equal(&other.0)
    }

    pub fn union(&self, other: &Set) -> Option<Set> {
        Set::new(self.0.union(&other.0)?)
    }

    pub fn union_disjoint(&self, other: &Set) -> Option<Set> {
        Set::new(self.0.union_disjoint(&other.0)?)
    }

    pub fn intersect(&self, other: &Set, ctx: &Ctx) -> Option<Set> {
        Set::new(self.0.intersect(&other.0, ctx)?)
    }

    pub fn sum(&self, other: &Set) -> Option<Set> {
        Set::new(self.0.sum(&other.0)?)
    }

    /// Cartesian product: the combined space still has `n_in == 0`.
    pub fn product(&self, other: &Set) -> Option<Set> {
        Set::new(self.0.product(&other.0)?)
    }

    pub fn neg(&self) -> Set {
        Set(self.0.neg())
    }

    pub fn floor_div(&self, d: BigInt) -> Option<Set> {
        Set::new(self.0.floor_div(d)?)
    }

    pub fn fix(&self, pos: usize, v: BigInt) -> Set {
        Set(self.0.fix(Component::Out, pos, v))
    }

    pub fn lower_bound(&self, pos: usize, v: BigInt) -> Set {
        Set(self.0.lower_bound(Component::Out, pos, v))
    }

    pub fn project_out(&self, pos: usize, n: usize) -> Set {
        Set(self.0.project_out(Component::Out, pos, n))
    }

    pub fn normalize(&self) -> Set {
        Set(self.0.normalize())
    }

    pub fn remove_empty_parts(&self) -> Set {
        Set(self.0.remove_empty_parts())
    }

    pub fn compute_divs(&self, ctx: &Ctx) -> Set {
        Set(self.0.compute_divs(ctx))
    }

    pub fn lexmin(&self, ctx: &Ctx) -> Set {
        Set(self.0.lexmin(ctx))
    }

    pub fn lexmax(&self, ctx: &Ctx) -> Set {
        Set(self.0.lexmax(ctx))
    }

    pub fn parts(&self) -> Vec<BasicSet> {
        self.0.parts().iter().filter_map(|p| BasicSet::new(p.clone())).collect()
    }
}
