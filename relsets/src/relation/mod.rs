//! Relation: a finite disjunction of basic relations sharing one space.
//!
//! Mirrors [`crate::basic_relation`]'s reference-counted, copy-on-write
//! discipline one level up: a `Relation` owns an ordered list of
//! [`BasicRelation`]s and two flags tracking whether that list is known
//! pairwise-disjoint and/or in canonical (sorted, deduped) order.

mod algebra;
mod lex;

use std::rc::Rc;

use bitflags::bitflags;

use crate::basic_relation::BasicRelation;
use crate::space::Space;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RFlags: u8 {
        const DISJOINT   = 1 << 0;
        const NORMALIZED = 1 << 1;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RelationData {
    pub(crate) space: Space,
    pub(crate) parts: Vec<BasicRelation>,
    pub(crate) flags: RFlags,
}

/// A finite union of basic relations, all over the same [`Space`].
#[derive(Debug, Clone)]
pub struct Relation(pub(crate) Rc<RelationData>);

impl Relation {
    pub fn space(&self) -> &Space {
        &self.0.space
    }

    pub fn n(&self) -> usize {
        self.0.parts.len()
    }

    pub fn parts(&self) -> &[BasicRelation] {
        &self.0.parts
    }

    pub fn is_disjoint_flag(&self) -> bool {
        self.0.flags.contains(RFlags::DISJOINT)
    }

    pub fn is_normalized(&self) -> bool {
        self.0.flags.contains(RFlags::NORMALIZED)
    }

    pub(crate) fn cow(&mut self) -> &mut RelationData {
        Rc::make_mut(&mut self.0)
    }

    pub fn dup(&self) -> Relation {
        Relation(Rc::new((*self.0).clone()))
    }

    pub(crate) fn from_parts(space: Space, parts: Vec<BasicRelation>, flags: RFlags) -> Relation {
        Relation(Rc::new(RelationData { space, parts, flags }))
    }

    /// No basic relations at all: the empty union.
    pub fn empty(space: Space) -> Relation {
        Relation::from_parts(space, Vec::new(), RFlags::DISJOINT | RFlags::NORMALIZED)
    }

    /// A single part, the full space.
    pub fn universe(space: Space) -> Relation {
        let b = BasicRelation::universe(space.clone());
        Relation::from_parts(space, vec![b], RFlags::DISJOINT)
    }

    /// Wrap one basic relation; a fast-empty part yields [`Relation::empty`].
    pub fn from_basic(b: BasicRelation) -> Relation {
        let space = b.space().clone();
        if b.fast_is_empty() {
            return Relation::empty(space);
        }
        Relation::from_parts(space, vec![b], RFlags::DISJOINT)
    }

    /// Reserve room for `n_hint` parts up front.
    pub fn alloc(space: Space, n_hint: usize) -> Relation {
        Relation::from_parts(space, Vec::with_capacity(n_hint), RFlags::DISJOINT | RFlags::NORMALIZED)
    }

    /// Append `b`, dropping it if fast-empty. Requires `b`'s space to
    /// match `self`'s; clears `NORMALIZED` on an actual append.
    pub fn add_basic(&self, b: BasicRelation) -> Option<Relation> {
        if !self.space().equal(b.space()) {
            return None;
        }
        if b.fast_is_empty() {
            return Some(self.dup());
        }
        let mut out = self.dup();
        {
            let data = out.cow();
            data.parts.push(b);
            data.flags.remove(RFlags::NORMALIZED);
        }
        Some(out)
    }

    pub fn fast_is_empty(&self) -> bool {
        self.n() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn empty_has_no_parts() {
        let r = Relation::empty(Space::alloc_set(0, 1));
        assert_eq!(r.n(), 0);
        assert!(r.fast_is_empty());
    }

    #[test]
    fn add_basic_rejects_space_mismatch() {
        let r = Relation::universe(Space::alloc_set(0, 1));
        let b = BasicRelation::universe(Space::alloc_set(0, 2));
        assert!(r.add_basic(b).is_none());
    }

    #[test]
    fn add_basic_drops_fast_empty() {
        let r = Relation::alloc(Space::alloc_set(0, 1), 0);
        let e = BasicRelation::empty(Space::alloc_set(0, 1));
        let r = r.add_basic(e).unwrap();
        assert_eq!(r.n(), 0);
    }
}
