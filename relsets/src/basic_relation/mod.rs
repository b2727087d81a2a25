//! Basic relation: a single convex integer polyhedron — equalities,
//! inequalities, and existentially quantified divs over one space.

mod alloc;
mod algebra;
mod div;
mod divs;
mod flags;
mod lex;
mod normalize;
mod predicates;

pub use div::DivRow;
pub use flags::BrFlags;

use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::mat::Mat;
use crate::space::Space;

/// `w(B) = 1 + total(space) + extra` — the row width shared by every
/// equality, inequality, and div-expr row.
pub(crate) fn row_width(space: &Space, extra: usize) -> usize {
    1 + space.total() + extra
}

#[derive(Debug, Clone)]
pub(crate) struct BasicRelationData {
    pub(crate) space: Space,
    pub(crate) mat: Mat,
    pub(crate) divs: Vec<DivRow>,
    pub(crate) extra: usize,
    pub(crate) flags: BrFlags,
    pub(crate) sample: Option<Vec<BigInt>>,
}

impl BasicRelationData {
    fn new(space: Space, extra: usize, n_eq: usize, n_ineq: usize) -> BasicRelationData {
        let width = row_width(&space, extra);
        BasicRelationData {
            space,
            mat: Mat::new(width, n_eq + n_ineq),
            divs: Vec::with_capacity(extra),
            extra,
            flags: BrFlags::empty(),
            sample: None,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.mat.width()
    }

    pub(crate) fn n_div(&self) -> usize {
        self.divs.len()
    }
}

/// A single convex integer polyhedron, reference-counted and
/// copy-on-write like every other value in this crate.
#[derive(Debug, Clone)]
pub struct BasicRelation(pub(crate) Rc<BasicRelationData>);

impl BasicRelation {
    pub fn space(&self) -> &Space {
        &self.0.space
    }

    pub fn n_eq(&self) -> usize {
        self.0.mat.n_eq()
    }
    pub fn n_ineq(&self) -> usize {
        self.0.mat.n_ineq()
    }
    pub fn n_div(&self) -> usize {
        self.0.n_div()
    }
    pub fn c_size(&self) -> usize {
        self.0.mat.c_size()
    }
    pub fn extra(&self) -> usize {
        self.0.extra
    }

    pub fn eq_rows(&self) -> &[Vec<BigInt>] {
        self.0.mat.eq_rows()
    }
    pub fn ineq_rows(&self) -> &[Vec<BigInt>] {
        self.0.mat.ineq_rows()
    }
    pub fn div_rows(&self) -> &[DivRow] {
        &self.0.divs
    }

    pub fn is_empty_flag(&self) -> bool {
        self.0.flags.contains(BrFlags::EMPTY)
    }
    pub fn is_rational(&self) -> bool {
        self.0.flags.contains(BrFlags::RATIONAL)
    }
    pub fn is_normalized(&self) -> bool {
        self.0.flags.contains(BrFlags::NORMALIZED)
    }

    /// `alloc(space, extra, n_eq, n_ineq)`: reserve row capacity.
    pub fn alloc(space: Space, extra: usize, n_eq: usize, n_ineq: usize) -> BasicRelation {
        BasicRelation(Rc::new(BasicRelationData::new(space, extra, n_eq, n_ineq)))
    }

    /// The full space, no constraints.
    pub fn universe(space: Space) -> BasicRelation {
        BasicRelation::alloc(space, 0, 0, 0)
    }

    /// The empty set: a single contradictory equality `1 = 0`.
    pub fn empty(space: Space) -> BasicRelation {
        let mut b = BasicRelation::alloc(space, 0, 1, 0);
        {
            let data = Rc::make_mut(&mut b.0);
            let width = data.width();
            let mut row = vec![BigInt::zero(); width];
            row[0] = BigInt::from(1);
            data.mat.add_eq(row).expect("fresh alloc has room");
            data.flags.insert(BrFlags::EMPTY | BrFlags::FINAL);
        }
        b
    }

    /// `cow`: clone iff shared; this is the mutation entry point every
    /// editor in [`alloc`](self) and [`algebra`](self) routes through.
    pub(crate) fn cow(&mut self) -> &mut BasicRelationData {
        Rc::make_mut(&mut self.0)
    }

    /// `dup`: always clone, regardless of the current reference count.
    pub fn dup(&self) -> BasicRelation {
        BasicRelation(Rc::new((*self.0).clone()))
    }

    pub(crate) fn from_data(data: BasicRelationData) -> BasicRelation {
        BasicRelation(Rc::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn universe_has_no_constraints() {
        let u = BasicRelation::universe(Space::alloc(0, 0, 2));
        assert_eq!(u.n_eq(), 0);
        assert_eq!(u.n_ineq(), 0);
    }

    #[test]
    fn empty_carries_contradictory_equality() {
        let e = BasicRelation::empty(Space::alloc(0, 0, 1));
        assert!(e.is_empty_flag());
        assert_eq!(e.n_eq(), 1);
    }

    #[test]
    fn cow_clones_only_when_shared() {
        let b = BasicRelation::universe(Space::alloc(0, 0, 1));
        let mut b2 = b.clone();
        assert_eq!(Rc::strong_count(&b2.0), 2);
        b2.cow();
        assert_eq!(Rc::strong_count(&b2.0), 1);
        assert_eq!(Rc::strong_count(&b.0), 1);
    }
}
