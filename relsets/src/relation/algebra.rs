//! Relation algebra: every operation here distributes a basic-relation
//! operation across one or both operand's parts, then collects the
//! non-empty results into a fresh `Relation`.

use num_bigint::BigInt;

use super::{RFlags, Relation};
use crate::basic_relation::BasicRelation;
use crate::ctx::Ctx;
use crate::space::{Component, Space};

/// Collect the non-fast-empty results of a pairwise distribution into one
/// relation over `space`, with the given flags.
fn collect(space: Space, parts: Vec<BasicRelation>, flags: RFlags) -> Relation {
    let parts: Vec<BasicRelation> = parts.into_iter().filter(|p| !p.fast_is_empty()).collect();
    Relation::from_parts(space, parts, flags)
}

impl Relation {
    /// Concatenate both operand's parts. Requires equal spaces. Preserves
    /// DISJOINT only when both operands already had it.
    pub fn union_disjoint(&self, other: &Relation) -> Option<Relation> {
        if !self.space().equal(other.space()) {
            return None;
        }
        let mut parts = Vec::with_capacity(self.n() + other.n());
        parts.extend(self.parts().iter().cloned());
        parts.extend(other.parts().iter().cloned());
        let flags = if self.is_disjoint_flag() && other.is_disjoint_flag() {
            RFlags::DISJOINT
        } else {
            RFlags::empty()
        };
        Some(collect(self.space().clone(), parts, flags))
    }

    /// As [`union_disjoint`](Self::union_disjoint), but clears DISJOINT
    /// whenever the result ends up with more than one part.
    pub fn union(&self, other: &Relation) -> Option<Relation> {
        let u = self.union_disjoint(other)?;
        if u.n() > 1 {
            let mut out = u.dup();
            out.cow().flags.remove(RFlags::DISJOINT);
            Some(out)
        } else {
            Some(u)
        }
    }

    /// `m*n` pairwise intersections, discarding empties. DISJOINT carried
    /// iff both operands had it.
    pub fn intersect(&self, other: &Relation, ctx: &Ctx) -> Option<Relation> {
        if self.fast_is_empty() {
            return Some(self.dup());
        }
        if other.fast_is_empty() {
            return Some(other.dup());
        }
        let mut parts = Vec::with_capacity(self.n() * other.n());
        let mut space = None;
        for p in self.parts() {
            for q in other.parts() {
                if let Some(r) = p.intersect(q, ctx) {
                    space.get_or_insert_with(|| r.space().clone());
                    parts.push(r);
                }
            }
        }
        let space = space.unwrap_or_else(|| self.space().clone());
        let flags = if self.is_disjoint_flag() && other.is_disjoint_flag() {
            RFlags::DISJOINT
        } else {
            RFlags::empty()
        };
        Some(collect(space, parts, flags))
    }

    /// Distribute `intersect_domain` across both part lists.
    pub fn intersect_domain(&self, bset: &Relation, ctx: &Ctx) -> Option<Relation> {
        let mut parts = Vec::with_capacity(self.n() * bset.n());
        for p in self.parts() {
            for q in bset.parts() {
                if let Some(r) = p.intersect_domain(q, ctx) {
                    parts.push(r);
                }
            }
        }
        Some(collect(self.space().clone(), parts, RFlags::empty()))
    }

    /// Distribute `intersect_range` across both part lists.
    pub fn intersect_range(&self, bset: &Relation, ctx: &Ctx) -> Option<Relation> {
        let mut parts = Vec::with_capacity(self.n() * bset.n());
        for p in self.parts() {
            for q in bset.parts() {
                if let Some(r) = p.intersect_range(q, ctx) {
                    parts.push(r);
                }
            }
        }
        Some(collect(self.space().clone(), parts, RFlags::empty()))
    }

    /// Compose every part of `self` with every part of `other`.
    pub fn apply_range(&self, other: &Relation, ctx: &Ctx) -> Option<Relation> {
        let space = self.space().join(other.space())?;
        let mut parts = Vec::with_capacity(self.n() * other.n());
        for p in self.parts() {
            for q in other.parts() {
                if let Some(r) = p.apply_range(q, ctx) {
                    parts.push(r);
                }
            }
        }
        Some(collect(space, parts, RFlags::empty()))
    }

    pub fn apply_domain(&self, other: &Relation, ctx: &Ctx) -> Option<Relation> {
        let rev = self.reverse();
        let composed = rev.apply_range(other, ctx)?;
        Some(composed.reverse())
    }

    /// Cartesian product of every pair of parts.
    pub fn product(&self, other: &Relation) -> Option<Relation> {
        let space = self.space().product(other.space())?;
        let mut parts = Vec::with_capacity(self.n() * other.n());
        for p in self.parts() {
            for q in other.parts() {
                if let Some(r) = p.product(q) {
                    parts.push(r);
                }
            }
        }
        Some(collect(space, parts, RFlags::empty()))
    }

    /// Coordinatewise sum of every pair of parts (same space required).
    pub fn sum(&self, other: &Relation) -> Option<Relation> {
        if !self.space().equal(other.space()) {
            return None;
        }
        let mut parts = Vec::with_capacity(self.n() * other.n());
        for p in self.parts() {
            for q in other.parts() {
                if let Some(r) = p.sum(q) {
                    parts.push(r);
                }
            }
        }
        Some(collect(self.space().clone(), parts, RFlags::empty()))
    }

    pub fn neg(&self) -> Relation {
        let parts = self.parts().iter().map(|p| p.neg()).collect();
        collect(self.space().clone(), parts, self.0.flags)
    }

    /// Distribute floor-division by `d` across all parts.
    pub fn floor_div(&self, d: BigInt) -> Option<Relation> {
        let mut parts = Vec::with_capacity(self.n());
        for p in self.parts() {
            parts.push(p.floor_div(d.clone())?);
        }
        Some(collect(self.space().clone(), parts, self.0.flags & RFlags::DISJOINT))
    }

    pub fn reverse(&self) -> Relation {
        let space = self.space().reverse();
        let parts = self.parts().iter().map(|p| p.reverse()).collect();
        collect(space, parts, self.0.flags)
    }

    /// Project out the output tuple, per part.
    pub fn domain(&self) -> Relation {
        let space = self.space().domain();
        let n_out = self.space().n_out();
        let parts = self
            .parts()
            .iter()
            .map(|p| p.project_out(Component::Out, 0, n_out))
            .collect();
        collect(space, parts, RFlags::empty())
    }

    /// Project out the input tuple, per part.
    pub fn range(&self) -> Relation {
        let space = self.space().range();
        let n_in = self.space().n_in();
        let parts = self
            .parts()
            .iter()
            .map(|p| p.project_out(Component::In, 0, n_in))
            .collect();
        collect(space, parts, RFlags::empty())
    }

    /// `range(R) - domain(R)`, one term `d_k = out_k - in_k` at a time.
    /// Requires every part to have `n_in == n_out`.
    pub fn deltas(&self) -> Option<Relation> {
        let mut parts = Vec::with_capacity(self.n());
        let mut space = None;
        for p in self.parts() {
            let d = p.deltas()?;
            space.get_or_insert_with(|| d.space().clone());
            parts.push(d);
        }
        let space = space.unwrap_or_else(|| Space::alloc_set(self.space().nparam(), self.space().n_in()));
        Some(collect(space, parts, RFlags::empty()))
    }

    pub fn fix(&self, c: Component, pos: usize, v: BigInt) -> Relation {
        let parts = self.parts().iter().map(|p| p.fix(c, pos, v.clone())).collect();
        collect(self.space().clone(), parts, RFlags::empty())
    }

    pub fn fix_si(&self, c: Component, pos: usize, v: i64) -> Relation {
        self.fix(c, pos, BigInt::from(v))
    }

    pub fn lower_bound(&self, c: Component, pos: usize, v: BigInt) -> Relation {
        let parts = self.parts().iter().map(|p| p.lower_bound(c, pos, v.clone())).collect();
        collect(self.space().clone(), parts, RFlags::empty())
    }

    /// `{ x -> x }` as a single-part relation.
    pub fn identity(space: Space) -> Option<Relation> {
        let b = BasicRelation::identity(space)?;
        Some(Relation::from_basic(b))
    }

    pub fn move_dims(&self, c1: Component, pos1: usize, n: usize, c2: Component, pos2: usize) -> Relation {
        let space = self.space().move_dims(c1, n, c2);
        let parts = self.parts().iter().map(|p| p.move_dims(c1, pos1, n, c2, pos2)).collect();
        collect(space, parts, RFlags::empty())
    }

    pub fn insert(&self, c: Component, pos: usize, n: usize) -> Relation {
        let space = self.space().insert(c, n);
        let parts = self.parts().iter().map(|p| p.insert(c, pos, n)).collect();
        collect(space, parts, RFlags::empty())
    }

    /// Append `n` fresh dims of kind `c` after the existing ones.
    pub fn add(&self, c: Component, n: usize) -> Relation {
        self.insert(c, self.space().size(c), n)
    }

    pub fn project_out(&self, c: Component, pos: usize, n: usize) -> Relation {
        let space = self.space().drop(c, n);
        let parts = self.parts().iter().map(|p| p.project_out(c, pos, n)).collect();
        collect(space, parts, RFlags::empty())
    }

    /// `remove` and `project_out` coincide at the basic-relation level, so
    /// they coincide here too.
    pub fn remove(&self, c: Component, pos: usize, n: usize) -> Relation {
        self.project_out(c, pos, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;
    use num_bigint::BigInt;

    #[test]
    fn union_of_two_intervals_has_two_parts() {
        let space = Space::alloc_set(0, 1);
        let lo = BasicRelation::interval(space.clone(), BigInt::from(0), BigInt::from(2)).unwrap();
        let hi = BasicRelation::interval(space.clone(), BigInt::from(10), BigInt::from(12)).unwrap();
        let r = Relation::from_basic(lo).union(&Relation::from_basic(hi)).unwrap();
        assert_eq!(r.n(), 2);
        assert!(!r.is_disjoint_flag());
    }

    #[test]
    fn intersect_of_disjoint_intervals_is_empty() {
        let space = Space::alloc_set(0, 1);
        let lo = BasicRelation::interval(space.clone(), BigInt::from(0), BigInt::from(2)).unwrap();
        let hi = BasicRelation::interval(space.clone(), BigInt::from(10), BigInt::from(12)).unwrap();
        let ctx = Ctx::new();
        let r = Relation::from_basic(lo).intersect(&Relation::from_basic(hi), &ctx).unwrap();
        assert!(r.fast_is_empty());
    }

    #[test]
    fn domain_and_range_project_opposite_tuples() {
        let space = Space::alloc(0, 1, 1);
        let id = Relation::identity(space).unwrap();
        assert_eq!(id.domain().space().n_out(), 1);
        assert_eq!(id.domain().space().n_in(), 0);
        assert_eq!(id.range().space().n_out(), 1);
    }
}
