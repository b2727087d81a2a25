//! Space descriptor: the immutable shape shared by a basic relation and
//! every basic relation in a relation's part list.

use std::fmt;
use std::rc::Rc;

/// A column-group a space divides its variables into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Param,
    In,
    Out,
    Div,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SpaceData {
    nparam: usize,
    n_in: usize,
    n_out: usize,
    names: Option<Names>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Names {
    param: Vec<Option<String>>,
    in_: Vec<Option<String>>,
    out: Vec<Option<String>>,
}

/// Immutable, reference-counted shape descriptor.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Space(Rc<SpaceData>);

impl fmt::Debug for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Space")
            .field("nparam", &self.0.nparam)
            .field("n_in", &self.0.n_in)
            .field("n_out", &self.0.n_out)
            .finish()
    }
}

impl Space {
    pub fn alloc(nparam: usize, n_in: usize, n_out: usize) -> Space {
        Space(Rc::new(SpaceData {
            nparam,
            n_in,
            n_out,
            names: None,
        }))
    }

    pub fn alloc_set(nparam: usize, n_dim: usize) -> Space {
        Space::alloc(nparam, 0, n_dim)
    }

    pub fn nparam(&self) -> usize {
        self.0.nparam
    }
    pub fn n_in(&self) -> usize {
        self.0.n_in
    }
    pub fn n_out(&self) -> usize {
        self.0.n_out
    }

    pub fn is_set(&self) -> bool {
        self.0.n_in == 0
    }

    /// Total variable count excluding the constant column: `nparam + n_in +
    /// n_out`.
    pub fn total(&self) -> usize {
        self.0.nparam + self.0.n_in + self.0.n_out
    }

    pub fn size(&self, c: Component) -> usize {
        match c {
            Component::Param => self.0.nparam,
            Component::In => self.0.n_in,
            Component::Out => self.0.n_out,
            Component::Div => 0,
        }
    }

    /// Column offset (1-based, after the constant column) where component
    /// `c` begins.
    pub fn offset(&self, c: Component) -> usize {
        match c {
            Component::Param => 1,
            Component::In => 1 + self.0.nparam,
            Component::Out => 1 + self.0.nparam + self.0.n_in,
            Component::Div => 1 + self.total(),
        }
    }

    pub fn equal(&self, other: &Space) -> bool {
        self.0.nparam == other.0.nparam && self.0.n_in == other.0.n_in && self.0.n_out == other.0.n_out
    }

    /// `match` on a single component between two spaces (renamed from the
    /// C `isl_space_match` to avoid the `match` keyword).
    pub fn matches(&self, c1: Component, other: &Space, c2: Component) -> bool {
        self.size(c1) == other.size(c2)
    }

    /// Swap input and output tuples.
    pub fn reverse(&self) -> Space {
        Space::alloc(self.0.nparam, self.0.n_out, self.0.n_in)
    }

    /// Drop the output tuple, move the input tuple into the output tuple
    /// slot — the space of `domain(R)` as a set.
    pub fn domain(&self) -> Space {
        Space::alloc_set(self.0.nparam, self.0.n_in)
    }

    /// The space of `range(R)` as a set.
    pub fn range(&self) -> Space {
        Space::alloc_set(self.0.nparam, self.0.n_out)
    }

    /// Concatenate two spaces' tuples of the same kind (relational product).
    pub fn product(&self, other: &Space) -> Option<Space> {
        if self.0.nparam != other.0.nparam {
            return None;
        }
        Some(Space::alloc(
            self.0.nparam,
            self.0.n_in + other.0.n_in,
            self.0.n_out + other.0.n_out,
        ))
    }

    /// The common space `{params} -> {in(self) -> out(other)}` used by
    /// apply_range/apply_domain composition.
    pub fn join(&self, other: &Space) -> Option<Space> {
        if self.0.nparam != other.0.nparam || self.0.n_out != other.0.n_in {
            return None;
        }
        Some(Space::alloc(self.0.nparam, self.0.n_in, other.0.n_out))
    }

    pub fn extend(&self, c: Component, n: usize) -> Space {
        match c {
            Component::Param => Space::alloc(self.0.nparam + n, self.0.n_in, self.0.n_out),
            Component::In => Space::alloc(self.0.nparam, self.0.n_in + n, self.0.n_out),
            Component::Out => Space::alloc(self.0.nparam, self.0.n_in, self.0.n_out + n),
            Component::Div => self.clone(),
        }
    }

    pub fn drop(&self, c: Component, n: usize) -> Space {
        match c {
            Component::Param => Space::alloc(self.0.nparam.saturating_sub(n), self.0.n_in, self.0.n_out),
            Component::In => Space::alloc(self.0.nparam, self.0.n_in.saturating_sub(n), self.0.n_out),
            Component::Out => Space::alloc(self.0.nparam, self.0.n_in, self.0.n_out.saturating_sub(n)),
            Component::Div => self.clone(),
        }
    }

    pub fn insert(&self, c: Component, n: usize) -> Space {
        self.extend(c, n)
    }

    /// `move` n dims of component `c` into the same relative layout of
    /// component `c2` — the space only changes its component sizes; the
    /// dim-map handles the column rewrite.
    pub fn move_dims(&self, c1: Component, n: usize, c2: Component) -> Space {
        self.drop(c1, n).extend(c2, n)
    }

    pub fn set_name(&mut self, c: Component, pos: usize, name: impl Into<String>) {
        let data = Rc::make_mut(&mut self.0);
        let names = data.names.get_or_insert_with(|| Names {
            param: vec![None; data.nparam],
            in_: vec![None; data.n_in],
            out: vec![None; data.n_out],
        });
        let slot = match c {
            Component::Param => &mut names.param,
            Component::In => &mut names.in_,
            Component::Out => &mut names.out,
            Component::Div => return,
        };
        if let Some(s) = slot.get_mut(pos) {
            *s = Some(name.into());
        }
    }

    pub fn get_name(&self, c: Component, pos: usize) -> Option<&str> {
        let slot = match c {
            Component::Param => &self.0.names.as_ref()?.param,
            Component::In => &self.0.names.as_ref()?.in_,
            Component::Out => &self.0.names.as_ref()?.out,
            Component::Div => return None,
        };
        slot.get(pos)?.as_deref()
    }
}

/// `compatible_domain(B, Bset)` per spec §4.1.
pub fn compatible_domain(b: &Space, bset: &Space) -> bool {
    b.n_in() == bset.n_out() && b.nparam() == bset.nparam()
}

/// `compatible_range(B, Bset)` per spec §4.1.
pub fn compatible_range(b: &Space, bset: &Space) -> bool {
    b.n_out() == bset.n_out() && b.nparam() == bset.nparam()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_layout() {
        let s = Space::alloc(2, 3, 4);
        assert_eq!(s.offset(Component::Param), 1);
        assert_eq!(s.offset(Component::In), 3);
        assert_eq!(s.offset(Component::Out), 6);
        assert_eq!(s.offset(Component::Div), 10);
        assert_eq!(s.total(), 9);
    }

    #[test]
    fn reverse_swaps_in_out() {
        let s = Space::alloc(1, 2, 3);
        let r = s.reverse();
        assert_eq!(r.n_in(), 3);
        assert_eq!(r.n_out(), 2);
        assert_eq!(r.nparam(), 1);
    }

    #[test]
    fn join_requires_matching_middle_tuple() {
        let a = Space::alloc(0, 1, 2);
        let b = Space::alloc(0, 2, 3);
        assert!(a.join(&b).is_some());
        let c = Space::alloc(0, 3, 3);
        assert!(a.join(&c).is_none());
    }

    #[test]
    fn set_is_n_in_zero() {
        assert!(Space::alloc_set(0, 3).is_set());
        assert!(!Space::alloc(0, 1, 1).is_set());
    }
}
