//! A core relational-set engine: finite unions of convex integer polyhedra
//! over a fixed space of parameters, input tuple, and output tuple.
//!
//! # Layers
//!
//! - [`space`]: the immutable shape descriptor (`nparam`, `n_in`, `n_out`).
//! - [`dim`]: dimension maps, the rewrite prescription used by every
//!   layout-changing operation (insert, move, project, reverse, ...).
//! - [`mat`]: the dual-ended constraint arena shared by basic relations.
//! - [`basic_relation`]: a single convex polyhedron in constraint form,
//!   possibly with existentially quantified divs.
//! - [`relation`]: a finite disjunction of basic relations sharing one space.
//! - [`set`] / [`basic_set`]: thin shape-restricted wrappers (`n_in == 0`).
//! - [`solvers`]: the LP / simplex / sample-search / Fourier-Motzkin / Gauss
//!   collaborators the algebra above invokes.
//!
//! Every public operation takes ownership of its inputs and returns a new
//! owned value; on failure it returns `None` and the inputs are dropped
//! (Rust's ownership model does this automatically — there is no leak to
//! guard against the way the original C core had to).

pub mod ctx;
pub mod dim;
pub mod error;
pub mod num;
pub mod space;
pub mod mat;

pub mod basic_relation;
pub mod relation;

pub mod basic_set;
pub mod set;

pub mod solvers;

pub use basic_relation::BasicRelation;
pub use basic_set::BasicSet;
pub use ctx::{Ctx, ParametricBackend};
pub use dim::DimMap;
pub use relation::Relation;
pub use set::Set;
pub use space::{Component, Space};
