//! Collaborators the core invokes but does not itself specify the
//! algorithms of: a simplex tableau, a rational LP solver, a parametric
//! integer programming engine, an integer sample-point search, and
//! Fourier-Motzkin elimination. All built on exact `BigRational`/`BigInt`
//! arithmetic — never floating point, per the crate's non-goals.

pub mod fm;
pub mod gauss;
pub mod lp;
pub mod pip;
pub mod sample;
pub mod tableau;
