//! Arbitrary-precision integer primitives and small integer-vector helpers.
//!
//! Collaborator per spec: "Arbitrary-precision integer primitives and small
//! integer-vector primitives." Built on `num-bigint`/`num-integer`, the same
//! family the teacher project already depends on for its own `BigInt` value.

pub mod row;

pub use num_bigint::BigInt;
pub use num_rational::BigRational;
