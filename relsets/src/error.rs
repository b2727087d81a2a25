//! Internal diagnostic error type.
//!
//! Every public entry point surfaces failure as `None`, per the null-in/
//! null-out propagation policy. This type exists only to give the context's
//! assertion hook something to report before the wrapper discards it.

use thiserror::Error;

use crate::space::Component;

#[derive(Debug, Clone, Error)]
pub enum OpError {
    #[error("parameter count mismatch: {0} vs {1}")]
    ParamMismatch(usize, usize),
    #[error("space mismatch between operands")]
    SpaceMismatch,
    #[error("set operation requires n_in == 0, got {0}")]
    NotASet(usize),
    #[error("component {0:?} index {index} out of range (size {size})", index = .1, size = .2)]
    OutOfRange(Component, usize, usize),
    #[error("constraint store capacity exhausted")]
    CapacityExhausted,
    #[error("div index {0} out of range (n_div {1})")]
    DivOutOfRange(usize, usize),
    #[error("incompatible domain/range arities for composition")]
    NotComposable,
    #[error("delegated solver failed to produce a result")]
    SolverFailed,
}

pub(crate) fn report(ctx: &crate::ctx::Ctx, where_: &str, err: &OpError) {
    (ctx.assert_hook)(&format!("{where_}: {err}"));
}
