//! Global context: the arithmetic environment, solver backend choice, and
//! the assertion hook, threaded by reference through every constructor.
//!
//! There is no module-level mutable state anywhere in this crate; any
//! process-wide policy lives here and is passed explicitly.

use std::fmt;
use std::rc::Rc;

/// Which per-basic-relation engine `partial_lex_opt`/`compute_divs` use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricBackend {
    /// Classical parametric integer programming.
    ParametricIntegerProgram,
    /// Simplex-tableau based backend.
    SimplexTableau,
}

impl Default for ParametricBackend {
    fn default() -> Self {
        ParametricBackend::ParametricIntegerProgram
    }
}

/// Process-wide (but explicitly threaded, never global) environment.
#[derive(Clone)]
pub struct Ctx {
    pub backend: ParametricBackend,
    pub(crate) assert_hook: Rc<dyn Fn(&str)>,
}

impl fmt::Debug for Ctx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctx").field("backend", &self.backend).finish()
    }
}

impl Ctx {
    pub fn new() -> Self {
        Ctx {
            backend: ParametricBackend::default(),
            assert_hook: Rc::new(|_msg: &str| {}),
        }
    }

    pub fn with_backend(backend: ParametricBackend) -> Self {
        Ctx {
            backend,
            assert_hook: Rc::new(|_msg: &str| {}),
        }
    }

    /// Install a callback invoked whenever an operation fails with a
    /// diagnosable reason (shape mismatch, capacity exhaustion, ...).
    /// The default hook is a no-op; callers wanting visibility can forward
    /// to their own logging facility here.
    pub fn with_assert_hook(mut self, hook: impl Fn(&str) + 'static) -> Self {
        self.assert_hook = Rc::new(hook);
        self
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}
