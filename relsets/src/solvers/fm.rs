//! Fourier-Motzkin elimination over exact rationals.
//!
//! Every row is an inequality `row · x >= 0` (column 0 is the constant
//! term). Equalities are represented as the pair `row >= 0, -row >= 0`, so
//! this single representation serves both the rational-feasibility
//! collaborator (`Tab`) and the LP maximize collaborator.

use num_rational::BigRational;
use num_traits::{Signed, Zero};

pub type Row = Vec<BigRational>;

#[derive(Debug, Clone)]
pub struct System {
    pub width: usize,
    pub rows: Vec<Row>,
}

impl System {
    pub fn new(width: usize) -> System {
        System {
            width,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.width);
        self.rows.push(row);
    }

    /// `true` if any row is a constant contradiction (`0 >= 0` coefficients
    /// with a negative constant).
    fn has_contradiction(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r[1..].iter().all(|c| c.is_zero()) && r[0].is_negative())
    }

    /// Eliminate variable column `col` (1-based, `col >= 1`), returning the
    /// resulting system over the remaining columns (column `col` itself is
    /// left in place but becomes structurally unconstrained — callers that
    /// want a narrower width should drop it themselves).
    pub fn eliminate(&self, col: usize) -> System {
        let mut zero = Vec::new();
        let mut pos = Vec::new();
        let mut neg = Vec::new();
        for row in &self.rows {
            let c = &row[col];
            if c.is_zero() {
                zero.push(row.clone());
            } else if c.is_positive() {
                pos.push(row.clone());
            } else {
                neg.push(row.clone());
            }
        }
        let mut out = System::new(self.width);
        out.rows = zero;
        for p in &pos {
            for n in &neg {
                let pc = p[col].clone();
                let nc = -n[col].clone();
                let mut combined = vec![BigRational::zero(); self.width];
                for k in 0..self.width {
                    combined[k] = &p[k] * &nc + &n[k] * &pc;
                }
                out.rows.push(combined);
            }
        }
        out
    }

    /// Project the system down to bounds on a single variable `col` by
    /// eliminating every other variable column.
    pub fn project_to(&self, col: usize) -> System {
        let mut sys = self.clone();
        for c in 1..self.width {
            if c != col {
                sys = sys.eliminate(c);
            }
        }
        sys
    }

    /// Feasibility over the rationals: eliminate every variable; feasible
    /// iff no constant contradiction remains.
    pub fn is_feasible(&self) -> bool {
        if self.has_contradiction() {
            return false;
        }
        let mut sys = self.clone();
        for c in 1..self.width {
            sys = sys.eliminate(c);
            if sys.has_contradiction() {
                return false;
            }
        }
        true
    }

    /// Derive the tightest lower/upper rational bound on variable `col`
    /// implied by the system, if any. `None` for a side means unbounded.
    pub fn bounds_on(&self, col: usize) -> (Option<BigRational>, Option<BigRational>) {
        let projected = self.project_to(col);
        if projected.has_contradiction() {
            // infeasible system: no point at all, report as empty bounds
            return (Some(BigRational::zero()), Some(BigRational::from_integer(num_bigint::BigInt::from(-1))));
        }
        let mut lower: Option<BigRational> = None;
        let mut upper: Option<BigRational> = None;
        for row in &projected.rows {
            let c = &row[col];
            if c.is_zero() {
                continue;
            }
            // row[0] + c * x >= 0  =>  x >= -row[0]/c  (c>0)  or x <= -row[0]/c (c<0)
            let bound = -&row[0] / c;
            if c.is_positive() {
                lower = Some(match lower {
                    Some(l) if l >= bound => l,
                    _ => bound,
                });
            } else {
                upper = Some(match upper {
                    Some(u) if u <= bound => u,
                    _ => bound,
                });
            }
        }
        (lower, upper)
    }
}
