//! Rational LP solver: maximize a linear objective under the tableau's
//! constraints.
//!
//! Implemented by introducing the objective as a fresh variable `z = c·x`
//! and projecting the system down to the tightest implied bound on `z` via
//! Fourier-Motzkin — the same decision procedure `Tab` already uses for
//! emptiness, rather than a second, independent simplex implementation.

use num_rational::BigRational;

use super::fm::System;
use super::tableau::Tab;

#[derive(Debug, Clone, PartialEq)]
pub enum LpResult {
    Empty,
    Unbounded,
    Max(BigRational),
}

/// `objective` has the tableau's row width (constant term + one
/// coefficient per variable column).
pub fn maximize(tab: &Tab, objective: &[BigRational]) -> LpResult {
    let width = objective.len();
    let mut sys = System::new(width + 1);
    // z occupies the new last column; every existing row is reindexed with
    // a trailing zero, plus we add the defining equality z - c·x = 0 as
    // two inequalities.
    for row in tab.base_rows.iter().chain(tab.pushed.iter()) {
        let mut r = row.clone();
        r.push(BigRational::from_integer(0.into()));
        sys.push(r);
    }
    let z_col = width;
    let mut def_pos = vec![BigRational::from_integer(0.into()); width + 1];
    let mut def_neg = vec![BigRational::from_integer(0.into()); width + 1];
    for (k, c) in objective.iter().enumerate() {
        def_pos[k] = -c.clone();
        def_neg[k] = c.clone();
    }
    def_pos[z_col] = BigRational::from_integer(1.into());
    def_neg[z_col] = BigRational::from_integer((-1).into());
    sys.push(def_pos);
    sys.push(def_neg);

    if !sys.is_feasible() {
        return LpResult::Empty;
    }
    let (_, upper) = sys.bounds_on(z_col);
    match upper {
        Some(u) => LpResult::Max(u),
        None => LpResult::Unbounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_relation::BasicRelation;
    use crate::space::Space;
    use num_bigint::BigInt;

    #[test]
    fn maximize_bounded_interval() {
        // set { x | 0 <= x <= 5 }, maximize x
        let mut b = BasicRelation::universe(Space::alloc_set(0, 1));
        b.add_ineq(vec![BigInt::from(0), BigInt::from(1)]).unwrap();
        b.add_ineq(vec![BigInt::from(5), BigInt::from(-1)]).unwrap();
        let tab = Tab::from_basic_relation(&b);
        let obj = vec![BigRational::from_integer(0.into()), BigRational::from_integer(1.into())];
        assert_eq!(maximize(&tab, &obj), LpResult::Max(BigRational::from_integer(5.into())));
    }
}
