//! Div rows: existentially quantified integer variables `q = floor(f(x)/d)`.

use num_bigint::BigInt;
use num_traits::Zero;

/// One div definition. `denom == 0` marks an "unknown" div (its value is
/// not pinned down by an explicit floor expression, only by the pair of
/// inequalities already present in the constraint block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivRow {
    pub denom: BigInt,
    /// Affine expression `f`, width `1 + total(space) + extra`: constant
    /// term followed by one coefficient per variable column (params, in,
    /// out, divs).
    pub expr: Vec<BigInt>,
}

impl DivRow {
    pub fn unknown(width: usize) -> DivRow {
        DivRow {
            denom: BigInt::zero(),
            expr: vec![BigInt::zero(); width],
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.denom.is_zero()
    }
}
