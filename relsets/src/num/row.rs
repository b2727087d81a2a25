//! Small integer-vector primitives used by constraint rows.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

/// Dot product of two equal-length integer rows.
pub fn dot(a: &[BigInt], b: &[BigInt]) -> BigInt {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scale every entry of `row` by `k`.
pub fn scale(row: &mut [BigInt], k: &BigInt) {
    for x in row.iter_mut() {
        *x *= k;
    }
}

/// Add `k * src` into `dst`, entrywise.
pub fn add_scaled(dst: &mut [BigInt], src: &[BigInt], k: &BigInt) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d += k * s;
    }
}

/// Divide every entry of `row` by the gcd of its nonzero entries, leaving
/// the row's solution set unchanged for an *equality* row; for an
/// inequality row this also tightens the integer bound (rounding the
/// constant term down is handled by the caller, since that depends on
/// which side of the inequality the constant sits).
pub fn content(row: &[BigInt]) -> BigInt {
    let mut g = BigInt::zero();
    for x in row {
        if !x.is_zero() {
            g = g.gcd(x);
        }
    }
    if g.is_zero() {
        BigInt::one()
    } else {
        g.abs()
    }
}

/// Normalize an equality row by its content (divides through, exact).
pub fn normalize_eq(row: &mut [BigInt]) {
    let g = content(row);
    if g > BigInt::one() {
        for x in row.iter_mut() {
            *x = &*x / &g;
        }
    }
}

/// Normalize an inequality row `row >= 0` by its content, rounding the
/// constant term (`row[0]`) down so the tightened row is implied by, and
/// implies, the original over the integers.
pub fn normalize_ineq(row: &mut [BigInt]) {
    let g = content(&row[1..]);
    if g > BigInt::one() {
        row[0] = row[0].div_floor(&g);
        for x in row[1..].iter_mut() {
            *x = &*x / &g;
        }
    }
}

/// Lexicographic comparison of two equal-length rows.
pub fn lex_cmp(a: &[BigInt], b: &[BigInt]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&x| BigInt::from(x)).collect()
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&row(&[1, 2, 3]), &row(&[4, 5, 6])), BigInt::from(32));
    }

    #[test]
    fn normalize_eq_divides_by_content() {
        let mut r = row(&[6, 9, 3]);
        normalize_eq(&mut r);
        assert_eq!(r, row(&[2, 3, 1]));
    }

    #[test]
    fn normalize_ineq_rounds_constant_down() {
        // 7 + 4x >= 0  =>  gcd(4) = 4, floor(7/4) = 1  =>  1 + x >= 0
        let mut r = row(&[7, 4]);
        normalize_ineq(&mut r);
        assert_eq!(r, row(&[1, 1]));
    }

    #[test]
    fn lex_cmp_orders_first_difference() {
        assert_eq!(lex_cmp(&row(&[1, 2]), &row(&[1, 3])), Ordering::Less);
        assert_eq!(lex_cmp(&row(&[2, 0]), &row(&[1, 9])), Ordering::Greater);
        assert_eq!(lex_cmp(&row(&[1, 2]), &row(&[1, 2])), Ordering::Equal);
    }
}
