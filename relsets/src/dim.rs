//! Dimension maps: the rewrite prescription used by every layout-changing
//! basic-relation operation (insert, move, project, reverse, apply_range,
//! product, sum, ...).
//!
//! A `DimMap` is a positional vector of tagged entries: destination column
//! `i` either copies from a source column or is forced to zero. This
//! replaces the C core's variable-length trailing array with an explicit
//! `Vec<Option<usize>>`, per the REDESIGN FLAGS note in spec.md §9.

use num_bigint::BigInt;
use num_traits::Zero;

/// `pos[i] == None` means "zero"; `Some(j)` means "copy source column `j`
/// into destination column `i`".
#[derive(Debug, Clone)]
pub struct DimMap {
    dest_width: usize,
    entries: Vec<Option<usize>>,
}

impl DimMap {
    /// A map of the given destination row width, with every column zeroed.
    pub fn zero(dest_width: usize) -> DimMap {
        DimMap {
            dest_width,
            entries: vec![None; dest_width],
        }
    }

    pub fn dest_width(&self) -> usize {
        self.dest_width
    }

    /// Route destination column `dest` from source column `src`.
    pub fn set(&mut self, dest: usize, src: usize) {
        self.entries[dest] = Some(src);
    }

    /// Route a contiguous destination range `[dest, dest+len)` from the
    /// contiguous source range `[src, src+len)`, column by column.
    pub fn set_range(&mut self, dest: usize, src: usize, len: usize) {
        for k in 0..len {
            self.set(dest + k, src + k);
        }
    }

    /// Force a contiguous destination range to zero (already the default,
    /// provided for readability at call sites that describe a gap).
    pub fn set_zero_range(&mut self, dest: usize, len: usize) {
        for k in 0..len {
            self.entries[dest + k] = None;
        }
    }

    /// Append div columns: `n` destination columns starting at `dest`,
    /// sourced from `n` source columns starting at `src`.
    pub fn append_divs(&mut self, dest: usize, src: usize, n: usize) {
        self.set_range(dest, src, n);
    }

    /// Rewrite one row: `dst[i] = src[map[i]]` or `0`.
    pub fn apply_row(&self, dst: &mut [BigInt], src: &[BigInt]) {
        debug_assert_eq!(dst.len(), self.dest_width);
        for (i, entry) in self.entries.iter().enumerate() {
            dst[i] = match entry {
                Some(j) => src[*j].clone(),
                None => BigInt::zero(),
            };
        }
    }

    pub fn map_row(&self, src: &[BigInt]) -> Vec<BigInt> {
        let mut dst = vec![BigInt::zero(); self.dest_width];
        self.apply_row(&mut dst, src);
        dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&x| BigInt::from(x)).collect()
    }

    #[test]
    fn identity_like_range_copies_columns() {
        let mut m = DimMap::zero(4);
        m.set_range(0, 0, 4);
        let src = row(&[1, 2, 3, 4]);
        assert_eq!(m.map_row(&src), src);
    }

    #[test]
    fn gap_columns_are_zero() {
        let mut m = DimMap::zero(5);
        m.set_range(0, 0, 2); // keep first two
        m.set_range(3, 2, 2); // shift last two past a 1-wide gap
        let src = row(&[1, 2, 3, 4]);
        assert_eq!(m.map_row(&src), row(&[1, 2, 0, 3, 4]));
    }
}
