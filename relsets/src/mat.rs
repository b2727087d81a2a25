//! The dual-ended constraint arena: equalities and inequalities of a basic
//! relation, grown from opposite ends of one logical capacity budget.
//!
//! The original C core addresses both arrays as row-pointers into one
//! contiguous buffer, growing `ineq` from the low end and `eq` from the
//! high end, converting one kind into the other with a three-way pointer
//! swap when the two heaps meet. Rust's ownership model has no safe
//! equivalent of that negative-indexed single-buffer trick, so this keeps
//! the externally observable discipline — `n_eq + n_ineq <= c_size`, O(1)
//! drop-by-swap-with-last, inequality-to-equality conversion — over two
//! plain `Vec<Vec<BigInt>>`s, one per kind, sharing one capacity budget.
//! See DESIGN.md for this simplification.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::OpError;

#[derive(Debug, Clone)]
pub struct Mat {
    width: usize,
    c_size: usize,
    eq: Vec<Vec<BigInt>>,
    ineq: Vec<Vec<BigInt>>,
}

impl Mat {
    pub fn new(width: usize, c_size: usize) -> Mat {
        Mat {
            width,
            c_size,
            eq: Vec::new(),
            ineq: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn c_size(&self) -> usize {
        self.c_size
    }
    pub fn n_eq(&self) -> usize {
        self.eq.len()
    }
    pub fn n_ineq(&self) -> usize {
        self.ineq.len()
    }

    pub fn eq_rows(&self) -> &[Vec<BigInt>] {
        &self.eq
    }
    pub fn ineq_rows(&self) -> &[Vec<BigInt>] {
        &self.ineq
    }
    pub fn eq_rows_mut(&mut self) -> &mut Vec<Vec<BigInt>> {
        &mut self.eq
    }
    pub fn ineq_rows_mut(&mut self) -> &mut Vec<Vec<BigInt>> {
        &mut self.ineq
    }

    fn room_for(&self, n: usize) -> bool {
        self.eq.len() + self.ineq.len() + n <= self.c_size
    }

    /// Grow the logical capacity budget by at least `d_eq + d_ineq`
    /// (the common case, `extend_constraints`).
    pub fn extend_capacity(&mut self, d_eq: usize, d_ineq: usize) {
        self.c_size += d_eq + d_ineq;
    }

    /// Ensure the row width can hold `extra_extra` more div columns,
    /// widening every existing row with zeros.
    pub fn extend_width(&mut self, extra_extra: usize) {
        if extra_extra == 0 {
            return;
        }
        self.width += extra_extra;
        for row in self.eq.iter_mut().chain(self.ineq.iter_mut()) {
            row.resize(self.width, BigInt::zero());
        }
    }

    fn zero_row(&self) -> Vec<BigInt> {
        vec![BigInt::zero(); self.width]
    }

    /// Remove column `col` from every eq/ineq row and shrink the row
    /// width by one. Callers are responsible for removing the
    /// corresponding div metadata and shrinking `extra`.
    pub fn remove_column(&mut self, col: usize) {
        for row in self.eq.iter_mut().chain(self.ineq.iter_mut()) {
            row.remove(col);
        }
        self.width -= 1;
    }

    /// Insert a zero column at `col` in every eq/ineq row and grow the
    /// row width by one.
    pub fn insert_column(&mut self, col: usize) {
        for row in self.eq.iter_mut().chain(self.ineq.iter_mut()) {
            row.insert(col, BigInt::zero());
        }
        self.width += 1;
    }

    pub fn alloc_equality(&mut self) -> Result<usize, OpError> {
        if !self.room_for(1) {
            return Err(OpError::CapacityExhausted);
        }
        self.eq.push(self.zero_row());
        Ok(self.eq.len() - 1)
    }

    pub fn alloc_inequality(&mut self) -> Result<usize, OpError> {
        if !self.room_for(1) {
            return Err(OpError::CapacityExhausted);
        }
        self.ineq.push(self.zero_row());
        Ok(self.ineq.len() - 1)
    }

    pub fn add_eq(&mut self, row: Vec<BigInt>) -> Result<usize, OpError> {
        debug_assert_eq!(row.len(), self.width);
        self.c_size += 1;
        let pos = self.alloc_equality()?;
        self.eq[pos] = row;
        Ok(pos)
    }

    pub fn add_ineq(&mut self, row: Vec<BigInt>) -> Result<usize, OpError> {
        debug_assert_eq!(row.len(), self.width);
        self.c_size += 1;
        let pos = self.alloc_inequality()?;
        self.ineq[pos] = row;
        Ok(pos)
    }

    /// Swap with the last row and truncate — O(1), order is not preserved.
    pub fn drop_equality(&mut self, pos: usize) {
        let last = self.eq.len() - 1;
        self.eq.swap(pos, last);
        self.eq.pop();
    }

    /// Swap with the last row and truncate; returns whether the dropped
    /// row was already last (callers use this to decide whether
    /// NORMALIZED survives — it never does here since order changes
    /// unless it was already the tail).
    pub fn drop_inequality(&mut self, pos: usize) -> bool {
        let last = self.ineq.len() - 1;
        let was_last = pos == last;
        self.ineq.swap(pos, last);
        self.ineq.pop();
        was_last
    }

    /// Move `ineq[pos]` into the equality region.
    pub fn inequality_to_equality(&mut self, pos: usize) {
        let last = self.ineq.len() - 1;
        self.ineq.swap(pos, last);
        let row = self.ineq.pop().unwrap();
        self.eq.push(row);
    }

    pub fn free_equality(&mut self, n: usize) {
        let new_len = self.eq.len() - n;
        self.eq.truncate(new_len);
    }

    pub fn free_inequality(&mut self, n: usize) {
        let new_len = self.ineq.len() - n;
        self.ineq.truncate(new_len);
    }

    /// Rewrite `ineq[pos]` as `-row - 1` (strict-reverse trick: negating a
    /// `>= 0` integer inequality and tightening by one).
    pub fn inequality_negate(&mut self, pos: usize) {
        let row = &mut self.ineq[pos];
        for x in row.iter_mut() {
            *x = -(&*x);
        }
        row[0] -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(w: usize, v: &[i64]) -> Vec<BigInt> {
        let mut r = vec![BigInt::zero(); w];
        for (i, &x) in v.iter().enumerate() {
            r[i] = BigInt::from(x);
        }
        r
    }

    #[test]
    fn capacity_is_enforced() {
        let mut m = Mat::new(3, 1);
        assert!(m.alloc_inequality().is_ok());
        assert!(matches!(m.alloc_inequality(), Err(OpError::CapacityExhausted)));
    }

    #[test]
    fn alloc_equality_reclaims_after_extend() {
        let mut m = Mat::new(3, 0);
        m.extend_capacity(1, 0);
        assert!(m.alloc_equality().is_ok());
        assert_eq!(m.n_eq(), 1);
    }

    #[test]
    fn drop_inequality_swaps_with_last() {
        let mut m = Mat::new(2, 3);
        m.add_ineq(row(2, &[1, 1])).unwrap();
        m.add_ineq(row(2, &[2, 2])).unwrap();
        m.add_ineq(row(2, &[3, 3])).unwrap();
        m.drop_inequality(0);
        assert_eq!(m.n_ineq(), 2);
        assert_eq!(m.ineq_rows()[0], row(2, &[3, 3]));
    }

    #[test]
    fn negate_applies_strict_reverse_trick() {
        let mut m = Mat::new(2, 1);
        m.add_ineq(row(2, &[5, 2])).unwrap(); // 5 + 2x >= 0
        m.inequality_negate(0);
        assert_eq!(m.ineq_rows()[0], row(2, &[-6, -2])); // -5-2x-1 >= 0 i.e. -6-2x
    }
}
