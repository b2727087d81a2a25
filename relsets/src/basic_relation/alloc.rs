//! Allocation and low-level row editing.

use num_bigint::BigInt;
use num_traits::Zero;

use super::div::DivRow;
use super::flags::BrFlags;
use super::BasicRelation;
use crate::error::OpError;
use crate::space::Space;

impl BasicRelation {
    /// `extend_space`: return a basic relation with at least the requested
    /// margins, cloning if the current value is shared or too small.
    pub fn extend_space(&self, space: Space, extra: usize, d_eq: usize, d_ineq: usize) -> BasicRelation {
        let same_space = self.space().equal(&space);
        let mut out = self.dup();
        {
            let data = out.cow();
            let extra_extra = extra.saturating_sub(data.extra);
            data.extra += extra_extra;
            data.mat.extend_width(extra_extra);
            data.mat.extend_capacity(d_eq, d_ineq);
            if !same_space {
                data.space = space;
                data.sample = None;
            }
        }
        out
    }

    /// `extend_constraints`: the common case of `extend_space` that keeps
    /// the space and div count fixed.
    pub fn extend_constraints(&self, d_eq: usize, d_ineq: usize) -> BasicRelation {
        let space = self.space().clone();
        let extra = self.extra();
        self.extend_space(space, extra, d_eq, d_ineq)
    }

    pub fn alloc_equality(&mut self) -> Result<usize, OpError> {
        let data = self.cow();
        let pos = data.mat.alloc_equality()?;
        data.flags.remove(BrFlags::edit_clears());
        Ok(pos)
    }

    pub fn alloc_inequality(&mut self) -> Result<usize, OpError> {
        let data = self.cow();
        let pos = data.mat.alloc_inequality()?;
        data.flags.remove(BrFlags::edit_clears());
        Ok(pos)
    }

    pub fn alloc_div(&mut self) -> Result<usize, OpError> {
        let data = self.cow();
        if data.n_div() >= data.extra {
            return Err(OpError::CapacityExhausted);
        }
        let width = data.width();
        data.divs.push(DivRow::unknown(width));
        data.flags.remove(BrFlags::edit_clears());
        Ok(data.divs.len() - 1)
    }

    pub fn add_eq(&mut self, row: Vec<BigInt>) -> Result<usize, OpError> {
        let data = self.cow();
        let pos = data.mat.add_eq(row)?;
        data.flags.remove(BrFlags::edit_clears());
        Ok(pos)
    }

    pub fn add_ineq(&mut self, row: Vec<BigInt>) -> Result<usize, OpError> {
        let data = self.cow();
        let pos = data.mat.add_ineq(row)?;
        data.flags.remove(BrFlags::edit_clears());
        Ok(pos)
    }

    pub fn drop_equality(&mut self, pos: usize) {
        let data = self.cow();
        data.mat.drop_equality(pos);
    }

    pub fn drop_inequality(&mut self, pos: usize) {
        let data = self.cow();
        let was_last = data.mat.drop_inequality(pos);
        if !was_last {
            data.flags.remove(BrFlags::NORMALIZED);
        }
    }

    pub fn inequality_to_equality(&mut self, pos: usize) {
        let data = self.cow();
        data.mat.inequality_to_equality(pos);
        data.flags
            .remove(BrFlags::NO_REDUNDANT | BrFlags::NORMALIZED | BrFlags::NORMALIZED_DIVS | BrFlags::ALL_EQUALITIES);
    }

    pub fn free_equality(&mut self, n: usize) {
        self.cow().mat.free_equality(n);
    }

    pub fn free_inequality(&mut self, n: usize) {
        self.cow().mat.free_inequality(n);
    }

    pub fn free_div(&mut self, n: usize) {
        let data = self.cow();
        let new_len = data.divs.len() - n;
        data.divs.truncate(new_len);
    }

    pub fn inequality_negate(&mut self, pos: usize) {
        let data = self.cow();
        data.mat.inequality_negate(pos);
        data.flags.remove(BrFlags::NORMALIZED);
    }

    /// Permute div rows `a` and `b`, and the corresponding columns in
    /// every eq, ineq, and div row.
    pub fn swap_div(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let data = self.cow();
        data.divs.swap(a, b);
        let div_offset = data.width() - data.extra;
        let col_a = div_offset + a;
        let col_b = div_offset + b;
        for row in data
            .mat
            .eq_rows_mut()
            .iter_mut()
            .chain(data.mat.ineq_rows_mut().iter_mut())
        {
            row.swap(col_a, col_b);
        }
        for div in data.divs.iter_mut() {
            div.expr.swap(col_a, col_b);
        }
        data.flags.remove(BrFlags::NORMALIZED);
    }

    /// Set-to-empty: drop divs and inequalities, collapse equalities to
    /// `1 = 0`.
    pub fn set_to_empty(&mut self) {
        let data = self.cow();
        data.divs.clear();
        data.extra = 0;
        let width = 1 + data.space.total();
        *data = super::BasicRelationData::new_raw(data.space.clone(), width);
        let mut row = vec![BigInt::zero(); width];
        row[0] = BigInt::from(1);
        data.mat.add_eq(row).expect("fresh row fits fresh capacity");
        data.sample = None;
        data.flags = BrFlags::EMPTY | BrFlags::FINAL;
    }
}

impl super::BasicRelationData {
    /// Construct a fresh, empty-of-constraints data block with an exact
    /// row width (used by `set_to_empty`, which needs to discard any
    /// previous div columns).
    pub(crate) fn new_raw(space: Space, width: usize) -> super::BasicRelationData {
        super::BasicRelationData {
            space,
            mat: crate::mat::Mat::new(width, 1),
            divs: Vec::new(),
            extra: 0,
            flags: BrFlags::empty(),
            sample: None,
        }
    }
}
