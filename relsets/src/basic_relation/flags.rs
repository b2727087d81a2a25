//! Boolean flag bits carried by a basic relation.
//!
//! Borrowed crate: `bitflags`, not used by the teacher project but the
//! natural idiom for a C-style flag-word; sourced the way
//! `messense-llvm-bitcode-rs` uses it for its own header flag words.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BrFlags: u16 {
        const EMPTY            = 1 << 0;
        const RATIONAL          = 1 << 1;
        const FINAL              = 1 << 2;
        const NORMALIZED        = 1 << 3;
        const NO_REDUNDANT      = 1 << 4;
        const NO_IMPLICIT       = 1 << 5;
        const ALL_EQUALITIES    = 1 << 6;
        const NORMALIZED_DIVS   = 1 << 7;
    }
}

impl BrFlags {
    /// Every flag that an edit to the constraint block invalidates.
    pub fn edit_clears() -> BrFlags {
        BrFlags::NORMALIZED
            | BrFlags::NO_REDUNDANT
            | BrFlags::NO_IMPLICIT
            | BrFlags::ALL_EQUALITIES
            | BrFlags::NORMALIZED_DIVS
    }
}
