//! Shared overflow-safe arithmetic helpers for the six code algorithms.
//!
//! Every intermediate computed here (`2^(L−1)`, `value − …`, widened sums)
//! must not silently wrap: a wrapped intermediate would produce a codeword
//! or decoded value that looks valid but is wrong. Each helper returns
//! [`BitResult`] and fails loudly instead, so every `encode`/`decode` call
//! site collapses the same `BitstreamError::Overflow` reason the rest of
//! the workspace uses for this class of failure, rather than inventing its
//! own local sentinel.

use bitstream::{BitResult, BitstreamError};

/// 1-based position of the highest set bit of `x`. Caller guarantees `x >= 1`.
pub(crate) fn top_set_bit(x: u128) -> u32 {
    debug_assert!(x > 0, "top_set_bit is undefined for zero");
    u128::BITS - x.leading_zeros()
}

/// `2^shift`, or `Err(BitstreamError::Overflow)` if that would overflow `u128`.
pub(crate) fn checked_pow2(shift: u32) -> BitResult<u128> {
    if shift >= u128::BITS {
        Err(BitstreamError::Overflow)
    } else {
        Ok(1u128 << shift)
    }
}

/// `a + b`, or `Err(BitstreamError::Overflow)` on overflow. Named for the
/// call sites in `bl` where `value` is widened against the `BL` block size
/// before the upper-end rounding division.
pub(crate) fn widen_add(a: u128, b: u128) -> BitResult<u128> {
    a.checked_add(b).ok_or(BitstreamError::Overflow)
}

/// Every encoder's first check: `value` must be a positive integer.
pub(crate) fn require_positive(value: u128) -> BitResult<()> {
    if value == 0 {
        Err(BitstreamError::NonPositiveInput)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_set_bit_matches_known_values() {
        assert_eq!(top_set_bit(1), 1);
        assert_eq!(top_set_bit(29), 5);
        assert_eq!(top_set_bit(u128::MAX), 128);
    }

    #[test]
    fn checked_pow2_rejects_full_width_shift() {
        assert_eq!(checked_pow2(0), Ok(1));
        assert_eq!(checked_pow2(127), Ok(1u128 << 127));
        assert_eq!(checked_pow2(128), Err(BitstreamError::Overflow));
    }

    #[test]
    fn widen_add_rejects_overflow() {
        assert_eq!(widen_add(1, 2), Ok(3));
        assert_eq!(widen_add(u128::MAX, 1), Err(BitstreamError::Overflow));
    }

    #[test]
    fn require_positive_rejects_zero() {
        assert_eq!(require_positive(1), Ok(()));
        assert_eq!(require_positive(0), Err(BitstreamError::NonPositiveInput));
    }
}
