//! §4.4 integer-mapping helpers: turning non-negative or signed inputs into
//! the positive integers the six codes actually encode, and back.
//!
//! Implemented via a small sealed trait so every signed/unsigned Rust
//! integer width gets the mapping, not just `i64`/`u64` — the distilled
//! spec was silent on which widths to support; see `DESIGN.md` for why
//! "all of them" was the chosen answer.

mod sealed {
    pub trait Sealed {}
}

/// Non-negative-to-positive and zigzag mappings for one integer width.
pub trait IntegerMapping: sealed::Sealed + Copy {
    /// `value + 1`. Fails if `value` is the type's maximum.
    fn nonneg_to_positive(self) -> Option<u128>;
    /// Inverse of [`Self::nonneg_to_positive`].
    fn positive_to_nonneg(positive: u128) -> Option<Self>;

    /// `v ≥ 0 → 2v + 1`; `v < 0 → 2(−v)`. Fails on negation overflow (the
    /// type's minimum value).
    fn zigzag_encode(self) -> Option<u128>;
    /// Inverse of [`Self::zigzag_encode`].
    fn zigzag_decode(positive: u128) -> Option<Self>;
}

macro_rules! impl_unsigned_mapping {
    ($t:ty) => {
        impl sealed::Sealed for $t {}
        impl IntegerMapping for $t {
            fn nonneg_to_positive(self) -> Option<u128> {
                if self == <$t>::MAX {
                    None
                } else {
                    Some(self as u128 + 1)
                }
            }

            fn positive_to_nonneg(positive: u128) -> Option<Self> {
                let value = positive.checked_sub(1)?;
                <$t>::try_from(value).ok()
            }

            fn zigzag_encode(self) -> Option<u128> {
                // An unsigned value is never negative; the unsigned half
                // of the mapping is the same as nonneg_to_positive.
                self.nonneg_to_positive()
            }

            fn zigzag_decode(positive: u128) -> Option<Self> {
                Self::positive_to_nonneg(positive)
            }
        }
    };
}

macro_rules! impl_signed_mapping {
    ($t:ty) => {
        impl sealed::Sealed for $t {}
        impl IntegerMapping for $t {
            fn nonneg_to_positive(self) -> Option<u128> {
                if self < 0 {
                    None
                } else {
                    Some(self as u128 + 1)
                }
            }

            fn positive_to_nonneg(positive: u128) -> Option<Self> {
                let value = positive.checked_sub(1)?;
                <$t>::try_from(value).ok()
            }

            fn zigzag_encode(self) -> Option<u128> {
                if self == <$t>::MIN {
                    return None;
                }
                if self >= 0 {
                    Some((self as u128) * 2 + 1)
                } else {
                    Some(((-self) as u128) * 2)
                }
            }

            fn zigzag_decode(positive: u128) -> Option<Self> {
                if positive == 0 {
                    return None;
                }
                if positive % 2 == 1 {
                    let magnitude = (positive - 1) / 2;
                    <$t>::try_from(magnitude).ok()
                } else {
                    // `magnitude` is `-v`, i.e. up to `|MIN|`, which itself
                    // does not fit as a positive `$t` — handle it directly.
                    let magnitude = positive / 2;
                    if magnitude == <$t>::MAX as u128 + 1 {
                        Some(<$t>::MIN)
                    } else {
                        <$t>::try_from(magnitude).ok()?.checked_neg()
                    }
                }
            }
        }
    };
}

impl_unsigned_mapping!(u8);
impl_unsigned_mapping!(u16);
impl_unsigned_mapping!(u32);
impl_unsigned_mapping!(u64);
impl_unsigned_mapping!(u128);

impl_signed_mapping!(i8);
impl_signed_mapping!(i16);
impl_signed_mapping!(i32);
impl_signed_mapping!(i64);
impl_signed_mapping!(i128);
