#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::manual_assert)]

//! Compile-time bit-order discriminators.
//!
//! `Msb` and `Lsb` are zero-sized marker types implementing the sealed
//! [`BitOrder`] trait. Every storage backend in [`crate::buffer`] and
//! [`crate::source`] is generic over `E: BitOrder` and dispatches to `E`'s
//! associated functions; since `E` is a concrete type at every call site,
//! these dispatch to a monomorphized implementation with no runtime branch
//! on endianness.
//!
//! Two conventions are distinguished here because the two multi-bit storage
//! shapes (a single accumulator word/big integer, vs. an array of fixed
//! words) disagree about where the *unused* bits of a partially-filled word
//! live:
//!
//! - A single word or unbounded integer is filled like an accumulator:
//!   `value = (value << n) | new_bits`. Unused bits sit at the *high* end.
//! - The last (partial) element of an array is filled left-to-right: the
//!   earliest-written bit occupies the *highest* bit of the element, so
//!   unused bits sit at the *low* end instead.
//!
//! Under `Lsb` both shapes agree (earlier bits at low positions either way),
//! so [`BitOrder::array_fold`]/[`BitOrder::array_extract`] simply delegate
//! to [`BitOrder::fold`]/[`BitOrder::extract`] for that tag; `Msb` needs a
//! distinct top-aligned pair for arrays.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

mod sealed {
    pub trait Sealed {}
}

/// A chunk of up to 128 meaningful bits, written in MSB-first order: bit
/// `n - 1` of the value is the first bit of the chunk, bit `0` the last.
/// This is the common currency the append/read primitives pass around
/// regardless of the destination storage's own endian convention.
pub type Chunk = u128;

pub(crate) fn mask(n: u32) -> Chunk {
    if n == 0 {
        0
    } else if n >= Chunk::BITS {
        Chunk::MAX
    } else {
        (1 << n) - 1
    }
}

pub(crate) fn shl0(x: Chunk, n: u32) -> Chunk {
    if n >= Chunk::BITS {
        0
    } else {
        x << n
    }
}

pub(crate) fn shr0(x: Chunk, n: u32) -> Chunk {
    if n >= Chunk::BITS {
        0
    } else {
        x >> n
    }
}

/// Reverses the order of the low `n` bits of `bits`, leaving higher bits
/// (which the caller has already masked away) at zero.
pub(crate) fn reverse_n(bits: Chunk, n: u32) -> Chunk {
    if n == 0 {
        0
    } else {
        bits.reverse_bits() >> (Chunk::BITS - n)
    }
}

fn chunk_from_biguint(v: &BigUint) -> Chunk {
    let masked = v & BigUint::from(Chunk::MAX);
    masked.to_u128().unwrap_or(0)
}

/// A compile-time tag selecting how a logical, write-ordered bit sequence is
/// packed into the physical bits of a storage word, big integer, or array
/// element.
pub trait BitOrder: sealed::Sealed + Copy + Clone + std::fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;

    /// Accumulator-style fold used by a single fixed-width word and by
    /// unbounded integer storage: combine `used_bits` already-appended bits
    /// (held in `value`, zero above `used_bits`) with the low `n` bits of
    /// `new_bits`.
    fn fold(value: Chunk, used_bits: u32, new_bits: Chunk, n: u32) -> Chunk;

    /// Inverse of [`Self::fold`]: reads `n` bits starting at logical offset
    /// `off` out of a word holding `used_bits` meaningful bits, returned
    /// MSB-first (the bit at `off` becomes the high bit of the result).
    fn extract(value: Chunk, used_bits: u32, off: u32, n: u32) -> Chunk;

    /// Same contract as [`Self::fold`], for unbounded `BigUint` storage.
    fn fold_unbounded(value: &BigUint, used_bits: u64, new_bits: Chunk, n: u32) -> BigUint;

    /// Same contract as [`Self::extract`], for unbounded `BigUint` storage.
    fn extract_unbounded(value: &BigUint, used_bits: u64, off: u64, n: u32) -> Chunk;

    /// Inserts `n` new MSB-first bits into one array element of `width`
    /// bits that already holds `used` of them, returning the updated
    /// element. `used + n <= width` is the caller's responsibility.
    fn array_fold(elem: Chunk, width: u32, used: u32, new_bits: Chunk, n: u32) -> Chunk;

    /// Inverse of [`Self::array_fold`]: reads `n` bits starting at logical
    /// offset `off` (0 = earliest bit written into this element) out of an
    /// array element of `width` bits holding `used` meaningful bits.
    fn array_extract(elem: Chunk, width: u32, used: u32, off: u32, n: u32) -> Chunk;
}

/// Most-significant-bit-first: the first bit written becomes the most
/// significant bit of the logical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Msb;

/// Least-significant-bit-first: the first bit written becomes the least
/// significant bit of the logical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lsb;

impl sealed::Sealed for Msb {}
impl sealed::Sealed for Lsb {}

impl BitOrder for Msb {
    const NAME: &'static str = "Msb";

    fn fold(value: Chunk, _used_bits: u32, new_bits: Chunk, n: u32) -> Chunk {
        shl0(value, n) | (new_bits & mask(n))
    }

    fn extract(value: Chunk, used_bits: u32, off: u32, n: u32) -> Chunk {
        let shift = used_bits.saturating_sub(off).saturating_sub(n);
        shr0(value, shift) & mask(n)
    }

    fn fold_unbounded(value: &BigUint, _used_bits: u64, new_bits: Chunk, n: u32) -> BigUint {
        if n == 0 {
            return value.clone();
        }
        (value << n) | BigUint::from(new_bits & mask(n))
    }

    fn extract_unbounded(value: &BigUint, used_bits: u64, off: u64, n: u32) -> Chunk {
        if n == 0 {
            return 0;
        }
        let shift = used_bits.saturating_sub(off).saturating_sub(n as u64);
        chunk_from_biguint(&(value >> shift)) & mask(n)
    }

    fn array_fold(elem: Chunk, width: u32, used: u32, new_bits: Chunk, n: u32) -> Chunk {
        let shift = width.saturating_sub(used).saturating_sub(n);
        elem | shl0(new_bits & mask(n), shift)
    }

    fn array_extract(elem: Chunk, width: u32, _used: u32, off: u32, n: u32) -> Chunk {
        let shift = width.saturating_sub(off).saturating_sub(n);
        shr0(elem, shift) & mask(n)
    }
}

impl BitOrder for Lsb {
    const NAME: &'static str = "Lsb";

    fn fold(value: Chunk, used_bits: u32, new_bits: Chunk, n: u32) -> Chunk {
        let reversed = reverse_n(new_bits & mask(n), n);
        value | shl0(reversed, used_bits)
    }

    fn extract(value: Chunk, _used_bits: u32, off: u32, n: u32) -> Chunk {
        let chunk = shr0(value, off) & mask(n);
        reverse_n(chunk, n)
    }

    fn fold_unbounded(value: &BigUint, used_bits: u64, new_bits: Chunk, n: u32) -> BigUint {
        if n == 0 {
            return value.clone();
        }
        let reversed = reverse_n(new_bits & mask(n), n);
        value | (BigUint::from(reversed) << used_bits)
    }

    fn extract_unbounded(value: &BigUint, _used_bits: u64, off: u64, n: u32) -> Chunk {
        if n == 0 {
            return 0;
        }
        let chunk = chunk_from_biguint(&(value >> off)) & mask(n);
        reverse_n(chunk, n)
    }

    fn array_fold(elem: Chunk, _width: u32, used: u32, new_bits: Chunk, n: u32) -> Chunk {
        Self::fold(elem, used, new_bits, n)
    }

    fn array_extract(elem: Chunk, _width: u32, used: u32, off: u32, n: u32) -> Chunk {
        Self::extract(elem, used, off, n)
    }
}
