//! Zeta(k) code (Boldi & Vigna).
//!
//! Groups values by the number of length-classes `h = ceil(L / k)` needed
//! to cover their bit-length `L`, emits `unary(h)`, then a minimal-width
//! suffix distinguishing the value within its class. `Zeta(1)` is
//! identical to Gamma for every value.

use std::num::NonZeroU32;

use bitstream::{BitSink, BitSource, Word};

use crate::overflow::checked_pow2;
use crate::overflow::require_positive;
use crate::overflow::top_set_bit;

pub fn encode(sink: &mut impl BitSink, value: u128, k: NonZeroU32) -> bool {
    if require_positive(value).is_err() {
        return false;
    }
    let k = k.get() as u64;
    let l = top_set_bit(value) as u64;
    let h = (l + k - 1) / k;
    let Some(n) = h.checked_mul(k) else {
        return false;
    };
    let Some(m) = n.checked_sub(k - 1) else {
        return false;
    };
    let (Ok(h32), Ok(n32), Ok(m32)) = (u32::try_from(h), u32::try_from(n), u32::try_from(m))
    else {
        return false;
    };
    let Ok(y) = checked_pow2(m32) else {
        return false;
    };
    sink.append_zeros(h32 - 1);
    sink.append_ones(1);
    if value < y {
        let half_y = y >> 1;
        sink.append_bits(value - half_y, n32 - 1);
    } else {
        sink.append_bits(value >> 1, n32 - 1);
        sink.append_bits(value & 1, 1);
    }
    sink.is_valid()
}

pub fn decode<T: Word>(source: &impl BitSource, start_offset: u64, k: NonZeroU32) -> (T, u32) {
    let kk = k.get() as u64;
    let czs = source.count_leading_zeros(start_offset);
    if czs < 0 {
        tracing::trace!(target: "codes::zeta", start_offset, k = k.get(), "no terminating one bit before end of stream");
        return (T::ZERO, 0);
    }
    let h = czs as u64 + 1;
    let Some(suffix_len_total) = h.checked_mul(kk) else {
        return (T::ZERO, 0);
    };
    let Some(n_d) = suffix_len_total.checked_sub(1) else {
        return (T::ZERO, 0);
    };
    let Ok(h32) = u32::try_from(h) else {
        return (T::ZERO, 0);
    };
    if n_d == 0 {
        return match T::checked_from_u128(1) {
            Some(v) => (v, h32),
            None => (T::ZERO, 0),
        };
    }
    let Ok(nd32) = u32::try_from(n_d) else {
        return (T::ZERO, 0);
    };
    let suffix_offset = start_offset + h;
    let (x, ok) = source.get_bits::<u128>(nd32, suffix_offset);
    if !ok {
        return (T::ZERO, 0);
    }
    let Some(shift) = (h - 1).checked_mul(kk) else {
        return (T::ZERO, 0);
    };
    let Ok(shift32) = u32::try_from(shift) else {
        return (T::ZERO, 0);
    };
    let Ok(y) = checked_pow2(shift32) else {
        return (T::ZERO, 0);
    };
    if x < y {
        let value = x | y;
        return match T::checked_from_u128(value) {
            Some(v) => (v, h32 + nd32),
            None => (T::ZERO, 0),
        };
    }
    let extra_offset = suffix_offset + nd32 as u64;
    let extra_bit = match source.get_bit(extra_offset) {
        Some(b) => b as u128,
        None => return (T::ZERO, 0),
    };
    let Some(x2) = x.checked_mul(2) else {
        return (T::ZERO, 0);
    };
    let value = x2 | extra_bit;
    match T::checked_from_u128(value) {
        Some(v) => (v, h32 + nd32 + 1),
        None => (T::ZERO, 0),
    }
}
