//! Elias gamma code.
//!
//! Codeword for a value with `L` significant bits: `unary(L)` followed by
//! the low `L − 1` bits of the value, MSB-first.

use bitstream::{BitSink, BitSource, Word};

use crate::overflow::{checked_pow2, require_positive, top_set_bit};

pub fn encode(sink: &mut impl BitSink, value: u128) -> bool {
    if require_positive(value).is_err() {
        return false;
    }
    let l = top_set_bit(value);
    sink.append_zeros(l - 1);
    sink.append_ones(1);
    if l > 1 {
        sink.append_bits(value, l - 1);
    }
    sink.is_valid()
}

pub fn decode<T: Word>(source: &impl BitSource, start_offset: u64) -> (T, u32) {
    let czs = source.count_leading_zeros(start_offset);
    if czs < 0 {
        tracing::trace!(target: "codes::gamma", start_offset, "no terminating one bit before end of stream");
        return (T::ZERO, 0);
    }
    let h = czs as u32 + 1;
    if h == 1 {
        return (T::ONE, 1);
    }
    let suffix_offset = start_offset + h as u64;
    let (suffix, ok) = source.get_bits::<u128>(h - 1, suffix_offset);
    if !ok {
        return (T::ZERO, 0);
    }
    let Ok(top_bit) = checked_pow2(h - 1) else {
        return (T::ZERO, 0);
    };
    match T::checked_from_u128(suffix | top_bit) {
        Some(v) => (v, 2 * h - 1),
        None => (T::ZERO, 0),
    }
}
