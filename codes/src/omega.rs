//! Elias omega code.
//!
//! Recursively encodes the *length* of the value, then the length of that
//! length, and so on, until a length of 1 is reached; the encoded lengths
//! are emitted outermost-first, each carrying its own implicit leading `1`
//! bit, terminated by a single `0` bit.

use bitstream::{BitSink, BitSource, Word};

use crate::overflow::{checked_pow2, require_positive, top_set_bit};

pub fn encode(sink: &mut impl BitSink, value: u128) -> bool {
    if require_positive(value).is_err() {
        return false;
    }
    let mut groups: Vec<(u128, u32)> = Vec::new();
    let mut x = value;
    while x > 1 {
        let l = top_set_bit(x);
        groups.push((x, l));
        x = (l - 1) as u128;
    }
    for &(g, l) in groups.iter().rev() {
        sink.append_bits(g, l);
    }
    sink.append_zeros(1);
    sink.is_valid()
}

pub fn decode<T: Word>(source: &impl BitSource, start_offset: u64) -> (T, u32) {
    let mut x: u128 = 1;
    let mut pos = start_offset;
    loop {
        let bit = match source.get_bit(pos) {
            Some(b) => b,
            None => {
                tracing::trace!(target: "codes::omega", start_offset, pos, "stream ended mid-group");
                return (T::ZERO, 0);
            }
        };
        pos += 1;
        if !bit {
            return match T::checked_from_u128(x) {
                Some(v) => (v, (pos - start_offset) as u32),
                None => (T::ZERO, 0),
            };
        }
        let Ok(x32) = u32::try_from(x) else {
            return (T::ZERO, 0);
        };
        let (bits, ok) = source.get_bits::<u128>(x32, pos);
        if !ok {
            return (T::ZERO, 0);
        }
        pos += x32 as u64;
        let Ok(top_bit) = checked_pow2(x32) else {
            return (T::ZERO, 0);
        };
        x = bits | top_bit;
    }
}
