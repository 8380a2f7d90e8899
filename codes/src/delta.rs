//! Elias delta code.
//!
//! Codeword for a value with `L` significant bits: Gamma-encode `L` itself,
//! then emit the low `L − 1` bits of the value, MSB-first (the same suffix
//! Gamma would emit, but the prefix costs `O(log log value)` instead of
//! `O(log value)`).

use bitstream::{BitSink, BitSource, Word};

use crate::gamma;
use crate::overflow::{checked_pow2, require_positive, top_set_bit};

pub fn encode(sink: &mut impl BitSink, value: u128) -> bool {
    if require_positive(value).is_err() {
        return false;
    }
    let l = top_set_bit(value);
    gamma::encode(sink, l as u128);
    if l > 1 {
        sink.append_bits(value, l - 1);
    }
    sink.is_valid()
}

pub fn decode<T: Word>(source: &impl BitSource, start_offset: u64) -> (T, u32) {
    let (h, l): (u128, u32) = gamma::decode(source, start_offset);
    if l == 0 {
        return (T::ZERO, 0);
    }
    if h == 1 {
        return (T::ONE, l);
    }
    let Ok(h32) = u32::try_from(h) else {
        return (T::ZERO, 0);
    };
    let suffix_offset = start_offset + l as u64;
    let (suffix, ok) = source.get_bits::<u128>(h32 - 1, suffix_offset);
    if !ok {
        return (T::ZERO, 0);
    }
    let Ok(top_bit) = checked_pow2(h32 - 1) else {
        return (T::ZERO, 0);
    };
    match T::checked_from_u128(suffix | top_bit) {
        Some(v) => (v, l + h32 - 1),
        None => (T::ZERO, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream::{BitBuffer, Msb};

    #[test]
    fn rejects_non_positive_input() {
        let mut sink = BitBuffer::<u32, Msb>::new();
        assert!(!encode(&mut sink, 0));
    }

    #[test]
    fn encodes_known_table_value() {
        let mut sink = BitBuffer::<u32, Msb>::new();
        assert!(encode(&mut sink, 1));
        assert_eq!(sink.num_bits(), 1);
        assert_eq!(sink.data(), 0b1);
    }

    #[test]
    fn round_trips_through_decode() {
        for v in [1u128, 2, 3, 7, 29, 1000, 1_000_000, 1 << 40] {
            let mut sink = BitBuffer::<u128, Msb>::new();
            assert!(encode(&mut sink, v));
            let (decoded, bits): (u128, u32) = decode(&sink, 0);
            assert_eq!(decoded, v);
            assert_eq!(bits, sink.num_bits() as u32);
        }
    }

    #[test]
    fn rejects_width_too_narrow() {
        let mut sink = BitBuffer::<u128, Msb>::new();
        assert!(encode(&mut sink, 1_000_000));
        let (v, bits): (u8, u32) = decode(&sink, 0);
        assert_eq!((v, bits), (0, 0));
    }
}
