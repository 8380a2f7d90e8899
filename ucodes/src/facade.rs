//! Convenience entry points tying the three crates together: a value, a
//! [`Code`], a [`Mapping`] for signed/non-negative inputs, and a storage
//! shape all come together here into single function calls, matching the
//! external interface described in §6.

use std::num::NonZeroU32;

use bitstream::{
    ArrayBitBuffer, BigBitBuffer, BitBuffer, BitOrder, BitSink, BitSource, Lsb, Msb,
};
use codes::Code;
use num_bigint::BigUint;

use crate::map::IntegerMapping;

/// How a value is turned into the positive integer the six codes encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// `value + 1`; rejects negative inputs for signed types.
    Unsigned,
    /// The zigzag mapping: every signed value, including negatives, maps to
    /// a distinct positive integer.
    Signed,
}

/// Encodes `value` into `sink` under `code`, applying `mapping` first.
/// Returns `false` on mapping failure (e.g. a negative value under
/// [`Mapping::Unsigned`]) or on encoder failure (e.g. capacity exceeded).
pub fn encode_into<S: BitSink, V: IntegerMapping>(
    sink: &mut S,
    code: Code,
    mapping: Mapping,
    value: V,
) -> bool {
    let positive = match mapping {
        Mapping::Unsigned => value.nonneg_to_positive(),
        Mapping::Signed => value.zigzag_encode(),
    };
    match positive {
        Some(p) => codes::encode(sink, code, p),
        None => false,
    }
}

/// Decodes a value of type `T` from `source` at `start_offset`, under
/// `code`, inverting `mapping`. Returns `(T::default(), 0)` on any failure,
/// matching the sentinel convention of [`codes::decode`].
pub fn decode<T, S>(source: &S, code: Code, mapping: Mapping, start_offset: u64) -> (T, u32)
where
    T: IntegerMapping + Default,
    S: BitSource,
{
    let (positive, bits): (u128, u32) = codes::decode(source, code, start_offset);
    if bits == 0 {
        return (T::default(), 0);
    }
    let mapped = match mapping {
        Mapping::Unsigned => T::positive_to_nonneg(positive),
        Mapping::Signed => T::zigzag_decode(positive),
    };
    match mapped {
        Some(v) => (v, bits),
        None => (T::default(), 0),
    }
}

/// The storage shape to allocate for a one-shot [`encode`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Fixed-width single word, `8 <= width <= 128` (only the listed widths
    /// are supported: `8, 16, 32, 64, 128`).
    Word8,
    Word16,
    Word32,
    Word64,
    Word128,
    /// Unbounded `BigUint` storage.
    Unbounded,
    /// Growable array of words of the given width.
    Array8,
    Array16,
    Array32,
    Array64,
    Array128,
}

/// The encoded result of a one-shot [`encode`] call, tagged by the
/// [`StorageKind`] that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedData {
    Word8(u8),
    Word16(u16),
    Word32(u32),
    Word64(u64),
    Word128(u128),
    Unbounded(BigUint),
    Array8(Vec<u8>),
    Array16(Vec<u16>),
    Array32(Vec<u32>),
    Array64(Vec<u64>),
    Array128(Vec<u128>),
}

fn encode_word<W: bitstream::Word, E: BitOrder, V: IntegerMapping>(
    code: Code,
    mapping: Mapping,
    value: V,
) -> (BitBuffer<W, E>, u32) {
    let mut sink = BitBuffer::<W, E>::new();
    let ok = encode_into(&mut sink, code, mapping, value);
    let bits = if ok { sink.num_bits() as u32 } else { 0 };
    (sink, bits)
}

fn encode_array<W: bitstream::Word, E: BitOrder, V: IntegerMapping>(
    code: Code,
    mapping: Mapping,
    value: V,
) -> (ArrayBitBuffer<W, E>, u32) {
    let mut sink = ArrayBitBuffer::<W, E>::new();
    let ok = encode_into(&mut sink, code, mapping, value);
    let bits = if ok { sink.num_bits() as u32 } else { 0 };
    (sink, bits)
}

/// Allocates a fresh buffer of the requested `kind`, encodes `value` into it
/// under `code`/`mapping`, and returns the buffer's contents alongside the
/// number of bits written (`0` on failure, in which case `data`'s contents
/// are unspecified).
///
/// `E` picks the bit order (`Msb` or `Lsb`) for every storage shape in one
/// call, matching §6's single entry point rather than separate
/// per-bit-order functions.
pub fn encode<E: BitOrder, V: IntegerMapping>(
    kind: StorageKind,
    code: Code,
    mapping: Mapping,
    value: V,
) -> (EncodedData, u32) {
    match kind {
        StorageKind::Word8 => {
            let (sink, bits) = encode_word::<u8, E, V>(code, mapping, value);
            (EncodedData::Word8(sink.data()), bits)
        }
        StorageKind::Word16 => {
            let (sink, bits) = encode_word::<u16, E, V>(code, mapping, value);
            (EncodedData::Word16(sink.data()), bits)
        }
        StorageKind::Word32 => {
            let (sink, bits) = encode_word::<u32, E, V>(code, mapping, value);
            (EncodedData::Word32(sink.data()), bits)
        }
        StorageKind::Word64 => {
            let (sink, bits) = encode_word::<u64, E, V>(code, mapping, value);
            (EncodedData::Word64(sink.data()), bits)
        }
        StorageKind::Word128 => {
            let (sink, bits) = encode_word::<u128, E, V>(code, mapping, value);
            (EncodedData::Word128(sink.data()), bits)
        }
        StorageKind::Unbounded => {
            let mut sink = BigBitBuffer::<E>::new();
            let ok = encode_into(&mut sink, code, mapping, value);
            let bits = if ok { sink.num_bits() as u32 } else { 0 };
            (EncodedData::Unbounded(sink.data().clone()), bits)
        }
        StorageKind::Array8 => {
            let (sink, bits) = encode_array::<u8, E, V>(code, mapping, value);
            (EncodedData::Array8(sink.data().to_vec()), bits)
        }
        StorageKind::Array16 => {
            let (sink, bits) = encode_array::<u16, E, V>(code, mapping, value);
            (EncodedData::Array16(sink.data().to_vec()), bits)
        }
        StorageKind::Array32 => {
            let (sink, bits) = encode_array::<u32, E, V>(code, mapping, value);
            (EncodedData::Array32(sink.data().to_vec()), bits)
        }
        StorageKind::Array64 => {
            let (sink, bits) = encode_array::<u64, E, V>(code, mapping, value);
            (EncodedData::Array64(sink.data().to_vec()), bits)
        }
        StorageKind::Array128 => {
            let (sink, bits) = encode_array::<u128, E, V>(code, mapping, value);
            (EncodedData::Array128(sink.data().to_vec()), bits)
        }
    }
}

/// `Msb`/`Lsb` under a single name, for callers that pick bit order with a
/// runtime value (e.g. a config flag) rather than a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Msb,
    Lsb,
}

/// Runtime-dispatched sibling of [`encode`], for callers that only know the
/// bit order at runtime (config, CLI flag) rather than at the call site.
pub fn encode_dyn<V: IntegerMapping>(
    endian: Endian,
    kind: StorageKind,
    code: Code,
    mapping: Mapping,
    value: V,
) -> (EncodedData, u32) {
    match endian {
        Endian::Msb => encode::<Msb, V>(kind, code, mapping, value),
        Endian::Lsb => encode::<Lsb, V>(kind, code, mapping, value),
    }
}

/// Shorthand for [`Code::Zeta`] that panics-free-rejects `k == 0` by
/// returning `None` instead of requiring the caller to construct a
/// `NonZeroU32` by hand.
pub fn zeta_code(k: u32) -> Option<Code> {
    NonZeroU32::new(k).map(Code::Zeta)
}
