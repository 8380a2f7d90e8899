#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::manual_assert)]

//! The read-only counterpart of [`crate::buffer`]: random-access scans over
//! the same three storage shapes, used by the six decoders in `codes`.
//!
//! Every implementor here is a borrowed, `Copy`/`Clone`-cheap handle with no
//! interior mutability, so concurrent readers over the same buffer (which
//! §5 of the spec this crate implements explicitly allows) are safe for
//! free — there is simply nothing to race on.

use crate::buffer::{ArrayBitBuffer, BigBitBuffer, BitBuffer};
use crate::endian::BitOrder;
use crate::error::{BitResult, BitstreamError};
use crate::primitive::Word;

/// Narrows a raw `u128` chunk into `T`, or `Err(BitstreamError::TargetTooNarrow)`
/// if the value does not fit — the one failure reason every `get_bits` impl
/// below shares once the bounds check has passed.
fn narrow<T: Word>(chunk: u128) -> BitResult<T> {
    T::checked_from_u128(chunk).ok_or(BitstreamError::TargetTooNarrow)
}

/// Random-access, read-only view over a bit sequence.
pub trait BitSource {
    /// Total number of meaningful bits in the source.
    fn total_bits(&self) -> u64;

    /// Reads `n` bits starting at logical offset `off`, MSB-first (the bit
    /// at `off` becomes the high bit of the result). Fails if fewer than
    /// `n` bits are available, or if the value does not fit in `T`.
    fn get_bits<T: Word>(&self, n: u32, off: u64) -> (T, bool);

    /// Reads a single bit as `Some(true/false)`, or `None` past the end of
    /// the source.
    fn get_bit(&self, off: u64) -> Option<bool> {
        if off >= self.total_bits() {
            return None;
        }
        let (v, ok) = self.get_bits::<u8>(1, off);
        if ok {
            Some(v == 1)
        } else {
            None
        }
    }

    /// Number of consecutive zero bits starting at `off` before the next
    /// one bit. Returns `-1` if the scan reaches end-of-stream without
    /// finding a one (the sentinel "no one found").
    fn count_leading_zeros(&self, off: u64) -> i64 {
        let mut i = off;
        loop {
            match self.get_bit(i) {
                None => return -1,
                Some(true) => return (i - off) as i64,
                Some(false) => i += 1,
            }
        }
    }

    /// Number of consecutive one bits starting at `off`. Unlike
    /// [`Self::count_leading_zeros`] this has no failure sentinel: a run of
    /// ones bounded by end-of-stream simply returns the run length.
    fn count_leading_ones(&self, off: u64) -> u64 {
        let mut i = off;
        loop {
            match self.get_bit(i) {
                Some(true) => i += 1,
                _ => return i - off,
            }
        }
    }
}

impl<W: Word, E: BitOrder> BitSource for BitBuffer<W, E> {
    fn total_bits(&self) -> u64 {
        self.num_bits()
    }

    fn get_bits<T: Word>(&self, n: u32, off: u64) -> (T, bool) {
        if n == 0 {
            return (T::ZERO, true);
        }
        let Ok(off32) = u32::try_from(off) else {
            return (T::ZERO, false);
        };
        if off + n as u64 > self.total_bits() {
            let err = BitstreamError::NotFound;
            tracing::trace!(target: "bitstream", n, off, error = %err, "short read");
            return (T::ZERO, false);
        }
        let (value, used_bits) = self.raw();
        let chunk = E::extract(value, used_bits, off32, n);
        match narrow::<T>(chunk) {
            Ok(v) => (v, true),
            Err(err) => {
                tracing::trace!(target: "bitstream", n, off, error = %err, "get_bits failed");
                (T::ZERO, false)
            }
        }
    }
}

impl<E: BitOrder> BitSource for BigBitBuffer<E> {
    fn total_bits(&self) -> u64 {
        self.num_bits()
    }

    fn get_bits<T: Word>(&self, n: u32, off: u64) -> (T, bool) {
        if n == 0 {
            return (T::ZERO, true);
        }
        if off + n as u64 > self.total_bits() {
            let err = BitstreamError::NotFound;
            tracing::trace!(target: "bitstream", n, off, error = %err, "short read");
            return (T::ZERO, false);
        }
        let (value, used_bits) = self.raw();
        let chunk = E::extract_unbounded(value, used_bits, off, n);
        match narrow::<T>(chunk) {
            Ok(v) => (v, true),
            Err(err) => {
                tracing::trace!(target: "bitstream", n, off, error = %err, "get_bits failed");
                (T::ZERO, false)
            }
        }
    }
}

impl<W: Word, E: BitOrder> BitSource for ArrayBitBuffer<W, E> {
    fn total_bits(&self) -> u64 {
        self.num_bits()
    }

    fn get_bits<T: Word>(&self, n: u32, off: u64) -> (T, bool) {
        if n == 0 {
            return (T::ZERO, true);
        }
        if off + n as u64 > self.total_bits() {
            let err = BitstreamError::NotFound;
            tracing::trace!(target: "bitstream", n, off, error = %err, "short read");
            return (T::ZERO, false);
        }
        let (elems, used_in_last) = self.raw();
        let width = W::BITS as u64;
        let mut acc: u128 = 0;
        let mut remaining = n;
        let mut cur_off = off;
        while remaining > 0 {
            let elem_idx = (cur_off / width) as usize;
            let Some(elem) = elems.get(elem_idx) else {
                let err = BitstreamError::NotFound;
                tracing::trace!(target: "bitstream", n, off, error = %err, "element index out of range");
                return (T::ZERO, false);
            };
            let bit_in_elem = (cur_off % width) as u32;
            let used = if elem_idx + 1 == elems.len() {
                used_in_last
            } else {
                W::BITS
            };
            let avail = used.saturating_sub(bit_in_elem);
            if avail == 0 {
                let err = BitstreamError::NotFound;
                tracing::trace!(target: "bitstream", n, off, error = %err, "no bits available at offset");
                return (T::ZERO, false);
            }
            let take = remaining.min(avail);
            let sub = E::array_extract(elem.to_u128(), W::BITS, used, bit_in_elem, take);
            acc = (acc << take) | sub;
            remaining -= take;
            cur_off += take as u64;
        }
        match narrow::<T>(acc) {
            Ok(v) => (v, true),
            Err(err) => {
                tracing::trace!(target: "bitstream", n, off, error = %err, "get_bits failed");
                (T::ZERO, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BitSink;
    use crate::endian::{Lsb, Msb};

    #[test]
    fn count_leading_zeros_finds_one_bit() {
        let mut b = BitBuffer::<u16, Msb>::new();
        b.append_zeros(4);
        b.append_ones(1);
        b.append_zeros(3);
        assert_eq!(BitSource::count_leading_zeros(&b, 0), 4);
        assert_eq!(BitSource::count_leading_zeros(&b, 5), -1);
    }

    #[test]
    fn count_leading_ones_runs_to_end_of_stream() {
        let mut b = BitBuffer::<u8, Msb>::new();
        b.append_ones(5);
        assert_eq!(BitSource::count_leading_ones(&b, 0), 5);
    }

    #[test]
    fn get_bits_rejects_short_reads_and_narrow_targets() {
        let mut b = BitBuffer::<u16, Msb>::new();
        b.append_bits(0b1_1111_1111, 9); // value 511 in 9 bits
        let (_v, ok) = BitSource::get_bits::<u8>(&b, 9, 0);
        assert!(!ok, "511 does not fit in u8");
        let (_v, ok) = BitSource::get_bits::<u16>(&b, 10, 0);
        assert!(!ok, "only 9 bits are available");
    }

    #[test]
    fn array_get_bits_spans_element_boundary() {
        let mut a = ArrayBitBuffer::<u8, Msb>::new();
        a.append_bits(0b1111_1111, 8);
        a.append_bits(0b101, 3);
        let (v, ok) = BitSource::get_bits::<u16>(&a, 11, 0);
        assert!(ok);
        assert_eq!(v, 0b1111_1111_101);
    }

    #[test]
    fn lsb_array_get_bits_spans_element_boundary() {
        let mut a = ArrayBitBuffer::<u8, Lsb>::new();
        a.append_bits(0b1111_1111, 8);
        a.append_bits(0b101, 3);
        let (v, ok) = BitSource::get_bits::<u16>(&a, 11, 0);
        assert!(ok);
        assert_eq!(v, 0b1111_1111_101);
    }

    #[test]
    fn big_buffer_get_bits_matches_fixed_word() {
        let mut big = BigBitBuffer::<Msb>::new();
        big.append_bits(0b10110, 5);
        let mut small = BitBuffer::<u8, Msb>::new();
        small.append_bits(0b10110, 5);
        let (bv, bok) = BitSource::get_bits::<u8>(&big, 5, 0);
        let (sv, sok) = BitSource::get_bits::<u8>(&small, 5, 0);
        assert!(bok && sok);
        assert_eq!(bv, sv);
    }
}
