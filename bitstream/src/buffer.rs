#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::manual_assert)]

//! The three `BitSink` storage backends: a single fixed-width word, an
//! unbounded `BigUint`, and a growable array of fixed-width words.
//!
//! All three are append-only and mutated only through an exclusive
//! reference; none of them ever shrink. Two concurrent writers on the same
//! buffer is a data race (unsupported, per the single-threaded model this
//! crate assumes); the types below carry no interior mutability so the
//! compiler already refuses that by construction.

use std::marker::PhantomData;

use num_bigint::BigUint;

use crate::endian::{mask, shr0, BitOrder, Chunk};
use crate::error::{BitResult, BitstreamError};
use crate::primitive::Word;

mod sealed {
    pub trait Sealed {}
}

/// The shared append/validity vocabulary of §4.1, closed over exactly the
/// three storage kinds below.
pub trait BitSink: sealed::Sealed {
    /// Extends the logical bit sequence with `n` zero bits.
    fn append_zeros(&mut self, n: u32);
    /// Extends the logical bit sequence with `n` one bits.
    fn append_ones(&mut self, n: u32);
    /// Extends the logical bit sequence with the low-order `n` bits of
    /// `bits`, MSB-first (bit `n - 1` of `bits` is the first bit appended).
    fn append_bits(&mut self, bits: u128, n: u32);
    /// `true` unless a fixed-width buffer has overflowed its capacity.
    fn is_valid(&self) -> bool;
    /// Total number of meaningful bits appended so far.
    fn num_bits(&self) -> u64;
}

// ---------------------------------------------------------------------
// BitBuffer: a single fixed-width word.
// ---------------------------------------------------------------------

/// Fixed-width single-word bit-buffer storage. `is_valid()` becomes `false`
/// once an append would exceed `W::BITS`; the buffer's contents after that
/// point are unspecified but never touch memory outside `self`.
#[derive(Debug, Clone)]
pub struct BitBuffer<W: Word, E: BitOrder> {
    value: W,
    used_bits: u32,
    valid: bool,
    _order: PhantomData<E>,
}

impl<W: Word, E: BitOrder> BitBuffer<W, E> {
    pub fn new() -> Self {
        Self {
            value: W::ZERO,
            used_bits: 0,
            valid: true,
            _order: PhantomData,
        }
    }

    /// The raw storage word. Bit positions at or above `num_bits()` are
    /// zero as long as the buffer is valid.
    pub fn data(&self) -> W {
        self.value
    }

    pub(crate) fn raw(&self) -> (u128, u32) {
        (self.value.to_u128(), self.used_bits)
    }

    /// Returns `Err(BitstreamError::CapacityExceeded)` once `n` more bits
    /// would not fit in `W`; the caller (the `BitSink` impl below) collapses
    /// this back to the `is_valid()` flag the public contract documents,
    /// per the "internal `Result`, sentinel at the edge" convention this
    /// workspace follows throughout.
    fn append_chunk(&mut self, bits: u128, n: u32) -> BitResult<()> {
        if n == 0 {
            return Ok(());
        }
        let new_used = self.used_bits + n;
        let result = if new_used > W::BITS {
            self.valid = false;
            let err = BitstreamError::CapacityExceeded;
            tracing::trace!(
                target: "bitstream",
                word = W::NAME,
                order = E::NAME,
                used_bits = self.used_bits,
                n,
                width = W::BITS,
                error = %err,
                "fixed-width buffer append exceeds capacity"
            );
            Err(err)
        } else {
            Ok(())
        };
        let folded = E::fold(self.value.to_u128(), self.used_bits, bits, n);
        self.value = W::from_u128_truncating(folded);
        self.used_bits = new_used;
        result
    }
}

impl<W: Word, E: BitOrder> Default for BitBuffer<W, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word, E: BitOrder> sealed::Sealed for BitBuffer<W, E> {}

impl<W: Word, E: BitOrder> BitSink for BitBuffer<W, E> {
    fn append_zeros(&mut self, n: u32) {
        let _ = self.append_chunk(0, n);
    }

    fn append_ones(&mut self, n: u32) {
        let _ = self.append_chunk(mask(n), n);
    }

    fn append_bits(&mut self, bits: u128, n: u32) {
        let _ = self.append_chunk(bits, n);
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn num_bits(&self) -> u64 {
        self.used_bits as u64
    }
}

// ---------------------------------------------------------------------
// BigBitBuffer: unbounded `BigUint` storage.
// ---------------------------------------------------------------------

/// Unbounded bit-buffer storage backed by `num_bigint::BigUint`. Always
/// valid: growth has no fixed ceiling.
#[derive(Debug, Clone)]
pub struct BigBitBuffer<E: BitOrder> {
    value: BigUint,
    used_bits: u64,
    _order: PhantomData<E>,
}

impl<E: BitOrder> BigBitBuffer<E> {
    pub fn new() -> Self {
        Self {
            value: BigUint::from(0u32),
            used_bits: 0,
            _order: PhantomData,
        }
    }

    pub fn data(&self) -> &BigUint {
        &self.value
    }

    pub(crate) fn raw(&self) -> (&BigUint, u64) {
        (&self.value, self.used_bits)
    }

    fn append_chunk(&mut self, bits: u128, n: u32) {
        if n == 0 {
            return;
        }
        self.value = E::fold_unbounded(&self.value, self.used_bits, bits, n);
        self.used_bits += n as u64;
    }
}

impl<E: BitOrder> Default for BigBitBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BitOrder> sealed::Sealed for BigBitBuffer<E> {}

impl<E: BitOrder> BitSink for BigBitBuffer<E> {
    fn append_zeros(&mut self, n: u32) {
        self.append_chunk(0, n);
    }

    fn append_ones(&mut self, n: u32) {
        self.append_chunk(mask(n), n);
    }

    fn append_bits(&mut self, bits: u128, n: u32) {
        self.append_chunk(bits, n);
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn num_bits(&self) -> u64 {
        self.used_bits
    }
}

// ---------------------------------------------------------------------
// ArrayBitBuffer: growable Vec<W> storage.
// ---------------------------------------------------------------------

/// Growable array-of-words bit-buffer storage. Always valid. All elements
/// before the last are fully used; the last element holds `used_bits_in_last`
/// meaningful bits (1..=W::BITS when the array is non-empty).
#[derive(Debug, Clone)]
pub struct ArrayBitBuffer<W: Word, E: BitOrder> {
    elems: Vec<W>,
    used_bits_in_last: u32,
    _order: PhantomData<E>,
}

impl<W: Word, E: BitOrder> ArrayBitBuffer<W, E> {
    pub fn new() -> Self {
        Self {
            elems: Vec::new(),
            used_bits_in_last: 0,
            _order: PhantomData,
        }
    }

    pub fn data(&self) -> &[W] {
        &self.elems
    }

    pub(crate) fn raw(&self) -> (&[W], u32) {
        (&self.elems, self.used_bits_in_last)
    }

    /// Grows the array by one more element whenever the current last
    /// element is full (or there is no element yet), returning how many
    /// bits of room the (possibly just-grown) last element has left.
    fn ensure_room(&mut self) -> u32 {
        if self.elems.is_empty() || self.used_bits_in_last == W::BITS {
            self.elems.push(W::ZERO);
            self.used_bits_in_last = 0;
        }
        W::BITS - self.used_bits_in_last
    }

    fn fold_into_last(&mut self, new_bits: u128, take: u32) {
        #[allow(clippy::indexing_slicing)]
        let idx = self.elems.len() - 1;
        let elem_bits = self.elems[idx].to_u128();
        let folded = E::array_fold(elem_bits, W::BITS, self.used_bits_in_last, new_bits, take);
        self.elems[idx] = W::from_u128_truncating(folded);
        self.used_bits_in_last += take;
    }

    /// `n` may be arbitrarily large (unlike `append_bits`, which is bounded
    /// to 128 meaningful bits by its `u128` argument): zero- and one-runs
    /// grow the array element by element without ever materializing the
    /// whole run as a single integer.
    fn append_run(&mut self, bits_per_full_chunk: u128, mut n: u32) {
        while n > 0 {
            let space = self.ensure_room();
            let take = n.min(space);
            self.fold_into_last(bits_per_full_chunk & mask(take), take);
            n -= take;
        }
    }

    fn append_chunk(&mut self, bits: u128, n: u32) {
        if n == 0 {
            return;
        }
        let mut consumed = 0u32;
        let mut remaining = n;
        while remaining > 0 {
            let space = self.ensure_room();
            let take = remaining.min(space);
            let shift_down = n - consumed - take;
            let sub_chunk = shr0(bits, shift_down) & mask(take);
            self.fold_into_last(sub_chunk, take);
            consumed += take;
            remaining -= take;
        }
    }
}

impl<W: Word, E: BitOrder> Default for ArrayBitBuffer<W, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word, E: BitOrder> sealed::Sealed for ArrayBitBuffer<W, E> {}

impl<W: Word, E: BitOrder> BitSink for ArrayBitBuffer<W, E> {
    fn append_zeros(&mut self, n: u32) {
        self.append_run(0, n);
    }

    fn append_ones(&mut self, n: u32) {
        self.append_run(Chunk::MAX, n);
    }

    fn append_bits(&mut self, bits: u128, n: u32) {
        self.append_chunk(bits, n);
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn num_bits(&self) -> u64 {
        if self.elems.is_empty() {
            0
        } else {
            W::BITS as u64 * (self.elems.len() as u64 - 1) + self.used_bits_in_last as u64
        }
    }
}
