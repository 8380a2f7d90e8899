#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::manual_assert)]

/*!
# `bitstream`

`bitstream` is the storage layer underneath the variable-length universal
integer codes in the `codes` crate: append-only bit sinks and random-access
bit sources over three storage shapes, each parameterized by a compile-time
bit-order tag.

#### The modules of this crate

* [`endian`](crate::endian) — the [`endian::BitOrder`] trait and its two
  implementors, [`endian::Msb`] and [`endian::Lsb`].
* [`primitive`](crate::primitive) — the [`primitive::Word`] trait describing
  `u8`, `u16`, `u32`, `u64`, and `u128` as storage words.
* [`buffer`](crate::buffer) — the three [`buffer::BitSink`] implementors:
  [`buffer::BitBuffer`] (one fixed-width word), [`buffer::BigBitBuffer`] (an
  unbounded `BigUint`), and [`buffer::ArrayBitBuffer`] (a growable array of
  words).
* [`source`](crate::source) — the read-only [`source::BitSource`]
  counterpart, implemented for all three storage structs above.
* [`error`](crate::error) — [`error::BitstreamError`], naming the failure
  reasons otherwise collapsed into the `bool`/`(value, bits)` sentinel
  convention every public function here returns.

#### Why three storage shapes?

A codeword's length is rarely a multiple of a machine word's width, and
callers disagree about how many codewords they need to hold at once: one
codeword in isolation fits a single fixed-width word; a handful of
concatenated codewords may still fit if the caller is willing to bound their
combined length up front; an open-ended stream of codewords needs to grow
without a fixed ceiling. [`buffer::BitBuffer`], [`buffer::ArrayBitBuffer`],
and [`buffer::BigBitBuffer`] cover those three cases with the same
[`buffer::BitSink`] vocabulary, so the six encoders in `codes` are written
once against the trait and instantiated against whichever storage a caller
picked.

#### Why a compile-time bit-order tag instead of a runtime flag?

Every append and every read goes through [`endian::BitOrder`], whose two
implementors are zero-sized marker types. Because the bit order is a type
parameter rather than a stored flag, the compiler monomorphizes each
instantiation separately: there is no per-call branch on endianness, and a
caller cannot accidentally mix `Msb` writes with `Lsb` reads without it
showing up as a type error.
*/

pub mod buffer;
pub mod endian;
pub mod error;
pub mod primitive;
pub mod source;

pub use buffer::{ArrayBitBuffer, BigBitBuffer, BitBuffer, BitSink};
pub use endian::{BitOrder, Lsb, Msb};
pub use error::{BitResult, BitstreamError};
pub use primitive::Word;
pub use source::BitSource;
