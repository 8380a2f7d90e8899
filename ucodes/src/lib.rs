/*!
# `ucodes`

The convenience facade over [`bitstream`] and [`codes`]: turns a plain
`i64`/`u32`/etc. value and a [`Code`] choice into a concrete encoded buffer
(or back), without the caller having to hand-assemble a `BitBuffer<W, E>`
and thread the non-negative/zigzag mapping through themselves.

#### The modules of this crate

* [`map`] — the §4.4 integer-mapping helpers ([`map::IntegerMapping`]).
* [`facade`] — [`facade::encode`]/[`facade::decode`]/[`facade::encode_into`],
  the allocating and non-allocating entry points.
* [`display`] — [`display::CodewordDebug`], a bit-string pretty-printer for
  logs and test failure messages.
*/

pub mod display;
pub mod facade;
pub mod map;

pub use bitstream::{ArrayBitBuffer, BigBitBuffer, BitBuffer, BitOrder, BitSink, BitSource, Lsb, Msb};
pub use codes::Code;
pub use display::CodewordDebug;
pub use facade::{decode, encode, encode_dyn, encode_into, zeta_code, EncodedData, Endian, Mapping, StorageKind};
pub use map::IntegerMapping;
