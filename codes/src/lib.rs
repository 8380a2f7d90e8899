/*!
# `codes`

The six universal integer codes (Elias gamma/delta/omega, Fibonacci,
Zeta(k), BL(S)), expressed purely against the [`bitstream`] crate's
[`BitSink`]/[`BitSource`] traits.

Every encoder takes a `value: u128` — wide enough to serve every supported
target integer width up to `u128` itself, so callers never need to widen
further before encoding. Every decoder is generic over the caller's target
type `T: Word` and narrows only at the very end, once the full decoded
value is known; this keeps the six algorithms' internals uniform (all
intermediate arithmetic happens in `u128`) regardless of what width the
caller ultimately wants the result in.

#### The modules of this crate

* [`descriptor`] — the [`descriptor::Code`] enum.
* [`gamma`], [`delta`], [`omega`], [`fibonacci`], [`zeta`], [`bl`] — one
  encoder/decoder pair per code, each matching spec.md's namesake.
* [`overflow`] — shared overflow-safe arithmetic helpers.
*/

pub mod bl;
pub mod delta;
pub mod descriptor;
pub mod fibonacci;
pub mod gamma;
pub mod omega;
pub(crate) mod overflow;
pub mod zeta;

pub use descriptor::Code;

use bitstream::{BitSink, BitSource, Word};

/// Dispatches to the encoder matching `code`. See each submodule for the
/// exact bit layout.
pub fn encode(sink: &mut impl BitSink, code: Code, value: u128) -> bool {
    match code {
        Code::Gamma => gamma::encode(sink, value),
        Code::Delta => delta::encode(sink, value),
        Code::Omega => omega::encode(sink, value),
        Code::Fibonacci => fibonacci::encode(sink, value),
        Code::Zeta(k) => zeta::encode(sink, value, k),
        Code::Bl(s) => bl::encode(sink, value, s),
    }
}

/// Dispatches to the decoder matching `code`, starting at `start_offset`
/// bits into `source`. Returns `(value, 0)` on any failure.
pub fn decode<T: Word>(source: &impl BitSource, code: Code, start_offset: u64) -> (T, u32) {
    match code {
        Code::Gamma => gamma::decode(source, start_offset),
        Code::Delta => delta::decode(source, start_offset),
        Code::Omega => omega::decode(source, start_offset),
        Code::Fibonacci => fibonacci::decode(source, start_offset),
        Code::Zeta(k) => zeta::decode(source, start_offset, k),
        Code::Bl(s) => bl::decode(source, start_offset, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream::{BitBuffer, Msb};
    use std::num::NonZeroU32;

    #[test]
    fn dispatches_to_the_right_algorithm() {
        for code in [
            Code::Gamma,
            Code::Delta,
            Code::Omega,
            Code::Fibonacci,
            Code::Zeta(NonZeroU32::new(3).unwrap_or_else(|| unreachable!())),
            Code::Bl(2),
        ] {
            let mut sink = BitBuffer::<u128, Msb>::new();
            assert!(encode(&mut sink, code, 29));
            let (v, bits): (u128, u32) = decode(&sink, code, 0);
            assert_eq!(v, 29);
            assert_eq!(bits, sink.num_bits() as u32);
        }
    }

    #[test]
    fn zeta_one_is_gamma_equivalent() {
        let k1 = Code::Zeta(NonZeroU32::new(1).unwrap_or_else(|| unreachable!()));
        assert!(k1.is_gamma_equivalent());
        assert!(Code::Gamma.is_gamma_equivalent());
        assert!(!Code::Delta.is_gamma_equivalent());
    }
}
