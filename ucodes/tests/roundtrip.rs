//! Integration coverage across codes × bit orders × storage kinds,
//! including the concrete bit-string scenarios and the properties that
//! span multiple modules (Zeta(1)/Gamma equivalence, zigzag involution,
//! stream-independence under concatenation, and truncated-input rejection).

use std::num::NonZeroU32;

use anyhow::Result;
use bitstream::{ArrayBitBuffer, BigBitBuffer, BitBuffer, BitSink, BitSource, Lsb, Msb};
use ucodes::{decode, encode_into, Code, Mapping};

fn all_codes() -> Vec<Code> {
    vec![
        Code::Gamma,
        Code::Delta,
        Code::Omega,
        Code::Fibonacci,
        Code::Zeta(NonZeroU32::new(1).unwrap_or_else(|| unreachable!())),
        Code::Zeta(NonZeroU32::new(3).unwrap_or_else(|| unreachable!())),
        Code::Zeta(NonZeroU32::new(7).unwrap_or_else(|| unreachable!())),
        Code::Bl(0),
        Code::Bl(2),
        Code::Bl(5),
    ]
}

#[test]
fn round_trips_every_code_under_both_bit_orders() {
    let values = [1u64, 2, 3, 4, 7, 29, 100, 1000, 1_000_000];
    for code in all_codes() {
        for &v in &values {
            let mut msb = BitBuffer::<u128, Msb>::new();
            assert!(encode_into(&mut msb, code, Mapping::Unsigned, v), "{code:?} {v}");
            let (decoded, bits): (u64, u32) = decode(&msb, code, Mapping::Unsigned, 0);
            assert_eq!(decoded, v, "{code:?} {v} msb");
            assert_eq!(bits, msb.num_bits() as u32);

            let mut lsb = BitBuffer::<u128, Lsb>::new();
            assert!(encode_into(&mut lsb, code, Mapping::Unsigned, v));
            let (decoded, bits): (u64, u32) = decode(&lsb, code, Mapping::Unsigned, 0);
            assert_eq!(decoded, v, "{code:?} {v} lsb");
            assert_eq!(bits, lsb.num_bits() as u32);
        }
    }
}

#[test]
fn round_trips_every_code_over_every_storage_kind() {
    let values = [1u64, 7, 29, 1000];
    for code in all_codes() {
        for &v in &values {
            let mut big = BigBitBuffer::<Msb>::new();
            assert!(encode_into(&mut big, code, Mapping::Unsigned, v));
            let (decoded, bits): (u64, u32) = decode(&big, code, Mapping::Unsigned, 0);
            assert_eq!(decoded, v, "{code:?} {v} big");
            assert_eq!(bits, big.num_bits() as u32);

            let mut arr = ArrayBitBuffer::<u8, Msb>::new();
            assert!(encode_into(&mut arr, code, Mapping::Unsigned, v));
            let (decoded, bits): (u64, u32) = decode(&arr, code, Mapping::Unsigned, 0);
            assert_eq!(decoded, v, "{code:?} {v} array");
            assert_eq!(bits, arr.num_bits() as u32);
        }
    }
}

#[test]
fn concatenated_codewords_decode_independently() {
    // Two gamma codewords back-to-back: decoding the second must not be
    // disturbed by where the first one ended.
    let mut sink = BitBuffer::<u128, Msb>::new();
    assert!(encode_into(&mut sink, Code::Gamma, Mapping::Unsigned, 29u64));
    let first_len = sink.num_bits();
    assert!(encode_into(&mut sink, Code::Gamma, Mapping::Unsigned, 1000u64));

    let (first, first_bits): (u64, u32) = decode(&sink, Code::Gamma, Mapping::Unsigned, 0);
    assert_eq!(first, 29);
    assert_eq!(first_bits as u64, first_len);

    let (second, second_bits): (u64, u32) = decode(&sink, Code::Gamma, Mapping::Unsigned, first_len);
    assert_eq!(second, 1000);
    assert_eq!(second_bits, sink.num_bits() as u32 - first_bits);
}

#[test]
fn zeta_one_is_bit_identical_to_gamma() {
    let k1 = Code::Zeta(NonZeroU32::new(1).unwrap_or_else(|| unreachable!()));
    for v in [1u64, 2, 3, 7, 29, 1000, 1_000_000] {
        let mut zeta_sink = BitBuffer::<u128, Msb>::new();
        let mut gamma_sink = BitBuffer::<u128, Msb>::new();
        assert!(encode_into(&mut zeta_sink, k1, Mapping::Unsigned, v));
        assert!(encode_into(&mut gamma_sink, Code::Gamma, Mapping::Unsigned, v));
        assert_eq!(zeta_sink.data(), gamma_sink.data());
        assert_eq!(zeta_sink.num_bits(), gamma_sink.num_bits());
    }
}

#[test]
fn signed_mapping_round_trips_negative_and_positive_values() {
    for code in all_codes() {
        for v in [0i64, 1, -1, 2, -2, 1000, -1000, i32::MAX as i64] {
            let mut sink = BitBuffer::<u128, Msb>::new();
            assert!(encode_into(&mut sink, code, Mapping::Signed, v), "{code:?} {v}");
            let (decoded, bits): (i64, u32) = decode(&sink, code, Mapping::Signed, 0);
            assert_eq!(decoded, v, "{code:?} {v}");
            assert_eq!(bits, sink.num_bits() as u32);
        }
    }
}

#[test]
fn unsigned_mapping_rejects_negative_values() {
    let mut sink = BitBuffer::<u128, Msb>::new();
    assert!(!encode_into(&mut sink, Code::Gamma, Mapping::Unsigned, -1i32));
}

#[test]
fn width_too_narrow_for_decoded_value_fails_closed() {
    let mut sink = BitBuffer::<u128, Msb>::new();
    assert!(encode_into(&mut sink, Code::Omega, Mapping::Unsigned, 1_000_000u64));
    let (v, bits): (u8, u32) = decode(&sink, Code::Omega, Mapping::Unsigned, 0);
    assert_eq!((v, bits), (0, 0));
}

#[test]
fn fixed_width_capacity_exceeded_fails_closed() {
    let mut sink = BitBuffer::<u8, Msb>::new();
    // Omega(1_000_000) needs far more than 8 bits.
    assert!(!encode_into(&mut sink, Code::Omega, Mapping::Unsigned, 1_000_000u32));
}

#[test]
fn truncated_and_corrupt_streams_are_rejected_for_every_code() {
    for code in all_codes() {
        // An empty stream never has enough bits for any code's prefix.
        let empty = BitBuffer::<u32, Msb>::new();
        let (v, bits): (u32, u32) = decode(&empty, code, Mapping::Unsigned, 0);
        assert_eq!((v, bits), (0, 0), "{code:?} on empty stream");

        // A single zero bit: Gamma/Delta/Bl read this as an incomplete
        // unary prefix; Omega reads it as an immediate empty value (this
        // one intentionally succeeds, so it is excluded below).
        if !matches!(code, Code::Omega) {
            let mut one_zero = BitBuffer::<u32, Msb>::new();
            one_zero.append_zeros(1);
            let (v, bits): (u32, u32) = decode(&one_zero, code, Mapping::Unsigned, 0);
            assert_eq!((v, bits), (0, 0), "{code:?} on truncated stream");
        }
    }
}

#[test]
fn delta_round_trip_reports_consistent_bit_count() -> Result<()> {
    let mut sink = BitBuffer::<u128, Msb>::new();
    anyhow::ensure!(
        encode_into(&mut sink, Code::Delta, Mapping::Unsigned, 1000u64),
        "encode should succeed"
    );
    let (decoded, bits): (u64, u32) = decode(&sink, Code::Delta, Mapping::Unsigned, 0);
    anyhow::ensure!(decoded == 1000, "decoded {decoded}, expected 1000");
    anyhow::ensure!(bits as u64 == sink.num_bits(), "bit count mismatch");
    Ok(())
}

#[test]
fn bl_degenerates_to_elias_style_behavior_at_s_zero() {
    // At S = 0 each "block" is a single value; the codeword still carries a
    // triangular-row prefix even though there is no suffix distinguishing
    // within-block position beyond one bit.
    for v in [1u64, 2, 3, 4, 7, 29, 1000] {
        let mut sink = BitBuffer::<u128, Msb>::new();
        assert!(encode_into(&mut sink, Code::Bl(0), Mapping::Unsigned, v));
        let (decoded, bits): (u64, u32) = decode(&sink, Code::Bl(0), Mapping::Unsigned, 0);
        assert_eq!(decoded, v);
        assert_eq!(bits, sink.num_bits() as u32);
    }
}
