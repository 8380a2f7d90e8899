//! BL(S) code: a "staircase" code over blocks of size `n = 2^S`.
//!
//! Values are grouped into blocks of `n` consecutive integers; block index
//! (1-based) determines a row `K` in a triangular enumeration (row `K` has
//! `K` slots) and a column `X` (`1..=K`) within that row. The codeword
//! emits `X − 1` one bits, `K − X + 1` zero bits, a terminating one bit,
//! then an `M + S − 1`-bit suffix pinpointing the value within its block.
//!
//! `S = 0` degenerates to a code where each "block" is a single integer.

use bitstream::{BitSink, BitSource, Word};

use crate::overflow::{checked_pow2, require_positive, top_set_bit, widen_add};

/// `k(k+1)/2`, saturating rather than overflowing (`k` stays small — on the
/// order of `sqrt(2·128)` — for every value representable in `u128`).
fn tri(k: u64) -> u64 {
    match k.checked_mul(k + 1) {
        Some(v) => v / 2,
        None => u64::MAX,
    }
}

/// Smallest `K ≥ 1` with `tri(K) ≥ m`. The closed-form estimate from the
/// quadratic is only a starting point — it is nudged to the exact answer
/// by direct integer comparison, so float rounding can never produce a
/// wrong `K`.
fn solve_k(m: u64) -> u64 {
    if m == 0 {
        return 1;
    }
    let m_f = m as f64;
    let estimate = ((-1.0 + (1.0 + 8.0 * m_f).sqrt()) / 2.0).ceil();
    let mut k = if estimate < 1.0 { 1 } else { estimate as u64 };
    while k > 1 && tri(k - 1) >= m {
        k -= 1;
    }
    while tri(k) < m {
        k += 1;
    }
    k
}

pub fn encode(sink: &mut impl BitSink, value: u128, s: u32) -> bool {
    if require_positive(value).is_err() {
        return false;
    }
    let Ok(bl_n) = checked_pow2(s) else {
        return false;
    };
    let Ok(shifted) = widen_add(value, bl_n - 1) else {
        return false;
    };
    let divided = shifted >> s;
    if divided == 0 {
        return false;
    }
    let m = top_set_bit(divided) as u64;
    let k = solve_k(m);
    let x = m - tri(k - 1);
    let Ok(x32) = u32::try_from(x) else {
        return false;
    };
    let Ok(k32) = u32::try_from(k) else {
        return false;
    };
    if x32 == 0 {
        return false;
    }
    let Some(zeros_count) = k32.checked_add(1).and_then(|v| v.checked_sub(x32)) else {
        return false;
    };
    sink.append_ones(x32 - 1);
    sink.append_zeros(zeros_count);
    sink.append_ones(1);

    let Ok(m32) = u32::try_from(m) else {
        return false;
    };
    let Some(suffix_bits) = m32.checked_add(s).and_then(|v| v.checked_sub(1)) else {
        return false;
    };
    let Ok(pow_m1) = checked_pow2(m32.saturating_sub(1)) else {
        return false;
    };
    let Some(term) = bl_n.checked_mul(pow_m1 - 1) else {
        return false;
    };
    let Some(suffix) = value.checked_sub(term).and_then(|v| v.checked_sub(1)) else {
        return false;
    };
    sink.append_bits(suffix, suffix_bits);
    sink.is_valid()
}

pub fn decode<T: Word>(source: &impl BitSource, start_offset: u64, s: u32) -> (T, u32) {
    let ones_count = source.count_leading_ones(start_offset);
    if u32::try_from(ones_count).is_err() {
        return (T::ZERO, 0);
    }
    let czs = source.count_leading_zeros(start_offset + ones_count);
    if czs < 0 {
        tracing::trace!(target: "codes::bl", start_offset, s, "row/column prefix never terminated");
        return (T::ZERO, 0);
    }
    let zeros_count = czs as u64;
    let k_total = ones_count + zeros_count;
    let Some(m) = tri(k_total)
        .checked_sub(k_total)
        .and_then(|half_minus| half_minus.checked_add(ones_count))
        .and_then(|v| v.checked_add(1))
    else {
        return (T::ZERO, 0);
    };
    // tri(k_total) - k_total == k_total*(k_total-1)/2
    let Ok(m32) = u32::try_from(m) else {
        return (T::ZERO, 0);
    };
    let Some(suffix_bits) = m32.checked_add(s).and_then(|v| v.checked_sub(1)) else {
        return (T::ZERO, 0);
    };
    let prefix_len = ones_count + zeros_count + 1;
    let suffix_offset = start_offset + prefix_len;
    let (suffix, ok) = source.get_bits::<u128>(suffix_bits, suffix_offset);
    if !ok {
        return (T::ZERO, 0);
    }
    let Ok(pow_m1) = checked_pow2(m32.saturating_sub(1)) else {
        return (T::ZERO, 0);
    };
    let Ok(bl_n) = checked_pow2(s) else {
        return (T::ZERO, 0);
    };
    let Some(term) = bl_n.checked_mul(pow_m1 - 1) else {
        return (T::ZERO, 0);
    };
    let Some(value) = suffix.checked_add(term).and_then(|v| v.checked_add(1)) else {
        return (T::ZERO, 0);
    };
    if value < suffix {
        return (T::ZERO, 0);
    }
    match T::checked_from_u128(value) {
        Some(v) => (v, (prefix_len + suffix_bits as u64) as u32),
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
        assert!(!encode(&mut sink, 0, 0));
    }

    #[test]
    fn encodes_known_small_values_s0() {
        let mut sink = BitBuffer::<u16, Msb>::new();
        assert!(encode(&mut sink, 1, 0));
        assert_eq!(sink.num_bits(), 2);
        assert_eq!(sink.data(), 0b01);
    }

    #[test]
    fn encodes_known_value_s2() {
        let mut sink = BitBuffer::<u16, Msb>::new();
        assert!(encode(&mut sink, 10, 2));
        assert_eq!(sink.num_bits(), 6);
        assert_eq!(sink.data(), 0b001101);
    }

    #[test]
    fn round_trips_through_decode() {
        for s in [0u32, 1, 2, 3, 5] {
            for v in [1u128, 2, 3, 4, 7, 29, 1000, 1_000_000] {
                let mut sink = BitBuffer::<u128, Msb>::new();
                assert!(encode(&mut sink, v, s), "s={s} v={v}");
                let (decoded, bits): (u128, u32) = decode(&sink, 0, s);
                assert_eq!(decoded, v, "s={s} v={v}");
                assert_eq!(bits, sink.num_bits() as u32, "s={s} v={v}");
            }
        }
    }

    #[test]
    fn rejects_truncated_stream() {
        let mut sink = BitBuffer::<u8, Msb>::new();
        sink.append_ones(8);
        let (v, bits): (u32, u32) = decode(&sink, 0, 0);
        assert_eq!((v, bits), (0, 0));
    }
}
