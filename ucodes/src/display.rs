//! A `Debug`/`Display` wrapper that renders an encoded codeword as a string
//! of `0`/`1` characters in write order, grouped in nibbles for readability
//! — the same chunked-grouping idea used elsewhere in the workspace for hex
//! rendering, applied to bits instead of hex digits.

use std::fmt;

use bitstream::BitSource;

/// Borrows a [`BitSource`] and a bit count and prints the bits it covers,
/// MSB-first, as `0`/`1` characters with a space every four bits.
///
/// ```
/// use bitstream::{BitBuffer, Msb};
/// use ucodes::CodewordDebug;
///
/// let mut sink = BitBuffer::<u16, Msb>::new();
/// bitstream::BitSink::append_bits(&mut sink, 0b1011, 4);
/// let rendered = format!("{}", CodewordDebug::new(&sink, 0, 4));
/// assert_eq!(rendered, "1011");
/// ```
pub struct CodewordDebug<'a, S: BitSource> {
    source: &'a S,
    start_offset: u64,
    num_bits: u64,
}

impl<'a, S: BitSource> CodewordDebug<'a, S> {
    pub fn new(source: &'a S, start_offset: u64, num_bits: u64) -> Self {
        Self {
            source,
            start_offset,
            num_bits,
        }
    }

    fn write_bits(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_bits {
            if i > 0 && i % 4 == 0 {
                f.write_str(" ")?;
            }
            match self.source.get_bit(self.start_offset + i) {
                Some(true) => f.write_str("1")?,
                Some(false) => f.write_str("0")?,
                None => f.write_str("?")?,
            }
        }
        Ok(())
    }
}

impl<'a, S: BitSource> fmt::Debug for CodewordDebug<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Codeword(")?;
        self.write_bits(f)?;
        f.write_str(")")
    }
}

impl<'a, S: BitSource> fmt::Display for CodewordDebug<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_bits(f)
    }
}
