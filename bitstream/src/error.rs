#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::manual_assert)]

//! Named failure reasons, kept around even though every public function in
//! `bitstream`/`codes`/`ucodes` reports failure through the sentinel pair
//! `bool` / `(value, num_bits_consumed)` with `0` meaning failure rather
//! than a `Result`. The sentinel convention is what every storage backend's
//! fixed-width and array callers actually need to check on a hot path; this
//! enum exists for callers and tests that want to name *which* of the
//! sentinel failure modes occurred (captured below, and in the matching
//! `tracing` events emitted at the failure sites).

/// Why an append, a decode, or an integer mapping step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BitstreamError {
    #[error("append would exceed the fixed-width buffer's capacity")]
    CapacityExceeded,
    #[error("no terminating one bit was found before the end of the stream")]
    NotFound,
    #[error("decoded value does not fit in the caller's target integer width")]
    TargetTooNarrow,
    #[error("arithmetic overflow computing a code length or value")]
    Overflow,
    #[error("encoder input must be a positive integer")]
    NonPositiveInput,
}

pub type BitResult<T> = Result<T, BitstreamError>;
