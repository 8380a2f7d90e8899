use std::num::NonZeroU32;

/// A universal code, selected by variant and (for the two parametric codes)
/// its parameter.
///
/// `Zeta`'s parameter is `NonZeroU32` so that "k ≥ 1" is enforced by the
/// type rather than re-checked at every call site; `Bl`'s `S` parameter is
/// an ordinary `u32` since `S = 0` is a meaningful, valid block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Gamma,
    Delta,
    Omega,
    Fibonacci,
    Zeta(NonZeroU32),
    Bl(u32),
}

impl Code {
    /// `Zeta(1)` and `Gamma` emit identical bit sequences for every value;
    /// this reports that collapse so callers (and tests) can treat the two
    /// interchangeably where it matters.
    pub fn is_gamma_equivalent(&self) -> bool {
        matches!(self, Code::Gamma) || matches!(self, Code::Zeta(k) if k.get() == 1)
    }
}

// `Code` stays small enough to pass by value at every call site rather than
// behind a reference, the same size discipline the teacher pins for its own
// small parameter enums.
static_assertions::const_assert!(std::mem::size_of::<Code>() <= 16);
