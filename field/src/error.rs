//! Error taxonomy for the public-input-only (`_vartime`, parsing) APIs.
//!
//! Constant-time routines never return this type: `inv(0) = 0`,
//! `sqrt_if_square` returns a boolean companion flag rather than failing.
//! This enum exists only for the boundary where a public input really can be
//! malformed or non-invertible, grounded in `primefield/src/error.rs`'s
//! hand-rolled `Display`/`Error` pair (no `thiserror`, to keep the crate
//! `no_std` without an extra proc-macro dependency on the hot path).
use core::fmt;

/// Errors surfaced by the `_vartime` and encoding boundary of the arithmetic core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// A variable-time inversion was attempted on a zero element.
    NotInvertible,
    /// A candidate value is not on the curve it was decoded against.
    NotOnCurve,
    /// A variable-time square root was attempted on a non-residue.
    NotSquare,
    /// An input byte string did not parse to a valid field/curve element
    /// (wrong length, or value out of range of the modulus/order).
    MalformedEncoding,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CoreError::NotInvertible => "value has no multiplicative inverse",
            CoreError::NotOnCurve => "point does not satisfy the curve equation",
            CoreError::NotSquare => "value is not a quadratic residue",
            CoreError::MalformedEncoding => "malformed byte encoding",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for CoreError {}
