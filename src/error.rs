//! Error types for the signaling (`checked_*` / `try_*`) halves of the API.
//!
//! The posit operators themselves never fail: an illegal operand combination degrades to the
//! [NaR](crate::Posit::NAR) sentinel, which every operator absorbs. Callers that want to *catch*
//! those conditions instead use the `checked_*` forms, which report one of the variants below.

use thiserror::Error;

/// An illegal operand combination in one of the four arithmetic operators.
///
/// Returned by [`Posit::checked_add`](crate::Posit::checked_add) and friends; the corresponding
/// operator traits (`+`, `-`, `*`, `/`) produce [`Posit::NAR`](crate::Posit::NAR) for the same
/// inputs.
#[derive(Error, Debug)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
  /// An operand of `+`, `-` or `*` is NaR.
  #[error("operand is NaR")]
  OperandIsNar,

  /// The numerator of a division is NaR.
  #[error("numerator is NaR")]
  NumeratorIsNar,

  /// The divisor of a division is NaR.
  #[error("divide by NaR")]
  DivideByNar,

  /// The divisor of a division is zero.
  #[error("divide by zero")]
  DivideByZero,
}

/// A failed quire accumulation.
///
/// Unlike posit arithmetic, which saturates rather than overflow, the quire's entire purpose is
/// *exact* accumulation, so an accumulation it cannot represent exactly is always surfaced: the
/// `try_*` forms return this error and the operator forms panic. The accumulation that failed
/// did not modify the quire; retry with a wider quire type (more capacity bits).
#[derive(Error, Debug)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum QuireError {
  /// The accumulated value needs bits above the quire's capacity segment.
  #[error("value exceeds the quire's dynamic range plus capacity")]
  RangeExceeded,
}

/// A malformed or mismatched string passed to [`Posit`](crate::Posit)'s `FromStr`.
#[derive(Error, Debug)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
  /// Neither the canonical `"<nbits>.<es>x<HEXBITS>p"` form nor a decimal number.
  #[error("malformed posit literal")]
  Malformed,

  /// A canonical-form literal whose `<nbits>.<es>` prefix names a different posit
  /// configuration than the one being parsed into.
  #[error("posit literal is for a {found_n}.{found_es} configuration, expected {want_n}.{want_es}")]
  ConfigMismatch {
    found_n: u32,
    found_es: u32,
    want_n: u32,
    want_es: u32,
  },

  /// A canonical-form literal whose hex digits don't fit in `nbits` bits.
  #[error("posit literal has more bits than the configuration")]
  TooManyBits,
}
