#![cfg_attr(not(test), no_std)]
//! Posit arithmetic — tapered-precision binary numbers — together with the *quire*, the wide
//! fixed-point accumulator that lets a whole dot product round exactly once.
//!
//! # Introduction
//!
//! Posits are an alternative floating point format with a variable-length exponent encoding: the
//! closer a value is to ±1, the more fraction bits it gets. This crate implements the bit-level
//! codec, the four arithmetic operators with correct round-to-nearest-even, and the quire, and
//! is meant for studying the numerical behaviour (rounding error, dynamic range, catastrophic
//! cancellation) of posit configurations against IEEE-754.
//!
//! Useful background if the format is new to you:
//!
//!   - [Posit standard](https://posithub.org/docs/posit_standard-2.pdf) (2022)
//!   - [Original extended paper](https://posithub.org/docs/Posits4.pdf) (2017)
//!
//! # Usage
//!
//! ```
//! // Use the standard posit types, or define your own configuration.
//! # use tapered_posit::Posit;
//! use tapered_posit::{p8, p16, p32, q32};  // Standard: n bits, 2 exponent bits
//! type MyPosit = Posit<24, 3, i32>;  // Non-standard: 24 bits, 3-bit exponent field
//!
//! // Create posits from ints, IEEE floats, a raw bit pattern, or constants.
//! # use tapered_posit::{RoundFrom, RoundInto};
//! let a = p32::round_from(2.71_f64);
//! let b = p32::round_from(42_i32);
//! let c = p32::from_bits(0x7f001337);
//! let d = p32::MIN_POSITIVE;
//!
//! // The usual operators round once per operation...
//! assert!(p16::round_from(2.14_f32) + p16::ONE == 3.14_f32.round_into());
//! assert_eq!(p8::ONE.to_bits(), 0b01000000);
//!
//! // ...while a reduction through the quire rounds once in total.
//! let x = [a, b, d];
//! let y = [b, a, d];
//! let exact_once: p32 = q32::fused_dot(&x, &y);
//! ```
//!
//! # Errors
//!
//! Operators silently absorb the [NaR](Posit::NAR) sentinel; the `checked_*` and `try_*` forms
//! surface the same conditions as [`ArithmeticError`] / [`QuireError`] values instead. Pick per
//! call site; both run the same kernels.

mod error;
mod posit;
mod underlying;

pub use error::{ArithmeticError, ParseError, QuireError};
pub use posit::convert::{RoundFrom, RoundInto};
pub use posit::quire::{Quire, dot};
pub use posit::Posit;
pub use underlying::Int;

/// Standard-defined 8-bit posit (with 2-bit exponent field).
#[allow(non_camel_case_types)]
pub type p8 = Posit<8, 2, i8>;

/// Standard-defined 16-bit posit (with 2-bit exponent field).
#[allow(non_camel_case_types)]
pub type p16 = Posit<16, 2, i16>;

/// Standard-defined 32-bit posit (with 2-bit exponent field).
#[allow(non_camel_case_types)]
pub type p32 = Posit<32, 2, i32>;

/// Standard-defined 64-bit posit (with 2-bit exponent field).
#[allow(non_camel_case_types)]
pub type p64 = Posit<64, 2, i64>;

/// Standard-defined quire for [`p8`] (128 bits).
#[allow(non_camel_case_types)]
pub type q8 = Quire<8, 2, 2>;

/// Standard-defined quire for [`p16`] (256 bits).
#[allow(non_camel_case_types)]
pub type q16 = Quire<16, 2, 4>;

/// Standard-defined quire for [`p32`] (512 bits).
#[allow(non_camel_case_types)]
pub type q32 = Quire<32, 2, 8>;

/// Standard-defined quire for [`p64`] (1024 bits).
#[allow(non_camel_case_types)]
pub type q64 = Quire<64, 2, 16>;

/// Number of cases for the randomised test suites; exhaustive enumeration takes over from here
/// for the narrow configurations.
#[cfg(test)]
pub(crate) const PROPTEST_CASES: u32 = if cfg!(debug_assertions) { 0x800 } else { 0x1_0000 };

/// Re-export some internals for benchmarking purposes, only on `feature = "bench"`.
#[cfg(feature = "bench")]
mod bench;
