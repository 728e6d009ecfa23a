//! The *quire*: a wide fixed-point accumulator in which sums and products of posits accumulate
//! **exactly**, so a whole reduction pays for a single rounding at the very end.

use super::*;

/// A quire for the posit configuration `(N, ES)`, `WORDS × 64` bits wide.
///
/// The quire is one big two's complement fixed-point register, stored as little-endian `u64`
/// limbs, with the radix point [`RADIX`](Self::RADIX) bits from the bottom. It is wide enough
/// to hold the product of *any* two `(N, ES)` posits exactly (narrower `WORDS` are a
/// compile-time error), and whatever width is left above that — [`CAPACITY`](Self::CAPACITY)
/// bits — is headroom: at least 2<sup>`CAPACITY`</sup> products can be accumulated before
/// overflow is possible. Pick a wider `WORDS` to buy more capacity.
///
/// Accumulation (`+=`, [`add_product`](Self::add_product)) never rounds. The one rounding step
/// happens when the quire is converted back into a posit with
/// [`RoundFrom`](crate::RoundFrom)`<&Quire>`, which is the whole point of the type: a fused dot
/// product of N terms rounds once, not N times.
///
/// An accumulation the quire cannot represent is a real failure, not a rounding event: the
/// `try_*` forms return [`QuireError::RangeExceeded`](crate::QuireError::RangeExceeded) and the
/// operator forms panic. NaR is absorbed: accumulating anything with a NaR operand poisons the
/// quire to [`NAR`](Self::NAR).
///
/// # Examples
///
/// ```
/// # use tapered_posit::*;
/// let terms = [p32::round_from(0.1), p32::round_from(0.2), p32::round_from(0.3)];
/// let mut q = q32::ZERO;
/// for t in terms {
///   q += t;
/// }
/// let sum = p32::round_from(&q);  // the only rounding in the whole sum
/// # assert!(sum != p32::ZERO);
/// ```
#[derive(Clone)]
#[derive(PartialEq, Eq, Hash)]
pub struct Quire<
  const N: u32,
  const ES: u32,
  const WORDS: usize,
>([u64; WORDS]);

/// Constants, raw limb access, predicates, ordering.
mod basics;

/// The carry machinery: adding an `i128` at a bit offset, with overflow detection.
mod accumulate;

/// Conversions: posit → quire (exact) and quire → posit (the single rounding).
mod convert;

/// `+=`/`-=` of posits, and the exact product accumulation.
mod ops;

/// Fused reductions: dot product, matrix-vector, matrix-matrix.
mod fused;
pub use fused::dot;
