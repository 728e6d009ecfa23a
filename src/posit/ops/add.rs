use super::*;
use crate::ArithmeticError;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The addition kernel: align, add, renormalise.
  ///
  /// Returns the (normalised) sum and the sticky word of bits lost in alignment.
  ///
  /// # Safety
  ///
  /// `x` and `y` must be normalised and must not be exact negations of each other, or calling
  /// this function is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn add_kernel(
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) -> (Decoded<N, ES, Int>, Int) {
    // Put the operand with the larger scale on the left, and align the other one to it by
    // shifting its frac right by the scale difference.
    let shift = x.scale - y.scale;
    let (x, y) = if shift.is_positive() { (x, y) } else { (y, x) };
    let shift = shift.abs().as_u32();
    // If the smaller operand is shifted out entirely, the sum is the larger operand and every
    // bit of the smaller one is sticky.
    if shift >= Int::BITS {
      return (x, y.frac);
    };
    let xfrac = x.frac;
    let yfrac = y.frac >> shift;
    let scale = x.scale;

    // Same-sign addition can overflow the [1, 2) / [-2, -1) band by exactly one place:
    //
    //     1.25 = 0b01_0100
    //   + 1.0  = 0b01_0000
    //   = 2.25 = 0b10_0100  →  1.125 × 2¹ = 0b01_0010, +1 to the scale
    //
    // `overflowing_add_shift` hands back the already-halved frac and the carry flag.
    let (frac, overflow) = xfrac.overflowing_add_shift(yfrac);
    let scale = scale + overflow.into();

    // Opposite-sign addition can instead cancel leading bits and underflow by n places:
    //
    //     -1.25 = 0b10_1100
    //   +  1.0  = 0b01_0000
    //   = -0.25 = 0b11_1100  →  -1.0 × 2¯³ = 0b10_0000, -3 to the scale
    //
    // The amount is the leading run length, and the frac shifts left to renormalise.
    // SAFETY: `x` and `y` are not exact negations (precondition), so `frac` is not 0.
    let underflow = unsafe { frac.leading_run_minus_one() };
    let frac = frac << underflow;
    let scale = scale - Int::of_u32(underflow);

    // Two fixups for correct rounding. First, an underflow by n places re-admits n of the bits
    // that alignment shifted out of `y.frac`; recover them. E.g. with `y.frac = 0b11110101`,
    // `shift = 4`, `underflow = 3`:
    //
    //    y.frac                        = 0b11110101|
    //    y.frac >> shift               = 0b00001111|0101
    //    y.frac >> (shift - underflow) = 0b01111010|1
    //
    // Second, the bits that were shifted out and *not* recovered are the sticky bits.
    let true_shift = shift.checked_sub(underflow).unwrap_or(0);
    let recovered = y.frac.mask_lsb(shift) >> true_shift;
    let sticky = y.frac.mask_lsb(true_shift);
    let frac = frac | recovered;

    (Decoded { frac, scale }, sticky)
  }

  /// Add, reporting [`ArithmeticError::OperandIsNar`] instead of producing
  /// [NaR](Self::NAR) when an operand is NaR.
  pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
    if self == Self::NAR || rhs == Self::NAR {
      Err(ArithmeticError::OperandIsNar)
    } else if self == Self::ZERO {
      Ok(rhs)
    } else if rhs == Self::ZERO {
      Ok(self)
    } else if self.0.wrapping_add(rhs.0) == Int::ZERO {
      // Exact negations: the sum is exactly zero (a case the kernel must not see).
      Ok(Self::ZERO)
    } else {
      // SAFETY: neither operand is 0 or NaR, and they are not exact negations.
      unsafe {
        let (result, sticky) = Self::add_kernel(self.decode_regular(), rhs.decode_regular());
        Ok(result.round(sticky))
      }
    }
  }

  /// Subtract, reporting [`ArithmeticError::OperandIsNar`] instead of producing
  /// [NaR](Self::NAR) when an operand is NaR.
  ///
  /// Negation is exact, so this is precisely `self.checked_add(-rhs)`.
  #[inline]
  pub fn checked_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
    self.checked_add(-rhs)
  }
}

use core::ops::{Add, AddAssign, Sub, SubAssign};
super::mk_ops! {Add, AddAssign, add, add_assign, checked_add}
super::mk_ops! {Sub, SubAssign, sub, sub_assign, checked_sub}
