use super::*;
use crate::ArithmeticError;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The multiplication kernel.
  ///
  /// Returns the (normalised) product and the sticky word of bits below the kept fraction.
  ///
  /// # Safety
  ///
  /// `x` and `y` must be normalised, or calling this function is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn mul_kernel(
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) -> (Decoded<N, ES, Int>, Int) {
    // Multiplying values of the form `frac / FRAC_DENOM × 2^scale` is mostly bookkeeping on
    // the denominators:
    //
    //   (x.frac / FRAC_DENOM × 2^x.scale) × (y.frac / FRAC_DENOM × 2^y.scale)
    //   = (x.frac × y.frac) / FRAC_DENOM² × 2^(x.scale + y.scale)
    //   = ((x.frac × y.frac) >> Int::BITS) / FRAC_DENOM × 2^(x.scale + y.scale + 2)
    //
    // using FRAC_DENOM = 2^(Int::BITS - 2). So the scale is the sum of scales plus two, and
    // the frac is the high word of the double-width product — with two wrinkles:
    //
    //   - the low word of the product is precision we are dropping, so it feeds the sticky;
    //   - the product of two normalised fracs lands in ±[1, 4), not ±[1, 2), so it may need a
    //     renormalising shift left by 1 or 2 places (e.g. 1.5 × 1.5 = 2.25 → 1.125 × 2¹),
    //     which comes off the scale.
    use crate::underlying::Double;
    let product = x.frac.doubling_mul(y.frac);
    // SAFETY: `x.frac` and `y.frac` are normalised, so the product is neither 0 nor -1.
    let underflow = unsafe { product.leading_run_minus_one() };
    let (frac, sticky) = (product << underflow).components_hi_lo();
    let scale = x.scale + y.scale + Int::ONE + Int::ONE - Int::of_u32(underflow);

    (Decoded { frac, scale }, sticky)
  }

  /// Multiply, reporting [`ArithmeticError::OperandIsNar`] instead of producing
  /// [NaR](Self::NAR) when an operand is NaR.
  pub fn checked_mul(self, rhs: Self) -> Result<Self, ArithmeticError> {
    if self == Self::NAR || rhs == Self::NAR {
      Err(ArithmeticError::OperandIsNar)
    } else if self == Self::ZERO || rhs == Self::ZERO {
      Ok(Self::ZERO)
    } else {
      // SAFETY: neither operand is 0 or NaR, so both decode to normalised forms.
      unsafe {
        let (result, sticky) = Self::mul_kernel(self.decode_regular(), rhs.decode_regular());
        Ok(result.round(sticky))
      }
    }
  }
}

use core::ops::{Mul, MulAssign};
super::mk_ops! {Mul, MulAssign, mul, mul_assign, checked_mul}

#[cfg(test)]
mod tests {
  super::mk_tests! {*, *=}

  mod special {
    use crate::{ArithmeticError, p8};

    #[test]
    fn nar_absorbs() {
      assert_eq!(p8::NAR * p8::ONE, p8::NAR);
      assert_eq!(p8::ONE * p8::NAR, p8::NAR);
      assert_eq!(p8::NAR * p8::ZERO, p8::NAR);
    }

    #[test]
    fn nar_checked() {
      assert_eq!(p8::NAR.checked_mul(p8::ONE), Err(ArithmeticError::OperandIsNar));
      assert_eq!(p8::ZERO.checked_mul(p8::NAR), Err(ArithmeticError::OperandIsNar));
    }

    #[test]
    fn one_is_identity() {
      for p in p8::cases_exhaustive() {
        assert_eq!(p * p8::ONE, p);
        assert_eq!(p8::ONE * p, p);
        assert_eq!(p * p8::ZERO, p8::ZERO);
      }
    }
  }
}
