use super::*;
use crate::ArithmeticError;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The division kernel.
  ///
  /// Returns the (normalised) quotient and a sticky word (the division remainder: nonzero iff
  /// the quotient is inexact).
  ///
  /// # Safety
  ///
  /// `x` and `y` must be normalised, or calling this function is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn div_kernel(
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) -> (Decoded<N, ES, Int>, Int) {
    // Division of `frac / FRAC_DENOM × 2^scale` forms works out to an integer division of the
    // fracs, pre-shifted to keep the precision:
    //
    //   (x.frac / FRAC_DENOM × 2^x.scale) ÷ (y.frac / FRAC_DENOM × 2^y.scale)
    //   = ((x.frac << FRAC_WIDTH) / y.frac) / FRAC_DENOM × 2^(x.scale - y.scale)
    //
    // Two normalised fracs divide into ±(0.5, 2], so the quotient may need renormalising left
    // by up to two places; pre-shifting by `underflow` more bits compensates without losing
    // anything:
    //
    //   frac = (x.frac << (FRAC_WIDTH + underflow)) / y.frac
    //   scale = x.scale - y.scale - underflow
    //
    // The remainder is nonzero exactly when the quotient is inexact, which is all the
    // rounding needs from a sticky word.
    //
    // SAFETY (both divisions): `y.frac` is normalised, hence neither 0 nor -1.
    let (quotient, _) =
      unsafe { x.frac.shift_div_rem(y.frac, Decoded::<N, ES, Int>::FRAC_WIDTH) };
    // SAFETY: two normalised fracs give |quotient| ≥ 2^(FRAC_WIDTH-1), so it is neither 0
    // nor -1.
    let underflow = unsafe { quotient.leading_run_minus_one() };

    let (frac, sticky) = unsafe {
      x.frac.shift_div_rem(y.frac, Decoded::<N, ES, Int>::FRAC_WIDTH + underflow)
    };
    let scale = x.scale - y.scale - Int::of_u32(underflow);

    (Decoded { frac, scale }, sticky)
  }

  /// Divide, reporting the precise failure instead of producing [NaR](Self::NAR):
  /// [`ArithmeticError::NumeratorIsNar`], [`ArithmeticError::DivideByNar`] or
  /// [`ArithmeticError::DivideByZero`].
  pub fn checked_div(self, rhs: Self) -> Result<Self, ArithmeticError> {
    if self == Self::NAR {
      Err(ArithmeticError::NumeratorIsNar)
    } else if rhs == Self::NAR {
      Err(ArithmeticError::DivideByNar)
    } else if rhs == Self::ZERO {
      Err(ArithmeticError::DivideByZero)
    } else if self == Self::ZERO {
      Ok(Self::ZERO)
    } else {
      // SAFETY: neither operand is 0 or NaR, so both decode to normalised forms.
      unsafe {
        let (result, sticky) = Self::div_kernel(self.decode_regular(), rhs.decode_regular());
        Ok(result.round(sticky))
      }
    }
  }
}

use core::ops::{Div, DivAssign};
super::mk_ops! {Div, DivAssign, div, div_assign, checked_div}

#[cfg(test)]
mod tests {
  super::mk_tests! {/, /=}

  mod special {
    use crate::{ArithmeticError, p8};

    #[test]
    fn nar_and_zero_absorb() {
      assert_eq!(p8::NAR / p8::ONE, p8::NAR);
      assert_eq!(p8::ONE / p8::NAR, p8::NAR);
      assert_eq!(p8::ONE / p8::ZERO, p8::NAR);
      assert_eq!(p8::ZERO / p8::ZERO, p8::NAR);
      assert_eq!(p8::ZERO / p8::ONE, p8::ZERO);
    }

    #[test]
    fn checked_failure_modes() {
      assert_eq!(p8::NAR.checked_div(p8::ONE), Err(ArithmeticError::NumeratorIsNar));
      assert_eq!(p8::ONE.checked_div(p8::NAR), Err(ArithmeticError::DivideByNar));
      assert_eq!(p8::ONE.checked_div(p8::ZERO), Err(ArithmeticError::DivideByZero));
      // NaR numerator takes precedence, as in the binary operator.
      assert_eq!(p8::NAR.checked_div(p8::ZERO), Err(ArithmeticError::NumeratorIsNar));
      assert_eq!(p8::ZERO.checked_div(p8::ONE), Ok(p8::ZERO));
    }

    #[test]
    fn one_is_identity() {
      for p in p8::cases_exhaustive() {
        assert_eq!(p / p8::ONE, p);
      }
    }
  }
}
