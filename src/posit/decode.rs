use super::*;

/// The three-way classification of a posit bit pattern: one of the two special patterns, or a
/// regular value together with its decoded form.
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub(crate) enum Class<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> {
  Zero,
  NaR,
  Regular(Decoded<N, ES, Int>),
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Classify a posit, decoding it if it is regular. The core logic lives in
  /// [`Self::decode_regular`].
  pub(crate) fn classify(self) -> Class<N, ES, Int> {
    if self == Self::ZERO {
      Class::Zero
    } else if self == Self::NAR {
      Class::NaR
    } else {
      // SAFETY: `self` is not 0 or NaR.
      Class::Regular(unsafe { self.decode_regular() })
    }
  }

  /// Decode a posit **which is not 0 or NaR** into its [`Decoded`] form.
  ///
  /// This routine sits under every arithmetic kernel, so it is written to be branch-free. The
  /// naïve decode would take the absolute value, pull out the regime/exponent/fraction fields,
  /// then negate the fraction again for negative inputs. Instead we work on the two's
  /// complement pattern directly: every "negate if negative" step collapses into a conditional
  /// complement steered by a sign, and the final `frac` comes out already signed.
  ///
  /// # Safety
  ///
  /// `self` must not be 0 or NaR, or calling this function is *undefined behaviour*.
  pub(crate) unsafe fn decode_regular(self) -> Decoded<N, ES, Int> {
    // Discard the junk bits, if there are any.
    let x = self.0 << Self::JUNK_BITS;
    debug_assert!(
      x != Int::ZERO && x != Int::MIN,
      "Safety precondition violated: {self:?} cannot be 0 or NaR",
    );

    // Drop the sign bit and measure the run of identical bits that follows (the regime run).
    // `x ^ (x << 1)` marks every position where adjacent bits differ, so after shifting out
    // the sign position, its leading zeros count the run length minus one.
    //
    //   x          = 0b10001…      x          = 0b011110…
    //   x_xor      = 0b1001.…      x_xor      = 0b10001.…
    //   x_xor << 1 = 0b001..…      x_xor << 1 = 0b0001..…
    //   regime_raw = 2             regime_raw = 3
    let x_xor = x ^ (x << 1);
    // SAFETY: `x` is neither 0 nor MIN, so `x_xor << 1` is nonzero.
    let regime_raw = unsafe { (x_xor << 1).leading_zeros_nonzero() };
    debug_assert!(regime_raw <= Self::BITS - 2);

    // The regime field encodes
    //
    //   n-1, for a run of n 1s terminated by a 0
    //   -n,  for a run of n 0s terminated by a 1
    //
    // read from the two's complement *absolute value* of the pattern, which flips the runs for
    // negative posits (the +1 of the negation is always absorbed by the fields to the right).
    // Whether we are looking at a run of 1s-in-the-absolute-value is exactly the msb of
    // `x_xor`: the sign bit xored with the first regime bit. And since in two's complement
    // `-n = !(n - 1)`, both cases come out of `regime_raw` with at most a complement:
    //
    //   n-1 = regime_raw,  if the msb of x_xor is 1
    //   -n  = !regime_raw, if the msb of x_xor is 0
    let regime = Int::of_u32(regime_raw).not_if_positive(x_xor);

    // Shift out the sign bit, the regime run, and the regime terminator (1 + regime_raw + 1 + 1
    // places), leaving the exponent and fraction bits at the top of `y`.
    let y = (x << regime_raw) << 3;

    // The top ES bits of `y` are the exponent field, which (unlike the fraction) still needs
    // the "complement if negative" correction to be read from the absolute value.
    let exponent = if const { Self::ES != 0 } {
      y.not_if_negative(x).lshr(Int::BITS - Self::ES)
    } else {
      Int::ZERO
    };

    // The remaining bits of `y` are the fraction. Here no correction is needed: the decoded
    // `frac` is signed (two's complement, same sign as the posit), so we just slot the raw
    // fraction bits under the hidden bits.
    let fraction = if const { Self::ES == 2 } {
      // ES = 2 is the standard's choice, and saves one shift.
      y.mask_lsb(Int::BITS - 2)
    } else {
      (y << Self::ES).lshr(2)
    };

    // Assemble the frac (hidden bits + fraction bits) and the scale (regime × 2^ES +
    // exponent). The hidden bits are `0b01` for positive posits (fraction in [1, 2)) and
    // `0b10` for negative ones (fraction in [-2, -1)), which is `Int::MIN` logically shifted
    // right by one-if-positive.
    let frac = Int::MIN.lshr(x.is_positive() as u32) + fraction;
    let scale = (regime << Self::ES) + exponent;
    Decoded { frac, scale }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::test::posit_6_2;

  use malachite::rational::Rational;
  use proptest::prelude::*;

  #[test]
  fn posit_6_2_manual() {
    for (posit, decoded) in posit_6_2() {
      assert_eq!(unsafe { posit.decode_regular() }, decoded)
    }
  }

  fn decode<const N: u32, const ES: u32, Int: crate::Int>(
    p: Posit<N, ES, Int>,
  ) -> Decoded<N, ES, Int> {
    let Class::Regular(decoded) = p.classify() else { panic!("Invalid test case") };
    decoded
  }

  macro_rules! test_exhaustive {
    ($name:ident, $posit:ty) => {
      #[test]
      fn $name() {
        for p in <$posit>::cases_exhaustive() {
          assert_eq!(Rational::try_from(p), Ok(Rational::from(decode(p))))
        }
      }
    };
  }

  macro_rules! test_proptest {
    ($name:ident, $posit:ty) => {
      proptest! {
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
        #[test]
        fn $name(p in <$posit>::cases_proptest()) {
          assert_eq!(Rational::try_from(p), Ok(Rational::from(decode(p))))
        }
      }
    };
  }

  test_exhaustive! {posit_8_0_exhaustive, Posit::<8, 0, i8>}
  test_exhaustive! {posit_10_0_exhaustive, Posit::<10, 0, i16>}
  test_exhaustive! {posit_10_1_exhaustive, Posit::<10, 1, i16>}
  test_exhaustive! {posit_10_2_exhaustive, Posit::<10, 2, i16>}
  test_exhaustive! {posit_10_3_exhaustive, Posit::<10, 3, i16>}
  test_exhaustive! {posit_20_4_exhaustive, Posit::<20, 4, i32>}

  test_exhaustive! {p8_exhaustive, crate::p8}
  test_exhaustive! {p16_exhaustive, crate::p16}
  test_proptest! {p32_proptest, crate::p32}
  test_proptest! {p64_proptest, crate::p64}

  test_exhaustive! {posit_3_0_exhaustive, Posit::<3, 0, i8>}
  test_exhaustive! {posit_4_0_exhaustive, Posit::<4, 0, i8>}
  test_exhaustive! {posit_4_1_exhaustive, Posit::<4, 1, i8>}
}
