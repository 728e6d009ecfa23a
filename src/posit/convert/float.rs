use super::*;

use crate::underlying::const_as;

/// Split a finite, nonzero [`f64`] into its IEEE sign/exponent/mantissa fields and reassemble
/// them as a [`Decoded`] plus the sticky word of any mantissa bits that did not fit in `Int`.
fn decode_finite_f64<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(num: f64) -> (Decoded<N, ES, Int>, Int) {
  debug_assert!(num.is_finite() && num != 0.0);
  const MANTISSA_DIGITS_EXPLICIT: u32 = f64::MANTISSA_DIGITS - 1;
  const EXP_BIAS: i64 = f64::MIN_EXP as i64 - 1;
  const HIDDEN_BIT: i64 = (i64::MIN as u64 >> 1) as i64;

  // Pull apart sign, mantissa and exponent fields.
  use crate::underlying::Sealed;
  let sign = num.is_sign_positive();
  let bits = num.abs().to_bits() as i64;
  let mantissa = bits.mask_lsb(MANTISSA_DIGITS_EXPLICIT);
  let mut exponent = bits >> MANTISSA_DIGITS_EXPLICIT;

  // An exponent field of 0 marks a subnormal. Normals carry a hidden leading 1 and a -1 bias
  // adjustment; subnormals carry neither.
  let is_normal = exponent != 0;
  exponent -= i64::from(is_normal);

  // Build a signed `frac` at full i64 width. Watch the negative power-of-two case: the
  // negation of 1.000… is not -1.000… but -2.000… with one less in the exponent.
  let frac: i64 = {
    const SHIFT_LEFT: u32 = 64 - MANTISSA_DIGITS_EXPLICIT - 2;
    let unsigned_frac =
      if is_normal { (mantissa << SHIFT_LEFT) | HIDDEN_BIT } else { mantissa << SHIFT_LEFT };
    if sign {
      unsigned_frac
    } else if mantissa != 0 || !is_normal {
      -unsigned_frac
    } else {
      exponent -= 1;
      i64::MIN
    }
  };

  // Narrow from i64 to `Int`, accumulating dropped bits (if `Int` is narrower) into sticky.
  let (mut frac, sticky): (Int, Int) = {
    if const { Int::BITS == 64 } {
      (const_as::<i64, Int>(frac), Int::ZERO)
    } else {
      let shift_right = 64 - Int::BITS;
      let sticky = Int::from(frac.mask_lsb(shift_right) != 0);
      let frac = const_as::<i64, Int>(frac >> shift_right);
      (frac, sticky)
    }
  };

  // A subnormal's `frac` has leading zeros (or ones) where a normal has its hidden bit; shift
  // them out and compensate in the exponent:
  //
  //   subnormal frac: 0000001101 → 0110100000, exponent -5
  //   subnormal frac: 1111011011 → 1011011000, exponent -3
  //
  // If every mantissa bit was lost in the narrowing, the value is a positive amount smaller
  // than any posit: hand the encoder a normalised 1.0 at an impossibly low scale and let the
  // never-round-to-zero rule produce MIN_POSITIVE.
  if !is_normal {
    if frac == Int::ZERO {
      return (
        Decoded { frac: Int::ONE << (Int::BITS - 2), scale: Int::MIN >> 1 },
        Int::ONE,
      );
    }
    // SAFETY: just returned if `frac == 0`, and a subnormal's frac is never -1.
    let underflow = unsafe { frac.leading_run_minus_one() };
    frac = frac << underflow;
    exponent = exponent.wrapping_sub(underflow as i64);
  }

  // Re-bias, and clamp into the range a `Decoded::scale` of type `Int` can hold (a p8 cannot
  // represent an f64 scale of +900, but it must still saturate correctly).
  let exponent = exponent.wrapping_add(EXP_BIAS);
  let scale = if const { Int::BITS < 64 } && exponent > const_as::<Int, i64>(Int::MAX >> 1) {
    Int::MAX >> 1
  } else if const { Int::BITS < 64 } && exponent < const_as::<Int, i64>(Int::MIN >> 1) {
    Int::MIN >> 1
  } else {
    const_as::<i64, Int>(exponent)
  };

  (Decoded { frac, scale }, sticky)
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<f64> for Posit<N, ES, Int> {
  /// Convert an `f64` into a posit: NaN and both infinities become [NaR](Posit::NAR), zero
  /// becomes zero, everything else rounds by the posit rules.
  fn round_from(value: f64) -> Self {
    use core::num::FpCategory;
    match value.classify() {
      FpCategory::Nan | FpCategory::Infinite => Self::NAR,
      FpCategory::Zero => Self::ZERO,
      FpCategory::Normal | FpCategory::Subnormal => {
        let (decoded, sticky) = decode_finite_f64(value);
        // SAFETY: `decode_finite_f64` returns normalised forms.
        unsafe { decoded.round(sticky) }
      }
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<f32> for Posit<N, ES, Int> {
  /// Convert an `f32` into a posit; `f32 → f64` is lossless, so this goes through
  /// [`RoundFrom`]`<f64>`.
  fn round_from(value: f32) -> Self {
    Self::round_from(value as f64)
  }
}

/// 2^exp as an `f64`, saturating to 0 and ∞ outside the representable range, built directly
/// from the IEEE exponent bits.
fn exp2i(exp: i64) -> f64 {
  // 2^-1074, the smallest positive f64 (subnormal).
  const MIN_SUBNORMAL_EXP: i64 = f64::MIN_EXP as i64 - f64::MANTISSA_DIGITS as i64 + 1;
  if exp > f64::MAX_EXP as i64 - 1 {
    f64::INFINITY
  } else if exp >= f64::MIN_EXP as i64 - 1 {
    f64::from_bits(((exp + 1023) as u64) << (f64::MANTISSA_DIGITS - 1))
  } else if exp >= MIN_SUBNORMAL_EXP {
    f64::from_bits(1u64 << (exp - MIN_SUBNORMAL_EXP) as u32)
  } else {
    0.0
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<Posit<N, ES, Int>> for f64 {
  /// Convert a posit into an `f64`: [NaR](Posit::NAR) becomes NaN, and values round to
  /// nearest-even (exactly, for any posit up to 64 bits whose fraction fits the f64 mantissa;
  /// the `i64 → f64` cast rounds the rest).
  fn round_from(value: Posit<N, ES, Int>) -> Self {
    match value.classify() {
      Class::Zero => 0.0,
      Class::NaR => f64::NAN,
      Class::Regular(Decoded { frac, scale }) => {
        let frac: i128 = frac.into();
        let scale: i128 = scale.into();
        // value = frac / 2^FRAC_WIDTH × 2^scale
        frac as f64 * exp2i(scale as i64 - (Int::BITS as i64 - 2))
      }
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<Posit<N, ES, Int>> for f32 {
  /// Convert a posit into an `f32`, through `f64` (beware: for 64-bit posits the two rounding
  /// steps can differ from a single correctly-rounded conversion by one ulp in rare cases).
  fn round_from(value: Posit<N, ES, Int>) -> Self {
    f64::round_from(value) as f32
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Instantiate a suite of tests for one (float, posit) pair.
  macro_rules! make_tests {
    ($float:ty, $posit:ty) => {
      use super::*;
      use malachite::rational::Rational;
      use proptest::prelude::*;

      #[test]
      fn zero() {
        assert_eq!(<$posit>::round_from(0.0 as $float), <$posit>::ZERO)
      }

      #[test]
      fn one() {
        assert_eq!(<$posit>::round_from(1.0 as $float), <$posit>::ONE)
      }

      #[test]
      fn minus_one() {
        assert_eq!(<$posit>::round_from(-1.0 as $float), <$posit>::MINUS_ONE)
      }

      #[test]
      fn nan() {
        assert_eq!(<$posit>::round_from(<$float>::NAN), <$posit>::NAR)
      }

      #[test]
      fn infinities() {
        assert_eq!(<$posit>::round_from(<$float>::INFINITY), <$posit>::NAR);
        assert_eq!(<$posit>::round_from(<$float>::NEG_INFINITY), <$posit>::NAR);
      }

      #[test]
      fn min_positive() {
        if const { <$posit>::MAX_EXP as i64 <= 127 } {
          assert_eq!(<$posit>::round_from(<$float>::MIN_POSITIVE), <$posit>::MIN_POSITIVE)
        }
      }

      #[test]
      fn max_negative() {
        if const { <$posit>::MAX_EXP as i64 <= 127 } {
          assert_eq!(<$posit>::round_from(-<$float>::MIN_POSITIVE), <$posit>::MAX_NEGATIVE)
        }
      }

      proptest! {
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
        #[test]
        fn from_float_proptest(float: $float) {
          let posit = <$posit>::round_from(float);
          match Rational::try_from(float) {
            Ok(exact) => assert!(crate::posit::rational::is_correct_rounded(exact, posit)),
            Err(_) => assert!(posit == <$posit>::NAR),
          }
        }
      }
    };
  }

  mod f64 {
    use super::*;

    mod p8 { make_tests! {f64, crate::p8} }
    mod p16 { make_tests! {f64, crate::p16} }
    mod p32 { make_tests! {f64, crate::p32} }
    mod p64 { make_tests! {f64, crate::p64} }

    mod posit_8_0 { make_tests! {f64, Posit::<8, 0, i8>} }
    mod posit_10_0 { make_tests! {f64, Posit::<10, 0, i16>} }
    mod posit_10_1 { make_tests! {f64, Posit::<10, 1, i16>} }
    mod posit_10_2 { make_tests! {f64, Posit::<10, 2, i16>} }
    mod posit_10_3 { make_tests! {f64, Posit::<10, 3, i16>} }
  }

  mod f32 {
    use super::*;

    mod p8 { make_tests! {f32, crate::p8} }
    mod p16 { make_tests! {f32, crate::p16} }
    mod p32 { make_tests! {f32, crate::p32} }

    mod posit_8_0 { make_tests! {f32, Posit::<8, 0, i8>} }
    mod posit_10_2 { make_tests! {f32, Posit::<10, 2, i16>} }
  }

  mod to_float {
    use super::*;

    #[test]
    fn landmarks() {
      assert_eq!(f64::round_from(crate::p32::ZERO), 0.0);
      assert_eq!(f64::round_from(crate::p32::ONE), 1.0);
      assert_eq!(f64::round_from(crate::p32::MINUS_ONE), -1.0);
      assert!(f64::round_from(crate::p32::NAR).is_nan());
      assert_eq!(f64::round_from(crate::p8::MAX), (1u64 << 24) as f64);
      assert_eq!(f64::round_from(crate::p8::MIN_POSITIVE), 5.960464477539063e-8);
      assert_eq!(f32::round_from(crate::p16::MIN_POSITIVE), 1.3877788e-17);
    }

    /// Every p32 value fits an f64 mantissa, so posit → f64 → posit is lossless.
    #[test]
    fn p32_f64_roundtrip_exhaustive_sample() {
      for p in crate::p32::cases_exhaustive().step_by(65537) {
        assert_eq!(crate::p32::round_from(f64::round_from(p)), p, "{p:?}");
      }
    }

    /// And posit → f64 must agree exactly with the rational oracle for narrow posits.
    #[test]
    fn p16_matches_oracle() {
      use malachite::rational::Rational;
      for p in crate::p16::cases_exhaustive() {
        let float = f64::round_from(p);
        assert_eq!(
          Rational::try_from(float).unwrap(),
          Rational::try_from(p).unwrap(),
          "{p:?}",
        );
      }
    }
  }
}
