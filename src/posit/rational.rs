//! The exact oracle the whole test suite leans on: deliberately naive, super-explicit
//! conversions from posits, decoded forms and quires into [`Rational`], plus the predicate
//! deciding whether an exact rational should round to a given posit.
//!
//! Nothing here is optimised; being *obviously* correct is the entire point, since this is what
//! the optimised kernels are checked against.

use super::*;

use crate::Quire;

use malachite::{Integer, rational::Rational};
use malachite::base::num::arithmetic::traits::{Abs, Pow, PowerOf2, Reciprocal};

/// A shortcut trait with a couple of rational-valued helpers on [`Int`]s.
pub trait IntExt: crate::Int {
  fn pow(self, other: Self) -> Rational {
    let exp: i128 = other.into();
    let exp: i64 = exp.try_into().expect("Exponent overflow in converting to rational");
    Rational::pow(Rational::from(self.into()), exp)
  }

  fn power_of_2(self) -> Rational {
    let exp: i128 = self.into();
    let exp: i64 = exp.try_into().expect("Exponent overflow in converting to rational");
    Rational::power_of_2(exp)
  }
}

impl IntExt for i64 {}
impl IntExt for i32 {}
impl IntExt for i16 {}
impl IntExt for i8 {}

/// The error returned when a posit (or quire) has no rational value because it is NaR.
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub struct IsNaR;

impl<
  const N: u32,
  const ES: u32,
  Int: IntExt,
> Posit<N, ES, Int>
where
  Integer: From<Int>,
  Rational: From<Int>,
  Rational: From<Int::Unsigned>,
{
  /// Convert a posit **which is not 0 or NaR** into a [`Rational`], by the book: extract the
  /// sign, count the regime run, read the exponent, read the fraction, multiply it all out.
  fn into_rational_regular(self) -> Rational {
    // Drop the junk bits, which sit above the posit's N bits when Int is wider.
    let x = self.to_bits() << Self::JUNK_BITS;

    if x == Int::ZERO || x == Int::MIN {
      panic!("Should not pass {x:b} to into_rational_regular")
    }

    // Extract the sign; everything else reads from the two's complement absolute value.
    let sign = !x.is_positive();
    let x = x.abs();

    // Shift out the sign bit; the next bit decides whether the regime is a run of 0s
    // terminated by a 1, or a run of 1s terminated by a 0 (or by the end of the posit).
    let x = x << 1;
    let regime_sign = !x.is_positive() as u8;
    let regime_len = if regime_sign == 0 {
      // Run of 0s followed by a 1; the terminating 1 is always present because `x` is not 0.
      x.leading_zeros()
    } else {
      // Run of 1s followed by a 0 or by the end of the posit; in the latter case the shift
      // above already brought a 0 in from the right.
      (!x).leading_zeros()
    };
    // The regime is -n for a run of n 0s, and n-1 for a run of n 1s.
    let regime =
      if regime_sign == 0 { -(regime_len as i32) } else { regime_len as i32 - 1 };

    // Shift out the regime including its terminator; the top ES bits are then the exponent.
    // If fewer than ES bits remain they are zero-filled from the right, which is exactly what
    // the shift does.
    let x = (x << regime_len) << 1;
    let exponent =
      if const { Self::ES != 0 } { x.lshr(Int::BITS - Self::ES) } else { Int::ZERO };

    // Shift out the exponent bits; what remains (left-aligned, zero-filled) is the fraction:
    // an unsigned numerator over 2^Int::BITS, under an implicit leading 1.
    let fraction = (x << Self::ES).as_unsigned();

    // Multiply out sign × useed^regime × 2^exponent × 1.fraction.
    let useed = IntExt::power_of_2(Int::ONE << Self::ES);

    let sign = (-Int::ONE).pow(Int::from(sign));
    let regime = useed.pow(regime as i64);
    let exponent = IntExt::power_of_2(exponent);
    let fraction = Rational::from(Int::ONE)
      + (Rational::from(fraction) / Rational::power_of_2(Int::BITS as i64));

    sign * regime * exponent * fraction
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: IntExt,
> TryFrom<Posit<N, ES, Int>> for Rational
where
  Integer: From<Int>,
  Rational: From<Int>,
  Rational: From<Int::Unsigned>,
{
  type Error = IsNaR;

  fn try_from(value: Posit<N, ES, Int>) -> Result<Self, Self::Error> {
    if value == Posit::ZERO {
      Ok(Rational::from(Int::ZERO))
    } else if value == Posit::NAR {
      Err(IsNaR)
    } else {
      Ok(value.into_rational_regular())
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: IntExt,
> From<Decoded<N, ES, Int>> for Rational
where
  Integer: From<Int>,
  Int: malachite::base::num::basic::signeds::PrimitiveSigned,
{
  fn from(value: Decoded<N, ES, Int>) -> Self {
    let frac = Rational::from_signeds(value.frac, Decoded::<N, ES, Int>::FRAC_DENOM);
    let scale = IntExt::power_of_2(value.scale);
    frac * scale
  }
}

impl<
  const N: u32,
  const ES: u32,
  const WORDS: usize,
> TryFrom<&Quire<N, ES, WORDS>> for Rational {
  type Error = IsNaR;

  fn try_from(value: &Quire<N, ES, WORDS>) -> Result<Self, Self::Error> {
    if value.is_nar() {
      Err(IsNaR)
    } else {
      // The quire is one big fixed-point number: a two's complement integer over limbs in
      // little-endian order, with denominator 2^RADIX.
      let limbs = value.to_limbs();

      let mut numerator = Integer::from(limbs[WORDS - 1] as i64);
      for &limb in limbs[..WORDS - 1].iter().rev() {
        numerator = (numerator << 64u64) + Integer::from(limb);
      }

      let denominator = Integer::power_of_2(Quire::<N, ES, WORDS>::RADIX as u64);
      Ok(Rational::from_integers(numerator, denominator))
    }
  }
}

/// Check whether the exact number `exact` should round to `posit`:
///
///   - beyond the extremes (including magnitudes below minpos): clamp to
///     MIN/MAX/MIN_POSITIVE/MAX_NEGATIVE;
///   - where exponent bits get cut by the regime (the edges of the dynamic range): round to
///     the nearest posit by absolute **ratio**, ties to even;
///   - everywhere else: round to the nearest posit by absolute **difference**, ties to even.
pub fn is_correct_rounded<const N: u32, const ES: u32, Int: crate::Int>(
  exact: Rational,
  posit: Posit<N, ES, Int>,
) -> bool
where
  Rational: TryFrom<Posit<N, ES, Int>, Error = IsNaR>,
{
  // Only the exact number 0 rounds to posit 0, and nothing rounds to NaR.
  if posit == Posit::<N, ES, Int>::ZERO {
    return exact == Rational::from(0);
  }
  if posit == Posit::<N, ES, Int>::NAR {
    return false;
  }

  // Clamp cases.
  if exact > Rational::from(0) {
    if exact >= Rational::try_from(Posit::<N, ES, Int>::MAX).unwrap() {
      return posit == Posit::<N, ES, Int>::MAX;
    } else if exact <= Rational::try_from(Posit::<N, ES, Int>::MIN_POSITIVE).unwrap() {
      return posit == Posit::<N, ES, Int>::MIN_POSITIVE;
    }
  } else if exact < Rational::from(0) {
    if exact <= Rational::try_from(Posit::<N, ES, Int>::MIN).unwrap() {
      return posit == Posit::<N, ES, Int>::MIN;
    } else if exact >= Rational::try_from(Posit::<N, ES, Int>::MAX_NEGATIVE).unwrap() {
      return posit == Posit::<N, ES, Int>::MAX_NEGATIVE;
    }
  } else {
    unreachable!()
  }

  // Nearest-posit cases. The distance is arithmetic in the band where no exponent bits are
  // cut, geometric outside of it. A regime of length ≤ N - 2 - ES keeps the full exponent
  // field, which corresponds to magnitudes within 2^±((N - 2 - ES) × 2^ES).
  let distance = {
    let geometric_cutoff = Rational::power_of_2(((N - 2 - ES) as i64) << ES);
    let arithmetic_range = (&geometric_cutoff).reciprocal()..=geometric_cutoff;
    let is_arithmetic = arithmetic_range.contains(&(&exact).abs());

    move |x: &Rational, y: &Rational| {
      if is_arithmetic {
        x - y
      } else if x.clone().abs() >= y.clone().abs() {
        x / y
      } else {
        y / x
      }
    }
  };

  // `posit` represents exactly `curr`; its encoding-order neighbours represent `prev` and
  // `next`.
  let prev = Rational::try_from(posit.prior());
  let curr = Rational::try_from(posit).unwrap();
  let next = Rational::try_from(posit.next());
  let posit_is_even = posit.to_bits() & Int::ONE == Int::ZERO;

  if exact == curr {
    true
  } else if let Ok(prev) = prev
    && prev < exact
    && exact < curr
  {
    // In ]prior, posit[: must be closer to `posit`, or equidistant with `posit` even.
    let distance_curr = distance(&curr, &exact);
    let distance_prev = distance(&exact, &prev);
    distance_curr < distance_prev || distance_curr == distance_prev && posit_is_even
  } else if let Ok(next) = next
    && curr < exact
    && exact < next
  {
    // In ]posit, next[: must be closer to `posit`, or equidistant with `posit` even.
    let distance_curr = distance(&exact, &curr);
    let distance_next = distance(&next, &exact);
    distance_curr < distance_next || distance_curr == distance_next && posit_is_even
  } else {
    // Not in the interval at all.
    false
  }
}

/// As [`is_correct_rounded`], where the exact value may itself be NaR (in which case the posit
/// must be NaR too).
pub fn try_is_correct_rounded<const N: u32, const ES: u32, Int: crate::Int>(
  exact: Result<Rational, IsNaR>,
  posit: Posit<N, ES, Int>,
) -> bool
where
  Rational: TryFrom<Posit<N, ES, Int>, Error = IsNaR>,
{
  match exact {
    Ok(exact) => is_correct_rounded(exact, posit),
    Err(IsNaR) => posit == Posit::NAR,
  }
}
