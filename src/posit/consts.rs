use super::*;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Zero (`0`), the additive identity. Bit pattern `0b000…0`, the only unsigned value.
  pub const ZERO: Self = Self(Int::ZERO);

  /// The `0b1000…0` pattern (sign bit set, everything else clear), sign-extended, as an i64.
  /// All the other constants are derived from it.
  const NAR_I64: i64 = i64::MIN >> (64 - Self::BITS);

  /// Not-a-Real (`NaR`): the single projective infinity/NaN point.
  //
  // Bit pattern `0b1000…0`.
  pub const NAR: Self = Self(const_as(Self::NAR_I64));

  /// Largest representable value, equal to `-MIN`.
  //
  // Bit pattern `0b0111…1`.
  pub const MAX: Self = Self(const_as(!Self::NAR_I64));

  /// Smallest representable value, equal to `-MAX`.
  ///
  /// Not to be confused with the smallest *positive* value, [`Self::MIN_POSITIVE`].
  //
  // Bit pattern `0b1000…01`.
  pub const MIN: Self = Self(const_as(Self::NAR_I64 + 1));

  /// Smallest positive value ("minpos"), equal to `-MAX_NEGATIVE`.
  //
  // Bit pattern `0b000…01`.
  pub const MIN_POSITIVE: Self = Self(Int::ONE);

  /// Largest negative value, equal to `-MIN_POSITIVE`.
  //
  // Bit pattern `0b111…1`.
  pub const MAX_NEGATIVE: Self = Self(const_as(-1i64));

  /// One (`1`), the multiplicative identity.
  //
  // Bit pattern `0b0100…0`.
  pub const ONE: Self = Self(const_as(-(Self::NAR_I64 >> 1)));

  /// Negative one (`-1`).
  //
  // Bit pattern `0b1100…0`.
  pub const MINUS_ONE: Self = Self(const_as(Self::NAR_I64 >> 1));

  /// The minimum scale; [`Self::MIN_POSITIVE`] = 2<sup>`MIN_EXP`</sup>.
  pub const MIN_EXP: Int = const_as(-(((N as i64) - 2) << ES));

  /// The maximum scale; [`Self::MAX`] = 2<sup>`MAX_EXP`</sup>.
  pub const MAX_EXP: Int = const_as(((N as i64) - 2) << ES);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero() {
    assert_eq!(Posit::<16, 2, i16>::ZERO.to_bits_unsigned(), 0);
    assert_eq!(Posit::<10, 1, i16>::ZERO.to_bits_unsigned(), 0);
  }

  #[test]
  fn nar() {
    assert_eq!(
      Posit::<16, 2, i16>::NAR.to_bits_unsigned(),
      0b1000_0000_0000_0000,
    );
    assert_eq!(
      Posit::<10, 1, i16>::NAR.to_bits_unsigned(),
      0b10_0000_0000,
    );
  }

  #[test]
  fn min_positive() {
    assert_eq!(Posit::<16, 2, i16>::MIN_POSITIVE.to_bits_unsigned(), 1);
    assert_eq!(Posit::<10, 1, i16>::MIN_POSITIVE.to_bits_unsigned(), 1);
  }

  #[test]
  fn max() {
    assert_eq!(
      Posit::<16, 2, i16>::MAX.to_bits_unsigned(),
      0b0111_1111_1111_1111,
    );
    assert_eq!(
      Posit::<10, 1, i16>::MAX.to_bits_unsigned(),
      0b01_1111_1111,
    );
  }

  #[test]
  fn max_negative() {
    assert_eq!(
      Posit::<16, 2, i16>::MAX_NEGATIVE.to_bits_unsigned(),
      0b1111_1111_1111_1111,
    );
    assert_eq!(
      Posit::<10, 1, i16>::MAX_NEGATIVE.to_bits_unsigned(),
      0b11_1111_1111,
    );
  }

  #[test]
  fn min() {
    assert_eq!(
      Posit::<16, 2, i16>::MIN.to_bits_unsigned(),
      0b1000_0000_0000_0001,
    );
    assert_eq!(
      Posit::<10, 1, i16>::MIN.to_bits_unsigned(),
      0b10_0000_0001,
    );
  }

  #[test]
  fn one() {
    assert_eq!(
      Posit::<16, 2, i16>::ONE.to_bits_unsigned(),
      0b0100_0000_0000_0000,
    );
    assert_eq!(
      Posit::<10, 1, i16>::ONE.to_bits_unsigned(),
      0b01_0000_0000,
    );
  }

  #[test]
  fn minus_one() {
    assert_eq!(
      Posit::<16, 2, i16>::MINUS_ONE.to_bits_unsigned(),
      0b1100_0000_0000_0000,
    );
    assert_eq!(
      Posit::<10, 1, i16>::MINUS_ONE.to_bits_unsigned(),
      0b11_0000_0000,
    );
  }

  #[test]
  fn exp_bounds() {
    assert_eq!(crate::p8::MAX_EXP, 24);
    assert_eq!(crate::p8::MIN_EXP, -24);
    assert_eq!(crate::p32::MAX_EXP, 120);
    assert_eq!(crate::p64::MAX_EXP, 248);
    assert_eq!(Posit::<10, 1, i16>::MAX_EXP, 16);
    assert_eq!(Posit::<8, 0, i8>::MIN_EXP, -6);
  }
}
