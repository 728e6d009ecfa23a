use super::*;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The size of this posit type in bits (i.e. the parameter `N`).
  ///
  /// Note: the logical size, not necessarily the size of the underlying machine type.
  pub const BITS: u32 = {
    assert!(N >= 3, "A posit cannot have fewer than 3 bits");
    assert!(
      N <= Int::BITS,
      "Cannot represent an N-bit posit in an underlying machine type with fewer than N bits",
    );
    N
  };

  /// The number of exponent bits (i.e. the parameter `ES`).
  pub const ES: u32 = {
    assert!(ES <= N, "Cannot have more exponent bits ES than total bits N");
    // The scale of a posit is bounded by ±(N-2) × 2^ES, and the arithmetic kernels form sums
    // and differences of two scales plus small corrections. Requiring 4 × (N-2) × 2^ES
    // (exclusive) to be representable in `Int` keeps every intermediate in range. In const
    // context we conservatively round (N-2) down to a power of two and compare exponents:
    // floor(log2(N-2)) + ES + 2 < Int::BITS.
    assert!(
      (N - 2).ilog2() + ES + 2 < Int::BITS,
      "ES is too big for this combination of N and underlying machine type; lower ES or pick \
      a wider Int",
    );
    ES
  };

  /// When an `N`-bit posit lives in a machine type with `M > N` bits, the top `M - N` bits are
  /// redundant copies of bit `N-1` ([`Self::sign_extend`] maintains this), so the stored `Int`
  /// always lies in `-2^(N-1) .. 2^(N-1)`.
  pub(crate) const JUNK_BITS: u32 = Int::BITS - Self::BITS;

  /// Sign-extend from [`Self::BITS`] (the logical width) to the full width of `Int`.
  #[inline]
  pub(crate) fn sign_extend(x: Int) -> Int {
    if const { Self::JUNK_BITS == 0 } {
      x
    } else {
      (x << Self::JUNK_BITS) >> Self::JUNK_BITS
    }
  }

  /// Construct a posit from its raw bit pattern. Bits above the lowest `N` ([`Self::BITS`]),
  /// if any, are ignored.
  #[inline]
  pub fn from_bits(bits: Int) -> Self {
    Self(Self::sign_extend(bits))
  }

  /// As [`Self::from_bits`], taking the pattern as an unsigned integer.
  #[inline]
  pub fn from_bits_unsigned(bits: Int::Unsigned) -> Self {
    Self::from_bits(Int::of_unsigned(bits))
  }

  /// As [`Self::from_bits`], but skips sign extension.
  ///
  /// # Safety
  ///
  /// `bits` has to be a value returned by [`Self::to_bits`], i.e. already sign-extended from
  /// bit `N-1`, or calling this function is *undefined behaviour*. (When `Int::BITS == N` this
  /// holds trivially.)
  #[inline]
  pub const unsafe fn from_bits_unchecked(bits: Int) -> Self {
    Self(bits)
  }

  /// The raw bit pattern of `self` as a machine integer, sign-extended from bit `N-1`.
  #[inline]
  pub const fn to_bits(self) -> Int {
    self.0
  }

  /// The raw bit pattern of `self` as an unsigned integer, with the junk bits masked to zero.
  #[inline]
  pub fn to_bits_unsigned(self) -> Int::Unsigned {
    if const { Self::JUNK_BITS == 0 } {
      self.0.as_unsigned()
    } else {
      self.0.mask_lsb(Self::BITS).as_unsigned()
    }
  }

  /// Whether `self` is one of the two special patterns, [0](Self::ZERO) or [NaR](Self::NAR).
  /// Equivalent to `self == Self::ZERO || self == Self::NAR`, but faster.
  #[inline]
  pub(crate) fn is_special(&self) -> bool {
    (self.0 << Self::JUNK_BITS) << 1 == Int::ZERO
  }

  /// Whether `self` is zero.
  #[inline]
  pub fn is_zero(&self) -> bool {
    *self == Self::ZERO
  }

  /// Whether `self` is [NaR](Self::NAR), the single not-a-real point.
  #[inline]
  pub fn is_nar(&self) -> bool {
    *self == Self::NAR
  }

  /// Whether `self` represents a real value less than zero. NaR is *not* negative (nor
  /// positive), even though its bit pattern has the sign bit set.
  #[inline]
  pub fn is_negative(&self) -> bool {
    *self < Self::ZERO && !self.is_nar()
  }

  /// Whether `self` represents a real value greater than zero.
  #[inline]
  pub fn is_positive(&self) -> bool {
    *self > Self::ZERO
  }

  /// The scale of `self`: the power-of-two exponent `k × 2^ES + e` combining the regime and
  /// exponent fields, such that `self = ±(1 + fraction) × 2^scale`. `None` for zero and NaR,
  /// which have no scale.
  ///
  /// Note that for negative posits this is the scale of the decoded two's complement form
  /// (fraction in `[-2, -1)`), one less than the scale of the absolute value when the fraction
  /// is not exactly 1.
  pub fn scale(self) -> Option<Int> {
    if self.is_special() {
      None
    } else {
      // SAFETY: `self` is not 0 or NaR.
      Some(unsafe { self.decode_regular() }.scale)
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Decoded<N, ES, Int> {
  /// The [`frac`](Decoded::frac) field has its binary point [`Self::FRAC_WIDTH`] bits from the
  /// right; equivalently, it is an integer numerator over [`Self::FRAC_DENOM`].
  pub(crate) const FRAC_WIDTH: u32 = Int::BITS - 2;

  /// The denominator of the [`frac`](Decoded::frac) fixed-point fraction.
  pub(crate) const FRAC_DENOM: Int = const_as(1i64 << Self::FRAC_WIDTH);

  /// As [`Posit::BITS`].
  pub(crate) const BITS: u32 = Posit::<N, ES, Int>::BITS;

  /// As [`Posit::ES`].
  pub(crate) const ES: u32 = Posit::<N, ES, Int>::ES;

  /// As [`Posit::JUNK_BITS`].
  pub(crate) const JUNK_BITS: u32 = Posit::<N, ES, Int>::JUNK_BITS;

  /// Whether `self` is normalised:
  ///
  /// - `frac` starts with `0b01` or `0b10`, and
  /// - `scale >> FRAC_WIDTH` is all-zeros or all-ones (guaranteed whenever `ES > 0`; for
  ///   `ES == 0` it bounds the scale so the encode kernel's xor trick stays valid).
  pub(crate) fn is_normal(self) -> bool {
    let frac = self.frac >> Self::FRAC_WIDTH;
    let scale = self.scale >> Self::FRAC_WIDTH;
    (frac == Int::ONE || frac == !Int::ONE)
      && (ES > 0 || scale == Int::ZERO || scale == !Int::ZERO)
  }
}


mod tests_compile_fail {
  /// ```compile_fail
  /// use tapered_posit::Posit;
  /// pub fn foo() -> u32 { Posit::<2, 0, i8>::BITS }
  /// ```
  #[allow(dead_code)]
  fn bits_too_few() {}

  /// ```compile_fail
  /// use tapered_posit::Posit;
  /// pub fn foo() -> u32 { Posit::<9, 0, i8>::BITS }
  /// ```
  #[allow(dead_code)]
  fn bits_too_many() {}

  /// ```compile_fail
  /// use tapered_posit::Posit;
  /// pub fn foo() -> u32 { Posit::<8, 4, i8>::ES }
  /// ```
  #[allow(dead_code)]
  fn es_too_many_8() {}

  /// ```compile_fail
  /// use tapered_posit::Posit;
  /// pub fn foo() -> u32 { Posit::<32, 26, i32>::ES }
  /// ```
  #[allow(dead_code)]
  fn es_too_many_32() {}
}
