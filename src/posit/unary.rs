use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The posit whose representation is the lexicographic successor of `self`'s: the
  /// next-larger representable value in encoding order. Because bit-pattern order equals
  /// value order, repeated `next` walks the whole state space:
  /// zero → minpos → … → maxpos → NaR → [MIN](Self::MIN) → … → -minpos → zero.
  ///
  /// Note that, unlike the arithmetic operators, `next` and `prior` do not absorb
  /// [NaR](Self::NAR): they step over it like any other point.
  #[inline]
  pub fn next(self) -> Self {
    Self::from_bits(self.0.wrapping_add(Int::ONE))
  }

  /// The posit whose representation is the lexicographic predecessor of `self`'s: the inverse
  /// of [`Self::next`].
  #[inline]
  pub fn prior(self) -> Self {
    Self::from_bits(self.0.wrapping_sub(Int::ONE))
  }

  /// The absolute value of `self`. Exact; NaR maps to NaR.
  #[inline]
  pub fn abs(self) -> Self {
    Self::from_bits(self.0.wrapping_abs())
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for Posit<N, ES, Int> {
  type Output = Posit<N, ES, Int>;

  /// Negation is exact: posit encodings are symmetric under two's complement, with NaR and
  /// zero as the self-negating fixed points.
  #[inline]
  fn neg(self) -> Self::Output {
    Posit::from_bits(self.0.wrapping_neg())
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for &Posit<N, ES, Int> {
  type Output = Posit<N, ES, Int>;

  #[inline]
  fn neg(self) -> Self::Output {
    -*self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;

  mod neg {
    use super::*;

    #[test]
    fn fixed_points() {
      assert_eq!(-crate::p8::ZERO, crate::p8::ZERO);
      assert_eq!(-crate::p8::NAR, crate::p8::NAR);
    }

    #[test]
    fn p8() {
      for p in crate::p8::cases_exhaustive() {
        assert_eq!(Rational::try_from(-p).unwrap(), -Rational::try_from(p).unwrap())
      }
    }

    #[test]
    fn posit_10_0() {
      for p in Posit::<10, 0, i16>::cases_exhaustive() {
        assert_eq!(Rational::try_from(-p).unwrap(), -Rational::try_from(p).unwrap())
      }
    }
  }

  mod abs {
    use super::*;
    use malachite::base::num::arithmetic::traits::Abs;

    #[test]
    fn fixed_points() {
      assert_eq!(crate::p8::ZERO.abs(), crate::p8::ZERO);
      assert_eq!(crate::p8::NAR.abs(), crate::p8::NAR);
    }

    #[test]
    fn p8() {
      for p in crate::p8::cases_exhaustive() {
        assert_eq!(
          Rational::try_from(p.abs()).unwrap(),
          Rational::try_from(p).unwrap().abs(),
        )
      }
    }
  }

  mod next_prior {
    use super::*;

    /// The successor walk visits every pattern once and comes back around, and (skipping the
    /// wrap through NaR) is monotonically increasing in value.
    #[test]
    fn p8_cycle() {
      let mut p = crate::p8::ZERO;
      for _ in 0..256 {
        let succ = p.next();
        assert_eq!(succ.prior(), p);
        p = succ;
      }
      assert_eq!(p, crate::p8::ZERO);
    }

    #[test]
    fn p8_monotonic() {
      // From NaR (the least bit pattern), 255 successors are strictly increasing.
      let mut p = crate::p8::NAR;
      for _ in 0..255 {
        let succ = p.next();
        assert!(succ > p);
        p = succ;
      }
      assert_eq!(p, crate::p8::MAX);
    }

    #[test]
    fn landmarks() {
      assert_eq!(crate::p16::ZERO.next(), crate::p16::MIN_POSITIVE);
      assert_eq!(crate::p16::MAX.next(), crate::p16::NAR);
      assert_eq!(crate::p16::NAR.next(), crate::p16::MIN);
      assert_eq!(crate::p16::MAX_NEGATIVE.next(), crate::p16::ZERO);
      assert_eq!(crate::p16::MIN_POSITIVE.prior(), crate::p16::ZERO);
    }
  }
}
