use super::*;

use crate::QuireError;

impl<
  const N: u32,
  const ES: u32,
  const WORDS: usize,
> Quire<N, ES, WORDS> {
  /// Add a posit into the accumulator, exactly.
  ///
  /// Zero is a no-op; a NaR operand (or an already-NaR quire) poisons the quire to
  /// [`NAR`](Self::NAR), which is a value, not an error. [`QuireError::RangeExceeded`] means
  /// more than 2<sup>[`SUM_LIMIT`](Self::SUM_LIMIT)</sup> worth of magnitude has been
  /// accumulated; the quire is left untouched.
  pub fn try_add<Int: crate::Int>(
    &mut self,
    posit: Posit<N, ES, Int>,
  ) -> Result<(), QuireError> {
    const {
      assert!(Int::BITS <= 64, "Quire accumulation is not supported for Int wider than 64 bits")
    };
    if posit == Posit::ZERO {
      Ok(())
    } else if posit == Posit::NAR || self.is_nar() {
      *self = Self::NAR;
      Ok(())
    } else {
      // SAFETY: `posit` is not 0 or NaR.
      let Decoded { frac, scale } = unsafe { posit.decode_regular() };
      let frac: i128 = frac.into();
      let scale: i128 = scale.into();
      // value = frac / 2^FRAC_WIDTH × 2^scale, and the quire's 1.0 sits at bit RADIX.
      let shift = Self::RADIX as i64 - (Int::BITS as i64 - 2) + scale as i64;
      self.try_accumulate(frac, shift)
    }
  }

  /// Subtract a posit from the accumulator, exactly. See [`Self::try_add`].
  pub fn try_sub<Int: crate::Int>(
    &mut self,
    posit: Posit<N, ES, Int>,
  ) -> Result<(), QuireError> {
    self.try_add(-posit)
  }

  /// Accumulate the **exact** product `a × b`, computed at full double width with no rounding
  /// whatsoever — the elementary step of a fused dot product.
  ///
  /// Zero operands are a no-op; NaR operands poison the quire to [`NAR`](Self::NAR).
  /// [`QuireError::RangeExceeded`] means more than
  /// 2<sup>[`CAPACITY`](Self::CAPACITY)</sup> full-scale products' worth of magnitude has been
  /// accumulated; the quire is left untouched.
  pub fn try_add_product<Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<(), QuireError> {
    const {
      assert!(Int::BITS <= 64, "Quire accumulation is not supported for Int wider than 64 bits")
    };
    if a == Posit::NAR || b == Posit::NAR || self.is_nar() {
      *self = Self::NAR;
      Ok(())
    } else if a == Posit::ZERO || b == Posit::ZERO {
      Ok(())
    } else {
      // SAFETY: neither operand is 0 or NaR.
      let x = unsafe { a.decode_regular() };
      let y = unsafe { b.decode_regular() };
      // The full product of two frac words fits an i128 (each is under 2^63 in magnitude),
      // so unlike the posit multiply kernel nothing is dropped and nothing renormalises:
      //
      //   a × b = (x.frac × y.frac) / 2^(2 × FRAC_WIDTH) × 2^(x.scale + y.scale)
      let xfrac: i128 = x.frac.into();
      let yfrac: i128 = y.frac.into();
      let xscale: i128 = x.scale.into();
      let yscale: i128 = y.scale.into();
      let frac = xfrac * yfrac;
      let shift =
        Self::RADIX as i64 - 2 * (Int::BITS as i64 - 2) + (xscale + yscale) as i64;
      self.try_accumulate(frac, shift)
    }
  }

  /// As [`Self::try_add_product`], panicking on range exhaustion (like integer overflow, this
  /// is a caller error: the quire was sized too small for the reduction).
  pub fn add_product<Int: crate::Int>(&mut self, a: Posit<N, ES, Int>, b: Posit<N, ES, Int>) {
    self
      .try_add_product(a, b)
      .expect("quire range exceeded: use a quire with more capacity")
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const WORDS: usize,
> core::ops::AddAssign<Posit<N, ES, Int>> for Quire<N, ES, WORDS> {
  /// Exact accumulation; panics on range exhaustion (see [`Quire::try_add`]).
  fn add_assign(&mut self, rhs: Posit<N, ES, Int>) {
    self.try_add(rhs).expect("quire range exceeded: use a quire with more capacity")
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const WORDS: usize,
> core::ops::AddAssign<&Posit<N, ES, Int>> for Quire<N, ES, WORDS> {
  fn add_assign(&mut self, rhs: &Posit<N, ES, Int>) {
    *self += *rhs
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const WORDS: usize,
> core::ops::SubAssign<Posit<N, ES, Int>> for Quire<N, ES, WORDS> {
  /// Exact subtraction; panics on range exhaustion (see [`Quire::try_sub`]).
  fn sub_assign(&mut self, rhs: Posit<N, ES, Int>) {
    self.try_sub(rhs).expect("quire range exceeded: use a quire with more capacity")
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const WORDS: usize,
> core::ops::SubAssign<&Posit<N, ES, Int>> for Quire<N, ES, WORDS> {
  fn sub_assign(&mut self, rhs: &Posit<N, ES, Int>) {
    *self -= *rhs
  }
}
