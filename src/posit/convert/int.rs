use super::*;

use crate::underlying::const_as;

/// The kernel for converting a nonzero *signed* int into a [`Decoded`] plus sticky.
///
/// # Safety
///
/// `int` must not be `FromInt::ZERO`, or calling this function is *undefined behaviour*.
#[inline]
unsafe fn round_from_signed_kernel<
  FromInt: crate::Int,
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(int: FromInt) -> (Decoded<N, ES, Int>, Int) {
  // When the target frac is narrower than the source int, the value has to be shifted right
  // (dropping bits into sticky) *before* the cast; when it is wider, shifted left after.
  let shift_right =
    if const { Int::BITS >= FromInt::BITS } { 0 } else { FromInt::BITS - Int::BITS };
  let shift_left =
    if const { Int::BITS <= FromInt::BITS } { 0 } else { Int::BITS - FromInt::BITS };

  // Normalising an integer into a `frac` starting `0b01`/`0b10` is a left shift by the leading
  // run length minus one, compensated in the scale:
  //
  //   value: 0b00010011 (= 19)          value: 0b11111111 (= -1)
  //    frac: 0b01001100                  frac: 0b10000000
  //   scale: +4 (= 6 frac width - 2)    scale: -1 (= 6 frac width - 7)
  //
  // SAFETY: `int` is not 0 (precondition).
  let underflow = unsafe { int.leading_run_minus_one() };
  let frac = const_as::<FromInt, Int>(int << underflow >> shift_right) << shift_left;
  let scale = {
    let scale = (FromInt::BITS - 2).wrapping_sub(underflow);
    const_as::<i32, Int>(scale as i32)
  };
  let sticky = {
    let true_shift = shift_right.saturating_sub(underflow);
    Int::from(int.mask_lsb(true_shift) != FromInt::ZERO)
  };

  (Decoded { frac, scale }, sticky)
}

/// The kernel for converting a nonzero *unsigned* int into a [`Decoded`] plus sticky (the
/// argument carries it reinterpreted in the same-width signed type).
///
/// # Safety
///
/// `int` must not be `FromInt::ZERO`, or calling this function is *undefined behaviour*.
#[inline]
unsafe fn round_from_unsigned_kernel<
  FromInt: crate::Int,
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(int: FromInt) -> (Decoded<N, ES, Int>, Int) {
  let shift_right =
    if const { Int::BITS >= FromInt::BITS } { 0 } else { FromInt::BITS - Int::BITS };
  let shift_left =
    if const { Int::BITS <= FromInt::BITS } { 0 } else { Int::BITS - FromInt::BITS };

  // As [`round_from_signed_kernel`], except a set top bit means "big", not "negative", so the
  // frac needs one extra place on the right for its leading 0:
  //
  //   value: 0b10010011 (= 147)
  //    frac: 0b01001001 (1 lost to sticky)
  //   scale: +7 (= 6 frac width - 0 underflow + 1 overflow)
  //
  // SAFETY: `int` is not 0 (precondition).
  let leading_zeros = unsafe { int.leading_zeros_nonzero() };
  let overflow = u32::from(leading_zeros == 0);
  let underflow = leading_zeros.saturating_sub(1);
  let frac =
    (const_as::<FromInt, Int>(int << underflow >> shift_right) << shift_left).lshr(overflow);
  let scale = {
    let scale = (FromInt::BITS - 2).wrapping_add(overflow).wrapping_sub(underflow);
    const_as::<i32, Int>(scale as i32)
  };
  let sticky = {
    let true_shift = shift_right.wrapping_add(overflow).saturating_sub(underflow);
    Int::from(int.mask_lsb(true_shift) != FromInt::ZERO)
  };

  (Decoded { frac, scale }, sticky)
}

macro_rules! impl_from_signed {
  ($signed:ty) => {
    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<$signed> for Posit<N, ES, Int> {
      #[doc = concat!("Convert an `", stringify!($signed), "` into a posit, rounding if \
        necessary. Per the standard, `", stringify!($signed), "::MIN` (the integer pattern \
        with only the top bit set) converts to [NaR](Posit::NAR).")]
      fn round_from(value: $signed) -> Self {
        if value == 0 {
          return Posit::ZERO;
        }
        if value == <$signed>::MIN {
          return Posit::NAR;
        }
        // SAFETY: `value` is not 0; the result of the kernel is normalised.
        unsafe {
          let (decoded, sticky) = round_from_signed_kernel(value);
          decoded.round(sticky)
        }
      }
    }
  };
}

macro_rules! impl_from_unsigned {
  ($unsigned:ty, $signed:ty) => {
    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<$unsigned> for Posit<N, ES, Int> {
      #[doc = concat!("Convert a `", stringify!($unsigned), "` into a posit, rounding if \
        necessary.")]
      fn round_from(value: $unsigned) -> Self {
        if value == 0 {
          return Posit::ZERO;
        }
        // SAFETY: `value` is not 0; the result of the kernel is normalised.
        unsafe {
          let (decoded, sticky) = round_from_unsigned_kernel(value as $signed);
          decoded.round(sticky)
        }
      }
    }
  };
}

impl_from_signed! {i8}
impl_from_signed! {i16}
impl_from_signed! {i32}
impl_from_signed! {i64}

impl_from_unsigned! {u8, i8}
impl_from_unsigned! {u16, i16}
impl_from_unsigned! {u32, i32}
impl_from_unsigned! {u64, i64}

macro_rules! impl_to_int {
  ($int:ty) => {
    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<Posit<N, ES, Int>> for $int {
      #[doc = concat!("Convert a posit into an `", stringify!($int), "`, truncating towards \
        zero and saturating at the type bounds. [NaR](Posit::NAR) converts to `",
        stringify!($int), "::MIN`, mirroring the NaR ← MIN rule of the inbound conversion.")]
      fn round_from(value: Posit<N, ES, Int>) -> Self {
        match value.classify() {
          Class::Zero => 0,
          Class::NaR => <$int>::MIN,
          Class::Regular(Decoded { frac, scale }) => {
            let frac: i128 = frac.into();
            let scale: i128 = scale.into();
            // value = frac × 2^(scale - FRAC_WIDTH)
            let shift = scale - (Int::BITS as i128 - 2);
            let truncated: i128 = if shift >= 64 {
              // |frac| ≥ 2^(FRAC_WIDTH - 1), so the magnitude is at least 2^63: saturate.
              if frac > 0 { i128::MAX } else { i128::MIN }
            } else if shift >= 0 {
              frac << shift
            } else if shift <= -(Int::BITS as i128) {
              0
            } else {
              // Arithmetic shift floors; correct negative inexact quotients towards zero.
              let cut = (-shift) as u32;
              let floored = frac >> cut;
              floored + ((frac < 0 && frac.trailing_zeros() < cut) as i128)
            };
            if truncated > <$int>::MAX as i128 {
              <$int>::MAX
            } else if truncated < <$int>::MIN as i128 {
              <$int>::MIN
            } else {
              truncated as $int
            }
          }
        }
      }
    }
  };
}

impl_to_int! {i32}
impl_to_int! {i64}
