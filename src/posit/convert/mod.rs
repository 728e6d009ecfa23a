use super::*;

/// Value-to-value conversions with the rounding rules the posit standard prescribes; the
/// reciprocal of [`RoundInto`].
///
/// The interface mirrors the standard [`From`], but — unlike the
/// [convention for `From`](core::convert::From#when-to-implement-from) — these conversions are
/// *not necessarily lossless*: they round when they must, which is the point. Conversions that
/// genuinely cannot lose information (e.g. widening a posit into a quire) use the ordinary
/// [`From`]/[`TryFrom`] traits instead.
///
/// The usual guidelines apply: implement [`RoundFrom`] rather than [`RoundInto`] (a blanket
/// impl provides the latter), and bound generic functions on [`RoundInto`].
///
/// # Rounding
///
/// "Rounding" always means the posit rule:
///
///   - values bigger in magnitude than the biggest posit round to it (never overflow);
///   - positive (negative) values smaller in magnitude than the smallest positive (negative)
///     posit round to it (never underflow to zero);
///   - everything else rounds to the nearest bit pattern, ties to the even pattern.
///
/// # Examples
///
/// ```
/// # use tapered_posit::*;
/// assert!(p16::round_from(1) == p16::round_from(1.00000001));
/// assert!(p32::round_from(1) <  p32::round_from(1.00000001));
///
/// assert_eq!(p32::round_from(f64::NAN), p32::NAR);
///
/// assert_eq!(f32::round_from(p16::MIN_POSITIVE), 1.3877788e-17);
/// assert_eq!(i64::round_from(p8::MAX), 1 << 24);
/// ```
pub trait RoundFrom<T> {
  /// Convert `value` into this type, rounding by the posit rules where the value is not
  /// exactly representable.
  #[must_use]
  fn round_from(value: T) -> Self;
}

/// Value-to-value conversions with the rounding rules the posit standard prescribes; the
/// reciprocal of [`RoundFrom`], with the same relationship [`Into`] has to [`From`].
///
/// See [`RoundFrom`] for the semantics; never implement this directly, the blanket impl covers
/// every [`RoundFrom`].
///
/// # Examples
///
/// ```
/// # use tapered_posit::*;
/// assert_eq!(p16::ONE.next(), 1.0004883_f64.round_into());
/// assert_eq!(p32::ONE.next(), 1.0000000075_f64.round_into());
///
/// assert_eq!(5.960464477539063e-8, p8::MIN_POSITIVE.round_into());
/// assert_eq!(1_i64 << 56, p16::MAX.round_into());
///
/// assert!(f64::is_nan(p32::NAR.round_into()));
/// ```
pub trait RoundInto<T> {
  /// Convert this value into `T`, rounding by the posit rules where it is not exactly
  /// representable.
  #[must_use]
  fn round_into(self) -> T;
}

impl<T> RoundFrom<T> for T {
  fn round_from(value: T) -> Self {
    value
  }
}

impl<T, U> RoundInto<U> for T
where
  U: RoundFrom<T>,
{
  fn round_into(self) -> U {
    U::round_from(self)
  }
}

mod float;
mod int;
