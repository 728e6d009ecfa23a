use super::*;

use core::fmt::{Debug, Display, Formatter, Result};
use core::str::FromStr;

use super::convert::RoundFrom;
use crate::ParseError;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Debug for Posit<N, ES, Int> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    if const { Self::JUNK_BITS == 0 } {
      let bits = self.0;
      f.debug_tuple("Posit")
        .field(&format_args!("0b{bits:0w$b}", w = Int::BITS as usize))
        .finish()
    } else {
      let bits_junk = (self.0 >> Self::BITS).mask_lsb(Self::JUNK_BITS);
      let bits_significant = self.0.mask_lsb(Self::BITS);
      f.debug_tuple("Posit")
        .field(&format_args!(
          "0b{bits_junk:0wj$b}_{bits_significant:0ws$b}",
          wj = Self::JUNK_BITS as usize,
          ws = Self::BITS as usize,
        ))
        .finish()
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Debug for Decoded<N, ES, Int> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    let frac_hidden = self.frac.lshr(Int::BITS - 2);
    let frac_explicit = (self.frac << 2).lshr(2);
    // Logical shift, so the regime half prints with exactly `Int::BITS - ES` digits.
    let scale_regime = self.scale.lshr(ES);
    let scale_exponent = self.scale.mask_lsb(ES);
    let scale_total = self.scale;
    f.debug_struct("Decoded")
      .field(
        "frac",
        &format_args!("0b{frac_hidden:02b}_{frac_explicit:0w$b}", w = Int::BITS as usize - 2),
      )
      .field(
        "scale",
        &format_args!(
          "0b{scale_regime:0wr$b}_{scale_exponent:0we$b} ({scale_total:+})",
          wr = (Int::BITS - ES) as usize,
          we = ES as usize,
        ),
      )
      .finish()
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Display for Posit<N, ES, Int> {
  /// The human-readable decimal form, via `f64` — lossy and precision-bounded by design. For
  /// a lossless text form see [`Posit::hex_format`].
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    if self.is_nar() {
      f.write_str("nar")
    } else {
      Display::fmt(&f64::round_from(*self), f)
    }
  }
}

/// See [`Posit::hex_format`].
pub struct HexFormat<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(Posit<N, ES, Int>);

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Display for HexFormat<N, ES, Int> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    let bits: u128 = self.0.to_bits_unsigned().into();
    write!(f, "{}.{}x{:0w$x}p", N, ES, bits, w = N.div_ceil(4) as usize)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The canonical, bit-exact ASCII form `"<nbits>.<es>x<HEXBITS>p"` (e.g. `p32::ONE` is
  /// `"32.2x40000000p"`), as a [`Display`] adapter. [`FromStr`] parses it back losslessly.
  ///
  /// ```
  /// # use tapered_posit::p32;
  /// assert_eq!(format!("{}", p32::ONE.hex_format()), "32.2x40000000p");
  /// assert_eq!("32.2x40000000p".parse::<p32>(), Ok(p32::ONE));
  /// ```
  pub fn hex_format(self) -> HexFormat<N, ES, Int> {
    HexFormat(self)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> FromStr for Posit<N, ES, Int> {
  type Err = ParseError;

  /// Parse the canonical `"<nbits>.<es>x<HEXBITS>p"` form bit-exactly, requiring the
  /// `<nbits>.<es>` prefix to name *this* configuration. Strings not in canonical form fall
  /// back to decimal parsing via `f64` (so `"3.14"`, `"nar"`, `"inf"` all work), rounding by
  /// the posit rules.
  fn from_str(s: &str) -> core::result::Result<Self, ParseError> {
    if let Some(rest) = s.strip_suffix('p')
      && let Some((config, hex)) = rest.split_once('x')
    {
      let Some((n, es)) = config.split_once('.') else { return Err(ParseError::Malformed) };
      let found_n: u32 = n.parse().map_err(|_| ParseError::Malformed)?;
      let found_es: u32 = es.parse().map_err(|_| ParseError::Malformed)?;
      if found_n != N || found_es != ES {
        return Err(ParseError::ConfigMismatch {
          found_n,
          found_es,
          want_n: N,
          want_es: ES,
        });
      }
      let bits = u128::from_str_radix(hex, 16).map_err(|_| ParseError::Malformed)?;
      if bits >> N != 0 {
        return Err(ParseError::TooManyBits);
      }
      Ok(Self::from_bits(const_as::<i64, Int>(bits as u64 as i64)))
    } else if s == "nar" {
      Ok(Self::NAR)
    } else {
      let float: f64 = s.parse().map_err(|_| ParseError::Malformed)?;
      Ok(Self::round_from(float))
    }
  }
}
