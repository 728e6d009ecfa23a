use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Decoded<N, ES, Int> {
  /// Encode a posit, rounding if necessary. This is the **one** rounding primitive in the
  /// crate; the rule is always the same: round to nearest, ties to the even bit pattern, and
  /// never round into 0 or NaR (values beyond the extremes saturate at
  /// [MAX](Posit::MAX)/[MIN](Posit::MIN), values below the smallest magnitude stop at
  /// [MIN_POSITIVE](Posit::MIN_POSITIVE)/[MAX_NEGATIVE](Posit::MAX_NEGATIVE)).
  ///
  /// `sticky` is the sticky word: it must be `Int::ZERO` **if and only if** every bit already
  /// lost before this call was 0. Accumulate any lost bits into it and pass it here to get a
  /// correctly rounded result.
  ///
  /// # Safety
  ///
  /// [`self.is_normal()`](Self::is_normal) must hold, or calling this function is *undefined
  /// behaviour*.
  pub(crate) unsafe fn round(self, mut sticky: Int) -> Posit<N, ES, Int> {
    debug_assert!(
      self.is_normal(),
      "Safety precondition violated: {self:?} is not normalised",
    );

    // The regime part of the scale: everything above the lowest ES bits.
    let regime = self.scale >> ES;

    // The regime bits to emit are (n = regime value, s = sign of the posit):
    //
    //   A run of -n  0s followed by a 1, if n is negative and s is positive
    //   A run of n+1 1s followed by a 0, if n is positive and s is positive
    //
    // and, because the fields encode the two's complement absolute value, the complement of
    // that for negative posits:
    //
    //   A run of -n  1s followed by a 0, if n is negative and s is negative
    //   A run of n+1 0s followed by a 1, if n is positive and s is negative
    //
    // Rewriting `-n` as `!n + 1` and folding the four cases over `n ^ s`:
    //
    //   A run of !n+1 0s followed by a 1, if n ^ s is negative
    //   A run of  n+1 1s followed by a 0, if n ^ s is positive
    //
    // To build that pattern: the two msb of `regime` are always 00 or 11 (a regime never
    // exceeds ±Int::BITS), and the two msb of `frac` are always 01 or 10 (normalisation). So
    // the two msb of `frac ^ scale` are 01 when `n ^ s` is positive and 10 when negative — the
    // *complement* of those two bits, dragged right by `regime_raw` places, is exactly the run
    // and its terminator:
    //
    //   regime          = 3          regime          = -3         regime          = 3
    //   sign            = 0b01…      sign            = 0b01…      sign            = 0b10…
    //   !(frac^scale)   = 0b10…      !(frac^scale)   = 0b01…      !(frac^scale)   = 0b01…
    //   regime_raw      = 3          regime_raw      = 2          regime_raw      = 3
    //   dragged right   = 0b11110…   dragged right   = 0b0001.…   dragged right   = 0b00001…
    //                     (4 1s, 0)                  (3 0s, 1)                   (!(-4): 4 0s, 1)
    let frac_xor_scale = self.frac ^ self.scale;
    let regime_raw = regime.not_if_negative(regime).as_u32();

    // Saturation corner case first. Never rounding into 0 or NaR is equivalent to clamping the
    // regime *length*: the longest run that leaves room for a terminator within N-1 field bits.
    // Both saturated patterns (s000…001 and s111…111) end in a 1, so it's enough to clamp
    // `regime_raw` to BITS-3 and force the lsb to 1 at the end; the rest of the kernel can then
    // assume `regime_raw ≤ BITS - 3`.
    let regime_raw_max = Self::BITS - 3;
    let regime_overflow = regime_raw > regime_raw_max;
    let regime_raw = if regime_overflow { regime_raw_max } else { regime_raw };

    // Assemble sign and regime bits in one register. The sign bit is just the msb of `frac`.
    let regime_bits = (!frac_xor_scale).mask_msb(2) >> regime_raw;
    let sign_and_regime_bits = self.frac.mask_msb(1) | regime_bits.lshr(1);
    let sign_and_regime_bits = sign_and_regime_bits >> Self::JUNK_BITS;

    // Exponent and fraction bits are assembled in a second register, then dragged right to
    // their place after the regime. Doing them together costs nothing and makes the rounding
    // bookkeeping below fall out naturally. The exponent bits, like the regime, encode the
    // absolute value, so they get complemented for negative posits.
    let exponent_bits = if const { ES != 0 } {
      self.scale.not_if_negative(self.frac) << (Int::BITS - ES)
    } else {
      Int::ZERO
    };
    let fraction_bits = (self.frac << 2).lshr(Self::ES);
    let exponent_and_fraction_bits = (exponent_bits | fraction_bits).lshr(Self::JUNK_BITS);

    // Now the rounding. In terms of bit patterns the rule is simply: lay out the infinitely
    // precise result, cut at the target width, and round to nearest, ties to even. Calling the
    // last kept bit `odd`, the first cut bit `round` and the OR of all the others `sticky`:
    //
    //   odd | round | sticky | result
    //   ..x | 0     |  x     | round down (+0)
    //   ..0 | 1     | =0     | round down to even (+0)
    //   ..1 | 1     | =0     | round up to even (+1)
    //   ..x | 1     | ≠0     | round up (+1)
    //
    // i.e. increment iff `round & (odd | sticky != 0)`.

    // Bits of fraction lost when ES (and the junk width) pushed them off the low end.
    if const { Self::JUNK_BITS + Self::ES > 2 } {
      sticky |= self.frac.mask_lsb(Self::JUNK_BITS + Self::ES - 2);
    };
    // The low `regime_raw + 3` bits of the exponent-and-fraction register fall off the posit
    // (1 sign bit + regime_raw + 1 run bits + 1 terminator occupy that much on the left): the
    // last one dropped is `round`, the rest accumulate into `sticky`.
    sticky |= exponent_and_fraction_bits.mask_lsb(2 + regime_raw);
    let exponent_and_fraction_bits = exponent_and_fraction_bits.lshr(2 + regime_raw);
    let round = exponent_and_fraction_bits.get_lsb();
    let exponent_and_fraction_bits = exponent_and_fraction_bits.lshr(1);

    // Combine, decide the increment, and resolve the saturation corner case from above.
    let all_bits = sign_and_regime_bits | exponent_and_fraction_bits;
    let odd = all_bits.get_lsb();
    let round_up: bool = round & (odd | (sticky != Int::ZERO));

    let bits = all_bits + Int::from(round_up & !regime_overflow);
    // SAFETY: the assembled pattern is sign-extended by construction.
    unsafe { Posit::from_bits_unchecked(bits | Int::from(regime_overflow)) }
  }

  /// Encode a posit **known to be exactly representable** (e.g. a [`Decoded`] that came out of
  /// [`Posit::decode_regular`]). If the value might need rounding, use [`Self::round`].
  ///
  /// # Safety
  ///
  /// [`self.is_normal()`](Self::is_normal) must hold, or calling this function is *undefined
  /// behaviour*.
  #[inline]
  pub(crate) unsafe fn encode(self) -> Posit<N, ES, Int> {
    debug_assert!(
      self.is_normal(),
      "Safety precondition violated: {self:?} is not normalised",
    );
    unsafe { self.round(Int::ZERO) }
  }

  /// Checked form of [`Self::round`], for tests.
  #[cfg(test)]
  pub(crate) fn try_round(self, sticky: Int) -> Result<Posit<N, ES, Int>, ()> {
    if self.is_normal() {
      Ok(unsafe { self.round(sticky) })
    } else {
      Err(())
    }
  }

  /// Checked form of [`Self::encode`], for tests.
  #[cfg(test)]
  pub(crate) fn try_encode(self) -> Result<Posit<N, ES, Int>, ()> {
    if self.is_normal() {
      Ok(unsafe { self.encode() })
    } else {
      Err(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::test::posit_6_2;

  use malachite::rational::Rational;
  use proptest::prelude::*;

  mod roundtrip {
    use super::*;

    #[test]
    fn posit_6_2_manual() {
      for (posit, _) in posit_6_2() {
        assert_eq!(unsafe { posit.decode_regular().encode() }, posit)
      }
    }

    macro_rules! test_exhaustive {
      ($name:ident, $posit:ty) => {
        #[test]
        fn $name() {
          for p in <$posit>::cases_exhaustive() {
            let Class::Regular(d) = p.classify() else { panic!("Invalid test case") };
            assert_eq!(d.try_encode(), Ok(p))
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
            let Class::Regular(d) = p.classify() else { panic!("Invalid test case") };
            assert_eq!(d.try_encode(), Ok(p))
          }
        }
      };
    }

    test_exhaustive! {posit_10_0_exhaustive, Posit::<10, 0, i16>}
    test_exhaustive! {posit_10_1_exhaustive, Posit::<10, 1, i16>}
    test_exhaustive! {posit_10_2_exhaustive, Posit::<10, 2, i16>}
    test_exhaustive! {posit_10_3_exhaustive, Posit::<10, 3, i16>}

    test_exhaustive! {posit_8_0_exhaustive, Posit::<8, 0, i8>}
    test_exhaustive! {posit_20_4_exhaustive, Posit::<20, 4, i32>}

    test_exhaustive! {p8_exhaustive, crate::p8}
    test_exhaustive! {p16_exhaustive, crate::p16}
    test_proptest! {p32_proptest, crate::p32}
    test_proptest! {p64_proptest, crate::p64}

    test_exhaustive! {posit_3_0_exhaustive, Posit::<3, 0, i8>}
    test_exhaustive! {posit_4_0_exhaustive, Posit::<4, 0, i8>}
    test_exhaustive! {posit_4_1_exhaustive, Posit::<4, 1, i8>}
  }

  mod rounding {
    use super::*;

    /// Aux: assert that `decoded` is indeed the value `rational`, and that it rounds to the
    /// `posit` bit pattern.
    fn assert_rounds_to<const N: u32, const ES: u32, Int: crate::Int>(
      rational: &str,
      decoded: Decoded<N, ES, Int>,
      posit: Int,
    ) where
      Rational: From<Decoded<N, ES, Int>>,
    {
      use core::str::FromStr;
      assert_eq!(Rational::from(decoded), Rational::from_str(rational).unwrap());
      assert_eq!(decoded.try_encode(), Ok(Posit::<N, ES, Int>::from_bits(posit)));
    }

    #[test]
    #[allow(overflowing_literals)]
    fn posit_6_2_manual_pos() {
      type D = Decoded<6, 2, i8>;
      assert_rounds_to("2",      D { frac: 0b01_0000 << 2, scale: 1 }, 0b010010); // 2    → 2
      assert_rounds_to("9/4",    D { frac: 0b01_0010 << 2, scale: 1 }, 0b010010); // 2.25 → 2
      assert_rounds_to("5/2",    D { frac: 0b01_0100 << 2, scale: 1 }, 0b010010); // 2.5  → 2
      assert_rounds_to("11/4",   D { frac: 0b01_0110 << 2, scale: 1 }, 0b010011); // 2.75 → 3
      assert_rounds_to("3",      D { frac: 0b01_1000 << 2, scale: 1 }, 0b010011); // 3    → 3
      assert_rounds_to("13/4",   D { frac: 0b01_1010 << 2, scale: 1 }, 0b010011); // 3.25 → 3
      assert_rounds_to("7/2",    D { frac: 0b01_1100 << 2, scale: 1 }, 0b010100); // 3.5  → 4
      assert_rounds_to("15/4",   D { frac: 0b01_1110 << 2, scale: 1 }, 0b010100); // 3.75 → 4
      assert_rounds_to("4",      D { frac: 0b01_0000 << 2, scale: 2 }, 0b010100); // 4    → 4
    }

    #[test]
    #[allow(overflowing_literals)]
    fn posit_6_2_manual_neg() {
      type D = Decoded<6, 2, i8>;
      assert_rounds_to("-2",     D { frac: 0b10_0000 << 2, scale: 0 }, 0b101110); // -2    → -2
      assert_rounds_to("-9/4",   D { frac: 0b10_1110 << 2, scale: 1 }, 0b101110); // -2.25 → -2
      assert_rounds_to("-5/2",   D { frac: 0b10_1100 << 2, scale: 1 }, 0b101110); // -2.5  → -2
      assert_rounds_to("-11/4",  D { frac: 0b10_1010 << 2, scale: 1 }, 0b101101); // -2.75 → -3
      assert_rounds_to("-3",     D { frac: 0b10_1000 << 2, scale: 1 }, 0b101101); // -3    → -3
      assert_rounds_to("-13/4",  D { frac: 0b10_0110 << 2, scale: 1 }, 0b101101); // -3.25 → -3
      assert_rounds_to("-7/2",   D { frac: 0b10_0100 << 2, scale: 1 }, 0b101100); // -3.5  → -4
      assert_rounds_to("-15/4",  D { frac: 0b10_0010 << 2, scale: 1 }, 0b101100); // -3.75 → -4
      assert_rounds_to("-4",     D { frac: 0b10_0000 << 2, scale: 1 }, 0b101100); // -4    → -4
    }

    #[test]
    #[allow(overflowing_literals)]
    fn p8_manual_pos() {
      type D = Decoded<8, 2, i8>;
      assert_rounds_to("9",     D { frac: 0b01_001000, scale: 3 }, 0b01011001); // 9     → 9
      assert_rounds_to("37/4",  D { frac: 0b01_001010, scale: 3 }, 0b01011001); // 9.25  → 9
      assert_rounds_to("19/2",  D { frac: 0b01_001100, scale: 3 }, 0b01011010); // 9.5   → 10
      assert_rounds_to("39/4",  D { frac: 0b01_001110, scale: 3 }, 0b01011010); // 9.75  → 10
      assert_rounds_to("10",    D { frac: 0b01_010000, scale: 3 }, 0b01011010); // 10    → 10
      assert_rounds_to("41/4",  D { frac: 0b01_010010, scale: 3 }, 0b01011010); // 10.25 → 10
      assert_rounds_to("21/2",  D { frac: 0b01_010100, scale: 3 }, 0b01011010); // 10.5  → 10
      assert_rounds_to("43/4",  D { frac: 0b01_010110, scale: 3 }, 0b01011011); // 10.75 → 11
      assert_rounds_to("11",    D { frac: 0b01_011000, scale: 3 }, 0b01011011); // 11    → 11
    }

    #[test]
    #[allow(overflowing_literals)]
    fn p8_manual_neg() {
      type D = Decoded<8, 2, i8>;
      assert_rounds_to("-9",    D { frac: 0b10_111000u8 as _, scale: 3 }, 0b10100111); // -9     → -9
      assert_rounds_to("-37/4", D { frac: 0b10_110110u8 as _, scale: 3 }, 0b10100111); // -9.25  → -9
      assert_rounds_to("-19/2", D { frac: 0b10_110100u8 as _, scale: 3 }, 0b10100110); // -9.5   → -10
      assert_rounds_to("-39/4", D { frac: 0b10_110010u8 as _, scale: 3 }, 0b10100110); // -9.75  → -10
      assert_rounds_to("-10",   D { frac: 0b10_110000u8 as _, scale: 3 }, 0b10100110); // -10    → -10
      assert_rounds_to("-41/4", D { frac: 0b10_101110u8 as _, scale: 3 }, 0b10100110); // -10.25 → -10
      assert_rounds_to("-21/2", D { frac: 0b10_101100u8 as _, scale: 3 }, 0b10100110); // -10.5  → -10
      assert_rounds_to("-43/4", D { frac: 0b10_101010u8 as _, scale: 3 }, 0b10100101); // -10.75 → -11
      assert_rounds_to("-11",   D { frac: 0b10_101000u8 as _, scale: 3 }, 0b10100101); // -11    → -11
    }

    #[test]
    fn saturation() {
      type P = Posit<8, 2, i16>;
      assert_eq!(
        P::MAX.classify(),
        Class::Regular(Decoded { frac: 0b01_000000 << 8, scale: 24 }),
      );

      // Anything at or beyond the extremes clamps to them; fraction is irrelevant there.
      assert_eq!(Decoded::<8, 2, i16> { frac: 0b01_000000 << 8, scale: 25 }.try_encode(), Ok(P::MAX));
      assert_eq!(Decoded::<8, 2, i16> { frac: 0b01_000000 << 8, scale: 53 }.try_encode(), Ok(P::MAX));
      assert_eq!(Decoded::<8, 2, i16> { frac: 0b01_111001 << 8, scale: 24 }.try_encode(), Ok(P::MAX));

      assert_eq!(
        P::MIN.classify(),
        Class::Regular(Decoded { frac: (0b10_000000u16 as i16) << 8, scale: 23 }),
      );
      assert_eq!(
        Decoded::<8, 2, i16> { frac: (0b10_000000u16 as i16) << 8, scale: 24 }.try_encode(),
        Ok(P::MIN),
      );
      assert_eq!(
        Decoded::<8, 2, i16> { frac: (0b10_000000u16 as i16) << 8, scale: 53 }.try_encode(),
        Ok(P::MIN),
      );

      assert_eq!(
        P::MIN_POSITIVE.classify(),
        Class::Regular(Decoded { frac: 0b01_000000 << 8, scale: -24 }),
      );
      assert_eq!(
        Decoded::<8, 2, i16> { frac: 0b01_000000 << 8, scale: -25 }.try_encode(),
        Ok(P::MIN_POSITIVE),
      );
      assert_eq!(
        Decoded::<8, 2, i16> { frac: 0b01_000000 << 8, scale: -54 }.try_encode(),
        Ok(P::MIN_POSITIVE),
      );

      assert_eq!(
        P::MAX_NEGATIVE.classify(),
        Class::Regular(Decoded { frac: (0b10_000000u16 as i16) << 8, scale: -25 }),
      );
      assert_eq!(
        Decoded::<8, 2, i16> { frac: (0b10_000000u16 as i16) << 8, scale: -26 }.try_encode(),
        Ok(P::MAX_NEGATIVE),
      );
    }

    /// Aux: check that `decoded` (plus possibly a sticky) rounds correctly per the oracle.
    fn is_correct_rounded<const N: u32, const ES: u32, Int: crate::Int>(
      decoded: Decoded<N, ES, Int>,
      sticky: bool,
    ) -> bool
    where
      Rational: From<Decoded<N, ES, Int>>,
      Rational: TryFrom<Posit<N, ES, Int>, Error = super::rational::IsNaR>,
    {
      use malachite::base::num::arithmetic::traits::Pow;
      // A nonzero sticky stands for "a hair above the decoded value": any epsilon smaller than
      // the gap to the next representable value gives the same rounding.
      let epsilon = Rational::try_from(Posit::<N, ES, Int>::MIN_POSITIVE).unwrap().pow(32i64);
      let posit = decoded.try_round(Int::from(sticky)).expect("Invalid test case!");
      let exact =
        if !sticky { Rational::from(decoded) } else { Rational::from(decoded) + epsilon };
      super::rational::is_correct_rounded(exact, posit)
    }

    macro_rules! test_exhaustive {
      ($name:ident, $decoded:ty) => {
        #[test]
        fn $name() {
          for d in <$decoded>::cases_exhaustive() {
            for s in [false, true] {
              assert!(is_correct_rounded(d, s), "decoded={:?} sticky={:?}", d, s)
            }
          }
        }
      };
    }

    macro_rules! test_proptest {
      ($name:ident, $decoded:ty) => {
        proptest! {
          #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
          #[test]
          fn $name(d in <$decoded>::cases_proptest(), s: bool) {
            assert!(is_correct_rounded(d, s), "decoded={:?} sticky={:?}", d, s)
          }
        }
      };
    }

    test_exhaustive! {posit_6_0_exhaustive, Decoded::<6, 0, i8>}
    test_exhaustive! {posit_6_1_exhaustive, Decoded::<6, 1, i8>}
    test_exhaustive! {posit_6_2_exhaustive, Decoded::<6, 2, i8>}
    test_exhaustive! {p8_exhaustive, Decoded::<8, 2, i8>}
    test_proptest! {posit_10_1_proptest, Decoded::<10, 1, i16>}
    test_proptest! {posit_20_4_proptest, Decoded::<20, 4, i32>}
    test_proptest! {p16_proptest, Decoded::<16, 2, i16>}
    test_proptest! {p32_proptest, Decoded::<32, 2, i32>}
    test_proptest! {p64_proptest, Decoded::<64, 2, i64>}
  }
}
