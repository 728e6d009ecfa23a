use super::*;

use crate::RoundFrom;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  const WORDS: usize,
> Quire<N, ES, WORDS> {
  /// The length of the leading run of sign-copy bits: leading zeros for a non-negative quire,
  /// leading ones for a negative one. `BITS` exactly when the quire is 0 or -1 (all bits
  /// equal).
  fn leading_run(&self) -> u32 {
    let negative = (self.0[WORDS - 1] as i64) < 0;
    let ext = if negative { u64::MAX } else { 0u64 };
    let mut run = 0;
    for &limb in self.0.iter().rev() {
      if limb == ext {
        run += 64;
      } else {
        run += if negative { limb.leading_ones() } else { limb.leading_zeros() };
        break;
      }
    }
    run
  }

  /// The 64-bit window of quire bits `[lo_bit, lo_bit + 64)`. Bits below the quire (negative
  /// indices) read as zero; the window never reaches above the top.
  fn window(&self, lo_bit: i32) -> u64 {
    debug_assert!(lo_bit + 64 <= Self::BITS as i32);
    let word = lo_bit.div_euclid(64);
    let bit = lo_bit.rem_euclid(64) as u32;
    let get = |index: i32| if index < 0 { 0 } else { self.0[index as usize] };
    let lo = get(word) >> bit;
    let hi = if bit == 0 { 0 } else { get(word + 1) << (64 - bit) };
    lo | hi
  }

  /// Whether any quire bit strictly below `lo_bit` is set.
  fn any_below(&self, lo_bit: i32) -> bool {
    if lo_bit <= 0 {
      return false;
    }
    let word = (lo_bit / 64) as usize;
    let bit = (lo_bit % 64) as u32;
    self.0[..word].iter().any(|&limb| limb != 0)
      || (bit != 0 && self.0[word] << (64 - bit) != 0)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const WORDS: usize,
> RoundFrom<&'_ Quire<N, ES, WORDS>> for Posit<N, ES, Int> {
  /// Round a quire back into a posit: the final step of a reduction, and the **only** step of
  /// it that rounds.
  fn round_from(value: &'_ Quire<N, ES, WORDS>) -> Self {
    const {
      assert!(Int::BITS <= 64, "Quire conversion is not supported for Int wider than 64 bits")
    };
    if value.is_nar() {
      return Posit::NAR;
    }

    // Find the first bit that differs from the sign. Everything above it is sign padding;
    // it and the Int::BITS - 1 bits after it become the frac (so the frac lands already
    // normalised, 01… positive / 10… negative); everything below that window is sticky.
    //
    //   quire: 11111111111111111|10110101|0011101011101
    //          sign run          frac     sticky
    //
    let run = value.leading_run();

    // All bits equal: the quire is exactly 0 (→ zero) or exactly -2^-RADIX (→ the biggest
    // negative value smaller in magnitude than it, which is MAX_NEGATIVE, by never-round-to-0).
    if run == Quire::<N, ES, WORDS>::BITS {
      return if (value.0[WORDS - 1] as i64) < 0 { Posit::MAX_NEGATIVE } else { Posit::ZERO };
    }

    // The first differing bit has weight 2^(index - RADIX), which is the scale. For a quire
    // with ≥ 64 capacity bits the scale can overflow a narrow `Int`, so saturate early (the
    // encoder's own clamp cannot be reached from here in that case).
    let value_width = Quire::<N, ES, WORDS>::BITS - run;
    if const { Quire::<N, ES, WORDS>::CAPACITY >= 64 } {
      if value_width > 2 * Quire::<N, ES, WORDS>::RADIX + 1 {
        return if (value.0[WORDS - 1] as i64) < 0 { Posit::MIN } else { Posit::MAX };
      }
    }
    let scale = value_width as i64 - 1 - Quire::<N, ES, WORDS>::RADIX as i64;

    // Grab the frac window (the top sign-run bit plus the Int::BITS - 1 bits after it), and
    // OR everything below it into the sticky.
    let hi_bit = (Quire::<N, ES, WORDS>::BITS - run + 1) as i32;
    let window = value.window(hi_bit - 64);
    let frac = const_as::<i64, Int>((window >> (64 - Int::BITS)) as i64);
    let sticky = Int::from(value.any_below(hi_bit - Int::BITS as i32));

    // SAFETY: the frac starts with exactly one sign-copy bit, and the scale is in range.
    unsafe { Decoded { frac, scale: const_as::<i64, Int>(scale) }.round(sticky) }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const WORDS: usize,
> From<Posit<N, ES, Int>> for Quire<N, ES, WORDS> {
  /// Widen a posit into a quire. Exact, hence a plain `From`.
  fn from(value: Posit<N, ES, Int>) -> Self {
    if value == Posit::NAR {
      return Self::NAR;
    }
    let mut quire = Self::ZERO;
    // Cannot fail: a single posit is always in range of its quire.
    quire.try_add(value).expect("a posit always fits its quire");
    quire
  }
}
