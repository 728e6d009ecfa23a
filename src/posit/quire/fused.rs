use super::*;

use crate::RoundFrom;

/// Naive dot product: multiply and accumulate in posit arithmetic, rounding at every step.
///
/// This exists as the baseline the fused version is measured against; for the single-rounding
/// reduction, see [`Quire::fused_dot`].
///
/// # Panics
///
/// If `x` and `y` have different lengths (a caller error).
pub fn dot<const N: u32, const ES: u32, Int: crate::Int>(
  x: &[Posit<N, ES, Int>],
  y: &[Posit<N, ES, Int>],
) -> Posit<N, ES, Int> {
  assert_eq!(x.len(), y.len(), "dot: mismatched vector lengths");
  let mut sum = Posit::ZERO;
  for (&a, &b) in x.iter().zip(y) {
    sum += a * b;
  }
  sum
}

impl<
  const N: u32,
  const ES: u32,
  const WORDS: usize,
> Quire<N, ES, WORDS> {
  /// Fused dot product: every pairwise product is accumulated exactly into one quire, and the
  /// whole reduction rounds **once**, at the end.
  ///
  /// The quire type picks the capacity: this one is safe for vectors of up to
  /// 2<sup>[`CAPACITY`](Self::CAPACITY)</sup> elements.
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let x = [p32::round_from(1.5), p32::round_from(-2.0)];
  /// let y = [p32::round_from(2.0), p32::round_from(1.5)];
  /// assert_eq!(q32::fused_dot(&x, &y), p32::ZERO);
  /// ```
  ///
  /// # Panics
  ///
  /// If `x` and `y` have different lengths, or the accumulation exceeds the quire's range
  /// (both caller errors).
  pub fn fused_dot<Int: crate::Int>(
    x: &[Posit<N, ES, Int>],
    y: &[Posit<N, ES, Int>],
  ) -> Posit<N, ES, Int> {
    assert_eq!(x.len(), y.len(), "fused_dot: mismatched vector lengths");
    let mut quire = Self::ZERO;
    for (&a, &b) in x.iter().zip(y) {
      quire.add_product(a, b);
      #[cfg(feature = "trace")]
      log::trace!("fused_dot: += {a:?} × {b:?} → {quire:?}");
    }
    Posit::round_from(&quire)
  }

  /// Fused matrix-vector product `b = a·x` for a row-major `b.len() × x.len()` matrix: one
  /// fresh quire and one rounding per output element.
  ///
  /// # Panics
  ///
  /// If `a.len() != b.len() × x.len()`, or the accumulation exceeds the quire's range.
  pub fn fused_matvec<Int: crate::Int>(
    a: &[Posit<N, ES, Int>],
    x: &[Posit<N, ES, Int>],
    b: &mut [Posit<N, ES, Int>],
  ) {
    let (rows, cols) = (b.len(), x.len());
    assert_eq!(a.len(), rows * cols, "fused_matvec: matrix shape mismatch");
    for (i, out) in b.iter_mut().enumerate() {
      *out = Self::fused_dot(&a[i * cols..(i + 1) * cols], x);
      #[cfg(feature = "trace")]
      log::trace!("fused_matvec: b[{i}] rounded to {:?}", *out);
    }
  }

  /// Fused matrix-matrix product `c = a·b` for row-major matrices (`a` is `m × k`, `b` is
  /// `k × n`, `c` is `m × n`): one fresh quire and one rounding per output element.
  ///
  /// # Panics
  ///
  /// If the shapes don't agree, or the accumulation exceeds the quire's range.
  pub fn fused_matmul<Int: crate::Int>(
    a: &[Posit<N, ES, Int>],
    b: &[Posit<N, ES, Int>],
    c: &mut [Posit<N, ES, Int>],
    m: usize,
    k: usize,
    n: usize,
  ) {
    assert_eq!(a.len(), m * k, "fused_matmul: lhs shape mismatch");
    assert_eq!(b.len(), k * n, "fused_matmul: rhs shape mismatch");
    assert_eq!(c.len(), m * n, "fused_matmul: output shape mismatch");
    for i in 0..m {
      for j in 0..n {
        let mut quire = Self::ZERO;
        for l in 0..k {
          quire.add_product(a[i * k + l], b[l * n + j]);
        }
        c[i * n + j] = Posit::round_from(&quire);
        #[cfg(feature = "trace")]
        log::trace!("fused_matmul: c[{i}][{j}] rounded to {:?}", c[i * n + j]);
      }
    }
  }
}
