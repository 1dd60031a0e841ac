use std::ops::Mul;

use wide::{f32x4, f32x8};

use crate::sums::Sums;

/// A portable `f32` vector of `N` lanes.
pub(crate) trait Lanes<const N: usize>: Copy + Mul<Output = Self> {
  fn load(chunk: [f32; N]) -> Self;

  fn reduce_add(self) -> f32;
}

impl Lanes<4> for f32x4 {
  #[inline(always)]
  fn load(chunk: [f32; 4]) -> Self {
    Self::new(chunk)
  }

  #[inline(always)]
  fn reduce_add(self) -> f32 {
    f32x4::reduce_add(self)
  }
}

impl Lanes<8> for f32x8 {
  #[inline(always)]
  fn load(chunk: [f32; 8]) -> Self {
    Self::new(chunk)
  }

  #[inline(always)]
  fn reduce_add(self) -> f32 {
    f32x8::reduce_add(self)
  }
}

/// Feeds every full `N`-lane chunk of `x` and `y` into `sums`.
///
/// Returns the number of elements consumed; the caller handles the rest with
/// [`Sums::add_tail`]. `x` and `y` must have equal length.
#[inline]
pub(crate) fn accumulate<const N: usize, V: Lanes<N>>(
  sums: &mut Sums,
  x: &[f32],
  y: &[f32],
) -> usize {
  let (x_chunks, _) = x.as_chunks::<N>();
  let (y_chunks, _) = y.as_chunks::<N>();

  for (&xa, &ya) in x_chunks.iter().zip(y_chunks) {
    let xv = V::load(xa);
    let yv = V::load(ya);
    sums.add_chunk(
      (xv * yv).reduce_add(),
      (xv * xv).reduce_add(),
      (yv * yv).reduce_add(),
    );
  }

  x_chunks.len() * N
}
