//! Explicit 512-bit kernel loop built on AVX-512F intrinsics.

use std::arch::x86_64::{__m512, _mm512_loadu_ps, _mm512_mul_ps, _mm512_reduce_add_ps};

use crate::sums::Sums;

pub(crate) const LANES: usize = 16;

/// Loads one 512-bit register from exactly 16 elements.
///
/// This is the only raw-memory access in the crate.
#[inline]
#[target_feature(enable = "avx512f")]
fn load(chunk: &[f32; LANES]) -> __m512 {
  // SAFETY: `chunk` borrows 16 initialized, contiguous `f32`s, which is exactly one register's
  // worth, and `loadu` has no alignment requirement.
  unsafe { _mm512_loadu_ps(chunk.as_ptr()) }
}

/// Feeds every full 16-lane chunk of `x` and `y` into `sums` and returns the number of elements
/// consumed. `x` and `y` must have equal length.
///
/// Callers must have confirmed AVX-512F support at runtime, which is what makes calling this
/// `unsafe`.
#[target_feature(enable = "avx512f")]
pub(crate) fn accumulate(sums: &mut Sums, x: &[f32], y: &[f32]) -> usize {
  let (x_chunks, _) = x.as_chunks::<LANES>();
  let (y_chunks, _) = y.as_chunks::<LANES>();

  for (xa, ya) in x_chunks.iter().zip(y_chunks) {
    let xv = load(xa);
    let yv = load(ya);
    sums.add_chunk(
      _mm512_reduce_add_ps(_mm512_mul_ps(xv, yv)),
      _mm512_reduce_add_ps(_mm512_mul_ps(xv, xv)),
      _mm512_reduce_add_ps(_mm512_mul_ps(yv, yv)),
    );
  }

  x_chunks.len() * LANES
}
