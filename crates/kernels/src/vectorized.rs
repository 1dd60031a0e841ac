use wide::{f32x4, f32x8};

use crate::capability::LaneWidth;
use crate::error::{SimilarityError, check_lengths};
use crate::lanes::accumulate;
use crate::sums::Sums;

/// Cosine similarity using the widest portable vector width the host accelerates.
///
/// Sums are carried in `f64`; see [`similarity_with_width`].
pub fn similarity_vectorized(x: &[f32], y: &[f32]) -> Result<f32, SimilarityError> {
  similarity_with_width(x, y, LaneWidth::portable())
}

/// Cosine similarity in fixed 512-bit (16-lane) chunks.
///
/// Requires AVX-512F. On any other host the whole input goes through the scalar loop.
pub fn similarity_vectorized512(x: &[f32], y: &[f32]) -> Result<f32, SimilarityError> {
  similarity_with_width(x, y, LaneWidth::W512)
}

/// Cosine similarity processing `width.lanes()` elements per chunk.
///
/// Each full chunk is multiplied lane-wise in `f32` and horizontally reduced into `f64` running
/// sums; the remaining `len % lanes` elements are fed into the same sums one by one. The chunked
/// path only runs when the host supports `width` and the input holds at least one full chunk,
/// otherwise the scalar loop covers the whole input. The result is narrowed to `f32` last.
pub fn similarity_with_width(
  x: &[f32],
  y: &[f32],
  width: LaneWidth,
) -> Result<f32, SimilarityError> {
  check_lengths(x, y)?;

  let mut sums = Sums::default();
  let consumed = accumulate_chunks(&mut sums, x, y, width);
  sums.add_tail(&x[consumed..], &y[consumed..]);

  Ok(sums.cosine())
}

/// Feeds the full `width`-sized chunks into `sums` and returns how many elements they cover.
///
/// Nothing is consumed when the host lacks `width`.
pub(crate) fn accumulate_chunks(sums: &mut Sums, x: &[f32], y: &[f32], width: LaneWidth) -> usize {
  if !width.is_supported() {
    return 0;
  }
  match width {
    LaneWidth::Scalar => 0,
    LaneWidth::W128 => accumulate::<4, f32x4>(sums, x, y),
    LaneWidth::W256 => accumulate::<8, f32x8>(sums, x, y),
    // SAFETY: `W512.is_supported()` only holds when avx512f was detected at runtime.
    LaneWidth::W512 => unsafe { accumulate_512(sums, x, y) },
  }
}

/// # Safety
///
/// The host must support AVX-512F.
#[cfg(target_arch = "x86_64")]
unsafe fn accumulate_512(sums: &mut Sums, x: &[f32], y: &[f32]) -> usize {
  // SAFETY: forwarded from the caller.
  unsafe { crate::avx512::accumulate(sums, x, y) }
}

/// # Safety
///
/// Always safe; no 512-bit path exists off x86_64.
#[cfg(not(target_arch = "x86_64"))]
unsafe fn accumulate_512(_sums: &mut Sums, _x: &[f32], _y: &[f32]) -> usize {
  0
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;
  use crate::similarity_scalar;

  fn ramp(len: usize, scale: f32) -> Vec<f32> {
    (0..len).map(|i| ((i as f32) * scale).sin() + 1.5).collect()
  }

  #[test]
  fn every_width_matches_scalar() {
    for len in [0_usize, 1, 3, 4, 7, 8, 15, 16, 17, 31, 33, 100, 1000] {
      let x = ramp(len, 0.37);
      let y = ramp(len, 0.11);
      let expected = similarity_scalar(&x, &y).unwrap();

      for width in LaneWidth::iter() {
        let got = similarity_with_width(&x, &y, width).unwrap();
        if len == 0 {
          assert!(got.is_nan(), "{width} len 0");
        } else {
          assert!((got - expected).abs() < 1e-4, "{width} len {len}: {got} vs {expected}");
        }
      }
    }
  }

  #[test]
  fn orthogonal_pair_is_zero() {
    assert_eq!(similarity_vectorized(&[1.0, 0.0], &[0.0, 1.0]), Ok(0.0));
    assert_eq!(similarity_vectorized512(&[1.0, 0.0], &[0.0, 1.0]), Ok(0.0));
  }

  #[test]
  fn scalar_width_is_pure_tail_loop() {
    let x = ramp(17, 0.5);
    let y = ramp(17, 0.25);
    let mut sums = Sums::default();
    sums.add_tail(&x, &y);
    assert_eq!(similarity_with_width(&x, &y, LaneWidth::Scalar), Ok(sums.cosine()));
  }

  #[test]
  fn unsupported_width_falls_back_to_tail_loop() {
    let x = ramp(40, 0.3);
    let y = ramp(40, 0.7);
    let got = similarity_vectorized512(&x, &y).unwrap();
    if !LaneWidth::W512.is_supported() {
      assert_eq!(got, similarity_with_width(&x, &y, LaneWidth::Scalar).unwrap());
    }
    assert!((got - similarity_scalar(&x, &y).unwrap()).abs() < 1e-5);
  }

  #[test]
  fn supported_widths_consume_whole_chunks() {
    let x = ramp(17, 0.5);
    let y = ramp(17, 0.25);

    for width in LaneWidth::iter() {
      let mut sums = Sums::default();
      let consumed = accumulate_chunks(&mut sums, &x, &y, width);
      let expected = match width {
        LaneWidth::Scalar => 0,
        _ if !width.is_supported() => 0,
        _ => 16,
      };
      assert_eq!(consumed, expected, "{width}");
    }
  }

  #[test]
  fn kernel_is_chunks_then_tail() {
    let x = ramp(17, 0.9);
    let y = ramp(17, 0.2);

    for width in LaneWidth::iter() {
      let mut sums = Sums::default();
      let consumed = accumulate_chunks(&mut sums, &x, &y, width);
      sums.add_tail(&x[consumed..], &y[consumed..]);
      assert_eq!(similarity_with_width(&x, &y, width), Ok(sums.cosine()), "{width}");
    }
  }

  #[test]
  fn rejects_mismatched_lengths() {
    let err = SimilarityError::LengthMismatch { left: 16, right: 17 };
    assert_eq!(similarity_vectorized(&[0.5; 16], &[0.5; 17]), Err(err));
    assert_eq!(similarity_vectorized512(&[0.5; 16], &[0.5; 17]), Err(err));
  }
}
