use crate::error::{SimilarityError, check_lengths};

/// Cosine similarity with a plain scalar loop.
///
/// One pass over both slices with three `f32` running sums (dot product and the two squared
/// magnitudes). Empty or all-zero input is not special-cased: the result is NaN.
pub fn similarity_scalar(x: &[f32], y: &[f32]) -> Result<f32, SimilarityError> {
  check_lengths(x, y)?;

  let mut dot = 0.0_f32;
  let mut x_sum_squared = 0.0_f32;
  let mut y_sum_squared = 0.0_f32;

  for (&a, &b) in x.iter().zip(y) {
    dot += a * b;
    x_sum_squared += a * a;
    y_sum_squared += b * b;
  }

  Ok(dot / (x_sum_squared.sqrt() * y_sum_squared.sqrt()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn orthogonal_is_zero() {
    assert_eq!(similarity_scalar(&[1.0, 0.0], &[0.0, 1.0]), Ok(0.0));
  }

  #[test]
  fn opposite_is_minus_one() {
    let got = similarity_scalar(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
    assert!((got + 1.0).abs() < 1e-6, "got {got}");
  }

  #[test]
  fn empty_input_is_nan() {
    assert!(similarity_scalar(&[], &[]).unwrap().is_nan());
  }

  #[test]
  fn zero_vector_is_nan() {
    assert!(similarity_scalar(&[0.0, 0.0], &[1.0, 2.0]).unwrap().is_nan());
  }

  #[test]
  fn rejects_mismatched_lengths() {
    assert_eq!(
      similarity_scalar(&[1.0], &[1.0, 2.0]),
      Err(SimilarityError::LengthMismatch { left: 1, right: 2 })
    );
  }
}
