use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimilarityError {
  /// The two input vectors differ in length.
  #[error("vector lengths must be equal: got {left} and {right}")]
  LengthMismatch { left: usize, right: usize },
}

/// Fails with [`SimilarityError::LengthMismatch`] unless `x` and `y` have the same length.
pub(crate) const fn check_lengths(x: &[f32], y: &[f32]) -> Result<(), SimilarityError> {
  if x.len() == y.len() {
    Ok(())
  } else {
    Err(SimilarityError::LengthMismatch {
      left: x.len(),
      right: y.len(),
    })
  }
}
