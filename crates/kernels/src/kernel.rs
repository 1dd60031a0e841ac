use enum_dispatch::enum_dispatch;
use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

use crate::capability::LaneWidth;
use crate::error::SimilarityError;
use crate::scalar::similarity_scalar;
use crate::vectorized::{similarity_vectorized, similarity_vectorized512};

/// A cosine-similarity implementation that can be timed by any harness.
#[enum_dispatch]
pub trait SimilarityKernel {
  fn similarity(&self, x: &[f32], y: &[f32]) -> Result<f32, SimilarityError>;

  /// Lane width this kernel processes per chunk on the current host.
  fn lane_width(&self) -> LaneWidth;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scalar;

impl SimilarityKernel for Scalar {
  fn similarity(&self, x: &[f32], y: &[f32]) -> Result<f32, SimilarityError> {
    similarity_scalar(x, y)
  }

  fn lane_width(&self) -> LaneWidth {
    LaneWidth::Scalar
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vectorized;

impl SimilarityKernel for Vectorized {
  fn similarity(&self, x: &[f32], y: &[f32]) -> Result<f32, SimilarityError> {
    similarity_vectorized(x, y)
  }

  fn lane_width(&self) -> LaneWidth {
    LaneWidth::portable()
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vectorized512;

impl SimilarityKernel for Vectorized512 {
  fn similarity(&self, x: &[f32], y: &[f32]) -> Result<f32, SimilarityError> {
    similarity_vectorized512(x, y)
  }

  fn lane_width(&self) -> LaneWidth {
    if LaneWidth::W512.is_supported() {
      LaneWidth::W512
    } else {
      LaneWidth::Scalar
    }
  }
}

/// The benchmarked kernels, in report order. [`Kernel::Scalar`] is the baseline.
#[enum_dispatch(SimilarityKernel)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Kernel {
  Scalar(Scalar),
  Vectorized(Vectorized),
  Vectorized512(Vectorized512),
}

impl Kernel {
  #[must_use]
  pub const fn is_baseline(&self) -> bool {
    matches!(self, Self::Scalar(_))
  }
}

impl Serialize for Kernel {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
