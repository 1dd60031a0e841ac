//! Host SIMD capability detection for `f32` lanes.
//!
//! Detection runs once per process and is cached. x86_64 and aarch64 are probed at runtime, so
//! one binary picks the right width on every CPU it runs on; wasm32 is decided at compile time.

use std::sync::LazyLock;

use serde::Serialize;
use strum::{Display, EnumIter};

/// Number of `f32` elements processed per vector register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LaneWidth {
  /// No usable vector unit; everything goes through the scalar loop.
  Scalar,
  /// 128-bit registers (SSE2, NEON, wasm simd128).
  W128,
  /// 256-bit registers (AVX2).
  W256,
  /// 512-bit registers (AVX-512F).
  W512,
}

static DETECTED: LazyLock<LaneWidth> = LazyLock::new(probe);

impl LaneWidth {
  /// The widest register the portable kernel is built for.
  pub const PORTABLE_MAX: Self = Self::W256;

  #[must_use]
  pub const fn lanes(self) -> usize {
    match self {
      Self::Scalar => 1,
      Self::W128 => 4,
      Self::W256 => 8,
      Self::W512 => 16,
    }
  }

  #[must_use]
  pub const fn bits(self) -> usize {
    self.lanes() * 8 * size_of::<f32>()
  }

  /// Widest width the host accelerates.
  #[must_use]
  pub fn detect() -> Self {
    *DETECTED
  }

  /// Width used by the portable kernel: [`LaneWidth::detect`] capped at
  /// [`LaneWidth::PORTABLE_MAX`].
  #[must_use]
  pub fn portable() -> Self {
    Self::detect().min(Self::PORTABLE_MAX)
  }

  /// Whether the host can execute vector code of exactly this width.
  ///
  /// `Scalar` is always supported. Wider variants are supported when the detected width is at
  /// least as wide, since every ISA level probed here implies the narrower ones.
  #[must_use]
  pub fn is_supported(self) -> bool {
    self <= Self::detect()
  }
}

/// Maximum number of `f32` lanes the host supports in one register.
#[must_use]
pub fn max_lane_width() -> usize {
  LaneWidth::detect().lanes()
}

#[cfg(target_arch = "x86_64")]
fn probe() -> LaneWidth {
  if std::is_x86_feature_detected!("avx512f") {
    LaneWidth::W512
  } else if std::is_x86_feature_detected!("avx2") {
    LaneWidth::W256
  } else if std::is_x86_feature_detected!("sse2") {
    LaneWidth::W128
  } else {
    LaneWidth::Scalar
  }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> LaneWidth {
  if std::arch::is_aarch64_feature_detected!("neon") {
    LaneWidth::W128
  } else {
    LaneWidth::Scalar
  }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> LaneWidth {
  if cfg!(all(target_arch = "wasm32", target_feature = "simd128")) {
    LaneWidth::W128
  } else {
    LaneWidth::Scalar
  }
}
