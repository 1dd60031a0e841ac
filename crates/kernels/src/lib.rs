//! Cosine similarity kernels: a scalar loop, a portable SIMD kernel sized to the host, and an
//! explicit 512-bit kernel.
//!
//! All kernels are pure functions over borrowed slices and fail only when the slices differ in
//! length. Degenerate input (empty or all-zero vectors) yields NaN rather than an error.

mod capability;
pub use capability::{LaneWidth, max_lane_width};

mod error;
pub use error::SimilarityError;

mod kernel;
pub use kernel::{Kernel, Scalar, SimilarityKernel, Vectorized, Vectorized512};

mod lanes;

mod scalar;
pub use scalar::similarity_scalar;

mod sums;

mod vectorized;
pub use vectorized::{similarity_vectorized, similarity_vectorized512, similarity_with_width};

#[cfg(target_arch = "x86_64")]
mod avx512;
