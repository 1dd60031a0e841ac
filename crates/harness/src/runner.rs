use std::hint::black_box;
use std::time::{Duration, Instant};

use cossim_kernels::{Kernel, SimilarityError, SimilarityKernel, similarity_scalar};
use cossim_shared::AppEnv;

use crate::input::InputPair;
use crate::report::Measurement;
use crate::stats::Statistics;

/// Upper bound on calls per sample, reached only by kernels faster than the clock can resolve.
const MAX_OPS_PER_SAMPLE: u64 = 1 << 24;

/// Results further apart than this (absolute and relative) count as a disagreement.
pub const AGREEMENT_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
  pub warmup_samples: usize,
  pub samples: usize,
  pub sample_time: Duration,
}

impl From<&AppEnv> for RunnerConfig {
  fn from(app_env: &AppEnv) -> Self {
    Self {
      warmup_samples: app_env.warmup_samples,
      samples: app_env.samples,
      sample_time: app_env.sample_time,
    }
  }
}

/// Built-in sampling runner.
///
/// Per kernel: a pilot stage sizes the sample, warm-up samples are discarded, then each
/// measured sample contributes one nanoseconds-per-call figure.
#[derive(Debug, Clone)]
pub struct Runner {
  config: RunnerConfig,
}

impl Runner {
  #[must_use]
  pub const fn new(config: RunnerConfig) -> Self {
    Self { config }
  }

  // ──────────────────────────────────────────────────
  // Case
  // ──────────────────────────────────────────────────

  /// Cross-check then time every kernel on one input pair.
  #[tracing::instrument(skip_all, fields(dimensionality = pair.dimensionality()))]
  pub fn run_case(
    &self,
    kernels: &[Kernel],
    pair: &InputPair,
  ) -> Result<Vec<Measurement>, SimilarityError> {
    let expected = similarity_scalar(&pair.x, &pair.y)?;

    let mut measurements = Vec::with_capacity(kernels.len());
    for kernel in kernels {
      let result = kernel.similarity(&pair.x, &pair.y)?;
      let agrees_with_scalar = agrees(result, expected);
      if !agrees_with_scalar {
        tracing::warn!(%kernel, result, expected, "Kernel disagrees with the scalar result");
      }

      let (ops_per_sample, stats) = self.measure(kernel, pair)?;
      tracing::info!(
        %kernel,
        mean_ns = stats.mean,
        std_dev_ns = stats.std_dev,
        ops_per_sample,
        "Measured kernel"
      );

      measurements.push(Measurement {
        kernel: *kernel,
        dimensionality: pair.dimensionality(),
        lane_width: kernel.lane_width(),
        ops_per_sample,
        stats,
        result,
        agrees_with_scalar,
        ratio: None,
      });
    }

    if let Some(baseline) = measurements
      .iter()
      .find(|m| m.kernel.is_baseline())
      .map(|m| m.stats.mean)
    {
      for m in &mut measurements {
        m.ratio = Some(m.stats.mean / baseline);
      }
    }

    Ok(measurements)
  }

  // ──────────────────────────────────────────────────
  // Sampling
  // ──────────────────────────────────────────────────

  fn measure(
    &self,
    kernel: &Kernel,
    pair: &InputPair,
  ) -> Result<(u64, Statistics), SimilarityError> {
    let ops = self.pilot(kernel, pair)?;

    for _ in 0..self.config.warmup_samples {
      time_sample(kernel, pair, ops)?;
    }

    let count = self.config.samples.max(1);
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
      let elapsed = time_sample(kernel, pair, ops)?;
      samples.push(elapsed.as_nanos() as f64 / ops as f64);
    }

    // non-empty, and three significant digits always fit the histogram
    let stats = Statistics::from_samples(&samples).unwrap_or_default();
    Ok((ops, stats))
  }

  /// Smallest power of two of calls whose sample lasts at least `sample_time`.
  fn pilot(&self, kernel: &Kernel, pair: &InputPair) -> Result<u64, SimilarityError> {
    let mut ops = 1;
    while ops < MAX_OPS_PER_SAMPLE {
      if time_sample(kernel, pair, ops)? >= self.config.sample_time {
        break;
      }
      ops *= 2;
    }
    tracing::debug!(%kernel, ops, "Pilot finished");
    Ok(ops)
  }
}

fn time_sample(kernel: &Kernel, pair: &InputPair, ops: u64) -> Result<Duration, SimilarityError> {
  let start = Instant::now();
  for _ in 0..ops {
    black_box(kernel.similarity(black_box(&pair.x), black_box(&pair.y))?);
  }
  Ok(start.elapsed())
}

fn agrees(result: f32, expected: f32) -> bool {
  if result.is_nan() || expected.is_nan() {
    return result.is_nan() && expected.is_nan();
  }
  let diff = (result - expected).abs();
  diff <= AGREEMENT_TOLERANCE || diff <= AGREEMENT_TOLERANCE * expected.abs()
}
