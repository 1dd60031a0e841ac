//! criterion measurement backend, shared by the binary and `cargo bench`.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput};
use cossim_kernels::{Kernel, SimilarityKernel};
use cossim_shared::AppEnv;

use crate::input::InputPair;

/// Apply the sampling settings of `app_env` to `criterion`.
#[must_use]
pub fn configure(criterion: Criterion, app_env: &AppEnv) -> Criterion {
  let times = |n: usize| {
    let n = u32::try_from(n.max(1)).unwrap_or(u32::MAX);
    app_env.sample_time.saturating_mul(n)
  };

  criterion
    .sample_size(app_env.samples)
    .warm_up_time(times(app_env.warmup_samples))
    .measurement_time(times(app_env.samples).max(Duration::from_millis(100)))
}

/// One benchmark group per dimensionality, one benchmark per kernel.
pub fn bench_dimensionality(c: &mut Criterion, kernels: &[Kernel], pair: &InputPair) {
  let dimensionality = pair.dimensionality();
  let mut group = c.benchmark_group(format!("cosine_similarity/{dimensionality}"));
  group.throughput(Throughput::Elements(dimensionality as u64));

  for kernel in kernels {
    group.bench_with_input(
      BenchmarkId::new(kernel.to_string(), dimensionality),
      pair,
      |b, pair| b.iter(|| kernel.similarity(black_box(&pair.x), black_box(&pair.y))),
    );
  }

  group.finish();
}
