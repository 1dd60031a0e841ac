//! Timing harness for the cosine similarity kernels.
//!
//! Sweeps the configured dimensionalities, generating one random input pair per
//! dimensionality and timing every selected kernel on it with either the built-in runner or
//! criterion.

use anyhow::{Context, anyhow};
use chrono::Utc;
use criterion::Criterion;
use cossim_kernels::Kernel;
use cossim_shared::{AppEnv, AppError, Backend};
use strum::IntoEnumIterator;

pub mod bench;

mod input;
pub use input::{InputPair, generate_random, input_rng};

mod report;
pub use report::{HostInfo, Measurement, Report};

mod runner;
pub use runner::{AGREEMENT_TOLERANCE, Runner, RunnerConfig};

mod stats;
pub use stats::{Statistics, format_nanos};

/// Kernels matching `names`, in report order. No names selects every kernel.
pub fn resolve_kernels(names: &[String]) -> Result<Vec<Kernel>, AppError> {
  if names.is_empty() {
    return Ok(Kernel::iter().collect());
  }

  if let Some(unknown) = names
    .iter()
    .find(|name| name.parse::<Kernel>().is_err())
  {
    let known: Vec<String> = Kernel::iter().map(|k| k.to_string()).collect();
    return Err(anyhow!("unknown kernel {unknown:?}, expected one of {}", known.join(", ")).into());
  }

  Ok(
    Kernel::iter()
      .filter(|kernel| names.iter().any(|name| *name == kernel.to_string()))
      .collect(),
  )
}

/// Run the sweep described by `app_env`.
///
/// Returns the report for the built-in backend; criterion prints and stores its own results, so
/// that backend returns `None`.
pub fn run(app_env: &AppEnv) -> Result<Option<Report>, AppError> {
  let kernels = resolve_kernels(&app_env.kernels)?;
  let mut rng = input_rng(app_env.seed);

  tracing::info!(
    backend = %app_env.backend,
    job_id = %app_env.job_id,
    dimensions = ?app_env.dimensions,
    kernels = ?kernels.iter().map(ToString::to_string).collect::<Vec<_>>(),
    "Starting benchmark sweep"
  );

  match app_env.backend {
    Backend::Builtin => {
      let started_at = Utc::now();
      let runner = Runner::new(RunnerConfig::from(app_env));

      let mut measurements = Vec::new();
      for &dimensionality in &app_env.dimensions {
        let pair = InputPair::generate(dimensionality, &mut rng);
        let case = runner
          .run_case(&kernels, &pair)
          .with_context(|| format!("benchmarking dimensionality {dimensionality}"))?;
        measurements.extend(case);
      }

      Ok(Some(Report {
        job_id: app_env.job_id.clone(),
        started_at,
        host: HostInfo::current(),
        measurements,
      }))
    }
    Backend::Criterion => {
      let mut criterion = bench::configure(Criterion::default(), app_env);
      for &dimensionality in &app_env.dimensions {
        let pair = InputPair::generate(dimensionality, &mut rng);
        bench::bench_dimensionality(&mut criterion, &kernels, &pair);
      }
      criterion.final_summary();
      Ok(None)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use cossim_kernels::{Scalar, Vectorized512};
  use cossim_shared::ReportFormat;

  use super::*;

  #[test]
  fn empty_selection_is_every_kernel() {
    assert_eq!(resolve_kernels(&[]).unwrap().len(), 3);
  }

  #[test]
  fn selection_keeps_report_order() {
    let names = vec!["vectorized512".to_owned(), "scalar".to_owned(), "scalar".to_owned()];
    let kernels = resolve_kernels(&names).unwrap();
    assert_eq!(kernels, [Kernel::from(Scalar), Kernel::from(Vectorized512)]);
  }

  #[test]
  fn unknown_kernel_is_rejected() {
    let err = resolve_kernels(&["avx2".to_owned()]).unwrap_err();
    assert_eq!(
      err.to_string(),
      "unknown kernel \"avx2\", expected one of scalar, vectorized, vectorized512"
    );
  }

  #[test]
  fn builtin_sweep_produces_report() {
    let app_env = AppEnv {
      dimensions: vec![10, 17],
      samples: 2,
      warmup_samples: 0,
      sample_time: Duration::from_micros(20),
      seed: Some(11),
      job_id: "test".to_owned(),
      ..AppEnv::default()
    };

    let report = run(&app_env).unwrap().unwrap();
    assert_eq!(report.job_id, "test");
    assert_eq!(report.measurements.len(), 6);
    assert!(report.measurements.iter().all(|m| m.agrees_with_scalar));
    assert_eq!(
      report
        .measurements
        .iter()
        .map(|m| m.dimensionality)
        .collect::<Vec<_>>(),
      [10, 10, 10, 17, 17, 17]
    );

    let table = report.render(ReportFormat::Table).unwrap();
    assert!(table.contains("| vectorized512 | 17 |"));
  }
}
