use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Where timings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
  /// In-process sampling runner that produces a [`ReportFormat`]-rendered report.
  #[default]
  Builtin,
  /// Hand the sweep to criterion, which prints and stores its own results.
  Criterion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
  /// Markdown table
  #[default]
  Table,
  Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("{key}={value:?} is invalid: {reason}")]
  Invalid {
    key: &'static str,
    value: String,
    reason: String,
  },
}

/// criterion refuses sample sizes below this.
pub const CRITERION_MIN_SAMPLES: usize = 10;

pub const DEFAULT_DIMENSIONS: [usize; 4] = [10, 100, 1000, 10000];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
  pub dimensions: Vec<usize>,
  /// Kernel names, lowercased. Empty means every kernel.
  pub kernels: Vec<String>,
  pub backend: Backend,
  pub format: ReportFormat,
  pub warmup_samples: usize,
  pub samples: usize,
  /// Target wall time of one sample.
  pub sample_time: Duration,
  pub seed: Option<u64>,
  /// Free-form label identifying the run (machine, build flags, ...).
  pub job_id: String,
}

impl Default for AppEnv {
  fn default() -> Self {
    Self {
      dimensions: DEFAULT_DIMENSIONS.to_vec(),
      kernels: Vec::new(),
      backend: Backend::default(),
      format: ReportFormat::default(),
      warmup_samples: 3,
      samples: 30,
      sample_time: Duration::from_millis(20),
      seed: None,
      job_id: "default".to_owned(),
    }
  }
}

impl AppEnv {
  /// Read `COSSIM_*` variables from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from any key lookup. Unset or blank keys keep their defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut app_env = Self::default();

    if let Some(value) = get("COSSIM_DIMENSIONS") {
      app_env.dimensions = parse_list("COSSIM_DIMENSIONS", &value)?;
      if let Some(zero) = app_env.dimensions.iter().find(|&&d| d == 0) {
        return Err(invalid("COSSIM_DIMENSIONS", &value, format!("dimension {zero} is empty")));
      }
    }
    if let Some(value) = get("COSSIM_KERNELS") {
      app_env.kernels = value
        .split(',')
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    }
    if let Some(value) = get("COSSIM_BACKEND") {
      app_env.backend = parse("COSSIM_BACKEND", &value)?;
    }
    if let Some(value) = get("COSSIM_FORMAT") {
      app_env.format = parse("COSSIM_FORMAT", &value)?;
    }
    if let Some(value) = get("COSSIM_WARMUP_SAMPLES") {
      app_env.warmup_samples = parse("COSSIM_WARMUP_SAMPLES", &value)?;
    }
    if let Some(value) = get("COSSIM_SAMPLES") {
      app_env.samples = parse("COSSIM_SAMPLES", &value)?;
      if app_env.samples == 0 {
        return Err(invalid("COSSIM_SAMPLES", &value, "must be positive"));
      }
    }
    if let Some(value) = get("COSSIM_SAMPLE_TIME_MS") {
      let millis: u64 = parse("COSSIM_SAMPLE_TIME_MS", &value)?;
      if millis == 0 {
        return Err(invalid("COSSIM_SAMPLE_TIME_MS", &value, "must be positive"));
      }
      app_env.sample_time = Duration::from_millis(millis);
    }
    if let Some(value) = get("COSSIM_SEED") {
      app_env.seed = Some(parse("COSSIM_SEED", &value)?);
    }
    if let Some(value) = get("COSSIM_JOB_ID") {
      app_env.job_id = value.trim().to_owned();
    }

    if app_env.backend == Backend::Criterion && app_env.samples < CRITERION_MIN_SAMPLES {
      return Err(invalid(
        "COSSIM_SAMPLES",
        &app_env.samples.to_string(),
        format!("criterion needs at least {CRITERION_MIN_SAMPLES} samples"),
      ));
    }

    Ok(app_env)
  }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
  ConfigError::Invalid {
    key,
    value: value.to_owned(),
    reason: reason.into(),
  }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
  T: FromStr,
  T::Err: Display,
{
  value
    .trim()
    .parse()
    .map_err(|err: T::Err| invalid(key, value, err.to_string()))
}

fn parse_list<T>(key: &'static str, value: &str) -> Result<Vec<T>, ConfigError>
where
  T: FromStr,
  T::Err: Display,
{
  let items = value
    .split(',')
    .filter(|item| !item.trim().is_empty())
    .map(|item| parse(key, item))
    .collect::<Result<Vec<T>, _>>()?;

  if items.is_empty() {
    return Err(invalid(key, value, "list is empty"));
  }
  Ok(items)
}
