use std::fmt::Write;

use chrono::{DateTime, Utc};
use cossim_kernels::{Kernel, LaneWidth};
use cossim_shared::ReportFormat;
use serde::Serialize;

use crate::stats::{Statistics, format_nanos};

/// What the host offered the kernels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
  pub arch: &'static str,
  pub os: &'static str,
  pub detected_width: LaneWidth,
  pub portable_width: LaneWidth,
  pub avx512f: bool,
}

impl HostInfo {
  #[must_use]
  pub fn current() -> Self {
    Self {
      arch: std::env::consts::ARCH,
      os: std::env::consts::OS,
      detected_width: LaneWidth::detect(),
      portable_width: LaneWidth::portable(),
      avx512f: LaneWidth::W512.is_supported(),
    }
  }
}

/// Timing of one kernel at one dimensionality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
  pub kernel: Kernel,
  pub dimensionality: usize,
  pub lane_width: LaneWidth,
  pub ops_per_sample: u64,
  /// Nanoseconds per call.
  pub stats: Statistics,
  /// The kernel's similarity for the case inputs.
  pub result: f32,
  pub agrees_with_scalar: bool,
  /// Mean relative to the scalar kernel's mean at the same dimensionality.
  pub ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
  pub job_id: String,
  pub started_at: DateTime<Utc>,
  pub host: HostInfo,
  pub measurements: Vec<Measurement>,
}

impl Report {
  pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
      ReportFormat::Table => Ok(self.to_table()),
      ReportFormat::Json => serde_json::to_string_pretty(self),
    }
  }

  fn to_table(&self) -> String {
    let mut out = String::new();

    let _ = writeln!(
      out,
      "Job: {} ({}, {}) started {}",
      self.job_id,
      self.host.arch,
      self.host.os,
      self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
      out,
      "Lane width: detected {} ({} bits), portable {} ({} bits), AVX-512F {}",
      self.host.detected_width,
      self.host.detected_width.bits(),
      self.host.portable_width,
      self.host.portable_width.bits(),
      if self.host.avx512f { "available" } else { "unavailable" }
    );
    let _ = writeln!(out);

    let _ = writeln!(
      out,
      "| Method | Dimensionality | Mean | Error | StdDev | Median | Ratio | Result |"
    );
    let _ = writeln!(
      out,
      "|--------|---------------:|-----:|------:|-------:|-------:|------:|-------:|"
    );
    for m in &self.measurements {
      let ratio = m.ratio.map_or_else(|| "?".to_owned(), |r| format!("{r:.2}"));
      let flag = if m.agrees_with_scalar { "" } else { " (!)" };
      let _ = writeln!(
        out,
        "| {} | {} | {} | {} | {} | {} | {} | {:.6}{} |",
        m.kernel,
        m.dimensionality,
        format_nanos(m.stats.mean),
        format_nanos(m.stats.error),
        format_nanos(m.stats.std_dev),
        format_nanos(m.stats.median),
        ratio,
        m.result,
        flag
      );
    }

    out.trim_end().to_string()
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use cossim_kernels::{Scalar, Vectorized};

  use super::*;

  fn stats(mean: f64) -> Statistics {
    Statistics {
      mean,
      error: 0.5,
      std_dev: 1.0,
      median: mean,
      min: mean - 1.0,
      max: mean + 1.0,
      samples: 30,
    }
  }

  fn report() -> Report {
    Report {
      job_id: "AVX512F Enabled".to_owned(),
      started_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
      host: HostInfo {
        arch: "x86_64",
        os: "linux",
        detected_width: LaneWidth::W512,
        portable_width: LaneWidth::W256,
        avx512f: true,
      },
      measurements: vec![
        Measurement {
          kernel: Scalar.into(),
          dimensionality: 1000,
          lane_width: LaneWidth::Scalar,
          ops_per_sample: 4096,
          stats: stats(1_200.0),
          result: 0.75,
          agrees_with_scalar: true,
          ratio: Some(1.0),
        },
        Measurement {
          kernel: Vectorized.into(),
          dimensionality: 1000,
          lane_width: LaneWidth::W256,
          ops_per_sample: 16384,
          stats: stats(300.0),
          result: 0.75,
          agrees_with_scalar: false,
          ratio: None,
        },
      ],
    }
  }

  #[test]
  fn table_has_header_and_rows() {
    let table = report().render(ReportFormat::Table).unwrap();
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines[0], "Job: AVX512F Enabled (x86_64, linux) started 2024-05-01 12:00:00 UTC");
    assert_eq!(
      lines[1],
      "Lane width: detected w512 (512 bits), portable w256 (256 bits), AVX-512F available"
    );
    assert!(lines[3].starts_with("| Method | Dimensionality |"));
    assert_eq!(
      lines[5],
      "| scalar | 1000 | 1.200 μs | 0.500 ns | 1.000 ns | 1.200 μs | 1.00 | 0.750000 |"
    );
    assert_eq!(
      lines[6],
      "| vectorized | 1000 | 300.000 ns | 0.500 ns | 1.000 ns | 300.000 ns | ? | 0.750000 (!) |"
    );
    assert_eq!(lines.len(), 7);
  }

  #[test]
  fn json_uses_kernel_names() {
    let json = report().render(ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["job_id"], "AVX512F Enabled");
    assert_eq!(value["host"]["detected_width"], "w512");
    assert_eq!(value["measurements"][0]["kernel"], "scalar");
    assert_eq!(value["measurements"][1]["kernel"], "vectorized");
    assert_eq!(value["measurements"][1]["lane_width"], "w256");
    assert_eq!(value["measurements"][1]["ratio"], serde_json::Value::Null);
    assert_eq!(value["measurements"][0]["stats"]["samples"], 30);
  }
}
