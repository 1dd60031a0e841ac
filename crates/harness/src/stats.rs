use hdrhistogram::Histogram;
use serde::Serialize;

/// z-score of a two-sided 99.9% confidence interval.
const Z_999: f64 = 3.290_526_731_491_926;

/// Histogram resolution: picoseconds, so sub-nanosecond kernels keep three significant digits.
const PICOS_PER_NANO: f64 = 1_000.0;

const SIGNIFICANT_DIGITS: u8 = 3;

/// Summary of per-operation timings in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Statistics {
  pub mean: f64,
  /// Half-width of the 99.9% confidence interval of the mean.
  pub error: f64,
  /// Sample standard deviation.
  pub std_dev: f64,
  pub median: f64,
  pub min: f64,
  pub max: f64,
  pub samples: usize,
}

impl Statistics {
  /// Summarizes nanoseconds-per-call samples through an HDR histogram.
  ///
  /// Figures carry the histogram's three significant digits. `None` when `samples` is empty.
  #[must_use]
  pub fn from_samples(samples: &[f64]) -> Option<Self> {
    if samples.is_empty() {
      return None;
    }

    let mut histogram = Histogram::<u64>::new(SIGNIFICANT_DIGITS).ok()?;
    for &nanos in samples {
      histogram.record((nanos * PICOS_PER_NANO).round() as u64).ok()?;
    }

    let n = samples.len();
    // the histogram reports the population deviation
    let std_dev = if n > 1 {
      histogram.stdev() * (n as f64 / (n - 1) as f64).sqrt() / PICOS_PER_NANO
    } else {
      0.0
    };
    let to_nanos = |picos: u64| picos as f64 / PICOS_PER_NANO;

    Some(Self {
      mean: histogram.mean() / PICOS_PER_NANO,
      error: Z_999 * std_dev / (n as f64).sqrt(),
      std_dev,
      median: to_nanos(histogram.value_at_quantile(0.5)),
      min: to_nanos(histogram.min()),
      max: to_nanos(histogram.max()),
      samples: n,
    })
  }
}

/// Render nanoseconds with the largest unit that keeps the value >= 1.
#[must_use]
pub fn format_nanos(nanos: f64) -> String {
  let abs = nanos.abs();
  if abs >= 1e6 {
    format!("{:.3} ms", nanos / 1e6)
  } else if abs >= 1e3 {
    format!("{:.3} μs", nanos / 1e3)
  } else {
    format!("{nanos:.3} ns")
  }
}
