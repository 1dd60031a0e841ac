/// Running sums of the single-pass cosine kernel, carried in `f64`.
///
/// Vector chunks arrive already reduced to one `f32` per sum; tail elements arrive one at a
/// time. Both feed the same accumulators.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct Sums {
  dot: f64,
  x_len: f64,
  y_len: f64,
}

impl Sums {
  /// Adds the horizontal reductions of one full chunk.
  #[inline(always)]
  pub(crate) fn add_chunk(&mut self, dot: f32, x_len: f32, y_len: f32) {
    self.dot += f64::from(dot);
    self.x_len += f64::from(x_len);
    self.y_len += f64::from(y_len);
  }

  /// Adds every element pair of `x` and `y`. Products are formed in `f32`.
  #[inline]
  pub(crate) fn add_tail(&mut self, x: &[f32], y: &[f32]) {
    for (&a, &b) in x.iter().zip(y) {
      self.dot += f64::from(a * b);
      self.x_len += f64::from(a * a);
      self.y_len += f64::from(b * b);
    }
  }

  /// `dot / (|x| * |y|)`, narrowed to `f32` at the very end.
  #[inline]
  pub(crate) fn cosine(self) -> f32 {
    (self.dot / (self.x_len.sqrt() * self.y_len.sqrt())) as f32
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn chunk_and_tail_feed_the_same_sums() {
    let mut chunked = Sums::default();
    chunked.add_chunk(1.0 * 4.0 + 2.0 * 5.0, 1.0 + 4.0, 16.0 + 25.0);
    chunked.add_tail(&[3.0], &[6.0]);

    let mut tail_only = Sums::default();
    tail_only.add_tail(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);

    assert_eq!(chunked, tail_only);
  }

  #[test]
  fn cosine_of_nothing_is_nan() {
    assert!(Sums::default().cosine().is_nan());
  }
}
