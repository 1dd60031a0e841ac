use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `len` independent uniform values in `[0, 1)`.
///
/// The values are not normalised, so similarities between two such vectors cluster around a
/// positive value instead of spreading over `[-1, 1]`.
pub fn generate_random<R: Rng>(len: usize, rng: &mut R) -> Vec<f32> {
  (0..len).map(|_| rng.random::<f32>()).collect()
}

/// Seeded generator when `seed` is set, OS entropy otherwise.
pub fn input_rng(seed: Option<u64>) -> StdRng {
  match seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  }
}

/// The two vectors every kernel is timed on for one dimensionality.
#[derive(Debug, Clone)]
pub struct InputPair {
  pub x: Vec<f32>,
  pub y: Vec<f32>,
}

impl InputPair {
  pub fn generate<R: Rng>(dimensionality: usize, rng: &mut R) -> Self {
    Self {
      x: generate_random(dimensionality, rng),
      y: generate_random(dimensionality, rng),
    }
  }

  #[must_use]
  pub fn dimensionality(&self) -> usize {
    self.x.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn values_are_unit_interval() {
    let mut rng = input_rng(Some(7));
    let v = generate_random(10_000, &mut rng);
    assert_eq!(v.len(), 10_000);
    assert!(v.iter().all(|x| (0.0..1.0).contains(x)));

    let mean = v.iter().map(|&x| f64::from(x)).sum::<f64>() / v.len() as f64;
    assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
  }

  #[test]
  fn seeded_runs_repeat() {
    let a = InputPair::generate(64, &mut input_rng(Some(1)));
    let b = InputPair::generate(64, &mut input_rng(Some(1)));
    assert_eq!(a.x, b.x);
    assert_eq!(a.y, b.y);
    assert_ne!(a.x, a.y);
    assert_eq!(a.dimensionality(), 64);
  }

  #[test]
  fn zero_length_is_empty() {
    assert!(generate_random(0, &mut input_rng(None)).is_empty());
  }
}
