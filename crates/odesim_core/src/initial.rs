use crate::error::{OdeError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How to fill an initial state vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialCondition {
    /// Independent uniform samples from `[low, high)`.
    Random { low: f64, high: f64 },
    Zeros,
    Ones,
}

impl InitialCondition {
    /// Parses a method name; `low`/`high` only matter for `"random"`.
    pub fn from_method(method: &str, low: f64, high: f64) -> Result<Self> {
        match method {
            "random" => Ok(InitialCondition::Random { low, high }),
            "zeros" => Ok(InitialCondition::Zeros),
            "ones" => Ok(InitialCondition::Ones),
            other => Err(OdeError::UnknownInitialCondition(other.to_string())),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Vec<f64>> {
        match *self {
            InitialCondition::Random { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(OdeError::invalid(format!(
                        "random initial conditions need finite low < high, got [{low}, {high})"
                    )));
                }
                Ok((0..size).map(|_| rng.gen_range(low..high)).collect())
            }
            InitialCondition::Zeros => Ok(vec![0.0; size]),
            InitialCondition::Ones => Ok(vec![1.0; size]),
        }
    }

    /// Like [`generate`](Self::generate) with a private generator. A seed makes
    /// the output reproducible; without one the generator is seeded from the OS.
    pub fn generate_seeded(&self, size: usize, seed: Option<u64>) -> Result<Vec<f64>> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate(size, &mut rng)
    }
}
