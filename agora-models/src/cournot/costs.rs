use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::LogNormal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when drawing a cost vector.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CostError {
    #[error("log-normal scale must be finite and positive, got {scale}")]
    InvalidScale { scale: f64 },

    #[error("explicit cost vector has {actual} entries, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
}

/// How the marginal cost vector for a market is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CostModel {
    /// Every firm shares the same marginal cost.
    Constant(f64),
    /// I.i.d. log-normal draws from a seeded generator, so a given seed
    /// always yields the same market.
    LogNormal { location: f64, scale: f64, seed: u64 },
    /// Caller-supplied marginal costs, one per firm.
    Explicit(Vec<f64>),
}

impl CostModel {
    /// Produces the length-`n` marginal cost vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the log-normal scale is invalid or an explicit
    /// vector does not have `n` entries.
    pub fn draw(&self, n: usize) -> Result<Vec<f64>, CostError> {
        match self {
            Self::Constant(cost) => Ok(vec![*cost; n]),
            Self::LogNormal {
                location,
                scale,
                seed,
            } => {
                if !scale.is_finite() || *scale <= 0.0 {
                    return Err(CostError::InvalidScale { scale: *scale });
                }
                let dist = LogNormal::new(*location, *scale)
                    .map_err(|_| CostError::InvalidScale { scale: *scale })?;
                let mut rng = StdRng::seed_from_u64(*seed);
                Ok((0..n).map(|_| rng.sample(dist)).collect())
            }
            Self::Explicit(costs) => {
                if costs.len() == n {
                    Ok(costs.clone())
                } else {
                    Err(CostError::WrongLength {
                        expected: n,
                        actual: costs.len(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_costs_repeat() {
        let costs = CostModel::Constant(2.5).draw(4).expect("draw");
        assert_eq!(costs, vec![2.5; 4]);
    }

    #[test]
    fn log_normal_draws_are_deterministic_and_positive() {
        let model = CostModel::LogNormal {
            location: 0.0,
            scale: 0.5,
            seed: 7,
        };

        let first = model.draw(20).expect("draw");
        let second = model.draw(20).expect("draw");

        assert_eq!(first, second);
        assert!(first.iter().all(|&c| c > 0.0));
    }

    #[test]
    fn rejects_invalid_scale() {
        let model = CostModel::LogNormal {
            location: 0.0,
            scale: f64::NAN,
            seed: 1,
        };

        assert!(matches!(
            model.draw(3),
            Err(CostError::InvalidScale { .. })
        ));
    }

    #[test]
    fn rejects_wrong_explicit_length() {
        let model = CostModel::Explicit(vec![1.0, 2.0]);

        assert!(matches!(
            model.draw(3),
            Err(CostError::WrongLength {
                expected: 3,
                actual: 2
            })
        ));
    }
}
