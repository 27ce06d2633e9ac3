mod config;
mod error;
mod solution;

pub use config::Config;
pub use error::Error;
pub use solution::{Solution, Status};

use nalgebra::DVector;

use crate::{Observer, VectorSystem};

/// Control actions supported by the Newton solver.
pub enum Action {
    /// Stop the solver at the current iterate.
    StopEarly,
}

/// Iteration event emitted after each Newton step.
pub struct Event<'a> {
    /// Iteration counter (1-based within the Newton loop).
    pub iter: usize,
    /// Iterate after the step was applied.
    pub x: &'a DVector<f64>,
    /// Residual norm at the current iterate.
    pub residual_norm: f64,
}

/// Finds a root of the vector system by Newton iteration.
///
/// Each step solves `J * step = -h` by LU factorization and applies the
/// full step. Observers see the iterate after every step and may stop the
/// run early.
///
/// # Errors
///
/// Returns an error if the config is invalid, the starting point has the
/// wrong dimension, the Jacobian is singular, a residual turns non-finite,
/// the system fails to evaluate, or the iteration budget runs out before
/// convergence. Non-convergence carries the last iterate.
pub fn solve<S, Obs>(
    system: &S,
    start: DVector<f64>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    S: VectorSystem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    if start.len() != system.dim() {
        return Err(Error::DimensionMismatch {
            expected: system.dim(),
            actual: start.len(),
        });
    }

    let mut x = start;
    let mut residuals = residuals_at(system, &x, 0)?;
    let mut norm = residuals.norm();

    for iter in 1..=config.max_iters {
        if norm <= config.residual_tol {
            return Ok(Solution {
                status: Status::Converged,
                x,
                residual_norm: norm,
                iters: iter - 1,
            });
        }

        let jacobian = system
            .jacobian(&x)
            .map_err(|e| Error::System(Box::new(e)))?;

        let step = jacobian
            .lu()
            .solve(&(-&residuals))
            .ok_or(Error::SingularJacobian { iter })?;

        x += &step;
        residuals = residuals_at(system, &x, iter)?;
        norm = residuals.norm();

        let event = Event {
            iter,
            x: &x,
            residual_norm: norm,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedEarly,
                x,
                residual_norm: norm,
                iters: iter,
            });
        }

        if step.norm() <= config.x_abs_tol + config.x_rel_tol * x.norm() {
            return Ok(Solution {
                status: Status::Converged,
                x,
                residual_norm: norm,
                iters: iter,
            });
        }
    }

    if norm <= config.residual_tol {
        return Ok(Solution {
            status: Status::Converged,
            x,
            residual_norm: norm,
            iters: config.max_iters,
        });
    }

    Err(Error::DidNotConverge {
        last: x,
        residual_norm: norm,
        iters: config.max_iters,
    })
}

/// Runs the Newton iteration without observation.
///
/// # Errors
///
/// Same as [`solve`].
pub fn solve_unobserved<S: VectorSystem>(
    system: &S,
    start: DVector<f64>,
    config: &Config,
) -> Result<Solution, Error> {
    solve(system, start, config, ())
}

/// Evaluates the system, rejecting non-finite residuals.
fn residuals_at<S: VectorSystem>(
    system: &S,
    x: &DVector<f64>,
    iter: usize,
) -> Result<DVector<f64>, Error> {
    let residuals = system
        .residuals(x)
        .map_err(|e| Error::System(Box::new(e)))?;

    let norm = residuals.norm();
    if norm.is_finite() {
        Ok(residuals)
    } else {
        Err(Error::NonFiniteResidual { iter, norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    /// Residual `x^2 - target` with its analytic Jacobian.
    struct Quadratic {
        target: f64,
    }

    impl VectorSystem for Quadratic {
        type Error = Infallible;

        fn dim(&self) -> usize {
            1
        }

        fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
            Ok(DVector::from_element(1, x[0] * x[0] - self.target))
        }

        fn jacobian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        }
    }

    /// Residuals `[x0 + 2*x1 - 3, x0^2 - x1]`, Jacobian left to the
    /// forward-difference default. Root at (1, 1).
    struct CoupledPair;

    impl VectorSystem for CoupledPair {
        type Error = Infallible;

        fn dim(&self) -> usize {
            2
        }

        fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
            Ok(DVector::from_vec(vec![
                x[0] + 2.0 * x[1] - 3.0,
                x[0] * x[0] - x[1],
            ]))
        }
    }

    /// Residual `x^3`, where Newton only converges linearly.
    struct SlowCubic;

    impl VectorSystem for SlowCubic {
        type Error = Infallible;

        fn dim(&self) -> usize {
            1
        }

        fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
            Ok(DVector::from_element(1, x[0] * x[0] * x[0]))
        }

        fn jacobian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
            Ok(DMatrix::from_element(1, 1, 3.0 * x[0] * x[0]))
        }
    }

    /// A system whose Jacobian is identically zero.
    struct FlatJacobian;

    impl VectorSystem for FlatJacobian {
        type Error = Infallible;

        fn dim(&self) -> usize {
            1
        }

        fn residuals(&self, _x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
            Ok(DVector::from_element(1, 1.0))
        }

        fn jacobian(&self, _x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
            Ok(DMatrix::zeros(1, 1))
        }
    }

    #[test]
    fn finds_square_root() {
        let system = Quadratic { target: 4.0 };

        let solution = solve_unobserved(&system, DVector::from_element(1, 10.0), &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-8);
    }

    #[test]
    fn solves_coupled_system_with_difference_jacobian() {
        let solution = solve_unobserved(
            &CoupledPair,
            DVector::from_vec(vec![0.5, 0.5]),
            &Config::default(),
        )
        .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn observer_can_stop_iteration() {
        let system = Quadratic { target: 4.0 };

        let mut calls = 0usize;
        let observer = |event: &Event<'_>| {
            calls += 1;
            if event.iter >= 2 {
                Some(Action::StopEarly)
            } else {
                None
            }
        };

        let solution = solve(
            &system,
            DVector::from_element(1, 10.0),
            &Config::default(),
            observer,
        )
        .expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedEarly);
        assert_eq!(solution.iters, 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn errors_on_dimension_mismatch() {
        let result = solve_unobserved(&CoupledPair, DVector::zeros(3), &Config::default());

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn errors_on_singular_jacobian() {
        let result =
            solve_unobserved(&FlatJacobian, DVector::zeros(1), &Config::default());

        assert!(matches!(result, Err(Error::SingularJacobian { iter: 1 })));
    }

    #[test]
    fn reports_last_iterate_when_budget_runs_out() {
        // Zero tolerances can never be met, so the budget must run out.
        let config = Config {
            max_iters: 10,
            x_abs_tol: 0.0,
            x_rel_tol: 0.0,
            residual_tol: 0.0,
        };
        let result = solve_unobserved(&SlowCubic, DVector::from_element(1, 1.0), &config);

        match result {
            Err(Error::DidNotConverge {
                last,
                residual_norm,
                iters,
            }) => {
                assert_eq!(iters, 10);
                // Each step shrinks the iterate by a factor of 2/3.
                assert_relative_eq!(last[0], (2.0f64 / 3.0).powi(10), epsilon = 1e-12);
                assert!(residual_norm > 0.0);
            }
            other => panic!("expected DidNotConverge, got {other:?}"),
        }
    }

    #[test]
    fn errors_on_invalid_config() {
        let system = Quadratic { target: 4.0 };

        let config = Config {
            residual_tol: f64::NAN,
            ..Config::default()
        };
        let result = solve_unobserved(&system, DVector::zeros(1), &config);

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }
}
