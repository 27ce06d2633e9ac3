mod config;
mod error;
mod solution;

pub use config::Config;
pub use error::Error;
pub use solution::Solution;

use crate::ScalarSystem;

/// Finds a root of the scalar system inside a sign-changing bracket.
///
/// The bracket endpoints may be given in either order. Convergence is
/// declared when the bracket width satisfies the `x` tolerances or the
/// midpoint residual falls within `residual_tol`.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the residual
/// becomes non-finite, the system fails to evaluate, or the iteration
/// budget runs out before convergence.
pub fn solve<S: ScalarSystem>(
    system: &S,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error> {
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let (mut left, mut right) = validate_bracket(bracket)?;

    let mut left_residual = residual_at(system, left)?;
    if left_residual.abs() <= config.residual_tol {
        return Ok(Solution {
            x: left,
            residual: left_residual,
            iters: 0,
        });
    }

    let right_residual = residual_at(system, right)?;
    if right_residual.abs() <= config.residual_tol {
        return Ok(Solution {
            x: right,
            residual: right_residual,
            iters: 0,
        });
    }

    if left_residual.signum() == right_residual.signum() {
        return Err(Error::NoSignChange {
            left,
            right,
            left_residual,
            right_residual,
        });
    }

    let (mut best, mut best_residual) = if left_residual.abs() <= right_residual.abs() {
        (left, left_residual)
    } else {
        (right, right_residual)
    };

    for iter in 1..=config.max_iters {
        let mid = 0.5 * (left + right);
        let mid_residual = residual_at(system, mid)?;

        if mid_residual.abs() < best_residual.abs() {
            best = mid;
            best_residual = mid_residual;
        }

        let x_converged = (right - left).abs() <= config.x_abs_tol + config.x_rel_tol * mid.abs();
        if x_converged || mid_residual.abs() <= config.residual_tol {
            return Ok(Solution {
                x: mid,
                residual: mid_residual,
                iters: iter,
            });
        }

        if left_residual.signum() == mid_residual.signum() {
            left = mid;
            left_residual = mid_residual;
        } else {
            right = mid;
        }
    }

    Err(Error::DidNotConverge {
        x: best,
        residual: best_residual,
        iters: config.max_iters,
    })
}

/// Evaluates the system, rejecting non-finite residuals.
fn residual_at<S: ScalarSystem>(system: &S, x: f64) -> Result<f64, Error> {
    let residual = system
        .residual(x)
        .map_err(|e| Error::System(Box::new(e)))?;

    if residual.is_finite() {
        Ok(residual)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}

/// Validates bracket values and returns them in `left < right` order.
fn validate_bracket(bracket: [f64; 2]) -> Result<(f64, f64), Error> {
    let [left, right] = bracket;

    if !left.is_finite() {
        return Err(Error::NonFiniteBracket { value: left });
    }

    if !right.is_finite() {
        return Err(Error::NonFiniteBracket { value: right });
    }

    #[allow(clippy::float_cmp)]
    if left == right {
        return Err(Error::ZeroWidthBracket { value: left });
    }

    if left < right {
        Ok((left, right))
    } else {
        Ok((right, left))
    }
}
