use nalgebra::{DMatrix, DVector};

/// Relative step used by the forward-difference Jacobian fallback.
const FD_STEP: f64 = 1e-7;

/// A scalar equation whose root is sought.
///
/// Closures of type `Fn(f64) -> f64` implement this trait directly, which
/// keeps simple market-clearing conditions free of wrapper types.
pub trait ScalarSystem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the residual at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the residual cannot be computed at `x`.
    fn residual(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<F> ScalarSystem for F
where
    F: Fn(f64) -> f64,
{
    type Error = std::convert::Infallible;

    fn residual(&self, x: f64) -> Result<f64, Self::Error> {
        Ok(self(x))
    }
}

/// A square system of equations whose root is sought.
pub trait VectorSystem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of equations, which equals the number of unknowns.
    fn dim(&self) -> usize;

    /// Evaluates the residual vector at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the residuals cannot be computed at `x`.
    fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error>;

    /// Evaluates the Jacobian of the residuals at `x`.
    ///
    /// The provided implementation uses forward differences with a step
    /// scaled to each coordinate. Systems with a known closed form should
    /// override it.
    ///
    /// # Errors
    ///
    /// Returns an error if a residual evaluation fails.
    fn jacobian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        let base = self.residuals(x)?;
        let n = self.dim();

        let mut jac = DMatrix::zeros(n, n);
        for col in 0..n {
            let step = FD_STEP * x[col].abs().max(1.0);

            let mut shifted = x.clone();
            shifted[col] += step;
            let perturbed = self.residuals(&shifted)?;

            for row in 0..n {
                jac[(row, col)] = (perturbed[row] - base[row]) / step;
            }
        }

        Ok(jac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// Residuals `[x0^2 - 1, x0 * x1]` with the Jacobian left to the
    /// forward-difference default.
    struct QuadraticPair;

    impl VectorSystem for QuadraticPair {
        type Error = Infallible;

        fn dim(&self) -> usize {
            2
        }

        fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
            Ok(DVector::from_vec(vec![x[0] * x[0] - 1.0, x[0] * x[1]]))
        }
    }

    #[test]
    fn default_jacobian_matches_analytic_form() {
        let x = DVector::from_vec(vec![2.0, 3.0]);
        let jac = QuadraticPair.jacobian(&x).expect("jacobian");

        // Analytic Jacobian is [[2*x0, 0], [x1, x0]].
        assert_relative_eq!(jac[(0, 0)], 4.0, epsilon = 1e-5);
        assert_relative_eq!(jac[(0, 1)], 0.0, epsilon = 1e-5);
        assert_relative_eq!(jac[(1, 0)], 3.0, epsilon = 1e-5);
        assert_relative_eq!(jac[(1, 1)], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn closures_are_scalar_systems() {
        let target = 9.0;
        let system = |x: f64| x * x - target;
        assert_relative_eq!(system.residual(3.0).expect("residual"), 0.0);
    }
}
