use std::error::Error as StdError;

use nalgebra::DVector;
use thiserror::Error;

/// Errors that can occur during a Newton solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("starting point has {actual} entries, system has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("non-finite residual norm {norm} at iteration {iter}")]
    NonFiniteResidual { iter: usize, norm: f64 },

    /// The Jacobian could not be factorized, so no Newton step exists.
    #[error("singular Jacobian at iteration {iter}")]
    SingularJacobian { iter: usize },

    /// The iteration budget ran out before any tolerance was met. Carries
    /// the last iterate so the caller can retry from it.
    #[error("no convergence after {iters} iterations: residual norm = {residual_norm}")]
    DidNotConverge {
        last: DVector<f64>,
        residual_norm: f64,
        iters: usize,
    },

    #[error("system evaluation failed")]
    System(#[source] Box<dyn StdError + Send + Sync>),
}
