use nalgebra::DVector;

/// How the Newton solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,
    /// Stopped early by an observer decision.
    StoppedEarly,
}

/// The result of a Newton solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,
    /// Estimate of the root.
    pub x: DVector<f64>,
    /// Euclidean norm of the residual at the reported estimate.
    pub residual_norm: f64,
    /// Iteration count when the solver finished.
    pub iters: usize,
}
