use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during a bisection solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("bracket endpoint is non-finite: {value}")]
    NonFiniteBracket { value: f64 },

    #[error("bracket has zero width at {value}")]
    ZeroWidthBracket { value: f64 },

    #[error("no root in bracket: f({left}) = {left_residual}, f({right}) = {right_residual}")]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    /// The iteration budget ran out before any tolerance was met. Carries
    /// the best iterate seen so the caller can retry from it.
    #[error("no convergence after {iters} iterations: best x = {x}, residual = {residual}")]
    DidNotConverge { x: f64, residual: f64, iters: usize },

    #[error("system evaluation failed")]
    System(#[source] Box<dyn StdError + Send + Sync>),
}
