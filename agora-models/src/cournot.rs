//! N-firm Cournot competition under linear inverse demand.
//!
//! Firms choose quantities simultaneously; each firm's best response sets
//! its marginal profit to zero given the rivals' combined output. The
//! equilibrium is the root of the stacked first-order conditions, found by
//! Newton iteration with the closed-form Jacobian. Firms whose solved
//! quantity turns negative are removed and the reduced game is re-solved
//! (see [`solve_equilibrium`]).

mod costs;
mod equilibrium;

pub use costs::{CostError, CostModel};
pub use equilibrium::{Equilibrium, EquilibriumError, solve_equilibrium};

use std::convert::Infallible;

use agora_solve::VectorSystem;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Linear inverse demand `p = intercept - slope * q_total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub intercept: f64,
    pub slope: f64,
}

impl Market {
    /// Market price at a total output level.
    #[must_use]
    pub fn price(&self, total_output: f64) -> f64 {
        self.intercept - self.slope * total_output
    }

    /// Marginal profit of a firm producing `q` against rivals' total
    /// output `q_rivals`: the first-order condition residual.
    #[must_use]
    pub fn marginal_profit(&self, q: f64, q_rivals: f64, cost: f64) -> f64 {
        self.intercept - cost - self.slope * (q_rivals + 2.0 * q)
    }

    /// Derivative of the first-order condition in the firm's own quantity.
    #[must_use]
    pub fn own_derivative(&self) -> f64 {
        -2.0 * self.slope
    }

    /// Derivative of the first-order condition in the rivals' total output.
    #[must_use]
    pub fn cross_derivative(&self) -> f64 {
        -self.slope
    }

    /// Profit of a firm producing `q` against rivals' total output.
    #[must_use]
    pub fn profit(&self, q: f64, q_rivals: f64, cost: f64) -> f64 {
        (self.price(q + q_rivals) - cost) * q
    }
}

/// Stacked first-order conditions for the currently active firms.
///
/// Entry `i` is the marginal profit of firm `i` at its own quantity and the
/// rivals' combined output. The Jacobian is constant: the own derivative on
/// the diagonal and the cross derivative everywhere else.
pub(crate) struct BestResponseSystem<'a> {
    pub(crate) market: Market,
    pub(crate) costs: &'a [f64],
}

impl VectorSystem for BestResponseSystem<'_> {
    type Error = Infallible;

    fn dim(&self) -> usize {
        self.costs.len()
    }

    fn residuals(&self, q: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        let total: f64 = q.sum();
        Ok(DVector::from_fn(self.costs.len(), |i, _| {
            self.market
                .marginal_profit(q[i], total - q[i], self.costs[i])
        }))
    }

    fn jacobian(&self, _q: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        let own = self.market.own_derivative();
        let cross = self.market.cross_derivative();
        let n = self.costs.len();
        Ok(DMatrix::from_fn(n, n, |row, col| {
            if row == col { own } else { cross }
        }))
    }
}
