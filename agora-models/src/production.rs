//! Production economy with two price-taking firms and one worker-consumer.
//!
//! Each firm turns labor into its own good with decreasing returns; the
//! consumer supplies labor, owns both firms, and splits spending between
//! the goods, with an optional tax on good 2 rebated as a transfer. Firm
//! behavior has closed forms; the consumer's labor choice is a scalar
//! first-order condition solved by bisection, and the two relative prices
//! clear the labor and good-2 markets via Newton iteration (good 1 then
//! clears by Walras' law).

use agora_solve::{VectorSystem, bisection, newton};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Search bracket for the consumer's labor supply. The FOC residual is
/// positive at the left edge and negative at the right for any sensible
/// parameterization, so the root is always inside.
const LABOR_BRACKET: [f64; 2] = [1e-6, 10.0];

/// Errors that can occur while clearing the production economy.
#[derive(Debug, Error)]
pub enum ProductionError {
    #[error("labor supply search failed")]
    Labor(#[from] bisection::Error),

    #[error("price search failed")]
    Prices(#[from] newton::Error),
}

/// Parameters of the production economy. Wage is the numeraire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionEconomy {
    /// Total factor productivity of both firms.
    pub tfp: f64,
    /// Output elasticity of labor.
    pub gamma: f64,
    /// Consumer's Cobb-Douglas weight on good 1.
    pub alpha: f64,
    /// Disutility weight of labor.
    pub nu: f64,
    /// Curvature of labor disutility.
    pub epsilon: f64,
    /// Tax per unit of good 2.
    pub tau: f64,
    /// Lump-sum transfer to the consumer.
    pub transfer: f64,
    /// Welfare weight on good-2 output.
    pub kappa: f64,
    pub wage: f64,
}

impl Default for ProductionEconomy {
    fn default() -> Self {
        Self {
            tfp: 1.0,
            gamma: 0.5,
            alpha: 0.3,
            nu: 1.0,
            epsilon: 2.0,
            tau: 0.0,
            transfer: 0.0,
            kappa: 0.1,
            wage: 1.0,
        }
    }
}

impl ProductionEconomy {
    /// A firm's profit-maximizing labor demand at an output price.
    #[must_use]
    pub fn labor_demand(&self, p: f64) -> f64 {
        (p * self.tfp * self.gamma / self.wage).powf(1.0 / (1.0 - self.gamma))
    }

    /// A firm's output at an output price.
    #[must_use]
    pub fn output(&self, p: f64) -> f64 {
        self.tfp * self.labor_demand(p).powf(self.gamma)
    }

    /// A firm's maximized profit at an output price.
    #[must_use]
    pub fn firm_profit(&self, p: f64) -> f64 {
        ((1.0 - self.gamma) / self.gamma)
            * self.wage
            * (p * self.tfp * self.gamma / self.wage).powf(1.0 / (1.0 - self.gamma))
    }

    /// The consumer's income at a labor supply: wages plus the transfer
    /// plus both firms' profits.
    fn income(&self, labor: f64, p1: f64, p2: f64) -> f64 {
        self.wage * labor + self.transfer + self.firm_profit(p1) + self.firm_profit(p2)
    }

    /// The consumer's demanded bundle at prices and a labor supply.
    #[must_use]
    pub fn consumption(&self, p1: f64, p2: f64, labor: f64) -> (f64, f64) {
        let income = self.income(labor, p1, p2);
        (
            self.alpha * income / p1,
            (1.0 - self.alpha) * income / (p2 + self.tau),
        )
    }

    /// Solves the consumer's labor first-order condition
    /// `wage / income = nu * labor^epsilon` by bisection.
    ///
    /// # Errors
    ///
    /// Returns an error if the bisection fails.
    pub fn labor_supply(
        &self,
        p1: f64,
        p2: f64,
        config: &bisection::Config,
    ) -> Result<f64, bisection::Error> {
        let foc =
            |labor: f64| self.wage / self.income(labor, p1, p2) - self.nu * labor.powf(self.epsilon);
        bisection::solve(&foc, LABOR_BRACKET, config).map(|solution| solution.x)
    }

    /// Excess demand for labor and for each good at the given prices,
    /// evaluated at the consumer's optimal labor supply.
    ///
    /// # Errors
    ///
    /// Returns an error if the labor supply search fails.
    pub fn market_excess(
        &self,
        p1: f64,
        p2: f64,
        labor_config: &bisection::Config,
    ) -> Result<(f64, f64, f64), bisection::Error> {
        let labor = self.labor_supply(p1, p2, labor_config)?;
        let (c1, c2) = self.consumption(p1, p2, labor);
        Ok((
            self.labor_demand(p1) + self.labor_demand(p2) - labor,
            c1 - self.output(p1),
            c2 - self.output(p2),
        ))
    }

    /// Finds the pair of prices clearing the labor and good-2 markets,
    /// starting Newton from `(1, 1)`. Good 1 clears by Walras' law.
    ///
    /// # Errors
    ///
    /// Returns an error if the labor search or the Newton solve fails.
    pub fn equilibrium_prices(
        &self,
        price_config: &newton::Config,
        labor_config: &bisection::Config,
    ) -> Result<(f64, f64), ProductionError> {
        let system = MarketClearing {
            econ: self,
            labor_config,
        };
        let solution = newton::solve_unobserved(
            &system,
            DVector::from_vec(vec![1.0, 1.0]),
            price_config,
        )?;
        Ok((solution.x[0], solution.x[1]))
    }

    /// The consumer's realized utility at prices and a good-2 tax, with the
    /// transfer balanced to the tax revenue.
    ///
    /// # Errors
    ///
    /// Returns an error if the labor supply search fails.
    pub fn utility(
        &self,
        p1: f64,
        p2: f64,
        tau: f64,
        labor_config: &bisection::Config,
    ) -> Result<f64, bisection::Error> {
        let labor = self.labor_supply(p1, p2, labor_config)?;

        // Budget-balancing transfer: tax revenue on the pre-transfer
        // good-2 purchase.
        let pre_transfer = self.wage * labor + self.firm_profit(p1) + self.firm_profit(p2);
        let transfer = tau * ((1.0 - self.alpha) * pre_transfer / (p2 + tau));

        let income = pre_transfer + transfer;
        let c1 = self.alpha * income / p1;
        let c2 = (1.0 - self.alpha) * income / (p2 + tau);

        Ok(
            (c1.powf(self.alpha) * c2.powf(1.0 - self.alpha)).ln()
                - self.nu * labor.powf(1.0 + self.epsilon) / (1.0 + self.epsilon),
        )
    }

    /// Social welfare: consumer utility plus the weighted good-2 output.
    ///
    /// # Errors
    ///
    /// Returns an error if the labor supply search fails.
    pub fn social_welfare(
        &self,
        p1: f64,
        p2: f64,
        tau: f64,
        labor_config: &bisection::Config,
    ) -> Result<f64, bisection::Error> {
        Ok(self.utility(p1, p2, tau, labor_config)? + self.kappa * self.output(p2))
    }
}

/// Residuals of the labor and good-2 market-clearing conditions in the two
/// prices. The Jacobian is left to the forward-difference default.
struct MarketClearing<'a> {
    econ: &'a ProductionEconomy,
    labor_config: &'a bisection::Config,
}

impl VectorSystem for MarketClearing<'_> {
    type Error = bisection::Error;

    fn dim(&self) -> usize {
        2
    }

    fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        let (labor, _good_1, good_2) = self.econ.market_excess(x[0], x[1], self.labor_config)?;
        Ok(DVector::from_vec(vec![labor, good_2]))
    }
}
