//! Edgeworth-box exchange economy with two Cobb-Douglas consumers.
//!
//! Total endowment of each good is one unit, split between consumers A and
//! B; good 2 is the numeraire. The equilibrium relative price clears the
//! good-1 market, found by bisection on its excess demand. Walras' law then
//! clears the good-2 market as well.

use agora_solve::bisection;
use serde::{Deserialize, Serialize};

/// Preferences and endowments of the two-consumer economy.
///
/// `endowment_a` is consumer A's holding of each good; consumer B holds the
/// remainder of the unit total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeEconomy {
    /// Consumer A's Cobb-Douglas weight on good 1.
    pub alpha: f64,
    /// Consumer B's Cobb-Douglas weight on good 1.
    pub beta: f64,
    pub endowment_a: (f64, f64),
}

impl Default for ExchangeEconomy {
    fn default() -> Self {
        Self {
            alpha: 1.0 / 3.0,
            beta: 2.0 / 3.0,
            endowment_a: (0.8, 0.3),
        }
    }
}

impl ExchangeEconomy {
    /// Consumer B's endowment, the remainder of one unit of each good.
    #[must_use]
    pub fn endowment_b(&self) -> (f64, f64) {
        let (w1a, w2a) = self.endowment_a;
        (1.0 - w1a, 1.0 - w2a)
    }

    /// Consumer A's utility at a consumption bundle.
    #[must_use]
    pub fn utility_a(&self, x1: f64, x2: f64) -> f64 {
        x1.powf(self.alpha) * x2.powf(1.0 - self.alpha)
    }

    /// Consumer B's utility at a consumption bundle.
    #[must_use]
    pub fn utility_b(&self, x1: f64, x2: f64) -> f64 {
        x1.powf(self.beta) * x2.powf(1.0 - self.beta)
    }

    /// Consumer A's demanded bundle at a good-1 price (good 2 numeraire).
    #[must_use]
    pub fn demand_a(&self, p1: f64) -> (f64, f64) {
        let (w1a, w2a) = self.endowment_a;
        let wealth = p1 * w1a + w2a;
        (self.alpha * wealth / p1, (1.0 - self.alpha) * wealth)
    }

    /// Consumer B's demanded bundle at a good-1 price.
    #[must_use]
    pub fn demand_b(&self, p1: f64) -> (f64, f64) {
        let (w1b, w2b) = self.endowment_b();
        let wealth = p1 * w1b + w2b;
        (self.beta * wealth / p1, (1.0 - self.beta) * wealth)
    }

    /// Excess demand for each good at a good-1 price.
    #[must_use]
    pub fn excess_demand(&self, p1: f64) -> (f64, f64) {
        let (x1a, x2a) = self.demand_a(p1);
        let (x1b, x2b) = self.demand_b(p1);
        (x1a + x1b - 1.0, x2a + x2b - 1.0)
    }

    /// Finds the market-clearing good-1 price inside `bracket` by bisection
    /// on the good-1 excess demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the bracket does not straddle the clearing price
    /// or the bisection fails to converge.
    pub fn equilibrium_price(
        &self,
        bracket: [f64; 2],
        config: &bisection::Config,
    ) -> Result<f64, bisection::Error> {
        let clearing = |p1: f64| self.excess_demand(p1).0;
        bisection::solve(&clearing, bracket, config).map(|solution| solution.x)
    }
}
