use agora_solve::newton;
use nalgebra::DVector;
use thiserror::Error;

use super::{BestResponseSystem, CostError, CostModel, Market};

/// Errors that can occur while solving for a Cournot equilibrium.
#[derive(Debug, Error)]
pub enum EquilibriumError {
    #[error("failed to draw marginal costs")]
    Costs(#[from] CostError),

    /// The Newton solve on the active-firm system failed. The source error
    /// carries the last iterate when the cause is non-convergence.
    #[error("equilibrium search failed with {active} active firms")]
    Solver {
        active: usize,
        #[source]
        source: newton::Error,
    },
}

/// A Cournot-Nash equilibrium, indexed by original firm position.
///
/// Firms removed for producing a negative quantity hold quantity 0 and
/// profit 0; `active` counts the firms that remained in the final solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Equilibrium {
    pub quantities: Vec<f64>,
    pub profits: Vec<f64>,
    pub active: usize,
}

/// Solves the N-firm quantity game by iterative elimination.
///
/// Each round runs Newton from the zero vector on the first-order
/// conditions of the firms still in the game. If every solved quantity is
/// non-negative the equilibrium is found; otherwise all firms with a
/// negative quantity are removed at once and the reduced game is re-solved.
/// Removal is permanent: a removed firm is fixed at quantity 0 and profit 0
/// for every later round. An empty active set is an all-zero equilibrium.
///
/// # Errors
///
/// Returns an error if the cost draw fails or a Newton solve fails; solver
/// non-convergence is surfaced, never swallowed.
pub fn solve_equilibrium(
    n: usize,
    market: Market,
    cost_model: &CostModel,
    config: &newton::Config,
) -> Result<Equilibrium, EquilibriumError> {
    let costs = cost_model.draw(n)?;

    let mut active: Vec<usize> = (0..n).collect();
    let solved = loop {
        if active.is_empty() {
            break DVector::zeros(0);
        }

        let active_costs: Vec<f64> = active.iter().map(|&i| costs[i]).collect();
        let system = BestResponseSystem {
            market,
            costs: &active_costs,
        };

        let solution = newton::solve_unobserved(&system, DVector::zeros(active.len()), config)
            .map_err(|source| EquilibriumError::Solver {
                active: active.len(),
                source,
            })?;

        if solution.x.iter().all(|&q| q >= 0.0) {
            break solution.x;
        }

        // Drop every infeasible firm in the same round.
        active = active
            .iter()
            .zip(solution.x.iter())
            .filter(|&(_, &q)| q >= 0.0)
            .map(|(&i, _)| i)
            .collect();
    };

    let total: f64 = solved.iter().sum();
    let mut quantities = vec![0.0; n];
    let mut profits = vec![0.0; n];
    for (slot, &firm) in active.iter().enumerate() {
        let q = solved[slot];
        quantities[firm] = q;
        profits[firm] = market.profit(q, total - q, costs[firm]);
    }

    Ok(Equilibrium {
        quantities,
        profits,
        active: active.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn market() -> Market {
        Market {
            intercept: 10.0,
            slope: 1.0,
        }
    }

    #[test]
    fn symmetric_firms_split_the_market() {
        let eq = solve_equilibrium(
            3,
            market(),
            &CostModel::Constant(1.0),
            &newton::Config::default(),
        )
        .expect("equilibrium");

        // With n equal-cost firms each produces (a - c) / (s * (n + 1)).
        assert_eq!(eq.active, 3);
        for &q in &eq.quantities {
            assert_relative_eq!(q, 2.25, epsilon = 1e-8);
        }
        for &pi in &eq.profits {
            assert_relative_eq!(pi, 5.0625, epsilon = 1e-8);
        }
    }

    #[test]
    fn high_cost_firm_is_removed() {
        let eq = solve_equilibrium(
            3,
            market(),
            &CostModel::Explicit(vec![1.0, 1.0, 11.0]),
            &newton::Config::default(),
        )
        .expect("equilibrium");

        // The interior solution gives the third firm a negative quantity,
        // so it exits and the remaining duopoly produces 3 each.
        assert_eq!(eq.active, 2);
        assert_relative_eq!(eq.quantities[0], 3.0, epsilon = 1e-8);
        assert_relative_eq!(eq.quantities[1], 3.0, epsilon = 1e-8);
        assert_relative_eq!(eq.quantities[2], 0.0);
        assert_relative_eq!(eq.profits[0], 9.0, epsilon = 1e-8);
        assert_relative_eq!(eq.profits[2], 0.0);
    }

    #[test]
    fn unprofitable_market_empties() {
        let eq = solve_equilibrium(
            3,
            Market {
                intercept: 1.0,
                slope: 1.0,
            },
            &CostModel::Constant(5.0),
            &newton::Config::default(),
        )
        .expect("equilibrium");

        assert_eq!(eq.active, 0);
        assert!(eq.quantities.iter().all(|&q| q == 0.0));
        assert!(eq.profits.iter().all(|&pi| pi == 0.0));
    }

    #[test]
    fn zero_firms_is_an_empty_equilibrium() {
        let eq = solve_equilibrium(
            0,
            market(),
            &CostModel::Constant(1.0),
            &newton::Config::default(),
        )
        .expect("equilibrium");

        assert_eq!(eq.active, 0);
        assert!(eq.quantities.is_empty());
        assert!(eq.profits.is_empty());
    }

    #[test]
    fn random_markets_satisfy_equilibrium_conditions() {
        // Property check over a handful of seeded random markets: all
        // quantities are non-negative and every active firm's first-order
        // condition holds at the solution.
        for seed in 0..10 {
            let cost_model = CostModel::LogNormal {
                location: 0.0,
                scale: 0.6,
                seed,
            };
            let n = 5 + (seed as usize % 4) * 5;

            let eq = solve_equilibrium(n, market(), &cost_model, &newton::Config::default())
                .expect("equilibrium");
            let costs = cost_model.draw(n).expect("costs");

            assert!(eq.quantities.iter().all(|&q| q >= 0.0));

            let total: f64 = eq.quantities.iter().sum();
            for i in 0..n {
                let q = eq.quantities[i];
                if q > 0.0 {
                    let foc = market().marginal_profit(q, total - q, costs[i]);
                    assert!(foc.abs() < 1e-7, "firm {i} FOC residual {foc}");
                    assert!(eq.profits[i] > 0.0);
                } else {
                    assert_relative_eq!(eq.profits[i], 0.0);
                }
            }
        }
    }

    #[test]
    fn cost_errors_propagate() {
        let result = solve_equilibrium(
            3,
            market(),
            &CostModel::Explicit(vec![1.0]),
            &newton::Config::default(),
        );

        assert!(matches!(result, Err(EquilibriumError::Costs(_))));
    }
}
