use agora_models::cournot::{CostModel, Market, solve_equilibrium};
use agora_plot::PlotApp;
use agora_solve::newton;

fn main() {
    let market = Market {
        intercept: 10.0,
        slope: 1.0,
    };
    let cost_model = CostModel::LogNormal {
        location: 0.0,
        scale: 0.4,
        seed: 2024,
    };
    let n = 12;

    let equilibrium = solve_equilibrium(n, market, &cost_model, &newton::Config::default())
        .expect("equilibrium should exist for this market");
    let costs = cost_model.draw(n).expect("cost draw");

    println!("firm  cost    quantity  profit");
    for i in 0..n {
        println!(
            "{i:>4}  {:<6.3}  {:<8.4}  {:<8.4}",
            costs[i], equilibrium.quantities[i], equilibrium.profits[i]
        );
    }
    println!(
        "{} of {n} firms active, total output {:.4}",
        equilibrium.active,
        equilibrium.quantities.iter().sum::<f64>()
    );

    let cost_vs_quantity: Vec<[f64; 2]> = costs
        .iter()
        .zip(&equilibrium.quantities)
        .map(|(&cost, &quantity)| [cost, quantity])
        .collect();

    PlotApp::new()
        .add_scatter("equilibrium quantity by cost", &cost_vs_quantity)
        .run("Cournot equilibrium")
        .expect("plot window");
}
