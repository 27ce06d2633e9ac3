use agora_models::interpolation::{
    Point, QuadrantNeighbors, Sample, TriangleUsed, locate_and_interpolate,
};
use agora_plot::PlotApp;

fn main() {
    let sample = Sample::generate(2024, 50);
    let f = |p: Point| p.x * p.y;

    let result = locate_and_interpolate(&sample.cloud, sample.query, f)
        .expect("quadrant points should not be collinear");

    match result.triangle {
        TriangleUsed::Abc => println!("query lies in triangle ABC"),
        TriangleUsed::Cda => println!("query lies in triangle CDA"),
        TriangleUsed::None => println!("query lies in neither triangle"),
    }
    if let Some(coords) = result.coords {
        println!(
            "barycentric coordinates: ({:.4}, {:.4}, {:.4})",
            coords.r1, coords.r2, coords.r3
        );
    }
    println!("approximation: {:.6}", result.approx);
    println!("true value:    {:.6}", result.true_value);
    println!("difference:    {:.6}", (result.approx - result.true_value).abs());

    let cloud: Vec<[f64; 2]> = sample.cloud.iter().map(|p| [p.x, p.y]).collect();
    let neighbors = QuadrantNeighbors::find(&sample.cloud, sample.query);

    let mut app = PlotApp::new()
        .add_scatter("cloud", &cloud)
        .add_scatter("query", &[[sample.query.x, sample.query.y]]);

    if let (Some(a), Some(b), Some(c)) = (neighbors.a, neighbors.b, neighbors.c) {
        app = app.add_line(
            "triangle ABC",
            &[[a.x, a.y], [b.x, b.y], [c.x, c.y], [a.x, a.y]],
        );
    }
    if let (Some(c), Some(d), Some(a)) = (neighbors.c, neighbors.d, neighbors.a) {
        app = app.add_line(
            "triangle CDA",
            &[[c.x, c.y], [d.x, d.y], [a.x, a.y], [c.x, c.y]],
        );
    }

    app.run("Nearest-quadrant triangulation").expect("plot window");
}
