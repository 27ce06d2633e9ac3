use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoint, Points};

/// A runnable egui application for plotting model output.
///
/// Line series suit response curves and paths; scatter series suit point
/// clouds and solved allocations.
#[derive(Default)]
pub struct PlotApp {
    series: Vec<Series>,
}

enum Kind {
    Line,
    Scatter,
}

struct Series {
    name: String,
    kind: Kind,
    points: Vec<PlotPoint>,
}

impl PlotApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line series connecting the given points in order.
    #[must_use]
    pub fn add_line(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.series.push(Series {
            name: name.to_string(),
            kind: Kind::Line,
            points: points.iter().copied().map(Into::into).collect(),
        });

        self
    }

    /// Adds a scatter series drawn as markers.
    #[must_use]
    pub fn add_scatter(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.series.push(Series {
            name: name.to_string(),
            kind: Kind::Scatter,
            points: points.iter().copied().map(Into::into).collect(),
        });

        self
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn run(self, name: &str) -> Result<(), eframe::Error> {
        eframe::run_native(
            name,
            eframe::NativeOptions::default(),
            Box::new(|_cc| Ok(Box::new(self))),
        )
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("plot-id")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    for series in &self.series {
                        let points = series.points.as_slice();
                        let name = &series.name;

                        match series.kind {
                            Kind::Line => plot_ui.line(Line::new(points).name(name)),
                            Kind::Scatter => {
                                plot_ui.points(Points::new(points).name(name).radius(3.0));
                            }
                        }
                    }
                });
        });
    }
}
