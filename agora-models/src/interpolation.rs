//! Barycentric nearest-quadrant interpolation over a random point cloud.
//!
//! Around a query point, the nearest cloud point is located in each of the
//! four open quadrants (A north-east, B south-east, C south-west, D
//! north-west). Triangles ABC and CDA are the two candidate containers;
//! whichever holds the query supplies barycentric weights for
//! interpolating a sample function. If a quadrant is empty or the query
//! escapes both triangles, no interpolation is attempted.

mod barycentric;
mod point;
mod quadrant;

pub use barycentric::{Barycentric, GeometryError, Triangle};
pub use point::Point;
pub use quadrant::{Quadrant, QuadrantNeighbors};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A uniform point cloud on the unit square and an off-cloud query point,
/// drawn from one seeded generator (cloud first, then the query).
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub cloud: Vec<Point>,
    pub query: Point,
}

impl Sample {
    #[must_use]
    pub fn generate(seed: u64, size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cloud = (0..size)
            .map(|_| Point::new(rng.random(), rng.random()))
            .collect();
        let query = Point::new(rng.random(), rng.random());
        Self { cloud, query }
    }
}

/// Which candidate triangle contained the query point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleUsed {
    Abc,
    Cda,
    None,
}

/// The outcome of locating and interpolating a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    /// Triangle that contained the query, if any.
    pub triangle: TriangleUsed,
    /// Barycentric coordinates within that triangle.
    pub coords: Option<Barycentric>,
    /// Barycentric-weighted approximation of `f` at the query, or NaN when
    /// no triangle applies.
    pub approx: f64,
    /// `f` evaluated directly at the query.
    pub true_value: f64,
}

/// Locates the query among the two candidate triangles and interpolates
/// `f` from the containing one.
///
/// Triangle ABC is tested first and preferred if the query sits on a
/// boundary shared with CDA. A missing quadrant point disables the
/// triangles it defines; if neither triangle applies the result reports
/// [`TriangleUsed::None`] with a NaN approximation rather than guessing.
///
/// # Errors
///
/// Returns an error if a candidate triangle is degenerate.
pub fn locate_and_interpolate<F>(
    cloud: &[Point],
    query: Point,
    f: F,
) -> Result<Interpolation, GeometryError>
where
    F: Fn(Point) -> f64,
{
    let neighbors = QuadrantNeighbors::find(cloud, query);
    let true_value = f(query);

    if let (Some(a), Some(b), Some(c)) = (neighbors.a, neighbors.b, neighbors.c) {
        let triangle = Triangle::new(a, b, c);
        let coords = triangle.barycentric(query)?;
        if coords.contains() {
            return Ok(Interpolation {
                triangle: TriangleUsed::Abc,
                coords: Some(coords),
                approx: coords.interpolate(f(a), f(b), f(c)),
                true_value,
            });
        }
    }

    if let (Some(c), Some(d), Some(a)) = (neighbors.c, neighbors.d, neighbors.a) {
        let triangle = Triangle::new(c, d, a);
        let coords = triangle.barycentric(query)?;
        if coords.contains() {
            return Ok(Interpolation {
                triangle: TriangleUsed::Cda,
                coords: Some(coords),
                approx: coords.interpolate(f(c), f(d), f(a)),
                true_value,
            });
        }
    }

    Ok(Interpolation {
        triangle: TriangleUsed::None,
        coords: None,
        approx: f64::NAN,
        true_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn product(p: Point) -> f64 {
        p.x * p.y
    }

    /// One nearest point per quadrant, query inside triangle ABC.
    fn square_cloud() -> Vec<Point> {
        vec![
            Point::new(1.0, 1.0),   // A
            Point::new(1.0, -1.0),  // B
            Point::new(-1.0, -1.0), // C
            Point::new(-1.0, 1.0),  // D
        ]
    }

    #[test]
    fn sampling_is_deterministic_and_in_the_unit_square() {
        let first = Sample::generate(2024, 50);
        let second = Sample::generate(2024, 50);

        assert_eq!(first, second);
        assert_eq!(first.cloud.len(), 50);
        assert!(
            first
                .cloud
                .iter()
                .chain(std::iter::once(&first.query))
                .all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y))
        );
    }

    #[test]
    fn interior_query_lands_in_abc() {
        let cloud = square_cloud();
        let query = Point::new(0.3, 0.0);

        let result = locate_and_interpolate(&cloud, query, product).expect("interpolation");

        assert_eq!(result.triangle, TriangleUsed::Abc);
        let coords = result.coords.expect("coords");
        assert!(coords.contains());
        // r = (0.5, 0.15, 0.35) against f values (1, -1, 1).
        assert_relative_eq!(result.approx, 0.7, epsilon = 1e-12);
        assert_relative_eq!(result.true_value, 0.0);
    }

    #[test]
    fn mirrored_query_lands_in_cda() {
        let cloud = square_cloud();
        let query = Point::new(-0.3, 0.0);

        let result = locate_and_interpolate(&cloud, query, product).expect("interpolation");

        assert_eq!(result.triangle, TriangleUsed::Cda);
        assert!(result.coords.expect("coords").contains());
    }

    #[test]
    fn shared_boundary_prefers_abc() {
        let cloud = square_cloud();
        // The origin sits on the diagonal shared by both triangles.
        let query = Point::new(0.0, 0.0);

        let result = locate_and_interpolate(&cloud, query, product).expect("interpolation");

        assert_eq!(result.triangle, TriangleUsed::Abc);
    }

    #[test]
    fn missing_quadrant_point_disables_interpolation() {
        // Every cloud point is north-east of the query.
        let cloud = [Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let query = Point::new(0.0, 0.0);

        let result = locate_and_interpolate(&cloud, query, product).expect("interpolation");

        assert_eq!(result.triangle, TriangleUsed::None);
        assert!(result.coords.is_none());
        assert!(result.approx.is_nan());
        assert_relative_eq!(result.true_value, 0.0);
    }

    #[test]
    fn seeded_scenario_matches_invariants() {
        let sample = Sample::generate(2024, 50);

        let result =
            locate_and_interpolate(&sample.cloud, sample.query, product).expect("interpolation");

        assert_relative_eq!(result.true_value, product(sample.query));
        match result.triangle {
            TriangleUsed::None => {
                assert!(result.coords.is_none());
                assert!(result.approx.is_nan());
            }
            _ => {
                let coords = result.coords.expect("coords");
                assert!(coords.contains());
                assert_relative_eq!(
                    coords.r1 + coords.r2 + coords.r3,
                    1.0,
                    epsilon = 1e-12
                );
                assert!(result.approx.is_finite());
            }
        }
    }

    /// Re-run of the search after moving the query: the quadrant points
    /// must be recomputed from scratch, not reused.
    #[test]
    fn moving_the_query_changes_the_neighbors() {
        let sample = Sample::generate(2024, 50);

        let near_origin = QuadrantNeighbors::find(&sample.cloud, Point::new(0.1, 0.1));
        let near_center = QuadrantNeighbors::find(&sample.cloud, Point::new(0.5, 0.5));

        assert_ne!(near_origin, near_center);
    }
}
