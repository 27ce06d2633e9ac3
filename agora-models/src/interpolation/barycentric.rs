use thiserror::Error;

use super::Point;

/// Errors that can occur in the barycentric computation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The triangle's vertices are collinear or coincident, so the shared
    /// denominator of the barycentric formula vanishes.
    #[error("degenerate triangle: twice the signed area is zero")]
    DegenerateTriangle,
}

/// A triangle given by three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Triangle {
    #[must_use]
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self { p1, p2, p3 }
    }

    /// Twice the signed area: the shared denominator of both coordinate
    /// ratios.
    fn denominator(&self) -> f64 {
        (self.p2.y - self.p3.y) * (self.p1.x - self.p3.x)
            + (self.p3.x - self.p2.x) * (self.p1.y - self.p3.y)
    }

    /// Barycentric coordinates of `point` relative to this triangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertices are collinear; the division is
    /// never performed silently on a vanishing denominator.
    pub fn barycentric(&self, point: Point) -> Result<Barycentric, GeometryError> {
        let denominator = self.denominator();
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(GeometryError::DegenerateTriangle);
        }

        let r1 = ((self.p2.y - self.p3.y) * (point.x - self.p3.x)
            + (self.p3.x - self.p2.x) * (point.y - self.p3.y))
            / denominator;
        let r2 = ((self.p3.y - self.p1.y) * (point.x - self.p3.x)
            + (self.p1.x - self.p3.x) * (point.y - self.p3.y))
            / denominator;

        Ok(Barycentric {
            r1,
            r2,
            r3: 1.0 - r1 - r2,
        })
    }

    /// The affine combination of the vertices under the given coordinates.
    #[must_use]
    pub fn combine(&self, coords: Barycentric) -> Point {
        Point::new(
            coords.r1 * self.p1.x + coords.r2 * self.p2.x + coords.r3 * self.p3.x,
            coords.r1 * self.p1.y + coords.r2 * self.p2.y + coords.r3 * self.p3.y,
        )
    }
}

/// Barycentric coordinates, summing to one by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
}

impl Barycentric {
    /// True if the coordinates describe a point inside the triangle,
    /// boundary inclusive.
    #[must_use]
    pub fn contains(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.r1) && unit.contains(&self.r2) && unit.contains(&self.r3)
    }

    /// Interpolates a function from its values at the three vertices.
    #[must_use]
    pub fn interpolate(&self, f1: f64, f2: f64, f3: f64) -> f64 {
        self.r1 * f1 + self.r2 * f2 + self.r3 * f3
    }
}
