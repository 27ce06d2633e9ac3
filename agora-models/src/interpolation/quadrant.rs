use super::Point;

/// An open quadrant around a query point, strict on both coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Quadrant {
    /// True if `point` lies strictly inside this quadrant of `origin`.
    #[must_use]
    pub fn contains(self, origin: Point, point: Point) -> bool {
        match self {
            Self::NorthEast => point.x > origin.x && point.y > origin.y,
            Self::SouthEast => point.x > origin.x && point.y < origin.y,
            Self::SouthWest => point.x < origin.x && point.y < origin.y,
            Self::NorthWest => point.x < origin.x && point.y > origin.y,
        }
    }

    /// The cloud point in this quadrant closest to `origin`, or `None` if
    /// the quadrant is empty.
    #[must_use]
    pub fn nearest(self, cloud: &[Point], origin: Point) -> Option<Point> {
        cloud
            .iter()
            .copied()
            .filter(|&p| self.contains(origin, p))
            .min_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)))
    }
}

/// The nearest cloud point in each quadrant around a query point, labeled
/// A through D clockwise from the north-east. Empty quadrants stay
/// `None`; absence is propagated, never replaced by a placeholder point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantNeighbors {
    /// Nearest point north-east of the query.
    pub a: Option<Point>,
    /// Nearest point south-east of the query.
    pub b: Option<Point>,
    /// Nearest point south-west of the query.
    pub c: Option<Point>,
    /// Nearest point north-west of the query.
    pub d: Option<Point>,
}

impl QuadrantNeighbors {
    /// Runs the nearest-neighbor search in all four quadrants.
    #[must_use]
    pub fn find(cloud: &[Point], query: Point) -> Self {
        Self {
            a: Quadrant::NorthEast.nearest(cloud, query),
            b: Quadrant::SouthEast.nearest(cloud, query),
            c: Quadrant::SouthWest.nearest(cloud, query),
            d: Quadrant::NorthWest.nearest(cloud, query),
        }
    }
}
