//! Closed horizontal polygons with boundary-inclusive containment.

use serde::Serialize;
use thiserror::Error;

use super::Position;

/// Tolerance (degrees²) for treating a point as lying on a polygon edge.
const EDGE_EPSILON: f64 = 1e-10;

/// Errors raised while building a polygon.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolygonError {
    /// Fewer than three distinct vertices.
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    Degenerate(usize),

    /// A vertex is NaN, infinite or outside WGS84 range.
    #[error("invalid vertex {index}: {position}")]
    InvalidVertex { index: usize, position: Position },
}

/// A closed ring of positions (first vertex equals last).
///
/// Construction validates the ring, so a `Polygon` always has at least three
/// distinct vertices and containment never has to deal with degenerate input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    ring: Vec<Position>,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl Polygon {
    /// Build a polygon from its vertices.
    ///
    /// The ring is closed automatically when the last vertex differs from the
    /// first one.
    pub fn new(vertices: Vec<Position>) -> Result<Self, PolygonError> {
        for (index, position) in vertices.iter().enumerate() {
            if !position.is_valid() {
                return Err(PolygonError::InvalidVertex {
                    index,
                    position: *position,
                });
            }
        }

        let mut ring = vertices;
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }

        let distinct = count_distinct(&ring[..ring.len().saturating_sub(1)]);
        if distinct < 3 {
            return Err(PolygonError::Degenerate(distinct));
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &ring {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lon = min_lon.min(p.longitude);
            max_lon = max_lon.max(p.longitude);
        }

        Ok(Self {
            ring,
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    /// The closed ring, first vertex repeated at the end.
    pub fn vertices(&self) -> &[Position] {
        &self.ring
    }

    /// Number of edges in the ring.
    pub fn edge_count(&self) -> usize {
        self.ring.len() - 1
    }

    /// Whether the position lies inside the polygon or on its boundary.
    pub fn contains(&self, position: Position) -> bool {
        let (x, y) = (position.longitude, position.latitude);

        if x < self.min_lon || x > self.max_lon || y < self.min_lat || y > self.max_lat {
            return false;
        }

        if self.on_boundary(position) {
            return true;
        }

        // Ray casting towards +x
        let mut inside = false;
        for edge in self.ring.windows(2) {
            let (xi, yi) = (edge[0].longitude, edge[0].latitude);
            let (xj, yj) = (edge[1].longitude, edge[1].latitude);

            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
        }
        inside
    }

    /// Whether the position lies on one of the polygon's edges or vertices.
    pub fn on_boundary(&self, position: Position) -> bool {
        self.ring
            .windows(2)
            .any(|edge| on_segment(edge[0], edge[1], position))
    }
}

fn on_segment(a: Position, b: Position, p: Position) -> bool {
    let (ax, ay) = (a.longitude, a.latitude);
    let (bx, by) = (b.longitude, b.latitude);
    let (px, py) = (p.longitude, p.latitude);

    let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }

    px >= ax.min(bx) - EDGE_EPSILON
        && px <= ax.max(bx) + EDGE_EPSILON
        && py >= ay.min(by) - EDGE_EPSILON
        && py <= ay.max(by) + EDGE_EPSILON
}

fn count_distinct(points: &[Position]) -> usize {
    let mut seen: Vec<Position> = Vec::with_capacity(points.len());
    for p in points {
        if !seen.contains(p) {
            seen.push(*p);
        }
    }
    seen.len()
}
