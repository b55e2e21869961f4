//! Boundary working set used while drawing a project's survey area.
//!
//! # Responsibility
//! - Accumulate an ordered list of validated polygon vertices.
//! - Decide how a vertex list may be rendered (markers vs. closed polygon).
//!
//! # Invariants
//! - Insertion order is vertex order; no deduplication or reordering.
//! - Free functions never mutate their input slice; they return a new sequence.
//! - A sequence is a closed polygon only when it holds at least
//!   `MIN_POLYGON_POINTS` vertices.

use crate::geo::coordinate::{validate_coordinate, Coordinate, CoordinateError};

/// Minimum vertex count for a boundary to render as a closed polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// How a boundary sequence can be drawn by a map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryShape {
    /// No vertices yet.
    Empty,
    /// One or two vertices, drawn as unconnected markers.
    Markers(usize),
    /// Three or more vertices, drawn as a closed polygon.
    Polygon(usize),
}

impl BoundaryShape {
    pub fn of(points: &[Coordinate]) -> Self {
        match points.len() {
            0 => Self::Empty,
            n if n < MIN_POLYGON_POINTS => Self::Markers(n),
            n => Self::Polygon(n),
        }
    }

    pub fn is_polygon(self) -> bool {
        matches!(self, Self::Polygon(_))
    }

    pub fn point_count(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Markers(n) | Self::Polygon(n) => n,
        }
    }
}

/// Returns whether `points` is renderable as a closed polygon.
pub fn is_polygon(points: &[Coordinate]) -> bool {
    BoundaryShape::of(points).is_polygon()
}

/// Validates textual input and returns `points` with the new vertex appended.
pub fn add_point(
    points: &[Coordinate],
    lat: &str,
    lng: &str,
) -> Result<Vec<Coordinate>, CoordinateError> {
    let coordinate = validate_coordinate(lat, lng)?;
    Ok(push_point(points, coordinate))
}

/// Returns `points` with an already-validated vertex appended.
pub fn push_point(points: &[Coordinate], coordinate: Coordinate) -> Vec<Coordinate> {
    let mut next = Vec::with_capacity(points.len() + 1);
    next.extend_from_slice(points);
    next.push(coordinate);
    next
}

/// Returns `points` without the vertex at `index`.
///
/// An out-of-range index yields an unchanged copy.
pub fn remove_point(points: &[Coordinate], index: usize) -> Vec<Coordinate> {
    points
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, point)| *point)
        .collect()
}

/// Per-form boundary working set.
///
/// Committed into a project only when the surrounding form is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryEditor {
    points: Vec<Coordinate>,
}

impl BoundaryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing vertex list, e.g. a project's saved boundary.
    pub fn from_points(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Appends a vertex from typed input.
    ///
    /// On error the working set is left unchanged.
    pub fn add_point(&mut self, lat: &str, lng: &str) -> Result<Coordinate, CoordinateError> {
        let coordinate = validate_coordinate(lat, lng)?;
        self.points.push(coordinate);
        Ok(coordinate)
    }

    /// Appends a vertex coming from a map click.
    pub fn add_clicked_point(&mut self, lat: f64, lng: f64) -> Result<Coordinate, CoordinateError> {
        let coordinate = Coordinate::new(lat, lng)?;
        self.points.push(coordinate);
        Ok(coordinate)
    }

    /// Removes the vertex at `index`; returns it when the index was in range.
    pub fn remove_point(&mut self, index: usize) -> Option<Coordinate> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn shape(&self) -> BoundaryShape {
        BoundaryShape::of(&self.points)
    }

    /// Vertices as `[lat, lng]` pairs, in drawing order.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|point| point.to_pair()).collect()
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}
