//! Geometric primitives for plot data.
//!
//! Provides the point and polyline types produced by the sampler and
//! consumed by the command normalizer.

use crate::error::{Error, Result};

/// A 2D point with double-precision coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate clockwise around the origin by `radians`.
    #[must_use]
    pub fn rotated_clockwise(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos * self.x + sin * self.y, -sin * self.x + cos * self.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered sequence of points with strictly increasing `x`.
///
/// `y` values may be non-finite: a sampled function that blows up leaves
/// its NaN/infinite values in place so the consumer can draw a gap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Build a polyline, checking that abscissas strictly increase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if an `x` is NaN or the
    /// abscissas are not strictly increasing.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.iter().any(|p| p.x.is_nan()) {
            return Err(Error::invalid("Polyline abscissas cannot be NaN"));
        }
        if !points.windows(2).all(|w| w[0].x < w[1].x) {
            return Err(Error::invalid("Polyline abscissas must be strictly increasing"));
        }
        Ok(Self { points })
    }

    /// Wrap points already known to be ordered.
    pub(crate) fn from_sorted(points: Vec<Point>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].x < w[1].x));
        Self { points }
    }

    /// The points, in ascending `x`.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point.
    #[must_use]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last point.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// X values.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Y values.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Split into separate x and y sequences, as backends expect them.
    #[must_use]
    pub fn into_xy(self) -> (Vec<f64>, Vec<f64>) {
        self.points.into_iter().map(|p| (p.x, p.y)).unzip()
    }

    /// Drop points with a non-finite coordinate.
    pub fn retain_finite(&mut self) {
        self.points.retain(|p| p.is_finite());
    }

    /// Number of points whose `x` lies in `[lo, hi]`.
    #[must_use]
    pub fn count_in(&self, lo: f64, hi: f64) -> usize {
        self.points.iter().filter(|p| p.x >= lo && p.x <= hi).count()
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
