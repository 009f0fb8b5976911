//! Adaptive function sampling.
//!
//! Turns a continuous function over an interval into a [`Polyline`] whose
//! segments deviate from the function by at most a tolerance at their
//! midpoints. Flat regions keep few points; curved regions are subdivided
//! until the tolerance or the depth bound is met.
//!
//! # Algorithm
//!
//! Each segment `[lo, hi]` is tested at its midpoint with the linear
//! interpolation error `|f(mid) - (f(lo) + f(hi)) / 2|`. Segments above the
//! tolerance are split in two. The subdivision runs on an explicit stack of
//! `(lo, hi, depth)` frames, left half on top, so points come out in
//! ascending `x` and every abscissa is evaluated once.
//!
//! A non-finite value at any of the three points counts as an unbounded
//! error: the segment keeps splitting until the depth bound and is then
//! accepted with the non-finite value in place.
//!
//! # Example
//!
//! ```rust
//! use replot::sampling::{sample, Interval};
//!
//! let line = sample(f64::sin, Interval::new(0.0, 3.0).unwrap(), 1e-3).unwrap();
//! assert_eq!(line.first().unwrap().x, 0.0);
//! assert_eq!(line.last().unwrap().x, 3.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::{Point, Polyline};

/// Default midpoint tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Default subdivision depth bound.
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Largest accepted depth bound (at most `2^25 + 1` points).
pub const MAX_DEPTH_LIMIT: u32 = 24;

// ============================================================================
// Interval
// ============================================================================

/// A finite sampling interval with `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Create a new interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if a bound is not finite or
    /// `lo >= hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(Error::InvalidInterval { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound.
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Length of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = Error;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self> {
        Self::new(lo, hi)
    }
}

// ============================================================================
// Sampler
// ============================================================================

/// What to do with points where the function is NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonFinitePolicy {
    /// Keep the points; consumers draw gaps.
    #[default]
    Keep,
    /// Remove the points from the polyline.
    Drop,
}

/// Configurable adaptive sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveSampler {
    tolerance: f64,
    max_depth: u32,
    non_finite: NonFinitePolicy,
}

impl Default for AdaptiveSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending segment on the subdivision stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    lo: Point,
    hi: Point,
    depth: u32,
}

impl AdaptiveSampler {
    /// Create a sampler with the default tolerance and depth bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_depth: DEFAULT_MAX_DEPTH,
            non_finite: NonFinitePolicy::Keep,
        }
    }

    /// Set the midpoint error tolerance.
    ///
    /// Zero is accepted: segments are then split until their error is
    /// within floating-point rounding of the values involved.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the subdivision depth bound.
    #[must_use]
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the policy for non-finite function values.
    #[must_use]
    pub fn non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Validate the sampler parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the tolerance is negative or
    /// NaN, or the depth bound exceeds [`MAX_DEPTH_LIMIT`].
    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "Tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::InvalidParameter(format!(
                "Maximum depth {} exceeds limit {MAX_DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Sample `f` over `interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler parameters are invalid.
    pub fn sample<F>(&self, f: F, interval: Interval) -> Result<Polyline>
    where
        F: Fn(f64) -> f64,
    {
        self.validate()?;

        let lo = Point::new(interval.lo, f(interval.lo));
        let hi = Point::new(interval.hi, f(interval.hi));
        let mut evaluations = 2usize;
        let mut deepest = 0u32;

        let mut points = vec![lo];
        let mut stack = vec![Frame { lo, hi, depth: 0 }];

        while let Some(frame) = stack.pop() {
            let mid_x = midpoint(frame.lo.x, frame.hi.x);
            // No representable abscissa between the bounds.
            if mid_x <= frame.lo.x || mid_x >= frame.hi.x {
                push_ascending(&mut points, frame.hi);
                continue;
            }

            let mid = Point::new(mid_x, f(mid_x));
            evaluations += 1;
            deepest = deepest.max(frame.depth);

            let err = midpoint_error(frame.lo.y, mid.y, frame.hi.y);
            let threshold = self.tolerance.max(rounding_floor(frame.lo.y, mid.y, frame.hi.y));
            if err > threshold && frame.depth < self.max_depth {
                trace!(lo = frame.lo.x, hi = frame.hi.x, depth = frame.depth, err, "subdividing");
                stack.push(Frame { lo: mid, hi: frame.hi, depth: frame.depth + 1 });
                stack.push(Frame { lo: frame.lo, hi: mid, depth: frame.depth + 1 });
            } else {
                push_ascending(&mut points, mid);
                push_ascending(&mut points, frame.hi);
            }
        }

        let mut line = Polyline::from_sorted(points);
        if self.non_finite == NonFinitePolicy::Drop {
            line.retain_finite();
        }

        debug!(
            lo = interval.lo,
            hi = interval.hi,
            tolerance = self.tolerance,
            evaluations,
            depth = deepest,
            points = line.len(),
            "sampled function"
        );
        Ok(line)
    }
}

/// Midpoint of `[a, b]` without overflowing near `f64::MAX`.
fn midpoint(a: f64, b: f64) -> f64 {
    0.5 * a + 0.5 * b
}

/// Linear interpolation error at the midpoint; infinite when any value is
/// not finite.
fn midpoint_error(y_lo: f64, y_mid: f64, y_hi: f64) -> f64 {
    if !(y_lo.is_finite() && y_mid.is_finite() && y_hi.is_finite()) {
        return f64::INFINITY;
    }
    (y_mid - midpoint(y_lo, y_hi)).abs()
}

/// Smallest error distinguishable from evaluation rounding, so a zero
/// tolerance still accepts straight segments.
fn rounding_floor(y_lo: f64, y_mid: f64, y_hi: f64) -> f64 {
    let scale = y_lo.abs().max(y_mid.abs()).max(y_hi.abs());
    if scale.is_finite() {
        8.0 * f64::EPSILON * scale
    } else {
        0.0
    }
}

fn push_ascending(points: &mut Vec<Point>, p: Point) {
    if points.last().map_or(true, |last| p.x > last.x) {
        points.push(p);
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Sample `f` over `interval` with the given tolerance and the default
/// depth bound.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for a negative or NaN tolerance.
pub fn sample<F>(f: F, interval: Interval, tolerance: f64) -> Result<Polyline>
where
    F: Fn(f64) -> f64,
{
    AdaptiveSampler::new().tolerance(tolerance).sample(f, interval)
}

/// Evaluate `f` at caller-chosen abscissas, without adaptivity.
#[must_use]
pub fn evaluate<F>(f: F, xs: &[f64]) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    xs.iter().map(|&x| f(x)).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> Interval {
        Interval::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_interval_rejects_empty() {
        assert!(matches!(
            Interval::new(1.0, 1.0),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_interval_rejects_reversed() {
        assert!(Interval::new(2.0, 1.0).is_err());
    }

    #[test]
    fn test_interval_rejects_non_finite() {
        assert!(Interval::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(Interval::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_interval_try_from() {
        let interval = Interval::try_from((-1.0, 2.0)).unwrap();
        assert_relative_eq!(interval.width(), 3.0);
    }

    #[test]
    fn test_linear_function_keeps_seed_points() {
        let line = sample(|x| 2.0 * x + 1.0, unit(), 1e-9).unwrap();
        assert_eq!(line.xs(), vec![0.0, 0.5, 1.0]);
        assert_eq!(line.ys(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_linear_function_zero_tolerance() {
        // Coefficients that do not round exactly in binary.
        let interval = Interval::new(0.1, 0.7).unwrap();
        let line = sample(|x| 3.0 * x + 0.1, interval, 0.0).unwrap();
        assert_eq!(line.len(), 3);

        let interval = Interval::new(-3.3, 12.9).unwrap();
        let line = sample(|x| -0.7 * x + 5.3, interval, 0.0).unwrap();
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_huge_bounds_split_at_midpoint() {
        let interval = Interval::new(1e308, 1.7e308).unwrap();
        let line = sample(|x| x, interval, 1e-3).unwrap();
        assert_eq!(line.len(), 3);
        let mid = line.points()[1].x;
        assert!(mid.is_finite());
        assert_relative_eq!(mid, 1.35e308, max_relative = 1e-12);

        let interval = Interval::new(-f64::MAX, f64::MAX).unwrap();
        let line = sample(|_| 1.0, interval, 0.0).unwrap();
        assert_eq!(line.xs(), vec![-f64::MAX, 0.0, f64::MAX]);
    }

    #[test]
    fn test_constant_function_keeps_seed_points() {
        let line = sample(|_| 4.0, Interval::new(-10.0, 10.0).unwrap(), 0.0).unwrap();
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_endpoints_are_exact() {
        let interval = Interval::new(-2.5, 7.25).unwrap();
        let line = sample(f64::sin, interval, 1e-4).unwrap();
        assert_eq!(line.first().unwrap().x, -2.5);
        assert_eq!(line.last().unwrap().x, 7.25);
    }

    #[test]
    fn test_abscissas_strictly_increase() {
        let line = sample(|x| (20.0 * x).sin(), Interval::new(0.0, 5.0).unwrap(), 1e-4).unwrap();
        assert!(line.points().windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_accepted_segments_meet_tolerance() {
        let tol = 1e-3;
        let line = sample(|x| x * x * x, Interval::new(-2.0, 2.0).unwrap(), tol).unwrap();
        let points = line.points();
        // Accepted segments are emitted as (lo, mid, hi) triples sharing
        // their endpoints.
        assert_eq!(points.len() % 2, 1);
        for k in (0..points.len() - 1).step_by(2) {
            let (lo, mid, hi) = (points[k], points[k + 1], points[k + 2]);
            assert_eq!(mid.x, midpoint(lo.x, hi.x));
            let err = (mid.y - 0.5 * (lo.y + hi.y)).abs();
            assert!(err <= tol, "err {err} on [{}, {}]", lo.x, hi.x);
        }
    }

    #[test]
    fn test_curvature_increases_density() {
        let interval = Interval::new(0.0, 10.0).unwrap();
        let fast = sample(|x| (50.0 * x).sin(), interval, 1e-3).unwrap();
        let slow = sample(|x| (0.1 * x).sin(), interval, 1e-3).unwrap();
        assert!(fast.len() > slow.len());
    }

    #[test]
    fn test_density_follows_local_curvature() {
        // Flat on [0, 1], oscillating on [1, 2].
        let f = |x: f64| if x < 1.0 { 0.0 } else { (40.0 * (x - 1.0)).sin() };
        let line = sample(f, Interval::new(0.0, 2.0).unwrap(), 1e-3).unwrap();
        assert!(line.count_in(1.0, 2.0) > 4 * line.count_in(0.0, 0.99));
    }

    #[test]
    fn test_depth_bound_limits_points() {
        let sampler = AdaptiveSampler::new().tolerance(0.0).max_depth(4);
        let line = sampler.sample(|x| x * x, unit()).unwrap();
        assert_eq!(line.len(), (1 << 5) + 1);
    }

    #[test]
    fn test_depth_zero_keeps_seed_points() {
        let sampler = AdaptiveSampler::new().max_depth(0);
        let line = sampler.sample(|x| (100.0 * x).sin(), unit()).unwrap();
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_non_finite_values_are_kept() {
        let sampler = AdaptiveSampler::new().max_depth(6);
        let line = sampler
            .sample(|x| if x > 0.5 { f64::NAN } else { x }, unit())
            .unwrap();
        assert!(line.iter().any(|p| p.y.is_nan()));
        assert_eq!(line.last().unwrap().x, 1.0);
    }

    #[test]
    fn test_non_finite_values_force_subdivision() {
        let sampler = AdaptiveSampler::new().max_depth(5);
        let line = sampler.sample(|x| 1.0 / (x - 0.3), unit()).unwrap();
        assert!(line.len() > 3);
        assert!(line.len() <= (1 << 6) + 1);
    }

    #[test]
    fn test_non_finite_values_dropped() {
        let sampler = AdaptiveSampler::new()
            .max_depth(6)
            .non_finite(NonFinitePolicy::Drop);
        let line = sampler
            .sample(|x| if x > 0.5 { f64::INFINITY } else { x }, unit())
            .unwrap();
        assert!(line.iter().all(|p| p.y.is_finite()));
        assert!(line.points().windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let result = sample(f64::sin, unit(), -1.0);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_nan_tolerance_rejected() {
        assert!(sample(f64::sin, unit(), f64::NAN).is_err());
    }

    #[test]
    fn test_excessive_depth_rejected() {
        let sampler = AdaptiveSampler::new().max_depth(MAX_DEPTH_LIMIT + 1);
        assert!(sampler.sample(f64::sin, unit()).is_err());
    }

    #[test]
    fn test_tiny_interval_terminates() {
        let interval = Interval::new(1.0, 1.0 + f64::EPSILON).unwrap();
        let sampler = AdaptiveSampler::new().tolerance(0.0).max_depth(MAX_DEPTH_LIMIT);
        let line = sampler.sample(|_| f64::NAN, interval).unwrap();
        assert!(line.len() <= 3);
        assert!(line.points().windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_evaluate_at_points() {
        let ys = evaluate(|x| x * 10.0, &[3.0, 1.0, 2.0]);
        assert_eq!(ys, vec![30.0, 10.0, 20.0]);
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================
