//! Geometric normalization of plot data.
//!
//! Applies the `invert` and `rotate` options to raw x/y data. Inversion
//! always happens before rotation, so a rotation acts on the already
//! swapped coordinates.

use tracing::debug;

use crate::command::options::{CustomOptions, LogScale};
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Options left for the renderer once geometry has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualOptions {
    /// Subplot group symbol (default group when unset).
    pub group: char,
    /// Log axis scaling.
    pub logscale: Option<LogScale>,
    /// Force equal axis scaling.
    pub orthonormal: bool,
    /// X axis limits.
    pub xlim: Option<(f64, f64)>,
    /// Y axis limits.
    pub ylim: Option<(f64, f64)>,
    /// Animation frame index.
    pub frame: usize,
    /// Data were inverted; axis labels must be swapped.
    pub inverted: bool,
    /// Draw markers instead of connected segments.
    pub markers_only: bool,
}

impl From<&CustomOptions> for ResidualOptions {
    fn from(options: &CustomOptions) -> Self {
        Self {
            group: options.group_or_default(),
            logscale: options.logscale,
            orthonormal: options.orthonormal,
            xlim: options.xlim,
            ylim: options.ylim,
            frame: options.frame,
            inverted: options.invert,
            markers_only: !options.line,
        }
    }
}

/// Transformed data plus residual options.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// X values.
    pub xs: Vec<f64>,
    /// Y values.
    pub ys: Vec<f64>,
    /// Options for the renderer.
    pub residual: ResidualOptions,
}

/// Apply inversion then rotation to `(xs, ys)`.
///
/// Rotation by `a` degrees maps `(x, y)` to
/// `(cos a·x + sin a·y, -sin a·x + cos a·y)`, a clockwise turn.
///
/// # Errors
///
/// Returns [`Error::DataLengthMismatch`] if `xs` and `ys` differ in length
/// and [`Error::InvalidParameter`] if the options are invalid.
///
/// # Example
///
/// ```rust
/// use replot::command::{normalize, CustomOptions};
///
/// let out = normalize(vec![1.0, 2.0], vec![3.0, 4.0], &CustomOptions::new().invert(true)).unwrap();
/// assert_eq!(out.xs, vec![3.0, 4.0]);
/// assert_eq!(out.ys, vec![1.0, 2.0]);
/// ```
pub fn normalize(mut xs: Vec<f64>, mut ys: Vec<f64>, options: &CustomOptions) -> Result<Normalized> {
    if xs.len() != ys.len() {
        return Err(Error::DataLengthMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    options.validate()?;

    if options.invert {
        std::mem::swap(&mut xs, &mut ys);
    }

    if let Some(degrees) = options.rotate {
        let radians = degrees.to_radians();
        for (x, y) in xs.iter_mut().zip(ys.iter_mut()) {
            let p = Point::new(*x, *y).rotated_clockwise(radians);
            *x = p.x;
            *y = p.y;
        }
    }

    debug!(
        points = xs.len(),
        inverted = options.invert,
        rotation = ?options.rotate,
        "normalized plot data"
    );
    Ok(Normalized {
        xs,
        ys,
        residual: ResidualOptions::from(options),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_GROUP;
    use approx::assert_relative_eq;

    fn data() -> (Vec<f64>, Vec<f64>) {
        (vec![0.0, 1.0, 2.0, 3.0], vec![1.0, -1.0, 0.5, 4.0])
    }

    #[test]
    fn test_no_options_is_identity() {
        let (xs, ys) = data();
        let out = normalize(xs.clone(), ys.clone(), &CustomOptions::new()).unwrap();
        assert_eq!(out.xs, xs);
        assert_eq!(out.ys, ys);
        assert_eq!(out.residual.group, DEFAULT_GROUP);
        assert!(!out.residual.inverted);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let (xs, ys) = data();
        let out = normalize(xs.clone(), ys.clone(), &CustomOptions::new().rotate(0.0)).unwrap();
        for (a, b) in out.xs.iter().zip(&xs) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        for (a, b) in out.ys.iter().zip(&ys) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invert_swaps_exactly() {
        let (xs, ys) = data();
        let out = normalize(xs.clone(), ys.clone(), &CustomOptions::new().invert(true)).unwrap();
        assert_eq!(out.xs, ys);
        assert_eq!(out.ys, xs);
        assert!(out.residual.inverted);
    }

    #[test]
    fn test_rotate_quarter_turn_clockwise() {
        let out = normalize(vec![1.0], vec![0.0], &CustomOptions::new().rotate(90.0)).unwrap();
        assert_relative_eq!(out.xs[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out.ys[0], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_full_turn_is_identity() {
        let (xs, ys) = data();
        let out = normalize(xs.clone(), ys.clone(), &CustomOptions::new().rotate(360.0)).unwrap();
        for (a, b) in out.xs.iter().zip(&xs) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invert_applied_before_rotate() {
        // Invert then rotate by 90: (x, y) -> (y, x) -> (x, -y).
        let out = normalize(
            vec![2.0],
            vec![3.0],
            &CustomOptions::new().invert(true).rotate(90.0),
        )
        .unwrap();
        assert_relative_eq!(out.xs[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(out.ys[0], -3.0, epsilon = 1e-12);

        // Rotating first would give (3, -2) -> (-2, 3).
        let rotated = normalize(vec![2.0], vec![3.0], &CustomOptions::new().rotate(90.0)).unwrap();
        let then_inverted = normalize(
            rotated.xs,
            rotated.ys,
            &CustomOptions::new().invert(true),
        )
        .unwrap();
        assert!((then_inverted.xs[0] - out.xs[0]).abs() > 1.0);
    }

    #[test]
    fn test_length_mismatch() {
        let result = normalize(vec![1.0, 2.0], vec![1.0], &CustomOptions::new());
        assert!(matches!(
            result,
            Err(Error::DataLengthMismatch { x_len: 2, y_len: 1 })
        ));
    }

    #[test]
    fn test_reserved_group_fails_fast() {
        let result = normalize(vec![1.0], vec![1.0], &CustomOptions::new().group('_'));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_residual_carries_options() {
        let options = CustomOptions::new()
            .group('b')
            .line(false)
            .logscale(LogScale::X)
            .orthonormal(true)
            .xlim(0.0, 1.0)
            .ylim(2.0, 3.0)
            .frame(7);
        let out = normalize(vec![], vec![], &options).unwrap();
        let r = out.residual;
        assert_eq!(r.group, 'b');
        assert!(r.markers_only);
        assert_eq!(r.logscale, Some(LogScale::X));
        assert!(r.orthonormal);
        assert_eq!(r.xlim, Some((0.0, 1.0)));
        assert_eq!(r.ylim, Some((2.0, 3.0)));
        assert_eq!(r.frame, 7);
    }

    #[test]
    fn test_non_finite_data_passes_through() {
        let out = normalize(vec![0.0, 1.0], vec![f64::NAN, 2.0], &CustomOptions::new()).unwrap();
        assert!(out.ys[0].is_nan());
    }
}
