//! Plot inputs and their preparation into plot commands.

use std::fmt;

use crate::command::normalize::{normalize, ResidualOptions};
use crate::command::options::{split, CustomOptions, OptionMap, StyleOptions};
use crate::error::{Error, Result};
use crate::sampling::{evaluate, AdaptiveSampler, Interval};

/// Where a function should be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Adaptively sampled interval.
    Interval(Interval),
    /// Fixed abscissas, evaluated as given.
    Points(Vec<f64>),
}

/// Something to plot, resolved once at the boundary.
pub enum PlotInput<'a> {
    /// A function and where to evaluate it.
    Function {
        /// The function.
        f: Box<dyn Fn(f64) -> f64 + 'a>,
        /// Evaluation domain.
        domain: Domain,
    },
    /// Separate x and y sequences.
    PointSeries {
        /// X values.
        xs: Vec<f64>,
        /// Y values.
        ys: Vec<f64>,
    },
    /// A list of `(x, y)` coordinates.
    Pairs(Vec<(f64, f64)>),
}

impl<'a> PlotInput<'a> {
    /// A function sampled adaptively over `interval`.
    pub fn function(f: impl Fn(f64) -> f64 + 'a, interval: Interval) -> Self {
        PlotInput::Function {
            f: Box::new(f),
            domain: Domain::Interval(interval),
        }
    }

    /// A function evaluated at fixed abscissas.
    pub fn function_at(f: impl Fn(f64) -> f64 + 'a, xs: Vec<f64>) -> Self {
        PlotInput::Function {
            f: Box::new(f),
            domain: Domain::Points(xs),
        }
    }

    /// Separate x and y sequences.
    #[must_use]
    pub fn series(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        PlotInput::PointSeries { xs, ys }
    }

    /// A list of `(x, y)` coordinates.
    #[must_use]
    pub fn pairs(points: Vec<(f64, f64)>) -> Self {
        PlotInput::Pairs(points)
    }

    /// Turn the input into x and y sequences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for empty inputs and propagates sampler
    /// errors.
    pub fn resolve(self, sampler: &AdaptiveSampler) -> Result<(Vec<f64>, Vec<f64>)> {
        match self {
            PlotInput::Function {
                f,
                domain: Domain::Interval(interval),
            } => Ok(sampler.sample(f, interval)?.into_xy()),
            PlotInput::Function {
                f,
                domain: Domain::Points(xs),
            } => {
                if xs.is_empty() {
                    return Err(Error::EmptyData);
                }
                let ys = evaluate(f, &xs);
                Ok((xs, ys))
            }
            PlotInput::PointSeries { xs, ys } => {
                if xs.is_empty() && ys.is_empty() {
                    return Err(Error::EmptyData);
                }
                Ok((xs, ys))
            }
            PlotInput::Pairs(points) => {
                if points.is_empty() {
                    return Err(Error::EmptyData);
                }
                Ok(points.into_iter().unzip())
            }
        }
    }
}

impl fmt::Debug for PlotInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotInput::Function { domain, .. } => f
                .debug_struct("Function")
                .field("domain", domain)
                .finish_non_exhaustive(),
            PlotInput::PointSeries { xs, ys } => f
                .debug_struct("PointSeries")
                .field("xs", &xs.len())
                .field("ys", &ys.len())
                .finish(),
            PlotInput::Pairs(points) => f.debug_tuple("Pairs").field(&points.len()).finish(),
        }
    }
}

/// A prepared plot: data ready for a backend draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCommand {
    /// X values.
    pub xs: Vec<f64>,
    /// Y values.
    pub ys: Vec<f64>,
    /// Backend style options.
    pub style: StyleOptions,
    /// Options for axis configuration.
    pub options: ResidualOptions,
}

impl PlotCommand {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the command has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Plot label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.style.label()
    }
}

/// Prepare a plot from loosely typed options.
///
/// # Errors
///
/// Returns an error if the options are invalid, the input is empty or
/// mismatched, or sampling fails.
///
/// # Example
///
/// ```rust
/// use replot::command::{options, prepare, PlotInput};
/// use replot::sampling::{AdaptiveSampler, Interval};
///
/// let input = PlotInput::function(f64::sin, Interval::new(0.0, 1.0).unwrap());
/// let cmd = prepare(input, options([("group", "a".into())]), &AdaptiveSampler::new()).unwrap();
/// assert_eq!(cmd.options.group, 'a');
/// ```
pub fn prepare(input: PlotInput<'_>, raw: OptionMap, sampler: &AdaptiveSampler) -> Result<PlotCommand> {
    let (style, custom) = split(raw)?;
    prepare_typed(input, style, &custom, sampler)
}

/// Prepare a plot from already typed options.
///
/// # Errors
///
/// See [`prepare`].
pub fn prepare_typed(
    input: PlotInput<'_>,
    style: StyleOptions,
    custom: &CustomOptions,
    sampler: &AdaptiveSampler,
) -> Result<PlotCommand> {
    custom.validate()?;
    let (xs, ys) = input.resolve(sampler)?;
    let normalized = normalize(xs, ys, custom)?;
    Ok(PlotCommand {
        xs: normalized.xs,
        ys: normalized.ys,
        style,
        options: normalized.residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::options::options;

    fn sampler() -> AdaptiveSampler {
        AdaptiveSampler::new()
    }

    #[test]
    fn test_prepare_function_interval() {
        let input = PlotInput::function(|x| x * x, Interval::new(-1.0, 1.0).unwrap());
        let cmd = prepare(input, OptionMap::new(), &sampler()).unwrap();
        assert_eq!(cmd.xs.first(), Some(&-1.0));
        assert_eq!(cmd.xs.last(), Some(&1.0));
        assert!(cmd.len() > 3);
    }

    #[test]
    fn test_prepare_function_points() {
        let input = PlotInput::function_at(|x| x + 1.0, vec![0.0, 5.0, 2.0]);
        let cmd = prepare(input, OptionMap::new(), &sampler()).unwrap();
        assert_eq!(cmd.xs, vec![0.0, 5.0, 2.0]);
        assert_eq!(cmd.ys, vec![1.0, 6.0, 3.0]);
    }

    #[test]
    fn test_prepare_function_no_points() {
        let input = PlotInput::function_at(|x| x, Vec::new());
        assert!(matches!(
            prepare(input, OptionMap::new(), &sampler()),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_prepare_closure_borrowing_local() {
        let scale = 3.0;
        let input = PlotInput::function(|x| scale * x, Interval::new(0.0, 1.0).unwrap());
        let cmd = prepare(input, OptionMap::new(), &sampler()).unwrap();
        assert_eq!(cmd.ys, vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn test_prepare_series() {
        let input = PlotInput::series(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]);
        let cmd = prepare(input, options([("label", "data".into())]), &sampler()).unwrap();
        assert_eq!(cmd.label(), Some("data"));
        assert_eq!(cmd.len(), 3);
    }

    #[test]
    fn test_prepare_series_mismatch() {
        let input = PlotInput::series(vec![1.0, 2.0], vec![4.0]);
        assert!(matches!(
            prepare(input, OptionMap::new(), &sampler()),
            Err(Error::DataLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_prepare_empty_series() {
        let input = PlotInput::series(Vec::new(), Vec::new());
        assert!(prepare(input, OptionMap::new(), &sampler()).is_err());
    }

    #[test]
    fn test_prepare_pairs_unzipped() {
        let input = PlotInput::pairs(vec![(1.0, 10.0), (2.0, 20.0)]);
        let cmd = prepare(input, OptionMap::new(), &sampler()).unwrap();
        assert_eq!(cmd.xs, vec![1.0, 2.0]);
        assert_eq!(cmd.ys, vec![10.0, 20.0]);
    }

    #[test]
    fn test_prepare_applies_inversion() {
        let input = PlotInput::pairs(vec![(1.0, 10.0), (2.0, 20.0)]);
        let cmd = prepare(input, options([("invert", true.into())]), &sampler()).unwrap();
        assert_eq!(cmd.xs, vec![10.0, 20.0]);
        assert!(cmd.options.inverted);
    }

    #[test]
    fn test_prepare_rejects_bad_group_before_sampling() {
        let input = PlotInput::function(|_| panic!("must not evaluate"), Interval::new(0.0, 1.0).unwrap());
        let result = prepare(input, options([("group", "xy".into())]), &sampler());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_prepare_typed_markers_only() {
        let input = PlotInput::series(vec![0.0], vec![0.0]);
        let cmd = prepare_typed(
            input,
            StyleOptions::default(),
            &CustomOptions::new().line(false),
            &sampler(),
        )
        .unwrap();
        assert!(cmd.options.markers_only);
    }

    #[test]
    fn test_plot_input_debug() {
        let input = PlotInput::function(f64::cos, Interval::new(0.0, 1.0).unwrap());
        assert!(format!("{input:?}").contains("Function"));
    }
}
