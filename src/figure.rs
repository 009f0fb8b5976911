//! Figure plans.
//!
//! A [`Figure`] collects prepared plots by group and, once complete,
//! produces a [`FigurePlan`]: the grid size and one [`SubplotPlan`] per
//! region with its plots and resolved axis settings. Turning a plan into
//! backend calls is left to the renderer.
//!
//! # Example
//!
//! ```rust
//! use replot::command::{options, PlotInput};
//! use replot::figure::{Figure, GridSpec};
//! use replot::sampling::Interval;
//!
//! let mut fig = Figure::new().xlabel("t").ylabel("amplitude");
//! let interval = Interval::new(0.0, 6.0).unwrap();
//! fig.plot(PlotInput::function(f64::sin, interval), options([("group", "a".into())])).unwrap();
//! fig.plot(PlotInput::function(f64::cos, interval), options([("group", "b".into())])).unwrap();
//! fig.set_grid(GridSpec::rows(&["ab"])).unwrap();
//!
//! let plan = fig.plan().unwrap();
//! assert_eq!(plan.subplots.len(), 2);
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::command::{prepare, OptionMap, OptionValue, PlotCommand, PlotInput};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::{auto_grid, GridDescription, ParsedGrid, Region, DEFAULT_GROUP};
use crate::per_group::PerGroup;
use crate::sampling::AdaptiveSampler;

// ============================================================================
// Legend
// ============================================================================

/// Legend placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Legend {
    /// No legend.
    Off,
    /// Backend picks the location.
    Best,
    /// Named location such as `"upper right"`.
    At(String),
}

impl Legend {
    /// Legend at a named location; `top`/`bottom` are accepted for
    /// `upper`/`lower`.
    #[must_use]
    pub fn at(location: &str) -> Self {
        let location = location
            .replace("top ", "upper ")
            .replace("bottom ", "lower ");
        if location == "best" {
            Legend::Best
        } else {
            Legend::At(location)
        }
    }

    /// Location name, if the legend is shown.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Legend::Off => None,
            Legend::Best => Some("best"),
            Legend::At(location) => Some(location),
        }
    }
}

impl From<Legend> for PerGroup<Option<Legend>> {
    fn from(legend: Legend) -> Self {
        PerGroup::Uniform(Some(legend))
    }
}

// ============================================================================
// Grid layouts
// ============================================================================

/// How plots are arranged into subplots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSpec {
    /// Explicit ASCII-art rows.
    Rows(Vec<String>),
    /// Grid derived from the groups in use.
    Auto {
        /// Number of rows, derived when unset.
        height: Option<usize>,
        /// Number of columns, derived when unset.
        width: Option<usize>,
        /// Give every plot its own subplot regardless of groups.
        ignore_groups: bool,
    },
    /// Single subplot holding every plot.
    Disabled,
}

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec::auto()
    }
}

impl GridSpec {
    /// Explicit rows.
    #[must_use]
    pub fn rows<S: AsRef<str>>(rows: &[S]) -> Self {
        GridSpec::Rows(rows.iter().map(|r| r.as_ref().to_string()).collect())
    }

    /// Automatic grid.
    #[must_use]
    pub fn auto() -> Self {
        GridSpec::Auto {
            height: None,
            width: None,
            ignore_groups: false,
        }
    }

    /// Resolve loose grid arguments.
    ///
    /// Any of `height`, `width` or `ignore_groups` implies an automatic grid;
    /// otherwise `description` is required unless `auto` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `auto` is `Some(false)` while
    /// automatic-only arguments are given, or if no description is given for
    /// a manual grid.
    pub fn from_arguments(
        description: Option<Vec<String>>,
        height: Option<usize>,
        width: Option<usize>,
        ignore_groups: bool,
        auto: Option<bool>,
    ) -> Result<Self> {
        let wants_auto = height.is_some() || width.is_some() || ignore_groups;
        if wants_auto && auto == Some(false) {
            return Err(Error::invalid(
                "auto=false and height/width/ignore_groups arguments are not compatible",
            ));
        }
        if wants_auto || auto == Some(true) {
            return Ok(GridSpec::Auto {
                height,
                width,
                ignore_groups,
            });
        }
        match description {
            Some(rows) if !rows.is_empty() => Ok(GridSpec::Rows(rows)),
            _ => Err(Error::invalid("Grid cannot be an empty list")),
        }
    }
}

#[derive(Debug, Clone)]
enum GridState {
    Auto {
        height: Option<usize>,
        width: Option<usize>,
        ignore_groups: bool,
    },
    Explicit(ParsedGrid),
    Disabled,
}

// ============================================================================
// Plan
// ============================================================================

/// Axis configuration for one subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSettings {
    /// X axis label (already swapped for inverted plots).
    pub xlabel: Option<String>,
    /// Y axis label (already swapped for inverted plots).
    pub ylabel: Option<String>,
    /// Subplot title.
    pub title: Option<String>,
    /// X axis limits.
    pub xlim: Option<(f64, f64)>,
    /// Y axis limits.
    pub ylim: Option<(f64, f64)>,
    /// Logarithmic x axis.
    pub x_log: bool,
    /// Logarithmic y axis.
    pub y_log: bool,
    /// Equal axis scaling.
    pub orthonormal: bool,
    /// Legend placement.
    pub legend: Legend,
}

/// One subplot of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct SubplotPlan {
    /// Grid region.
    pub region: Region,
    /// Plots drawn in the subplot, in insertion order.
    pub plots: Vec<PlotCommand>,
    /// Axis configuration.
    pub axes: AxisSettings,
}

/// Everything a renderer needs to draw a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigurePlan {
    /// Grid columns.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
    /// Subplots in region discovery order.
    pub subplots: Vec<SubplotPlan>,
    /// Plots whose group has no subplot and no default subplot to fall
    /// back to.
    pub hidden: Vec<PlotCommand>,
}

impl FigurePlan {
    /// Subplot for a group symbol.
    #[must_use]
    pub fn subplot(&self, symbol: char) -> Option<&SubplotPlan> {
        self.subplots.iter().find(|s| s.region.symbol == symbol)
    }
}

// ============================================================================
// Figure
// ============================================================================

/// A figure under construction.
#[derive(Debug, Clone)]
pub struct Figure {
    xlabel: PerGroup<Option<String>>,
    ylabel: PerGroup<Option<String>>,
    title: PerGroup<Option<String>>,
    xrange: PerGroup<Option<(f64, f64)>>,
    yrange: PerGroup<Option<(f64, f64)>>,
    legend: PerGroup<Option<Legend>>,
    plots: BTreeMap<char, Vec<PlotCommand>>,
    grid: GridState,
    sampler: AdaptiveSampler,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Create an empty figure with an automatic grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            xlabel: PerGroup::default(),
            ylabel: PerGroup::default(),
            title: PerGroup::default(),
            xrange: PerGroup::default(),
            yrange: PerGroup::default(),
            legend: PerGroup::default(),
            plots: BTreeMap::new(),
            grid: GridState::Auto {
                height: None,
                width: None,
                ignore_groups: false,
            },
            sampler: AdaptiveSampler::new(),
        }
    }

    /// Create a figure whose sampler comes from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler configuration is invalid.
    pub fn with_config(config: &Config) -> Result<Self> {
        Ok(Self::new().sampler(config.sampler.sampler()?))
    }

    /// Set the x label.
    #[must_use]
    pub fn xlabel(mut self, label: impl Into<PerGroup<Option<String>>>) -> Self {
        self.xlabel = label.into();
        self
    }

    /// Set the y label.
    #[must_use]
    pub fn ylabel(mut self, label: impl Into<PerGroup<Option<String>>>) -> Self {
        self.ylabel = label.into();
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<PerGroup<Option<String>>>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the x range, overriding per-plot `xlim`.
    #[must_use]
    pub fn xrange(mut self, range: impl Into<PerGroup<Option<(f64, f64)>>>) -> Self {
        self.xrange = range.into();
        self
    }

    /// Set the y range, overriding per-plot `ylim`.
    #[must_use]
    pub fn yrange(mut self, range: impl Into<PerGroup<Option<(f64, f64)>>>) -> Self {
        self.yrange = range.into();
        self
    }

    /// Set the legend. Unset means a legend at the best location whenever
    /// some plot carries a label.
    #[must_use]
    pub fn legend(mut self, legend: impl Into<PerGroup<Option<Legend>>>) -> Self {
        self.legend = legend.into();
        self
    }

    /// Set the sampler used for function inputs.
    #[must_use]
    pub fn sampler(mut self, sampler: AdaptiveSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Prepare and add a plot.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot cannot be prepared.
    pub fn plot(&mut self, input: PlotInput<'_>, options: OptionMap) -> Result<()> {
        let command = prepare(input, options, &self.sampler)?;
        self.add(command);
        Ok(())
    }

    /// Add a plot on a log x axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot cannot be prepared.
    pub fn logplot(&mut self, input: PlotInput<'_>, mut options: OptionMap) -> Result<()> {
        options.insert("logscale".to_string(), OptionValue::from("log"));
        self.plot(input, options)
    }

    /// Add a plot on log x and y axes.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot cannot be prepared.
    pub fn loglogplot(&mut self, input: PlotInput<'_>, mut options: OptionMap) -> Result<()> {
        options.insert("logscale".to_string(), OptionValue::from("loglog"));
        self.plot(input, options)
    }

    /// Add an already prepared plot to its group.
    pub fn add(&mut self, command: PlotCommand) {
        self.plots.entry(command.options.group).or_default().push(command);
    }

    /// Number of plots.
    #[must_use]
    pub fn plot_count(&self) -> usize {
        self.plots.values().map(Vec::len).sum()
    }

    /// Groups holding at least one plot.
    #[must_use]
    pub fn groups(&self) -> Vec<char> {
        self.plots
            .iter()
            .filter(|(_, plots)| !plots.is_empty())
            .map(|(&group, _)| group)
            .collect()
    }

    /// Set the grid layout. Explicit rows are parsed immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if explicit rows do not form a valid grid.
    pub fn set_grid(&mut self, spec: GridSpec) -> Result<()> {
        self.grid = match spec {
            GridSpec::Rows(rows) => GridState::Explicit(GridDescription::new(&rows)?.parse()?),
            GridSpec::Auto {
                height,
                width,
                ignore_groups,
            } => GridState::Auto {
                height,
                width,
                ignore_groups,
            },
            GridSpec::Disabled => GridState::Disabled,
        };
        Ok(())
    }

    /// Use an automatic grid.
    pub fn set_auto_grid(&mut self, height: Option<usize>, width: Option<usize>, ignore_groups: bool) {
        self.grid = GridState::Auto {
            height,
            width,
            ignore_groups,
        };
    }

    /// Draw every plot on a single subplot.
    pub fn disable_grid(&mut self) {
        self.grid = GridState::Disabled;
    }

    /// Build the plan for the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when an automatic grid has no plots to
    /// lay out, or a layout error for impossible grid dimensions.
    pub fn plan(&self) -> Result<FigurePlan> {
        let plots = match self.grid {
            GridState::Auto {
                ignore_groups: true,
                ..
            } => self.regroup_individually(),
            _ => self.plots.clone(),
        };
        let labelled = plots.values().flatten().any(|p| p.label().is_some());

        let grid = match &self.grid {
            GridState::Disabled => {
                let region = Region {
                    origin: (0, 0),
                    symbol: DEFAULT_GROUP,
                    rowspan: 1,
                    colspan: 1,
                };
                let all: Vec<PlotCommand> = plots.into_values().flatten().collect();
                let axes = self.axis_settings(DEFAULT_GROUP, &all, labelled);
                debug!(plots = all.len(), "planned single-axis figure");
                return Ok(FigurePlan {
                    width: 1,
                    height: 1,
                    subplots: vec![SubplotPlan {
                        region,
                        plots: all,
                        axes,
                    }],
                    hidden: Vec::new(),
                });
            }
            GridState::Explicit(grid) => grid.clone(),
            GridState::Auto { height, width, .. } => {
                let groups: Vec<char> = plots
                    .iter()
                    .filter(|(_, p)| !p.is_empty())
                    .map(|(&g, _)| g)
                    .collect();
                if groups.is_empty() {
                    return Err(Error::EmptyData);
                }
                auto_grid(&groups, *height, *width)?.parse()?
            }
        };

        let mut by_region: Vec<Vec<PlotCommand>> = vec![Vec::new(); grid.regions.len()];
        let fallback = grid.regions.iter().position(|r| r.symbol == DEFAULT_GROUP);
        let mut hidden = Vec::new();
        for (group, group_plots) in plots {
            match grid.regions.iter().position(|r| r.symbol == group).or(fallback) {
                Some(index) => by_region[index].extend(group_plots),
                None => hidden.extend(group_plots),
            }
        }

        let subplots: Vec<SubplotPlan> = grid
            .regions
            .iter()
            .zip(by_region)
            .map(|(region, plots)| SubplotPlan {
                region: *region,
                axes: self.axis_settings(region.symbol, &plots, labelled),
                plots,
            })
            .collect();

        debug!(
            width = grid.width,
            height = grid.height,
            subplots = subplots.len(),
            hidden = hidden.len(),
            "planned figure"
        );
        Ok(FigurePlan {
            width: grid.width,
            height: grid.height,
            subplots,
            hidden,
        })
    }

    /// One group per plot, in group then insertion order.
    fn regroup_individually(&self) -> BTreeMap<char, Vec<PlotCommand>> {
        let symbols = (0x61u32..).filter_map(char::from_u32);
        self.plots
            .values()
            .flatten()
            .zip(symbols)
            .map(|(plot, symbol)| {
                let mut plot = plot.clone();
                plot.options.group = symbol;
                (symbol, vec![plot])
            })
            .collect()
    }

    fn axis_settings(&self, symbol: char, plots: &[PlotCommand], labelled: bool) -> AxisSettings {
        let inverted = plots.iter().any(|p| p.options.inverted);
        let mut xlabel = self.xlabel.resolve(symbol).clone();
        let mut ylabel = self.ylabel.resolve(symbol).clone();
        if inverted {
            std::mem::swap(&mut xlabel, &mut ylabel);
        }

        let last_xlim = plots.iter().rev().find_map(|p| p.options.xlim);
        let last_ylim = plots.iter().rev().find_map(|p| p.options.ylim);

        let legend = if labelled {
            self.legend.resolve(symbol).clone().unwrap_or(Legend::Best)
        } else {
            Legend::Off
        };

        AxisSettings {
            xlabel,
            ylabel,
            title: self.title.resolve(symbol).clone(),
            xlim: self.xrange.resolve(symbol).or(last_xlim),
            ylim: self.yrange.resolve(symbol).or(last_ylim),
            x_log: plots.iter().any(|p| p.options.logscale.is_some_and(|s| s.x_log())),
            y_log: plots.iter().any(|p| p.options.logscale.is_some_and(|s| s.y_log())),
            orthonormal: plots.iter().any(|p| p.options.orthonormal),
            legend,
        }
    }
}
