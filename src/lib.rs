//! # Replot
//!
//! Plot-data preparation: everything between "the user asked for a plot"
//! and "the backend draws line segments".
//!
//! ## Features
//!
//! - **Adaptive sampling**: functions become polylines dense where they curve
//!   and sparse where they are flat
//! - **ASCII grid layouts**: `["AAB", "CCB"]` describes a 2x3 figure with
//!   spanning subplots
//! - **Plot commands**: options are split between the backend and the
//!   figure, data are inverted and rotated
//! - **Figure plans**: plots are routed to subplots with resolved axis
//!   settings
//!
//! ## Quick Start
//!
//! ```rust
//! use replot::prelude::*;
//!
//! let mut fig = Figure::new().xlabel("x").ylabel("sin(x)");
//! let interval = Interval::new(0.0, 6.0)?;
//! fig.plot(PlotInput::function(f64::sin, interval), options([("group", "a".into())]))?;
//! fig.plot(
//!     PlotInput::pairs(vec![(0.0, 0.0), (1.0, 1.0)]),
//!     options([("group", "b".into()), ("invert", true.into())]),
//! )?;
//! fig.set_grid(GridSpec::rows(&["a", "b"]))?;
//!
//! let plan = fig.plan()?;
//! assert_eq!((plan.height, plan.width), (2, 1));
//! # Ok::<(), replot::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Points and polylines.
pub mod geometry;

/// Adaptive interval sampling.
pub mod sampling;

/// ASCII grid layouts.
pub mod grid;

// ============================================================================
// Plot Modules
// ============================================================================

/// Plot options, inputs and normalization.
pub mod command;

/// Settings that vary per subplot group.
pub mod per_group;

/// Figures and their render plans.
pub mod figure;

/// YAML configuration.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for replot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use replot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::command::{
        options, prepare, CustomOptions, OptionMap, OptionValue, PlotCommand, PlotInput,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, FigurePlan, GridSpec, Legend};
    pub use crate::geometry::{Point, Polyline};
    pub use crate::grid::{auto_grid, optimal, parse, GridDescription, ParsedGrid, Region};
    pub use crate::per_group::PerGroup;
    pub use crate::sampling::{AdaptiveSampler, Interval, NonFinitePolicy};
}
