//! Plot commands.
//!
//! A plot call goes through three steps:
//!
//! 1. [`split`] separates backend style options from the options handled
//!    here and type-checks the latter.
//! 2. [`PlotInput::resolve`] samples or evaluates functions and unzips
//!    coordinate pairs into x and y sequences.
//! 3. [`normalize`] applies inversion and rotation.
//!
//! [`prepare`] runs all three and yields a [`PlotCommand`].

mod input;
mod normalize;
mod options;

pub use input::{prepare, prepare_typed, Domain, PlotCommand, PlotInput};
pub use normalize::{normalize, Normalized, ResidualOptions};
pub use options::{
    options, split, CustomOptions, LogScale, OptionMap, OptionValue, StyleOptions,
};
