//! Subplot grid layouts.
//!
//! Grids are described as ASCII art, one string per row and one symbol per
//! group:
//!
//! ```text
//! AAA
//! BBC
//! DEC
//! ```
//!
//! The parser turns a description into rectangular [`Region`]s, which the
//! renderer maps onto grid-subplot primitives. [`auto_grid`] builds a
//! description from group symbols when none is given.

mod layout;
mod parser;

pub use layout::{auto_grid, optimal, DEFAULT_GROUP};
pub use parser::{parse, GridDescription, ParsedGrid, Region};
