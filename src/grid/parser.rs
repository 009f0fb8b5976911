//! ASCII-art grid parsing.
//!
//! A grid description such as
//!
//! ```text
//! AAA
//! BBC
//! DEC
//! ```
//!
//! is turned into one rectangular [`Region`] per symbol. Cells are scanned
//! row-major; each unvisited cell starts a candidate rectangle grown to the
//! right and downward, which must then be filled entirely with its symbol.
//! A symbol may define only one rectangle.

use tracing::debug;

use crate::error::{Error, Result};

/// A validated rectangular matrix of single-character symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDescription {
    cells: Vec<Vec<char>>,
    width: usize,
}

impl GridDescription {
    /// Build a description from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if there are no rows, the rows are
    /// empty, or the rows have different lengths.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let cells: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();

        let Some(first) = cells.first() else {
            return Err(Error::invalid("Grid cannot be an empty list"));
        };
        let width = first.len();
        if width == 0 {
            return Err(Error::invalid("Grid rows cannot be empty"));
        }
        if let Some(row) = cells.iter().position(|r| r.len() != width) {
            return Err(Error::InvalidParameter(format!(
                "All rows must have the same number of elements: row {row} has {}, expected {width}",
                cells[row].len()
            )));
        }

        Ok(Self { cells, width })
    }

    /// Build a single-row description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the row is empty.
    pub fn from_row(row: &str) -> Result<Self> {
        Self::new(&[row])
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Symbol at `(row, col)`.
    #[must_use]
    pub fn symbol(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Rows as strings.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }

    /// Partition the description into rectangular regions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnparsableGrid`] if a symbol's cells do not form
    /// exactly one rectangle.
    pub fn parse(&self) -> Result<ParsedGrid> {
        let height = self.height();
        let width = self.width;
        let mut visited = Visited::new(height, width);
        let mut seen: Vec<char> = Vec::new();
        let mut regions = Vec::new();

        for row in 0..height {
            for col in 0..width {
                if visited.get(row, col) {
                    continue;
                }
                let symbol = self.cells[row][col];
                if seen.contains(&symbol) {
                    debug!(%symbol, row, col, "symbol already used by another region");
                    return Err(Error::UnparsableGrid { symbol, row, col });
                }

                let colspan = self.cells[row][col..]
                    .iter()
                    .take_while(|&&c| c == symbol)
                    .count();
                let rowspan = self.cells[row..]
                    .iter()
                    .take_while(|r| r[col] == symbol)
                    .count();

                let filled = self.cells[row..row + rowspan]
                    .iter()
                    .all(|r| r[col..col + colspan].iter().all(|&c| c == symbol));
                if !filled {
                    debug!(%symbol, row, col, rowspan, colspan, "region is not rectangular");
                    return Err(Error::UnparsableGrid { symbol, row, col });
                }

                visited.mark(row, col, rowspan, colspan);
                seen.push(symbol);
                regions.push(Region {
                    origin: (row, col),
                    symbol,
                    rowspan,
                    colspan,
                });
            }
        }

        debug!(width, height, regions = regions.len(), "parsed grid");
        Ok(ParsedGrid {
            width,
            height,
            regions,
        })
    }
}

/// Cells already assigned to a region, local to one parse call.
struct Visited {
    cells: Vec<bool>,
    width: usize,
}

impl Visited {
    fn new(height: usize, width: usize) -> Self {
        Self {
            cells: vec![false; height * width],
            width,
        }
    }

    fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    fn mark(&mut self, row: usize, col: usize, rowspan: usize, colspan: usize) {
        for r in row..row + rowspan {
            let start = r * self.width + col;
            self.cells[start..start + colspan].fill(true);
        }
    }
}

/// One rectangular subplot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Top-left cell as `(row, col)`, origin at the top-left corner.
    pub origin: (usize, usize),
    /// Symbol identifying the region.
    pub symbol: char,
    /// Number of rows covered.
    pub rowspan: usize,
    /// Number of columns covered.
    pub colspan: usize,
}

impl Region {
    /// Whether the region covers `(row, col)`.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let (r0, c0) = self.origin;
        row >= r0 && row < r0 + self.rowspan && col >= c0 && col < c0 + self.colspan
    }

    /// Number of cells covered.
    #[must_use]
    pub fn area(&self) -> usize {
        self.rowspan * self.colspan
    }
}

/// A grid partitioned into regions, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGrid {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Regions, top-to-bottom then left-to-right by origin.
    pub regions: Vec<Region>,
}

impl ParsedGrid {
    /// Find the region for a symbol.
    #[must_use]
    pub fn region(&self, symbol: char) -> Option<&Region> {
        self.regions.iter().find(|r| r.symbol == symbol)
    }

    /// Symbols in discovery order.
    #[must_use]
    pub fn symbols(&self) -> Vec<char> {
        self.regions.iter().map(|r| r.symbol).collect()
    }
}

/// Parse rows of ASCII art into a [`ParsedGrid`].
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for an empty or ragged description and
/// [`Error::UnparsableGrid`] when a symbol is not a single rectangle.
///
/// # Example
///
/// ```rust
/// use replot::grid::parse;
///
/// let grid = parse(&["AAA", "BBC", "DEC"]).unwrap();
/// assert_eq!(grid.regions.len(), 5);
/// assert!(parse(&["AB", "BA"]).is_err());
/// ```
pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<ParsedGrid> {
    GridDescription::new(rows)?.parse()
}
