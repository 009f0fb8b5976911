//! Automatic grid layouts.
//!
//! Builds a grid description from a list of group symbols when the caller
//! did not draw one.

use crate::error::{Error, Result};
use crate::grid::parser::GridDescription;

/// Reserved symbol of the default group.
pub const DEFAULT_GROUP: char = '_';

/// Near-square `(height, width)` grid holding `nb_items` cells.
///
/// Two candidates are compared, `(⌊√n⌋, ⌈n/⌊√n⌋⌉)` and `(⌈n/⌈√n⌉⌉, ⌈√n⌉)`;
/// the one with fewer cells wins, the second on ties.
///
/// ```rust
/// use replot::grid::optimal;
///
/// assert_eq!(optimal(2), (1, 2));
/// assert_eq!(optimal(3), (1, 3));
/// assert_eq!(optimal(4), (2, 2));
/// ```
#[must_use]
pub fn optimal(nb_items: usize) -> (usize, usize) {
    if nb_items == 0 {
        return (1, 1);
    }
    let root = (nb_items as f64).sqrt();

    let height1 = (root.floor() as usize).max(1);
    let width1 = nb_items.div_ceil(height1);

    let width2 = (root.ceil() as usize).max(1);
    let height2 = nb_items.div_ceil(width2);

    if height1 * width1 < height2 * width2 {
        (height1, width1)
    } else {
        (height2, width2)
    }
}

/// Build a grid description for `groups`.
///
/// Named groups are sorted, the default group goes last, and symbols are laid
/// out `width` per row. When only one of `height`/`width` is given the other
/// is derived; otherwise [`optimal`] picks both. A short last row is padded
/// with its own last symbol, and the last row is repeated down to `height`,
/// so the description always has the requested dimensions.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if there are no groups, a dimension is
/// zero, or the dimensions cannot hold every group.
pub fn auto_grid(
    groups: &[char],
    height: Option<usize>,
    width: Option<usize>,
) -> Result<GridDescription> {
    let mut symbols: Vec<char> = groups.iter().copied().filter(|&g| g != DEFAULT_GROUP).collect();
    symbols.sort_unstable();
    symbols.dedup();
    if groups.contains(&DEFAULT_GROUP) {
        symbols.push(DEFAULT_GROUP);
    }
    if symbols.is_empty() {
        return Err(Error::invalid("Cannot build a grid without groups"));
    }

    let n = symbols.len();
    let (height, width) = match (height, width) {
        (Some(0), _) | (_, Some(0)) => {
            return Err(Error::invalid("Grid dimensions must be positive"));
        }
        (None, Some(w)) => (n.div_ceil(w), w),
        (Some(h), None) => (h, n.div_ceil(h)),
        (Some(h), Some(w)) => (h, w),
        (None, None) => optimal(n),
    };
    if height * width < n {
        return Err(Error::InvalidParameter(format!(
            "A {height}x{width} grid cannot hold {n} groups"
        )));
    }

    let mut rows: Vec<String> = symbols
        .chunks(width)
        .map(|chunk| {
            let mut row: String = chunk.iter().collect();
            if let Some(&last) = chunk.last() {
                row.extend(std::iter::repeat(last).take(width - chunk.len()));
            }
            row
        })
        .collect();
    if let Some(last) = rows.last().cloned() {
        rows.resize(height, last);
    }

    GridDescription::new(&rows)
}
