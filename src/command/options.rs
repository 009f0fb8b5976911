//! Plot options.
//!
//! Callers pass a loose key/value map mixing backend style options
//! (`color`, `linewidth`, `label`, ...) with options handled here
//! (`group`, `line`, `logscale`, `orthonormal`, `xlim`/`xrange`,
//! `ylim`/`yrange`, `invert`, `rotate`, `frame`). [`split`] separates the
//! two and type-checks the latter into [`CustomOptions`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::grid::DEFAULT_GROUP;

/// A loosely typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Number.
    Number(f64),
    /// Text.
    Text(String),
    /// Closed range `(min, max)`.
    Range(f64, f64),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(s) => write!(f, "{s:?}"),
            OptionValue::Range(lo, hi) => write!(f, "({lo}, {hi})"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Number(f64::from(n))
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<(f64, f64)> for OptionValue {
    fn from((lo, hi): (f64, f64)) -> Self {
        OptionValue::Range(lo, hi)
    }
}

/// Options keyed by name.
pub type OptionMap = BTreeMap<String, OptionValue>;

/// Build an [`OptionMap`] from `(key, value)` pairs.
///
/// ```rust
/// use replot::command::options;
///
/// let opts = options([("group", "a".into()), ("invert", true.into())]);
/// assert_eq!(opts.len(), 2);
/// ```
pub fn options<const N: usize>(pairs: [(&str, OptionValue); N]) -> OptionMap {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// ============================================================================
// Typed options
// ============================================================================

/// Logarithmic axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogScale {
    /// Log x axis (`"log"`).
    X,
    /// Log x and y axes (`"loglog"`).
    Both,
}

impl LogScale {
    /// Whether the x axis is logarithmic.
    #[must_use]
    pub fn x_log(self) -> bool {
        matches!(self, LogScale::X | LogScale::Both)
    }

    /// Whether the y axis is logarithmic.
    #[must_use]
    pub fn y_log(self) -> bool {
        self == LogScale::Both
    }
}

impl FromStr for LogScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "log" => Ok(LogScale::X),
            "loglog" => Ok(LogScale::Both),
            other => Err(Error::InvalidParameter(format!(
                "logscale must be \"log\" or \"loglog\", got {other:?}"
            ))),
        }
    }
}

/// Options interpreted by the preparation engine and the renderer rather
/// than passed to the backend's draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOptions {
    /// Subplot group symbol; `None` is the default group.
    pub group: Option<char>,
    /// Draw connected segments (`true`) or markers only.
    pub line: bool,
    /// Log axis scaling.
    pub logscale: Option<LogScale>,
    /// Force equal axis scaling.
    pub orthonormal: bool,
    /// X axis limits.
    pub xlim: Option<(f64, f64)>,
    /// Y axis limits.
    pub ylim: Option<(f64, f64)>,
    /// Swap x and y data.
    pub invert: bool,
    /// Clockwise rotation in degrees.
    pub rotate: Option<f64>,
    /// Animation frame index.
    pub frame: usize,
}

impl Default for CustomOptions {
    fn default() -> Self {
        Self {
            group: None,
            line: true,
            logscale: None,
            orthonormal: false,
            xlim: None,
            ylim: None,
            invert: false,
            rotate: None,
            frame: 0,
        }
    }
}

impl CustomOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group symbol.
    #[must_use]
    pub fn group(mut self, group: char) -> Self {
        self.group = Some(group);
        self
    }

    /// Draw lines or markers only.
    #[must_use]
    pub fn line(mut self, line: bool) -> Self {
        self.line = line;
        self
    }

    /// Set log scaling.
    #[must_use]
    pub fn logscale(mut self, scale: LogScale) -> Self {
        self.logscale = Some(scale);
        self
    }

    /// Force equal axis scaling.
    #[must_use]
    pub fn orthonormal(mut self, orthonormal: bool) -> Self {
        self.orthonormal = orthonormal;
        self
    }

    /// Set x limits.
    #[must_use]
    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some((min, max));
        self
    }

    /// Set y limits.
    #[must_use]
    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some((min, max));
        self
    }

    /// Swap x and y data.
    #[must_use]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Rotate clockwise by `degrees`.
    #[must_use]
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Set the animation frame.
    #[must_use]
    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    /// Group symbol, falling back to the default group.
    #[must_use]
    pub fn group_or_default(&self) -> char {
        self.group.unwrap_or(DEFAULT_GROUP)
    }

    /// Check option values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for the reserved group symbol, a
    /// non-finite rotation angle, or non-finite limits.
    pub fn validate(&self) -> Result<()> {
        if self.group == Some(DEFAULT_GROUP) {
            return Err(Error::InvalidParameter(format!(
                "'{DEFAULT_GROUP}' is a reserved group name"
            )));
        }
        if let Some(angle) = self.rotate {
            if !angle.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "rotate must be a finite angle, got {angle}"
                )));
            }
        }
        for (name, lim) in [("xlim", self.xlim), ("ylim", self.ylim)] {
            if let Some((lo, hi)) = lim {
                if !lo.is_finite() || !hi.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "{name} bounds must be finite, got ({lo}, {hi})"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Backend style options left after custom options are removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    values: OptionMap,
}

impl StyleOptions {
    /// Wrap a style map.
    #[must_use]
    pub fn new(values: OptionMap) -> Self {
        Self { values }
    }

    /// Look up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Set an option.
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Plot label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self.values.get("label") {
            Some(OptionValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Line width in points (`linewidth` or its `lw` alias).
    #[must_use]
    pub fn linewidth(&self) -> Option<f64> {
        ["linewidth", "lw"].iter().find_map(|k| match self.values.get(*k) {
            Some(OptionValue::Number(n)) => Some(*n),
            _ => None,
        })
    }

    /// All options.
    #[must_use]
    pub fn values(&self) -> &OptionMap {
        &self.values
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Splitting
// ============================================================================

/// Separate custom options from backend style options.
///
/// `line = false` is rewritten as `linestyle = "None"` and `marker = "x"`.
/// `xrange`/`yrange` are aliases for `xlim`/`ylim` and take precedence when
/// both spellings are present. Unknown keys stay in the style options.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for a group name that is not exactly
/// one character or is reserved, and for wrongly typed values.
pub fn split(mut raw: OptionMap) -> Result<(StyleOptions, CustomOptions)> {
    let mut custom = CustomOptions::default();

    if let Some(value) = raw.remove("group") {
        let name = expect_text("group", value)?;
        let mut chars = name.chars();
        custom.group = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            (None, _) => return Err(Error::invalid("Group name cannot be empty")),
            (Some(_), Some(_)) => {
                return Err(Error::invalid(
                    "Group name cannot be longer than one unicode character",
                ))
            }
        };
    }

    if let Some(value) = raw.remove("line") {
        custom.line = expect_bool("line", value)?;
        if !custom.line {
            raw.insert("linestyle".to_string(), OptionValue::from("None"));
            raw.insert("marker".to_string(), OptionValue::from("x"));
        }
    }

    if let Some(value) = raw.remove("xrange") {
        raw.insert("xlim".to_string(), value);
    }
    if let Some(value) = raw.remove("yrange") {
        raw.insert("ylim".to_string(), value);
    }

    if let Some(value) = raw.remove("frame") {
        let frame = expect_number("frame", value)?;
        if frame < 0.0 || frame.fract() != 0.0 || !frame.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "frame must be a non-negative integer, got {frame}"
            )));
        }
        custom.frame = frame as usize;
    }
    if let Some(value) = raw.remove("invert") {
        custom.invert = expect_bool("invert", value)?;
    }
    if let Some(value) = raw.remove("logscale") {
        custom.logscale = Some(expect_text("logscale", value)?.parse()?);
    }
    if let Some(value) = raw.remove("orthonormal") {
        custom.orthonormal = expect_bool("orthonormal", value)?;
    }
    if let Some(value) = raw.remove("rotate") {
        custom.rotate = Some(expect_number("rotate", value)?);
    }
    if let Some(value) = raw.remove("xlim") {
        custom.xlim = Some(expect_range("xlim", value)?);
    }
    if let Some(value) = raw.remove("ylim") {
        custom.ylim = Some(expect_range("ylim", value)?);
    }

    custom.validate()?;
    Ok((StyleOptions::new(raw), custom))
}

fn type_error(key: &str, expected: &str, value: &OptionValue) -> Error {
    Error::InvalidParameter(format!("{key} expects {expected}, got {value}"))
}

fn expect_bool(key: &str, value: OptionValue) -> Result<bool> {
    match value {
        OptionValue::Bool(b) => Ok(b),
        other => Err(type_error(key, "a boolean", &other)),
    }
}

fn expect_number(key: &str, value: OptionValue) -> Result<f64> {
    match value {
        OptionValue::Number(n) => Ok(n),
        other => Err(type_error(key, "a number", &other)),
    }
}

fn expect_text(key: &str, value: OptionValue) -> Result<String> {
    match value {
        OptionValue::Text(s) => Ok(s),
        other => Err(type_error(key, "a string", &other)),
    }
}

fn expect_range(key: &str, value: OptionValue) -> Result<(f64, f64)> {
    match value {
        OptionValue::Range(lo, hi) => Ok((lo, hi)),
        other => Err(type_error(key, "a (min, max) range", &other)),
    }
}
