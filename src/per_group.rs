//! Values that may differ per subplot group.
//!
//! Figure-level settings such as labels or axis ranges apply to every
//! subplot unless overridden for specific group symbols.

use std::collections::BTreeMap;

/// A value applied uniformly or overridden per group symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum PerGroup<T> {
    /// Same value for every group.
    Uniform(T),
    /// Per-group values with a fallback for groups without an entry.
    Overrides {
        /// Values keyed by group symbol.
        values: BTreeMap<char, T>,
        /// Value for groups without an entry.
        default: T,
    },
}

impl<T: Default> Default for PerGroup<T> {
    fn default() -> Self {
        PerGroup::Uniform(T::default())
    }
}

impl<T> PerGroup<T> {
    /// Same value for every group.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        PerGroup::Uniform(value)
    }

    /// Empty overrides falling back to `default`.
    #[must_use]
    pub fn overrides(default: T) -> Self {
        PerGroup::Overrides {
            values: BTreeMap::new(),
            default,
        }
    }

    /// Override the value for `group`.
    ///
    /// A uniform value becomes the fallback for other groups.
    #[must_use]
    pub fn with(self, group: char, value: T) -> Self {
        let (mut values, default) = match self {
            PerGroup::Uniform(default) => (BTreeMap::new(), default),
            PerGroup::Overrides { values, default } => (values, default),
        };
        values.insert(group, value);
        PerGroup::Overrides { values, default }
    }

    /// Value for `group`.
    #[must_use]
    pub fn resolve(&self, group: char) -> &T {
        match self {
            PerGroup::Uniform(value) => value,
            PerGroup::Overrides { values, default } => values.get(&group).unwrap_or(default),
        }
    }

    /// Whether `group` has its own entry.
    #[must_use]
    pub fn is_overridden(&self, group: char) -> bool {
        match self {
            PerGroup::Uniform(_) => false,
            PerGroup::Overrides { values, .. } => values.contains_key(&group),
        }
    }
}

impl From<&str> for PerGroup<Option<String>> {
    fn from(value: &str) -> Self {
        PerGroup::Uniform(Some(value.to_string()))
    }
}

impl From<(f64, f64)> for PerGroup<Option<(f64, f64)>> {
    fn from(range: (f64, f64)) -> Self {
        PerGroup::Uniform(Some(range))
    }
}
