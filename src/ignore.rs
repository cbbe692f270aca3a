//! Dotted-path error suppression.

use crate::value::Value;

/// The reserved setting that carries the ignore list.
pub const IGNORE_ERRORS_KEY: &str = "TYPED_SETTINGS_IGNORE_ERRORS";

/// An ordered set of dotted paths whose errors are suppressed.
///
/// A path is ignored when it, or any dotted-prefix ancestor of it, is a
/// member. Ignoring `DATABASES.default` silences everything beneath that
/// entry; ignoring `DATABASES.default.HOST` silences only that field.
///
/// ```
/// use dj_typed_settings::IgnoreSet;
///
/// let ignore = IgnoreSet::new(["DATABASES.default"]);
/// assert!(ignore.is_ignored("DATABASES.default.HOST"));
/// assert!(!ignore.is_ignored("DATABASES.defaultdb"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: Vec<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for path in paths {
            set.insert(path);
        }
        set
    }

    /// Read the ignore list from a settings value, keeping only strings.
    pub fn from_value(value: &Value) -> Self {
        match value.as_sequence() {
            Some(items) => Self::new(items.iter().filter_map(Value::as_str)),
            None => Self::default(),
        }
    }

    /// Add a path. Duplicates are dropped.
    pub fn insert(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Check if the path or any of its ancestors is ignored.
    pub fn is_ignored(&self, path: &str) -> bool {
        if path.is_empty() || self.paths.is_empty() {
            return false;
        }
        let mut end = 0;
        for (i, segment) in path.split('.').enumerate() {
            end += segment.len() + usize::from(i > 0);
            if self.contains(&path[..end]) {
                return true;
            }
        }
        false
    }

    /// Exact membership.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
