//! Layered settings loading with the builder pattern.
//!
//! Sources are loaded and merged in order, string values are coerced
//! against the Django schema, and the result is validated before a
//! [`Settings`] is handed out.

use stillwater::Validation;
use tracing::debug;

use crate::cast::{fix_types, DEFAULT_LIST_DELIMITER};
use crate::env::{ConfigEnv, RealEnv};
use crate::error::{SettingError, SettingErrors};
use crate::ignore::{IgnoreSet, IGNORE_ERRORS_KEY};
use crate::schema::SETTINGS;
use crate::source::{merge_settings, Source};
use crate::validator::check_data_against_schema;
use crate::value::{SettingsMap, Value};

/// Validated Django settings.
///
/// Derefs to the underlying [`SettingsMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    values: SettingsMap,
    warnings: Vec<String>,
}

impl Settings {
    /// Create a builder.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Look up a setting by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Look up a nested value, e.g. `DATABASES.default.ENGINE`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.values.get(head)?;
        match rest {
            Some(rest) => value.get_path(rest),
            None => Some(value),
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Unknown-setting advisories produced during validation.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_map(self) -> SettingsMap {
        self.values
    }
}

impl std::ops::Deref for Settings {
    type Target = SettingsMap;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl AsRef<SettingsMap> for Settings {
    fn as_ref(&self) -> &SettingsMap {
        &self.values
    }
}

/// Builder for loading and validating settings.
///
/// # Example
///
/// ```ignore
/// use dj_typed_settings::{Defaults, DotEnv, Env, Settings};
///
/// let settings = Settings::builder()
///     .source(Defaults::schema())
///     .source(DotEnv::default())
///     .source(Env::prefix("DJANGO_"))
///     .build()?;
/// assert!(!settings.get_bool("DEBUG").unwrap_or(true));
/// ```
pub struct SettingsBuilder {
    sources: Vec<Box<dyn Source>>,
    list_delimiter: String,
    coerce_types: bool,
    ignore: IgnoreSet,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            coerce_types: true,
            ignore: IgnoreSet::default(),
        }
    }

    /// Add a settings source.
    ///
    /// Sources are applied in order, with later sources overriding earlier ones.
    pub fn source<S: Source + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Separator used when coercing strings into lists. Defaults to `,`.
    pub fn list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list_delimiter = delimiter.into();
        self
    }

    /// Coerce string values against the schema before validating.
    /// Enabled by default.
    pub fn coerce_types(mut self, enabled: bool) -> Self {
        self.coerce_types = enabled;
        self
    }

    /// Suppress errors at a dotted path, in addition to any listed in
    /// `TYPED_SETTINGS_IGNORE_ERRORS`.
    pub fn ignore(mut self, path: impl Into<String>) -> Self {
        self.ignore.insert(path);
        self
    }

    /// Build the settings using the real environment.
    pub fn build(self) -> Result<Settings, SettingErrors> {
        self.build_with_env(&RealEnv::new())
    }

    /// Build the settings with a custom environment.
    pub fn build_with_env(self, env: &dyn ConfigEnv) -> Result<Settings, SettingErrors> {
        if self.sources.is_empty() {
            return Err(SettingErrors::single(SettingError::source(
                "settings",
                "no sources configured",
            )));
        }

        let mut layers = Vec::with_capacity(self.sources.len());
        let mut all_errors = Vec::new();
        for source in &self.sources {
            match source.load(env) {
                Ok(values) => {
                    debug!(source = source.name(), count = values.len(), "loaded settings source");
                    layers.push(values);
                }
                Err(errors) => all_errors.extend(errors),
            }
        }
        if let Some(errors) = SettingErrors::from_vec(all_errors) {
            return Err(errors);
        }

        let mut merged = merge_settings(layers);
        if self.coerce_types {
            fix_types(&mut merged, &self.list_delimiter);
        }

        let mut ignore = merged
            .get(IGNORE_ERRORS_KEY)
            .map(IgnoreSet::from_value)
            .unwrap_or_default();
        for path in self.ignore.iter() {
            ignore.insert(path);
        }

        let report = check_data_against_schema(&merged, &SETTINGS, &ignore);
        let warnings = report.warnings.clone();
        match report.into_validation() {
            Validation::Success(()) => Ok(Settings {
                values: merged,
                warnings,
            }),
            Validation::Failure(errors) => Err(errors),
        }
    }
}
