//! Environment variable settings source.
//!
//! Variables become settings of the same name, after an optional prefix is
//! stripped. Values stay strings; the loader coerces them against the
//! schema.
//!
//! # Example
//!
//! ```ignore
//! use dj_typed_settings::{Env, SettingsBuilder};
//!
//! // DJANGO_DEBUG=true -> DEBUG
//! let settings = SettingsBuilder::new()
//!     .source(Env::prefix("DJANGO_").database_url("DATABASE_URL"))
//!     .build()?;
//! ```

use std::collections::{HashMap, HashSet};

use crate::env::ConfigEnv;
use crate::error::{SettingError, SettingErrors};
use crate::schema::SETTINGS;
use crate::source::Source;
use crate::url::{parse_cache_url, parse_database_url};
use crate::value::{SettingsMap, Value};

/// Environment variable settings source.
#[derive(Debug, Clone)]
pub struct Env {
    prefix: String,
    known_only: bool,
    custom_mappings: HashMap<String, String>,
    excluded: HashSet<String>,
    database_url: Option<String>,
    cache_url: Option<String>,
}

impl Env {
    /// Read variables starting with `prefix`, stripping it.
    ///
    /// ```ignore
    /// let source = Env::prefix("DJANGO_");
    /// // DJANGO_SECRET_KEY -> SECRET_KEY
    /// ```
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            known_only: false,
            custom_mappings: HashMap::new(),
            excluded: HashSet::new(),
            database_url: None,
            cache_url: None,
        }
    }

    /// Read every variable. Combine with [`Env::known_only`] to skip
    /// unrelated process variables such as `PATH`.
    pub fn all() -> Self {
        Self::prefix("")
    }

    /// Keep only variables naming a known Django setting.
    pub fn known_only(mut self) -> Self {
        self.known_only = true;
        self
    }

    /// Map a variable suffix (after the prefix) to a setting name.
    pub fn map(mut self, env_suffix: impl Into<String>, setting: impl Into<String>) -> Self {
        self.custom_mappings.insert(env_suffix.into(), setting.into());
        self
    }

    /// Skip a variable, by full name.
    pub fn exclude(mut self, var: impl Into<String>) -> Self {
        self.excluded.insert(var.into());
        self
    }

    /// Parse this variable (full name) as a database URL into
    /// `DATABASES['default']`.
    pub fn database_url(mut self, var: impl Into<String>) -> Self {
        self.database_url = Some(var.into());
        self
    }

    /// Parse this variable (full name) as a cache URL into
    /// `CACHES['default']`.
    pub fn cache_url(mut self, var: impl Into<String>) -> Self {
        self.cache_url = Some(var.into());
        self
    }

    fn is_url_var(&self, key: &str) -> bool {
        self.database_url.as_deref() == Some(key) || self.cache_url.as_deref() == Some(key)
    }

    fn load_urls(&self, env: &dyn ConfigEnv, settings: &mut SettingsMap) -> Vec<SettingError> {
        let mut errors = Vec::new();

        if let Some(var) = &self.database_url {
            if let Some(url) = env.get_env(var) {
                match parse_database_url(&url, None) {
                    Ok(db) => {
                        settings.insert("DATABASES".to_string(), default_alias(db.into_value()));
                    }
                    Err(e) => errors.push(SettingError::source(var.as_str(), e.to_string())),
                }
            }
        }

        if let Some(var) = &self.cache_url {
            if let Some(url) = env.get_env(var) {
                match parse_cache_url(&url, None) {
                    Ok(cache) => {
                        settings.insert("CACHES".to_string(), default_alias(cache.into_value()));
                    }
                    Err(e) => errors.push(SettingError::source(var.as_str(), e.to_string())),
                }
            }
        }

        errors
    }
}

fn default_alias(value: Value) -> Value {
    let mut table = SettingsMap::new();
    table.insert("default".to_string(), value);
    Value::Table(table)
}

impl Source for Env {
    fn load(&self, env: &dyn ConfigEnv) -> Result<SettingsMap, SettingErrors> {
        let mut settings = SettingsMap::new();

        let env_vars = if self.prefix.is_empty() {
            env.all_env_vars()
        } else {
            env.env_vars_with_prefix(&self.prefix)
        };

        for (key, value) in env_vars {
            let Some(suffix) = key.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            if suffix.is_empty() || self.excluded.contains(&key) || self.is_url_var(&key) {
                continue;
            }

            let name = self
                .custom_mappings
                .get(suffix)
                .cloned()
                .unwrap_or_else(|| suffix.to_string());
            if self.known_only && !SETTINGS.has_field(&name) {
                continue;
            }
            settings.insert(name, Value::String(value));
        }

        match SettingErrors::from_vec(self.load_urls(env, &mut settings)) {
            Some(errors) => Err(errors),
            None => Ok(settings),
        }
    }

    fn name(&self) -> &str {
        "environment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;
    use crate::error::ErrorCode;

    #[test]
    fn test_env_prefix_is_stripped() {
        let env = MockEnv::new()
            .with_env("DJANGO_DEBUG", "true")
            .with_env("DJANGO_SECRET_KEY", "s3cret")
            .with_env("OTHER_VAR", "ignored");

        let settings = Env::prefix("DJANGO_").load(&env).unwrap();

        assert_eq!(settings.len(), 2);
        assert_eq!(settings["DEBUG"], Value::from("true"));
        assert_eq!(settings["SECRET_KEY"], Value::from("s3cret"));
    }

    #[test]
    fn test_env_known_only() {
        let env = MockEnv::new()
            .with_env("PATH", "/usr/bin")
            .with_env("TIME_ZONE", "UTC");

        let settings = Env::all().known_only().load(&env).unwrap();

        assert_eq!(settings.keys().collect::<Vec<_>>(), vec!["TIME_ZONE"]);
    }

    #[test]
    fn test_env_mapping_and_exclusion() {
        let env = MockEnv::new()
            .with_env("APP_KEY", "abc")
            .with_env("APP_DEBUG", "1");

        let settings = Env::prefix("APP_")
            .map("KEY", "SECRET_KEY")
            .exclude("APP_DEBUG")
            .load(&env)
            .unwrap();

        assert_eq!(settings.len(), 1);
        assert_eq!(settings["SECRET_KEY"], Value::from("abc"));
    }

    #[test]
    fn test_env_database_and_cache_urls() {
        let env = MockEnv::new()
            .with_env("DATABASE_URL", "postgres://app:pw@db:5432/app")
            .with_env("CACHE_URL", "redis://cache:6379/0");

        let settings = Env::all()
            .database_url("DATABASE_URL")
            .cache_url("CACHE_URL")
            .load(&env)
            .unwrap();

        assert!(!settings.contains_key("DATABASE_URL"));
        assert_eq!(
            settings["DATABASES"].get_path("default.HOST"),
            Some(&Value::from("db"))
        );
        assert_eq!(
            settings["CACHES"].get_path("default.LOCATION"),
            Some(&Value::from("redis://cache:6379/0"))
        );
    }

    #[test]
    fn test_env_bad_url_is_source_error() {
        let env = MockEnv::new().with_env("DATABASE_URL", "mongodb://localhost/app");

        let errors = Env::all()
            .database_url("DATABASE_URL")
            .load(&env)
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, ErrorCode::Source);
        assert!(errors.first().message.contains("Unsupported database scheme: mongodb"));
    }
}
