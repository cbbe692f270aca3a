//! Typed constructors for the dictionaries Django expects inside
//! `TEMPLATES`, `DATABASES`, `CACHES`, `AUTH_PASSWORD_VALIDATORS` and
//! `TASKS`.
//!
//! Each config starts from its schema's defaults, rejects blank required
//! arguments, and converts into a [`Value::Table`] without unset fields.
//!
//! ```
//! use dj_typed_settings::records::DatabaseConfig;
//! use dj_typed_settings::Mapping;
//!
//! let db = DatabaseConfig::new("django.db.backends.postgresql", "app")
//!     .unwrap()
//!     .host("localhost")
//!     .port(5432);
//! assert_eq!(db.get_value("HOST").and_then(|v| v.as_str()), Some("localhost"));
//! assert!(db.validate().is_success());
//! ```

use crate::error::{RecordError, SettingsValidation};
use crate::ignore::IgnoreSet;
use crate::schema::{Record, AUTH_PASSWORD_VALIDATOR, CACHE, DATABASE, TASK, TEMPLATE};
use crate::validator::validate_data_against_schema;
use crate::value::{Mapping, SettingsMap, Value};

fn schema_defaults(record: &Record) -> SettingsMap {
    record
        .fields
        .iter()
        .filter_map(|f| {
            f.default
                .value()
                .filter(|v| !v.is_null())
                .map(|v| (f.name.to_string(), v))
        })
        .collect()
}

fn require(
    record: &'static str,
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, RecordError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(RecordError::Blank { record, field });
    }
    Ok(value)
}

macro_rules! typed_record {
    ($ty:ident, $schema:ident) => {
        impl $ty {
            /// Set a key inside `OPTIONS`.
            pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                let options = self
                    .entries
                    .entry("OPTIONS".to_string())
                    .or_insert_with(|| Value::Table(SettingsMap::new()));
                if !matches!(options, Value::Table(_)) {
                    *options = Value::Table(SettingsMap::new());
                }
                if let Value::Table(table) = options {
                    table.insert(key.into(), value.into());
                }
                self
            }

            /// Replace `OPTIONS` wholesale.
            pub fn options(mut self, options: SettingsMap) -> Self {
                self.entries.insert("OPTIONS".to_string(), Value::Table(options));
                self
            }

            /// Set an arbitrary key. `Null` removes it.
            pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.set(key, value.into());
                self
            }

            fn set(&mut self, key: impl Into<String>, value: Value) {
                let key = key.into();
                if value.is_null() {
                    self.entries.remove(&key);
                } else {
                    self.entries.insert(key, value);
                }
            }

            /// Check the config against its schema.
            pub fn validate(&self) -> SettingsValidation<()> {
                validate_data_against_schema(&self.entries, &$schema, &IgnoreSet::default())
            }

            pub fn to_value(&self) -> Value {
                Value::Table(self.entries.clone())
            }

            pub fn into_value(self) -> Value {
                Value::Table(self.entries)
            }

            pub fn as_map(&self) -> &SettingsMap {
                &self.entries
            }
        }

        impl Mapping for $ty {
            fn get_value(&self, key: &str) -> Option<&Value> {
                self.entries.get(key)
            }

            fn keys(&self) -> Vec<&str> {
                self.entries.keys().map(String::as_str).collect()
            }
        }

        impl From<$ty> for Value {
            fn from(config: $ty) -> Self {
                config.into_value()
            }
        }
    };
}

/// One `TEMPLATES` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    entries: SettingsMap,
}

impl TemplateConfig {
    pub fn new(backend: impl Into<String>) -> Result<Self, RecordError> {
        let backend = require("TEMPLATE", "BACKEND", backend)?;
        let mut entries = schema_defaults(&TEMPLATE);
        entries.insert("BACKEND".to_string(), Value::from(backend));
        Ok(Self { entries })
    }

    /// Add a template directory.
    pub fn dir(mut self, dir: impl Into<Value>) -> Self {
        let dirs = self
            .entries
            .entry("DIRS".to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        match dirs {
            Value::List(items) => items.push(dir.into()),
            other => *other = Value::List(vec![dir.into()]),
        }
        self
    }

    pub fn app_dirs(mut self, enabled: bool) -> Self {
        self.set("APP_DIRS", Value::Bool(enabled));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.set("NAME", Value::from(name.into()));
        self
    }
}

typed_record!(TemplateConfig, TEMPLATE);

/// One `DATABASES` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    entries: SettingsMap,
}

impl DatabaseConfig {
    pub fn new(engine: impl Into<String>, name: impl Into<String>) -> Result<Self, RecordError> {
        let engine = require("DATABASE", "ENGINE", engine)?;
        let name = require("DATABASE", "NAME", name)?;
        Ok(Self::from_parts(engine, name))
    }

    /// Build without rejecting blank arguments; URL parsing may produce an
    /// empty name.
    pub(crate) fn from_parts(engine: String, name: String) -> Self {
        let mut entries = schema_defaults(&DATABASE);
        entries.insert("ENGINE".to_string(), Value::from(engine));
        entries.insert("NAME".to_string(), Value::from(name));
        Self { entries }
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.set("USER", Value::from(user.into()));
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.set("PASSWORD", Value::from(password.into()));
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.set("HOST", Value::from(host.into()));
        self
    }

    /// Port as an integer or a string.
    pub fn port(mut self, port: impl Into<Value>) -> Self {
        self.set("PORT", port.into());
        self
    }

    pub fn atomic_requests(mut self, enabled: bool) -> Self {
        self.set("ATOMIC_REQUESTS", Value::Bool(enabled));
        self
    }

    pub fn autocommit(mut self, enabled: bool) -> Self {
        self.set("AUTOCOMMIT", Value::Bool(enabled));
        self
    }

    /// `None` keeps connections open indefinitely.
    pub fn conn_max_age(mut self, seconds: Option<i64>) -> Self {
        self.set("CONN_MAX_AGE", Value::from(seconds));
        self
    }

    pub fn conn_health_checks(mut self, enabled: bool) -> Self {
        self.set("CONN_HEALTH_CHECKS", Value::Bool(enabled));
        self
    }

    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.set("TIME_ZONE", Value::from(tz.into()));
        self
    }

    pub fn test(mut self, test: SettingsMap) -> Self {
        self.set("TEST", Value::Table(test));
        self
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.entries.get("ENGINE").and_then(Value::as_str)
    }
}

typed_record!(DatabaseConfig, DATABASE);

/// One `CACHES` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    entries: SettingsMap,
}

impl CacheConfig {
    pub fn new(backend: impl Into<String>) -> Result<Self, RecordError> {
        let backend = require("CACHE", "BACKEND", backend)?;
        Ok(Self::from_backend(backend))
    }

    pub(crate) fn from_backend(backend: String) -> Self {
        let mut entries = schema_defaults(&CACHE);
        entries.insert("BACKEND".to_string(), Value::from(backend));
        Self { entries }
    }

    /// A single location string or a list of servers.
    pub fn location(mut self, location: impl Into<Value>) -> Self {
        self.set("LOCATION", location.into());
        self
    }

    pub fn timeout(mut self, seconds: i64) -> Self {
        self.set("TIMEOUT", Value::Integer(seconds));
        self
    }

    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set("KEY_PREFIX", Value::from(prefix.into()));
        self
    }

    pub fn key_function(mut self, path: impl Into<String>) -> Self {
        self.set("KEY_FUNCTION", Value::from(path.into()));
        self
    }

    pub fn version(mut self, version: i64) -> Self {
        self.set("VERSION", Value::Integer(version));
        self
    }
}

typed_record!(CacheConfig, CACHE);

/// One `AUTH_PASSWORD_VALIDATORS` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPasswordValidatorConfig {
    entries: SettingsMap,
}

impl AuthPasswordValidatorConfig {
    pub fn new(name: impl Into<String>) -> Result<Self, RecordError> {
        let name = require("AUTH_PASSWORD_VALIDATOR", "NAME", name)?;
        let mut entries = schema_defaults(&AUTH_PASSWORD_VALIDATOR);
        entries.insert("NAME".to_string(), Value::from(name));
        Ok(Self { entries })
    }
}

typed_record!(AuthPasswordValidatorConfig, AUTH_PASSWORD_VALIDATOR);

/// One `TASKS` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskConfig {
    entries: SettingsMap,
}

impl TaskConfig {
    pub fn new(backend: impl Into<String>) -> Result<Self, RecordError> {
        let backend = require("TASK", "BACKEND", backend)?;
        let mut entries = schema_defaults(&TASK);
        entries.insert("BACKEND".to_string(), Value::from(backend));
        Ok(Self { entries })
    }

    pub fn queues<I, S>(mut self, queues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queues = queues.into_iter().map(|q| Value::from(q.into())).collect();
        self.set("QUEUES", Value::List(queues));
        self
    }
}

typed_record!(TaskConfig, TASK);
