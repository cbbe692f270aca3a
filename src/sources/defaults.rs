//! Defaults settings source.
//!
//! Defaults are typically the lowest-priority source, overridden by env
//! files and the environment.
//!
//! # Example
//!
//! ```ignore
//! use dj_typed_settings::{Defaults, Env, SettingsBuilder};
//!
//! let settings = SettingsBuilder::new()
//!     .source(Defaults::schema())
//!     .source(Defaults::partial().set("TIME_ZONE", "Europe/Paris"))
//!     .source(Env::prefix("DJANGO_"))
//!     .build()?;
//! ```

use std::sync::Arc;

use crate::env::ConfigEnv;
use crate::error::SettingErrors;
use crate::schema::{Record, SETTINGS};
use crate::source::Source;
use crate::value::{SettingsMap, Value};

#[derive(Clone)]
enum DefaultsSource {
    /// Every defaulted field of a record
    Record(&'static Record),
    /// A fixed map
    Map(SettingsMap),
    /// A closure producing the map on every load
    Fn(Arc<dyn Fn() -> SettingsMap + Send + Sync>),
}

/// Default values settings source.
#[derive(Clone)]
pub struct Defaults {
    source: DefaultsSource,
}

impl std::fmt::Debug for Defaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.source {
            DefaultsSource::Record(record) => record.name,
            DefaultsSource::Map(_) => "map",
            DefaultsSource::Fn(_) => "fn",
        };
        f.debug_struct("Defaults").field("source", &kind).finish()
    }
}

impl Defaults {
    /// Django's own defaults for every setting that has one.
    ///
    /// Required settings are left out so their absence is still reported.
    pub fn schema() -> Self {
        Self::from_record(&SETTINGS)
    }

    /// The defaults of an arbitrary record.
    pub fn from_record(record: &'static Record) -> Self {
        Self {
            source: DefaultsSource::Record(record),
        }
    }

    /// A fixed map of defaults.
    pub fn from_map(map: SettingsMap) -> Self {
        Self {
            source: DefaultsSource::Map(map),
        }
    }

    /// Defaults computed on every load.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> SettingsMap + Send + Sync + 'static,
    {
        Self {
            source: DefaultsSource::Fn(Arc::new(f)),
        }
    }

    /// An empty map for [`Defaults::set`].
    pub fn partial() -> Self {
        Self::from_map(SettingsMap::new())
    }

    /// Add a default. Turns any source into a fixed map.
    pub fn set(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = self.to_map();
        map.insert(name.into(), value.into());
        Self::from_map(map)
    }

    fn to_map(&self) -> SettingsMap {
        match &self.source {
            DefaultsSource::Record(record) => record
                .fields
                .iter()
                .filter_map(|f| f.default.value().map(|v| (f.name.to_string(), v)))
                .collect(),
            DefaultsSource::Map(map) => map.clone(),
            DefaultsSource::Fn(f) => f(),
        }
    }
}

impl Source for Defaults {
    fn load(&self, _env: &dyn ConfigEnv) -> Result<SettingsMap, SettingErrors> {
        Ok(self.to_map())
    }

    fn name(&self) -> &str {
        "defaults"
    }
}
