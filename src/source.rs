//! The settings source trait.
//!
//! Sources produce flat [`SettingsMap`]s keyed by setting name. The loader
//! merges them in order before coercion and validation.

use crate::env::ConfigEnv;
use crate::error::SettingErrors;
use crate::value::SettingsMap;

/// A provider of settings.
///
/// Sources perform I/O through the `ConfigEnv` trait so they can be tested
/// against a `MockEnv`.
///
/// ```
/// use dj_typed_settings::env::ConfigEnv;
/// use dj_typed_settings::source::Source;
/// use dj_typed_settings::{SettingErrors, SettingsMap, Value};
///
/// struct Fixed;
///
/// impl Source for Fixed {
///     fn load(&self, _env: &dyn ConfigEnv) -> Result<SettingsMap, SettingErrors> {
///         let mut map = SettingsMap::new();
///         map.insert("DEBUG".into(), Value::Bool(true));
///         Ok(map)
///     }
///
///     fn name(&self) -> &str {
///         "fixed"
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Load settings from this source.
    fn load(&self, env: &dyn ConfigEnv) -> Result<SettingsMap, SettingErrors>;

    /// Human-readable name of this source for error messages.
    fn name(&self) -> &str;
}

/// Merge settings maps in order. Later maps replace earlier keys whole.
pub fn merge_settings(layers: Vec<SettingsMap>) -> SettingsMap {
    let mut merged = SettingsMap::new();
    for layer in layers {
        merged.extend(layer);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;
    use crate::value::Value;

    #[test]
    fn test_merge_later_wins() {
        let mut base = SettingsMap::new();
        base.insert("DEBUG".into(), Value::Bool(false));
        base.insert("TIME_ZONE".into(), Value::from("UTC"));
        base.insert("DATABASES".into(), table! { "default" => table! { "NAME" => "a" } });

        let mut overlay = SettingsMap::new();
        overlay.insert("DEBUG".into(), Value::Bool(true));
        overlay.insert("DATABASES".into(), table! { "replica" => table! { "NAME" => "b" } });

        let merged = merge_settings(vec![base, overlay]);

        assert_eq!(merged["DEBUG"], Value::Bool(true));
        assert_eq!(merged["TIME_ZONE"], Value::from("UTC"));
        assert_eq!(merged["DATABASES"].get_path("default"), None);
        assert!(merged["DATABASES"].get_path("replica").is_some());
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_settings(Vec::new()).is_empty());
    }
}
