//! Convenient re-exports for common dj-typed-settings usage.
//!
//! # Quick Start
//!
//! ```ignore
//! use dj_typed_settings::prelude::*;
//!
//! fn main() -> Result<(), SettingErrors> {
//!     load_env(".env", false).ok();
//!
//!     let settings = Settings::builder()
//!         .source(Defaults::schema())
//!         .source(Env::all().known_only().database_url("DATABASE_URL"))
//!         .build()?;
//!
//!     println!("DEBUG = {:?}", settings.get_bool("DEBUG"));
//!     Ok(())
//! }
//! ```
//!
//! # Import Patterns
//!
//! ## Selective Imports
//!
//! ```ignore
//! use dj_typed_settings::{validate_settings, Value};
//! use dj_typed_settings::error::SettingErrors;
//! ```

// ============================================================================
// Stillwater re-exports
// ============================================================================

/// Result type with error accumulation.
pub use stillwater::Validation;

/// Trait for combining values. `SettingErrors` implements this for error accumulation.
pub use stillwater::Semigroup;

/// Guaranteed non-empty collection. Underlying type for `SettingErrors`.
pub use stillwater::NonEmptyVec;

// ============================================================================
// Error types
// ============================================================================

/// A single validation failure at a settings path.
pub use crate::error::SettingError;

/// Non-empty collection of errors. Implements `Semigroup` for accumulation.
pub use crate::error::SettingErrors;

/// Type alias: `Validation<T, SettingErrors>`.
pub use crate::error::SettingsValidation;

/// Extension trait for creating failing validations easily.
pub use crate::error::SettingsValidationExt;

/// Category of a validation failure.
pub use crate::error::ErrorCode;

pub use crate::error::{DotEnvError, EnvParseError, RecordError, UrlError};

// ============================================================================
// Schema and validation
// ============================================================================

/// Type descriptors and records.
pub use crate::schema::{Field, FieldDefault, Record, TupleShape, Type};

/// The Django settings schema.
pub use crate::schema::SETTINGS;

/// Dotted-path error suppression.
pub use crate::ignore::IgnoreSet;

pub use crate::validator::{
    check_data_against_schema, settings_check, validate_data_against_schema, validate_settings,
    validate_type, Report,
};

pub use crate::cast::{cast_to_type, fix_types};

// ============================================================================
// Loading
// ============================================================================

/// Validated settings and their builder.
pub use crate::loader::{Settings, SettingsBuilder};

/// Trait for settings sources. Implement for custom sources.
pub use crate::source::Source;

pub use crate::sources::{Defaults, DotEnv, Env};

pub use crate::dotenv::load_env;

pub use crate::url::{parse_cache_url, parse_database_url};

pub use crate::records::{
    AuthPasswordValidatorConfig, CacheConfig, DatabaseConfig, TaskConfig, TemplateConfig,
};

// ============================================================================
// Environment abstractions
// ============================================================================

/// Trait for abstracting I/O operations.
pub use crate::env::ConfigEnv;

/// Real environment implementation for production use.
pub use crate::env::RealEnv;

/// Mock environment for testing.
pub use crate::env::MockEnv;

// ============================================================================
// Value types
// ============================================================================

pub use crate::value::{Mapping, SettingsMap, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_validation_types_available() {
        let _: SettingsValidation<()> = Validation::Success(());
        let failed: SettingsValidation<()> =
            SettingsValidation::fail_with(SettingError::missing("SECRET_KEY"));
        assert!(failed.is_failure());
    }

    #[test]
    fn test_prelude_semigroup_combine() {
        let e1 = SettingErrors::single(SettingError::missing("SECRET_KEY"));
        let e2 = SettingErrors::single(SettingError::wrong_type("DEBUG", "'DEBUG' must be bool, got str"));
        let combined = e1.combine(e2);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_prelude_validation_all_vec_accumulates_errors() {
        let v1: SettingsValidation<()> =
            Validation::Failure(SettingErrors::single(SettingError::missing("A")));
        let v2: SettingsValidation<()> =
            Validation::Failure(SettingErrors::single(SettingError::missing("B")));

        let result = Validation::all_vec(vec![v1, v2]);
        match result {
            Validation::Failure(errors) => assert_eq!(errors.len(), 2),
            Validation::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_prelude_nonemptyvec_available() {
        let nev = NonEmptyVec::singleton(42);
        assert_eq!(*nev.head(), 42);
    }

    #[test]
    fn test_prelude_schema_available() {
        assert!(SETTINGS.has_field("SECRET_KEY"));
        assert!(Type::optional(Type::Int).is_optional());
    }
}
