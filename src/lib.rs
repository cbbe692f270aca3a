//! dj-typed-settings: typed validation for Django settings.
//!
//! The crate mirrors Django's global settings as a typed schema, validates
//! a settings mapping against it, and reports every problem at once. Unknown
//! keys get "did you mean" suggestions, errors can be silenced per dotted
//! path, and nested configurations (`DATABASES`, `CACHES`, `TEMPLATES`, ...)
//! are checked field by field.
//!
//! # Core Concepts
//!
//! - **Error Accumulation**: every invalid setting is reported, not just the first
//! - **Schema Graph**: a static descriptor tree built once at first use
//! - **Union Disambiguation**: the most relevant alternative's error is reported
//! - **Env Files**: a shell-like `.env` parser and loader
//! - **Testable I/O**: dependency injection via the `ConfigEnv` trait
//!
//! # Quick Start
//!
//! ```
//! use dj_typed_settings::{table, validate_settings, Value};
//!
//! let settings = match table! {
//!     "SECRET_KEY" => "change-me",
//!     "DEBUG" => true,
//!     "DATABASES" => table! {
//!         "default" => table! {
//!             "ENGINE" => "django.db.backends.sqlite3",
//!             "NAEM" => "db.sqlite3",
//!         },
//!     },
//! } {
//!     Value::Table(map) => map,
//!     _ => unreachable!(),
//! };
//!
//! let report = validate_settings(&settings);
//! assert_eq!(
//!     report.messages(),
//!     vec![
//!         "Missing required setting: DATABASES['default'].NAME",
//!         "Invalid key 'NAEM' in DATABASES['default']. Did you mean: NAME?",
//!     ]
//! );
//! ```
//!
//! # Layered Loading
//!
//! ```ignore
//! use dj_typed_settings::prelude::*;
//!
//! let settings = Settings::builder()
//!     .source(Defaults::schema())
//!     .source(DotEnv::default())
//!     .source(Env::prefix("DJANGO_").database_url("DATABASE_URL"))
//!     .build()?;
//! ```
//!
//! # Module Structure
//!
//! - [`prelude`]: Convenient re-exports for common usage
//! - [`schema`]: `Type`, `Record` and the static Django schema graph
//! - [`validator`]: structural validation and the settings entry points
//! - [`cast`]: coercion of raw strings toward declared types
//! - [`dotenv`]: `.env` parsing and loading
//! - [`url`]: database and cache URL parsing
//! - [`records`]: typed constructors for nested configurations
//! - [`loader`]: `Settings` and `SettingsBuilder`
//! - [`error`]: error types (`SettingError`, `SettingErrors`, `SettingsValidation`)
//! - [`value`]: the `Value` enum and the `Mapping` trait
//! - [`source`]: the `Source` trait
//! - [`mod@env`]: `ConfigEnv` trait and `MockEnv` for testing
//!
//! # Stillwater Integration
//!
//! | Type | Usage |
//! |------|-------|
//! | `Validation<T, E>` | Error accumulation for settings errors |
//! | `NonEmptyVec<T>` | Guaranteed non-empty error lists |
//! | `Semigroup` | Combining errors from nested checks |

pub mod cast;
pub mod dotenv;
pub mod env;
pub mod error;
pub mod ignore;
pub mod loader;
pub mod prelude;
pub mod records;
pub mod schema;
pub mod source;
pub mod sources;
pub mod suggest;
pub mod url;
pub mod validator;
pub mod value;

// Re-exports for convenience
pub use cast::{cast_to_type, fix_types, fixup_types};
pub use dotenv::{load_env, parse_env_file, parse_env_str, EnvVars};
pub use env::{ConfigEnv, MockEnv, RealEnv};
pub use error::{
    DotEnvError, EnvParseError, EnvParseErrorKind, ErrorCode, RecordError, SettingError,
    SettingErrors, SettingsValidation, SettingsValidationExt, UrlError,
};
pub use ignore::{IgnoreSet, IGNORE_ERRORS_KEY};
pub use loader::{Settings, SettingsBuilder};
pub use records::{
    AuthPasswordValidatorConfig, CacheConfig, DatabaseConfig, TaskConfig, TemplateConfig,
};
pub use schema::{Field, FieldDefault, Record, TupleShape, Type};
pub use source::Source;
pub use sources::{Defaults, DotEnv, Env};
pub use url::{parse_cache_url, parse_database_url, parse_db_url};
pub use validator::{
    check_data_against_schema, settings_check, validate_data_against_schema, validate_settings,
    validate_type, CheckLevel, CheckMessage, Report,
};
pub use value::{Mapping, SettingsMap, Value};

// Re-export stillwater types that are commonly used
pub use stillwater::{NonEmptyVec, Semigroup, Validation};
