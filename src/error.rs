//! Error types for the dj-typed-settings library.
//!
//! Schema validation errors accumulate through stillwater's `Validation` and
//! `Semigroup` so a single pass reports every problem in a settings mapping.
//! Parsing failures (env files, connection URLs) stop at the first problem and
//! use plain `thiserror` enums instead.

use std::fmt;
use std::path::PathBuf;

use stillwater::{NonEmptyVec, Semigroup, Validation};

/// Category of a schema validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A field without a default is absent from the input.
    MissingRequired,
    /// A value failed a structural or primitive type check.
    TypeMismatch,
    /// A key that the schema does not declare.
    UnknownKey,
    /// A settings source failed to load.
    Source,
}

impl ErrorCode {
    /// Stable lowercase identifier for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingRequired => "missing_required",
            ErrorCode::TypeMismatch => "type_mismatch",
            ErrorCode::UnknownKey => "unknown_key",
            ErrorCode::Source => "source",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single, path-qualified validation error.
///
/// `base_type` separates "this value could never be that type" from "the
/// container matched but its contents did not". Unions use the distinction to
/// pick the most specific explanation among their alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingError {
    /// Human-facing path of the offending value (e.g. `DATABASES['default'].PORT`)
    pub path: String,
    /// Complete message shown to the user
    pub message: String,
    /// Error category
    pub code: ErrorCode,
    /// Whether the value's own shape was wrong
    pub base_type: bool,
}

impl SettingError {
    /// A required field is absent.
    pub fn missing(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            message: format!("Missing required setting: {}", path),
            path,
            code: ErrorCode::MissingRequired,
            base_type: false,
        }
    }

    /// The value's type itself is wrong.
    pub fn wrong_type(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code: ErrorCode::TypeMismatch,
            base_type: true,
        }
    }

    /// The value has the right shape but invalid content.
    pub fn wrong_content(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code: ErrorCode::TypeMismatch,
            base_type: false,
        }
    }

    /// A nested key that is not declared by its record.
    pub fn unknown_key(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code: ErrorCode::UnknownKey,
            base_type: false,
        }
    }

    /// A settings source failed to load.
    pub fn source(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("{}: {}", name, message.into()),
            path: name,
            code: ErrorCode::Source,
            base_type: false,
        }
    }

    /// Check if this error describes a wrong base type.
    pub fn is_base_type_error(&self) -> bool {
        self.base_type
    }

    /// Re-label this error as a content failure of an enclosing container.
    pub fn into_value_level(mut self) -> Self {
        self.base_type = false;
        self
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SettingError {}

/// A non-empty, ordered collection of validation errors.
///
/// Uses `NonEmptyVec` from stillwater so a failure always carries at least
/// one error.
#[derive(Debug, Clone)]
pub struct SettingErrors(pub NonEmptyVec<SettingError>);

impl SettingErrors {
    /// Create from a single error.
    pub fn single(error: SettingError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Try to create from a vec, returning None if empty.
    pub fn from_vec(errors: Vec<SettingError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Get the first error (always exists).
    pub fn first(&self) -> &SettingError {
        self.0.head()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty (always false, but required for API consistency).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over errors.
    pub fn iter(&self) -> impl Iterator<Item = &SettingError> {
        self.0.iter()
    }

    /// All messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.iter().map(|e| e.message.as_str()).collect()
    }

    /// True when every contained error is a base-type error.
    pub fn is_base_type_error(&self) -> bool {
        self.iter().all(SettingError::is_base_type_error)
    }

    /// Re-label every error as a content failure.
    pub fn into_value_level(self) -> Self {
        Self(self.0.map(SettingError::into_value_level))
    }

    /// Consume into a plain vec.
    pub fn into_vec(self) -> Vec<SettingError> {
        self.0.into_vec()
    }
}

impl Semigroup for SettingErrors {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl From<SettingError> for SettingErrors {
    fn from(error: SettingError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for SettingErrors {
    type Item = SettingError;
    type IntoIter = std::vec::IntoIter<SettingError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl fmt::Display for SettingErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

impl std::error::Error for SettingErrors {}

/// The standard validation result type.
pub type SettingsValidation<T> = Validation<T, SettingErrors>;

/// Extension trait for creating validations easily.
pub trait SettingsValidationExt<T> {
    /// Create a failing validation with a single error.
    fn fail_with(error: SettingError) -> SettingsValidation<T>;
}

impl<T> SettingsValidationExt<T> for SettingsValidation<T> {
    fn fail_with(error: SettingError) -> SettingsValidation<T> {
        Validation::Failure(SettingErrors::single(error))
    }
}

/// Turn an accumulated error list into a validation.
pub fn collect_errors(errors: Vec<SettingError>) -> SettingsValidation<()> {
    match SettingErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// What went wrong while tokenizing an env file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvParseErrorKind {
    /// Content that cannot start an assignment
    ExpectedAssignment,
    /// A variable name not followed by `=`
    ExpectedOperator,
    /// A `'` that is never closed
    UnmatchedSingleQuote,
    /// A `"` that is never closed
    UnmatchedDoubleQuote,
}

impl fmt::Display for EnvParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issue = match self {
            EnvParseErrorKind::ExpectedAssignment => "Expected variable assignment",
            EnvParseErrorKind::ExpectedOperator => "Expected assignment operator",
            EnvParseErrorKind::UnmatchedSingleQuote => "Unmatched single quote",
            EnvParseErrorKind::UnmatchedDoubleQuote => "Unmatched double quote",
        };
        f.write_str(issue)
    }
}

/// An env-file syntax error with a 1-indexed location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct EnvParseError {
    /// What went wrong
    pub kind: EnvParseErrorKind,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number in characters (1-indexed)
    pub column: u32,
}

/// Errors from loading an env file into the process environment.
#[derive(Debug, thiserror::Error)]
pub enum DotEnvError {
    /// The file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file content is not a valid env file
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: EnvParseError,
    },
}

/// Errors from parsing database and cache URLs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    /// Empty or whitespace-only URL
    #[error("URL is required")]
    Empty,
    /// The URL could not be split into its components
    #[error("Invalid {kind} URL: {url}")]
    Invalid { kind: &'static str, url: String },
    /// No backend is known for this scheme
    #[error("Unsupported {kind} scheme: {scheme}")]
    UnsupportedScheme { kind: &'static str, scheme: String },
}

/// Errors from the typed record constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A required argument is blank
    #[error("{record} requires '{field}' argument.")]
    Blank {
        record: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message() {
        let err = SettingError::missing("SECRET_KEY");
        assert_eq!(err.message, "Missing required setting: SECRET_KEY");
        assert_eq!(err.code, ErrorCode::MissingRequired);
        assert_eq!(err.path, "SECRET_KEY");
    }

    #[test]
    fn test_errors_combine_preserves_order() {
        let e1 = SettingErrors::single(SettingError::missing("A"));
        let e2 = SettingErrors::single(SettingError::missing("B"));
        let combined = e1.combine(e2);
        assert_eq!(combined.len(), 2);
        assert_eq!(
            combined.to_string(),
            "Missing required setting: A\nMissing required setting: B"
        );
    }

    #[test]
    fn test_into_value_level() {
        let errors = SettingErrors::single(SettingError::wrong_type("X", "'X' must be int, got str"));
        assert!(errors.is_base_type_error());
        assert!(!errors.into_value_level().is_base_type_error());
    }

    #[test]
    fn test_collect_errors() {
        assert!(collect_errors(vec![]).is_success());
        assert!(collect_errors(vec![SettingError::missing("A")]).is_failure());
    }

    #[test]
    fn test_env_parse_error_display() {
        let err = EnvParseError {
            kind: EnvParseErrorKind::UnmatchedDoubleQuote,
            line: 3,
            column: 5,
        };
        assert_eq!(err.to_string(), "Unmatched double quote at line 3, column 5");
    }

    #[test]
    fn test_source_error() {
        let err = SettingError::source(".env", "boom");
        assert_eq!(err.code, ErrorCode::Source);
        assert_eq!(err.message, ".env: boom");
    }
}
