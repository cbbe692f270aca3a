//! Structural validation of settings against the schema graph.
//!
//! The walker never stops at the first problem: every field of a record is
//! checked and all errors are returned together. Within a single field a
//! wrong base type short-circuits the checks of its contents.
//!
//! # Example
//!
//! ```
//! use dj_typed_settings::{validate_type, Type, Value};
//!
//! assert!(validate_type(&Value::Integer(1), &Type::union(vec![Type::Int, Type::Str]), "PORT").is_success());
//! assert!(validate_type(&Value::Float(1.5), &Type::Int, "PORT").is_failure());
//! ```

use std::fmt;

use stillwater::Validation;
use tracing::{debug, error};

use crate::error::{SettingError, SettingErrors, SettingsValidation};
use crate::ignore::{IgnoreSet, IGNORE_ERRORS_KEY};
use crate::schema::{Record, TupleShape, Type, SETTINGS};
use crate::suggest::close_matches;
use crate::value::{Mapping, SettingsMap, Value};

/// Top-level names that are commonly present but not modelled.
pub const COMMON_UNVALIDATED_SETTINGS: &[&str] = &[
    IGNORE_ERRORS_KEY,
    "BASE_DIR",
    "SITE_ID",
    "APPEND_SLASH",
    "PREPEND_WWW",
    "DEFAULT_AUTO_FIELD",
    "USE_THOUSAND_SEPARATOR",
    "NUMBER_GROUPING",
    "DECIMAL_SEPARATOR",
    "THOUSAND_SEPARATOR",
    "DATE_FORMAT",
    "DATETIME_FORMAT",
    "TIME_FORMAT",
    "SHORT_DATE_FORMAT",
    "SHORT_DATETIME_FORMAT",
    "FIRST_DAY_OF_WEEK",
    "DATE_INPUT_FORMATS",
    "TIME_INPUT_FORMATS",
    "DATETIME_INPUT_FORMATS",
    "YEAR_MONTH_FORMAT",
    "MONTH_DAY_FORMAT",
];

/// Location of a value, in two spellings.
///
/// `display` is what users read (`DATABASES['default'].PORT`); `ignore` is
/// the dotted form matched against the [`IgnoreSet`] (`DATABASES.default.PORT`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    display: String,
    ignore: String,
}

impl FieldPath {
    /// The root of a settings mapping.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path whose display and ignore spellings are the same.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            display: path.clone(),
            ignore: path,
        }
    }

    /// A path with distinct display and ignore spellings.
    pub fn with_ignore(display: impl Into<String>, ignore: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            ignore: ignore.into(),
        }
    }

    /// Child field of a record.
    pub fn field(&self, name: &str) -> Self {
        Self {
            display: join_dotted(&self.display, name),
            ignore: join_dotted(&self.ignore, name),
        }
    }

    /// Item of a list or tuple.
    pub fn index(&self, index: usize) -> Self {
        Self {
            display: format!("{}[{}]", self.display, index),
            ignore: join_dotted(&self.ignore, &index.to_string()),
        }
    }

    /// Value of a dict.
    pub fn key(&self, key: &str) -> Self {
        Self {
            display: format!("{}['{}']", self.display, key),
            ignore: join_dotted(&self.ignore, key),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn ignore_path(&self) -> &str {
        &self.ignore
    }

    pub fn is_root(&self) -> bool {
        self.display.is_empty() && self.ignore.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn join_dotted(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

/// Outcome of validating a mapping against a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Hard errors, in discovery order.
    pub errors: Vec<SettingError>,
    /// Advisories about probable top-level typos.
    pub warnings: Vec<String>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All error messages.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// The errors as a single aggregate failure.
    pub fn into_validation(self) -> SettingsValidation<()> {
        match SettingErrors::from_vec(self.errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Like [`Report::into_validation`], for `?` call sites.
    pub fn into_result(self) -> Result<(), SettingErrors> {
        match SettingErrors::from_vec(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

/// Check a value against a type descriptor.
pub fn validate_type(value: &Value, ty: &Type, path: &str) -> SettingsValidation<()> {
    validate_type_at(value, ty, &FieldPath::new(path), &IgnoreSet::default())
}

/// Check a value against a type descriptor with a separate ignore path.
pub fn validate_type_at(
    value: &Value,
    ty: &Type,
    path: &FieldPath,
    ignore: &IgnoreSet,
) -> SettingsValidation<()> {
    match check(value, ty, path, ignore) {
        Ok(()) => Validation::Success(()),
        Err(errors) => Validation::Failure(errors),
    }
}

/// Validate a mapping against a record, raising all errors together.
pub fn validate_data_against_schema<M>(
    data: &M,
    record: &Record,
    ignore: &IgnoreSet,
) -> SettingsValidation<()>
where
    M: Mapping + ?Sized,
{
    check_data_against_schema(data, record, ignore).into_validation()
}

/// Validate a mapping nested at `path` against a record.
pub fn validate_data_against_schema_at<M>(
    data: &M,
    record: &Record,
    ignore: &IgnoreSet,
    path: &FieldPath,
) -> SettingsValidation<()>
where
    M: Mapping + ?Sized,
{
    let mut report = Report::default();
    walk_record(data, record, path, ignore, &mut report);
    report.into_validation()
}

/// Validate a mapping against a record, returning errors and advisories.
pub fn check_data_against_schema<M>(data: &M, record: &Record, ignore: &IgnoreSet) -> Report
where
    M: Mapping + ?Sized,
{
    let mut report = Report::default();
    walk_record(data, record, &FieldPath::root(), ignore, &mut report);
    report
}

/// Validate a settings module's globals against the Django schema.
///
/// Dunder names are dropped and the ignore list is read from
/// `TYPED_SETTINGS_IGNORE_ERRORS`. The outcome is logged, never raised.
pub fn validate_settings(globals: &SettingsMap) -> Report {
    debug!("Validating Settings...");

    let clean: SettingsMap = globals
        .iter()
        .filter(|(k, _)| !k.starts_with("__"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let ignore = clean
        .get(IGNORE_ERRORS_KEY)
        .map(IgnoreSet::from_value)
        .unwrap_or_default();

    let report = check_data_against_schema(&clean, &SETTINGS, &ignore);
    if report.is_valid() {
        debug!("Settings are valid.");
    } else {
        error!("INVALID SETTINGS: {}", report.messages().join("\n"));
    }
    report
}

/// Severity of a framework check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckLevel {
    Warning,
    Error,
}

/// A framework start-up check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    pub level: CheckLevel,
    pub id: &'static str,
    pub msg: String,
    pub hint: Option<&'static str>,
}

/// Identifier of the invalid-settings check.
pub const INVALID_SETTINGS_CHECK: &str = "dj_typed_settings.E001";

/// Start-up check over the upper-case names of the active settings.
pub fn settings_check(settings: &SettingsMap) -> Vec<CheckMessage> {
    debug!("Validating Settings...");

    let current: SettingsMap = settings
        .iter()
        .filter(|(k, _)| is_upper(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let ignore = current
        .get(IGNORE_ERRORS_KEY)
        .map(IgnoreSet::from_value)
        .unwrap_or_default();

    match check_data_against_schema(&current, &SETTINGS, &ignore).into_result() {
        Ok(()) => {
            debug!("Settings are valid.");
            Vec::new()
        }
        Err(errors) => vec![CheckMessage {
            level: CheckLevel::Error,
            id: INVALID_SETTINGS_CHECK,
            msg: format!("Invalid Typed Setting: {}", errors),
            hint: Some("Check your settings.py file."),
        }],
    }
}

// At least one cased character, and no lowercase ones.
fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

fn walk_record<M>(
    data: &M,
    record: &Record,
    path: &FieldPath,
    ignore: &IgnoreSet,
    report: &mut Report,
) where
    M: Mapping + ?Sized,
{
    for field in &record.fields {
        let field_path = path.field(field.name);
        if ignore.is_ignored(field_path.ignore_path()) {
            continue;
        }

        match data.get_value(field.name) {
            None if field.is_required() => {
                report
                    .errors
                    .push(SettingError::missing(field_path.display()));
            }
            None => {}
            Some(value) => {
                if let Err(errors) = check(value, &field.ty, &field_path, ignore) {
                    report.errors.extend(errors);
                }
            }
        }
    }

    for key in data.keys() {
        if record.has_field(key) || key.starts_with('_') {
            continue;
        }
        let key_path = path.field(key);
        if ignore.is_ignored(key_path.ignore_path()) {
            continue;
        }

        let suggestions = close_matches(key, record.fields.iter().map(|f| f.name));
        if path.is_root() && std::ptr::eq(record, &*SETTINGS) {
            if COMMON_UNVALIDATED_SETTINGS.contains(&key) || suggestions.is_empty() {
                continue;
            }
            let advisory = format!(
                "Unknown setting '{}'. Did you mean: {}?",
                key,
                suggestions.join(", ")
            );
            debug!("{}", advisory);
            report.warnings.push(advisory);
        } else {
            let container = if path.is_root() {
                record.name
            } else {
                path.display()
            };
            let message = if suggestions.is_empty() {
                let mut valid = record.field_names();
                valid.sort_unstable();
                format!(
                    "Invalid key '{}' in {}. Valid keys are: {}",
                    key,
                    container,
                    valid.join(", ")
                )
            } else {
                format!(
                    "Invalid key '{}' in {}. Did you mean: {}?",
                    key,
                    container,
                    suggestions.join(", ")
                )
            };
            report
                .errors
                .push(SettingError::unknown_key(key_path.display(), message));
        }
    }
}

fn check(value: &Value, ty: &Type, path: &FieldPath, ignore: &IgnoreSet) -> Result<(), SettingErrors> {
    match ty {
        Type::Any => Ok(()),
        Type::None => expect(value.is_null(), value, ty, path),
        Type::Bool => expect(matches!(value, Value::Bool(_)), value, ty, path),
        Type::Int => expect(matches!(value, Value::Integer(_)), value, ty, path),
        Type::Float => expect(matches!(value, Value::Float(_)), value, ty, path),
        Type::Str => expect(matches!(value, Value::String(_)), value, ty, path),
        Type::Path => expect(matches!(value, Value::Path(_)), value, ty, path),
        Type::Literal(options) => match value {
            Value::String(s) if options.contains(&s.as_str()) => Ok(()),
            Value::String(s) => Err(wrong_type(
                path,
                format!(
                    "'{}' must be one of {}, got '{}'",
                    path,
                    options.join(", "),
                    s
                ),
            )),
            _ => expect(false, value, ty, path),
        },
        Type::List(item) => match value {
            Value::List(items) => match item {
                Some(item) => check_items(items, |_| item.as_ref(), path, ignore),
                None => Ok(()),
            },
            _ => Err(wrong_type(
                path,
                format!("'{}' must be list, got {}", path, value.type_name()),
            )),
        },
        Type::Tuple(shape) => match value {
            Value::Tuple(items) => check_tuple(items, shape, path, ignore),
            _ => Err(wrong_type(
                path,
                format!("'{}' must be tuple, got {}", path, value.type_name()),
            )),
        },
        Type::Dict(kv) => match value {
            Value::Table(table) => match kv {
                Some((_, item)) => {
                    let mut errors = Vec::new();
                    for (key, entry) in table {
                        let entry_path = path.key(key);
                        if ignore.is_ignored(entry_path.ignore_path()) {
                            continue;
                        }
                        collect_item(entry, item, &entry_path, ignore, &mut errors);
                    }
                    finish(errors)
                }
                None => Ok(()),
            },
            _ => Err(not_a_dict(value, path)),
        },
        Type::Record(record) => match value {
            Value::Table(_) => {
                let mut report = Report::default();
                walk_record(value, record, path, ignore, &mut report);
                report
                    .into_result()
                    .map_err(SettingErrors::into_value_level)
            }
            _ => Err(not_a_dict(value, path)),
        },
        Type::Union(alternatives) => check_union(value, alternatives, path, ignore),
    }
}

fn check_union(
    value: &Value,
    alternatives: &[Type],
    path: &FieldPath,
    ignore: &IgnoreSet,
) -> Result<(), SettingErrors> {
    if let Value::String(s) = value {
        let numeric_string = alternatives.contains(&Type::Str) && alternatives.contains(&Type::Int);
        if numeric_string && !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(SettingErrors::single(SettingError::wrong_content(
                path.display(),
                format!(
                    "'{}' must be a valid integer string, got '{}'",
                    path, s
                ),
            )));
        }
    }

    let mut content_failure = None;
    for alternative in alternatives {
        match check(value, alternative, path, ignore) {
            Ok(()) => return Ok(()),
            Err(errors) if !errors.is_base_type_error() => {
                content_failure.get_or_insert(errors);
            }
            Err(_) => {}
        }
    }
    if let Some(errors) = content_failure {
        return Err(errors);
    }

    let names: Vec<&str> = alternatives
        .iter()
        .map(Type::name)
        .filter(|name| *name != "NoneType")
        .collect();
    Err(wrong_type(
        path,
        format!(
            "If '{}' is specified, it must be a {}, but got {}",
            path,
            join_or(&names),
            value.type_name()
        ),
    ))
}

fn check_tuple(
    items: &[Value],
    shape: &TupleShape,
    path: &FieldPath,
    ignore: &IgnoreSet,
) -> Result<(), SettingErrors> {
    match shape {
        TupleShape::Untyped => Ok(()),
        TupleShape::Variadic(item) => check_items(items, |_| item.as_ref(), path, ignore),
        TupleShape::Fixed(types) if types.len() != items.len() => {
            Err(SettingErrors::single(SettingError::wrong_content(
                path.display(),
                format!(
                    "'{}' must have {} items, got {}",
                    path,
                    types.len(),
                    items.len()
                ),
            )))
        }
        TupleShape::Fixed(types) => check_items(items, |i| &types[i], path, ignore),
    }
}

fn check_items<'t, F>(
    items: &[Value],
    item_type: F,
    path: &FieldPath,
    ignore: &IgnoreSet,
) -> Result<(), SettingErrors>
where
    F: Fn(usize) -> &'t Type,
{
    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let item_path = path.index(i);
        if ignore.is_ignored(item_path.ignore_path()) {
            continue;
        }
        collect_item(item, item_type(i), &item_path, ignore, &mut errors);
    }
    finish(errors)
}

// A container item that is not even a mapping where a record is expected
// fails the container's own shape; every other item failure is content.
fn collect_item(
    item: &Value,
    ty: &Type,
    path: &FieldPath,
    ignore: &IgnoreSet,
    errors: &mut Vec<SettingError>,
) {
    if let Err(item_errors) = check(item, ty, path, ignore) {
        let record_shape = matches!(ty, Type::Record(_)) && item.as_table().is_none();
        if record_shape {
            errors.extend(item_errors);
        } else {
            errors.extend(item_errors.into_value_level());
        }
    }
}

fn finish(errors: Vec<SettingError>) -> Result<(), SettingErrors> {
    match SettingErrors::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

fn expect(ok: bool, value: &Value, ty: &Type, path: &FieldPath) -> Result<(), SettingErrors> {
    if ok {
        Ok(())
    } else {
        Err(wrong_type(
            path,
            format!("'{}' must be {}, got {}", path, ty.name(), value.type_name()),
        ))
    }
}

fn not_a_dict(value: &Value, path: &FieldPath) -> SettingErrors {
    wrong_type(
        path,
        format!("'{}' must be a dict, got {}", path, value.type_name()),
    )
}

fn wrong_type(path: &FieldPath, message: String) -> SettingErrors {
    SettingErrors::single(SettingError::wrong_type(path.display(), message))
}

// "a", "a or b", "a, b or c"
fn join_or(names: &[&str]) -> String {
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}
