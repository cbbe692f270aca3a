//! Best-effort coercion of raw strings toward declared types.
//!
//! Values read from the environment arrive as strings. [`cast_to_type`]
//! converts them using a field's type descriptor and leaves anything it
//! cannot convert untouched, so the validator reports the real problem.

use std::path::PathBuf;

use crate::schema::{Record, TupleShape, Type, SETTINGS};
use crate::validator::validate_type;
use crate::value::{SettingsMap, Value};

/// Default separator for list-typed values.
pub const DEFAULT_LIST_DELIMITER: &str = ",";

/// Coerce `value` toward `ty`. Never fails.
///
/// ```
/// use dj_typed_settings::{cast_to_type, Type, Value};
///
/// assert_eq!(cast_to_type(&Value::from("True"), &Type::Bool, ","), Value::Bool(true));
/// assert_eq!(cast_to_type(&Value::from("maybe"), &Type::Bool, ","), Value::from("maybe"));
/// assert_eq!(
///     cast_to_type(&Value::from("1,2,3"), &Type::list_of(Type::Int), ","),
///     Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
/// );
/// ```
pub fn cast_to_type(value: &Value, ty: &Type, list_delimiter: &str) -> Value {
    match (ty, value) {
        (Type::Union(alternatives), _) => cast_union(value, alternatives, list_delimiter),
        (Type::None, Value::String(s)) if s.eq_ignore_ascii_case("none") => Value::Null,
        (_, Value::String(s)) => cast_str(s, ty, list_delimiter).unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

/// Coerce every known setting in `settings` in place.
///
/// Keys without a declared type are left alone.
pub fn fix_types(settings: &mut SettingsMap, list_delimiter: &str) {
    fix_types_against(settings, &SETTINGS, list_delimiter);
}

/// Alias of [`fix_types`].
pub fn fixup_types(settings: &mut SettingsMap, list_delimiter: &str) {
    fix_types(settings, list_delimiter);
}

/// Coerce the fields of `record` present in `settings` in place.
pub fn fix_types_against(settings: &mut SettingsMap, record: &Record, list_delimiter: &str) {
    for (key, value) in settings.iter_mut() {
        if let Some(field) = record.field(key) {
            *value = cast_to_type(value, &field.ty, list_delimiter);
        }
    }
}

fn cast_union(value: &Value, alternatives: &[Type], list_delimiter: &str) -> Value {
    if let Value::String(s) = value {
        if s.eq_ignore_ascii_case("none") && alternatives.contains(&Type::None) {
            return Value::Null;
        }
    }
    if value.is_null() {
        return Value::Null;
    }

    for alternative in alternatives {
        if *alternative == Type::None {
            continue;
        }
        let cast = cast_to_type(value, alternative, list_delimiter);
        if validate_type(&cast, alternative, "").is_success() {
            return cast;
        }
    }
    value.clone()
}

fn cast_str(s: &str, ty: &Type, list_delimiter: &str) -> Option<Value> {
    match ty {
        Type::Bool => {
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Some(Value::Bool(true))
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        Type::Int => s.trim().parse::<i64>().ok().map(Value::Integer),
        Type::Float => s.trim().parse::<f64>().ok().map(Value::Float),
        Type::Path => Some(Value::Path(PathBuf::from(s))),
        Type::List(item) => {
            let parts = split(s, list_delimiter);
            let items = match item {
                Some(item) => cast_all(parts, |_| Some(item.as_ref()), list_delimiter),
                None => cast_all(parts, |_| None, list_delimiter),
            };
            Some(Value::List(items))
        }
        Type::Tuple(shape) => {
            let parts = split(s, list_delimiter);
            let items = match shape {
                TupleShape::Untyped => cast_all(parts, |_| None, list_delimiter),
                TupleShape::Variadic(item) => {
                    cast_all(parts, |_| Some(item.as_ref()), list_delimiter)
                }
                TupleShape::Fixed(types) if types.len() == parts.len() => {
                    cast_all(parts, |i| types.get(i), list_delimiter)
                }
                TupleShape::Fixed(_) => cast_all(parts, |_| None, list_delimiter),
            };
            Some(Value::Tuple(items))
        }
        _ => None,
    }
}

fn split<'a>(s: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![s.trim()];
    }
    s.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

fn cast_all<'t, F>(parts: Vec<&str>, item_type: F, list_delimiter: &str) -> Vec<Value>
where
    F: Fn(usize) -> Option<&'t Type>,
{
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let raw = Value::from(part);
            match item_type(i) {
                Some(ty) => cast_to_type(&raw, ty, list_delimiter),
                None => raw,
            }
        })
        .collect()
}
