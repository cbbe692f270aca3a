//! Value types for settings representation.
//!
//! This module provides the `Value` enum, a dynamically-typed settings value
//! that mirrors the shapes a Django settings module can hold, and the
//! `Mapping` capability used by the validator to read record-like values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A settings mapping keyed by setting name.
pub type SettingsMap = BTreeMap<String, Value>;

/// Raw value representation for settings data.
///
/// Lists and tuples are kept apart because several settings accept one and
/// not the other. Booleans are never integers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `None`
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
    /// Filesystem path
    Path(PathBuf),
    /// Mutable sequence
    List(Vec<Value>),
    /// Immutable sequence
    Tuple(Vec<Value>),
    /// Key-value table
    Table(BTreeMap<String, Value>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a path.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Try to get the items of a list or tuple.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a table.
    pub fn as_table(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Get a value by dot-notation path (e.g., "DATABASES.default.NAME").
    ///
    /// Numeric segments index into lists and tuples.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();
        self.get_path_parts(&parts)
    }

    fn get_path_parts(&self, parts: &[&str]) -> Option<&Value> {
        if parts.is_empty() {
            return Some(self);
        }

        match self {
            Value::Table(table) => table
                .get(parts[0])
                .and_then(|v| v.get_path_parts(&parts[1..])),
            Value::List(items) | Value::Tuple(items) => parts[0]
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .and_then(|v| v.get_path_parts(&parts[1..])),
            _ => None,
        }
    }

    /// Name of this value's type as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NoneType",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "str",
            Value::Path(_) => "Path",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Table(_) => "dict",
        }
    }

    /// Convert to `serde_json::Value`. Tuples become arrays, paths strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Path(p) => serde_json::Value::String(p.display().to_string()),
            Value::List(items) | Value::Tuple(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Table(table) => serde_json::Value::Object(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Value::Path(p)
    }
}

impl From<&Path> for Value {
    fn from(p: &Path) -> Self {
        Value::Path(p.to_path_buf())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(m: BTreeMap<String, T>) -> Self {
        Value::Table(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Table(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Read access to a record-like value.
///
/// The validator walks anything implementing this trait: plain tables,
/// `Value::Table`, and the typed record structs in [`crate::records`].
pub trait Mapping {
    /// Look up a key.
    fn get_value(&self, key: &str) -> Option<&Value>;

    /// All keys present, in iteration order.
    fn keys(&self) -> Vec<&str>;

    /// Check if a key is present.
    fn contains_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }
}

impl Mapping for BTreeMap<String, Value> {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        BTreeMap::keys(self).map(String::as_str).collect()
    }
}

impl Mapping for Value {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|t| t.get(key))
    }

    fn keys(&self) -> Vec<&str> {
        match self {
            Value::Table(table) => table.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

/// Build a `Value::Table` from key-value pairs.
///
/// ```
/// use dj_typed_settings::{table, Value};
///
/// let db = table! { "ENGINE" => "django.db.backends.sqlite3", "NAME" => "db.sqlite3" };
/// assert_eq!(db.get_path("NAME"), Some(&Value::from("db.sqlite3")));
/// ```
#[macro_export]
macro_rules! table {
    () => {
        $crate::Value::Table(::std::collections::BTreeMap::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = ::std::collections::BTreeMap::new();
        $(map.insert(::std::string::String::from($key), $crate::Value::from($value));)+
        $crate::Value::Table(map)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_checks() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(true).is_null());

        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_integer(), Some(42));
        assert_eq!(Value::Bool(true).as_integer(), None);
        assert_eq!(Value::Float(2.71).as_float(), Some(2.71));
        assert_eq!(Value::Integer(42).as_float(), Some(42.0));
        assert_eq!(Value::String("hello".to_string()).as_str(), Some("hello"));
        assert_eq!(
            Value::Tuple(vec![Value::Integer(1)]).as_sequence(),
            Some(&[Value::Integer(1)][..])
        );
    }

    #[test]
    fn test_value_get_path() {
        let value = table! {
            "DATABASES" => table! { "default" => table! { "NAME" => "db.sqlite3" } },
            "TEMPLATES" => vec![table! { "BACKEND" => "jinja" }],
        };

        assert_eq!(
            value.get_path("DATABASES.default.NAME").and_then(|v| v.as_str()),
            Some("db.sqlite3")
        );
        assert_eq!(
            value.get_path("TEMPLATES.0.BACKEND").and_then(|v| v.as_str()),
            Some("jinja")
        );
        assert!(value.get_path("TEMPLATES.1").is_none());
        assert!(value.get_path("DATABASES.other").is_none());
    }

    #[test]
    fn test_value_type_name() {
        assert_eq!(Value::Null.type_name(), "NoneType");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::Integer(42).type_name(), "int");
        assert_eq!(Value::Float(2.71).type_name(), "float");
        assert_eq!(Value::from("test").type_name(), "str");
        assert_eq!(Value::from(PathBuf::from("/tmp")).type_name(), "Path");
        assert_eq!(Value::List(vec![]).type_name(), "list");
        assert_eq!(Value::Tuple(vec![]).type_name(), "tuple");
        assert_eq!(Value::Table(BTreeMap::new()).type_name(), "dict");
    }

    #[test]
    fn test_value_from_json() {
        let json = serde_json::json!({"DEBUG": true, "PORT": 25, "HOSTS": ["a"], "RATIO": 0.5});
        let value = Value::from(json);
        assert_eq!(value.get_path("DEBUG"), Some(&Value::Bool(true)));
        assert_eq!(value.get_path("PORT"), Some(&Value::Integer(25)));
        assert_eq!(value.get_path("RATIO"), Some(&Value::Float(0.5)));
        assert_eq!(
            value.get_path("HOSTS"),
            Some(&Value::List(vec![Value::from("a")]))
        );
    }

    #[test]
    fn test_value_to_json() {
        let value = table! {
            "DIRS" => Value::Tuple(vec![Value::from(PathBuf::from("/srv/templates"))]),
            "TIMEOUT" => Value::Null,
        };
        assert_eq!(
            value.to_json(),
            serde_json::json!({"DIRS": ["/srv/templates"], "TIMEOUT": null})
        );
    }

    #[test]
    fn test_mapping_on_table_value() {
        let value = table! { "A" => 1, "B" => 2 };
        assert_eq!(Mapping::keys(&value), vec!["A", "B"]);
        assert!(value.contains_key("A"));
        assert!(!Value::Integer(1).contains_key("A"));
    }
}
