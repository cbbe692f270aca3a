//! Schema descriptor graph.
//!
//! A schema is a closed set of [`Record`]s whose fields carry a [`Type`]
//! descriptor. The graph is built once, lazily, and then only read: the
//! validator walks it, the coercion pass uses it for type hints, and
//! [`Record::defaults`] renders the default configuration from it.

mod settings;

use std::collections::BTreeMap;

use crate::value::Value;

pub use settings::{
    AUTH_PASSWORD_VALIDATOR, AUTH_PASSWORD_VALIDATORS, CACHE, CACHE_BACKENDS, DATABASE,
    DATABASE_ENGINES, SETTINGS, TASK, TASK_BACKENDS, TEMPLATE, TEMPLATE_BACKENDS,
};

/// Shape of a tuple type.
#[derive(Debug, Clone, PartialEq)]
pub enum TupleShape {
    /// Bare `tuple`: any items.
    Untyped,
    /// `tuple[T, ...]`: any length, every item a `T`.
    Variadic(Box<Type>),
    /// `tuple[T1, ..., Tn]`: exactly n items, each checked positionally.
    Fixed(Vec<Type>),
}

/// A type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Accepts anything.
    Any,
    /// Only `None`.
    None,
    Bool,
    Int,
    Float,
    Str,
    Path,
    /// One of a fixed set of strings.
    Literal(&'static [&'static str]),
    /// A list, optionally with an item type.
    List(Option<Box<Type>>),
    Tuple(TupleShape),
    /// A dict, optionally with key and value types.
    Dict(Option<(Box<Type>, Box<Type>)>),
    /// A nested record.
    Record(&'static Record),
    /// Any of the alternatives, tried in order.
    Union(Vec<Type>),
}

impl Type {
    /// `list[T]`
    pub fn list_of(item: Type) -> Type {
        Type::List(Some(Box::new(item)))
    }

    /// `tuple[T, ...]`
    pub fn tuple_of(item: Type) -> Type {
        Type::Tuple(TupleShape::Variadic(Box::new(item)))
    }

    /// `tuple[T1, ..., Tn]`
    pub fn fixed_tuple(items: Vec<Type>) -> Type {
        Type::Tuple(TupleShape::Fixed(items))
    }

    /// `dict[K, V]`
    pub fn dict_of(key: Type, value: Type) -> Type {
        Type::Dict(Some((Box::new(key), Box::new(value))))
    }

    /// `list[T] | tuple[T, ...]`
    pub fn sequence_of(item: Type) -> Type {
        Type::union(vec![Type::list_of(item.clone()), Type::tuple_of(item)])
    }

    /// A union of the alternatives. Nested unions are flattened.
    pub fn union(alternatives: Vec<Type>) -> Type {
        let mut flat = Vec::with_capacity(alternatives.len());
        for alt in alternatives {
            match alt {
                Type::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Type::Union(flat)
    }

    /// `T | None`
    pub fn optional(inner: Type) -> Type {
        Type::union(vec![inner, Type::None])
    }

    /// Name used when listing expected types in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::None => "NoneType",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Str => "str",
            Type::Path => "Path",
            Type::Literal(_) => "Literal",
            Type::List(_) => "list",
            Type::Tuple(_) => "tuple",
            Type::Dict(_) => "dict",
            Type::Record(record) => record.name,
            Type::Union(_) => "Union",
        }
    }

    /// Check if this type admits `None`.
    pub fn is_optional(&self) -> bool {
        match self {
            Type::None | Type::Any => true,
            Type::Union(alts) => alts.iter().any(Type::is_optional),
            _ => false,
        }
    }
}

/// How a field behaves when absent from the input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// Absence is an error.
    Required,
    /// A concrete default.
    Value(Value),
    /// A producer for mutable defaults (lists, dicts).
    Factory(fn() -> Value),
}

impl FieldDefault {
    /// Check if this field has no default.
    pub fn is_required(&self) -> bool {
        matches!(self, FieldDefault::Required)
    }

    /// The default value, if any.
    pub fn value(&self) -> Option<Value> {
        match self {
            FieldDefault::Required => None,
            FieldDefault::Value(v) => Some(v.clone()),
            FieldDefault::Factory(make) => Some(make()),
        }
    }
}

/// A named, typed field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub ty: Type,
    pub default: FieldDefault,
}

impl Field {
    /// A field without a default.
    pub fn required(name: &'static str, ty: Type) -> Self {
        Self {
            name,
            ty,
            default: FieldDefault::Required,
        }
    }

    /// A field with a concrete default.
    pub fn with_default(name: &'static str, ty: Type, default: impl Into<Value>) -> Self {
        Self {
            name,
            ty,
            default: FieldDefault::Value(default.into()),
        }
    }

    /// A field whose default is produced on demand.
    pub fn with_factory(name: &'static str, ty: Type, factory: fn() -> Value) -> Self {
        Self {
            name,
            ty,
            default: FieldDefault::Factory(factory),
        }
    }

    /// Check if absence of this field is an error.
    pub fn is_required(&self) -> bool {
        self.default.is_required()
    }
}

/// A named, fixed-shape group of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if the record declares a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// The default configuration for this record.
    ///
    /// Required fields are rendered as empty strings.
    pub fn defaults(&self) -> BTreeMap<String, Value> {
        self.fields
            .iter()
            .map(|f| {
                let value = f.default.value().unwrap_or_else(|| Value::from(""));
                (f.name.to_string(), value)
            })
            .collect()
    }
}
