use crate::value::Value;
use num_traits::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// A serde-friendly projection of an EDN tree, for JSON/YAML convenience
/// output. This is lossy by design: symbols, characters, instants, and
/// oversized integers all flatten to strings, and map keys become their
/// display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Serializable {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Serializable>),
    Object(BTreeMap<String, Serializable>),
}

pub(crate) fn to_serializable(value: &Value) -> Serializable {
    match value {
        Value::Nil => Serializable::Null,
        Value::Boolean(b) => Serializable::Boolean(*b),
        Value::Integer(n) => match n.to_i64() {
            Some(i) => Serializable::Integer(i),
            None => Serializable::String(n.to_string()),
        },
        Value::Float(f) => Serializable::Float(*f),
        Value::String(s) => Serializable::String(s.clone()),
        Value::Character(c) => Serializable::String(c.to_string()),
        Value::Symbol(s) => Serializable::String(s.clone()),
        Value::Vector(items) | Value::List(items) | Value::Set(items) => {
            Serializable::Array(items.iter().map(to_serializable).collect())
        }
        Value::Map(entries) => {
            let mut map = BTreeMap::new();
            for (k, v) in entries {
                map.insert(k.to_string(), to_serializable(v));
            }
            Serializable::Object(map)
        }
        Value::Instant(dt) => Serializable::String(dt.to_rfc3339()),
    }
}
