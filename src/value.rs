use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use std::fmt;

/// A single EDN value.
///
/// Equality is structural everywhere, including nested collections; this is
/// what `Set` dedup and `Map` key lookup use. Keywords are not a separate
/// variant: a keyword literal reads as a `Symbol` whose text keeps its
/// leading `:`, and callers distinguish the two by inspecting that prefix.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// The literal `nil`.
    Nil,
    /// `true` / `false`.
    Boolean(bool),
    /// A numeric literal with a trailing `N` (arbitrary precision).
    Integer(BigInt),
    /// Any other numeric literal, and the result of dividing a ratio.
    Float(f64),
    /// A string literal, escape-decoded.
    String(String),
    /// A `\x` character literal.
    Character(char),
    /// A symbol or keyword; keyword-ness is encoded by a leading `:`.
    Symbol(String),
    /// `[...]`
    Vector(Vec<Value>),
    /// `(...)` — same shape as `Vector`, distinguished only by the source
    /// delimiter.
    List(Vec<Value>),
    /// `#{...}`, insertion-ordered, duplicates suppressed.
    Set(Vec<Value>),
    /// `{...}`, insertion-ordered, keys unique (last write wins in place).
    Map(Vec<(Value, Value)>),
    /// A `#inst "..."` timestamp resolved to an absolute point in time.
    Instant(DateTime<FixedOffset>),
}

impl Value {
    /// True for symbols written with keyword syntax (`:name`).
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        matches!(self, Value::Symbol(s) if s.starts_with(':'))
    }
}

/// Inserts into a map's backing store. A key that is already present keeps
/// its original slot and gets its value overwritten.
pub(crate) fn map_insert(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
}

/// Inserts into a set's backing store, suppressing duplicates.
pub(crate) fn set_insert(items: &mut Vec<Value>, value: Value) {
    if !items.contains(&value) {
        items.push(value);
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            // Like Clojure's `str`: content, not the quoted literal.
            Value::String(s) => f.write_str(s),
            Value::Character(c) => write!(f, "{c}"),
            Value::Symbol(s) => f.write_str(s),
            Value::Vector(items) => write_seq(f, "[", items, "]"),
            Value::List(items) => write_seq(f, "(", items, ")"),
            Value::Set(items) => write_seq(f, "#{", items, "}"),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} {v}")?;
                }
                f.write_str("}")
            }
            Value::Instant(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}
