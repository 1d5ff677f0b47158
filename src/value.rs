//! Attribute values carried by a [`LogRecord`](crate::log_record::LogRecord).
//!
//! `RecordValue` is a closed sum type covering every shape a record attribute
//! may take. The encoder matches on it exhaustively, so adding a variant is a
//! compile-time breaking change rather than a silent formatting gap.

use std::fmt;

/// A single attribute value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RecordValue {
    /// The attribute is known but carries no value.
    #[default]
    Absent,
    Bool(bool),
    /// Signed integer, kept exact.
    Int(i64),
    /// Unsigned integer, kept exact.
    UInt(u64),
    /// Floating-point number, line protocol's default field type.
    Number(f64),
    Str(String),
    /// Ordered sequence of values.
    Sequence(Vec<RecordValue>),
    /// Ordered key/value entries; the order is the enumeration order.
    Composite(Vec<(String, RecordValue)>),
}

impl RecordValue {
    /// Build a composite from `(key, value)` pairs.
    pub fn composite<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<RecordValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Composite(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence from any iterable of convertible values.
    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<RecordValue>,
        I: IntoIterator<Item = V>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Return `true` for sequences and composites.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Composite(_))
    }
}

/// Textual form of a value. Nested values render as their flattened leaves
/// joined by commas.
impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Sequence(_) | Self::Composite(_) => {
                let leaves = crate::flatten::flatten_value(self);
                for (i, leaf) in leaves.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{leaf}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for RecordValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_number {
    ($variant:ident as $target:ty: $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for RecordValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value as $target)
                }
            }
        )*
    };
}

from_number!(Int as i64: i8, i16, i32, i64, isize);
from_number!(UInt as u64: u8, u16, u32, u64, usize);
from_number!(Number as f64: f32, f64);

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for RecordValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for RecordValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl<T: Into<RecordValue>> From<Option<T>> for RecordValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<T: Into<RecordValue>> From<Vec<T>> for RecordValue {
    fn from(value: Vec<T>) -> Self {
        Self::sequence(value)
    }
}

impl From<serde_json::Value> for RecordValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Absent,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    n.as_f64().map_or(Self::Absent, Self::Number)
                }
            }
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::sequence(items),
            Value::Object(map) => Self::composite(map),
        }
    }
}
