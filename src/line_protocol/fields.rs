//! Field block construction.

use crate::flatten::{Leaf, flatten};
use crate::log_record::LogRecord;
use crate::value::RecordValue;

use super::{UNKNOWN, escape::escape};

fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

fn leaf_text(leaf: &Leaf<'_>) -> String {
    match leaf {
        Leaf::Str(s) => escape(s),
        other => other.to_string(),
    }
}

fn render_sequence(items: &[RecordValue]) -> String {
    let joined = flatten(items)
        .iter()
        .map(leaf_text)
        .collect::<Vec<_>>()
        .join(",");
    quoted(&joined)
}

/// Render a field value.
///
/// Integers, finite floats and booleans stay unquoted; integers keep every
/// digit. Strings are escaped and quoted, non-finite floats are quoted, and
/// nested values are flattened into one quoted, comma-joined string. A bare
/// composite is treated as a one-element sequence.
pub fn field_value(value: &RecordValue) -> String {
    match value {
        RecordValue::Absent => quoted(UNKNOWN),
        RecordValue::Bool(b) => b.to_string(),
        RecordValue::Int(n) => n.to_string(),
        RecordValue::UInt(n) => n.to_string(),
        RecordValue::Number(n) if n.is_finite() => n.to_string(),
        RecordValue::Number(n) => quoted(&n.to_string()),
        RecordValue::Str(s) => quoted(&escape(s)),
        RecordValue::Sequence(items) => render_sequence(items),
        RecordValue::Composite(_) => render_sequence(std::slice::from_ref(value)),
    }
}

/// Render one field as `key=value`.
pub fn render_field(key: &str, value: &RecordValue) -> String {
    format!("{key}={}", field_value(value))
}

/// Build the field block for `record`: a single space followed by the
/// comma-joined fields named in `field_keys`, in the record's own order.
///
/// The space is emitted even when the record carries none of the field
/// attributes, so such a line ends in a bare space. Line-protocol parsers
/// reject a point without fields; Telegraf drops that datagram.
pub fn field_block(record: &LogRecord, field_keys: &[String]) -> String {
    let pairs: Vec<String> = record
        .attributes()
        .filter(|(key, _)| field_keys.iter().any(|k| k == key))
        .map(|(key, value)| render_field(key, value))
        .collect();
    format!(" {}", pairs.join(","))
}
