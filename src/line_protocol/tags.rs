//! Tag block construction.

use crate::flatten::flatten_value;
use crate::log_record::LogRecord;
use crate::value::RecordValue;

use super::{UNKNOWN, escape::escape};

/// Textual form of a tag value before escaping.
///
/// Nested values are flattened and their leaves joined with single spaces;
/// commas would be stripped by the escaping policy anyway.
fn tag_text(value: &RecordValue) -> String {
    match value {
        RecordValue::Absent => UNKNOWN.to_owned(),
        RecordValue::Bool(b) => b.to_string(),
        RecordValue::Int(n) => n.to_string(),
        RecordValue::UInt(n) => n.to_string(),
        RecordValue::Number(n) => n.to_string(),
        RecordValue::Str(s) => s.clone(),
        RecordValue::Sequence(_) | RecordValue::Composite(_) => flatten_value(value)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Render one tag as `key="value"`.
pub fn render_tag(key: &str, value: &RecordValue) -> String {
    format!("{key}=\"{}\"", escape(&tag_text(value)))
}

/// Build the tag block for `record`.
///
/// Attributes named in `tag_keys` are rendered in the record's own order and
/// joined by commas behind a leading comma. Returns an empty string when the
/// record carries none of the tag attributes.
pub fn tag_block(record: &LogRecord, tag_keys: &[String]) -> String {
    let pairs: Vec<String> = record
        .attributes()
        .filter(|(key, _)| tag_keys.iter().any(|k| k == key))
        .map(|(key, value)| render_tag(key, value))
        .collect();
    if pairs.is_empty() {
        return String::new();
    }
    format!(",{}", pairs.join(","))
}
