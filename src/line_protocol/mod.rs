//! Line-protocol encoding of log records.
//!
//! A record becomes one line of the form
//!
//! ```text
//! measurement,tag1="v1",tag2="v2" field1=1,field2="v2"
//! ```
//!
//! Tags are always quoted strings. Fields keep their type: numbers and
//! booleans are written bare, strings and nested values are quoted. Absent
//! values render as `unknown`. Encoding is infallible; every value has some
//! textual form.

pub mod escape;
mod fields;
mod tags;


pub use escape::{ESCAPE_POLICY, EscapeStep, escape};
pub use fields::{field_block, field_value, render_field};
pub use tags::{render_tag, tag_block};

use crate::log_record::LogRecord;
use crate::transporter::KeySet;

/// Text substituted for absent values.
pub const UNKNOWN: &str = "unknown";

/// Encode `record` as a single line for `measurement`.
pub fn encode(record: &LogRecord, measurement: &str, keys: &KeySet) -> String {
    let tags = tag_block(record, keys.tag_keys());
    let fields = field_block(record, keys.field_keys());
    let mut line = String::with_capacity(measurement.len() + tags.len() + fields.len());
    line.push_str(measurement);
    line.push_str(&tags);
    line.push_str(&fields);
    line
}

/// Measurement name and key partition bound together for repeated encoding.
#[derive(Clone, Debug)]
pub struct LineEncoder {
    measurement: String,
    keys: KeySet,
}

impl LineEncoder {
    pub fn new(measurement: impl Into<String>, keys: KeySet) -> Self {
        Self {
            measurement: measurement.into(),
            keys,
        }
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Encode a record into its line.
    pub fn encode(&self, record: &LogRecord) -> String {
        encode(record, &self.measurement, &self.keys)
    }
}
