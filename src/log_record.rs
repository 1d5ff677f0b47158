//! Log record representation consumed by the transporter.
//!
//! A [`LogRecord`] is an ordered snapshot of named attributes. Records are
//! usually produced from [`RecordMetadata`], which knows the well-known
//! attribute set and captures the timestamp and host name at creation time,
//! but any attribute name can be attached directly.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;

use crate::level::LogLevel;
use crate::value::RecordValue;

/// Names of the well-known record attributes.
pub mod attr {
    pub const INSTANCE_NAME: &str = "instanceName";
    pub const LOGGER_NAME: &str = "loggerName";
    pub const HOSTNAME: &str = "hostname";
    pub const REQUEST_ID: &str = "requestId";
    pub const DATE: &str = "date";
    pub const LOG_LEVEL: &str = "logLevel";
    pub const LOG_LEVEL_ID: &str = "logLevelId";
    pub const FILE_PATH: &str = "filePath";
    pub const FULL_FILE_PATH: &str = "fullFilePath";
    pub const FILE_NAME: &str = "fileName";
    pub const LINE_NUMBER: &str = "lineNumber";
    pub const COLUMN_NUMBER: &str = "columnNumber";
    pub const IS_CONSTRUCTOR: &str = "isConstructor";
    pub const FUNCTION_NAME: &str = "functionName";
    pub const TYPE_NAME: &str = "typeName";
    pub const METHOD_NAME: &str = "methodName";
    pub const ARGUMENTS_ARRAY: &str = "argumentsArray";
}

static HOSTNAME: Lazy<Option<String>> = Lazy::new(|| {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
});

/// Ordered attribute snapshot for a single log event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogRecord {
    attributes: Vec<(String, RecordValue)>,
}

impl LogRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append (or replace) an attribute and return the record.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<RecordValue>,
    ) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an attribute. Replacing an existing attribute keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RecordValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Iterate attributes in their enumeration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LogRecord
where
    K: Into<String>,
    V: Into<RecordValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = LogRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for LogRecord {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Typed view of the well-known record attributes.
#[derive(Clone, Debug)]
pub struct RecordMetadata {
    pub instance_name: Option<String>,
    pub logger_name: Option<String>,
    pub hostname: Option<String>,
    pub request_id: Option<String>,
    /// Time the record was created.
    pub date: DateTime<Utc>,
    pub level: LogLevel,
    pub file_path: Option<String>,
    pub full_file_path: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
    pub is_constructor: Option<bool>,
    pub function_name: Option<String>,
    pub type_name: Option<String>,
    pub method_name: Option<String>,
    /// Positional arguments of the log call, message first.
    pub arguments: Vec<RecordValue>,
}

impl RecordMetadata {
    /// Capture the current time and host name for a record at `level`.
    pub fn new(level: LogLevel) -> Self {
        Self {
            instance_name: None,
            logger_name: None,
            hostname: HOSTNAME.clone(),
            request_id: None,
            date: Utc::now(),
            level,
            file_path: None,
            full_file_path: None,
            file_name: None,
            line_number: None,
            column_number: None,
            is_constructor: None,
            function_name: None,
            type_name: None,
            method_name: None,
            arguments: Vec::new(),
        }
    }

    /// Set `filePath`, `fullFilePath` and `fileName` from a single path.
    pub fn with_source_file(mut self, path: &str) -> Self {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        self.file_name = Some(file_name.to_owned());
        self.file_path = Some(path.to_owned());
        self.full_file_path = Some(path.to_owned());
        self
    }

    /// Append a positional argument.
    pub fn with_argument(mut self, value: impl Into<RecordValue>) -> Self {
        self.arguments.push(value.into());
        self
    }
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl From<RecordMetadata> for LogRecord {
    fn from(meta: RecordMetadata) -> Self {
        let date = meta.date.to_rfc3339_opts(SecondsFormat::Millis, true);
        LogRecord::new()
            .with_attribute(attr::INSTANCE_NAME, meta.instance_name)
            .with_attribute(attr::LOGGER_NAME, meta.logger_name)
            .with_attribute(attr::HOSTNAME, meta.hostname)
            .with_attribute(attr::REQUEST_ID, meta.request_id)
            .with_attribute(attr::DATE, date)
            .with_attribute(attr::LOG_LEVEL, meta.level.as_str())
            .with_attribute(attr::LOG_LEVEL_ID, meta.level.id())
            .with_attribute(attr::FILE_PATH, meta.file_path)
            .with_attribute(attr::FULL_FILE_PATH, meta.full_file_path)
            .with_attribute(attr::FILE_NAME, meta.file_name)
            .with_attribute(attr::LINE_NUMBER, meta.line_number)
            .with_attribute(attr::COLUMN_NUMBER, meta.column_number)
            .with_attribute(attr::IS_CONSTRUCTOR, meta.is_constructor)
            .with_attribute(attr::FUNCTION_NAME, meta.function_name)
            .with_attribute(attr::TYPE_NAME, meta.type_name)
            .with_attribute(attr::METHOD_NAME, meta.method_name)
            .with_attribute(attr::ARGUMENTS_ARRAY, RecordValue::Sequence(meta.arguments))
    }
}
