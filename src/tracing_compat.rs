//! Bridge from `tracing` events to the transporter.
//!
//! [`TransportLayer`] is a `tracing_subscriber` layer. Each event becomes a
//! [`LogRecord`]: the `message` field is the first entry of
//! `argumentsArray`, any other fields form a composite second entry, and the
//! names of the enclosing spans (root first) become `functionName`.

use std::fmt;

use tracing::{
    Event, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

use crate::is_own_target;
use crate::level::LogLevel;
use crate::log_record::{LogRecord, RecordMetadata};
use crate::transporter::TransportProvider;
use crate::value::RecordValue;

/// A tracing layer that forwards events through a [`TransportProvider`].
#[derive(Debug)]
pub struct TransportLayer {
    provider: TransportProvider,
}

impl TransportLayer {
    pub fn new(provider: TransportProvider) -> Self {
        Self { provider }
    }
}

impl<S> Layer<S> for TransportLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }
        let level = LogLevel::from(*metadata.level());
        if !self.provider.is_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut meta = RecordMetadata::new(level);
        meta.logger_name = Some(metadata.target().replace("::", "."));
        if let Some(file) = metadata.file() {
            meta = meta.with_source_file(file);
        }
        meta.line_number = metadata.line();
        meta.type_name = metadata.module_path().map(str::to_owned);
        if let Some(scope) = ctx.event_scope(event) {
            let names: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            meta.function_name = Some(names.join("."));
        }
        meta.arguments = visitor.into_arguments();

        let record: LogRecord = meta.into();
        self.provider.dispatch(level, &record);
    }
}

/// Collects the message and the remaining fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, RecordValue)>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: RecordValue) {
        self.fields.push((field.name().to_owned(), value));
    }

    fn into_arguments(self) -> Vec<RecordValue> {
        let mut arguments = Vec::with_capacity(2);
        if let Some(message) = self.message {
            arguments.push(RecordValue::Str(message));
        }
        if !self.fields.is_empty() {
            arguments.push(RecordValue::Composite(self.fields));
        }
        arguments
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.push(field, RecordValue::from(value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push(field, RecordValue::Str(format!("{value:?}")));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, RecordValue::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, RecordValue::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, RecordValue::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, RecordValue::from(value));
    }
}
