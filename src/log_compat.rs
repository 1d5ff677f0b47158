//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides `TransportLogAdapter`, an implementation of
//! `log::Log` that turns Rust-side log records into [`LogRecord`]s and hands
//! them to a [`TransportProvider`]. Install it globally with
//! [`install_log_bridge`].

use std::borrow::Cow;

use log::{Metadata, Record};

use crate::is_own_target;
use crate::level::LogLevel;
use crate::log_record::{LogRecord, RecordMetadata};
use crate::transporter::TransportProvider;

/// Adapter implementing the Rust `log::Log` trait.
#[derive(Debug)]
pub struct TransportLogAdapter {
    provider: TransportProvider,
}

impl TransportLogAdapter {
    pub fn new(provider: TransportProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &TransportProvider {
        &self.provider
    }
}

fn normalise_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

/// Convert a `log` record into the transporter's record shape.
fn to_log_record(record: &Record<'_>, level: LogLevel) -> LogRecord {
    let mut meta = RecordMetadata::new(level);
    meta.logger_name = Some(normalise_target(record.target()).into_owned());
    if let Some(file) = record.file() {
        meta = meta.with_source_file(file);
    }
    meta.line_number = record.line();
    meta.type_name = record.module_path().map(str::to_owned);
    meta.with_argument(record.args().to_string()).into()
}

impl log::Log for TransportLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_own_target(metadata.target())
            && self.provider.is_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = LogLevel::from(record.level());
        self.provider.dispatch(level, &to_log_record(record, level));
    }

    fn flush(&self) {}
}

/// Install a [`TransportLogAdapter`] as the global Rust logger.
///
/// The global max level is lowered to match the provider's minimum level.
/// Fails when a different global logger is already set. The adapter is
/// leaked and lives for the rest of the process.
pub fn install_log_bridge(provider: TransportProvider) -> Result<(), log::SetLoggerError> {
    let max_level = log::LevelFilter::from(provider.min_level);
    let adapter: &'static TransportLogAdapter =
        Box::leak(Box::new(TransportLogAdapter::new(provider)));
    log::set_logger(adapter)?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for the `log` crate bridge.

    use super::*;
    use crate::log_record::attr;
    use crate::value::RecordValue;
    use log::Log;
    use parking_lot::Mutex;
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    type Seen = Arc<Mutex<Vec<LogRecord>>>;

    fn collecting_adapter(min_level: LogLevel) -> (TransportLogAdapter, Seen) {
        let seen: Seen = Arc::default();
        let sink = Arc::clone(&seen);
        let provider = TransportProvider::new(
            min_level,
            Arc::new(move |record: &LogRecord| sink.lock().push(record.clone())),
        );
        (TransportLogAdapter::new(provider), seen)
    }

    #[fixture]
    fn adapter() -> (TransportLogAdapter, Seen) {
        collecting_adapter(LogLevel::Silly)
    }

    #[rstest]
    fn adapter_dispatches_converted_records(adapter: (TransportLogAdapter, Seen)) {
        let (adapter, seen) = adapter;
        let record = log::Record::builder()
            .args(format_args!("hello"))
            .level(log::Level::Info)
            .target("bridge::test")
            .module_path(Some("bridge::test"))
            .file(Some("src/lib.rs"))
            .line(Some(42))
            .build();

        adapter.log(&record);

        let records = seen.lock();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.get(attr::LOGGER_NAME), Some(&RecordValue::from("bridge.test")));
        assert_eq!(rec.get(attr::LOG_LEVEL), Some(&RecordValue::from("info")));
        assert_eq!(rec.get(attr::FILE_NAME), Some(&RecordValue::from("lib.rs")));
        assert_eq!(rec.get(attr::LINE_NUMBER), Some(&RecordValue::UInt(42)));
        assert_eq!(rec.get(attr::TYPE_NAME), Some(&RecordValue::from("bridge::test")));
        assert_eq!(
            rec.get(attr::ARGUMENTS_ARRAY),
            Some(&RecordValue::sequence(["hello"]))
        );
    }

    #[rstest]
    #[case(log::Level::Info, false)]
    #[case(log::Level::Warn, true)]
    #[case(log::Level::Error, true)]
    fn log_respects_provider_threshold(#[case] level: log::Level, #[case] forwarded: bool) {
        let (adapter, seen) = collecting_adapter(LogLevel::Warn);
        let record = log::Record::builder()
            .args(format_args!("msg"))
            .level(level)
            .target("app")
            .build();
        adapter.log(&record);
        assert_eq!(seen.lock().len(), usize::from(forwarded));
    }

    #[rstest]
    #[case(concat!(env!("CARGO_CRATE_NAME"), "::transporter::worker"), false)]
    #[case(env!("CARGO_CRATE_NAME"), false)]
    #[case(concat!(env!("CARGO_CRATE_NAME"), "_ext::app"), true)]
    #[case(concat!(env!("CARGO_CRATE_NAME"), "_ext"), true)]
    fn only_this_crates_targets_are_skipped(
        adapter: (TransportLogAdapter, Seen),
        #[case] target: &str,
        #[case] forwarded: bool,
    ) {
        let (adapter, seen) = adapter;
        let record = log::Record::builder()
            .args(format_args!("dropped 3 datagrams"))
            .level(log::Level::Warn)
            .target(target)
            .build();
        adapter.log(&record);
        assert_eq!(seen.lock().len(), usize::from(forwarded));
    }
}
