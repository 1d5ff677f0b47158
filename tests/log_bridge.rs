//! Installing the `log` bridge as the process-wide logger.
#![cfg(feature = "log-compat")]

use std::sync::Arc;

use femtologging_telegraf::{
    LogLevel, LogRecord, RecordValue, TransportProvider, install_log_bridge,
    log_record::attr,
};
use parking_lot::Mutex;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[serial]
fn installed_bridge_forwards_enabled_records() {
    let seen: Arc<Mutex<Vec<LogRecord>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let provider = TransportProvider::new(
        LogLevel::Info,
        Arc::new(move |record: &LogRecord| sink.lock().push(record.clone())),
    );

    install_log_bridge(provider.clone()).expect("no other global logger");
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::debug!(target: "app::db", "filtered out");
    log::warn!(target: "app::db", "pool exhausted");

    {
        let records = seen.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get(attr::LOGGER_NAME),
            Some(&RecordValue::from("app.db"))
        );
        assert_eq!(
            records[0].get(attr::ARGUMENTS_ARRAY),
            Some(&RecordValue::sequence(["pool exhausted"]))
        );
    }

    assert!(
        install_log_bridge(provider).is_err(),
        "a second install must fail"
    );
}
