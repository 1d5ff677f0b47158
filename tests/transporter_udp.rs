//! End-to-end delivery tests against a loopback UDP listener.

mod test_utils;

use std::collections::BTreeSet;
use std::thread;

use femtologging_telegraf::{
    LogLevel, LogRecord, RecordMetadata, RecordValue, TelegrafTransporter, TransporterConfig,
};
use rstest::rstest;
use serde_json::json;
use test_utils::{UdpListener, udp_listener};

#[rstest]
fn metadata_records_use_default_keys(udp_listener: UdpListener) {
    let transporter = udp_listener.builder("appLogs").build().expect("build");
    let mut meta = RecordMetadata::new(LogLevel::Warn)
        .with_source_file("src/server.rs")
        .with_argument("disk almost full")
        .with_argument(91.5);
    meta.logger_name = Some("server".into());
    meta.hostname = Some("edge-1".into());
    meta.line_number = Some(12);
    meta.column_number = Some(4);

    transporter.send(&meta.into());
    assert!(transporter.flush());

    assert_eq!(
        udp_listener.recv_line(),
        concat!(
            "appLogs,",
            "instanceName=\"unknown\",loggerName=\"server\",hostname=\"edge-1\",",
            "requestId=\"unknown\",logLevel=\"warn\",filePath=\"src/server.rs\",",
            "fullFilePath=\"src/server.rs\",fileName=\"server.rs\",functionName=\"unknown\",",
            "typeName=\"unknown\",methodName=\"unknown\"",
            " logLevelId=4,lineNumber=12,columnNumber=4,isConstructor=\"unknown\",",
            "argumentsArray=\"disk\\ almost\\ full,91.5\""
        )
    );
}

#[rstest]
fn json_configuration_builds_a_working_transporter(udp_listener: UdpListener) {
    let addr = udp_listener.addr();
    let config: TransporterConfig = serde_json::from_value(json!({
        "measurementName": "jsonLogs",
        "address": addr.ip().to_string(),
        "port": addr.port(),
        "socketType": "udp4",
        "minLevel": "info",
        "tagKeys": ["service"],
        "fieldKeys": ["latencyMs", "ok"],
    }))
    .expect("valid config");
    let transporter = TelegrafTransporter::new(config).expect("build");
    assert_eq!(transporter.min_level(), LogLevel::Info);

    let record: LogRecord = json!({ "ok": true, "service": "billing", "latencyMs": 12.5 })
        .as_object()
        .cloned()
        .expect("object")
        .into();
    transporter.send(&record);
    assert!(transporter.flush());

    assert_eq!(
        udp_listener.recv_line(),
        "jsonLogs,service=\"billing\" ok=true,latencyMs=12.5"
    );
}

#[rstest]
fn clones_share_one_worker(udp_listener: UdpListener) {
    let transporter = udp_listener
        .builder("m")
        .with_tag_keys(["worker"])
        .with_field_keys(["seq"])
        .build()
        .expect("build");

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let transporter = transporter.clone();
            thread::spawn(move || {
                for seq in 0..5 {
                    let record = LogRecord::new()
                        .with_attribute("worker", worker)
                        .with_attribute("seq", seq);
                    transporter.send(&record);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("sender thread");
    }
    assert!(transporter.flush());

    let lines: BTreeSet<String> = udp_listener.recv_lines(20).into_iter().collect();
    assert_eq!(lines.len(), 20);
    assert!(lines.contains("m,worker=\"3\" seq=4"));
}

#[rstest]
fn provider_outlives_the_transporter(udp_listener: UdpListener) {
    let provider = udp_listener
        .builder("m")
        .with_tag_keys(["a"])
        .with_field_keys(["b"])
        .build()
        .expect("build")
        .transport_provider();

    let record = LogRecord::new()
        .with_attribute("a", "x")
        .with_attribute("b", RecordValue::sequence(["p", "q"]));
    assert!(provider.is_enabled(LogLevel::Error));
    provider.dispatch(LogLevel::Error, &record);
    assert_eq!(udp_listener.recv_line(), "m,a=\"x\" b=\"p,q\"");
}

#[rstest]
fn records_without_selected_keys_still_send(udp_listener: UdpListener) {
    let transporter = udp_listener
        .builder("m")
        .with_tag_keys(["t"])
        .with_field_keys(["f"])
        .build()
        .expect("build");
    transporter.send(&LogRecord::new().with_attribute("other", 1));
    assert!(transporter.flush());
    assert_eq!(udp_listener.recv_line(), "m ");
}

#[rstest]
fn oversized_lines_are_dropped_silently(udp_listener: UdpListener) {
    let transporter = udp_listener
        .builder("m")
        .with_tag_keys(["t"])
        .with_field_keys(["f"])
        .with_max_datagram_size(16)
        .build()
        .expect("build");
    transporter.send(&LogRecord::new().with_attribute("f", "x".repeat(64)));
    transporter.send(&LogRecord::new().with_attribute("f", 1));
    assert!(transporter.flush());
    assert_eq!(udp_listener.recv_line(), "m f=1");
}
