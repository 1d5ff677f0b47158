//! Benchmarks for line-protocol encoding on the caller's thread.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use femtologging_telegraf::{
    KeySet, LineEncoder, LogLevel, LogRecord, RecordMetadata, RecordValue, flatten,
};

fn metadata_record() -> LogRecord {
    let mut meta = RecordMetadata::new(LogLevel::Error)
        .with_source_file("src/server/handlers.rs")
        .with_argument("request failed")
        .with_argument(RecordValue::composite([
            ("status", RecordValue::from(503)),
            ("retryable", RecordValue::from(true)),
            ("path", RecordValue::from("/api/v1/orders")),
        ]));
    meta.logger_name = Some("server.handlers".into());
    meta.line_number = Some(118);
    meta.column_number = Some(9);
    meta.into()
}

fn nested(depth: usize) -> RecordValue {
    (0..depth).fold(RecordValue::from("leaf"), |inner, level| {
        RecordValue::composite([
            (format!("k{level}"), inner),
            ("n".to_owned(), RecordValue::from(level)),
        ])
    })
}

fn bench_encode(c: &mut Criterion) {
    let encoder = LineEncoder::new("bench", KeySet::default());
    let record = metadata_record();
    c.bench_function("encode_default_keys", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&record))))
    });
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    for depth in [4usize, 64, 1024] {
        let values = vec![nested(depth)];
        group.bench_with_input(BenchmarkId::from_parameter(depth), &values, |b, values| {
            b.iter(|| black_box(flatten(black_box(values)).len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_flatten);
criterion_main!(benches);
