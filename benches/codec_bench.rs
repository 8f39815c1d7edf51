//! Criterion benchmarks for slotframe
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slotframe::*;

positional! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Venue {
        #[position = 2]
        pub mic: String,
        #[position = 1]
        pub name: String,
    }
}

positional! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Trade {
        #[position = 1]
        pub symbol: String,
        #[position = 2]
        pub price: f64,
        #[position = 3]
        pub qty: u32,
        #[position = 5]
        pub venue: Venue,
        #[position = 6]
        pub note: Option<String>,
    }
}

fn trade() -> Trade {
    Trade {
        symbol: "AAPL".into(),
        price: 189.25,
        qty: 100,
        venue: Venue {
            mic: "XNAS".into(),
            name: "Nasdaq".into(),
        },
        note: None,
    }
}

fn bench_record_encode(c: &mut Criterion) {
    let record = trade();

    c.bench_function("record_to_array", |b| {
        b.iter(|| {
            let array = record_to_array(black_box(&record)).unwrap();
            black_box(array);
        });
    });

    c.bench_function("encode_record", |b| {
        b.iter(|| {
            let bytes = encode_record(black_box(&record)).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_record_decode(c: &mut Criterion) {
    let bytes = encode_record(&trade()).unwrap();

    c.bench_function("decode_record", |b| {
        b.iter(|| {
            let record: Trade = decode_record(black_box(&bytes)).unwrap();
            black_box(record);
        });
    });

    c.bench_function("decode_dynamic", |b| {
        b.iter(|| {
            let values = decode_dynamic(black_box(&bytes), true).unwrap();
            black_box(values);
        });
    });
}

fn bench_record_roundtrip(c: &mut Criterion) {
    let record = trade();

    c.bench_function("record_roundtrip", |b| {
        b.iter(|| {
            let bytes = encode_record(black_box(&record)).unwrap();
            let decoded: Trade = decode_record(&bytes).unwrap();
            black_box(decoded);
        });
    });
}

fn bench_variable_payload_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("variable_sizes");

    for len in [1usize, 16, 128, 1024] {
        let values: Vec<Value> = (0..len).map(|i| Value::from(i as u64)).collect();
        group.bench_with_input(BenchmarkId::new("encode_dynamic", len), &values, |b, values| {
            b.iter(|| {
                let bytes = encode_dynamic(black_box(values)).unwrap();
                black_box(bytes);
            });
        });
    }

    group.finish();
}

fn bench_stream_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_operations");

    for frame_count in [10usize, 100, 1000] {
        let mut stream = Stream::new(DEFAULT_MARKER);
        for i in 0..frame_count {
            let mut record = trade();
            record.qty = i as u32;
            stream.push_record(&record).unwrap();
        }
        let bytes = stream.to_bytes().unwrap();

        group.bench_with_input(
            BenchmarkId::new("parse_stream", frame_count),
            &bytes,
            |b, bytes| {
                b.iter(|| {
                    let parsed = parse_stream(black_box(bytes)).unwrap();
                    black_box(parsed);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("build_stream", frame_count),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let out = build_stream(black_box(stream.marker()), stream.frames()).unwrap();
                    black_box(out);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_record_encode,
    bench_record_decode,
    bench_record_roundtrip,
    bench_variable_payload_sizes,
    bench_stream_operations
);
criterion_main!(benches);
