// benches/pack_bench.rs

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packed_messages::{FieldDesc, Message, Mode, Record, Ref};

fn telemetry_schema() -> Message {
    let sample = Message::new(
        "Sample",
        vec![
            FieldDesc::scalar("channel", "B"),
            FieldDesc::scalar("reading", "H"),
            FieldDesc::scalar("flags", "B"),
        ],
        Mode::Little,
    )
    .unwrap();

    Message::new(
        "Telemetry",
        vec![
            FieldDesc::scalar("version", "B"),
            FieldDesc::scalar("pad", "3x"),
            FieldDesc::scalar("count", "H"),
            FieldDesc::variable("samples", sample, Ref::objects("count")),
        ],
        Mode::Little,
    )
    .unwrap()
}

fn telemetry_record(samples: usize) -> Record {
    let subs: Vec<Record> = (0..samples)
        .map(|i| {
            Record::new()
                .with("channel", (i % 8) as u8)
                .with("reading", (i * 3) as u16)
                .with("flags", 0u8)
        })
        .collect();

    Record::new()
        .with("version", 1u8)
        .with("count", samples as u16)
        .with("samples", subs)
}

fn bench_pack(c: &mut Criterion) {
    let schema = telemetry_schema();
    let sizes = vec![10, 100, 1_000];

    let mut group = c.benchmark_group("pack");
    for size in sizes {
        let record = telemetry_record(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(schema.pack(&record).unwrap()));
        });
    }
    group.finish();
}

fn bench_unpack(c: &mut Criterion) {
    let schema = telemetry_schema();
    let sizes = vec![10, 100, 1_000];

    let mut group = c.benchmark_group("unpack");
    for size in sizes {
        let bytes = schema.pack(&telemetry_record(size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(schema.unpack(&bytes).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack, bench_unpack);
criterion_main!(benches);
