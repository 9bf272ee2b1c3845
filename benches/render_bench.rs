//! Benchmarks for volume card rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use polly_dashboard::inventory::parse_inventory;
use polly_dashboard::{Document, DomAppender, RecordRenderer, RenderMode};

fn inventory_body(count: usize) -> Vec<u8> {
    let records: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("vol-{:06}", i),
                "name": format!("Volume <{}> & co", i),
                "size": 100 + i,
                "type": "ssd",
                "serviceName": "ebs",
                "storageProviderName": "AcmeProvider",
                "availabilityZone": "us-east-1a",
                "scheduler": "AcmeSched",
                "labels": { "tier": "gold" }
            })
        })
        .collect();

    serde_json::to_vec(&records).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000] {
        let body = inventory_body(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| parse_inventory(black_box(&body)).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let records = parse_inventory(&inventory_body(100)).unwrap();

    for mode in [RenderMode::Escaped, RenderMode::Verbatim] {
        let renderer = RecordRenderer::new(mode);
        group.throughput(Throughput::Elements(records.len() as u64));

        group.bench_function(format!("cards_{:?}", mode).to_lowercase(), |b| {
            b.iter(|| {
                for record in &records {
                    black_box(renderer.render(black_box(record)));
                }
            })
        });
    }

    group.finish();
}

fn bench_append(c: &mut Criterion) {
    let records = parse_inventory(&inventory_body(1000)).unwrap();
    let renderer = RecordRenderer::default();
    let appender = DomAppender::default();

    c.bench_function("render_and_append_1000", |b| {
        b.iter(|| {
            let mut doc = Document::dashboard();
            for record in &records {
                appender.append(&mut doc, renderer.render(record)).unwrap();
            }
            doc
        })
    });
}

criterion_group!(benches, bench_parse, bench_render, bench_append);
criterion_main!(benches);
