//! Benchmarks for header parsing and stream scanning
//!
//! Measures the per-header cost and whole-stream throughput, with and
//! without garbage between frames.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use util::{build_frame, build_stream, garbage, FrameSpec};
use vbrinfo::{allocate_buffer, BitrateStats, ByteStream, DecodeSession, FrameHeader, FrameScanner, ReportConfig, Reporter};

fn vbr_stream(frames: usize) -> Vec<u8> {
    let specs: Vec<FrameSpec> = (0..frames)
        .map(|i| FrameSpec::mp3([96, 128, 160, 192, 256, 320][i % 6]).with_padding(i % 2 == 0))
        .collect();
    build_stream(&specs).unwrap()
}

fn benchmark_header_parse(c: &mut Criterion) {
    let header = FrameSpec::mp3(128).header().unwrap();

    c.bench_function("header_parse", |b| {
        b.iter(|| {
            let parsed = FrameHeader::parse(black_box(&header)).unwrap();
            black_box(parsed.frame_length());
        })
    });
}

fn benchmark_stats_observe(c: &mut Criterion) {
    c.bench_function("stats_observe", |b| {
        b.iter(|| {
            let mut stats = BitrateStats::new();
            for kbps in [128u32, 160, 192, 0, 320].iter().cycle().take(1000) {
                stats.observe(black_box(*kbps));
            }
            black_box(stats.average());
        })
    });
}

fn benchmark_scan_clean_stream(c: &mut Criterion) {
    let data = vbr_stream(5000);
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("clean_stream", |b| {
        b.iter(|| {
            let stream = ByteStream::with_capacity(Cursor::new(black_box(&data[..])), 64 * 1024).unwrap();
            black_box(FrameScanner::new(stream).count());
        })
    });
    group.finish();
}

fn benchmark_scan_with_garbage(c: &mut Criterion) {
    let mut data = Vec::new();
    for i in 0..2000 {
        data.extend(garbage(i % 97, i as u32));
        data.extend(build_frame(&FrameSpec::mp3(192)).unwrap());
    }
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("garbage_stream", |b| {
        b.iter(|| {
            let mut reporter = Reporter::new(std::io::sink(), ReportConfig::default());
            let mut session = DecodeSession::new(Cursor::new(black_box(&data[..])), allocate_buffer(64 * 1024).unwrap());
            session.run(&mut reporter).unwrap();
            black_box(session.stats().frames());
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_header_parse,
    benchmark_stats_observe,
    benchmark_scan_clean_stream,
    benchmark_scan_with_garbage
);
criterion_main!(benches);
