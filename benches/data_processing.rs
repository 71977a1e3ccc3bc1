//! Benchmarks for data processing operations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serialvis_rs::pipeline::{bounds, parse_sample, RollingWindow, Tokenizer};

/// A stream of `count` readings separated by `delimiter`
fn sample_stream(count: usize, delimiter: &str) -> Vec<u8> {
    let mut stream = String::new();
    for i in 0..count {
        stream.push_str(&format!("{:.3}{}", (i as f64 * 0.01).sin() * 100.0, delimiter));
    }
    stream.into_bytes()
}

fn bench_tokenizer_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_feed");
    let stream = sample_stream(10_000, "\n");

    // Typical UART read sizes, up to the acquisition read buffer
    for chunk in [8usize, 32, 128].iter() {
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(BenchmarkId::new("newline", chunk), chunk, |b, &chunk| {
            b.iter(|| {
                let mut tokenizer = Tokenizer::new("\n").unwrap();
                let mut tokens = 0usize;
                for piece in stream.chunks(chunk) {
                    tokens += tokenizer.feed(black_box(piece)).len();
                }
                black_box(tokens)
            });
        });
    }

    let crlf = sample_stream(10_000, "\r\n");
    group.throughput(Throughput::Bytes(crlf.len() as u64));
    group.bench_function("crlf_split_delimiters", |b| {
        b.iter(|| {
            // Odd chunk size keeps splitting the two-byte delimiter
            let mut tokenizer = Tokenizer::new("\r\n").unwrap();
            let mut tokens = 0usize;
            for piece in crlf.chunks(7) {
                tokens += tokenizer.feed(black_box(piece)).len();
            }
            black_box(tokens)
        });
    });

    group.finish();
}

fn bench_sample_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_parsing");

    group.bench_function("integer", |b| {
        b.iter(|| black_box(parse_sample(black_box(b"1024"))));
    });

    group.bench_function("decimal", |b| {
        b.iter(|| black_box(parse_sample(black_box(b"-273.150"))));
    });

    group.bench_function("exponent", |b| {
        b.iter(|| black_box(parse_sample(black_box(b"6.02e23"))));
    });

    group.bench_function("malformed", |b| {
        b.iter(|| black_box(parse_sample(black_box(b"ERR:overflow"))));
    });

    group.finish();
}

fn bench_window_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_append");

    // Capacities for 80, 200 and 400 column terminals in braille mode
    for capacity in [144usize, 384, 784].iter() {
        let mut window = RollingWindow::new();
        for i in 0..*capacity {
            window.append(i as f64, *capacity);
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("at_capacity", capacity),
            capacity,
            |b, &capacity| {
                let mut i = 0u64;
                b.iter(|| {
                    window.append(black_box(i as f64), capacity);
                    i = i.wrapping_add(1);
                });
            },
        );
    }

    group.finish();
}

fn bench_frame_preparation(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_preparation");

    let capacity = 784;
    let mut window = RollingWindow::new();
    for i in 0..capacity {
        window.append((i as f64).sin(), capacity);
    }

    group.bench_function("visible_slice", |b| {
        b.iter(|| black_box(window.visible_slice(black_box(700))));
    });

    group.bench_function("recent_list", |b| {
        b.iter(|| black_box(window.recent_list(black_box(48))));
    });

    group.bench_function("bounds", |b| {
        let visible = window.visible_slice(700);
        b.iter(|| black_box(bounds(black_box(&visible))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenizer_feed,
    bench_sample_parsing,
    bench_window_append,
    bench_frame_preparation
);
criterion_main!(benches);
