use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sc_compressor::{analyze, CompressionPipeline, Deadline, EngineConfig};

fn generate_text(size_kb: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog. In order to benchmark the compressor we need realistic content   with repetition.\n\n\n\nIt should be noted that `inline code` and https://example.com/docs must survive. Basically the MAX_BUFFER constant is really very important.\nThe quick brown fox jumps over the lazy dog.\n";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_compress(c: &mut Criterion) {
    let text_1k = generate_text(1);
    let text_10k = generate_text(10);
    let text_100k = generate_text(100);

    for &(name, target, aggressive) in &[("light", 0.05, false), ("deep", 0.5, false), ("aggressive", 0.25, true)] {
        let config = EngineConfig { target_reduction: target, aggressive_mode: aggressive, ..Default::default() };
        let pipeline = CompressionPipeline::from_config(&config);
        let deadline = Deadline::none();
        c.bench_function(&format!("compress_{name}_1kb"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(&text_1k), &deadline)))
        });
        c.bench_function(&format!("compress_{name}_10kb"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(&text_10k), &deadline)))
        });
        c.bench_function(&format!("compress_{name}_100kb"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(&text_100k), &deadline)))
        });
    }
}

fn bench_analyze(c: &mut Criterion) {
    let text_10k = generate_text(10);
    c.bench_function("analyze_10kb", |b| b.iter(|| black_box(analyze(black_box(&text_10k)))));
}

criterion_group!(benches, bench_compress, bench_analyze);
criterion_main!(benches);
