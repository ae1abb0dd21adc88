//! Benchmarks for document chunking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docslabs::{chunk_documents, fence, ChunkConfig, Document, SentenceSplitter};

fn sample_text(size: usize) -> String {
    // Realistic tutorial-like text: prose, numbered headings, code examples
    let parts = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump! ",
        "\n```\n>>> print('The five boxing wizards jump quickly.')\n```\n",
        "Sphinx of black quartz, judge my vow. ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        if i % 25 == 24 {
            text.push_str(&format!("\n{}.{}. Section heading\n", i / 100 + 1, i % 100));
        }
        text.push_str(parts[i % parts.len()]);
        i += 1;
    }
    text
}

fn bench_sentence_splitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentence_splitter");
    let splitter = docslabs::sentence::shared();

    for size in [1_000, 10_000, 100_000] {
        let (text, _) = fence::protect(&sample_text(size));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("split", size), &text, |b, text| {
            b.iter(|| splitter.split(black_box(text)))
        });
    }

    group.finish();
}

fn bench_chunk_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_documents");
    let config = ChunkConfig::default();

    for size in [1_000, 10_000, 100_000] {
        let docs: Vec<Document> = (0..8)
            .map(|i| Document::new(sample_text(size), format!("page{i}.html"), "Bench"))
            .collect();

        group.throughput(Throughput::Bytes((size * docs.len()) as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &docs, |b, docs| {
            b.iter(|| chunk_documents(black_box(docs), &config))
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &docs, |b, docs| {
            b.iter(|| docslabs::par_chunk_documents(black_box(docs), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sentence_splitter, bench_chunk_documents);
criterion_main!(benches);
