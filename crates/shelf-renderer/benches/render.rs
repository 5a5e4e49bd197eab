//! Benchmarks for Markdown rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use shelf_renderer::{render_markdown, slugify};

/// Generate a tutorial with repeated section names and in-page links.
fn generate_markdown(sections: usize, paragraphs: usize) -> String {
    let mut md = String::from("# Tutorial\n\n");
    for i in 0..sections {
        md.push_str(&format!("## Section {}\n\n", i % 5));
        md.push_str("### Example & Notes\n\n");
        for j in 0..paragraphs {
            md.push_str(&format!(
                "Paragraph {j} with **bold**, `code` and a [link](#section-{}).\n\n",
                i % 5
            ));
        }
        md.push_str("![figure](img/figure.png)\n\n");
    }
    md
}

fn bench_render_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_markdown");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(sections, paragraphs);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("tutorial", format!("{sections}s_{paragraphs}p")),
            &markdown,
            |b, md| b.iter(|| render_markdown(md, "go/concurrency/channels")),
        );
    }

    group.finish();
}

fn bench_slugify(c: &mut Criterion) {
    c.bench_function("slugify", |b| {
        b.iter(|| slugify("Error Handling & Recovery: the \u{201c}hard\u{201d} parts"));
    });
}

criterion_group!(benches, bench_render_by_size, bench_slugify);
criterion_main!(benches);
