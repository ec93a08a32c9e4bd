use beautify_core::{Document, EditPipeline, GutterSurface, TextSurface};
use beautify_highlight::{HighlightEngine, scan};
use beautify_lang::LanguageConfig;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

fn gml_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        out.push_str(&format!(
            "if (hp_{i} > {i}) {{ var s = \"hit // {i}\"; return s; }} // check {i}\n"
        ));
    }
    out.pop();
    out
}

fn bench_scan(c: &mut Criterion) {
    let text = gml_text(5_000);
    let lang = LanguageConfig::gml();
    c.bench_function("scan/5k_lines", |b| {
        b.iter(|| black_box(scan(black_box(&text), &lang).count()))
    });
}

fn bench_keystroke_rehighlight(c: &mut Criterion) {
    let text = gml_text(1_000);
    c.bench_function("rehighlight/keystroke_1k_lines", |b| {
        b.iter_batched(
            || {
                let surface = TextSurface::new(Document::from_text(&text));
                match EditPipeline::new(surface, GutterSurface::new(), HighlightEngine::gml()) {
                    Ok(pane) => pane,
                    Err(never) => match never {},
                }
            },
            |mut pane| {
                pane.insert(0, "v").unwrap();
                black_box(pane.surface().style_count());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_scan, bench_keystroke_rehighlight);
criterion_main!(benches);
