use criterion::{Criterion, criterion_group, criterion_main};
use markdown_omnifocus_engine::{
    ExtractionMode, FieldPipeline, PipelineOptions, RawTask, TaskExtractor, VaultLinks,
};

fn generate_checklist(items: usize) -> String {
    let base = "## Errands\n\n- [ ] Pay [bill](https://x.example/b) [proj:: Home] #finance // 2025-03-01\n  - check the amount\n  - keep the receipt\n- [ ] Buy milk [[Recipes|Dinner]] #errand // tomorrow\n- [x] Already done\n\nSome prose between lists.\n\n";
    base.repeat(items)
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.sample_size(10);

    let content = generate_checklist(500);
    for mode in [ExtractionMode::Block, ExtractionMode::Line] {
        let extractor = TaskExtractor::new(mode);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| {
                let tasks: Vec<RawTask> =
                    extractor.extract(std::hint::black_box(&content)).collect();
                std::hint::black_box(tasks);
            });
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let content = generate_checklist(500);
    let tasks: Vec<RawTask> = TaskExtractor::default().extract(&content).collect();
    let links = VaultLinks::new("Notes");
    let pipeline = FieldPipeline::new(
        PipelineOptions::default(),
        &links,
        "obsidian://open?vault=Notes&file=inbox.md\n",
    );

    group.bench_function("process_all", |b| {
        b.iter(|| {
            let urls = pipeline.process_all(std::hint::black_box(&tasks));
            std::hint::black_box(urls);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extract, bench_pipeline);
criterion_main!(benches);
