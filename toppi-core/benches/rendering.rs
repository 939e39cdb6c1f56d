/// Benchmarks for list image composition
///
/// Run with: cargo bench -p toppi-core
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use toppi_core::{
    AssetLibrary, BackgroundImage, DesignSettings, ExportFormat, FontBook, ListContent,
    ProceduralBackgroundGenerator, RenderPipeline, RendererConfig,
};

fn pipeline(fonts: FontBook) -> RenderPipeline {
    RenderPipeline::with_parts(
        RendererConfig::default().with_seed(42),
        Arc::new(fonts),
        Arc::new(AssetLibrary::new()),
    )
}

fn content() -> ListContent {
    ListContent::new(
        "Top 5 Coffee Shops",
        ["Blue Bottle", "Stumptown", "Intelligentsia", "Counter Culture", "Verve"],
    )
}

/// Benchmark a full render per export format
fn benchmark_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_format");
    group.sample_size(20);

    let pipeline = pipeline(FontBook::load(&[], true));
    let content = content();
    let settings = DesignSettings::default();

    for format in ExportFormat::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(format.name()), &format, |b, &format| {
            b.iter(|| pipeline.render(black_box(&content), black_box(&settings), format));
        });
    }

    group.finish();
}

/// Benchmark background kinds on a square canvas
fn benchmark_backgrounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("background");
    group.sample_size(20);

    let pipeline = pipeline(FontBook::empty());
    let content = content();

    let mut gradient = DesignSettings::default();
    gradient.use_gradient = true;
    gradient.gradient_colors = vec!["#667eea".to_string(), "#764ba2".to_string()];

    let mut paper = DesignSettings::default();
    paper.background_image = Some(BackgroundImage::Named("texture-paper".to_string()));

    let cases = [
        ("solid", DesignSettings::default()),
        ("gradient", gradient),
        ("texture-paper", paper),
    ];

    for (name, settings) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), settings, |b, settings| {
            b.iter(|| pipeline.render(&content, black_box(settings), ExportFormat::InstagramPost));
        });
    }

    group.finish();
}

/// Benchmark procedural texture generation alone
fn benchmark_stock_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_generation");
    let generator = ProceduralBackgroundGenerator::default();

    for name in ["pattern-dots", "texture-fabric", "abstract-shapes"] {
        group.bench_function(name, |b| {
            b.iter(|| generator.generate(black_box(name), &mut StdRng::seed_from_u64(7)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_formats,
    benchmark_backgrounds,
    benchmark_stock_generation
);
criterion_main!(benches);
