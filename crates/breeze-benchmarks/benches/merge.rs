//! Theme merging performance benchmarks

use breeze_benchmarks::{create_theme_section, criterion_config};
use breeze_core::types::DefaultTheme;
use breeze_resolver::{PluginCatalog, PluginRegistry, ThemeMerger};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

/// Benchmark `extend` merging as the number of tokens grows
fn bench_extend_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("theme_extend");
    let default_theme = DefaultTheme::baseline();
    let merger = ThemeMerger::new(&default_theme);

    for tokens in [10usize, 100, 1000] {
        let section = create_theme_section(8, tokens);
        group.throughput(Throughput::Elements((8 * tokens) as u64));
        group.bench_with_input(BenchmarkId::new("tokens", tokens), &section, |b, section| {
            b.iter(|| black_box(merger.merge(Some(section), &[]).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark a chain of theme-extension plugins
fn bench_plugin_chain(c: &mut Criterion) {
    let default_theme = DefaultTheme::baseline();
    let merger = ThemeMerger::new(&default_theme);
    let references: Vec<_> = (0..32)
        .map(|i| json!({"name": format!("plugin{}", i), "theme": {"colors": {"brand": {"500": format!("#{:06x}", i)}}}}))
        .collect();
    let registry = PluginRegistry::register_all(&references, &PluginCatalog::new()).unwrap();

    c.bench_function("theme_plugin_chain", |b| {
        b.iter(|| black_box(merger.merge(None, registry.entries()).unwrap()));
    });
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_extend_merge, bench_plugin_chain
}
criterion_main!(benches);
