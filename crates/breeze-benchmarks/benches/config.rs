//! Configuration parsing and end-to-end resolution benchmarks

use breeze_benchmarks::{create_site, create_theme_section, criterion_config};
use breeze_config::{parse_json_config, parse_toml_config, ContentSpec, RawConfig};
use breeze_core::types::DefaultTheme;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

fn create_toml_content(patterns: usize) -> String {
    let mut content = String::from("content = [\n");
    for i in 0..patterns {
        content.push_str(&format!("  \"src/section{}/**/*.rs\",\n", i));
    }
    content.push_str("]\n\n[theme.extend.colors]\nblack = \"#1b1b1b\"\n");
    content
}

fn create_json_content(patterns: usize) -> String {
    let content: Vec<String> = (0..patterns).map(|i| format!("src/section{}/**/*.rs", i)).collect();
    json!({"content": content, "theme": {"extend": {"colors": {"black": "#1b1b1b"}}}}).to_string()
}

/// Benchmark breeze.toml and breeze.config.json parsing
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");

    for patterns in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(patterns as u64));

        let toml_content = create_toml_content(patterns);
        group.bench_with_input(BenchmarkId::new("toml", patterns), &toml_content, |b, content| {
            b.iter(|| black_box(parse_toml_config(content, "breeze.toml").unwrap()));
        });

        let json_content = create_json_content(patterns);
        group.bench_with_input(BenchmarkId::new("json", patterns), &json_content, |b, content| {
            b.iter(|| black_box(parse_json_config(content, "breeze.config.json").unwrap()));
        });
    }

    group.finish();
}

/// Benchmark a full resolution: plugins, scan and merge together
fn bench_resolve(c: &mut Criterion) {
    let site = create_site(16, 16);
    let default_theme = DefaultTheme::baseline();
    let raw = RawConfig {
        content: Some(ContentSpec::Patterns(vec!["*.html".to_string(), "./src/**/*.rs".to_string()])),
        theme: Some(create_theme_section(4, 50)),
        plugins: vec![json!({"name": "brand", "theme": {"colors": {"brand": "#0af"}}})],
    };

    c.bench_function("resolve_end_to_end", |b| {
        b.iter(|| black_box(breeze_resolver::resolve(site.path(), &raw, &default_theme).unwrap()));
    });
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_parsing, bench_resolve
}
criterion_main!(benches);
