//! Common utilities for benchmarks

use std::fs;
use std::path::Path;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(8))
        .sample_size(50)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// A project tree with `dirs` directories of `files_per_dir` templates each,
/// plus an equal number of files no pattern should match
pub fn create_site(dirs: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for dir in 0..dirs {
        let nested = temp_dir.path().join(format!("src/section{}/components", dir));
        fs::create_dir_all(&nested).expect("Failed to create fixture directory");
        for file in 0..files_per_dir {
            write_file(&nested.join(format!("widget{}.rs", file)));
            write_file(&nested.join(format!("widget{}.snap", file)));
        }
        write_file(&temp_dir.path().join(format!("page{}.html", dir)));
    }
    temp_dir
}

fn write_file(path: &Path) {
    fs::write(path, "<div class=\"p-4 text-black\"></div>").expect("Failed to write fixture file");
}

/// A `theme` section with `categories` extended categories of `tokens` tokens
pub fn create_theme_section(categories: usize, tokens: usize) -> Value {
    let mut extend = Map::new();
    for category in 0..categories {
        let mut values = Map::new();
        for token in 0..tokens {
            values.insert(format!("token{}", token), json!({"500": format!("#{:06x}", token)}));
        }
        extend.insert(format!("category{}", category), Value::Object(values));
    }
    json!({ "colors": {"black": "#111"}, "extend": extend })
}
