//! Breeze benchmarking suite
//!
//! Benchmarks for content scanning, theme merging and configuration parsing,
//! plus the fixtures they share.

pub mod common;

pub use common::*;
