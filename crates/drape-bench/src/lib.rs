//! # drape-bench
//!
//! Benchmark suite for the drape pipeline.
//!
//! Provides procedural scenarios, a runner that records per-tick timing
//! and end-state quality metrics, and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
