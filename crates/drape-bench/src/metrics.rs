//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Compute backend name.
    pub backend: String,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Constraints across all three kinds.
    pub constraint_count: usize,
    /// Number of ticks executed.
    pub timesteps: u32,
    /// Body SDF build time (seconds), zero without a body.
    pub sdf_build_time: f64,
    /// Total wall-clock time of all ticks (seconds).
    pub total_wall_time: f64,
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Final kinetic energy (should approach zero for a settled drape).
    pub final_kinetic_energy: f64,
    /// Maximum particle displacement from its initial position.
    pub max_displacement: f32,
    /// Largest relative stretch of a structural constraint at the end.
    pub max_structural_strain: f32,
    /// Ground and body contacts summed over all ticks.
    pub total_contacts: u64,
}

impl BenchmarkMetrics {
    /// CSV header matching [`to_csv_row`](Self::to_csv_row).
    pub fn to_csv_header() -> String {
        "scenario,backend,vertex_count,triangle_count,constraint_count,timesteps,sdf_build_ms,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,max_strain,total_contacts".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.4},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6},{}",
            self.scenario,
            self.backend,
            self.vertex_count,
            self.triangle_count,
            self.constraint_count,
            self.timesteps,
            self.sdf_build_time * 1000.0,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_structural_strain,
            self.total_contacts,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
