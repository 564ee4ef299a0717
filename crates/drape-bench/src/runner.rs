//! Benchmark runner: executes scenarios and collects metrics.

use std::time::Instant;

use drape_compute::ComputeBackend;
use drape_engine::ClothSimulation;
use drape_solver::relax::max_strain;
use drape_types::DrapeResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario on the given backend.
    pub fn run(scenario: &Scenario, backend: Box<dyn ComputeBackend>) -> DrapeResult<BenchmarkMetrics> {
        let cloth = scenario.cloth();
        let pinned = scenario.pattern.pinned_mask();
        let initial = cloth.mesh.positions.clone();
        let triangle_count = cloth.mesh.triangle_count();

        let mut sim = ClothSimulation::new(cloth.mesh, cloth.constraints, scenario.params.clone(), pinned)?
            .with_backend(backend);

        let sdf_build_time = match &scenario.body {
            Some(body) => {
                let start = Instant::now();
                sim.rebuild_body_sdf(body, scenario.sdf_resolution)?;
                start.elapsed().as_secs_f64()
            }
            None => 0.0,
        };

        let mut step_times = Vec::with_capacity(scenario.timesteps as usize);
        let mut total_contacts = 0u64;
        let total_start = Instant::now();
        for _ in 0..scenario.timesteps {
            let report = sim.step();
            step_times.push(report.wall_time);
            total_contacts += report.contacts().resolved_count as u64;
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let view = sim.positions();
        let max_displacement = view
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let start = drape_math::Vec3::new(initial[i * 3], initial[i * 3 + 1], initial[i * 3 + 2]);
                p.distance(start)
            })
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            backend: sim.backend_name().to_string(),
            vertex_count: view.len(),
            triangle_count,
            constraint_count: sim.constraints().len(),
            timesteps: scenario.timesteps,
            sdf_build_time,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: sim
                .state()
                .kinetic_energy(scenario.params.mass, scenario.params.dt),
            max_displacement,
            max_structural_strain: max_strain(sim.state(), &sim.constraints().structural),
            total_contacts,
        };
        tracing::info!(
            scenario = %metrics.scenario,
            avg_step_ms = metrics.avg_step_time * 1e3,
            "benchmark finished"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(
        timesteps: Option<u32>,
        backend: impl Fn() -> Box<dyn ComputeBackend>,
    ) -> DrapeResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| {
                let mut scenario = Scenario::from_kind(kind);
                if let Some(t) = timesteps {
                    scenario.timesteps = t;
                }
                Self::run(&scenario, backend())
            })
            .collect()
    }
}
