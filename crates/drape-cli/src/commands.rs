//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;

use drape_bench::metrics::BenchmarkMetrics;
use drape_bench::runner::BenchmarkRunner;
use drape_bench::scenarios::{Scenario, ScenarioKind};
use drape_compute::{ComputeBackend, ParallelBackend, SequentialBackend};
use drape_engine::{FixedStepper, SceneConfig};
use drape_mesh::TriangleMesh;
use drape_sdf::SdfBuildConfig;
use drape_telemetry::{EventBus, JsonLinesSink, TracingSink};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Run a scene file.
pub fn simulate(
    config_path: &str,
    steps: Option<u32>,
    fps: Option<f32>,
    output_path: Option<&str>,
    events_path: Option<&str>,
) -> CliResult {
    println!("Drape Simulation");
    println!("────────────────");
    println!("Config: {config_path}");

    let scene = SceneConfig::load(config_path)?;
    let total = steps.unwrap_or(scene.steps);

    let mut bus = EventBus::with_sink(TracingSink::new(tracing::Level::TRACE));
    if let Some(path) = events_path {
        bus.add_sink(Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))));
    }

    let mut sim = scene.build()?.with_event_bus(bus);
    println!(
        "Cloth:  {} verts, {} constraints, {} pinned",
        sim.state().vertex_count(),
        sim.constraints().len(),
        sim.state().pinned_count()
    );
    match sim.body().sdf() {
        Some(grid) => println!("Body:   SDF {}³, cell {:.4}m", grid.resolution(), grid.cell_size()),
        None => println!("Body:   none"),
    }
    println!("Ticks:  {total} on {}", sim.backend_name());
    println!();

    let mut ran = 0u32;
    let mut contacts = 0u64;
    let mut wall = 0.0f64;
    let mut tick = |sim: &mut drape_engine::ClothSimulation| {
        let report = sim.step();
        contacts += report.contacts().resolved_count as u64;
        wall += report.wall_time;
    };

    match fps {
        Some(fps) if fps > 0.0 => {
            let mut stepper = FixedStepper::new(scene.simulation.dt, 8);
            let frame = 1.0 / fps as f64;
            let mut frames = 0u32;
            while ran < total {
                let due = stepper.advance(frame).min(total - ran);
                for _ in 0..due {
                    tick(&mut sim);
                }
                ran += due;
                frames += 1;
            }
            println!("Frames:        {frames} at {fps} fps");
        }
        _ => {
            for _ in 0..total {
                tick(&mut sim);
            }
            ran = total;
        }
    }

    if let Some(bus) = sim.event_bus_mut() {
        bus.finish();
    }

    let view = sim.positions();
    println!("Ticks run:     {ran}");
    println!("Sim time:      {:.3}s", sim.sim_time());
    println!("Wall time:     {wall:.3}s");
    if ran > 0 {
        println!("Avg tick:      {:.3}ms", wall / ran as f64 * 1000.0);
    }
    println!("Contacts:      {contacts}");
    if let Some(min_y) = view.min_y() {
        println!("Lowest point:  {min_y:.4}m");
    }

    if let Some(path) = output_path {
        let mesh = TriangleMesh {
            positions: view.to_vec(),
            indices: sim.mesh().indices.clone(),
        };
        serde_json::to_writer(BufWriter::new(File::create(path)?), &mesh)?;
        println!("Final mesh written to: {path}");
    }
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    steps: Option<u32>,
    sequential: bool,
    output_path: Option<&str>,
) -> CliResult {
    println!("Drape Benchmark Suite");
    println!("═════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = ScenarioKind::from_name(scenario_name).ok_or_else(|| {
            let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
            format!("Unknown scenario: '{scenario_name}'. Available: {}, all", available.join(", "))
        })?;
        vec![kind]
    };

    let backend = || -> Box<dyn ComputeBackend> {
        if sequential {
            Box::new(SequentialBackend)
        } else {
            Box::new(ParallelBackend)
        }
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(t) = steps {
            scenario.timesteps = t;
        }
        let cloth = scenario.cloth();
        println!(
            "Running: {} ({} verts, {} tris, {} steps)",
            kind.name(),
            cloth.mesh.vertex_count(),
            cloth.mesh.triangle_count(),
            scenario.timesteps,
        );

        let metrics = BenchmarkRunner::run(&scenario, backend())
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        if metrics.sdf_build_time > 0.0 {
            println!("  SDF build:     {:.3}ms", metrics.sdf_build_time * 1000.0);
        }
        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!("  Max strain:    {:.4}", metrics.max_structural_strain);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Build a scene's body SDF and report grid statistics.
pub fn sdf(config_path: &str, resolution: Option<u32>) -> CliResult {
    println!("Drape SDF Builder");
    println!("─────────────────");

    let scene = SceneConfig::load(config_path)?;
    let body = scene
        .body
        .as_ref()
        .ok_or("scene has no [body] section")?
        .mesh();
    let config = SdfBuildConfig::with_resolution(resolution.unwrap_or(scene.sdf_resolution));

    let start = std::time::Instant::now();
    let grid = config.build(&body)?;
    let elapsed = start.elapsed();

    let bounds = grid.bounds();
    let voxels = grid.distances().len();
    let unreached = grid.distances().iter().filter(|d| d.is_infinite()).count();
    println!("Triangles:     {}", body.triangle_count());
    println!("Resolution:    {}³ ({voxels} voxels)", grid.resolution());
    println!("Cell size:     {:.5}m", grid.cell_size());
    println!(
        "Bounds:        [{:.3}, {:.3}, {:.3}] – [{:.3}, {:.3}, {:.3}]",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    println!("Inside voxels: {}", grid.inside_count());
    println!("Min distance:  {:.5}m", grid.min_distance());
    if unreached > 0 {
        println!("Unreached:     {unreached}");
    }
    println!("Build time:    {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

/// Validate a scene file without running it.
pub fn validate(path: &str) -> CliResult {
    println!("Validating: {path}");

    let scene = SceneConfig::load(path)?;
    scene.validate()?;
    let cloth = scene.cloth.build();
    cloth.mesh.validate()?;
    println!(
        "  Cloth:  {}×{} ({} verts, {} tris, {} constraints)",
        cloth.rows,
        cloth.cols,
        cloth.mesh.vertex_count(),
        cloth.mesh.triangle_count(),
        cloth.constraints.len()
    );

    if let Some(shape) = &scene.body {
        let body = shape.mesh();
        body.validate()?;
        println!("  Body:   {} verts, {} tris", body.vertex_count(), body.triangle_count());
    } else {
        println!("  Body:   none");
    }
    println!("  ✓ Valid scene");
    Ok(())
}
