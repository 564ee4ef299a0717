//! The per-tick simulation pipeline.

use std::time::Instant;

use drape_compute::{ComputeBackend, ParallelBackend};
use drape_contact::{BodyCollider, CollisionParams, CollisionPipeline, ContactResult, GroundPlane};
use drape_mesh::{ClothConstraints, TriangleMesh};
use drape_sdf::{build_sdf, SdfGrid};
use drape_solver::{relax, ParticleState, PositionsView, RelaxStats, SimulationParams};
use drape_telemetry::{EventBus, EventKind};
use drape_types::{DrapeError, DrapeResult};

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Index of the tick (0 for the first tick after creation or reset).
    pub timestep: u64,
    /// Relaxation work per constraint kind.
    pub relax: Vec<RelaxStats>,
    pub ground: ContactResult,
    pub body: ContactResult,
    /// Whether body collision ran (an SDF was installed).
    pub body_active: bool,
    /// Wall-clock time for the tick (seconds).
    pub wall_time: f64,
}

impl StepReport {
    /// Ground and body contacts combined.
    pub fn contacts(&self) -> ContactResult {
        self.ground.merge(self.body)
    }
}

/// A cloth instance with its particle state and colliders.
///
/// Stepping is infallible: degenerate input is clamped or skipped, never
/// reported as an error.
pub struct ClothSimulation {
    mesh: TriangleMesh,
    constraints: ClothConstraints,
    state: ParticleState,
    params: SimulationParams,
    collision: CollisionPipeline,
    backend: Box<dyn ComputeBackend>,
    events: Option<EventBus>,
    timestep: u64,
    sim_time: f64,
}

impl ClothSimulation {
    /// Creates a simulation at rest in the mesh's positions.
    ///
    /// Fails when the mesh is invalid, `pinned` does not have one flag per
    /// vertex, or a constraint refers to a missing vertex.
    pub fn new(
        mesh: TriangleMesh,
        constraints: ClothConstraints,
        params: SimulationParams,
        pinned: Vec<bool>,
    ) -> DrapeResult<Self> {
        mesh.validate()?;
        if let Some(max) = constraints.max_particle() {
            if max.index() >= mesh.vertex_count() {
                return Err(DrapeError::InvalidMesh(format!(
                    "constraint references particle {} but the mesh has {} vertices",
                    max.index(),
                    mesh.vertex_count()
                )));
            }
        }
        let state = ParticleState::new(&mesh.positions, pinned)?;

        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            constraints = constraints.len(),
            pinned = state.pinned_count(),
            "created cloth simulation"
        );

        Ok(Self {
            mesh,
            constraints,
            state,
            params,
            collision: CollisionPipeline::default(),
            backend: Box::new(ParallelBackend),
            events: None,
            timestep: 0,
            sim_time: 0.0,
        })
    }

    /// Replaces the compute backend.
    pub fn with_backend(mut self, backend: Box<dyn ComputeBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Routes pipeline events into `bus`. The bus is flushed after every tick.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Places the ground plane at `height`.
    pub fn with_ground(mut self, height: f32) -> Self {
        self.collision.ground = GroundPlane::new(height);
        self
    }

    /// Sets the body collision response parameters.
    pub fn with_collision_params(mut self, params: CollisionParams) -> Self {
        let CollisionParams {
            friction,
            restitution,
            thickness,
        } = params;
        self.collision.body.update_params(friction, restitution, thickness);
        self
    }

    // ─── Stepping ─────────────────────────────────────────────

    /// Advances one tick with the stored parameters.
    pub fn step(&mut self) -> StepReport {
        let params = self.params.clone();
        self.step_with(&params)
    }

    /// Advances one tick with `params`, which also become the stored parameters.
    pub fn step_with(&mut self, params: &SimulationParams) -> StepReport {
        let start = Instant::now();
        let timestep = self.timestep;
        self.emit(EventKind::StepBegin {
            sim_time: self.sim_time,
        });

        self.state.integrate(self.backend.as_ref(), params);

        let relax = relax(&self.state, &self.constraints, params, self.backend.as_ref());
        for stats in &relax {
            self.emit(EventKind::ConstraintSolve {
                kind: stats.kind.name().to_string(),
                constraints: stats.constraints as u32,
                passes: stats.passes,
            });
        }

        let collision = self.collision.step(&self.state, self.backend.as_ref());
        self.emit(EventKind::Collision {
            collider: "ground".into(),
            resolved: collision.ground.resolved_count,
            max_penetration: collision.ground.max_penetration,
        });
        if collision.body_active {
            self.emit(EventKind::Collision {
                collider: "body".into(),
                resolved: collision.body.resolved_count,
                max_penetration: collision.body.max_penetration,
            });
        }

        let wall_time = start.elapsed().as_secs_f64();
        self.emit(EventKind::StepEnd { wall_time });
        if let Some(bus) = self.events.as_mut() {
            bus.flush();
        }

        self.timestep += 1;
        self.sim_time += params.dt as f64;
        if *params != self.params {
            if params.clamped_iterations() != params.iterations {
                tracing::debug!(
                    requested = params.iterations,
                    used = params.clamped_iterations(),
                    "iteration count clamped"
                );
            }
            self.params = params.clone();
        }

        StepReport {
            timestep,
            relax,
            ground: collision.ground,
            body: collision.body,
            body_active: collision.body_active,
            wall_time,
        }
    }

    /// Runs `ticks` ticks with the stored parameters and returns the last report.
    pub fn run(&mut self, ticks: u32) -> Option<StepReport> {
        (0..ticks).map(|_| self.step()).last()
    }

    /// Rewrites both buffer slots with `initial` and zeroes the tick counter.
    pub fn reset(&mut self, initial: &[f32]) -> DrapeResult<()> {
        self.state.reset(initial)?;
        self.timestep = 0;
        self.sim_time = 0.0;
        tracing::info!(vertices = self.state.vertex_count(), "simulation reset");
        self.emit(EventKind::Reset {
            vertex_count: self.state.vertex_count() as u32,
        });
        if let Some(bus) = self.events.as_mut() {
            bus.flush();
        }
        Ok(())
    }

    /// Resets to the positions of the mesh the simulation was created from.
    pub fn reset_to_rest(&mut self) -> DrapeResult<()> {
        let initial = self.mesh.positions.clone();
        self.reset(&initial)
    }

    // ─── Body collision ───────────────────────────────────────

    /// Builds a new body SDF from `body` and swaps it in.
    ///
    /// On failure the current SDF stays in place.
    pub fn rebuild_body_sdf(&mut self, body: &TriangleMesh, resolution: u32) -> DrapeResult<()> {
        let start = Instant::now();
        let grid = build_sdf(body, resolution)?;
        let wall_time = start.elapsed().as_secs_f64();
        self.emit(EventKind::SdfRebuilt {
            resolution: grid.resolution(),
            triangles: body.triangle_count() as u32,
            inside_voxels: grid.inside_count() as u32,
            wall_time,
        });
        self.collision.body.set_sdf(grid);
        Ok(())
    }

    /// Installs a prebuilt SDF, returning the one it replaces.
    pub fn set_body_sdf(&mut self, grid: SdfGrid) -> Option<SdfGrid> {
        self.collision.body.set_sdf(grid)
    }

    /// Removes the body SDF; body collision stops until a new one is installed.
    pub fn release_body_sdf(&mut self) -> Option<SdfGrid> {
        self.collision.body.release()
    }

    /// Changes friction, restitution, and thickness without touching the SDF.
    pub fn update_collision_params(&mut self, friction: f32, restitution: f32, thickness: f32) {
        self.collision.body.update_params(friction, restitution, thickness);
    }

    // ─── Accessors ────────────────────────────────────────────

    /// Read-only view of the current positions.
    pub fn positions(&self) -> PositionsView<'_> {
        self.state.view()
    }

    /// The cloth mesh in its initial configuration.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn constraints(&self) -> &ClothConstraints {
        &self.constraints
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn body(&self) -> &BodyCollider {
        &self.collision.body
    }

    pub fn ground(&self) -> GroundPlane {
        self.collision.ground
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Number of ticks since creation or the last reset.
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Simulated seconds since creation or the last reset.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn event_bus_mut(&mut self) -> Option<&mut EventBus> {
        self.events.as_mut()
    }

    fn emit(&self, kind: EventKind) {
        if let Some(bus) = &self.events {
            bus.emit_kind(self.timestep, kind);
        }
    }
}

impl std::fmt::Debug for ClothSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClothSimulation")
            .field("vertices", &self.state.vertex_count())
            .field("constraints", &self.constraints.len())
            .field("backend", &self.backend.name())
            .field("body_active", &self.collision.body.is_active())
            .field("timestep", &self.timestep)
            .finish()
    }
}
