//! Simulation event types.
//!
//! Structured events emitted by the simulation engine at various points
//! in each tick. Events are lightweight value types that carry just
//! enough data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
///
/// Events are tagged with a tick index and carry domain-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Tick number (0-indexed).
    pub timestep: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Tick started.
    StepBegin {
        /// Simulated time at the start of the tick (seconds).
        sim_time: f64,
    },

    /// Tick completed.
    StepEnd {
        /// Wall-clock time for the entire tick (seconds).
        wall_time: f64,
    },

    /// Relaxation of one constraint kind completed.
    ConstraintSolve {
        /// Constraint kind name ("structural", "shear", "bend").
        kind: String,
        /// Number of constraints of this kind.
        constraints: u32,
        /// Parallel passes performed.
        passes: u32,
    },

    /// A collider pass completed.
    Collision {
        /// Collider name ("ground", "body").
        collider: String,
        /// Particles pushed out.
        resolved: u32,
        /// Deepest penetration before correction (meters).
        max_penetration: f32,
    },

    /// The body SDF was rebuilt.
    SdfRebuilt {
        resolution: u32,
        triangles: u32,
        /// Voxels classified as inside the body.
        inside_voxels: u32,
        /// Wall-clock build time (seconds).
        wall_time: f64,
    },

    /// The particle state was reset to its initial positions.
    Reset { vertex_count: u32 },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given tick.
    pub fn new(timestep: u64, kind: EventKind) -> Self {
        Self { timestep, kind }
    }

    /// Short variant name, used as a log and file label.
    pub fn label(&self) -> &'static str {
        match self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::ConstraintSolve { .. } => "constraint_solve",
            EventKind::Collision { .. } => "collision",
            EventKind::SdfRebuilt { .. } => "sdf_rebuilt",
            EventKind::Reset { .. } => "reset",
            EventKind::Custom { .. } => "custom",
        }
    }
}
