//! # drape-engine
//!
//! Real-time cloth draping. A [`ClothSimulation`] owns the particle state,
//! the constraint sets, and the colliders, and advances them one fixed
//! tick at a time:
//!
//! ```text
//! integrate → relax (structural, shear, bend) → ground → body
//! ```
//!
//! The [`api`] module exposes the same functionality as free functions.

pub mod api;
pub mod config;
pub mod pipeline;
pub mod stepper;

pub use api::{
    build_grid_cloth, build_sdf, create_simulation, current_positions, reset_simulation,
    step_simulation, update_collision_params,
};
pub use config::{BackendKind, BodyShape, SceneConfig};
pub use pipeline::{ClothSimulation, StepReport};
pub use stepper::FixedStepper;

pub use drape_contact::CollisionParams;
pub use drape_mesh::{ClothConstraints, TriangleMesh};
pub use drape_sdf::SdfGrid;
pub use drape_solver::{PositionsView, SimulationParams};
