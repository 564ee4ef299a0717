//! # drape-solver
//!
//! Time integration and constraint relaxation for cloth particles.
//!
//! ## Key Types
//!
//! - [`ParticleState`]: Double-buffered positions and previous positions
//!   plus pin flags. Velocity is implicit: `position − previous`.
//! - [`SimulationParams`]: Gravity, per-kind stiffness, damping, mass,
//!   timestep, and iteration count, supplied on every step.
//! - [`relax`]: Parallel Gauss-Seidel-style projection of distance
//!   constraints, one dispatch per pass.

pub mod config;
pub mod relax;
pub mod state;

pub use config::SimulationParams;
pub use relax::{relax, RelaxStats};
pub use state::{ParticleState, PositionsView};
