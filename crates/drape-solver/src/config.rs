//! Simulation parameters.
//!
//! Supplied on every step, so they can change between ticks without
//! rebuilding any state.

use drape_mesh::ConstraintKind;
use drape_math::Vec3;
use drape_types::constants::{
    DEFAULT_BEND_STIFFNESS, DEFAULT_DAMPING, DEFAULT_DT, DEFAULT_ITERATIONS,
    DEFAULT_PARTICLE_MASS, DEFAULT_SHEAR_STIFFNESS, DEFAULT_STRUCTURAL_STIFFNESS, GRAVITY,
    MAX_ITERATIONS, MIN_ITERATIONS,
};
use serde::{Deserialize, Serialize};

/// Per-step simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f32; 3],

    /// Stiffness of structural (grid edge) constraints, 0.0–1.0.
    pub structural_stiffness: f32,

    /// Stiffness of shear (quad diagonal) constraints, 0.0–1.0.
    pub shear_stiffness: f32,

    /// Stiffness of bend (skip-one) constraints, 0.0–1.0.
    pub bend_stiffness: f32,

    /// Velocity damping factor (0.0 = none, 1.0 = velocity discarded).
    pub damping: f32,

    /// Mass of one particle in kg. Only used for energy diagnostics.
    pub mass: f32,

    /// Fixed timestep in seconds.
    pub dt: f32,

    /// Relaxation passes per constraint kind. Clamped to 2–10 when used.
    pub iterations: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: [0.0, -GRAVITY, 0.0],
            structural_stiffness: DEFAULT_STRUCTURAL_STIFFNESS,
            shear_stiffness: DEFAULT_SHEAR_STIFFNESS,
            bend_stiffness: DEFAULT_BEND_STIFFNESS,
            damping: DEFAULT_DAMPING,
            mass: DEFAULT_PARTICLE_MASS,
            dt: DEFAULT_DT,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl SimulationParams {
    /// Cheapest settings for interactive previews (minimum iterations).
    pub fn preview() -> Self {
        Self {
            iterations: MIN_ITERATIONS,
            ..Default::default()
        }
    }

    /// Stiffest settings (maximum iterations).
    pub fn high_quality() -> Self {
        Self {
            iterations: MAX_ITERATIONS,
            ..Default::default()
        }
    }

    /// Weightless, undamped parameters. Handy for checking constraint behavior alone.
    pub fn zero_gravity() -> Self {
        Self {
            gravity: [0.0; 3],
            damping: 0.0,
            ..Default::default()
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Stiffness for a constraint kind, clamped to [0, 1].
    pub fn stiffness(&self, kind: ConstraintKind) -> f32 {
        let k = match kind {
            ConstraintKind::Structural => self.structural_stiffness,
            ConstraintKind::Shear => self.shear_stiffness,
            ConstraintKind::Bend => self.bend_stiffness,
        };
        k.clamp(0.0, 1.0)
    }

    /// Iteration count clamped to the supported range.
    pub fn clamped_iterations(&self) -> u32 {
        self.iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS)
    }

    /// Damping clamped to [0, 1].
    pub fn clamped_damping(&self) -> f32 {
        self.damping.clamp(0.0, 1.0)
    }
}
