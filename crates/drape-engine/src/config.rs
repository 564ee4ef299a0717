//! Scene configuration.
//!
//! A scene describes the cloth pattern, the body it drapes over, and all
//! simulation and collision parameters. Scenes are plain `serde` types,
//! usually loaded from TOML:
//!
//! ```toml
//! steps = 240
//!
//! [cloth]
//! rows = 32
//! cols = 32
//! spacing = 0.03
//!
//! [body]
//! shape = "sphere"
//! center = [0.0, 1.1, 0.25]
//! radius = 0.3
//! ```

use std::path::Path;

use drape_compute::{ComputeBackend, ParallelBackend, SequentialBackend};
use drape_contact::CollisionParams;
use drape_math::Vec3;
use drape_mesh::generators::{cuboid, uv_sphere};
use drape_mesh::{ClothPattern, TriangleMesh};
use drape_solver::SimulationParams;
use drape_types::constants::{
    DEFAULT_SDF_RESOLUTION, GROUND_HEIGHT, MAX_SDF_RESOLUTION, MIN_SDF_RESOLUTION,
};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

use crate::pipeline::ClothSimulation;

/// Which compute backend runs the kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Parallel,
    Sequential,
}

impl BackendKind {
    pub fn create(self) -> Box<dyn ComputeBackend> {
        match self {
            BackendKind::Parallel => Box::new(ParallelBackend),
            BackendKind::Sequential => Box::new(SequentialBackend),
        }
    }
}

/// Procedural collision body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BodyShape {
    Sphere {
        center: [f32; 3],
        radius: f32,
        #[serde(default = "default_stacks")]
        stacks: usize,
        #[serde(default = "default_slices")]
        slices: usize,
    },
    Cuboid {
        min: [f32; 3],
        max: [f32; 3],
    },
}

fn default_stacks() -> usize {
    24
}

fn default_slices() -> usize {
    32
}

impl BodyShape {
    /// Generates the body's closed triangle mesh.
    pub fn mesh(&self) -> TriangleMesh {
        match *self {
            BodyShape::Sphere {
                center,
                radius,
                stacks,
                slices,
            } => uv_sphere(Vec3::from_array(center), radius, stacks, slices),
            BodyShape::Cuboid { min, max } => cuboid(Vec3::from_array(min), Vec3::from_array(max)),
        }
    }

    fn validate(&self) -> DrapeResult<()> {
        match self {
            BodyShape::Sphere { radius, .. } if !(*radius > 0.0) => Err(DrapeError::InvalidConfig(
                format!("sphere radius must be positive, got {radius}"),
            )),
            BodyShape::Cuboid { min, max } if (0..3).any(|k| min[k] >= max[k]) => {
                Err(DrapeError::InvalidConfig(format!(
                    "cuboid min {min:?} must be below max {max:?} on every axis"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Everything needed to set up and run a drape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Ticks to run in batch mode.
    pub steps: u32,
    pub sdf_resolution: u32,
    pub ground_height: f32,
    pub backend: BackendKind,
    pub cloth: ClothPattern,
    pub simulation: SimulationParams,
    pub collision: CollisionParams,
    /// Body to drape over. No body means ground collision only.
    pub body: Option<BodyShape>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            steps: 240,
            sdf_resolution: DEFAULT_SDF_RESOLUTION,
            ground_height: GROUND_HEIGHT,
            backend: BackendKind::default(),
            cloth: ClothPattern::default(),
            simulation: SimulationParams::default(),
            collision: CollisionParams::default(),
            body: None,
        }
    }
}

impl SceneConfig {
    /// Parses a scene from TOML text.
    pub fn from_toml_str(text: &str) -> DrapeResult<Self> {
        toml::from_str(text).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Reads and parses a TOML scene file.
    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Serializes the scene as TOML.
    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string_pretty(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Checks values that would otherwise be silently clamped or produce
    /// a meaningless scene.
    pub fn validate(&self) -> DrapeResult<()> {
        let sim = &self.simulation;
        if !(sim.dt > 0.0 && sim.dt.is_finite()) {
            return Err(DrapeError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                sim.dt
            )));
        }
        if !(self.cloth.spacing > 0.0) {
            return Err(DrapeError::InvalidConfig(format!(
                "cloth spacing must be positive, got {}",
                self.cloth.spacing
            )));
        }
        if !(MIN_SDF_RESOLUTION..=MAX_SDF_RESOLUTION).contains(&self.sdf_resolution) {
            return Err(DrapeError::InvalidConfig(format!(
                "SDF resolution {} outside {MIN_SDF_RESOLUTION}..={MAX_SDF_RESOLUTION}",
                self.sdf_resolution
            )));
        }
        if let Some(body) = &self.body {
            body.validate()?;
        }
        Ok(())
    }

    /// Builds the simulation described by this scene, including the body SDF.
    pub fn build(&self) -> DrapeResult<ClothSimulation> {
        self.validate()?;
        let cloth = self.cloth.build();
        let pinned = self.cloth.pinned_mask();

        let mut sim = ClothSimulation::new(
            cloth.mesh,
            cloth.constraints,
            self.simulation.clone(),
            pinned,
        )?
        .with_backend(self.backend.create())
        .with_ground(self.ground_height)
        .with_collision_params(self.collision);

        if let Some(body) = &self.body {
            sim.rebuild_body_sdf(&body.mesh(), self.sdf_resolution)?;
        }
        Ok(sim)
    }
}
