//! Benchmark scenarios: cloth pattern, pinning, body, and parameters.
//!
//! Two canonical scenarios for regression testing:
//! 1. **Hanging sheet**: Cloth pinned along its top row, hanging under gravity
//! 2. **Body drape**: Unpinned cloth falling onto a sphere

use serde::{Deserialize, Serialize};

use drape_math::Vec3;
use drape_mesh::generators::uv_sphere;
use drape_mesh::{ClothPattern, GridCloth, TriangleMesh};
use drape_solver::SimulationParams;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Cloth pinned at top edge, hanging under gravity.
    HangingSheet,
    /// Cloth falling onto an SDF sphere.
    BodyDrape,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[ScenarioKind::HangingSheet, ScenarioKind::BodyDrape]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingSheet => "hanging_sheet",
            ScenarioKind::BodyDrape => "body_drape",
        }
    }

    /// Parses a name produced by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub pattern: ClothPattern,
    /// Collision body, if any.
    pub body: Option<TriangleMesh>,
    pub sdf_resolution: u32,
    pub params: SimulationParams,
    /// Number of ticks to simulate.
    pub timesteps: u32,
}

impl Scenario {
    /// A 40×40 sheet at 2.5 cm spacing, top row pinned, two seconds at 60 Hz.
    pub fn hanging_sheet() -> Self {
        Self {
            kind: ScenarioKind::HangingSheet,
            pattern: ClothPattern {
                rows: 40,
                cols: 40,
                spacing: 0.025,
                pin_top_row: true,
            },
            body: None,
            sdf_resolution: 0,
            params: SimulationParams::default(),
            timesteps: 120,
        }
    }

    /// A free 32×32 sheet dropped onto a 0.3 m sphere below it, three
    /// seconds at 60 Hz. The SDF is built at resolution 64.
    pub fn body_drape() -> Self {
        let pattern = ClothPattern {
            rows: 32,
            cols: 32,
            spacing: 0.025,
            pin_top_row: false,
        };
        // Cloth spans y = 1.6 up to 1.6 + 31·0.025 ≈ 2.38.
        let body = uv_sphere(Vec3::new(0.0, 0.45, 0.25), 0.3, 24, 32);

        Self {
            kind: ScenarioKind::BodyDrape,
            pattern,
            body: Some(body),
            sdf_resolution: 64,
            params: SimulationParams::default(),
            timesteps: 180,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingSheet => Self::hanging_sheet(),
            ScenarioKind::BodyDrape => Self::body_drape(),
        }
    }

    /// Overrides the tick count.
    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }

    /// Builds the cloth grid for this scenario.
    pub fn cloth(&self) -> GridCloth {
        self.pattern.build()
    }
}
