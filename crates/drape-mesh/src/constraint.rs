//! Distance constraints over a cloth grid.
//!
//! A constraint ties two particles to the distance they had at rest.
//! Constraints are created once by the grid builder and never change
//! for the lifetime of a cloth instance.

use drape_types::ParticleId;
use serde::{Deserialize, Serialize};

/// Which family a constraint belongs to. Each family has its own stiffness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Grid edges (horizontal and vertical neighbours). Resists stretch.
    Structural,
    /// Quad diagonals. Resists shear.
    Shear,
    /// Vertices two apart along a row or column. Resists bending.
    Bend,
}

impl ConstraintKind {
    /// All kinds in solve order.
    pub const ALL: [ConstraintKind; 3] = [
        ConstraintKind::Structural,
        ConstraintKind::Shear,
        ConstraintKind::Bend,
    ];

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Structural => "structural",
            ConstraintKind::Shear => "shear",
            ConstraintKind::Bend => "bend",
        }
    }
}

/// A distance constraint between particles `i` and `j`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub i: ParticleId,
    pub j: ParticleId,
    /// Distance between `i` and `j` in the initial configuration.
    pub rest_length: f32,
}

impl Constraint {
    pub fn new(i: impl Into<ParticleId>, j: impl Into<ParticleId>, rest_length: f32) -> Self {
        Self {
            i: i.into(),
            j: j.into(),
            rest_length,
        }
    }
}

/// The three disjoint constraint sets of a cloth instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClothConstraints {
    pub structural: Vec<Constraint>,
    pub shear: Vec<Constraint>,
    pub bend: Vec<Constraint>,
}

impl ClothConstraints {
    /// Returns the constraint set of the given kind.
    pub fn get(&self, kind: ConstraintKind) -> &[Constraint] {
        match kind {
            ConstraintKind::Structural => &self.structural,
            ConstraintKind::Shear => &self.shear,
            ConstraintKind::Bend => &self.bend,
        }
    }

    /// Iterates the sets in solve order (structural, shear, bend).
    pub fn sets(&self) -> impl Iterator<Item = (ConstraintKind, &[Constraint])> {
        ConstraintKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Total number of constraints across all sets.
    pub fn len(&self) -> usize {
        self.structural.len() + self.shear.len() + self.bend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest particle index referenced by any constraint.
    pub fn max_particle(&self) -> Option<ParticleId> {
        ConstraintKind::ALL
            .iter()
            .flat_map(|&k| self.get(k).iter())
            .map(|c| c.i.max(c.j))
            .max()
    }
}
