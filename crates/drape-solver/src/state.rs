//! Particle state: double-buffered positions and previous positions.
//!
//! Two fixed slots alternate every tick. Integration reads the current
//! slot and writes the other one, then the slots swap. Constraint and
//! collision passes operate in place on the new current slot, so the
//! slot read by integration is never modified while a tick is running.
//!
//! Velocity is not stored; it is the difference `position − previous`.

use drape_compute::{ComputeBackend, ComputeBuffer};
use drape_math::Vec3;
use drape_types::{DrapeError, DrapeResult};
use tracing::debug;

use crate::config::SimulationParams;

/// Positions and previous positions of one buffer slot.
#[derive(Debug, Clone)]
struct Slot {
    position: ComputeBuffer,
    previous: ComputeBuffer,
}

impl Slot {
    fn at_rest(positions: &[f32]) -> Self {
        Self {
            position: ComputeBuffer::from_slice(positions),
            previous: ComputeBuffer::from_slice(positions),
        }
    }
}

/// Per-particle simulation state.
///
/// All buffers hold interleaved `xyz` triples, one per particle.
#[derive(Debug, Clone)]
pub struct ParticleState {
    vertex_count: usize,
    slots: [Slot; 2],
    pinned: Vec<bool>,
    active: usize,
}

impl ParticleState {
    /// Creates a state at rest (previous = position) in slot 0.
    ///
    /// `positions` must hold `3 · n` values and `pinned` exactly `n` flags.
    pub fn new(positions: &[f32], pinned: Vec<bool>) -> DrapeResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(DrapeError::InvalidMesh(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        let vertex_count = positions.len() / 3;
        if pinned.len() != vertex_count {
            return Err(DrapeError::InvalidMesh(format!(
                "Pinned array length ({}) != vertex count ({})",
                pinned.len(),
                vertex_count
            )));
        }

        debug!(
            vertex_count,
            pinned = pinned.iter().filter(|&&p| p).count(),
            "particle state created"
        );
        Ok(Self {
            vertex_count,
            slots: [Slot::at_rest(positions), Slot::at_rest(positions)],
            pinned,
            active: 0,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Index (0 or 1) of the slot holding the current positions.
    #[inline]
    pub fn active_slot(&self) -> usize {
        self.active
    }

    /// Current positions. Passes write through this buffer in place.
    #[inline]
    pub fn positions(&self) -> &ComputeBuffer {
        &self.slots[self.active].position
    }

    /// Previous positions matching [`positions`](Self::positions).
    #[inline]
    pub fn previous(&self) -> &ComputeBuffer {
        &self.slots[self.active].previous
    }

    #[inline]
    pub fn pinned(&self) -> &[bool] {
        &self.pinned
    }

    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.pinned[i]
    }

    /// Number of pinned particles.
    pub fn pinned_count(&self) -> usize {
        self.pinned.iter().filter(|&&p| p).count()
    }

    /// Current position of particle `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions().load_vec3(i)
    }

    /// Implied per-tick velocity of particle `i` (`position − previous`).
    #[inline]
    pub fn displacement(&self, i: usize) -> Vec3 {
        self.positions().load_vec3(i) - self.previous().load_vec3(i)
    }

    /// Read-only view of the current positions.
    pub fn view(&self) -> PositionsView<'_> {
        PositionsView {
            buffer: self.positions(),
        }
    }

    /// Verlet integration from the current slot into the other slot, then
    /// makes that slot current.
    ///
    /// Free particles: `v = (pos − prev)·(1 − damping)`,
    /// `new = pos + v + gravity·dt²`, `prev' = pos`. Pinned particles are
    /// copied through with zero displacement.
    pub fn integrate(&mut self, backend: &dyn ComputeBackend, params: &SimulationParams) {
        let read = self.active;
        let write = 1 - read;
        let src = &self.slots[read];
        let dst = &self.slots[write];

        let keep = 1.0 - params.clamped_damping();
        let accel = params.gravity() * params.dt * params.dt;
        let pinned = &self.pinned;

        backend.dispatch(self.vertex_count, &|i| {
            let pos = src.position.load_vec3(i);
            if pinned[i] {
                dst.position.store_vec3(i, pos);
                dst.previous.store_vec3(i, pos);
                return;
            }
            let velocity = (pos - src.previous.load_vec3(i)) * keep;
            dst.position.store_vec3(i, pos + velocity + accel);
            dst.previous.store_vec3(i, pos);
        });

        self.active = write;
    }

    /// Rewrites both slots to rest at `initial` and makes slot 0 current.
    ///
    /// Pin flags are kept.
    pub fn reset(&mut self, initial: &[f32]) -> DrapeResult<()> {
        if initial.len() != self.vertex_count * 3 {
            return Err(DrapeError::InvalidMesh(format!(
                "reset positions have {} values, expected {}",
                initial.len(),
                self.vertex_count * 3
            )));
        }
        for slot in &self.slots {
            slot.position.copy_from_slice(initial)?;
            slot.previous.copy_from_slice(initial)?;
        }
        self.active = 0;
        Ok(())
    }

    /// Kinetic energy `½ Σ m |v|²` of the free particles, with
    /// `v = (position − previous) / dt`.
    pub fn kinetic_energy(&self, mass: f32, dt: f32) -> f64 {
        let inv_dt = 1.0 / dt as f64;
        (0..self.vertex_count)
            .filter(|&i| !self.pinned[i])
            .map(|i| {
                let v = self.displacement(i).as_dvec3() * inv_dt;
                0.5 * mass as f64 * v.length_squared()
            })
            .sum()
    }
}

/// Read-only access to the current particle positions.
#[derive(Debug, Clone, Copy)]
pub struct PositionsView<'a> {
    buffer: &'a ComputeBuffer,
}

impl<'a> PositionsView<'a> {
    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Position of particle `i`.
    #[inline]
    pub fn get(&self, i: usize) -> Vec3 {
        self.buffer.load_vec3(i)
    }

    /// Iterates particle positions in index order.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + 'a {
        let buffer = self.buffer;
        (0..buffer.len() / 3).map(move |i| buffer.load_vec3(i))
    }

    /// Copies the positions out as interleaved `xyz` floats.
    pub fn to_vec(&self) -> Vec<f32> {
        self.buffer.to_vec()
    }

    /// Lowest Y coordinate, or `None` when empty.
    pub fn min_y(&self) -> Option<f32> {
        self.iter().map(|p| p.y).reduce(f32::min)
    }
}
