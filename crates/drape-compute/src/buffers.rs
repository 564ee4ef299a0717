//! Shared compute buffers.
//!
//! A [`ComputeBuffer`] is a fixed-length array of `f32` cells stored as
//! atomic bit patterns. Loads and stores use relaxed ordering: each access
//! is indivisible, but concurrent read-modify-write sequences on the same
//! cell from different work items interleave freely. The end of a dispatch
//! provides the happens-before edge between stages.

use std::sync::atomic::{AtomicU32, Ordering};

use drape_math::Vec3;
use drape_types::{DrapeError, DrapeResult};

/// A buffer of `f32` values writable from concurrent work items.
#[derive(Debug, Default)]
pub struct ComputeBuffer {
    data: Vec<AtomicU32>,
}

impl ComputeBuffer {
    /// Creates a new buffer filled with zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: (0..len).map(|_| AtomicU32::new(0.0f32.to_bits())).collect(),
        }
    }

    /// Creates a buffer from existing data.
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.iter().map(|v| AtomicU32::new(v.to_bits())).collect(),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn load(&self, i: usize) -> f32 {
        f32::from_bits(self.data[i].load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, i: usize, value: f32) {
        self.data[i].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Reads element `i` of a buffer holding interleaved 3-vectors.
    #[inline]
    pub fn load_vec3(&self, i: usize) -> Vec3 {
        let base = i * 3;
        Vec3::new(self.load(base), self.load(base + 1), self.load(base + 2))
    }

    /// Writes element `i` of a buffer holding interleaved 3-vectors.
    #[inline]
    pub fn store_vec3(&self, i: usize, v: Vec3) {
        let base = i * 3;
        self.store(base, v.x);
        self.store(base + 1, v.y);
        self.store(base + 2, v.z);
    }

    /// Copies data from a slice into the buffer. Lengths must match.
    pub fn copy_from_slice(&self, src: &[f32]) -> DrapeResult<()> {
        if src.len() != self.len() {
            return Err(DrapeError::Compute(format!(
                "copy length mismatch: source {} != buffer {}",
                src.len(),
                self.len()
            )));
        }
        for (cell, v) in self.data.iter().zip(src) {
            cell.store(v.to_bits(), Ordering::Relaxed);
        }
        Ok(())
    }

    /// Copies another buffer of the same length into this one.
    pub fn copy_from(&self, other: &ComputeBuffer) {
        for (dst, src) in self.data.iter().zip(&other.data) {
            dst.store(src.load(Ordering::Relaxed), Ordering::Relaxed);
        }
    }

    /// Reads the whole buffer into a `Vec`.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data
            .iter()
            .map(|cell| f32::from_bits(cell.load(Ordering::Relaxed)))
            .collect()
    }

    /// Iterates over the values.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data
            .iter()
            .map(|cell| f32::from_bits(cell.load(Ordering::Relaxed)))
    }
}

impl Clone for ComputeBuffer {
    fn clone(&self) -> Self {
        Self {
            data: self
                .data
                .iter()
                .map(|cell| AtomicU32::new(cell.load(Ordering::Relaxed)))
                .collect(),
        }
    }
}
