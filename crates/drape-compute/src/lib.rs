//! # drape-compute
//!
//! Data-parallel compute layer for the drape simulation engine.
//!
//! Kernels are closures over a work-item index, dispatched through a
//! [`ComputeBackend`]:
//! - [`ParallelBackend`]: rayon thread pool, work items grouped in
//!   batches of [`WORKGROUP_SIZE`](drape_types::constants::WORKGROUP_SIZE)
//! - [`SequentialBackend`]: in-order reference, used for deterministic tests
//!
//! Particle data lives in [`ComputeBuffer`]s whose cells can be read and
//! written from any work item through a shared reference. Writes from
//! concurrent work items to the same cell race (last writer wins) without
//! being undefined behavior.

pub mod backend;
pub mod buffers;

pub use backend::{ComputeBackend, ParallelBackend, SequentialBackend};
pub use buffers::ComputeBuffer;
