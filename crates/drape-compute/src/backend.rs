//! Compute backend trait and its CPU implementations.
//!
//! The [`ComputeBackend`] trait defines how a kernel is launched over a
//! range of work items. A dispatch returns only once every work item has
//! finished, which is the synchronization point between pipeline stages.

use rayon::prelude::*;

use drape_types::constants::WORKGROUP_SIZE;

/// A kernel invoked once per work item.
pub type Kernel<'a> = dyn Fn(usize) + Sync + 'a;

/// Trait for data-parallel compute backends.
///
/// Within one dispatch, work items run in no particular order and may run
/// concurrently. Across dispatches, all writes of dispatch N are visible to
/// dispatch N+1.
pub trait ComputeBackend: Send + Sync {
    /// Returns the backend name (e.g., "rayon", "sequential").
    fn name(&self) -> &str;

    /// Runs `kernel(i)` for every `i` in `0..work_items` and waits for completion.
    fn dispatch(&self, work_items: usize, kernel: &Kernel<'_>);

    /// Returns true if work items may execute concurrently.
    fn is_parallel(&self) -> bool;

    /// Number of batches a dispatch of `work_items` is split into.
    fn workgroups(&self, work_items: usize) -> usize {
        work_items.div_ceil(WORKGROUP_SIZE)
    }
}

/// Thread-pool backend: each batch of 64 work items is one rayon task.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallelBackend;

impl ParallelBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for ParallelBackend {
    fn name(&self) -> &str {
        "rayon"
    }

    fn dispatch(&self, work_items: usize, kernel: &Kernel<'_>) {
        (0..self.workgroups(work_items))
            .into_par_iter()
            .for_each(|group| {
                let start = group * WORKGROUP_SIZE;
                let end = (start + WORKGROUP_SIZE).min(work_items);
                for i in start..end {
                    kernel(i);
                }
            });
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

/// Sequential reference backend: runs work items in index order.
///
/// Always available, used for:
/// - Deterministic tests (no scheduling-dependent results)
/// - Tiny meshes where thread hand-off costs more than the work
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialBackend;

impl SequentialBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for SequentialBackend {
    fn name(&self) -> &str {
        "sequential"
    }

    fn dispatch(&self, work_items: usize, kernel: &Kernel<'_>) {
        (0..work_items).for_each(kernel);
    }

    fn is_parallel(&self) -> bool {
        false
    }
}
