//! Step observer trait for watching the cloth solver work.

use crate::constraint::ConstraintKey;

/// Hooks called by [`ClothMesh::step_observed`](crate::mesh::ClothMesh::step_observed).
///
/// All methods default to no-ops; implement only what you need (debug
/// overlays, tear counters, profiling).
pub trait StepObserver {
    /// Called after each relaxation pass over all particles.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called for each constraint removed by the auto-tear sweep or by one of
    /// the mesh's `*_observed` tear and cut calls.
    fn on_tear(&mut self, _key: ConstraintKey) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
