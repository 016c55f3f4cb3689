//! Distance constraints between two particles.

use crate::float::Float;
use crate::particle::{Particle, ParticleId};
use crate::vec::Vec2;

slotmap::new_key_type! {
    /// Stable handle of a constraint inside a mesh's constraint arena.
    ///
    /// Stays unique after the constraint is torn, so stale handles held by a
    /// caller simply stop resolving instead of aliasing a newer constraint.
    pub struct ConstraintKey;
}

/// Below this length a constraint has no usable direction and is skipped.
const DEGENERATE_LENGTH: f32 = 1e-10;

/// Keeps two particles at `rest_length` from each other.
///
/// `p1` is the particle that created the constraint; it is the one that
/// resolves it during relaxation.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint<F: Float> {
    pub p1: ParticleId,
    pub p2: ParticleId,
    pub rest_length: F,
}

impl<F: Float> Constraint<F> {
    pub fn new(p1: ParticleId, p2: ParticleId, rest_length: F) -> Self {
        Constraint { p1, p2, rest_length }
    }

    /// Constraint whose rest length is the current distance between the two particles.
    pub fn between(p1: ParticleId, p2: ParticleId, particles: &[Particle<F>]) -> Self {
        let rest_length = particles[p1].pos.distance(particles[p2].pos);
        Constraint { p1, p2, rest_length }
    }

    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.p1].pos.distance(particles[self.p2].pos)
    }

    /// Midpoint of the segment, used for cutting.
    pub fn midpoint(&self, particles: &[Particle<F>]) -> Vec2<F> {
        particles[self.p1].pos.midpoint(particles[self.p2].pos)
    }

    pub fn is_overstretched(&self, particles: &[Particle<F>], tear_distance: F) -> bool {
        self.length(particles) > tear_distance
    }

    /// Move both endpoints toward the rest length.
    ///
    /// Each endpoint travels `stiffness` of the relative error along the
    /// separation vector, in opposite directions, so with `stiffness = 0.2`
    /// the gap closes by 40% per call. A pinned endpoint takes no share and
    /// stays where it is. Returns `false` when the endpoints coincide and
    /// nothing was done.
    pub fn resolve(&self, particles: &mut [Particle<F>], stiffness: F) -> bool {
        let diff = particles[self.p1].pos - particles[self.p2].pos;
        let dist = diff.length();
        if dist.is_near_zero(F::from_f32(DEGENERATE_LENGTH)) {
            return false;
        }

        let factor = (self.rest_length - dist) / dist;
        let correction = diff.scale(factor * stiffness);

        if !particles[self.p1].is_pinned() {
            particles[self.p1].pos += correction;
        }
        if !particles[self.p2].is_pinned() {
            particles[self.p2].pos -= correction;
        }
        true
    }
}
