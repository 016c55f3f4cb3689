//! Verlet particles: implicit velocity, per-frame force accumulator, pin target.

use crate::constraint::ConstraintKey;
use crate::float::Float;
use crate::vec::Vec2;

/// Index of a particle inside its mesh. Particles are never removed, so an id
/// stays valid for the lifetime of the mesh.
pub type ParticleId = usize;

/// A Verlet particle: position-based dynamics with implicit velocity.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    /// Forces added since the last integration; cleared by `integrate`.
    pub force: Vec2<F>,
    pin: Option<Vec2<F>>,
    constraints: Vec<ConstraintKey>,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec2<F>) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            force: Vec2::zero(),
            pin: None,
            constraints: Vec::new(),
        }
    }

    pub fn apply_force(&mut self, force: Vec2<F>) {
        self.force += force;
    }

    /// Advance one Verlet step.
    ///
    /// `new = pos + (pos - prev_pos) * damping + force * dt² / 2`. Pinned
    /// particles keep their position; their accumulator is still cleared.
    pub fn integrate(&mut self, dt_sq: F, damping: F) {
        if self.pin.is_some() {
            self.force = Vec2::zero();
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let new_pos = self.pos + velocity + self.force.scale(F::half() * dt_sq);
        self.prev_pos = self.pos;
        self.pos = new_pos;
        self.force = Vec2::zero();
    }

    /// Displacement over the last frame.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    pub fn pin(&mut self, target: Vec2<F>) {
        self.pin = Some(target);
    }

    pub fn unpin(&mut self) {
        self.pin = None;
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    pub fn pin_target(&self) -> Option<Vec2<F>> {
        self.pin
    }

    /// Move onto the pin target. Returns `false` if the particle is free.
    pub(crate) fn snap_to_pin(&mut self) -> bool {
        match self.pin {
            Some(target) => {
                self.pos = target;
                true
            }
            None => false,
        }
    }

    /// Reflect the position back inside `[1, bounds]` on both axes.
    ///
    /// This mirrors the overshoot around the wall rather than clamping, so a
    /// particle can bounce past it by the same amount it overshot.
    pub fn reflect_into(&mut self, bounds: Vec2<F>) {
        let one = F::one();
        let two = F::two();
        if self.pos.x > bounds.x {
            self.pos.x = two * bounds.x - self.pos.x;
        } else if self.pos.x < one {
            self.pos.x = two - self.pos.x;
        }
        if self.pos.y < one {
            self.pos.y = two - self.pos.y;
        } else if self.pos.y > bounds.y {
            self.pos.y = two * bounds.y - self.pos.y;
        }
    }

    /// Handles of every constraint touching this particle, in attach order.
    pub fn constraints(&self) -> &[ConstraintKey] {
        &self.constraints
    }

    pub(crate) fn register(&mut self, key: ConstraintKey) {
        self.constraints.push(key);
    }

    /// Forget `key`. Returns whether it was registered here.
    pub fn detach(&mut self, key: ConstraintKey) -> bool {
        match self.constraints.iter().position(|k| *k == key) {
            Some(idx) => {
                self.constraints.remove(idx);
                true
            }
            None => false,
        }
    }
}
