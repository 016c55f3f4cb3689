//! Tearable cloth: a grid of Verlet particles joined by distance constraints.

use crate::config::ClothConfig;
use crate::constraint::{Constraint, ConstraintKey};
use crate::error::ClothError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{Particle, ParticleId};
use crate::vec::Vec2;
use slotmap::SlotMap;

/// Previous-position offset applied to dragged particles, relative to the
/// pointer's motion over the last event.
const DRAG_FACTOR: f32 = 1.8;

/// A cloth sheet of `(width + 1) x (height + 1)` particles.
///
/// Particle at (col, row) has id `row * columns + col`. Each particle owns a
/// horizontal constraint to its left neighbor and a vertical constraint to
/// the particle above it; there are no diagonals. Particles live for the
/// whole simulation, constraints disappear when torn or cut.
pub struct ClothMesh<F: Float> {
    particles: Vec<Particle<F>>,
    constraints: SlotMap<ConstraintKey, Constraint<F>>,
    config: ClothConfig<F>,
}

impl<F: Float> ClothMesh<F> {
    /// Build the grid described by `config`.
    ///
    /// Particles are placed row by row from the configured origin. Each one
    /// is attached to its already-placed left neighbor and to the neighbor
    /// one row above, so rest lengths equal the configured spacings.
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        if let Err(err) = config.validate() {
            ftlog::warn!("Rejected cloth configuration: {}", err);
            return Err(err);
        }

        let (particle_count, constraint_count) = config
            .element_counts()
            .ok_or(ClothError::InvalidGridDimensions { width: config.width, height: config.height })?;
        let columns = config.columns();
        let rows = config.rows();
        let origin = config.origin();
        let mut mesh = ClothMesh {
            particles: Vec::with_capacity(particle_count),
            constraints: SlotMap::with_capacity_and_key(constraint_count),
            config,
        };

        for row in 0..rows {
            for col in 0..columns {
                let pos = Vec2::new(
                    origin.x + F::from_usize(col) * mesh.config.spacing_x,
                    origin.y + F::from_usize(row) * mesh.config.spacing_y,
                );
                mesh.particles.push(Particle::new(pos));
                let id = mesh.particles.len() - 1;

                if col > 0 {
                    mesh.attach(id, id - 1)?;
                }
                if row > 0 {
                    mesh.attach(id, col + (row - 1) * columns)?;
                }
            }
        }

        ftlog::info!(
            "Built cloth mesh: {}x{} particles, {} constraints",
            columns,
            rows,
            mesh.constraints.len()
        );
        Ok(mesh)
    }

    /// Connect `owner` to `other` with a constraint at their current distance.
    ///
    /// The handle is registered on both particles; `owner` is the one that
    /// resolves it during relaxation.
    pub fn attach(&mut self, owner: ParticleId, other: ParticleId) -> Result<ConstraintKey, ClothError> {
        self.check_id(owner)?;
        self.check_id(other)?;
        let constraint = Constraint::between(owner, other, &self.particles);
        if owner == other || !(constraint.rest_length > F::zero()) {
            return Err(ClothError::DegenerateConstraint { p1: owner, p2: other });
        }
        let key = self.constraints.insert(constraint);
        self.particles[owner].register(key);
        self.particles[other].register(key);
        Ok(key)
    }

    /// Advance one frame with the configured pass count and no observer.
    pub fn step(&mut self, dt: F) {
        self.step_observed(dt, &mut NoOpStepObserver);
    }

    /// Advance one frame: `physics_accuracy` relaxation passes, the optional
    /// tear sweep, then one gravity + Verlet integration pass.
    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        for pass in 0..self.config.physics_accuracy {
            self.relax();
            observer.on_relaxation_pass(pass);
        }

        if self.config.auto_tear {
            let tear_distance = self.config.tear_distance;
            self.tear_where(|c, particles| c.is_overstretched(particles, tear_distance), observer);
        }

        self.integrate(dt);
        observer.on_integrate();
        observer.on_step_complete();
    }

    /// One relaxation pass over every particle, last-created first.
    pub fn relax(&mut self) {
        for id in (0..self.particles.len()).rev() {
            self.relax_particle(id);
        }
    }

    /// Relax a single particle.
    ///
    /// A pinned particle snaps to its target and nothing else happens to it
    /// this pass. A free one resolves the constraints it owns, newest first,
    /// then is reflected back inside the bounds.
    pub fn enforce_pin_or_boundary(&mut self, id: ParticleId) -> Result<(), ClothError> {
        self.check_id(id)?;
        self.relax_particle(id);
        Ok(())
    }

    fn relax_particle(&mut self, id: ParticleId) {
        if self.particles[id].snap_to_pin() {
            return;
        }

        let stiffness = self.config.stiffness;
        for slot in (0..self.particles[id].constraints().len()).rev() {
            let key = self.particles[id].constraints()[slot];
            if let Some(c) = self.constraints.get(key) {
                if c.p1 == id {
                    c.resolve(&mut self.particles, stiffness);
                }
            }
        }

        self.particles[id].reflect_into(self.config.bounds);
    }

    /// Apply gravity to every particle and advance it by `dt`.
    pub fn integrate(&mut self, dt: F) {
        let gravity = Vec2::new(F::zero(), self.config.gravity);
        let dt_sq = dt * dt;
        let damping = self.config.damping;
        for p in self.particles.iter_mut().rev() {
            p.apply_force(gravity);
            p.integrate(dt_sq, damping);
        }
    }

    /// Remove a constraint and detach it from both endpoints.
    pub fn tear(&mut self, key: ConstraintKey) -> Option<Constraint<F>> {
        self.tear_observed(key, &mut NoOpStepObserver)
    }

    pub fn tear_observed<O: StepObserver>(&mut self, key: ConstraintKey, observer: &mut O) -> Option<Constraint<F>> {
        let constraint = self.constraints.remove(key)?;
        self.particles[constraint.p1].detach(key);
        self.particles[constraint.p2].detach(key);
        ftlog::debug!("Tore constraint {} - {}", constraint.p1, constraint.p2);
        observer.on_tear(key);
        Some(constraint)
    }

    /// Tear `key` if it is longer than the tear distance.
    pub fn tear_if_overstretched(&mut self, key: ConstraintKey) -> bool {
        let overstretched = match self.constraints.get(key) {
            Some(c) => c.is_overstretched(&self.particles, self.config.tear_distance),
            None => return false,
        };
        overstretched && self.tear(key).is_some()
    }

    /// Tear every constraint longer than the tear distance. Returns how many went.
    pub fn tear_overstretched(&mut self) -> usize {
        self.tear_overstretched_observed(&mut NoOpStepObserver)
    }

    pub fn tear_overstretched_observed<O: StepObserver>(&mut self, observer: &mut O) -> usize {
        let tear_distance = self.config.tear_distance;
        self.tear_where(|c, particles| c.is_overstretched(particles, tear_distance), observer)
    }

    /// Tear every constraint whose midpoint lies within `radius` of `point`.
    pub fn cut_near(&mut self, point: Vec2<F>, radius: F) -> usize {
        self.cut_near_observed(point, radius, &mut NoOpStepObserver)
    }

    pub fn cut_near_observed<O: StepObserver>(&mut self, point: Vec2<F>, radius: F, observer: &mut O) -> usize {
        let radius_sq = radius * radius;
        let cut = self.tear_where(
            |c, particles| c.midpoint(particles).distance_sq(point) < radius_sq,
            observer,
        );
        if cut > 0 {
            ftlog::debug!("Cut {} constraints near ({}, {})", cut, point.x, point.y);
        }
        cut
    }

    fn tear_where<P, O>(&mut self, predicate: P, observer: &mut O) -> usize
    where
        P: Fn(&Constraint<F>, &[Particle<F>]) -> bool,
        O: StepObserver,
    {
        let doomed: Vec<ConstraintKey> = self
            .constraints
            .iter()
            .filter(|(_, c)| predicate(c, &self.particles))
            .map(|(key, _)| key)
            .collect();
        for key in &doomed {
            self.tear_observed(*key, observer);
        }
        doomed.len()
    }

    /// Give free particles within `radius` of the pointer the pointer's motion.
    ///
    /// Only the previous position changes, so the drag shows up as velocity
    /// on the next integration.
    pub fn drag_near(&mut self, pointer: Vec2<F>, pointer_prev: Vec2<F>, radius: F) -> usize {
        let radius_sq = radius * radius;
        let motion = (pointer - pointer_prev).scale(F::from_f32(DRAG_FACTOR));
        let mut dragged = 0;
        for p in self.particles.iter_mut() {
            if !p.is_pinned() && p.pos.distance_sq(pointer) < radius_sq {
                p.prev_pos = p.pos - motion;
                dragged += 1;
            }
        }
        dragged
    }

    pub fn pin_particle(&mut self, id: ParticleId, target: Vec2<F>) -> Result<(), ClothError> {
        self.check_id(id)?;
        self.particles[id].pin(target);
        Ok(())
    }

    pub fn unpin_particle(&mut self, id: ParticleId) -> Result<(), ClothError> {
        self.check_id(id)?;
        self.particles[id].unpin();
        Ok(())
    }

    /// Move a particle without touching its constraints.
    pub fn place_particle(&mut self, id: ParticleId, pos: Vec2<F>, prev_pos: Vec2<F>) -> Result<(), ClothError> {
        self.check_id(id)?;
        let p = &mut self.particles[id];
        p.pos = pos;
        p.prev_pos = prev_pos;
        Ok(())
    }

    /// Change the walls, e.g. after the drawing surface was resized.
    pub fn set_bounds(&mut self, bounds: Vec2<F>) -> Result<(), ClothError> {
        if !bounds.is_finite() || bounds.x <= F::one() || bounds.y <= F::one() {
            return Err(ClothError::InvalidBounds);
        }
        self.config.bounds = bounds;
        Ok(())
    }

    fn check_id(&self, id: ParticleId) -> Result<(), ClothError> {
        if id < self.particles.len() {
            Ok(())
        } else {
            Err(ClothError::ParticleOutOfBounds { index: id, count: self.particles.len() })
        }
    }

    pub fn index(&self, col: usize, row: usize) -> ParticleId {
        row * self.config.columns() + col
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle<F>> {
        self.particles.get(id)
    }

    pub fn particle_at(&self, col: usize, row: usize) -> Option<&Particle<F>> {
        if col >= self.config.columns() || row >= self.config.rows() {
            return None;
        }
        self.particles.get(self.index(col, row))
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn constraint(&self, key: ConstraintKey) -> Option<&Constraint<F>> {
        self.constraints.get(key)
    }

    /// Live constraints with their handles.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintKey, &Constraint<F>)> + '_ {
        self.constraints.iter()
    }

    /// Endpoint pairs of every live constraint, for line drawing.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2<F>, Vec2<F>)> + '_ {
        self.constraints
            .values()
            .map(move |c| (self.particles[c.p1].pos, self.particles[c.p2].pos))
    }

    pub fn positions(&self) -> Vec<Vec2<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn bounds(&self) -> Vec2<F> { self.config.bounds }
    pub fn width(&self) -> usize { self.config.width }
    pub fn height(&self) -> usize { self.config.height }
    pub fn columns(&self) -> usize { self.config.columns() }
    pub fn rows(&self) -> usize { self.config.rows() }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}
