//! Pointer handling: turns host mouse events into pins, drags and cuts.

use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::ClothMesh;
use crate::particle::ParticleId;
use crate::vec::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Last known pointer position, the one before it, and the held button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState<F: Float> {
    pub pos: Vec2<F>,
    pub prev: Vec2<F>,
    pub pressed: Option<PointerButton>,
}

/// Applies pointer events to a mesh as they arrive; last write wins.
///
/// By default every move pins the grab particle (a near-top-center one) to
/// the cursor. While the primary button is held, nearby particles follow the
/// pointer; while the secondary button is held, constraints under it are cut.
pub struct InputAdapter<F: Float> {
    pointer: PointerState<F>,
    grab_index: ParticleId,
    pin_on_move: bool,
    cut_on_drag: bool,
    influence: F,
    cut_radius: F,
}

impl<F: Float> InputAdapter<F> {
    /// Grab the particle at index `5 * width / 2`, or the last particle when
    /// the grid is too short to hold it.
    pub fn new(mesh: &ClothMesh<F>) -> Self {
        InputAdapter {
            pointer: PointerState {
                pos: Vec2::zero(),
                prev: Vec2::zero(),
                pressed: None,
            },
            grab_index: (5 * mesh.width() / 2).min(mesh.particle_count() - 1),
            pin_on_move: true,
            cut_on_drag: false,
            influence: mesh.config().mouse_influence,
            cut_radius: mesh.config().mouse_cut,
        }
    }

    pub fn with_grab_index(mut self, index: ParticleId) -> Self {
        self.grab_index = index;
        self
    }

    /// Whether moving the pointer pins the grab particle to it.
    pub fn with_pin_on_move(mut self, enabled: bool) -> Self {
        self.pin_on_move = enabled;
        self
    }

    /// Make a primary-button drag cut instead of pulling.
    pub fn with_cut_on_drag(mut self, enabled: bool) -> Self {
        self.cut_on_drag = enabled;
        self
    }

    /// Put particle `index` at `(x, y)` with previous position `(prev_x, prev_y)`
    /// and pin it there.
    pub fn pin_particle_to_pointer(
        &self,
        mesh: &mut ClothMesh<F>,
        index: ParticleId,
        x: F,
        y: F,
        prev_x: F,
        prev_y: F,
    ) -> Result<(), ClothError> {
        let target = Vec2::new(x, y);
        mesh.place_particle(index, target, Vec2::new(prev_x, prev_y))?;
        mesh.pin_particle(index, target)
    }

    /// Handle a move to `(x, y)` in surface coordinates.
    ///
    /// Dragging and cutting happen even if pinning the grab particle fails;
    /// the pin error is returned afterwards.
    pub fn pointer_move(&mut self, mesh: &mut ClothMesh<F>, x: F, y: F) -> Result<(), ClothError> {
        self.pointer.prev = self.pointer.pos;
        self.pointer.pos = Vec2::new(x, y);

        let pinned = if self.pin_on_move {
            let PointerState { pos, prev, .. } = self.pointer;
            self.pin_particle_to_pointer(mesh, self.grab_index, pos.x, pos.y, prev.x, prev.y)
        } else {
            Ok(())
        };

        match self.pointer.pressed {
            Some(PointerButton::Primary) if !self.cut_on_drag => {
                mesh.drag_near(self.pointer.pos, self.pointer.prev, self.influence);
            }
            Some(_) => {
                self.cut_near(mesh, x, y, self.cut_radius);
            }
            None => {}
        }
        pinned
    }

    pub fn pointer_down(&mut self, button: PointerButton) {
        self.pointer.pressed = Some(button);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.pressed = None;
    }

    /// Release the grab particle so it falls with the rest of the cloth.
    pub fn release(&self, mesh: &mut ClothMesh<F>) -> Result<(), ClothError> {
        mesh.unpin_particle(self.grab_index)
    }

    /// Cut every constraint whose midpoint is within `radius` of `(x, y)`.
    pub fn cut_near(&self, mesh: &mut ClothMesh<F>, x: F, y: F, radius: F) -> usize {
        mesh.cut_near(Vec2::new(x, y), radius)
    }

    pub fn pointer(&self) -> &PointerState<F> { &self.pointer }
    pub fn grab_index(&self) -> ParticleId { self.grab_index }
}
