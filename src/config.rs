//! Startup configuration for the cloth and its interaction radii.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec2;

/// Configuration for a cloth mesh and the simulation around it.
///
/// Defaults describe a 10x35 cell sheet hanging in a 1200x800 surface.
///
/// # Builder Pattern
/// ```
/// use tearcloth::config::ClothConfig;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_grid(20, 12)
///     .with_spacing(10.0)
///     .with_gravity(0.0)
///     .with_surface_size(640.0, 480.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    /// Relaxation passes per step. More passes = stiffer cloth. Default: 20.
    pub physics_accuracy: usize,
    /// Radius around the pointer that drags particles. Default: 20.
    pub mouse_influence: F,
    /// Radius around the pointer that cuts constraints. Default: 5.
    pub mouse_cut: F,
    /// Downward acceleration, in surface units per second². Default: 300.
    pub gravity: F,
    /// Cells across; the mesh has `width + 1` columns of particles. Default: 10.
    pub width: usize,
    /// Cells down; the mesh has `height + 1` rows of particles. Default: 35.
    pub height: usize,
    /// Left edge of the cloth. `None` centers it inside the bounds.
    pub start_x: Option<F>,
    /// Top edge of the cloth. Default: 20.
    pub start_y: F,
    /// Horizontal particle spacing. Default: 15.
    pub spacing_x: F,
    /// Vertical particle spacing. Default: 15.
    pub spacing_y: F,
    /// Constraints longer than this tear. Default: 150.
    pub tear_distance: F,
    /// Largest coordinate a free particle may keep; the lower wall is at 1.
    pub bounds: Vec2<F>,
    /// Fraction of last frame's motion carried into the next. Default: 0.985.
    pub damping: F,
    /// Share of the length error each endpoint corrects per resolve. Default: 0.2.
    pub stiffness: F,
    /// Seconds per step when the host does not measure time. Default: 0.016.
    pub time_step: F,
    /// Sweep for overstretched constraints on every step. Default: false.
    pub auto_tear: bool,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            physics_accuracy: 20,
            mouse_influence: F::from_f32(20.0),
            mouse_cut: F::from_f32(5.0),
            gravity: F::from_f32(300.0),
            width: 10,
            height: 35,
            start_x: None,
            start_y: F::from_f32(20.0),
            spacing_x: F::from_f32(15.0),
            spacing_y: F::from_f32(15.0),
            tear_distance: F::from_f32(150.0),
            bounds: Vec2::new(F::from_f32(1199.0), F::from_f32(799.0)),
            damping: F::from_f32(0.985),
            stiffness: F::from_f32(0.2),
            time_step: F::from_f32(0.016),
            auto_tear: false,
        }
    }

    pub fn with_physics_accuracy(mut self, passes: usize) -> Self {
        self.physics_accuracy = passes;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the logical size in cells.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the same spacing on both axes.
    pub fn with_spacing(mut self, spacing: F) -> Self {
        self.spacing_x = spacing;
        self.spacing_y = spacing;
        self
    }

    pub fn with_spacing_xy(mut self, spacing_x: F, spacing_y: F) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    /// Place the top-left particle explicitly instead of centering.
    pub fn with_start(mut self, x: F, y: F) -> Self {
        self.start_x = Some(x);
        self.start_y = y;
        self
    }

    pub fn with_start_y(mut self, y: F) -> Self {
        self.start_y = y;
        self
    }

    pub fn with_tear_distance(mut self, distance: F) -> Self {
        self.tear_distance = distance;
        self
    }

    pub fn with_bounds(mut self, bounds: Vec2<F>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Derive bounds from a drawing surface of `width` x `height` pixels.
    pub fn with_surface_size(mut self, width: F, height: F) -> Self {
        self.bounds = Vec2::new(width - F::one(), height - F::one());
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_mouse_influence(mut self, radius: F) -> Self {
        self.mouse_influence = radius;
        self
    }

    pub fn with_mouse_cut(mut self, radius: F) -> Self {
        self.mouse_cut = radius;
        self
    }

    pub fn with_time_step(mut self, dt: F) -> Self {
        self.time_step = dt;
        self
    }

    pub fn with_auto_tear(mut self, enabled: bool) -> Self {
        self.auto_tear = enabled;
        self
    }

    /// Position of the particle at column 0, row 0.
    pub fn origin(&self) -> Vec2<F> {
        let x = self.start_x.unwrap_or_else(|| {
            let surface_width = self.bounds.x + F::one();
            surface_width * F::half() - F::from_usize(self.width) * self.spacing_x * F::half()
        });
        Vec2::new(x, self.start_y)
    }

    /// Number of particles per row.
    pub fn columns(&self) -> usize {
        self.width + 1
    }

    /// Number of particle rows.
    pub fn rows(&self) -> usize {
        self.height + 1
    }

    /// Particle and constraint counts of the full grid, or `None` on overflow.
    pub fn element_counts(&self) -> Option<(usize, usize)> {
        let columns = self.width.checked_add(1)?;
        let rows = self.height.checked_add(1)?;
        let particles = columns.checked_mul(rows)?;
        let constraints = self
            .width
            .checked_mul(rows)?
            .checked_add(self.height.checked_mul(columns)?)?;
        Some((particles, constraints))
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if self.width == 0 || self.height == 0 {
            return Err(ClothError::InvalidGridDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.element_counts().is_none() {
            return Err(ClothError::InvalidGridDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let spacing_ok = |s: F| s.is_finite() && s > F::zero();
        if !spacing_ok(self.spacing_x) || !spacing_ok(self.spacing_y) {
            return Err(ClothError::InvalidSpacing);
        }
        if !self.bounds.is_finite() || self.bounds.x <= F::one() || self.bounds.y <= F::one() {
            return Err(ClothError::InvalidBounds);
        }
        if !(self.tear_distance > F::zero()) {
            return Err(ClothError::InvalidTearDistance);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
