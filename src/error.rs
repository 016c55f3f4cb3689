//! Error types for cloth construction and particle access.

use core::fmt;

/// Errors that can occur while building or addressing a cloth.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// The grid needs at least one cell in each direction.
    InvalidGridDimensions { width: usize, height: usize },
    /// Particle spacing must be positive and finite on both axes.
    InvalidSpacing,
    /// Surface bounds must be finite and larger than the 1-unit margin.
    InvalidBounds,
    /// Tear distance must be positive.
    InvalidTearDistance,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// A constraint needs two distinct particles that are apart.
    DegenerateConstraint { p1: usize, p2: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { width, height } => {
                write!(f, "cloth must be at least 1x1 cells, got {}x{}", width, height)
            }
            ClothError::InvalidSpacing => write!(f, "spacing must be positive and finite"),
            ClothError::InvalidBounds => write!(f, "bounds must be finite and greater than 1"),
            ClothError::InvalidTearDistance => write!(f, "tear distance must be positive"),
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            ClothError::DegenerateConstraint { p1, p2 } => {
                write!(f, "cannot constrain particle {} to particle {}: zero rest length", p1, p2)
            }
        }
    }
}

impl std::error::Error for ClothError {}
