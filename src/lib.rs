//! Tearable 2D cloth for interactive drawing surfaces.
//!
//! `tearcloth` simulates a sheet of fabric as a grid of Verlet particles tied
//! together by distance constraints. Each frame relaxes the constraints many
//! times and then integrates once, which keeps the sheet stiff without an
//! implicit solver. Constraints can be torn or cut; particles can be pinned to
//! a pointer.
//!
//! # Features
//!
//! - **Verlet integration**: Implicit velocity with air damping
//! - **Iterative relaxation**: Soft distance constraints, reflecting walls
//! - **Tearing**: Stable constraint handles, overstretch sweep, radius cuts
//! - **Frame loop**: Idle/running stepper with fixed or measured time steps
//! - **Host glue**: `Surface` and `FrameScheduler` traits, pointer adapter
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//!
//! ```
//! use tearcloth::{ClothConfig, ClothMesh};
//!
//! let mut cloth = ClothMesh::new(ClothConfig::<f32>::new()).unwrap();
//! cloth.step(0.016);
//! assert_eq!(cloth.particle_count(), 11 * 36);
//! ```

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod mesh;
pub mod render;
pub mod stepper;
pub mod input;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use particle::{Particle, ParticleId};
pub use constraint::{Constraint, ConstraintKey};
pub use mesh::ClothMesh;
pub use render::{StrokeStyle, Surface};
pub use stepper::{FrameScheduler, LoopState, SimulationStepper, TimeStep};
pub use input::{InputAdapter, PointerButton, PointerState};
pub use config::ClothConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
