//! Frame loop: owns the mesh, decides the time step, clears/steps/draws per tick.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::ClothMesh;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::render::{StrokeStyle, Surface};

/// How much simulated time a tick covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeStep<F: Float> {
    /// Always step by this many seconds, whatever the host's frame rate.
    Fixed(F),
    /// Step by the elapsed time the host reports, clamped to `[0, max]`.
    Measured { max: F },
}

impl<F: Float> TimeStep<F> {
    /// Seconds to simulate for a frame that took `elapsed` seconds.
    pub fn resolve(&self, elapsed: F) -> F {
        match *self {
            TimeStep::Fixed(dt) => dt,
            TimeStep::Measured { max } => {
                if elapsed.is_finite() {
                    elapsed.clamp(F::zero(), max)
                } else {
                    max
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// No frame scheduled.
    Idle,
    /// A frame is scheduled or executing.
    Running,
}

/// Host hook for arming the next animation frame.
///
/// In a browser this wraps `requestAnimationFrame`; tests use a counter.
pub trait FrameScheduler {
    fn request_frame(&mut self);

    /// Drop a frame requested earlier, if the host supports it.
    fn cancel_frame(&mut self) {}
}

/// Simulation context handed around by the host instead of global state.
pub struct SimulationStepper<F: Float> {
    mesh: ClothMesh<F>,
    time_step: TimeStep<F>,
    style: StrokeStyle,
    state: LoopState,
    frames: u64,
}

impl<F: Float> SimulationStepper<F> {
    /// Wrap an existing mesh. The time step defaults to the mesh's fixed step.
    pub fn new(mesh: ClothMesh<F>) -> Self {
        let time_step = TimeStep::Fixed(mesh.config().time_step);
        SimulationStepper {
            mesh,
            time_step,
            style: StrokeStyle::default(),
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn from_config(config: ClothConfig<F>) -> Result<Self, ClothError> {
        Ok(Self::new(ClothMesh::new(config)?))
    }

    pub fn with_time_step(mut self, time_step: TimeStep<F>) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Idle -> Running, arming the first frame. Returns `false` if already running.
    pub fn start<R: FrameScheduler>(&mut self, scheduler: &mut R) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        scheduler.request_frame();
        ftlog::info!("Simulation started after {} frames", self.frames);
        true
    }

    /// Running -> Idle. The pending frame is cancelled and later ticks are ignored.
    pub fn stop<R: FrameScheduler>(&mut self, scheduler: &mut R) -> bool {
        if self.state == LoopState::Idle {
            return false;
        }
        self.state = LoopState::Idle;
        scheduler.cancel_frame();
        ftlog::info!("Simulation stopped after {} frames", self.frames);
        true
    }

    /// Run one animation frame: clear, step, draw, re-arm.
    ///
    /// Does nothing and schedules nothing while idle.
    pub fn tick<S, R>(&mut self, surface: &mut S, scheduler: &mut R, elapsed: F) -> bool
    where
        S: Surface<F>,
        R: FrameScheduler,
    {
        self.tick_observed(surface, scheduler, elapsed, &mut NoOpStepObserver)
    }

    pub fn tick_observed<S, R, O>(
        &mut self,
        surface: &mut S,
        scheduler: &mut R,
        elapsed: F,
        observer: &mut O,
    ) -> bool
    where
        S: Surface<F>,
        R: FrameScheduler,
        O: StepObserver,
    {
        if self.state == LoopState::Idle {
            return false;
        }
        self.mesh.clear(surface);
        self.advance_observed(elapsed, observer);
        self.mesh.draw(surface, &self.style);
        scheduler.request_frame();
        true
    }

    /// Step the mesh without touching any surface. Returns the simulated seconds.
    pub fn advance(&mut self, elapsed: F) -> F {
        self.advance_observed(elapsed, &mut NoOpStepObserver)
    }

    pub fn advance_observed<O: StepObserver>(&mut self, elapsed: F, observer: &mut O) -> F {
        let dt = self.time_step.resolve(elapsed);
        self.mesh.step_observed(dt, observer);
        self.frames += 1;
        dt
    }

    pub fn state(&self) -> LoopState { self.state }
    pub fn is_running(&self) -> bool { self.state == LoopState::Running }
    pub fn frame_count(&self) -> u64 { self.frames }
    pub fn time_step(&self) -> TimeStep<F> { self.time_step }
    pub fn stroke_style(&self) -> &StrokeStyle { &self.style }
    pub fn mesh(&self) -> &ClothMesh<F> { &self.mesh }
    pub fn mesh_mut(&mut self) -> &mut ClothMesh<F> { &mut self.mesh }
}
