//! Bubble Hit - a disc, an arrow, and a single collision
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scene state, collision, tick loop)
//! - `renderer`: Drawing surfaces (WebGPU canvas, command recorder)
//! - `control`: User-facing actions wired to the simulation loop
//! - `settings`: Data-driven scene constants

pub mod control;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use control::{Command, FrameScheduler, ManualScheduler, Scene};
pub use error::{ConfigError, StartupError};
pub use settings::SceneConfig;

/// Scene constants (initial values of a fresh scene)
pub mod consts {
    /// Disc defaults
    pub const DISC_X: f32 = 110.0;
    pub const DISC_RADIUS: f32 = 36.0;

    /// Arrow starts this far left of the right surface edge
    pub const ARROW_RIGHT_OFFSET: f32 = 140.0;
    pub const ARROW_SHAFT_LENGTH: f32 = 60.0;
    pub const ARROW_THICKNESS: f32 = 6.0;
    pub const ARROW_HEAD_SIZE: f32 = 14.0;
    /// Half the height of the head's base, centered on the shaft
    pub const ARROW_HEAD_HALF_HEIGHT: f32 = 10.0;
    /// Horizontal step per tick (not scaled by frame time)
    pub const ARROW_VELOCITY: f32 = -6.0;

    /// Arrow stops once its position passes this x (fully off the left edge)
    pub const OFF_SURFACE_X: f32 = -100.0;
}
