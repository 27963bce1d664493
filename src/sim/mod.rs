//! Deterministic simulation module
//!
//! All scene logic lives here:
//! - Fixed step per tick, never scaled by frame time
//! - Seeded RNG only
//! - No platform dependencies; drawing goes through `renderer::DrawingSurface`

pub mod collision;
pub mod color;
pub mod state;
pub mod tick;

pub use collision::{arrow_tip, has_collided, point_in_circle};
pub use color::{Color, ColorSource, RandomColorGenerator};
pub use state::{Arrow, Disc, SimulationState};
pub use tick::{Activation, LoopPhase, SimulationLoop, TickHandle, TickOutcome};
