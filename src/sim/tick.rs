//! Fixed-step simulation tick
//!
//! One tick moves the arrow by exactly one velocity step, regardless of how
//! much wall-clock time passed since the previous frame. The loop runs
//! while `arrow.moving` is set and stops itself on a hit or once the arrow
//! has left the surface.

use super::collision::has_collided;
use super::color::ColorSource;
use super::state::SimulationState;
use crate::renderer::{DrawingSurface, render};

/// Handle of a frame callback requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub i32);

/// Loop state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Arrow at rest, no tick scheduled
    Idle,
    /// Arrow moving, a tick is (or is about to be) scheduled
    Running,
}

/// What a tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still moving, schedule another tick
    Continue,
    /// Tip entered the disc; disc recolored, arrow stopped
    Hit,
    /// Arrow left the surface without hitting
    Missed,
    /// `moving` was cleared from outside (reset) before this tick ran
    Halted,
}

impl TickOutcome {
    pub fn should_continue(self) -> bool {
        self == TickOutcome::Continue
    }
}

/// Result of an activate request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Already running; nothing changed
    Ignored,
    /// Idle -> Running; the host must schedule the first tick
    Started,
    /// Restarted while a stale tick is still pending; that tick carries on
    Resumed,
}

/// Loop controller: owns the handle of the currently scheduled tick
#[derive(Debug, Default)]
pub struct SimulationLoop {
    scheduled: Option<TickHandle>,
    /// Ticks since the last activation (for logging)
    ticks: u64,
}

impl SimulationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, state: &SimulationState) -> LoopPhase {
        if state.arrow.moving {
            LoopPhase::Running
        } else {
            LoopPhase::Idle
        }
    }

    /// Currently scheduled tick, if any
    pub fn scheduled(&self) -> Option<TickHandle> {
        self.scheduled
    }

    /// Record the handle of the tick the host just requested
    pub fn schedule(&mut self, handle: TickHandle) {
        self.scheduled = Some(handle);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Start the arrow moving unless it already is
    pub fn activate(&mut self, state: &mut SimulationState) -> Activation {
        if state.arrow.moving {
            return Activation::Ignored;
        }
        state.arrow.moving = true;
        self.ticks = 0;

        if self.scheduled.is_some() {
            Activation::Resumed
        } else {
            Activation::Started
        }
    }

    /// Advance the state by one step without drawing
    ///
    /// Reads the live `moving` flag, so a reset that ran since the tick was
    /// scheduled stops the loop here.
    pub fn step(
        &mut self,
        state: &mut SimulationState,
        colors: &mut impl ColorSource,
    ) -> TickOutcome {
        if !state.arrow.moving {
            return TickOutcome::Halted;
        }

        self.ticks += 1;
        state.arrow.pos.x += state.arrow.velocity;

        if !state.has_collided_once && has_collided(state) {
            state.has_collided_once = true;
            state.arrow.moving = false;
            state.disc.color = colors.next_color();
            return TickOutcome::Hit;
        }

        if state.arrow.pos.x < state.off_surface_x {
            state.arrow.moving = false;
            return TickOutcome::Missed;
        }

        TickOutcome::Continue
    }

    /// Run the scheduled tick: step, then always redraw
    ///
    /// Consumes the scheduled handle; the caller schedules the next tick
    /// only if the outcome says to continue.
    pub fn tick(
        &mut self,
        state: &mut SimulationState,
        colors: &mut impl ColorSource,
        surface: &mut impl DrawingSurface,
    ) -> TickOutcome {
        self.scheduled = None;
        let outcome = self.step(state, colors);
        render(state, surface);

        match outcome {
            TickOutcome::Continue => {
                log::debug!("tick {}: arrow at x={:.1}", self.ticks, state.arrow.pos.x)
            }
            TickOutcome::Hit => log::info!(
                "Hit after {} ticks, disc is now {}",
                self.ticks,
                state.disc.color
            ),
            TickOutcome::Missed => {
                log::info!("Missed: arrow left the surface after {} ticks", self.ticks)
            }
            TickOutcome::Halted => log::debug!("Tick found the arrow stopped, loop ends"),
        }
        outcome
    }
}
