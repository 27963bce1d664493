//! User-facing controls
//!
//! `Scene` owns everything the running animation needs: the state, the
//! color source, the loop controller, the drawing surface and the host's
//! frame scheduler. Hosts forward input events and frame callbacks here;
//! nothing else touches the state.

use crate::error::StartupError;
use crate::renderer::{DrawingSurface, render};
use crate::settings::SceneConfig;
use crate::sim::{
    Activation, ColorSource, LoopPhase, RandomColorGenerator, SimulationLoop, SimulationState,
    TickHandle, TickOutcome,
};

/// Host hook for "call me back on the next frame"
pub trait FrameScheduler {
    /// Request one tick callback; `None` if the host could not schedule it
    fn request_frame(&mut self) -> Option<TickHandle>;
}

/// Scheduler for hosts that pump frames themselves (headless runs, tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    requested: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total frames requested so far
    pub fn requested(&self) -> u32 {
        self.requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<TickHandle> {
        self.next_id += 1;
        self.requested += 1;
        Some(TickHandle(self.next_id))
    }
}

/// Discrete user commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Activate,
    Reset,
    /// Surface-local pointer y
    RepositionDisc(f32),
}

impl Command {
    /// Keyboard shortcut mapping: Space/Enter activate, `r` (any case) resets
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Enter" => Some(Command::Activate),
            k if k.eq_ignore_ascii_case("r") => Some(Command::Reset),
            _ => None,
        }
    }
}

/// A running disc-and-arrow scene bound to a surface and a scheduler
pub struct Scene<S, F, C = RandomColorGenerator> {
    state: SimulationState,
    colors: C,
    sim_loop: SimulationLoop,
    surface: S,
    scheduler: F,
}

impl<S: DrawingSurface, F: FrameScheduler> Scene<S, F> {
    /// Build the initial scene and draw it once
    pub fn new(
        width: u32,
        height: u32,
        config: &SceneConfig,
        seed: u64,
        surface: S,
        scheduler: F,
    ) -> Result<Self, StartupError> {
        Self::with_colors(
            width,
            height,
            config,
            RandomColorGenerator::new(seed),
            surface,
            scheduler,
        )
    }
}

impl<S: DrawingSurface, F: FrameScheduler, C: ColorSource> Scene<S, F, C> {
    pub fn with_colors(
        width: u32,
        height: u32,
        config: &SceneConfig,
        mut colors: C,
        surface: S,
        scheduler: F,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let min_height = config.disc_radius * 2.0;
        if width == 0 || (height as f32) < min_height {
            return Err(StartupError::SurfaceTooSmall {
                width,
                height,
                min_height,
            });
        }

        let state = SimulationState::with_config(width as f32, height as f32, config, &mut colors);
        log::info!(
            "Scene {}x{}: disc {} at ({}, {}), arrow at x={}",
            width,
            height,
            state.disc.color,
            state.disc.pos.x,
            state.disc.pos.y,
            state.arrow.pos.x
        );

        let mut scene = Self {
            state,
            colors,
            sim_loop: SimulationLoop::new(),
            surface,
            scheduler,
        };
        scene.redraw();
        Ok(scene)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.sim_loop.phase(&self.state) == LoopPhase::Running
    }

    /// Whether a tick callback is outstanding
    pub fn tick_pending(&self) -> bool {
        self.sim_loop.scheduled().is_some()
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Activate => self.activate(),
            Command::Reset => self.reset(),
            Command::RepositionDisc(y) => self.reposition_disc(y),
        }
    }

    /// Start the arrow; ignored while it is already moving
    pub fn activate(&mut self) {
        match self.sim_loop.activate(&mut self.state) {
            Activation::Ignored => log::debug!("Activate ignored: already running"),
            Activation::Started => {
                log::info!("Arrow launched");
                self.schedule_next();
            }
            Activation::Resumed => log::info!("Arrow relaunched on the pending tick"),
        }
    }

    /// Restore the arrow, re-roll the disc color and redraw right away
    pub fn reset(&mut self) {
        self.state.reset(&mut self.colors);
        log::info!("Scene reset, disc is now {}", self.state.disc.color);
        self.redraw();
    }

    /// Move the disc to the pointer's height (clamped) and redraw
    pub fn reposition_disc(&mut self, pointer_y: f32) {
        self.state.reposition_disc_vertically(pointer_y);
        log::debug!("Disc moved to y={}", self.state.disc.pos.y);
        self.redraw();
    }

    /// Keyboard shortcut; returns true if the key was handled
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Command::from_key(key) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    /// Frame callback from the host: run one tick and reschedule if needed
    pub fn on_frame(&mut self) -> TickOutcome {
        let outcome = self
            .sim_loop
            .tick(&mut self.state, &mut self.colors, &mut self.surface);
        if outcome.should_continue() {
            self.schedule_next();
        }
        outcome
    }

    /// Pump frames until the loop stops; for hosts without a frame clock
    pub fn run_until_idle(&mut self) -> Option<TickOutcome> {
        let mut last = None;
        while self.tick_pending() {
            last = Some(self.on_frame());
        }
        last
    }

    fn schedule_next(&mut self) {
        match self.scheduler.request_frame() {
            Some(handle) => self.sim_loop.schedule(handle),
            None => {
                log::error!("Host refused a frame callback, stopping the arrow");
                self.state.arrow.moving = false;
            }
        }
    }

    fn redraw(&mut self) {
        render(&self.state, &mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;

    fn scene() -> Scene<RecordingSurface, ManualScheduler> {
        Scene::new(
            800,
            600,
            &SceneConfig::default(),
            1234,
            RecordingSurface::new(),
            ManualScheduler::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(" "), Some(Command::Activate));
        assert_eq!(Command::from_key("Enter"), Some(Command::Activate));
        assert_eq!(Command::from_key("r"), Some(Command::Reset));
        assert_eq!(Command::from_key("R"), Some(Command::Reset));
        assert_eq!(Command::from_key("x"), None);
        assert_eq!(Command::from_key("Escape"), None);
    }

    #[test]
    fn test_initial_render_on_startup() {
        let scene = scene();
        assert_eq!(scene.surface().frames(), 1);
        assert!(!scene.is_running());
        assert!(!scene.tick_pending());
    }

    #[test]
    fn test_end_to_end_hit() {
        let mut scene = scene();
        let initial_color = scene.state().disc.color;

        scene.activate();
        assert!(scene.is_running());
        assert!(scene.tick_pending());

        let mut hits = 0;
        let mut color_changes = 0;
        let mut color = initial_color;
        while scene.tick_pending() {
            if scene.on_frame() == TickOutcome::Hit {
                hits += 1;
            }
            if scene.state().disc.color != color {
                color_changes += 1;
                color = scene.state().disc.color;
            }
        }

        assert_eq!(hits, 1);
        assert_eq!(color_changes, 1);
        assert!(!scene.is_running());
        assert!(scene.state().has_collided_once);
        // One frame request per tick, 74 ticks to the hit
        assert_eq!(scene.scheduler().requested(), 74);
        assert_eq!(scene.surface().frames(), 1 + 74);
    }

    #[test]
    fn test_double_activate_schedules_once() {
        let mut scene = scene();
        scene.activate();
        let after_one = scene.state().clone();
        scene.activate();
        assert_eq!(scene.state(), &after_one);
        assert_eq!(scene.scheduler().requested(), 1);
    }

    #[test]
    fn test_reset_mid_flight_stops_loop() {
        let mut scene = scene();
        scene.activate();
        for _ in 0..10 {
            scene.on_frame();
        }
        assert!(scene.tick_pending());

        scene.reset();
        let frames = scene.surface().frames();
        assert_eq!(scene.state().arrow.pos, Vec2::new(660.0, 300.0));
        assert!(!scene.state().arrow.moving);

        // The already-scheduled tick sees moving=false and ends the chain
        assert_eq!(scene.run_until_idle(), Some(TickOutcome::Halted));
        assert!(!scene.tick_pending());
        assert_eq!(scene.state().arrow.pos, Vec2::new(660.0, 300.0));
        assert_eq!(scene.surface().frames(), frames + 1);
    }

    #[test]
    fn test_activate_after_reset_reuses_pending_tick() {
        let mut scene = scene();
        scene.activate();
        scene.on_frame();
        scene.reset();
        scene.activate();
        // No second chain: still only the frames the first chain requested
        assert_eq!(scene.scheduler().requested(), 2);

        // The pending tick restarts from home: 74 ticks, 73 of them reschedule
        assert_eq!(scene.run_until_idle(), Some(TickOutcome::Hit));
        assert_eq!(scene.scheduler().requested(), 2 + 73);
    }

    #[test]
    fn test_reposition_redraws_and_clamps() {
        let mut scene = scene();
        scene.apply(Command::RepositionDisc(-500.0));
        assert_eq!(scene.state().disc.pos.y, 36.0);
        assert_eq!(scene.surface().frames(), 2);
        assert_eq!(
            scene.surface().last_frame()[1],
            DrawCommand::Circle {
                center: Vec2::new(110.0, 36.0),
                radius: 36.0,
                color: scene.state().disc.color,
            }
        );

        // Disc out of the arrow's path: the run ends off-surface
        scene.activate();
        assert_eq!(scene.run_until_idle(), Some(TickOutcome::Missed));
        assert!(scene.state().arrow.pos.x < -100.0);
    }

    #[test]
    fn test_handle_key_dispatch() {
        let mut scene = scene();
        assert!(!scene.handle_key("q"));
        assert!(scene.handle_key(" "));
        assert!(scene.is_running());
        assert!(scene.handle_key("R"));
        assert!(!scene.is_running());
        assert_eq!(scene.state().arrow.pos, Vec2::new(660.0, 300.0));
    }

    #[test]
    fn test_reset_redraws_immediately() {
        let mut scene = scene();
        let color = scene.state().disc.color;
        scene.reset();
        assert_eq!(scene.surface().frames(), 2);
        assert_ne!(scene.state().disc.color, color);
        assert_eq!(scene.scheduler().requested(), 0);
    }

    #[test]
    fn test_surface_too_small() {
        let result = Scene::new(
            800,
            40,
            &SceneConfig::default(),
            1,
            RecordingSurface::new(),
            ManualScheduler::new(),
        );
        assert!(matches!(
            result,
            Err(StartupError::SurfaceTooSmall { height: 40, .. })
        ));
    }

    #[test]
    fn test_rightward_arrow_rejected_at_startup() {
        let config = SceneConfig {
            velocity: 6.0,
            ..SceneConfig::default()
        };
        let result = Scene::new(
            800,
            600,
            &config,
            1,
            RecordingSurface::new(),
            ManualScheduler::new(),
        );
        assert!(matches!(
            result,
            Err(StartupError::Config(ConfigError::NonNegativeVelocity))
        ));
    }

    struct Refusing;

    impl FrameScheduler for Refusing {
        fn request_frame(&mut self) -> Option<TickHandle> {
            None
        }
    }

    #[test]
    fn test_refused_frame_stops_arrow() {
        let mut scene = Scene::new(
            800,
            600,
            &SceneConfig::default(),
            1,
            RecordingSurface::new(),
            Refusing,
        )
        .unwrap();
        scene.activate();
        assert!(!scene.is_running());
        assert!(!scene.tick_pending());
    }
}
