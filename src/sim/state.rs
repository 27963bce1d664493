//! Scene state: the disc, the arrow and the one-shot hit latch

use glam::Vec2;

use super::color::{Color, ColorSource};
use crate::settings::SceneConfig;

/// The stationary target
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    pub pos: Vec2,
    /// Fixed after creation
    pub radius: f32,
    pub color: Color,
}

/// The moving arrow; `pos` is the right (trailing) end of the shaft
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub pos: Vec2,
    pub shaft_length: f32,
    pub thickness: f32,
    pub head_size: f32,
    /// Half the height of the head's base
    pub head_half_height: f32,
    /// Horizontal pixels per tick
    pub velocity: f32,
    pub moving: bool,
    pub color: Color,
}

/// Complete scene state, owned by the host and passed to every operation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub disc: Disc,
    pub arrow: Arrow,
    /// Set on the first hit; suppresses further hits until reset
    pub has_collided_once: bool,
    /// Surface size in pixels
    pub width: f32,
    pub height: f32,
    /// Where the arrow starts and returns to on reset
    pub arrow_home: Vec2,
    /// Arrow stops once `pos.x` drops below this
    pub off_surface_x: f32,
}

impl SimulationState {
    /// Fresh scene with the classic layout
    pub fn new(width: f32, height: f32, colors: &mut impl ColorSource) -> Self {
        Self::with_config(width, height, &SceneConfig::default(), colors)
    }

    /// Disc on the left with a random color, arrow on the right, both vertically centered
    pub fn with_config(
        width: f32,
        height: f32,
        config: &SceneConfig,
        colors: &mut impl ColorSource,
    ) -> Self {
        let center_y = height / 2.0;
        let arrow_home = Vec2::new(width - config.arrow_right_offset, center_y);

        Self {
            disc: Disc {
                pos: Vec2::new(config.disc_x, center_y),
                radius: config.disc_radius,
                color: colors.next_color(),
            },
            arrow: Arrow {
                pos: arrow_home,
                shaft_length: config.shaft_length,
                thickness: config.shaft_thickness,
                head_size: config.head_size,
                head_half_height: config.head_half_height,
                velocity: config.velocity,
                moving: false,
                color: config.arrow_color,
            },
            has_collided_once: false,
            width,
            height,
            arrow_home,
            off_surface_x: config.off_surface_x,
        }
    }

    /// New disc color, arrow back home and idle, hit latch cleared
    ///
    /// Disc position and radius are left alone.
    pub fn reset(&mut self, colors: &mut impl ColorSource) {
        self.disc.color = colors.next_color();
        self.arrow.pos = self.arrow_home;
        self.arrow.moving = false;
        self.has_collided_once = false;
    }

    /// Move the disc vertically, keeping it fully on the surface
    pub fn reposition_disc_vertically(&mut self, desired_y: f32) {
        let min = self.disc.radius;
        let max = self.height - self.disc.radius;
        // not `clamp`: that panics when max < min
        self.disc.pos.y = desired_y.max(min).min(max);
    }
}
