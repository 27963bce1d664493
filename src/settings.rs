//! Scene configuration
//!
//! Defaults reproduce the classic layout exactly; any field can be
//! overridden from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Color;

/// Initial geometry, motion and palette of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // === Disc ===
    pub disc_x: f32,
    pub disc_radius: f32,

    // === Arrow ===
    /// Distance of the arrow's start position from the right edge
    pub arrow_right_offset: f32,
    pub shaft_length: f32,
    pub shaft_thickness: f32,
    pub head_size: f32,
    pub head_half_height: f32,
    /// Pixels per tick (negative = leftward)
    pub velocity: f32,
    pub off_surface_x: f32,

    // === Palette ===
    pub arrow_color: Color,
    pub background: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            disc_x: DISC_X,
            disc_radius: DISC_RADIUS,

            arrow_right_offset: ARROW_RIGHT_OFFSET,
            shaft_length: ARROW_SHAFT_LENGTH,
            shaft_thickness: ARROW_THICKNESS,
            head_size: ARROW_HEAD_SIZE,
            head_half_height: ARROW_HEAD_HALF_HEIGHT,
            velocity: ARROW_VELOCITY,
            off_surface_x: OFF_SURFACE_X,

            arrow_color: Color::new(0x11, 0x11, 0x11),
            background: Color::WHITE,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("disc_x", self.disc_x),
            ("arrow_right_offset", self.arrow_right_offset),
            ("velocity", self.velocity),
            ("off_surface_x", self.off_surface_x),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
        }

        let positive = [
            ("disc_radius", self.disc_radius),
            ("shaft_length", self.shaft_length),
            ("shaft_thickness", self.shaft_thickness),
            ("head_size", self.head_size),
            ("head_half_height", self.head_half_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive(field));
            }
        }

        // A still or rightward arrow never crosses `off_surface_x`
        if self.velocity >= 0.0 {
            return Err(ConfigError::NonNegativeVelocity);
        }
        Ok(())
    }
}
