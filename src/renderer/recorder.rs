//! Drawing surface that records draw calls instead of producing pixels

use glam::Vec2;

use super::DrawingSurface;
use crate::sim::Color;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
}

/// Keeps every draw call since creation; each `clear` starts a new frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    /// Index of the latest `Clear`
    frame_start: usize,
    frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Draw calls of the most recent frame, starting with its `Clear`
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.commands[self.frame_start..]
    }

    /// Number of frames started (calls to `clear`)
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.frame_start = self.commands.len();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { min, size, color });
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.commands.push(DrawCommand::Triangle {
            points: [a, b, c],
            color,
        });
    }
}
