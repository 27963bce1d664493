//! Scene rendering
//!
//! `render` paints a `SimulationState` onto any `DrawingSurface`. The WebGPU
//! canvas surface tessellates into triangles; the recording surface keeps
//! the draw calls for the headless host and tests.

pub mod pipeline;
pub mod recorder;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use recorder::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::{Color, SimulationState, arrow_tip};

/// A fixed-size 2D surface in pixel coordinates (origin top-left, y down)
pub trait DrawingSurface {
    /// Wipe everything drawn so far
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Axis-aligned rectangle from its top-left corner
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
    /// Show the finished frame
    fn present(&mut self) {}
}

/// Redraw the whole scene, replacing the previous frame
pub fn render(state: &SimulationState, surface: &mut impl DrawingSurface) {
    surface.clear();

    let disc = &state.disc;
    surface.fill_circle(disc.pos, disc.radius, disc.color);

    // Shaft: from pos.x - shaft_length to pos.x, centered on pos.y
    let arrow = &state.arrow;
    let shaft_left = arrow.pos.x - arrow.shaft_length;
    surface.fill_rect(
        Vec2::new(shaft_left, arrow.pos.y - arrow.thickness / 2.0),
        Vec2::new(arrow.shaft_length, arrow.thickness),
        arrow.color,
    );

    // Head: base on the shaft's left end, apex at the tip
    surface.fill_triangle(
        Vec2::new(shaft_left, arrow.pos.y - arrow.head_half_height),
        arrow_tip(arrow),
        Vec2::new(shaft_left, arrow.pos.y + arrow.head_half_height),
        arrow.color,
    );

    surface.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RandomColorGenerator;

    #[test]
    fn test_render_draws_disc_then_arrow() {
        let state = SimulationState::new(800.0, 600.0, &mut RandomColorGenerator::new(1));
        let mut surface = RecordingSurface::new();

        render(&state, &mut surface);

        let arrow = Color::new(0x11, 0x11, 0x11);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Clear,
                DrawCommand::Circle {
                    center: Vec2::new(110.0, 300.0),
                    radius: 36.0,
                    color: state.disc.color,
                },
                DrawCommand::Rect {
                    min: Vec2::new(600.0, 297.0),
                    size: Vec2::new(60.0, 6.0),
                    color: arrow,
                },
                DrawCommand::Triangle {
                    points: [
                        Vec2::new(600.0, 290.0),
                        Vec2::new(586.0, 300.0),
                        Vec2::new(600.0, 310.0),
                    ],
                    color: arrow,
                },
            ]
        );
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_head_apex_is_collision_tip() {
        let mut state = SimulationState::new(640.0, 480.0, &mut RandomColorGenerator::new(1));
        state.arrow.pos = Vec2::new(123.0, 45.0);
        let mut surface = RecordingSurface::new();

        render(&state, &mut surface);

        let apex = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Triangle { points, .. } => Some(points[1]),
            _ => None,
        });
        assert_eq!(apex, Some(arrow_tip(&state.arrow)));
    }

    #[test]
    fn test_render_replaces_previous_frame() {
        let state = SimulationState::new(800.0, 600.0, &mut RandomColorGenerator::new(1));
        let mut surface = RecordingSurface::new();
        render(&state, &mut surface);
        render(&state, &mut surface);
        assert_eq!(surface.frames(), 2);
        assert_eq!(surface.last_frame().len(), 4);
    }
}
