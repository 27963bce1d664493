//! Arrow/disc collision detection
//!
//! Only the arrow's tip is tested, against the disc's circular region.
//! The tip geometry is shared with the renderer so the drawn head and
//! the collision point never disagree.

use glam::Vec2;

use super::state::{Arrow, SimulationState};

/// Leading point of the arrow head (apex of the triangle)
#[inline]
pub fn arrow_tip(arrow: &Arrow) -> Vec2 {
    Vec2::new(arrow.pos.x - arrow.shaft_length - arrow.head_size, arrow.pos.y)
}

/// True if the point lies inside or exactly on the circle
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance(center) <= radius
}

/// Whether the arrow's tip has entered the disc (boundary inclusive)
pub fn has_collided(state: &SimulationState) -> bool {
    point_in_circle(arrow_tip(&state.arrow), state.disc.pos, state.disc.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RandomColorGenerator;
    use proptest::prelude::*;

    fn scene() -> SimulationState {
        SimulationState::new(800.0, 600.0, &mut RandomColorGenerator::new(5))
    }

    /// Place the arrow so its tip sits at `tip`
    fn place_tip(state: &mut SimulationState, tip: Vec2) {
        let a = &mut state.arrow;
        a.pos = Vec2::new(tip.x + a.shaft_length + a.head_size, tip.y);
    }

    #[test]
    fn test_tip_position() {
        let state = scene();
        assert_eq!(arrow_tip(&state.arrow), Vec2::new(660.0 - 74.0, 300.0));
    }

    #[test]
    fn test_boundary_inclusive() {
        let mut state = scene();
        // Disc center (110, 300), radius 36
        place_tip(&mut state, Vec2::new(146.0, 300.0));
        assert!(has_collided(&state));

        place_tip(&mut state, Vec2::new(145.5, 300.0));
        assert!(has_collided(&state));

        place_tip(&mut state, Vec2::new(146.5, 300.0));
        assert!(!has_collided(&state));
    }

    #[test]
    fn test_vertical_offset_misses() {
        let mut state = scene();
        state.reposition_disc_vertically(36.0);
        place_tip(&mut state, Vec2::new(110.0, 300.0));
        assert!(!has_collided(&state));
    }

    #[test]
    fn test_shaft_overlap_is_not_a_hit() {
        let mut state = scene();
        // Tip already past the disc on the left; only the shaft overlaps it
        place_tip(&mut state, Vec2::new(40.0, 300.0));
        assert!(!has_collided(&state));
    }

    proptest! {
        #[test]
        fn prop_hit_iff_within_radius(
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.0f32..100.0,
        ) {
            let mut state = scene();
            let tip = state.disc.pos + Vec2::from_angle(angle) * dist;
            place_tip(&mut state, tip);
            let expected = arrow_tip(&state.arrow).distance(state.disc.pos) <= state.disc.radius;
            prop_assert_eq!(has_collided(&state), expected);
        }
    }
}
