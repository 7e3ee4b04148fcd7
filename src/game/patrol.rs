//! # Patrol Behavior
//!
//! Decorative NPCs that walk back and forth along one axis between fixed
//! bounds. They never collide with the player.

use crate::game::Body;
use serde::{Deserialize, Serialize};

/// An NPC oscillating horizontally between `min_x` and `max_x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolNpc {
    pub body: Body,
    /// Left edge of the patrol interval
    pub min_x: f32,
    /// Right edge of the patrol interval
    pub max_x: f32,
    /// Direction sign, +1 (right) or -1 (left)
    pub direction: i8,
    /// Pixels moved per tick
    pub speed: f32,
    /// Ticks advanced since spawn. Informational only; motion does not read
    /// it. Kept for animation timing later.
    pub ticks: u64,
}

impl PatrolNpc {
    /// Creates a patrol NPC. The starting position comes from `body`.
    pub fn new(body: Body, min_x: f32, max_x: f32, direction: i8, speed: f32) -> Self {
        Self {
            body,
            min_x,
            max_x,
            direction,
            speed,
            ticks: 0,
        }
    }

    /// Advances the NPC by one tick.
    ///
    /// Moves `speed * direction` along x, then reverses direction for the
    /// next tick once the new position lands on or beyond either bound. The
    /// position itself is not pulled back inside the interval, so an NPC may
    /// sit up to one step outside it while turning around.
    pub fn advance(&mut self) {
        self.ticks += 1;
        if self.min_x == self.max_x {
            return;
        }
        self.body.position.x += self.speed * f32::from(self.direction);
        if self.body.position.x <= self.min_x || self.body.position.x >= self.max_x {
            self.direction = -self.direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EntityKind, Footprint, Position};

    fn walker(x: f32, min_x: f32, max_x: f32, direction: i8, speed: f32) -> PatrolNpc {
        let body = Body::new(
            EntityKind::Npc,
            Position::new(x, 400.0),
            Footprint::new(100.0, 100.0),
            0.4,
        );
        PatrolNpc::new(body, min_x, max_x, direction, speed)
    }

    #[test]
    fn test_moves_along_patrol_axis_only() {
        let mut npc = walker(400.0, 350.0, 700.0, 1, 1.5);
        npc.advance();
        assert_eq!(npc.body.position.x, 401.5);
        assert_eq!(npc.body.position.y, 400.0);
    }

    #[test]
    fn test_direction_flips_on_reaching_far_bound() {
        let mut npc = walker(400.0, 350.0, 700.0, 1, 1.5);
        // (700 - 400) / 1.5 = 200 ticks to reach the far bound exactly
        for _ in 0..199 {
            npc.advance();
        }
        assert_eq!(npc.direction, 1);
        npc.advance();
        assert_eq!(npc.body.position.x, 700.0);
        assert_eq!(npc.direction, -1);
    }

    #[test]
    fn test_overshoot_is_not_clamped() {
        let mut npc = walker(698.0, 350.0, 700.0, 1, 5.0);
        npc.advance();
        assert_eq!(npc.body.position.x, 703.0);
        assert_eq!(npc.direction, -1);
        npc.advance();
        assert_eq!(npc.body.position.x, 698.0);
        assert_eq!(npc.direction, -1);
    }

    #[test]
    fn test_tick_counter_always_advances() {
        let mut npc = walker(500.0, 500.0, 500.0, 1, 2.0);
        npc.advance();
        npc.advance();
        assert_eq!(npc.ticks, 2);
        // Degenerate interval keeps the NPC stationary
        assert_eq!(npc.body.position.x, 500.0);
    }

    #[test]
    fn test_oscillates_back_toward_near_bound() {
        let mut npc = walker(352.0, 350.0, 360.0, -1, 2.0);
        npc.advance();
        assert_eq!(npc.body.position.x, 350.0);
        assert_eq!(npc.direction, 1);
        npc.advance();
        assert_eq!(npc.body.position.x, 352.0);
        assert_eq!(npc.direction, 1);
    }
}
