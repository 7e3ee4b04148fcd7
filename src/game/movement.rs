//! # Movement Integration
//!
//! Fixed-step, input-driven player movement with per-axis clamping.

use crate::game::{Bounds, Position};

/// The four independent "direction held" flags, polled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    /// No direction held.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Advances the player anchor by `step` per held direction and clamps each
/// axis into `bounds`.
///
/// Both axes apply independently, so holding two directions moves the player
/// diagonally at `step * sqrt(2)` pixels per tick. That asymmetry is the
/// game's long-standing behavior and is kept as-is.
///
/// # Examples
///
/// ```
/// use forage::game::{step_player, Bounds, HeldDirections, Position};
///
/// let held = HeldDirections { right: true, down: true, ..Default::default() };
/// let pos = step_player(&held, Position::origin(), Bounds::new(100.0, 100.0), 5.0);
/// assert_eq!(pos, Position::new(5.0, 5.0));
/// ```
pub fn step_player(held: &HeldDirections, position: Position, bounds: Bounds, step: f32) -> Position {
    let mut next = position;
    if held.left {
        next.x -= step;
    }
    if held.right {
        next.x += step;
    }
    if held.up {
        next.y -= step;
    }
    if held.down {
        next.y += step;
    }
    next.clamped(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 5.0;

    fn bounds() -> Bounds {
        Bounds::new(1250.0, 1250.0)
    }

    #[test]
    fn test_single_axis_step() {
        let held = HeldDirections {
            right: true,
            ..Default::default()
        };
        let pos = step_player(&held, Position::new(100.0, 100.0), bounds(), STEP);
        assert_eq!(pos, Position::new(105.0, 100.0));
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let held = HeldDirections {
            left: true,
            right: true,
            ..Default::default()
        };
        let pos = step_player(&held, Position::new(100.0, 100.0), bounds(), STEP);
        assert_eq!(pos, Position::new(100.0, 100.0));
    }

    #[test]
    fn test_diagonal_applies_both_axes() {
        let held = HeldDirections {
            left: true,
            up: true,
            ..Default::default()
        };
        let pos = step_player(&held, Position::new(100.0, 100.0), bounds(), STEP);
        assert_eq!(pos, Position::new(95.0, 95.0));
    }

    #[test]
    fn test_clamped_at_origin() {
        let held = HeldDirections {
            left: true,
            up: true,
            ..Default::default()
        };
        let pos = step_player(&held, Position::new(2.0, 0.0), bounds(), STEP);
        assert_eq!(pos, Position::origin());
    }

    #[test]
    fn test_clamped_at_far_edge() {
        let held = HeldDirections {
            right: true,
            down: true,
            ..Default::default()
        };
        let pos = step_player(&held, Position::new(1249.0, 1247.0), bounds(), STEP);
        assert_eq!(pos, Position::new(1250.0, 1250.0));
    }

    #[test]
    fn test_no_input_no_motion() {
        let pos = step_player(
            &HeldDirections::none(),
            Position::new(42.0, 17.0),
            bounds(),
            STEP,
        );
        assert_eq!(pos, Position::new(42.0, 17.0));
    }
}
