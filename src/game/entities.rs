//! # Entity Records
//!
//! Passive data for everything that occupies the map: the player, the food
//! items, the hazards, the gate, and the patrol NPCs' bodies.
//!
//! All kinds share one boxed representation — anchor position, nominal sprite
//! footprint, scale factor — so hitbox derivation lives in exactly one place.
//! Behavior differences (collect vs. kill vs. transition) are resolved by the
//! session at collision time, keyed on [`EntityKind`].

use crate::game::{Hitbox, Position};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// Nominal sprite size in source-image pixels, before scaling.
///
/// Captured from the loaded texture at startup; the simulation never looks at
/// pixel data, only at these dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    /// Creates a footprint with the given nominal dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Tag distinguishing how the session reacts when the player touches a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Collectible,
    Hazard,
    Gate,
    Npc,
}

/// A positioned, collidable body: anchor + footprint + scale.
///
/// # Examples
///
/// ```
/// use forage::game::{Body, EntityKind, Footprint, Position};
///
/// let body = Body::new(
///     EntityKind::Collectible,
///     Position::new(40.0, 60.0),
///     Footprint::new(500.0, 500.0),
///     0.01,
/// );
/// assert_eq!(body.hitbox().width, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub kind: EntityKind,
    pub position: Position,
    pub footprint: Footprint,
    pub scale: f32,
}

impl Body {
    /// Creates a body of the given kind.
    pub fn new(kind: EntityKind, position: Position, footprint: Footprint, scale: f32) -> Self {
        Self {
            kind,
            position,
            footprint,
            scale,
        }
    }

    /// The axis-aligned rectangle used for collision testing.
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::from_anchor(self.position, self.footprint, self.scale)
    }
}

/// Nominal footprints for every sprite the session spawns, measured by the
/// asset layer from the loaded textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFootprints {
    pub player: Footprint,
    pub collectible: Footprint,
    pub hazard: Footprint,
    pub gate: Footprint,
    pub npc_walker: Footprint,
    pub npc_drifter: Footprint,
}

/// Gate trigger lifecycle.
///
/// Hidden until the score threshold is reached, armed until touched, then
/// spent. Spent is terminal for the arming cycle: continued overlap (or the
/// score remaining above the threshold) cannot re-trigger the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    Hidden,
    Armed,
    Spent,
}

/// The level-transition trigger region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub body: Body,
    pub state: GateState,
}

impl Gate {
    /// Places the gate near the bottom-right corner of a map of the given
    /// pixel extent, inset by `inset` on both axes.
    pub fn bottom_right(
        pixel_width: f32,
        pixel_height: f32,
        inset: f32,
        footprint: Footprint,
        scale: f32,
    ) -> Self {
        let anchor = Position::new(
            (pixel_width - inset).max(0.0),
            (pixel_height - inset).max(0.0),
        );
        Self {
            body: Body::new(EntityKind::Gate, anchor, footprint, scale),
            state: GateState::Hidden,
        }
    }

    /// Whether the gate can currently fire a transition.
    pub fn is_armed(&self) -> bool {
        self.state == GateState::Armed
    }
}

/// Scatters `count` bodies of one kind uniformly across the map's pixel
/// extent.
pub fn scatter(
    kind: EntityKind,
    count: usize,
    footprint: Footprint,
    scale: f32,
    pixel_width: f32,
    pixel_height: f32,
    rng: &mut StdRng,
) -> Vec<Body> {
    (0..count)
        .map(|_| {
            let position = Position::new(
                rng.gen_range(0.0..pixel_width),
                rng.gen_range(0.0..pixel_height),
            );
            Body::new(kind, position, footprint, scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_body_hitbox_uses_kind_scale() {
        let footprint = Footprint::new(600.0, 400.0);
        let player = Body::new(EntityKind::Player, Position::origin(), footprint, 0.05);
        let item = Body::new(EntityKind::Collectible, Position::origin(), footprint, 0.01);

        assert_eq!(player.hitbox().width, 30.0);
        assert_eq!(item.hitbox().width, 6.0);
    }

    #[test]
    fn test_scatter_stays_within_map_extent() {
        let mut rng = StdRng::seed_from_u64(7);
        let bodies = scatter(
            EntityKind::Collectible,
            50,
            Footprint::new(500.0, 500.0),
            0.01,
            1280.0,
            960.0,
            &mut rng,
        );

        assert_eq!(bodies.len(), 50);
        for body in &bodies {
            assert!(body.position.x >= 0.0 && body.position.x < 1280.0);
            assert!(body.position.y >= 0.0 && body.position.y < 960.0);
        }
    }

    #[test]
    fn test_scatter_is_seed_deterministic() {
        let footprint = Footprint::new(500.0, 500.0);
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        let a = scatter(EntityKind::Hazard, 5, footprint, 0.01, 640.0, 640.0, &mut rng_a);
        let b = scatter(EntityKind::Hazard, 5, footprint, 0.01, 640.0, 640.0, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_gate_bottom_right_placement() {
        let gate = Gate::bottom_right(1280.0, 1280.0, 60.0, Footprint::new(200.0, 200.0), 0.1);
        assert_eq!(gate.body.position, Position::new(1220.0, 1220.0));
        assert_eq!(gate.state, GateState::Hidden);
        assert!(!gate.is_armed());
    }
}
