//! # Game Session
//!
//! Central state for one run of the game and the per-frame tick that mutates
//! it.
//!
//! The session owns every entity, the score, the current tile grid, and the
//! terminal game-over flag. The driver calls [`GameSession::advance_tick`]
//! exactly once per frame with the polled input; everything else (rendering,
//! asset loading) reads the session without mutating it. The only I/O the
//! tick can reach is the [`LevelSource`] handed in for gate transitions.

use crate::config;
use crate::game::{
    scatter, step_player, Body, Bounds, EntityKind, Gate, GateState, HeldDirections, PatrolNpc,
    Position, SpriteFootprints,
};
use crate::map::{LevelSource, TileGrid};
use log::{info, warn};
use rand::rngs::StdRng;

/// Top-level session lifecycle. `GameOver` is terminal: no tick mutates the
/// session once it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// One observable state change produced by a tick, consumed by the display's
/// message log.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// A collectible was removed; `score` is the total after the pickup.
    CollectibleTaken { score: u32 },
    /// The score crossed the gate threshold this tick.
    GateArmed,
    /// The gate fired and the session now runs on a new level.
    LevelChanged { level: u32 },
    /// The gate fired but the destination level failed to load; the prior
    /// level is still active.
    TransitionFailed { reason: String },
    /// A hazard was touched; the session is now terminal.
    GameOver,
}

/// Lightweight progress counters, display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// Ticks advanced while playing
    pub ticks: u64,
    /// Collectibles gathered across all levels
    pub collected: u32,
    /// Level transitions completed
    pub levels_visited: u32,
}

/// The owned aggregate of one game run.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Current tile grid, swapped wholesale on level transitions
    pub grid: TileGrid,
    /// Current level number, 1-based
    pub level: u32,
    pub phase: Phase,
    pub player: Body,
    pub collectibles: Vec<Body>,
    pub hazards: Vec<Body>,
    pub gate: Gate,
    pub npcs: Vec<PatrolNpc>,
    /// NPCs patrol and render only once this is set (on entering level 2)
    pub npcs_visible: bool,
    pub score: u32,
    pub stats: SessionStats,
}

impl GameSession {
    /// Creates a session on the given grid, scattering collectibles and
    /// hazards from the seeded RNG and parking the gate at the bottom-right
    /// corner.
    pub fn new(grid: TileGrid, sprites: &SpriteFootprints, rng: &mut StdRng) -> Self {
        let pixel_width = grid.pixel_width() as f32;
        let pixel_height = grid.pixel_height() as f32;

        let collectibles = scatter(
            EntityKind::Collectible,
            config::COLLECTIBLE_COUNT,
            sprites.collectible,
            config::COLLECTIBLE_SCALE,
            pixel_width,
            pixel_height,
            rng,
        );
        let hazards = scatter(
            EntityKind::Hazard,
            config::HAZARD_COUNT,
            sprites.hazard,
            config::HAZARD_SCALE,
            pixel_width,
            pixel_height,
            rng,
        );
        let gate = Gate::bottom_right(
            pixel_width,
            pixel_height,
            config::GATE_INSET,
            sprites.gate,
            config::GATE_SCALE,
        );

        Self {
            grid,
            level: config::START_LEVEL,
            phase: Phase::Playing,
            player: Body::new(
                EntityKind::Player,
                Position::origin(),
                sprites.player,
                config::PLAYER_SCALE,
            ),
            collectibles,
            hazards,
            gate,
            npcs: spawn_patrols(sprites),
            npcs_visible: false,
            score: 0,
            stats: SessionStats::default(),
        }
    }

    /// The rectangle of legal player anchors on the current grid.
    pub fn bounds(&self) -> Bounds {
        Bounds::shrunk(
            self.grid.pixel_width() as f32,
            self.grid.pixel_height() as f32,
            config::PLAYER_MARGIN,
        )
    }

    /// Whether the session has reached its terminal state.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Advances the simulation by one frame.
    ///
    /// Tick order: movement + clamp, collectible pass, gate arming, gate
    /// contact, hazard pass, NPC patrol. A game-over session returns
    /// immediately with no events and no mutation.
    pub fn advance_tick(
        &mut self,
        held: &HeldDirections,
        levels: &mut dyn LevelSource,
    ) -> Vec<TickEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        self.stats.ticks += 1;

        self.player.position = step_player(
            held,
            self.player.position,
            self.bounds(),
            config::PLAYER_STEP,
        );

        self.collect_pass(&mut events);
        self.arm_gate(&mut events);
        self.gate_pass(levels, &mut events);
        self.hazard_pass(&mut events);
        self.advance_npcs();

        events
    }

    /// Single pass over the live collectibles: overlapping ones are dropped
    /// and scored, the rest are kept in a freshly built vector.
    fn collect_pass(&mut self, events: &mut Vec<TickEvent>) {
        let player_box = self.player.hitbox();
        let mut retained = Vec::with_capacity(self.collectibles.len());
        for item in std::mem::take(&mut self.collectibles) {
            if player_box.overlaps(&item.hitbox()) {
                self.score += 1;
                self.stats.collected += 1;
                events.push(TickEvent::CollectibleTaken { score: self.score });
            } else {
                retained.push(item);
            }
        }
        self.collectibles = retained;
    }

    /// Arms the gate the same tick the score reaches the threshold. Only a
    /// hidden gate can arm, so a spent gate stays spent.
    fn arm_gate(&mut self, events: &mut Vec<TickEvent>) {
        if self.gate.state == GateState::Hidden && self.score >= config::GATE_SCORE_THRESHOLD {
            self.gate.state = GateState::Armed;
            info!("Gate armed at score {}", self.score);
            events.push(TickEvent::GateArmed);
        }
    }

    /// Fires the level transition when the player touches the armed gate.
    ///
    /// The swap is atomic from the tick's point of view: the destination grid
    /// is loaded first, and only on success are the grid pointer, player
    /// position, gate state, and NPC visibility updated together. On failure
    /// the prior level stays fully active and the gate stays armed.
    fn gate_pass(&mut self, levels: &mut dyn LevelSource, events: &mut Vec<TickEvent>) {
        if !self.gate.is_armed() {
            return;
        }
        if !self.player.hitbox().overlaps(&self.gate.body.hitbox()) {
            return;
        }

        let next = self.level + 1;
        match levels.load_level(next) {
            Ok(grid) => {
                self.grid = grid;
                self.level = next;
                self.player.position = Position::origin();
                self.gate.state = GateState::Spent;
                self.npcs_visible = next >= config::NPC_LEVEL;
                self.stats.levels_visited += 1;
                info!("Entered level {}", next);
                events.push(TickEvent::LevelChanged { level: next });
            }
            Err(err) => {
                warn!(
                    "Level {} failed to load, staying on level {}: {}",
                    next, self.level, err
                );
                events.push(TickEvent::TransitionFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    /// First hazard overlap ends the game; remaining hazards are not checked.
    fn hazard_pass(&mut self, events: &mut Vec<TickEvent>) {
        let player_box = self.player.hitbox();
        if self
            .hazards
            .iter()
            .any(|hazard| player_box.overlaps(&hazard.hitbox()))
        {
            self.phase = Phase::GameOver;
            info!(
                "Game over after {} ticks with score {}",
                self.stats.ticks, self.score
            );
            events.push(TickEvent::GameOver);
        }
    }

    fn advance_npcs(&mut self) {
        if !self.npcs_visible {
            return;
        }
        for npc in &mut self.npcs {
            npc.advance();
        }
    }
}

/// The fixed patrol roster: a slow walker in the mid-map and a drifter
/// further out. Both stay dormant until the session reaches level 2.
fn spawn_patrols(sprites: &SpriteFootprints) -> Vec<PatrolNpc> {
    vec![
        PatrolNpc::new(
            Body::new(
                EntityKind::Npc,
                Position::new(400.0, 400.0),
                sprites.npc_walker,
                config::NPC_WALKER_SCALE,
            ),
            350.0,
            700.0,
            1,
            1.5,
        ),
        PatrolNpc::new(
            Body::new(
                EntityKind::Npc,
                Position::new(800.0, 600.0),
                sprites.npc_drifter,
                config::NPC_DRIFTER_SCALE,
            ),
            750.0,
            1000.0,
            -1,
            1.2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Footprint;
    use crate::{ForageError, ForageResult};
    use rand::SeedableRng;

    struct StaticLevels {
        grid: TileGrid,
    }

    impl LevelSource for StaticLevels {
        fn load_level(&mut self, _level: u32) -> ForageResult<TileGrid> {
            Ok(self.grid.clone())
        }
    }

    struct BrokenLevels;

    impl LevelSource for BrokenLevels {
        fn load_level(&mut self, level: u32) -> ForageResult<TileGrid> {
            Err(ForageError::AssetMissing(format!("level{}.json", level)))
        }
    }

    fn footprints() -> SpriteFootprints {
        SpriteFootprints {
            player: Footprint::new(600.0, 600.0),
            collectible: Footprint::new(400.0, 400.0),
            hazard: Footprint::new(400.0, 400.0),
            gate: Footprint::new(200.0, 200.0),
            npc_walker: Footprint::new(100.0, 100.0),
            npc_drifter: Footprint::new(100.0, 100.0),
        }
    }

    fn session() -> GameSession {
        let grid = TileGrid::blank(40, 40, 32);
        let mut rng = StdRng::seed_from_u64(12345);
        GameSession::new(grid, &footprints(), &mut rng)
    }

    fn levels() -> StaticLevels {
        StaticLevels {
            grid: TileGrid::blank(40, 40, 32),
        }
    }

    #[test]
    fn test_new_session_population() {
        let session = session();
        assert_eq!(session.level, config::START_LEVEL);
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.collectibles.len(), config::COLLECTIBLE_COUNT);
        assert_eq!(session.hazards.len(), config::HAZARD_COUNT);
        assert_eq!(session.npcs.len(), 2);
        assert!(!session.npcs_visible);
        assert_eq!(session.gate.state, GateState::Hidden);
    }

    #[test]
    fn test_collect_scores_and_removes() {
        let mut session = session();
        session.hazards.clear();
        session.collectibles.clear();
        session.collectibles.push(Body::new(
            EntityKind::Collectible,
            Position::new(10.0, 10.0),
            footprints().collectible,
            config::COLLECTIBLE_SCALE,
        ));

        let events = session.advance_tick(&HeldDirections::none(), &mut levels());

        assert_eq!(session.score, 1);
        assert!(session.collectibles.is_empty());
        assert!(events.contains(&TickEvent::CollectibleTaken { score: 1 }));
    }

    #[test]
    fn test_gate_arms_same_tick_threshold_is_reached() {
        let mut session = session();
        session.hazards.clear();
        session.collectibles.clear();
        session.score = config::GATE_SCORE_THRESHOLD - 1;
        session.collectibles.push(Body::new(
            EntityKind::Collectible,
            Position::new(5.0, 5.0),
            footprints().collectible,
            config::COLLECTIBLE_SCALE,
        ));

        let events = session.advance_tick(&HeldDirections::none(), &mut levels());

        assert_eq!(session.score, config::GATE_SCORE_THRESHOLD);
        assert_eq!(session.gate.state, GateState::Armed);
        assert!(events.contains(&TickEvent::GateArmed));
    }

    #[test]
    fn test_gate_transition_fires_once() {
        let mut session = session();
        session.hazards.clear();
        session.collectibles.clear();
        session.score = config::GATE_SCORE_THRESHOLD;
        session.gate.state = GateState::Armed;
        session.player.position = session.gate.body.position;

        let events = session.advance_tick(&HeldDirections::none(), &mut levels());

        assert!(events.contains(&TickEvent::LevelChanged { level: 2 }));
        assert_eq!(session.level, 2);
        assert_eq!(session.player.position, Position::origin());
        assert_eq!(session.gate.state, GateState::Spent);
        assert!(session.npcs_visible);

        // Walk back onto the gate: spent gates never re-fire, even with the
        // score still above the threshold.
        session.player.position = session.gate.body.position;
        let events = session.advance_tick(&HeldDirections::none(), &mut levels());
        assert!(!events
            .iter()
            .any(|e| matches!(e, TickEvent::LevelChanged { .. })));
        assert_eq!(session.level, 2);
    }

    #[test]
    fn test_failed_transition_keeps_prior_level() {
        let mut session = session();
        session.hazards.clear();
        session.collectibles.clear();
        session.score = config::GATE_SCORE_THRESHOLD;
        session.gate.state = GateState::Armed;
        session.player.position = session.gate.body.position;
        let position_before = session.player.position;

        let events = session.advance_tick(&HeldDirections::none(), &mut BrokenLevels);

        assert!(events
            .iter()
            .any(|e| matches!(e, TickEvent::TransitionFailed { .. })));
        assert_eq!(session.level, config::START_LEVEL);
        assert_eq!(session.player.position, position_before);
        assert_eq!(session.gate.state, GateState::Armed);
        assert!(!session.npcs_visible);
        assert_eq!(session.phase, Phase::Playing);
    }

    #[test]
    fn test_hazard_contact_is_terminal() {
        let mut session = session();
        session.collectibles.clear();
        session.hazards.clear();
        session.hazards.push(Body::new(
            EntityKind::Hazard,
            session.player.position,
            footprints().hazard,
            config::HAZARD_SCALE,
        ));

        let events = session.advance_tick(&HeldDirections::none(), &mut levels());
        assert!(events.contains(&TickEvent::GameOver));
        assert_eq!(session.phase, Phase::GameOver);

        // Further ticks are no-ops even with movement held.
        let frozen = session.clone();
        let held = HeldDirections {
            right: true,
            down: true,
            ..Default::default()
        };
        let events = session.advance_tick(&held, &mut levels());
        assert!(events.is_empty());
        assert_eq!(session.player.position, frozen.player.position);
        assert_eq!(session.stats, frozen.stats);
    }

    #[test]
    fn test_npcs_only_patrol_after_transition() {
        let mut session = session();
        session.hazards.clear();
        session.collectibles.clear();

        let start_x = session.npcs[0].body.position.x;
        session.advance_tick(&HeldDirections::none(), &mut levels());
        assert_eq!(session.npcs[0].body.position.x, start_x);

        session.npcs_visible = true;
        session.advance_tick(&HeldDirections::none(), &mut levels());
        assert!(session.npcs[0].body.position.x != start_x);
    }
}
