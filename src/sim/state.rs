//! Game state and core simulation types
//!
//! Everything a run needs to resume deterministically lives here; the
//! event queue is the one transient field and is skipped on save.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::entity::{Entity, EntityKind};
use crate::sim::layout::RoadLayout;

/// One-shot gameplay notifications drained by the shell each frame.
///
/// Events say what happened, not how to present it; audio and UI decide
/// that on their side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected,
    FuelCollected,
    /// A life was lost but the run continues
    PlayerDamaged,
    /// The last life was lost; the run is over
    PlayerDied,
    InvincibilityStarted,
    InvincibilityEnded,
}

/// The player's car. Position is the top-left corner of its box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Lane the car is easing toward (0 = leftmost)
    pub target_lane: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            target_lane: 1, // middle lane
        }
    }
}

impl Player {
    /// Recompute sprite size and resting position for a layout, snapping
    /// the car onto its target lane.
    pub fn apply_layout(&mut self, layout: &RoadLayout) {
        let (w, h) = layout.player_size();
        self.size = Vec2::new(w, h);
        self.pos = Vec2::new(
            layout.lane_center_x(self.target_lane) - w / 2.0,
            layout.height - h - PLAYER_BOTTOM_MARGIN,
        );
    }

    /// Left edge the car is easing toward
    pub fn target_x(&self, layout: &RoadLayout) -> f32 {
        layout.lane_center_x(self.target_lane) - self.size.x / 2.0
    }
}

/// Per-kind countdowns until the next spawn attempt, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: f32,
    pub coin: f32,
    pub fuel: f32,
    pub star: f32,
    pub tree: f32,
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self::fresh()
    }
}

impl SpawnTimers {
    /// Fresh-run delays. Generous leads so the first seconds of a run
    /// stay calm while the player settles in.
    pub fn fresh() -> Self {
        Self {
            enemy: EntityKind::Enemy.initial_delay(),
            coin: EntityKind::Coin.initial_delay(),
            fuel: EntityKind::Fuel.initial_delay(),
            star: EntityKind::Star.initial_delay(),
            tree: EntityKind::Tree.initial_delay(),
        }
    }

    pub fn get(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Enemy => self.enemy,
            EntityKind::Coin => self.coin,
            EntityKind::Fuel => self.fuel,
            EntityKind::Star => self.star,
            EntityKind::Tree => self.tree,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> &mut f32 {
        match kind {
            EntityKind::Enemy => &mut self.enemy,
            EntityKind::Coin => &mut self.coin,
            EntityKind::Fuel => &mut self.fuel,
            EntityKind::Star => &mut self.star,
            EntityKind::Tree => &mut self.tree,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Road geometry for the current viewport
    pub layout: RoadLayout,
    pub player: Player,
    /// Everything on the road, oldest first
    pub entities: Vec<Entity>,
    /// Countdowns until the next spawn attempt per kind
    pub timers: SpawnTimers,

    /// Seconds survived this run
    pub time_alive: f32,
    /// Survival + bonus score; fractional so per-tick gains integrate
    /// cleanly, floored for display
    pub score_precise: f32,
    /// Coins collected this run
    pub coins_this_run: u32,
    pub lives: u8,
    /// Lives ceiling for this run, from the profile's upgrade level
    pub max_lives: u8,
    /// Seconds of star invincibility remaining
    pub invincibility_timer: f32,
    /// Seconds a fresh star grants, from the profile's upgrade level
    pub invincibility_duration: f32,
    /// Seconds until enemy contact can cost a life again
    pub hit_cooldown: f32,
    /// Downward scroll speed before render-scale compensation
    pub scroll_speed: f32,
    /// Background scroll accumulator for the renderer
    pub bg_scroll: f32,
    /// Best floored score across all runs, loaded from the profile
    pub high_score: u64,
    /// Set when this run's death beat the loaded best
    pub new_high_score: bool,
    /// Cosmetic skin index; survives resets
    pub selected_skin: u32,
    pub game_over: bool,
    pub paused: bool,

    /// Events since the last drain; cleared by the engine each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a state ready for a fresh run on an unsized viewport.
    ///
    /// The sim idles until `resize` provides real dimensions.
    pub fn new() -> Self {
        let mut state = Self {
            layout: RoadLayout::default(),
            player: Player::default(),
            entities: Vec::new(),
            timers: SpawnTimers::fresh(),
            time_alive: 0.0,
            score_precise: 0.0,
            coins_this_run: 0,
            lives: MAX_LIVES_MIN,
            max_lives: MAX_LIVES_MIN,
            invincibility_timer: 0.0,
            invincibility_duration: INVINCIBILITY_MIN,
            hit_cooldown: 0.0,
            scroll_speed: SCROLL_SPEED_START,
            bg_scroll: 0.0,
            high_score: 0,
            new_high_score: false,
            selected_skin: 0,
            game_over: false,
            paused: false,
            events: Vec::new(),
        };
        state.start_run(MAX_LIVES_MIN, INVINCIBILITY_MIN);
        state
    }

    /// Reset every per-run field for a fresh run.
    ///
    /// The layout, the selected skin and the loaded high score survive;
    /// the road is cleared and the car snaps back to the middle lane.
    pub fn start_run(&mut self, max_lives: u8, invincibility_duration: f32) {
        self.entities.clear();
        self.events.clear();
        self.timers = SpawnTimers::fresh();
        self.time_alive = 0.0;
        self.score_precise = 0.0;
        self.coins_this_run = 0;
        self.max_lives = max_lives;
        self.lives = max_lives;
        self.invincibility_timer = 0.0;
        self.invincibility_duration = invincibility_duration;
        self.hit_cooldown = 0.0;
        self.scroll_speed = SCROLL_SPEED_START;
        self.bg_scroll = 0.0;
        self.new_high_score = false;
        self.game_over = false;
        self.paused = false;
        self.player.target_lane = 1;
        self.player.apply_layout(&self.layout);
    }

    /// Apply a viewport resize. Sub-pixel chatter is filtered; a real
    /// change re-derives the road and snaps the player onto its lane.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !self.layout.resize(width, height) {
            return false;
        }
        self.player.apply_layout(&self.layout);
        true
    }

    /// Steer `dir` lanes (-1 left, +1 right), clamped to the road. Large
    /// deltas saturate instead of wrapping. Ignored once the run is over.
    pub fn try_move_lane(&mut self, dir: i32) {
        if self.game_over {
            return;
        }
        let max_lane = LANE_COUNT as i32 - 1;
        self.player.target_lane = (self.player.target_lane as i32)
            .saturating_add(dir)
            .clamp(0, max_lane) as usize;
    }

    /// Displayed score: the fractional accumulator floored to whole points
    pub fn score(&self) -> u64 {
        self.score_precise as u64
    }

    /// True while star invincibility is active
    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Live entity count for one kind
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
