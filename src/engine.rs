//! Engine facade
//!
//! Owns the game state, the seeded RNG and the player profile, and is the
//! only mutation path the shell gets. Collaborators read `state()` for
//! drawing and drain the event queue once per frame for audio/UI cues.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::profile::Profile;
use crate::sim::{self, GameEvent, GameState};

pub struct Engine {
    state: GameState,
    rng: Pcg32,
    profile: Box<dyn Profile>,
}

impl Engine {
    /// Build an engine and start the first run.
    ///
    /// The same seed and the same call sequence reproduce a run exactly;
    /// resets continue the RNG stream so consecutive runs differ.
    pub fn new(seed: u64, profile: Box<dyn Profile>) -> Self {
        let mut engine = Self {
            state: GameState::new(),
            rng: Pcg32::seed_from_u64(seed),
            profile,
        };
        engine.reset();
        engine
    }

    /// Start a fresh run from the profile's current upgrades.
    pub fn reset(&mut self) {
        let (max_lives, invincibility) = self.sanitized_upgrades();
        self.state.start_run(max_lives, invincibility);
        self.state.high_score = self.profile.high_score();
    }

    /// Profile values pass through here so a hand-edited or stale save
    /// cannot push the sim outside its tuning ranges.
    fn sanitized_upgrades(&self) -> (u8, f32) {
        let mut max_lives = self.profile.max_lives();
        if !(MAX_LIVES_MIN..=MAX_LIVES_MAX).contains(&max_lives) {
            log::warn!(
                "Profile max lives {max_lives} outside {MAX_LIVES_MIN}..={MAX_LIVES_MAX}, clamping"
            );
            max_lives = max_lives.clamp(MAX_LIVES_MIN, MAX_LIVES_MAX);
        }

        let mut duration = self.profile.invincibility_duration();
        if !duration.is_finite() {
            log::warn!("Profile invincibility duration is not finite, using minimum");
            duration = INVINCIBILITY_MIN;
        } else if !(INVINCIBILITY_MIN..=INVINCIBILITY_MAX).contains(&duration) {
            log::warn!(
                "Profile invincibility {duration}s outside {INVINCIBILITY_MIN}..={INVINCIBILITY_MAX}, clamping"
            );
            duration = duration.clamp(INVINCIBILITY_MIN, INVINCIBILITY_MAX);
        }

        (max_lives, duration)
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let was_over = self.state.game_over;
        sim::advance(&mut self.state, &mut self.rng, dt);
        if !was_over && self.state.game_over {
            self.finish_run();
        }
    }

    /// Run bookkeeping for the frame the run ended on.
    fn finish_run(&mut self) {
        let score = self.state.score();
        if score > self.profile.high_score() {
            self.profile.set_high_score(score);
            log::info!("New high score: {score}");
        }
        log::info!(
            "Run over: {:.1}s survived, {} points, {} coins",
            self.state.time_alive,
            score,
            self.state.coins_this_run
        );
    }

    /// Apply a viewport size in layout units.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Steer one lane left (-1) or right (+1).
    pub fn try_move_lane(&mut self, dir: i32) {
        self.state.try_move_lane(dir);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state.paused = paused;
    }

    /// Record the renderer's zoom so scroll speed can compensate for it.
    /// Stored raw; the sim clamps at the point of use.
    pub fn set_render_scale(&mut self, scale: f32) {
        self.state.layout.render_scale = scale;
    }

    pub fn select_skin(&mut self, skin: u32) {
        self.state.selected_skin = skin;
    }

    /// Read-only view of the live state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn profile(&self) -> &dyn Profile {
        self.profile.as_ref()
    }

    /// Take this frame's events, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }
}
