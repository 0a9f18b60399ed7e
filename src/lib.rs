//! Lane Rush - a three-lane arcade runner
//!
//! This crate is the game's simulation core: the deterministic per-tick
//! update, the spawn planner, and the collision/game-over state machine.
//! Rendering, audio, platform input and storage are external collaborators
//! that read the engine's state and react to its events.
//!
//! Core modules:
//! - `sim`: deterministic simulation (road layout, entities, spawning,
//!   collisions, per-tick update)
//! - `engine`: facade owning the state; the only mutation path collaborators
//!   get
//! - `profile`: persisted-value seam (upgrade levels, high score)

pub mod engine;
pub mod profile;
pub mod sim;

pub use engine::Engine;
pub use profile::{Profile, ProfileData};
pub use sim::{Entity, EntityKind, GameEvent, GameState};

/// Game tuning constants
pub mod consts {
    /// Number of road lanes (player and lane-bound entities use indices 0..3)
    pub const LANE_COUNT: usize = 3;

    /// Shoulder width as a fraction of viewport width
    pub const SHOULDER_RATIO: f32 = 0.18;
    /// Shoulder width floor in layout units
    pub const SHOULDER_MIN: f32 = 40.0;
    /// Shoulder width ceiling as a fraction of viewport width
    pub const SHOULDER_MAX_RATIO: f32 = 0.28;
    /// Resize calls moving both dimensions less than this are ignored
    pub const RESIZE_EPSILON: f32 = 0.5;

    /// Player car width as a fraction of lane width
    pub const PLAYER_WIDTH_LANE_RATIO: f32 = 0.24;
    /// Player car width ceiling as a fraction of viewport height
    pub const PLAYER_WIDTH_HEIGHT_RATIO: f32 = 0.11;
    /// Car sprites are taller than wide by this factor
    pub const CAR_ASPECT: f32 = 1.6;
    /// Gap between the player car and the bottom edge of the viewport
    pub const PLAYER_BOTTOM_MARGIN: f32 = 40.0;
    /// Single-pole smoothing rate for lane changes (per second)
    pub const LANE_FOLLOW_RATE: f32 = 18.0;

    /// Survival score per second
    pub const POINTS_PER_SECOND: f32 = 5.0;
    /// Score for picking up a coin
    pub const COIN_SCORE: f32 = 10.0;
    /// Score for plowing through an enemy while invincible
    pub const PLOW_THROUGH_SCORE: f32 = 5.0;
    /// Scroll speed at the start of a run
    pub const SCROLL_SPEED_START: f32 = 100.0;
    /// Continuous difficulty ramp (scroll speed gained per second)
    pub const SCROLL_SPEED_RAMP: f32 = 6.5;
    /// Render scale is clamped into this range before dividing scroll speed
    pub const RENDER_SCALE_MIN: f32 = 0.1;
    pub const RENDER_SCALE_MAX: f32 = 2.0;

    /// Grace period after taking damage (shared across all enemies)
    pub const HIT_COOLDOWN: f32 = 0.5;
    /// Star pickups grant at least this much invincibility
    pub const STAR_DURATION_FLOOR: f32 = 0.1;
    /// Valid range for the persisted max-lives upgrade
    pub const MAX_LIVES_MIN: u8 = 3;
    pub const MAX_LIVES_MAX: u8 = 6;
    /// Valid range for the persisted invincibility-duration upgrade (seconds)
    pub const INVINCIBILITY_MIN: f32 = 6.0;
    pub const INVINCIBILITY_MAX: f32 = 12.0;

    /// Entities spawn this far above their own height off the top edge
    pub const SPAWN_Y_MARGIN: f32 = 10.0;
    /// Entities despawn once this far below the bottom edge
    pub const DESPAWN_MARGIN: f32 = 250.0;
    /// Lanes holding an enemy above this depth reject further enemy spawns
    pub const ENEMY_MIN_GAP_FROM_TOP: f32 = 250.0;
    /// Retry delay range after a failed spawn attempt (seconds)
    pub const SPAWN_RETRY_MIN: f32 = 0.25;
    pub const SPAWN_RETRY_MAX: f32 = 1.0;
    /// Minimum free shoulder band left over after placing a tree
    pub const TREE_SHOULDER_SLACK: f32 = 8.0;

    /// Base entity width as a fraction of lane width
    pub const ENTITY_WIDTH_LANE_RATIO: f32 = 0.52;
    /// Base entity width ceiling as a fraction of viewport height
    pub const ENTITY_WIDTH_HEIGHT_RATIO: f32 = 0.20;
}

/// Linear interpolation from `a` toward `b` by `t` in [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::lerp;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    }
}
