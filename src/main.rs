//! Lane Rush headless demo
//!
//! Runs the sim at a fixed 60 Hz with a small autopilot steering the car,
//! then prints the run summary. Useful for profiling and for eyeballing
//! balance changes without a renderer.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lane_rush::consts::*;
use lane_rush::sim::EntityKind;
use lane_rush::{Engine, ProfileData};

const STEP: f32 = 1.0 / 60.0;
const VIEW_WIDTH: f32 = 800.0;
const VIEW_HEIGHT: f32 = 600.0;
/// Demo runs are cut off after this many simulated seconds
const MAX_RUN_SECONDS: u32 = 300;
/// The autopilot reacts to enemies within this many seconds of fall time
const LOOKAHEAD: f32 = 1.25;

fn main() {
    env_logger::init();

    let profile_path = PathBuf::from("lane-rush-profile.json");
    let profile = ProfileData::load_or_default(&profile_path);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Demo run starting with seed {seed}");

    let mut engine = Engine::new(seed, Box::new(profile));
    engine.resize(VIEW_WIDTH, VIEW_HEIGHT);

    let mut ticks = 0u32;
    while !engine.state().game_over && ticks < 60 * MAX_RUN_SECONDS {
        steer(&mut engine);
        engine.update(STEP);
        for event in engine.drain_events() {
            log::debug!("{event:?} at {:.2}s", engine.state().time_alive);
        }
        ticks += 1;
    }

    let state = engine.state();
    if state.game_over {
        println!("Run over after {:.1}s", state.time_alive);
    } else {
        println!("Run cut off at {:.1}s", state.time_alive);
    }
    println!("  score:      {}", state.score());
    println!("  coins:      {}", state.coins_this_run);
    println!("  high score: {}", state.high_score);

    let profile = ProfileData {
        max_lives: engine.profile().max_lives(),
        invincibility_duration: engine.profile().invincibility_duration(),
        high_score: engine.profile().high_score(),
    };
    if let Err(err) = profile.save(&profile_path) {
        log::warn!("Could not save profile to {}: {err}", profile_path.display());
    }
}

/// Dodge toward an open lane when an enemy is closing in on the car.
/// The left neighbor wins when both are open.
fn steer(engine: &mut Engine) {
    let state = engine.state();
    let lane = state.player.target_lane;
    let horizon = state.layout.world_speed(state.scroll_speed) * LOOKAHEAD;
    let player_top = state.player.pos.y;
    let player_bottom = player_top + state.player.size.y;

    let threatened = |l: usize| {
        state.entities.iter().any(|e| {
            e.kind == EntityKind::Enemy
                && e.lane == Some(l)
                && e.pos.y < player_bottom
                && e.bottom() > player_top - horizon
        })
    };

    if !threatened(lane) {
        return;
    }
    let dir = if lane > 0 && !threatened(lane - 1) {
        -1
    } else if lane + 1 < LANE_COUNT && !threatened(lane + 1) {
        1
    } else {
        return; // boxed in; ride it out
    };
    engine.try_move_lane(dir);
}
