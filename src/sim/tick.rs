//! Per-frame simulation step
//!
//! `advance` moves the whole run forward by one variable timestep. Step
//! order is load-bearing: scroll is ramped after the frame's world speed
//! is taken, and entities fall by that same pre-ramp speed, so one tick
//! never sees two different speeds.

use rand::Rng;

use crate::consts::*;
use crate::lerp;
use crate::sim::collision;
use crate::sim::spawn;
use crate::sim::state::{GameEvent, GameState};

/// Advance the simulation by `dt` seconds.
///
/// No-op while the viewport is unsized, the run is over, the game is
/// paused, or `dt` is not a positive duration.
pub fn advance(state: &mut GameState, rng: &mut impl Rng, dt: f32) {
    if dt <= 0.0 || !state.layout.is_sized() || state.game_over || state.paused {
        return;
    }

    // Survival time and score
    state.time_alive += dt;
    state.score_precise += POINTS_PER_SECOND * dt;

    // This frame's world speed, taken before the ramp below
    let world_speed = state.layout.world_speed(state.scroll_speed);
    state.bg_scroll += world_speed * dt;
    state.scroll_speed += SCROLL_SPEED_RAMP * dt;

    // Star invincibility countdown
    if state.invincibility_timer > 0.0 {
        state.invincibility_timer -= dt;
        if state.invincibility_timer <= 0.0 {
            state.invincibility_timer = 0.0;
            state.events.push(GameEvent::InvincibilityEnded);
        }
    }

    state.hit_cooldown = (state.hit_cooldown - dt).max(0.0);

    // Ease the car toward its target lane
    let target_x = state.player.target_x(&state.layout);
    let t = (LANE_FOLLOW_RATE * dt).clamp(0.0, 1.0);
    state.player.pos.x = lerp(state.player.pos.x, target_x, t);

    spawn::run(state, rng, dt);

    // Scroll the road and drop what fell past the view
    let despawn_below = state.layout.height + DESPAWN_MARGIN;
    for entity in &mut state.entities {
        entity.pos.y += world_speed * dt;
    }
    state.entities.retain(|e| e.pos.y <= despawn_below);

    collision::resolve(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Entity, EntityKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn sized_state() -> GameState {
        let mut state = GameState::new();
        state.resize(800.0, 600.0);
        state
    }

    #[test]
    fn test_non_positive_dt_is_a_no_op() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        let before = state.clone();
        advance(&mut state, &mut rng, 0.0);
        advance(&mut state, &mut rng, -0.5);
        assert_eq!(state.time_alive, before.time_alive);
        assert_eq!(state.scroll_speed, before.scroll_speed);
    }

    #[test]
    fn test_unsized_viewport_idles() {
        let mut state = GameState::new();
        let mut rng = seeded_rng();
        advance(&mut state, &mut rng, 1.0);
        assert_eq!(state.time_alive, 0.0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_pause_and_game_over_freeze_the_world() {
        let mut rng = seeded_rng();

        let mut paused = sized_state();
        paused.paused = true;
        paused.entities.push(Entity::tree(10.0, 40.0));
        let tree_y = paused.entities[0].pos.y;
        advance(&mut paused, &mut rng, 1.0);
        assert_eq!(paused.time_alive, 0.0);
        assert_eq!(paused.entities[0].pos.y, tree_y);

        let mut over = sized_state();
        over.game_over = true;
        advance(&mut over, &mut rng, 1.0);
        assert_eq!(over.time_alive, 0.0);
        assert_eq!(over.scroll_speed, SCROLL_SPEED_START);
    }

    #[test]
    fn test_time_score_and_ramp_accumulate() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        advance(&mut state, &mut rng, 1.0);
        assert!((state.time_alive - 1.0).abs() < 1e-6);
        assert!((state.score_precise - POINTS_PER_SECOND).abs() < 1e-4);
        assert!((state.scroll_speed - 106.5).abs() < 1e-4);
    }

    #[test]
    fn test_bg_scroll_uses_pre_ramp_speed() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        advance(&mut state, &mut rng, 1.0);
        assert!((state.bg_scroll - 100.0).abs() < 1e-4);
        advance(&mut state, &mut rng, 1.0);
        // Second frame scrolls at the once-ramped speed
        assert!((state.bg_scroll - 206.5).abs() < 1e-3);
    }

    #[test]
    fn test_render_scale_compensates_world_speed() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        state.layout.render_scale = 2.0;
        advance(&mut state, &mut rng, 1.0);
        // Half the perceived speed, but the ramp is untouched
        assert!((state.bg_scroll - 50.0).abs() < 1e-4);
        assert!((state.scroll_speed - 106.5).abs() < 1e-4);
    }

    #[test]
    fn test_invincibility_ends_exactly_once() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        state.invincibility_timer = 0.5;
        advance(&mut state, &mut rng, 1.0);
        assert_eq!(state.invincibility_timer, 0.0);
        let ends = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::InvincibilityEnded)
            .count();
        assert_eq!(ends, 1);

        state.events.clear();
        advance(&mut state, &mut rng, 1.0);
        assert!(!state.events.contains(&GameEvent::InvincibilityEnded));
    }

    #[test]
    fn test_hit_cooldown_floors_at_zero() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        state.hit_cooldown = 0.3;
        advance(&mut state, &mut rng, 1.0);
        assert_eq!(state.hit_cooldown, 0.0);
    }

    #[test]
    fn test_player_eases_toward_target_lane() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        state.try_move_lane(-1);
        let start_x = state.player.pos.x;
        let target_x = state.player.target_x(&state.layout);

        advance(&mut state, &mut rng, 0.01);
        let after_one = state.player.pos.x;
        assert!(after_one < start_x && after_one > target_x);

        // A big step clamps the factor to 1 and snaps to the lane
        advance(&mut state, &mut rng, 1.0);
        assert!((state.player.pos.x - target_x).abs() < 1e-3);
    }

    #[test]
    fn test_entities_fall_at_world_speed_and_despawn() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        let mut tree = Entity::tree(10.0, 40.0);
        // Lands exactly on the despawn line after one 0.5 s frame
        tree.pos.y = 600.0 + DESPAWN_MARGIN - 50.0;
        state.entities.push(tree);

        advance(&mut state, &mut rng, 0.5);
        assert_eq!(state.entities.len(), 1);
        assert!((state.entities[0].pos.y - 850.0).abs() < 1e-3);

        advance(&mut state, &mut rng, 0.5);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_collisions_resolve_within_the_tick() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        let mut enemy = Entity::for_lane(EntityKind::Enemy, 1, &state.layout);
        enemy.pos.y = state.player.pos.y;
        state.entities.push(enemy);

        advance(&mut state, &mut rng, 0.016);
        assert_eq!(state.lives, state.max_lives - 1);
        assert!(state.events.contains(&GameEvent::PlayerDamaged));
    }

    #[test]
    fn test_first_wave_of_spawns_obeys_initial_delays() {
        let mut state = sized_state();
        let mut rng = seeded_rng();
        // Trees lead at 2.5 s; nothing else may appear before 5 s
        for _ in 0..150 {
            advance(&mut state, &mut rng, 0.016);
        }
        assert!(state.time_alive < 2.5);
        assert!(state.entities.is_empty());

        for _ in 0..80 {
            advance(&mut state, &mut rng, 0.016);
        }
        assert!(state.time_alive > 2.5 && state.time_alive < 5.0);
        assert!(state.entities.iter().all(|e| e.kind == EntityKind::Tree));
    }
}
