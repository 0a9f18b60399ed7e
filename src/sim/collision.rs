//! Collision detection and response
//!
//! Everything on the road is an axis-aligned box, so detection is a strict
//! AABB overlap test. Response runs the contact through a small state
//! machine: invincibility, the shared hit cooldown, lives, game over.

use glam::Vec2;

use crate::consts::*;
use crate::sim::entity::EntityKind;
use crate::sim::state::{GameEvent, GameState};

/// Strict axis-aligned overlap test on top-left boxes.
///
/// Strict inequalities mean boxes that merely share an edge do not count
/// as touching, which keeps lane-adjacent entities from phantom-hitting.
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Resolve every player/entity contact for this tick.
///
/// Entities are visited in reverse index order so removal never shifts an
/// index we still need. Trees are scenery and never collide. A fatal enemy
/// hit ends the run immediately; nothing after it is resolved.
pub fn resolve(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_size = state.player.size;

    for i in (0..state.entities.len()).rev() {
        let entity = state.entities[i];
        if entity.kind == EntityKind::Tree {
            continue;
        }
        if !aabb_overlap(player_pos, player_size, entity.pos, entity.size) {
            continue;
        }

        match entity.kind {
            EntityKind::Enemy => {
                if state.is_invincible() {
                    // Plowed through under a star
                    state.entities.remove(i);
                    state.score_precise += PLOW_THROUGH_SCORE;
                } else if state.hit_cooldown <= 0.0 {
                    state.entities.remove(i);
                    state.hit_cooldown = HIT_COOLDOWN;
                    state.lives = state.lives.saturating_sub(1);
                    if state.lives == 0 {
                        state.game_over = true;
                        let score = state.score();
                        if score > state.high_score {
                            state.high_score = score;
                            state.new_high_score = true;
                        }
                        state.events.push(GameEvent::PlayerDied);
                        return;
                    }
                    state.events.push(GameEvent::PlayerDamaged);
                }
                // contact during the grace period is ignored, not consumed
            }
            EntityKind::Coin => {
                state.entities.remove(i);
                state.score_precise += COIN_SCORE;
                state.coins_this_run += 1;
                state.events.push(GameEvent::CoinCollected);
            }
            EntityKind::Fuel => {
                state.entities.remove(i);
                state.lives = (state.lives + 1).min(state.max_lives);
                state.events.push(GameEvent::FuelCollected);
            }
            EntityKind::Star => {
                state.entities.remove(i);
                state.invincibility_timer =
                    state.invincibility_duration.max(STAR_DURATION_FLOOR);
                state.events.push(GameEvent::InvincibilityStarted);
            }
            EntityKind::Tree => unreachable!("trees are skipped above"),
        }
    }
}
