//! Spawn planner
//!
//! Each entity kind runs its own countdown timer. On expiry the planner
//! attempts one spawn; success re-arms the timer from the kind's normal
//! range, failure re-arms from a short retry range so a crowded road is
//! re-tested soon instead of stalling the kind for its full interval.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::*;
use crate::sim::collision::aabb_overlap;
use crate::sim::entity::{Entity, EntityKind};
use crate::sim::state::GameState;

/// Advance all spawn timers by `dt` and run every attempt that came due.
pub fn run(state: &mut GameState, rng: &mut impl Rng, dt: f32) {
    for kind in EntityKind::ALL {
        let timer = state.timers.get_mut(kind);
        *timer -= dt;
        if *timer > 0.0 {
            continue;
        }
        let spawned = attempt(state, kind, rng);
        let (lo, hi) = if spawned {
            kind.timer_range()
        } else {
            (SPAWN_RETRY_MIN, SPAWN_RETRY_MAX)
        };
        *state.timers.get_mut(kind) = rng.random_range(lo..=hi);
    }
}

/// One spawn attempt for `kind`. Returns whether an entity was placed.
fn attempt(state: &mut GameState, kind: EntityKind, rng: &mut impl Rng) -> bool {
    if state.count_of(kind) >= kind.cap() {
        return false;
    }
    if kind.is_lane_bound() {
        try_spawn_in_any_lane(state, kind, rng)
    } else {
        try_spawn_tree(state, rng)
    }
}

/// Try the three lanes in shuffled order and place `kind` in the first one
/// that accepts it.
fn try_spawn_in_any_lane(state: &mut GameState, kind: EntityKind, rng: &mut impl Rng) -> bool {
    let mut lanes: Vec<usize> = (0..LANE_COUNT).collect();
    lanes.shuffle(rng);
    for lane in lanes {
        if kind == EntityKind::Enemy && lane_blocks_enemy(state, lane) {
            continue;
        }
        let candidate = Entity::for_lane(kind, lane, &state.layout);
        if is_area_clear(state, &candidate) {
            state.entities.push(candidate);
            return true;
        }
    }
    false
}

/// A lane refuses another enemy while one it already holds is still near
/// the top edge; this keeps enemies in one lane from stacking into an
/// undodgeable train.
fn lane_blocks_enemy(state: &GameState, lane: usize) -> bool {
    state.entities.iter().any(|e| {
        e.kind == EntityKind::Enemy && e.lane == Some(lane) && e.pos.y < ENEMY_MIN_GAP_FROM_TOP
    })
}

/// Try to place one tree on a shoulder.
///
/// The size roll comes first so a shoulder too narrow to leave 8 units of
/// slack rejects before any placement rolls happen.
fn try_spawn_tree(state: &mut GameState, rng: &mut impl Rng) -> bool {
    let layout = state.layout;
    let lo = (layout.shoulder_width * 0.45).min(layout.height * 0.12);
    let hi = (layout.shoulder_width * 0.75).min(layout.height * 0.18);
    let size = rng.random_range(lo..=hi);

    let band = layout.shoulder_width - size;
    if band < TREE_SHOULDER_SLACK {
        return false;
    }

    let x = if rng.random_bool(0.5) {
        // left shoulder
        rng.random_range(0.0..=band)
    } else {
        // right shoulder
        rng.random_range(layout.width - layout.shoulder_width..=layout.width - size)
    };

    let candidate = Entity::tree(x, size);
    if !is_area_clear(state, &candidate) {
        return false;
    }
    state.entities.push(candidate);
    true
}

/// True when `candidate`'s box, inflated by its kind's padding on every
/// side, touches nothing already on the road.
pub fn is_area_clear(state: &GameState, candidate: &Entity) -> bool {
    let pad = candidate.kind.spawn_padding();
    let pos = candidate.pos - Vec2::splat(pad);
    let size = candidate.size + Vec2::splat(pad * 2.0);
    !state
        .entities
        .iter()
        .any(|e| aabb_overlap(pos, size, e.pos, e.size))
}
