//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable timestep, but every mutation flows from `advance`
//! - Seeded RNG only, always passed in by the caller
//! - Stable entity order (spawn order, reverse-index removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod layout;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, resolve};
pub use entity::{Entity, EntityKind};
pub use layout::RoadLayout;
pub use spawn::is_area_clear;
pub use state::{GameEvent, GameState, Player, SpawnTimers};
pub use tick::advance;
