//! Road entities: obstacles, pickups and shoulder scenery
//!
//! All per-kind tuning lives in the match tables here so a balance pass
//! touches exactly one file.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::layout::RoadLayout;

/// Everything that scrolls down the screen toward the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Oncoming car; costs a life on contact
    Enemy,
    /// Pickup worth bonus score
    Coin,
    /// Pickup restoring one life
    Fuel,
    /// Pickup granting invincibility
    Star,
    /// Shoulder scenery; never collides
    Tree,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Enemy,
        EntityKind::Coin,
        EntityKind::Fuel,
        EntityKind::Star,
        EntityKind::Tree,
    ];

    /// Most entities of this kind alive at once
    pub fn cap(self) -> usize {
        match self {
            EntityKind::Enemy => 2,
            EntityKind::Coin => 3,
            EntityKind::Fuel => 1,
            EntityKind::Star => 1,
            EntityKind::Tree => 4,
        }
    }

    /// Clearance required between a fresh spawn and everything already on
    /// the road, in layout units
    pub fn spawn_padding(self) -> f32 {
        match self {
            EntityKind::Enemy => 20.0,
            EntityKind::Coin => 18.0,
            EntityKind::Fuel => 24.0,
            EntityKind::Star => 26.0,
            EntityKind::Tree => 12.0,
        }
    }

    /// Delay range between successful spawns, in seconds
    pub fn timer_range(self) -> (f32, f32) {
        match self {
            EntityKind::Enemy => (0.75, 1.35),
            EntityKind::Coin => (1.0, 1.8),
            EntityKind::Fuel => (12.0, 20.0),
            EntityKind::Star => (18.0, 32.0),
            EntityKind::Tree => (1.4, 2.6),
        }
    }

    /// Delay before the first spawn attempt of a fresh run, in seconds
    pub fn initial_delay(self) -> f32 {
        match self {
            EntityKind::Enemy => 5.0,
            EntityKind::Coin => 6.0,
            EntityKind::Fuel => 12.0,
            EntityKind::Star => 16.0,
            EntityKind::Tree => 2.5,
        }
    }

    /// Lane-bound kinds roll one of the three lanes; trees land on the
    /// shoulders instead
    pub fn is_lane_bound(self) -> bool {
        !matches!(self, EntityKind::Tree)
    }

    /// Sprite size for a given base width
    fn sprite_size(self, base: f32) -> (f32, f32) {
        match self {
            EntityKind::Enemy => (base, base * CAR_ASPECT),
            EntityKind::Coin => (base * 0.45, base * 0.45),
            EntityKind::Fuel => (base * 0.55, base * 0.55),
            EntityKind::Star => (base * 0.65, base * 0.65),
            // shoulder trees get their size from the spawner
            EntityKind::Tree => (base, base),
        }
    }
}

/// One entity on the road. Position is the top-left corner of its box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Lane index for lane-bound kinds; `None` for shoulder trees
    pub lane: Option<usize>,
}

impl Entity {
    /// Build a lane-bound entity sized for the current layout, centered on
    /// the lane and parked just above the top edge of the viewport.
    pub fn for_lane(kind: EntityKind, lane: usize, layout: &RoadLayout) -> Self {
        debug_assert!(kind.is_lane_bound(), "trees use Entity::tree");
        let (w, h) = kind.sprite_size(layout.base_entity_width());
        Self {
            kind,
            pos: Vec2::new(
                layout.lane_center_x(lane) - w / 2.0,
                -(h + SPAWN_Y_MARGIN),
            ),
            size: Vec2::new(w, h),
            lane: Some(lane),
        }
    }

    /// Build a shoulder tree with a square sprite of `size`, left edge at `x`.
    pub fn tree(x: f32, size: f32) -> Self {
        Self {
            kind: EntityKind::Tree,
            pos: Vec2::new(x, -(size + SPAWN_Y_MARGIN)),
            size: Vec2::splat(size),
            lane: None,
        }
    }

    /// Bottom edge of the entity's box
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "expected {b}, got {a}");
    }

    #[test]
    fn test_enemy_sized_from_lane_width() {
        let layout = RoadLayout::new(800.0, 600.0);
        let base = layout.lane_width * 0.52;
        let e = Entity::for_lane(EntityKind::Enemy, 1, &layout);
        assert_close(e.size.x, base);
        assert_close(e.size.y, base * 1.6);
        assert_eq!(e.lane, Some(1));
    }

    #[test]
    fn test_entity_centered_on_lane_above_viewport() {
        let layout = RoadLayout::new(800.0, 600.0);
        for lane in 0..3 {
            let e = Entity::for_lane(EntityKind::Coin, lane, &layout);
            assert_close(e.pos.x + e.size.x / 2.0, layout.lane_center_x(lane));
            assert_close(e.bottom(), -10.0);
        }
    }

    #[test]
    fn test_pickups_are_squares_scaled_off_the_base() {
        let layout = RoadLayout::new(800.0, 600.0);
        let base = layout.base_entity_width();
        for (kind, scale) in [
            (EntityKind::Coin, 0.45),
            (EntityKind::Fuel, 0.55),
            (EntityKind::Star, 0.65),
        ] {
            let e = Entity::for_lane(kind, 0, &layout);
            assert_close(e.size.x, base * scale);
            assert_eq!(e.size.x, e.size.y);
        }
    }

    #[test]
    fn test_base_width_capped_by_viewport_height() {
        // Short viewport: 20% of height beats 52% of lane width
        let layout = RoadLayout::new(2000.0, 300.0);
        let e = Entity::for_lane(EntityKind::Enemy, 0, &layout);
        assert_close(e.size.x, 60.0);
    }

    #[test]
    fn test_tree_is_square_and_laneless() {
        let t = Entity::tree(12.0, 48.0);
        assert_eq!(t.lane, None);
        assert_eq!(t.size, Vec2::splat(48.0));
        assert_close(t.pos.y, -58.0);
        assert!(!t.kind.is_lane_bound());
    }

    #[test]
    fn test_kind_tables_cover_every_variant() {
        for kind in EntityKind::ALL {
            assert!(kind.cap() >= 1);
            assert!(kind.spawn_padding() > 0.0);
            let (lo, hi) = kind.timer_range();
            assert!(0.0 < lo && lo < hi);
            assert!(kind.initial_delay() > 0.0);
        }
    }
}
