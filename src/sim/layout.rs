//! Road geometry derived from the viewport
//!
//! Every run-time position in the sim lives in layout units: the same
//! coordinate space the renderer draws in, origin at the top-left, y
//! growing downward. All geometry is recomputed from scratch on resize so
//! the sim never accumulates rounding from incremental adjustments.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Road geometry for the current viewport.
///
/// `road_left`/`road_width` describe the drivable band between the two
/// shoulders; `lane_width` is always `road_width / 3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadLayout {
    pub width: f32,
    pub height: f32,
    pub shoulder_width: f32,
    pub road_left: f32,
    pub road_width: f32,
    pub lane_width: f32,
    /// Renderer zoom factor; scroll speed is divided by it so perceived
    /// on-screen speed stays constant across zoom levels
    pub render_scale: f32,
}

impl Default for RoadLayout {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl RoadLayout {
    /// Compute the full layout for a viewport.
    ///
    /// The shoulder is 18% of the width, at least 40 units, and never more
    /// than 28% of the width. The floor wins on narrow viewports, so the
    /// upper ratio is applied last and the road band collapses toward zero
    /// instead of going negative.
    pub fn new(width: f32, height: f32) -> Self {
        let shoulder_width = (width * SHOULDER_RATIO)
            .max(SHOULDER_MIN)
            .min(width * SHOULDER_MAX_RATIO);
        let road_width = (width - 2.0 * shoulder_width).max(0.0);
        Self {
            width,
            height,
            shoulder_width,
            road_left: shoulder_width,
            road_width,
            lane_width: road_width / LANE_COUNT as f32,
            render_scale: 1.0,
        }
    }

    /// Apply a new viewport size, keeping the current render scale.
    ///
    /// Returns `false` (and leaves the layout untouched) when both
    /// dimensions moved by less than half a unit, which filters the
    /// sub-pixel resize chatter some window systems emit every frame.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if (width - self.width).abs() < RESIZE_EPSILON
            && (height - self.height).abs() < RESIZE_EPSILON
        {
            return false;
        }
        let render_scale = self.render_scale;
        *self = Self::new(width, height);
        self.render_scale = render_scale;
        true
    }

    /// True once a real viewport has been applied
    pub fn is_sized(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Horizontal center of a lane (0 = leftmost)
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        self.road_left + self.lane_width * (lane as f32 + 0.5)
    }

    /// Player car size `(width, height)` for this viewport
    pub fn player_size(&self) -> (f32, f32) {
        let w = (self.lane_width * PLAYER_WIDTH_LANE_RATIO)
            .min(self.height * PLAYER_WIDTH_HEIGHT_RATIO);
        (w, w * CAR_ASPECT)
    }

    /// Base width obstacles and pickups scale their sprites from
    pub fn base_entity_width(&self) -> f32 {
        (self.lane_width * ENTITY_WIDTH_LANE_RATIO)
            .min(self.height * ENTITY_WIDTH_HEIGHT_RATIO)
    }

    /// Scroll speed divided by the clamped render scale
    pub fn world_speed(&self, scroll_speed: f32) -> f32 {
        scroll_speed
            / self
                .render_scale
                .clamp(RENDER_SCALE_MIN, RENDER_SCALE_MAX)
    }
}
