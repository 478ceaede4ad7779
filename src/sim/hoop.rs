//! Hoop geometry
//!
//! The backboard is flush against the right edge of the viewport, the rim
//! hangs just left of it at 35% of the viewport height. Both rim ends are
//! collision points; the span between them is the swish gate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strictly between the top and bottom edges
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        y > self.y && y < self.bottom()
    }
}

/// The hoop: rim plus backboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    /// Rim centre
    pub center: Vec2,
    /// Full rim width (end to end)
    pub width: f32,
    pub rim_thickness: f32,
    pub backboard: Rect,
    /// A basket already counted this turn
    pub scored_this_turn: bool,
}

impl Hoop {
    /// Lay the hoop out for a viewport
    pub fn layout(viewport: Viewport) -> Self {
        let backboard_x = viewport.width - BACKBOARD_WIDTH;
        let rim_y = viewport.height * RIM_HEIGHT_RATIO;
        let center = Vec2::new(backboard_x - RIM_WIDTH / 2.0 - RIM_GAP, rim_y);
        Self::with_rim(center, RIM_WIDTH)
    }

    /// Hoop with the rim centred at `center`; the backboard stays flush with
    /// the rim's right end
    pub fn with_rim(center: Vec2, width: f32) -> Self {
        let backboard_x = center.x + width / 2.0 + RIM_GAP;
        Self {
            center,
            width,
            rim_thickness: RIM_THICKNESS,
            backboard: Rect::new(
                backboard_x,
                center.y - BACKBOARD_RISE,
                BACKBOARD_WIDTH,
                BACKBOARD_HEIGHT,
            ),
            scored_this_turn: false,
        }
    }

    /// Recompute geometry for a new viewport, keeping the turn's score flag
    pub fn relayout(&mut self, viewport: Viewport) {
        let scored = self.scored_this_turn;
        *self = Self::layout(viewport);
        self.scored_this_turn = scored;
    }

    #[inline]
    pub fn rim_left(&self) -> Vec2 {
        Vec2::new(self.center.x - self.width / 2.0, self.center.y)
    }

    #[inline]
    pub fn rim_right(&self) -> Vec2 {
        Vec2::new(self.center.x + self.width / 2.0, self.center.y)
    }

    /// Centre distance below which a ball of `ball_radius` touches a rim end
    #[inline]
    pub fn contact_distance(&self, ball_radius: f32) -> f32 {
        ball_radius + self.rim_thickness / 2.0
    }

    /// Inside the swish gate: strictly between the rim ends and within
    /// `SWISH_HALF_HEIGHT` of the rim line
    pub fn in_swish_gate(&self, pos: Vec2) -> bool {
        pos.x > self.rim_left().x
            && pos.x < self.rim_right().x
            && pos.y > self.center.y - SWISH_HALF_HEIGHT
            && pos.y < self.center.y + SWISH_HALF_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_anchors_to_right_edge() {
        let hoop = Hoop::layout(Viewport::new(1000.0, 800.0));
        assert_eq!(hoop.backboard.x, 988.0);
        assert_eq!(hoop.backboard.y, 280.0 - 110.0);
        assert_eq!(hoop.center, Vec2::new(988.0 - 42.5 - 5.0, 280.0));
        assert_eq!(hoop.rim_right().x + RIM_GAP, hoop.backboard.x);
    }

    #[test]
    fn test_rim_endpoints() {
        let hoop = Hoop::with_rim(Vec2::new(500.0, 300.0), 85.0);
        assert_eq!(hoop.rim_left(), Vec2::new(457.5, 300.0));
        assert_eq!(hoop.rim_right(), Vec2::new(542.5, 300.0));
        assert_eq!(hoop.contact_distance(24.0), 29.0);
    }

    #[test]
    fn test_swish_gate_is_strict() {
        let hoop = Hoop::with_rim(Vec2::new(500.0, 300.0), 85.0);
        assert!(hoop.in_swish_gate(Vec2::new(500.0, 300.0)));
        assert!(hoop.in_swish_gate(Vec2::new(458.0, 314.0)));
        assert!(!hoop.in_swish_gate(Vec2::new(457.5, 300.0)));
        assert!(!hoop.in_swish_gate(Vec2::new(500.0, 315.0)));
        assert!(!hoop.in_swish_gate(Vec2::new(500.0, 285.0)));
    }

    #[test]
    fn test_relayout_keeps_score_flag() {
        let mut hoop = Hoop::layout(Viewport::new(1000.0, 800.0));
        hoop.scored_this_turn = true;
        hoop.relayout(Viewport::new(640.0, 480.0));
        assert!(hoop.scored_this_turn);
        assert_eq!(hoop.backboard.x, 628.0);
    }
}
