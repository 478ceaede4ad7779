//! Hoop Toss - A single-screen basketball flick game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (ball flight, hoop collisions, scoring)
//! - `renderer`: WebGPU rendering of the court
//! - `skins`: Ball colour themes
//! - `coach`: Optional remote "coach tip" text
//! - `settings`: Data-driven tuning and coach configuration

pub mod coach;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod skins;

pub use settings::{CoachSettings, PhysicsTuning, Settings};
pub use skins::{BALL_THEMES, BallTheme};

use glam::Vec2;

/// Game configuration constants
///
/// All physics values are in canvas pixels and pixels/frame.
pub mod consts {
    /// Downward acceleration added to vy every frame
    pub const GRAVITY: f32 = 0.35;
    /// Velocity retained after hitting the rim or backboard
    pub const BOUNCE: f32 = 0.75;
    /// Horizontal damping applied every frame
    pub const AIR_RESISTANCE: f32 = 0.995;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 24.0;
    /// Rack position: x from left edge, y above bottom edge
    pub const RACK_X: f32 = 100.0;
    pub const RACK_OFFSET_Y: f32 = 150.0;

    /// Drag-to-throw
    pub const GRAB_RADIUS: f32 = 100.0;
    pub const LAUNCH_SCALE: f32 = 0.14;
    /// Minimum |vx| + |vy| for a release to count as a throw
    pub const LAUNCH_THRESHOLD: f32 = 2.0;
    pub const SPIN_FACTOR: f32 = 0.05;

    /// Hoop layout
    pub const RIM_WIDTH: f32 = 85.0;
    pub const RIM_THICKNESS: f32 = 10.0;
    /// Rim height as a fraction of viewport height
    pub const RIM_HEIGHT_RATIO: f32 = 0.35;
    /// Gap between the rim's right end and the backboard
    pub const RIM_GAP: f32 = 5.0;
    pub const BACKBOARD_WIDTH: f32 = 12.0;
    pub const BACKBOARD_HEIGHT: f32 = 140.0;
    /// Backboard top edge sits this far above the rim
    pub const BACKBOARD_RISE: f32 = 110.0;

    /// Collision response
    pub const RIM_KICK: f32 = 1.5;
    pub const RIM_CLEARANCE: f32 = 2.0;
    pub const BACKBOARD_CLEARANCE: f32 = 2.0;

    /// Half-height of the swish gate around the rim line
    pub const SWISH_HALF_HEIGHT: f32 = 15.0;
    /// How far past the viewport edges the ball may travel before it is a miss
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;

    /// Prediction guide length (frames)
    pub const PREDICTION_STEPS: usize = 25;

    /// UI timings (ms)
    pub const TOAST_MS: i32 = 1000;
    pub const COACH_BUBBLE_MS: i32 = 6000;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector pointing from `from` toward `to`
///
/// Coincident points have no direction; the result is then NaN, exactly as
/// dividing by a zero distance would be.
#[inline]
pub fn unit_normal(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    d / d.length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_unit_normal() {
        let n = unit_normal(Vec2::new(457.5, 300.0), Vec2::new(460.0, 300.0));
        assert!((n.x - 1.0).abs() < 1e-6);
        assert!(n.y.abs() < 1e-6);
    }
}
