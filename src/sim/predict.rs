//! Trajectory prediction for the aiming guide
//!
//! Free flight only: gravity, no drag, no hoop collisions. Works on copies so
//! the real ball is never touched.

use glam::Vec2;

use super::state::GameState;

/// Simulate `steps` frames of free flight.
///
/// Returns `steps + 1` points, the first being `start`.
pub fn predict_path(start: Vec2, launch_vel: Vec2, gravity: f32, steps: usize) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(steps + 1);
    let mut pos = start;
    let mut vel = launch_vel;
    points.push(pos);
    for _ in 0..steps {
        vel.y += gravity;
        pos += vel;
        points.push(pos);
    }
    points
}

impl GameState {
    /// Aiming guide for the active drag, if there is one
    pub fn prediction(&self) -> Option<Vec<Vec2>> {
        let drag = self.drag.as_ref()?;
        Some(predict_path(
            self.ball.pos,
            drag.launch_velocity(self.tuning.launch_scale),
            self.tuning.gravity,
            self.tuning.prediction_steps,
        ))
    }
}
