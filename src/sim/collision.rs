//! Collision detection and response against the hoop
//!
//! Two kinds of contact: the backboard is a one-sided vertical wall, and each
//! rim end is a point treated as a small circle. Checks are discrete (no
//! sweep), so a fast enough ball can pass through either.

use glam::Vec2;

use super::hoop::Rect;
use super::state::Ball;
use crate::consts::{BACKBOARD_CLEARANCE, RIM_CLEARANCE};

/// Result of a contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Unit normal from the contact point toward the ball centre
    pub normal: Vec2,
    /// Overlap depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a ball against a point with a given contact distance
pub fn ball_point_contact(ball_pos: Vec2, point: Vec2, contact_distance: f32) -> CollisionResult {
    let dist = crate::distance(ball_pos, point);
    if dist < contact_distance {
        return CollisionResult {
            hit: true,
            point,
            normal: crate::unit_normal(point, ball_pos),
            penetration: contact_distance - dist,
        };
    }
    CollisionResult::miss()
}

/// Bounce the ball off the backboard's left face.
///
/// Fires whenever the ball's leading edge is past the face and its centre is
/// within the board's vertical span, regardless of where it came from.
/// Returns true if the ball was pushed back.
pub fn resolve_backboard(ball: &mut Ball, board: &Rect, bounce: f32) -> bool {
    if ball.pos.x + ball.radius > board.x && board.spans_y(ball.pos.y) {
        ball.vel.x = -ball.vel.x.abs() * bounce;
        ball.pos.x = board.x - ball.radius - BACKBOARD_CLEARANCE;
        return true;
    }
    false
}

/// Bounce the ball off a rim end.
///
/// Only an inbound ball (moving toward the point) is resolved: its velocity is
/// reflected and damped, kicked outward along the normal, and the ball is
/// moved just clear of the contact distance. An overlapping ball that is
/// already moving away is left alone. Returns true if resolved.
pub fn resolve_rim_point(
    ball: &mut Ball,
    point: Vec2,
    rim_thickness: f32,
    bounce: f32,
    kick: f32,
) -> bool {
    let contact_distance = ball.radius + rim_thickness / 2.0;
    let contact = ball_point_contact(ball.pos, point, contact_distance);
    if !contact.hit {
        return false;
    }

    let n = contact.normal;
    let dot = ball.vel.dot(n);
    // Ball centred exactly on the point has no normal
    if dot.is_nan() || dot >= 0.0 {
        return false;
    }

    ball.vel = reflect_velocity(ball.vel, n) * bounce + n * kick;
    ball.pos = point + n * (contact_distance + RIM_CLEARANCE);
    true
}
