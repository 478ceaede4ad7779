//! Frame assembly
//!
//! Turns a `GameState` into one triangle list, back to front: floor, hoop,
//! net, rim, aiming guide, ball.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Floor line sits this far above the bottom edge
const FLOOR_OFFSET: f32 = 80.0;
const FLOOR_WIDTH: f32 = 4.0;
/// Backboard outline and bracket stroke
const EDGE_WIDTH: f32 = 4.0;
const NET_DEPTH: f32 = 55.0;
const NET_STRANDS: usize = 5;
/// Guide dash pattern (on, off)
const GUIDE_DASH: (f32, f32) = (4.0, 12.0);
const SEAM_WIDTH: f32 = 2.0;
const BALL_SEGMENTS: u32 = 48;

/// Build the full vertex list for a frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);
    let vp = state.viewport;
    let hoop = &state.hoop;
    let board = hoop.backboard;

    // Floor
    let floor_y = vp.height - FLOOR_OFFSET;
    vertices.extend(shapes::line(
        Vec2::new(0.0, floor_y),
        Vec2::new(vp.width, floor_y),
        FLOOR_WIDTH,
        colors::FLOOR,
    ));

    // Backboard and rim bracket
    vertices.extend(shapes::rect(
        board.x,
        board.y,
        board.width,
        board.height,
        colors::BACKBOARD_FILL,
    ));
    vertices.extend(shapes::rect_outline(
        board.x,
        board.y,
        board.width,
        board.height,
        EDGE_WIDTH,
        colors::BACKBOARD_EDGE,
    ));
    vertices.extend(shapes::rect_outline(
        board.x - 2.0,
        hoop.center.y - 45.0,
        5.0,
        60.0,
        EDGE_WIDTH,
        colors::BACKBOARD_EDGE,
    ));

    // Net: strands from the rim converging below it
    let rim_left = hoop.rim_left();
    for i in 0..=NET_STRANDS {
        let top = Vec2::new(rim_left.x + i as f32 * hoop.width / NET_STRANDS as f32, hoop.center.y);
        let bottom = Vec2::new(hoop.center.x - 15.0 + i as f32 * 6.0, hoop.center.y + NET_DEPTH);
        vertices.extend(shapes::line(top, bottom, 1.0, colors::NET));
    }

    // Rim
    vertices.extend(shapes::line(
        hoop.rim_left(),
        hoop.rim_right(),
        hoop.rim_thickness,
        colors::RIM,
    ));

    // Aiming guide
    if let Some(path) = state.prediction() {
        vertices.extend(shapes::dashed_polyline(
            &path,
            GUIDE_DASH,
            hoop.rim_thickness,
            colors::GUIDE,
        ));
    }

    vertices.extend(ball_vertices(state));
    vertices
}

/// Themed ball with spinning seams
fn ball_vertices(state: &GameState) -> Vec<Vertex> {
    let ball = &state.ball;
    let theme = state.theme();
    let r = ball.radius;
    let rot = Vec2::from_angle(ball.angle);
    let local = |x: f32, y: f32| ball.pos + rot.rotate(Vec2::new(x, y));

    let mut vertices = shapes::gradient_circle(
        ball.pos,
        local(-5.0, -5.0),
        r,
        theme.primary_rgba(),
        theme.secondary_rgba(),
        BALL_SEGMENTS,
    );

    let seam = theme.seam_rgba();
    vertices.extend(shapes::line(local(-r, 0.0), local(r, 0.0), SEAM_WIDTH, seam));
    vertices.extend(shapes::line(local(0.0, -r), local(0.0, r), SEAM_WIDTH, seam));
    vertices.extend(shapes::ellipse_outline(
        ball.pos,
        Vec2::new(r, r * 0.6),
        ball.angle,
        SEAM_WIDTH,
        seam,
        BALL_SEGMENTS,
    ));
    vertices
}
