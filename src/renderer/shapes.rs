//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in canvas pixel space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Filled circle shaded from `inner` at `focus` to `outer` at the edge
pub fn gradient_circle(
    center: Vec2,
    focus: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from focus to edge
        vertices.push(Vertex::at(focus, inner));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, outer));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, outer));
    }

    vertices
}

/// Thick line segment with butt ends
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    [a1, a2, b1, b1, a2, b2]
        .into_iter()
        .map(|p| Vertex::at(p, color))
        .collect()
}

/// Filled axis-aligned rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x, y + h, color),
        Vertex::new(x + w, y, color),
        Vertex::new(x + w, y, color),
        Vertex::new(x, y + h, color),
        Vertex::new(x + w, y + h, color),
    ]
}

/// Rectangle outline, stroke centred on the edges
pub fn rect_outline(x: f32, y: f32, w: f32, h: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
    ];
    let half = width / 2.0;
    let mut vertices = Vec::with_capacity(24);
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        // Extend each edge so the corners are filled
        let dir = (b - a).normalize_or_zero();
        vertices.extend(line(a - dir * half, b + dir * half, width, color));
    }
    vertices
}

/// Ellipse outline centred at `center`, rotated by `angle`
pub fn ellipse_outline(
    center: Vec2,
    radii: Vec2,
    angle: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()))
    };

    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    for i in 0..segments {
        vertices.extend(line(point(i), point(i + 1), width, color));
    }
    vertices
}

/// Dashed polyline. `dash` is (on, off) length; the pattern continues across
/// segment joints.
pub fn dashed_polyline(
    points: &[Vec2],
    dash: (f32, f32),
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let (on, off) = dash;
    let period = on + off;
    if points.len() < 2 || on <= 0.0 || period <= 0.0 {
        return Vec::new();
    }

    let mut vertices = Vec::new();
    // Distance into the current dash period
    let mut phase = 0.0_f32;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let seg_len = (b - a).length();
        if seg_len == 0.0 {
            continue;
        }
        let dir = (b - a) / seg_len;
        let mut t = 0.0;

        while t < seg_len {
            let remaining_in_state = if phase < on { on - phase } else { period - phase };
            let step = remaining_in_state.min(seg_len - t);
            if phase < on {
                vertices.extend(line(a + dir * t, a + dir * (t + step), width, color));
            }
            t += step;
            phase += step;
            if phase >= period {
                phase -= period;
            }
        }
    }

    vertices
}
