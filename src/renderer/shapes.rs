//! Shape tessellation for 2D primitives
//!
//! Everything is emitted as triangle lists in screen-pixel space; the
//! pipeline maps pixels to NDC at upload time.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a radial-gradient circle: full color at the
/// center fading to transparent at the rim
pub fn glow_circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let rim = [color[0], color[1], color[2], 0.0];
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            rim,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            rim,
        ));
    }

    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x + width, y, color),
        Vertex::new(x + width, y + height, color),
        Vertex::new(x, y, color),
        Vertex::new(x + width, y + height, color),
        Vertex::new(x, y + height, color),
    ]
}

/// Generate vertices for a dashed rectangle outline (fake platforms)
///
/// Dash pattern runs independently along each edge, 5px on / 3px off,
/// one pixel of stroke thickness.
pub fn dashed_rect_outline(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    const DASH: f32 = 5.0;
    const GAP: f32 = 3.0;
    const STROKE: f32 = 1.0;

    let mut vertices = Vec::new();

    let edges = [
        (Vec2::new(x, y), Vec2::new(x + width, y)),
        (Vec2::new(x + width, y), Vec2::new(x + width, y + height)),
        (Vec2::new(x + width, y + height), Vec2::new(x, y + height)),
        (Vec2::new(x, y + height), Vec2::new(x, y)),
    ];

    for (from, to) in edges {
        let length = (to - from).length();
        let dir = (to - from) / length;
        let perp = Vec2::new(-dir.y, dir.x) * (STROKE / 2.0);

        let mut offset = 0.0;
        while offset < length {
            let end = (offset + DASH).min(length);
            let a = from + dir * offset;
            let b = from + dir * end;

            vertices.push(Vertex::new(a.x - perp.x, a.y - perp.y, color));
            vertices.push(Vertex::new(b.x - perp.x, b.y - perp.y, color));
            vertices.push(Vertex::new(b.x + perp.x, b.y + perp.y, color));

            vertices.push(Vertex::new(a.x - perp.x, a.y - perp.y, color));
            vertices.push(Vertex::new(b.x + perp.x, b.y + perp.y, color));
            vertices.push(Vertex::new(a.x + perp.x, a.y + perp.y, color));

            offset += DASH + GAP;
        }
    }

    vertices
}

/// Generate vertices for a filled star with the given number of spikes,
/// alternating between outer and inner radius
pub fn star(
    center: Vec2,
    outer_radius: f32,
    inner_radius: f32,
    spikes: u32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let points = spikes * 2;
    let mut rim = Vec::with_capacity(points as usize);

    // Start at the top spike
    for i in 0..points {
        let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
        let theta = -PI / 2.0 + (i as f32 / points as f32) * 2.0 * PI;
        rim.push(Vec2::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        ));
    }

    let mut vertices = Vec::with_capacity((points * 3) as usize);
    for i in 0..points as usize {
        let next = rim[(i + 1) % points as usize];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(rim[i].x, rim[i].y, color));
        vertices.push(Vertex::new(next.x, next.y, color));
    }

    vertices
}
