//! Scene assembly: world state in, vertex list out
//!
//! Pure read of the world. Paint order matters: background dots, platforms,
//! stars, player on top.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::HUE_PER_POINT;
use crate::hsl_to_rgba;
use crate::settings::Settings;
use crate::sim::{PlatformKind, World};

/// Star glyph geometry
const STAR_SPIKES: u32 = 10;
const STAR_OUTER_RADIUS: f32 = 10.0;
const STAR_INNER_RADIUS: f32 = 5.0;

const CIRCLE_SEGMENTS: u32 = 32;
const DOT_SEGMENTS: u32 = 24;

/// Player color derived from score: hue cycles a full turn in 30° steps
pub fn player_color(score: u32) -> [f32; 4] {
    hsl_to_rgba(((score * HUE_PER_POINT) % 360) as f32, 1.0, 0.5, 1.0)
}

/// Tessellate the whole frame
pub fn build_scene(world: &World, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for dot in world.dots.iter().take(settings.max_dots()) {
        let pulse = if settings.effective_pulse() {
            dot.pulse_phase.sin() + 1.0
        } else {
            1.0
        };
        let radius = dot.base_radius * pulse;
        if radius > 0.0 {
            vertices.extend(shapes::glow_circle(
                Vec2::new(dot.x, dot.y),
                radius,
                dot.color,
                DOT_SEGMENTS,
            ));
        }
    }

    for platform in &world.platforms {
        // A consumed fake is fully transparent until recycled
        if platform.opacity <= 0.0 {
            continue;
        }
        let mut color = platform.color;
        color[3] *= platform.opacity;

        match platform.kind {
            PlatformKind::Fake { .. } => vertices.extend(shapes::dashed_rect_outline(
                platform.x,
                platform.y,
                platform.width,
                platform.height,
                color,
            )),
            PlatformKind::Normal => vertices.extend(shapes::rect(
                platform.x,
                platform.y,
                platform.width,
                platform.height,
                color,
            )),
        }
    }

    for star in world.stars.iter().filter(|s| !s.collected) {
        vertices.extend(shapes::star(
            Vec2::new(star.x, star.y),
            STAR_OUTER_RADIUS,
            STAR_INNER_RADIUS,
            STAR_SPIKES,
            colors::STAR_GOLD,
        ));
    }

    let color = player_color(world.score);
    if settings.glow_enabled() {
        vertices.extend(shapes::glow_circle(
            world.player.pos,
            world.player.radius * 2.2,
            color,
            CIRCLE_SEGMENTS,
        ));
    }
    vertices.extend(shapes::circle(
        world.player.pos,
        world.player.radius,
        color,
        CIRCLE_SEGMENTS,
    ));

    vertices
}
