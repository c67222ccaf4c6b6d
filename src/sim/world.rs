//! World generation and entity recycling
//!
//! Platforms and stars are a fixed-size pool: generated once per run, then
//! relocated in place as the climb pushes them past the bottom edge.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{CalmDot, Platform, PlatformKind, Star, World};
use crate::consts::*;
use crate::hsl_to_rgba;
use crate::input::DeviceClass;

/// Solid black, used for the start platform and for fakes
const INK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// The four pastel tints the background dots cycle through
const DOT_COLORS: [[f32; 4]; 4] = [
    [1.0, 0.839, 0.961, 1.0],
    [0.808, 0.953, 1.0, 1.0],
    [0.808, 1.0, 0.808, 1.0],
    [1.0, 0.961, 0.737, 1.0],
];

/// Vertical gap between generated platforms for a device class
fn platform_spacing(device: DeviceClass) -> f32 {
    match device {
        DeviceClass::Desktop => PLATFORM_SPACING_DESKTOP,
        DeviceClass::Mobile => PLATFORM_SPACING_MOBILE,
    }
}

/// Draw a spawn x from the allowed horizontal band
///
/// Mobile tilt reaches the whole width; desktop keys get an inset band so
/// platforms stay reachable.
fn spawn_x(rng: &mut Pcg32, width: f32, device: DeviceClass) -> f32 {
    let padding = match device {
        DeviceClass::Desktop => DESKTOP_BAND_PADDING,
        DeviceClass::Mobile => 0.0,
    };
    padding + rng.random_range(0.0..1.0) * (width - PLATFORM_WIDTH - padding * 2.0)
}

/// Roll platform kind and matching color for a generated slot
fn roll_kind(rng: &mut Pcg32) -> (PlatformKind, [f32; 4]) {
    if rng.random_bool(FAKE_CHANCE) {
        (PlatformKind::Fake { used: false }, INK)
    } else {
        let hue = rng.random_range(0.0..360.0);
        (PlatformKind::Normal, hsl_to_rgba(hue, 1.0, 0.5, 1.0))
    }
}

/// Reset platforms and stars to the initial run configuration
///
/// One guaranteed platform directly under the player, then 14 more at
/// increasing height, each with a companion star.
pub fn spawn_platforms(world: &mut World) {
    world.platforms.clear();
    world.stars.clear();

    let spacing = platform_spacing(world.device);

    world.platforms.push(Platform {
        x: world.player.pos.x - PLATFORM_WIDTH / 2.0,
        y: world.height - START_PLATFORM_RISE,
        width: PLATFORM_WIDTH,
        height: PLATFORM_HEIGHT,
        color: INK,
        kind: PlatformKind::Normal,
        opacity: 1.0,
    });

    for i in 1..PLATFORM_COUNT {
        let x = spawn_x(&mut world.rng, world.width, world.device);
        let y = world.height - i as f32 * spacing;
        let (kind, color) = roll_kind(&mut world.rng);

        world.platforms.push(Platform {
            x,
            y,
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
            color,
            kind,
            opacity: 1.0,
        });

        world.stars.push(Star {
            x: x + STAR_OFFSET_X,
            y: y + STAR_OFFSET_Y,
            collected: false,
        });
    }
}

/// Regenerate the decorative background dot field
pub fn spawn_calm_dots(world: &mut World) {
    world.dots.clear();

    for _ in 0..CALM_DOT_COUNT {
        let color = DOT_COLORS[world.rng.random_range(0..DOT_COLORS.len())];
        world.dots.push(CalmDot {
            x: world.rng.random_range(0.0..1.0) * world.width,
            y: world.rng.random_range(0.0..1.0) * world.height,
            base_radius: world
                .rng
                .random_range(DOT_RADIUS_MIN..DOT_RADIUS_MAX),
            pulse_phase: world.rng.random_range(0.0..std::f32::consts::TAU),
            color,
        });
    }
}

/// Relocate a platform that scrolled off the bottom back to the top edge
pub fn recycle_platform(
    platform: &mut Platform,
    rng: &mut Pcg32,
    width: f32,
    device: DeviceClass,
) {
    platform.y = 0.0;
    platform.x = spawn_x(rng, width, device);
    let (kind, color) = roll_kind(rng);
    platform.kind = kind;
    platform.color = color;
    platform.opacity = 1.0;
}

/// Relocate a star that scrolled off the bottom back to the top edge
///
/// Stars respawn across the full width, not the platform band.
pub fn recycle_star(star: &mut Star, rng: &mut Pcg32, width: f32) {
    star.y = 0.0;
    star.x = rng.random_range(0.0..1.0) * width;
    star.collected = false;
}
