//! Per-frame simulation step
//!
//! One call per displayed frame, fixed timestep (no delta-time
//! normalization): steer, gravity, landings, star pickup, game-over check,
//! then the upward-only camera scroll with pool recycling.

use super::collision::{platform_landing, star_in_reach};
use super::state::{GamePhase, PlatformKind, World};
use super::world::{recycle_platform, recycle_star};
use crate::consts::*;
use crate::wrap_x;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal intent in [-1, 1] (keys or tilt, already normalized)
    pub steer: f32,
}

/// What happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, Default)]
pub struct TickEvents {
    /// Qualifying landings resolved this frame
    pub landings: u32,
    /// Stars collected this frame
    pub stars_collected: u32,
    /// Set when the run just ended, carrying the final score
    pub game_over: Option<u32>,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();
    if world.phase != GamePhase::Running {
        return events;
    }

    // Horizontal motion with seamless edge wrap
    world.player.vel.x = input.steer * HORIZONTAL_SPEED;
    world.player.pos.x += world.player.vel.x;
    world.player.pos.x = wrap_x(world.player.pos.x, world.player.radius, world.width);

    // Euler integration, one frame per step
    world.player.vel.y += GRAVITY;
    world.player.pos.y += world.player.vel.y;

    // Landing resolution; the kind match decides whether the contact counts
    for platform in &mut world.platforms {
        if !platform_landing(&world.player, platform) {
            continue;
        }

        let landed = match platform.kind {
            PlatformKind::Fake { used: false } => {
                // One bounce only: hide it and park it below the screen
                // until the scroll recycles it
                platform.kind = PlatformKind::Fake { used: true };
                platform.opacity = 0.0;
                platform.y = world.height + 100.0;
                true
            }
            PlatformKind::Fake { used: true } => false,
            PlatformKind::Normal => true,
        };

        if landed {
            world.player.vel.y = BOUNCE_VELOCITY;
            world.score += LANDING_POINTS;
            events.landings += 1;
        }
    }

    // Star pickup, idempotent per star until recycle
    for star in &mut world.stars {
        if star_in_reach(&world.player, star) {
            star.collected = true;
            world.score += STAR_POINTS;
            events.stars_collected += 1;
        }
    }

    // Fell below the viewport: the run ends right here
    if world.player.pos.y > world.height {
        world.phase = GamePhase::GameOver {
            final_score: world.score,
        };
        events.game_over = Some(world.score);
        return events;
    }

    // Camera follows upward motion only: clamp the player to the midpoint
    // and shift the world down by the overshoot
    if world.player.pos.y < world.height / 2.0 {
        let diff = world.height / 2.0 - world.player.pos.y;
        world.player.pos.y = world.height / 2.0;
        world.player.max_height += diff;

        for platform in &mut world.platforms {
            platform.y += diff;
            if platform.y > world.height {
                recycle_platform(platform, &mut world.rng, world.width, world.device);
            }
        }
        for star in &mut world.stars {
            star.y += diff;
            if star.y > world.height {
                recycle_star(star, &mut world.rng, world.width);
            }
        }
    }

    // Decorative pulse animation; kept out of the renderer so drawing stays
    // a pure read
    for dot in &mut world.dots {
        dot.pulse_phase += DOT_PULSE_STEP;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DeviceClass;
    use crate::sim::state::{Platform, Star};
    use glam::Vec2;

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    /// A running world with the generated pool intact
    fn running_world(seed: u64) -> World {
        let mut world = World::new(WIDTH, HEIGHT, DeviceClass::Desktop, seed);
        world.start();
        world
    }

    /// A running world with no platforms or stars, for isolated physics
    fn empty_world(seed: u64) -> World {
        let mut world = running_world(seed);
        world.platforms.clear();
        world.stars.clear();
        world
    }

    fn platform_at(x: f32, y: f32, kind: PlatformKind) -> Platform {
        Platform {
            x,
            y,
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
            color: [0.0, 0.0, 0.0, 1.0],
            kind,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_not_started_is_inert() {
        let mut world = World::new(WIDTH, HEIGHT, DeviceClass::Desktop, 1);
        let before = world.player.pos;
        tick(&mut world, &TickInput { steer: 1.0 });
        assert_eq!(world.player.pos, before);
    }

    #[test]
    fn test_wrap_left_to_right() {
        let mut world = empty_world(2);
        world.player.pos = Vec2::new(-12.0, 200.0);

        tick(&mut world, &TickInput { steer: -1.0 });

        // -12 - 5 = -17 < -radius, so the player reappears on the right
        assert_eq!(world.player.pos.x, WIDTH + world.player.radius);

        // And one more leftward frame pulls it back inside
        tick(&mut world, &TickInput { steer: -1.0 });
        assert_eq!(world.player.pos.x, WIDTH + world.player.radius - HORIZONTAL_SPEED);
    }

    #[test]
    fn test_wrap_right_to_left() {
        let mut world = empty_world(3);
        world.player.pos = Vec2::new(WIDTH + 12.0, 200.0);

        tick(&mut world, &TickInput { steer: 1.0 });

        assert_eq!(world.player.pos.x, -world.player.radius);
    }

    #[test]
    fn test_gravity_integration() {
        // Below the midpoint so the camera leaves the position alone
        let mut world = empty_world(4);
        world.player.pos = Vec2::new(400.0, 400.0);
        world.player.vel = Vec2::ZERO;

        tick(&mut world, &TickInput::default());

        assert_eq!(world.player.vel.y, GRAVITY);
        assert_eq!(world.player.pos.y, 400.0 + GRAVITY);
    }

    #[test]
    fn test_first_landing_on_start_platform() {
        let mut world = running_world(5);
        // Isolate the landing from incidental star pickups along the fall
        world.stars.clear();

        // Drop straight down; the guaranteed platform catches the fall
        let mut landings = 0;
        for _ in 0..120 {
            let events = tick(&mut world, &TickInput::default());
            landings += events.landings;
            if landings > 0 {
                break;
            }
        }

        assert_eq!(landings, 1);
        assert_eq!(world.score, 1);
        assert_eq!(world.player.vel.y, BOUNCE_VELOCITY);
    }

    #[test]
    fn test_normal_platform_repeat_landings() {
        let mut world = empty_world(6);
        world.player.pos = Vec2::new(400.0, 380.0);
        world
            .platforms
            .push(platform_at(350.0, 400.0, PlatformKind::Normal));

        let mut landings = 0;
        for _ in 0..200 {
            landings += tick(&mut world, &TickInput::default()).landings;
        }

        assert!(landings >= 2, "expected repeated bounces, got {landings}");
        assert_eq!(world.score, landings * LANDING_POINTS);
    }

    #[test]
    fn test_fake_platform_triggers_once() {
        let mut world = empty_world(7);
        world.player.pos = Vec2::new(400.0, 380.0);
        world.player.vel = Vec2::new(0.0, 4.0);
        world
            .platforms
            .push(platform_at(350.0, 400.0, PlatformKind::Fake { used: false }));

        // Fall onto the fake: one bounce, then it is hidden off-screen
        let mut first = TickEvents::default();
        for _ in 0..20 {
            first = tick(&mut world, &TickInput::default());
            if first.landings > 0 {
                break;
            }
        }
        assert_eq!(first.landings, 1);
        assert_eq!(world.score, 1);
        assert_eq!(world.player.vel.y, BOUNCE_VELOCITY);
        assert_eq!(world.platforms[0].kind, PlatformKind::Fake { used: true });
        assert_eq!(world.platforms[0].opacity, 0.0);
        assert_eq!(world.platforms[0].y, HEIGHT + 100.0);

        // Put the used fake back at its old spot and stage a geometrically
        // identical landing: it must not trigger again
        world.platforms[0].y = 400.0;
        world.player.pos = Vec2::new(400.0, 378.0);
        world.player.vel = Vec2::new(0.0, 10.0);

        let second = tick(&mut world, &TickInput::default());
        assert_eq!(second.landings, 0);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_star_collection_is_idempotent() {
        let mut world = empty_world(8);
        world.player.pos = Vec2::new(400.0, 300.0);
        world.player.vel = Vec2::ZERO;
        world.stars.push(Star {
            x: 405.0,
            y: 305.0,
            collected: false,
        });

        let first = tick(&mut world, &TickInput::default());
        assert_eq!(first.stars_collected, 1);
        assert_eq!(world.score, STAR_POINTS);

        // Still hovering in range next frame; no second award
        let second = tick(&mut world, &TickInput::default());
        assert_eq!(second.stars_collected, 0);
        assert_eq!(world.score, STAR_POINTS);
    }

    #[test]
    fn test_scroll_preserves_relative_spacing() {
        let mut world = running_world(9);

        // Rising fast, well above the midpoint after integration
        world.player.pos = Vec2::new(400.0, 250.0);
        world.player.vel = Vec2::new(0.0, -14.0);

        // Keep every platform clear of the bottom so none recycles
        for (i, platform) in world.platforms.iter_mut().enumerate() {
            platform.y = 20.0 * i as f32;
        }
        for (i, star) in world.stars.iter_mut().enumerate() {
            star.y = 20.0 * i as f32;
        }

        let platform_ys: Vec<f32> = world.platforms.iter().map(|p| p.y).collect();
        let star_ys: Vec<f32> = world.stars.iter().map(|s| s.y).collect();
        let max_height = world.player.max_height;

        tick(&mut world, &TickInput::default());

        // y after integration: 250 + (-14 + 0.5) = 236.5; overshoot 63.5
        let diff = HEIGHT / 2.0 - 236.5;
        assert_eq!(world.player.pos.y, HEIGHT / 2.0);
        assert_eq!(world.player.max_height, max_height + diff);
        for (platform, old_y) in world.platforms.iter().zip(&platform_ys) {
            assert_eq!(platform.y, old_y + diff);
        }
        for (star, old_y) in world.stars.iter().zip(&star_ys) {
            assert_eq!(star.y, old_y + diff);
        }
    }

    #[test]
    fn test_descent_never_scrolls() {
        let mut world = running_world(10);
        let platform_ys: Vec<f32> = world.platforms.iter().map(|p| p.y).collect();

        // Below the midpoint and falling: no shift, no recycle
        world.player.pos = Vec2::new(10.0, 400.0);
        world.player.vel = Vec2::new(0.0, 5.0);
        tick(&mut world, &TickInput::default());

        assert_eq!(world.player.max_height, 0.0);
        for (platform, old_y) in world.platforms.iter().zip(&platform_ys) {
            assert_eq!(platform.y, *old_y);
        }
    }

    #[test]
    fn test_pool_cardinality_over_long_climb() {
        let mut world = running_world(11);

        for _ in 0..1000 {
            let events = tick(&mut world, &TickInput::default());
            if let Some(_score) = events.game_over {
                world.acknowledge_game_over();
            }
            assert_eq!(world.platforms.len(), PLATFORM_COUNT);
            assert_eq!(world.stars.len(), PLATFORM_COUNT - 1);
        }
    }

    #[test]
    fn test_fall_through_ends_run_with_zero_score() {
        let mut world = empty_world(12);
        let start_y = world.player.pos.y;

        let mut frames = 0;
        let final_score = loop {
            let events = tick(&mut world, &TickInput::default());
            frames += 1;
            if let Some(score) = events.game_over {
                break score;
            }
            assert!(frames < 1000, "never fell off the bottom");
            // Until the terminal frame the player is still on screen
            assert!(world.player.pos.y <= HEIGHT);
        };

        assert_eq!(final_score, 0);
        assert!(world.player.pos.y > HEIGHT);
        assert!(world.player.pos.y > start_y);
        assert_eq!(world.phase, GamePhase::GameOver { final_score: 0 });

        // Terminal state is inert until acknowledged
        let after = world.player.pos;
        tick(&mut world, &TickInput { steer: 1.0 });
        assert_eq!(world.player.pos, after);
    }

    #[test]
    fn test_dots_pulse_each_frame() {
        let mut world = empty_world(13);
        let phases: Vec<f32> = world.dots.iter().map(|d| d.pulse_phase).collect();

        tick(&mut world, &TickInput::default());

        for (dot, old) in world.dots.iter().zip(&phases) {
            assert_eq!(dot.pulse_phase, old + DOT_PULSE_STEP);
        }
    }
}
