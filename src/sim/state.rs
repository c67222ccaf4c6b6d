//! World state and core simulation types
//!
//! Everything the per-frame step mutates lives here, owned by a single
//! `World` value - no module globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::input::DeviceClass;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start overlay
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended; the host shows the final score, then acknowledges
    GameOver { final_score: u32 },
}

/// Platform behavior tag
///
/// Fakes trigger exactly once before recycle; normals bounce forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Normal,
    Fake { used: bool },
}

/// A platform entity
#[derive(Debug, Clone)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
    pub kind: PlatformKind,
    /// 0 or 1; a consumed fake is invisible until recycled
    pub opacity: f32,
}

impl Platform {
    pub fn is_fake(&self) -> bool {
        matches!(self.kind, PlatformKind::Fake { .. })
    }
}

/// A collectible star, paired with a generated platform
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

/// Decorative background dot - no gameplay interaction
#[derive(Debug, Clone)]
pub struct CalmDot {
    pub x: f32,
    pub y: f32,
    pub base_radius: f32,
    pub pulse_phase: f32,
    pub color: [f32; 4],
}

/// The player's bouncing circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cumulative climbed height, accrued by scroll compensation
    pub max_height: f32,
}

impl Player {
    /// Place the player at the canonical start position for a canvas
    pub fn at_start(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width / 2.0, height - PLAYER_START_RISE),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            max_height: 0.0,
        }
    }

    /// Bottom edge of the circle
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Complete game state for one canvas
#[derive(Clone)]
pub struct World {
    /// Canvas dimensions, fixed at load time
    pub width: f32,
    pub height: f32,
    /// Decided once at startup; shapes the platform spawn band
    pub device: DeviceClass,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG used for all generation and recycling
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub stars: Vec<Star>,
    pub dots: Vec<CalmDot>,
    pub score: u32,
}

impl World {
    /// Create a fresh world; entities are populated by `start()`
    pub fn new(width: f32, height: f32, device: DeviceClass, seed: u64) -> Self {
        Self {
            width,
            height,
            device,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            player: Player::at_start(width, height),
            platforms: Vec::with_capacity(PLATFORM_COUNT),
            stars: Vec::with_capacity(PLATFORM_COUNT - 1),
            dots: Vec::with_capacity(CALM_DOT_COUNT),
            score: 0,
        }
    }

    /// Begin a run: regenerate background and world, enter Running
    pub fn start(&mut self) {
        super::world::spawn_calm_dots(self);
        super::world::spawn_platforms(self);
        self.phase = GamePhase::Running;
    }

    /// Dismiss the game-over report and reset for the next run
    ///
    /// Dots are intentionally left alone - the background regenerates only
    /// on `start()`.
    pub fn acknowledge_game_over(&mut self) {
        self.score = 0;
        self.player = Player::at_start(self.width, self.height);
        super::world::spawn_platforms(self);
        self.phase = GamePhase::Running;
    }
}
