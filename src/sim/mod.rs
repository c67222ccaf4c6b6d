//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per displayed frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{platform_landing, star_in_reach};
pub use state::{CalmDot, GamePhase, Platform, PlatformKind, Player, Star, World};
pub use tick::{TickEvents, TickInput, tick};
pub use world::{spawn_calm_dots, spawn_platforms};
