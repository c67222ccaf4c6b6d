//! Landing detection and pickup proximity
//!
//! Landings use a swept "was above, now at-or-below" test against the
//! platform top instead of simple overlap, so a fast-falling player cannot
//! tunnel through a 10px platform and an upward-moving player never bounces
//! off the underside.

use super::state::{Platform, Player, Star};
use crate::consts::STAR_PICKUP_RANGE;

/// Check whether the player lands on a platform this frame
///
/// True iff the previous-frame bottom edge was above the platform top, the
/// current bottom edge is at or below it, the horizontal extents overlap,
/// and the player is moving downward. Kind-specific behavior (fake vs
/// normal) is resolved by the caller.
pub fn platform_landing(player: &Player, platform: &Platform) -> bool {
    let prev_bottom = player.pos.y - player.vel.y + player.radius;
    let was_above = prev_bottom <= platform.y;
    let is_below = player.bottom() >= platform.y;
    let horizontal = player.pos.x + player.radius > platform.x
        && player.pos.x - player.radius < platform.x + platform.width;

    was_above && is_below && horizontal && player.vel.y > 0.0
}

/// Check whether an uncollected star is within pickup range of the player
pub fn star_in_reach(player: &Player, star: &Star) -> bool {
    !star.collected
        && (player.pos.x - star.x).abs() < STAR_PICKUP_RANGE
        && (player.pos.y - star.y).abs() < STAR_PICKUP_RANGE
}
