//! Raw pointer input to player commands.
//!
//! The engine trusts its inputs, so everything coming from a screen is
//! checked here first.

use log::debug;

use skyshield_core::commands::PlayerCommand;

/// Turn a click at `(x, y)` into a nearest-base launch.
///
/// Non-finite coordinates are rejected. Points outside the play area are
/// clamped onto its edge.
pub fn point_to_command(x: f64, y: f64, width: f64, height: f64) -> Option<PlayerCommand> {
    if !x.is_finite() || !y.is_finite() {
        debug!("Rejected non-finite input point ({x}, {y})");
        return None;
    }

    let clamped_x = x.clamp(0.0, width.max(0.0));
    let clamped_y = y.clamp(0.0, height.max(0.0));
    if clamped_x != x || clamped_y != y {
        debug!("Clamped input point ({x}, {y}) to ({clamped_x}, {clamped_y})");
    }

    Some(PlayerCommand::LaunchAtPoint {
        x: clamped_x,
        y: clamped_y,
    })
}
