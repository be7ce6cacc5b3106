//! Camera follow.

use hourglass_core::ecs::{Location, World};
use hourglass_services::Settings;

/// Centre the camera on the player, clamped so the view stays on the map.
pub fn update_camera(world: &mut World, settings: &Settings) {
    let (Some(camera), Some(player)) = (world.camera(), world.player()) else {
        return;
    };
    let Some(target) = world.get::<Location>(player).copied() else {
        return;
    };

    let x = clamp_axis(target.x, settings.screen.width, settings.map.width);
    let y = clamp_axis(target.y, settings.screen.height, settings.map.height);
    if let Some(location) = world.get_mut::<Location>(camera) {
        location.last_x = location.x;
        location.last_y = location.y;
        location.x = x;
        location.y = y;
    }
}

/// Keep a view of `screen` cells centred near `at` inside `[0, map)`.
/// Maps narrower than the screen centre on the map's middle.
fn clamp_axis(at: i32, screen: i32, map: i32) -> i32 {
    let half = screen / 2;
    let low = half;
    let high = map - 1 - half;
    if high < low {
        return (map - 1) / 2;
    }
    at.clamp(low, high)
}
