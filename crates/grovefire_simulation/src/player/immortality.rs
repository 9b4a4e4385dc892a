//! Окно неуязвимости + мигание оружия.

use bevy::prelude::*;
use std::f64::consts::TAU;
use crate::components::{Immortality, LaserWeapon, Player};
use crate::config::GameConfig;
use crate::elapsed_ms;

/// Opacity оружия во время неуязвимости: колеблется между min и 1.0
pub fn blink_opacity(elapsed_ms: f64, period_ms: f64, min_opacity: f32) -> f32 {
    let wave = 0.5 + 0.5 * (TAU * elapsed_ms / period_ms).cos();
    min_opacity + (1.0 - min_opacity) * wave as f32
}

/// System: мигание и завершение окна неуязвимости
///
/// Окончание атомарно: в том же тике active = false и opacity = 1.0.
pub fn update_immortality(
    mut players: Query<(&mut Immortality, &mut LaserWeapon), With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let now = elapsed_ms(&time);
    let settings = &config.player;

    for (mut immortality, mut weapon) in players.iter_mut() {
        if !immortality.active {
            continue;
        }

        if immortality.expired(now) {
            immortality.active = false;
            weapon.opacity = 1.0;
            crate::logger::log_info("🛡️ Immortality ended");
        } else {
            weapon.opacity = blink_opacity(
                immortality.elapsed_ms(now),
                settings.blink_period_ms,
                settings.blink_min_opacity,
            );
        }
    }
}
