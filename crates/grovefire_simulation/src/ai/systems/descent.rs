//! Troll spawn-to-ground transition.

use bevy::prelude::*;
use crate::components::{Enemy, EnemyKind};
use crate::config::GameConfig;
use crate::effects::ShakeRequested;
use crate::presentation::{SoundEffect, SoundRequested};

/// System: падение troll до земли
///
/// Приземление однократно (falling → landed), с тряской земли и звуком.
pub fn troll_descent(
    mut enemies: Query<(Entity, &mut Enemy, &mut Transform)>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut shakes: EventWriter<ShakeRequested>,
    mut sounds: EventWriter<SoundRequested>,
) {
    let troll = &config.troll;
    let delta = time.delta_secs();

    for (entity, mut enemy, mut transform) in enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        let EnemyKind::Troll(descent) = &mut enemy.kind else {
            continue;
        };

        let landed = descent.step(
            &mut transform.translation.y,
            troll.fall_acceleration,
            troll.ground_height,
            delta,
        );

        if landed {
            shakes.write(ShakeRequested::from(troll.landing_shake));
            sounds.write(SoundRequested(SoundEffect::TrollLand));
            crate::logger::log_info(&format!(
                "💥 Troll {:?} landed at ({:.1}, {:.1})",
                entity, transform.translation.x, transform.translation.z
            ));
        }
    }
}
