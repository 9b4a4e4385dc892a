//! AI movement systems (seek + face player).

use bevy::prelude::*;
use crate::components::{BoundingBox, Enemy, EnemyKind, Player};
use crate::config::{vec3, GameConfig};
use crate::elapsed_ms;
use crate::presentation::{SoundEffect, SoundRequested};

/// Горизонтальный единичный вектор от `from` к `to` (Vec3::ZERO если совпадают по XZ)
pub fn seek_direction(from: Vec3, to: Vec3) -> Vec3 {
    let mut direction = to - from;
    direction.y = 0.0;
    direction.normalize_or_zero()
}

/// Поворот вокруг Y, при котором локальный +Z смотрит на цель
pub fn facing_rotation(from: Vec3, to: Vec3) -> Quat {
    let delta = to - from;
    if delta.x == 0.0 && delta.z == 0.0 {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(delta.x.atan2(delta.z))
}

/// System: goblin и приземлившиеся troll идут к игроку
///
/// Footstep sound rate-limited per enemy (goblin 800ms, troll 1200ms).
pub fn enemy_seek_player(
    mut enemies: Query<(&mut Enemy, &mut Transform), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    time: Res<Time>,
    mut sounds: EventWriter<SoundRequested>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation;
    let now = elapsed_ms(&time);
    let delta = time.delta_secs();

    for (mut enemy, mut transform) in enemies.iter_mut() {
        if !enemy.alive || !enemy.is_grounded() {
            continue;
        }

        let direction = seek_direction(transform.translation, target);
        transform.translation += direction * enemy.speed * delta;
        transform.rotation = facing_rotation(transform.translation, target);

        if enemy.take_footstep(now) {
            let step = match enemy.kind {
                EnemyKind::Goblin => SoundEffect::GoblinStep,
                EnemyKind::Troll(_) => SoundEffect::TrollStep,
            };
            sounds.write(SoundRequested(step));
        }
    }
}

/// System: bounding box каждого врага из текущей позы (для hitscan)
pub fn refresh_enemy_bounds(
    mut enemies: Query<(&Enemy, &Transform, &mut BoundingBox), Changed<Transform>>,
    config: Res<GameConfig>,
) {
    for (enemy, transform, mut bounds) in enemies.iter_mut() {
        let stats = enemy.kind.stats(&config);
        *bounds = BoundingBox::posed(
            transform.translation,
            transform.rotation,
            vec3(stats.bounds_center),
            vec3(stats.bounds_half_extents),
        );
    }
}
