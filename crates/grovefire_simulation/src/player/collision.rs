//! Push-back из статичных obstacles.

use bevy::prelude::*;
use crate::components::{BoundingBox, Obstacle, Player, PlayerBody};
use crate::config::GameConfig;

/// Выталкивает игрока из каждого пересекающегося obstacle.
///
/// Player box строится один раз до проверок; пересечения складываются
/// (по одному толчку на obstacle за тик). Возвращает число толчков.
pub fn push_out_of_obstacles<'a>(
    position: &mut Vec3,
    player_size: Vec3,
    obstacles: impl IntoIterator<Item = (Vec3, &'a BoundingBox)>,
    push: f32,
) -> usize {
    let player_box = BoundingBox::from_center_size(*position, player_size);
    let mut pushes = 0;

    for (anchor, bounds) in obstacles {
        if !player_box.intersects(bounds) {
            continue;
        }
        let mut away = *position - anchor;
        away.y = 0.0;
        *position += away.normalize_or_zero() * push;
        pushes += 1;
    }

    pushes
}

/// System: коллизия игрока со сценой (после движения)
pub fn player_obstacle_collision(
    mut players: Query<(&PlayerBody, &mut Transform), With<Player>>,
    obstacles: Query<(&Transform, &BoundingBox), (With<Obstacle>, Without<Player>)>,
    config: Res<GameConfig>,
) {
    let settings = &config.player;

    for (body, mut transform) in players.iter_mut() {
        let size = Vec3::new(settings.collider_width, body.height, settings.collider_width);
        push_out_of_obstacles(
            &mut transform.translation,
            size,
            obstacles.iter().map(|(anchor, bounds)| (anchor.translation, bounds)),
            settings.obstacle_push,
        );
    }
}
