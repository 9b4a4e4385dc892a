//! Spawner: стартовая сцена + bundles для timed spawns
//!
//! Startup: игрок, начальная волна goblin, obstacles, первые таймеры troll/аптечек.
//! Дальше всё появляется только через `TimedEvents` (см. schedule.rs).

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::components::{
    BoundingBox, Enemy, Health, HealthPack, Obstacle, ObstacleKind, Player, PlayerBody, Score,
};
use crate::config::{vec3, GameConfig, WorldConfig};
use crate::presentation::VisualKind;
use crate::schedule::{Precondition, ScheduledAction, TimedEvents};
use crate::{elapsed_ms, DeterministicRng};

/// Случайная координата в [-spread, spread], сдвинутая на ±bias от центра карты
pub fn biased_coordinate(rng: &mut ChaCha8Rng, spread: f32, bias: f32) -> f32 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    rng.gen_range(-spread..=spread) + sign * bias
}

/// Точка на земле для goblin (каждая ось смещена наружу независимо)
pub fn goblin_position(rng: &mut ChaCha8Rng, spread: f32, bias: f32) -> Vec3 {
    let x = biased_coordinate(rng, spread, bias);
    let z = biased_coordinate(rng, spread, bias);
    Vec3::new(x, 0.0, z)
}

/// Равномерная точка (x, z) в [-spread, spread]²
pub fn square_position(rng: &mut ChaCha8Rng, spread: f32) -> Vec2 {
    Vec2::new(rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread))
}

pub fn goblin_bundle(config: &GameConfig, position: Vec3) -> impl Bundle {
    let stats = &config.goblin.stats;
    (
        Enemy::goblin(stats),
        Health::new(stats.max_health),
        Transform::from_translation(position),
        BoundingBox::posed(
            position,
            Quat::IDENTITY,
            vec3(stats.bounds_center),
            vec3(stats.bounds_half_extents),
        ),
        VisualKind::Goblin,
    )
}

/// Troll появляется в воздухе (spawn_height) и падает
pub fn troll_bundle(config: &GameConfig, ground: Vec2) -> impl Bundle {
    let stats = &config.troll.stats;
    let position = Vec3::new(ground.x, config.troll.spawn_height, ground.y);
    (
        Enemy::troll(stats),
        Health::new(stats.max_health),
        Transform::from_translation(position),
        BoundingBox::posed(
            position,
            Quat::IDENTITY,
            vec3(stats.bounds_center),
            vec3(stats.bounds_half_extents),
        ),
        VisualKind::Troll,
    )
}

pub fn health_pack_bundle(config: &GameConfig, ground: Vec2) -> impl Bundle {
    let pack = HealthPack::at(Vec3::new(ground.x, 0.0, ground.y));
    let settings = &config.health_pack;
    let (position, rotation) = pack.pose(settings.hover_height, settings.bob_amplitude);
    (
        pack,
        Transform::from_translation(position).with_rotation(rotation),
        BoundingBox::posed(position, rotation, Vec3::ZERO, vec3(settings.bounds_half_extents)),
        VisualKind::HealthPack,
    )
}

/// Локальный центр и половинные размеры obstacle относительно anchor.
/// Stone задаётся радиусом отдельно.
fn obstacle_shape(kind: ObstacleKind) -> (Vec3, Vec3) {
    match kind {
        // Anchor = центр коробки
        ObstacleKind::Building => (Vec3::ZERO, Vec3::new(10.0, 7.5, 15.0)),
        // Ствол 0..6 + крона (конус r=4) 4..12
        ObstacleKind::Tree => (Vec3::new(0.0, 6.0, 0.0), Vec3::new(4.0, 6.0, 4.0)),
        ObstacleKind::Car => (Vec3::new(0.0, 1.4, 0.0), Vec3::new(2.15, 1.4, 4.0)),
        // Ножка 0..2 + шляпка (r=1.5) вокруг y=2.5
        ObstacleKind::Mushroom => (Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.5, 2.0, 1.5)),
        ObstacleKind::Stone => (Vec3::ZERO, Vec3::ONE),
    }
}

pub fn obstacle_bundle(kind: ObstacleKind, anchor: Vec3, rotation: Quat, scale: f32) -> impl Bundle {
    let (local_center, half_extents) = obstacle_shape(kind);
    (
        Obstacle { kind },
        Transform::from_translation(anchor).with_rotation(rotation),
        BoundingBox::posed(anchor, rotation, local_center, half_extents * scale),
        VisualKind::Obstacle(kind),
    )
}

/// Расставляет статичную сцену. Возвращает количество obstacles.
pub fn spawn_obstacles(commands: &mut Commands, rng: &mut ChaCha8Rng, world: &WorldConfig) -> usize {
    let mut count = 0;

    if world.building {
        commands.spawn(obstacle_bundle(
            ObstacleKind::Building,
            Vec3::new(0.0, 7.5, -20.0),
            Quat::IDENTITY,
            1.0,
        ));
        count += 1;
    }

    let scattered = [
        (ObstacleKind::Tree, world.trees, world.tree_spread),
        (ObstacleKind::Car, world.cars, world.car_spread),
        (ObstacleKind::Mushroom, world.mushrooms, world.mushroom_spread),
        (ObstacleKind::Stone, world.stones, world.stone_spread),
    ];

    for (kind, amount, spread) in scattered {
        for _ in 0..amount {
            let ground = square_position(rng, spread);
            let bundle = match kind {
                ObstacleKind::Car => {
                    let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
                    obstacle_bundle(kind, Vec3::new(ground.x, 0.0, ground.y), Quat::from_rotation_y(yaw), 1.0)
                }
                ObstacleKind::Stone => {
                    let radius = rng.gen_range(0.5..1.5);
                    obstacle_bundle(kind, Vec3::new(ground.x, 1.0, ground.y), Quat::IDENTITY, radius)
                }
                _ => obstacle_bundle(kind, Vec3::new(ground.x, 0.0, ground.y), Quat::IDENTITY, 1.0),
            };
            commands.spawn(bundle);
            count += 1;
        }
    }

    count
}

/// Startup system: вся стартовая сцена
pub fn setup_world(
    mut commands: Commands,
    mut rng: ResMut<DeterministicRng>,
    mut timers: ResMut<TimedEvents>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let now = elapsed_ms(&time);
    let player = &config.player;

    commands.spawn((
        Player,
        PlayerBody::from_config(player),
        Health::new(player.max_health),
        Score::default(),
        Transform::from_translation(vec3(player.start_position)),
    ));

    let spawn = &config.spawn;
    for _ in 0..spawn.initial_goblins {
        let position = goblin_position(&mut rng.rng, spawn.goblin_spread, spawn.goblin_initial_bias);
        commands.spawn(goblin_bundle(&config, position));
    }

    let obstacles = spawn_obstacles(&mut commands, &mut rng.rng, &config.world);

    timers.schedule(
        now + spawn.troll_first_ms,
        ScheduledAction::SpawnTroll,
        Precondition::GameRunning {
            retry_after_ms: Some(spawn.troll_retry_ms),
        },
    );
    timers.schedule(
        now + spawn.pack_first_ms,
        ScheduledAction::SpawnHealthPack,
        Precondition::GameRunning {
            retry_after_ms: Some(spawn.pack_retry_ms),
        },
    );

    crate::logger::log_info(&format!(
        "🌲 World ready: {} goblins, {} obstacles (seed {})",
        spawn.initial_goblins, obstacles, rng.seed
    ));
}

pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::bounding::BoundingVolume;
    use rand::SeedableRng;

    #[test]
    fn test_biased_coordinate_within_widened_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let value = biased_coordinate(&mut rng, 40.0, 20.0);
            assert!((-60.0..=60.0).contains(&value), "value = {}", value);
        }
    }

    #[test]
    fn test_square_position_within_spread() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let p = square_position(&mut rng, 30.0);
            assert!(p.x.abs() <= 30.0 && p.y.abs() <= 30.0);
        }
    }

    #[test]
    fn test_stone_box_scales_with_radius() {
        let (_, half) = obstacle_shape(ObstacleKind::Stone);
        let bounds = BoundingBox::posed(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, Vec3::ZERO, half * 0.75);

        assert!((Vec3::from(bounds.0.half_size()) - Vec3::splat(0.75)).length() < 1e-5);
    }
}
