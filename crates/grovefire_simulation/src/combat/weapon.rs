//! Hitscan laser: ray construction, nearest-hit resolution, kills.

use bevy::math::bounding::RayCast3d;
use bevy::prelude::*;

use crate::combat::EnemyKilled;
use crate::components::{BoundingBox, Enemy, EnemyKind, Health, LaserWeapon, Obstacle, Player, Score};
use crate::config::{vec3, GameConfig};
use crate::elapsed_ms;
use crate::input::InputState;
use crate::presentation::{SoundEffect, SoundRequested, VisualKind};
use crate::schedule::{Precondition, ScheduledAction, TimedEvents};

/// Marker: луч и impact marker (удаляются через timed event)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LaserEffect;

/// Во что попал луч
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Enemy(Entity),
    Environment,
}

/// Дуло и направление выстрела (offset дула в локальных координатах камеры)
pub fn muzzle(view: &Transform, muzzle_offset: Vec3) -> (Vec3, Dir3) {
    let origin = view.translation + view.rotation * muzzle_offset;
    (origin, view.rotation * Dir3::NEG_Z)
}

/// Ближайшее попадание с положительной дистанцией.
///
/// Дистанция 0 не считается попаданием: для obstacles это дуло внутри box.
/// Враги, в которых находится дуло, приходят сюда с дистанцией до выхода.
/// При точном равенстве выигрывает первый найденный.
pub fn closest_hit(candidates: impl IntoIterator<Item = (HitTarget, f32)>) -> Option<(HitTarget, f32)> {
    candidates
        .into_iter()
        .filter(|(_, distance)| *distance > 0.0)
        .fold(None, |best, candidate| match best {
            Some((_, best_distance)) if best_distance <= candidate.1 => best,
            _ => Some(candidate),
        })
}

/// System: выстрел игрока (Space / click / touch fire)
///
/// Rate limit 200ms: лишние запросы отбрасываются без очереди.
pub fn fire_weapon(
    mut commands: Commands,
    input: Res<InputState>,
    mut players: Query<(&Transform, &mut LaserWeapon, &mut Score), With<Player>>,
    mut enemies: Query<(Entity, &mut Enemy, &mut Health, &BoundingBox, &Transform), Without<Player>>,
    obstacles: Query<&BoundingBox, (With<Obstacle>, Without<Enemy>)>,
    mut timers: ResMut<TimedEvents>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut sounds: EventWriter<SoundRequested>,
    mut kills: EventWriter<EnemyKilled>,
) {
    if !input.fire_requested() {
        return;
    }
    let Ok((view, mut weapon, mut score)) = players.single_mut() else {
        return;
    };

    let now = elapsed_ms(&time);
    let settings = &config.weapon;
    if !weapon.try_trigger(now, settings.fire_interval_ms) {
        return;
    }

    let (origin, direction) = muzzle(view, vec3(settings.muzzle_offset));
    let ray = RayCast3d::new(origin, direction, settings.max_range);

    let enemy_hits = enemies
        .iter()
        .filter(|(_, enemy, ..)| enemy.alive)
        .filter_map(|(entity, _, _, bounds, _)| {
            bounds
                .ray_distance_from_inside(origin, direction, settings.max_range)
                .map(|distance| (HitTarget::Enemy(entity), distance))
        });
    let environment_hits = obstacles
        .iter()
        .filter_map(|bounds| bounds.ray_distance(&ray).map(|distance| (HitTarget::Environment, distance)));

    let hit = closest_hit(enemy_hits.chain(environment_hits));

    // Луч рисуется всегда: до точки попадания или на max_range
    let direction = Vec3::from(direction);
    let distance = hit.map_or(settings.max_range, |(_, distance)| distance);
    let impact_point = origin + direction * distance;
    spawn_laser_effects(&mut commands, &mut timers, now, settings.effect_lifetime_ms, origin, direction, distance);
    sounds.write(SoundRequested(SoundEffect::Laser));

    let Some((HitTarget::Enemy(target), _)) = hit else {
        crate::logger::log(&format!(
            "🔫 Laser {:?} at {:.1?} (dist {:.1})",
            hit.map(|(target, _)| target),
            impact_point,
            distance
        ));
        return;
    };
    let Ok((_, mut enemy, mut health, _, transform)) = enemies.get_mut(target) else {
        return;
    };

    let killed = enemy.take_hit(&mut health);
    crate::logger::log(&format!(
        "🎯 {} {:?} hit! Health: {}",
        enemy.kind.label(),
        target,
        health.current
    ));

    if !killed {
        return;
    }

    score.points += enemy.score;
    commands.entity(target).despawn();
    kills.write(EnemyKilled {
        entity: target,
        kind: enemy.kind,
        score_awarded: enemy.score,
        position: transform.translation,
    });

    // Только goblin заменяются; troll приходят по своему таймеру
    if let EnemyKind::Goblin = enemy.kind {
        timers.schedule_in(
            now,
            config.spawn.goblin_respawn_delay_ms,
            ScheduledAction::SpawnGoblin {
                outward_bias: config.spawn.goblin_respawn_bias,
            },
            Precondition::GameRunning { retry_after_ms: None },
        );
    }

    crate::logger::log_info(&format!(
        "💀 {} killed! +{} (score: {})",
        enemy.kind.label(),
        enemy.score,
        score.points
    ));
}

/// Луч (цилиндр вдоль Y, повёрнут по направлению) + marker в точке попадания
fn spawn_laser_effects(
    commands: &mut Commands,
    timers: &mut TimedEvents,
    now: f64,
    lifetime_ms: f64,
    origin: Vec3,
    direction: Vec3,
    length: f32,
) {
    let beam = commands
        .spawn((
            LaserEffect,
            Transform::from_translation(origin + direction * (length * 0.5))
                .with_rotation(Quat::from_rotation_arc(Vec3::Y, direction)),
            VisualKind::LaserBeam { length },
        ))
        .id();
    let impact = commands
        .spawn((
            LaserEffect,
            Transform::from_translation(origin + direction * length),
            VisualKind::ImpactMarker,
        ))
        .id();

    for effect in [beam, impact] {
        timers.schedule_in(now, lifetime_ms, ScheduledAction::DiscardEffect(effect), Precondition::Always);
    }
}
