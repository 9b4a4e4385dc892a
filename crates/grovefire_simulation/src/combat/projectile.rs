//! Goblin projectile simulation.

use bevy::prelude::*;
use crate::combat::{DamageSource, PlayerDamaged};
use crate::components::{Player, Projectile, ProjectileFate};
use crate::config::{GameConfig, GoblinConfig};
use crate::presentation::VisualKind;

pub fn projectile_bundle(origin: Vec3, velocity: Vec3, goblin: &GoblinConfig) -> impl Bundle {
    (
        Projectile {
            velocity,
            lifetime: goblin.projectile_lifetime,
            damage: goblin.projectile_damage,
        },
        Transform::from_translation(origin),
        VisualKind::Projectile,
    )
}

/// System: полёт снарядов, попадание в игрока, истечение lifetime
pub fn update_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut damage: EventWriter<PlayerDamaged>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation;
    let hit_radius = config.goblin.projectile_hit_radius;

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        match projectile.step(&mut transform.translation, target, hit_radius, time.delta_secs()) {
            ProjectileFate::InFlight => {}
            ProjectileFate::HitPlayer => {
                damage.write(PlayerDamaged {
                    amount: projectile.damage,
                    source: DamageSource::Projectile,
                });
                commands.entity(entity).despawn();
            }
            ProjectileFate::Expired => {
                commands.entity(entity).despawn();
            }
        }
    }
}
