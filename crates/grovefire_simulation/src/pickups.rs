//! Health packs: spin + bob, proximity pickup
//!
//! Expiry (30s TTL) живёт в `TimedEvents`, здесь только анимация и сбор.

use bevy::prelude::*;

use crate::components::{BoundingBox, Health, HealthPack, Player};
use crate::config::{vec3, GameConfig};
use crate::presentation::{SoundEffect, SoundRequested};
use crate::SimulationSet;

/// Лечит на floor(max × fraction), не выше max. Возвращает реально добавленное.
pub fn pickup_heal(health: &mut Health, heal_fraction: f32) -> u32 {
    let amount = health.fraction_of_max(heal_fraction);
    health.heal(amount)
}

/// System: phase += spin_rate·dt → поза и bounding box
pub fn animate_health_packs(
    mut packs: Query<(&mut HealthPack, &mut Transform, &mut BoundingBox)>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let settings = &config.health_pack;
    let delta = time.delta_secs();

    for (mut pack, mut transform, mut bounds) in packs.iter_mut() {
        pack.phase += settings.spin_rate * delta;
        let (position, rotation) = pack.pose(settings.hover_height, settings.bob_amplitude);
        transform.translation = position;
        transform.rotation = rotation;
        *bounds = BoundingBox::posed(position, rotation, Vec3::ZERO, vec3(settings.bounds_half_extents));
    }
}

/// System: игрок в радиусе pickup → лечение, звук, despawn
pub fn collect_health_packs(
    mut commands: Commands,
    packs: Query<(Entity, &Transform), With<HealthPack>>,
    mut players: Query<(&Transform, &mut Health), With<Player>>,
    config: Res<GameConfig>,
    mut sounds: EventWriter<SoundRequested>,
) {
    let Ok((player_transform, mut health)) = players.single_mut() else {
        return;
    };
    let radius = config.health_pack.pickup_radius;

    for (entity, transform) in packs.iter() {
        if transform.translation.distance(player_transform.translation) >= radius {
            continue;
        }

        let healed = pickup_heal(&mut health, config.health_pack.heal_fraction);
        commands.entity(entity).despawn();
        sounds.write(SoundRequested(SoundEffect::HealthPickup));

        crate::logger::log_info(&format!(
            "💊 Health pack picked up: +{} ({}/{})",
            healed, health.current, health.max
        ));
    }
}

pub struct PickupsPlugin;

impl Plugin for PickupsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (animate_health_packs, collect_health_packs)
                .chain()
                .in_set(SimulationSet::Pickups),
        );
    }
}
