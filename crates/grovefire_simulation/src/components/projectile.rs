//! Goblin projectile (ranged attack)

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Projectile {
    pub velocity: Vec3,
    /// Секунды до самоуничтожения
    pub lifetime: f32,
    pub damage: u32,
}

/// Итог одного тика полёта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileFate {
    InFlight,
    HitPlayer,
    Expired,
}

impl Projectile {
    /// Двигает снаряд на velocity×dt и проверяет попадание.
    ///
    /// Попадание приоритетнее истечения lifetime в том же тике.
    pub fn step(&mut self, position: &mut Vec3, target: Vec3, hit_radius: f32, dt: f32) -> ProjectileFate {
        *position += self.velocity * dt;
        self.lifetime -= dt;

        if position.distance(target) < hit_radius {
            ProjectileFate::HitPlayer
        } else if self.lifetime <= 0.0 {
            ProjectileFate::Expired
        } else {
            ProjectileFate::InFlight
        }
    }
}
