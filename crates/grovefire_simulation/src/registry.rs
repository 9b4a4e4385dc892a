//! Entity Registry: живые goblin / troll / снаряды / аптечки
//!
//! Коллекции: это ECS queries. Враги с alive = false не считаются.

use bevy::prelude::*;

use crate::components::{Enemy, EnemyKind, HealthPack, Projectile};

/// Снимок размеров коллекций
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryCounts {
    pub goblins: usize,
    pub trolls: usize,
    pub projectiles: usize,
    pub health_packs: usize,
}

fn count<'a>(enemies: impl Iterator<Item = &'a Enemy>) -> (usize, usize) {
    enemies
        .filter(|enemy| enemy.alive)
        .fold((0, 0), |(goblins, trolls), enemy| match enemy.kind {
            EnemyKind::Goblin => (goblins + 1, trolls),
            EnemyKind::Troll(_) => (goblins, trolls + 1),
        })
}

/// Подсчёт напрямую из World (тесты, headless binary)
pub fn registry_counts(world: &mut World) -> RegistryCounts {
    let mut enemies = world.query::<&Enemy>();
    let (goblins, trolls) = count(enemies.iter(world));

    let mut projectiles = world.query_filtered::<Entity, With<Projectile>>();
    let projectiles = projectiles.iter(world).count();
    let mut packs = world.query_filtered::<Entity, With<HealthPack>>();
    let health_packs = packs.iter(world).count();

    RegistryCounts {
        goblins,
        trolls,
        projectiles,
        health_packs,
    }
}
