//! Combat Resolver
//!
//! - weapon: hitscan лазер игрока (rate limit, nearest hit, kills, respawn)
//! - projectile: снаряды goblin (полёт, попадание в игрока)
//! - damage: единая точка применения урона к игроку (immortality, game over)

use bevy::prelude::*;

pub mod damage;
pub mod projectile;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

pub use damage::*;
pub use projectile::*;
pub use weapon::*;

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. fire_weapon: выстрел игрока, урон врагам, kills
/// 2. update_projectiles: снаряды goblin → PlayerDamaged
/// 3. process_player_damage: все PlayerDamaged тика (melee, axe, снаряды)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerDamaged>()
            .add_event::<EnemyKilled>()
            .add_systems(
                Update,
                (fire_weapon, update_projectiles, process_player_damage)
                    .chain()
                    .in_set(SimulationSet::Combat),
            );
    }
}
