//! AI & Movement Engine
//!
//! Goblin / troll: seek player, face player, attack cooldowns,
//! падение troll после спавна. Работает только в `GamePhase::Running`.

use bevy::prelude::*;

pub mod systems;

pub use systems::*;

use crate::SimulationSet;

/// AI Plugin
///
/// Порядок выполнения (chained, общий RNG/события в детерминированном порядке):
/// 1. troll_descent: падение / приземление
/// 2. enemy_seek_player: движение к игроку + footsteps
/// 3. goblin_attacks: снаряды + melee contact
/// 4. troll_attacks: удар топором
/// 5. refresh_enemy_bounds: bounding boxes из новой позы
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                troll_descent,
                enemy_seek_player,
                goblin_attacks,
                troll_attacks,
                refresh_enemy_bounds,
            )
                .chain()
                .in_set(SimulationSet::Ai),
        );
    }
}
