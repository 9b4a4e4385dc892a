//! Player Controller
//!
//! Только в `GamePhase::Running` (до старта контроллер: no-op).
//! Camera shake применяется к рендер-камере в presentation, не к логической позиции.

use bevy::prelude::*;

pub mod collision;
pub mod controller;
pub mod immortality;

pub use collision::*;
pub use controller::*;
pub use immortality::*;

use crate::SimulationSet;

/// Порядок:
/// 1. update_immortality: окно неуязвимости закрывается до damage в этом тике
/// 2. player_control: физика + look
/// 3. player_obstacle_collision: push-back после движения
pub struct PlayerControllerPlugin;

impl Plugin for PlayerControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (update_immortality, player_control, player_obstacle_collision)
                .chain()
                .in_set(SimulationSet::Player),
        );
    }
}
