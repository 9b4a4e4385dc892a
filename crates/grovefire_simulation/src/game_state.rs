//! Game lifecycle: NotStarted → Running → Over
//!
//! Over терминален: новая сессия = новый App (как перезагрузка страницы).
//! Gameplay sets (Player, Ai, Combat, Pickups) выполняются только в Running,
//! косметические таймеры и presentation продолжают работать.

use bevy::prelude::*;

use crate::components::{Immortality, Player};
use crate::config::GameConfig;
use crate::input::{ControlScheme, InputState};
use crate::{elapsed_ms, SimulationSet};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Over { final_score: u32 },
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Over { .. })
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameStarted {
    pub at_ms: f64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u32,
}

/// Run condition для gameplay sets
pub fn game_running(phase: Res<GamePhase>) -> bool {
    phase.is_running()
}

/// System: start action (клик / первое касание) → Running + окно неуязвимости
pub fn start_game_on_request(
    mut input: ResMut<InputState>,
    mut phase: ResMut<GamePhase>,
    mut players: Query<&mut Immortality, With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut started: EventWriter<GameStarted>,
) {
    if !input.actions.start || *phase != GamePhase::NotStarted {
        return;
    }

    let now = elapsed_ms(&time);
    *phase = GamePhase::Running;

    for mut immortality in players.iter_mut() {
        immortality.activate(now, config.player.immortality_ms);
    }

    input.pointer_lock_wanted =
        input.scheme == ControlScheme::Desktop && input.capabilities.pointer_lock;

    started.write(GameStarted { at_ms: now });
    crate::logger::log_info(&format!(
        "🎮 Game started at {:.0}ms (immortal for {:.0}ms)",
        now, config.player.immortality_ms
    ));
}

pub struct GameLifecyclePlugin;

impl Plugin for GameLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GamePhase>()
            .add_event::<GameStarted>()
            .add_event::<GameOver>()
            .add_systems(Update, start_game_on_request.in_set(SimulationSet::Lifecycle));
    }
}
