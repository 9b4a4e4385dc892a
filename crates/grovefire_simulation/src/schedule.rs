//! Timed events: отложенные действия `{fire_at, action, precondition}`
//!
//! Вместо host callback scheduler: явный список, который опрашивается
//! каждый тик (Timers set). Precondition проверяется в момент срабатывания,
//! поэтому устаревший таймер (игра не началась / уже закончилась)
//! переназначается или отбрасывается, а не действует на старом состоянии.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::LaserEffect;
use crate::components::HealthPack;
use crate::config::GameConfig;
use crate::game_state::GamePhase;
use crate::spawning::{goblin_bundle, goblin_position, health_pack_bundle, square_position, troll_bundle};
use crate::{elapsed_ms, DeterministicRng, SimulationSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledAction {
    SpawnGoblin { outward_bias: f32 },
    SpawnTroll,
    SpawnHealthPack,
    ExpireHealthPack(Entity),
    DiscardEffect(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precondition {
    /// Косметика и уборка: срабатывает в любой фазе
    Always,
    /// Только в Running. До старта: retry через `retry_after_ms` (или drop),
    /// после game over: drop.
    GameRunning { retry_after_ms: Option<f64> },
}

/// Решение в момент срабатывания
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    Fire,
    Reschedule(f64),
    Drop,
}

impl Precondition {
    pub fn evaluate(&self, phase: GamePhase) -> Gate {
        match (self, phase) {
            (Precondition::Always, _) => Gate::Fire,
            (Precondition::GameRunning { .. }, GamePhase::Running) => Gate::Fire,
            (Precondition::GameRunning { retry_after_ms }, GamePhase::NotStarted) => {
                retry_after_ms.map_or(Gate::Drop, Gate::Reschedule)
            }
            (Precondition::GameRunning { .. }, GamePhase::Over { .. }) => Gate::Drop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub fire_at_ms: f64,
    pub action: ScheduledAction,
    pub precondition: Precondition,
}

#[derive(Resource, Debug, Default)]
pub struct TimedEvents {
    pending: Vec<ScheduledEvent>,
}

impl TimedEvents {
    pub fn schedule(&mut self, fire_at_ms: f64, action: ScheduledAction, precondition: Precondition) {
        self.pending.push(ScheduledEvent {
            fire_at_ms,
            action,
            precondition,
        });
    }

    pub fn schedule_in(&mut self, now_ms: f64, delay_ms: f64, action: ScheduledAction, precondition: Precondition) {
        self.schedule(now_ms + delay_ms, action, precondition);
    }

    /// Забирает все события с `fire_at_ms <= now`, сохраняя порядок добавления
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledEvent> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|event| event.fire_at_ms <= now_ms);
        self.pending = pending;
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.pending.iter()
    }

    pub fn count_matching(&self, predicate: impl Fn(&ScheduledAction) -> bool) -> usize {
        self.pending.iter().filter(|event| predicate(&event.action)).count()
    }
}

/// System: выполняет созревшие timed events
///
/// Периодические spawns (troll, аптечка) сами назначают следующий запуск.
pub fn run_timed_events(
    mut commands: Commands,
    mut timers: ResMut<TimedEvents>,
    mut rng: ResMut<DeterministicRng>,
    phase: Res<GamePhase>,
    config: Res<GameConfig>,
    time: Res<Time>,
    packs: Query<(), With<HealthPack>>,
    effects: Query<(), With<LaserEffect>>,
) {
    let now = elapsed_ms(&time);
    let spawn = &config.spawn;

    for event in timers.take_due(now) {
        match event.precondition.evaluate(*phase) {
            Gate::Fire => {}
            Gate::Reschedule(delay) => {
                crate::logger::log(&format!("⏳ {:?} deferred by {:.0}ms (game not started)", event.action, delay));
                timers.schedule_in(now, delay, event.action, event.precondition);
                continue;
            }
            Gate::Drop => {
                crate::logger::log(&format!("🗑️ {:?} dropped (stale timer)", event.action));
                continue;
            }
        }

        match event.action {
            ScheduledAction::SpawnGoblin { outward_bias } => {
                let position = goblin_position(&mut rng.rng, spawn.goblin_spread, outward_bias);
                commands.spawn(goblin_bundle(&config, position));
                crate::logger::log_info(&format!("👺 Goblin respawned at {:.1?}", position));
            }
            ScheduledAction::SpawnTroll => {
                let ground = square_position(&mut rng.rng, spawn.troll_spread);
                commands.spawn(troll_bundle(&config, ground));

                let [min, max] = spawn.troll_interval_ms;
                let next = rng.rng.gen_range(min..=max);
                timers.schedule_in(now, next, ScheduledAction::SpawnTroll, event.precondition);

                crate::logger::log_info(&format!(
                    "👹 Troll incoming at ({:.1}, {:.1}), next in {:.0}ms",
                    ground.x, ground.y, next
                ));
            }
            ScheduledAction::SpawnHealthPack => {
                let ground = square_position(&mut rng.rng, spawn.pack_spread);
                let pack = commands.spawn(health_pack_bundle(&config, ground)).id();
                timers.schedule_in(
                    now,
                    spawn.pack_ttl_ms,
                    ScheduledAction::ExpireHealthPack(pack),
                    Precondition::Always,
                );

                let [min, max] = spawn.pack_interval_ms;
                let next = rng.rng.gen_range(min..=max);
                timers.schedule_in(now, next, ScheduledAction::SpawnHealthPack, event.precondition);

                crate::logger::log_info(&format!(
                    "➕ Health pack at ({:.1}, {:.1}), next in {:.0}ms",
                    ground.x, ground.y, next
                ));
            }
            ScheduledAction::ExpireHealthPack(pack) => {
                // Уже подобрана: ничего не делаем
                if packs.contains(pack) {
                    commands.entity(pack).despawn();
                    crate::logger::log(&format!("⌛ Health pack {:?} expired", pack));
                }
            }
            ScheduledAction::DiscardEffect(effect) => {
                if effects.contains(effect) {
                    commands.entity(effect).despawn();
                }
            }
        }
    }
}

pub struct TimedEventsPlugin;

impl Plugin for TimedEventsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimedEvents>()
            .add_systems(Update, run_timed_events.in_set(SimulationSet::Timers));
    }
}
