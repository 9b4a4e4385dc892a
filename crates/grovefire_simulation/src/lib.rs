//! GROVEFIRE Simulation Core
//!
//! ECS-симуляция first-person combat игры на Bevy 0.16 (headless)
//!
//! World = весь GameState: игрок, враги, снаряды, аптечки, obstacles
//! + resources (фаза игры, input, таймеры, тряска). Один `App::update()` = один кадр:
//!
//! ```text
//! Input → Lifecycle → Timers → Player → Ai → Combat → Pickups → Effects → Presentation
//!                              └──── только GamePhase::Running ────┘
//! ```
//!
//! Рендер и аудио: внешние collaborators за `presentation::RenderBackend` / `AudioSink`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod effects;
pub mod game_state;
pub mod input;
pub mod logger;
pub mod pickups;
pub mod player;
pub mod presentation;
pub mod registry;
pub mod schedule;
pub mod spawning;

// Re-export для удобства
pub use ai::AIPlugin;
pub use combat::{CombatPlugin, DamageSource, EnemyKilled, PlayerDamaged};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use effects::{CameraShake, DamageFlash, EffectsPlugin};
pub use game_state::{game_running, GameLifecyclePlugin, GameOver, GamePhase, GameStarted};
pub use input::{HostCapabilities, HostInput, HostInputPlugin, InputState, TouchTarget};
pub use logger::init_logger;
pub use pickups::PickupsPlugin;
pub use player::PlayerControllerPlugin;
pub use presentation::{
    AudioBridge, AudioSettings, AudioSink, HudState, PresentationPlugin, RenderBackend, RenderBridge, SoundEffect,
    SoundRequested, VisualKind,
};
pub use registry::{registry_counts, RegistryCounts};
pub use schedule::{TimedEvents, TimedEventsPlugin};
pub use spawning::SpawnerPlugin;

/// Порядок подсистем внутри кадра (chained)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// HostInput → InputState
    Input,
    /// NotStarted → Running
    Lifecycle,
    /// Timed events (spawns, expiry, уборка эффектов)
    Timers,
    Player,
    Ai,
    Combat,
    Pickups,
    /// Camera shake, damage flash
    Effects,
    /// Game state → render / audio / HUD
    Presentation,
}

/// Время с начала симуляции в миллисекундах (монотонное, из `Time<Virtual>`)
pub fn elapsed_ms(time: &Time) -> f64 {
    time.elapsed_secs_f64() * 1000.0
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.init_resource::<GameConfig>();
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Lifecycle,
                SimulationSet::Timers,
                SimulationSet::Player.run_if(game_running),
                SimulationSet::Ai.run_if(game_running),
                SimulationSet::Combat.run_if(game_running),
                SimulationSet::Pickups.run_if(game_running),
                SimulationSet::Effects,
                SimulationSet::Presentation,
            )
                .chain(),
        )
        .add_plugins((
            GameLifecyclePlugin,
            HostInputPlugin,
            TimedEventsPlugin,
            SpawnerPlugin,
            PlayerControllerPlugin,
            AIPlugin,
            CombatPlugin,
            PickupsPlugin,
            EffectsPlugin,
            PresentationPlugin,
        ));
    }
}

/// Единственный источник случайности симуляции.
///
/// Позиции spawn, интервалы troll и аптечек, jitter тряски: всё из одного
/// ChaCha8 потока, так что один seed воспроизводит всю сессию.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (реальное время кадра)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Headless App с фиксированным шагом времени на каждый `update()`
///
/// `Time<Virtual>` ограничивает delta 250ms: шаг больше будет обрезан.
pub fn create_stepped_app(seed: u64, step: Duration) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app
}

/// Байтовый отпечаток всех `T` в мире, по порядку entity.
///
/// Две сессии с одним seed и одним вводом дают одинаковые отпечатки
/// (`Enemy`, `Transform`, `Obstacle` в determinism тестах).
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut rows: Vec<(Entity, &T)> = query.iter(world).collect();
    rows.sort_unstable_by_key(|(entity, _)| (entity.index(), entity.generation()));

    rows.into_iter().fold(Vec::new(), |mut bytes, (entity, component)| {
        bytes.extend_from_slice(&entity.index().to_le_bytes());
        bytes.extend_from_slice(format!("{component:?};").as_bytes());
        bytes
    })
}
