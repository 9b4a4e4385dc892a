//! Общие helpers для сценарных тестов (headless App, фиксированный шаг 16ms)

#![allow(dead_code)]

use bevy::prelude::*;
use std::time::Duration;

use grovefire_simulation::config::WorldConfig;
use grovefire_simulation::spawning::{goblin_bundle, troll_bundle};
use grovefire_simulation::{create_stepped_app, Enemy, EnemyKind, GameConfig, HostInput, TrollDescent};

pub const STEP_MS: u64 = 16;

/// Пустая сцена: без obstacles, без стартовых goblin, troll и аптечки не приходят
pub fn scenario_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.world = WorldConfig::empty();
    config.spawn.initial_goblins = 0;
    config.spawn.troll_first_ms = 1.0e9;
    config.spawn.pack_first_ms = 1.0e9;
    config
}

/// App после Startup (первый update), игра ещё не начата
pub fn scenario_app(seed: u64, config: GameConfig) -> App {
    let mut app = create_stepped_app(seed, Duration::from_millis(STEP_MS));
    app.insert_resource(config);
    app.update();
    app
}

pub fn send(app: &mut App, event: HostInput) {
    app.world_mut().send_event(event);
}

/// Click в NotStarted → Running
pub fn start_game(app: &mut App) {
    send(app, HostInput::Click);
    app.update();
}

/// Короткое нажатие Space (одно edge-triggered действие fire)
pub fn tap_fire(app: &mut App) {
    send(app, HostInput::key_down("Space"));
    send(app, HostInput::key_up("Space"));
    app.update();
}

pub fn run_for_ms(app: &mut App, ms: u64) {
    for _ in 0..ms.div_ceil(STEP_MS) {
        app.update();
    }
}

pub fn spawn_goblin(app: &mut App, position: Vec3) -> Entity {
    let config = app.world().resource::<GameConfig>().clone();
    app.world_mut().spawn(goblin_bundle(&config, position)).id()
}

/// Troll уже на земле (ground_height), без фазы падения
pub fn spawn_grounded_troll(app: &mut App, ground: Vec2) -> Entity {
    let config = app.world().resource::<GameConfig>().clone();
    let mut troll = app.world_mut().spawn(troll_bundle(&config, ground));
    if let Some(mut transform) = troll.get_mut::<Transform>() {
        transform.translation.y = config.troll.ground_height;
    }
    if let Some(mut enemy) = troll.get_mut::<Enemy>() {
        enemy.kind = EnemyKind::Troll(TrollDescent { falling: false, fall_speed: 0.0, landed: true });
    }
    troll.id()
}

/// Враг стоит на месте (speed 0), атаки не меняются
pub fn hold_position(app: &mut App, entity: Entity) {
    if let Some(mut enemy) = app.world_mut().get_mut::<Enemy>(entity) {
        enemy.speed = 0.0;
    }
}

/// Pointer lock + вертикальный поворот взгляда (dy < 0: вверх)
pub fn look_vertical(app: &mut App, dy: f32) {
    send(app, HostInput::PointerLockChanged { locked: true });
    send(app, HostInput::PointerMotion { dx: 0.0, dy });
    app.update();
}
