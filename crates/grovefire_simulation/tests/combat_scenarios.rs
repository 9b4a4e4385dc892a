//! Сценарии боя end-to-end через `App::update()`
//!
//! Игрок в (0, 2, 10) смотрит в -Z, goblin ставится в начало координат.

mod common;

use bevy::prelude::*;
use common::*;

use grovefire_simulation::combat::LaserEffect;
use grovefire_simulation::schedule::{ScheduledAction, TimedEvents};
use grovefire_simulation::spawning::{health_pack_bundle, troll_bundle};
use grovefire_simulation::{
    registry_counts, CameraShake, DamageFlash, Enemy, GameConfig, GameOver, GamePhase, Health, HudState, Player,
    Score,
};

fn player_health(app: &mut App) -> u32 {
    let mut query = app.world_mut().query_filtered::<&Health, With<Player>>();
    query.single(app.world()).map(|health| health.current).unwrap_or(0)
}

fn player_score(app: &mut App) -> u32 {
    let mut query = app.world_mut().query_filtered::<&Score, With<Player>>();
    query.single(app.world()).map(|score| score.points).unwrap_or(0)
}

fn set_player_health(app: &mut App, current: u32) {
    let mut query = app.world_mut().query_filtered::<&mut Health, With<Player>>();
    if let Ok(mut health) = query.single_mut(app.world_mut()) {
        health.current = current;
    }
}

fn pending_goblin_spawns(app: &App) -> usize {
    app.world()
        .resource::<TimedEvents>()
        .count_matching(|action| matches!(action, ScheduledAction::SpawnGoblin { .. }))
}

#[test]
fn test_two_laser_hits_kill_goblin_and_schedule_replacement() {
    let mut config = scenario_config();
    config.player.immortality_ms = 60_000.0;
    let mut app = scenario_app(11, config);
    start_game(&mut app);
    let goblin = spawn_goblin(&mut app, Vec3::ZERO);

    // Первый выстрел: 50 → 25, goblin жив, очков нет
    tap_fire(&mut app);
    assert_eq!(app.world().get::<Health>(goblin).map(|h| h.current), Some(25));
    assert!(app.world().get::<Enemy>(goblin).is_some_and(|enemy| enemy.alive));
    assert_eq!(player_score(&mut app), 0);

    // Повтор через 16ms отбрасывается rate limit'ом
    tap_fire(&mut app);
    assert_eq!(app.world().get::<Health>(goblin).map(|h| h.current), Some(25));

    run_for_ms(&mut app, 200);
    tap_fire(&mut app);

    // Второй выстрел: goblin убит и убран из registry в том же тике
    assert!(app.world().get_entity(goblin).is_err());
    assert_eq!(player_score(&mut app), 100);
    assert_eq!(registry_counts(app.world_mut()).goblins, 0);
    assert_eq!(pending_goblin_spawns(&app), 1);

    run_for_ms(&mut app, 3100);
    assert_eq!(registry_counts(app.world_mut()).goblins, 1);
    assert_eq!(pending_goblin_spawns(&app), 0);
}

#[test]
fn test_projectile_hit_deals_twenty_damage() {
    let mut config = scenario_config();
    config.player.immortality_ms = 0.0;
    let mut app = scenario_app(5, config);
    start_game(&mut app);
    spawn_goblin(&mut app, Vec3::ZERO);

    // Goblin в 10 единицах сразу стреляет; снаряд летит ~0.7s
    let mut ticks = 0;
    while player_health(&mut app) == 100 && ticks < 150 {
        app.update();
        ticks += 1;
    }

    assert_eq!(player_health(&mut app), 80);
    assert_eq!(*app.world().resource::<GamePhase>(), GamePhase::Running);
    assert!(app.world().resource::<DamageFlash>().is_active());
}

#[test]
fn test_immortal_player_ignores_projectiles() {
    let mut config = scenario_config();
    config.player.immortality_ms = 60_000.0;
    let mut app = scenario_app(5, config);
    start_game(&mut app);
    spawn_goblin(&mut app, Vec3::ZERO);

    run_for_ms(&mut app, 1500);

    assert_eq!(player_health(&mut app), 100);
    assert!(!app.world().resource::<DamageFlash>().is_active());
}

#[test]
fn test_game_over_stops_gameplay() {
    let mut config = scenario_config();
    config.player.immortality_ms = 0.0;
    config.player.max_health = 20;
    let mut app = scenario_app(9, config);
    start_game(&mut app);
    let goblin = spawn_goblin(&mut app, Vec3::ZERO);

    let mut ticks = 0;
    while !app.world().resource::<GamePhase>().is_over() && ticks < 150 {
        app.update();
        ticks += 1;
    }

    assert_eq!(*app.world().resource::<GamePhase>(), GamePhase::Over { final_score: 0 });
    assert_eq!(player_health(&mut app), 0);
    assert!(!app.world().resource::<Events<GameOver>>().is_empty());

    // Дальше AI / бой / таймеры spawn не действуют
    let frozen = app.world().get::<Transform>(goblin).map(|t| t.translation);
    let projectiles = registry_counts(app.world_mut()).projectiles;
    tap_fire(&mut app);
    run_for_ms(&mut app, 1000);

    assert_eq!(app.world().get::<Transform>(goblin).map(|t| t.translation), frozen);
    assert_eq!(app.world().get::<Health>(goblin).map(|h| h.current), Some(50));
    assert_eq!(registry_counts(app.world_mut()).projectiles, projectiles);
    assert_eq!(player_health(&mut app), 0);

    let hud = *app.world().resource::<HudState>();
    assert!(hud.game_over);
    assert_eq!(hud.final_score, Some(0));
}

#[test]
fn test_laser_effects_discarded_after_lifetime() {
    let mut app = scenario_app(3, scenario_config());
    start_game(&mut app);

    // Промах: луч на max_range + impact marker
    tap_fire(&mut app);
    let mut effects = app.world_mut().query_filtered::<Entity, With<LaserEffect>>();
    assert_eq!(effects.iter(app.world()).count(), 2);

    run_for_ms(&mut app, 200);
    assert_eq!(effects.iter(app.world()).count(), 0);
}

#[test]
fn test_goblin_touching_muzzle_still_takes_hit() {
    let mut config = scenario_config();
    config.player.immortality_ms = 60_000.0;
    let mut app = scenario_app(13, config);
    start_game(&mut app);

    // Box goblin z 7.9..9.1, дуло на z 8.8: выстрел из внутренней точки
    let goblin = spawn_goblin(&mut app, Vec3::new(0.0, 0.0, 8.5));
    hold_position(&mut app, goblin);
    tap_fire(&mut app);

    assert_eq!(app.world().get::<Health>(goblin).map(|h| h.current), Some(25));
}

#[test]
fn test_seven_hits_kill_troll_without_goblin_respawn() {
    let mut config = scenario_config();
    config.player.immortality_ms = 60_000.0;
    let mut app = scenario_app(17, config);
    start_game(&mut app);

    // Низ box troll на 2.3: смотрим чуть вверх (pitch 0.2 rad)
    look_vertical(&mut app, -100.0);
    let troll = spawn_grounded_troll(&mut app, Vec2::ZERO);
    hold_position(&mut app, troll);
    run_for_ms(&mut app, 100);

    for _ in 0..6 {
        tap_fire(&mut app);
        run_for_ms(&mut app, 200);
    }
    assert_eq!(app.world().get::<Health>(troll).map(|h| h.current), Some(10));
    assert_eq!(player_score(&mut app), 0);

    tap_fire(&mut app);

    assert!(app.world().get_entity(troll).is_err());
    assert_eq!(player_score(&mut app), 300);
    assert_eq!(registry_counts(app.world_mut()).trolls, 0);
    assert_eq!(pending_goblin_spawns(&app), 0);
}

#[test]
fn test_troll_landing_shakes_ground_once() {
    let mut app = scenario_app(19, scenario_config());
    start_game(&mut app);

    let config = app.world().resource::<GameConfig>().clone();
    let troll = app.world_mut().spawn(troll_bundle(&config, Vec2::new(20.0, 0.0))).id();

    let mut ticks = 0;
    while !app.world().get::<Enemy>(troll).is_some_and(|enemy| enemy.is_grounded()) && ticks < 400 {
        app.update();
        ticks += 1;
    }
    assert!(ticks < 400, "troll never landed");
    assert_eq!(app.world().get::<Transform>(troll).map(|t| t.translation.y), Some(2.5));

    // Тряска применена и уже один тик отработала: 0.5 × 0.95, 1000 - 16
    let landed = *app.world().resource::<CameraShake>();
    assert!((landed.intensity - 0.475).abs() < 1e-4, "intensity = {}", landed.intensity);
    assert!((landed.remaining_ms - 984.0).abs() < 0.01, "remaining = {}", landed.remaining_ms);

    run_for_ms(&mut app, 160);
    let later = *app.world().resource::<CameraShake>();
    assert!((later.remaining_ms - 824.0).abs() < 0.1, "remaining = {}", later.remaining_ms);
    assert!(later.intensity < landed.intensity);
}

#[test]
fn test_troll_axe_overwrites_active_shake() {
    let mut config = scenario_config();
    config.player.immortality_ms = 0.0;
    let mut app = scenario_app(23, config);
    start_game(&mut app);

    {
        let mut shake = app.world_mut().resource_mut::<CameraShake>();
        shake.intensity = 0.5;
        shake.remaining_ms = 1000.0;
    }

    // Troll в ~3 единицах от глаз игрока (0, 1.8, 10)
    let troll = spawn_grounded_troll(&mut app, Vec2::new(0.0, 7.0));
    hold_position(&mut app, troll);
    app.update();

    assert_eq!(player_health(&mut app), 70);
    let shake = *app.world().resource::<CameraShake>();
    assert!((shake.intensity - 0.285).abs() < 1e-4, "intensity = {}", shake.intensity);
    assert!((shake.remaining_ms - 484.0).abs() < 0.01, "remaining = {}", shake.remaining_ms);

    // Cooldown 3000ms
    run_for_ms(&mut app, 1000);
    assert_eq!(player_health(&mut app), 70);
    run_for_ms(&mut app, 2100);
    assert_eq!(player_health(&mut app), 40);
}

#[test]
fn test_goblin_melee_hurts_every_tick() {
    let mut config = scenario_config();
    config.player.immortality_ms = 0.0;
    // Без снарядов: только contact damage
    config.goblin.ranged_range = 0.0;
    let mut app = scenario_app(29, config);
    start_game(&mut app);

    let goblin = spawn_goblin(&mut app, Vec3::new(0.0, 0.5, 10.0));
    hold_position(&mut app, goblin);

    app.update();
    assert_eq!(player_health(&mut app), 95);

    for _ in 0..3 {
        app.update();
    }
    assert_eq!(player_health(&mut app), 80);
    assert_eq!(registry_counts(app.world_mut()).projectiles, 0);
}

#[test]
fn test_health_pack_expires_after_ttl() {
    let mut config = scenario_config();
    config.spawn.pack_first_ms = 100.0;
    config.spawn.pack_interval_ms = [1.0e9, 1.0e9];
    config.spawn.pack_ttl_ms = 1000.0;
    // Игрок не подбирает аптечку
    config.health_pack.pickup_radius = 0.0;
    let mut app = scenario_app(31, config);
    start_game(&mut app);

    run_for_ms(&mut app, 200);
    assert_eq!(registry_counts(app.world_mut()).health_packs, 1);

    run_for_ms(&mut app, 600);
    assert_eq!(registry_counts(app.world_mut()).health_packs, 1);

    run_for_ms(&mut app, 500);
    assert_eq!(registry_counts(app.world_mut()).health_packs, 0);
}

#[test]
fn test_walking_into_health_pack_heals_and_removes_it() {
    let mut app = scenario_app(37, scenario_config());
    start_game(&mut app);
    set_player_health(&mut app, 50);

    let config = app.world().resource::<GameConfig>().clone();
    let near = app.world_mut().spawn(health_pack_bundle(&config, Vec2::new(0.0, 10.0))).id();
    let far = app.world_mut().spawn(health_pack_bundle(&config, Vec2::new(0.0, -20.0))).id();
    app.update();

    // +floor(100 × 0.1)
    assert_eq!(player_health(&mut app), 60);
    assert!(app.world().get_entity(near).is_err());
    assert!(app.world().get_entity(far).is_ok());
    assert_eq!(registry_counts(app.world_mut()).health_packs, 1);
}
