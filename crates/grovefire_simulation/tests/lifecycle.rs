//! Game lifecycle, timers до старта, environment signals → HUD / audio

mod common;

use bevy::prelude::*;
use common::*;

use grovefire_simulation::schedule::{ScheduledAction, TimedEvents};
use grovefire_simulation::{
    registry_counts, AudioSettings, GamePhase, HostCapabilities, HostInput, HudState, Immortality, Player,
    RenderBridge,
};

fn pending_pack_spawns(app: &App) -> usize {
    app.world()
        .resource::<TimedEvents>()
        .count_matching(|action| matches!(action, ScheduledAction::SpawnHealthPack))
}

#[test]
fn test_spawn_timers_inert_until_start() {
    let mut config = scenario_config();
    config.spawn.pack_first_ms = 100.0;
    config.spawn.pack_retry_ms = 50.0;
    let mut app = scenario_app(21, config);

    run_for_ms(&mut app, 1000);
    assert_eq!(*app.world().resource::<GamePhase>(), GamePhase::NotStarted);
    assert_eq!(registry_counts(app.world_mut()).health_packs, 0);
    // Таймер не потерян: переназначается каждые 50ms
    assert_eq!(pending_pack_spawns(&app), 1);

    start_game(&mut app);
    run_for_ms(&mut app, 100);
    assert_eq!(registry_counts(app.world_mut()).health_packs, 1);
    assert_eq!(pending_pack_spawns(&app), 1);
}

#[test]
fn test_click_starts_game_with_immortality() {
    let mut app = scenario_app(1, scenario_config());

    // Движение до старта: no-op
    let before = {
        let mut query = app.world_mut().query_filtered::<&Transform, With<Player>>();
        query.single(app.world()).map(|t| t.translation).ok()
    };
    send(&mut app, HostInput::key_down("KeyW"));
    run_for_ms(&mut app, 200);
    let mut query = app.world_mut().query_filtered::<(&Transform, &Immortality), With<Player>>();
    let (transform, immortality) = query.single(app.world()).expect("player exists");
    assert_eq!(Some(transform.translation), before);
    assert!(!immortality.active);

    send(&mut app, HostInput::key_up("KeyW"));
    start_game(&mut app);

    assert_eq!(*app.world().resource::<GamePhase>(), GamePhase::Running);
    let hud = *app.world().resource::<HudState>();
    assert!(hud.immortal);
    assert!(hud.pointer_lock_wanted);
    assert_eq!(hud.health, 100);
}

#[test]
fn test_mute_toggle_and_page_hidden() {
    let mut app = scenario_app(1, scenario_config());

    send(&mut app, HostInput::key_down("KeyM"));
    app.update();
    assert!(app.world().resource::<AudioSettings>().muted);

    // Удержание не переключает повторно
    send(&mut app, HostInput::key_down("KeyM"));
    send(&mut app, HostInput::key_up("KeyM"));
    app.update();
    assert!(app.world().resource::<AudioSettings>().muted);

    send(&mut app, HostInput::key_down("KeyM"));
    send(&mut app, HostInput::key_up("KeyM"));
    app.update();
    assert!(!app.world().resource::<AudioSettings>().muted);

    send(&mut app, HostInput::VisibilityChanged { hidden: true });
    app.update();
    assert!(app.world().resource::<HudState>().muted);
}

#[test]
fn test_missing_audio_forces_mute() {
    let mut app = scenario_app(1, scenario_config());

    send(
        &mut app,
        HostInput::Capabilities(HostCapabilities {
            audio: false,
            ..HostCapabilities::default()
        }),
    );
    app.update();
    send(&mut app, HostInput::key_down("KeyM"));
    app.update();

    let hud = *app.world().resource::<HudState>();
    assert!(hud.muted);
    assert!(!hud.audio_supported);
}

#[test]
fn test_portrait_mobile_blocks_orientation() {
    let mut app = scenario_app(1, scenario_config());

    send(
        &mut app,
        HostInput::Capabilities(HostCapabilities {
            mobile: true,
            ..HostCapabilities::default()
        }),
    );
    send(&mut app, HostInput::Resize { width: 400.0, height: 800.0 });
    app.update();
    assert!(app.world().resource::<HudState>().orientation_blocked);

    send(&mut app, HostInput::Resize { width: 800.0, height: 400.0 });
    app.update();
    assert!(!app.world().resource::<HudState>().orientation_blocked);
}

#[test]
fn test_render_bridge_mirrors_visual_entities() {
    let mut app = scenario_app(4, grovefire_simulation::GameConfig::default());

    // 8 goblin + building + 20 деревьев + 5 машин + 15 грибов + 25 камней
    assert_eq!(app.world().resource::<RenderBridge>().visual_count(), 8 + 1 + 20 + 5 + 15 + 25);
    assert_eq!(registry_counts(app.world_mut()).goblins, 8);
}
