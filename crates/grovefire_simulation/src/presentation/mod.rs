//! Presentation bridge: game state → render/audio collaborators
//!
//! Симуляция не вызывает backend напрямую: она вешает `VisualKind`
//! и шлёт `SoundRequested`. Здесь (SimulationSet::Presentation) всё
//! сводится к вызовам `RenderBackend` / `AudioSink`:
//!
//! ```text
//! Added<VisualKind>        → create_visual
//! Changed<Transform>       → set_pose
//! RemovedComponents        → destroy_visual
//! Player + CameraShake     → set_camera
//! SoundRequested (!muted)  → play_effect
//! ```

use bevy::prelude::*;

pub mod backend;

pub use backend::*;

use crate::components::{Health, Immortality, LaserWeapon, Player, Score};
use crate::effects::{CameraShake, DamageFlash};
use crate::game_state::GamePhase;
use crate::input::InputState;
use crate::SimulationSet;

/// Global mute flag (принадлежит ядру, не аудио backend'у)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSettings {
    pub muted: bool,
    /// false → хост без аудио, mute зафиксирован
    pub supported: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            supported: true,
        }
    }
}

/// Снимок для UI collaborator (health, score, end screen, подсказки)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct HudState {
    pub health: u32,
    pub max_health: u32,
    pub score: u32,
    pub muted: bool,
    pub audio_supported: bool,
    pub game_over: bool,
    pub final_score: Option<u32>,
    pub orientation_blocked: bool,
    pub damage_flash: bool,
    pub pointer_lock_wanted: bool,
    pub immortal: bool,
}

/// Камера = логическая поза игрока + jitter тряски (x/y мира)
pub fn camera_pose(view: &Transform, shake: &CameraShake) -> Pose {
    Pose {
        translation: view.translation + shake.offset.extend(0.0),
        rotation: view.rotation,
    }
}

/// System: M toggle, page hidden → mute, нет аудио → mute навсегда
pub fn update_audio_settings(input: Res<InputState>, mut settings: ResMut<AudioSettings>) {
    let supported = input.capabilities.audio;
    let mut muted = settings.muted;

    if !supported || input.page_hidden {
        muted = true;
    } else if input.actions.mute_toggle {
        muted = !muted;
    }

    if settings.supported != supported || settings.muted != muted {
        crate::logger::log_info(&format!(
            "🔇 Audio: muted={} (supported={})",
            muted, supported
        ));
        settings.supported = supported;
        settings.muted = muted;
    }
}

/// System: новые entity с VisualKind → create_visual
pub fn sync_spawned_visuals(
    spawned: Query<(Entity, &VisualKind, &Transform), Added<VisualKind>>,
    mut bridge: ResMut<RenderBridge>,
) {
    for (entity, kind, transform) in spawned.iter() {
        bridge.create(entity, *kind, Pose::from(transform));
    }
}

/// System: изменившиеся позы → set_pose (свежесозданные уже получили позу)
pub fn sync_visual_poses(
    moved: Query<(Entity, Ref<Transform>), With<VisualKind>>,
    mut bridge: ResMut<RenderBridge>,
) {
    for (entity, transform) in moved.iter() {
        if !transform.is_changed() || transform.is_added() {
            continue;
        }
        bridge.set_pose(entity, Pose::from(&*transform));
    }
}

/// System: despawned entity → destroy_visual
pub fn despawn_removed_visuals(
    mut removed: RemovedComponents<VisualKind>,
    mut bridge: ResMut<RenderBridge>,
) {
    for entity in removed.read() {
        bridge.destroy(entity);
    }
}

pub fn sync_camera(
    players: Query<&Transform, With<Player>>,
    shake: Res<CameraShake>,
    mut bridge: ResMut<RenderBridge>,
) {
    let Ok(view) = players.single() else {
        return;
    };
    bridge.backend_mut().set_camera(camera_pose(view, &shake));
}

/// System: blink оружия во время неуязвимости
pub fn sync_weapon_opacity(
    weapons: Query<&LaserWeapon, (With<Player>, Changed<LaserWeapon>)>,
    mut bridge: ResMut<RenderBridge>,
) {
    for weapon in weapons.iter() {
        bridge.backend_mut().set_weapon_opacity(weapon.opacity);
    }
}

/// System: SoundRequested → AudioSink (при mute события просто выбрасываются)
pub fn forward_sounds(
    mut requests: EventReader<SoundRequested>,
    settings: Res<AudioSettings>,
    mut audio: ResMut<AudioBridge>,
) {
    if settings.muted {
        requests.clear();
        return;
    }
    for SoundRequested(effect) in requests.read() {
        audio.play(*effect);
    }
}

pub fn update_hud(
    players: Query<(&Health, &Score, &Immortality), With<Player>>,
    phase: Res<GamePhase>,
    settings: Res<AudioSettings>,
    flash: Res<DamageFlash>,
    input: Res<InputState>,
    mut hud: ResMut<HudState>,
) {
    let mut next = HudState {
        muted: settings.muted,
        audio_supported: settings.supported,
        game_over: phase.is_over(),
        final_score: match *phase {
            GamePhase::Over { final_score } => Some(final_score),
            _ => None,
        },
        orientation_blocked: input.orientation_blocked(),
        damage_flash: flash.is_active(),
        pointer_lock_wanted: input.pointer_lock_wanted,
        ..*hud
    };

    if let Ok((health, score, immortality)) = players.single() {
        next.health = health.current;
        next.max_health = health.max;
        next.score = score.points;
        next.immortal = immortality.active;
    }

    // set_if_neq: UI реагирует только на реальные изменения
    hud.set_if_neq(next);
}

/// Presentation Plugin
///
/// Хост может вставить свои `RenderBridge` / `AudioBridge` до плагина,
/// иначе используются headless backends.
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<RenderBridge>() {
            app.insert_resource(RenderBridge::new(HeadlessRenderer::default()));
        }
        if !app.world().contains_resource::<AudioBridge>() {
            app.insert_resource(AudioBridge::new(SilentAudio));
        }

        app.add_event::<SoundRequested>()
            .init_resource::<AudioSettings>()
            .init_resource::<HudState>()
            .add_systems(
                Update,
                (
                    update_audio_settings,
                    sync_spawned_visuals,
                    sync_visual_poses,
                    despawn_removed_visuals,
                    sync_camera,
                    sync_weapon_opacity,
                    forward_sounds,
                    update_hud,
                )
                    .chain()
                    .in_set(SimulationSet::Presentation),
            );
    }
}
