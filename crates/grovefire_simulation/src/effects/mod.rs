//! Status / effect timers: camera shake, damage flash
//!
//! Косметика: работает в любой фазе (после game over таймеры доигрывают).

use bevy::prelude::*;
use rand::Rng;

use crate::config::{GameConfig, ShakeParams};
use crate::{DeterministicRng, SimulationSet};

/// Event: запрос тряски земли (последний побеждает, не складывается)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShakeRequested {
    pub intensity: f32,
    pub duration_ms: f32,
}

impl From<ShakeParams> for ShakeRequested {
    fn from(params: ShakeParams) -> Self {
        Self {
            intensity: params.intensity,
            duration_ms: params.duration_ms,
        }
    }
}

/// Тряска рендер-камеры
///
/// Инвариант: intensity ≥ 0 и не растёт между триггерами.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraShake {
    pub intensity: f32,
    pub remaining_ms: f32,
    /// Текущее смещение камеры (x: горизонталь, y: вертикаль)
    pub offset: Vec2,
}

fn jitter(rng: &mut impl Rng, intensity: f32) -> Vec2 {
    Vec2::new(
        (rng.gen::<f32>() - 0.5) * intensity,
        (rng.gen::<f32>() - 0.5) * intensity,
    )
}

impl CameraShake {
    /// Перезаписывает текущую тряску
    pub fn trigger(&mut self, intensity: f32, duration_ms: f32, rng: &mut impl Rng) {
        self.intensity = intensity.max(0.0);
        self.remaining_ms = duration_ms;
        self.offset = jitter(rng, self.intensity);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    /// Один тик: новый jitter, обратный отсчёт, затухание ×decay
    pub fn tick(&mut self, delta_ms: f32, decay: f32, rng: &mut impl Rng) {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }

        self.remaining_ms -= delta_ms;
        self.offset = jitter(rng, self.intensity);
        self.intensity *= decay;
    }
}

/// Красная вспышка при каждом неподавленном уроне
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageFlash {
    pub remaining_ms: f32,
}

impl DamageFlash {
    pub fn trigger(&mut self, duration_ms: f32) {
        self.remaining_ms = duration_ms;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn tick(&mut self, delta_ms: f32) {
        self.remaining_ms = (self.remaining_ms - delta_ms).max(0.0);
    }
}

/// System: ShakeRequested → CameraShake (last trigger wins)
pub fn apply_shake_requests(
    mut requests: EventReader<ShakeRequested>,
    mut shake: ResMut<CameraShake>,
    mut rng: ResMut<DeterministicRng>,
) {
    for request in requests.read() {
        shake.trigger(request.intensity, request.duration_ms, &mut rng.rng);
        crate::logger::log(&format!(
            "📳 Ground shake: intensity {:.2} for {:.0}ms",
            request.intensity, request.duration_ms
        ));
    }
}

pub fn tick_camera_shake(
    mut shake: ResMut<CameraShake>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    // Без изменения resource, если тряски нет
    if !shake.is_active() && shake.offset == Vec2::ZERO {
        return;
    }
    let delta_ms = time.delta_secs() * 1000.0;
    shake.tick(delta_ms, config.effects.shake_decay, &mut rng.rng);
}

pub fn tick_damage_flash(mut flash: ResMut<DamageFlash>, time: Res<Time>) {
    if flash.is_active() {
        flash.tick(time.delta_secs() * 1000.0);
    }
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShakeRequested>()
            .init_resource::<CameraShake>()
            .init_resource::<DamageFlash>()
            .add_systems(
                Update,
                (apply_shake_requests, tick_camera_shake, tick_damage_flash)
                    .chain()
                    .in_set(SimulationSet::Effects),
            );
    }
}
