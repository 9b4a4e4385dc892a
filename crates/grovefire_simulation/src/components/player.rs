//! Player components
//!
//! Игрок создаётся один раз в Startup и никогда не despawn'ится
//! (game over: терминальное состояние, новая сессия = новый App).

use bevy::prelude::*;
use crate::components::Health;
use crate::config::PlayerConfig;

/// Marker: единственный игрок
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, Health, Score, PlayerBody, Immortality, LaserWeapon)]
pub struct Player;

/// Кинематика игрока (Transform.translation = позиция глаз)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PlayerBody {
    pub yaw: f32,
    /// Clamp [-π/2, π/2]
    pub pitch: f32,
    pub vertical_velocity: f32,
    pub on_ground: bool,
    /// Высота глаз над землёй
    pub height: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            on_ground: true,
            height: 1.8,
        }
    }
}

impl PlayerBody {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            height: config.height,
            ..Default::default()
        }
    }

    /// Yaw вокруг world-up, затем pitch
    pub fn view_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Окно неуязвимости после старта
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct Immortality {
    pub active: bool,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl Immortality {
    pub fn activate(&mut self, now_ms: f64, duration_ms: f64) {
        self.active = true;
        self.started_at_ms = now_ms;
        self.duration_ms = duration_ms;
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_at_ms).max(0.0)
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }
}

/// Hitscan лазер в руках игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LaserWeapon {
    pub last_shot_ms: Option<f64>,
    /// Косметика: мигание во время immortality (1.0 = непрозрачный)
    pub opacity: f32,
}

impl Default for LaserWeapon {
    fn default() -> Self {
        Self {
            last_shot_ms: None,
            opacity: 1.0,
        }
    }
}

impl LaserWeapon {
    /// Rate limit: выстрел разрешён если прошло ≥ interval.
    /// Лишние запросы отбрасываются (никакой очереди).
    pub fn try_trigger(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        let ready = self
            .last_shot_ms
            .map_or(true, |last| now_ms - last >= interval_ms);
        if ready {
            self.last_shot_ms = Some(now_ms);
        }
        ready
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct Score {
    pub points: u32,
}
