//! Game configuration (все числовые константы симуляции)
//!
//! `GameConfig`: Bevy Resource. Хост может вставить свой перед
//! `SimulationPlugin`, иначе используется `Default`.
//! Каждая таблица помечена `#[serde(default)]`: частичный TOML переопределяет
//! только то, что указано.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub input: InputConfig,
    pub weapon: WeaponConfig,
    pub goblin: GoblinConfig,
    pub troll: TrollConfig,
    pub spawn: SpawnConfig,
    pub health_pack: HealthPackConfig,
    pub effects: EffectsConfig,
    pub world: WorldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_position: [f32; 3],
    /// Высота глаз над землёй (capsule proxy)
    pub height: f32,
    /// Ширина/глубина player bounding box для push-back
    pub collider_width: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub move_speed: f32,
    /// Множитель скорости для touch-управления
    pub touch_speed_factor: f32,
    pub max_health: u32,
    pub immortality_ms: f64,
    pub blink_period_ms: f64,
    pub blink_min_opacity: f32,
    /// Насколько выталкиваем игрока из obstacle за тик
    pub obstacle_push: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 2.0, 10.0],
            height: 1.8,
            collider_width: 1.0,
            gravity: -30.0,
            jump_velocity: 15.0,
            move_speed: 10.0,
            touch_speed_factor: 0.7,
            max_health: 100,
            immortality_ms: 5000.0,
            blink_period_ms: 200.0,
            blink_min_opacity: 0.3,
            obstacle_push: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Радиан на пиксель pointer motion
    pub mouse_sensitivity: f32,
    /// Радиан на пиксель drag по look-области
    pub touch_look_sensitivity: f32,
    /// Скорость поворота от joystick (рад/сек при |x| = 1)
    pub joystick_turn_rate: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            touch_look_sensitivity: 0.005,
            joystick_turn_rate: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub fire_interval_ms: f64,
    /// Смещение дула в локальных координатах камеры
    pub muzzle_offset: [f32; 3],
    pub max_range: f32,
    /// Время жизни луча и impact marker
    pub effect_lifetime_ms: f64,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_interval_ms: 200.0,
            muzzle_offset: [0.6, -0.2, -1.2],
            max_range: 100.0,
            effect_lifetime_ms: 150.0,
        }
    }
}

/// Общие параметры врага (goblin и troll)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    pub max_health: u32,
    pub speed: f32,
    pub action_cooldown_ms: f64,
    pub footstep_interval_ms: f64,
    /// Урон, который враг получает от одного попадания лазера
    pub damage_per_hit: u32,
    pub score: u32,
    /// Bounding box: центр относительно anchor (ноги) и половинные размеры
    pub bounds_center: [f32; 3],
    pub bounds_half_extents: [f32; 3],
}

impl Default for EnemyStats {
    fn default() -> Self {
        GoblinConfig::default().stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoblinConfig {
    pub stats: EnemyStats,
    pub ranged_range: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_launch_height: f32,
    pub projectile_damage: u32,
    pub projectile_hit_radius: f32,
    pub melee_range: f32,
    pub melee_damage_per_tick: u32,
}

impl Default for GoblinConfig {
    fn default() -> Self {
        Self {
            stats: EnemyStats {
                max_health: 50,
                speed: 5.0,
                action_cooldown_ms: 2000.0,
                footstep_interval_ms: 800.0,
                damage_per_hit: 25,
                score: 100,
                bounds_center: [0.0, 1.45, 0.0],
                bounds_half_extents: [0.95, 1.45, 0.6],
            },
            ranged_range: 20.0,
            projectile_speed: 15.0,
            projectile_lifetime: 3.0,
            projectile_launch_height: 2.0,
            projectile_damage: 20,
            projectile_hit_radius: 1.0,
            melee_range: 2.0,
            melee_damage_per_tick: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrollConfig {
    pub stats: EnemyStats,
    pub spawn_height: f32,
    pub fall_acceleration: f32,
    pub ground_height: f32,
    pub attack_range: f32,
    pub attack_damage: u32,
    pub landing_shake: ShakeParams,
    pub attack_shake: ShakeParams,
}

impl Default for TrollConfig {
    fn default() -> Self {
        Self {
            stats: EnemyStats {
                max_health: 100,
                speed: 3.0,
                action_cooldown_ms: 3000.0,
                footstep_interval_ms: 1200.0,
                damage_per_hit: 15,
                score: 300,
                bounds_center: [0.0, 2.65, 0.0],
                bounds_half_extents: [2.3, 2.85, 1.0],
            },
            spawn_height: 50.0,
            fall_acceleration: 20.0,
            ground_height: 2.5,
            attack_range: 4.0,
            attack_damage: 30,
            landing_shake: ShakeParams {
                intensity: 0.5,
                duration_ms: 1000.0,
            },
            attack_shake: ShakeParams {
                intensity: 0.3,
                duration_ms: 500.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShakeParams {
    pub intensity: f32,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub initial_goblins: usize,
    /// Половина стороны квадрата случайного разброса goblin
    pub goblin_spread: f32,
    pub goblin_initial_bias: f32,
    pub goblin_respawn_bias: f32,
    pub goblin_respawn_delay_ms: f64,

    pub troll_first_ms: f64,
    pub troll_interval_ms: [f64; 2],
    pub troll_spread: f32,
    pub troll_retry_ms: f64,

    pub pack_first_ms: f64,
    pub pack_interval_ms: [f64; 2],
    pub pack_spread: f32,
    pub pack_retry_ms: f64,
    pub pack_ttl_ms: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_goblins: 8,
            goblin_spread: 40.0,
            goblin_initial_bias: 20.0,
            goblin_respawn_bias: 30.0,
            goblin_respawn_delay_ms: 3000.0,
            troll_first_ms: 30_000.0,
            troll_interval_ms: [20_000.0, 40_000.0],
            troll_spread: 40.0,
            troll_retry_ms: 3000.0,
            pack_first_ms: 10_000.0,
            pack_interval_ms: [15_000.0, 25_000.0],
            pack_spread: 30.0,
            pack_retry_ms: 2000.0,
            pack_ttl_ms: 30_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthPackConfig {
    pub heal_fraction: f32,
    pub pickup_radius: f32,
    pub spin_rate: f32,
    pub hover_height: f32,
    pub bob_amplitude: f32,
    pub bounds_half_extents: [f32; 3],
}

impl Default for HealthPackConfig {
    fn default() -> Self {
        Self {
            heal_fraction: 0.1,
            pickup_radius: 2.0,
            spin_rate: 2.0,
            hover_height: 0.5,
            bob_amplitude: 0.2,
            bounds_half_extents: [0.8, 0.4, 0.8],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Множитель затухания shake за тик
    pub shake_decay: f32,
    pub damage_flash_ms: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            shake_decay: 0.95,
            damage_flash_ms: 300.0,
        }
    }
}

/// Статичная сцена (obstacles). Ground не является obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub building: bool,
    pub trees: usize,
    pub tree_spread: f32,
    pub cars: usize,
    pub car_spread: f32,
    pub mushrooms: usize,
    pub mushroom_spread: f32,
    pub stones: usize,
    pub stone_spread: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            building: true,
            trees: 20,
            tree_spread: 75.0,
            cars: 5,
            car_spread: 50.0,
            mushrooms: 15,
            mushroom_spread: 60.0,
            stones: 25,
            stone_spread: 70.0,
        }
    }
}

impl WorldConfig {
    /// Пустая сцена (без obstacles): удобно для сценарных тестов
    pub fn empty() -> Self {
        Self {
            building: false,
            trees: 0,
            cars: 0,
            mushrooms: 0,
            stones: 0,
            ..Self::default()
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player.height", self.player.height)?;
        positive("player.move_speed", self.player.move_speed)?;
        if self.player.gravity >= 0.0 {
            return Err(invalid("player.gravity", "must point down (negative)"));
        }
        if self.player.max_health == 0 {
            return Err(invalid("player.max_health", "must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.player.touch_speed_factor) {
            return Err(invalid("player.touch_speed_factor", "must be within [0, 1]"));
        }
        if self.player.immortality_ms < 0.0 {
            return Err(invalid("player.immortality_ms", "must not be negative"));
        }

        positive("weapon.fire_interval_ms", self.weapon.fire_interval_ms as f32)?;
        positive("weapon.max_range", self.weapon.max_range)?;

        for (field, stats) in [("goblin.stats", &self.goblin.stats), ("troll.stats", &self.troll.stats)] {
            if stats.max_health == 0 {
                return Err(invalid(field, "max_health must be greater than zero"));
            }
            if stats.damage_per_hit == 0 {
                return Err(invalid(field, "damage_per_hit must be greater than zero"));
            }
        }

        if self.troll.ground_height >= self.troll.spawn_height {
            return Err(invalid("troll.ground_height", "must be below spawn_height"));
        }
        positive("troll.fall_acceleration", self.troll.fall_acceleration)?;

        interval("spawn.troll_interval_ms", self.spawn.troll_interval_ms)?;
        interval("spawn.pack_interval_ms", self.spawn.pack_interval_ms)?;

        if !(0.0..=1.0).contains(&self.health_pack.heal_fraction) {
            return Err(invalid("health_pack.heal_fraction", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.effects.shake_decay) {
            return Err(invalid("effects.shake_decay", "must be within [0, 1]"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn interval(field: &'static str, [min, max]: [f64; 2]) -> Result<(), ConfigError> {
    if min <= 0.0 || min > max {
        return Err(invalid(field, "expected 0 < min <= max"));
    }
    Ok(())
}

/// `[f32; 3]` из конфига → Vec3
pub fn vec3(value: [f32; 3]) -> Vec3 {
    Vec3::from_array(value)
}
