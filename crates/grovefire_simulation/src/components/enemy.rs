//! Враги: Goblin | Troll
//!
//! Один компонент `Enemy` с общими полями + `EnemyKind` tagged variant.
//! AI и combat системы делают `match` по kind (никакого duck typing).
//!
//! Lifecycle:
//! - Goblin: Alive → Dead
//! - Troll: Spawned(falling) → Grounded(landed) → Dead
//!
//! Инвариант: `alive == false` ⇒ entity despawn в том же тике;
//! все системы дополнительно фильтруют по `alive`.

use bevy::prelude::*;
use crate::components::{BoundingBox, Health};
use crate::config::{EnemyStats, GameConfig};

/// Фаза падения troll после спавна
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct TrollDescent {
    pub falling: bool,
    /// Накопленная скорость падения (units/sec)
    pub fall_speed: f32,
    pub landed: bool,
}

impl TrollDescent {
    pub fn airborne() -> Self {
        Self {
            falling: true,
            fall_speed: 0.0,
            landed: false,
        }
    }

    /// Один тик падения. Возвращает true ровно в тот тик, когда troll приземлился.
    ///
    /// Переход falling → landed необратим: после приземления вызов ничего не делает.
    pub fn step(&mut self, height: &mut f32, acceleration: f32, ground_height: f32, dt: f32) -> bool {
        if !self.falling {
            return false;
        }

        self.fall_speed += acceleration * dt;
        *height -= self.fall_speed * dt;

        if *height <= ground_height {
            *height = ground_height;
            self.falling = false;
            self.landed = true;
            return true;
        }

        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum EnemyKind {
    Goblin,
    Troll(TrollDescent),
}

impl EnemyKind {
    pub fn label(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "goblin",
            EnemyKind::Troll(_) => "troll",
        }
    }

    pub fn is_goblin(&self) -> bool {
        matches!(self, EnemyKind::Goblin)
    }

    pub fn stats<'a>(&self, config: &'a GameConfig) -> &'a EnemyStats {
        match self {
            EnemyKind::Goblin => &config.goblin.stats,
            EnemyKind::Troll(_) => &config.troll.stats,
        }
    }
}

/// Враждебный актор
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Health, BoundingBox, Transform)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub alive: bool,
    pub speed: f32,
    /// Cooldown атаки (goblin: ranged shot, troll: axe)
    pub action_cooldown_ms: f64,
    pub last_action_ms: Option<f64>,
    pub footstep_interval_ms: f64,
    pub last_footstep_ms: Option<f64>,
    /// Урон от одного попадания лазера
    pub damage_per_hit: u32,
    pub score: u32,
}

impl Enemy {
    fn from_stats(kind: EnemyKind, stats: &EnemyStats) -> Self {
        Self {
            kind,
            alive: true,
            speed: stats.speed,
            action_cooldown_ms: stats.action_cooldown_ms,
            last_action_ms: None,
            footstep_interval_ms: stats.footstep_interval_ms,
            last_footstep_ms: None,
            damage_per_hit: stats.damage_per_hit,
            score: stats.score,
        }
    }

    pub fn goblin(stats: &EnemyStats) -> Self {
        Self::from_stats(EnemyKind::Goblin, stats)
    }

    pub fn troll(stats: &EnemyStats) -> Self {
        Self::from_stats(EnemyKind::Troll(TrollDescent::airborne()), stats)
    }

    /// Goblin всегда на земле, troll только после приземления
    pub fn is_grounded(&self) -> bool {
        match self.kind {
            EnemyKind::Goblin => true,
            EnemyKind::Troll(descent) => !descent.falling,
        }
    }

    pub fn action_ready(&self, now_ms: f64) -> bool {
        self.last_action_ms
            .map_or(true, |last| now_ms - last > self.action_cooldown_ms)
    }

    pub fn mark_action(&mut self, now_ms: f64) {
        self.last_action_ms = Some(now_ms);
    }

    /// Footstep sound не чаще чем раз в `footstep_interval_ms`
    pub fn take_footstep(&mut self, now_ms: f64) -> bool {
        let due = self
            .last_footstep_ms
            .map_or(true, |last| now_ms - last > self.footstep_interval_ms);
        if due {
            self.last_footstep_ms = Some(now_ms);
        }
        due
    }

    /// Применяет попадание лазера. Возвращает true если враг умер этим попаданием.
    ///
    /// Health хранится saturating (никогда не уходит ниже 0).
    pub fn take_hit(&mut self, health: &mut Health) -> bool {
        if !self.alive {
            return false;
        }

        health.take_damage(self.damage_per_hit);
        if !health.is_alive() {
            self.alive = false;
            return true;
        }
        false
    }
}
