//! Health: общий компонент игрока и врагов

use bevy::prelude::*;

/// Здоровье
///
/// Инвариант: 0 ≤ current ≤ max (урон saturating, лечение clamp к max)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Лечит и возвращает сколько реально добавилось
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    /// floor(max × fraction)
    pub fn fraction_of_max(&self, fraction: f32) -> u32 {
        (self.max as f32 * fraction).floor() as u32
    }
}
