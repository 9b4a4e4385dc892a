//! InputState: единый вектор движения/взгляда/действий
//!
//! Не зависит от устройства: клавиатура+мышь и touch-виджеты сходятся
//! в одни и те же поля. Actions: edge-triggered, сбрасываются каждый кадр.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};
use std::f32::consts::FRAC_PI_2;

use super::events::HostCapabilities;

/// Логическая клавиша (после маппинга `KeyboardEvent.code`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    Forward,
    Back,
    Left,
    Right,
    Fire,
    Jump,
    Mute,
}

impl InputKey {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(InputKey::Forward),
            "KeyS" => Some(InputKey::Back),
            "KeyA" => Some(InputKey::Left),
            "KeyD" => Some(InputKey::Right),
            "Space" => Some(InputKey::Fire),
            "ShiftLeft" | "ShiftRight" => Some(InputKey::Jump),
            "KeyM" => Some(InputKey::Mute),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlScheme {
    #[default]
    Desktop,
    Touch,
}

/// Edge-triggered действия текущего кадра
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions {
    pub jump: bool,
    pub fire: bool,
    pub mute_toggle: bool,
    pub start: bool,
}

/// Какие активные касания чем управляют
#[derive(Debug, Clone, Default)]
pub(crate) struct TouchTracking {
    /// id → (center, radius)
    pub joystick: HashMap<u64, (Vec2, f32)>,
    /// id → последняя позиция
    pub look: HashMap<u64, Vec2>,
    pub fire: HashSet<u64>,
}

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    held: HashSet<InputKey>,
    /// Накопленный взгляд: x = yaw, y = pitch (clamp ±π/2)
    pub look: Vec2,
    /// Горизонтальное отклонение joystick в [-1, 1]; Some пока joystick зажат
    pub joystick: Option<f32>,
    pub actions: Actions,
    pub scheme: ControlScheme,
    pub capabilities: HostCapabilities,
    pub pointer_locked: bool,
    /// UI должен запросить pointer lock (старт игры на desktop)
    pub pointer_lock_wanted: bool,
    pub viewport: Vec2,
    pub page_hidden: bool,
    pub(crate) touches: TouchTracking,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            look: Vec2::ZERO,
            joystick: None,
            actions: Actions::default(),
            scheme: ControlScheme::Desktop,
            capabilities: HostCapabilities::default(),
            pointer_locked: false,
            pointer_lock_wanted: false,
            viewport: Vec2::new(1280.0, 720.0),
            page_hidden: false,
            touches: TouchTracking::default(),
        }
    }
}

impl InputState {
    /// true только на первом нажатии (key repeat не считается)
    pub fn press(&mut self, key: InputKey) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: InputKey) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: InputKey) -> bool {
        self.held.contains(&key)
    }

    pub fn add_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.look.x += yaw_delta;
        self.look.y = (self.look.y + pitch_delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Намерение движения: x = strafe (+вправо), y = forward (+вперёд).
    ///
    /// Desktop: клавиатурный вектор (не нормализован, нормализует controller).
    /// Touch: только вперёд, пока зажат joystick (величина отклонения не важна).
    pub fn move_intent(&self) -> Vec2 {
        match self.scheme {
            ControlScheme::Desktop => {
                let axis = |positive: InputKey, negative: InputKey| {
                    self.is_held(positive) as i32 as f32 - self.is_held(negative) as i32 as f32
                };
                Vec2::new(
                    axis(InputKey::Right, InputKey::Left),
                    axis(InputKey::Forward, InputKey::Back),
                )
            }
            ControlScheme::Touch => {
                if self.joystick.is_some() {
                    Vec2::Y
                } else {
                    Vec2::ZERO
                }
            }
        }
    }

    pub fn speed_scale(&self, touch_factor: f32) -> f32 {
        match self.scheme {
            ControlScheme::Desktop => 1.0,
            ControlScheme::Touch => touch_factor,
        }
    }

    /// Зажатый огонь (Space или touch fire button): повторяется с rate limit оружия
    pub fn fire_held(&self) -> bool {
        self.is_held(InputKey::Fire) || !self.touches.fire.is_empty()
    }

    pub fn fire_requested(&self) -> bool {
        self.actions.fire || self.fire_held()
    }

    /// Mobile в портретной ориентации: UI показывает "поверните устройство"
    pub fn orientation_blocked(&self) -> bool {
        self.capabilities.mobile && self.capabilities.portrait
    }

    pub fn begin_frame(&mut self) {
        self.actions = Actions::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputKey::from_code("KeyW"), Some(InputKey::Forward));
        assert_eq!(InputKey::from_code("ShiftRight"), Some(InputKey::Jump));
        assert_eq!(InputKey::from_code("Space"), Some(InputKey::Fire));
        assert_eq!(InputKey::from_code("KeyQ"), None);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut input = InputState::default();

        input.add_look(0.3, 10.0);
        assert_eq!(input.look.y, FRAC_PI_2);
        assert_eq!(input.look.x, 0.3);

        input.add_look(0.0, -20.0);
        assert_eq!(input.look.y, -FRAC_PI_2);
    }

    #[test]
    fn test_desktop_move_intent() {
        let mut input = InputState::default();
        input.press(InputKey::Forward);
        input.press(InputKey::Left);
        assert_eq!(input.move_intent(), Vec2::new(-1.0, 1.0));

        // W + S гасят друг друга
        input.press(InputKey::Back);
        assert_eq!(input.move_intent(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_touch_move_is_forward_only() {
        let mut input = InputState {
            scheme: ControlScheme::Touch,
            ..Default::default()
        };
        assert_eq!(input.move_intent(), Vec2::ZERO);

        input.joystick = Some(-0.9);
        assert_eq!(input.move_intent(), Vec2::Y);
        assert_eq!(input.speed_scale(0.7), 0.7);
    }

    #[test]
    fn test_press_is_edge() {
        let mut input = InputState::default();
        assert!(input.press(InputKey::Jump));
        assert!(!input.press(InputKey::Jump)); // key repeat
        input.release(InputKey::Jump);
        assert!(input.press(InputKey::Jump));
    }
}
