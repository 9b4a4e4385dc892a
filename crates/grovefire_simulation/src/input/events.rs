//! Host input events
//!
//! Хост (браузер, нативное окно, тестовый сценарий) переводит свои события
//! в `HostInput` и пишет их в ECS. Симуляция никогда не читает устройства напрямую.

use bevy::prelude::{Event, Vec2};

/// Куда попало касание (hit-test делает хост, он рисует виджеты)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchTarget {
    /// Виртуальный joystick: центр и радиус в экранных координатах
    Joystick { center: Vec2, radius: f32 },
    FireButton,
    JumpButton,
    /// Свободная область экрана (drag = поворот камеры)
    LookArea,
}

/// Возможности окружения (detected хостом один раз или при смене ориентации)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    pub mobile: bool,
    pub portrait: bool,
    pub audio: bool,
    pub pointer_lock: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            mobile: false,
            portrait: false,
            audio: true,
            pointer_lock: true,
        }
    }
}

/// Сырые события окружения
///
/// # Keyboard
/// `code`: физический код клавиши в формате `KeyboardEvent.code`
/// (`KeyW`, `Space`, `ShiftLeft`, ...). Неизвестные коды игнорируются.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum HostInput {
    KeyDown { code: String },
    KeyUp { code: String },
    /// Относительное движение мыши (pixels)
    PointerMotion { dx: f32, dy: f32 },
    Click,
    TouchStart { id: u64, target: TouchTarget, position: Vec2 },
    TouchMove { id: u64, position: Vec2 },
    TouchEnd { id: u64 },
    Resize { width: f32, height: f32 },
    VisibilityChanged { hidden: bool },
    PointerLockChanged { locked: bool },
    Capabilities(HostCapabilities),
}

impl HostInput {
    pub fn key_down(code: &str) -> Self {
        HostInput::KeyDown { code: code.to_string() }
    }

    pub fn key_up(code: &str) -> Self {
        HostInput::KeyUp { code: code.to_string() }
    }
}
