//! Input aggregation system
//!
//! Единственная система, читающая `HostInput`. Меняет только `InputState`
//! (никогда не трогает игрока или врагов напрямую).

use bevy::prelude::*;

use super::events::{HostInput, TouchTarget};
use super::state::{ControlScheme, InputKey, InputState};
use crate::config::GameConfig;
use crate::game_state::GamePhase;

/// Горизонтальное отклонение joystick, нормализованное в [-1, 1].
/// Вертикальная ось игнорируется.
pub fn joystick_offset(center: Vec2, radius: f32, position: Vec2) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    ((position.x - center.x) / radius).clamp(-1.0, 1.0)
}

/// System: HostInput events → InputState
pub fn aggregate_input(
    mut events: EventReader<HostInput>,
    mut input: ResMut<InputState>,
    phase: Res<GamePhase>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let input = &mut *input;
    input.begin_frame();
    let running = matches!(*phase, GamePhase::Running);
    let sensitivity = config.input.mouse_sensitivity;
    let touch_sensitivity = config.input.touch_look_sensitivity;

    for event in events.read() {
        match event {
            HostInput::KeyDown { code } => {
                let Some(key) = InputKey::from_code(code) else {
                    continue;
                };
                if !input.press(key) {
                    continue;
                }
                match key {
                    InputKey::Fire => input.actions.fire = true,
                    InputKey::Jump => input.actions.jump = true,
                    InputKey::Mute => input.actions.mute_toggle = true,
                    _ => {}
                }
            }
            HostInput::KeyUp { code } => {
                if let Some(key) = InputKey::from_code(code) {
                    input.release(key);
                }
            }
            HostInput::PointerMotion { dx, dy } => {
                // Без pointer lock (не поддерживается): raw motion
                let look_enabled = input.pointer_locked || !input.capabilities.pointer_lock;
                if running && look_enabled {
                    input.add_look(-dx * sensitivity, -dy * sensitivity);
                }
            }
            HostInput::Click => {
                if matches!(*phase, GamePhase::NotStarted) {
                    input.actions.start = true;
                } else {
                    input.actions.fire = true;
                }
            }
            HostInput::TouchStart { id, target, position } => {
                if matches!(*phase, GamePhase::NotStarted) {
                    input.actions.start = true;
                }
                match *target {
                    TouchTarget::Joystick { center, radius } => {
                        input.touches.joystick.insert(*id, (center, radius));
                        input.joystick = Some(joystick_offset(center, radius, *position));
                    }
                    TouchTarget::FireButton => {
                        input.touches.fire.insert(*id);
                        input.actions.fire = true;
                    }
                    TouchTarget::JumpButton => input.actions.jump = true,
                    TouchTarget::LookArea => {
                        input.touches.look.insert(*id, *position);
                    }
                }
            }
            HostInput::TouchMove { id, position } => {
                if let Some(&(center, radius)) = input.touches.joystick.get(id) {
                    input.joystick = Some(joystick_offset(center, radius, *position));
                } else if let Some(last) = input.touches.look.get_mut(id) {
                    let delta = *position - *last;
                    *last = *position;
                    if running {
                        input.add_look(-delta.x * touch_sensitivity, -delta.y * touch_sensitivity);
                    }
                }
            }
            HostInput::TouchEnd { id } => {
                input.touches.look.remove(id);
                input.touches.fire.remove(id);
                if input.touches.joystick.remove(id).is_some() && input.touches.joystick.is_empty() {
                    input.joystick = None;
                }
            }
            HostInput::Resize { width, height } => {
                input.viewport = Vec2::new(*width, *height);
                input.capabilities.portrait = height > width;
            }
            HostInput::VisibilityChanged { hidden } => {
                input.page_hidden = *hidden;
            }
            HostInput::PointerLockChanged { locked } => {
                if input.pointer_locked && !locked && running {
                    crate::logger::log_warning("🖱️ Pointer lock lost");
                }
                input.pointer_locked = *locked;
            }
            HostInput::Capabilities(capabilities) => {
                input.capabilities = *capabilities;
                input.scheme = if capabilities.mobile {
                    ControlScheme::Touch
                } else {
                    ControlScheme::Desktop
                };
                if !capabilities.audio {
                    crate::logger::log_warning("🔇 Audio not supported, sound disabled");
                }
                if !capabilities.pointer_lock {
                    crate::logger::log_warning("🖱️ Pointer lock not supported, using raw motion");
                }
            }
        }
    }

    // Joystick x поворачивает взгляд (вправо = yaw уменьшается)
    if running {
        if let Some(turn) = input.joystick {
            let yaw_delta = -turn * config.input.joystick_turn_rate * time.delta_secs();
            input.add_look(yaw_delta, 0.0);
        }
    }
}
