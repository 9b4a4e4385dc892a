//! Player controller: gravity, jump, movement, ground clamp, look.

use bevy::prelude::*;
use crate::components::{Player, PlayerBody};
use crate::config::GameConfig;
use crate::input::InputState;

/// Вход одного тика контроллера (уже агрегированный InputState)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStep {
    /// x = strafe, y = forward
    pub move_intent: Vec2,
    pub speed: f32,
    pub jump: bool,
    /// Накопленный взгляд (yaw, pitch)
    pub look: Vec2,
}

/// Константы физики игрока
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPhysics {
    pub gravity: f32,
    pub jump_velocity: f32,
}

/// Один тик кинематики игрока.
///
/// Порядок: jump → gravity → движение (поворот прошлого тика, y обнулён)
/// → вертикальная интеграция → ground clamp → look (yaw, затем pitch).
pub fn integrate_player(
    body: &mut PlayerBody,
    position: &mut Vec3,
    view_rotation: Quat,
    step: PlayerStep,
    physics: PlayerPhysics,
    dt: f32,
) {
    // Без double-jump
    if step.jump && body.on_ground {
        body.vertical_velocity = physics.jump_velocity;
        body.on_ground = false;
    }

    if !body.on_ground {
        body.vertical_velocity += physics.gravity * dt;
    }

    let local = Vec3::new(step.move_intent.x, 0.0, -step.move_intent.y);
    if local.length_squared() > 0.0 {
        let mut world = view_rotation * local.normalize();
        world.y = 0.0;
        *position += world.normalize_or_zero() * step.speed * dt;
    }

    position.y += body.vertical_velocity * dt;

    if position.y <= body.height {
        position.y = body.height;
        body.vertical_velocity = 0.0;
        body.on_ground = true;
    } else {
        body.on_ground = false;
    }

    body.yaw = step.look.x;
    body.pitch = step.look.y;
}

/// System: InputState → PlayerBody + Transform
pub fn player_control(
    mut players: Query<(&mut PlayerBody, &mut Transform), With<Player>>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let settings = &config.player;
    let physics = PlayerPhysics {
        gravity: settings.gravity,
        jump_velocity: settings.jump_velocity,
    };
    let step = PlayerStep {
        move_intent: input.move_intent(),
        speed: settings.move_speed * input.speed_scale(settings.touch_speed_factor),
        jump: input.actions.jump,
        look: input.look,
    };

    for (mut body, mut transform) in players.iter_mut() {
        let rotation = transform.rotation;
        integrate_player(&mut body, &mut transform.translation, rotation, step, physics, time.delta_secs());
        transform.rotation = body.view_rotation();

        if step.jump {
            crate::logger::log(&format!("⬆️ Jump requested (on_ground after tick: {})", body.on_ground));
        }
    }
}
