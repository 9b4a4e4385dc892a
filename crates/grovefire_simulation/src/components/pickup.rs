use bevy::prelude::*;
use crate::components::BoundingBox;

/// Аптечка: крутится и покачивается над землёй
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, BoundingBox)]
pub struct HealthPack {
    /// Аккумулятор фазы (spin + bob)
    pub phase: f32,
    /// Точка спавна на земле (x, 0, z)
    pub base: Vec3,
}

impl HealthPack {
    pub fn at(base: Vec3) -> Self {
        Self { phase: 0.0, base }
    }

    /// Поза для текущей фазы: yaw = phase, y = hover + sin(2·phase)·amplitude
    pub fn pose(&self, hover_height: f32, bob_amplitude: f32) -> (Vec3, Quat) {
        let y = hover_height + (self.phase * 2.0).sin() * bob_amplitude;
        (
            Vec3::new(self.base.x, y, self.base.z),
            Quat::from_rotation_y(self.phase),
        )
    }
}
