//! Статичная сцена и bounding volumes
//!
//! BoundingBox пересчитывается каждый тик из текущей позы (враги, аптечки)
//! и используется hitscan ray queries и player push-back.

use bevy::math::bounding::{Aabb3d, Bounded3d, BoundingVolume, IntersectsVolume, RayCast3d};
use bevy::math::Isometry3d;
use bevy::prelude::*;

/// Axis-aligned bounding box в world space
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox(pub Aabb3d);

impl Default for BoundingBox {
    fn default() -> Self {
        Self(Aabb3d::new(Vec3::ZERO, Vec3::ZERO))
    }
}

impl BoundingBox {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self(Aabb3d::new(center, half_extents))
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    /// Box вокруг anchor с локальным центром, повёрнутым вместе с entity
    pub fn posed(anchor: Vec3, rotation: Quat, local_center: Vec3, half_extents: Vec3) -> Self {
        let center = anchor + rotation * local_center;
        Self(Cuboid::from_size(half_extents * 2.0).aabb_3d(Isometry3d::new(center, rotation)))
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from(self.0.center())
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.0.intersects(&other.0)
    }

    /// Дистанция вдоль луча до входа в box (None: промах)
    pub fn ray_distance(&self, ray: &RayCast3d) -> Option<f32> {
        ray.aabb_intersection_at(&self.0)
    }

    /// Как `ray_distance`, но для origin внутри box возвращает дистанцию до выхода.
    ///
    /// Hitscan по врагам: дуло, вошедшее в goblin вплотную, всё равно попадает.
    pub fn ray_distance_from_inside(&self, origin: Vec3, direction: Dir3, max: f32) -> Option<f32> {
        let ray = RayCast3d::new(origin, direction, max);
        match self.ray_distance(&ray)? {
            entry if entry > 0.0 => Some(entry),
            _ => self.exit_distance(origin, Vec3::from(direction)).map(|exit| exit.min(max)),
        }
    }

    fn exit_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let min = Vec3::from(self.0.min);
        let max = Vec3::from(self.0.max);

        let exit = (0..3)
            .filter(|&axis| direction[axis].abs() > f32::EPSILON)
            .map(|axis| {
                let bound = if direction[axis] > 0.0 { max[axis] } else { min[axis] };
                (bound - origin[axis]) / direction[axis]
            })
            .fold(f32::INFINITY, f32::min);

        (exit.is_finite() && exit > 0.0).then_some(exit)
    }
}

/// Тип статичного объекта сцены
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ObstacleKind {
    Building,
    Tree,
    Car,
    Mushroom,
    Stone,
}

/// Non-ground объект окружения: блокирует лазер и выталкивает игрока.
///
/// Anchor (Transform.translation): точка, от которой считается push-back.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[require(Transform, BoundingBox)]
pub struct Obstacle {
    pub kind: ObstacleKind,
}
