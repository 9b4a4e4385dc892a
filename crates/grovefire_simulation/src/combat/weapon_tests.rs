//! Tests for hitscan resolution.

#[cfg(test)]
mod tests {
    use bevy::math::bounding::RayCast3d;
    use bevy::prelude::*;
    use crate::combat::{closest_hit, muzzle, HitTarget};
    use crate::components::BoundingBox;

    #[test]
    fn test_closest_positive_hit_wins() {
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);

        let hit = closest_hit([
            (HitTarget::Enemy(far), 30.0),
            (HitTarget::Environment, 12.0),
            (HitTarget::Enemy(near), 8.0),
        ]);

        assert_eq!(hit, Some((HitTarget::Enemy(near), 8.0)));
    }

    #[test]
    fn test_environment_blocks_enemy_behind() {
        let goblin = Entity::from_raw(3);

        let hit = closest_hit([(HitTarget::Enemy(goblin), 20.0), (HitTarget::Environment, 5.0)]);
        assert_eq!(hit, Some((HitTarget::Environment, 5.0)));
    }

    #[test]
    fn test_zero_distance_ignored() {
        let goblin = Entity::from_raw(4);

        // Дуло внутри box obstacle → distance 0, такое попадание не считается
        let hit = closest_hit([(HitTarget::Environment, 0.0), (HitTarget::Enemy(goblin), 9.0)]);
        assert_eq!(hit, Some((HitTarget::Enemy(goblin), 9.0)));
        assert_eq!(closest_hit(Vec::<(HitTarget, f32)>::new()), None);
    }

    #[test]
    fn test_muzzle_follows_view() {
        let view = Transform::from_xyz(0.0, 1.8, 10.0);
        let (origin, direction) = muzzle(&view, Vec3::new(0.6, -0.2, -1.2));

        assert!((origin - Vec3::new(0.6, 1.6, 8.8)).length() < 1e-5);
        assert!((Vec3::from(direction) - Vec3::NEG_Z).length() < 1e-6);

        let turned = Transform::from_xyz(0.0, 1.8, 0.0).with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let (_, direction) = muzzle(&turned, Vec3::ZERO);
        assert!((Vec3::from(direction) - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_goblin_ahead_is_hit_from_start_position() {
        // Goblin прямо перед игроком (игрок в (0, 2, 10) смотрит в -Z)
        let goblin = BoundingBox::posed(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::new(0.0, 1.45, 0.0),
            Vec3::new(0.95, 1.45, 0.6),
        );
        let view = Transform::from_xyz(0.0, 2.0, 10.0);
        let (origin, direction) = muzzle(&view, Vec3::new(0.6, -0.2, -1.2));
        let ray = RayCast3d::new(origin, direction, 100.0);

        let distance = goblin.ray_distance(&ray).expect("goblin should be hit");
        assert!((distance - 8.2).abs() < 1e-3, "distance = {}", distance);
    }

    #[test]
    fn test_goblin_in_contact_with_muzzle_is_hit() {
        // Goblin вплотную: дуло (0.6, 1.8, 8.8) внутри его box
        let goblin = BoundingBox::posed(
            Vec3::new(0.0, 0.0, 8.5),
            Quat::IDENTITY,
            Vec3::new(0.0, 1.45, 0.0),
            Vec3::new(0.95, 1.45, 0.6),
        );
        let view = Transform::from_xyz(0.0, 2.0, 10.0);
        let (origin, direction) = muzzle(&view, Vec3::new(0.6, -0.2, -1.2));
        let target = Entity::from_raw(5);

        let distance = goblin
            .ray_distance_from_inside(origin, direction, 100.0)
            .expect("contact goblin must be hit");
        assert!((distance - 0.9).abs() < 1e-3, "distance = {}", distance);

        let hit = closest_hit([(HitTarget::Enemy(target), distance)]);
        assert_eq!(hit.map(|(target, _)| target), Some(HitTarget::Enemy(target)));
    }
}
