//! Tests for AI movement systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::movement::{facing_rotation, seek_direction};

    #[test]
    fn test_seek_is_horizontal_unit() {
        let from = Vec3::new(0.0, 0.0, 0.0);
        let to = Vec3::new(3.0, 1.8, 4.0);

        let direction = seek_direction(from, to);
        assert_eq!(direction.y, 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!((direction - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_seek_directly_below_target_is_zero() {
        // Игрок прямо над врагом: горизонтального направления нет
        let direction = seek_direction(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(direction, Vec3::ZERO);
    }

    #[test]
    fn test_facing_points_local_z_at_target() {
        let from = Vec3::new(1.0, 0.0, 1.0);
        let to = Vec3::new(-4.0, 2.0, 1.0);

        let forward = facing_rotation(from, to) * Vec3::Z;
        assert!((forward - Vec3::NEG_X).length() < 1e-5, "forward = {:?}", forward);
    }

    #[test]
    fn test_goblin_step_distance_scales_with_dt() {
        let speed = 5.0;
        let from = Vec3::new(0.0, 0.0, -20.0);
        let target = Vec3::new(0.0, 1.8, 10.0);

        let after_one = from + seek_direction(from, target) * speed * 1.0;
        let mut stepped = from;
        for _ in 0..10 {
            stepped += seek_direction(stepped, target) * speed * 0.1;
        }

        assert!((after_one - stepped).length() < 1e-4);
        assert!((after_one.z - (-15.0)).abs() < 1e-5);
    }
}
