//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье (Health)
//! - enemy: goblin / troll (Enemy, EnemyKind, TrollDescent)
//! - player: игрок (Player, PlayerBody, Immortality, LaserWeapon, Score)
//! - projectile: снаряды goblin (Projectile)
//! - pickup: аптечки (HealthPack)
//! - world: статичная сцена и bounding volumes (Obstacle, BoundingBox)

pub mod actor;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod pickup;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use enemy::*;
pub use player::*;
pub use projectile::*;
pub use pickup::*;
pub use world::*;
