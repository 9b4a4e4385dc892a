//! AI systems module
//!
//! Разбит на логические подмодули:
//! - movement: seek/face player, footsteps, bounding boxes
//! - descent: падение troll после спавна
//! - attack: goblin ranged + melee, troll axe

pub mod attack;
pub mod descent;
pub mod movement;

pub use attack::*;
pub use descent::*;
pub use movement::*;

#[cfg(test)]
mod movement_tests;
