//! Input Aggregator
//!
//! ```text
//! Host (browser / window / test script)
//!     ↓
//! HostInput (ECS event) - events.rs
//!     ↓
//! aggregate_input (ECS system) - systems.rs
//!     ↓
//! InputState (resource) - state.rs → player / combat / presentation
//! ```

use bevy::prelude::*;

pub mod events;
pub mod state;
pub mod systems;

pub use events::*;
pub use state::*;
pub use systems::*;

use crate::SimulationSet;

pub struct HostInputPlugin;

impl Plugin for HostInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HostInput>()
            .init_resource::<InputState>()
            .add_systems(Update, aggregate_input.in_set(SimulationSet::Input));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joystick_offset_normalized_horizontal_only() {
        let center = Vec2::new(100.0, 500.0);

        assert_eq!(joystick_offset(center, 50.0, Vec2::new(125.0, 100.0)), 0.5);
        assert_eq!(joystick_offset(center, 50.0, Vec2::new(-400.0, 500.0)), -1.0);
        assert_eq!(joystick_offset(center, 0.0, Vec2::new(125.0, 500.0)), 0.0);
    }
}
