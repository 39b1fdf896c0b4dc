//! Movement domain: locomotion state feeding the combat tracker
//!
//! Содержит:
//! - HorizontalSpeed (sample от movement source)
//! - MovementPoll (fixed-interval опрос)
//! - LocomotionEvent (Died / Airborne / Landed)
//! - Системы: process_locomotion_events, poll_movement_state

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

pub use components::*;
pub use events::*;
pub use systems::*;

use crate::combat::ComboSystems;

/// Movement Plugin
///
/// Системы в `ComboSystems::Locomotion` (после animation, до attack input):
/// 1. process_locomotion_events: death / air / landing
/// 2. poll_movement_state: speed → Idle/Moving/Running/Sprinting
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocomotionEvent>();

        app.add_systems(
            FixedUpdate,
            (process_locomotion_events, poll_movement_state)
                .chain()
                .in_set(ComboSystems::Locomotion),
        );
    }
}
