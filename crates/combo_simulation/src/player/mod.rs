//! Player-controlled combatant
//!
//! Отмечает entity, которым управляет игрок через input, и собирает
//! компоненты, нужные combo controller.

use bevy::prelude::*;

use crate::animation::{AnimationRef, ComboAnimationSet};
use crate::combat::CombatStateTracker;
use crate::movement::{HorizontalSpeed, MovementPoll};

/// Marker component для player-controlled entity
///
/// `ComboEngine` появляется позже: `initialize_combatants` строит его из
/// `ComboAnimationSet` в первом FixedUpdate после spawn.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(CombatStateTracker, HorizontalSpeed, MovementPoll)]
pub struct Player;

/// Spawn игрока с combo animation set (position → animation).
pub fn spawn_combatant(
    commands: &mut Commands,
    animations: impl IntoIterator<Item = (u32, AnimationRef)>,
) -> Entity {
    commands
        .spawn((Player, ComboAnimationSet::new(animations)))
        .id()
}

/// Стандартный 4-step combo (`anim/slash_1` .. `anim/slash_4`).
pub fn default_combo_animations() -> Vec<(u32, AnimationRef)> {
    vec![
        (1, AnimationRef::named("anim/slash_1", "Slash")),
        (2, AnimationRef::named("anim/slash_2", "Backhand")),
        (3, AnimationRef::named("anim/slash_3", "Rising Cut")),
        (4, AnimationRef::named("anim/slash_4", "Finisher")),
    ]
}
