//! Combat state tracker.
//!
//! Единственный владелец `CombatState` игрока. Setter не проверяет
//! легальность перехода: policy живёт в `ComboEngine` и movement rule.

use bevy::prelude::*;

use crate::config::MovementThresholds;

/// Discrete combat/movement state (exactly one per player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum CombatState {
    #[default]
    Idle,
    Moving,
    Running,
    Sprinting,
    Jumping,
    Attacking,
    Dead,
}

impl CombatState {
    /// Locomotion states owned by the movement rule.
    pub fn is_locomotion(&self) -> bool {
        matches!(self, CombatState::Moving | CombatState::Running | CombatState::Sprinting)
    }

    /// States the movement rule never touches.
    pub fn blocks_movement_rule(&self) -> bool {
        matches!(self, CombatState::Attacking | CombatState::Jumping | CombatState::Dead)
    }
}

/// One effective state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: CombatState,
    pub to: CombatState,
}

/// Component: current combat state of a player.
///
/// Transitions are queued until `publish_state_changes` drains them.
#[derive(Component, Debug, Clone, Default)]
pub struct CombatStateTracker {
    state: CombatState,
    transitions: Vec<StateTransition>,
}

impl CombatStateTracker {
    pub fn new(state: CombatState) -> Self {
        Self {
            state,
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Set state. No-op (returns false) when `new` equals the current state.
    pub fn set_state(&mut self, new: CombatState) -> bool {
        if self.state == new {
            return false;
        }

        self.transitions.push(StateTransition {
            from: self.state,
            to: new,
        });
        self.state = new;
        true
    }

    pub fn is(&self, state: CombatState) -> bool {
        self.state == state
    }

    pub fn take_transitions(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.transitions)
    }

    pub fn has_pending_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// Movement-derived state for a horizontal speed sample.
///
/// Threshold order:
/// 1. `speed <= idle` → Moving/Running/Sprinting collapse to Idle
/// 2. `speed > sprint` → Sprinting (only from Idle/Moving)
/// 3. `speed > walk` → Running (only from Idle)
/// 4. `speed > idle` → Moving (only from Idle)
///
/// Attacking/Jumping/Dead are returned unchanged.
pub fn derive_movement_state(
    horizontal_speed: f32,
    current: CombatState,
    thresholds: &MovementThresholds,
) -> CombatState {
    if current.blocks_movement_rule() {
        return current;
    }

    if horizontal_speed <= thresholds.idle {
        if current.is_locomotion() {
            return CombatState::Idle;
        }
        return current;
    }

    if horizontal_speed > thresholds.sprint {
        if matches!(current, CombatState::Idle | CombatState::Moving) {
            return CombatState::Sprinting;
        }
        return current;
    }

    if horizontal_speed > thresholds.walk {
        if current == CombatState::Idle {
            return CombatState::Running;
        }
        return current;
    }

    if current == CombatState::Idle {
        return CombatState::Moving;
    }

    current
}
