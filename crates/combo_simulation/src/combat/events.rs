//! Combat events (input → engine → observers)

use bevy::prelude::*;

use crate::combat::state::CombatState;

/// Event: игрок нажал атаку
///
/// Генерируется input layer (клиент) или скриптом в headless режиме.
/// Обрабатывается `process_attack_inputs` в порядке поступления.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPressed {
    pub entity: Entity,
}

/// Event: эффективная смена `CombatState` (from != to)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatStateChanged {
    pub entity: Entity,
    pub from: CombatState,
    pub to: CombatState,
}

/// Event: combo step запущен (для UI / звука)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ComboStepStarted {
    pub entity: Entity,
    /// Combo index that fired
    pub combo_index: u32,
    /// Step actually played (1 after fallback)
    pub step_position: u32,
    pub step_name: String,
    pub damage: f32,
    pub is_critical: bool,
}

/// Event: явный teardown combo engine (персонаж удаляется)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownCombat {
    pub entity: Entity,
}
