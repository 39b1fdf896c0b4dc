//! Combat system module (per-player melee combo controller)
//!
//! ECS ответственность:
//! - CombatStateTracker: единственный владелец CombatState
//! - ComboEngine: legality, combo index, damage/crit, timers
//! - Events: AttackPressed → ComboStepStarted + HitReport, CombatStateChanged
//!
//! Provider ответственность (engine/client layer):
//! - AnimationProvider: clip duration, playback, completion
//! - CombatTransport: доставка HitReport на сервер (fire-and-forget)
//!
//! Весь урон здесь provisional/cosmetic: authoritative сервер решает сам.

use bevy::prelude::*;

pub mod combo;
pub mod damage;
pub mod engine;
pub mod events;
pub mod state;
pub mod systems;


// Re-export основных типов
pub use combo::{ComboSequence, ComboSequenceError, ComboStep};
pub use damage::{base_damage, calculate_damage, report_damage};
pub use engine::{AttackOutcome, ComboEngine, ComboStats, ComboTimer};
pub use events::{AttackPressed, CombatStateChanged, ComboStepStarted, ShutdownCombat};
pub use state::{derive_movement_state, CombatState, CombatStateTracker, StateTransition};

use crate::network::{dispatch_hit_reports, HitReport};

/// Фазы FixedUpdate для combo controller.
///
/// Порядок задан в `CombatPlugin` через `configure_sets(...).chain()`.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ComboSystems {
    /// Новые игроки → ComboEngine
    Setup,
    /// Cooldown / reset expiries
    Timers,
    /// Animation completions
    Animation,
    /// Death / air / landing / speed polling (MovementPlugin)
    Locomotion,
    /// Attack inputs
    Input,
    /// HitReport → transport, CombatStateChanged
    Output,
    /// Explicit shutdown
    Teardown,
}

/// Combat Plugin
///
/// Регистрирует combo системы в FixedUpdate (60Hz).
///
/// Порядок выполнения:
/// 1. initialize_combatants: sequence build + ComboEngine insert
/// 2. tick_combo_timers: cooldown/reset таймеры
/// 3. advance_animations: playback completion → isAttacking = false
/// 4. (MovementPlugin) process_locomotion_events, poll_movement_state
/// 5. process_attack_inputs: AttackPressed → execute_attack
/// 6. dispatch_hit_reports: HitReport → NetworkTransport
/// 7. publish_state_changes: tracker transitions → CombatStateChanged
/// 8. process_combat_shutdowns: ShutdownCombat → engine.shutdown
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<AttackPressed>()
            .add_event::<CombatStateChanged>()
            .add_event::<ComboStepStarted>()
            .add_event::<ShutdownCombat>()
            .add_event::<HitReport>();

        app.configure_sets(
            FixedUpdate,
            (
                ComboSystems::Setup,
                ComboSystems::Timers,
                ComboSystems::Animation,
                ComboSystems::Locomotion,
                ComboSystems::Input,
                ComboSystems::Output,
                ComboSystems::Teardown,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::initialize_combatants.in_set(ComboSystems::Setup),
                systems::tick_combo_timers.in_set(ComboSystems::Timers),
                systems::advance_animations.in_set(ComboSystems::Animation),
                systems::process_attack_inputs.in_set(ComboSystems::Input),
                (dispatch_hit_reports, systems::publish_state_changes)
                    .chain()
                    .in_set(ComboSystems::Output),
                systems::process_combat_shutdowns.in_set(ComboSystems::Teardown),
            ),
        );
    }
}
