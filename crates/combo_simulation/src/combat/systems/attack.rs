//! Attack input processing and state change publishing.

use bevy::prelude::*;

use crate::animation::AnimationBackend;
use crate::combat::engine::ComboEngine;
use crate::combat::events::{AttackPressed, CombatStateChanged, ComboStepStarted};
use crate::combat::state::CombatStateTracker;
use crate::network::HitReport;
use crate::DeterministicRng;

/// System: AttackPressed → ComboEngine::execute_attack
///
/// Rejected attack (debounce / illegal state) молча игнорируется:
/// ни state change, ни HitReport.
pub fn process_attack_inputs(
    mut inputs: EventReader<AttackPressed>,
    mut combatants: Query<(&mut ComboEngine, &mut CombatStateTracker)>,
    mut backend: ResMut<AnimationBackend>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut reports: EventWriter<HitReport>,
    mut started: EventWriter<ComboStepStarted>,
) {
    let now = time.elapsed_secs_f64();

    for input in inputs.read() {
        let Ok((mut engine, mut tracker)) = combatants.get_mut(input.entity) else {
            crate::logger::log_warning(&format!(
                "⚠️ Combo: attack input for {:?} without engine",
                input.entity
            ));
            continue;
        };

        let Some(outcome) = engine.execute_attack(
            input.entity,
            &mut tracker,
            &mut *backend.0,
            &mut rng.rng,
            now,
        ) else {
            continue;
        };

        started.write(ComboStepStarted {
            entity: input.entity,
            combo_index: outcome.combo_index,
            step_position: outcome.step_position,
            step_name: outcome.step_name,
            damage: outcome.damage,
            is_critical: outcome.is_critical,
        });
        reports.write(outcome.report);
    }
}

/// System: drain tracker transitions → CombatStateChanged
pub fn publish_state_changes(
    mut trackers: Query<(Entity, &mut CombatStateTracker)>,
    mut changes: EventWriter<CombatStateChanged>,
) {
    for (entity, mut tracker) in trackers.iter_mut() {
        // Read-only check не помечает component как changed
        if !tracker.has_pending_transitions() {
            continue;
        }

        for transition in tracker.take_transitions() {
            crate::logger::log(&format!(
                "🔀 State: {:?} {:?} → {:?}",
                entity, transition.from, transition.to
            ));
            changes.write(CombatStateChanged {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }
    }
}
