//! Movement-driven state transitions.

use bevy::prelude::*;

use crate::animation::AnimationBackend;
use crate::combat::engine::ComboEngine;
use crate::combat::state::{derive_movement_state, CombatState, CombatStateTracker};
use crate::config::CombatConfig;
use crate::movement::{HorizontalSpeed, LocomotionEvent, LocomotionKind, MovementPoll};

/// System: применить locomotion уведомления
///
/// Несколько уведомлений для одного entity за тик → побеждает старшее
/// (Died > Airborne > Landed). Dead игнорирует Airborne/Landed.
pub fn process_locomotion_events(
    mut events: EventReader<LocomotionEvent>,
    mut combatants: Query<(&mut CombatStateTracker, Option<&mut ComboEngine>)>,
    mut backend: ResMut<AnimationBackend>,
) {
    // Порядок первого появления (детерминизм логов)
    let mut resolved: Vec<(Entity, LocomotionKind)> = Vec::new();
    for event in events.read() {
        match resolved.iter_mut().find(|(entity, _)| *entity == event.entity) {
            Some((_, kind)) => *kind = (*kind).max(event.kind),
            None => resolved.push((event.entity, event.kind)),
        }
    }

    for (entity, kind) in resolved {
        let Ok((mut tracker, engine)) = combatants.get_mut(entity) else {
            crate::logger::log_warning(&format!(
                "⚠️ Locomotion {:?} for unknown combatant {:?}",
                kind, entity
            ));
            continue;
        };

        match kind {
            LocomotionKind::Died => match engine {
                Some(mut engine) => engine.on_death(entity, &mut tracker, &mut *backend.0),
                None => {
                    tracker.set_state(CombatState::Dead);
                }
            },
            LocomotionKind::Airborne => {
                if !tracker.is(CombatState::Dead) {
                    tracker.set_state(CombatState::Jumping);
                }
            }
            LocomotionKind::Landed => {
                if tracker.is(CombatState::Jumping) {
                    tracker.set_state(CombatState::Idle);
                }
            }
        }
    }
}

/// System: опрос горизонтальной скорости с фиксированным интервалом
///
/// Пропускается пока Attacking (а также Jumping/Dead: их movement rule не трогает).
pub fn poll_movement_state(
    mut query: Query<(&HorizontalSpeed, &mut MovementPoll, &mut CombatStateTracker)>,
    config: Res<CombatConfig>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (speed, mut poll, mut tracker) in query.iter_mut() {
        if !poll.tick(delta) {
            continue;
        }

        let current = tracker.state();
        if current.blocks_movement_rule() {
            continue;
        }

        let next = derive_movement_state(speed.0, current, &config.movement);
        if next != current {
            tracker.set_state(next);
        }
    }
}
