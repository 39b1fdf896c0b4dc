//! Combatant lifecycle: engine creation on spawn, explicit teardown.

use bevy::prelude::*;

use crate::animation::{AnimationBackend, ComboAnimationSet};
use crate::combat::combo::ComboSequence;
use crate::combat::engine::ComboEngine;
use crate::combat::events::ShutdownCombat;
use crate::config::CombatConfig;
use crate::movement::MovementPoll;

/// System: построить `ComboEngine` для новых игроков
///
/// Анимации резолвятся через provider (duration), sequence сортируется и
/// обрезается по `max_combo_length`. Невалидный набор → error log,
/// `ComboAnimationSet` снимается (повторных попыток нет).
pub fn initialize_combatants(
    mut commands: Commands,
    pending: Query<(Entity, &ComboAnimationSet), Without<ComboEngine>>,
    config: Res<CombatConfig>,
    mut backend: ResMut<AnimationBackend>,
) {
    for (entity, animation_set) in pending.iter() {
        let source = animation_set
            .animations
            .iter()
            .map(|(position, animation)| (*position, animation.clone()));

        let provider = &mut *backend.0;
        let sequence = match ComboSequence::build(source, config.max_combo_length, |animation| {
            provider.load(entity, animation)
        }) {
            Ok(sequence) => sequence,
            Err(e) => {
                crate::logger::log_error(&format!(
                    "❌ Combo: cannot initialize {:?}: {}",
                    entity, e
                ));
                commands.entity(entity).remove::<ComboAnimationSet>();
                continue;
            }
        };

        crate::logger::log_info(&format!(
            "🗡️ Combo: initialized {:?} with {} step(s)",
            entity,
            sequence.step_count()
        ));

        commands.entity(entity).insert((
            ComboEngine::new(config.clone(), sequence),
            MovementPoll::new(config.movement_poll_interval),
        ));
    }
}

/// System: explicit teardown
///
/// Reset timer отменяется, counters/pending playbacks сбрасываются.
/// Cooldown/completion callbacks после этого no-op (engine не live).
pub fn process_combat_shutdowns(
    mut events: EventReader<ShutdownCombat>,
    mut engines: Query<&mut ComboEngine>,
    mut backend: ResMut<AnimationBackend>,
) {
    for event in events.read() {
        let Ok(mut engine) = engines.get_mut(event.entity) else {
            crate::logger::log_warning(&format!(
                "⚠️ Combo: shutdown for {:?} without engine",
                event.entity
            ));
            continue;
        };

        if engine.is_live() {
            engine.shutdown(&mut *backend.0);
            crate::logger::log_info(&format!("🛑 Combo: shut down {:?}", event.entity));
        }
    }
}
