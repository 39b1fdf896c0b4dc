//! Deferred callbacks: combo timers and animation completion.

use bevy::prelude::*;

use crate::animation::AnimationBackend;
use crate::combat::engine::{ComboEngine, ComboTimer};
use crate::combat::state::CombatStateTracker;

/// System: обновление cooldown/reset таймеров всех engines
pub fn tick_combo_timers(mut engines: Query<(Entity, &mut ComboEngine)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (entity, mut engine) in engines.iter_mut() {
        for timer in engine.tick(delta) {
            if timer == ComboTimer::ComboReset {
                crate::logger::log(&format!(
                    "⏱️ Combo: reset timer fired for {:?} (index now {})",
                    entity,
                    engine.combo_index()
                ));
            }
        }
    }
}

/// System: advance animation provider, route completions к owner engine
///
/// Completion для удалённого entity или неизвестного playback игнорируется.
pub fn advance_animations(
    mut backend: ResMut<AnimationBackend>,
    mut combatants: Query<(&mut ComboEngine, &mut CombatStateTracker)>,
    time: Res<Time<Fixed>>,
) {
    let finished = backend.0.advance(time.delta_secs());

    for completion in finished {
        let Ok((mut engine, mut tracker)) = combatants.get_mut(completion.owner) else {
            continue;
        };

        engine.on_playback_finished(completion.playback, &mut tracker);
    }
}
