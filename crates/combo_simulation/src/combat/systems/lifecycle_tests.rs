//! Tests for combatant lifecycle and locomotion systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::test_support::*;
    use crate::animation::{AnimationRef, ComboAnimationSet, SimulatedAnimator};
    use crate::combat::{AttackPressed, CombatState, CombatStateTracker, ComboEngine, ShutdownCombat};
    use crate::movement::{HorizontalSpeed, LocomotionEvent, MovementPoll};
    use crate::player::spawn_combatant;

    fn state(app: &App, entity: Entity) -> CombatState {
        app.world().get::<CombatStateTracker>(entity).unwrap().state()
    }

    fn engine(app: &App, entity: Entity) -> &ComboEngine {
        app.world().get::<ComboEngine>(entity).unwrap()
    }

    fn attack(app: &mut App, entity: Entity) {
        app.world_mut().send_event(AttackPressed { entity });
        app.update();
    }

    #[test]
    fn test_engine_initialized_on_spawn() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        let engine = engine(&app, player);
        assert_eq!(engine.sequence().step_count(), 4);
        assert!(engine.sequence().steps().iter().all(|s| s.duration == CLIP_DURATION));
        assert_eq!(engine.combo_index(), 1);
        assert!(engine.is_live());

        let poll = app.world().get::<MovementPoll>(player).unwrap();
        assert_eq!(poll.interval, 0.1);
        assert_eq!(state(&app, player), CombatState::Idle);
    }

    #[test]
    fn test_invalid_animation_set_rejected() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_combatant(&mut app.world_mut().commands(), Vec::new());
        run_ticks(&mut app, 3);

        assert!(app.world().get::<ComboEngine>(player).is_none());
        assert!(app.world().get::<ComboAnimationSet>(player).is_none());
    }

    #[test]
    fn test_unloadable_clips_still_initialize() {
        let (mut app, recorder) = create_test_app(SimulatedAnimator::new());
        let player = spawn_combatant(
            &mut app.world_mut().commands(),
            vec![(1, AnimationRef::new("anim/missing"))],
        );
        run_ticks(&mut app, 2);

        assert!(!engine(&app, player).sequence().first().is_resolved());

        // Без animation атака завершается сразу
        attack(&mut app, player);
        assert_eq!(recorder.len(), 1);
        assert_eq!(state(&app, player), CombatState::Idle);
        assert!(!engine(&app, player).is_attacking());
    }

    #[test]
    fn test_death_resets_combo() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        attack(&mut app, player);
        run_seconds(&mut app, 0.5);
        attack(&mut app, player);

        app.world_mut().send_event(LocomotionEvent::died(player));
        app.update();

        assert_eq!(state(&app, player), CombatState::Dead);
        let engine_after = engine(&app, player);
        assert_eq!(engine_after.combo_index(), 1);
        assert!(!engine_after.is_debounced());
        assert!(!engine_after.is_attacking());
        assert!(engine_after.pending_playbacks().is_empty());

        run_seconds(&mut app, 3.0);
        attack(&mut app, player);
        assert_eq!(recorder.len(), 2);
        assert_eq!(state(&app, player), CombatState::Dead);
    }

    #[test]
    fn test_death_wins_over_air_state() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        app.world_mut().send_event(LocomotionEvent::airborne(player));
        app.world_mut().send_event(LocomotionEvent::died(player));
        app.world_mut().send_event(LocomotionEvent::landed(player));
        app.update();

        assert_eq!(state(&app, player), CombatState::Dead);
    }

    #[test]
    fn test_jump_blocks_attack_until_landing() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        app.world_mut().send_event(LocomotionEvent::airborne(player));
        app.update();
        assert_eq!(state(&app, player), CombatState::Jumping);

        attack(&mut app, player);
        assert!(recorder.is_empty());

        app.world_mut().send_event(LocomotionEvent::landed(player));
        app.update();
        assert_eq!(state(&app, player), CombatState::Idle);

        attack(&mut app, player);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_dead_ignores_air_and_landing() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        app.world_mut().send_event(LocomotionEvent::died(player));
        app.update();
        app.world_mut().send_event(LocomotionEvent::airborne(player));
        app.update();
        app.world_mut().send_event(LocomotionEvent::landed(player));
        app.update();

        assert_eq!(state(&app, player), CombatState::Dead);
    }

    #[test]
    fn test_jump_during_attack_survives_completion() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        attack(&mut app, player);
        app.world_mut().send_event(LocomotionEvent::airborne(player));
        app.update();
        run_seconds(&mut app, 1.0);

        assert_eq!(state(&app, player), CombatState::Jumping);
        assert!(!engine(&app, player).is_attacking());
    }

    #[test]
    fn test_movement_polling() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        app.world_mut().get_mut::<HorizontalSpeed>(player).unwrap().0 = 25.0;
        run_seconds(&mut app, 0.2);
        assert_eq!(state(&app, player), CombatState::Sprinting);

        app.world_mut().get_mut::<HorizontalSpeed>(player).unwrap().0 = 0.0;
        run_seconds(&mut app, 0.2);
        assert_eq!(state(&app, player), CombatState::Idle);

        app.world_mut().get_mut::<HorizontalSpeed>(player).unwrap().0 = 10.0;
        run_seconds(&mut app, 0.2);
        assert_eq!(state(&app, player), CombatState::Moving);
    }

    #[test]
    fn test_polling_skipped_while_attacking() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        attack(&mut app, player);
        app.world_mut().get_mut::<HorizontalSpeed>(player).unwrap().0 = 25.0;
        run_seconds(&mut app, 0.3);

        assert_eq!(state(&app, player), CombatState::Attacking);
    }

    #[test]
    fn test_shutdown_stops_engine() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        attack(&mut app, player);
        app.world_mut().send_event(ShutdownCombat { entity: player });
        app.update();

        let engine_after = engine(&app, player);
        assert!(!engine_after.is_live());
        assert_eq!(engine_after.live_reset_timers(), 0);
        assert_eq!(engine_after.stats().total_damage_dealt, 0.0);

        run_seconds(&mut app, 1.0);
        attack(&mut app, player);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_despawn_with_pending_playback() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        attack(&mut app, player);
        app.world_mut().despawn(player);
        run_seconds(&mut app, 3.0);

        assert!(app.world().get::<ComboEngine>(player).is_none());
    }
}
