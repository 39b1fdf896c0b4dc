//! Tests for attack input systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::test_support::*;
    use crate::combat::{AttackPressed, CombatState, CombatStateChanged, CombatStateTracker, ComboEngine};
    use crate::movement::HorizontalSpeed;
    use crate::network::HitKind;

    fn press(app: &mut App, entity: Entity) {
        app.world_mut().send_event(AttackPressed { entity });
    }

    fn state(app: &App, entity: Entity) -> CombatState {
        app.world().get::<CombatStateTracker>(entity).unwrap().state()
    }

    #[test]
    fn test_attack_emits_report_and_step() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        press(&mut app, player);
        app.update();

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, HitKind::NormalHit);
        assert_eq!(sent[0].combo_index, 1);
        assert_eq!(sent[0].damage, 15.0);
        assert_eq!(sent[0].attacker, Some(player));
        assert!(sent[0].timestamp > 0.0);

        let observed = app.world().resource::<Observed>();
        assert_eq!(observed.steps.len(), 1);
        assert_eq!(observed.steps[0].step_name, "Slash");
        assert_eq!(observed.steps[0].entity, player);
        assert!(observed.changes.contains(&CombatStateChanged {
            entity: player,
            from: CombatState::Idle,
            to: CombatState::Attacking,
        }));

        assert_eq!(state(&app, player), CombatState::Attacking);
    }

    #[test]
    fn test_same_tick_inputs_debounced() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        press(&mut app, player);
        press(&mut app, player);
        press(&mut app, player);
        app.update();

        assert_eq!(recorder.len(), 1);
        let engine = app.world().get::<ComboEngine>(player).unwrap();
        assert_eq!(engine.combo_index(), 2);
        assert_eq!(engine.stats().current_combo_hits, 1);
    }

    #[test]
    fn test_full_combo_through_inputs() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        for _ in 0..5 {
            press(&mut app, player);
            app.update();
            run_seconds(&mut app, 0.5);
        }

        let kinds: Vec<HitKind> = recorder.sent().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HitKind::NormalHit,
                HitKind::NormalHit,
                HitKind::NormalHit,
                HitKind::ComboHit,
                HitKind::NormalHit
            ]
        );

        let indices: Vec<u32> = recorder.sent().iter().map(|r| r.combo_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 1]);

        let steps: Vec<String> = app
            .world()
            .resource::<Observed>()
            .steps
            .iter()
            .map(|s| s.step_name.clone())
            .collect();
        assert_eq!(steps, vec!["Slash", "Backhand", "Rising Cut", "Finisher", "Slash"]);
    }

    #[test]
    fn test_returns_to_idle_after_animation() {
        let (mut app, _recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        press(&mut app, player);
        app.update();
        run_seconds(&mut app, 0.7);

        assert_eq!(state(&app, player), CombatState::Idle);
        assert!(!app.world().get::<ComboEngine>(player).unwrap().is_attacking());
    }

    #[test]
    fn test_running_player_cannot_attack() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        app.world_mut().get_mut::<HorizontalSpeed>(player).unwrap().0 = 18.0;
        run_seconds(&mut app, 0.2);
        assert_eq!(state(&app, player), CombatState::Running);

        press(&mut app, player);
        app.update();

        assert!(recorder.is_empty());
        assert_eq!(state(&app, player), CombatState::Running);
    }

    #[test]
    fn test_input_for_unknown_entity_ignored() {
        let (mut app, recorder) = create_test_app(animator());
        let stranger = app.world_mut().spawn_empty().id();

        press(&mut app, stranger);
        app.update();

        assert!(recorder.is_empty());
    }

    #[test]
    fn test_reset_after_inactivity_in_app() {
        let (mut app, recorder) = create_test_app(animator());
        let player = spawn_ready_player(&mut app);

        press(&mut app, player);
        app.update();
        run_seconds(&mut app, 0.5);
        press(&mut app, player);
        app.update();

        run_seconds(&mut app, 3.0);
        press(&mut app, player);
        app.update();

        let indices: Vec<u32> = recorder.sent().iter().map(|r| r.combo_index).collect();
        assert_eq!(indices, vec![1, 2, 1]);
    }
}
