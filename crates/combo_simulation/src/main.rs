//! Headless combo simulation
//!
//! Скриптованный игрок: полный combo, пауза до reset, бег, прыжок, смерть.
//! Опционально: путь к TOML конфигу первым аргументом.

use combo_simulation::logger::{log_error, log_info, set_log_level, LogLevel};
use combo_simulation::*;

const SEED: u64 = 42;

/// Scripted input: (tick, action)
#[derive(Debug, Clone, Copy)]
enum ScriptAction {
    Attack,
    Speed(f32),
    Airborne,
    Landed,
    Died,
}

fn script() -> Vec<(usize, ScriptAction)> {
    vec![
        (10, ScriptAction::Attack),
        (40, ScriptAction::Attack),
        // Debounced (cooldown ещё идёт)
        (45, ScriptAction::Attack),
        (70, ScriptAction::Attack),
        (100, ScriptAction::Attack),
        (130, ScriptAction::Attack),
        // > 2.5s тишины → reset
        (320, ScriptAction::Attack),
        (360, ScriptAction::Speed(18.0)),
        (380, ScriptAction::Attack),
        (400, ScriptAction::Speed(0.0)),
        (420, ScriptAction::Airborne),
        (430, ScriptAction::Attack),
        (450, ScriptAction::Landed),
        (470, ScriptAction::Attack),
        (480, ScriptAction::Died),
        (500, ScriptAction::Attack),
    ]
}

fn load_config() -> CombatConfig {
    let Some(path) = std::env::args().nth(1) else {
        return CombatConfig::default();
    };

    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|source| CombatConfig::from_toml_str(&source).map_err(|e| e.to_string()));

    match loaded {
        Ok(config) => {
            log_info(&format!("⚙️ Config loaded from {}", path));
            config
        }
        Err(e) => {
            log_error(&format!("❌ Config {}: {} (using defaults)", path, e));
            CombatConfig::default()
        }
    }
}

fn main() {
    println!("Starting combo simulation (seed: {})", SEED);

    let mut app = create_headless_app(SEED);
    // Debug (каждая смена state) слишком шумный для демо
    set_log_level(LogLevel::Info);
    let recorder = RecordingTransport::new();

    let animator = default_combo_animations()
        .into_iter()
        .fold(SimulatedAnimator::new(), |animator, (_, animation)| {
            animator.with_clip(animation.asset, 0.6)
        });

    app.insert_resource(load_config())
        .insert_resource(AnimationBackend::new(animator))
        .insert_resource(NetworkTransport::new(recorder.clone()))
        .add_plugins(SimulationPlugin);

    let player = spawn_combatant(&mut app.world_mut().commands(), default_combo_animations());

    let script = script();
    for tick in 0..600 {
        for (_, action) in script.iter().filter(|(at, _)| *at == tick) {
            match *action {
                ScriptAction::Attack => {
                    app.world_mut().send_event(AttackPressed { entity: player });
                }
                ScriptAction::Speed(speed) => {
                    if let Some(mut horizontal) = app.world_mut().get_mut::<HorizontalSpeed>(player) {
                        horizontal.0 = speed;
                    }
                }
                ScriptAction::Airborne => {
                    app.world_mut().send_event(LocomotionEvent::airborne(player));
                }
                ScriptAction::Landed => {
                    app.world_mut().send_event(LocomotionEvent::landed(player));
                }
                ScriptAction::Died => {
                    app.world_mut().send_event(LocomotionEvent::died(player));
                }
            }
        }

        app.update();

        if tick % 100 == 0 {
            let state = app
                .world()
                .get::<CombatStateTracker>(player)
                .map(|tracker| tracker.state());
            println!("Tick {}: state {:?}", tick, state);
        }
    }

    if let Some(engine) = app.world().get::<ComboEngine>(player) {
        let stats = engine.stats();
        println!(
            "Stats: index {}, hits {}, highest {}, total damage {:.1}",
            stats.combo_index, stats.current_combo_hits, stats.highest_combo_reached, stats.total_damage_dealt
        );
    }

    println!("Sent {} hit report(s):", recorder.len());
    for report in recorder.sent() {
        match report.to_json() {
            Ok(json) => println!("  {}", json),
            Err(e) => println!("  <encode error: {}>", e),
        }
    }

    println!("Simulation complete!");
}
