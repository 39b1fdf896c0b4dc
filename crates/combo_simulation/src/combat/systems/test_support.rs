//! Headless App helpers for system tests.

use bevy::prelude::*;

use crate::animation::{AnimationBackend, SimulatedAnimator};
use crate::combat::events::{CombatStateChanged, ComboStepStarted};
use crate::combat::ComboSystems;
use crate::network::{NetworkTransport, RecordingTransport};
use crate::player::{default_combo_animations, spawn_combatant};
use crate::{create_headless_app, SimulationPlugin, FIXED_HZ};

pub const CLIP_DURATION: f32 = 0.6;

/// Events seen by observers during the test.
#[derive(Resource, Default)]
pub struct Observed {
    pub changes: Vec<CombatStateChanged>,
    pub steps: Vec<ComboStepStarted>,
}

fn observe(
    mut changes: EventReader<CombatStateChanged>,
    mut steps: EventReader<ComboStepStarted>,
    mut observed: ResMut<Observed>,
) {
    observed.changes.extend(changes.read().copied());
    observed.steps.extend(steps.read().cloned());
}

pub fn animator() -> SimulatedAnimator {
    SimulatedAnimator::new()
        .with_clip("anim/slash_1", CLIP_DURATION)
        .with_clip("anim/slash_2", CLIP_DURATION)
        .with_clip("anim/slash_3", CLIP_DURATION)
        .with_clip("anim/slash_4", CLIP_DURATION)
}

/// App with simulated animator + recording transport.
pub fn create_test_app(animator: SimulatedAnimator) -> (App, RecordingTransport) {
    let recorder = RecordingTransport::new();

    let mut app = create_headless_app(7);
    app.insert_resource(AnimationBackend::new(animator))
        .insert_resource(NetworkTransport::new(recorder.clone()))
        .add_plugins(SimulationPlugin)
        .init_resource::<Observed>()
        .add_systems(FixedUpdate, observe.in_set(ComboSystems::Teardown));

    // Первый update: нулевой delta
    app.update();

    (app, recorder)
}

/// Spawn player with the default 4-step combo and let it initialize.
pub fn spawn_ready_player(app: &mut App) -> Entity {
    let entity = spawn_combatant(&mut app.world_mut().commands(), default_combo_animations());
    app.world_mut().flush();
    run_ticks(app, 2);
    entity
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

pub fn run_seconds(app: &mut App, seconds: f64) {
    run_ticks(app, (seconds * FIXED_HZ).ceil() as usize);
}
