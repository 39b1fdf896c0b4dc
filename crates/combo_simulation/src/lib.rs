//! Combo Simulation Core
//!
//! Per-player melee combo controller на Bevy 0.16 (headless ECS).
//!
//! - ECS = combat state, combo resolution, damage/crit, timers
//! - Provider layer = animation playback (`AnimationProvider`),
//!   сетевой transport (`CombatTransport`)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod animation;
pub mod combat;
pub mod config;
pub mod logger;
pub mod movement;
pub mod network;
pub mod player;
pub mod timers;

// Re-export основных типов для удобства
pub use animation::{
    AnimationBackend, AnimationProvider, AnimationRef, AnimationTrack, ComboAnimationSet, PlaybackFinished,
    PlaybackId, SimulatedAnimator, TrackId,
};
pub use combat::{
    AttackOutcome, AttackPressed, CombatPlugin, CombatState, CombatStateChanged, CombatStateTracker, ComboEngine,
    ComboSequence, ComboSequenceError, ComboStats, ComboStepStarted, ComboSystems, ShutdownCombat,
};
pub use config::{CombatConfig, ConfigError, MovementThresholds};
pub use logger::init_logger;
pub use movement::{HorizontalSpeed, LocomotionEvent, LocomotionKind, MovementPlugin, MovementPoll};
pub use network::{CombatTransport, HitKind, HitReport, LoggingTransport, NetworkTransport, RecordingTransport};
pub use player::{default_combo_animations, spawn_combatant, Player};

/// Fixed simulation rate (Hz)
pub const FIXED_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Ресурсы, вставленные заранее (RNG, config, animation backend), не перетираются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .init_resource::<CombatConfig>()
            .init_resource::<AnimationBackend>()
            // Подсистемы
            .add_plugins((CombatPlugin, MovementPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` продвигает время ровно на один fixed tick
/// (первый update: нулевой delta).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )));

    app
}

/// Snapshot компонента T по всем entities для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
