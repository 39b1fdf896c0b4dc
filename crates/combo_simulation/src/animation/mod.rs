//! Animation playback boundary.
//!
//! # Architecture
//!
//! **Simulation (this crate):**
//! - `ComboEngine` решает КАКОЙ step играть и когда attack-state заканчивается
//! - Completion приходит как `PlaybackFinished` (через `advance`)
//!
//! **Provider (engine/client layer):**
//! - Загрузка клипа, длительность, старт/стоп, playback rate
//! - `SimulatedAnimator`: headless реализация для тестов и бинарника
//!
//! ```text
//! initialize_combatants → provider.load() → AnimationTrack (duration)
//!   ↓
//! execute_attack → provider.play() → PlaybackId
//!   ↓
//! advance_animations → provider.advance(delta) → PlaybackFinished
//!   ↓
//! ComboEngine::on_playback_finished → isAttacking = false
//! ```

use bevy::prelude::*;
use std::collections::HashMap;

mod simulated;

pub use simulated::SimulatedAnimator;

/// Opaque reference to an animation asset (e.g. `"anim/slash_1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub struct AnimationRef {
    pub asset: String,
    /// Human-readable name for UI/logs
    pub name: Option<String>,
}

impl AnimationRef {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            name: None,
        }
    }

    pub fn named(asset: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            name: Some(name.into()),
        }
    }
}

/// Loaded animation track (one per combo step per player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(pub u64);

/// One play of a track. Replaying a track yields a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(pub u64);

/// Resolved animation: track handle + clip duration (seconds at 1.0x).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTrack {
    pub id: TrackId,
    pub duration: f32,
}

/// Completion notification for a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackFinished {
    pub owner: Entity,
    pub playback: PlaybackId,
}

/// Animation playback provider.
///
/// Implemented by the client layer (engine animator) or by `SimulatedAnimator`.
pub trait AnimationProvider: Send + Sync + 'static {
    /// Resolve an animation for `owner`. `None` means the asset failed to load.
    fn load(&mut self, owner: Entity, animation: &AnimationRef) -> Option<AnimationTrack>;

    /// Start playback at `speed`. `None` if the track is unknown to the provider.
    fn play(&mut self, owner: Entity, track: TrackId, speed: f32) -> Option<PlaybackId>;

    /// Stop a playback. Stopped playbacks still report completion.
    fn stop(&mut self, playback: PlaybackId);

    /// Change playback rate of a running playback.
    fn set_speed(&mut self, playback: PlaybackId, speed: f32);

    /// Advance provider time and drain completions.
    fn advance(&mut self, delta: f32) -> Vec<PlaybackFinished>;
}

/// Resource: active animation provider.
#[derive(Resource)]
pub struct AnimationBackend(pub Box<dyn AnimationProvider>);

impl AnimationBackend {
    pub fn new(provider: impl AnimationProvider) -> Self {
        Self(Box::new(provider))
    }
}

impl Default for AnimationBackend {
    fn default() -> Self {
        Self::new(SimulatedAnimator::default())
    }
}

/// Component: unordered combo animation source (position → animation).
///
/// Spawned on a player; `initialize_combatants` turns it into a `ComboEngine`.
#[derive(Component, Debug, Clone, Default)]
pub struct ComboAnimationSet {
    pub animations: HashMap<u32, AnimationRef>,
}

impl ComboAnimationSet {
    pub fn new(animations: impl IntoIterator<Item = (u32, AnimationRef)>) -> Self {
        Self {
            animations: animations.into_iter().collect(),
        }
    }
}
