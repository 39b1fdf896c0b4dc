//! Headless animation provider.
//!
//! Клипы регистрируются заранее (asset → duration). Неизвестный asset
//! не загружается: так моделируется failed load.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{AnimationProvider, AnimationRef, AnimationTrack, PlaybackFinished, PlaybackId, TrackId};

#[derive(Debug, Clone)]
struct LoadedTrack {
    owner: Entity,
    duration: f32,
}

#[derive(Debug, Clone)]
struct ActivePlayback {
    id: PlaybackId,
    owner: Entity,
    track: TrackId,
    /// Clip time left (seconds at 1.0x)
    remaining: f32,
    speed: f32,
    stopped: bool,
}

/// Timer-driven animator without a renderer.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnimator {
    clips: HashMap<String, f32>,
    tracks: HashMap<TrackId, LoadedTrack>,
    playing: Vec<ActivePlayback>,
    next_track: u64,
    next_playback: u64,
}

impl SimulatedAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip duration (seconds at 1.0x).
    pub fn with_clip(mut self, asset: impl Into<String>, duration: f32) -> Self {
        self.clips.insert(asset.into(), duration.max(0.0));
        self
    }

    pub fn add_clip(&mut self, asset: impl Into<String>, duration: f32) {
        self.clips.insert(asset.into(), duration.max(0.0));
    }

    /// Number of playbacks not yet reported as finished.
    pub fn active_playbacks(&self) -> usize {
        self.playing.len()
    }

    pub fn is_playing(&self, playback: PlaybackId) -> bool {
        self.playing
            .iter()
            .any(|active| active.id == playback && !active.stopped)
    }

    pub fn track_owner(&self, track: TrackId) -> Option<Entity> {
        self.tracks.get(&track).map(|loaded| loaded.owner)
    }

    /// Track behind a playback still in flight.
    pub fn playing_track(&self, playback: PlaybackId) -> Option<TrackId> {
        self.playing
            .iter()
            .find(|active| active.id == playback)
            .map(|active| active.track)
    }
}

impl AnimationProvider for SimulatedAnimator {
    fn load(&mut self, owner: Entity, animation: &AnimationRef) -> Option<AnimationTrack> {
        let duration = *self.clips.get(&animation.asset)?;

        let id = TrackId(self.next_track);
        self.next_track += 1;
        self.tracks.insert(id, LoadedTrack { owner, duration });

        Some(AnimationTrack { id, duration })
    }

    fn play(&mut self, owner: Entity, track: TrackId, speed: f32) -> Option<PlaybackId> {
        let loaded = self.tracks.get(&track)?;
        if loaded.owner != owner {
            return None;
        }

        let id = PlaybackId(self.next_playback);
        self.next_playback += 1;

        self.playing.push(ActivePlayback {
            id,
            owner,
            track,
            remaining: loaded.duration,
            speed: speed.max(0.0),
            stopped: false,
        });

        Some(id)
    }

    fn stop(&mut self, playback: PlaybackId) {
        if let Some(active) = self.playing.iter_mut().find(|active| active.id == playback) {
            active.stopped = true;
        }
    }

    fn set_speed(&mut self, playback: PlaybackId, speed: f32) {
        if let Some(active) = self.playing.iter_mut().find(|active| active.id == playback) {
            active.speed = speed.max(0.0);
        }
    }

    fn advance(&mut self, delta: f32) -> Vec<PlaybackFinished> {
        let mut finished = Vec::new();

        self.playing.retain_mut(|active| {
            if !active.stopped {
                active.remaining -= delta * active.speed;
            }

            if active.stopped || active.remaining <= 0.0 {
                finished.push(PlaybackFinished {
                    owner: active.owner,
                    playback: active.id,
                });
                false
            } else {
                true
            }
        });

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Entity {
        Entity::from_raw(7)
    }

    #[test]
    fn test_load_known_and_unknown_clips() {
        let mut animator = SimulatedAnimator::new().with_clip("slash", 0.6);

        let track = animator.load(owner(), &AnimationRef::new("slash")).unwrap();
        assert_eq!(track.duration, 0.6);
        assert_eq!(animator.track_owner(track.id), Some(owner()));

        assert!(animator.load(owner(), &AnimationRef::new("missing")).is_none());
    }

    #[test]
    fn test_playback_completes_after_duration() {
        let mut animator = SimulatedAnimator::new().with_clip("slash", 0.5);
        let track = animator.load(owner(), &AnimationRef::new("slash")).unwrap();
        let playback = animator.play(owner(), track.id, 1.0).unwrap();

        assert!(animator.advance(0.25).is_empty());
        assert!(animator.is_playing(playback));
        assert_eq!(animator.playing_track(playback), Some(track.id));

        let finished = animator.advance(0.25);
        assert_eq!(finished, vec![PlaybackFinished { owner: owner(), playback }]);
        assert_eq!(animator.active_playbacks(), 0);
    }

    #[test]
    fn test_speed_scales_duration() {
        let mut animator = SimulatedAnimator::new().with_clip("slash", 1.0);
        let track = animator.load(owner(), &AnimationRef::new("slash")).unwrap();
        let playback = animator.play(owner(), track.id, 2.0).unwrap();

        assert_eq!(animator.advance(0.5).len(), 1);

        let playback_slow = animator.play(owner(), track.id, 1.0).unwrap();
        animator.set_speed(playback_slow, 0.5);
        assert!(animator.advance(1.0).is_empty());
        assert_eq!(animator.advance(1.0).len(), 1);
        assert_ne!(playback, playback_slow);
    }

    #[test]
    fn test_stop_reports_completion() {
        let mut animator = SimulatedAnimator::new().with_clip("slash", 5.0);
        let track = animator.load(owner(), &AnimationRef::new("slash")).unwrap();
        let playback = animator.play(owner(), track.id, 1.0).unwrap();

        animator.stop(playback);
        assert!(!animator.is_playing(playback));
        assert_eq!(animator.advance(0.0).len(), 1);
    }

    #[test]
    fn test_play_foreign_track_rejected() {
        let mut animator = SimulatedAnimator::new().with_clip("slash", 0.5);
        let track = animator.load(owner(), &AnimationRef::new("slash")).unwrap();
        assert!(animator.play(Entity::from_raw(8), track.id, 1.0).is_none());
    }
}
