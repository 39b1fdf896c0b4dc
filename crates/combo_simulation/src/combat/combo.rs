//! Combo sequence (built once per player at spawn).

use std::collections::HashSet;

use thiserror::Error;

use crate::animation::{AnimationRef, AnimationTrack};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComboSequenceError {
    #[error("combo animation set is empty")]
    Empty,

    #[error("combo position must be >= 1 (got 0)")]
    ZeroPosition,

    #[error("duplicate combo position {0}")]
    DuplicatePosition(u32),
}

/// One attack of the combo chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboStep {
    /// Ordering key (unique, >= 1)
    pub position: u32,
    pub animation: AnimationRef,
    pub display_name: String,
    /// Resolved track; `None` when the animation failed to load
    pub track: Option<AnimationTrack>,
    /// Clip duration (seconds), 0 until resolved
    pub duration: f32,
}

impl ComboStep {
    pub fn is_resolved(&self) -> bool {
        self.track.is_some()
    }
}

/// Ordered, immutable list of combo steps.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboSequence {
    steps: Vec<ComboStep>,
}

impl ComboSequence {
    /// Sort the source mapping by position and resolve each animation.
    ///
    /// Positions above `max_len` are dropped with a warning. `resolve` returning
    /// `None` keeps the step with `track = None` (fallback happens at attack time).
    pub fn build(
        source: impl IntoIterator<Item = (u32, AnimationRef)>,
        max_len: u32,
        mut resolve: impl FnMut(&AnimationRef) -> Option<AnimationTrack>,
    ) -> Result<Self, ComboSequenceError> {
        let mut entries: Vec<(u32, AnimationRef)> = source.into_iter().collect();

        let mut seen = HashSet::new();
        for (position, _) in &entries {
            if *position == 0 {
                return Err(ComboSequenceError::ZeroPosition);
            }
            if !seen.insert(*position) {
                return Err(ComboSequenceError::DuplicatePosition(*position));
            }
        }

        entries.sort_by_key(|(position, _)| *position);

        let before = entries.len();
        entries.retain(|(position, _)| *position <= max_len);
        if entries.len() != before {
            crate::logger::log_warning(&format!(
                "⚠️ Combo: dropped {} step(s) beyond max combo length {}",
                before - entries.len(),
                max_len
            ));
        }

        if entries.is_empty() {
            return Err(ComboSequenceError::Empty);
        }

        let steps = entries
            .into_iter()
            .map(|(position, animation)| {
                let track = resolve(&animation);
                if track.is_none() {
                    crate::logger::log_warning(&format!(
                        "⚠️ Combo: animation '{}' for step {} failed to load",
                        animation.asset, position
                    ));
                }

                let display_name = animation
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Attack {}", position));

                ComboStep {
                    position,
                    display_name,
                    duration: track.map(|t| t.duration).unwrap_or(0.0),
                    track,
                    animation,
                }
            })
            .collect();

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step count as combo index upper bound.
    pub fn step_count(&self) -> u32 {
        self.steps.len() as u32
    }

    /// Step at 1-based combo index.
    pub fn get(&self, combo_index: u32) -> Option<&ComboStep> {
        let slot = combo_index.checked_sub(1)?;
        self.steps.get(slot as usize)
    }

    /// First step (a built sequence is never empty).
    pub fn first(&self) -> &ComboStep {
        &self.steps[0]
    }

    pub fn steps(&self) -> &[ComboStep] {
        &self.steps
    }
}
