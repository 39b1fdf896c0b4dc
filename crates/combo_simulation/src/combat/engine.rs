//! Combo engine: attack legality, combo resolution, timers.
//!
//! # Attack Flow
//!
//! ```text
//! AttackPressed
//!   ↓
//! execute_attack: debounce / can_attack check
//!   ↓
//! state → Attacking, step resolve (fallback → step 1), play animation
//!   ↓
//! crit roll, local damage, counters, HitReport (independent crit re-roll)
//!   ↓
//! combo_index advance (wrap), reset timer restart, completion registered, cooldown armed
//!   ↓
//! tick: CooldownExpired → debounce = false
//!       ComboReset → combo_index = 1 (если не атакуем)
//! on_playback_finished → isAttacking = false, Attacking → Idle
//! ```
//!
//! Все изменения state/counters происходят синхронно внутри `execute_attack`,
//! до того как любой deferred callback может их увидеть.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::{AnimationProvider, PlaybackId};
use crate::combat::combo::ComboSequence;
use crate::combat::damage::{calculate_damage, report_damage, roll_critical};
use crate::combat::state::{CombatState, CombatStateTracker};
use crate::config::CombatConfig;
use crate::network::{HitKind, HitReport};
use crate::timers::{TimerHandle, TimerQueue};

/// Deferred engine callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboTimer {
    /// Attack cooldown elapsed → clear debounce
    CooldownExpired,
    /// Combo inactivity elapsed → rewind to step 1
    ComboReset,
}

/// Result of a successful attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    /// Combo index that fired (before advancing)
    pub combo_index: u32,
    /// Position of the step actually played (1 after fallback)
    pub step_position: u32,
    pub step_name: String,
    pub damage: f32,
    pub is_critical: bool,
    pub playback: Option<PlaybackId>,
    pub report: HitReport,
}

/// Read-only counters for UI.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComboStats {
    pub combo_index: u32,
    pub current_combo_hits: u32,
    pub highest_combo_reached: u32,
    pub total_damage_dealt: f32,
}

/// Component: per-player combo engine.
#[derive(Component, Debug, Clone)]
pub struct ComboEngine {
    config: CombatConfig,
    sequence: ComboSequence,

    /// Next step to execute, 1..=step_count
    combo_index: u32,
    /// Cooldown window open → new attacks rejected
    debounce: bool,
    /// From attack start until animation completion
    is_attacking: bool,

    current_combo_hits: u32,
    highest_combo_reached: u32,
    total_damage_dealt: f32,

    timers: TimerQueue<ComboTimer>,
    /// The single live reset timer
    reset_timer: Option<TimerHandle>,
    /// Playbacks with a registered completion callback
    pending_playbacks: Vec<PlaybackId>,

    /// false after shutdown; late callbacks no-op
    live: bool,
}

impl ComboEngine {
    pub fn new(config: CombatConfig, sequence: ComboSequence) -> Self {
        Self {
            config,
            sequence,
            combo_index: 1,
            debounce: false,
            is_attacking: false,
            current_combo_hits: 0,
            highest_combo_reached: 0,
            total_damage_dealt: 0.0,
            timers: TimerQueue::new(),
            reset_timer: None,
            pending_playbacks: Vec::new(),
            live: true,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn sequence(&self) -> &ComboSequence {
        &self.sequence
    }

    pub fn combo_index(&self) -> u32 {
        self.combo_index
    }

    pub fn is_debounced(&self) -> bool {
        self.debounce
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn stats(&self) -> ComboStats {
        ComboStats {
            combo_index: self.combo_index,
            current_combo_hits: self.current_combo_hits,
            highest_combo_reached: self.highest_combo_reached,
            total_damage_dealt: self.total_damage_dealt,
        }
    }

    /// Number of live reset timers (0 or 1).
    pub fn live_reset_timers(&self) -> usize {
        self.timers.count_matching(|timer| *timer == ComboTimer::ComboReset)
    }

    pub fn pending_cooldowns(&self) -> usize {
        self.timers.count_matching(|timer| *timer == ComboTimer::CooldownExpired)
    }

    pub fn pending_playbacks(&self) -> &[PlaybackId] {
        &self.pending_playbacks
    }

    /// Idle/Moving allow attacks; Attacking allows combo chaining.
    pub fn can_attack(&self, tracker: &CombatStateTracker) -> bool {
        matches!(
            tracker.state(),
            CombatState::Idle | CombatState::Moving | CombatState::Attacking
        )
    }

    /// Run one attack input. `None` = rejected, nothing changed.
    pub fn execute_attack(
        &mut self,
        owner: Entity,
        tracker: &mut CombatStateTracker,
        animations: &mut dyn AnimationProvider,
        rng: &mut impl Rng,
        now: f64,
    ) -> Option<AttackOutcome> {
        if !self.live || self.debounce || !self.can_attack(tracker) {
            return None;
        }

        self.debounce = true;
        self.is_attacking = true;
        tracker.set_state(CombatState::Attacking);

        let fired_index = self.combo_index;
        let step_count = self.sequence.step_count();

        // Step resolve: failed animation → step 1
        let step = match self.sequence.get(fired_index) {
            Some(step) if step.is_resolved() => step,
            _ => {
                crate::logger::log_warning(&format!(
                    "⚠️ Combo: step {} has no animation (entity: {:?}), falling back to step 1",
                    fired_index, owner
                ));
                self.sequence.first()
            }
        };
        let step_position = step.position;
        let step_name = step.display_name.clone();
        let track = step.track;

        let playback = match track {
            Some(track) => animations.play(owner, track.id, self.config.animation_speed),
            None => None,
        };
        if playback.is_none() {
            crate::logger::log_warning(&format!(
                "⚠️ Combo: no playable animation for '{}' (entity: {:?})",
                step_name, owner
            ));
        }

        let is_critical = roll_critical(rng, self.current_combo_hits, &self.config);
        let damage = calculate_damage(step_position, is_critical, &self.config);
        self.total_damage_dealt += damage;
        self.current_combo_hits += 1;
        self.highest_combo_reached = self.highest_combo_reached.max(self.current_combo_hits);

        // Report: отдельный crit draw и своя формула урона
        let is_finisher = fired_index == step_count;
        let report = HitReport {
            attacker: Some(owner),
            kind: if is_finisher { HitKind::ComboHit } else { HitKind::NormalHit },
            combo_index: fired_index,
            damage: report_damage(fired_index, is_finisher, self.config.combo_power),
            is_critical: roll_critical(rng, self.current_combo_hits, &self.config),
            timestamp: now,
        };

        self.combo_index += 1;
        if self.combo_index > step_count {
            self.combo_index = 1;
        }

        self.restart_reset_timer();

        match playback {
            Some(playback) => self.pending_playbacks.push(playback),
            None => self.finish_attack(tracker),
        }

        self.timers.schedule(self.config.attack_cooldown, ComboTimer::CooldownExpired);

        crate::logger::log(&format!(
            "⚔️ Combo: {} (entity: {:?}, index: {}, damage: {:.1}{})",
            step_name,
            owner,
            fired_index,
            damage,
            if is_critical { ", CRIT" } else { "" }
        ));

        Some(AttackOutcome {
            combo_index: fired_index,
            step_position,
            step_name,
            damage,
            is_critical,
            playback,
            report,
        })
    }

    /// Cancel the live reset timer (if any) and schedule a new one.
    pub fn restart_reset_timer(&mut self) {
        if let Some(handle) = self.reset_timer.take() {
            self.timers.cancel(handle);
        }
        let handle = self
            .timers
            .schedule(self.config.combo_reset_delay, ComboTimer::ComboReset);
        self.reset_timer = Some(handle);
    }

    /// Advance timers by `delta` seconds and apply expiries.
    pub fn tick(&mut self, delta: f32) -> Vec<ComboTimer> {
        let fired = self.timers.tick(delta);
        let mut applied = Vec::with_capacity(fired.len());

        for (handle, timer) in fired {
            match timer {
                ComboTimer::CooldownExpired => self.on_cooldown_expired(),
                ComboTimer::ComboReset => {
                    if self.reset_timer == Some(handle) {
                        self.reset_timer = None;
                    }
                    self.on_combo_reset();
                }
            }
            applied.push(timer);
        }

        applied
    }

    fn on_cooldown_expired(&mut self) {
        if !self.live {
            return;
        }
        self.debounce = false;
    }

    fn on_combo_reset(&mut self) {
        if !self.live {
            return;
        }

        if !self.is_attacking && self.combo_index > 1 {
            crate::logger::log(&format!(
                "🔄 Combo: reset after inactivity (was index {}, hits {})",
                self.combo_index, self.current_combo_hits
            ));
            self.combo_index = 1;
            self.current_combo_hits = 0;
        }
    }

    /// Animation completion callback. Returns false for unknown/stale playbacks.
    pub fn on_playback_finished(
        &mut self,
        playback: PlaybackId,
        tracker: &mut CombatStateTracker,
    ) -> bool {
        if !self.live {
            return false;
        }

        let Some(slot) = self.pending_playbacks.iter().position(|p| *p == playback) else {
            return false;
        };
        self.pending_playbacks.swap_remove(slot);

        self.finish_attack(tracker);
        true
    }

    fn finish_attack(&mut self, tracker: &mut CombatStateTracker) {
        self.is_attacking = false;

        // Не перетираем state который сменился по другой причине (смерть, прыжок)
        if tracker.is(CombatState::Attacking) {
            tracker.set_state(CombatState::Idle);
        }
    }

    /// Death: immediate reset, bypassing timer expiry.
    ///
    /// Таймеры не отменяются; при срабатывании они no-op через guards.
    pub fn on_death(
        &mut self,
        owner: Entity,
        tracker: &mut CombatStateTracker,
        animations: &mut dyn AnimationProvider,
    ) {
        tracker.set_state(CombatState::Dead);

        self.combo_index = 1;
        self.is_attacking = false;
        self.debounce = false;

        self.current_combo_hits = 0;
        self.highest_combo_reached = 0;
        self.total_damage_dealt = 0.0;

        for playback in self.pending_playbacks.drain(..) {
            animations.stop(playback);
        }

        crate::logger::log_info(&format!("💀 Combo: entity {:?} died, combo reset", owner));
    }

    /// Explicit teardown: cancel reset timer, discard counters, mark not live.
    pub fn shutdown(&mut self, animations: &mut dyn AnimationProvider) {
        if !self.live {
            return;
        }

        if let Some(handle) = self.reset_timer.take() {
            self.timers.cancel(handle);
        }
        for playback in self.pending_playbacks.drain(..) {
            animations.stop(playback);
        }

        self.combo_index = 1;
        self.is_attacking = false;
        self.debounce = false;
        self.current_combo_hits = 0;
        self.highest_combo_reached = 0;
        self.total_damage_dealt = 0.0;
        self.live = false;
    }
}
