//! Damage and critical hit rules.
//!
//! Формулы:
//! - Local damage: base(position) × damage_multiplier × (crit ? critical_multiplier : 1)
//! - base(1) = 10, base(2) = 15, base(3) = 20, base(4+) = 30 × combo_power
//! - Reported damage считается отдельно (см. `report_damage`)

use rand::Rng;

use crate::config::CombatConfig;

/// Finisher base damage before `combo_power`.
pub const FINISHER_BASE_DAMAGE: f32 = 30.0;

/// Base damage of a combo step by its position.
pub fn base_damage(position: u32, combo_power: f32) -> f32 {
    match position {
        1 => 10.0,
        2 => 15.0,
        3 => 20.0,
        _ => FINISHER_BASE_DAMAGE * combo_power,
    }
}

/// Roll a critical hit with a fresh uniform draw in [0, 1).
///
/// Always critical once `combo_hits >= config.guaranteed_crit_hits`.
pub fn roll_critical(rng: &mut impl Rng, combo_hits: u32, config: &CombatConfig) -> bool {
    let roll: f32 = rng.gen();
    is_critical(roll, combo_hits, config)
}

/// Critical decision for a given draw.
pub fn is_critical(roll: f32, combo_hits: u32, config: &CombatConfig) -> bool {
    roll <= config.critical_chance || combo_hits >= config.guaranteed_crit_hits
}

/// Local (cosmetic) damage for a step.
pub fn calculate_damage(position: u32, critical: bool, config: &CombatConfig) -> f32 {
    let mut damage = base_damage(position, config.combo_power) * config.damage_multiplier;

    if critical {
        damage *= config.critical_multiplier;
    }

    damage
}

/// Damage value sent to the server.
///
/// Finisher: `30 × combo_power`. Otherwise `10 + combo_index × 5`.
/// Не совпадает с local damage для позиций >= 4 и не учитывает multiplier/crit.
pub fn report_damage(combo_index: u32, is_finisher: bool, combo_power: f32) -> f32 {
    if is_finisher {
        FINISHER_BASE_DAMAGE * combo_power
    } else {
        10.0 + combo_index as f32 * 5.0
    }
}
