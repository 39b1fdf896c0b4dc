//! Combat systems (thin ECS adapters over ComboEngine / CombatStateTracker)

pub mod attack;
pub mod lifecycle;
pub mod timers;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod attack_tests;
#[cfg(test)]
mod lifecycle_tests;

// Re-export all systems
pub use attack::*;
pub use lifecycle::*;
pub use timers::*;
