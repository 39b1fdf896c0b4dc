//! Movement events

use bevy::prelude::*;

/// Locomotion notification kind.
///
/// Порядок вариантов = приоритет внутри одного тика (Died > Airborne > Landed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocomotionKind {
    Landed,
    Airborne,
    Died,
}

/// Event: уведомление от physics/health layer
///
/// Генерируется:
/// - Physics layer: Airborne (оторвался от земли), Landed (приземлился)
/// - Health layer: Died
///
/// Обрабатывается:
/// - process_locomotion_events (один результат на entity за тик)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocomotionEvent {
    pub entity: Entity,
    pub kind: LocomotionKind,
}

impl LocomotionEvent {
    pub fn died(entity: Entity) -> Self {
        Self { entity, kind: LocomotionKind::Died }
    }

    pub fn airborne(entity: Entity) -> Self {
        Self { entity, kind: LocomotionKind::Airborne }
    }

    pub fn landed(entity: Entity) -> Self {
        Self { entity, kind: LocomotionKind::Landed }
    }
}
