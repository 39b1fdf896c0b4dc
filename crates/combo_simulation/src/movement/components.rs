//! Movement components

use bevy::prelude::*;

/// Горизонтальная скорость (м/с), пишется movement source каждый тик
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HorizontalSpeed(pub f32);

/// Fixed-interval movement polling (независим от attack timers)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MovementPoll {
    /// Интервал опроса (секунды)
    pub interval: f32,

    /// Накопленное время с последнего опроса
    pub elapsed: f32,
}

impl Default for MovementPoll {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl MovementPoll {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Накопить `delta`; true если интервал истёк (лишнее время переносится)
    pub fn tick(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        if self.elapsed < self.interval {
            return false;
        }

        self.elapsed -= self.interval;
        // Длинный кадр не порождает серию опросов подряд
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
        }
        true
    }
}
