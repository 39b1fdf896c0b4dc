//! Deferred one-shot timers (cooldown, combo reset).
//!
//! Каждый engine владеет своей очередью и тикает её из FixedUpdate.
//! Таймер не блокирует: по истечении возвращается action, который
//! обрабатывает владелец очереди.

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTimer<A> {
    handle: TimerHandle,
    /// Time remaining until the timer fires (seconds)
    remaining: f32,
    action: A,
}

/// Queue of countdown timers carrying an action each.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    timers: Vec<ScheduledTimer<A>>,
    next_handle: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire after `delay` seconds.
    pub fn schedule(&mut self, delay: f32, action: A) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.timers.push(ScheduledTimer {
            handle,
            remaining: delay.max(0.0),
            action,
        });

        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Advance all timers by `delta` seconds.
    ///
    /// Returns fired actions in scheduling order.
    pub fn tick(&mut self, delta: f32) -> Vec<(TimerHandle, A)> {
        for timer in self.timers.iter_mut() {
            timer.remaining -= delta;
        }

        let mut fired = Vec::new();
        let mut pending = Vec::with_capacity(self.timers.len());
        for timer in self.timers.drain(..) {
            if timer.remaining <= 0.0 {
                fired.push((timer.handle, timer.action));
            } else {
                pending.push(timer);
            }
        }
        self.timers = pending;

        fired
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Number of pending timers whose action matches `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&A) -> bool) -> usize {
        self.timers.iter().filter(|timer| predicate(&timer.action)).count()
    }
}
