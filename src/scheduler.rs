use std::time::{Duration, Instant};

/// Handle for one scheduled tick. Only the handle from the latest
/// [`TickScheduler::schedule`] call is ever honoured.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTick {
    token: TickToken,
    due: Instant,
}

/// Single-slot cancellable tick timer.
///
/// At most one tick is pending. Every schedule or cancel bumps the
/// generation, so a token taken before a pause/resume cycle can never fire.
#[derive(Debug, Default)]
pub struct TickScheduler {
    generation: u64,
    pending: Option<ScheduledTick>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the next tick `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TickToken {
        self.generation += 1;
        let token = TickToken {
            generation: self.generation,
        };
        self.pending = Some(ScheduledTick {
            token,
            due: now + delay,
        });
        token
    }

    /// Drops the pending tick and invalidates every outstanding token.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Takes the pending tick if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TickToken> {
        let scheduled = self.pending?;
        if now < scheduled.due {
            return None;
        }
        self.pending = None;
        Some(scheduled.token)
    }

    /// True when `token` belongs to the latest schedule call.
    #[must_use]
    pub fn is_current(&self, token: TickToken) -> bool {
        token.generation == self.generation
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending tick is due.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|scheduled| scheduled.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;

    const INTERVAL: Duration = Duration::from_millis(125);

    #[test]
    fn tick_fires_only_once_due() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(start, INTERVAL);

        assert!(scheduler.poll(start + Duration::from_millis(124)).is_none());

        let token = scheduler.poll(start + INTERVAL).expect("tick is due");
        assert!(scheduler.is_current(token));
        assert!(scheduler.poll(start + INTERVAL * 2).is_none());
    }

    #[test]
    fn cancel_prevents_firing() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(start, INTERVAL);

        scheduler.cancel();

        assert!(!scheduler.is_pending());
        assert!(scheduler.poll(start + INTERVAL * 10).is_none());
    }

    #[test]
    fn stale_token_is_rejected_after_pause_resume_pause() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(start, INTERVAL);
        let stale = scheduler.poll(start + INTERVAL).expect("tick is due");

        scheduler.cancel();
        scheduler.schedule(start + INTERVAL, INTERVAL);
        scheduler.cancel();

        assert!(!scheduler.is_current(stale));
    }

    #[test]
    fn rescheduling_replaces_the_pending_tick() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        let first = scheduler.schedule(start, INTERVAL);
        let second = scheduler.schedule(start, INTERVAL * 2);

        assert!(!scheduler.is_current(first));
        assert!(scheduler.poll(start + INTERVAL).is_none());
        assert_eq!(scheduler.poll(start + INTERVAL * 2), Some(second));
        assert_eq!(
            scheduler.time_until_due(start),
            None,
            "nothing pending after the tick was taken"
        );
    }
}
