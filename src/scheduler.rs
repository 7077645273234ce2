use std::time::Duration;

use tokio::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickInterval {
    Every(Duration),
    /// No ticks until the interval is set again.
    Suspended,
}

/// Decides when the next sampling tick is due.
pub struct Scheduler {
    rate: Duration,
    interval: TickInterval,
    next: Option<Instant>,
}

impl Scheduler {
    pub fn new(rate: Duration) -> Self {
        let rate = rate.max(Duration::from_millis(1));
        Self {
            rate,
            interval: TickInterval::Every(rate),
            next: Some(Instant::now() + rate),
        }
    }

    pub fn interval(&self) -> TickInterval {
        self.interval
    }

    pub fn set_tick_interval(&mut self, interval: TickInterval) {
        self.interval = interval;
        self.next = match interval {
            TickInterval::Every(every) => Some(Instant::now() + every),
            TickInterval::Suspended => None,
        };
    }

    /// When the next tick fires, `None` while suspended.
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Record that the tick due at the current deadline was delivered.
    pub fn tick_delivered(&mut self) {
        if let TickInterval::Every(every) = self.interval {
            let now = Instant::now();
            let mut next = self.next.unwrap_or(now) + every;
            // Don't try to catch up after a stall.
            if next <= now {
                next = now + every;
            }
            self.next = Some(next);
        }
    }

    /// The screen went idle: stop ticking.
    pub fn idle_started(&mut self) {
        self.set_tick_interval(TickInterval::Suspended);
    }

    /// The screen is back. Returns `true` when ticking resumed, meaning the
    /// dock should be repainted.
    pub fn idle_ended(&mut self) -> bool {
        if self.interval != TickInterval::Suspended {
            return false;
        }
        self.set_tick_interval(TickInterval::Every(self.rate));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rate_sets_first_deadline() {
        let start = Instant::now();
        let sched = Scheduler::new(Duration::from_millis(250));
        assert_eq!(sched.deadline(), Some(start + Duration::from_millis(250)));
        assert_eq!(
            sched.interval(),
            TickInterval::Every(Duration::from_millis(250))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_the_rate() {
        let start = Instant::now();
        let mut sched = Scheduler::new(Duration::from_millis(100));
        tokio::time::sleep_until(sched.deadline().unwrap()).await;
        sched.tick_delivered();
        assert_eq!(sched.deadline(), Some(start + Duration::from_millis(200)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stall_does_not_burst() {
        let mut sched = Scheduler::new(Duration::from_millis(100));
        tokio::time::advance(Duration::from_millis(550)).await;
        sched.tick_delivered();
        let now = Instant::now();
        assert_eq!(sched.deadline(), Some(now + Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_suspends_and_resumes() {
        let mut sched = Scheduler::new(Duration::from_millis(250));
        sched.idle_started();
        assert_eq!(sched.interval(), TickInterval::Suspended);
        assert!(sched.deadline().is_none());
        sched.tick_delivered();
        assert!(sched.deadline().is_none());

        assert!(sched.idle_ended());
        assert_eq!(
            sched.interval(),
            TickInterval::Every(Duration::from_millis(250))
        );
        assert!(sched.deadline().is_some());
        assert!(!sched.idle_ended());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_rate_is_raised() {
        let sched = Scheduler::new(Duration::ZERO);
        assert_eq!(sched.interval(), TickInterval::Every(Duration::from_millis(1)));
    }
}
