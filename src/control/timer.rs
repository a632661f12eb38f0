//! Fixed-interval repeating timer polled from the event loop.

use std::time::{Duration, Instant};

/// Repeating timer that fires at most once per poll.
///
/// Nothing runs in the background: the owner asks for `deadline()` to
/// schedule its next wake-up and calls `poll()` when it wakes. Fires that
/// were missed while the loop was busy are dropped, not replayed.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: Duration,
    next_fire: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_fire: None,
        }
    }

    /// Arm the timer; the first fire is one interval after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Next instant the timer wants to fire, if running
    pub fn deadline(&self) -> Option<Instant> {
        self.next_fire
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if the timer fired, re-arming it for the next period
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_fire else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_fire = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = RepeatingTimer::new(TICK);
        let now = Instant::now();

        assert!(!timer.poll(now + TICK * 10));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = RepeatingTimer::new(TICK);
        let start = Instant::now();
        timer.start(start);

        assert!(!timer.poll(start + Duration::from_millis(99)));
        assert!(timer.poll(start + TICK));
        assert!(!timer.poll(start + TICK));
        assert_eq!(timer.deadline(), Some(start + TICK * 2));
        assert!(timer.poll(start + TICK * 2));
    }

    #[test]
    fn test_missed_fires_are_skipped() {
        let mut timer = RepeatingTimer::new(TICK);
        let start = Instant::now();
        timer.start(start);

        let late = start + Duration::from_millis(550);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.deadline(), Some(late + TICK));
    }

    #[test]
    fn test_restart_rearms_from_now() {
        let mut timer = RepeatingTimer::new(TICK);
        let start = Instant::now();
        timer.start(start);
        timer.stop();
        assert!(!timer.is_running());

        let later = start + Duration::from_millis(40);
        timer.start(later);
        assert!(!timer.poll(start + TICK));
        assert!(timer.poll(later + TICK));
    }
}
