use std::time::Duration;
#[cfg(not(feature = "wasm"))]
use std::time::Instant;
#[cfg(feature = "wasm")]
// If WASM compilation is required, use web-time's Instant instead
use web_time::Instant;

// Tracks how much of a move's time budget has been spent. Owns a deadline
// computed once at construction time and a sticky `timeout` flag, so that
// the search can poll `times_up` as often as it likes without repeatedly
// hitting the system clock.
pub struct TimeManager {
    start: Instant,
    deadline: Instant,
    timeout: bool,
}

impl TimeManager {
    pub fn new(time_budget: Duration) -> Self {
        let start = Instant::now();
        Self { start, deadline: start + time_budget, timeout: false }
    }

    // Recomputes `timeout` against the current time. The search calls this
    // roughly every 1024 nodes rather than on every node visited.
    pub fn update(&mut self) {
        if !self.timeout {
            self.timeout = Instant::now() >= self.deadline;
        }
    }

    pub fn times_up(&self) -> bool {
        self.timeout
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_up_is_false_until_the_deadline_passes() {
        let mut timer = TimeManager::new(Duration::from_millis(50));
        timer.update();
        assert!(!timer.times_up());

        std::thread::sleep(Duration::from_millis(70));
        timer.update();
        assert!(timer.times_up());
    }

    #[test]
    fn timeout_is_sticky_once_set() {
        let mut timer = TimeManager::new(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        timer.update();
        assert!(timer.times_up());

        // A fresh `update` call after the flag is already set must not
        // "un-set" it, even though `now` keeps advancing past the deadline.
        timer.update();
        assert!(timer.times_up());
    }
}
