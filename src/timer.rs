pub struct CountDownTimer {
    target_ms: u32,
}

pub const TICK_TIME_DELAY: u32 = 10;
pub const SPLASH_DELAY: u32 = 2000; // Boot banner
pub const CYCLE_DELAY: u32 = 3000; // 3000ms to match the backend

impl CountDownTimer {
    pub fn new(target_ms: u32) -> CountDownTimer {
        Self { target_ms }
    }

    /// Counts down by the time spent since the last tick
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.target_ms = self.target_ms.saturating_sub(elapsed_ms);
    }

    pub fn set_time(&mut self, ms: u32) {
        self.target_ms = ms;
    }

    pub fn remaining(&self) -> u32 {
        self.target_ms
    }

    pub fn is_finished(&self) -> bool {
        self.target_ms == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timer_is_finished() {
        assert!(CountDownTimer::new(0).is_finished());
    }

    #[test]
    fn test_cycle_elapses_after_enough_ticks() {
        let mut timer = CountDownTimer::new(CYCLE_DELAY);
        for _ in 0..(CYCLE_DELAY / TICK_TIME_DELAY - 1) {
            timer.tick(TICK_TIME_DELAY);
            assert!(!timer.is_finished());
        }
        timer.tick(TICK_TIME_DELAY);
        assert!(timer.is_finished());
    }

    #[test]
    fn test_tick_saturates() {
        let mut timer = CountDownTimer::new(5);
        timer.tick(TICK_TIME_DELAY);
        assert_eq!(timer.remaining(), 0);
        timer.tick(TICK_TIME_DELAY);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_set_time_reloads() {
        let mut timer = CountDownTimer::new(0);
        timer.set_time(CYCLE_DELAY);
        assert!(!timer.is_finished());
        assert_eq!(timer.remaining(), 3000);
    }
}
