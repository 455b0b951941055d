//! Wall-clock sleeper

use std::time::Duration;

use crate::domain::ports::Sleeper;

/// Blocks the current thread for the requested duration
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
