//! Sleeper Port
//!
//! Every wait in a deploy run (poll interval, conflict backoff) goes
//! through this trait so tests can observe waits instead of serving them.

use std::time::Duration;

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
