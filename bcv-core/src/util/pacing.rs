use std::{thread, time::Duration};

/// Spaces out calls to rate limited services.
pub trait Pacer {
    fn pause(&self);
}

/// Blocks the current thread for a fixed delay on every pause.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(Duration);

impl FixedDelay {
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }

    pub const fn delay(&self) -> Duration {
        self.0
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self(Duration::from_secs(1))
    }
}

impl Pacer for FixedDelay {
    fn pause(&self) {
        if !self.0.is_zero() {
            thread::sleep(self.0);
        }
    }
}
