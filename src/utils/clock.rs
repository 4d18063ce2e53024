//! Time source for the session controller

use std::time::Instant;

use chrono::{DateTime, Local};

/// Wall clock for scheduling and gating, monotonic clock for elapsed time
pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;

    fn instant(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}
