use tracing::debug;

use crate::scheduler::{Scheduler, TaskHandle};

/// Owns the single auto-advance schedule of one carousel.
///
/// `start` always cancels a running schedule first, so at most one is ever
/// armed. `stop` without a running schedule does nothing.
#[derive(Debug)]
pub struct AutoAdvanceTimer {
    interval_ms: u64,
    handle: Option<TaskHandle>,
}

impl AutoAdvanceTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            handle: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, now: u64, task: T) {
        self.stop(scheduler);
        self.handle = Some(scheduler.schedule_repeating(now, self.interval_ms, task));
        debug!(interval_ms = self.interval_ms, "auto-advance started");
    }

    pub fn stop<T: Clone>(&mut self, scheduler: &mut Scheduler<T>) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
            debug!("auto-advance stopped");
        }
    }
}
