//! Deferred work on a logical millisecond clock.
//!
//! Every component owns one `Scheduler`. The host feeds it the current time
//! and drains whatever is due; nothing in here reads a wall clock, so tests
//! drive it by hand.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    handle: TaskHandle,
    due: u64,
    seq: u64,
    interval: Option<u64>,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
    next_handle: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
            next_handle: 0,
        }
    }

    pub fn schedule_once(&mut self, now: u64, delay: u64, task: T) -> TaskHandle {
        self.push(now + delay, None, task)
    }

    pub fn schedule_repeating(&mut self, now: u64, interval: u64, task: T) -> TaskHandle {
        // A zero interval would fire forever within one drain.
        let interval = interval.max(1);
        self.push(now + interval, Some(interval), task)
    }

    /// Returns false when the handle already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest task due at or before `now`. Ties go to whichever was
    /// scheduled first. Repeating tasks are re-armed one interval later.
    pub fn pop_due(&mut self, now: u64) -> Option<T> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        match self.entries[pos].interval {
            Some(interval) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[pos];
                entry.due += interval;
                entry.seq = seq;
                Some(entry.task.clone())
            }
            None => Some(self.entries.swap_remove(pos).task),
        }
    }

    fn push(&mut self, due: u64, interval: Option<u64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            handle,
            due,
            seq,
            interval,
            task,
        });
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, now: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(now) {
            fired.push(task);
        }
        fired
    }

    #[test]
    fn fires_in_due_then_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule_once(0, 150, "late");
        s.schedule_once(0, 100, "early");
        s.schedule_once(50, 100, "tie");

        assert!(drain(&mut s, 99).is_empty());
        assert_eq!(drain(&mut s, 150), vec!["early", "late", "tie"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn repeating_task_rearms() {
        let mut s = Scheduler::new();
        let handle = s.schedule_repeating(0, 4000, "tick");

        assert_eq!(drain(&mut s, 12_000), vec!["tick", "tick", "tick"]);
        assert!(s.is_scheduled(handle));
        assert!(drain(&mut s, 15_999).is_empty());
    }

    #[test]
    fn cancel_is_false_for_stale_handles() {
        let mut s = Scheduler::new();
        let once = s.schedule_once(0, 10, "once");
        assert_eq!(drain(&mut s, 10), vec!["once"]);
        assert!(!s.cancel(once));

        let rep = s.schedule_repeating(10, 10, "rep");
        assert!(s.cancel(rep));
        assert!(!s.cancel(rep));
        assert!(drain(&mut s, 1_000).is_empty());
    }
}
