//! Virtual-clock timer queue.
//!
//! Timers carry a task value instead of a callback; the page loop pops due
//! tasks and routes them to their owners. Ordering is by due time, then by
//! scheduling order, which gives `setTimeout`/`setInterval` semantics without
//! wall-clock time.

use core::time::Duration;
use log::trace;

/// Handle returned by [`TimerQueue::set_timeout`] and [`TimerQueue::set_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: Duration,
    /// Tie-breaker among timers with the same due time; refreshed when an interval re-arms.
    seq: u64,
    period: Option<Duration>,
    task: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    /// Current virtual time since the queue was created.
    pub const fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Schedule `task` to fire once after `delay`.
    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TimerId {
        self.schedule(delay, None, task)
    }

    /// Schedule `task` to fire every `period`, first after one full period.
    /// A zero period is treated as one millisecond.
    pub fn set_interval(&mut self, period: Duration, task: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), task)
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let seq = self.take_seq();
        let due = self.now.saturating_add(delay);
        trace!("timer {id:?} scheduled at {due:?} (period {period:?})");
        self.timers.push(Timer {
            id,
            due,
            seq,
            period,
            task,
        });
        id
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        seq
    }

    /// Cancel a timer. Returns false when it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        let removed = self.timers.len() != before;
        if removed {
            trace!("timer {id:?} cancelled");
        }
        removed
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Move the clock to `until` without firing anything.
    /// Never moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Interval timers are re-armed one period later and keep
    /// their id.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;
        self.now = self.now.max(self.timers.get(position)?.due);

        let rearm_seq = self.take_seq();
        let timer = self.timers.get_mut(position)?;
        let fired = (timer.id, timer.task.clone());
        if let Some(period) = timer.period {
            timer.due = timer.due.saturating_add(period);
            timer.seq = rearm_seq;
        } else {
            self.timers.swap_remove(position);
        }
        trace!("timer {:?} fired at {:?}", fired.0, self.now);
        Some(fired)
    }
}
