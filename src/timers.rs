// Pending timer set driven by a virtual clock.
//
// Nothing here reads wall-clock time: the owner advances the clock with frame
// deltas and pops due actions one at a time, so each action runs to completion
// before the next one is looked at.

use std::time::Duration;

use bevy::prelude::*;

/// Identifies one scheduled action until it fires or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<A> {
    handle: TimerHandle,
    due: Duration,
    action: A,
}

#[derive(Debug)]
pub struct PendingTimers<A> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for PendingTimers<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> PendingTimers<A> {
    /// Current position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Schedule `action` to fire `delay` after the current clock position.
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: self.now + delay,
            action,
        });
        debug!("timer {} scheduled in {:?}", handle.0, delay);
        handle
    }

    /// Returns false when the handle already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        let cancelled = self.pending.len() != before;
        if cancelled {
            debug!("timer {} cancelled", handle.0);
        }
        cancelled
    }

    /// Drop every pending action. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        if count > 0 {
            debug!("cancelled {count} pending timers");
        }
        count
    }

    /// Remove and return the earliest action due at or before `deadline`,
    /// moving the clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<A> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.handle.0))?;
        let fired = self.pending.swap_remove(index);
        self.now = self.now.max(fired.due);
        Some(fired.action)
    }

    /// Move the clock forward to `deadline` once nothing else is due.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
impl<A> PendingTimers<A> {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
