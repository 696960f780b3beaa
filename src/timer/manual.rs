// SPDX-License-Identifier: MPL-2.0
//! Virtual-clock timer backend.

use super::{TimerId, TimerService};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    /// Pending timers as (deadline, id).
    pending: Vec<(Duration, TimerId)>,
}

impl Clock {
    /// Removes and returns the earliest timer due at or before `until`.
    ///
    /// Ties fire in scheduling order.
    fn pop_due(&mut self, until: Duration) -> Option<(Duration, TimerId)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(_, entry)| *entry)
            .map(|(index, _)| index)?;
        Some(self.pending.remove(index))
    }
}

/// Timers driven by a virtual clock that only moves when [`advance`] is called.
///
/// Clones share the same clock.
///
/// [`advance`]: ManualTimers::advance
#[derive(Debug, Clone, Default)]
pub struct ManualTimers {
    clock: Rc<RefCell<Clock>>,
}

impl ManualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`, handing every timer that comes due to
    /// `deliver` in deadline order.
    ///
    /// The clock reads the timer's deadline while it is delivered, and timers
    /// armed during delivery fire in the same call if they fall inside the
    /// window.
    pub fn advance(&self, by: Duration, mut deliver: impl FnMut(TimerId)) {
        let target = self.clock.borrow().now + by;
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let due = clock.pop_due(target);
                if let Some((deadline, _)) = due {
                    clock.now = clock.now.max(deadline);
                }
                due
            };
            match due {
                Some((_, timer)) => deliver(timer),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.clock.borrow().pending.iter().any(|(_, id)| *id == timer)
    }
}

impl TimerService for ManualTimers {
    fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let id = TimerId::from_raw(clock.next_id);
        clock.next_id += 1;
        let deadline = clock.now + delay;
        clock.pending.push((deadline, id));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.clock.borrow_mut().pending.retain(|(_, id)| *id != timer);
    }
}
