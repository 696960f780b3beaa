// SPDX-License-Identifier: MPL-2.0
//! Pausable auto-close countdown.
//!
//! Pure bookkeeping: the manager owns the timer service and hands the
//! current time and freshly armed timer ids in.

use crate::timer::TimerId;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Countdown {
    total: Duration,
    remaining: Duration,
    /// When the running segment started; `None` while paused or not started.
    started_at: Option<Duration>,
    timer: Option<TimerId>,
}

impl Countdown {
    pub(crate) fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
            started_at: None,
            timer: None,
        }
    }

    /// Starts (or restarts) a running segment at `now`, backed by `timer`.
    ///
    /// Returns the timer that was running before, if any, so it can be
    /// cancelled.
    pub(crate) fn resume(&mut self, now: Duration, timer: TimerId) -> Option<TimerId> {
        self.started_at = Some(now);
        self.timer.replace(timer)
    }

    /// Freezes the countdown at `now`.
    ///
    /// Returns the timer to cancel, or `None` when it was not running.
    pub(crate) fn pause(&mut self, now: Duration) -> Option<TimerId> {
        let started = self.started_at.take()?;
        self.remaining = self
            .remaining
            .saturating_sub(now.saturating_sub(started));
        self.timer.take()
    }

    /// Time left at `now`.
    pub(crate) fn remaining_at(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(started) => self.remaining.saturating_sub(now.saturating_sub(started)),
            None => self.remaining,
        }
    }

    /// Share of the total still left at `now`, in `0.0..=1.0`.
    pub(crate) fn fraction_remaining(&self, now: Duration) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.remaining_at(now).as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub(crate) fn timer(&self) -> Option<TimerId> {
        self.timer
    }
}
