// SPDX-License-Identifier: MPL-2.0
//! Timer service abstraction.
//!
//! The toast manager schedules one-shot timers (reveal, countdown, removal)
//! through [`TimerService`] and is told about expiries through
//! [`crate::toasts::Message::TimerFired`]. Keeping delivery explicit means the
//! manager never runs code from inside a timer backend.
//!
//! Two backends ship with the crate:
//!
//! - [`ManualTimers`] - a virtual clock advanced by hand (tests, simulations)
//! - [`TokioTimers`] - real timers on a tokio runtime, reported through
//!   [`FiredTimers`]

mod manual;
mod runtime;

pub use manual::ManualTimers;
pub use runtime::{FiredTimers, TokioTimers};

use std::time::Duration;

/// Identifier of a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Schedules and cancels one-shot timers.
pub trait TimerService {
    /// Monotonic time elapsed since the service was created.
    fn now(&self) -> Duration;

    /// Arms a timer that fires once after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancels a pending timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}
