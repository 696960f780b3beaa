// SPDX-License-Identifier: MPL-2.0
//! Tokio-backed timer backend.
//!
//! Each scheduled timer is a task sleeping on the runtime; when it wakes it
//! reports its id over an unbounded channel. The UI loop drains
//! [`FiredTimers`] and forwards ids to the toast manager, so all toast state
//! stays on the UI thread.

use super::{TimerId, TimerService};
use crate::error::Result;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Receiving end of a [`TokioTimers`] service.
#[derive(Debug)]
pub struct FiredTimers {
    receiver: UnboundedReceiver<TimerId>,
}

impl FiredTimers {
    /// Waits for the next timer to fire.
    ///
    /// Returns `None` once the service has been dropped and every fired id
    /// has been drained.
    pub async fn recv(&mut self) -> Option<TimerId> {
        self.receiver.recv().await
    }

    /// Returns an already fired timer without waiting.
    pub fn try_recv(&mut self) -> Option<TimerId> {
        self.receiver.try_recv().ok()
    }
}

/// Timers running on a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    handle: Handle,
    epoch: Instant,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    sender: UnboundedSender<TimerId>,
}

impl TokioTimers {
    /// Creates a timer service spawning on `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> (Self, FiredTimers) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let timers = Self {
            handle,
            epoch: Instant::now(),
            next_id: 0,
            tasks: HashMap::new(),
            sender,
        };
        (timers, FiredTimers { receiver })
    }

    /// Creates a timer service on the runtime the caller is running in.
    pub fn from_current() -> Result<(Self, FiredTimers)> {
        let handle = Handle::try_current()?;
        Ok(Self::new(handle))
    }
}

impl TimerService for TokioTimers {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());

        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;
        let sender = self.sender.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may be gone during shutdown
            let _ = sender.send(id);
        });
        tracing::trace!(timer = id.raw(), delay_ms = delay.as_millis() as u64, "timer armed");
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(task) = self.tasks.remove(&timer) {
            task.abort();
            tracing::trace!(timer = timer.raw(), "timer cancelled");
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
