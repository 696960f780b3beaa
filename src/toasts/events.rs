// SPDX-License-Identifier: MPL-2.0
//! Lifecycle events reported to an optional logger.

use super::options::{Position, ToastType};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A lifecycle event, stamped with the wall-clock time it happened at.
#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    /// The toast became visible.
    Shown {
        id: String,
        kind: ToastType,
        position: Position,
        duration: Duration,
        at: DateTime<Utc>,
    },
    /// The toast left the page.
    Closed { id: String, at: DateTime<Utc> },
    /// `update` was called with an id that matches no live toast.
    UpdateNotFound { id: String, at: DateTime<Utc> },
}

impl ToastEvent {
    /// Short event name: `shown`, `closed` or `update-not-found`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ToastEvent::Shown { .. } => "shown",
            ToastEvent::Closed { .. } => "closed",
            ToastEvent::UpdateNotFound { .. } => "update-not-found",
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            ToastEvent::Shown { id, .. }
            | ToastEvent::Closed { id, .. }
            | ToastEvent::UpdateNotFound { id, .. } => id,
        }
    }

    #[must_use]
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            ToastEvent::Shown { at, .. }
            | ToastEvent::Closed { at, .. }
            | ToastEvent::UpdateNotFound { at, .. } => *at,
        }
    }
}

/// Receives lifecycle events. A panicking logger is caught and ignored.
pub type Logger = Box<dyn FnMut(&ToastEvent)>;
