// SPDX-License-Identifier: MPL-2.0
//! Toast notifications with a timed, pausable lifecycle.
//!
//! Toasts are transient notifications stacked in one container per screen
//! position. Each one is revealed shortly after creation, counts down while
//! visible (pausing while hovered) and is removed after its exit animation.
//!
//! # Components
//!
//! - [`options`] - Option layers and their resolution into a [`ToastConfig`]
//! - [`toast`] - Renderer building a toast's elements on a surface
//! - [`manager`] - [`Toasts`], the lifecycle manager
//! - [`events`] - Lifecycle events for an optional logger
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use toastrack::surface::MemorySurface;
//! use toastrack::timer::ManualTimers;
//! use toastrack::toasts::{Message, ToastOptions, ToastState, Toasts};
//!
//! let timers = ManualTimers::new();
//! let mut toasts = Toasts::new(MemorySurface::new(), timers.clone());
//!
//! let handle = toasts.success("Saved", ToastOptions::new().duration(Duration::from_millis(1000)));
//!
//! // Feed fired timers back into the manager
//! timers.advance(Duration::from_millis(2000), |timer| {
//!     toasts.handle_message(&Message::TimerFired(timer));
//! });
//! assert_eq!(toasts.state(&handle), ToastState::Removed);
//! ```

mod countdown;
pub mod events;
pub mod icons;
pub mod manager;
pub mod options;
pub mod toast;

pub use events::{Logger, ToastEvent};
pub use manager::{
    ConfirmCallback, ConfirmOptions, Message, ToastHandle, ToastRef, ToastState, Toasts, CLOSED_EVENT,
    SHOWN_EVENT,
};
pub use options::{
    generate_id, resolve, Action, ActionCallback, Animation, Position, ProgressPosition, Size,
    ToastConfig, ToastOptions, ToastType, Variant,
};
pub use toast::Rendered;
