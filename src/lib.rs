// SPDX-License-Identifier: MPL-2.0
//! `toastrack` manages toast notifications: transient messages that appear,
//! count down and disappear on their own.
//!
//! The crate owns the lifecycle only. Drawing goes through the
//! [`surface::Surface`] trait and timing through [`timer::TimerService`], so
//! the same manager drives a browser DOM, a retained widget tree or the
//! in-memory surface used in tests.

#![doc(html_root_url = "https://docs.rs/toastrack/0.1.0")]

pub mod config;
pub mod error;
pub mod i18n;
pub mod surface;
pub mod timer;
pub mod toasts;

pub use error::{Error, Result};
pub use toasts::{Message, ToastHandle, ToastOptions, Toasts};
