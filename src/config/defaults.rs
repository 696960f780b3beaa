// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for toast configuration.
//!
//! This module is the single source of truth for the built-in layer that sits
//! beneath global defaults and per-call options. Constants are organized by
//! category.
//!
//! # Categories
//!
//! - **Durations**: Auto-close countdowns per preset
//! - **Lifecycle**: Fixed reveal and removal delays
//! - **Identifiers**: Generated id shape

use std::time::Duration;

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Auto-close duration for a plain `show` call (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Auto-close duration for `success` toasts.
pub const SUCCESS_DURATION_MS: u64 = 5000;

/// Auto-close duration for `error` toasts. Errors stay longer so they get read.
pub const ERROR_DURATION_MS: u64 = 8000;

/// Auto-close duration for `warning` toasts.
pub const WARNING_DURATION_MS: u64 = 6000;

/// Auto-close duration for `info` toasts.
pub const INFO_DURATION_MS: u64 = 4000;

/// Auto-close duration for titled `notification` toasts.
pub const NOTIFICATION_DURATION_MS: u64 = 4000;

// ==========================================================================
// Lifecycle Defaults
// ==========================================================================

/// Delay between insertion and the `shown` transition, so the entry
/// animation starts from a committed layout.
pub const REVEAL_DELAY: Duration = Duration::from_millis(10);

/// Delay between entering `closing` and detaching the element.
/// Matches the exit transition length of the stylesheet.
pub const REMOVE_DELAY: Duration = Duration::from_millis(300);

// ==========================================================================
// Identifier Defaults
// ==========================================================================

/// Prefix of generated toast identifiers.
pub const ID_PREFIX: &str = "toast-";

/// Number of random base-36 characters in a generated identifier.
pub const ID_RANDOM_LEN: usize = 9;
