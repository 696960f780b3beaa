// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for built-in toast labels.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! Only the strings the toast system itself produces are localized: the close
//! button label, confirm/cancel actions, the loading message and status chips.
//! Caller-supplied titles and messages are never translated.
//!
//! # Features
//!
//! - Locale resolution from an explicit language, config, or system settings
//! - Embedded `.ftl` translation files
//! - Fallback to `en-US` when translations are missing

pub mod fluent;

pub use fluent::I18n;
