// SPDX-License-Identifier: MPL-2.0
//! Built-in icon markup.
//!
//! Icons are inline SVG using `currentColor`, so they follow the toast's
//! type color without extra styling.

use super::options::ToastType;

pub const SUCCESS: &str = r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M10 18a8 8 0 100-16 8 8 0 000 16zm3.707-9.293a1 1 0 00-1.414-1.414L9 10.586 7.707 9.293a1 1 0 00-1.414 1.414l2 2a1 1 0 001.414 0l4-4z" clip-rule="evenodd"></path></svg>"#;

pub const ERROR: &str = r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M10 18a8 8 0 100-16 8 8 0 000 16zM8.707 7.293a1 1 0 00-1.414 1.414L8.586 10l-1.293 1.293a1 1 0 101.414 1.414L10 11.414l1.293 1.293a1 1 0 001.414-1.414L11.414 10l1.293-1.293a1 1 0 00-1.414-1.414L10 8.586 8.707 7.293z" clip-rule="evenodd"></path></svg>"#;

pub const WARNING: &str = r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M8.257 3.099c.765-1.36 2.722-1.36 3.486 0l5.58 9.92c.75 1.334-.213 2.98-1.742 2.98H4.42c-1.53 0-2.493-1.646-1.743-2.98l5.58-9.92zM11 13a1 1 0 11-2 0 1 1 0 012 0zm-1-8a1 1 0 00-1 1v3a1 1 0 002 0V6a1 1 0 00-1-1z" clip-rule="evenodd"></path></svg>"#;

pub const INFO: &str = r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M18 10a8 8 0 11-16 0 8 8 0 0116 0zm-7-4a1 1 0 11-2 0 1 1 0 012 0zM9 9a1 1 0 000 2v3a1 1 0 001 1h1a1 1 0 100-2v-3a1 1 0 00-1-1H9z" clip-rule="evenodd"></path></svg>"#;

/// Spinner used by loading toasts; the arc carries the `spin` class.
pub const SPINNER: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none"><circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="2"/><path d="M12 2a10 10 0 0 1 10 10" stroke="currentColor" stroke-width="2" stroke-linecap="round" class="toast-spin"/></svg>"#;

/// Returns the icon automatically picked for a kind.
///
/// `primary`, `secondary` and unrecognized kinds have none.
#[must_use]
pub fn for_kind(kind: &ToastType) -> Option<&'static str> {
    match kind {
        ToastType::Success => Some(SUCCESS),
        ToastType::Error => Some(ERROR),
        ToastType::Warning => Some(WARNING),
        ToastType::Info => Some(INFO),
        ToastType::Primary | ToastType::Secondary | ToastType::Other(_) => None,
    }
}
