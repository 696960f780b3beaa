// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The [`Toasts`] manager owns every live toast: it resolves options, renders
//! elements, places them in per-position containers and drives the
//! reveal / countdown / removal timers. Hosts feed UI input and timer expiries
//! back through [`Toasts::handle_message`].

use super::countdown::Countdown;
use super::events::{Logger, ToastEvent};
use super::icons;
use super::options::{resolve, Action, Animation, Position, Size, ToastConfig, ToastOptions, ToastType, Variant};
use super::toast::{self, class, Rendered};
use crate::config::defaults::{
    ERROR_DURATION_MS, INFO_DURATION_MS, NOTIFICATION_DURATION_MS, REMOVE_DELAY, REVEAL_DELAY,
    SUCCESS_DURATION_MS, WARNING_DURATION_MS,
};
use crate::config::Config;
use crate::i18n::I18n;
use crate::surface::{NodeId, Surface};
use crate::timer::{TimerId, TimerService};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Duration;

/// Event dispatched on a toast element once it is visible.
pub const SHOWN_EVENT: &str = "toast:shown";

/// Event dispatched on a toast element right before it is detached.
pub const CLOSED_EVENT: &str = "toast:closed";

/// Reference to exactly one toast, returned by every show-like operation.
///
/// Ids may be reused by callers; the handle keeps addressing the toast it
/// was returned for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastHandle {
    id: String,
    serial: u64,
}

impl ToastHandle {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Either a precise handle or an element id.
///
/// Ids resolve to the most recently shown live toast carrying that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastRef {
    Handle(ToastHandle),
    Id(String),
}

impl From<ToastHandle> for ToastRef {
    fn from(handle: ToastHandle) -> Self {
        ToastRef::Handle(handle)
    }
}

impl From<&ToastHandle> for ToastRef {
    fn from(handle: &ToastHandle) -> Self {
        ToastRef::Handle(handle.clone())
    }
}

impl From<&str> for ToastRef {
    fn from(id: &str) -> Self {
        ToastRef::Id(id.to_string())
    }
}

impl From<String> for ToastRef {
    fn from(id: String) -> Self {
        ToastRef::Id(id)
    }
}

impl From<&String> for ToastRef {
    fn from(id: &String) -> Self {
        ToastRef::Id(id.clone())
    }
}

/// Lifecycle state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastState {
    /// Inserted, waiting for the reveal timer.
    Created,
    Shown,
    /// Countdown frozen while the pointer is over the toast.
    Paused,
    /// Exit animation running; removal is scheduled.
    Closing,
    /// Detached. Terminal.
    Removed,
}

impl ToastState {
    /// Whether the toast still counts as present.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, ToastState::Created | ToastState::Shown | ToastState::Paused)
    }
}

/// Input for the manager: UI events translated by the host, and timer
/// expiries reported by the timer backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PointerEnter(ToastRef),
    PointerLeave(ToastRef),
    /// The close button was pressed.
    CloseButton(ToastRef),
    /// The toast body was clicked.
    Click(ToastRef),
    /// An action button was pressed.
    Action { toast: ToastRef, index: usize },
    TimerFired(TimerId),
}

/// Callback of a confirmation toast button.
pub type ConfirmCallback = Rc<dyn Fn(&mut Toasts)>;

/// Options for [`Toasts::confirm`].
#[derive(Clone, Default)]
pub struct ConfirmOptions {
    /// Overrides applied on top of the confirmation preset.
    pub options: ToastOptions,
    pub on_confirm: Option<ConfirmCallback>,
    pub on_cancel: Option<ConfirmCallback>,
}

impl ConfirmOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn on_confirm(mut self, callback: impl Fn(&mut Toasts) + 'static) -> Self {
        self.on_confirm = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, callback: impl Fn(&mut Toasts) + 'static) -> Self {
        self.on_cancel = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for ConfirmOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmOptions")
            .field("options", &self.options)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPurpose {
    Reveal,
    Countdown,
    Removal,
}

/// Timer service plus the owner of every armed timer.
struct Scheduler {
    service: Box<dyn TimerService>,
    owners: HashMap<TimerId, (u64, TimerPurpose)>,
}

impl Scheduler {
    fn now(&self) -> Duration {
        self.service.now()
    }

    fn arm(&mut self, serial: u64, purpose: TimerPurpose, delay: Duration) -> TimerId {
        let timer = self.service.schedule(delay);
        self.owners.insert(timer, (serial, purpose));
        timer
    }

    fn disarm(&mut self, timer: TimerId) {
        self.service.cancel(timer);
        self.owners.remove(&timer);
    }

    /// Takes ownership of a fired timer. Stale or foreign ids yield `None`.
    fn claim(&mut self, timer: TimerId) -> Option<(u64, TimerPurpose)> {
        self.owners.remove(&timer)
    }
}

struct Container {
    position: Position,
    node: NodeId,
    /// Serials in display order.
    toasts: Vec<u64>,
}

struct ToastRecord {
    handle: ToastHandle,
    config: ToastConfig,
    rendered: Rendered,
    state: ToastState,
    countdown: Countdown,
    reveal: Option<TimerId>,
}

/// Manages the toasts drawn on one surface.
pub struct Toasts {
    surface: Box<dyn Surface>,
    scheduler: Scheduler,
    i18n: I18n,
    builtins: ToastOptions,
    defaults: ToastOptions,
    logger: Option<Logger>,
    records: BTreeMap<u64, ToastRecord>,
    containers: Vec<Container>,
    next_serial: u64,
}

impl fmt::Debug for Toasts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toasts")
            .field("i18n", &self.i18n)
            .field("defaults", &self.defaults)
            .field("toasts", &self.records.len())
            .field("containers", &self.containers.len())
            .field("armed_timers", &self.scheduler.owners.len())
            .finish_non_exhaustive()
    }
}

impl Toasts {
    /// Creates a manager drawing on `surface` and timing with `timers`.
    ///
    /// Labels follow the system locale; see [`Toasts::with_i18n`].
    pub fn new(surface: impl Surface + 'static, timers: impl TimerService + 'static) -> Self {
        Self {
            surface: Box::new(surface),
            scheduler: Scheduler {
                service: Box::new(timers),
                owners: HashMap::new(),
            },
            i18n: I18n::default(),
            builtins: ToastOptions::builtin(),
            defaults: ToastOptions::new(),
            logger: None,
            records: BTreeMap::new(),
            containers: Vec::new(),
            next_serial: 0,
        }
    }

    /// Creates a manager using the language and global defaults of `config`.
    pub fn from_config(
        config: &Config,
        surface: impl Surface + 'static,
        timers: impl TimerService + 'static,
    ) -> Self {
        let mut toasts = Self::new(surface, timers).with_i18n(I18n::new(None, config));
        toasts.defaults = config.defaults.clone();
        toasts
    }

    #[must_use]
    pub fn with_i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Current global defaults.
    #[must_use]
    pub fn defaults(&self) -> &ToastOptions {
        &self.defaults
    }

    // ---------------------------------------------------------------------
    // Show-like operations
    // ---------------------------------------------------------------------

    /// Shows a toast and returns immediately; it becomes visible after the
    /// reveal delay.
    pub fn show(&mut self, options: ToastOptions) -> ToastHandle {
        let config = resolve(&self.builtins, &self.defaults, options);
        self.insert(config)
    }

    pub fn success(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        self.preset(ToastType::Success, SUCCESS_DURATION_MS, icons::SUCCESS, message.into(), options)
    }

    pub fn error(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        self.preset(ToastType::Error, ERROR_DURATION_MS, icons::ERROR, message.into(), options)
    }

    pub fn warning(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        self.preset(ToastType::Warning, WARNING_DURATION_MS, icons::WARNING, message.into(), options)
    }

    pub fn info(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        self.preset(ToastType::Info, INFO_DURATION_MS, icons::INFO, message.into(), options)
    }

    /// Kind presets: duration and icon sit beneath the caller's options, the
    /// kind and message always win.
    fn preset(
        &mut self,
        kind: ToastType,
        duration_ms: u64,
        icon: &str,
        message: String,
        options: ToastOptions,
    ) -> ToastHandle {
        let call = ToastOptions::new()
            .duration(Duration::from_millis(duration_ms))
            .icon(icon)
            .merge(options)
            .merge(ToastOptions::new().kind(kind).message(message));
        self.show(call)
    }

    /// Shows a warning that stays until one of its Cancel / Confirm buttons
    /// is pressed. The toast is closed before the matching callback runs.
    pub fn confirm(&mut self, message: impl Into<String>, confirm: ConfirmOptions) -> ToastHandle {
        let ConfirmOptions {
            options,
            on_confirm,
            on_cancel,
        } = confirm;

        let cancel = Action::new(self.i18n.tr("toast-cancel"))
            .class("btn-secondary")
            .on_click(move |toasts, handle| {
                toasts.close(handle);
                if let Some(callback) = &on_cancel {
                    callback(toasts);
                }
            });
        let accept = Action::new(self.i18n.tr("toast-confirm"))
            .class("btn-primary")
            .on_click(move |toasts, handle| {
                toasts.close(handle);
                if let Some(callback) = &on_confirm {
                    callback(toasts);
                }
            });

        let call = ToastOptions::new()
            .kind(ToastType::Warning)
            .duration(Duration::ZERO)
            .closable(false)
            .actions(vec![cancel, accept])
            .merge(options)
            .merge(ToastOptions::new().message(message));
        self.show(call)
    }

    /// Shows a spinner toast that never closes on its own.
    ///
    /// The message defaults to the localized "Loading..." label.
    pub fn loading(&mut self, message: Option<&str>, options: ToastOptions) -> ToastHandle {
        let message = message.map_or_else(|| self.i18n.tr("toast-loading"), str::to_string);
        let call = ToastOptions::new()
            .kind(ToastType::Info)
            .message(message)
            .closable(false)
            .duration(Duration::ZERO)
            .icon(icons::SPINNER)
            .merge(options);
        let handle = self.show(call);
        if let Some(record) = self.records.get(&handle.serial) {
            self.surface.add_class(record.rendered.root, class::LOADING);
        }
        handle
    }

    /// Shows a toast with the full modern styling preset.
    pub fn modern(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        let call = ToastOptions::new()
            .message(message)
            .progress(true)
            .progress_background(true)
            .pause_on_hover(true)
            .glassmorphism(true)
            .animation(Animation::Slide)
            .size(Size::Md)
            .variant(Variant::Filled)
            .merge(options);
        self.show(call)
    }

    /// Shows a titled informational toast.
    pub fn notification(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        options: ToastOptions,
    ) -> ToastHandle {
        let call = ToastOptions::new()
            .title(title)
            .message(message)
            .kind(ToastType::Info)
            .progress(true)
            .progress_background(true)
            .pause_on_hover(true)
            .glassmorphism(true)
            .animation(Animation::Slide)
            .size(Size::Md)
            .duration(Duration::from_millis(NOTIFICATION_DURATION_MS))
            .merge(options);
        self.show(call)
    }

    fn insert(&mut self, config: ToastConfig) -> ToastHandle {
        let rendered = toast::render(self.surface.as_mut(), &config, &self.i18n);
        let serial = self.next_serial;
        self.next_serial += 1;

        let container = self.container_index(&config.position);
        self.surface.append_child(self.containers[container].node, rendered.root);
        self.containers[container].toasts.push(serial);

        let handle = ToastHandle {
            id: config.id.clone(),
            serial,
        };
        let reveal = self.scheduler.arm(serial, TimerPurpose::Reveal, REVEAL_DELAY);
        tracing::debug!(id = %handle.id, kind = %config.kind, position = %config.position, "toast created");

        self.records.insert(
            serial,
            ToastRecord {
                handle: handle.clone(),
                countdown: Countdown::new(config.duration),
                config,
                rendered,
                state: ToastState::Created,
                reveal: Some(reveal),
            },
        );
        handle
    }

    /// Index of the container for `position`, creating it on first use.
    fn container_index(&mut self, position: &Position) -> usize {
        if let Some(index) = self.containers.iter().position(|c| &c.position == position) {
            return index;
        }
        let node = self.surface.create_element("div");
        self.surface.add_class(node, class::CONTAINER);
        self.surface
            .add_class(node, &toast::container_class(position.as_str()));
        self.surface.set_attribute(node, "data-position", position.as_str());
        let mount = self.surface.mount_point();
        self.surface.append_child(mount, node);
        self.containers.push(Container {
            position: position.clone(),
            node,
            toasts: Vec::new(),
        });
        self.containers.len() - 1
    }

    // ---------------------------------------------------------------------
    // Closing
    // ---------------------------------------------------------------------

    /// Starts closing a toast.
    ///
    /// Returns `false` when the target cannot be resolved or is already
    /// closing or removed.
    pub fn close(&mut self, target: impl Into<ToastRef>) -> bool {
        match self.resolve_ref(&target.into()) {
            Some(serial) => self.begin_close(serial),
            None => false,
        }
    }

    pub fn close_all(&mut self) {
        for serial in self.live_serials(|_| true) {
            self.begin_close(serial);
        }
    }

    /// Closes every live toast of `kind`, or all of them when `None`.
    pub fn clear(&mut self, kind: Option<&ToastType>) {
        match kind {
            Some(kind) => {
                for serial in self.live_serials(|record| &record.config.kind == kind) {
                    self.begin_close(serial);
                }
            }
            None => self.close_all(),
        }
    }

    fn begin_close(&mut self, serial: u64) -> bool {
        let now = self.scheduler.now();
        let Some(record) = self.records.get_mut(&serial) else {
            return false;
        };
        if !record.state.is_live() {
            return false;
        }

        if let Some(reveal) = record.reveal.take() {
            self.scheduler.disarm(reveal);
        }
        if let Some(timer) = record.countdown.pause(now) {
            self.scheduler.disarm(timer);
        }

        let root = record.rendered.root;
        self.surface.remove_class(root, class::PAUSED);
        self.surface.remove_class(root, class::SHOW);
        self.surface.add_class(root, class::HIDE);

        record.state = ToastState::Closing;
        self.scheduler.arm(serial, TimerPurpose::Removal, REMOVE_DELAY);
        tracing::debug!(id = %record.handle.id, "toast closing");
        true
    }

    fn finish_removal(&mut self, serial: u64) {
        let Some(record) = self.records.remove(&serial) else {
            return;
        };
        let root = record.rendered.root;
        let id = record.handle.id;

        self.surface.dispatch(root, CLOSED_EVENT, &id);
        self.notify(ToastEvent::Closed {
            id: id.clone(),
            at: Utc::now(),
        });
        self.surface.remove(root);
        for container in &mut self.containers {
            container.toasts.retain(|s| *s != serial);
        }
        tracing::debug!(id = %id, "toast removed");
    }

    // ---------------------------------------------------------------------
    // Timers
    // ---------------------------------------------------------------------

    fn timer_fired(&mut self, timer: TimerId) {
        let Some((serial, purpose)) = self.scheduler.claim(timer) else {
            tracing::trace!(timer = timer.raw(), "ignoring stale timer");
            return;
        };
        match purpose {
            TimerPurpose::Reveal => self.reveal(serial),
            TimerPurpose::Countdown => {
                let now = self.scheduler.now();
                let expired = self.records.get_mut(&serial).is_some_and(|record| {
                    let armed = record.state == ToastState::Shown
                        && record.countdown.timer() == Some(timer);
                    if armed {
                        // Already claimed, nothing left to cancel
                        let _ = record.countdown.pause(now);
                    }
                    armed
                });
                if expired {
                    self.begin_close(serial);
                }
            }
            TimerPurpose::Removal => self.finish_removal(serial),
        }
    }

    fn reveal(&mut self, serial: u64) {
        let now = self.scheduler.now();
        let Some(record) = self.records.get_mut(&serial) else {
            return;
        };
        if record.state != ToastState::Created {
            return;
        }
        record.reveal = None;
        record.state = ToastState::Shown;

        let root = record.rendered.root;
        self.surface.add_class(root, class::SHOW);
        if record.config.auto_closes() {
            let remaining = record.countdown.remaining_at(now);
            toast::run_progress(self.surface.as_mut(), &record.rendered, remaining);
            let timer = self.scheduler.arm(serial, TimerPurpose::Countdown, remaining);
            if let Some(previous) = record.countdown.resume(now, timer) {
                self.scheduler.disarm(previous);
            }
        }
        self.surface.dispatch(root, SHOWN_EVENT, &record.handle.id);
        tracing::debug!(id = %record.handle.id, duration_ms = record.config.duration.as_millis() as u64, "toast shown");

        let event = ToastEvent::Shown {
            id: record.handle.id.clone(),
            kind: record.config.kind.clone(),
            position: record.config.position.clone(),
            duration: record.config.duration,
            at: Utc::now(),
        };
        self.notify(event);
    }

    fn pause(&mut self, serial: u64) {
        let now = self.scheduler.now();
        let Some(record) = self.records.get_mut(&serial) else {
            return;
        };
        if record.state != ToastState::Shown
            || !record.config.pause_on_hover
            || !record.config.auto_closes()
        {
            return;
        }
        if let Some(timer) = record.countdown.pause(now) {
            self.scheduler.disarm(timer);
        }
        record.state = ToastState::Paused;
        let fraction = record.countdown.fraction_remaining(now);
        toast::freeze_progress(self.surface.as_mut(), &record.rendered, fraction);
        self.surface.add_class(record.rendered.root, class::PAUSED);
        tracing::trace!(id = %record.handle.id, fraction, "countdown paused");
    }

    fn resume(&mut self, serial: u64) {
        let now = self.scheduler.now();
        let Some(record) = self.records.get_mut(&serial) else {
            return;
        };
        if record.state != ToastState::Paused {
            return;
        }
        record.state = ToastState::Shown;
        self.surface.remove_class(record.rendered.root, class::PAUSED);

        let remaining = record.countdown.remaining_at(now);
        toast::run_progress(self.surface.as_mut(), &record.rendered, remaining);
        let timer = self.scheduler.arm(serial, TimerPurpose::Countdown, remaining);
        if let Some(previous) = record.countdown.resume(now, timer) {
            self.scheduler.disarm(previous);
        }
        tracing::trace!(id = %record.handle.id, remaining_ms = remaining.as_millis() as u64, "countdown resumed");
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Handles UI input or a fired timer.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::PointerEnter(target) => {
                if let Some(serial) = self.resolve_ref(target) {
                    self.pause(serial);
                }
            }
            Message::PointerLeave(target) => {
                if let Some(serial) = self.resolve_ref(target) {
                    self.resume(serial);
                }
            }
            Message::CloseButton(target) => {
                if let Some(serial) = self.resolve_ref(target) {
                    self.begin_close(serial);
                }
            }
            Message::Click(target) => {
                let Some(serial) = self.resolve_ref(target) else {
                    return;
                };
                if self
                    .records
                    .get(&serial)
                    .is_some_and(|record| record.config.click_to_close)
                {
                    self.begin_close(serial);
                }
            }
            Message::Action { toast, index } => self.run_action(toast, *index),
            Message::TimerFired(timer) => self.timer_fired(*timer),
        }
    }

    fn run_action(&mut self, target: &ToastRef, index: usize) {
        let Some(serial) = self.resolve_ref(target) else {
            return;
        };
        let Some(record) = self.records.get(&serial) else {
            return;
        };
        if !record.state.is_live() {
            return;
        }
        let handle = record.handle.clone();
        let Some(callback) = record
            .config
            .actions
            .get(index)
            .and_then(|action| action.on_click.clone())
        else {
            return;
        };

        if panic::catch_unwind(AssertUnwindSafe(|| callback(self, &handle))).is_err() {
            tracing::warn!(id = %handle.id, index, "toast action callback panicked");
        }
    }

    // ---------------------------------------------------------------------
    // Update & queries
    // ---------------------------------------------------------------------

    /// Updates the title, message, kind and icon of a live toast in place.
    ///
    /// Other keys of `options` are ignored. Returns `false` (and reports
    /// `UpdateNotFound` to the logger) when no live toast has this id.
    pub fn update(&mut self, id: &str, options: ToastOptions) -> bool {
        let Some(serial) = self.live_serial(id) else {
            tracing::warn!(id, "toast not found for update");
            self.notify(ToastEvent::UpdateNotFound {
                id: id.to_string(),
                at: Utc::now(),
            });
            return false;
        };
        let Some(record) = self.records.get_mut(&serial) else {
            return false;
        };
        let surface = self.surface.as_mut();

        if let Some(title) = options.title {
            match record.rendered.title {
                Some(node) => surface.set_text(node, &title),
                None if !title.is_empty() => {
                    let left = toast::ensure_header(surface, &mut record.rendered);
                    let node = toast::title_node(surface, &title);
                    surface.append_child(left, node);
                    record.rendered.title = Some(node);
                }
                None => {}
            }
            record.config.title = Some(title).filter(|t| !t.is_empty());
        }

        if let Some(message) = options.message {
            match record.rendered.body {
                Some(node) => surface.set_markup(node, &message),
                None if !message.is_empty() => {
                    let node = toast::body_node(surface, &message);
                    match record.rendered.header {
                        Some(header) => surface.insert_after(record.rendered.content, node, header),
                        None => surface.prepend_child(record.rendered.content, node),
                    }
                    record.rendered.body = Some(node);
                }
                None => {}
            }
            record.config.message = message;
        }

        if let Some(kind) = options.kind {
            toast::retag_kind(surface, &record.rendered, &record.config, &kind, &self.i18n);
            record.config.kind = kind;
        }

        if let Some(icon) = options.icon {
            if icon.is_empty() {
                if let Some(node) = record.rendered.icon.take() {
                    surface.remove(node);
                }
                record.config.icon = None;
            } else {
                match record.rendered.icon {
                    Some(node) => surface.set_markup(node, &icon),
                    None => {
                        let left = toast::ensure_header(surface, &mut record.rendered);
                        let node = toast::icon_node(surface, &icon);
                        surface.prepend_child(left, node);
                        record.rendered.icon = Some(node);
                    }
                }
                record.config.icon = Some(icon);
            }
        }

        tracing::debug!(id, "toast updated");
        true
    }

    /// Number of live toasts, optionally only those of `kind`.
    #[must_use]
    pub fn count(&self, kind: Option<&ToastType>) -> usize {
        self.records
            .values()
            .filter(|record| record.state.is_live())
            .filter(|record| kind.is_none_or(|kind| &record.config.kind == kind))
            .count()
    }

    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.live_serial(id).is_some()
    }

    /// Handle of the most recent live toast with this id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ToastHandle> {
        self.live_serial(id)
            .and_then(|serial| self.records.get(&serial))
            .map(|record| record.handle.clone())
    }

    /// Shallow-merges `options` into the global defaults. Calls accumulate.
    pub fn set_defaults(&mut self, options: ToastOptions) {
        self.defaults = std::mem::take(&mut self.defaults).merge(options);
    }

    /// Installs or removes the lifecycle logger.
    pub fn set_logger(&mut self, logger: Option<Logger>) {
        self.logger = logger;
    }

    #[must_use]
    pub fn state(&self, handle: &ToastHandle) -> ToastState {
        self.records
            .get(&handle.serial)
            .map_or(ToastState::Removed, |record| record.state)
    }

    /// Resolved configuration; reflects later `update` calls.
    #[must_use]
    pub fn config(&self, handle: &ToastHandle) -> Option<&ToastConfig> {
        self.records.get(&handle.serial).map(|record| &record.config)
    }

    /// Countdown time left, or `None` once the toast is gone.
    #[must_use]
    pub fn remaining(&self, handle: &ToastHandle) -> Option<Duration> {
        let now = self.scheduler.now();
        self.records
            .get(&handle.serial)
            .map(|record| record.countdown.remaining_at(now))
    }

    #[must_use]
    pub fn rendered(&self, handle: &ToastHandle) -> Option<&Rendered> {
        self.records.get(&handle.serial).map(|record| &record.rendered)
    }

    /// Container element for `position`, if one was created.
    #[must_use]
    pub fn container(&self, position: &Position) -> Option<NodeId> {
        self.containers
            .iter()
            .find(|c| &c.position == position)
            .map(|c| c.node)
    }

    /// Ids of the toasts in the container for `position`, in display order.
    #[must_use]
    pub fn container_ids(&self, position: &Position) -> Vec<String> {
        self.containers
            .iter()
            .find(|c| &c.position == position)
            .map(|c| {
                c.toasts
                    .iter()
                    .filter_map(|serial| self.records.get(serial))
                    .map(|record| record.handle.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of timers the manager is still waiting on.
    #[must_use]
    pub fn armed_timers(&self) -> usize {
        self.scheduler.owners.len()
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn resolve_ref(&self, target: &ToastRef) -> Option<u64> {
        match target {
            ToastRef::Handle(handle) => self
                .records
                .contains_key(&handle.serial)
                .then_some(handle.serial),
            ToastRef::Id(id) => self.live_serial(id),
        }
    }

    fn live_serial(&self, id: &str) -> Option<u64> {
        self.records
            .iter()
            .rev()
            .find(|(_, record)| record.handle.id == id && record.state.is_live())
            .map(|(serial, _)| *serial)
    }

    fn live_serials(&self, filter: impl Fn(&ToastRecord) -> bool) -> Vec<u64> {
        self.records
            .iter()
            .filter(|(_, record)| record.state.is_live() && filter(record))
            .map(|(serial, _)| *serial)
            .collect()
    }

    fn notify(&mut self, event: ToastEvent) {
        let Some(logger) = self.logger.as_mut() else {
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(|| logger(&event))).is_err() {
            tracing::warn!(event = event.name(), id = event.id(), "toast logger panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crate::timer::ManualTimers;
    use std::cell::RefCell;

    fn manager() -> (Toasts, MemorySurface, ManualTimers) {
        let surface = MemorySurface::new();
        let timers = ManualTimers::new();
        let toasts = Toasts::new(surface.clone(), timers.clone())
            .with_i18n(I18n::new(Some("en-US".to_string()), &Config::default()));
        (toasts, surface, timers)
    }

    fn advance(toasts: &mut Toasts, timers: &ManualTimers, ms: u64) {
        timers.advance(Duration::from_millis(ms), |timer| {
            toasts.handle_message(&Message::TimerFired(timer));
        });
    }

    #[test]
    fn show_reveals_after_delay() {
        let (mut toasts, surface, timers) = manager();
        let handle = toasts.show(ToastOptions::new().message("Hi"));
        assert_eq!(toasts.state(&handle), ToastState::Created);

        advance(&mut toasts, &timers, 10);

        assert_eq!(toasts.state(&handle), ToastState::Shown);
        let root = toasts.rendered(&handle).unwrap().root;
        assert!(surface.has_class(root, class::SHOW));
        assert_eq!(surface.events_named(SHOWN_EVENT).len(), 1);
    }

    #[test]
    fn close_before_reveal_skips_shown() {
        let (mut toasts, surface, timers) = manager();
        let handle = toasts.show(ToastOptions::new());
        assert!(toasts.close(&handle));

        advance(&mut toasts, &timers, 400);

        assert!(surface.events_named(SHOWN_EVENT).is_empty());
        assert_eq!(surface.events_named(CLOSED_EVENT).len(), 1);
        assert_eq!(toasts.state(&handle), ToastState::Removed);
        assert_eq!(toasts.armed_timers(), 0);
    }

    #[test]
    fn closing_toast_leaves_count_immediately() {
        let (mut toasts, _, timers) = manager();
        let handle = toasts.show(ToastOptions::new());
        advance(&mut toasts, &timers, 10);
        toasts.close(&handle);

        assert_eq!(toasts.count(None), 0);
        assert_eq!(toasts.state(&handle), ToastState::Closing);
        assert!(!toasts.close(&handle));
    }

    #[test]
    fn pause_and_resume_keep_a_single_timer() {
        let (mut toasts, _, timers) = manager();
        let handle = toasts.show(ToastOptions::new().duration(Duration::from_millis(100)));
        advance(&mut toasts, &timers, 10);

        toasts.handle_message(&Message::PointerEnter((&handle).into()));
        toasts.handle_message(&Message::PointerLeave((&handle).into()));
        assert_eq!(toasts.armed_timers(), 1);

        advance(&mut toasts, &timers, 100);
        assert_eq!(toasts.state(&handle), ToastState::Closing);
    }

    #[test]
    fn hover_is_ignored_without_pause_on_hover() {
        let (mut toasts, _, timers) = manager();
        let handle = toasts.show(ToastOptions::new().pause_on_hover(false));
        advance(&mut toasts, &timers, 10);

        toasts.handle_message(&Message::PointerEnter((&handle).into()));
        assert_eq!(toasts.state(&handle), ToastState::Shown);
    }

    #[test]
    fn click_closes_only_with_click_to_close() {
        let (mut toasts, _, timers) = manager();
        let plain = toasts.show(ToastOptions::new());
        let clickable = toasts.show(ToastOptions::new().click_to_close(true));
        advance(&mut toasts, &timers, 10);

        toasts.handle_message(&Message::Click((&plain).into()));
        toasts.handle_message(&Message::Click((&clickable).into()));

        assert_eq!(toasts.state(&plain), ToastState::Shown);
        assert_eq!(toasts.state(&clickable), ToastState::Closing);
    }

    #[test]
    fn duplicate_ids_resolve_to_latest() {
        let (mut toasts, _, _) = manager();
        let first = toasts.show(ToastOptions::new().id("dup"));
        let second = toasts.show(ToastOptions::new().id("dup"));

        assert_eq!(toasts.get("dup"), Some(second.clone()));
        toasts.close("dup");
        assert_eq!(toasts.state(&second), ToastState::Closing);
        assert_eq!(toasts.get("dup"), Some(first));
    }

    #[test]
    fn panicking_logger_is_isolated() {
        let (mut toasts, _, timers) = manager();
        toasts.set_logger(Some(Box::new(|_: &ToastEvent| panic!("logger failure"))));
        let handle = toasts.show(ToastOptions::new());

        advance(&mut toasts, &timers, 10);

        assert_eq!(toasts.state(&handle), ToastState::Shown);
    }

    #[test]
    fn panicking_action_is_isolated() {
        let (mut toasts, _, timers) = manager();
        let handle = toasts.show(
            ToastOptions::new().action(Action::new("Boom").on_click(|_, _| panic!("action failure"))),
        );
        advance(&mut toasts, &timers, 10);

        toasts.handle_message(&Message::Action {
            toast: (&handle).into(),
            index: 0,
        });

        assert_eq!(toasts.state(&handle), ToastState::Shown);
    }

    #[test]
    fn action_callback_receives_its_handle() {
        let (mut toasts, _, timers) = manager();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let handle = toasts.show(ToastOptions::new().action(
            Action::new("Open").on_click(move |_, handle| *sink.borrow_mut() = Some(handle.clone())),
        ));
        advance(&mut toasts, &timers, 10);

        toasts.handle_message(&Message::Action {
            toast: "missing".into(),
            index: 0,
        });
        assert!(seen.borrow().is_none());

        toasts.handle_message(&Message::Action {
            toast: (&handle).into(),
            index: 0,
        });
        assert_eq!(seen.borrow().as_ref(), Some(&handle));
    }

    #[test]
    fn update_adds_missing_title_and_removes_icon() {
        let (mut toasts, surface, _) = manager();
        let handle = toasts.show(
            ToastOptions::new()
                .id("upd")
                .closable(false)
                .auto_icon(false)
                .message("Working"),
        );
        assert!(toasts.rendered(&handle).unwrap().header.is_none());

        assert!(toasts.update("upd", ToastOptions::new().title("Step 2").icon(icons::INFO)));
        let rendered = toasts.rendered(&handle).unwrap().clone();
        assert_eq!(surface.content(rendered.title.unwrap()).as_deref(), Some("Step 2"));
        let left = rendered.header_left.unwrap();
        assert_eq!(surface.children(left).first(), rendered.icon.as_ref());

        assert!(toasts.update("upd", ToastOptions::new().icon("")));
        assert!(toasts.rendered(&handle).unwrap().icon.is_none());
    }

    #[test]
    fn set_defaults_accumulates() {
        let (mut toasts, _, _) = manager();
        toasts.set_defaults(ToastOptions::new().position(Position::BottomStart));
        toasts.set_defaults(ToastOptions::new().duration(Duration::from_millis(1200)));

        let handle = toasts.show(ToastOptions::new());
        let config = toasts.config(&handle).unwrap();
        assert_eq!(config.position, Position::BottomStart);
        assert_eq!(config.duration, Duration::from_millis(1200));
    }

    #[test]
    fn from_config_applies_defaults_and_language() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        config.defaults = ToastOptions::new().position(Position::MiddleCenter);

        let mut toasts = Toasts::from_config(&config, MemorySurface::new(), ManualTimers::new());
        let handle = toasts.show(ToastOptions::new());

        assert_eq!(toasts.i18n().current_locale().to_string(), "fr");
        assert_eq!(toasts.config(&handle).unwrap().position, Position::MiddleCenter);
    }
}
