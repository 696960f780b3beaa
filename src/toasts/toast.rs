// SPDX-License-Identifier: MPL-2.0
//! Element renderer for individual toasts.
//!
//! Turns a resolved [`ToastConfig`] into elements on a [`Surface`]. The
//! renderer neither inserts the result into a container nor starts timers;
//! both belong to the manager.

use super::options::{ProgressPosition, ToastConfig, ToastType};
use crate::i18n::I18n;
use crate::surface::{NodeId, Surface};
use std::time::Duration;

/// Class names and attributes shared by the renderer, the manager and host
/// stylesheets.
pub mod class {
    pub const ROOT: &str = "toast";
    pub const SHOW: &str = "show";
    pub const HIDE: &str = "hide";
    pub const PAUSED: &str = "toast-paused";
    pub const LOADING: &str = "toast-loading";
    pub const MODERN: &str = "toast-modern";
    pub const GLASS: &str = "toast-glass";
    pub const COMPACT: &str = "toast-compact";
    pub const PINNED: &str = "toast-pinned";
    pub const CONTENT: &str = "toast-content";
    pub const HEADER: &str = "toast-header";
    pub const HEADER_LEFT: &str = "toast-header-left";
    pub const ICON: &str = "toast-icon";
    pub const TITLE: &str = "toast-title";
    pub const STATUS: &str = "toast-status";
    pub const CLOSE: &str = "toast-close";
    pub const BODY: &str = "toast-body";
    pub const ACTIONS: &str = "toast-actions";
    pub const BUTTON: &str = "btn";
    pub const BUTTON_SMALL: &str = "btn-sm";
    pub const BUTTON_DEFAULT: &str = "btn-secondary";
    pub const STEPS: &str = "toast-steps";
    pub const STEP: &str = "toast-step";
    pub const STEP_ACTIVE: &str = "toast-step-active";
    pub const PROGRESS: &str = "toast-progress";
    pub const PROGRESS_TOP: &str = "toast-progress-top";
    pub const BACKGROUND_FILL: &str = "toast-background-fill";
    pub const CONTAINER: &str = "toast-container";

    pub const ATTR_CLICK_TO_CLOSE: &str = "data-click-to-close";
    pub const ATTR_PAUSE_ON_HOVER: &str = "data-pause-on-hover";
    pub const ATTR_CLOSE: &str = "data-toast-close";
    pub const ATTR_ACTION_INDEX: &str = "data-action-index";
}

/// Nodes making up one rendered toast.
///
/// Optional parts are `None` when the configuration did not call for them;
/// `update` may fill some of them in later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub root: NodeId,
    pub content: NodeId,
    pub header: Option<NodeId>,
    pub header_left: Option<NodeId>,
    pub icon: Option<NodeId>,
    pub title: Option<NodeId>,
    pub status: Option<NodeId>,
    pub close_button: Option<NodeId>,
    pub body: Option<NodeId>,
    pub actions: Option<NodeId>,
    pub action_buttons: Vec<NodeId>,
    pub steps: Option<NodeId>,
    pub progress: Option<NodeId>,
    pub background: Option<NodeId>,
}

/// Class marking a toast's kind, e.g. `toast-error`.
#[must_use]
pub fn kind_class(kind: &ToastType) -> String {
    format!("{}-{}", class::ROOT, kind.as_str())
}

/// Class of a per-position container, e.g. `toast-container-top-end`.
#[must_use]
pub fn container_class(position: &str) -> String {
    format!("{}-{}", class::CONTAINER, position)
}

/// Builds the elements for `config`.
pub fn render(surface: &mut dyn Surface, config: &ToastConfig, i18n: &I18n) -> Rendered {
    let root = surface.create_element("div");
    for marker in root_classes(config) {
        surface.add_class(root, &marker);
    }
    surface.set_attribute(root, "id", &config.id);
    if config.click_to_close {
        surface.set_attribute(root, class::ATTR_CLICK_TO_CLOSE, "true");
    }
    if config.pause_on_hover {
        surface.set_attribute(root, class::ATTR_PAUSE_ON_HOVER, "true");
    }
    set_live_region(surface, root, &config.kind);

    let content = surface.create_element("div");
    surface.add_class(content, class::CONTENT);

    let mut rendered = Rendered {
        root,
        content,
        header: None,
        header_left: None,
        icon: None,
        title: None,
        status: None,
        close_button: None,
        body: None,
        actions: None,
        action_buttons: Vec::new(),
        steps: None,
        progress: None,
        background: None,
    };

    if config.title.is_some() || config.closable || config.icon.is_some() {
        render_header(surface, config, i18n, &mut rendered);
    }

    if !config.message.is_empty() {
        let body = body_node(surface, &config.message);
        surface.append_child(content, body);
        rendered.body = Some(body);
    }

    if !config.compact && !config.actions.is_empty() {
        render_actions(surface, config, &mut rendered);
    }

    if let Some(steps) = config.steps.filter(|s| *s > 1) {
        render_steps(surface, steps, config.current_step.unwrap_or(0), &mut rendered);
    }

    surface.append_child(root, content);

    if config.progress && config.auto_closes() && config.progress_position != ProgressPosition::None {
        let bar = surface.create_element("div");
        surface.add_class(bar, class::PROGRESS);
        surface.add_class(bar, &format!("{}-{}", class::PROGRESS, config.kind.as_str()));
        surface.set_styles(
            bar,
            &[
                ("width", "100%"),
                ("transform", "scaleX(1)"),
                ("transform-origin", "left center"),
            ],
        );
        if config.progress_position == ProgressPosition::Top {
            surface.add_class(bar, class::PROGRESS_TOP);
            surface.prepend_child(root, bar);
        } else {
            surface.append_child(root, bar);
        }
        rendered.progress = Some(bar);
    }

    if config.progress_background && config.auto_closes() {
        let fill = surface.create_element("div");
        surface.add_class(fill, class::BACKGROUND_FILL);
        surface.add_class(fill, &format!("toast-bg-{}", config.kind.as_str()));
        surface.set_style(fill, "opacity", "1");
        surface.append_child(root, fill);
        rendered.background = Some(fill);
    }

    rendered
}

fn set_live_region(surface: &mut dyn Surface, root: NodeId, kind: &ToastType) {
    let (role, live) = match kind {
        ToastType::Error => ("alert", "assertive"),
        _ => ("status", "polite"),
    };
    surface.set_attribute(root, "role", role);
    surface.set_attribute(root, "aria-live", live);
}

fn root_classes(config: &ToastConfig) -> Vec<String> {
    let mut classes = vec![class::ROOT.to_string(), kind_class(&config.kind)];
    if let Some(size) = &config.size {
        classes.push(format!("{}-{}", class::ROOT, size));
    }
    if let Some(variant) = &config.variant {
        classes.push(format!("{}-{}", kind_class(&config.kind), variant));
    }
    classes.push(config.animation.to_string());
    classes.push(class::MODERN.to_string());
    if config.glassmorphism {
        classes.push(class::GLASS.to_string());
    }
    if config.compact {
        classes.push(class::COMPACT.to_string());
    }
    if config.pinned {
        classes.push(class::PINNED.to_string());
    }
    classes
}

fn render_header(surface: &mut dyn Surface, config: &ToastConfig, i18n: &I18n, rendered: &mut Rendered) {
    let header = surface.create_element("div");
    surface.add_class(header, class::HEADER);
    let left = surface.create_element("div");
    surface.add_class(left, class::HEADER_LEFT);

    if let Some(markup) = &config.icon {
        let icon = icon_node(surface, markup);
        surface.append_child(left, icon);
        rendered.icon = Some(icon);
    }
    if let Some(text) = &config.title {
        let title = title_node(surface, text);
        surface.append_child(left, title);
        rendered.title = Some(title);
    }
    surface.append_child(header, left);

    if config.show_status {
        let chip = surface.create_element("span");
        surface.add_class(chip, class::STATUS);
        let label = config
            .status_text
            .clone()
            .unwrap_or_else(|| status_label(&config.kind, i18n));
        surface.set_text(chip, &label);
        surface.append_child(header, chip);
        rendered.status = Some(chip);
    }

    if config.closable {
        let button = surface.create_element("button");
        surface.add_class(button, class::CLOSE);
        surface.set_attribute(button, "type", "button");
        surface.set_attribute(button, "aria-label", &i18n.tr("toast-close"));
        surface.set_attribute(button, class::ATTR_CLOSE, &config.id);
        surface.append_child(header, button);
        rendered.close_button = Some(button);
    }

    surface.append_child(rendered.content, header);
    rendered.header = Some(header);
    rendered.header_left = Some(left);
}

fn render_actions(surface: &mut dyn Surface, config: &ToastConfig, rendered: &mut Rendered) {
    let row = surface.create_element("div");
    surface.add_class(row, class::ACTIONS);
    for (index, action) in config.actions.iter().enumerate() {
        let button = surface.create_element("button");
        surface.add_class(button, class::BUTTON);
        surface.add_class(button, class::BUTTON_SMALL);
        surface.add_class(button, action.class.as_deref().unwrap_or(class::BUTTON_DEFAULT));
        surface.set_attribute(button, "type", "button");
        surface.set_attribute(button, class::ATTR_ACTION_INDEX, &index.to_string());
        surface.set_text(button, &action.label);
        surface.append_child(row, button);
        rendered.action_buttons.push(button);
    }
    surface.append_child(rendered.content, row);
    rendered.actions = Some(row);
}

fn render_steps(surface: &mut dyn Surface, steps: u32, current: u32, rendered: &mut Rendered) {
    let row = surface.create_element("div");
    surface.add_class(row, class::STEPS);
    let active = steps.min(current.max(1));
    for step in 1..=steps {
        let cell = surface.create_element("span");
        surface.add_class(cell, class::STEP);
        if step <= active {
            surface.add_class(cell, class::STEP_ACTIVE);
        }
        surface.append_child(row, cell);
    }
    surface.append_child(rendered.content, row);
    rendered.steps = Some(row);
}

/// Returns the header's left column, creating the header first if the toast
/// was rendered without one.
pub(crate) fn ensure_header(surface: &mut dyn Surface, rendered: &mut Rendered) -> NodeId {
    if let Some(left) = rendered.header_left {
        return left;
    }
    let header = surface.create_element("div");
    surface.add_class(header, class::HEADER);
    let left = surface.create_element("div");
    surface.add_class(left, class::HEADER_LEFT);
    surface.append_child(header, left);
    surface.prepend_child(rendered.content, header);
    rendered.header = Some(header);
    rendered.header_left = Some(left);
    left
}

/// Swaps the kind-derived markers of a rendered toast from `config.kind` to `kind`.
///
/// A status chip showing the kind label is relabelled; a custom status text stays.
pub(crate) fn retag_kind(
    surface: &mut dyn Surface,
    rendered: &Rendered,
    config: &ToastConfig,
    kind: &ToastType,
    i18n: &I18n,
) {
    let root = rendered.root;
    surface.remove_class(root, &kind_class(&config.kind));
    surface.add_class(root, &kind_class(kind));
    if let Some(variant) = &config.variant {
        surface.remove_class(root, &format!("{}-{}", kind_class(&config.kind), variant));
        surface.add_class(root, &format!("{}-{}", kind_class(kind), variant));
    }
    if let Some(bar) = rendered.progress {
        surface.remove_class(bar, &format!("{}-{}", class::PROGRESS, config.kind.as_str()));
        surface.add_class(bar, &format!("{}-{}", class::PROGRESS, kind.as_str()));
    }
    if let Some(fill) = rendered.background {
        surface.remove_class(fill, &format!("toast-bg-{}", config.kind.as_str()));
        surface.add_class(fill, &format!("toast-bg-{}", kind.as_str()));
    }
    if let (Some(chip), None) = (rendered.status, &config.status_text) {
        surface.set_text(chip, &status_label(kind, i18n));
    }
    set_live_region(surface, root, kind);
}

/// Starts the progress bar and background fill draining over `over`.
pub(crate) fn run_progress(surface: &mut dyn Surface, rendered: &Rendered, over: Duration) {
    let millis = over.as_millis();
    if let Some(bar) = rendered.progress {
        let transition = format!("transform {millis}ms linear");
        surface.set_styles(bar, &[("transition", &transition), ("transform", "scaleX(0)")]);
    }
    if let Some(fill) = rendered.background {
        let transition = format!("opacity {millis}ms linear");
        surface.set_styles(fill, &[("transition", &transition), ("opacity", "0")]);
    }
}

/// Freezes the progress bar and background fill at `fraction` of their extent.
pub(crate) fn freeze_progress(surface: &mut dyn Surface, rendered: &Rendered, fraction: f64) {
    if let Some(bar) = rendered.progress {
        let transform = format!("scaleX({fraction:.3})");
        surface.set_styles(bar, &[("transition", "none"), ("transform", &transform)]);
    }
    if let Some(fill) = rendered.background {
        let opacity = format!("{fraction:.3}");
        surface.set_styles(fill, &[("transition", "none"), ("opacity", &opacity)]);
    }
}

/// Creates a body element holding caller-trusted `markup`.
pub(crate) fn body_node(surface: &mut dyn Surface, markup: &str) -> NodeId {
    let body = surface.create_element("div");
    surface.add_class(body, class::BODY);
    surface.set_markup(body, markup);
    body
}

/// Creates an icon element holding `markup`.
pub(crate) fn icon_node(surface: &mut dyn Surface, markup: &str) -> NodeId {
    let icon = surface.create_element("div");
    surface.add_class(icon, class::ICON);
    surface.set_markup(icon, markup);
    icon
}

/// Creates a title element holding `text`.
pub(crate) fn title_node(surface: &mut dyn Surface, text: &str) -> NodeId {
    let title = surface.create_element("h4");
    surface.add_class(title, class::TITLE);
    surface.set_text(title, text);
    title
}

/// Localized status chip label for a kind; unknown kinds are capitalized.
fn status_label(kind: &ToastType, i18n: &I18n) -> String {
    i18n.try_tr(&format!("toast-status-{}", kind.as_str()))
        .unwrap_or_else(|| {
            let mut chars = kind.as_str().chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
}
