// SPDX-License-Identifier: MPL-2.0
//! Toast options and their resolution into a final configuration.
//!
//! Options are layered, lowest priority first:
//!
//! 1. built-in defaults ([`ToastOptions::builtin`])
//! 2. global defaults set through `Toasts::set_defaults`
//! 3. per-call options (with preset layers such as `success` folded in)
//!
//! Merging is shallow per key. Action lists are replaced wholesale.

use super::icons;
use super::manager::Toasts;
use super::ToastHandle;
use crate::config::defaults::{DEFAULT_DURATION_MS, ID_PREFIX, ID_RANDOM_LEN};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Declares a presentation tag: a closed set of known values plus an
/// `Other` variant that carries unrecognized values through untouched.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Unrecognized value, rendered verbatim.
            Other(String),
        }

        impl $name {
            /// Every recognized value.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(raw) => raw,
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw {
                    $($text => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                $name::from(raw.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Kind of toast; drives color, icon and the type marker.
    pub enum ToastType {
        Success => "success",
        Error => "error",
        Warning => "warning",
        Info => "info",
        Primary => "primary",
        Secondary => "secondary",
    }
}

tag_enum! {
    /// Cell of the 3x3 placement grid. Each distinct value gets its own container.
    pub enum Position {
        TopStart => "top-start",
        TopCenter => "top-center",
        TopEnd => "top-end",
        MiddleStart => "middle-start",
        MiddleCenter => "middle-center",
        MiddleEnd => "middle-end",
        BottomStart => "bottom-start",
        BottomCenter => "bottom-center",
        BottomEnd => "bottom-end",
    }
}

tag_enum! {
    /// Entry/exit animation marker.
    pub enum Animation {
        Fade => "fade",
        Slide => "slide",
        Bounce => "bounce",
        Scale => "scale",
    }
}

tag_enum! {
    /// Size marker.
    pub enum Size {
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
    }
}

tag_enum! {
    /// Color variant marker, combined with the kind (`toast-success-filled`).
    pub enum Variant {
        Filled => "filled",
        Light => "light",
    }
}

impl Default for ToastType {
    fn default() -> Self {
        ToastType::Info
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::TopEnd
    }
}

impl Default for Animation {
    fn default() -> Self {
        Animation::Slide
    }
}

/// Where the countdown bar is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPosition {
    Top,
    #[default]
    Bottom,
    None,
}

/// Callback bound to an action button.
///
/// It receives the manager, so it can close or update toasts (including the
/// one it belongs to), and the handle of the toast whose button was pressed.
pub type ActionCallback = Rc<dyn Fn(&mut Toasts, &ToastHandle)>;

/// A button in the actions row.
#[derive(Clone)]
pub struct Action {
    pub label: String,
    /// Style class; `btn-secondary` when absent.
    pub class: Option<String>,
    pub on_click: Option<ActionCallback>,
}

impl Action {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            class: None,
            on_click: None,
        }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn on_click(mut self, callback: impl Fn(&mut Toasts, &ToastHandle) + 'static) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("class", &self.class)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        let same_callback = match (&self.on_click, &other.on_click) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.label == other.label && self.class == other.class && same_callback
    }
}

/// Serializes optional durations as whole milliseconds.
mod opt_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_u64(duration.as_millis() as u64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// A partial set of toast options. `None` means "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Caller-trusted markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ToastType>,
    /// Zero disables auto-close.
    #[serde(rename = "duration_ms", with = "opt_millis", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Icon markup; an empty string means "no icon".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip)]
    pub actions: Option<Vec<Action>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_to_close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_on_hover: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glassmorphism: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_icon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_position: Option<ProgressPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u32>,
    /// Unknown keys, kept but otherwise ignored.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lowest layer: every key that has a built-in default.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            id: None,
            title: None,
            message: Some(String::new()),
            kind: Some(ToastType::Info),
            duration: Some(Duration::from_millis(DEFAULT_DURATION_MS)),
            closable: Some(true),
            position: Some(Position::TopEnd),
            icon: None,
            actions: Some(Vec::new()),
            size: None,
            variant: None,
            animation: Some(Animation::Slide),
            click_to_close: Some(false),
            progress: Some(true),
            progress_background: Some(true),
            pause_on_hover: Some(true),
            glassmorphism: Some(true),
            compact: Some(false),
            show_status: Some(false),
            status_text: None,
            auto_icon: Some(true),
            pinned: Some(false),
            progress_position: Some(ProgressPosition::Bottom),
            steps: None,
            current_step: None,
            extra: BTreeMap::new(),
        }
    }

    /// Overlays `over` on top of `self`: every key set in `over` wins.
    #[must_use]
    pub fn merge(mut self, over: ToastOptions) -> ToastOptions {
        macro_rules! overlay {
            ($($field:ident),+ $(,)?) => {
                $(if over.$field.is_some() { self.$field = over.$field; })+
            };
        }
        overlay!(
            id,
            title,
            message,
            kind,
            duration,
            closable,
            position,
            icon,
            actions,
            size,
            variant,
            animation,
            click_to_close,
            progress,
            progress_background,
            pause_on_hover,
            glassmorphism,
            compact,
            show_status,
            status_text,
            auto_icon,
            pinned,
            progress_position,
            steps,
            current_step,
        );
        self.extra.extend(over.extra);
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<ToastType>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    #[must_use]
    pub fn position(mut self, position: impl Into<Position>) -> Self {
        self.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Appends an action to this layer's action list.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    #[must_use]
    pub fn size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: impl Into<Variant>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    #[must_use]
    pub fn animation(mut self, animation: impl Into<Animation>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    #[must_use]
    pub fn click_to_close(mut self, enabled: bool) -> Self {
        self.click_to_close = Some(enabled);
        self
    }

    #[must_use]
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = Some(enabled);
        self
    }

    #[must_use]
    pub fn progress_background(mut self, enabled: bool) -> Self {
        self.progress_background = Some(enabled);
        self
    }

    #[must_use]
    pub fn pause_on_hover(mut self, enabled: bool) -> Self {
        self.pause_on_hover = Some(enabled);
        self
    }

    #[must_use]
    pub fn glassmorphism(mut self, enabled: bool) -> Self {
        self.glassmorphism = Some(enabled);
        self
    }

    #[must_use]
    pub fn compact(mut self, enabled: bool) -> Self {
        self.compact = Some(enabled);
        self
    }

    #[must_use]
    pub fn show_status(mut self, enabled: bool) -> Self {
        self.show_status = Some(enabled);
        self
    }

    #[must_use]
    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn auto_icon(mut self, enabled: bool) -> Self {
        self.auto_icon = Some(enabled);
        self
    }

    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    #[must_use]
    pub fn progress_position(mut self, position: ProgressPosition) -> Self {
        self.progress_position = Some(position);
        self
    }

    /// Segmented progress: `current` of `total` steps (1-based).
    #[must_use]
    pub fn steps(mut self, total: u32, current: u32) -> Self {
        self.steps = Some(total);
        self.current_step = Some(current);
        self
    }

    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Fully resolved options governing one toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastConfig {
    pub id: String,
    pub title: Option<String>,
    pub message: String,
    pub kind: ToastType,
    /// Zero means no auto-close.
    pub duration: Duration,
    pub closable: bool,
    pub position: Position,
    pub icon: Option<String>,
    pub actions: Vec<Action>,
    pub size: Option<Size>,
    pub variant: Option<Variant>,
    pub animation: Animation,
    pub click_to_close: bool,
    pub progress: bool,
    pub progress_background: bool,
    pub pause_on_hover: bool,
    pub glassmorphism: bool,
    pub compact: bool,
    pub show_status: bool,
    pub status_text: Option<String>,
    pub pinned: bool,
    pub progress_position: ProgressPosition,
    pub steps: Option<u32>,
    pub current_step: Option<u32>,
    pub extra: BTreeMap<String, toml::Value>,
}

impl ToastConfig {
    /// Whether the toast runs an auto-close countdown.
    #[must_use]
    pub fn auto_closes(&self) -> bool {
        !self.duration.is_zero()
    }
}

/// Generates an identifier that the generator never hands out twice.
///
/// A process-wide counter is mixed into the random suffix so repeated calls
/// cannot collide even if the random source does.
#[must_use]
pub fn generate_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let mut rng = rand::thread_rng();
    let random: String = (0..ID_RANDOM_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    let serial = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}{}", ID_PREFIX, random, to_base36(serial))
}

fn to_base36(mut value: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut digits = Vec::new();
    loop {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().map(|d| char::from(*d)).collect()
}

/// Resolves the three option layers into a final configuration.
///
/// Never fails: missing keys fall back to `builtins`, and keys `builtins`
/// leaves unset fall back to hard defaults.
#[must_use]
pub fn resolve(builtins: &ToastOptions, defaults: &ToastOptions, call: ToastOptions) -> ToastConfig {
    let layered = defaults.clone().merge(call);
    let click_to_close_explicit = layered.click_to_close;
    let merged = builtins.clone().merge(layered);

    let kind = merged.kind.unwrap_or_default();
    let compact = merged.compact.unwrap_or(false);
    let click_to_close = match click_to_close_explicit {
        Some(explicit) => explicit,
        None if compact => true,
        None => merged.click_to_close.unwrap_or(false),
    };

    let icon = match merged.icon {
        Some(icon) if icon.is_empty() => None,
        Some(icon) => Some(icon),
        None if merged.auto_icon != Some(false) => icons::for_kind(&kind).map(str::to_string),
        None => None,
    };

    let pinned = merged.pinned.unwrap_or(false);
    let duration = if pinned {
        Duration::ZERO
    } else {
        merged.duration.unwrap_or_default()
    };

    ToastConfig {
        id: merged.id.unwrap_or_else(generate_id),
        title: merged.title.filter(|t| !t.is_empty()),
        message: merged.message.unwrap_or_default(),
        kind,
        duration,
        closable: merged.closable.unwrap_or(true),
        position: merged.position.unwrap_or_default(),
        icon,
        actions: merged.actions.unwrap_or_default(),
        size: merged.size.filter(|s| !s.as_str().is_empty()),
        variant: merged.variant.filter(|v| !v.as_str().is_empty()),
        animation: merged.animation.unwrap_or_default(),
        click_to_close,
        progress: merged.progress.unwrap_or(true),
        progress_background: merged.progress_background.unwrap_or(true),
        pause_on_hover: merged.pause_on_hover.unwrap_or(true),
        glassmorphism: merged.glassmorphism.unwrap_or(true),
        compact,
        show_status: merged.show_status.unwrap_or(false),
        status_text: merged.status_text.filter(|t| !t.is_empty()),
        pinned,
        progress_position: merged.progress_position.unwrap_or_default(),
        steps: merged.steps,
        current_step: merged.current_step,
        extra: merged.extra,
    }
}
