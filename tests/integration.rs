// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use toastrack::config::Config;
use toastrack::i18n::I18n;
use toastrack::surface::{MemorySurface, Surface};
use toastrack::timer::{ManualTimers, TimerService};
use toastrack::toasts::{
    icons, ConfirmOptions, Message, Position, ToastEvent, ToastOptions, ToastState, ToastType,
    Toasts, CLOSED_EVENT, SHOWN_EVENT,
};

struct Harness {
    toasts: Toasts,
    surface: MemorySurface,
    timers: ManualTimers,
}

impl Harness {
    fn new() -> Self {
        let surface = MemorySurface::new();
        let timers = ManualTimers::new();
        let toasts = Toasts::new(surface.clone(), timers.clone())
            .with_i18n(I18n::new(Some("en-US".to_string()), &Config::default()));
        Self {
            toasts,
            surface,
            timers,
        }
    }

    fn advance(&mut self, ms: u64) {
        let toasts = &mut self.toasts;
        self.timers.advance(Duration::from_millis(ms), |timer| {
            toasts.handle_message(&Message::TimerFired(timer));
        });
    }

    fn now_ms(&self) -> u128 {
        self.timers.now().as_millis()
    }

    fn record_events(&mut self) -> Rc<RefCell<Vec<ToastEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        self.toasts
            .set_logger(Some(Box::new(move |event: &ToastEvent| {
                sink.borrow_mut().push(event.clone());
            })));
        events
    }
}

#[test]
fn count_grows_by_one_per_show() {
    let mut h = Harness::new();
    let before = h.toasts.count(None);

    h.toasts.show(ToastOptions::new().message("one"));
    assert_eq!(h.toasts.count(None), before + 1);

    h.toasts.success("two", ToastOptions::new());
    assert_eq!(h.toasts.count(None), before + 2);
    assert_eq!(h.toasts.count(Some(&ToastType::Success)), 1);
}

#[test]
fn close_is_idempotent_and_emits_one_closed_event() {
    let mut h = Harness::new();
    let events = h.record_events();
    let handle = h.toasts.show(ToastOptions::new().id("toast-x"));
    h.advance(10);

    assert!(h.toasts.close(&handle));
    assert!(!h.toasts.close(&handle));
    assert!(!h.toasts.close("toast-x"));
    h.advance(300);
    assert!(!h.toasts.close(&handle));

    assert_eq!(h.surface.events_named(CLOSED_EVENT).len(), 1);
    let closed: Vec<_> = events
        .borrow()
        .iter()
        .filter(|e| e.name() == "closed")
        .map(|e| e.id().to_string())
        .collect();
    assert_eq!(closed, vec!["toast-x"]);
    assert_eq!(h.toasts.state(&handle), ToastState::Removed);
    assert!(h.surface.find_by_id("toast-x").is_none());
}

#[test]
fn close_of_unknown_id_is_noop() {
    let mut h = Harness::new();
    assert!(!h.toasts.close("toast-nobody"));
    h.advance(1000);
    assert!(h.surface.events().is_empty());
}

#[test]
fn update_round_trip() {
    let mut h = Harness::new();
    let handle = h.toasts.show(
        ToastOptions::new()
            .id("upload")
            .title("Uploading")
            .message("0%"),
    );

    assert!(h.toasts.update(
        "upload",
        ToastOptions::new()
            .title("Uploaded")
            .message("<b>100%</b>")
            .kind(ToastType::Success)
    ));

    let rendered = h.toasts.rendered(&handle).expect("live toast").clone();
    assert_eq!(h.surface.content(rendered.title.unwrap()).as_deref(), Some("Uploaded"));
    assert_eq!(h.surface.content(rendered.body.unwrap()).as_deref(), Some("<b>100%</b>"));
    assert!(h.surface.has_class(rendered.root, "toast-success"));
    assert!(!h.surface.has_class(rendered.root, "toast-info"));
    assert_eq!(h.toasts.count(Some(&ToastType::Success)), 1);
    assert_eq!(h.toasts.count(Some(&ToastType::Info)), 0);
}

#[test]
fn update_kind_relabels_the_status_chip() {
    let mut h = Harness::new();
    let handle = h.toasts.info("Syncing", ToastOptions::new().id("sync").show_status(true));
    let chip = h.toasts.rendered(&handle).unwrap().status.unwrap();
    assert_eq!(h.surface.content(chip).as_deref(), Some("Info"));

    assert!(h.toasts.update("sync", ToastOptions::new().kind(ToastType::Error)));
    assert_eq!(h.surface.content(chip).as_deref(), Some("Error"));
}

#[test]
fn update_of_missing_toast_reports_not_found() {
    let mut h = Harness::new();
    let events = h.record_events();

    assert!(!h.toasts.update("toast-ghost", ToastOptions::new().title("x")));

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), "update-not-found");
    assert_eq!(events[0].id(), "toast-ghost");
}

#[test]
fn update_ignores_unsupported_keys() {
    let mut h = Harness::new();
    let handle = h.toasts.show(ToastOptions::new().id("keep"));
    h.toasts.update(
        "keep",
        ToastOptions::new().position(Position::BottomCenter).duration(Duration::ZERO),
    );

    let config = h.toasts.config(&handle).unwrap();
    assert_eq!(config.position, Position::TopEnd);
    assert!(config.auto_closes());
}

#[test]
fn hover_pause_extends_the_countdown() {
    let mut h = Harness::new();
    let handle = h
        .toasts
        .show(ToastOptions::new().duration(Duration::from_millis(1000)));

    h.advance(10);
    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    h.advance(200);

    h.toasts.handle_message(&Message::PointerEnter((&handle).into()));
    assert_eq!(h.toasts.state(&handle), ToastState::Paused);
    let root = h.toasts.rendered(&handle).unwrap().root;
    assert!(h.surface.has_class(root, "toast-paused"));
    let bar = h.toasts.rendered(&handle).unwrap().progress.unwrap();
    assert_eq!(h.surface.style(bar, "transform").as_deref(), Some("scaleX(0.800)"));

    h.advance(500);
    assert_eq!(h.toasts.remaining(&handle), Some(Duration::from_millis(800)));
    h.toasts.handle_message(&Message::PointerLeave((&handle).into()));
    assert!(!h.surface.has_class(root, "toast-paused"));
    assert_eq!(
        h.surface.style(bar, "transition").as_deref(),
        Some("transform 800ms linear")
    );

    h.advance(799);
    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    h.advance(1);
    assert_eq!(h.toasts.state(&handle), ToastState::Closing);
    assert_eq!(h.now_ms(), 1510);
    assert_eq!(h.toasts.remaining(&handle), Some(Duration::ZERO));
    assert!(h.surface.has_class(root, "hide"));
    assert!(!h.surface.has_class(root, "show"));
}

#[test]
fn countdown_is_frozen_while_closing() {
    let mut h = Harness::new();
    let handle = h
        .toasts
        .show(ToastOptions::new().duration(Duration::from_millis(1000)));
    h.advance(110);
    h.toasts.close(&handle);
    h.advance(100);

    assert_eq!(h.toasts.remaining(&handle), Some(Duration::from_millis(900)));
}

#[test]
fn close_while_hovered_ignores_the_later_pointer_leave() {
    let mut h = Harness::new();
    let handle = h
        .toasts
        .show(ToastOptions::new().duration(Duration::from_millis(1000)));
    h.advance(10);
    let root = h.toasts.rendered(&handle).unwrap().root;

    h.toasts.handle_message(&Message::PointerEnter((&handle).into()));
    assert_eq!(h.toasts.state(&handle), ToastState::Paused);
    assert!(h.toasts.close(&handle));
    assert!(!h.surface.has_class(root, "toast-paused"));
    assert_eq!(h.toasts.state(&handle), ToastState::Closing);

    h.toasts.handle_message(&Message::PointerLeave((&handle).into()));
    assert_eq!(h.toasts.state(&handle), ToastState::Closing);
    assert_eq!(h.toasts.armed_timers(), 1);

    h.advance(300);
    assert_eq!(h.surface.events_named(CLOSED_EVENT).len(), 1);
    assert_eq!(h.toasts.state(&handle), ToastState::Removed);
    assert_eq!(h.toasts.armed_timers(), 0);
}

#[test]
fn repeated_hover_keeps_one_timer_and_the_exact_deadline() {
    let mut h = Harness::new();
    let handle = h
        .toasts
        .show(ToastOptions::new().duration(Duration::from_millis(1000)));
    h.advance(10);

    for _ in 0..20 {
        h.advance(20);
        h.toasts.handle_message(&Message::PointerEnter((&handle).into()));
        h.advance(30);
        h.toasts.handle_message(&Message::PointerLeave((&handle).into()));
    }

    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    assert_eq!(h.toasts.armed_timers(), 1);
    assert_eq!(h.toasts.remaining(&handle), Some(Duration::from_millis(600)));

    h.advance(599);
    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    h.advance(1);
    assert_eq!(h.toasts.state(&handle), ToastState::Closing);
    assert_eq!(h.now_ms(), 1610);
}

#[test]
fn zero_duration_toasts_do_not_pause_or_close() {
    let mut h = Harness::new();
    let handle = h.toasts.show(ToastOptions::new().duration(Duration::ZERO));
    h.advance(10);

    h.toasts.handle_message(&Message::PointerEnter((&handle).into()));
    assert_eq!(h.toasts.state(&handle), ToastState::Shown);

    h.advance(60_000);
    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    let rendered = h.toasts.rendered(&handle).unwrap();
    assert!(rendered.progress.is_none());
}

#[test]
fn clear_by_kind_leaves_other_kinds() {
    let mut h = Harness::new();
    let first = h.toasts.error("e1", ToastOptions::new());
    let second = h.toasts.error("e2", ToastOptions::new());
    let ok = h.toasts.success("s1", ToastOptions::new());
    let note = h.toasts.info("i1", ToastOptions::new());
    h.advance(10);

    h.toasts.clear(Some(&ToastType::Error));

    assert_eq!(h.toasts.count(Some(&ToastType::Error)), 0);
    assert_eq!(h.toasts.count(None), 2);
    assert_eq!(h.toasts.state(&first), ToastState::Closing);
    assert_eq!(h.toasts.state(&second), ToastState::Closing);
    assert_eq!(h.toasts.state(&ok), ToastState::Shown);
    assert_eq!(h.toasts.state(&note), ToastState::Shown);

    h.toasts.clear(None);
    assert_eq!(h.toasts.count(None), 0);
}

#[test]
fn close_all_removes_every_toast() {
    let mut h = Harness::new();
    for i in 0..5 {
        h.toasts.show(ToastOptions::new().message(format!("#{i}")));
    }
    h.advance(10);
    h.toasts.close_all();
    h.advance(300);

    assert_eq!(h.toasts.count(None), 0);
    assert_eq!(h.surface.events_named(CLOSED_EVENT).len(), 5);
    assert_eq!(h.toasts.armed_timers(), 0);
}

#[test]
fn confirm_runs_only_the_confirm_callback_once() {
    let mut h = Harness::new();
    let confirmed = Rc::new(RefCell::new(0));
    let cancelled = Rc::new(RefCell::new(0));
    let (c, x) = (Rc::clone(&confirmed), Rc::clone(&cancelled));

    let handle = h.toasts.confirm(
        "Delete?",
        ConfirmOptions::new()
            .on_confirm(move |_| *c.borrow_mut() += 1)
            .on_cancel(move |_| *x.borrow_mut() += 1),
    );
    h.advance(10);

    let rendered = h.toasts.rendered(&handle).unwrap().clone();
    let labels: Vec<_> = rendered
        .action_buttons
        .iter()
        .map(|b| h.surface.content(*b).unwrap_or_default())
        .collect();
    assert_eq!(labels, vec!["Cancel", "Confirm"]);
    assert!(h.surface.has_class(rendered.action_buttons[0], "btn-secondary"));
    assert!(h.surface.has_class(rendered.action_buttons[1], "btn-primary"));
    assert!(rendered.close_button.is_none());
    assert_eq!(h.toasts.config(&handle).unwrap().kind, ToastType::Warning);

    let press = Message::Action {
        toast: (&handle).into(),
        index: 1,
    };
    h.toasts.handle_message(&press);
    h.toasts.handle_message(&press);

    assert_eq!(*confirmed.borrow(), 1);
    assert_eq!(*cancelled.borrow(), 0);
    assert_eq!(h.toasts.state(&handle), ToastState::Closing);
}

#[test]
fn confirm_callback_sees_its_toast_already_closing() {
    let mut h = Harness::new();
    let observed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&observed);

    let handle = h.toasts.confirm(
        "Proceed?",
        ConfirmOptions::new().on_cancel(move |toasts| {
            *sink.borrow_mut() = Some(toasts.count(None));
            toasts.info("Cancelled", ToastOptions::new());
        }),
    );
    h.toasts.handle_message(&Message::Action {
        toast: (&handle).into(),
        index: 0,
    });

    assert_eq!(*observed.borrow(), Some(0));
    assert_eq!(h.toasts.count(Some(&ToastType::Info)), 1);
}

#[test]
fn loading_toast_is_sticky() {
    let mut h = Harness::new();
    let handle = h.toasts.loading(None, ToastOptions::new());
    h.advance(10);

    let rendered = h.toasts.rendered(&handle).unwrap().clone();
    assert!(rendered.close_button.is_none());
    assert!(h.surface.has_class(rendered.root, "toast-loading"));
    assert_eq!(h.surface.content(rendered.body.unwrap()).as_deref(), Some("Loading..."));
    assert_eq!(h.surface.content(rendered.icon.unwrap()).as_deref(), Some(icons::SPINNER));

    h.advance(120_000);
    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    assert!(h.toasts.close(&handle));
}

#[test]
fn same_position_shares_a_container_in_call_order() {
    let mut h = Harness::new();
    h.toasts.show(ToastOptions::new().id("a"));
    h.toasts.show(ToastOptions::new().id("b"));
    assert_eq!(h.toasts.container_count(), 1);
    assert_eq!(h.toasts.container_ids(&Position::TopEnd), vec!["a", "b"]);

    h.toasts
        .show(ToastOptions::new().id("c").position(Position::BottomStart));
    assert_eq!(h.toasts.container_count(), 2);
    assert_eq!(h.toasts.container_ids(&Position::BottomStart), vec!["c"]);

    let top = h.toasts.container(&Position::TopEnd).unwrap();
    let ids: Vec<_> = h
        .surface
        .children(top)
        .into_iter()
        .filter_map(|n| h.surface.attribute(n, "id"))
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(h.surface.has_class(top, "toast-container-top-end"));
}

#[test]
fn containers_survive_their_toasts() {
    let mut h = Harness::new();
    let handle = h.toasts.show(ToastOptions::new().position("bottom-end"));
    h.toasts.close(&handle);
    h.advance(400);

    let container = h.toasts.container(&Position::BottomEnd).expect("container kept");
    assert!(h.surface.is_attached(container));
    assert!(h.surface.children(container).is_empty());
}

#[test]
fn shown_event_and_logger_fire_on_reveal() {
    let mut h = Harness::new();
    let events = h.record_events();
    let handle = h.toasts.warning("Careful", ToastOptions::new().id("w1"));

    assert!(h.surface.events_named(SHOWN_EVENT).is_empty());
    h.advance(10);

    let shown = h.surface.events_named(SHOWN_EVENT);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].detail, "w1");

    let events = events.borrow();
    match &events[0] {
        ToastEvent::Shown {
            id, kind, duration, ..
        } => {
            assert_eq!(id, handle.id());
            assert_eq!(*kind, ToastType::Warning);
            assert_eq!(*duration, Duration::from_millis(6000));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn preset_durations_sit_beneath_caller_options() {
    let mut h = Harness::new();
    let error = h.toasts.error("Failed", ToastOptions::new());
    let quick = h
        .toasts
        .error("Failed fast", ToastOptions::new().duration(Duration::from_millis(700)));
    let typed = h
        .toasts
        .success("Done", ToastOptions::new().kind(ToastType::Error));

    assert_eq!(h.toasts.config(&error).unwrap().duration, Duration::from_millis(8000));
    assert_eq!(h.toasts.config(&quick).unwrap().duration, Duration::from_millis(700));
    assert_eq!(h.toasts.config(&typed).unwrap().kind, ToastType::Success);
}

#[test]
fn close_button_and_click_to_close_messages() {
    let mut h = Harness::new();
    let closable = h.toasts.show(ToastOptions::new().id("c1"));
    let compact = h.toasts.show(ToastOptions::new().id("c2").compact(true));
    h.advance(10);

    let button = h.toasts.rendered(&closable).unwrap().close_button.unwrap();
    assert_eq!(h.surface.attribute(button, "data-toast-close").as_deref(), Some("c1"));

    h.toasts.handle_message(&Message::CloseButton("c1".into()));
    h.toasts.handle_message(&Message::Click("c2".into()));

    assert_eq!(h.toasts.state(&closable), ToastState::Closing);
    assert_eq!(h.toasts.state(&compact), ToastState::Closing);
}

#[test]
fn modern_and_notification_presets() {
    let mut h = Harness::new();
    let modern = h.toasts.modern("Sleek", ToastOptions::new());
    let note = h.toasts.notification("Heads up", "Body", ToastOptions::new());

    let root = h.toasts.rendered(&modern).unwrap().root;
    assert!(h.surface.has_class(root, "toast-md"));
    assert!(h.surface.has_class(root, "toast-info-filled"));
    assert!(h.surface.has_class(root, "toast-glass"));

    let config = h.toasts.config(&note).unwrap();
    assert_eq!(config.title.as_deref(), Some("Heads up"));
    assert_eq!(config.duration, Duration::from_millis(4000));
}

#[test]
fn pinned_toast_never_auto_closes() {
    let mut h = Harness::new();
    let handle = h.toasts.show(
        ToastOptions::new()
            .pinned(true)
            .duration(Duration::from_millis(500)),
    );
    h.advance(10_000);

    assert_eq!(h.toasts.state(&handle), ToastState::Shown);
    let root = h.toasts.rendered(&handle).unwrap().root;
    assert!(h.surface.has_class(root, "toast-pinned"));
}

#[test]
fn action_callback_can_update_its_own_toast() {
    let mut h = Harness::new();
    let handle = h.toasts.show(
        ToastOptions::new()
            .id("job")
            .message("Queued")
            .action(toastrack::toasts::Action::new("Start").on_click(|toasts, handle| {
                toasts.update(handle.id(), ToastOptions::new().message("Running"));
            })),
    );

    h.toasts.handle_message(&Message::Action {
        toast: "job".into(),
        index: 0,
    });

    let body = h.toasts.rendered(&handle).unwrap().body.unwrap();
    assert_eq!(h.surface.content(body).as_deref(), Some("Running"));
}

#[test]
fn headless_render_to_html() {
    let mut h = Harness::new();
    let handle = h.toasts.show(
        ToastOptions::new()
            .id("html")
            .title("A < B")
            .closable(false)
            .auto_icon(false)
            .progress(false)
            .progress_background(false)
            .glassmorphism(false),
    );

    let root = h.toasts.rendered(&handle).unwrap().root;
    let html = h.surface.to_html(root);
    assert!(html.starts_with("<div class=\"toast toast-info slide toast-modern\""));
    assert!(html.contains("<h4 class=\"toast-title\">A &lt; B</h4>"));
}
