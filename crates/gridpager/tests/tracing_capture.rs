//! Structured log output of the drag state machine.
//!
//! Run with `--features tracing`.

#![cfg(feature = "tracing")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gridpager::{DragStateMachine, GridExtent, SettleOutcome};
use gridpager_core::event::ScenePhase;
use gridpager_core::geometry::{Size, Vec2};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn machine() -> DragStateMachine {
    DragStateMachine::new(GridExtent::UNBOUNDED).with_page_size(Size::new(300.0, 600.0))
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> &'a CapturedEvent {
    events
        .iter()
        .find(|e| e.message() == message)
        .unwrap_or_else(|| panic!("no {message:?} event in {events:#?}"))
}

#[test]
fn commit_logs_lock_decision_and_index_change() {
    let events = with_captured_tracing(|| {
        let mut m = machine();
        m.on_changed(Vec2::new(-60.0, 2.0));
        m.on_ended(Vec2::new(-150.0, 2.0));
        let mut outcome = None;
        while outcome.is_none() {
            outcome = m.tick(Duration::from_millis(16));
        }
        assert!(matches!(outcome, Some(SettleOutcome::Committed { page: 1, .. })));
    });

    let lock = find(&events, "axis locked");
    assert_eq!(lock.level, tracing::Level::DEBUG);
    assert_eq!(lock.target, "gridpager.drag");
    assert_eq!(lock.fields["axis"], "Some(Horizontal)");

    let decision = find(&events, "release decided");
    assert_eq!(decision.fields["commit"], "true");
    assert_eq!(decision.fields["at_boundary"], "false");

    let commit = find(&events, "page committed");
    assert_eq!(commit.level, tracing::Level::INFO);
    assert_eq!(commit.target, "gridpager.settle");
    assert_eq!(commit.fields["direction"], "Forward");
    assert_eq!(commit.fields["page"], "1");
}

#[test]
fn ignored_inputs_log_at_trace() {
    let events = with_captured_tracing(|| {
        let mut m = machine();
        m.on_changed(Vec2::new(-20.0, 0.0));
        let ticket = m.on_externally_cancelled().expect("settle").ticket;
        m.on_ended(Vec2::new(-20.0, 0.0));
        m.complete_settle(ticket);
        m.complete_settle(ticket);
    });

    let duplicate = find(&events, "duplicate terminal event ignored");
    assert_eq!(duplicate.level, tracing::Level::TRACE);
    let stale = find(&events, "stale settle completion ignored");
    assert_eq!(stale.level, tracing::Level::TRACE);
    assert_eq!(stale.target, "gridpager.settle");
}

#[test]
fn scene_change_logs_forced_reset() {
    let events = with_captured_tracing(|| {
        let mut m = machine();
        m.on_changed(Vec2::new(0.0, 40.0));
        m.handle_scene_phase(ScenePhase::Background);
    });

    let reset = find(&events, "drag dropped on scene change");
    assert_eq!(reset.level, tracing::Level::DEBUG);
    assert_eq!(reset.target, "gridpager.lifecycle");
    assert_eq!(reset.fields["phase"], "Background");
}
