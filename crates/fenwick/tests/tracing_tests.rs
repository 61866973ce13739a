#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! With instrumentation:
//!   cargo test -p fenwick --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p fenwick --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fenwick::FenwickTree;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    name: String,
    level: tracing::Level,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records spans and events.
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

/// Handle to read what was captured.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    #[allow(dead_code)]
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }
}

/// Visitor that extracts fields, including the `message`.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        self.events.lock().unwrap().push(Captured {
            name: fields.get("message").cloned().unwrap_or_default(),
            level: *event.metadata().level(),
            fields,
        });
    }
}

/// Run `f` under a subscriber that captures everything.
fn with_capture<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

// ============================================================================
// Instrumented
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn construct_span_records_length() {
    let handle = with_capture(|| {
        let _ = FenwickTree::from_values(&[1, 2, 3, 4, 5]);
    });

    let spans = handle.spans();
    let construct: Vec<_> = spans
        .iter()
        .filter(|s| s.name == "fenwick_construct")
        .collect();
    assert_eq!(construct.len(), 1, "spans: {spans:?}");
    assert_eq!(construct[0].level, tracing::Level::DEBUG);
    assert_eq!(construct[0].fields.get("n").map(String::as_str), Some("5"));
}

#[test]
#[cfg(feature = "tracing")]
fn update_event_carries_delta() {
    let handle = with_capture(|| {
        let mut ft = FenwickTree::from_values(&[3, 2, -1, 6]);
        ft.update(3, 9).unwrap();
    });

    let events = handle.events();
    let update = events
        .iter()
        .find(|e| e.name == "fenwick update")
        .expect("update event");
    assert_eq!(update.level, tracing::Level::TRACE);
    assert_eq!(update.fields.get("index").map(String::as_str), Some("3"));
    assert_eq!(update.fields.get("delta").map(String::as_str), Some("3"));
}

#[test]
#[cfg(feature = "tracing")]
fn insert_emits_event() {
    let handle = with_capture(|| {
        let mut ft = FenwickTree::new(4);
        ft.insert(2, 7).unwrap();
    });

    let events = handle.events();
    assert!(
        events.iter().any(|e| e.name == "fenwick insert"),
        "events: {events:?}"
    );
}

#[test]
#[cfg(feature = "tracing")]
fn rejected_call_logged_at_debug() {
    let handle = with_capture(|| {
        let mut ft: FenwickTree = FenwickTree::new(2);
        assert!(ft.update(0, 1).is_err());
    });

    let events = handle.events();
    let rejected = events
        .iter()
        .find(|e| e.name == "fenwick operation rejected")
        .expect("rejection event");
    assert_eq!(rejected.level, tracing::Level::DEBUG);
    assert!(rejected.fields.get("error").is_some_and(|e| e.contains("constructed")));
}

// ============================================================================
// Zero overhead
// ============================================================================

#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_no_events_without_feature() {
    let handle = with_capture(|| {
        let mut ft = FenwickTree::from_values(&[1, 2, 3]);
        ft.update(1, 5).unwrap();
        ft.insert(1, 1).unwrap();
        let _ = ft.range_sum(2, 0);
    });

    assert!(handle.spans().is_empty());
    assert!(handle.events().is_empty());
}
