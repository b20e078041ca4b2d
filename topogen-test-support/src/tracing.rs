//! Recording layer for capturing spans and events in tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Layer that records closed span names and emitted events so tests can
/// assert instrumentation without parsing formatted output.
///
/// # Examples
/// ```
/// use topogen_test_support::tracing::RecordingLayer;
///
/// let layer = RecordingLayer::default();
/// assert!(layer.events().is_empty());
/// assert!(layer.closed_spans().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    closed_spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

/// Snapshot of an emitted tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Level the event was emitted at.
    pub level: Level,
    /// Event target, normally the emitting module path.
    pub target: String,
    /// Structured fields, including the `message` field.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the event message, if one was recorded.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }

    /// Returns the rendered value of `name`, if recorded.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl RecordingLayer {
    /// Returns the names of closed spans in completion order.
    #[must_use]
    pub fn closed_spans(&self) -> Vec<String> {
        lock(&self.closed_spans).clone()
    }

    /// Returns the recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// Returns the first recorded event carrying `message`.
    #[must_use]
    pub fn event_with_message(&self, message: &str) -> Option<EventRecord> {
        lock(&self.events)
            .iter()
            .find(|event| event.message() == Some(message))
            .cloned()
    }
}

struct SpanName(String);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut()
                .insert(SpanName(attrs.metadata().name().to_owned()));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if let Some(SpanName(name)) = span.extensions_mut().remove::<SpanName>() {
            lock(&self.closed_spans).push(name);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        lock(&self.events).push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields: recorder.fields,
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct FieldRecorder {
    fields: HashMap<String, String>,
}

impl FieldRecorder {
    fn insert(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use tracing_subscriber::layer::SubscriberExt;

    #[rstest]
    fn records_events_and_span_names() {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("outer");
            let _guard = span.enter();
            tracing::info!(count = 3_u64, label = "x", "hello");
        });

        let event = layer
            .event_with_message("hello")
            .expect("event must be recorded");
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.field("count"), Some("3"));
        assert_eq!(event.field("label"), Some("x"));
        assert_eq!(layer.closed_spans(), vec!["outer".to_owned()]);
    }
}
