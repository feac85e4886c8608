//! Recording layer for asserting spans and events in tests.
//!
//! Install a [`RecordingLayer`] on a registry with
//! `tracing::subscriber::with_default`, run the code under test, then query
//! the closed spans and emitted events. Field values are stored as strings:
//! numbers and booleans in their `Display` form, everything else through
//! `Debug`.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use ::tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

type Fields = HashMap<String, String>;

/// Captures closed spans and emitted events for later assertions.
///
/// Clones share the same buffers, so keep one handle and install the other.
///
/// # Examples
/// ```
/// use strata_test_support::tracing::RecordingLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = RecordingLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     let span = tracing::info_span!("work", items = 3_u64);
///     let _entered = span.enter();
///     tracing::warn!(reason = "demo", "careful");
/// });
///
/// let span = layer.span("work").expect("span closed");
/// assert_eq!(span.field("items"), Some("3"));
/// assert_eq!(layer.events_at(tracing::Level::WARN).len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }

    /// Emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// The first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        lock(&self.spans)
            .iter()
            .find(|span| span.name == name)
            .cloned()
    }

    /// Every closed span called `name`, in completion order.
    #[must_use]
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        lock(&self.spans)
            .iter()
            .filter(|span| span.name == name)
            .cloned()
            .collect()
    }

    /// Events emitted at exactly `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
        lock(&self.events)
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }
}

/// A closed span with its name and final field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// The recorded value of `name`, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// An emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Event fields, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// The recorded value of `name`, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The formatted event message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

/// Per-span state kept in registry extensions until the span closes.
struct OpenSpan {
    name: &'static str,
    fields: Fields,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut open = OpenSpan {
            name: attrs.metadata().name(),
            fields: Fields::new(),
        };
        attrs.record(&mut FieldVisitor(&mut open.fields));
        span.extensions_mut().insert(open);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
            values.record(&mut FieldVisitor(&mut open.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
            return;
        };
        lock(&self.spans).push(SpanRecord {
            name: open.name.to_owned(),
            fields: open.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldVisitor(&mut fields));
        let metadata = event.metadata();
        lock(&self.events).push(EventRecord {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        });
    }
}

struct FieldVisitor<'a>(&'a mut Fields);

impl FieldVisitor<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.to_string());
    }
}

/// Test buffers stay usable after a panicking assertion elsewhere.
fn lock<T>(buffer: &Mutex<T>) -> MutexGuard<'_, T> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use ::tracing::{Level, debug, info_span, subscriber::with_default};
    use tracing_subscriber::layer::SubscriberExt;

    use super::RecordingLayer;

    fn record(body: impl FnOnce()) -> RecordingLayer {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        with_default(subscriber, body);
        layer
    }

    #[test]
    fn late_fields_are_captured() {
        let layer = record(|| {
            let span = info_span!("outer", total = ::tracing::field::Empty);
            span.record("total", 12_u64);
        });
        let span = layer.span("outer").expect("outer closed");
        assert_eq!(span.field("total"), Some("12"));
    }

    #[test]
    fn nested_spans_close_inside_out() {
        let layer = record(|| {
            let outer = info_span!("outer");
            let _outer = outer.enter();
            let inner = info_span!("inner", ok = true);
            let _inner = inner.enter();
        });
        let names: Vec<String> = layer.spans().into_iter().map(|span| span.name).collect();
        assert_eq!(names, ["inner", "outer"]);
        assert_eq!(layer.span("inner").and_then(|s| s.field("ok").map(str::to_owned)), Some("true".to_owned()));
    }

    #[test]
    fn events_keep_level_and_message() {
        let layer = record(|| debug!(rounds = 3_u64, "round finished"));
        let events = layer.events_at(Level::DEBUG);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message(), Some("round finished"));
        assert_eq!(events[0].field("rounds"), Some("3"));
        assert!(layer.events_at(Level::WARN).is_empty());
    }
}
