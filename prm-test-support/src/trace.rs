//! In-memory capture of tracing spans and events for assertions.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

/// Layer that stores closed spans and emitted events.
///
/// Clones share storage, so one clone can be installed in a subscriber while
/// another is kept for assertions.
#[derive(Clone, Default)]
pub struct TraceCapture {
    log: Arc<Mutex<TraceLog>>,
}

#[derive(Default)]
struct TraceLog {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

/// A closed span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the metadata.
    pub name: String,
    /// Name of the enclosing span, if any.
    pub parent: Option<String>,
    /// Fields recorded at creation or later.
    pub fields: HashMap<String, String>,
}

/// An emitted event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Name of the span the event was emitted in, if any.
    pub span: Option<String>,
    /// Structured fields, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the formatted message, if the event carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

impl TraceCapture {
    /// Runs `f` with a fresh capture installed as the thread-default
    /// subscriber and returns its output together with the capture.
    ///
    /// # Examples
    /// ```
    /// use prm_test_support::trace::TraceCapture;
    ///
    /// let ((), capture) = TraceCapture::run(|| {
    ///     let _span = tracing::info_span!("outer").entered();
    ///     tracing::warn!(answer = 42, "hello");
    /// });
    /// assert_eq!(capture.spans_named("outer").len(), 1);
    /// let events = capture.events_at(tracing::Level::WARN);
    /// assert_eq!(events[0].message(), Some("hello"));
    /// assert_eq!(events[0].span.as_deref(), Some("outer"));
    /// ```
    pub fn run<R>(f: impl FnOnce() -> R) -> (R, Self) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let output = tracing::subscriber::with_default(subscriber, f);
        (output, capture)
    }

    /// Returns every closed span in closing order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.lock().spans.clone()
    }

    /// Returns the closed spans called `name`.
    #[must_use]
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        self.lock()
            .spans
            .iter()
            .filter(|span| span.name == name)
            .cloned()
            .collect()
    }

    /// Returns every event in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.lock().events.clone()
    }

    /// Returns the events emitted at exactly `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
        self.lock()
            .events
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, TraceLog> {
        self.log.lock().expect("trace log lock poisoned")
    }
}

struct OpenSpan {
    name: String,
    parent: Option<String>,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for TraceCapture
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut open = OpenSpan {
            name: attrs.metadata().name().to_owned(),
            parent: span.parent().map(|parent| parent.name().to_owned()),
            fields: HashMap::new(),
        };
        attrs.record(&mut Fields(&mut open.fields));
        span.extensions_mut().insert(open);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
            values.record(&mut Fields(&mut open.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
            return;
        };
        self.lock().spans.push(SpanRecord {
            name: open.name,
            parent: open.parent,
            fields: open.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut Fields(&mut fields));
        let metadata = event.metadata();
        let record = EventRecord {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            span: ctx.event_span(event).map(|span| span.name().to_owned()),
            fields,
        };
        self.lock().events.push(record);
    }
}

struct Fields<'a>(&'a mut HashMap<String, String>);

impl Fields<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for Fields<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
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
