// LogHerald - app/layer.rs
//
// tracing integration: a `Layer` that prints every event through the
// console formatter, inserting a day separator whenever the calendar day
// changes between records.

use std::fmt::{self, Write as _};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::core::console::ConsoleSink;
use crate::core::formatter::ConsoleFormatter;
use crate::core::model::{LogRecord, Severity, ThreadLabel};
use crate::util::constants;

/// Source of the current local wall-clock time.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// =============================================================================
// Day tracking
// =============================================================================

/// Remembers the day of the last printed record.
#[derive(Debug, Default)]
pub struct DayTracker {
    prev_day: Mutex<Option<i32>>,
}

impl DayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `date` as already shown (e.g. by the header).
    pub fn seed(&self, date: NaiveDate) {
        let _ = self.observe(date);
    }

    /// Returns `date` when it differs from the previously observed day.
    /// A poisoned lock reports no change.
    pub fn observe(&self, date: NaiveDate) -> Option<NaiveDate> {
        let day = date.num_days_from_ce();
        match self.prev_day.lock() {
            Ok(mut prev) => (prev.replace(day) != Some(day)).then_some(date),
            Err(_) => None,
        }
    }
}

// =============================================================================
// Field collection
// =============================================================================

/// Collects the `message` field plus any other fields as `key=value`.
#[derive(Debug, Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        // `log.*` fields are bridge metadata, already shown in the location
        if name.starts_with("log.") {
            return;
        }
        let _ = write!(self.fields, " {name}={value}");
    }

    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

// =============================================================================
// Layer
// =============================================================================

/// Prints tracing events as console records.
pub struct ConsoleLayer<S> {
    formatter: Arc<ConsoleFormatter<S>>,
    days: DayTracker,
    clock: Clock,
}

impl<S: ConsoleSink> ConsoleLayer<S> {
    pub fn new(formatter: Arc<ConsoleFormatter<S>>) -> Self {
        Self {
            formatter,
            days: DayTracker::new(),
            clock: local_now,
        }
    }

    /// Replaces the wall clock (used by tests and replay tools).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Prints the application header for today. Records on the same day
    /// then follow without a separator.
    pub fn announce(&self, title: &str) {
        let today = (self.clock)().date();
        self.days.seed(today);
        self.formatter.print_header(title, today.into());
    }

    fn print_event(&self, event: &Event<'_>) {
        let meta = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let text = visitor.finish();

        let now = (self.clock)();
        if let Some(date) = self.days.observe(now.date()) {
            self.formatter.print_new_day(date.into());
        }

        let thread = std::thread::current();
        let record = LogRecord {
            module: meta
                .module_path()
                .or_else(|| (!meta.target().is_empty()).then(|| meta.target()))
                .unwrap_or(constants::UNKNOWN_MODULE),
            line: meta.line().and_then(NonZeroU32::new),
            thread: Some(ThreadLabel::of(&thread)),
            text: &text,
            severity: Severity::from(*meta.level()),
            time: now.time().into(),
        };
        self.formatter.print_record(&record);
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: ConsoleSink + Send + Sync + 'static,
    Sub: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        self.print_event(event);
    }
}

impl<S> fmt::Debug for ConsoleLayer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleLayer")
            .field("days", &self.days)
            .finish_non_exhaustive()
    }
}
