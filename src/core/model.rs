// LogHerald - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroU32;

use crate::core::style;

// =============================================================================
// Sink methods
// =============================================================================

/// The five severity-keyed output methods every console sink provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkMethod {
    Error,
    Warn,
    Info,
    Log,
    Debug,
}

impl SinkMethod {
    /// Method name as a console API spells it.
    pub fn name(&self) -> &'static str {
        match self {
            SinkMethod::Error => "error",
            SinkMethod::Warn => "warn",
            SinkMethod::Info => "info",
            SinkMethod::Log => "log",
            SinkMethod::Debug => "debug",
        }
    }
}

impl fmt::Display for SinkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Log severity, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Per-severity rendering choices: which sink method receives the record,
/// which colour the label gets, and the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub method: SinkMethod,
    pub color: &'static str,
    pub label: &'static str,
    /// `font-weight:bold;color:{color}`, precomputed.
    pub label_style: &'static str,
}

/// Indexed by `Severity::index()`.
pub static SEVERITY_TABLE: [SeverityStyle; 5] = [
    SeverityStyle {
        method: SinkMethod::Error,
        color: "red",
        label: "Error",
        label_style: style::bold_color!("red"),
    },
    SeverityStyle {
        method: SinkMethod::Warn,
        color: "darkorange",
        label: "Warn",
        label_style: style::bold_color!("darkorange"),
    },
    SeverityStyle {
        method: SinkMethod::Info,
        color: "blue",
        label: "Info",
        label_style: style::bold_color!("blue"),
    },
    SeverityStyle {
        method: SinkMethod::Log,
        color: "green",
        label: "Debug",
        label_style: style::bold_color!("green"),
    },
    SeverityStyle {
        method: SinkMethod::Debug,
        color: "deeppink",
        label: "Trace",
        label_style: style::bold_color!("deeppink"),
    },
];

impl Severity {
    /// Returns all variants in display order (most severe first).
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Error,
            Severity::Warn,
            Severity::Info,
            Severity::Debug,
            Severity::Trace,
        ]
    }

    /// Converts a raw level index (0 = Error .. 4 = Trace).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn style(&self) -> &'static SeverityStyle {
        &SEVERITY_TABLE[self.index()]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        self.style().label
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Severity::Error,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::TRACE => Severity::Trace,
        }
    }
}

// =============================================================================
// Thread label
// =============================================================================

/// Identifies the thread that produced a record: either a name or a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadLabel<'data> {
    Name(Cow<'data, str>),
    Number(u64),
}

impl<'data> ThreadLabel<'data> {
    /// Label for a std thread: its name when set, else its numeric id.
    pub fn of(thread: &'data std::thread::Thread) -> Self {
        match thread.name() {
            Some(name) => Self::Name(Cow::Borrowed(name)),
            None => Self::from_id(thread.id()),
        }
    }

    /// `ThreadId` only exposes its number through `Debug` (`ThreadId(7)`).
    fn from_id(id: std::thread::ThreadId) -> Self {
        let debug = format!("{id:?}");
        debug
            .strip_prefix("ThreadId(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|digits| digits.parse::<u64>().ok())
            .map_or_else(|| Self::Name(Cow::Owned(debug.clone())), Self::Number)
    }
}

impl fmt::Display for ThreadLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadLabel::Name(name) => f.write_str(name),
            ThreadLabel::Number(n) => write!(f, "{n}"),
        }
    }
}

// =============================================================================
// Date and time
// =============================================================================

/// A calendar day as printed in headers and day separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        // month() is 1..=12 and day() is 1..=31
        Self {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

/// Wall-clock time of a record, millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        // Leap seconds report nanosecond() >= 1e9; clamp into 999.
        let millis = (time.nanosecond() / 1_000_000).min(999);
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            millisecond: millis as u16,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A single log line handed to the formatter. Not stored anywhere.
#[derive(Debug, Clone)]
pub struct LogRecord<'data> {
    /// Module path or file name the record came from.
    pub module: &'data str,

    /// Source line; `None` when unknown.
    pub line: Option<NonZeroU32>,

    pub thread: Option<ThreadLabel<'data>>,

    pub text: &'data str,

    pub severity: Severity,

    pub time: TimeOfDay,
}

impl<'data> LogRecord<'data> {
    /// A record with no line or thread at midnight.
    pub fn new(module: &'data str, severity: Severity, text: &'data str) -> Self {
        Self {
            module,
            line: None,
            thread: None,
            text,
            severity,
            time: TimeOfDay::default(),
        }
    }

    /// Sets the source line. Line `0` means "no line known".
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = NonZeroU32::new(line);
        self
    }

    pub fn with_thread(mut self, thread: ThreadLabel<'data>) -> Self {
        self.thread = Some(thread);
        self
    }

    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = time;
        self
    }

    /// `module:line`, or just `module` without a line.
    pub fn location(&self) -> Cow<'data, str> {
        match self.line {
            Some(line) => Cow::Owned(format!("{}:{line}", self.module)),
            None => Cow::Borrowed(self.module),
        }
    }
}

/// Everything the panic banner shows.
#[derive(Debug, Clone)]
pub struct PanicReport<'data> {
    pub title: &'data str,
    pub thread: ThreadLabel<'data>,
    pub text: &'data str,
    /// Already rendered, e.g. `src/main.rs:10:5`.
    pub location: &'data str,
    /// Appended verbatim after the location (usually starts with a newline).
    pub trace: Option<String>,
}
