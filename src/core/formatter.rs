// LogHerald - core/formatter.rs
//
// Turns headers, day separators, records and panic reports into console
// calls. Each operation is one call on the sink and keeps no state.

use crate::core::console::{ConsoleArg, ConsoleCall, ConsoleSink};
use crate::core::model::{CalendarDate, LogRecord, PanicReport, SinkMethod};
use crate::core::style;

/// `{BY}== title - date ==`
const HEADER_FORMAT: &str = "%c== %s - %04d-%02d-%02d ==";
/// `{BY}= date =`
const NEW_DAY_FORMAT: &str = "%c= %04d-%02d-%02d =";
/// `{L}label {BT}h:m:s.ms {BG}module:line {BM}thread`, newline, message.
const RECORD_FORMAT: &str = "%c%s %c%02d:%02d:%02d.%03d %c%s %c%s\n%c%s";
/// `{BR}== title - {BM}thread{BR} Panic ==`, message, `{BG}→ location`, trace.
const PANIC_FORMAT: &str = "%c== %s - %c%s%c Panic ==\n%c%s\n%c→ %s%c%s";

/// Renders log output to a [`ConsoleSink`].
#[derive(Debug, Default)]
pub struct ConsoleFormatter<S> {
    sink: S,
}

impl<S: ConsoleSink> ConsoleFormatter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// `== {title} - {YYYY}-{MM}-{DD} ==`
    pub fn print_header(&self, title: &str, date: CalendarDate) {
        self.sink.dispatch(&ConsoleCall {
            method: SinkMethod::Log,
            format: HEADER_FORMAT,
            args: vec![
                ConsoleArg::Style(style::HEADER),
                ConsoleArg::Str(title),
                ConsoleArg::Int(date.year.into()),
                ConsoleArg::Int(date.month.into()),
                ConsoleArg::Int(date.day.into()),
            ],
        });
    }

    /// `= {YYYY}-{MM}-{DD} =`
    pub fn print_new_day(&self, date: CalendarDate) {
        self.sink.dispatch(&ConsoleCall {
            method: SinkMethod::Log,
            format: NEW_DAY_FORMAT,
            args: vec![
                ConsoleArg::Style(style::HEADER),
                ConsoleArg::Int(date.year.into()),
                ConsoleArg::Int(date.month.into()),
                ConsoleArg::Int(date.day.into()),
            ],
        });
    }

    /// Sends the record to the sink method its severity selects.
    pub fn print_record(&self, record: &LogRecord<'_>) {
        let entry = record.severity.style();
        let location = record.location();
        let thread = record
            .thread
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let time = record.time;
        self.sink.dispatch(&ConsoleCall {
            method: entry.method,
            format: RECORD_FORMAT,
            args: vec![
                ConsoleArg::Style(entry.label_style),
                ConsoleArg::Str(entry.label),
                ConsoleArg::Style(style::TIMESTAMP),
                ConsoleArg::Int(time.hour.into()),
                ConsoleArg::Int(time.minute.into()),
                ConsoleArg::Int(time.second.into()),
                ConsoleArg::Int(time.millisecond.into()),
                ConsoleArg::Style(style::LOCATION),
                ConsoleArg::Str(&location),
                ConsoleArg::Style(style::THREAD),
                ConsoleArg::Str(&thread),
                ConsoleArg::Style(style::RESET),
                ConsoleArg::Str(record.text),
            ],
        });
    }

    /// Error-level banner. The trace, if any, is appended verbatim.
    pub fn print_panic(&self, report: &PanicReport<'_>) {
        let thread = report.thread.to_string();
        self.sink.dispatch(&ConsoleCall {
            method: SinkMethod::Error,
            format: PANIC_FORMAT,
            args: vec![
                ConsoleArg::Style(style::ERROR),
                ConsoleArg::Str(report.title),
                ConsoleArg::Style(style::THREAD),
                ConsoleArg::Str(&thread),
                ConsoleArg::Style(style::ERROR),
                ConsoleArg::Style(style::RESET),
                ConsoleArg::Str(report.text),
                ConsoleArg::Style(style::LOCATION),
                ConsoleArg::Str(report.location),
                ConsoleArg::Style(style::RESET),
                ConsoleArg::Str(report.trace.as_deref().unwrap_or_default()),
            ],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::RecordingSink;
    use crate::core::model::{Severity, ThreadLabel, TimeOfDay};

    fn formatter() -> ConsoleFormatter<RecordingSink> {
        ConsoleFormatter::new(RecordingSink::new())
    }

    fn only_line(f: &ConsoleFormatter<RecordingSink>) -> (SinkMethod, String) {
        let mut lines = f.sink().lines();
        assert_eq!(lines.len(), 1, "expected one call, got {lines:?}");
        lines.remove(0)
    }

    #[test]
    fn test_header_padding() {
        let f = formatter();
        f.print_header("My App", CalendarDate::new(987, 1, 2));
        assert_eq!(
            only_line(&f),
            (SinkMethod::Log, "== My App - 0987-01-02 ==".to_string())
        );
    }

    #[test]
    fn test_new_day() {
        let f = formatter();
        f.print_new_day(CalendarDate::new(2024, 12, 31));
        assert_eq!(only_line(&f).1, "= 2024-12-31 =");
    }

    #[test]
    fn test_record_layout() {
        let f = formatter();
        let record = LogRecord::new("net::socket", Severity::Warn, "retrying")
            .with_line(42)
            .with_thread(ThreadLabel::Name("worker-1".into()))
            .with_time(TimeOfDay::new(5, 6, 7, 8));
        f.print_record(&record);
        assert_eq!(
            only_line(&f),
            (
                SinkMethod::Warn,
                "Warn 05:06:07.008 net::socket:42 worker-1\nretrying".to_string()
            )
        );
    }

    #[test]
    fn test_record_without_line_or_thread() {
        let f = formatter();
        let record = LogRecord::new("main.rs", Severity::Trace, "tick")
            .with_line(0)
            .with_time(TimeOfDay::new(23, 59, 59, 999));
        f.print_record(&record);
        assert_eq!(
            only_line(&f),
            (SinkMethod::Debug, "Trace 23:59:59.999 main.rs \ntick".to_string())
        );
    }

    #[test]
    fn test_record_method_follows_severity() {
        let f = formatter();
        for severity in Severity::all() {
            f.print_record(&LogRecord::new("m", *severity, "x"));
        }
        let methods: Vec<_> = f.sink().lines().into_iter().map(|(m, _)| m).collect();
        assert_eq!(
            methods,
            vec![
                SinkMethod::Error,
                SinkMethod::Warn,
                SinkMethod::Info,
                SinkMethod::Log,
                SinkMethod::Debug,
            ]
        );
    }

    #[test]
    fn test_panic_without_trace() {
        let f = formatter();
        f.print_panic(&PanicReport {
            title: "Title",
            thread: ThreadLabel::Name("T1".into()),
            text: "boom",
            location: "file.js:10",
            trace: None,
        });
        let (method, text) = only_line(&f);
        assert_eq!(method, SinkMethod::Error);
        assert_eq!(text, "== Title - T1 Panic ==\nboom\n→ file.js:10");
    }

    #[test]
    fn test_panic_trace_appended_verbatim() {
        let f = formatter();
        f.print_panic(&PanicReport {
            title: "Title",
            thread: ThreadLabel::Number(3),
            text: "boom",
            location: "src/lib.rs:1:1",
            trace: Some("\nBACKTRACE:\n  0: main".to_string()),
        });
        assert!(only_line(&f)
            .1
            .ends_with("→ src/lib.rs:1:1\nBACKTRACE:\n  0: main"));
    }

    #[test]
    fn test_percent_in_text_is_not_a_directive() {
        let f = formatter();
        f.print_record(&LogRecord::new("m", Severity::Info, "100% done %s"));
        assert!(only_line(&f).1.ends_with("\n100% done %s"));
    }
}
