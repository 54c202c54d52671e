// LogHerald - platform/terminal.rs
//
// Console sink backed by the process's stdout/stderr. Style directives are
// rendered as bold / 24-bit ANSI colour through the `colored` crate.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;

use crate::core::console::{ConsoleCall, ConsoleSink, Segment};
use crate::core::model::SinkMethod;

/// When to emit ANSI colour codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Colour only streams attached to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// Which stream each sink method writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StreamMode {
    /// `error` and `warn` to stderr, everything else to stdout.
    #[default]
    Split,
    /// Everything to stderr.
    Stderr,
}

impl StreamMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "split" => Some(Self::Split),
            "stderr" => Some(Self::Stderr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes console calls to the real terminal streams.
#[derive(Debug)]
pub struct TerminalSink {
    streams: StreamMode,
    stdout_color: bool,
    stderr_color: bool,
}

impl TerminalSink {
    /// Colour is decided here, per stream. When either stream is coloured the
    /// `colored` override is switched on for the whole process, so its own
    /// stdout-only detection never strips codes meant for stderr.
    pub fn new(color: ColorMode, streams: StreamMode) -> Self {
        let (stdout_color, stderr_color) = match color {
            ColorMode::Auto => {
                let env = |key: &str| std::env::var(key).ok();
                (
                    auto_color(io::stdout().is_terminal(), env),
                    auto_color(io::stderr().is_terminal(), env),
                )
            }
            ColorMode::Always => (true, true),
            ColorMode::Never => (false, false),
        };
        if stdout_color || stderr_color {
            colored::control::set_override(true);
        }
        Self {
            streams,
            stdout_color,
            stderr_color,
        }
    }

    fn stream_for(&self, method: SinkMethod) -> Stream {
        match (self.streams, method) {
            (StreamMode::Stderr, _) => Stream::Stderr,
            (StreamMode::Split, SinkMethod::Error | SinkMethod::Warn) => Stream::Stderr,
            (StreamMode::Split, _) => Stream::Stdout,
        }
    }

    fn write(&self, call: &ConsoleCall<'_>) {
        let stream = self.stream_for(call.method);
        let colored = match stream {
            Stream::Stdout => self.stdout_color,
            Stream::Stderr => self.stderr_color,
        };
        let mut line = render_line(call, colored);
        line.push('\n');
        // Write failures on the console have nowhere to be reported.
        let _ = match stream {
            Stream::Stdout => io::stdout().lock().write_all(line.as_bytes()),
            Stream::Stderr => io::stderr().lock().write_all(line.as_bytes()),
        };
    }

    pub fn flush(&self) {
        let _ = io::stdout().lock().flush();
        let _ = io::stderr().lock().flush();
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new(ColorMode::default(), StreamMode::default())
    }
}

impl ConsoleSink for TerminalSink {
    fn error(&self, call: &ConsoleCall<'_>) {
        self.write(call)
    }
    fn warn(&self, call: &ConsoleCall<'_>) {
        self.write(call)
    }
    fn info(&self, call: &ConsoleCall<'_>) {
        self.write(call)
    }
    fn log(&self, call: &ConsoleCall<'_>) {
        self.write(call)
    }
    fn debug(&self, call: &ConsoleCall<'_>) {
        self.write(call)
    }
}

/// `auto` colour for one stream: `CLICOLOR_FORCE` wins, `NO_COLOR` or
/// `CLICOLOR=0` turn colour off, otherwise colour terminals only.
fn auto_color(is_terminal: bool, env: impl Fn(&str) -> Option<String>) -> bool {
    if env("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    if env("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if env("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    is_terminal
}

/// Renders a call to one string. A call that fails to substitute prints its
/// raw format string rather than nothing.
pub fn render_line(call: &ConsoleCall<'_>, colored: bool) -> String {
    match call.render() {
        Ok(segments) => segments.iter().map(|s| paint(s, colored)).collect(),
        Err(_) => call.format.to_string(),
    }
}

fn paint(segment: &Segment, colored: bool) -> String {
    if !colored || segment.style.is_plain() {
        return segment.text.clone();
    }
    // Style each line separately so a newline never sits inside an escape run.
    segment
        .text
        .split_inclusive('\n')
        .map(|part| {
            let (body, newline) = match part.strip_suffix('\n') {
                Some(body) => (body, "\n"),
                None => (part, ""),
            };
            let mut painted = body.normal();
            if let Some(rgb) = segment.style.color {
                painted = painted.truecolor(rgb.0, rgb.1, rgb.2);
            }
            if segment.style.bold {
                painted = painted.bold();
            }
            format!("{painted}{newline}")
        })
        .collect()
}
