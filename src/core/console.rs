// LogHerald - core/console.rs
//
// The console sink contract and the substitution engine for console format
// strings (`%c`, `%s`, `%d`, `%0Nd`, `%%`).
// Core layer: sinks may write anywhere, but nothing here does I/O itself.

use std::sync::Mutex;

use crate::core::model::SinkMethod;
use crate::core::style::Style;
use crate::util::constants::MAX_FORMAT_WIDTH;
use crate::util::error::FormatError;

/// A positional argument of a console call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleArg<'a> {
    /// Consumed by `%c`.
    Style(&'a str),
    /// Consumed by `%s`.
    Str(&'a str),
    /// Consumed by `%d` / `%0Nd`; `%s` also accepts it.
    Int(i64),
}

impl ConsoleArg<'_> {
    fn kind(&self) -> &'static str {
        match self {
            ConsoleArg::Style(_) => "style",
            ConsoleArg::Str(_) => "string",
            ConsoleArg::Int(_) => "integer",
        }
    }
}

/// One invocation of a sink method: format string plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCall<'a> {
    pub method: SinkMethod,
    pub format: &'static str,
    pub args: Vec<ConsoleArg<'a>>,
}

impl ConsoleCall<'_> {
    pub fn render(&self) -> Result<Vec<Segment>, FormatError> {
        render(self.format, &self.args)
    }

    /// The call's text without any styling.
    pub fn plain_text(&self) -> Result<String, FormatError> {
        Ok(self.render()?.into_iter().map(|s| s.text).collect())
    }
}

/// A run of text printed with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub style: Style,
    pub text: String,
}

/// A console with five severity-keyed output methods.
///
/// Methods take `&self`; implementations serialise their own writes so a
/// single call is never split, but calls from several threads may interleave.
pub trait ConsoleSink {
    fn error(&self, call: &ConsoleCall<'_>);
    fn warn(&self, call: &ConsoleCall<'_>);
    fn info(&self, call: &ConsoleCall<'_>);
    fn log(&self, call: &ConsoleCall<'_>);
    fn debug(&self, call: &ConsoleCall<'_>);

    /// Invokes the method named by `call.method`.
    fn dispatch(&self, call: &ConsoleCall<'_>) {
        match call.method {
            SinkMethod::Error => self.error(call),
            SinkMethod::Warn => self.warn(call),
            SinkMethod::Info => self.info(call),
            SinkMethod::Log => self.log(call),
            SinkMethod::Debug => self.debug(call),
        }
    }
}

impl<T: ConsoleSink + ?Sized> ConsoleSink for std::sync::Arc<T> {
    fn error(&self, call: &ConsoleCall<'_>) {
        (**self).error(call)
    }
    fn warn(&self, call: &ConsoleCall<'_>) {
        (**self).warn(call)
    }
    fn info(&self, call: &ConsoleCall<'_>) {
        (**self).info(call)
    }
    fn log(&self, call: &ConsoleCall<'_>) {
        (**self).log(call)
    }
    fn debug(&self, call: &ConsoleCall<'_>) {
        (**self).debug(call)
    }
}

/// Substitutes `args` into `format`, splitting the output at every `%c`.
///
/// Surplus arguments are ignored. The first segment carries the default
/// (plain) style; empty segments are dropped.
pub fn render(format: &str, args: &[ConsoleArg<'_>]) -> Result<Vec<Segment>, FormatError> {
    let mut segments = Vec::new();
    let mut current = Segment {
        style: Style::default(),
        text: String::new(),
    };
    let mut next_arg = 0usize;
    let mut chars = format.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '%' {
            current.text.push(ch);
            continue;
        }
        let Some((_, directive)) = chars.next() else {
            return Err(FormatError::Truncated { offset });
        };
        match directive {
            '%' => current.text.push('%'),
            'c' => {
                let (index, arg) = take(args, &mut next_arg, "%c")?;
                let ConsoleArg::Style(directive) = arg else {
                    return Err(mismatch("%c", index, arg));
                };
                let next = Segment {
                    style: Style::parse(directive),
                    text: String::new(),
                };
                let done = std::mem::replace(&mut current, next);
                if !done.text.is_empty() {
                    segments.push(done);
                }
            }
            's' => match take(args, &mut next_arg, "%s")? {
                (_, ConsoleArg::Str(s)) => current.text.push_str(s),
                (_, ConsoleArg::Int(n)) => current.text.push_str(&n.to_string()),
                (index, arg) => return Err(mismatch("%s", index, arg)),
            },
            'd' | 'i' => {
                let (index, arg) = take(args, &mut next_arg, "%d")?;
                let ConsoleArg::Int(n) = arg else {
                    return Err(mismatch("%d", index, arg));
                };
                current.text.push_str(&n.to_string());
            }
            '0'..='9' => {
                let zero_pad = directive == '0';
                let mut width = 0usize;
                let mut digit = Some(directive);
                while let Some(d) = digit.and_then(|d| d.to_digit(10)) {
                    width = width
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(d as usize))
                        .filter(|w| *w <= MAX_FORMAT_WIDTH)
                        .ok_or(FormatError::WidthTooLarge {
                            offset,
                            max: MAX_FORMAT_WIDTH,
                        })?;
                    digit = chars.next_if(|(_, c)| c.is_ascii_digit()).map(|(_, c)| c);
                }
                match chars.next() {
                    Some((_, 'd' | 'i')) => {}
                    Some((_, other)) => {
                        return Err(FormatError::UnknownDirective {
                            directive: other,
                            offset,
                        })
                    }
                    None => return Err(FormatError::Truncated { offset }),
                }
                let directive = if zero_pad {
                    format!("%0{width}d")
                } else {
                    format!("%{width}d")
                };
                let (index, arg) = take(args, &mut next_arg, &directive)?;
                let ConsoleArg::Int(n) = arg else {
                    return Err(mismatch(&directive, index, arg));
                };
                if zero_pad {
                    current.text.push_str(&format!("{n:0width$}"));
                } else {
                    current.text.push_str(&format!("{n:>width$}"));
                }
            }
            other => {
                return Err(FormatError::UnknownDirective {
                    directive: other,
                    offset,
                })
            }
        }
    }

    if !current.text.is_empty() {
        segments.push(current);
    }
    Ok(segments)
}

fn take<'a>(
    args: &[ConsoleArg<'a>],
    next_arg: &mut usize,
    directive: &str,
) -> Result<(usize, ConsoleArg<'a>), FormatError> {
    let index = *next_arg;
    let arg = args
        .get(index)
        .copied()
        .ok_or_else(|| FormatError::MissingArgument {
            directive: directive.to_string(),
            index,
        })?;
    *next_arg += 1;
    Ok((index, arg))
}

fn mismatch(directive: &str, index: usize, arg: ConsoleArg<'_>) -> FormatError {
    FormatError::ArgumentMismatch {
        directive: directive.to_string(),
        index,
        found: arg.kind(),
    }
}

// =============================================================================
// Recording sink
// =============================================================================

/// A sink that keeps every call as `(method, plain text)`.
///
/// Calls whose format string fails to render are stored as the raw format.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(SinkMethod, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn lines(&self) -> Vec<(SinkMethod, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Only the text of every recorded call.
    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, text)| text).collect()
    }

    fn push(&self, call: &ConsoleCall<'_>) {
        let text = call.plain_text().unwrap_or_else(|_| call.format.to_string());
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((call.method, text));
    }
}

impl ConsoleSink for RecordingSink {
    fn error(&self, call: &ConsoleCall<'_>) {
        self.push(call)
    }
    fn warn(&self, call: &ConsoleCall<'_>) {
        self.push(call)
    }
    fn info(&self, call: &ConsoleCall<'_>) {
        self.push(call)
    }
    fn log(&self, call: &ConsoleCall<'_>) {
        self.push(call)
    }
    fn debug(&self, call: &ConsoleCall<'_>) {
        self.push(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::{self, Rgb};

    #[test]
    fn test_plain_substitution() {
        let segments = render(
            "%s has %d items (%%)",
            &[ConsoleArg::Str("cart"), ConsoleArg::Int(3)],
        )
        .unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "cart has 3 items (%)");
        assert!(segments[0].style.is_plain());
    }

    #[test]
    fn test_zero_padding() {
        let segments = render(
            "%04d-%02d-%03d|%02d",
            &[
                ConsoleArg::Int(7),
                ConsoleArg::Int(5),
                ConsoleArg::Int(7),
                ConsoleArg::Int(123),
            ],
        )
        .unwrap();
        assert_eq!(segments[0].text, "0007-05-007|123");
    }

    #[test]
    fn test_style_switches_split_segments() {
        let segments = render(
            "%cbold %cplain",
            &[ConsoleArg::Style(style::HEADER), ConsoleArg::Style(style::RESET)],
        )
        .unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "bold ");
        assert_eq!(segments[0].style.color, Some(Rgb(255, 215, 0)));
        assert!(segments[1].style.is_plain());
    }

    #[test]
    fn test_missing_argument() {
        let err = render("%s and %s", &[ConsoleArg::Str("one")]).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingArgument {
                directive: "%s".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_argument_mismatch() {
        let err = render("%d", &[ConsoleArg::Str("x")]).unwrap_err();
        assert!(matches!(
            err,
            FormatError::ArgumentMismatch { found: "string", .. }
        ));
        let err = render("%c", &[ConsoleArg::Int(1)]).unwrap_err();
        assert!(matches!(err, FormatError::ArgumentMismatch { index: 0, .. }));
    }

    #[test]
    fn test_bad_directives() {
        assert!(matches!(
            render("50%", &[]),
            Err(FormatError::Truncated { offset: 2 })
        ));
        assert!(matches!(
            render("%x", &[]),
            Err(FormatError::UnknownDirective { directive: 'x', .. })
        ));
        assert!(matches!(
            render("%02", &[ConsoleArg::Int(1)]),
            Err(FormatError::Truncated { .. })
        ));
    }

    #[test]
    fn test_oversized_width_rejected() {
        let huge = render("%099999999999999999999d", &[ConsoleArg::Int(1)]);
        assert!(matches!(
            huge,
            Err(FormatError::WidthTooLarge { offset: 0, max: MAX_FORMAT_WIDTH })
        ));
        assert!(matches!(
            render("id %0300d", &[ConsoleArg::Int(1)]),
            Err(FormatError::WidthTooLarge { offset: 3, .. })
        ));

        let widest = format!("%0{MAX_FORMAT_WIDTH}d");
        let segments = render(&widest, &[ConsoleArg::Int(1)]).unwrap();
        assert_eq!(segments[0].text.len(), MAX_FORMAT_WIDTH);
    }

    #[test]
    fn test_recording_sink_dispatch() {
        let sink = RecordingSink::new();
        for method in [SinkMethod::Error, SinkMethod::Log, SinkMethod::Debug] {
            sink.dispatch(&ConsoleCall {
                method,
                format: "%s",
                args: vec![ConsoleArg::Str(method.name())],
            });
        }
        assert_eq!(
            sink.lines(),
            vec![
                (SinkMethod::Error, "error".to_string()),
                (SinkMethod::Log, "log".to_string()),
                (SinkMethod::Debug, "debug".to_string()),
            ]
        );
    }
}
