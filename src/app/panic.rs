// LogHerald - app/panic.rs
//
// Panic hook that prints the panic banner through the console formatter.

use std::any::Any;
use std::panic;
use std::sync::Arc;
use std::thread;

use crate::core::console::ConsoleSink;
use crate::core::formatter::ConsoleFormatter;
use crate::core::model::{PanicReport, ThreadLabel};
use crate::core::trace::capture_trace;
use crate::util::constants;

/// Runs after the banner has been printed.
pub type PanicCallback = fn(&PanicReport<'_>);

/// Replaces the process panic hook with one that prints a panic banner
/// (title, thread, message, location, optional backtrace) and then calls
/// `callback`, if any.
pub fn install_panic_hook<S>(
    title: String,
    formatter: Arc<ConsoleFormatter<S>>,
    callback: Option<PanicCallback>,
) where
    S: ConsoleSink + Send + Sync + 'static,
{
    let title = if title.is_empty() {
        constants::UNKNOWN_TITLE.to_string()
    } else {
        title
    };
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| constants::UNKNOWN_LOCATION.to_string());
        let thread = thread::current();
        let trace = capture_trace();
        let report = PanicReport {
            title: &title,
            thread: ThreadLabel::of(&thread),
            text: payload_text(info.payload()),
            location: &location,
            trace: (!trace.is_empty()).then_some(trace),
        };
        formatter.print_panic(&report);
        if let Some(callback) = callback {
            callback(&report);
        }
    }));
}

/// The panic message, if the payload is a string.
pub fn payload_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        *text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.as_str()
    } else {
        constants::NON_STRING_PANIC_MESSAGE
    }
}
