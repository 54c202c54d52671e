// LogHerald - core/trace.rs
//
// Backtrace capture for panic banners. Never fails: when the runtime does
// not provide a stack the result is an empty string.

use std::backtrace::{Backtrace, BacktraceStatus};

use crate::util::constants::BACKTRACE_LABEL;

/// Captures the current stack if backtraces are enabled for this process
/// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
pub fn capture_trace() -> String {
    trace_text(&Backtrace::capture())
}

/// `"\nBACKTRACE:\n{frames}"` for a captured trace, otherwise `""`.
pub fn trace_text(trace: &Backtrace) -> String {
    match trace.status() {
        BacktraceStatus::Captured => format!("{BACKTRACE_LABEL}{trace}"),
        _ => String::new(),
    }
}
