// LogHerald - tests/e2e_panic.rs
//
// The panic hook is process-global, so it gets its own test binary.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use logherald::app::panic::install_panic_hook;
use logherald::core::console::RecordingSink;
use logherald::core::formatter::ConsoleFormatter;
use logherald::core::model::{PanicReport, SinkMethod};

static CALLBACK_RAN: AtomicBool = AtomicBool::new(false);

fn on_panic(report: &PanicReport<'_>) {
    assert_eq!(report.text, "reactor meltdown");
    CALLBACK_RAN.store(true, Ordering::SeqCst);
}

#[test]
fn e2e_panic_hook_prints_banner_and_runs_callback() {
    let formatter = Arc::new(ConsoleFormatter::new(RecordingSink::new()));
    install_panic_hook("Plant".to_string(), Arc::clone(&formatter), Some(on_panic));

    let result = thread::Builder::new()
        .name("exploder".to_string())
        .spawn(|| panic!("reactor meltdown"))
        .unwrap()
        .join();
    let _ = panic::take_hook();

    assert!(result.is_err());
    assert!(CALLBACK_RAN.load(Ordering::SeqCst));

    let lines = formatter.sink().lines();
    assert_eq!(lines.len(), 1);
    let (method, text) = &lines[0];
    assert_eq!(*method, SinkMethod::Error);
    assert!(text.starts_with("== Plant - exploder Panic ==\nreactor meltdown\n→ "));
    assert!(text.contains("e2e_panic.rs:"));
    let after_location = text.split_once("e2e_panic.rs:").unwrap().1;
    if after_location.contains('\n') {
        assert!(after_location.contains("\nBACKTRACE:\n"));
    }
}
