// LogHerald - core/mod.rs
//
// Core rendering logic layer.
// Dependencies: standard library, chrono, tracing (level type only).
// Must NOT depend on: platform, app, or write to a real stream directly.

pub mod console;
pub mod formatter;
pub mod model;
pub mod style;
pub mod trace;
