// LogHerald - lib.rs
//
// Library entry point: console formatting (core), terminal and config
// (platform), tracing and panic wiring (app), and shared utilities.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
