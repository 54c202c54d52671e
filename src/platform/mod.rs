// LogHerald - platform/mod.rs
//
// Platform abstraction layer: config files and the real terminal.
// Dependencies: standard library, directories, colored.
// Must NOT depend on: app.

pub mod config;
pub mod terminal;
