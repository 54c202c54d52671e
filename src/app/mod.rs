// LogHerald - app/mod.rs
//
// Application layer: wires the formatter into tracing and the panic hook.
// Dependencies: core, util, tracing-subscriber.

pub mod layer;
pub mod panic;
