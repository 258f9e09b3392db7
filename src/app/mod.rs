// K6LogView - app/mod.rs
//
// Application layer: orchestration and state management.
// Dependencies: core layer, platform (file reads, config).
// Must NOT depend on: ui.

pub mod load;
pub mod state;
