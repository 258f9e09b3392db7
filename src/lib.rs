// K6LogView - lib.rs
//
// Library entry point, exposing the parsing, filtering, loading and UI
// modules for integration testing.
//
// The eframe application shell (`gui`) lives alongside `main.rs` and is not
// part of the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
