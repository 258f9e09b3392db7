// K6LogView - ui/panels/mod.rs

pub mod filters;
pub mod log_table;
pub mod summary;
