// The binary in main.rs only sets up the terminal and logging; the widget
// itself lives here so integration tests and benchmarks can drive it.

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod keyboard;
pub mod store;
pub mod ui;
