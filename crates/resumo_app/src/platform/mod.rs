//! Console host for the upload widget and the summary page.
mod app;
mod clipboard;
mod config;
mod console;
mod effects;
mod logging;
mod navigation;
mod render;

pub use app::run_app;
