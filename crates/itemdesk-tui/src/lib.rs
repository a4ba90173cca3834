// Terminal UI over the item store
// Form on top, filter below it, grouped list underneath

pub mod app;
pub mod runner;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use app::{App, InputMode};
pub use runner::run_tui;
