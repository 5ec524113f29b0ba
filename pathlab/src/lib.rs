//! Terminal demonstrator for the `pathlab-core` A* engine.
//!
//! Place a start, an end and walls with the mouse, pick a heuristic, and
//! watch the search expand cell by cell.

pub mod app;
pub mod canvas;
pub mod config;
pub mod driver;
pub mod logging;
pub mod msg;
pub mod runner;
pub mod term;
pub mod view;

pub use app::{App, Effect, Mode};
pub use config::Config;
pub use driver::Driver;
pub use runner::Runner;
pub use term::CrosstermDriver;
