//! Command-line layer: argument parsing, running an extraction, and writing
//! the JSON document.

mod args;
mod exit_status;
mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;
pub use run::{render, run};
