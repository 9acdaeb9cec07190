//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::core::{ModuleKind, ScriptTarget};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Source files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// ECMAScript target of the sources (overrides config file)
    #[arg(long, value_enum)]
    pub target: Option<ScriptTarget>,

    /// Module format, passed through unchanged (overrides config file)
    #[arg(long, value_enum)]
    pub module: Option<ModuleKind>,

    /// Emit each named type once instead of once per encounter
    #[arg(long)]
    pub dedupe: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
