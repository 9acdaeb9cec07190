use std::env;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::args::Arguments;
use crate::config::{ConfigLoadResult, load_config};
use crate::core::scan::scan_paths;
use crate::core::{Documentation, ExtractOptions, SchemaMode, generate_documentation_with};

/// Run one extraction for the parsed arguments.
///
/// CLI flags take priority over the config file, which takes priority over
/// defaults.
pub fn run(args: &Arguments) -> Result<Documentation> {
    let base_dir = env::current_dir().context("Failed to get current directory")?;
    let ConfigLoadResult { config, from_file } = load_config(&base_dir)?;
    debug!(from_file, "configuration loaded");

    let mut options = config.compiler_options();
    if let Some(target) = args.target {
        options.target = target;
    }
    if let Some(module) = args.module {
        options.module = module;
    }
    let schema_mode = if args.dedupe {
        SchemaMode::Dedupe
    } else {
        config.schema_mode()
    };

    let scan = scan_paths(
        &base_dir,
        &args.paths,
        &config.ignores,
        config.ignore_test_files,
    );
    debug!(
        files = scan.files.len(),
        skipped = scan.skipped_count,
        "input paths expanded"
    );
    if scan.files.is_empty() {
        bail!("No source files found in the given paths");
    }

    generate_documentation_with(&scan.files, &options, &ExtractOptions { schema_mode })
}

/// Serialize the document with four-space indentation.
pub fn render(documentation: &Documentation) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    documentation
        .serialize(&mut serializer)
        .context("Failed to serialize documentation")?;
    String::from_utf8(buffer).context("Serialized documentation is not UTF-8")
}
