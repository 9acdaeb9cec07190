//! Component props-schema extraction.
//!
//! ## Module Structure
//!
//! - `facts`: The `TypeFacts` query interface and the declaration view
//! - `classify`: Decides whether a declaration is a component
//! - `schema`: Reduces a props type to a flat property list
//! - `traverse`: Walks source files and drives classification and extraction
//! - `output`: Output records (`Component`, `Schema`, `Property`, `DocEntry`)
//! - `program`: swc-backed `TypeFacts` implementation
//! - `parsers`: TypeScript/TSX parsing
//! - `scan`: Expands input directories into source files
//!
//! ## Pipeline
//!
//! 1. **Load** (`program::Program::load`)
//!    - Parse root files in parallel, follow relative imports
//!    - Bind scopes and lower declarations into the view
//!
//! 2. **Traverse** (`traverse::document_program`)
//!    - Visit exported declarations in program order
//!    - Classify components, extract their props schemas
//!
//! 3. **Aggregate** (`output::Documentation`)
//!    - Two append-only sequences: `types` and `components`

pub mod classify;
pub mod facts;
pub mod output;
pub mod parsers;
pub mod program;
pub mod scan;
pub mod schema;
pub mod traverse;


use std::path::Path;

use anyhow::Result;

pub use output::{Component, DocEntry, Documentation, Property, Schema};
pub use program::{CompilerOptions, ModuleKind, Program, ScriptTarget};
pub use schema::SchemaMode;
pub use traverse::{ExtractOptions, document_program};

/// Extract components and props schemas from `file_names` and everything
/// they import. Repeated named types are emitted every time they are met.
pub fn generate_documentation<P: AsRef<Path> + Sync>(
    file_names: &[P],
    options: &CompilerOptions,
) -> Result<Documentation> {
    generate_documentation_with(file_names, options, &ExtractOptions::default())
}

/// [`generate_documentation`] with explicit extraction options.
pub fn generate_documentation_with<P: AsRef<Path> + Sync>(
    file_names: &[P],
    options: &CompilerOptions,
    extract: &ExtractOptions,
) -> Result<Documentation> {
    let program = Program::load(file_names, options)?;
    Ok(document_program(&program, extract))
}
