//! Propscan - React component props-schema extractor
//!
//! Propscan reads TypeScript/TSX sources, finds the exported function
//! components (declarations whose call signature returns `JSX.Element`), and
//! reduces each component's props type to a flat schema of named, optionally
//! typed properties for downstream code generators.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine and the swc-backed type facts provider

pub mod cli;
pub mod config;
pub mod core;
