//! Reads root files and every relative import they pull in.
//!
//! Root files are parsed in parallel. Dependencies are discovered depth-first
//! and the final order lists every file after the files it imports.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use swc_common::SourceMap;
use swc_ecma_ast::{EsVersion, ModuleDecl, ModuleItem};
use tracing::{debug, warn};

use crate::core::parsers::tsx::{ParsedSource, parse_tsx_source};

/// Extensions tried, in order, for an extensionless relative import.
const SOURCE_EXTENSIONS: [&str; 3] = ["ts", "tsx", "d.ts"];

/// Extensions that name script sources. A relative import with any other
/// extension (`./styles.css`) is an asset and is skipped when unresolved.
const SCRIPT_EXTENSIONS: [&str; 8] = ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Emitted-file extensions mapped back to the sources they are built from.
const EMITTED_TO_SOURCE: [(&str, &[&str]); 4] = [
    (".js", &[".ts", ".tsx", ".d.ts"]),
    (".jsx", &[".tsx"]),
    (".mjs", &[".mts", ".d.mts"]),
    (".cjs", &[".cts", ".d.cts"]),
];

/// Index of a loaded file, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct LoadedFile {
    /// Path as given (roots) or as joined from the importing file.
    pub path: String,
    pub parsed: ParsedSource,
    /// Resolved relative imports, keyed by specifier text.
    pub dependencies: HashMap<String, ModuleId>,
}

impl LoadedFile {
    /// Whether the file has no import or export and so declares into the
    /// global scope.
    pub fn is_script(&self) -> bool {
        !self
            .parsed
            .module
            .body
            .iter()
            .any(|item| matches!(item, ModuleItem::ModuleDecl(_)))
    }
}

pub struct LoadedFiles {
    /// Every file, indexed by [`ModuleId`].
    pub files: Vec<LoadedFile>,
    /// Program order: each file after its dependencies.
    pub order: Vec<ModuleId>,
}

impl LoadedFiles {
    pub fn get(&self, id: ModuleId) -> &LoadedFile {
        &self.files[id.0]
    }
}

/// Load `roots` and everything they import through relative specifiers.
pub fn load_files<P: AsRef<Path> + Sync>(
    roots: &[P],
    target: EsVersion,
    source_map: &Arc<SourceMap>,
) -> Result<LoadedFiles> {
    let parsed_roots = roots
        .par_iter()
        .map(|root| {
            let path = root.as_ref();
            parse_file(path, target, source_map).map(|parsed| (path.to_path_buf(), parsed))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut loader = Loader {
        target,
        source_map: Arc::clone(source_map),
        files: Vec::new(),
        by_path: HashMap::new(),
        visited: HashSet::new(),
        order: Vec::new(),
    };

    let mut root_ids = Vec::new();
    for (path, parsed) in parsed_roots {
        match loader.by_path.get(&canonical(&path)) {
            Some(_) => debug!(file = %path.display(), "duplicate root file"),
            None => root_ids.push(loader.register(&path, parsed)),
        }
    }

    for id in root_ids {
        loader.visit(id)?;
    }

    Ok(LoadedFiles {
        files: loader.files,
        order: loader.order,
    })
}

struct Loader {
    target: EsVersion,
    source_map: Arc<SourceMap>,
    files: Vec<LoadedFile>,
    by_path: HashMap<PathBuf, ModuleId>,
    visited: HashSet<ModuleId>,
    order: Vec<ModuleId>,
}

impl Loader {
    fn register(&mut self, path: &Path, parsed: ParsedSource) -> ModuleId {
        let id = ModuleId(self.files.len());
        self.files.push(LoadedFile {
            path: path.to_string_lossy().to_string(),
            parsed,
            dependencies: HashMap::new(),
        });
        self.by_path.insert(canonical(path), id);
        id
    }

    fn get_or_load(&mut self, path: &Path) -> Result<ModuleId> {
        if let Some(id) = self.by_path.get(&canonical(path)) {
            return Ok(*id);
        }
        let parsed = parse_file(path, self.target, &self.source_map)?;
        Ok(self.register(path, parsed))
    }

    fn visit(&mut self, id: ModuleId) -> Result<()> {
        if !self.visited.insert(id) {
            return Ok(());
        }

        let current = PathBuf::from(&self.files[id.0].path);
        for specifier in module_specifiers(&self.files[id.0].parsed) {
            let Some(path) = resolve_import_path(&current, &specifier)? else {
                continue;
            };
            let dependency = self.get_or_load(&path)?;
            self.files[id.0]
                .dependencies
                .insert(specifier, dependency);
            self.visit(dependency)?;
        }

        self.order.push(id);
        Ok(())
    }
}

fn parse_file(path: &Path, target: EsVersion, source_map: &Arc<SourceMap>) -> Result<ParsedSource> {
    let file_path = path.to_string_lossy();
    let code =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", file_path))?;
    let parsed = parse_tsx_source(code, &file_path, Arc::clone(source_map), target)?;

    for error in &parsed.recovered_errors {
        warn!(file = %file_path, error = %error, "recovered from syntax error");
    }
    debug!(file = %file_path, "parsed source file");

    Ok(parsed)
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Specifiers of `import ... from`, `export ... from` and `export * from`.
fn module_specifiers(parsed: &ParsedSource) -> Vec<String> {
    parsed
        .module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(&import.src),
            ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)) => export.src.as_ref(),
            ModuleItem::ModuleDecl(ModuleDecl::ExportAll(export)) => Some(&export.src),
            _ => None,
        })
        .filter_map(|src| src.value.as_str().map(str::to_string))
        .collect()
}

/// Resolve a relative import to a source file.
///
/// Returns `Ok(None)` for bare package specifiers and for unresolved asset
/// imports. An unresolved relative script import is an error.
pub fn resolve_import_path(current_file: &Path, import_path: &str) -> Result<Option<PathBuf>> {
    // Only handle relative imports
    if !import_path.starts_with('.') {
        return Ok(None);
    }

    let base_dir = current_file.parent().unwrap_or_else(|| Path::new(""));
    // Strip leading "./" from import_path to avoid paths like "./src/./utils"
    let normalized_import = import_path.strip_prefix("./").unwrap_or(import_path);
    let resolved = base_dir.join(normalized_import);

    if let Some(found) = candidates(&resolved).into_iter().find(|path| path.is_file()) {
        return Ok(Some(found));
    }

    match resolved.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !SCRIPT_EXTENSIONS.contains(&ext) => {
            debug!(import = import_path, "skipping non-script import");
            Ok(None)
        }
        _ => bail!(
            "Cannot resolve import '{}' from {}",
            import_path,
            current_file.display()
        ),
    }
}

fn candidates(resolved: &Path) -> Vec<PathBuf> {
    let text = resolved.to_string_lossy();
    let mut candidates = Vec::new();

    if [".ts", ".tsx", ".mts", ".cts"]
        .iter()
        .any(|ext| text.ends_with(ext))
    {
        candidates.push(resolved.to_path_buf());
    }

    for (emitted, sources) in EMITTED_TO_SOURCE {
        if let Some(stem) = text.strip_suffix(emitted) {
            candidates.extend(sources.iter().map(|ext| PathBuf::from(format!("{stem}{ext}"))));
        }
    }

    for ext in SOURCE_EXTENSIONS {
        candidates.push(PathBuf::from(format!("{text}.{ext}")));
    }
    for ext in SOURCE_EXTENSIONS {
        candidates.push(resolved.join(format!("index.{ext}")));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn load(roots: &[PathBuf]) -> Result<LoadedFiles> {
        load_files(roots, EsVersion::Es5, &Arc::new(SourceMap::default()))
    }

    fn file_names(loaded: &LoadedFiles) -> Vec<String> {
        loaded
            .order
            .iter()
            .map(|id| {
                Path::new(&loaded.get(*id).path)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_resolve_extensionless_import() {
        let dir = TempDir::new().unwrap();
        let app = write(&dir, "app.tsx", "");
        let button = write(&dir, "button.tsx", "");

        let resolved = resolve_import_path(&app, "./button").unwrap();
        assert_eq!(resolved, Some(button));
    }

    #[test]
    fn test_resolve_index_and_js_specifiers() {
        let dir = TempDir::new().unwrap();
        let app = write(&dir, "app.ts", "");
        let index = write(&dir, "widgets/index.ts", "");
        let util = write(&dir, "util.ts", "");

        assert_eq!(resolve_import_path(&app, "./widgets").unwrap(), Some(index));
        assert_eq!(resolve_import_path(&app, "./util.js").unwrap(), Some(util));
    }

    #[test]
    fn test_resolve_keeps_dotted_basenames() {
        let dir = TempDir::new().unwrap();
        let app = write(&dir, "app.ts", "");
        let styles = write(&dir, "button.styles.ts", "");

        assert_eq!(
            resolve_import_path(&app, "./button.styles").unwrap(),
            Some(styles)
        );
    }

    #[test]
    fn test_bare_and_asset_imports_are_skipped() {
        let dir = TempDir::new().unwrap();
        let app = write(&dir, "app.tsx", "");

        assert_eq!(resolve_import_path(&app, "react").unwrap(), None);
        assert_eq!(resolve_import_path(&app, "./app.css").unwrap(), None);
    }

    #[test]
    fn test_missing_relative_import_is_an_error() {
        let dir = TempDir::new().unwrap();
        let app = write(&dir, "app.tsx", "");

        let err = resolve_import_path(&app, "./missing").unwrap_err();
        assert!(err.to_string().contains("./missing"));
    }

    #[test]
    fn test_dependencies_come_first() {
        let dir = TempDir::new().unwrap();
        let app = write(
            &dir,
            "app.tsx",
            "import { Button } from './button';\nimport './theme.css';\n",
        );
        write(&dir, "button.tsx", "export * from './types';\n");
        write(&dir, "types.ts", "export interface P {}\n");

        let loaded = load(&[app]).unwrap();
        assert_eq!(file_names(&loaded), vec!["types.ts", "button.tsx", "app.tsx"]);

        let root = loaded.get(loaded.order[2]);
        assert!(root.dependencies.contains_key("./button"));
        assert!(!root.dependencies.contains_key("./theme.css"));
    }

    #[test]
    fn test_shared_dependency_loaded_once() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.tsx", "import { S } from './shared';\n");
        let b = write(&dir, "b.tsx", "import { S } from './shared';\n");
        write(&dir, "shared.ts", "export type S = { x: number };\n");

        let loaded = load(&[a, b]).unwrap();
        assert_eq!(loaded.files.len(), 3);
        assert_eq!(file_names(&loaded), vec!["shared.ts", "a.tsx", "b.tsx"]);
    }

    #[test]
    fn test_import_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { B } from './b';\nexport type A = {};\n");
        write(&dir, "b.ts", "import { A } from './a';\nexport type B = {};\n");

        let loaded = load(&[a]).unwrap();
        assert_eq!(file_names(&loaded), vec!["b.ts", "a.ts"]);
    }

    #[test]
    fn test_duplicate_roots_are_loaded_once() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "export type A = {};\n");

        let loaded = load(&[a.clone(), a]).unwrap();
        assert_eq!(loaded.files.len(), 1);
        assert_eq!(loaded.order.len(), 1);
    }

    #[test]
    fn test_missing_root_names_the_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.tsx");

        let err = load(&[missing]).err().unwrap();
        assert!(err.to_string().contains("Failed to read"));
        assert!(err.to_string().contains("missing.tsx"));
    }

    #[test]
    fn test_script_detection() {
        let dir = TempDir::new().unwrap();
        let script = write(&dir, "globals.d.ts", "declare namespace JSX { interface Element {} }\n");
        let module = write(&dir, "mod.ts", "export const x = 1;\n");

        let loaded = load(&[script, module]).unwrap();
        assert!(loaded.files[0].is_script());
        assert!(!loaded.files[1].is_script());
    }
}
