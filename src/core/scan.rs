use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of expanding input paths.
pub struct ScanResult {
    /// Explicit files first, in argument order, then directory contents sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Expand `inputs` into source files.
///
/// Files are kept as given, whatever their extension, and missing paths are
/// passed through so loading reports them. Directories are walked for
/// `.ts`/`.tsx` files (`.d.ts` included), skipping `ignore_patterns` and,
/// when asked, test files.
pub fn scan_paths(
    base_dir: &Path,
    inputs: &[PathBuf],
    ignore_patterns: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut discovered: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    for input in inputs {
        let input = base_dir.join(input);
        if !input.is_dir() {
            if !files.contains(&input) {
                files.push(input);
            }
            continue;
        }

        for entry in WalkDir::new(&input) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                discovered.insert(path.to_path_buf());
            }
        }
    }

    let discovered: Vec<PathBuf> = discovered
        .into_iter()
        .filter(|path| !files.contains(path))
        .collect();
    files.extend(discovered);

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts")
    )
}
