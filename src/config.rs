use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{CompilerOptions, ModuleKind, SchemaMode, ScriptTarget};

pub const CONFIG_FILE_NAME: &str = ".propscanrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub target: ScriptTarget,
    #[serde(default)]
    pub module: ModuleKind,
    #[serde(default)]
    pub dedupe_schemas: bool,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: ScriptTarget::default(),
            module: ModuleKind::default(),
            dedupe_schemas: false,
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            target: self.target,
            module: self.module,
        }
    }

    pub fn schema_mode(&self) -> SchemaMode {
        if self.dedupe_schemas {
            SchemaMode::Dedupe
        } else {
            SchemaMode::Repeat
        }
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert!(config.ignore_test_files);
        assert!(!config.dedupe_schemas);
        assert_eq!(config.target, ScriptTarget::Es5);
        assert_eq!(config.module, ModuleKind::CommonJs);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "target": "es2020",
              "module": "esnext",
              "dedupeSchemas": true,
              "ignores": ["**/dist/**"],
              "ignoreTestFiles": false
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.target, ScriptTarget::Es2020);
        assert_eq!(config.module, ModuleKind::EsNext);
        assert!(config.dedupe_schemas);
        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert!(!config.ignore_test_files);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "ignores": ["**/dist/**"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.target, ScriptTarget::default());
        assert!(config.ignore_test_files);
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let json = r#"{ "target": "es1999" }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".propscanrc.json");

        fs::write(&config_path, r#"{ "ignores": ["**/stories/**"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/stories/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.ignores.is_empty());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".propscanrc.json");

        fs::write(&config_path, r#"{ "ignores": ["[invalid"] }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            target: ScriptTarget::Es2017,
            dedupe_schemas: true,
            ..Default::default()
        };
        let options = config.compiler_options();
        assert_eq!(options.target, ScriptTarget::Es2017);
        assert_eq!(options.module, ModuleKind::CommonJs);
        assert_eq!(config.schema_mode(), SchemaMode::Dedupe);
        assert_eq!(Config::default().schema_mode(), SchemaMode::Repeat);
    }
}
