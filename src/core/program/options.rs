//! Pass-through compiler options.
//!
//! The extraction core never looks at these. The swc program uses `target` to
//! pick the ECMAScript version it parses and only logs `module`.

use serde::{Deserialize, Serialize};
use swc_ecma_ast::EsVersion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerOptions {
    #[serde(default)]
    pub target: ScriptTarget,
    #[serde(default)]
    pub module: ModuleKind,
}

/// Language level of the sources.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    Es3,
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    #[serde(alias = "latest")]
    #[value(name = "esnext")]
    EsNext,
}

impl From<ScriptTarget> for EsVersion {
    fn from(target: ScriptTarget) -> Self {
        match target {
            ScriptTarget::Es3 => EsVersion::Es3,
            ScriptTarget::Es5 => EsVersion::Es5,
            ScriptTarget::Es2015 => EsVersion::Es2015,
            ScriptTarget::Es2016 => EsVersion::Es2016,
            ScriptTarget::Es2017 => EsVersion::Es2017,
            ScriptTarget::Es2018 => EsVersion::Es2018,
            ScriptTarget::Es2019 => EsVersion::Es2019,
            ScriptTarget::Es2020 => EsVersion::Es2020,
            ScriptTarget::Es2021 => EsVersion::Es2021,
            ScriptTarget::Es2022 => EsVersion::Es2022,
            ScriptTarget::EsNext => EsVersion::EsNext,
        }
    }
}

/// Module emit format. Carried through unchanged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    None,
    #[default]
    #[value(name = "commonjs")]
    CommonJs,
    Amd,
    Umd,
    System,
    Es2015,
    Es2020,
    #[value(name = "esnext")]
    EsNext,
    Node16,
    #[value(name = "nodenext")]
    NodeNext,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompilerOptions::default();
        assert_eq!(options.target, ScriptTarget::Es5);
        assert_eq!(options.module, ModuleKind::CommonJs);
    }

    #[test]
    fn test_parse_lowercase_names() {
        let options: CompilerOptions =
            serde_json::from_str(r#"{ "target": "es2020", "module": "esnext" }"#).unwrap();
        assert_eq!(options.target, ScriptTarget::Es2020);
        assert_eq!(options.module, ModuleKind::EsNext);
        assert_eq!(EsVersion::from(options.target), EsVersion::Es2020);
    }

    #[test]
    fn test_latest_alias() {
        let options: CompilerOptions = serde_json::from_str(r#"{ "target": "latest" }"#).unwrap();
        assert_eq!(options.target, ScriptTarget::EsNext);
        assert_eq!(options.module, ModuleKind::CommonJs);
    }
}
