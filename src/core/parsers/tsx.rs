use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Thread-safe leading comments extracted from SingleThreadedComments.
/// Extracted during parsing and stored independently of swc types.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, _) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// Comments that end right before `pos`.
    pub fn leading_at(&self, pos: BytePos) -> &[Comment] {
        self.leading.get(&pos).map(Vec::as_slice).unwrap_or_default()
    }
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
    /// Syntax errors the parser recovered from.
    pub recovered_errors: Vec<String>,
}

/// Pick the parser syntax from a file name.
///
/// `.d.ts` parses as a declaration file, `.ts`/`.mts`/`.cts` as plain
/// TypeScript (so `<T>expr` casts keep working), everything else as TSX.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let is_dts = [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|ext| file_path.ends_with(ext));
    let is_plain_ts = [".ts", ".mts", ".cts"]
        .iter()
        .any(|ext| file_path.ends_with(ext));

    Syntax::Typescript(TsSyntax {
        tsx: !is_plain_ts,
        dts: is_dts,
        ..Default::default()
    })
}

/// Parse TypeScript/TSX source code string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_tsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
    target: EsVersion,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let lexer = Lexer::new(
            syntax_for_path(file_path),
            target,
            StringInput::from(&*source_file),
            Some(&comments),
        );
        let mut parser = Parser::new_from(lexer);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        let recovered_errors = parser
            .take_errors()
            .into_iter()
            .map(|e| format!("{:?}", e))
            .collect();

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source_map,
            comments: extracted_comments,
            recovered_errors,
        })
    })
}
