//! JSDoc comments and class facts for the class documentation path.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use swc_common::{
    BytePos, SourceMapper, Spanned,
    comments::{Comment, CommentKind},
};
use swc_ecma_ast::{
    AssignPat, Class, ClassMember, Constructor, Expr, Lit, ParamOrTsParamProp, Pat,
    TsParamPropParam, TsTypeAnn,
};

use crate::core::classify::DEFAULT_EXPORT_NAME;
use crate::core::facts::{SignatureDoc, SymbolDoc};
use crate::core::parsers::tsx::ParsedSource;

/// Type text of a parameter with neither annotation nor literal default.
const IMPLICIT_ANY: &str = "any";

// Matches a block tag line: @param {string} name - text
static JSDOC_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\w+)\s*(.*)$").unwrap());

// Capture group 1: parameter name, 2: description.
// Skips an optional {type}, optional [brackets] and default values.
static PARAM_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\{[^}]*\}\s*)?\[?([\w$.]+)\S*\s*(?:-\s*)?(.*)$").unwrap()
});

/// Description and `@param` texts of one JSDoc comment.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct JsDoc {
    pub description: String,
    pub params: HashMap<String, String>,
}

/// Parse the JSDoc comment closest to a declaration. Plain `/* */` and `//`
/// comments are ignored.
pub fn parse_jsdoc(comments: &[Comment]) -> JsDoc {
    let Some(comment) = comments
        .iter()
        .rev()
        .find(|comment| comment.kind == CommentKind::Block && comment.text.starts_with('*'))
    else {
        return JsDoc::default();
    };

    let mut description = Vec::new();
    let mut tags: Vec<(String, String)> = Vec::new();

    for line in comment.text.lines() {
        let line = line.trim();
        let line = line.strip_prefix('*').unwrap_or(line).trim();

        if let Some(captures) = JSDOC_TAG_REGEX.captures(line) {
            let tag = captures.get(1).map_or("", |m| m.as_str());
            let text = captures.get(2).map_or("", |m| m.as_str());
            tags.push((tag.to_string(), text.to_string()));
        } else if let Some((_, text)) = tags.last_mut() {
            if !line.is_empty() {
                text.push(' ');
                text.push_str(line);
            }
        } else {
            description.push(line);
        }
    }

    let params = tags
        .iter()
        .filter(|(tag, _)| matches!(tag.as_str(), "param" | "arg" | "argument"))
        .filter_map(|(_, text)| {
            let captures = PARAM_TAG_REGEX.captures(text)?;
            let name = captures.get(1)?.as_str().to_string();
            let text = captures.get(2).map_or("", |m| m.as_str()).trim().to_string();
            Some((name, text))
        })
        .collect();

    JsDoc {
        description: description.join("\n").trim().to_string(),
        params,
    }
}

/// Symbol facts and construct signatures of a class.
///
/// `doc_pos` is where the class's leading comments attach (the `export`
/// keyword when there is one).
pub fn class_facts(
    name: Option<&str>,
    class: &Class,
    parsed: &ParsedSource,
    doc_pos: BytePos,
) -> (SymbolDoc, Vec<SignatureDoc>) {
    let name = name.unwrap_or(DEFAULT_EXPORT_NAME);
    let doc = parse_jsdoc(parsed.comments.leading_at(doc_pos));

    let symbol = SymbolDoc {
        name: name.to_string(),
        documentation: doc.description,
        type_text: format!("typeof {name}"),
    };

    let constructors: Vec<&Constructor> = class
        .body
        .iter()
        .filter_map(|member| match member {
            ClassMember::Constructor(constructor) => Some(constructor),
            _ => None,
        })
        .collect();

    // With overloads, only the bodiless declarations are signatures.
    let overloads: Vec<&Constructor> = constructors
        .iter()
        .copied()
        .filter(|constructor| constructor.body.is_none())
        .collect();
    let declared = if overloads.is_empty() {
        constructors
    } else {
        overloads
    };

    let signatures = if declared.is_empty() {
        vec![SignatureDoc {
            parameters: Vec::new(),
            return_type: name.to_string(),
            documentation: String::new(),
        }]
    } else {
        declared
            .into_iter()
            .map(|constructor| constructor_signature(name, constructor, parsed))
            .collect()
    };

    (symbol, signatures)
}

fn constructor_signature(class_name: &str, constructor: &Constructor, parsed: &ParsedSource) -> SignatureDoc {
    let doc = parse_jsdoc(parsed.comments.leading_at(constructor.span.lo));

    let parameters = constructor
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let (name, ann, default) = match param {
                ParamOrTsParamProp::Param(param) => pat_parts(&param.pat),
                ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
                    TsParamPropParam::Ident(binding) => (
                        Some(binding.id.sym.to_string()),
                        binding.type_ann.as_deref(),
                        None,
                    ),
                    TsParamPropParam::Assign(assign) => assign_parts(assign),
                },
            };
            let name = name.unwrap_or_else(|| format!("__{index}"));
            SymbolDoc {
                documentation: doc.params.get(&name).cloned().unwrap_or_default(),
                type_text: type_text(ann, default, parsed),
                name,
            }
        })
        .collect();

    SignatureDoc {
        parameters,
        return_type: class_name.to_string(),
        documentation: doc.description,
    }
}

type ParamParts<'a> = (Option<String>, Option<&'a TsTypeAnn>, Option<&'a Expr>);

fn pat_parts(pat: &Pat) -> ParamParts<'_> {
    match pat {
        Pat::Ident(binding) => (
            Some(binding.id.sym.to_string()),
            binding.type_ann.as_deref(),
            None,
        ),
        Pat::Assign(assign) => assign_parts(assign),
        Pat::Rest(rest) => {
            let (name, _, _) = pat_parts(&rest.arg);
            (name, rest.type_ann.as_deref(), None)
        }
        Pat::Object(object) => (None, object.type_ann.as_deref(), None),
        Pat::Array(array) => (None, array.type_ann.as_deref(), None),
        _ => (None, None, None),
    }
}

fn assign_parts(assign: &AssignPat) -> ParamParts<'_> {
    let (name, ann, _) = pat_parts(&assign.left);
    (name, ann, Some(&*assign.right))
}

fn type_text(ann: Option<&TsTypeAnn>, default: Option<&Expr>, parsed: &ParsedSource) -> String {
    if let Some(ann) = ann {
        return parsed
            .source_map
            .span_to_snippet(ann.type_ann.span())
            .unwrap_or_else(|_| IMPLICIT_ANY.to_string());
    }

    let inferred = match default {
        Some(Expr::Lit(Lit::Str(_))) | Some(Expr::Tpl(_)) => "string",
        Some(Expr::Lit(Lit::Num(_))) => "number",
        Some(Expr::Lit(Lit::Bool(_))) => "boolean",
        _ => IMPLICIT_ANY,
    };
    inferred.to_string()
}
