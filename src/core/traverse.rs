//! Traversal over exported declarations.
//!
//! Files are visited in provider order and declarations in source order.
//! Namespace bodies are visited inline, depth-first, at the point the
//! namespace appears.

use tracing::{debug, warn};

use super::classify::classify;
use super::facts::{ClassDeclaration, Declaration, SignatureDoc, SymbolDoc, TypeFacts};
use super::output::{Component, DocEntry, Documentation};
use super::schema::{SchemaExtractor, SchemaMode};

/// Options for one extraction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub schema_mode: SchemaMode,
}

/// Walk every source file of `facts` and collect components and schemas.
pub fn document_program(facts: &dyn TypeFacts, options: &ExtractOptions) -> Documentation {
    let mut walker = Walker {
        facts,
        extractor: SchemaExtractor::new(facts, options.schema_mode),
        output: Documentation::default(),
        file_name: String::new(),
    };

    for file in facts.source_files() {
        debug!(file = %file.path, "visiting source file");
        walker.file_name = file.path.clone();
        for declaration in &file.declarations {
            walker.visit(declaration, true);
        }
    }

    walker.output
}

struct Walker<'f> {
    facts: &'f dyn TypeFacts,
    extractor: SchemaExtractor<'f>,
    output: Documentation,
    file_name: String,
}

impl Walker<'_> {
    fn visit(&mut self, declaration: &Declaration, at_file_scope: bool) {
        if !at_file_scope && !declaration.is_exported() {
            return;
        }

        match declaration {
            Declaration::Class(class) => {
                let entry = self.serialize_class(class);
                self.output.classes.push(entry);
            }
            Declaration::Namespace(namespace) => {
                for child in &namespace.body {
                    self.visit(child, false);
                }
            }
            Declaration::Function(_) | Declaration::Variable(_) => {
                self.visit_candidate(declaration);
            }
        }
    }

    fn visit_candidate(&mut self, declaration: &Declaration) {
        let Some(candidate) = classify(self.facts, declaration) else {
            return;
        };

        let props_schema_name = match candidate.props {
            Some(node) => match self.facts.type_from_node(node) {
                Some(ty) => Some(self.extractor.extract_into(ty, &mut self.output.types)),
                None => {
                    warn!(
                        component = %candidate.name,
                        file = %self.file_name,
                        "props type could not be resolved"
                    );
                    None
                }
            },
            None => None,
        };

        debug!(
            component = %candidate.name,
            props = ?props_schema_name,
            "found component"
        );
        self.output.components.push(Component {
            name: candidate.name,
            props_schema_name,
        });
    }

    /// Legacy class path: name, documentation and construct signatures.
    fn serialize_class(&self, class: &ClassDeclaration) -> DocEntry {
        let mut entry = match self.facts.class_symbol(class) {
            Some(symbol) => serialize_symbol(symbol),
            None => DocEntry {
                name: class.name.clone(),
                ..Default::default()
            },
        };
        entry.file_name = Some(self.file_name.clone());
        entry.constructors = Some(
            self.facts
                .construct_signatures(class)
                .into_iter()
                .map(serialize_signature)
                .collect(),
        );
        entry
    }
}

fn serialize_symbol(symbol: SymbolDoc) -> DocEntry {
    DocEntry {
        name: Some(symbol.name),
        documentation: Some(symbol.documentation),
        type_text: Some(symbol.type_text),
        ..Default::default()
    }
}

fn serialize_signature(signature: SignatureDoc) -> DocEntry {
    DocEntry {
        parameters: Some(
            signature
                .parameters
                .into_iter()
                .map(serialize_symbol)
                .collect(),
        ),
        return_type: Some(signature.return_type),
        documentation: Some(signature.documentation),
        ..Default::default()
    }
}
