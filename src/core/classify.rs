//! Component classification.
//!
//! A declaration is a component when it is function-like and either its call
//! signature returns `JSX.Element` (annotated or inferred), or its return
//! annotation literally reads `JSX.Element`. Either check alone is enough.

use super::facts::{
    Declaration, EntityName, FunctionLike, Initializer, TypeFacts, TypeNode, TypeNodeShape,
    VariableDeclaration,
};

const JSX_NAMESPACE: &str = "JSX";
const ELEMENT_NAME: &str = "Element";

/// Name used for `export default function () {}`.
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// A declaration that classified as a component.
#[derive(Debug)]
pub struct ComponentCandidate<'a> {
    /// Exported name: the export alias when re-exported under another name.
    pub name: String,
    /// Declared type of the first parameter. `None` when the component takes
    /// no parameter or the parameter is unannotated.
    pub props: Option<&'a TypeNode>,
}

/// Classify a function or variable declaration.
///
/// Namespaces and classes never classify; the traversal handles them.
pub fn classify<'a>(
    facts: &dyn TypeFacts,
    declaration: &'a Declaration,
) -> Option<ComponentCandidate<'a>> {
    match declaration {
        Declaration::Function(function) => {
            if !is_functional_component(facts, &function.signature) {
                return None;
            }
            let name = function
                .export_alias
                .clone()
                .or_else(|| function.name.clone())
                .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());
            Some(ComponentCandidate {
                name,
                props: props_type_node(&function.signature),
            })
        }
        Declaration::Variable(variable) => {
            let signature = variable_signature(variable)?;
            if !is_functional_component(facts, signature) {
                return None;
            }
            let name = variable
                .export_alias
                .clone()
                .unwrap_or_else(|| variable.name.clone());
            Some(ComponentCandidate {
                name,
                props: props_type_node(signature),
            })
        }
        Declaration::Namespace(_) | Declaration::Class(_) => None,
    }
}

/// The signature a variable declarator stands for.
///
/// The initializer wins when present; only an uninitialized declarator falls
/// back to a function-type annotation (`declare const Foo: (p: P) => ...`).
fn variable_signature(variable: &VariableDeclaration) -> Option<&FunctionLike> {
    match &variable.initializer {
        Some(Initializer::Function(function)) => Some(function),
        Some(Initializer::Value) => None,
        None => variable.annotation.as_ref()?.as_function(),
    }
}

fn props_type_node(signature: &FunctionLike) -> Option<&TypeNode> {
    signature.parameters.first()?.annotation.as_ref()
}

pub fn is_functional_component(facts: &dyn TypeFacts, signature: &FunctionLike) -> bool {
    returns_jsx_element(facts, signature) || annotated_jsx_element(signature)
}

fn returns_jsx_element(facts: &dyn TypeFacts, signature: &FunctionLike) -> bool {
    facts
        .signature_return_type(signature)
        .and_then(|ty| facts.type_symbol(ty))
        .is_some_and(|symbol| {
            symbol.name == ELEMENT_NAME && symbol.parent.as_deref() == Some(JSX_NAMESPACE)
        })
}

fn annotated_jsx_element(signature: &FunctionLike) -> bool {
    let Some(TypeNode {
        shape: TypeNodeShape::Reference(EntityName::Qualified(left, right)),
        ..
    }) = &signature.return_type
    else {
        return false;
    };

    matches!(&**left, EntityName::Ident(qualifier) if qualifier == JSX_NAMESPACE)
        && right == ELEMENT_NAME
}
