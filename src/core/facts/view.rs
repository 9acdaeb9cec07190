//! Tagged-variant view of the declarations the classifier inspects.
//!
//! Providers lower their own syntax trees into these shapes. Node ids let the
//! provider map a view node back to the syntax it came from when the core asks
//! a type question about it.

/// Provider-assigned identity of a syntax node (function, type annotation,
/// class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Function(FunctionDeclaration),
    Variable(VariableDeclaration),
    Namespace(NamespaceDeclaration),
    Class(ClassDeclaration),
}

impl Declaration {
    /// Whether the declaration carries an `export` modifier.
    pub fn is_exported(&self) -> bool {
        match self {
            Declaration::Function(decl) => decl.exported,
            Declaration::Variable(decl) => decl.exported,
            Declaration::Namespace(decl) => decl.exported,
            Declaration::Class(decl) => decl.exported,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    /// `None` for `export default function () {}`.
    pub name: Option<String>,
    /// Name given by an `export { Local as Alias }` clause in the same scope.
    pub export_alias: Option<String>,
    pub exported: bool,
    pub signature: FunctionLike,
}

/// One declarator of a variable statement (`const A = ..., B = ...` yields
/// two).
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub name: String,
    pub export_alias: Option<String>,
    pub exported: bool,
    pub initializer: Option<Initializer>,
    pub annotation: Option<TypeNode>,
}

#[derive(Debug, Clone)]
pub enum Initializer {
    /// Arrow function or function expression.
    Function(FunctionLike),
    /// Any other expression.
    Value,
}

#[derive(Debug, Clone)]
pub struct NamespaceDeclaration {
    pub name: String,
    pub exported: bool,
    pub body: Vec<Declaration>,
}

#[derive(Debug, Clone)]
pub struct ClassDeclaration {
    pub id: NodeId,
    pub name: Option<String>,
    pub exported: bool,
}

/// A function declaration, function/arrow expression, or function type.
#[derive(Debug, Clone)]
pub struct FunctionLike {
    pub id: NodeId,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeNode>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<TypeNode>,
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub id: NodeId,
    pub shape: TypeNodeShape,
}

impl TypeNode {
    /// The function signature this annotation spells out, if it is a function
    /// type.
    pub fn as_function(&self) -> Option<&FunctionLike> {
        match &self.shape {
            TypeNodeShape::Function(function) => Some(function),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TypeNodeShape {
    /// `Name` or `A.B.Name`.
    Reference(EntityName),
    /// `(props: P) => R`.
    Function(Box<FunctionLike>),
    Other,
}

/// A possibly qualified type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityName {
    Ident(String),
    Qualified(Box<EntityName>, String),
}

impl EntityName {
    /// Build a name from dotted segments. Returns `None` for an empty slice.
    pub fn from_segments(segments: &[&str]) -> Option<Self> {
        let (first, rest) = segments.split_first()?;
        Some(rest.iter().fold(EntityName::Ident(first.to_string()), |left, right| {
            EntityName::Qualified(Box::new(left), right.to_string())
        }))
    }

    pub fn segments(&self) -> Vec<&str> {
        match self {
            EntityName::Ident(name) => vec![name.as_str()],
            EntityName::Qualified(left, right) => {
                let mut segments = left.segments();
                segments.push(right.as_str());
                segments
            }
        }
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments().join("."))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_entity_name_segments() {
        let name = EntityName::from_segments(&["UI", "JSX", "Element"]).unwrap();
        assert_eq!(name.segments(), vec!["UI", "JSX", "Element"]);
        assert_eq!(name.to_string(), "UI.JSX.Element");
    }

    #[test]
    fn test_entity_name_nests_to_the_left() {
        let name = EntityName::from_segments(&["JSX", "Element"]).unwrap();
        assert_eq!(
            name,
            EntityName::Qualified(
                Box::new(EntityName::Ident("JSX".to_string())),
                "Element".to_string()
            )
        );
        assert!(EntityName::from_segments(&[]).is_none());
    }
}
