//! The query interface the extraction core consumes.
//!
//! The core never parses text or infers types on its own. Everything it needs
//! to know about a program comes through [`TypeFacts`]:
//!
//! - the source files, each seen through a small [`Declaration`] view
//! - type lookups for annotations and call signatures
//! - per-type facts: symbol, alias name, intrinsic name, members
//! - per-member facts: name, type, optionality
//!
//! `crate::core::program::Program` is the swc-backed implementation; tests
//! and other front ends may supply their own.

mod view;

pub use view::*;

/// Identity of a resolved type inside one provider.
///
/// Two lookups that resolve to the same declared type return the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Identity of one member (property) of an object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(usize);

impl MemberId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// The symbol a type originates from, with the name of its enclosing scope.
///
/// For `namespace JSX { interface Element {} }` the `Element` type has
/// `name == "Element"` and `parent == Some("JSX")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub name: String,
    pub parent: Option<String>,
}

/// Documentation facts about a symbol, used by the class path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolDoc {
    pub name: String,
    pub documentation: String,
    pub type_text: String,
}

/// Documentation facts about a call or construct signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureDoc {
    pub parameters: Vec<SymbolDoc>,
    pub return_type: String,
    pub documentation: String,
}

/// Queries answered by a parsed, type-resolved program.
///
/// Methods returning `Option` return `None` when the provider has no
/// information (an unresolvable name, a missing annotation). Absence is never
/// an error for the core.
pub trait TypeFacts {
    /// Source files in the order the provider loaded them.
    fn source_files(&self) -> &[SourceFile];

    /// Return type of a function-like node's call signature, annotated or
    /// inferred.
    fn signature_return_type(&self, function: &FunctionLike) -> Option<TypeId>;

    /// Type denoted by a type annotation node.
    fn type_from_node(&self, node: &TypeNode) -> Option<TypeId>;

    /// The symbol the type was declared through, if any.
    fn type_symbol(&self, ty: TypeId) -> Option<TypeSymbol>;

    /// Name of the type alias the type was created by, if any.
    fn alias_name(&self, ty: TypeId) -> Option<String>;

    /// Canonical primitive name (`string`, `number`, ...) for intrinsic types.
    fn intrinsic_name(&self, ty: TypeId) -> Option<String>;

    /// Members of the type in declaration order.
    fn members(&self, ty: TypeId) -> Vec<MemberId>;

    fn member_name(&self, member: MemberId) -> String;

    fn member_type(&self, member: MemberId) -> Option<TypeId>;

    /// Whether the member's first declaration carries an optional marker.
    fn is_optional(&self, member: MemberId) -> bool;

    /// Name, documentation and type text of a class symbol.
    fn class_symbol(&self, class: &ClassDeclaration) -> Option<SymbolDoc>;

    /// Construct signatures of a class, one per constructor.
    fn construct_signatures(&self, class: &ClassDeclaration) -> Vec<SignatureDoc>;
}
