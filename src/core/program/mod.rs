//! swc-backed program: loads TypeScript/TSX sources and answers the
//! [`TypeFacts`] queries over them.
//!
//! - `loader`: reads and parses files, follows relative imports
//! - `binder`: scopes, type declarations, the declaration view
//! - `checker`: type resolution and the type arena
//! - `infer`: return types of unannotated functions
//! - `docs`: JSDoc and class facts

mod binder;
mod checker;
mod docs;
mod infer;
mod loader;
mod options;

use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use swc_common::SourceMap;
use tracing::debug;

pub use options::{CompilerOptions, ModuleKind, ScriptTarget};

use self::binder::Index;
use self::checker::{Checker, TypeArena};
use crate::core::facts::{
    ClassDeclaration, FunctionLike, MemberId, SignatureDoc, SourceFile, SymbolDoc, TypeFacts,
    TypeId, TypeNode, TypeSymbol,
};

/// A loaded, bound program. Types are resolved on demand and cached.
pub struct Program {
    files: Vec<SourceFile>,
    index: Index,
    arena: RefCell<TypeArena>,
}

impl Program {
    /// Load `file_names` and their relative imports.
    pub fn load<P: AsRef<Path> + Sync>(file_names: &[P], options: &CompilerOptions) -> Result<Self> {
        debug!(
            files = file_names.len(),
            target = ?options.target,
            module = ?options.module,
            "loading program"
        );

        let source_map = Arc::new(SourceMap::default());
        let loaded = loader::load_files(file_names, options.target.into(), &source_map)?;
        let (index, files) = binder::bind(&loaded);

        debug!(files = files.len(), "program loaded");
        Ok(Self {
            files,
            index,
            arena: RefCell::new(TypeArena::default()),
        })
    }

    fn checker(&self) -> Checker<'_> {
        Checker::new(&self.index, &self.arena)
    }
}

impl TypeFacts for Program {
    fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    fn signature_return_type(&self, function: &FunctionLike) -> Option<TypeId> {
        if let Some(annotation) = &function.return_type {
            return self.type_from_node(annotation);
        }

        let site = self.index.function_sites.get(function.id.index())?;
        if site.wraps_result {
            return None;
        }
        let body = site.body.as_ref()?;
        self.checker().infer_return(site.scope, body)
    }

    fn type_from_node(&self, node: &TypeNode) -> Option<TypeId> {
        self.checker().type_at_site(node.id)
    }

    fn type_symbol(&self, ty: TypeId) -> Option<TypeSymbol> {
        self.arena.borrow().get(ty).symbol.clone()
    }

    fn alias_name(&self, ty: TypeId) -> Option<String> {
        self.arena.borrow().get(ty).alias.clone()
    }

    fn intrinsic_name(&self, ty: TypeId) -> Option<String> {
        self.arena.borrow().get(ty).intrinsic.map(str::to_string)
    }

    fn members(&self, ty: TypeId) -> Vec<MemberId> {
        self.arena.borrow().get(ty).members.clone()
    }

    fn member_name(&self, member: MemberId) -> String {
        self.arena.borrow().member(member).name.clone()
    }

    fn member_type(&self, member: MemberId) -> Option<TypeId> {
        self.checker().member_type(member)
    }

    fn is_optional(&self, member: MemberId) -> bool {
        self.arena.borrow().member(member).optional
    }

    fn class_symbol(&self, class: &ClassDeclaration) -> Option<SymbolDoc> {
        self.index
            .class_sites
            .get(class.id.index())
            .map(|site| site.symbol.clone())
    }

    fn construct_signatures(&self, class: &ClassDeclaration) -> Vec<SignatureDoc> {
        self.index
            .class_sites
            .get(class.id.index())
            .map(|site| site.constructors.clone())
            .unwrap_or_default()
    }
}
