//! Binding: scopes, named type declarations and the declaration view.
//!
//! Every file gets a scope, and so does every namespace. Script files (no
//! import or export) share the global scope. Syntax the checker needs later
//! (type annotations, function bodies) is kept as owned "sites" addressed by
//! the [`NodeId`]s handed out in the view.

use std::collections::HashMap;

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmtOrExpr, Class, Decl, DefaultDecl, ExportSpecifier, Expr, Function,
    ImportSpecifier, ModuleDecl, ModuleExportName, ModuleItem, Pat, Stmt, TsEntityName,
    TsFnOrConstructorType, TsFnParam, TsFnType, TsInterfaceBody, TsModuleDecl, TsModuleName,
    TsNamespaceBody, TsType, TsTypeAnn,
};
use tracing::debug;

use super::docs;
use super::loader::{LoadedFile, LoadedFiles, ModuleId};
use crate::core::facts::{
    ClassDeclaration, Declaration, EntityName, FunctionDeclaration, FunctionLike, Initializer,
    NamespaceDeclaration, NodeId, Parameter, SignatureDoc, SourceFile, SymbolDoc, TypeNode,
    TypeNodeShape, VariableDeclaration,
};

/// Re-export chains longer than this are treated as unresolvable.
const MAX_EXPORT_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDeclId(usize);

impl TypeDeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub const GLOBAL_SCOPE: ScopeId = ScopeId(0);

#[derive(Debug, Clone)]
pub enum ImportBinding {
    /// `import { name } from`, `import name from` (as `default`).
    Named { module: ModuleId, name: String },
    /// `import * as local from`.
    Namespace { module: ModuleId },
}

#[derive(Debug, Clone)]
pub enum ExportBinding {
    Local(String),
    Reexport { module: ModuleId, name: String },
    Namespace { module: ModuleId },
}

#[derive(Debug, Default)]
pub struct Scope {
    /// Namespace name; `None` for file and global scopes.
    pub name: Option<String>,
    pub parent: Option<ScopeId>,
    pub types: HashMap<String, TypeDeclId>,
    pub namespaces: HashMap<String, ScopeId>,
    pub imports: HashMap<String, ImportBinding>,
    pub exports: HashMap<String, ExportBinding>,
    pub star_exports: Vec<ModuleId>,
}

#[derive(Debug)]
pub enum TypeDeclKind {
    /// Every body of a merged interface, in declaration order.
    Interface(Vec<TsInterfaceBody>),
    Alias(Box<TsType>),
    /// Classes and enums: named, no structural members.
    Opaque,
}

#[derive(Debug)]
pub struct TypeDecl {
    pub name: String,
    pub scope: ScopeId,
    pub kind: TypeDeclKind,
}

#[derive(Debug)]
pub struct TypeSite {
    pub scope: ScopeId,
    pub ty: Box<TsType>,
}

#[derive(Debug)]
pub struct FunctionSite {
    pub scope: ScopeId,
    /// `None` for bodiless signatures (overloads, declarations, fn types).
    pub body: Option<BlockStmtOrExpr>,
    /// Async functions and generators never return an element directly.
    pub wraps_result: bool,
}

#[derive(Debug)]
pub struct ClassSite {
    pub symbol: SymbolDoc,
    pub constructors: Vec<SignatureDoc>,
}

/// Everything the checker resolves against.
#[derive(Debug)]
pub struct Index {
    pub scopes: Vec<Scope>,
    /// Scope of each module, by [`ModuleId`].
    pub module_scopes: Vec<ScopeId>,
    pub decls: Vec<TypeDecl>,
    pub type_sites: Vec<TypeSite>,
    pub function_sites: Vec<FunctionSite>,
    pub class_sites: Vec<ClassSite>,
}

impl Index {
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn decl(&self, id: TypeDeclId) -> &TypeDecl {
        &self.decls[id.0]
    }

    /// Resolve a possibly qualified type name as seen from `scope`.
    ///
    /// Searches enclosing namespaces outward, then the file scope and its
    /// imports, then the global scope.
    pub fn lookup(&self, scope: ScopeId, segments: &[&str]) -> Option<TypeDeclId> {
        let mut current = Some(scope);
        let mut searched_global = false;

        while let Some(id) = current {
            if let Some(found) = self.lookup_in_scope(id, segments, 0) {
                return Some(found);
            }
            searched_global |= id == GLOBAL_SCOPE;
            current = self.scope(id).parent;
        }

        if searched_global {
            None
        } else {
            self.lookup_in_scope(GLOBAL_SCOPE, segments, 0)
        }
    }

    fn lookup_in_scope(&self, scope: ScopeId, segments: &[&str], depth: usize) -> Option<TypeDeclId> {
        let (first, rest) = segments.split_first()?;
        let data = self.scope(scope);

        let local = if rest.is_empty() {
            data.types.get(*first).copied()
        } else {
            data.namespaces
                .get(*first)
                .and_then(|namespace| self.lookup_qualified(*namespace, rest))
        };
        if local.is_some() {
            return local;
        }

        match data.imports.get(*first)? {
            ImportBinding::Named { module, name } => {
                self.lookup_export(*module, name, rest, depth + 1)
            }
            ImportBinding::Namespace { module } => {
                let (name, rest) = rest.split_first()?;
                self.lookup_export(*module, name, rest, depth + 1)
            }
        }
    }

    /// Qualified access into a namespace body.
    fn lookup_qualified(&self, namespace: ScopeId, segments: &[&str]) -> Option<TypeDeclId> {
        let (first, rest) = segments.split_first()?;
        let data = self.scope(namespace);
        if rest.is_empty() {
            data.types.get(*first).copied()
        } else {
            let inner = data.namespaces.get(*first)?;
            self.lookup_qualified(*inner, rest)
        }
    }

    fn lookup_export(
        &self,
        module: ModuleId,
        name: &str,
        rest: &[&str],
        depth: usize,
    ) -> Option<TypeDeclId> {
        if depth > MAX_EXPORT_DEPTH {
            debug!(name, "re-export chain too deep");
            return None;
        }

        let scope = self.module_scopes[module.index()];
        let data = self.scope(scope);

        if let Some(binding) = data.exports.get(name) {
            return match binding {
                ExportBinding::Local(local) => {
                    let mut segments = vec![local.as_str()];
                    segments.extend_from_slice(rest);
                    self.lookup_in_scope(scope, &segments, depth + 1)
                }
                ExportBinding::Reexport { module, name } => {
                    self.lookup_export(*module, name, rest, depth + 1)
                }
                ExportBinding::Namespace { module } => {
                    let (name, rest) = rest.split_first()?;
                    self.lookup_export(*module, name, rest, depth + 1)
                }
            };
        }

        data.star_exports
            .iter()
            .find_map(|star| self.lookup_export(*star, name, rest, depth + 1))
    }
}

/// Bind every loaded file. Returns the index and the declaration views in
/// program order.
pub fn bind(loaded: &LoadedFiles) -> (Index, Vec<SourceFile>) {
    let mut index = Index {
        scopes: vec![Scope::default()],
        module_scopes: Vec::with_capacity(loaded.files.len()),
        decls: Vec::new(),
        type_sites: Vec::new(),
        function_sites: Vec::new(),
        class_sites: Vec::new(),
    };

    for file in &loaded.files {
        let scope = if file.is_script() {
            GLOBAL_SCOPE
        } else {
            new_scope(&mut index, None, None)
        };
        index.module_scopes.push(scope);
    }

    let mut files = Vec::with_capacity(loaded.order.len());
    for id in &loaded.order {
        let file = loaded.get(*id);
        let scope = index.module_scopes[id.index()];
        let mut binder = FileBinder {
            index: &mut index,
            file,
        };
        let declarations = binder.bind_items(&file.parsed.module.body, scope);
        debug!(
            file = %file.path,
            declarations = declarations.len(),
            "bound source file"
        );
        files.push(SourceFile {
            path: file.path.clone(),
            declarations,
        });
    }

    (index, files)
}

fn new_scope(index: &mut Index, name: Option<String>, parent: Option<ScopeId>) -> ScopeId {
    index.scopes.push(Scope {
        name,
        parent,
        ..Default::default()
    });
    ScopeId(index.scopes.len() - 1)
}

struct FileBinder<'a> {
    index: &'a mut Index,
    file: &'a LoadedFile,
}

impl FileBinder<'_> {
    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.index.scopes[id.0]
    }

    fn bind_items(&mut self, items: &[ModuleItem], scope: ScopeId) -> Vec<Declaration> {
        let aliases = self.bind_export_clauses(items, scope);
        let mut declarations = Vec::new();

        for item in items {
            let doc_pos = item.span().lo;
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    let Some(module) = import
                        .src
                        .value
                        .as_str()
                        .and_then(|src| self.file.dependencies.get(src))
                        .copied()
                    else {
                        continue;
                    };
                    for specifier in &import.specifiers {
                        let (local, binding) = match specifier {
                            ImportSpecifier::Named(named) => {
                                let local = named.local.sym.to_string();
                                let name = named
                                    .imported
                                    .as_ref()
                                    .map(export_name)
                                    .unwrap_or_else(|| local.clone());
                                (local, ImportBinding::Named { module, name })
                            }
                            ImportSpecifier::Default(default) => (
                                default.local.sym.to_string(),
                                ImportBinding::Named {
                                    module,
                                    name: "default".to_string(),
                                },
                            ),
                            ImportSpecifier::Namespace(namespace) => (
                                namespace.local.sym.to_string(),
                                ImportBinding::Namespace { module },
                            ),
                        };
                        self.scope_mut(scope).imports.insert(local, binding);
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    declarations.extend(self.bind_decl(&export.decl, scope, true, &aliases, doc_pos));
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                    if let Some(declaration) = self.bind_default_decl(&export.decl, scope, doc_pos)
                    {
                        declarations.push(declaration);
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                    if let Expr::Ident(ident) = &*export.expr {
                        self.export(scope, "default", ident.sym.to_string());
                    }
                }
                ModuleItem::Stmt(Stmt::Decl(decl)) => {
                    declarations.extend(self.bind_decl(decl, scope, false, &aliases, doc_pos));
                }
                _ => {}
            }
        }

        declarations
    }

    /// Record `export { a as b }`, `export ... from` and `export *` clauses.
    /// Returns local-name to exported-alias mappings for view naming.
    fn bind_export_clauses(&mut self, items: &[ModuleItem], scope: ScopeId) -> HashMap<String, String> {
        let mut aliases = HashMap::new();

        for item in items {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)) => {
                    let source = match &export.src {
                        Some(src) => {
                            let Some(module) = src
                                .value
                                .as_str()
                                .and_then(|src| self.file.dependencies.get(src))
                                .copied()
                            else {
                                continue;
                            };
                            Some(module)
                        }
                        None => None,
                    };

                    for specifier in &export.specifiers {
                        match specifier {
                            ExportSpecifier::Named(named) => {
                                let orig = export_name(&named.orig);
                                let exported = named
                                    .exported
                                    .as_ref()
                                    .map(export_name)
                                    .unwrap_or_else(|| orig.clone());
                                let binding = match source {
                                    Some(module) => ExportBinding::Reexport {
                                        module,
                                        name: orig.clone(),
                                    },
                                    None => {
                                        if exported != orig && exported != "default" {
                                            aliases.entry(orig.clone()).or_insert(exported.clone());
                                        }
                                        ExportBinding::Local(orig)
                                    }
                                };
                                self.scope_mut(scope)
                                    .exports
                                    .entry(exported)
                                    .or_insert(binding);
                            }
                            ExportSpecifier::Namespace(namespace) => {
                                if let Some(module) = source {
                                    self.scope_mut(scope)
                                        .exports
                                        .entry(export_name(&namespace.name))
                                        .or_insert(ExportBinding::Namespace { module });
                                }
                            }
                            ExportSpecifier::Default(default) => {
                                if let Some(module) = source {
                                    self.scope_mut(scope)
                                        .exports
                                        .entry(default.exported.sym.to_string())
                                        .or_insert(ExportBinding::Reexport {
                                            module,
                                            name: "default".to_string(),
                                        });
                                }
                            }
                        }
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportAll(export)) => {
                    if let Some(module) = export
                        .src
                        .value
                        .as_str()
                        .and_then(|src| self.file.dependencies.get(src))
                        .copied()
                    {
                        self.scope_mut(scope).star_exports.push(module);
                    }
                }
                _ => {}
            }
        }

        aliases
    }

    fn export(&mut self, scope: ScopeId, exported: &str, local: String) {
        self.scope_mut(scope)
            .exports
            .entry(exported.to_string())
            .or_insert(ExportBinding::Local(local));
    }

    fn bind_decl(
        &mut self,
        decl: &Decl,
        scope: ScopeId,
        exported: bool,
        aliases: &HashMap<String, String>,
        doc_pos: BytePos,
    ) -> Vec<Declaration> {
        match decl {
            Decl::Fn(fn_decl) => {
                let name = fn_decl.ident.sym.to_string();
                vec![Declaration::Function(FunctionDeclaration {
                    export_alias: aliases.get(&name).cloned(),
                    name: Some(name),
                    exported,
                    signature: self.function(&fn_decl.function, scope),
                })]
            }
            Decl::Var(var) => var
                .decls
                .iter()
                .filter_map(|declarator| {
                    // Destructured declarators never name a component.
                    let Pat::Ident(binding) = &declarator.name else {
                        return None;
                    };
                    let name = binding.id.sym.to_string();
                    let annotation = binding
                        .type_ann
                        .as_deref()
                        .map(|ann| self.type_node(&ann.type_ann, scope));
                    let initializer = declarator
                        .init
                        .as_deref()
                        .map(|init| self.initializer(init, scope));
                    Some(Declaration::Variable(VariableDeclaration {
                        export_alias: aliases.get(&name).cloned(),
                        name,
                        exported,
                        initializer,
                        annotation,
                    }))
                })
                .collect(),
            Decl::Class(class_decl) => {
                let name = class_decl.ident.sym.to_string();
                self.declare(scope, &name, TypeDeclKind::Opaque, exported);
                vec![self.class(Some(name), &class_decl.class, exported, doc_pos)]
            }
            Decl::TsInterface(interface) => {
                let name = interface.id.sym.to_string();
                self.declare_interface(scope, &name, &interface.body, exported);
                Vec::new()
            }
            Decl::TsTypeAlias(alias) => {
                let name = alias.id.sym.to_string();
                self.declare(
                    scope,
                    &name,
                    TypeDeclKind::Alias(alias.type_ann.clone()),
                    exported,
                );
                Vec::new()
            }
            Decl::TsEnum(enum_decl) => {
                let name = enum_decl.id.sym.to_string();
                self.declare(scope, &name, TypeDeclKind::Opaque, exported);
                Vec::new()
            }
            Decl::TsModule(module) => vec![self.namespace(module, scope, exported)],
            Decl::Using(_) => Vec::new(),
        }
    }

    fn bind_default_decl(
        &mut self,
        decl: &DefaultDecl,
        scope: ScopeId,
        doc_pos: BytePos,
    ) -> Option<Declaration> {
        match decl {
            DefaultDecl::Fn(fn_expr) => {
                let name = fn_expr.ident.as_ref().map(|ident| ident.sym.to_string());
                Some(Declaration::Function(FunctionDeclaration {
                    name,
                    export_alias: None,
                    exported: true,
                    signature: self.function(&fn_expr.function, scope),
                }))
            }
            DefaultDecl::Class(class_expr) => {
                let name = class_expr.ident.as_ref().map(|ident| ident.sym.to_string());
                if let Some(name) = &name {
                    self.declare(scope, name, TypeDeclKind::Opaque, false);
                    self.export(scope, "default", name.clone());
                }
                Some(self.class(name, &class_expr.class, true, doc_pos))
            }
            DefaultDecl::TsInterfaceDecl(interface) => {
                let name = interface.id.sym.to_string();
                self.declare_interface(scope, &name, &interface.body, false);
                self.export(scope, "default", name);
                None
            }
        }
    }

    fn namespace(&mut self, module: &TsModuleDecl, scope: ScopeId, exported: bool) -> Declaration {
        // `declare global { ... }` adds to the global scope.
        if module.global {
            let body = self.namespace_body(module.body.as_ref(), GLOBAL_SCOPE);
            return Declaration::Namespace(NamespaceDeclaration {
                name: "global".to_string(),
                exported,
                body,
            });
        }

        let (name, inner) = match &module.id {
            TsModuleName::Ident(ident) => {
                let name = ident.sym.to_string();
                (name.clone(), self.namespace_scope(scope, &name, exported))
            }
            // `declare module "pkg" { ... }` is only reachable through a bare
            // import, which is never followed.
            TsModuleName::Str(literal) => {
                let name = literal.value.to_string_lossy().to_string();
                (name.clone(), new_scope(self.index, Some(name), Some(scope)))
            }
        };

        let body = self.namespace_body(module.body.as_ref(), inner);
        Declaration::Namespace(NamespaceDeclaration {
            name,
            exported,
            body,
        })
    }

    fn namespace_body(&mut self, body: Option<&TsNamespaceBody>, scope: ScopeId) -> Vec<Declaration> {
        match body {
            Some(TsNamespaceBody::TsModuleBlock(block)) => self.bind_items(&block.body, scope),
            // `namespace A.B { ... }`: the inner namespace is implicitly exported.
            Some(TsNamespaceBody::TsNamespaceDecl(nested)) => {
                let name = nested.id.sym.to_string();
                let inner = self.namespace_scope(scope, &name, true);
                let body = self.namespace_body(Some(&*nested.body), inner);
                vec![Declaration::Namespace(NamespaceDeclaration {
                    name,
                    exported: true,
                    body,
                })]
            }
            None => Vec::new(),
        }
    }

    /// Scope of namespace `name` in `parent`, merging with an earlier
    /// declaration of the same namespace.
    fn namespace_scope(&mut self, parent: ScopeId, name: &str, exported: bool) -> ScopeId {
        if exported {
            self.export(parent, name, name.to_string());
        }
        if let Some(existing) = self.index.scope(parent).namespaces.get(name) {
            return *existing;
        }
        let scope = new_scope(self.index, Some(name.to_string()), Some(parent));
        self.scope_mut(parent)
            .namespaces
            .insert(name.to_string(), scope);
        scope
    }

    fn declare(&mut self, scope: ScopeId, name: &str, kind: TypeDeclKind, exported: bool) {
        if exported {
            self.export(scope, name, name.to_string());
        }
        if self.index.scope(scope).types.contains_key(name) {
            debug!(name, "duplicate type declaration, keeping the first");
            return;
        }
        self.index.decls.push(TypeDecl {
            name: name.to_string(),
            scope,
            kind,
        });
        let id = TypeDeclId(self.index.decls.len() - 1);
        self.scope_mut(scope).types.insert(name.to_string(), id);
    }

    fn declare_interface(
        &mut self,
        scope: ScopeId,
        name: &str,
        body: &TsInterfaceBody,
        exported: bool,
    ) {
        if let Some(id) = self.index.scope(scope).types.get(name).copied()
            && let TypeDeclKind::Interface(bodies) = &mut self.index.decls[id.0].kind
        {
            bodies.push(body.clone());
            if exported {
                self.export(scope, name, name.to_string());
            }
            return;
        }
        self.declare(
            scope,
            name,
            TypeDeclKind::Interface(vec![body.clone()]),
            exported,
        );
    }

    fn class(
        &mut self,
        name: Option<String>,
        class: &Class,
        exported: bool,
        doc_pos: BytePos,
    ) -> Declaration {
        let (symbol, constructors) =
            docs::class_facts(name.as_deref(), class, &self.file.parsed, doc_pos);
        self.index.class_sites.push(ClassSite {
            symbol,
            constructors,
        });
        Declaration::Class(ClassDeclaration {
            id: NodeId::new(self.index.class_sites.len() - 1),
            name,
            exported,
        })
    }

    fn initializer(&mut self, init: &Expr, scope: ScopeId) -> Initializer {
        match unwrap_expr(init) {
            Expr::Arrow(arrow) => Initializer::Function(self.arrow(arrow, scope)),
            Expr::Fn(fn_expr) => Initializer::Function(self.function(&fn_expr.function, scope)),
            _ => Initializer::Value,
        }
    }

    fn function(&mut self, function: &Function, scope: ScopeId) -> FunctionLike {
        let id = self.function_site(FunctionSite {
            scope,
            body: function.body.clone().map(BlockStmtOrExpr::BlockStmt),
            wraps_result: function.is_async || function.is_generator,
        });
        let parameters = function
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| self.parameter(index, &param.pat, scope))
            .collect();
        FunctionLike {
            id,
            parameters,
            return_type: self.return_type(function.return_type.as_deref(), scope),
        }
    }

    fn arrow(&mut self, arrow: &ArrowExpr, scope: ScopeId) -> FunctionLike {
        let id = self.function_site(FunctionSite {
            scope,
            body: Some((*arrow.body).clone()),
            wraps_result: arrow.is_async || arrow.is_generator,
        });
        let parameters = arrow
            .params
            .iter()
            .enumerate()
            .map(|(index, pat)| self.parameter(index, pat, scope))
            .collect();
        FunctionLike {
            id,
            parameters,
            return_type: self.return_type(arrow.return_type.as_deref(), scope),
        }
    }

    fn fn_type(&mut self, fn_type: &TsFnType, scope: ScopeId) -> FunctionLike {
        let id = self.function_site(FunctionSite {
            scope,
            body: None,
            wraps_result: false,
        });
        let parameters = fn_type
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| match param {
                TsFnParam::Ident(binding) => self.parameter_with(
                    binding.id.sym.to_string(),
                    binding.type_ann.as_deref(),
                    scope,
                ),
                TsFnParam::Array(array) => {
                    self.parameter_with(format!("__{index}"), array.type_ann.as_deref(), scope)
                }
                TsFnParam::Object(object) => {
                    self.parameter_with(format!("__{index}"), object.type_ann.as_deref(), scope)
                }
                TsFnParam::Rest(rest) => {
                    self.parameter_with(rest_name(index, &rest.arg), rest.type_ann.as_deref(), scope)
                }
            })
            .collect();
        FunctionLike {
            id,
            parameters,
            return_type: Some(self.type_node(&fn_type.type_ann.type_ann, scope)),
        }
    }

    fn function_site(&mut self, site: FunctionSite) -> NodeId {
        self.index.function_sites.push(site);
        NodeId::new(self.index.function_sites.len() - 1)
    }

    fn return_type(&mut self, ann: Option<&TsTypeAnn>, scope: ScopeId) -> Option<TypeNode> {
        ann.map(|ann| self.type_node(&ann.type_ann, scope))
    }

    fn parameter(&mut self, index: usize, pat: &Pat, scope: ScopeId) -> Parameter {
        match pat {
            Pat::Ident(binding) => {
                self.parameter_with(binding.id.sym.to_string(), binding.type_ann.as_deref(), scope)
            }
            Pat::Object(object) => {
                self.parameter_with(format!("__{index}"), object.type_ann.as_deref(), scope)
            }
            Pat::Array(array) => {
                self.parameter_with(format!("__{index}"), array.type_ann.as_deref(), scope)
            }
            Pat::Rest(rest) => {
                self.parameter_with(rest_name(index, &rest.arg), rest.type_ann.as_deref(), scope)
            }
            // `(props: P = defaults)`
            Pat::Assign(assign) => self.parameter(index, &assign.left, scope),
            _ => self.parameter_with(format!("__{index}"), None, scope),
        }
    }

    fn parameter_with(&mut self, name: String, ann: Option<&TsTypeAnn>, scope: ScopeId) -> Parameter {
        Parameter {
            name,
            annotation: ann.map(|ann| self.type_node(&ann.type_ann, scope)),
        }
    }

    fn type_node(&mut self, ty: &TsType, scope: ScopeId) -> TypeNode {
        self.index.type_sites.push(TypeSite {
            scope,
            ty: Box::new(ty.clone()),
        });
        let id = NodeId::new(self.index.type_sites.len() - 1);

        let shape = match ty {
            TsType::TsTypeRef(type_ref) => TypeNodeShape::Reference(entity_name(&type_ref.type_name)),
            TsType::TsFnOrConstructorType(TsFnOrConstructorType::TsFnType(fn_type)) => {
                TypeNodeShape::Function(Box::new(self.fn_type(fn_type, scope)))
            }
            _ => TypeNodeShape::Other,
        };

        TypeNode { id, shape }
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

pub fn entity_name(name: &TsEntityName) -> EntityName {
    match name {
        TsEntityName::Ident(ident) => EntityName::Ident(ident.sym.to_string()),
        TsEntityName::TsQualifiedName(qualified) => EntityName::Qualified(
            Box::new(entity_name(&qualified.left)),
            qualified.right.sym.to_string(),
        ),
    }
}

fn rest_name(index: usize, arg: &Pat) -> String {
    match arg {
        Pat::Ident(binding) => binding.id.sym.to_string(),
        _ => format!("__{index}"),
    }
}

/// Unwrap parentheses and type-only wrappers around an initializer.
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(as_expr) => unwrap_expr(&as_expr.expr),
        Expr::TsSatisfies(satisfies) => unwrap_expr(&satisfies.expr),
        Expr::TsConstAssertion(assertion) => unwrap_expr(&assertion.expr),
        Expr::TsNonNull(non_null) => unwrap_expr(&non_null.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_expr(&assertion.expr),
        _ => expr,
    }
}
