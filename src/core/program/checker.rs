//! Type resolution over the bound index.
//!
//! Types are interned in a [`TypeArena`]. Named declarations resolve once and
//! always yield the same [`TypeId`]; member types are resolved lazily, so a
//! self-referencing alias never recurses while it is being created.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{
    Expr, Lit, TsKeywordTypeKind, TsType, TsTypeAnn, TsTypeElement, TsUnionOrIntersectionType,
};
use tracing::debug;

use super::binder::{Index, ScopeId, TypeDeclId, TypeDeclKind};
use crate::core::facts::{MemberId, NodeId, TypeId, TypeSymbol};
use crate::core::schema::ANONYMOUS_TYPE_NAME;

const JSX_ELEMENT: [&str; 2] = ["JSX", "Element"];

#[derive(Debug, Clone, Default)]
pub struct TypeData {
    pub symbol: Option<TypeSymbol>,
    pub alias: Option<String>,
    pub intrinsic: Option<&'static str>,
    pub members: Vec<MemberId>,
}

#[derive(Debug, Clone)]
pub enum MemberType {
    Annotation(Box<TsType>),
    /// Unannotated property: implicitly `any`.
    ImplicitAny,
    /// Method signature: an anonymous function type.
    Method,
}

#[derive(Debug, Clone)]
pub struct MemberData {
    pub name: String,
    pub optional: bool,
    pub scope: ScopeId,
    pub ty: MemberType,
}

#[derive(Debug, Clone, Copy)]
enum DeclState {
    Resolving,
    Done(Option<TypeId>),
}

#[derive(Debug, Default)]
pub struct TypeArena {
    types: Vec<TypeData>,
    members: Vec<MemberData>,
    member_types: HashMap<MemberId, Option<TypeId>>,
    intrinsics: HashMap<&'static str, TypeId>,
    declared: HashMap<TypeDeclId, DeclState>,
    sites: HashMap<NodeId, Option<TypeId>>,
    jsx_element: Option<TypeId>,
}

impl TypeArena {
    pub fn get(&self, ty: TypeId) -> &TypeData {
        &self.types[ty.index()]
    }

    pub fn member(&self, member: MemberId) -> &MemberData {
        &self.members[member.index()]
    }

    fn push(&mut self, data: TypeData) -> TypeId {
        self.types.push(data);
        TypeId::new(self.types.len() - 1)
    }

    fn push_member(&mut self, data: MemberData) -> MemberId {
        self.members.push(data);
        MemberId::new(self.members.len() - 1)
    }
}

/// Resolves syntax to arena types. Cheap to create; all state lives in the
/// arena.
pub struct Checker<'p> {
    pub(super) index: &'p Index,
    pub(super) arena: &'p RefCell<TypeArena>,
}

impl<'p> Checker<'p> {
    pub fn new(index: &'p Index, arena: &'p RefCell<TypeArena>) -> Self {
        Self { index, arena }
    }

    /// Type denoted by the annotation stored at `site`.
    pub fn type_at_site(&self, site: NodeId) -> Option<TypeId> {
        if let Some(cached) = self.arena.borrow().sites.get(&site) {
            return *cached;
        }
        let data = self.index.type_sites.get(site.index())?;
        let resolved = self.resolve(data.scope, &data.ty, None);
        self.arena.borrow_mut().sites.insert(site, resolved);
        resolved
    }

    pub fn member_type(&self, member: MemberId) -> Option<TypeId> {
        if let Some(cached) = self.arena.borrow().member_types.get(&member) {
            return *cached;
        }
        let data = self.arena.borrow().member(member).clone();
        let resolved = match &data.ty {
            MemberType::Annotation(ty) => self.resolve(data.scope, ty, None),
            MemberType::ImplicitAny => Some(self.intrinsic("any")),
            MemberType::Method => Some(self.anonymous(None)),
        };
        self.arena
            .borrow_mut()
            .member_types
            .insert(member, resolved);
        resolved
    }

    /// Resolve a type expression. `alias` names the type alias being
    /// declared when `ty` is its right-hand side.
    pub fn resolve(&self, scope: ScopeId, ty: &TsType, alias: Option<&str>) -> Option<TypeId> {
        match ty {
            TsType::TsKeywordType(keyword) => Some(self.intrinsic(keyword_name(keyword.kind))),
            TsType::TsParenthesizedType(paren) => self.resolve(scope, &paren.type_ann, alias),
            TsType::TsTypeRef(type_ref) => {
                let name = super::binder::entity_name(&type_ref.type_name);
                self.resolve_name(scope, &name.segments())
            }
            TsType::TsTypeLit(literal) => Some(self.object_type(
                Some(anonymous_symbol()),
                alias,
                scope,
                literal.members.iter(),
            )),
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
                self.union(scope, union.types.iter().map(|ty| &**ty), alias)
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => Some(self.intersection(scope, intersection.types.iter().map(|ty| &**ty), alias)),
            TsType::TsFnOrConstructorType(_) => Some(self.anonymous(alias)),
            _ => Some(self.arena.borrow_mut().push(TypeData::default())),
        }
    }

    /// Resolve a possibly qualified type name from `scope`.
    pub fn resolve_name(&self, scope: ScopeId, segments: &[&str]) -> Option<TypeId> {
        match self.index.lookup(scope, segments) {
            Some(decl) => self.declared_type(decl),
            None if segments == JSX_ELEMENT => Some(self.builtin_jsx_element()),
            None => {
                debug!(name = %segments.join("."), "unresolved type name");
                None
            }
        }
    }

    /// `JSX.Element` as seen from `scope`.
    pub fn jsx_element(&self, scope: ScopeId) -> Option<TypeId> {
        self.resolve_name(scope, &JSX_ELEMENT)
    }

    pub fn intrinsic(&self, name: &'static str) -> TypeId {
        if let Some(ty) = self.arena.borrow().intrinsics.get(name) {
            return *ty;
        }
        let mut arena = self.arena.borrow_mut();
        let ty = arena.push(TypeData {
            intrinsic: Some(name),
            ..Default::default()
        });
        arena.intrinsics.insert(name, ty);
        ty
    }

    fn declared_type(&self, decl_id: TypeDeclId) -> Option<TypeId> {
        match self.arena.borrow().declared.get(&decl_id) {
            Some(DeclState::Done(ty)) => return *ty,
            Some(DeclState::Resolving) => {
                debug!(decl = decl_id.index(), "circular type declaration");
                return None;
            }
            None => {}
        }

        self.arena
            .borrow_mut()
            .declared
            .insert(decl_id, DeclState::Resolving);

        let decl = self.index.decl(decl_id);
        let symbol = TypeSymbol {
            name: decl.name.clone(),
            parent: self.index.scope(decl.scope).name.clone(),
        };
        let resolved = match &decl.kind {
            TypeDeclKind::Interface(bodies) => Some(self.object_type(
                Some(symbol),
                None,
                decl.scope,
                bodies.iter().flat_map(|body| body.body.iter()),
            )),
            TypeDeclKind::Alias(ty) => self.resolve(decl.scope, ty, Some(&decl.name)),
            TypeDeclKind::Opaque => Some(self.arena.borrow_mut().push(TypeData {
                symbol: Some(symbol),
                ..Default::default()
            })),
        };

        self.arena
            .borrow_mut()
            .declared
            .insert(decl_id, DeclState::Done(resolved));
        resolved
    }

    fn object_type<'a>(
        &self,
        symbol: Option<TypeSymbol>,
        alias: Option<&str>,
        scope: ScopeId,
        elements: impl Iterator<Item = &'a TsTypeElement>,
    ) -> TypeId {
        let mut seen = HashSet::new();
        let mut arena = self.arena.borrow_mut();
        let members = elements
            .filter_map(|element| member_data(element, scope))
            .filter(|member| seen.insert(member.name.clone()))
            .map(|member| arena.push_member(member))
            .collect();

        arena.push(TypeData {
            symbol,
            alias: alias.map(str::to_string),
            intrinsic: None,
            members,
        })
    }

    /// Unions widen away `null` and `undefined`. A single remaining
    /// constituent is the union's type.
    fn union<'a>(
        &self,
        scope: ScopeId,
        types: impl Iterator<Item = &'a TsType>,
        alias: Option<&str>,
    ) -> Option<TypeId> {
        let constituents: Vec<&TsType> = types.filter(|ty| !is_nullish(ty)).collect();
        match constituents.as_slice() {
            [single] => self.resolve(scope, single, None),
            _ => Some(self.arena.borrow_mut().push(TypeData {
                alias: alias.map(str::to_string),
                ..Default::default()
            })),
        }
    }

    /// Intersections carry the members of every resolvable constituent, first
    /// declaration of a name wins.
    fn intersection<'a>(
        &self,
        scope: ScopeId,
        types: impl Iterator<Item = &'a TsType>,
        alias: Option<&str>,
    ) -> TypeId {
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        for ty in types {
            let Some(resolved) = self.resolve(scope, ty, None) else {
                continue;
            };
            let arena = self.arena.borrow();
            for member in &arena.get(resolved).members {
                if seen.insert(arena.member(*member).name.clone()) {
                    members.push(*member);
                }
            }
        }

        self.arena.borrow_mut().push(TypeData {
            symbol: None,
            alias: alias.map(str::to_string),
            intrinsic: None,
            members,
        })
    }

    fn anonymous(&self, alias: Option<&str>) -> TypeId {
        self.arena.borrow_mut().push(TypeData {
            symbol: Some(anonymous_symbol()),
            alias: alias.map(str::to_string),
            ..Default::default()
        })
    }

    fn builtin_jsx_element(&self) -> TypeId {
        if let Some(ty) = self.arena.borrow().jsx_element {
            return ty;
        }
        let mut arena = self.arena.borrow_mut();
        let ty = arena.push(TypeData {
            symbol: Some(TypeSymbol {
                name: JSX_ELEMENT[1].to_string(),
                parent: Some(JSX_ELEMENT[0].to_string()),
            }),
            ..Default::default()
        });
        arena.jsx_element = Some(ty);
        ty
    }
}

fn anonymous_symbol() -> TypeSymbol {
    TypeSymbol {
        name: ANONYMOUS_TYPE_NAME.to_string(),
        parent: None,
    }
}

fn member_data(element: &TsTypeElement, scope: ScopeId) -> Option<MemberData> {
    let annotated = |ann: &Option<Box<TsTypeAnn>>| match ann {
        Some(ann) => MemberType::Annotation(ann.type_ann.clone()),
        None => MemberType::ImplicitAny,
    };

    match element {
        TsTypeElement::TsPropertySignature(property) => Some(MemberData {
            name: property_key(&property.key, property.computed)?,
            optional: property.optional,
            scope,
            ty: annotated(&property.type_ann),
        }),
        TsTypeElement::TsMethodSignature(method) => Some(MemberData {
            name: property_key(&method.key, method.computed)?,
            optional: method.optional,
            scope,
            ty: MemberType::Method,
        }),
        TsTypeElement::TsGetterSignature(getter) => Some(MemberData {
            name: property_key(&getter.key, getter.computed)?,
            optional: false,
            scope,
            ty: annotated(&getter.type_ann),
        }),
        _ => None,
    }
}

fn property_key(key: &Expr, computed: bool) -> Option<String> {
    match key {
        Expr::Ident(ident) if !computed => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string_lossy().to_string()),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        _ => None,
    }
}

fn is_nullish(ty: &TsType) -> bool {
    matches!(
        ty,
        TsType::TsKeywordType(keyword)
            if matches!(
                keyword.kind,
                TsKeywordTypeKind::TsNullKeyword | TsKeywordTypeKind::TsUndefinedKeyword
            )
    )
}

fn keyword_name(kind: TsKeywordTypeKind) -> &'static str {
    match kind {
        TsKeywordTypeKind::TsAnyKeyword => "any",
        TsKeywordTypeKind::TsUnknownKeyword => "unknown",
        TsKeywordTypeKind::TsNumberKeyword => "number",
        TsKeywordTypeKind::TsObjectKeyword => "object",
        TsKeywordTypeKind::TsBooleanKeyword => "boolean",
        TsKeywordTypeKind::TsBigIntKeyword => "bigint",
        TsKeywordTypeKind::TsStringKeyword => "string",
        TsKeywordTypeKind::TsSymbolKeyword => "symbol",
        TsKeywordTypeKind::TsVoidKeyword => "void",
        TsKeywordTypeKind::TsUndefinedKeyword => "undefined",
        TsKeywordTypeKind::TsNullKeyword => "null",
        TsKeywordTypeKind::TsNeverKeyword => "never",
        TsKeywordTypeKind::TsIntrinsicKeyword => "intrinsic",
    }
}
