//! Return type inference for unannotated functions.
//!
//! Only what component detection needs: a function whose every non-nullish
//! return is JSX returns `JSX.Element`. Returns of nested functions and
//! classes are not part of the signature.

use swc_ecma_ast::{
    ArrowExpr, BinaryOp, BlockStmtOrExpr, Class, Expr, Function, GetterProp, Lit, ReturnStmt,
    SetterProp, TsType, UnaryOp,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::binder::ScopeId;
use super::checker::Checker;
use crate::core::facts::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inferred {
    Jsx,
    /// `null`, `undefined` or `void`: widened away in non-strict mode.
    Nullish,
    Type(TypeId),
    Unknown,
}

impl Inferred {
    fn combine(self, other: Inferred) -> Inferred {
        match (self, other) {
            (Inferred::Nullish, other) | (other, Inferred::Nullish) => other,
            (left, right) if left == right => left,
            _ => Inferred::Unknown,
        }
    }
}

/// Collects `return` arguments of one function body.
#[derive(Default)]
struct ReturnCollector {
    returns: Vec<Option<Box<Expr>>>,
}

impl Visit for ReturnCollector {
    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        self.returns.push(node.arg.clone());
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}

    fn visit_class(&mut self, _: &Class) {}

    fn visit_getter_prop(&mut self, _: &GetterProp) {}

    fn visit_setter_prop(&mut self, _: &SetterProp) {}
}

impl Checker<'_> {
    /// Infer the return type of a function body seen from `scope`.
    pub fn infer_return(&self, scope: ScopeId, body: &BlockStmtOrExpr) -> Option<TypeId> {
        let inferred = match body {
            BlockStmtOrExpr::Expr(expr) => self.infer_expr(scope, expr),
            BlockStmtOrExpr::BlockStmt(block) => {
                let mut collector = ReturnCollector::default();
                block.visit_with(&mut collector);
                if collector.returns.is_empty() {
                    return Some(self.intrinsic("void"));
                }
                collector
                    .returns
                    .iter()
                    .map(|arg| match arg {
                        Some(expr) => self.infer_expr(scope, expr),
                        None => Inferred::Nullish,
                    })
                    .fold(Inferred::Nullish, Inferred::combine)
            }
        };

        match inferred {
            Inferred::Jsx => self.jsx_element(scope),
            Inferred::Type(ty) => Some(ty),
            Inferred::Nullish | Inferred::Unknown => None,
        }
    }

    fn infer_expr(&self, scope: ScopeId, expr: &Expr) -> Inferred {
        match expr {
            Expr::JSXElement(_) | Expr::JSXFragment(_) => Inferred::Jsx,
            Expr::Paren(paren) => self.infer_expr(scope, &paren.expr),
            Expr::Lit(Lit::Null(_)) => Inferred::Nullish,
            Expr::Ident(ident) if ident.sym.as_str() == "undefined" => Inferred::Nullish,
            Expr::Unary(unary) if unary.op == UnaryOp::Void => Inferred::Nullish,
            Expr::Cond(cond) => self
                .infer_expr(scope, &cond.cons)
                .combine(self.infer_expr(scope, &cond.alt)),
            // `cond && <X />` yields the element or a falsy value.
            Expr::Bin(bin) if bin.op == BinaryOp::LogicalAnd => self.infer_expr(scope, &bin.right),
            Expr::Bin(bin) if matches!(bin.op, BinaryOp::LogicalOr | BinaryOp::NullishCoalescing) => {
                self.infer_expr(scope, &bin.left)
                    .combine(self.infer_expr(scope, &bin.right))
            }
            Expr::TsAs(as_expr) => self.annotated(scope, &as_expr.type_ann),
            Expr::TsTypeAssertion(assertion) => self.annotated(scope, &assertion.type_ann),
            Expr::TsSatisfies(satisfies) => self.infer_expr(scope, &satisfies.expr),
            Expr::TsNonNull(non_null) => self.infer_expr(scope, &non_null.expr),
            Expr::TsConstAssertion(assertion) => self.infer_expr(scope, &assertion.expr),
            Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => Inferred::Type(self.intrinsic("string")),
            Expr::Lit(Lit::Num(_)) => Inferred::Type(self.intrinsic("number")),
            Expr::Lit(Lit::Bool(_)) => Inferred::Type(self.intrinsic("boolean")),
            _ => Inferred::Unknown,
        }
    }

    fn annotated(&self, scope: ScopeId, ty: &TsType) -> Inferred {
        self.resolve(scope, ty, None)
            .map_or(Inferred::Unknown, Inferred::Type)
    }
}
