//! Shared fixture helpers for the resolver integration tests.

#![allow(dead_code)]

use lapis_model::{
    FunctionSig, IntKind, LookupContext, Model, Name, ScopeId, Ty,
};
use lapis_syntax::{AccessOp, BinaryOp, Expr, ExprKind, NumberKind, UnaryOp};

use lapis_resolve::{LookupItem, ResolveExpression};

pub fn int_ty() -> Ty {
    Ty::integer(IntKind::Int)
}

pub fn num(kind: NumberKind) -> Expr {
    Expr::synthetic(ExprKind::Number { kind, unsigned: false })
}

pub fn unsigned_num(kind: NumberKind) -> Expr {
    Expr::synthetic(ExprKind::Number { kind, unsigned: true })
}

pub fn ident(name: &str) -> Expr {
    Expr::synthetic(ExprKind::Name(Name::ident(name)))
}

pub fn name_expr(name: Name) -> Expr {
    Expr::synthetic(ExprKind::Name(name))
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::synthetic(ExprKind::Unary { op, operand: operand.boxed() })
}

pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::synthetic(ExprKind::Binary { op, lhs: lhs.boxed(), rhs: rhs.boxed() })
}

pub fn member(base: Expr, access: AccessOp, name: Name) -> Expr {
    Expr::synthetic(ExprKind::Member { base: base.boxed(), access, member: name })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::synthetic(ExprKind::Call { callee: callee.boxed(), args })
}

pub fn index(base: Expr, idx: Expr) -> Expr {
    Expr::synthetic(ExprKind::Index { base: base.boxed(), index: idx.boxed() })
}

pub fn nested(inner: Expr) -> Expr {
    Expr::synthetic(ExprKind::Nested(inner.boxed()))
}

pub fn resolve_in(model: &Model, scope: ScopeId, expr: &Expr) -> Vec<LookupItem> {
    let context = LookupContext::new(model);
    ResolveExpression::new(context, scope).resolve(expr)
}

/// A model with one `Widget` class (an `int width` field, a `paint()`
/// method, and a `resize(int, int = 0)` method), plus a `Widget w` and a
/// `Widget* pw` at global scope.
pub struct WidgetFixture {
    pub model: Model,
    pub class: lapis_model::SymbolId,
    pub class_scope: ScopeId,
    pub width: lapis_model::SymbolId,
    pub paint: lapis_model::SymbolId,
    pub resize: lapis_model::SymbolId,
    pub w: lapis_model::SymbolId,
    pub pw: lapis_model::SymbolId,
}

pub fn widget_fixture() -> WidgetFixture {
    use lapis_model::Param;

    let mut model = Model::new();
    let global = model.global_scope();
    let class = model.add_class(global, Name::ident("Widget")).unwrap();
    let class_scope = model.symbol(class).members.unwrap();
    let width = model.add_declaration(class_scope, "width", int_ty()).unwrap();
    let paint = model
        .add_function(class_scope, Name::ident("paint"), FunctionSig::new(Ty::void(), Vec::new()))
        .unwrap();
    let resize = model
        .add_function(
            class_scope,
            Name::ident("resize"),
            FunctionSig::new(
                Ty::void(),
                vec![Param::new("w", int_ty()), Param::with_default("h", int_ty())],
            ),
        )
        .unwrap();
    let w = model
        .add_declaration(global, "w", Ty::named(Name::ident("Widget")))
        .unwrap();
    let pw = model
        .add_declaration(global, "pw", Ty::pointer(Ty::named(Name::ident("Widget"))))
        .unwrap();
    WidgetFixture { model, class, class_scope, width, paint, resize, w, pw }
}
