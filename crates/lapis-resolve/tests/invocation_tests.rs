//! Call and subscript resolution: the arity filter, constructor calls,
//! operator overloads, and template instantiation along the way.

mod common;

use common::*;

use lapis_model::{FunctionSig, Model, Name, OperatorKind, Param, Ty};
use lapis_syntax::{AccessOp, NumberKind};

#[test]
fn call_arity_filter_boundaries() {
    let mut model = Model::new();
    let global = model.global_scope();
    model
        .add_function(
            global,
            Name::ident("f"),
            FunctionSig::new(
                int_ty(),
                vec![Param::new("a", int_ty()), Param::with_default("b", int_ty())],
            ),
        )
        .unwrap();

    for (argc, expected) in [(0, 0), (1, 1), (2, 1), (3, 0)] {
        let args = vec![num(NumberKind::Int); argc];
        let expr = call(ident("f"), args);
        let results = resolve_in(&model, global, &expr);
        assert_eq!(results.len(), expected, "argc = {}", argc);
        if expected == 1 {
            assert_eq!(results[0].ty, int_ty());
        }
    }
}

#[test]
fn variadic_functions_admit_surplus_arguments() {
    let mut model = Model::new();
    let global = model.global_scope();
    model
        .add_function(
            global,
            Name::ident("printf"),
            FunctionSig::new(int_ty(), vec![Param::new("fmt", Ty::pointer(int_ty()))]).variadic(),
        )
        .unwrap();

    let expr = call(ident("printf"), vec![num(NumberKind::Int); 4]);
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, int_ty());

    let too_few = call(ident("printf"), Vec::new());
    assert!(resolve_in(&model, global, &too_few).is_empty());
}

#[test]
fn overloads_are_kept_when_arity_plausible() {
    let mut model = Model::new();
    let global = model.global_scope();
    model
        .add_function(
            global,
            Name::ident("f"),
            FunctionSig::new(int_ty(), vec![Param::new("a", int_ty())]),
        )
        .unwrap();
    model
        .add_function(
            global,
            Name::ident("f"),
            FunctionSig::new(Ty::bool_(), vec![Param::new("a", Ty::bool_())]),
        )
        .unwrap();

    // Both one-argument overloads stay in; ambiguity is the caller's to
    // rank.
    let expr = call(ident("f"), vec![num(NumberKind::Int)]);
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].ty, int_ty());
    assert_eq!(results[1].ty, Ty::bool_());
}

#[test]
fn constructor_call_yields_the_named_type() {
    let fixture = widget_fixture();
    let scope = fixture.model.global_scope();
    // `Widget(...)`: the callee resolves to the class itself.
    let expr = call(ident("Widget"), vec![num(NumberKind::Int); 5]);
    let results = resolve_in(&fixture.model, scope, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, Ty::named(Name::ident("Widget")));
}

#[test]
fn call_operator_overload_on_object() {
    let mut model = Model::new();
    let global = model.global_scope();
    let functor = model.add_class(global, Name::ident("Functor")).unwrap();
    let functor_scope = model.symbol(functor).members.unwrap();
    model
        .add_function(
            functor_scope,
            Name::operator(OperatorKind::FunctionCall),
            FunctionSig::new(int_ty(), vec![Param::new("x", int_ty())]),
        )
        .unwrap();
    model.add_declaration(global, "fn_", Ty::named(Name::ident("Functor"))).unwrap();

    let matching = call(ident("fn_"), vec![num(NumberKind::Int)]);
    let results = resolve_in(&model, global, &matching);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, int_ty());

    // The call operator is still arity-filtered.
    let too_many = call(ident("fn_"), vec![num(NumberKind::Int); 3]);
    assert!(resolve_in(&model, global, &too_many).is_empty());
}

#[test]
fn method_call_chain() {
    let fixture = widget_fixture();
    let scope = fixture.model.global_scope();
    // `pw->paint()` — member resolution feeds the call rule.
    let expr = call(
        member(ident("pw"), AccessOp::Arrow, Name::ident("paint")),
        Vec::new(),
    );
    let results = resolve_in(&fixture.model, scope, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, Ty::void());
}

#[test]
fn subscript_on_pointer_and_array() {
    let mut model = Model::new();
    let global = model.global_scope();
    model.add_declaration(global, "p", Ty::pointer(int_ty())).unwrap();
    model.add_declaration(global, "arr", Ty::array(Ty::bool_())).unwrap();

    let via_pointer = index(ident("p"), num(NumberKind::Int));
    assert_eq!(resolve_in(&model, global, &via_pointer)[0].ty, int_ty());

    let via_array = index(ident("arr"), num(NumberKind::Int));
    assert_eq!(resolve_in(&model, global, &via_array)[0].ty, Ty::bool_());
}

#[test]
fn subscript_operator_overload() {
    let mut model = Model::new();
    let global = model.global_scope();
    let list = model.add_class(global, Name::ident("List")).unwrap();
    let list_scope = model.symbol(list).members.unwrap();
    model
        .add_function(
            list_scope,
            Name::operator(OperatorKind::ArrayAccess),
            FunctionSig::new(Ty::named(Name::ident("Item")), vec![Param::new("i", int_ty())]),
        )
        .unwrap();
    model.add_declaration(global, "xs", Ty::named(Name::ident("List"))).unwrap();

    let expr = index(ident("xs"), num(NumberKind::Int));
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, Ty::named(Name::ident("Item")));

    // The index argument's type is not checked against the operator.
    let odd_index = index(ident("xs"), ident("xs"));
    assert_eq!(resolve_in(&model, global, &odd_index), results);
}

#[test]
fn subscript_on_plain_value_is_empty() {
    let mut model = Model::new();
    let global = model.global_scope();
    model.add_declaration(global, "n", int_ty()).unwrap();
    let expr = index(ident("n"), num(NumberKind::Int));
    assert!(resolve_in(&model, global, &expr).is_empty());
}

/// A `Vec<T>` class with `T at(int)` and `T operator[](int)` members,
/// plus a `Vec<int> v` at global scope.
fn template_fixture() -> (Model, lapis_model::ScopeId) {
    let mut model = Model::new();
    let global = model.global_scope();
    let vec_class = model.add_class(global, Name::ident("Vec")).unwrap();
    let vec_scope = model.symbol(vec_class).members.unwrap();
    model.add_template_type_param(vec_scope, "T").unwrap();
    model
        .add_function(
            vec_scope,
            Name::ident("at"),
            FunctionSig::new(Ty::named(Name::ident("T")), vec![Param::new("i", int_ty())]),
        )
        .unwrap();
    model
        .add_function(
            vec_scope,
            Name::operator(OperatorKind::ArrayAccess),
            FunctionSig::new(Ty::named(Name::ident("T")), vec![Param::new("i", int_ty())]),
        )
        .unwrap();
    model
        .add_declaration(global, "v", Ty::named(Name::template("Vec", vec![int_ty()])))
        .unwrap();
    (model, global)
}

#[test]
fn template_member_is_instantiated() {
    let (model, global) = template_fixture();
    // `v.at` — the member's `T` is substituted with the receiver's
    // template argument.
    let expr = member(ident("v"), AccessOp::Dot, Name::ident("at"));
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 1);
    let sig = results[0].ty.as_function().unwrap();
    assert_eq!(sig.return_ty, int_ty());
}

#[test]
fn template_method_call_returns_the_instantiated_type() {
    let (model, global) = template_fixture();
    // `v.at(0)`
    let expr = call(
        member(ident("v"), AccessOp::Dot, Name::ident("at")),
        vec![num(NumberKind::Int)],
    );
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, int_ty());
}

#[test]
fn template_subscript_operator_is_instantiated() {
    let (model, global) = template_fixture();
    // `v[0]`
    let expr = index(ident("v"), num(NumberKind::Int));
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, int_ty());
}

#[test]
fn qualified_member_function_lookup() {
    let mut model = Model::new();
    let global = model.global_scope();
    let ns = model.add_namespace(global, "app").unwrap();
    let ns_scope = model.symbol(ns).members.unwrap();
    let make = model
        .add_function(ns_scope, Name::ident("make"), FunctionSig::new(int_ty(), Vec::new()))
        .unwrap();

    // `app::make()`
    let expr = call(
        name_expr(Name::qualified(vec![Name::ident("app"), Name::ident("make")], false)),
        Vec::new(),
    );
    let results = resolve_in(&model, global, &expr);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ty, int_ty());
    assert_eq!(results[0].symbol, make);
}
