//! Best-effort expression resolution.
//!
//! [`ResolveExpression`] turns an expression tree into the set of
//! plausible (type, declaring-symbol) pairs it could evaluate to. It is a
//! pure function of (expression, scope, lookup context): evaluation
//! recurses by return value, every rule consumes the candidate set its
//! sub-expression produced and derives a new one, and nothing is cached
//! or mutated along the way.
//!
//! Resolution never fails. An unresolvable name, a member access on
//! nothing, an arity mismatch — all of these contribute an empty set,
//! which then flows silently through the remaining rules. Callers are
//! tooling; "no suggestion" beats an error. Ambiguity is surfaced, not
//! resolved: every arity-plausible overload and every multiply-matching
//! member stays in the output for the caller to rank.

use log::debug;

use lapis_model::{
    FloatKind, FunctionSig, IntKind, LookupContext, Name, OperatorKind, ScopeId, SymbolId, Ty,
    TyKind,
};
use lapis_syntax::{
    AccessOp, BinaryOp, Expr, ExprKind, NumberKind, TypeRef, TypeRefKind, UnaryOp,
};

use crate::item::{CandidateSet, LookupItem};

/// Resolves `expr` against `scope`, returning the deduplicated candidate
/// sequence. Convenience wrapper over [`ResolveExpression`].
pub fn resolve(expr: &Expr, scope: ScopeId, context: LookupContext<'_>) -> Vec<LookupItem> {
    ResolveExpression::new(context, scope).resolve(expr)
}

/// The expression resolver. Holds only its starting scope and the lookup
/// context; it can be reused for any number of expressions and is safe to
/// call recursively (each evaluation owns its own candidate set).
pub struct ResolveExpression<'m> {
    context: LookupContext<'m>,
    scope: ScopeId,
}

impl<'m> ResolveExpression<'m> {
    /// A resolver starting from an explicit lexical scope.
    pub fn new(context: LookupContext<'m>, scope: ScopeId) -> Self {
        ResolveExpression { context, scope }
    }

    /// A resolver anchored at a last-visible symbol; the starting scope is
    /// the symbol's declaring scope. With no symbol the global namespace
    /// stands in.
    pub fn from_symbol(context: LookupContext<'m>, last_visible: Option<SymbolId>) -> Self {
        let symbol = last_visible.unwrap_or_else(|| context.global_namespace());
        let scope = context.model().vantage_scope(symbol);
        ResolveExpression { context, scope }
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Resolves one expression to its deduplicated candidate sequence.
    pub fn resolve(&self, expr: &Expr) -> Vec<LookupItem> {
        let results = self.eval(expr).into_items();
        debug!("resolved expression to {} candidate(s)", results.len());
        results
    }

    fn eval(&self, expr: &Expr) -> CandidateSet {
        let mut results = CandidateSet::new();
        match &expr.kind {
            ExprKind::Number { kind, unsigned } => {
                let ty = match kind {
                    NumberKind::Char => Ty::integer(IntKind::Char),
                    NumberKind::WideChar => Ty::integer(IntKind::WideChar),
                    NumberKind::Int => Ty::integer(IntKind::Int),
                    NumberKind::Long => Ty::integer(IntKind::Long),
                    NumberKind::LongLong => Ty::integer(IntKind::LongLong),
                    NumberKind::Float => Ty::float(FloatKind::Float),
                    NumberKind::Double => Ty::float(FloatKind::Double),
                    NumberKind::LongDouble => Ty::float(FloatKind::LongDouble),
                };
                let ty = if *unsigned { ty.unsigned() } else { ty };
                self.add(&mut results, ty, None);
            }
            ExprKind::Bool(_) => self.add(&mut results, Ty::bool_(), None),
            ExprKind::String(_) => {
                self.add(&mut results, Ty::pointer(Ty::integer(IntKind::Char).const_()), None);
            }
            ExprKind::This => results = self.this_object(),
            ExprKind::Name(name) => match name {
                // A destructor call evaluates to nothing useful; `void`
                // keeps postfix chains alive without inventing a type.
                Name::Destructor(_) => self.add(&mut results, Ty::void(), None),
                // Bare operator-function-ids carry no value of their own.
                Name::Operator(_) => {}
                _ => {
                    for symbol in self.context.lookup(name, self.scope) {
                        let ty = self.context.model().symbol(symbol).ty.clone();
                        self.add(&mut results, ty, Some(symbol));
                    }
                }
            },
            // Only meaningful as the right side of a comma; see eval_binary.
            ExprKind::MethodRef(_) => {}
            ExprKind::Nested(inner) => results = self.eval(inner),
            ExprKind::Conditional { then_expr, else_expr, .. } => {
                if let Some(branch) = then_expr {
                    results = self.eval(branch);
                } else if let Some(branch) = else_expr {
                    results = self.eval(branch);
                }
            }
            ExprKind::Compound(statements) => {
                if let Some(last) = statements.last() {
                    results = self.eval(last);
                }
            }
            ExprKind::Unary { op, operand } => results = self.eval_unary(*op, operand),
            ExprKind::Binary { op, lhs, rhs } => results = self.eval_binary(*op, lhs, rhs),
            ExprKind::Cast { target, .. } => self.add(&mut results, synthesize_type(target), None),
            ExprKind::New { target, .. } => {
                if let Some(target) = target {
                    self.add(&mut results, Ty::pointer(synthesize_type(target)), None);
                }
            }
            ExprKind::Delete(_) => self.add(&mut results, Ty::void(), None),
            ExprKind::Throw(_) => {}
            ExprKind::Sizeof { .. } => {
                self.add(&mut results, Ty::integer(IntKind::Int).unsigned(), None);
            }
            ExprKind::Typeid { .. } => {
                let name = Name::qualified(
                    vec![Name::ident("std"), Name::ident("type_info")],
                    true,
                );
                self.add(&mut results, Ty::named(name), None);
            }
            ExprKind::TypeId(_)
            | ExprKind::Condition(_)
            | ExprKind::ArrayInitializer(_)
            | ExprKind::TypenameCall { .. }
            | ExprKind::TypeConstructorCall { .. } => {}
            ExprKind::Call { callee, args } => results = self.eval_call(callee, args),
            ExprKind::Index { base, index } => results = self.eval_index(base, index),
            ExprKind::Member { base, access, member } => {
                let base_results = self.eval(base);
                results = self
                    .resolve_member_expression(base_results.items(), *access, member, None)
                    .into();
            }
            // `p++` navigates exactly like `p`.
            ExprKind::PostIncDec { base, .. } => results = self.eval(base),
            ExprKind::MessageSend { receiver, selector } => {
                results = self.eval_message_send(receiver, selector);
            }
        }
        results
    }

    /// Adds a candidate, supplying the declaring-symbol fallback: the
    /// current scope's owner, which bottoms out at the global namespace.
    /// Candidates never carry a dangling or absent symbol.
    fn add(&self, results: &mut CandidateSet, ty: Ty, symbol: Option<SymbolId>) {
        let symbol = symbol.unwrap_or_else(|| self.context.model().scope(self.scope).owner);
        debug_assert!(self.context.model().try_symbol(symbol).is_ok());
        results.push(LookupItem::new(ty, symbol));
    }

    /// Synthesizes the type of `this`: walk outward to the first function
    /// scope and stop there. A member function yields a pointer to its
    /// class, anchored at the function symbol; a qualified free function
    /// yields a pointer to the type its qualifier names.
    fn this_object(&self) -> CandidateSet {
        let model = self.context.model();
        let mut results = CandidateSet::new();
        let mut current = Some(self.scope);
        while let Some(id) = current {
            let scope = model.scope(id);
            if scope.is_function_scope() {
                let function = scope.owner;
                if let Some(class_scope) = model.enclosing_class_scope(id) {
                    let class = model.scope(class_scope).owner;
                    if let Some(name) = model.symbol(class).name.clone() {
                        self.add(&mut results, Ty::pointer(Ty::named(name)), Some(function));
                    }
                } else if let Some(name @ Name::Qualified { .. }) =
                    model.symbol(function).name.clone()
                {
                    let qualifier = match &name {
                        Name::Qualified { names, global } if names.len() == 1 && *global => {
                            Some(names[0].clone())
                        }
                        _ => name.without_last(),
                    };
                    if let Some(qualifier) = qualifier {
                        self.add(&mut results, Ty::pointer(Ty::named(qualifier)), Some(function));
                    }
                }
                break;
            }
            current = scope.parent;
        }
        results
    }

    fn eval_unary(&self, op: UnaryOp, operand: &Expr) -> CandidateSet {
        let base = self.eval(operand);
        match op {
            UnaryOp::AddressOf => base
                .items()
                .iter()
                .map(|item| LookupItem::new(Ty::pointer(item.ty.clone()), item.symbol))
                .collect(),
            // A filtering transform: non-pointer candidates are dropped,
            // not passed through.
            UnaryOp::Deref => base
                .items()
                .iter()
                .filter_map(|item| {
                    item.ty
                        .as_pointer_element()
                        .map(|element| LookupItem::new(element.clone(), item.symbol))
                })
                .collect(),
            _ => base,
        }
    }

    /// Binary expressions resolve to their left operand. The one special
    /// case is a comma whose right side is a bound-method reference: the
    /// left side is the receiver (or `this`, when the left side is itself
    /// a bound-method reference) and the method's name is resolved against
    /// it with arrow semantics.
    fn eval_binary(&self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> CandidateSet {
        if op == BinaryOp::Comma {
            if let ExprKind::MethodRef(method) = &rhs.kind {
                let receiver = if matches!(lhs.kind, ExprKind::MethodRef(_)) {
                    self.this_object()
                } else {
                    self.eval(lhs)
                };
                return self
                    .resolve_member_expression(receiver.items(), AccessOp::Arrow, method, None)
                    .into();
            }
        }
        self.eval(lhs)
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr]) -> CandidateSet {
        let base = self.eval(callee);
        let mut results = CandidateSet::new();
        let model = self.context.model();
        // Overloads are filtered on arity alone; argument types are never
        // computed.
        let argument_count = args.len();
        let call_op = Name::operator(OperatorKind::FunctionCall);
        for item in base.items() {
            match &item.ty.kind {
                TyKind::Named(name) => {
                    let Some(view) = self.context.class_or_namespace(name, item.symbol) else {
                        continue;
                    };
                    for overload in view.find(&call_op) {
                        let Some(sig) = model.symbol(overload).ty.as_function() else {
                            continue;
                        };
                        if !maybe_valid_prototype(sig, argument_count) {
                            continue;
                        }
                        let instantiated = self.context.instantiate(name, overload);
                        if let Some(sig) = instantiated.as_function() {
                            self.add(&mut results, sig.return_ty.clone(), Some(item.symbol));
                        }
                    }
                }
                TyKind::Function(sig) => {
                    if maybe_valid_prototype(sig, argument_count) {
                        self.add(&mut results, sig.return_ty.clone(), Some(item.symbol));
                    }
                }
                TyKind::Class(class) => {
                    // Constructor call: no arity or overload filtering.
                    if let Some(name) = model.symbol(*class).name.clone() {
                        self.add(&mut results, Ty::named(name), Some(item.symbol));
                    }
                }
                _ => {}
            }
        }
        results
    }

    fn eval_index(&self, base: &Expr, index: &Expr) -> CandidateSet {
        let base_results = self.eval(base);
        // The index sub-expression is resolved but never consulted: the
        // array-access operator's parameter is not checked against it.
        let _ = self.eval(index);
        let mut results = CandidateSet::new();
        let model = self.context.model();
        let array_op = Name::operator(OperatorKind::ArrayAccess);
        for item in base_results.items() {
            if let Some(element) = item
                .ty
                .as_pointer_element()
                .or_else(|| item.ty.as_array_element())
            {
                self.add(&mut results, element.clone(), Some(item.symbol));
            } else if let Some(name) = item.ty.as_named() {
                let Some(view) = self.context.class_or_namespace(name, item.symbol) else {
                    continue;
                };
                for overload in view.find(&array_op) {
                    if !model.symbol(overload).ty.is_function() {
                        continue;
                    }
                    let instantiated = self.context.instantiate(name, overload);
                    if let Some(sig) = instantiated.as_function() {
                        self.add(&mut results, sig.return_ty.clone(), Some(item.symbol));
                    }
                }
            }
        }
        results
    }

    fn eval_message_send(&self, receiver: &Expr, selector: &Name) -> CandidateSet {
        let mut results = CandidateSet::new();
        let receiver_results = self.eval(receiver);
        let Some(first) = receiver_results.first() else {
            return results;
        };
        let model = self.context.model();
        let class_name = if let Some(class) = first.ty.as_objc_class() {
            // Static access: the receiver names the class itself.
            model.symbol(class).name.clone()
        } else if let Some(element) = first.ty.as_pointer_element() {
            // Dynamic access: one level of indirection to a named type.
            element.as_named().cloned()
        } else {
            None
        };
        if let Some(class_name) = class_name {
            for symbol in self.context.lookup_from_symbol(&class_name, first.symbol) {
                if model.symbol(symbol).is_objc_class() {
                    results.extend(self.resolve_objc_member(selector, symbol));
                }
            }
        }
        results
    }

    /// Resolves the base of a member access to the types navigation can
    /// continue through.
    ///
    /// Only the **first** incoming candidate is inspected; the rest are
    /// ignored. This single-receiver simplification is deliberate and
    /// load-bearing for result cardinality — expanding it would multiply
    /// candidates for ambiguous receivers.
    ///
    /// Passing `replaced_dot` enables pointer/array decay for dot access
    /// and records whether it happened, which is how callers distinguish a
    /// true dot access from an arrow rewritten as dot.
    pub fn resolve_base_expression(
        &self,
        base_results: &[LookupItem],
        access: AccessOp,
        replaced_dot: Option<&mut bool>,
    ) -> Vec<LookupItem> {
        let Some(result) = base_results.first() else {
            return Vec::new();
        };
        let model = self.context.model();
        let mut results = CandidateSet::new();
        let mut ty = result.ty.clone();
        let mut last_visible = result.symbol;

        if let Some(return_ty) = ty
            .as_function()
            .filter(|sig| sig.ambiguous)
            .map(|sig| sig.return_ty.clone())
        {
            ty = return_ty;
        }

        match access {
            AccessOp::Arrow => {
                if let Some(name) = ty.as_named().cloned() {
                    for symbol in self.context.lookup_from_symbol(&name, result.symbol) {
                        let symbol_ty = model.symbol(symbol).ty.clone();
                        if let Some(element) = symbol_ty.as_pointer_element() {
                            if element.is_named_or_class() {
                                results.push(LookupItem::new(element.clone(), last_visible));
                            }
                        } else if let Some(inner) = symbol_ty.as_named() {
                            // One more lookup level to find a pointer.
                            let Some(&first) =
                                self.context.lookup_from_symbol(inner, result.symbol).first()
                            else {
                                continue;
                            };
                            if let Some(element) = model.symbol(first).ty.as_pointer_element() {
                                if element.is_named_or_class() {
                                    results.push(LookupItem::new(element.clone(), last_visible));
                                }
                            }
                        }
                    }
                    if let Some(view) = self.context.class_or_namespace(&name, result.symbol) {
                        for overload in view.find(&Name::operator(OperatorKind::Arrow)) {
                            if !model.symbol(overload).ty.is_function() {
                                continue;
                            }
                            let instantiated = self.context.instantiate(&name, overload);
                            if let Some(sig) = instantiated.as_function() {
                                if let Some(element) = sig.return_ty.as_pointer_element() {
                                    results.push(LookupItem::new(element.clone(), overload));
                                }
                            }
                        }
                    }
                } else if let Some(element) = ty.as_pointer_element() {
                    if element.is_named_or_class() {
                        results.push(LookupItem::new(element.clone(), last_visible));
                    }
                }
            }
            AccessOp::Dot => {
                if let Some(flag) = replaced_dot {
                    let decayed = ty
                        .as_pointer_element()
                        .or_else(|| ty.as_array_element())
                        .cloned();
                    if let Some(element) = decayed {
                        *flag = true;
                        ty = element;
                    }
                }
                if let Some(name) = ty.as_named().cloned() {
                    // Follow one typedef or template-type-parameter
                    // indirection, if lookup surfaces one.
                    for candidate in self.context.lookup_from_symbol(&name, result.symbol) {
                        let symbol = model.symbol(candidate);
                        if (symbol.is_typedef() && symbol.ty.is_named())
                            || symbol.is_template_type_param()
                        {
                            ty = symbol.ty.clone();
                            last_visible = candidate;
                            break;
                        }
                    }
                    results.push(LookupItem::new(ty, last_visible));
                } else if let Some(sig) = ty.as_function() {
                    // Dot on a function value is modeled only for free and
                    // local functions; member function objects are out of
                    // scope here.
                    let declaring = model.symbol(last_visible);
                    if declaring.is_function() {
                        if let Some(enclosing) = declaring.enclosing {
                            let scope = model.scope(enclosing);
                            if scope.is_block_scope() || scope.is_namespace_scope() {
                                results.push(LookupItem::new(sig.return_ty.clone(), last_visible));
                            }
                        }
                    }
                }
            }
        }
        results.into_items()
    }

    /// Resolves `member` against the base candidates: class types search
    /// their declared members directly; named types go through the merged
    /// class/namespace view, instantiating template members against the
    /// named type's arguments. Lookup is name-based — overloads all come
    /// back.
    pub fn resolve_member_expression(
        &self,
        base_results: &[LookupItem],
        access: AccessOp,
        member: &Name,
        replaced_dot: Option<&mut bool>,
    ) -> Vec<LookupItem> {
        let mut results = CandidateSet::new();
        for object in self.resolve_base_expression(base_results, access, replaced_dot) {
            match &object.ty.kind {
                TyKind::Class(class) => {
                    results.extend(self.resolve_member(member, *class, None));
                }
                TyKind::Named(name) => {
                    if let Some(view) = self.context.class_or_namespace(name, object.symbol) {
                        for candidate in view.find(member) {
                            let ty = self.context.instantiate(name, candidate);
                            results.push(LookupItem::new(ty, candidate));
                        }
                    }
                }
                _ => {}
            }
        }
        results.into_items()
    }

    /// Finds `member` among a class's declared members. When the class is
    /// being viewed through a template-id (`context_class_name`), each
    /// candidate's type is instantiated against it.
    pub fn resolve_member(
        &self,
        member: &Name,
        class: SymbolId,
        context_class_name: Option<&Name>,
    ) -> Vec<LookupItem> {
        let model = self.context.model();
        let symbol = model.symbol(class);
        let Some(class_name) = context_class_name.or(symbol.name.as_ref()) else {
            return Vec::new();
        };
        let Some(members) = symbol.members else {
            return Vec::new();
        };
        let mut results = CandidateSet::new();
        for candidate in self.context.lookup_in_scope(member, members) {
            let ty = match class_name.unqualified_tail() {
                tail @ Name::Template { .. } => self.context.instantiate(tail, candidate),
                _ => model.symbol(candidate).ty.clone(),
            };
            results.push(LookupItem::new(ty, candidate));
        }
        results.into_items()
    }

    /// Selector lookup in a dynamic class's member scope.
    pub fn resolve_objc_member(&self, selector: &Name, class: SymbolId) -> Vec<LookupItem> {
        let model = self.context.model();
        let Some(members) = model.symbol(class).members else {
            return Vec::new();
        };
        let mut results = CandidateSet::new();
        for candidate in self.context.lookup_in_scope(selector, members) {
            results.push(LookupItem::new(model.symbol(candidate).ty.clone(), candidate));
        }
        results.into_items()
    }
}

/// The coarse overload filter: a call with `actual_argument_count`
/// arguments plausibly matches `sig` when it supplies at least every
/// parameter without a default and, unless the signature is variadic, no
/// more than the declared count. No argument types are considered.
pub fn maybe_valid_prototype(sig: &FunctionSig, actual_argument_count: usize) -> bool {
    let min_required = sig.params.iter().take_while(|p| !p.has_default).count();
    if actual_argument_count < min_required {
        // Not enough arguments.
        return false;
    }
    if !sig.variadic && actual_argument_count > sig.params.len() {
        // Too many arguments.
        return false;
    }
    true
}

/// Builds the semantic type a type-id node spells.
fn synthesize_type(target: &TypeRef) -> Ty {
    let mut ty = match &target.kind {
        TypeRefKind::Void => Ty::void(),
        TypeRefKind::Bool => Ty::bool_(),
        TypeRefKind::Integer(kind) => Ty::integer(*kind),
        TypeRefKind::Float(kind) => Ty::float(*kind),
        TypeRefKind::Named(name) => Ty::named(name.clone()),
    };
    ty.quals.is_const = target.is_const;
    ty.quals.is_unsigned = target.is_unsigned;
    for _ in 0..target.pointers {
        ty = Ty::pointer(ty);
    }
    ty
}
