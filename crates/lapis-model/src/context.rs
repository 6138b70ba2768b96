//! Name lookup and template instantiation over a [`Model`].
//!
//! [`LookupContext`] is the adapter surface the resolver calls into:
//! ordinary name lookup through the enclosing-scope chain, qualified
//! lookup, resolution of a name to the merged [`ClassOrNamespace`] view of
//! all its declarations, and positional template instantiation. It borrows
//! the model immutably, so any number of contexts and resolutions may run
//! against one snapshot concurrently.

use fxhash::{FxHashMap, FxHashSet};
use log::trace;

use crate::model::Model;
use crate::name::Name;
use crate::scope::ScopeId;
use crate::symbol::SymbolId;
use crate::ty::{FunctionSig, Param, Ty, TyKind};

/// The merged member view of every same-named class/namespace declaration
/// visible from one vantage point. Partial specializations and reopened
/// namespaces land in separate declarations; member lookup sees their
/// union.
#[derive(Debug, Clone)]
pub struct ClassOrNamespace<'m> {
    model: &'m Model,
    declarations: Vec<SymbolId>,
}

impl<'m> ClassOrNamespace<'m> {
    pub fn declarations(&self) -> &[SymbolId] {
        &self.declarations
    }

    /// All members matching `name` across the merged declarations, in
    /// declaration order, first occurrence wins.
    pub fn find(&self, name: &Name) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for &decl in &self.declarations {
            let Some(members) = self.model.symbol(decl).members else {
                continue;
            };
            for &member in &self.model.scope(members).members {
                if let Some(declared) = &self.model.symbol(member).name {
                    if name.matches_declaration(declared) && seen.insert(member) {
                        out.push(member);
                    }
                }
            }
        }
        out
    }
}

/// Lookup services over one immutable model snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'m> {
    model: &'m Model,
}

impl<'m> LookupContext<'m> {
    pub fn new(model: &'m Model) -> Self {
        LookupContext { model }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    pub fn global_namespace(&self) -> SymbolId {
        self.model.global_namespace()
    }

    /// Ordinary name lookup: qualified names resolve their qualifier path
    /// first; unqualified names walk the enclosing-scope chain outward,
    /// accumulating every match (innermost first). The resolver is
    /// ambiguity-tolerant, so outer-scope candidates are surfaced rather
    /// than hidden.
    pub fn lookup(&self, name: &Name, scope: ScopeId) -> Vec<SymbolId> {
        let results = match name {
            Name::Qualified { names, global } => self.lookup_qualified(names, *global, scope),
            _ => self.lookup_unqualified(name, scope),
        };
        trace!("lookup of `{}` found {} candidate(s)", name, results.len());
        results
    }

    /// Lookup starting from a symbol's declaring scope.
    pub fn lookup_from_symbol(&self, name: &Name, symbol: SymbolId) -> Vec<SymbolId> {
        self.lookup(name, self.model.vantage_scope(symbol))
    }

    /// Lookup confined to a single scope, no chain walk. Member resolution
    /// uses this against a class's member scope.
    pub fn lookup_in_scope(&self, name: &Name, scope: ScopeId) -> Vec<SymbolId> {
        self.model
            .scope(scope)
            .members
            .iter()
            .copied()
            .filter(|&member| {
                self.model
                    .symbol(member)
                    .name
                    .as_ref()
                    .is_some_and(|declared| name.matches_declaration(declared))
            })
            .collect()
    }

    fn lookup_unqualified(&self, name: &Name, scope: ScopeId) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = Some(scope);
        while let Some(id) = current {
            for member in self.lookup_in_scope(name, id) {
                if seen.insert(member) {
                    out.push(member);
                }
            }
            current = self.model.scope(id).parent;
        }
        out
    }

    fn lookup_qualified(&self, names: &[Name], global: bool, scope: ScopeId) -> Vec<SymbolId> {
        let Some((last, qualifier)) = names.split_last() else {
            return Vec::new();
        };
        // Resolve the qualifier path to the set of container scopes the
        // tail is searched in. Same-named containers stay merged.
        let mut containers: Vec<ScopeId> = vec![if global { self.model.global_scope() } else { scope }];
        for (i, segment) in qualifier.iter().enumerate() {
            let candidates: Vec<SymbolId> = if i == 0 && !global {
                self.lookup_unqualified(segment, scope)
            } else {
                containers
                    .iter()
                    .flat_map(|&c| self.lookup_in_scope(segment, c))
                    .collect()
            };
            containers = candidates
                .into_iter()
                .filter(|&c| self.model.symbol(c).is_class_or_namespace())
                .filter_map(|c| self.model.symbol(c).members)
                .collect();
            if containers.is_empty() {
                return Vec::new();
            }
        }
        if qualifier.is_empty() && !global {
            return self.lookup_unqualified(last, scope);
        }
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for &container in &containers {
            for member in self.lookup_in_scope(last, container) {
                if seen.insert(member) {
                    out.push(member);
                }
            }
        }
        out
    }

    /// Resolves `name` to the merged view of every class/namespace
    /// declaration it denotes, as visible from `vantage`'s declaring
    /// scope. `None` when the name denotes no such entity.
    pub fn class_or_namespace(&self, name: &Name, vantage: SymbolId) -> Option<ClassOrNamespace<'m>> {
        let declarations: Vec<SymbolId> = self
            .lookup_from_symbol(name, vantage)
            .into_iter()
            .filter(|&s| {
                let symbol = self.model.symbol(s);
                symbol.is_class_or_namespace() && symbol.members.is_some()
            })
            .collect();
        if declarations.is_empty() {
            None
        } else {
            Some(ClassOrNamespace { model: self.model, declarations })
        }
    }

    /// Substitutes the template arguments of `template_name` into the type
    /// of `candidate`, positionally against the declaring class's template
    /// type parameters. Non-template names, and candidates outside a
    /// template class, come back unchanged.
    pub fn instantiate(&self, template_name: &Name, candidate: SymbolId) -> Ty {
        let ty = self.model.symbol(candidate).ty.clone();
        let Name::Template { args, .. } = template_name.unqualified_tail() else {
            return ty;
        };
        let Some(enclosing) = self.model.symbol(candidate).enclosing else {
            return ty;
        };
        let owner = self.model.scope(enclosing).owner;
        let params = self.model.template_params_of(owner);
        if params.is_empty() {
            return ty;
        }
        let mut substitution: FxHashMap<&str, &Ty> = FxHashMap::default();
        for (&param, arg) in params.iter().zip(args.iter()) {
            if let Some(name) = self.model.symbol(param).name.as_ref().and_then(Name::as_identifier) {
                substitution.insert(name, arg);
            }
        }
        trace!("instantiating `{}` against {} parameter(s)", template_name, substitution.len());
        substitute(&ty, &substitution)
    }
}

fn substitute(ty: &Ty, substitution: &FxHashMap<&str, &Ty>) -> Ty {
    match &ty.kind {
        TyKind::Named(Name::Identifier(name)) => {
            if let Some(&replacement) = substitution.get(name.as_str()) {
                let mut out = replacement.clone();
                out.quals.is_const |= ty.quals.is_const;
                out.quals.is_volatile |= ty.quals.is_volatile;
                out.quals.is_unsigned |= ty.quals.is_unsigned;
                out
            } else {
                ty.clone()
            }
        }
        TyKind::Named(Name::Template { name, args }) => {
            let args = args.iter().map(|a| substitute(a, substitution)).collect();
            Ty { quals: ty.quals, kind: TyKind::Named(Name::Template { name: name.clone(), args }) }
        }
        TyKind::Pointer(element) => {
            Ty { quals: ty.quals, kind: TyKind::Pointer(substitute(element, substitution).into()) }
        }
        TyKind::Array(element) => {
            Ty { quals: ty.quals, kind: TyKind::Array(substitute(element, substitution).into()) }
        }
        TyKind::Function(sig) => {
            let new_sig = FunctionSig {
                return_ty: substitute(&sig.return_ty, substitution),
                params: sig
                    .params
                    .iter()
                    .map(|p| Param {
                        name: p.name.clone(),
                        ty: substitute(&p.ty, substitution),
                        has_default: p.has_default,
                    })
                    .collect(),
                variadic: sig.variadic,
                ambiguous: sig.ambiguous,
            };
            Ty { quals: ty.quals, kind: TyKind::Function(new_sig.into()) }
        }
        _ => ty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::IntKind;

    fn int_ty() -> Ty {
        Ty::integer(IntKind::Int)
    }

    #[test]
    fn unqualified_lookup_accumulates_innermost_first() {
        let mut model = Model::new();
        let global = model.global_scope();
        let outer = model.add_declaration(global, "x", Ty::bool_()).unwrap();
        let f = model
            .add_function(global, Name::ident("f"), FunctionSig::new(Ty::void(), Vec::new()))
            .unwrap();
        let body = model.symbol(f).members.unwrap();
        let inner = model.add_declaration(body, "x", int_ty()).unwrap();

        let ctx = LookupContext::new(&model);
        assert_eq!(ctx.lookup(&Name::ident("x"), body), vec![inner, outer]);
        assert_eq!(ctx.lookup(&Name::ident("x"), global), vec![outer]);
        assert!(ctx.lookup(&Name::ident("y"), body).is_empty());
    }

    #[test]
    fn qualified_lookup_descends_namespaces() {
        let mut model = Model::new();
        let global = model.global_scope();
        let ns = model.add_namespace(global, "app").unwrap();
        let ns_scope = model.symbol(ns).members.unwrap();
        let widget = model.add_class(ns_scope, Name::ident("Widget")).unwrap();

        let ctx = LookupContext::new(&model);
        let path = Name::qualified(vec![Name::ident("app"), Name::ident("Widget")], false);
        assert_eq!(ctx.lookup(&path, global), vec![widget]);

        let rooted = Name::qualified(vec![Name::ident("app"), Name::ident("Widget")], true);
        assert_eq!(ctx.lookup(&rooted, ns_scope), vec![widget]);

        let missing = Name::qualified(vec![Name::ident("gone"), Name::ident("Widget")], false);
        assert!(ctx.lookup(&missing, global).is_empty());
    }

    #[test]
    fn reopened_namespaces_merge_members() {
        let mut model = Model::new();
        let global = model.global_scope();
        let first = model.add_namespace(global, "app").unwrap();
        let second = model.add_namespace(global, "app").unwrap();
        let first_scope = model.symbol(first).members.unwrap();
        let second_scope = model.symbol(second).members.unwrap();
        let a = model.add_declaration(first_scope, "a", int_ty()).unwrap();
        let b = model.add_declaration(second_scope, "b", int_ty()).unwrap();

        let ctx = LookupContext::new(&model);
        let view = ctx
            .class_or_namespace(&Name::ident("app"), model.global_namespace())
            .unwrap();
        assert_eq!(view.declarations().len(), 2);
        assert_eq!(view.find(&Name::ident("a")), vec![a]);
        assert_eq!(view.find(&Name::ident("b")), vec![b]);
    }

    #[test]
    fn instantiate_substitutes_positionally() {
        let mut model = Model::new();
        let global = model.global_scope();
        let vec_class = model.add_class(global, Name::ident("Vec")).unwrap();
        let vec_scope = model.symbol(vec_class).members.unwrap();
        model.add_template_type_param(vec_scope, "T").unwrap();
        let at = model
            .add_function(
                vec_scope,
                Name::ident("at"),
                FunctionSig::new(
                    Ty::named(Name::ident("T")),
                    vec![Param::new("index", int_ty())],
                ),
            )
            .unwrap();

        let ctx = LookupContext::new(&model);
        let instantiated = ctx.instantiate(&Name::template("Vec", vec![Ty::bool_()]), at);
        let sig = instantiated.as_function().unwrap();
        assert_eq!(sig.return_ty, Ty::bool_());

        // A plain identifier never rewrites the candidate's type.
        let untouched = ctx.instantiate(&Name::ident("Vec"), at);
        assert_eq!(untouched, model.symbol(at).ty);
    }
}
