//! The code-model arena.
//!
//! A [`Model`] owns every symbol and scope of one translation-unit
//! snapshot. It is built up front, then treated as immutable for the
//! duration of any resolution; the resolver and lookup context only ever
//! take `&Model`.

use miette::SourceSpan;

use crate::error::ModelError;
use crate::name::Name;
use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::symbol::{Symbol, SymbolId, SymbolKind};
use crate::ty::{FunctionSig, Ty};

/// An immutable-after-construction symbol table and scope tree.
///
/// Construction starts from an anonymous global namespace owning the global
/// scope. Handles returned by the `add_*` methods are only meaningful for
/// the model that produced them.
#[derive(Debug, Clone)]
pub struct Model {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
}

impl Model {
    pub fn new() -> Self {
        let mut model = Model { symbols: Vec::new(), scopes: Vec::new() };
        let global = model.push_symbol(Symbol {
            name: None,
            ty: Ty::void(),
            kind: SymbolKind::Namespace,
            enclosing: None,
            members: None,
            span: None,
        });
        let global_scope = model.push_scope(Scope {
            kind: ScopeKind::Global,
            owner: global,
            parent: None,
            members: Vec::new(),
        });
        model.symbols[global.index()].members = Some(global_scope);
        model
    }

    /// The anonymous namespace symbol owning the global scope. Used as the
    /// declaring-symbol fallback of last resort.
    pub fn global_namespace(&self) -> SymbolId {
        SymbolId(0)
    }

    pub fn global_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn try_symbol(&self, id: SymbolId) -> Result<&Symbol, ModelError> {
        self.symbols.get(id.index()).ok_or(ModelError::UnknownSymbol { index: id.0 })
    }

    pub fn try_scope(&self, id: ScopeId) -> Result<&Scope, ModelError> {
        self.scopes.get(id.index()).ok_or(ModelError::UnknownScope { index: id.0 })
    }

    /// The scope to start lookups from when only a symbol is known: its
    /// declaring scope, or the global scope for the global namespace.
    pub fn vantage_scope(&self, symbol: SymbolId) -> ScopeId {
        self.symbol(symbol).enclosing.unwrap_or_else(|| self.global_scope())
    }

    /// The nearest class scope strictly enclosing `scope`.
    pub fn enclosing_class_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        let mut current = self.scope(scope).parent;
        while let Some(id) = current {
            let s = self.scope(id);
            if s.is_class_scope() {
                return Some(id);
            }
            current = s.parent;
        }
        None
    }

    /// Template type parameters of a class symbol, in declaration order.
    pub fn template_params_of(&self, class: SymbolId) -> Vec<SymbolId> {
        let Some(members) = self.symbol(class).members else {
            return Vec::new();
        };
        self.scope(members)
            .members
            .iter()
            .copied()
            .filter(|&m| self.symbol(m).is_template_type_param())
            .collect()
    }

    pub fn add_namespace(&mut self, parent: ScopeId, name: &str) -> Result<SymbolId, ModelError> {
        self.try_scope(parent)?;
        let symbol = self.push_member(parent, Symbol {
            name: Some(Name::ident(name)),
            ty: Ty::void(),
            kind: SymbolKind::Namespace,
            enclosing: Some(parent),
            members: None,
            span: None,
        });
        let members = self.push_scope(Scope {
            kind: ScopeKind::Namespace,
            owner: symbol,
            parent: Some(parent),
            members: Vec::new(),
        });
        self.symbols[symbol.index()].members = Some(members);
        Ok(symbol)
    }

    pub fn add_class(&mut self, parent: ScopeId, name: Name) -> Result<SymbolId, ModelError> {
        self.add_class_like(parent, name, SymbolKind::Class, ScopeKind::Class)
    }

    pub fn add_objc_class(&mut self, parent: ScopeId, name: &str) -> Result<SymbolId, ModelError> {
        self.add_class_like(parent, Name::ident(name), SymbolKind::ObjcClass, ScopeKind::ObjcClass)
    }

    fn add_class_like(
        &mut self,
        parent: ScopeId,
        name: Name,
        kind: SymbolKind,
        scope_kind: ScopeKind,
    ) -> Result<SymbolId, ModelError> {
        self.try_scope(parent)?;
        let symbol = self.push_member(parent, Symbol {
            name: Some(name),
            ty: Ty::void(),
            kind,
            enclosing: Some(parent),
            members: None,
            span: None,
        });
        let members = self.push_scope(Scope {
            kind: scope_kind,
            owner: symbol,
            parent: Some(parent),
            members: Vec::new(),
        });
        let class_ty = match kind {
            SymbolKind::ObjcClass => Ty::objc_class(symbol),
            _ => Ty::class(symbol),
        };
        let record = &mut self.symbols[symbol.index()];
        record.members = Some(members);
        record.ty = class_ty;
        Ok(symbol)
    }

    /// Adds a function declaration. Named parameters become `Argument`
    /// symbols in the function's body scope, so they are visible to name
    /// lookup from inside the body.
    pub fn add_function(
        &mut self,
        parent: ScopeId,
        name: Name,
        sig: FunctionSig,
    ) -> Result<SymbolId, ModelError> {
        self.try_scope(parent)?;
        let params = sig.params.clone();
        let symbol = self.push_member(parent, Symbol {
            name: Some(name),
            ty: Ty::function(sig),
            kind: SymbolKind::Function,
            enclosing: Some(parent),
            members: None,
            span: None,
        });
        let body = self.push_scope(Scope {
            kind: ScopeKind::Function,
            owner: symbol,
            parent: Some(parent),
            members: Vec::new(),
        });
        self.symbols[symbol.index()].members = Some(body);
        for param in params {
            if let Some(param_name) = param.name {
                let name = Name::ident(param_name);
                self.check_conflict(body, &name)?;
                self.push_member(body, Symbol {
                    name: Some(name),
                    ty: param.ty,
                    kind: SymbolKind::Argument,
                    enclosing: Some(body),
                    members: None,
                    span: None,
                });
            }
        }
        Ok(symbol)
    }

    pub fn add_declaration(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: Ty,
    ) -> Result<SymbolId, ModelError> {
        self.try_scope(scope)?;
        let name = Name::ident(name);
        self.check_conflict(scope, &name)?;
        Ok(self.push_member(scope, Symbol {
            name: Some(name),
            ty,
            kind: SymbolKind::Declaration,
            enclosing: Some(scope),
            members: None,
            span: None,
        }))
    }

    pub fn add_typedef(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: Ty,
    ) -> Result<SymbolId, ModelError> {
        self.try_scope(scope)?;
        let name = Name::ident(name);
        self.check_conflict(scope, &name)?;
        Ok(self.push_member(scope, Symbol {
            name: Some(name),
            ty,
            kind: SymbolKind::Typedef,
            enclosing: Some(scope),
            members: None,
            span: None,
        }))
    }

    /// Declares a template type parameter on a class. Its type defaults to
    /// the parameter's own name, which is what substitution rewrites.
    pub fn add_template_type_param(
        &mut self,
        class_scope: ScopeId,
        name: &str,
    ) -> Result<SymbolId, ModelError> {
        if !self.try_scope(class_scope)?.is_class_scope() {
            return Err(ModelError::NotAClassScope);
        }
        let name = Name::ident(name);
        self.check_conflict(class_scope, &name)?;
        Ok(self.push_member(class_scope, Symbol {
            name: Some(name.clone()),
            ty: Ty::named(name),
            kind: SymbolKind::TemplateTypeParam,
            enclosing: Some(class_scope),
            members: None,
            span: None,
        }))
    }

    /// Opens a block scope; its owner is the owner of the enclosing scope.
    pub fn add_block(&mut self, parent: ScopeId) -> Result<ScopeId, ModelError> {
        let owner = self.try_scope(parent)?.owner;
        Ok(self.push_scope(Scope {
            kind: ScopeKind::Block,
            owner,
            parent: Some(parent),
            members: Vec::new(),
        }))
    }

    pub fn set_span(&mut self, symbol: SymbolId, span: SourceSpan) -> Result<(), ModelError> {
        self.try_symbol(symbol)?;
        self.symbols[symbol.index()].span = Some(span);
        Ok(())
    }

    fn check_conflict(&self, scope: ScopeId, name: &Name) -> Result<(), ModelError> {
        let clash = self.scope(scope).members.iter().any(|&m| {
            let member = self.symbol(m);
            !matches!(
                member.kind,
                SymbolKind::Function | SymbolKind::Class | SymbolKind::ObjcClass | SymbolKind::Namespace
            ) && member.name.as_ref() == Some(name)
        });
        if clash {
            Err(ModelError::DuplicateDefinition { name: name.to_string() })
        } else {
            Ok(())
        }
    }

    fn push_member(&mut self, scope: ScopeId, symbol: Symbol) -> SymbolId {
        let id = self.push_symbol(symbol);
        self.scopes[scope.index()].members.push(id);
        id
    }

    fn push_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    fn push_scope(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(scope);
        id
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new()
    }
}
