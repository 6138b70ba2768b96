//! Symbol records.
//!
//! Symbols live in the [`Model`](crate::model::Model) arena and are
//! addressed by [`SymbolId`] handles. Resolution output refers to symbols
//! only through these handles, so a result is valid exactly as long as the
//! model snapshot it was computed against.

use std::fmt;

use miette::SourceSpan;
use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::scope::ScopeId;
use crate::ty::Ty;

/// A handle into the model's symbol arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// What a symbol declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Class,
    ObjcClass,
    Function,
    /// A function parameter.
    Argument,
    /// A plain variable or member declaration.
    Declaration,
    Typedef,
    /// A template type parameter declared on a class.
    TemplateTypeParam,
}

/// A declared entity: name, type, kind, and its place in the scope tree.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The declared name. The global namespace is anonymous.
    pub name: Option<Name>,
    pub ty: Ty,
    pub kind: SymbolKind,
    /// The scope this symbol is declared in. `None` only for the global
    /// namespace.
    pub enclosing: Option<ScopeId>,
    /// The member scope this symbol owns, if it owns one (namespaces,
    /// classes, function bodies).
    pub members: Option<ScopeId>,
    pub span: Option<SourceSpan>,
}

impl Symbol {
    pub fn is_namespace(&self) -> bool {
        self.kind == SymbolKind::Namespace
    }

    pub fn is_class(&self) -> bool {
        self.kind == SymbolKind::Class
    }

    pub fn is_objc_class(&self) -> bool {
        self.kind == SymbolKind::ObjcClass
    }

    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }

    pub fn is_typedef(&self) -> bool {
        self.kind == SymbolKind::Typedef
    }

    pub fn is_template_type_param(&self) -> bool {
        self.kind == SymbolKind::TemplateTypeParam
    }

    /// Whether this symbol can anchor member lookup: it owns a member
    /// scope other than a function body.
    pub fn is_class_or_namespace(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Namespace | SymbolKind::Class | SymbolKind::ObjcClass
        )
    }
}
