//! Scope records.
//!
//! Scopes form a tree owned by the [`Model`](crate::model::Model); the
//! resolver only ever walks `parent` edges outward, it never descends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbol::SymbolId;

/// A handle into the model's scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sc{}", self.0)
    }
}

/// Classification of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Global,
    Namespace,
    Class,
    ObjcClass,
    /// A function body.
    Function,
    /// A nested block inside a function body.
    Block,
}

/// One node of the enclosing-scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    /// The symbol this scope belongs to (the function for a function
    /// scope, the class for a class scope, the nearest function for a
    /// block).
    pub owner: SymbolId,
    pub parent: Option<ScopeId>,
    /// Member symbols in declaration order. Order is significant: lookup
    /// results and candidate sets preserve it.
    pub members: Vec<SymbolId>,
}

impl Scope {
    pub fn is_function_scope(&self) -> bool {
        self.kind == ScopeKind::Function
    }

    pub fn is_class_scope(&self) -> bool {
        self.kind == ScopeKind::Class
    }

    pub fn is_namespace_scope(&self) -> bool {
        matches!(self.kind, ScopeKind::Namespace | ScopeKind::Global)
    }

    pub fn is_block_scope(&self) -> bool {
        self.kind == ScopeKind::Block
    }
}
