//! Code model for the lapis semantic engine.
//!
//! This crate owns the vocabulary the resolver computes over: qualified
//! [`Ty`] value trees, structural [`Name`]s, and arena-backed symbol and
//! scope records addressed by lightweight handles. On top of the arena it
//! provides [`LookupContext`], the adapter the resolver calls for ordinary
//! and qualified name lookup, merged class/namespace views, and template
//! instantiation.
//!
//! A [`Model`] is built once and then treated as an immutable snapshot;
//! everything downstream borrows it. Handles ([`SymbolId`], [`ScopeId`])
//! are only meaningful against the model that issued them.

pub mod context;
pub mod error;
pub mod model;
pub mod name;
pub mod scope;
pub mod symbol;
pub mod ty;

pub use context::{ClassOrNamespace, LookupContext};
pub use error::ModelError;
pub use model::Model;
pub use name::{Name, OperatorKind};
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{Symbol, SymbolId, SymbolKind};
pub use ty::{FloatKind, FunctionSig, IntKind, Param, Qualifiers, Ty, TyKind};
