//! Expression syntax for the lapis semantic engine.
//!
//! The resolver consumes expression trees; producing them (lexing,
//! parsing) is a separate concern. This crate defines the tree: a closed
//! set of expression kinds, operator vocabularies, and type-id nodes,
//! each carrying a [`miette::SourceSpan`]. Trees can equally be built
//! programmatically, which is how tests and non-parser tools use them.

pub mod ast;

pub use ast::{
    AccessOp, BinaryOp, CastStyle, Expr, ExprKind, IncDec, NumberKind, TypeRef, TypeRefKind,
    UnaryOp,
};
