//! Type-id syntax nodes.
//!
//! A [`TypeRef`] is the parsed spelling of a type inside an expression
//! (cast targets, `new` allocations, bare type-ids). The resolver
//! synthesizes a semantic type from it without consulting the candidate
//! set.

use miette::SourceSpan;

use lapis_model::{FloatKind, IntKind, Name};

/// The specifier part of a type-id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRefKind {
    Void,
    Bool,
    Integer(IntKind),
    Float(FloatKind),
    Named(Name),
}

/// A parsed type-id: specifier, pointer declarators, and qualifier
/// keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub kind: TypeRefKind,
    /// Number of `*` declarators applied to the specifier.
    pub pointers: usize,
    pub is_const: bool,
    pub is_unsigned: bool,
    pub span: SourceSpan,
}

impl TypeRef {
    pub fn new(kind: TypeRefKind, span: SourceSpan) -> Self {
        TypeRef { kind, pointers: 0, is_const: false, is_unsigned: false, span }
    }

    /// A node with a zero span, for trees built outside a parser.
    pub fn synthetic(kind: TypeRefKind) -> Self {
        TypeRef::new(kind, SourceSpan::from((0, 0)))
    }

    pub fn named(name: Name) -> Self {
        TypeRef::synthetic(TypeRefKind::Named(name))
    }

    pub fn pointer_to(mut self) -> Self {
        self.pointers += 1;
        self
    }

    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }
}
