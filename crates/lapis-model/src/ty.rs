//! Type representations.
//!
//! A [`Ty`] is an immutable value tree: a set of qualifier flags around one
//! [`TyKind`] variant. Pointer, array and function types own their nested
//! types behind `Arc`, which keeps clones cheap; the sharing is never
//! observable through the public surface.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::symbol::SymbolId;

/// Qualifier flags carried by every type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_unsigned: bool,
}

impl Qualifiers {
    pub const fn none() -> Self {
        Qualifiers { is_const: false, is_volatile: false, is_unsigned: false }
    }

    pub fn is_empty(&self) -> bool {
        !self.is_const && !self.is_volatile && !self.is_unsigned
    }
}

/// Built-in integral kinds. `char` is an integer kind, as in the language
/// this models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntKind {
    Char,
    WideChar,
    Short,
    Int,
    Long,
    LongLong,
}

/// Built-in floating-point kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatKind {
    Float,
    Double,
    LongDouble,
}

/// One parameter of a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: Option<String>,
    pub ty: Ty,
    /// Whether the declaration carries a default initializer. Parameters
    /// with defaults do not count toward the minimum call arity.
    pub has_default: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Param { name: Some(name.into()), ty, has_default: false }
    }

    pub fn with_default(name: impl Into<String>, ty: Ty) -> Self {
        Param { name: Some(name.into()), ty, has_default: true }
    }

    pub fn unnamed(ty: Ty) -> Self {
        Param { name: None, ty, has_default: false }
    }
}

/// A function type: return type, parameters, variadic flag, and the
/// ambiguity marker set on signatures merged from conflicting declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSig {
    pub return_ty: Ty,
    pub params: Vec<Param>,
    pub variadic: bool,
    /// Marks a signature that stands for several irreconcilable
    /// declarations; such a type collapses to its return type when used as
    /// the base of member access.
    pub ambiguous: bool,
}

impl FunctionSig {
    pub fn new(return_ty: Ty, params: Vec<Param>) -> Self {
        FunctionSig { return_ty, params, variadic: false, ambiguous: false }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn ambiguous(mut self) -> Self {
        self.ambiguous = true;
        self
    }
}

/// The underlying type variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TyKind {
    Void,
    Bool,
    Integer(IntKind),
    Float(FloatKind),
    /// A pointer to an element type.
    Pointer(Arc<Ty>),
    /// An array of an element type; extents are not modeled.
    Array(Arc<Ty>),
    /// A reference to a declared entity by name. Reaching the definition
    /// requires a further lookup.
    Named(Name),
    Function(Arc<FunctionSig>),
    /// A class definition; the symbol owns the member scope.
    Class(SymbolId),
    /// A dynamically-dispatched class definition (message-send receivers).
    ObjcClass(SymbolId),
}

/// A qualified type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ty {
    pub quals: Qualifiers,
    pub kind: TyKind,
}

impl Ty {
    pub fn new(kind: TyKind) -> Self {
        Ty { quals: Qualifiers::none(), kind }
    }

    pub fn void() -> Self {
        Ty::new(TyKind::Void)
    }

    pub fn bool_() -> Self {
        Ty::new(TyKind::Bool)
    }

    pub fn integer(kind: IntKind) -> Self {
        Ty::new(TyKind::Integer(kind))
    }

    pub fn float(kind: FloatKind) -> Self {
        Ty::new(TyKind::Float(kind))
    }

    pub fn pointer(element: Ty) -> Self {
        Ty::new(TyKind::Pointer(Arc::new(element)))
    }

    pub fn array(element: Ty) -> Self {
        Ty::new(TyKind::Array(Arc::new(element)))
    }

    pub fn named(name: Name) -> Self {
        Ty::new(TyKind::Named(name))
    }

    pub fn function(sig: FunctionSig) -> Self {
        Ty::new(TyKind::Function(Arc::new(sig)))
    }

    pub fn class(symbol: SymbolId) -> Self {
        Ty::new(TyKind::Class(symbol))
    }

    pub fn objc_class(symbol: SymbolId) -> Self {
        Ty::new(TyKind::ObjcClass(symbol))
    }

    pub fn unsigned(mut self) -> Self {
        self.quals.is_unsigned = true;
        self
    }

    pub fn const_(mut self) -> Self {
        self.quals.is_const = true;
        self
    }

    pub fn volatile(mut self) -> Self {
        self.quals.is_volatile = true;
        self
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TyKind::Pointer(_))
    }

    pub fn is_named(&self) -> bool {
        matches!(self.kind, TyKind::Named(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, TyKind::Class(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, TyKind::Function(_))
    }

    /// Whether member navigation can continue through this type: either a
    /// named type (one lookup away from a definition) or a class.
    pub fn is_named_or_class(&self) -> bool {
        self.is_named() || self.is_class()
    }

    pub fn as_pointer_element(&self) -> Option<&Ty> {
        match &self.kind {
            TyKind::Pointer(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_array_element(&self) -> Option<&Ty> {
        match &self.kind {
            TyKind::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_named(&self) -> Option<&Name> {
        match &self.kind {
            TyKind::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSig> {
        match &self.kind {
            TyKind::Function(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<SymbolId> {
        match self.kind {
            TyKind::Class(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_objc_class(&self) -> Option<SymbolId> {
        match self.kind {
            TyKind::ObjcClass(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quals.is_const {
            write!(f, "const ")?;
        }
        if self.quals.is_volatile {
            write!(f, "volatile ")?;
        }
        if self.quals.is_unsigned {
            write!(f, "unsigned ")?;
        }
        match &self.kind {
            TyKind::Void => write!(f, "void"),
            TyKind::Bool => write!(f, "bool"),
            TyKind::Integer(IntKind::Char) => write!(f, "char"),
            TyKind::Integer(IntKind::WideChar) => write!(f, "wchar_t"),
            TyKind::Integer(IntKind::Short) => write!(f, "short"),
            TyKind::Integer(IntKind::Int) => write!(f, "int"),
            TyKind::Integer(IntKind::Long) => write!(f, "long"),
            TyKind::Integer(IntKind::LongLong) => write!(f, "long long"),
            TyKind::Float(FloatKind::Float) => write!(f, "float"),
            TyKind::Float(FloatKind::Double) => write!(f, "double"),
            TyKind::Float(FloatKind::LongDouble) => write!(f, "long double"),
            TyKind::Pointer(element) => write!(f, "{}*", element),
            TyKind::Array(element) => write!(f, "{}[]", element),
            TyKind::Named(name) => write!(f, "{}", name),
            TyKind::Function(sig) => {
                write!(f, "{}(", sig.return_ty)?;
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param.ty)?;
                }
                if sig.variadic {
                    if !sig.params.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...")?;
                }
                write!(f, ")")
            }
            TyKind::Class(symbol) => write!(f, "class#{}", symbol.index()),
            TyKind::ObjcClass(symbol) => write!(f, "objc-class#{}", symbol.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_ty() -> Ty {
        Ty::integer(IntKind::Int)
    }

    #[test]
    fn pointer_element_round_trip() {
        let ptr = Ty::pointer(int_ty());
        assert!(ptr.is_pointer());
        assert_eq!(ptr.as_pointer_element(), Some(&int_ty()));
        assert_eq!(ptr.as_array_element(), None);
    }

    #[test]
    fn qualifiers_compose() {
        let ty = int_ty().unsigned().const_();
        assert!(ty.quals.is_const);
        assert!(ty.quals.is_unsigned);
        assert!(!ty.quals.is_volatile);
        assert_ne!(ty, int_ty());
    }

    #[test]
    fn display_renders_c_style() {
        assert_eq!(Ty::pointer(int_ty().const_()).to_string(), "const int*");
        assert_eq!(Ty::integer(IntKind::Int).unsigned().to_string(), "unsigned int");
        assert_eq!(Ty::array(Ty::named(Name::ident("Item"))).to_string(), "Item[]");
        let sig = FunctionSig::new(Ty::void(), vec![Param::unnamed(int_ty())]).variadic();
        assert_eq!(Ty::function(sig).to_string(), "void(int, ...)");
    }
}
