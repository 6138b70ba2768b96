//! Names as they participate in lookup.
//!
//! A [`Name`] is the key the resolver hands to the lookup context: a plain
//! identifier, an operator name (`operator()`, `operator[]`, `operator->`),
//! a qualified path (`a::b::c`, optionally rooted at the global namespace),
//! a template-id carrying its argument types, or a destructor name. Names
//! compare structurally; symbol tables never compare by source location.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ty::Ty;

/// Operator names the resolver looks up on class/namespace views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    /// The function-call operator, `operator()`.
    FunctionCall,
    /// The array-access operator, `operator[]`.
    ArrayAccess,
    /// The member-access-through-pointer operator, `operator->`.
    Arrow,
}

/// A name occurring in an expression or declaring a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Name {
    /// A plain identifier.
    Identifier(String),
    /// An operator-function name.
    Operator(OperatorKind),
    /// A destructor name, `~T`.
    Destructor(String),
    /// A qualified path. `global` marks a leading `::`.
    Qualified { names: Vec<Name>, global: bool },
    /// A template-id: base identifier plus argument types, `name<args...>`.
    Template { name: String, args: Vec<Ty> },
}

impl Name {
    pub fn ident(name: impl Into<String>) -> Self {
        Name::Identifier(name.into())
    }

    pub fn operator(kind: OperatorKind) -> Self {
        Name::Operator(kind)
    }

    pub fn destructor(class_name: impl Into<String>) -> Self {
        Name::Destructor(class_name.into())
    }

    pub fn qualified(names: Vec<Name>, global: bool) -> Self {
        Name::Qualified { names, global }
    }

    pub fn template(name: impl Into<String>, args: Vec<Ty>) -> Self {
        Name::Template { name: name.into(), args }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Name::Identifier(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, Name::Qualified { .. })
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Name::Template { .. })
    }

    /// The rightmost segment of a qualified name; any other name is its own
    /// tail.
    pub fn unqualified_tail(&self) -> &Name {
        match self {
            Name::Qualified { names, .. } => names.last().unwrap_or(self),
            _ => self,
        }
    }

    /// A qualified name with its last segment removed. `None` for
    /// unqualified names and single-segment paths.
    pub fn without_last(&self) -> Option<Name> {
        match self {
            Name::Qualified { names, global } if names.len() > 1 => Some(Name::Qualified {
                names: names[..names.len() - 1].to_vec(),
                global: *global,
            }),
            _ => None,
        }
    }

    /// Whether a lookup for `self` should surface a symbol declared under
    /// `declared`. Structural equality, with one widening: a template-id
    /// matches the identifier that declares the template (`Vec<int>` finds
    /// the class declared as `Vec`).
    pub fn matches_declaration(&self, declared: &Name) -> bool {
        if self == declared {
            return true;
        }
        match (self, declared) {
            (Name::Template { name, .. }, Name::Identifier(decl)) => name == decl,
            _ => false,
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Identifier(s) => write!(f, "{}", s),
            Name::Operator(OperatorKind::FunctionCall) => write!(f, "operator()"),
            Name::Operator(OperatorKind::ArrayAccess) => write!(f, "operator[]"),
            Name::Operator(OperatorKind::Arrow) => write!(f, "operator->"),
            Name::Destructor(s) => write!(f, "~{}", s),
            Name::Qualified { names, global } => {
                if *global {
                    write!(f, "::")?;
                }
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, "::")?;
                    }
                    write!(f, "{}", name)?;
                }
                Ok(())
            }
            Name::Template { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
        }
    }
}
