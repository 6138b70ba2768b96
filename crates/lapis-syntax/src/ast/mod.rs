pub mod expr;
pub mod types;

pub use expr::{
    AccessOp, BinaryOp, CastStyle, Expr, ExprKind, IncDec, NumberKind, UnaryOp,
};
pub use types::{TypeRef, TypeRefKind};
