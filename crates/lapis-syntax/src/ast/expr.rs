//! Expression syntax nodes.
//!
//! The expression grammar is a closed tagged union: every kind the
//! resolver understands is a variant of [`ExprKind`], and the resolver's
//! dispatch is a single `match`. Postfix chains (`a.b(c)[d]->e`) are
//! expressed as nesting: each postfix operation wraps its base
//! expression, so evaluating the base first reproduces left-to-right
//! application.
//!
//! Nodes are produced by an external parser (or built directly by tests
//! and tools) and are never mutated downstream.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};

use lapis_model::Name;

use crate::ast::types::TypeRef;

/// Spelled kinds of numeric and character literals, as classified by the
/// lexer from suffixes and literal forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberKind {
    Char,
    WideChar,
    Int,
    Long,
    LongLong,
    Float,
    Double,
    LongDouble,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    AddressOf,
    Deref,
    Plus,
    Minus,
    Not,
    Complement,
    PreIncrement,
    PreDecrement,
}

/// Infix operators. Only `Comma` carries resolver semantics of its own;
/// every other operator resolves to its left operand's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Comma,
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    BitAnd,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalOr,
}

/// Member access spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessOp {
    Dot,
    Arrow,
}

/// Cast notation. All styles synthesize the target type the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastStyle {
    CStyle,
    Static,
    Dynamic,
    Reinterpret,
    Const,
}

/// Postfix `++`/`--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncDec {
    Increment,
    Decrement,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

impl Expr {
    pub fn new(kind: ExprKind, span: SourceSpan) -> Self {
        Expr { kind, span }
    }

    /// A node with a zero span, for trees built outside a parser.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr::new(kind, SourceSpan::from((0, 0)))
    }

    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }
}

/// Every expression kind the resolver dispatches over.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A numeric or character literal; `unsigned` reflects a `u` suffix.
    Number { kind: NumberKind, unsigned: bool },
    Bool(bool),
    String(String),
    This,
    /// A simple, qualified, template-id, destructor or operator name.
    Name(Name),
    /// A bound-method reference (the right side of a comma in
    /// signal/slot-style connect expressions).
    MethodRef(Name),
    /// A parenthesized expression.
    Nested(Box<Expr>),
    Conditional {
        condition: Box<Expr>,
        then_expr: Option<Box<Expr>>,
        else_expr: Option<Box<Expr>>,
    },
    /// A statement-expression; its value is the last statement's value.
    Compound(Vec<Expr>),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Cast { style: CastStyle, target: TypeRef, operand: Box<Expr> },
    New { target: Option<TypeRef>, args: Vec<Expr> },
    Delete(Box<Expr>),
    Throw(Option<Box<Expr>>),
    Sizeof { operand: Option<Box<Expr>> },
    Typeid { operand: Option<Box<Expr>> },
    /// A bare type-id used in expression position.
    TypeId(TypeRef),
    /// A declaration-condition (`if (T x = ...)`).
    Condition(Box<Expr>),
    ArrayInitializer(Vec<Expr>),
    TypenameCall { name: Name, args: Vec<Expr> },
    TypeConstructorCall { target: TypeRef, args: Vec<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Index { base: Box<Expr>, index: Box<Expr> },
    Member {
        base: Box<Expr>,
        access: AccessOp,
        member: Name,
    },
    PostIncDec { base: Box<Expr>, op: IncDec },
    /// A dynamic message send, `[receiver selector]`.
    MessageSend {
        receiver: Box<Expr>,
        selector: Name,
    },
}
