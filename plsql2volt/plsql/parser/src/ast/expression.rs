//! AST definitions for *expressions*.

use super::{Ident, Literal};
use crate::macros::{base, ext};
use crate::span::{BoxSpanned, Spanned, VecSpanned};

#[apply(base)]
pub enum Expr {
    Binary {
        op: Spanned<BinaryOp>,
        left: BoxSpanned<Expr>,
        right: BoxSpanned<Expr>,
    },
    Unary {
        op: Spanned<UnaryOp>,
        child: BoxSpanned<Expr>,
    },
    /// `child IS [NOT] NULL`.
    IsNull {
        child: BoxSpanned<Expr>,
        negated: bool,
    },
    Literal(Literal),
    Element(ElementRef),
    Call {
        name: Spanned<ElementRef>,
        args: VecSpanned<Expr>,
    },
    /// A parenthesized expression.
    Nested(BoxSpanned<Expr>),
}

/// A possibly qualified name, e.g. `total` or `r.contestant_name`.
#[apply(base)]
pub struct ElementRef {
    pub parts: VecSpanned<Ident>,
}

impl ElementRef {
    /// Returns the name if the reference has a single component.
    #[inline]
    pub fn as_simple(&self) -> Option<&Spanned<Ident>> {
        match self.parts.as_slice() {
            [part] => Some(part),
            _ => None,
        }
    }
}

/// Binary operators.
#[apply(ext)]
pub enum BinaryOp {
    /// Logical disjunction, e.g., `a OR b`.
    Or,
    /// Logical conjunction, e.g., `a AND b`.
    And,
    /// Equality, e.g., `a = b`.
    Eq,
    /// Inequality, e.g., `a <> b`, `a != b`, `a ^= b` or `a ~= b`.
    Ne,
    /// Less than, e.g., `a < b`.
    Lt,
    /// Less than or equal, e.g., `a <= b`.
    Le,
    /// Greater than, e.g., `a > b`.
    Gt,
    /// Greater than or equal, e.g., `a >= b`.
    Ge,
    /// Concatenation, e.g., `a || b`.
    Concat,
    /// Addition, e.g., `a + b`.
    Add,
    /// Subtraction, e.g., `a - b`.
    Sub,
    /// Multiplication, e.g., `a * b`.
    Mul,
    /// Division, e.g., `a / b`.
    Div,
}

/// Unary operators.
#[apply(ext)]
pub enum UnaryOp {
    /// Logical negation, e.g., `NOT a`.
    Not,
    /// Unary plus, e.g., `+a`.
    Plus,
    /// Unary minus, e.g., `-a`.
    Minus,
}
