//! AST definitions for *lexical elements*.

use smol_str::SmolStr;

use crate::macros::{base, ext};

pub type Ident = SmolStr;

#[apply(base)]
pub enum Literal {
    Integer(SmolStr),
    Decimal(SmolStr),
    /// A character string literal exactly as written, including the enclosing single quotes.
    String(SmolStr),
    Boolean(BooleanLiteral),
    Null,
}

#[apply(ext)]
pub enum BooleanLiteral {
    True,
    False,
}

#[apply(base)]
pub struct Comment {
    pub kind: CommentKind,
    /// The comment text including its delimiters.
    pub text: SmolStr,
}

#[apply(ext)]
pub enum CommentKind {
    /// `-- ...` up to the end of the line.
    Line,
    /// `/* ... */`, possibly spanning several lines.
    Block,
}
