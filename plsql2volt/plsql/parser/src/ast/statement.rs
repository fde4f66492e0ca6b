//! AST definitions for *statements*.

use super::{ElementRef, Expr, Ident};
use crate::macros::{base, ext};
use crate::span::{OptSpanned, Spanned, VecSpanned};

/// A sequence of statements.
///
/// The span of a block covers the text between its opening and closing keywords, e.g. everything
/// between `BEGIN` and `END`, so comments before the first and after the last statement fall
/// inside it.
#[apply(base)]
pub struct StatementBlock {
    pub statements: VecSpanned<Statement>,
}

#[apply(base)]
pub enum Statement {
    Assignment(Assignment),
    Return(ReturnStatement),
    If(IfStatement),
    CursorLoop(CursorLoop),
    /// `NULL;`
    Null,
    /// `BEGIN statements END;`
    Block(Spanned<StatementBlock>),
    Sql(SqlStatement),
}

/// `target := value;`
#[apply(base)]
pub struct Assignment {
    pub target: Spanned<ElementRef>,
    pub value: Spanned<Expr>,
}

/// `RETURN [value];`
#[apply(base)]
pub struct ReturnStatement {
    pub value: OptSpanned<Expr>,
}

#[apply(base)]
pub struct IfStatement {
    pub condition: Spanned<Expr>,
    pub then_block: Spanned<StatementBlock>,
    pub elsif_branches: VecSpanned<ElsifBranch>,
    pub else_block: OptSpanned<StatementBlock>,
}

#[apply(base)]
pub struct ElsifBranch {
    pub condition: Spanned<Expr>,
    pub block: Spanned<StatementBlock>,
}

/// `FOR record IN (query) LOOP body END LOOP;`
#[apply(base)]
pub struct CursorLoop {
    pub record: Spanned<Ident>,
    pub query: Spanned<SqlStatement>,
    pub body: Spanned<StatementBlock>,
}

/// An embedded SQL statement.
///
/// The span covers the statement text without the terminating `;` (or, for the query of a cursor
/// loop, without the enclosing parentheses).
#[apply(base)]
pub struct SqlStatement {
    pub kind: SqlKind,
    pub into_clause: OptSpanned<IntoClause>,
    /// Every identifier chain in the statement that is not a function name, in source order.
    pub references: VecSpanned<ElementRef>,
}

#[apply(ext)]
pub enum SqlKind {
    Select,
    Insert,
    Update,
    Upsert,
    Delete,
}

/// `INTO a, b, ...` of a `SELECT`.
#[apply(base)]
pub struct IntoClause {
    pub targets: VecSpanned<Ident>,
}
