//! AST definitions for *procedures and declarations*.

use super::{Comment, Expr, Ident, StatementBlock};
use crate::macros::{base, ext};
use crate::span::{OptSpanned, Spanned, VecSpanned};

#[apply(base)]
pub struct SourceFile {
    pub procedures: VecSpanned<ProcedureDef>,
    /// Comments of the whole file in source order. Empty unless comments are retained.
    pub comments: VecSpanned<Comment>,
}

#[apply(base)]
pub struct ProcedureDef {
    pub name: Spanned<Ident>,
    pub parameters: VecSpanned<Parameter>,
    pub declarations: VecSpanned<VariableDecl>,
    pub body: Spanned<StatementBlock>,
    /// The name repeated after `END`, if any.
    pub end_name: OptSpanned<Ident>,
}

#[apply(base)]
pub struct Parameter {
    pub name: Spanned<Ident>,
    pub mode: ParameterMode,
    pub type_spec: Spanned<TypeSpec>,
}

#[apply(ext)]
#[derive(Default)]
pub struct ParameterMode {
    pub direction: ParameterDirection,
    pub nocopy: bool,
}

#[apply(ext)]
#[derive(Default)]
pub enum ParameterDirection {
    #[default]
    In,
    Out,
    InOut,
}

#[apply(base)]
pub enum TypeSpec {
    /// A named type with optional arguments, e.g. `VARCHAR2(20)` or `NUMBER(10, 2)`.
    Native {
        name: Spanned<Ident>,
        args: VecSpanned<Ident>,
    },
    /// The type of a table column, e.g. `votes.state%TYPE`.
    ColumnType {
        table: Spanned<Ident>,
        column: Spanned<Ident>,
    },
}

#[apply(base)]
pub struct VariableDecl {
    pub name: Spanned<Ident>,
    pub constant: bool,
    pub type_spec: Spanned<TypeSpec>,
    pub not_null: bool,
    pub default: OptSpanned<Expr>,
}
