//! Embedded SQL statements.
//!
//! SQL text is not parsed into a tree. The statement is scanned token by token up to its end,
//! keeping track of parenthesis depth, and only what the translator needs is recorded: the kind of
//! statement, the `INTO` clause of a `SELECT`, and the identifier chains that may refer to
//! procedure variables.

use winnow::combinator::{cut_err, dispatch, empty, fail, opt, peek, preceded, repeat, separated};
use winnow::{ModalResult, Parser};

use super::lexical::{element_ref, identifier};
use crate::ast::{IntoClause, SqlKind, SqlStatement};
use crate::lexer::TokenKind;
use crate::parser::token::{TokenStream, any};
use crate::parser::utils::SpannedParserExt;
use crate::span::Spanned;

/// Parses a SQL statement up to, but not including, a `;` or an unbalanced `)`.
pub fn sql_statement(input: &mut TokenStream) -> ModalResult<Spanned<SqlStatement>> {
    sql_statement_body.spanned().parse_next(input)
}

fn sql_statement_body(input: &mut TokenStream) -> ModalResult<SqlStatement> {
    let kind = peek(sql_kind).parse_next(input)?;
    let mut statement = SqlStatement {
        kind,
        into_clause: None,
        references: Vec::new(),
    };
    let mut depth = 0usize;
    loop {
        match opt(peek(any)).parse_next(input)? {
            None => return cut_err(fail).parse_next(input),
            Some(TokenKind::Semicolon | TokenKind::RightParen) if depth == 0 => break,
            Some(TokenKind::LeftParen) => {
                depth += 1;
                any.parse_next(input)?;
            }
            Some(TokenKind::RightParen) => {
                depth -= 1;
                any.parse_next(input)?;
            }
            Some(TokenKind::Into)
                if kind == SqlKind::Select && depth == 0 && statement.into_clause.is_none() =>
            {
                statement.into_clause = Some(into_clause.parse_next(input)?);
            }
            Some(token) if token.is_prefix_of_identifier() => {
                let reference = element_ref.parse_next(input)?;
                // A name directly followed by `(` is a function, never a variable.
                if opt(peek(TokenKind::LeftParen)).parse_next(input)?.is_none() {
                    statement.references.push(reference);
                }
            }
            Some(_) => {
                any.parse_next(input)?;
            }
        }
    }
    Ok(statement)
}

/// Determines the kind of statement from its first keyword, skipping opening parentheses.
fn sql_kind(input: &mut TokenStream) -> ModalResult<SqlKind> {
    preceded(
        repeat(0.., TokenKind::LeftParen).map(|()| ()),
        dispatch! {any;
            TokenKind::Select => empty.value(SqlKind::Select),
            TokenKind::Insert => empty.value(SqlKind::Insert),
            TokenKind::Update => empty.value(SqlKind::Update),
            TokenKind::Upsert => empty.value(SqlKind::Upsert),
            TokenKind::Delete => empty.value(SqlKind::Delete),
            _ => fail,
        },
    )
    .parse_next(input)
}

fn into_clause(input: &mut TokenStream) -> ModalResult<Spanned<IntoClause>> {
    preceded(
        TokenKind::Into,
        cut_err(separated(1.., identifier, TokenKind::Comma)),
    )
    .map(|targets| IntoClause { targets })
    .spanned()
    .parse_next(input)
}
