use winnow::combinator::{
    cut_err, delimited, dispatch, fail, opt, peek, preceded, repeat, seq, terminated,
};
use winnow::stream::Location;
use winnow::{ModalResult, Parser};

use super::expression::expression;
use super::lexical::{element_ref, identifier};
use super::sql::sql_statement;
use crate::ast::{
    Assignment, CursorLoop, ElsifBranch, IfStatement, ReturnStatement, Statement, StatementBlock,
};
use crate::lexer::TokenKind;
use crate::parser::token::{TokenStream, any};
use crate::parser::utils::SpannedParserExt;
use crate::span::Spanned;

/// Parses statements until a token that cannot start one.
///
/// The resulting span runs from the end of the preceding token (the opening keyword) to the
/// start of the following one (the closing keyword).
pub fn statement_block(input: &mut TokenStream) -> ModalResult<Spanned<StatementBlock>> {
    let start = input.previous_token_end();
    let statements = repeat(0.., statement).parse_next(input)?;
    let end = input.current_token_start().max(start);
    Ok(Spanned(StatementBlock { statements }, start..end))
}

/// Parses one statement including its terminating `;`, which is not part of the span.
pub fn statement(input: &mut TokenStream) -> ModalResult<Spanned<Statement>> {
    terminated(
        dispatch! {peek(any);
            TokenKind::Null => TokenKind::Null.value(Statement::Null),
            TokenKind::Return => return_statement.map(Statement::Return),
            TokenKind::If => if_statement.map(Statement::If),
            TokenKind::For => cursor_loop.map(Statement::CursorLoop),
            TokenKind::Begin => nested_block.map(Statement::Block),
            TokenKind::LeftParen => sql_statement.map(|Spanned(sql, _)| Statement::Sql(sql)),
            kind if kind.is_prefix_of_sql_statement() => {
                sql_statement.map(|Spanned(sql, _)| Statement::Sql(sql))
            },
            kind if kind.is_prefix_of_identifier() => assignment.map(Statement::Assignment),
            _ => fail,
        }
        .spanned(),
        cut_err(TokenKind::Semicolon),
    )
    .parse_next(input)
}

fn nested_block(input: &mut TokenStream) -> ModalResult<Spanned<StatementBlock>> {
    delimited(TokenKind::Begin, statement_block, cut_err(TokenKind::End)).parse_next(input)
}

fn return_statement(input: &mut TokenStream) -> ModalResult<ReturnStatement> {
    preceded(TokenKind::Return, opt(expression))
        .map(|value| ReturnStatement { value })
        .parse_next(input)
}

fn assignment(input: &mut TokenStream) -> ModalResult<Assignment> {
    seq! {Assignment {
        target: element_ref,
        _: TokenKind::Assign,
        value: cut_err(expression),
    }}
    .parse_next(input)
}

fn if_statement(input: &mut TokenStream) -> ModalResult<IfStatement> {
    seq! {IfStatement {
        _: TokenKind::If,
        condition: cut_err(expression),
        _: cut_err(TokenKind::Then),
        then_block: statement_block,
        elsif_branches: repeat(0.., elsif_branch),
        else_block: opt(preceded(TokenKind::Else, statement_block)),
        _: cut_err((TokenKind::End, TokenKind::If)),
    }}
    .parse_next(input)
}

fn elsif_branch(input: &mut TokenStream) -> ModalResult<Spanned<ElsifBranch>> {
    seq! {ElsifBranch {
        _: TokenKind::Elsif,
        condition: cut_err(expression),
        _: cut_err(TokenKind::Then),
        block: statement_block,
    }}
    .spanned()
    .parse_next(input)
}

fn cursor_loop(input: &mut TokenStream) -> ModalResult<CursorLoop> {
    seq! {CursorLoop {
        _: TokenKind::For,
        record: cut_err(identifier),
        _: cut_err((TokenKind::In, TokenKind::LeftParen)),
        query: cut_err(sql_statement),
        _: cut_err((TokenKind::RightParen, TokenKind::Loop)),
        body: statement_block,
        _: cut_err((TokenKind::End, TokenKind::Loop)),
    }}
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, SqlKind};
    use crate::parser::utils::parse;

    #[test]
    fn test_assignment() {
        let parsed = parse!(statement, "total := total + 1;").unwrap();
        assert_eq!(parsed.span(), 0..18);
        let Statement::Assignment(assignment) = parsed.value() else {
            unreachable!()
        };
        assert_eq!(assignment.target.span(), 0..5);
        assert!(matches!(assignment.value.value(), Expr::Binary { .. }));
    }

    #[test]
    fn test_return_and_null() {
        assert_eq!(
            parse!(statement, "return;"),
            Some(Spanned(
                Statement::Return(ReturnStatement { value: None }),
                0..6
            ))
        );
        assert_eq!(
            parse!(statement, "NULL;"),
            Some(Spanned(Statement::Null, 0..4))
        );
    }

    #[test]
    fn test_if_statement() {
        let source = "if x = 1 then\n  y := 2;\n  -- note\nend if;";
        let parsed = parse!(statement, source).unwrap();
        let Statement::If(if_statement) = parsed.value() else {
            unreachable!()
        };
        assert_eq!(if_statement.then_block.span(), 13..34);
        assert_eq!(if_statement.then_block.value().statements.len(), 1);
        assert!(if_statement.elsif_branches.is_empty());
        assert!(if_statement.else_block.is_none());
    }

    #[test]
    fn test_if_with_else_branches() {
        let source = "if a then null; elsif b then null; else y := 1; end if;";
        let Statement::If(if_statement) = parse!(statement, source).unwrap().0 else {
            unreachable!()
        };
        assert_eq!(if_statement.elsif_branches.len(), 1);
        assert!(if_statement.else_block.is_some());
    }

    #[test]
    fn test_cursor_loop() {
        let source = "for r in (select id, name from t) loop n := r.id; end loop;";
        let Statement::CursorLoop(cursor_loop) = parse!(statement, source).unwrap().0 else {
            unreachable!()
        };
        assert_eq!(cursor_loop.record.value(), "r");
        assert_eq!(cursor_loop.query.span(), 10..32);
        assert_eq!(cursor_loop.query.value().kind, SqlKind::Select);
        assert_eq!(cursor_loop.body.value().statements.len(), 1);
    }

    #[test]
    fn test_nested_block() {
        let parsed = parse!(statement, "begin x := 1; end;").unwrap();
        assert_eq!(parsed.span(), 0..17);
        let Statement::Block(block) = parsed.value() else {
            unreachable!()
        };
        assert_eq!(block.span(), 5..14);
        assert_eq!(block.value().statements.len(), 1);
        assert!(parse!(statement, "begin x := 1;").is_none());
    }

    #[test]
    fn test_sql_statement_span_excludes_semicolon() {
        let parsed = parse!(statement, "delete from t where id = x;").unwrap();
        assert_eq!(parsed.span(), 0..26);
        assert!(matches!(parsed.value(), Statement::Sql(sql) if sql.kind == SqlKind::Delete));
    }

    #[test]
    fn test_missing_semicolon() {
        assert!(parse!(statement, "x := 1").is_none());
    }
}
