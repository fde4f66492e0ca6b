use winnow::combinator::{
    alt, cut_err, delimited, opt, preceded, repeat, separated, seq, terminated,
};
use winnow::{ModalResult, Parser};

use super::expression::expression;
use super::lexical::identifier;
use super::statement::statement_block;
use crate::ast::{
    Ident, Parameter, ParameterDirection, ParameterMode, ProcedureDef, SourceFile, TypeSpec,
    VariableDecl,
};
use crate::lexer::TokenKind;
use crate::parser::token::{Token, TokenStream};
use crate::parser::utils::SpannedParserExt;
use crate::span::{Spanned, VecSpanned};

pub fn source_file(input: &mut TokenStream) -> ModalResult<SourceFile> {
    repeat(0.., procedure_definition)
        .map(|procedures| SourceFile {
            procedures,
            comments: Vec::new(),
        })
        .parse_next(input)
}

/// Parses `[CREATE [OR REPLACE]] PROCEDURE ... END [name];` with an optional trailing `/`.
pub fn procedure_definition(input: &mut TokenStream) -> ModalResult<Spanned<ProcedureDef>> {
    terminated(
        preceded(
            (
                opt((
                    TokenKind::Create,
                    opt((TokenKind::Or, TokenKind::Replace)),
                )),
                TokenKind::Procedure,
            ),
            cut_err(procedure_body),
        )
        .spanned(),
        cut_err((TokenKind::Semicolon, opt(TokenKind::Solidus))),
    )
    .parse_next(input)
}

fn procedure_body(input: &mut TokenStream) -> ModalResult<ProcedureDef> {
    seq! {ProcedureDef {
        name: identifier,
        parameters: parameter_list,
        _: alt((TokenKind::Is, TokenKind::As)),
        declarations: repeat(0.., variable_declaration),
        _: TokenKind::Begin,
        body: statement_block,
        _: TokenKind::End,
        end_name: opt(identifier),
    }}
    .parse_next(input)
}

fn parameter_list(input: &mut TokenStream) -> ModalResult<VecSpanned<Parameter>> {
    opt(delimited(
        TokenKind::LeftParen,
        cut_err(separated(1.., parameter, TokenKind::Comma)),
        cut_err(TokenKind::RightParen),
    ))
    .map(Option::unwrap_or_default)
    .parse_next(input)
}

fn parameter(input: &mut TokenStream) -> ModalResult<Spanned<Parameter>> {
    seq! {Parameter {
        name: identifier,
        mode: parameter_mode,
        type_spec: cut_err(type_spec),
    }}
    .spanned()
    .parse_next(input)
}

fn parameter_mode(input: &mut TokenStream) -> ModalResult<ParameterMode> {
    (
        opt(TokenKind::In),
        opt(TokenKind::Out),
        opt(TokenKind::Nocopy),
    )
        .map(|(input_mode, output_mode, nocopy)| {
            let direction = match (input_mode, output_mode) {
                (_, None) => ParameterDirection::In,
                (None, Some(_)) => ParameterDirection::Out,
                (Some(_), Some(_)) => ParameterDirection::InOut,
            };
            ParameterMode {
                direction,
                nocopy: nocopy.is_some(),
            }
        })
        .parse_next(input)
}

pub fn type_spec(input: &mut TokenStream) -> ModalResult<Spanned<TypeSpec>> {
    alt((
        (
            identifier,
            preceded(TokenKind::Period, identifier),
            TokenKind::PercentType,
        )
            .map(|(table, column, _)| TypeSpec::ColumnType { table, column }),
        (
            identifier,
            opt(delimited(
                TokenKind::LeftParen,
                cut_err(separated(1.., type_argument, TokenKind::Comma)),
                cut_err(TokenKind::RightParen),
            )),
        )
            .map(|(name, args): (_, Option<VecSpanned<Ident>>)| TypeSpec::Native {
                name,
                args: args.unwrap_or_default(),
            }),
    ))
    .spanned()
    .parse_next(input)
}

/// A length, precision or scale, e.g. the `20` of `VARCHAR2(20)` or the `CHAR` of
/// `VARCHAR2(20 CHAR)` (which is folded into the preceding argument).
fn type_argument(input: &mut TokenStream) -> ModalResult<Spanned<Ident>> {
    (
        winnow::token::any.verify_map(|token: &Token| match token.kind {
            TokenKind::UnsignedInteger(value) | TokenKind::Identifier(value) => {
                Some(Ident::from(value))
            }
            TokenKind::Asterisk => Some(Ident::new_static("*")),
            _ => None,
        }),
        opt(winnow::token::any.verify_map(|token: &Token| match token.kind {
            TokenKind::Identifier(unit) => Some(unit),
            _ => None,
        })),
    )
        .map(|(value, unit)| match unit {
            Some(unit) => Ident::from(format!("{value} {unit}")),
            None => value,
        })
        .spanned()
        .parse_next(input)
}

fn variable_declaration(input: &mut TokenStream) -> ModalResult<Spanned<VariableDecl>> {
    terminated(
        seq! {VariableDecl {
            name: identifier,
            constant: opt(TokenKind::Constant).map(|constant| constant.is_some()),
            type_spec: cut_err(type_spec),
            not_null: opt((TokenKind::Not, cut_err(TokenKind::Null)))
                .map(|not_null| not_null.is_some()),
            default: opt(preceded(
                alt((TokenKind::Assign, TokenKind::Default)),
                cut_err(expression),
            )),
        }}
        .spanned(),
        cut_err(TokenKind::Semicolon),
    )
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Statement};
    use crate::parser::utils::parse;

    const VOTE: &str = "\
CREATE OR REPLACE PROCEDURE vote (
    phone_number IN NUMBER,
    contestant   IN votes.contestant_number%TYPE,
    result       OUT NOCOPY INTEGER
) IS
    max_votes CONSTANT INTEGER := 2;
    num_votes INTEGER;
BEGIN
    SELECT COUNT(*) INTO num_votes FROM votes WHERE phone_number = phone_number;
    result := 0;
END vote;
/
";

    #[test]
    fn test_vote_procedure() {
        let file = parse!(source_file, VOTE).unwrap();
        assert_eq!(file.procedures.len(), 1);
        let procedure = file.procedures[0].value();
        assert_eq!(procedure.name.value(), "vote");
        assert_eq!(procedure.end_name.as_ref().map(|name| name.0.as_str()), Some("vote"));

        let directions: Vec<_> = procedure
            .parameters
            .iter()
            .map(|parameter| parameter.value().mode.direction)
            .collect();
        assert_eq!(directions, [
            ParameterDirection::In,
            ParameterDirection::In,
            ParameterDirection::Out
        ]);
        assert!(procedure.parameters[2].value().mode.nocopy);
        assert!(matches!(
            procedure.parameters[1].value().type_spec.value(),
            TypeSpec::ColumnType { table, column }
                if table.value() == "votes" && column.value() == "contestant_number"
        ));

        assert_eq!(procedure.declarations.len(), 2);
        let max_votes = procedure.declarations[0].value();
        assert!(max_votes.constant);
        assert!(matches!(
            max_votes.default.as_ref().map(|default| default.value()),
            Some(Expr::Literal(_))
        ));

        let statements = &procedure.body.value().statements;
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0].value(), Statement::Sql(_)));
    }

    #[test]
    fn test_procedure_span_excludes_terminator() {
        let source = "procedure p is begin null; end;";
        let file = parse!(source_file, source).unwrap();
        assert_eq!(file.procedures[0].span(), 0..30);
        assert!(file.procedures[0].value().parameters.is_empty());
    }

    #[test]
    fn test_in_out_parameter() {
        let parameter = parse!(parameter, "total IN OUT varchar2(20 char)").unwrap();
        assert_eq!(parameter.value().mode.direction, ParameterDirection::InOut);
        assert!(matches!(
            parameter.value().type_spec.value(),
            TypeSpec::Native { name, args }
                if name.value() == "varchar2" && args[0].value() == "20 char"
        ));
    }

    #[test]
    fn test_declaration_with_default_keyword() {
        let declaration = parse!(variable_declaration, "n number(10, 2) not null default 0;").unwrap();
        assert_eq!(declaration.span(), 0..34);
        let declaration = declaration.value();
        assert!(declaration.not_null);
        assert!(!declaration.constant);
        let TypeSpec::Native { args, .. } = declaration.type_spec.value() else {
            unreachable!()
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_multiple_procedures() {
        let source = "procedure a is begin null; end a; procedure b as begin return; end;";
        let file = parse!(source_file, source).unwrap();
        assert_eq!(file.procedures.len(), 2);
        assert_eq!(file.procedures[1].value().name.value(), "b");
    }

    #[test]
    fn test_missing_begin() {
        assert!(parse!(source_file, "procedure p is x integer; null; end;").is_none());
    }
}
