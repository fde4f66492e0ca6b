use std::iter;

use winnow::combinator::{dispatch, empty, fail, preceded, repeat};
use winnow::{ModalResult, Parser};

use crate::ast::{BooleanLiteral, ElementRef, Ident, Literal};
use crate::lexer::TokenKind;
use crate::parser::token::{Token, TokenStream, any};
use crate::parser::utils::SpannedParserExt;
use crate::span::Spanned;

pub fn identifier(input: &mut TokenStream) -> ModalResult<Spanned<Ident>> {
    winnow::token::any
        .verify_map(|token: &Token| match token.kind {
            TokenKind::Identifier(name) => Some(Ident::from(name)),
            TokenKind::QuotedIdentifier(quoted) => Some(unquote(quoted)),
            _ => None,
        })
        .spanned()
        .parse_next(input)
}

fn unquote(quoted: &str) -> Ident {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|quoted| quoted.strip_suffix('"'))
        .unwrap_or(quoted);
    inner.replace("\"\"", "\"").into()
}

/// Parses a possibly qualified name such as `r.contestant_name`.
pub fn element_ref(input: &mut TokenStream) -> ModalResult<Spanned<ElementRef>> {
    (
        identifier,
        repeat(0.., preceded(TokenKind::Period, identifier)),
    )
        .map(|(first, rest): (_, Vec<_>)| ElementRef {
            parts: iter::once(first).chain(rest).collect(),
        })
        .spanned()
        .parse_next(input)
}

pub fn literal(input: &mut TokenStream) -> ModalResult<Spanned<Literal>> {
    dispatch! {any;
        &TokenKind::UnsignedInteger(integer) => empty.value(Literal::Integer(integer.into())),
        &TokenKind::UnsignedDecimal(decimal) => empty.value(Literal::Decimal(decimal.into())),
        &TokenKind::SingleQuoted(string) => empty.value(Literal::String(string.into())),
        TokenKind::True => empty.value(Literal::Boolean(BooleanLiteral::True)),
        TokenKind::False => empty.value(Literal::Boolean(BooleanLiteral::False)),
        TokenKind::Null => empty.value(Literal::Null),
        _ => fail,
    }
    .spanned()
    .parse_next(input)
}
