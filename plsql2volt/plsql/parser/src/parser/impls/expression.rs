use winnow::combinator::{cut_err, delimited, dispatch, empty, fail, opt, peek, separated};
use winnow::{ModalResult, Parser};

use super::lexical::{element_ref, literal};
use crate::ast::{BinaryOp, ElementRef, Expr, UnaryOp};
use crate::lexer::TokenKind;
use crate::parser::precedence::{Assoc, Precedence, precedence};
use crate::parser::token::{TokenStream, any};
use crate::parser::utils::{SpannedMapExt, SpannedParserExt};
use crate::span::Spanned;

const PREC_INIT: Precedence = 0;
const PREC_OR: Precedence = 1;
const PREC_AND: Precedence = 2;
const PREC_NOT: Precedence = 3;
const PREC_IS: Precedence = 4;
const PREC_CMP: Precedence = 5;
const PREC_CONCAT: Precedence = 6;
const PREC_ADD_SUB: Precedence = 7;
const PREC_MUL_DIV: Precedence = 8;
const PREC_PLUS_MINUS: Precedence = 9;

fn expression_prefix(input: &mut TokenStream) -> ModalResult<(Precedence, Spanned<UnaryOp>)> {
    dispatch! {any;
        TokenKind::Not => empty.value((PREC_NOT, UnaryOp::Not)),
        TokenKind::Plus => empty.value((PREC_PLUS_MINUS, UnaryOp::Plus)),
        TokenKind::Minus => empty.value((PREC_PLUS_MINUS, UnaryOp::Minus)),
        _ => fail
    }
    .spanned()
    .map(|Spanned((prec, op), span)| (prec, Spanned(op, span)))
    .parse_next(input)
}

/// Parses `IS NULL` or `IS NOT NULL`, producing whether the test is negated.
fn expression_suffix(input: &mut TokenStream) -> ModalResult<(Precedence, Spanned<bool>)> {
    dispatch! {peek((any, any));
        (TokenKind::Is, TokenKind::Not) => {
            (TokenKind::Is, TokenKind::Not, cut_err(TokenKind::Null)).value(true)
        },
        (TokenKind::Is, _) => (TokenKind::Is, cut_err(TokenKind::Null)).value(false),
        _ => fail,
    }
    .spanned()
    .map(|Spanned(negated, span)| (PREC_IS, Spanned(negated, span)))
    .parse_next(input)
}

fn expression_infix(
    input: &mut TokenStream,
) -> ModalResult<(Assoc, Precedence, Spanned<BinaryOp>)> {
    dispatch! {any;
        TokenKind::Or => empty.value((Assoc::Left, PREC_OR, BinaryOp::Or)),
        TokenKind::And => empty.value((Assoc::Left, PREC_AND, BinaryOp::And)),
        TokenKind::Equals => empty.value((Assoc::Neither, PREC_CMP, BinaryOp::Eq)),
        TokenKind::NotEquals => empty.value((Assoc::Neither, PREC_CMP, BinaryOp::Ne)),
        TokenKind::LessThan => empty.value((Assoc::Neither, PREC_CMP, BinaryOp::Lt)),
        TokenKind::LessThanOrEquals => empty.value((Assoc::Neither, PREC_CMP, BinaryOp::Le)),
        TokenKind::GreaterThan => empty.value((Assoc::Neither, PREC_CMP, BinaryOp::Gt)),
        TokenKind::GreaterThanOrEquals => empty.value((Assoc::Neither, PREC_CMP, BinaryOp::Ge)),
        TokenKind::Concatenation => empty.value((Assoc::Left, PREC_CONCAT, BinaryOp::Concat)),
        TokenKind::Plus => empty.value((Assoc::Left, PREC_ADD_SUB, BinaryOp::Add)),
        TokenKind::Minus => empty.value((Assoc::Left, PREC_ADD_SUB, BinaryOp::Sub)),
        TokenKind::Asterisk => empty.value((Assoc::Left, PREC_MUL_DIV, BinaryOp::Mul)),
        TokenKind::Solidus => empty.value((Assoc::Left, PREC_MUL_DIV, BinaryOp::Div)),
        _ => fail,
    }
    .spanned()
    .map(|Spanned((assoc, prec, op), span)| (assoc, prec, Spanned(op, span)))
    .parse_next(input)
}

pub fn expression(input: &mut TokenStream) -> ModalResult<Spanned<Expr>> {
    precedence(
        PREC_INIT,
        expression_operand,
        expression_prefix,
        expression_suffix,
        expression_infix,
        |op, child| {
            let span = op.1.start..child.1.end;
            Ok(Spanned(
                Expr::Unary {
                    op,
                    child: Box::new(child),
                },
                span,
            ))
        },
        |child, Spanned(negated, suffix_span)| {
            let span = child.1.start..suffix_span.end;
            Ok(Spanned(
                Expr::IsNull {
                    child: Box::new(child),
                    negated,
                },
                span,
            ))
        },
        |left, op, right| {
            let span = left.1.start..right.1.end;
            Ok(Spanned(
                Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ))
        },
    )
    .parse_next(input)
}

fn expression_operand(input: &mut TokenStream) -> ModalResult<Spanned<Expr>> {
    dispatch! {peek(any);
        TokenKind::LeftParen => parenthesized_expression,
        kind if kind.is_prefix_of_literal() => literal.map_inner(Expr::Literal),
        kind if kind.is_prefix_of_identifier() => element_or_call,
        _ => fail,
    }
    .parse_next(input)
}

fn parenthesized_expression(input: &mut TokenStream) -> ModalResult<Spanned<Expr>> {
    delimited(
        TokenKind::LeftParen,
        expression,
        cut_err(TokenKind::RightParen),
    )
    .map(|inner| Expr::Nested(Box::new(inner)))
    .spanned()
    .parse_next(input)
}

fn element_or_call(input: &mut TokenStream) -> ModalResult<Spanned<Expr>> {
    (
        element_ref,
        opt(delimited(
            TokenKind::LeftParen,
            separated(0.., expression, TokenKind::Comma),
            cut_err(TokenKind::RightParen),
        )),
    )
        .map(
            |(name, args): (Spanned<ElementRef>, Option<Vec<_>>)| match args {
                Some(args) => Expr::Call { name, args },
                None => Expr::Element(name.0),
            },
        )
        .spanned()
        .parse_next(input)
}
