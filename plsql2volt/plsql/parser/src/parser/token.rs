use std::ops::Range;

use logos::Logos;
use winnow::Parser;
use winnow::error::ParserError;
use winnow::stream::{ContainsToken, Location, Stream, StreamIsPartial, TokenSlice};

use crate::ast::{Comment, CommentKind};
use crate::error::Error;
use crate::lexer::TokenKind;
use crate::span::{Spanned, VecSpanned};

/// A wrapper around [`winnow::token::any`] to return [`TokenKind`] directly.
///
/// If the matched slice is needed, use [`winnow::token::any`] instead.
#[inline(always)]
pub(super) fn any<'a: 'b, 'b, I, E>(input: &mut I) -> Result<&'b TokenKind<'a>, E>
where
    I: Stream<Token = &'b Token<'a>> + StreamIsPartial,
    E: ParserError<I>,
{
    winnow::token::any
        .map(|t: &Token| &t.kind)
        .parse_next(input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token<'a> {
    pub(super) kind: TokenKind<'a>,
    pub(super) slice: &'a str,
    pub(super) span: Range<usize>,
}

impl<'a> ContainsToken<&Token<'a>> for TokenKind<'a> {
    #[inline(always)]
    fn contains_token(&self, token: &Token<'a>) -> bool {
        token.kind.eq(self)
    }
}

impl<'a, 'b, I, E> Parser<I, I::Token, E> for TokenKind<'a>
where
    I: Stream<Token = &'b Token<'a>> + StreamIsPartial,
    E: ParserError<I>,
{
    #[inline(always)]
    fn parse_next(&mut self, i: &mut I) -> Result<I::Token, E> {
        winnow::token::any
            .verify(|t: &Token| t.kind.eq(self))
            .parse_next(i)
    }
}

impl Location for Token<'_> {
    #[inline(always)]
    fn previous_token_end(&self) -> usize {
        self.span.end
    }

    #[inline(always)]
    fn current_token_start(&self) -> usize {
        self.span.start
    }
}

pub(super) type TokenStream<'a, 'b> = TokenSlice<'b, Token<'a>>;

/// The tokens of a source text, with comments split off.
pub(super) struct Tokenized<'a> {
    pub(super) tokens: Vec<Token<'a>>,
    pub(super) comments: VecSpanned<Comment>,
}

pub(super) fn tokenize(input: &str) -> Result<Tokenized<'_>, Error> {
    let mut lexer = TokenKind::lexer(input).spanned();
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    while let Some((kind, span)) = lexer.next() {
        match kind {
            Ok(TokenKind::LineComment(text)) => comments.push(Spanned(
                Comment {
                    kind: CommentKind::Line,
                    text: text.into(),
                },
                span,
            )),
            Ok(TokenKind::BlockComment(text)) => comments.push(Spanned(
                Comment {
                    kind: CommentKind::Block,
                    text: text.into(),
                },
                span,
            )),
            Ok(kind) => {
                let slice = lexer.slice();
                tokens.push(Token { kind, slice, span });
            }
            Err(e) => return Err(Error::from_token_error(input, e, span)),
        }
    }
    Ok(Tokenized { tokens, comments })
}

pub(super) fn build_token_stream<'a, 'b>(input: &'b [Token<'a>]) -> TokenStream<'a, 'b> {
    TokenSlice::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_comments() {
        let Tokenized { tokens, comments } =
            tokenize("x := 1; -- set x\n/* done */ return;").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::Identifier("x"),
            TokenKind::Assign,
            TokenKind::UnsignedInteger("1"),
            TokenKind::Semicolon,
            TokenKind::Return,
            TokenKind::Semicolon
        ]);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].span(), 8..16);
        assert_eq!(comments[1].value().kind, CommentKind::Block);
        assert_eq!(tokens[4].slice, "return");
    }

    #[test]
    fn test_tokenize_error_position() {
        let error = tokenize("begin\n  x := @;").err().unwrap();
        assert_eq!(
            error.to_string(),
            "syntax error at or near line 2, column 8: invalid token \"@\""
        );
    }
}
