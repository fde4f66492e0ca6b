use winnow::Parser;
use winnow::stream::{Location, Stream};

use crate::span::Spanned;

/// Extension methods for producing [`Spanned`] values from parsers.
pub(super) trait SpannedParserExt<I, O, E>: Parser<I, O, E> + Sized
where
    I: Stream + Location,
{
    /// Wraps the output in [`Spanned`], recording the byte range of the consumed tokens.
    #[inline(always)]
    fn spanned(self) -> impl Parser<I, Spanned<O>, E> {
        self.with_span().map(|(value, span)| Spanned(value, span))
    }
}

impl<I, O, E, P> SpannedParserExt<I, O, E> for P
where
    P: Parser<I, O, E>,
    I: Stream + Location,
{
}

/// Extension methods for parsers that already produce [`Spanned`] values.
pub(super) trait SpannedMapExt<I, T, E>: Parser<I, Spanned<T>, E> + Sized {
    /// Maps the inner value and keeps the span.
    #[inline(always)]
    fn map_inner<F, U>(self, mut f: F) -> impl Parser<I, Spanned<U>, E>
    where
        F: FnMut(T) -> U,
    {
        self.map(move |Spanned(value, span)| Spanned(f(value), span))
    }
}

impl<I, T, E, P> SpannedMapExt<I, T, E> for P where P: Parser<I, Spanned<T>, E> {}

#[cfg(test)]
macro_rules! parse {
    ($parser:expr, $input:expr) => {{
        crate::parser::token::tokenize($input)
            .ok()
            .and_then(|tokenized| {
                let stream = crate::parser::token::build_token_stream(&tokenized.tokens);
                winnow::Parser::parse(&mut $parser, stream).ok()
            })
    }};
}

#[cfg(test)]
pub(super) use parse;
