use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::sync::Arc;

#[cfg(feature = "miette")]
use miette::Diagnostic;
use thiserror::Error;

/// Failure reported by the lexer for a single token.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenErrorKind {
    #[default]
    InvalidToken,
    IncompleteComment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum Error {
    #[error("syntax error: unexpected end of input")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(help("every procedure body must be closed with `END;`"))
    )]
    UnexpectedEof,

    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Syntax(SyntaxError),
}

/// What went wrong at the location carried by a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxErrorKind {
    Token(TokenErrorKind),
    Unexpected,
}

/// A syntax error anchored to a span of the procedure source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxError {
    source: Arc<str>,
    span: Range<usize>,
    location: Location,
    kind: SyntaxErrorKind,
}

impl SyntaxError {
    #[inline]
    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// Returns the 1-based line and column of the offending text.
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.location.line, self.location.column)
    }

    fn fragment(&self) -> &str {
        self.source.get(self.span.clone()).unwrap_or_default()
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at or near {}: ", self.location)?;
        match self.kind {
            SyntaxErrorKind::Token(TokenErrorKind::InvalidToken) => {
                write!(f, "invalid token \"{}\"", self.fragment())
            }
            SyntaxErrorKind::Token(TokenErrorKind::IncompleteComment) => {
                f.write_str("incomplete comment")
            }
            SyntaxErrorKind::Unexpected => write!(f, "unexpected \"{}\"", self.fragment()),
        }
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(feature = "miette")]
impl Diagnostic for SyntaxError {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let label = match self.kind {
            SyntaxErrorKind::Token(TokenErrorKind::InvalidToken) => "not a PL/SQL token",
            SyntaxErrorKind::Token(TokenErrorKind::IncompleteComment) => "comment starts here",
            SyntaxErrorKind::Unexpected => "unexpected token",
        };
        Some(Box::new(std::iter::once(
            miette::LabeledSpan::new_with_span(Some(label.into()), self.span.clone()),
        )))
    }
}

impl Error {
    pub fn unexpected(source: &str, span: Range<usize>) -> Self {
        Self::syntax(source, span, SyntaxErrorKind::Unexpected)
    }

    pub fn from_token_error(source: &str, kind: TokenErrorKind, span: Range<usize>) -> Self {
        Self::syntax(source, span, SyntaxErrorKind::Token(kind))
    }

    fn syntax(source: &str, span: Range<usize>, kind: SyntaxErrorKind) -> Self {
        Self::Syntax(SyntaxError {
            source: source.into(),
            location: Location::of(source, span.start),
            span,
            kind,
        })
    }

    /// Returns the lexer failure behind this error, if any.
    pub fn token_error(&self) -> Option<TokenErrorKind> {
        match self {
            Self::Syntax(SyntaxError {
                kind: SyntaxErrorKind::Token(kind),
                ..
            }) => Some(*kind),
            _ => None,
        }
    }
}

/// 1-based line and column within a source text. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Location {
    line: usize,
    column: usize,
}

impl Location {
    pub(crate) fn of(source: &str, offset: usize) -> Self {
        let head = source.get(..offset).unwrap_or(source);
        let (line, current) = head
            .split('\n')
            .enumerate()
            .last()
            .unwrap_or((0, head));
        Self {
            line: line + 1,
            column: current.chars().count() + 1,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
