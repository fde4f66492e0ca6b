use winnow::Parser;

use super::impls::source_file;
use super::token::{Tokenized, build_token_stream, tokenize};
use crate::ast::SourceFile;
use crate::error::Error;
use crate::span::Spanned;

/// Options which can be used to configure the behavior of the parser.
///
/// # Examples
/// ```
/// use plsql_parser::ParseOptions;
///
/// let file = ParseOptions::new()
///     .retain_comments(false)
///     .parse("-- nothing to see\n")
///     .unwrap();
/// assert!(file.value().comments.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    retain_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            retain_comments: true,
        }
    }
}

impl ParseOptions {
    /// Create a default set of parse options for configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether comments are kept in [`SourceFile::comments`].
    ///
    /// Comments never take part in parsing. If set to `true` (default), they are returned with
    /// their spans so that they can be carried over into generated code.
    pub fn retain_comments(&mut self, retain_comments: bool) -> &mut Self {
        self.retain_comments = retain_comments;
        self
    }

    /// Parses `source` into a spanned abstract syntax tree with the options specified by `self`.
    ///
    /// The returned span always covers the whole input.
    ///
    /// # Errors
    /// This function will return an error if `source` is not valid in the supported PL/SQL
    /// subset.
    pub fn parse(&self, source: &str) -> Result<Spanned<SourceFile>, Error> {
        let Tokenized { tokens, comments } = tokenize(source)?;
        let stream = build_token_stream(&tokens);
        let mut file = source_file
            .parse(stream)
            .map_err(|e| match tokens.get(e.offset()) {
                Some(token) => Error::unexpected(source, token.span.clone()),
                None => Error::UnexpectedEof,
            })?;
        if self.retain_comments {
            file.comments = comments;
        }
        Ok(Spanned(file, 0..source.len()))
    }
}
