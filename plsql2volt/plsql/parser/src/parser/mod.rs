pub use options::ParseOptions;

use crate::ast::SourceFile;
use crate::error::Error;
use crate::span::Spanned;

mod impls;
mod options;
mod precedence;
mod token;
mod utils;

/// Parses a PL/SQL source file into a spanned abstract syntax tree with default options.
///
/// See [`ParseOptions`] for more information on how to configure the parser.
///
/// # Errors
///
/// This function will return an error if `source` is not valid in the supported PL/SQL subset.
/// The error will carry fancy diagnostics if feature `miette` is enabled.
///
/// # Examples
///
/// ```
/// # use plsql_parser::parse_plsql;
/// let file = parse_plsql("procedure p(r out integer) is begin r := 1; end;").unwrap();
/// assert_eq!(file.value().procedures.len(), 1);
/// ```
pub fn parse_plsql(source: &str) -> Result<Spanned<SourceFile>, Error> {
    ParseOptions::new().parse(source)
}
