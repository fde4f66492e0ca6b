//! Spanned abstract syntax tree of a PL/SQL source file.

mod expression;
mod lexical;
mod procedure;
mod statement;

pub use expression::*;
pub use lexical::*;
pub use procedure::*;
pub use statement::*;
