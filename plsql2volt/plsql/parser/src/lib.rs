//! A parser for the subset of PL/SQL that can be translated into VoltDB stored procedures.
//!
//! The entry point is [`parse_plsql`], or [`ParseOptions::parse`] for a configured parser.

#[macro_use(apply)]
extern crate macro_rules_attribute;

pub mod ast;
pub mod error;
mod lexer;
mod macros;
mod parser;
pub mod span;

pub use parser::{ParseOptions, parse_plsql};
