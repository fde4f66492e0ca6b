//! Translation of PL/SQL source files into VoltDB stored procedures.
//!
//! A [`Project`] owns the schema loaded from a DDL script and translates source files against
//! it, one generated class per procedure.

mod config;
mod error;
mod project;
mod report;

pub use config::TranslatorConfig;
pub use error::{Error, Result};
pub use project::{Project, TranslatedProcedure};
pub use report::{FileReport, ProcedureOutcome, TranslationMetrics};
