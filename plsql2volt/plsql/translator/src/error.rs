use std::ops::Range;

use miette::Diagnostic;
use plsql2volt_catalog::error::CatalogError;
use plsql2volt_common::error::NotImplemented;
use smol_str::SmolStr;
use thiserror::Error;

/// Violations of the declaration rules of a procedure.
#[derive(Debug, Error, Diagnostic)]
pub enum ScopeError {
    #[error("parameter {0} is declared IN OUT, which is not supported")]
    #[diagnostic(
        code(translate::unsupported_param),
        help("split it into an IN parameter and the OUT parameter")
    )]
    UnsupportedParam(SmolStr),

    #[error("procedure declares more than one OUT parameter: {0}")]
    #[diagnostic(
        code(translate::duplicate_output_param),
        help("a VoltDB procedure returns exactly one value")
    )]
    DuplicateOutputParam(SmolStr),

    #[error("procedure {0} has no OUT parameter")]
    #[diagnostic(code(translate::missing_output_param))]
    MissingOutputParam(SmolStr),

    #[error("variable {0} is declared more than once")]
    #[diagnostic(code(translate::duplicate_variable))]
    DuplicateVariable(SmolStr),

    #[error("procedure {name} ends with a different name: {end_name}")]
    #[diagnostic(code(translate::mismatched_end))]
    MismatchedEnd { name: SmolStr, end_name: SmolStr },
}

/// Failures while analyzing an embedded SQL statement.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalysisError {
    #[error("cannot resolve the result of statement: {statement}")]
    #[diagnostic(code(translate::plan))]
    Plan {
        statement: String,
        #[source]
        #[diagnostic_source]
        source: CatalogError,
    },

    #[error("SELECT statement has no INTO clause: {statement}")]
    #[diagnostic(
        code(translate::missing_into),
        help("only SELECT ... INTO and cursor FOR loops can consume query results")
    )]
    MissingInto { statement: String },

    #[error("INTO target {0} is not a declared variable")]
    #[diagnostic(code(translate::unknown_target))]
    UnknownTarget(SmolStr),

    #[error("statement binds {bindings} variables but produces {columns} columns: {statement}")]
    #[diagnostic(code(translate::binding_count))]
    BindingCount {
        statement: String,
        bindings: usize,
        columns: usize,
    },
}

/// Failures while mapping a type onto the target type system.
#[derive(Debug, Error, Diagnostic)]
pub enum TypeError {
    #[error("type {0} has no translation")]
    #[diagnostic(
        code(translate::unrecognized_type),
        help("only string-like and integer-like types are translated")
    )]
    Unrecognized(SmolStr),

    #[error("cannot resolve column type {table}.{column}")]
    #[diagnostic(code(translate::column_type))]
    Column {
        table: SmolStr,
        column: SmolStr,
        #[source]
        #[diagnostic_source]
        source: CatalogError,
    },
}

#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scope(#[from] ScopeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("row {row} has no field {field}")]
    #[diagnostic(code(translate::unknown_field))]
    UnknownField { row: SmolStr, field: SmolStr },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NotImplemented(#[from] NotImplemented),

    #[error("edit {span:?} overlaps a previous edit or lies outside {bounds:?}")]
    #[diagnostic(code(translate::overlapping_edits))]
    OverlappingEdits {
        span: Range<usize>,
        bounds: Range<usize>,
    },
}

pub type TranslateResult<T> = std::result::Result<T, TranslateError>;
