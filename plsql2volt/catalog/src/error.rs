use miette::Diagnostic;
use smol_str::SmolStr;
use sqlparser::parser::ParserError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to parse sql")]
    #[diagnostic(code(catalog::sql))]
    Sql(#[from] ParserError),

    #[error("table not found: {0}")]
    #[diagnostic(code(catalog::table_not_found))]
    TableNotFound(SmolStr),

    #[error("duplicate table: {0}")]
    #[diagnostic(code(catalog::duplicate_table))]
    DuplicateTable(SmolStr),

    #[error(
        "column not found: {}{column}",
        table.as_ref().map(|table| format!("{table}.")).unwrap_or_default()
    )]
    #[diagnostic(code(catalog::column_not_found))]
    ColumnNotFound {
        table: Option<SmolStr>,
        column: SmolStr,
    },

    #[error("ambiguous column reference: {0}")]
    #[diagnostic(
        code(catalog::ambiguous_column),
        help("qualify the column with its table name or alias")
    )]
    AmbiguousColumn(SmolStr),

    #[error("unsupported column type: {0}")]
    #[diagnostic(code(catalog::unsupported_type))]
    UnsupportedType(String),

    #[error("cannot derive the type of select item: {0}")]
    #[diagnostic(code(catalog::unsupported_expression))]
    UnsupportedExpression(String),

    #[error("unsupported statement: {0}")]
    #[diagnostic(code(catalog::unsupported_statement))]
    UnsupportedStatement(String),

    #[error("expected exactly one statement, found {0}")]
    #[diagnostic(code(catalog::statement_count))]
    StatementCount(usize),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
