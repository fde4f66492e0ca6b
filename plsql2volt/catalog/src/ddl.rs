//! Loading of table definitions from a VoltDB DDL script.
//!
//! Only `CREATE TABLE` statements contribute to the schema. Everything else a DDL script usually
//! carries (indexes, partitioning, procedure declarations, views) is skipped. `sqlcmd` directives
//! such as `file -inlinebatch END_OF_BATCH` are removed together with the delimiter lines they
//! declare before the script is split into statements.

use plsql2volt_common::data_type::{ColumnSchema, EngineType};
use smol_str::SmolStr;
use sqlparser::ast::{ColumnDef, CreateTable, ObjectName, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::memory::{MemorySchemaCatalog, MemoryTableCatalog};

/// Builds an in-memory schema from the text of a DDL script.
pub fn load(ddl: &str) -> CatalogResult<MemorySchemaCatalog> {
    let mut catalog = MemorySchemaCatalog::new();
    for statement in split_statements(&strip_directives(ddl)) {
        if !is_create_table(&statement) {
            debug!(statement = %first_line(&statement), "skipping ddl statement");
            continue;
        }
        for parsed in Parser::parse_sql(&GenericDialect {}, &statement)? {
            if let Statement::CreateTable(create) = parsed {
                let table = build_table(&create)?;
                debug!(table = %table_name(&create.name), "loaded table");
                catalog.add_table(table)?;
            }
        }
    }
    Ok(catalog)
}

/// Maps a declared SQL column type such as `VARCHAR(32)` or `DOUBLE PRECISION` to an engine type.
pub fn parse_engine_type(declared: &str) -> CatalogResult<EngineType> {
    let base = declared
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    base.parse()
        .map_err(|_| CatalogError::UnsupportedType(declared.to_string()))
}

pub(crate) fn table_name(name: &ObjectName) -> SmolStr {
    let text = name.to_string();
    let last = text.rsplit('.').next().unwrap_or(&text);
    last.trim_matches(|c| c == '"' || c == '`').into()
}

fn build_table(create: &CreateTable) -> CatalogResult<MemoryTableCatalog> {
    let mut table = MemoryTableCatalog::new(table_name(&create.name));
    for ColumnDef {
        name, data_type, ..
    } in &create.columns
    {
        let ty = parse_engine_type(&data_type.to_string())?;
        table.add_column(ColumnSchema::new(name.value.as_str(), ty))?;
    }
    Ok(table)
}

fn is_create_table(statement: &str) -> bool {
    let mut words = statement.split_whitespace();
    matches!(
        (words.next(), words.next()),
        (Some(create), Some(table))
            if create.eq_ignore_ascii_case("create") && table.eq_ignore_ascii_case("table")
    )
}

fn first_line(statement: &str) -> &str {
    statement.lines().next().unwrap_or_default()
}

/// Removes `file` directives and the batch delimiter lines declared by `file -inlinebatch`.
fn strip_directives(ddl: &str) -> String {
    let mut delimiters: Vec<&str> = Vec::new();
    let mut kept = String::with_capacity(ddl.len());
    for line in ddl.lines() {
        let trimmed = line.trim();
        let mut words = trimmed.split_whitespace();
        if words
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("file"))
        {
            if let (Some(flag), Some(delimiter)) = (words.next(), words.next())
                && flag.eq_ignore_ascii_case("-inlinebatch")
            {
                delimiters.push(delimiter.trim_end_matches(';'));
            }
            continue;
        }
        if delimiters.contains(&trimmed.trim_end_matches(';')) {
            continue;
        }
        kept.push_str(line);
        kept.push('\n');
    }
    kept
}

/// Splits a script on `;`, dropping comments and honouring quoted text.
fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = script.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                current.push(c);
                for inner in chars.by_ref() {
                    current.push(inner);
                    if inner == c {
                        break;
                    }
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for inner in chars.by_ref() {
                    if previous == '*' && inner == '/' {
                        break;
                    }
                    previous = inner;
                }
                current.push(' ');
            }
            ';' => {
                push_statement(&mut statements, &mut current);
            }
            _ => current.push(c),
        }
    }
    push_statement(&mut statements, &mut current);
    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}
