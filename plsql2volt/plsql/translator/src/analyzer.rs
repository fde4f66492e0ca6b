//! Analysis of embedded SQL statements.
//!
//! A statement is rewritten for execution by the engine: its `INTO` clause is removed, every
//! variable it reads becomes a `?` placeholder and comments inside it are dropped. The rewritten
//! text of a query is then resolved against the schema to learn its result columns.

use std::ops::Range;

use plsql2volt_catalog::provider::SchemaProvider;
use plsql2volt_common::data_type::ResultSchema;
use plsql_parser::ast::{Comment, SqlKind, SqlStatement};
use plsql_parser::span::Spanned;
use serde::Serialize;
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{AnalysisError, TranslateResult};
use crate::rewrite::EditList;
use crate::scope::{Scope, Variable};
use crate::types::TypeCategory;

pub const BIND_PLACEHOLDER: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedStatement {
    /// The statement text as it is sent to the engine.
    pub text: String,
    /// Variables bound to the placeholders of `text`, in placeholder order.
    pub input_bindings: Vec<SmolStr>,
    /// Targets of the `INTO` clause, in declared order.
    pub output_bindings: Vec<SmolStr>,
    /// Result columns. Empty for statements that do not produce rows.
    pub schema: ResultSchema,
    /// The leading keyword in lowercase, used to name the statement.
    pub prefix: SmolStr,
}

impl AnalyzedStatement {
    /// Returns `true` if the result is exactly one column of an integer type.
    pub fn produces_single_integer_column(&self) -> bool {
        match self.schema.columns() {
            [column] => TypeCategory::from_engine_type(column.ty()).is_integer(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SqlAnalyzer<'a> {
    source: &'a str,
    schema: &'a dyn SchemaProvider,
    comments: &'a [Spanned<Comment>],
}

impl<'a> SqlAnalyzer<'a> {
    /// `comments` are the comments of `source` in source order.
    pub fn new(
        source: &'a str,
        schema: &'a dyn SchemaProvider,
        comments: &'a [Spanned<Comment>],
    ) -> Self {
        Self {
            source,
            schema,
            comments,
        }
    }

    /// Analyzes the statement covering `span` of the source.
    ///
    /// # Errors
    /// Returns [`AnalysisError::Plan`] if a query cannot be resolved against the schema.
    pub fn analyze(
        &self,
        statement: &SqlStatement,
        span: Range<usize>,
        scope: &Scope,
    ) -> TranslateResult<AnalyzedStatement> {
        let mut edits = EditList::new(span.clone());

        let mut output_bindings = Vec::new();
        if let Some(into_clause) = &statement.into_clause {
            let into_span = into_clause.span();
            let trailing_blanks = self
                .source
                .get(into_span.end..span.end)
                .map_or(0, |rest| rest.len() - rest.trim_start_matches([' ', '\t']).len());
            edits.delete(into_span.start..into_span.end + trailing_blanks)?;
            output_bindings.extend(
                into_clause
                    .value()
                    .targets
                    .iter()
                    .map(|target| target.value().clone()),
            );
        }

        let mut input_bindings = Vec::new();
        for reference in &statement.references {
            let Some(name) = reference.value().as_simple() else {
                continue;
            };
            if scope.lookup(name.value()).is_some_and(Variable::is_scalar) {
                edits.replace(reference.span(), BIND_PLACEHOLDER)?;
                input_bindings.push(name.value().clone());
            }
        }

        let first = self
            .comments
            .partition_point(|comment| comment.span().start < span.start);
        for comment in self.comments[first..]
            .iter()
            .take_while(|comment| comment.span().end <= span.end)
        {
            edits.replace(comment.span(), " ")?;
        }

        let text = edits.apply(self.source);
        let prefix = naming_prefix(self.source.get(span).unwrap_or_default());
        let schema = match statement.kind {
            SqlKind::Select => self
                .schema
                .resolve_statement(&text)
                .map_err(|source| AnalysisError::Plan {
                    statement: text.clone(),
                    source,
                })?,
            SqlKind::Insert | SqlKind::Update | SqlKind::Upsert | SqlKind::Delete => {
                ResultSchema::default()
            }
        };
        debug!(%prefix, %schema, bindings = input_bindings.len(), "analyzed statement");

        Ok(AnalyzedStatement {
            text,
            input_bindings,
            output_bindings,
            schema,
            prefix,
        })
    }
}

/// Returns the first word of `text` that follows any opening parentheses, in lowercase.
fn naming_prefix(text: &str) -> SmolStr {
    text.trim_start_matches(|c: char| c == '(' || c.is_whitespace())
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
        .into()
}
