use std::ops::Range;

use plsql2volt_common::error::not_implemented;
use plsql_parser::ast::{
    Assignment, Comment, CommentKind, CursorLoop, IfStatement, ReturnStatement, SqlKind,
    SqlStatement, Statement, StatementBlock,
};
use plsql_parser::span::Spanned;
use smol_str::SmolStr;
use tracing::debug;

use super::{Emitter, TranslationContext};
use crate::error::{AnalysisError, TranslateResult};
use crate::formatter::ExpressionFormatter;
use crate::ir::{Block, FetchTarget, IrStatement, ValueType};
use crate::scope::Variable;
use crate::target;
use crate::types::TypeCategory;

impl Emitter<'_> {
    /// Lowers the procedure body, making sure it ends with a return of the output variable.
    pub(super) fn lower_body(
        &self,
        context: &mut TranslationContext,
        body: &Spanned<StatementBlock>,
    ) -> TranslateResult<Block> {
        let mut block = self.lower_block(context, body)?;
        if !block.ends_with_return() {
            block.push(IrStatement::Return {
                value: context.output.clone(),
            });
        }
        Ok(block)
    }

    fn lower_block(
        &self,
        context: &mut TranslationContext,
        block: &Spanned<StatementBlock>,
    ) -> TranslateResult<Block> {
        context.open_block();
        let mut cursor = block.span().start;
        for statement in &block.value().statements {
            self.lower_comments(context, cursor..statement.span().start);
            self.lower_statement(context, statement)?;
            cursor = statement.span().end;
        }
        self.lower_comments(context, cursor..block.span().end);
        Ok(context.close_block())
    }

    fn lower_statement(
        &self,
        context: &mut TranslationContext,
        statement: &Spanned<Statement>,
    ) -> TranslateResult<()> {
        match statement.value() {
            Statement::Assignment(assignment) => self.lower_assignment(context, assignment),
            Statement::Return(return_statement) => self.lower_return(context, return_statement),
            Statement::If(if_statement) => self.lower_if(context, if_statement),
            Statement::CursorLoop(cursor_loop) => self.lower_cursor_loop(context, cursor_loop),
            Statement::Null => Ok(()),
            Statement::Block(nested) => {
                let block = self.lower_block(context, nested)?;
                context.emit(IrStatement::Block(block));
                Ok(())
            }
            Statement::Sql(sql) => self.lower_sql(context, sql, statement.span()),
        }
    }

    fn lower_assignment(
        &self,
        context: &mut TranslationContext,
        assignment: &Assignment,
    ) -> TranslateResult<()> {
        let value = ExpressionFormatter::new(self.source, &context.scope).format(&assignment.value)?;
        context.emit(IrStatement::Assignment {
            target: assignment.target.source_text(self.source).to_string(),
            value,
        });
        Ok(())
    }

    fn lower_return(
        &self,
        context: &mut TranslationContext,
        return_statement: &ReturnStatement,
    ) -> TranslateResult<()> {
        if return_statement.value.is_some() {
            return not_implemented(
                "RETURN with a value",
                Some("assign the result to an OUT parameter and use a bare RETURN"),
            );
        }
        let value = context.output.clone();
        context.emit(IrStatement::Return { value });
        Ok(())
    }

    fn lower_if(
        &self,
        context: &mut TranslationContext,
        if_statement: &IfStatement,
    ) -> TranslateResult<()> {
        if !if_statement.elsif_branches.is_empty() {
            return not_implemented(
                "ELSIF branch",
                Some("nest another IF statement inside the THEN block"),
            );
        }
        if if_statement.else_block.is_some() {
            return not_implemented(
                "ELSE branch",
                Some("use a second IF statement with the negated condition"),
            );
        }
        let then_block = self.lower_block(context, &if_statement.then_block)?;
        let condition =
            ExpressionFormatter::new(self.source, &context.scope).format(&if_statement.condition)?;
        context.emit(IrStatement::IfThen {
            condition,
            then_block,
        });
        Ok(())
    }

    fn lower_cursor_loop(
        &self,
        context: &mut TranslationContext,
        cursor_loop: &CursorLoop,
    ) -> TranslateResult<()> {
        let query = &cursor_loop.query;
        let analyzed = self
            .analyzer
            .analyze(query.value(), query.span(), &context.scope)?;
        let row = cursor_loop.record.value().clone();

        context.scope.push_loop_row(row.clone(), analyzed.schema.clone());
        let body = self.lower_block(context, &cursor_loop.body);
        context.scope.pop_loop_row();
        let body = body?;

        let name = context.registry.register(&analyzed);
        debug!(%name, %row, "registered cursor loop statement");
        context.emit(IrStatement::VariableDecl {
            name: row.clone(),
            ty: ValueType::Table,
            init: None,
        });
        context.emit(IrStatement::QueueStatement {
            statement: name,
            bindings: analyzed.input_bindings,
        });
        context.emit(IrStatement::ExecuteAndFetch {
            target: Some(FetchTarget::Table(row.clone())),
        });
        context.emit(IrStatement::While { table: row, body });
        Ok(())
    }

    fn lower_sql(
        &self,
        context: &mut TranslationContext,
        statement: &SqlStatement,
        span: Range<usize>,
    ) -> TranslateResult<()> {
        if statement.kind == SqlKind::Select && statement.into_clause.is_none() {
            return Err(AnalysisError::MissingInto {
                statement: self.source.get(span).unwrap_or_default().to_string(),
            }
            .into());
        }
        let analyzed = self
            .analyzer
            .analyze(statement, span, &context.scope)?;

        let outputs = &analyzed.output_bindings;
        if let Some(target) = outputs
            .iter()
            .find(|target| !context.scope.lookup(target).is_some_and(Variable::is_scalar))
        {
            return Err(AnalysisError::UnknownTarget(target.clone()).into());
        }
        if !outputs.is_empty() && outputs.len() != analyzed.schema.len() {
            return Err(AnalysisError::BindingCount {
                statement: analyzed.text.clone(),
                bindings: outputs.len(),
                columns: analyzed.schema.len(),
            }
            .into());
        }

        let name = context.registry.register(&analyzed);
        debug!(%name, "registered statement");
        context.emit(IrStatement::QueueStatement {
            statement: name,
            bindings: analyzed.input_bindings.clone(),
        });
        match outputs.as_slice() {
            [] => context.emit(IrStatement::ExecuteAndFetch { target: None }),
            [target] if analyzed.produces_single_integer_column() => {
                context.emit(IrStatement::ExecuteAndFetch {
                    target: Some(FetchTarget::Scalar(target.clone())),
                });
            }
            targets => {
                let table = SmolStr::new_static(target::SCRATCH_TABLE);
                context.emit(IrStatement::ExecuteAndFetch {
                    target: Some(FetchTarget::Table(table.clone())),
                });
                context.emit(IrStatement::RowAdvance {
                    table: table.clone(),
                });
                for (column, (target, schema)) in
                    targets.iter().zip(analyzed.schema.columns()).enumerate()
                {
                    let ty = TypeCategory::from_engine_type(schema.ty()).value_type()?;
                    context.emit(IrStatement::FieldAssign {
                        target: target.clone(),
                        table: table.clone(),
                        column,
                        ty,
                    });
                }
            }
        }
        Ok(())
    }

    /// Emits the comments lying completely inside `range`.
    fn lower_comments(&self, context: &mut TranslationContext, range: Range<usize>) {
        if !self.options.preserve_comments {
            return;
        }
        let first = self
            .comments
            .partition_point(|comment| comment.span().start < range.start);
        for comment in self.comments[first..]
            .iter()
            .take_while(|comment| comment.span().end <= range.end)
        {
            let lines = comment_lines(comment.value());
            if !lines.is_empty() {
                context.emit(IrStatement::Comment { lines });
            }
        }
    }
}

/// Returns the text of a comment without its markers, one entry per non-blank line.
fn comment_lines(comment: &Comment) -> Vec<String> {
    match comment.kind {
        CommentKind::Line => vec![comment.text.trim_start_matches('-').trim().to_string()],
        CommentKind::Block => {
            let text = comment.text.as_str();
            let inner = text
                .strip_prefix("/*")
                .and_then(|text| text.strip_suffix("*/"))
                .unwrap_or(text);
            inner
                .lines()
                .map(|line| line.trim().trim_start_matches('*').trim())
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}
