//! Rewriting of PL/SQL expressions into Java expressions.
//!
//! Rewriting works on the source text: only the spans of recognized constructs are replaced and
//! everything else, including whitespace, is copied verbatim.

use plsql_parser::ast::{BinaryOp, ElementRef, Expr, Literal, UnaryOp};
use plsql_parser::span::Spanned;

use crate::error::{TranslateError, TranslateResult};
use crate::rewrite::EditList;
use crate::scope::{Scope, Variable};
use crate::target;
use crate::types::TypeCategory;

#[derive(Debug, Clone, Copy)]
pub struct ExpressionFormatter<'a> {
    source: &'a str,
    scope: &'a Scope,
}

impl<'a> ExpressionFormatter<'a> {
    pub fn new(source: &'a str, scope: &'a Scope) -> Self {
        Self { source, scope }
    }

    /// Returns the Java text of `expr`.
    ///
    /// # Errors
    /// Fails with [`TranslateError::UnknownField`] if a field of a loop row does not name a
    /// column of the row, and with a type error if the column has no Java type.
    pub fn format(&self, expr: &Spanned<Expr>) -> TranslateResult<String> {
        let mut edits = EditList::new(expr.span());
        self.collect_edits(expr, &mut edits)?;
        Ok(edits.apply(self.source))
    }

    fn collect_edits(&self, expr: &Spanned<Expr>, edits: &mut EditList) -> TranslateResult<()> {
        match expr.value() {
            Expr::Binary { op, left, right } => {
                self.collect_edits(left, edits)?;
                if let Some(replacement) = binary_operator(op.0) {
                    edits.replace(op.span(), replacement)?;
                }
                self.collect_edits(right, edits)
            }
            Expr::Unary { op, child } => {
                if op.0 == UnaryOp::Not {
                    edits.replace(op.span(), target::NOT)?;
                }
                self.collect_edits(child, edits)
            }
            Expr::IsNull { child, .. } => self.collect_edits(child, edits),
            Expr::Literal(Literal::String(quoted)) => {
                let inner = quoted
                    .strip_prefix('\'')
                    .and_then(|quoted| quoted.strip_suffix('\''))
                    .unwrap_or(quoted);
                edits.replace(expr.span(), target::string_literal(inner))
            }
            Expr::Literal(_) => Ok(()),
            Expr::Element(element) => self.collect_field_access(element, edits),
            Expr::Call { name, args } => {
                self.collect_field_access(name.value(), edits)?;
                args.iter()
                    .try_for_each(|arg| self.collect_edits(arg, edits))
            }
            Expr::Nested(inner) => self.collect_edits(inner, edits),
        }
    }

    /// Rewrites `row.field` into a typed getter if `row` is a loop row.
    fn collect_field_access(&self, element: &ElementRef, edits: &mut EditList) -> TranslateResult<()> {
        let [base, field] = element.parts.as_slice() else {
            return Ok(());
        };
        let Some(Variable::Row { schema }) = self.scope.lookup(base.value()) else {
            return Ok(());
        };
        let unknown_field = || TranslateError::UnknownField {
            row: base.value().clone(),
            field: field.value().clone(),
        };
        let index = schema.position_of(field.value()).ok_or_else(unknown_field)?;
        let column = schema.get(index).ok_or_else(unknown_field)?;
        let ty = TypeCategory::from_engine_type(column.ty()).value_type()?;
        edits.replace(field.span(), target::accessor(ty, index))
    }
}

fn binary_operator(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Eq => Some(target::EQUALS),
        BinaryOp::Ne => Some(target::NOT_EQUALS),
        BinaryOp::Le => Some(target::LESS_THAN_OR_EQUALS),
        BinaryOp::Ge => Some(target::GREATER_THAN_OR_EQUALS),
        BinaryOp::And => Some(target::AND),
        BinaryOp::Or => Some(target::OR),
        BinaryOp::Concat => Some(target::CONCAT),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            None
        }
    }
}
