use plsql_parser::ast::{Expr, ParameterDirection, ProcedureDef};
use plsql_parser::span::Spanned;
use smol_str::SmolStr;
use tracing::debug;

use super::Emitter;
use crate::artifact::MethodParam;
use crate::error::{ScopeError, TranslateResult};
use crate::ir::ValueType;
use crate::scope::{Scope, Variable, VariableRole};

/// The result of the declarations pass.
#[derive(Debug)]
pub(super) struct Declarations<'p> {
    pub(super) output: MethodParam,
    pub(super) inputs: Vec<MethodParam>,
    /// Constants and locals in declaration order.
    pub(super) variables: Vec<DeclaredVariable<'p>>,
}

#[derive(Debug)]
pub(super) struct DeclaredVariable<'p> {
    pub(super) name: SmolStr,
    pub(super) ty: ValueType,
    pub(super) constant: bool,
    pub(super) default: Option<&'p Spanned<Expr>>,
}

impl Emitter<'_> {
    pub(super) fn declare<'p>(
        &self,
        procedure: &'p ProcedureDef,
        scope: &mut Scope,
    ) -> TranslateResult<Declarations<'p>> {
        let name = procedure.name.value();
        if let Some(end_name) = procedure
            .end_name
            .as_ref()
            .filter(|end_name| !end_name.value().eq_ignore_ascii_case(name))
        {
            return Err(ScopeError::MismatchedEnd {
                name: name.clone(),
                end_name: end_name.value().clone(),
            }
            .into());
        }

        let mut output = None;
        let mut inputs = Vec::with_capacity(procedure.parameters.len());
        for parameter in &procedure.parameters {
            let parameter = parameter.value();
            let role = match parameter.mode.direction {
                ParameterDirection::In => VariableRole::Input,
                ParameterDirection::Out => VariableRole::Output,
                ParameterDirection::InOut => VariableRole::InOut,
            };
            let category = self.types.translate(parameter.type_spec.value())?;
            let name = parameter.name.value().clone();
            scope.declare(name.clone(), Variable::Scalar {
                role,
                category: category.clone(),
            })?;
            let param = MethodParam {
                name,
                ty: category.value_type()?,
            };
            if role == VariableRole::Output {
                output = Some(param);
            } else {
                inputs.push(param);
            }
        }
        let output = output.ok_or_else(|| ScopeError::MissingOutputParam(name.clone()))?;

        let mut variables = Vec::with_capacity(procedure.declarations.len());
        for declaration in &procedure.declarations {
            let declaration = declaration.value();
            let role = if declaration.constant {
                VariableRole::Constant
            } else {
                VariableRole::Local
            };
            let category = self.types.translate(declaration.type_spec.value())?;
            let name = declaration.name.value().clone();
            scope.declare(name.clone(), Variable::Scalar {
                role,
                category: category.clone(),
            })?;
            variables.push(DeclaredVariable {
                name,
                ty: category.value_type()?,
                constant: declaration.constant,
                default: declaration.default.as_ref(),
            });
        }

        debug!(
            inputs = inputs.len(),
            variables = variables.len(),
            output = %output.name,
            "declared variables"
        );
        Ok(Declarations {
            output,
            inputs,
            variables,
        })
    }
}
