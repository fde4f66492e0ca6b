use plsql_parser::ast::ProcedureDef;
use smol_str::SmolStr;

use super::declare::Declarations;
use super::{Emitter, TranslationContext};
use crate::artifact::{ArtifactHeader, ConstantField, ProcedureArtifact, RunMethod};
use crate::error::TranslateResult;
use crate::formatter::ExpressionFormatter;
use crate::ir::{Block, IrStatement, ValueType};
use crate::target;

impl Emitter<'_> {
    /// Assembles the artifact from the results of both passes.
    pub(super) fn finalize(
        &self,
        procedure: &ProcedureDef,
        declarations: Declarations<'_>,
        context: TranslationContext,
        body: Block,
    ) -> TranslateResult<ProcedureArtifact> {
        let formatter = ExpressionFormatter::new(self.source, &context.scope);
        let Declarations {
            output,
            inputs,
            variables,
        } = declarations;

        let mut constants = Vec::new();
        let mut prologue = vec![
            IrStatement::VariableDecl {
                name: output.name.clone(),
                ty: output.ty,
                init: None,
            },
            IrStatement::VariableDecl {
                name: SmolStr::new_static(target::SCRATCH_TABLE),
                ty: ValueType::Table,
                init: None,
            },
        ];
        for variable in variables {
            let value = variable
                .default
                .map(|default| formatter.format(default))
                .transpose()?;
            if variable.constant {
                constants.push(ConstantField {
                    name: variable.name,
                    ty: variable.ty,
                    value,
                });
            } else {
                prologue.push(IrStatement::VariableDecl {
                    name: variable.name,
                    ty: variable.ty,
                    init: value,
                });
            }
        }

        let class_name = procedure.name.value().clone();
        let header = ArtifactHeader {
            file_name: format!("{class_name}.{}", target::FILE_EXTENSION),
            class_name,
            package: self.options.package.clone(),
            generated_at: self.options.generated_at.clone(),
        };
        Ok(ProcedureArtifact {
            header,
            constants,
            method: RunMethod {
                return_type: output.ty,
                params: inputs,
                prologue,
                body,
            },
            statements: context.registry,
        })
    }
}
