//! The finalized translation of one procedure.

use serde::Serialize;
use smol_str::SmolStr;

use crate::ir::{Block, IrStatement, ValueType};
use crate::registry::StatementRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureArtifact {
    pub header: ArtifactHeader,
    pub constants: Vec<ConstantField>,
    pub method: RunMethod,
    pub statements: StatementRegistry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactHeader {
    pub class_name: SmolStr,
    pub file_name: String,
    pub package: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantField {
    pub name: SmolStr,
    pub ty: ValueType,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodParam {
    pub name: SmolStr,
    pub ty: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMethod {
    pub return_type: ValueType,
    pub params: Vec<MethodParam>,
    /// Declarations of the output variable, the scratch table and the locals.
    pub prologue: Vec<IrStatement>,
    pub body: Block,
}
