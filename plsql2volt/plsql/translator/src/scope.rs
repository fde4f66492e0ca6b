//! Variables visible while translating a procedure.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use plsql2volt_common::data_type::ResultSchema;
use serde::Serialize;
use smol_str::SmolStr;

use crate::error::ScopeError;
use crate::types::TypeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariableRole {
    Input,
    Output,
    InOut,
    Constant,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Variable {
    Scalar {
        role: VariableRole,
        category: TypeCategory,
    },
    /// The current row of a cursor loop.
    Row { schema: ResultSchema },
}

impl Variable {
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    #[inline]
    pub fn schema(&self) -> Option<&ResultSchema> {
        match self {
            Self::Row { schema } => Some(schema),
            Self::Scalar { .. } => None,
        }
    }
}

/// A global layer of parameters, constants and locals, plus a stack of cursor loop rows.
///
/// Names are matched exactly, as they are emitted verbatim into Java.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    globals: HashMap<SmolStr, Variable>,
    output: Option<SmolStr>,
    loop_rows: Vec<(SmolStr, Variable)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable to the global layer.
    ///
    /// # Errors
    /// Fails for IN OUT parameters, a second OUT parameter and names that are already declared.
    pub fn declare(&mut self, name: impl Into<SmolStr>, variable: Variable) -> Result<(), ScopeError> {
        let name = name.into();
        match &variable {
            Variable::Scalar {
                role: VariableRole::InOut,
                ..
            } => return Err(ScopeError::UnsupportedParam(name)),
            Variable::Scalar {
                role: VariableRole::Output,
                ..
            } => {
                if self.output.is_some() {
                    return Err(ScopeError::DuplicateOutputParam(name));
                }
            }
            _ => {}
        }
        match self.globals.entry(name.clone()) {
            Entry::Occupied(_) => Err(ScopeError::DuplicateVariable(name)),
            Entry::Vacant(entry) => {
                if matches!(
                    variable,
                    Variable::Scalar {
                        role: VariableRole::Output,
                        ..
                    }
                ) {
                    self.output = Some(name);
                }
                entry.insert(variable);
                Ok(())
            }
        }
    }

    /// Looks up `name`, innermost loop row first.
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.loop_rows
            .iter()
            .rev()
            .find(|(row, _)| row == name)
            .map(|(_, variable)| variable)
            .or_else(|| self.globals.get(name))
    }

    /// Returns the name of the OUT parameter, if one has been declared.
    #[inline]
    pub fn output(&self) -> Option<&SmolStr> {
        self.output.as_ref()
    }

    pub fn push_loop_row(&mut self, name: impl Into<SmolStr>, schema: ResultSchema) {
        self.loop_rows.push((name.into(), Variable::Row { schema }));
    }

    pub fn pop_loop_row(&mut self) -> Option<SmolStr> {
        self.loop_rows.pop().map(|(name, _)| name)
    }

    #[inline]
    pub fn loop_depth(&self) -> usize {
        self.loop_rows.len()
    }
}
