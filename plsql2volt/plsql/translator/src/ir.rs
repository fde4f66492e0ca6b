//! Intermediate representation of a lowered procedure body.
//!
//! Expression and condition texts are already rewritten into the target syntax; everything else
//! is structural so that a renderer decides the concrete layout.

use serde::Serialize;
use smol_str::SmolStr;

/// Types of variables in the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueType {
    Integer,
    String,
    /// A tabular query result.
    Table,
}

/// Where an executed statement's first result goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchTarget {
    /// The single integer value of a one-row, one-column result.
    Scalar(SmolStr),
    /// The whole result table.
    Table(SmolStr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IrStatement {
    VariableDecl {
        name: SmolStr,
        ty: ValueType,
        init: Option<String>,
    },
    Assignment {
        target: String,
        value: String,
    },
    /// Returns the output variable.
    Return {
        value: SmolStr,
    },
    /// Queues a registered statement with its positional bindings.
    QueueStatement {
        statement: SmolStr,
        bindings: Vec<SmolStr>,
    },
    /// Executes the queued statements. Without a target the results are discarded.
    ExecuteAndFetch {
        target: Option<FetchTarget>,
    },
    RowAdvance {
        table: SmolStr,
    },
    /// Assigns column `column` of the current row of `table` to `target`.
    FieldAssign {
        target: SmolStr,
        table: SmolStr,
        column: usize,
        ty: ValueType,
    },
    IfThen {
        condition: String,
        then_block: Block,
    },
    /// Loops while `table` advances to another row.
    While {
        table: SmolStr,
        body: Block,
    },
    /// Comment text without markers, one entry per line.
    Comment {
        lines: Vec<String>,
    },
    Block(Block),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    statements: Vec<IrStatement>,
}

impl Block {
    #[inline]
    pub fn new(statements: Vec<IrStatement>) -> Self {
        Self { statements }
    }

    #[inline]
    pub fn statements(&self) -> &[IrStatement] {
        &self.statements
    }

    #[inline]
    pub fn push(&mut self, statement: IrStatement) {
        self.statements.push(statement);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns `true` if the last statement, ignoring comments, is a return or a nested block
    /// ending with one.
    pub fn ends_with_return(&self) -> bool {
        match self
            .statements
            .iter()
            .rev()
            .find(|statement| !matches!(statement, IrStatement::Comment { .. }))
        {
            Some(IrStatement::Return { .. }) => true,
            Some(IrStatement::Block(block)) => block.ends_with_return(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_with_return() {
        let mut block = Block::default();
        assert!(!block.ends_with_return());
        block.push(IrStatement::Return {
            value: "result".into(),
        });
        block.push(IrStatement::Comment {
            lines: vec!["done".into()],
        });
        assert!(block.ends_with_return());
        block.push(IrStatement::RowAdvance { table: "vt".into() });
        assert!(!block.ends_with_return());

        let nested = IrStatement::Block(Block::new(vec![IrStatement::Return {
            value: "result".into(),
        }]));
        assert!(Block::new(vec![nested]).ends_with_return());
    }
}
