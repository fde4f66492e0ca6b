use std::collections::HashMap;

use serde::Serialize;
use smol_str::{SmolStr, format_smolstr};

use crate::analyzer::AnalyzedStatement;
use crate::target;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredStatement {
    pub name: SmolStr,
    pub text: String,
}

impl RegisteredStatement {
    /// Packages the statement text as Java string literals, one per non-blank line.
    ///
    /// Every fragment but the last ends with a space so that concatenating them keeps tokens on
    /// different lines apart.
    pub fn literal_fragments(&self) -> Vec<String> {
        literal_fragments(&self.text)
    }
}

/// The SQL statements of one procedure, in registration order.
///
/// Every registration creates a new entry, so a statement that occurs twice in the source is
/// registered twice under different names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementRegistry {
    #[serde(skip)]
    counters: HashMap<SmolStr, usize>,
    entries: Vec<RegisteredStatement>,
}

impl StatementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `statement` and returns its generated name, e.g. `select0`, `select1`.
    pub fn register(&mut self, statement: &AnalyzedStatement) -> SmolStr {
        let counter = self.counters.entry(statement.prefix.clone()).or_default();
        let name = format_smolstr!("{}{}", statement.prefix, counter);
        *counter += 1;
        self.entries.push(RegisteredStatement {
            name: name.clone(),
            text: statement.text.clone(),
        });
        name
    }

    #[inline]
    pub fn entries(&self) -> &[RegisteredStatement] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn literal_fragments(text: &str) -> Vec<String> {
    let lines: Vec<_> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let last = lines.len().saturating_sub(1);
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let escaped = target::escape_string(line);
            if index == last {
                target::string_literal(&escaped)
            } else {
                target::string_literal(&format!("{escaped} "))
            }
        })
        .collect()
}
