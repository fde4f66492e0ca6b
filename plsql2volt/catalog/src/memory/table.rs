use plsql2volt_common::data_type::{ColumnSchema, ResultSchema};
use smol_str::SmolStr;

use crate::error::{CatalogError, CatalogResult};
use crate::provider::TableProvider;

#[derive(Debug, Clone)]
pub struct MemoryTableCatalog {
    name: SmolStr,
    columns: ResultSchema,
}

impl MemoryTableCatalog {
    #[inline]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            columns: ResultSchema::default(),
        }
    }

    /// Appends a column, failing if the table already has a column with this name.
    pub fn add_column(&mut self, column: ColumnSchema) -> CatalogResult<()> {
        if self.columns.position_of(column.name()).is_some() {
            return Err(CatalogError::UnsupportedStatement(format!(
                "duplicate column {} in table {}",
                column.name(),
                self.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }
}

impl TableProvider for MemoryTableCatalog {
    #[inline]
    fn name(&self) -> &SmolStr {
        &self.name
    }

    #[inline]
    fn columns(&self) -> &ResultSchema {
        &self.columns
    }
}
