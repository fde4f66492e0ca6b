use std::fmt::Debug;
use std::sync::Arc;

use plsql2volt_common::data_type::{ColumnSchema, EngineType, ResultSchema};
use smol_str::SmolStr;

use crate::error::{CatalogError, CatalogResult};
use crate::resolver;

pub type SchemaRef = Arc<dyn SchemaProvider>;
pub type TableRef = Arc<dyn TableProvider>;

/// The schema-resolution service consulted during translation.
///
/// Implementations only need to provide table lookup; statement and column resolution have
/// default implementations built on top of [`SchemaProvider::get_table`].
pub trait SchemaProvider: Debug + Send + Sync {
    /// Retrieves a table by its name. Names are matched case-insensitively.
    fn get_table(&self, name: &str) -> CatalogResult<Option<TableRef>>;

    /// Resolves the ordered output columns of a single SQL statement.
    ///
    /// Statements that do not produce rows resolve to an empty schema.
    fn resolve_statement(&self, sql: &str) -> CatalogResult<ResultSchema> {
        resolver::resolve_statement(self, sql)
    }

    /// Resolves the declared type of `table.column`.
    fn resolve_column_type(&self, table: &str, column: &str) -> CatalogResult<EngineType> {
        let table_ref = self
            .get_table(table)?
            .ok_or_else(|| CatalogError::TableNotFound(table.into()))?;
        table_ref
            .get_column(column)
            .map(ColumnSchema::ty)
            .ok_or_else(|| CatalogError::ColumnNotFound {
                table: Some(table.into()),
                column: column.into(),
            })
    }
}

/// Represents a table, an ordered list of typed columns.
pub trait TableProvider: Debug + Send + Sync {
    /// Returns the name of the table as declared.
    fn name(&self) -> &SmolStr;

    /// Returns the columns of the table in declaration order.
    fn columns(&self) -> &ResultSchema;

    /// Retrieves a column by its name, ignoring case.
    #[inline]
    fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        let columns = self.columns();
        columns
            .position_of(name)
            .and_then(|index| columns.get(index))
    }
}
