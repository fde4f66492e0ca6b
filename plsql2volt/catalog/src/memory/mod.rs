pub mod table;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use smol_str::{SmolStr, ToSmolStr};

use crate::error::{CatalogError, CatalogResult};
use crate::provider::{SchemaProvider, TableProvider, TableRef};
pub use crate::memory::table::MemoryTableCatalog;

/// An in-memory schema holding the tables declared by a DDL script.
#[derive(Debug, Default)]
pub struct MemorySchemaCatalog {
    tables: HashMap<SmolStr, Arc<MemoryTableCatalog>>,
}

impl MemorySchemaCatalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, failing if a table with the same name (ignoring case) already exists.
    pub fn add_table(&mut self, table: MemoryTableCatalog) -> CatalogResult<()> {
        match self.tables.entry(table.name().to_ascii_lowercase().to_smolstr()) {
            Entry::Occupied(_) => Err(CatalogError::DuplicateTable(table.name().clone())),
            Entry::Vacant(e) => {
                e.insert(Arc::new(table));
                Ok(())
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the declared table names, sorted.
    pub fn table_names(&self) -> Vec<SmolStr> {
        let mut names: Vec<_> = self.tables.values().map(|t| t.name().clone()).collect();
        names.sort();
        names
    }
}

impl SchemaProvider for MemorySchemaCatalog {
    #[inline]
    fn get_table(&self, name: &str) -> CatalogResult<Option<TableRef>> {
        Ok(self
            .tables
            .get(name.to_ascii_lowercase().as_str())
            .map(|table| -> TableRef { table.clone() }))
    }
}
