use tracing::debug;

use super::{Table, row::Row, schema::Schema};
use crate::{
    DatabaseError,
    storage::page::{PageStore, RecordId},
};

/// A table (relation) with a name, a schema and its rows.
///
/// Rows are kept as fixed-width records in a [`PageStore`], in insertion
/// order. Nothing outside the relation holds on to them.
#[derive(Debug, Clone)]
pub struct Relation {
    /// The table name.
    pub(crate) name: String,

    /// The table's schema defining its columns.
    pub(crate) schema: Schema,

    store: PageStore,
}

impl Relation {
    /// Creates an empty relation. The schema must have at least one column
    /// and its record must fit in one page; the catalog checks both.
    pub(crate) fn new(name: String, schema: Schema, max_pages: usize) -> Self {
        let store = PageStore::new(schema.row_size(), max_pages);
        Self {
            name,
            schema,
            store,
        }
    }

    /// Number of rows stored.
    pub fn row_count(&self) -> usize {
        self.store.len()
    }

    fn validate(&self, row: &Row) -> Result<(), DatabaseError> {
        if row.values.len() != self.schema.columns.len() {
            return Err(DatabaseError::ArityMismatch {
                table: self.name.clone(),
                expected: self.schema.columns.len(),
                found: row.values.len(),
            });
        }

        for (value, column) in row.values.iter().zip(self.schema.columns.iter()) {
            value.is_compatible_with(&column.data_type).map_err(|msg| {
                DatabaseError::TypeMismatch(format!("column '{}': {msg}", column.name))
            })?;
        }

        Ok(())
    }
}

impl Table for Relation {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn insert_row(&mut self, row: Row) -> Result<RecordId, DatabaseError> {
        self.validate(&row)?;

        let record = self.schema.encode_row(&row)?;
        let id = self
            .store
            .append(&record)
            .ok_or_else(|| DatabaseError::TableFull(self.name.clone()))?;

        debug!(table = %self.name, page = id.page_id, slot = id.slot, "appended row");
        Ok(id)
    }

    fn scan(&self) -> impl Iterator<Item = Result<Row, DatabaseError>> + '_ {
        self.store
            .records()
            .map(move |record| self.schema.decode_row(record))
    }

    fn delete_where(&mut self, predicate: impl Fn(&Row) -> bool) -> Result<usize, DatabaseError> {
        // Decide for every row before moving any, so a corrupted record
        // leaves the table untouched.
        let doomed = self
            .scan()
            .map(|row| row.map(|row| predicate(&row)))
            .collect::<Result<Vec<bool>, _>>()?;

        let removed = self.store.retain(|index| !doomed[index]);

        debug!(table = %self.name, removed, pages = self.store.page_count(), "deleted rows");
        Ok(removed)
    }
}
