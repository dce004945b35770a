use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::{
    DatabaseError,
    config::Limits,
    db::table::{Table, relation::Relation, row::Row, schema::Schema},
    storage::page::{PAGE_SIZE, RecordId},
};

/// The table catalog of a session.
///
/// `Database` owns every table created during a session together with its
/// rows. It starts empty, lives as long as the session that owns it and is
/// never written anywhere.
#[derive(Debug, Default)]
pub struct Database {
    /// All tables of the session.
    ///
    /// Maps table names to their relation (schema + rows).
    pub(crate) tables: BTreeMap<String, Relation>,

    limits: Limits,
}

impl Database {
    /// Creates an empty database with the default [`Limits`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty database with the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            tables: BTreeMap::new(),
            limits,
        }
    }

    /// Checks if a table exists in the database.
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Creates a new empty table with the given schema.
    ///
    /// Fails without touching the catalog when the name is taken, the catalog
    /// is at capacity, or the schema is not storable (too many columns, a
    /// repeated column name, or a record wider than a page).
    pub fn create_table(&mut self, name: &str, schema: Schema) -> Result<&Schema, DatabaseError> {
        if self.table_exists(name) {
            return Err(DatabaseError::DuplicateTable(name.to_string()));
        }

        if self.tables.len() >= self.limits.max_tables {
            return Err(DatabaseError::TooManyTables(self.limits.max_tables));
        }

        if schema.columns.len() > self.limits.max_columns {
            return Err(DatabaseError::TooManyColumns {
                table: name.to_string(),
                found: schema.columns.len(),
                limit: self.limits.max_columns,
            });
        }

        if schema.columns.is_empty() {
            return Err(DatabaseError::EmptySchema(name.to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(column) = schema.columns.iter().find(|col| !seen.insert(col.name.as_str())) {
            return Err(DatabaseError::DuplicateColumn(column.name.clone()));
        }

        let row_size = schema.row_size();
        if row_size > PAGE_SIZE {
            return Err(DatabaseError::RowTooWide {
                table: name.to_string(),
                size: row_size,
                limit: PAGE_SIZE,
            });
        }

        debug!(table = name, columns = schema.columns.len(), row_size, "created table");

        let table = Relation::new(name.to_string(), schema, self.limits.max_pages_per_table);
        let table = self.tables.entry(name.to_string()).or_insert(table);
        Ok(table.schema())
    }

    /// Gets an immutable reference to a table.
    pub fn get_table(&self, name: &str) -> Result<&Relation, DatabaseError> {
        self.tables
            .get(name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))
    }

    /// Gets a mutable reference to a table.
    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Relation, DatabaseError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))
    }

    /// Drops a table from the database, returning it with all of its rows.
    pub fn drop_table(&mut self, name: &str) -> Result<Relation, DatabaseError> {
        let table = self
            .tables
            .remove(name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))?;

        debug!(table = name, rows = table.row_count(), "dropped table");
        Ok(table)
    }

    /// Appends a row to a table.
    ///
    /// The row is validated against the table's schema, encoded to its
    /// fixed-width record and stored after every row inserted before it.
    pub fn insert_row(&mut self, table_name: &str, row: Row) -> Result<RecordId, DatabaseError> {
        self.get_table_mut(table_name)?.insert_row(row)
    }

    /// Retrieves all rows from a table (full table scan), in insertion order.
    ///
    /// The returned iterator decodes lazily; calling `scan` again starts over.
    pub fn scan(
        &self,
        table_name: &str,
    ) -> Result<impl Iterator<Item = Result<Row, DatabaseError>> + '_, DatabaseError> {
        Ok(self.get_table(table_name)?.scan())
    }

    /// Removes the rows of a table that match `predicate`, returning how
    /// many were removed.
    pub fn delete_rows(
        &mut self,
        table_name: &str,
        predicate: impl Fn(&Row) -> bool,
    ) -> Result<usize, DatabaseError> {
        self.get_table_mut(table_name)?.delete_where(predicate)
    }

    /// Names of all tables, in ascending order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.keys().map(String::as_str)
    }
}
