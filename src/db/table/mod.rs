use crate::{DatabaseError, storage::page::RecordId};

pub mod column_def;
pub mod relation;
pub mod row;
pub mod schema;

/// Trait for table-like structures.
///
/// Defines the common interface for tables and relations.
/// Currently only implemented by [`relation::Relation`].
pub trait Table {
    /// Returns the table name.
    fn name(&self) -> &str;

    /// Returns the table's schema.
    fn schema(&self) -> &schema::Schema;

    /// Appends a row to the table (validates against schema).
    fn insert_row(&mut self, row: row::Row) -> Result<RecordId, DatabaseError>;

    /// Iterates all rows in insertion order.
    fn scan(&self) -> impl Iterator<Item = Result<row::Row, DatabaseError>> + '_;

    /// Removes every row matching `predicate`, returning how many went.
    /// Remaining rows keep their relative order.
    fn delete_where(&mut self, predicate: impl Fn(&row::Row) -> bool) -> Result<usize, DatabaseError>;
}
