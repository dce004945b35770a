//! A small interactive table store.
//!
//! Statements arrive one per line; each produces a `(stub)` echo line and,
//! when it runs, its results followed by `Executed.`. Tables live only as
//! long as the [`Session`] that created them.

pub(crate) mod common;
pub mod config;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repl;
pub(crate) mod sql;
pub(crate) mod storage;

pub use crate::common::error::DatabaseError;
pub use crate::config::{Config, Limits};
pub use crate::core::types::{DataType, Value};
pub use crate::db::{
    database::Database,
    table::{Table, column_def::ColumnDef, relation::Relation, row::Row, schema::Schema},
};
pub use crate::repl::{meta::MetaCommand, session::Session};
pub use crate::sql::interpreter::{Interpreter, Outcome};
