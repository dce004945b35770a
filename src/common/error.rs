use miette::Diagnostic;
use thiserror::Error;

/// Every failure a statement or the session can produce.
///
/// Statement-level variants are rendered as a single transcript line by
/// the interpreter; only [`DatabaseError::Io`] ever ends a session.
#[derive(Debug, Error, Diagnostic)]
pub enum DatabaseError {
    #[error("Error: table '{0}' already exists.")]
    #[diagnostic(code(mydb::catalog::duplicate_table))]
    DuplicateTable(String),

    #[error("Error: table '{0}' does not exist.")]
    #[diagnostic(
        code(mydb::catalog::unknown_table),
        help("Use `show tables` to list the tables of this session.")
    )]
    UnknownTable(String),

    #[error("Error: table '{table}' has {expected} columns but {found} values were supplied.")]
    #[diagnostic(code(mydb::codec::arity_mismatch))]
    ArityMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Error: column '{column}' does not exist in table '{table}'.")]
    #[diagnostic(code(mydb::catalog::unknown_column))]
    UnknownColumn { table: String, column: String },

    #[error("Error: table '{0}' must have at least one column.")]
    #[diagnostic(code(mydb::catalog::empty_schema))]
    EmptySchema(String),

    #[error("Where type error: {0}")]
    #[diagnostic(code(mydb::sql::comparison_mismatch))]
    ComparisonMismatch(String),

    #[error("Insert type error: {0}")]
    #[diagnostic(code(mydb::codec::type_mismatch))]
    TypeMismatch(String),

    #[error("Syntax error. Could not parse statement: {0}")]
    #[diagnostic(code(mydb::sql::syntax))]
    Syntax(String),

    #[error("Unrecognized keyword at start of '{0}'.")]
    #[diagnostic(
        code(mydb::sql::unrecognized_statement),
        help("Supported statements are create table, insert into, select, delete from, drop table and show tables.")
    )]
    UnrecognizedStatement(String),

    #[error("Error: table '{0}' is full.")]
    #[diagnostic(code(mydb::storage::table_full))]
    TableFull(String),

    #[error("Error: too many tables in database (limit is {0}).")]
    #[diagnostic(code(mydb::catalog::too_many_tables))]
    TooManyTables(usize),

    #[error("Error: table '{table}' declares {found} columns (limit is {limit}).")]
    #[diagnostic(code(mydb::catalog::too_many_columns))]
    TooManyColumns {
        table: String,
        found: usize,
        limit: usize,
    },

    #[error("Error: column '{0}' is declared more than once.")]
    #[diagnostic(code(mydb::catalog::duplicate_column))]
    DuplicateColumn(String),

    #[error("Error: a row of table '{table}' needs {size} bytes but a page holds {limit}.")]
    #[diagnostic(
        code(mydb::storage::row_too_wide),
        help("Declare narrower varchar(n) columns instead of text.")
    )]
    RowTooWide {
        table: String,
        size: usize,
        limit: usize,
    },

    #[error("Error: stored record is corrupted: {0}")]
    #[diagnostic(code(mydb::storage::corrupted))]
    Corrupted(String),

    #[error(transparent)]
    #[diagnostic(code(mydb::io))]
    Io(#[from] std::io::Error),
}
