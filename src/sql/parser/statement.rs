use crate::{
    DataType,
    sql::parser::{Condition, Literal},
};

/// A parsed statement (top-level AST node).
///
/// One variant per statement kind the interpreter knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'src> {
    CreateTable(CreateTableStatement<'src>),
    Insert(InsertStatement<'src>),
    Select(SelectStatement<'src>),
    Delete(DeleteStatement<'src>),
    DropTable(DropTableStatement<'src>),
    ShowTables,

    /// A known verb without an implementation. The rest of the line is not parsed.
    Unsupported(super::Keyword),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement<'src> {
    pub table_name: &'src str,
    pub columns: Vec<ColumnDefinition<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition<'src> {
    pub name: &'src str,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement<'src> {
    pub table_name: &'src str,
    pub values: Vec<Literal<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement<'src> {
    pub projection: Projection<'src>,
    pub table_name: &'src str,

    /// `where` comparisons, all of which must hold. Empty selects every row.
    pub conditions: Vec<Condition<'src>>,
}

/// The column list of a `select`.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'src> {
    /// `*`: every column in schema order.
    All,

    /// Named columns, in the order written. Repeats are allowed.
    Columns(Vec<&'src str>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement<'src> {
    pub table_name: &'src str,

    /// Without conditions every row is deleted.
    pub conditions: Vec<Condition<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTableStatement<'src> {
    pub table_name: &'src str,
}
