use tracing::{debug, trace};

use crate::{
    DatabaseError,
    db::{
        database::Database,
        table::{Table, column_def::ColumnDef, row::Row, schema::Schema},
    },
    sql::{
        parser::{Projection, SelectStatement, SqlParser, Statement},
        predicate_evaluator::PredicateEvaluator,
    },
};

/// Closing line of every statement that ran to completion.
pub const EXECUTED: &str = "Executed.";

/// The diagnostic line printed for every statement, executed or not.
pub fn echo(line: &str) -> String {
    format!("(stub) You entered SQL: {line}")
}

/// What the execution stage produced for one statement.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The statement ran; these lines precede `Executed.`.
    Executed(Vec<String>),

    /// The statement is known but not implemented; nothing beyond the echo.
    Stubbed,
}

/// Runs single statements against a [`Database`].
///
/// Interpreting a line happens in two stages: the echo stage always emits
/// the `(stub)` line, the execution stage parses and runs the statement.
/// Errors never escape; they become one line of output and leave the
/// catalog as it was.
pub struct Interpreter<'db> {
    database: &'db mut Database,
}

impl<'db> Interpreter<'db> {
    pub fn new(database: &'db mut Database) -> Self {
        Self { database }
    }

    /// Produces every output line for one statement.
    pub fn interpret(&mut self, line: &str) -> Vec<String> {
        let mut output = vec![echo(line)];

        match self.execute(line) {
            Ok(Outcome::Executed(lines)) => {
                output.extend(lines);
                output.push(EXECUTED.to_string());
            }
            Ok(Outcome::Stubbed) => {}
            Err(err) => {
                debug!(statement = line, %err, "statement failed");
                output.push(err.to_string());
            }
        }

        output
    }

    /// Parses and runs one statement.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, DatabaseError> {
        let statement = SqlParser::new(line).parse()?;
        trace!(?statement, "parsed statement");

        let lines = match statement {
            Statement::CreateTable(create) => {
                let columns = create
                    .columns
                    .iter()
                    .map(|col| ColumnDef::new(col.name, col.data_type))
                    .collect();

                let schema = self
                    .database
                    .create_table(create.table_name, Schema::new(columns))?;

                vec![format!(
                    "Table '{}' created with {} columns.",
                    create.table_name,
                    schema.columns.len()
                )]
            }
            Statement::Insert(insert) => {
                let row = self
                    .database
                    .get_table(insert.table_name)?
                    .schema()
                    .encode_literals(insert.table_name, &insert.values)?;

                self.database.insert_row(insert.table_name, row)?;
                Vec::new()
            }
            Statement::Select(select) => self.select(&select)?,
            Statement::Delete(delete) => {
                let table = self.database.get_table(delete.table_name)?;
                let predicate =
                    PredicateEvaluator::bind(delete.table_name, table.schema(), &delete.conditions)?;

                let removed = self
                    .database
                    .delete_rows(delete.table_name, |row| predicate.evaluate(row))?;
                debug!(table = delete.table_name, removed, "delete finished");
                Vec::new()
            }
            Statement::DropTable(drop) => {
                self.database.drop_table(drop.table_name)?;
                vec![format!("Table '{}' dropped.", drop.table_name)]
            }
            Statement::ShowTables => self.database.table_names().map(str::to_string).collect(),
            Statement::Unsupported(_) => return Ok(Outcome::Stubbed),
        };

        Ok(Outcome::Executed(lines))
    }

    /// Scans the table, keeps the rows the `where` clause accepts and
    /// renders the projected columns of each.
    fn select(&self, select: &SelectStatement) -> Result<Vec<String>, DatabaseError> {
        let table = self.database.get_table(select.table_name)?;
        let schema = table.schema();

        let columns = match &select.projection {
            Projection::All => (0..schema.columns.len()).collect(),
            Projection::Columns(names) => names
                .iter()
                .map(|name| {
                    schema
                        .get_column_index(name)
                        .ok_or_else(|| DatabaseError::UnknownColumn {
                            table: select.table_name.to_string(),
                            column: name.to_string(),
                        })
                })
                .collect::<Result<Vec<usize>, _>>()?,
        };
        let predicate = PredicateEvaluator::bind(select.table_name, schema, &select.conditions)?;

        let mut lines = Vec::new();
        for row in table.scan() {
            let row = row?;
            if !predicate.evaluate(&row) {
                continue;
            }

            let projected = columns
                .iter()
                .filter_map(|&index| row.get_value(index).cloned())
                .collect();
            lines.push(Row::new(projected).to_string());
        }

        Ok(lines)
    }
}
