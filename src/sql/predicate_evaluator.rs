use crate::{
    DatabaseError,
    core::types::Value,
    db::table::{row::Row, schema::Schema},
    sql::parser::{Condition, Operator},
};

/// A `where` clause resolved against a table's schema.
///
/// Column names become indices and literals become typed values once, so
/// evaluating a row is a plain comparison per condition. An empty
/// predicate matches every row.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateEvaluator {
    comparisons: Vec<(usize, Operator, Value)>,
}

impl PredicateEvaluator {
    /// Binds the conditions to `schema`.
    ///
    /// Fails on a column the table does not have, or on a literal whose
    /// type does not match its column.
    pub fn bind(table: &str, schema: &Schema, conditions: &[Condition]) -> Result<Self, DatabaseError> {
        let comparisons = conditions
            .iter()
            .map(|condition| {
                let index = schema.get_column_index(condition.column).ok_or_else(|| {
                    DatabaseError::UnknownColumn {
                        table: table.to_string(),
                        column: condition.column.to_string(),
                    }
                })?;

                let value = schema.columns[index]
                    .coerce(&condition.value)
                    .map_err(DatabaseError::ComparisonMismatch)?;

                Ok((index, condition.op, value))
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        Ok(Self { comparisons })
    }

    /// Evaluates every condition against the row; all of them must hold.
    pub fn evaluate(&self, row: &Row) -> bool {
        self.comparisons.iter().all(|(index, op, expected)| {
            match (row.get_value(*index), expected) {
                (Some(Value::Int64(actual)), Value::Int64(expected)) => op.holds(actual.cmp(expected)),
                (Some(Value::Text(actual)), Value::Text(expected)) => {
                    op.holds(actual.as_str().cmp(expected.as_str()))
                }
                _ => false,
            }
        })
    }
}
