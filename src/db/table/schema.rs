use super::{column_def::ColumnDef, row::Row};
use crate::{
    DatabaseError,
    core::types::{DataType, Value},
    sql::parser::Literal,
};

/// A table schema defining the structure of rows.
///
/// A schema is an ordered list of column definitions. All rows in a table
/// must conform to the table's schema, and the column order is also the
/// order of the slots inside an encoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// The ordered list of column definitions.
    pub columns: Vec<ColumnDef>,
}

impl Schema {
    /// Creates a new schema from a vector of column definitions.
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    /// Finds the index of a column by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    /// Width in bytes of one encoded record.
    pub fn row_size(&self) -> usize {
        self.columns.iter().map(|col| col.data_type.slot_size()).sum()
    }

    /// Byte offset of the column at `index` inside an encoded record.
    pub fn column_offset(&self, index: usize) -> usize {
        self.columns[..index]
            .iter()
            .map(|col| col.data_type.slot_size())
            .sum()
    }

    /// Builds a typed row from the literals of an `insert` value list.
    ///
    /// Literals are matched to columns by position. Integer columns only take
    /// numeric literals that fit in an `i64`; text columns only take quoted
    /// literals no longer than the column allows.
    pub fn encode_literals(&self, table: &str, literals: &[Literal]) -> Result<Row, DatabaseError> {
        if literals.len() != self.columns.len() {
            return Err(DatabaseError::ArityMismatch {
                table: table.to_string(),
                expected: self.columns.len(),
                found: literals.len(),
            });
        }

        let mut values = Vec::with_capacity(literals.len());

        for (literal, column) in literals.iter().zip(self.columns.iter()) {
            let value = column.coerce(literal).map_err(DatabaseError::TypeMismatch)?;

            value
                .is_compatible_with(&column.data_type)
                .map_err(|msg| DatabaseError::TypeMismatch(format!("column '{}': {msg}", column.name)))?;

            values.push(value);
        }

        Ok(Row::new(values))
    }

    /// Encodes a row into its fixed-width record.
    ///
    /// Each value is encoded according to its column type:
    /// - Integer: 8 bytes (little-endian i64)
    /// - Text/VarChar: 4-byte length + UTF-8 bytes, zero padded to the slot size
    ///
    /// The row must already conform to the schema.
    pub(crate) fn encode_row(&self, row: &Row) -> Result<Vec<u8>, DatabaseError> {
        let mut bytes = Vec::with_capacity(self.row_size());

        for (value, column) in row.values.iter().zip(self.columns.iter()) {
            let slot_start = bytes.len();

            match (column.data_type, value) {
                (DataType::Int64, Value::Int64(number)) => {
                    bytes.extend_from_slice(&number.to_le_bytes());
                }
                (DataType::Text | DataType::VarChar(_), Value::Text(text)) => {
                    let text_bytes = text.as_bytes();
                    let length = text_bytes.len() as u32;
                    bytes.extend_from_slice(&length.to_le_bytes());
                    bytes.extend_from_slice(text_bytes);
                }
                (data_type, value) => {
                    return Err(DatabaseError::TypeMismatch(format!(
                        "{value:?} cannot be stored as {data_type}"
                    )));
                }
            }

            bytes.resize(slot_start + column.data_type.slot_size(), 0);
        }

        Ok(bytes)
    }

    /// Decodes a fixed-width record back into a row.
    pub(crate) fn decode_row(&self, bytes: &[u8]) -> Result<Row, DatabaseError> {
        if bytes.len() != self.row_size() {
            return Err(DatabaseError::Corrupted(format!(
                "record is {} bytes, schema expects {}",
                bytes.len(),
                self.row_size()
            )));
        }

        let mut values = Vec::with_capacity(self.columns.len());

        for (index, column) in self.columns.iter().enumerate() {
            let offset = self.column_offset(index);
            let slot = &bytes[offset..offset + column.data_type.slot_size()];

            match column.data_type {
                DataType::Int64 => {
                    let mut num_bytes = [0u8; 8];
                    num_bytes.copy_from_slice(&slot[..8]);
                    values.push(Value::Int64(i64::from_le_bytes(num_bytes)));
                }
                DataType::Text | DataType::VarChar(_) => {
                    let mut len_bytes = [0u8; 4];
                    len_bytes.copy_from_slice(&slot[..4]);
                    let length = u32::from_le_bytes(len_bytes) as usize;

                    if 4 + length > slot.len() {
                        return Err(DatabaseError::Corrupted(format!(
                            "text length {length} overflows column '{}'",
                            column.name
                        )));
                    }

                    let text = std::str::from_utf8(&slot[4..4 + length]).map_err(|_| {
                        DatabaseError::Corrupted(format!(
                            "invalid UTF-8 in column '{}'",
                            column.name
                        ))
                    })?;
                    values.push(Value::Text(text.to_owned()));
                }
            }
        }

        Ok(Row::new(values))
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn tablo() -> Schema {
        Schema::new(vec![
            ColumnDef::new("1", DataType::Int64),
            ColumnDef::new("2", DataType::Text),
        ])
    }

    #[test]
    fn test_layout() {
        let schema = Schema::new(vec![
            ColumnDef::new("a", DataType::VarChar(12)),
            ColumnDef::new("b", DataType::Int64),
            ColumnDef::new("c", DataType::Text),
        ]);

        assert_eq!(schema.row_size(), 16 + 8 + 259);
        assert_eq!(schema.column_offset(0), 0);
        assert_eq!(schema.column_offset(1), 16);
        assert_eq!(schema.column_offset(2), 24);
        assert_eq!(schema.get_column_index("c"), Some(2));
        assert_eq!(schema.get_column_index("d"), None);
    }

    #[test]
    fn test_encode_literals() {
        let row = tablo()
            .encode_literals("tablo", &[Literal::Number("31"), Literal::Text(Cow::from("annen"))])
            .unwrap();

        assert_eq!(
            row.values,
            vec![Value::Int64(31), Value::Text("annen".to_string())]
        );
        assert_eq!(row.to_string(), "(31, annen)");
    }

    #[test]
    fn test_encode_literals_arity_mismatch() {
        let err = tablo()
            .encode_literals("tablo", &[Literal::Number("31")])
            .unwrap_err();

        assert!(matches!(
            err,
            DatabaseError::ArityMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_encode_literals_type_mismatch() {
        let schema = tablo();

        let quoted_number = schema.encode_literals(
            "tablo",
            &[Literal::Text(Cow::from("31")), Literal::Text(Cow::from("x"))],
        );
        assert!(matches!(quoted_number, Err(DatabaseError::TypeMismatch(_))));

        let bare_text = schema.encode_literals("tablo", &[Literal::Number("1"), Literal::Number("2")]);
        assert!(matches!(bare_text, Err(DatabaseError::TypeMismatch(_))));

        let overflow = schema.encode_literals(
            "tablo",
            &[Literal::Number("99999999999999999999"), Literal::Text(Cow::from("x"))],
        );
        assert!(matches!(overflow, Err(DatabaseError::TypeMismatch(_))));
    }

    #[test]
    fn test_encode_literals_varchar_limit() {
        let schema = Schema::new(vec![ColumnDef::new("name", DataType::VarChar(3))]);

        assert!(schema
            .encode_literals("t", &[Literal::Text(Cow::from("abc"))])
            .is_ok());
        assert!(matches!(
            schema.encode_literals("t", &[Literal::Text(Cow::from("abcd"))]),
            Err(DatabaseError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_record_is_fixed_width() {
        let schema = tablo();
        let short = Row::new(vec![Value::Int64(1), Value::Text(String::new())]);
        let long = Row::new(vec![Value::Int64(-1), Value::Text("x".repeat(255))]);

        assert_eq!(schema.encode_row(&short).unwrap().len(), schema.row_size());
        assert_eq!(schema.encode_row(&long).unwrap().len(), schema.row_size());
    }

    #[test]
    fn test_decode_restores_row() {
        let schema = tablo();
        let row = Row::new(vec![Value::Int64(-42), Value::Text("héllo".to_string())]);

        let bytes = schema.encode_row(&row).unwrap();
        assert_eq!(schema.decode_row(&bytes).unwrap(), row);
    }

    #[test]
    fn test_decode_rejects_bad_records() {
        let schema = tablo();
        assert!(matches!(
            schema.decode_row(&[0u8; 3]),
            Err(DatabaseError::Corrupted(_))
        ));

        let mut bytes = vec![0u8; schema.row_size()];
        bytes[8..12].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            schema.decode_row(&bytes),
            Err(DatabaseError::Corrupted(_))
        ));
    }
}
