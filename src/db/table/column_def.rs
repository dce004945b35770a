use crate::{
    core::types::{DataType, Value},
    sql::parser::Literal,
};

/// Definition of a single column in a table schema.
///
/// Column names are opaque tokens; `1` is as good a name as `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// The column name.
    pub name: String,

    /// The data type for values in this column.
    pub data_type: DataType,
}

impl ColumnDef {
    /// Creates a new column definition.
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_owned(),
            data_type,
        }
    }

    /// Turns a literal into a value of this column's type.
    ///
    /// Integer columns only take numeric literals that fit in an `i64`,
    /// text columns only take quoted literals. Length limits are not checked.
    pub fn coerce(&self, literal: &Literal) -> Result<Value, String> {
        match (self.data_type, literal) {
            (DataType::Int64, Literal::Number(digits)) => digits
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|_| format!("'{digits}' is not a valid integer for column '{}'", self.name)),
            (DataType::Text | DataType::VarChar(_), Literal::Text(text)) => {
                Ok(Value::Text(text.to_string()))
            }
            (data_type, literal) => Err(format!(
                "column '{}' expects {data_type}, found {literal}",
                self.name
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn test_coerce() {
        let id = ColumnDef::new("id", DataType::Int64);
        let name = ColumnDef::new("name", DataType::VarChar(2));

        assert_eq!(id.coerce(&Literal::Number("-7")), Ok(Value::Int64(-7)));
        assert_eq!(
            id.coerce(&Literal::Text(Cow::from("7"))),
            Err("column 'id' expects int, found text '7'".to_string())
        );
        assert!(id.coerce(&Literal::Number("99999999999999999999")).is_err());

        // Longer than the column allows, still a valid comparison operand.
        assert_eq!(
            name.coerce(&Literal::Text(Cow::from("abc"))),
            Ok(Value::Text("abc".to_string()))
        );
        assert!(name.coerce(&Literal::Number("1")).is_err());
    }
}
