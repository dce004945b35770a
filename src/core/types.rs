/// Largest number of bytes a `text` value may hold.
pub const TEXT_MAX_BYTES: usize = 255;

/// Column types understood by the store.
///
/// These types define the kind of data a column can hold and how
/// it's laid out in a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    ///
    /// Stored as 8 bytes in little-endian format.
    Int64,

    /// Text of at most [`TEXT_MAX_BYTES`] bytes.
    ///
    /// Stored as 4-byte length prefix + a zero padded slot of
    /// [`TEXT_MAX_BYTES`] bytes.
    Text,

    /// Text with a declared maximum length in bytes.
    ///
    /// Stored as 4-byte length prefix + a zero padded slot of the declared size.
    VarChar(usize),
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Int64 => write!(f, "int"),
            DataType::Text => write!(f, "text"),
            DataType::VarChar(size) => write!(f, "varchar({size})"),
        }
    }
}

impl DataType {
    /// Width in bytes of this type's slot inside a record.
    pub fn slot_size(self) -> usize {
        match self {
            DataType::Int64 => std::mem::size_of::<i64>(),
            DataType::Text => 4 + TEXT_MAX_BYTES,
            DataType::VarChar(size) => 4 + size,
        }
    }
}

/// A value that can be stored in a column.
///
/// Values are strongly typed and correspond to [`DataType`] definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A 64-bit signed integer value.
    Int64(i64),

    /// A UTF-8 text string.
    Text(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int64(i) => write!(f, "{i}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    /// Checks if this value can be stored in a column of the given type.
    ///
    /// Performs type checking and, for text types, length validation.
    pub fn is_compatible_with(&self, data_type: &DataType) -> Result<(), String> {
        match (self, data_type) {
            (Value::Int64(_), DataType::Int64) => Ok(()),
            (Value::Text(s), DataType::VarChar(max_len)) if s.len() > *max_len => Err(format!(
                "text length {} exceeds VARCHAR({}) limit",
                s.len(),
                max_len
            )),
            (Value::Text(s), DataType::Text) if s.len() > TEXT_MAX_BYTES => Err(format!(
                "text length {} exceeds the {TEXT_MAX_BYTES} byte TEXT limit",
                s.len()
            )),
            (Value::Text(_), DataType::Text | DataType::VarChar(_)) => Ok(()),

            _ => Err(format!("{self:?} cannot be stored as {data_type}")),
        }
    }
}
