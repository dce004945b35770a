use strum::EnumString;

/// SQL keywords recognized by the parser.
///
/// These keywords are case-insensitive and reserved for SQL syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Keyword {
    Create,
    Table,
    Tables,
    Drop,
    Alter,
    Show,

    Select,
    Insert,
    Update,
    Delete,
    Where,
    And,
    From,
    Into,
    Values,

    // Data Types
    Int,
    Integer,
    Text,
    Varchar,
}

impl Keyword {
    /// Statement verbs that are understood but have no implementation.
    pub fn is_unsupported_verb(self) -> bool {
        matches!(self, Self::Update | Self::Alter)
    }
}
