use std::{borrow::Cow, fmt::Display};

/// A literal from an `insert` value list, as written in the statement.
///
/// Numbers keep their source digits; turning them into typed values is
/// the row codec's job, since only the column knows what it expects.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'src> {
    Number(&'src str),
    Text(Cow<'src, str>),
}

impl Display for Literal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(digits) => write!(f, "number {digits}"),
            Literal::Text(text) => write!(f, "text '{text}'"),
        }
    }
}
