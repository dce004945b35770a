use std::{cmp::Ordering, fmt};

use crate::sql::parser::Literal;

/// Comparison operators allowed in a `where` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equality (=)
    Equal,
    NotEqual,

    /// Greater than (>)
    GreaterThan,
    GreaterThanEqual,

    /// Less than (<)
    LessThan,
    LessThanEqual,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_symbol())
    }
}

impl Operator {
    pub fn to_symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanEqual => "<=",
        }
    }

    /// Whether `left <op> right` holds, given how `left` orders against `right`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Operator::Equal => ordering.is_eq(),
            Operator::NotEqual => ordering.is_ne(),
            Operator::GreaterThan => ordering.is_gt(),
            Operator::GreaterThanEqual => ordering.is_ge(),
            Operator::LessThan => ordering.is_lt(),
            Operator::LessThanEqual => ordering.is_le(),
        }
    }
}

/// One `<column> <op> <literal>` comparison of a `where` clause.
///
/// A clause is a list of these joined by `and`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition<'src> {
    pub column: &'src str,
    pub op: Operator,
    pub value: Literal<'src>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_holds() {
        assert!(Operator::Equal.holds(Ordering::Equal));
        assert!(!Operator::Equal.holds(Ordering::Less));
        assert!(Operator::NotEqual.holds(Ordering::Greater));
        assert!(Operator::GreaterThanEqual.holds(Ordering::Equal));
        assert!(!Operator::GreaterThan.holds(Ordering::Equal));
        assert!(Operator::LessThanEqual.holds(Ordering::Less));
        assert!(!Operator::LessThan.holds(Ordering::Greater));
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::NotEqual.to_string(), "!=");
        assert_eq!(Operator::LessThanEqual.to_string(), "<=");
    }
}
