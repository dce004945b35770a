use std::iter::Peekable;

use crate::{
    DatabaseError, DataType,
    core::types::TEXT_MAX_BYTES,
    sql::lexer::{Lexer, Token},
};

pub(crate) use keyword::Keyword;
pub(crate) use literal::Literal;
pub(crate) use predicate::{Condition, Operator};
pub(crate) use statement::*;

pub(crate) mod keyword;
pub(crate) mod literal;
pub(crate) mod predicate;
pub(crate) mod statement;

fn syntax<T>(message: impl Into<String>) -> Result<T, DatabaseError> {
    Err(DatabaseError::Syntax(message.into()))
}

/// Parser that turns one input line into a [`Statement`].
///
/// Uses recursive descent over a peekable token stream.
pub struct SqlParser<'src> {
    query: &'src str,

    /// Token stream from the lexer
    lexer: Peekable<Lexer<'src>>,
}

impl<'src> SqlParser<'src> {
    /// Creates a new parser for the given statement text.
    pub fn new(query: &'src str) -> Self {
        Self {
            query,
            lexer: Lexer::new(query).peekable(),
        }
    }

    /// Parses the line and returns the top-level AST node (Statement).
    ///
    /// A trailing `;` is accepted; anything after the statement is an error.
    pub fn parse(&mut self) -> Result<Statement<'src>, DatabaseError> {
        let query = self.query;
        let keyword = match self.peek_token()? {
            Some(Token::Keyword(keyword)) => *keyword,
            _ => return Err(DatabaseError::UnrecognizedStatement(query.to_string())),
        };

        let statement = match keyword {
            Keyword::Create => self.parse_create_statement()?,
            Keyword::Insert => self.parse_insert_statement()?,
            Keyword::Select => self.parse_select_statement()?,
            Keyword::Delete => self.parse_delete_statement()?,
            Keyword::Drop => self.parse_drop_statement()?,
            Keyword::Show => self.parse_show_statement()?,
            kw if kw.is_unsupported_verb() => return Ok(Statement::Unsupported(kw)),
            _ => return Err(DatabaseError::UnrecognizedStatement(query.to_string())),
        };

        self.consume_if(&Token::SemiColon);

        match self.lexer.next().transpose()? {
            None => Ok(statement),
            Some(token) => syntax(format!("unexpected {token:?} after end of statement")),
        }
    }

    fn parse_create_statement(&mut self) -> Result<Statement<'src>, DatabaseError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;

        let table_name = self.expect_name()?;

        self.expect_token(Token::LeftParen)?;

        let mut columns = vec![self.parse_column_definition()?];
        while self.consume_if(&Token::Comma) {
            columns.push(self.parse_column_definition()?);
        }

        self.expect_token(Token::RightParen)?;

        Ok(Statement::CreateTable(CreateTableStatement {
            table_name,
            columns,
        }))
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition<'src>, DatabaseError> {
        let name = self.expect_name()?;

        let data_type = match self.next_token()? {
            Token::Keyword(Keyword::Int | Keyword::Integer) => DataType::Int64,
            Token::Keyword(Keyword::Text) => DataType::Text,
            Token::Keyword(Keyword::Varchar) => {
                self.expect_token(Token::LeftParen)?;
                let size = self.expect_number()?;
                let size = match size.parse::<usize>() {
                    Ok(size) if (1..=TEXT_MAX_BYTES).contains(&size) => size,
                    _ => {
                        return syntax(format!(
                            "VARCHAR size must be between 1 and {TEXT_MAX_BYTES}, got {size}"
                        ));
                    }
                };
                self.expect_token(Token::RightParen)?;

                DataType::VarChar(size)
            }
            Token::Identifier(other) => {
                return syntax(format!(
                    "unknown type '{other}' for column '{name}', expected int, text or varchar(n)"
                ));
            }
            t => return syntax(format!("expected a column type for '{name}', found {t:?}")),
        };

        Ok(ColumnDefinition { name, data_type })
    }

    fn parse_insert_statement(&mut self) -> Result<Statement<'src>, DatabaseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let table_name = self.expect_name()?;

        self.expect_keyword(Keyword::Values)?;
        self.expect_token(Token::LeftParen)?;

        let mut values = vec![self.parse_literal()?];
        while self.consume_if(&Token::Comma) {
            values.push(self.parse_literal()?);
        }

        self.expect_token(Token::RightParen)?;

        Ok(Statement::Insert(InsertStatement { table_name, values }))
    }

    fn parse_literal(&mut self) -> Result<Literal<'src>, DatabaseError> {
        match self.next_token()? {
            Token::Number(digits) => Ok(Literal::Number(digits)),
            Token::String(text) => Ok(Literal::Text(text)),
            t => syntax(format!("expected a value, found {t:?}")),
        }
    }

    fn parse_select_statement(&mut self) -> Result<Statement<'src>, DatabaseError> {
        self.expect_keyword(Keyword::Select)?;

        let projection = if self.consume_if(&Token::Asterisk) {
            Projection::All
        } else {
            let mut columns = vec![self.expect_name()?];
            while self.consume_if(&Token::Comma) {
                columns.push(self.expect_name()?);
            }
            Projection::Columns(columns)
        };

        self.expect_keyword(Keyword::From)?;
        let table_name = self.expect_name()?;
        let conditions = self.parse_where_clause()?;

        Ok(Statement::Select(SelectStatement {
            projection,
            table_name,
            conditions,
        }))
    }

    fn parse_delete_statement(&mut self) -> Result<Statement<'src>, DatabaseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let table_name = self.expect_name()?;
        let conditions = self.parse_where_clause()?;

        Ok(Statement::Delete(DeleteStatement {
            table_name,
            conditions,
        }))
    }

    /// Parses an optional `where <condition> [and <condition>]...` clause.
    fn parse_where_clause(&mut self) -> Result<Vec<Condition<'src>>, DatabaseError> {
        if !self.consume_if(&Token::Keyword(Keyword::Where)) {
            return Ok(Vec::new());
        }

        let mut conditions = vec![self.parse_condition()?];
        while self.consume_if(&Token::Keyword(Keyword::And)) {
            conditions.push(self.parse_condition()?);
        }

        Ok(conditions)
    }

    fn parse_condition(&mut self) -> Result<Condition<'src>, DatabaseError> {
        let column = self.expect_name()?;

        let op = match self.next_token()? {
            Token::Equal => Operator::Equal,
            Token::NotEqual => Operator::NotEqual,
            Token::Greater => Operator::GreaterThan,
            Token::GreaterEqual => Operator::GreaterThanEqual,
            Token::Less => Operator::LessThan,
            Token::LessEqual => Operator::LessThanEqual,
            t => return syntax(format!("expected a comparison after '{column}', found {t:?}")),
        };

        let value = self.parse_literal()?;

        Ok(Condition { column, op, value })
    }

    fn parse_drop_statement(&mut self) -> Result<Statement<'src>, DatabaseError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;
        let table_name = self.expect_name()?;

        Ok(Statement::DropTable(DropTableStatement { table_name }))
    }

    fn parse_show_statement(&mut self) -> Result<Statement<'src>, DatabaseError> {
        self.expect_keyword(Keyword::Show)?;
        self.expect_keyword(Keyword::Tables)?;

        Ok(Statement::ShowTables)
    }

    fn next_token(&mut self) -> Result<Token<'src>, DatabaseError> {
        self.lexer
            .next()
            .transpose()?
            .map_or_else(|| syntax("unexpected end of input"), Ok)
    }

    fn peek_token(&mut self) -> Result<Option<&Token<'src>>, DatabaseError> {
        if matches!(self.lexer.peek(), Some(Err(_))) {
            // Surface the lexer's own error.
            self.next_token()?;
        }

        Ok(match self.lexer.peek() {
            Some(Ok(token)) => Some(token),
            _ => None,
        })
    }

    fn consume_if(&mut self, expected: &Token) -> bool {
        if matches!(self.lexer.peek(), Some(Ok(token)) if token == expected) {
            self.lexer.next();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, expected: Token<'src>) -> Result<(), DatabaseError> {
        let token = self.next_token()?;
        if token == expected {
            Ok(())
        } else {
            syntax(format!("expected {expected:?}, found {token:?}"))
        }
    }

    fn expect_keyword(&mut self, expected: Keyword) -> Result<(), DatabaseError> {
        match self.next_token()? {
            Token::Keyword(kw) if kw == expected => Ok(()),
            other => syntax(format!("expected {expected:?}, found {other:?}")),
        }
    }

    /// Table and column names. Purely numeric tokens are valid names.
    fn expect_name(&mut self) -> Result<&'src str, DatabaseError> {
        match self.next_token()? {
            Token::Identifier(name) => Ok(name),
            Token::Number(digits) if !digits.starts_with('-') => Ok(digits),
            got => syntax(format!("expected a name, found {got:?}")),
        }
    }

    fn expect_number(&mut self) -> Result<&'src str, DatabaseError> {
        match self.next_token()? {
            Token::Number(n) => Ok(n),
            other => syntax(format!("expected a number, found {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    /// Helper to parse a statement that must be valid
    fn parse(query: &str) -> Statement<'_> {
        let mut parser = SqlParser::new(query);
        parser.parse().expect("Failed to parse query")
    }

    fn parse_err(query: &str) -> DatabaseError {
        SqlParser::new(query)
            .parse()
            .expect_err("query should not parse")
    }

    #[test]
    fn test_parse_create_table() {
        assert_eq!(
            parse("create table tablo (1 int, 2 text)"),
            Statement::CreateTable(CreateTableStatement {
                table_name: "tablo",
                columns: vec![
                    ColumnDefinition {
                        name: "1",
                        data_type: DataType::Int64,
                    },
                    ColumnDefinition {
                        name: "2",
                        data_type: DataType::Text,
                    },
                ],
            })
        );
    }

    #[test]
    fn test_parse_create_table_types() {
        match parse("CREATE TABLE users (id INTEGER, name VARCHAR(32), bio text);") {
            Statement::CreateTable(CreateTableStatement { columns, .. }) => {
                let types: Vec<DataType> = columns.iter().map(|c| c.data_type).collect();
                assert_eq!(
                    types,
                    vec![DataType::Int64, DataType::VarChar(32), DataType::Text]
                );
            }
            other => panic!("Expected CREATE statement, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_table_errors() {
        assert!(matches!(parse_err("create table t (a float)"), DatabaseError::Syntax(msg) if msg.contains("float")));
        assert!(matches!(parse_err("create table t ()"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("create table t (a int"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("create table t a int"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("create table t (a varchar(0))"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("create table t (a varchar(256))"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("create t (a int)"), DatabaseError::Syntax(_)));
    }

    #[test]
    fn test_parse_insert() {
        assert_eq!(
            parse("insert into tablo values (31, 'annen')"),
            Statement::Insert(InsertStatement {
                table_name: "tablo",
                values: vec![Literal::Number("31"), Literal::Text(Cow::from("annen"))],
            })
        );
    }

    #[test]
    fn test_parse_insert_errors() {
        assert!(matches!(parse_err("insert into t values 1, 2"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("insert into t values (1 2)"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("insert into t values (1,)"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("insert t values (1)"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("insert into t values (abc)"), DatabaseError::Syntax(_)));
    }

    #[test]
    fn test_parse_select_all() {
        assert_eq!(
            parse("SELECT * FROM tablo"),
            Statement::Select(SelectStatement {
                projection: Projection::All,
                table_name: "tablo",
                conditions: vec![],
            })
        );
        assert!(matches!(parse_err("select from tablo"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("select * from"), DatabaseError::Syntax(_)));
        assert!(matches!(
            parse_err("select * from tablo extra"),
            DatabaseError::Syntax(msg) if msg.contains("after end of statement")
        ));
    }

    #[test]
    fn test_parse_select_columns_and_where() {
        assert_eq!(
            parse("select 2, 1 from tablo where 1 >= 10 and 2 != 'annen';"),
            Statement::Select(SelectStatement {
                projection: Projection::Columns(vec!["2", "1"]),
                table_name: "tablo",
                conditions: vec![
                    Condition {
                        column: "1",
                        op: Operator::GreaterThanEqual,
                        value: Literal::Number("10"),
                    },
                    Condition {
                        column: "2",
                        op: Operator::NotEqual,
                        value: Literal::Text(Cow::from("annen")),
                    },
                ],
            })
        );
    }

    #[test]
    fn test_parse_where_errors() {
        assert!(matches!(parse_err("select * from t where"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("select * from t where a"), DatabaseError::Syntax(_)));
        assert!(matches!(
            parse_err("select * from t where a 1"),
            DatabaseError::Syntax(msg) if msg.contains("expected a comparison")
        ));
        assert!(matches!(parse_err("select * from t where a = b"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("select * from t where a = 1 and"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("select * from t where a = 1 or b = 2"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("select a, from t"), DatabaseError::Syntax(_)));
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            parse("DELETE FROM tablo"),
            Statement::Delete(DeleteStatement {
                table_name: "tablo",
                conditions: vec![],
            })
        );
        assert_eq!(
            parse("delete from tablo where 1 < -3"),
            Statement::Delete(DeleteStatement {
                table_name: "tablo",
                conditions: vec![Condition {
                    column: "1",
                    op: Operator::LessThan,
                    value: Literal::Number("-3"),
                }],
            })
        );
        assert!(matches!(parse_err("delete tablo"), DatabaseError::Syntax(_)));
        assert!(matches!(parse_err("delete from tablo where"), DatabaseError::Syntax(_)));
    }

    #[test]
    fn test_parse_drop_and_show() {
        assert_eq!(
            parse("drop table tablo"),
            Statement::DropTable(DropTableStatement {
                table_name: "tablo"
            })
        );
        assert_eq!(parse("show tables;"), Statement::ShowTables);
        assert!(matches!(parse_err("show tablo"), DatabaseError::Syntax(_)));
    }

    #[test]
    fn test_parse_unsupported_and_unrecognized() {
        assert_eq!(
            parse("update tablo set x = 1"),
            Statement::Unsupported(Keyword::Update)
        );
        assert_eq!(parse("ALTER table tablo"), Statement::Unsupported(Keyword::Alter));

        assert!(matches!(
            parse_err("frobnicate everything"),
            DatabaseError::UnrecognizedStatement(line) if line == "frobnicate everything"
        ));
        assert!(matches!(parse_err("from tablo"), DatabaseError::UnrecognizedStatement(_)));
    }

    #[test]
    fn test_parse_surfaces_lexer_errors() {
        assert!(matches!(
            parse_err("insert into t values ('open"),
            DatabaseError::Syntax(msg) if msg.contains("unterminated")
        ));
        assert!(matches!(parse_err("@"), DatabaseError::Syntax(_)));
    }
}
