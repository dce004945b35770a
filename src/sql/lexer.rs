use std::{borrow::Cow, str::FromStr};

use crate::{DatabaseError, sql::parser::Keyword};

#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    Keyword(Keyword),
    Identifier(&'a str),
    /// Base-10 digits with an optional leading `-`, kept as written.
    Number(&'a str),
    String(Cow<'a, str>),

    Comma,
    Asterisk,
    SemiColon,

    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    LeftParen,
    RightParen,
}

pub(crate) struct Lexer<'a> {
    pub rest: &'a str,
    pub position: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            position: 0,
        }
    }

    fn advance(&mut self, len: usize) -> &'a str {
        let consumed = &self.rest[..len];
        self.position += len;
        self.rest = &self.rest[len..];
        consumed
    }

    fn skip_whitespace(&mut self) {
        let non_whitespace_pos = self
            .rest
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map(|(pos, _)| pos)
            .unwrap_or(self.rest.len());

        self.advance(non_whitespace_pos);
    }

    fn consume_word(&mut self) -> &'a str {
        let word_end = self
            .rest
            .find(|c: char| !is_word_char(c))
            .unwrap_or(self.rest.len());

        self.advance(word_end)
    }

    /// Consumes a quoted string. A doubled closing quote stands for one
    /// literal quote character.
    fn consume_string(&mut self, closing: char) -> Result<Cow<'a, str>, DatabaseError> {
        let start = self.position;
        let body = &self.rest[closing.len_utf8()..];

        let mut owned: Option<String> = None;
        let mut segment_start = 0;
        let mut chars = body.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            if c != closing {
                continue;
            }

            if matches!(chars.peek(), Some((_, next)) if *next == closing) {
                let buf = owned.get_or_insert_with(String::new);
                buf.push_str(&body[segment_start..idx]);
                buf.push(closing);
                chars.next();
                segment_start = idx + 2 * closing.len_utf8();
                continue;
            }

            let value = match owned {
                Some(mut buf) => {
                    buf.push_str(&body[segment_start..idx]);
                    Cow::Owned(buf)
                }
                None => Cow::Borrowed(&body[..idx]),
            };
            self.advance(closing.len_utf8() + idx + closing.len_utf8());
            return Ok(value);
        }

        Err(DatabaseError::Syntax(format!(
            "unterminated string starting at position {start}"
        )))
    }

    fn consume_number(&mut self) -> Token<'a> {
        let sign = usize::from(self.rest.starts_with('-'));
        let digits_end = self.rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .map(|pos| pos + sign)
            .unwrap_or(self.rest.len());

        // `1abc` is a name, not a number followed by a name.
        if sign == 0 && self.rest[digits_end..].starts_with(is_word_char) {
            return Token::Identifier(self.consume_word());
        }

        Token::Number(self.advance(digits_end))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, DatabaseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let char = self.rest.chars().next()?;

        let token = match char {
            ',' => {
                self.advance(1);
                Ok(Token::Comma)
            }
            '*' => {
                self.advance(1);
                Ok(Token::Asterisk)
            }
            ';' => {
                self.advance(1);
                Ok(Token::SemiColon)
            }
            '(' => {
                self.advance(1);
                Ok(Token::LeftParen)
            }
            '=' => {
                self.advance(1);
                Ok(Token::Equal)
            }
            '!' if self.rest.starts_with("!=") => {
                self.advance(2);
                Ok(Token::NotEqual)
            }
            '<' if self.rest.starts_with("<=") => {
                self.advance(2);
                Ok(Token::LessEqual)
            }
            '<' => {
                self.advance(1);
                Ok(Token::Less)
            }
            '>' if self.rest.starts_with(">=") => {
                self.advance(2);
                Ok(Token::GreaterEqual)
            }
            '>' => {
                self.advance(1);
                Ok(Token::Greater)
            }
            ')' => {
                self.advance(1);
                Ok(Token::RightParen)
            }
            '\'' | '"' => self.consume_string(char).map(Token::String),
            '-' if self.rest[1..].starts_with(|c: char| c.is_ascii_digit()) => {
                Ok(self.consume_number())
            }
            _ if char.is_ascii_digit() => Ok(self.consume_number()),
            _ if char.is_alphabetic() || char == '_' => {
                let word = self.consume_word();

                match Keyword::from_str(word) {
                    Ok(keyword) => Ok(Token::Keyword(keyword)),
                    Err(_) => Ok(Token::Identifier(word)),
                }
            }
            _ => {
                let position = self.position;
                self.advance(char.len_utf8());
                Err(DatabaseError::Syntax(format!(
                    "unexpected character '{char}' at position {position}"
                )))
            }
        };

        Some(token)
    }
}
