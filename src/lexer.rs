//! Hand-rolled scanner turning MiniPyLang source text into a token stream.

use std::{iter::Peekable, str::Chars};

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::token::{Token, TokenKind};

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("while", TokenKind::While);
    m.insert("print", TokenKind::Print);
    m.insert("input", TokenKind::Input);
    m.insert("and", TokenKind::And);
    m.insert("or", TokenKind::Or);
    m.insert("not", TokenKind::Not);
    m.insert("del", TokenKind::Del);
    m
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}", self.message, self.line)
    }
}

impl std::error::Error for LexError {}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer<'a> {
    iterator: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            iterator: source.chars().peekable(),
            line: 1,
        }
    }

    /// Lex the entire source, returning a token stream terminated by `Eof`.
    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = vec![];

        loop {
            self.skip_whitespace_and_comments();

            let Some(&next) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, "", self.line));
                break;
            };

            let token = match next {
                'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier(),
                '0'..='9' => self.lex_number()?,
                '"' => self.lex_string()?,
                _ => self.lex_operator()?,
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&mut self) -> Option<&char> {
        self.iterator.peek()
    }

    fn advance(&mut self) -> Option<char> {
        self.iterator.next()
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(&c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let line = self.line;
        let mut lexeme = String::new();

        while let Some(&c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(kind) = KEYWORDS.get(lexeme.as_str()) {
            return Token::new(kind.clone(), lexeme, line);
        }

        if lexeme == "true" || lexeme == "false" {
            return Token::new(TokenKind::BoolLit(lexeme == "true"), lexeme, line);
        }

        Token::new(TokenKind::Ident(lexeme.clone()), lexeme, line)
    }

    fn lex_number(&mut self) -> LexResult<Token> {
        let line = self.line;
        let mut lexeme = String::new();

        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let mut is_float = false;

        if self.peek() == Some(&'.') {
            let mut lookahead = self.iterator.clone();
            lookahead.next();
            if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                lexeme.push('.');
                self.advance();
                while let Some(&c) = self.peek() {
                    if c.is_ascii_digit() {
                        lexeme.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        if is_float {
            let value = lexeme.parse::<f64>().map_err(|_| LexError {
                message: format!("invalid float literal '{lexeme}'"),
                line,
            })?;
            Ok(Token::new(TokenKind::FloatLit(value), lexeme, line))
        } else {
            let value = lexeme.parse::<i64>().map_err(|_| LexError {
                message: format!("invalid integer literal '{lexeme}'"),
                line,
            })?;
            Ok(Token::new(TokenKind::IntLit(value), lexeme, line))
        }
    }

    fn lex_string(&mut self) -> LexResult<Token> {
        let line = self.line;
        self.advance(); // opening quote

        let mut raw = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => {
                    raw.push('\\');
                    match self.advance() {
                        Some(c) => raw.push(c),
                        None => {
                            return Err(LexError {
                                message: "unterminated string".into(),
                                line,
                            })
                        }
                    }
                }
                Some('\n') | None => {
                    return Err(LexError {
                        message: "unterminated string".into(),
                        line,
                    })
                }
                Some(c) => raw.push(c),
            }
        }

        let value = unescape::unescape(&raw).unwrap_or(raw.clone());

        Ok(Token::new(TokenKind::StringLit(value), raw, line))
    }

    fn lex_operator(&mut self) -> LexResult<Token> {
        let line = self.line;
        let c = self.advance().expect("peeked before calling");

        macro_rules! two_char {
            ($second:expr, $double:expr, $single:expr) => {{
                if self.peek() == Some(&$second) {
                    self.advance();
                    Token::new($double, format!("{c}{}", $second), line)
                } else {
                    Token::new($single, c.to_string(), line)
                }
            }};
        }

        let token = match c {
            '+' => Token::new(TokenKind::Plus, "+", line),
            '-' => Token::new(TokenKind::Minus, "-", line),
            '*' => Token::new(TokenKind::Star, "*", line),
            '/' => Token::new(TokenKind::Slash, "/", line),
            '(' => Token::new(TokenKind::LParen, "(", line),
            ')' => Token::new(TokenKind::RParen, ")", line),
            '{' => Token::new(TokenKind::LBrace, "{", line),
            '}' => Token::new(TokenKind::RBrace, "}", line),
            '[' => Token::new(TokenKind::LBracket, "[", line),
            ']' => Token::new(TokenKind::RBracket, "]", line),
            ',' => Token::new(TokenKind::Comma, ",", line),
            ':' => Token::new(TokenKind::Colon, ":", line),
            ';' => Token::new(TokenKind::Semicolon, ";", line),
            '=' => two_char!('=', TokenKind::EqEq, TokenKind::Assign),
            '!' => two_char!('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => two_char!('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => two_char!('=', TokenKind::GtEq, TokenKind::Gt),
            other => {
                return Err(LexError {
                    message: format!("Unexpected character '{other}'"),
                    line,
                })
            }
        };

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .lex()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_arithmetic() {
        assert_eq!(
            kinds("2 + 3 * 4"),
            vec![
                TokenKind::IntLit(2),
                TokenKind::Plus,
                TokenKind::IntLit(3),
                TokenKind::Star,
                TokenKind::IntLit(4),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_multi_char_operators_longest_match() {
        assert_eq!(
            kinds("a == b != c <= d >= e"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::EqEq,
                TokenKind::Ident("b".into()),
                TokenKind::NotEq,
                TokenKind::Ident("c".into()),
                TokenKind::LtEq,
                TokenKind::Ident("d".into()),
                TokenKind::GtEq,
                TokenKind::Ident("e".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn float_requires_digit_after_dot() {
        assert_eq!(
            kinds("20 / 4 / 2"),
            vec![
                TokenKind::IntLit(20),
                TokenKind::Slash,
                TokenKind::IntLit(4),
                TokenKind::Slash,
                TokenKind::IntLit(2),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_discarded() {
        assert_eq!(
            kinds("1 # this is a comment\n+ 2"),
            vec![
                TokenKind::IntLit(1),
                TokenKind::Plus,
                TokenKind::IntLit(2),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_with_escapes() {
        assert_eq!(
            kinds(r#""hi \"there\"""#),
            vec![
                TokenKind::StringLit("hi \"there\"".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new("\"oops").lex().unwrap_err();
        assert!(err.message.contains("unterminated string"));
    }

    #[test]
    fn unknown_character_is_an_error() {
        let err = Lexer::new("1 @ 2").lex().unwrap_err();
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn keywords_are_recognised() {
        assert_eq!(
            kinds("if else while print input true false and or not del"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Print,
                TokenKind::Input,
                TokenKind::BoolLit(true),
                TokenKind::BoolLit(false),
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Del,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_line_numbers() {
        let tokens = Lexer::new("1\n2\n3").lex().unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 3]);
    }
}
