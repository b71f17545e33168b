//! Tokenizer glue: raw text to the token vocabulary the resolvers consume.
//!
//! The lexer classifies identifiers up front: a known function name becomes
//! a FUNCTION token and a known constant name (`pi`, `e`, ...) becomes a
//! NUMBER token, so the number resolver can treat constants uniformly with
//! literals. Everything else alphabetic is a VARIABLE.

use crate::ast::MathFunction;
use crate::error::ParseError;
use crate::functions;
use crate::token::{Token, TokenKind};

/// Produces tokens from an input string.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scan the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        // Number: digits with optional fraction and exponent. A leading dot
        // followed by a digit also starts a number.
        let starts_number = c.is_ascii_digit()
            || (c == '.'
                && self.input[self.pos + 1..]
                    .chars()
                    .next()
                    .is_some_and(|d| d.is_ascii_digit()));
        if starts_number {
            let mut saw_dot = false;
            let mut saw_exp = false;
            while let Some(nc) = self.peek() {
                if nc.is_ascii_digit() {
                    self.advance();
                } else if nc == '.' && !saw_dot && !saw_exp {
                    saw_dot = true;
                    self.advance();
                } else if (nc == 'e' || nc == 'E') && !saw_exp && self.pos > start {
                    // Only consume the exponent if digits follow it.
                    let mut rest = self.input[self.pos + 1..].chars();
                    let after_sign = match rest.next() {
                        Some('+' | '-') => rest.next(),
                        other => other,
                    };
                    if !after_sign.is_some_and(|d| d.is_ascii_digit()) {
                        break;
                    }
                    saw_exp = true;
                    self.advance();
                    if matches!(self.peek(), Some('+' | '-')) {
                        self.advance();
                    }
                } else {
                    break;
                }
            }
            let text = &self.input[start..self.pos];
            return Ok(Some(Token::new(TokenKind::Number, text)));
        }

        // Identifier: function name, named constant, or variable.
        if c.is_ascii_alphabetic() || c == '_' {
            while let Some(nc) = self.peek() {
                if nc.is_ascii_alphanumeric() || nc == '_' {
                    self.advance();
                } else {
                    break;
                }
            }
            let ident = &self.input[start..self.pos];
            let kind = if MathFunction::from_name(ident).is_some() {
                TokenKind::Function
            } else if functions::constant(ident).is_some() {
                TokenKind::Number
            } else {
                TokenKind::Variable
            };
            return Ok(Some(Token::new(kind, ident)));
        }

        let kind = match c {
            '+' | '-' | '*' | '/' | '^' => TokenKind::Operator,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            _ => {
                return Err(ParseError::Tokenizer(format!(
                    "unexpected character '{}' at position {}",
                    c, start
                )));
            }
        };
        self.advance();
        Ok(Some(Token::new(kind, &self.input[start..self.pos])))
    }
}

/// Tokenize a whole input string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
