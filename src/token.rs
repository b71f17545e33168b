//! Tokens and the sliceable token sequence view the resolvers operate on.
//!
//! A [`TokenSeq`] is a cheap view into a shared token buffer. Slicing produces
//! a new view over the same buffer without copying, while equality and
//! hashing go by token content, so two textually identical sub-sequences from
//! different parse attempts key the same cache entry.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Range;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The fixed vocabulary of token kinds the parser understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A numeric literal or a named constant such as `pi`.
    Number,
    /// A variable identifier.
    Variable,
    /// A binary operator symbol.
    Operator,
    /// A builtin function name.
    Function,
    /// An opening parenthesis.
    OpenParen,
    /// A closing parenthesis.
    CloseParen,
}

/// Minimal typed unit of input: a kind plus the literal text.
///
/// Tokens are immutable and compare by `(kind, text)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// An ordered, sliceable view over a shared token buffer.
#[derive(Clone)]
pub struct TokenSeq {
    tokens: Rc<[Token]>,
    start: usize,
    end: usize,
}

impl TokenSeq {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.len();
        TokenSeq {
            tokens: tokens.into(),
            start: 0,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens[self.start..self.end]
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.as_slice().get(index)
    }

    pub fn first(&self) -> Option<&Token> {
        self.as_slice().first()
    }

    pub fn last(&self) -> Option<&Token> {
        self.as_slice().last()
    }

    /// The single token of a one-token sequence, if that is what this is.
    pub fn solo(&self) -> Option<&Token> {
        if self.len() == 1 {
            self.first()
        } else {
            None
        }
    }

    /// A sub-view over `range`, relative to this view. Shares the buffer.
    pub fn slice(&self, range: Range<usize>) -> TokenSeq {
        debug_assert!(range.start <= range.end && range.end <= self.len());
        TokenSeq {
            tokens: Rc::clone(&self.tokens),
            start: self.start + range.start,
            end: self.start + range.end,
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Token> {
        self.as_slice().iter()
    }

    pub fn to_vec(&self) -> Vec<Token> {
        self.as_slice().to_vec()
    }

    /// Whether parentheses nest properly: the depth never goes negative and
    /// returns to zero at the end.
    pub fn is_nesting_valid(&self) -> bool {
        let mut depth: usize = 0;
        for token in self.iter() {
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        depth == 0
    }

    /// Whether the opening parenthesis at index 0 is the mate of the closing
    /// parenthesis at the end, i.e. the outer pair encloses the whole view.
    pub fn is_enclosed(&self) -> bool {
        if self.len() < 2
            || self.first().map(|t| t.kind) != Some(TokenKind::OpenParen)
            || self.last().map(|t| t.kind) != Some(TokenKind::CloseParen)
        {
            return false;
        }
        let mut depth: usize = 0;
        for (i, token) in self.iter().enumerate() {
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                    // The outer pair may only close on the final token.
                    if depth == 0 && i + 1 < self.len() {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    /// Iterate over the tokens outside any parenthesis, with their index in
    /// this view. Parenthesis tokens themselves are never yielded.
    pub fn top_level(&self) -> impl Iterator<Item = (usize, &Token)> {
        let mut depth: usize = 0;
        self.as_slice()
            .iter()
            .enumerate()
            .filter_map(move |(i, token)| match token.kind {
                TokenKind::OpenParen => {
                    depth += 1;
                    None
                }
                TokenKind::CloseParen => {
                    depth = depth.saturating_sub(1);
                    None
                }
                _ if depth == 0 => Some((i, token)),
                _ => None,
            })
    }
}

impl From<Vec<Token>> for TokenSeq {
    fn from(tokens: Vec<Token>) -> Self {
        TokenSeq::new(tokens)
    }
}

impl PartialEq for TokenSeq {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TokenSeq {}

impl Hash for TokenSeq {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for TokenSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl fmt::Display for TokenSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
