//! The resolver capability and single-token leaf rules.
//!
//! A resolver answers two questions about a token sequence: does it match,
//! and what does it resolve to. `matches` defaults to attempting the real
//! resolution and discarding the result, which is how backtracking
//! distinguishes "try another alternative" from "abort entirely": a resolve
//! failure inside `matches` becomes a plain `false`. Rules that can decide
//! cheaply (single-token rules, the parenthesis stripper) override `matches`
//! with a structural check instead.

use crate::ast::Expr;
use crate::error::ParseError;
use crate::functions;
use crate::registry::Parser;
use crate::token::{Token, TokenKind, TokenSeq};
use crate::Real;

/// Capability of converting a token sequence into a typed result.
///
/// Resolvers receive the registry (`parser`) so composite rules can
/// re-enter resolution on sub-sequences without holding a back-reference.
pub trait Resolver {
    type Output;

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Self::Output, ParseError>;

    fn matches(&self, parser: &Parser, seq: &TokenSeq) -> bool {
        self.resolve(parser, seq).is_ok()
    }
}

/// Leaf rule deciding from a single token of a fixed kind.
pub struct TokenRule<T> {
    kind: TokenKind,
    accept: fn(&Token) -> bool,
    action: fn(&Token) -> Result<T, ParseError>,
}

impl<T> TokenRule<T> {
    pub fn new(kind: TokenKind, action: fn(&Token) -> Result<T, ParseError>) -> Self {
        TokenRule {
            kind,
            accept: |_| true,
            action,
        }
    }

    /// Like [`TokenRule::new`], with an extra predicate on the token.
    pub fn filtered(
        kind: TokenKind,
        accept: fn(&Token) -> bool,
        action: fn(&Token) -> Result<T, ParseError>,
    ) -> Self {
        TokenRule {
            kind,
            accept,
            action,
        }
    }

    fn accepts(&self, token: &Token) -> bool {
        token.kind == self.kind && (self.accept)(token)
    }
}

impl<T> Resolver for TokenRule<T> {
    type Output = T;

    fn resolve(&self, _parser: &Parser, seq: &TokenSeq) -> Result<T, ParseError> {
        match seq.solo() {
            Some(token) if self.accepts(token) => (self.action)(token),
            _ => Err(ParseError::NoRuleMatched {
                sequence: seq.to_string(),
            }),
        }
    }

    fn matches(&self, _parser: &Parser, seq: &TokenSeq) -> bool {
        seq.solo().is_some_and(|token| self.accepts(token))
    }
}

/// Rule for a single NUMBER token: named constants first, then a plain
/// numeric literal.
pub fn number_rule() -> TokenRule<Expr> {
    TokenRule::new(TokenKind::Number, |token| {
        if let Some(value) = functions::constant(&token.text) {
            return Ok(Expr::Number(value));
        }
        token
            .text
            .parse::<Real>()
            .map(Expr::Number)
            .map_err(|_| ParseError::InvalidNumber {
                text: token.text.clone(),
            })
    })
}

/// Rule for a single VARIABLE token.
pub fn variable_rule() -> TokenRule<Expr> {
    TokenRule::new(TokenKind::Variable, |token| {
        Ok(Expr::Variable(token.text.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;
    use crate::registry::Parser;

    fn solo(kind: TokenKind, text: &str) -> TokenSeq {
        TokenSeq::new(vec![Token::new(kind, text)])
    }

    #[test]
    fn test_number_rule_literals_and_constants() {
        let parser = Parser::empty();
        let rule = number_rule();

        assert_eq!(
            rule.resolve(&parser, &solo(TokenKind::Number, "2.5")),
            Ok(Expr::Number(2.5))
        );
        assert_eq!(
            rule.resolve(&parser, &solo(TokenKind::Number, "pi")),
            Ok(Expr::Number(constants::PI))
        );
        assert_eq!(
            rule.resolve(&parser, &solo(TokenKind::Number, "2.5.1")),
            Err(ParseError::InvalidNumber {
                text: "2.5.1".to_string()
            })
        );
    }

    #[test]
    fn test_token_rule_matches_kind_and_arity() {
        let parser = Parser::empty();
        let rule = number_rule();

        assert!(rule.matches(&parser, &solo(TokenKind::Number, "1")));
        assert!(!rule.matches(&parser, &solo(TokenKind::Variable, "x")));
        // Matching is structural: an invalid literal still matches, the
        // error surfaces from resolve.
        assert!(rule.matches(&parser, &solo(TokenKind::Number, "bogus")));

        let two = TokenSeq::new(vec![
            Token::new(TokenKind::Number, "1"),
            Token::new(TokenKind::Number, "2"),
        ]);
        assert!(!rule.matches(&parser, &two));
    }

    #[test]
    fn test_variable_rule() {
        let parser = Parser::empty();
        let rule = variable_rule();
        assert_eq!(
            rule.resolve(&parser, &solo(TokenKind::Variable, "velocity")),
            Ok(Expr::Variable("velocity".to_string()))
        );
    }

    #[test]
    fn test_filtered_rule_checks_text() {
        let parser = Parser::empty();
        let rule: TokenRule<()> =
            TokenRule::filtered(TokenKind::Operator, |t| t.text == "-", |_| Ok(()));
        assert!(rule.matches(&parser, &solo(TokenKind::Operator, "-")));
        assert!(!rule.matches(&parser, &solo(TokenKind::Operator, "+")));
    }
}
