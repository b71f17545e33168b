//! Structural grammar rules: parenthesis stripping and operator-precedence
//! splitting.

use crate::ast::{BinaryOp, Expr};
use crate::error::ParseError;
use crate::registry::Parser;
use crate::resolver::Resolver;
use crate::token::{Token, TokenKind, TokenSeq};

/// Strips an enclosing parenthesis pair and re-resolves the inside.
///
/// Matching requires the opening parenthesis at index 0 to be the mate of
/// the closing one at the end, so a sequence like `(a)+(b)` falls through to
/// the operator splitter instead of losing its outer tokens.
pub struct ParenRule;

impl Resolver for ParenRule {
    type Output = Expr;

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Expr, ParseError> {
        if !seq.is_enclosed() {
            return Err(ParseError::MalformedNesting);
        }
        parser.resolve(&seq.slice(1..seq.len() - 1))
    }

    fn matches(&self, _parser: &Parser, seq: &TokenSeq) -> bool {
        seq.is_enclosed()
    }
}

/// Splits a sequence at its weakest-binding top-level operator and resolves
/// both sides.
///
/// The scan walks the tokens outside any parenthesis left to right. The
/// candidate is replaced whenever a later operator does not bind strictly
/// tighter than the current one, so the rightmost operator wins among equal
/// precedence. The split then happens at the first top-level token equal to
/// that candidate, which makes same-precedence chains group to the right:
/// `a-b-c` resolves as `a-(b-c)`.
pub struct SplitRule;

impl SplitRule {
    fn find_splitter(&self, seq: &TokenSeq) -> Result<(Token, BinaryOp), ParseError> {
        let mut candidate: Option<(&Token, BinaryOp)> = None;
        for (_, token) in seq.top_level() {
            if token.kind != TokenKind::Operator {
                continue;
            }
            let op = BinaryOp::from_symbol(&token.text).ok_or_else(|| {
                ParseError::UnknownOperator {
                    symbol: token.text.clone(),
                }
            })?;
            match candidate {
                Some((_, current)) if op.has_priority(current) => {}
                _ => candidate = Some((token, op)),
            }
        }
        candidate
            .map(|(token, op)| (token.clone(), op))
            .ok_or(ParseError::NoTopLevelOperator)
    }
}

impl Resolver for SplitRule {
    type Output = Expr;

    fn resolve(&self, parser: &Parser, seq: &TokenSeq) -> Result<Expr, ParseError> {
        if !seq.is_nesting_valid() {
            return Err(ParseError::MalformedNesting);
        }

        let (splitter, op) = self.find_splitter(seq)?;
        let split = seq
            .top_level()
            .find(|(_, token)| **token == splitter)
            .map(|(index, _)| index)
            .ok_or(ParseError::NoTopLevelOperator)?;

        let left = parser.resolve(&seq.slice(0..split))?;
        let right = parser.resolve(&seq.slice(split + 1..seq.len()))?;
        Ok(Expr::Operation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{number_rule, variable_rule};

    fn parser() -> Parser {
        let mut parser = Parser::empty();
        parser
            .add(Box::new(number_rule()))
            .add(Box::new(variable_rule()))
            .add(Box::new(ParenRule))
            .add(Box::new(SplitRule));
        parser
    }

    fn seq(parts: &[(TokenKind, &str)]) -> TokenSeq {
        TokenSeq::new(
            parts.iter()
                .map(|(kind, text)| Token::new(*kind, *text))
                .collect(),
        )
    }

    const OPEN: (TokenKind, &str) = (TokenKind::OpenParen, "(");
    const CLOSE: (TokenKind, &str) = (TokenKind::CloseParen, ")");

    #[test]
    fn test_paren_rule_strips_one_level() {
        let p = parser();
        let expr = ParenRule
            .resolve(&p, &seq(&[OPEN, (TokenKind::Number, "7"), CLOSE]))
            .unwrap();
        assert_eq!(expr, Expr::Number(7.0));
    }

    #[test]
    fn test_paren_rule_rejects_unmatched_outer_pair() {
        let p = parser();
        let s = seq(&[
            OPEN,
            (TokenKind::Variable, "a"),
            CLOSE,
            (TokenKind::Operator, "+"),
            OPEN,
            (TokenKind::Variable, "b"),
            CLOSE,
        ]);
        assert!(!ParenRule.matches(&p, &s));
        // The splitter takes it instead.
        let expr = p.resolve(&s).unwrap();
        assert!(matches!(
            expr,
            Expr::Operation {
                op: BinaryOp::Add,
                ..
            }
        ));
    }

    #[test]
    fn test_splitter_picks_lowest_precedence() {
        let p = parser();
        // 2+3*4 splits at '+'.
        let expr = SplitRule
            .resolve(
                &p,
                &seq(&[
                    (TokenKind::Number, "2"),
                    (TokenKind::Operator, "+"),
                    (TokenKind::Number, "3"),
                    (TokenKind::Operator, "*"),
                    (TokenKind::Number, "4"),
                ]),
            )
            .unwrap();
        let Expr::Operation { op, left, right } = expr else {
            panic!("expected operation");
        };
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(*left, Expr::Number(2.0));
        assert!(matches!(
            *right,
            Expr::Operation {
                op: BinaryOp::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn test_splitter_ignores_nested_operators() {
        let p = parser();
        // (2+3)*4 splits at '*', the only top-level operator.
        let expr = SplitRule
            .resolve(
                &p,
                &seq(&[
                    OPEN,
                    (TokenKind::Number, "2"),
                    (TokenKind::Operator, "+"),
                    (TokenKind::Number, "3"),
                    CLOSE,
                    (TokenKind::Operator, "*"),
                    (TokenKind::Number, "4"),
                ]),
            )
            .unwrap();
        assert!(matches!(
            expr,
            Expr::Operation {
                op: BinaryOp::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn test_splitter_groups_equal_precedence_to_the_right() {
        let p = parser();
        // a-b-c resolves as a-(b-c).
        let expr = SplitRule
            .resolve(
                &p,
                &seq(&[
                    (TokenKind::Variable, "a"),
                    (TokenKind::Operator, "-"),
                    (TokenKind::Variable, "b"),
                    (TokenKind::Operator, "-"),
                    (TokenKind::Variable, "c"),
                ]),
            )
            .unwrap();
        let Expr::Operation { op, left, right } = expr else {
            panic!("expected operation");
        };
        assert_eq!(op, BinaryOp::Subtract);
        assert_eq!(*left, Expr::Variable("a".to_string()));
        let Expr::Operation { op, left, right } = *right else {
            panic!("expected nested operation");
        };
        assert_eq!(op, BinaryOp::Subtract);
        assert_eq!(*left, Expr::Variable("b".to_string()));
        assert_eq!(*right, Expr::Variable("c".to_string()));
    }

    #[test]
    fn test_splitter_split_index_stays_top_level() {
        let p = parser();
        // (a-b)-c must split at the outer '-', not the nested one.
        let expr = SplitRule
            .resolve(
                &p,
                &seq(&[
                    OPEN,
                    (TokenKind::Variable, "a"),
                    (TokenKind::Operator, "-"),
                    (TokenKind::Variable, "b"),
                    CLOSE,
                    (TokenKind::Operator, "-"),
                    (TokenKind::Variable, "c"),
                ]),
            )
            .unwrap();
        let Expr::Operation { op, right, .. } = expr else {
            panic!("expected operation");
        };
        assert_eq!(op, BinaryOp::Subtract);
        assert_eq!(*right, Expr::Variable("c".to_string()));
    }

    #[test]
    fn test_splitter_requires_valid_nesting() {
        let p = parser();
        let err = SplitRule
            .resolve(
                &p,
                &seq(&[
                    OPEN,
                    (TokenKind::Number, "2"),
                    (TokenKind::Operator, "+"),
                    (TokenKind::Number, "3"),
                ]),
            )
            .unwrap_err();
        assert_eq!(err, ParseError::MalformedNesting);
    }

    #[test]
    fn test_splitter_requires_an_operator() {
        let p = parser();
        let err = SplitRule
            .resolve(&p, &seq(&[(TokenKind::Number, "2")]))
            .unwrap_err();
        assert_eq!(err, ParseError::NoTopLevelOperator);
    }
}
