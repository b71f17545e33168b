//! Grammar assembly and the public entry points.
//!
//! [`expression_parser`] wires the resolver registry for the expression
//! grammar. Registration order is priority order and is semantically load
//! bearing: implicit multiplication must be probed before the leaf and
//! structural rules, and unary negation must come last so that a leading
//! minus is only treated as negation once no binary reading works.

use crate::ast::{BinaryOp, Expr, MathFunction};
use crate::chain::{ChainResolver, Consumer, Fragment, MatchedTokens, RegistryOperand};
use crate::context::EvalContext;
use crate::error::{ExprError, ParseError};
use crate::lexer::tokenize;
use crate::registry::Parser;
use crate::resolver::{number_rule, variable_rule, TokenRule};
use crate::structural::{ParenRule, SplitRule};
use crate::token::{Token, TokenKind};
use crate::Real;

/// Implicit multiplication by juxtaposition: two registry-resolvable parts
/// are rewritten as `a * b` and re-resolved, so `2x` parses exactly like
/// `2*x`.
fn multiply_rule() -> ChainResolver {
    ChainResolver::new(
        "multiply",
        vec![
            Consumer::new(Box::new(MatchedTokens)),
            Consumer::new(Box::new(MatchedTokens)),
        ],
        |parser, parts| match parts {
            [Fragment::Tokens(a), Fragment::Tokens(b)] => {
                let mut tokens = a.to_vec();
                tokens.push(Token::new(TokenKind::Operator, "*"));
                tokens.extend(b.to_vec());
                parser.parse(tokens)
            }
            _ => Err(ParseError::NoPartition { rule: "multiply" }),
        },
    )
}

/// Function application: a FUNCTION token followed by any resolvable
/// operand.
fn function_rule() -> ChainResolver {
    ChainResolver::new(
        "function",
        vec![
            Consumer::new(Box::new(TokenRule::new(TokenKind::Function, |token| {
                MathFunction::from_name(&token.text)
                    .map(Fragment::Function)
                    .ok_or_else(|| ParseError::UnknownFunction {
                        name: token.text.clone(),
                    })
            }))),
            Consumer::new(Box::new(RegistryOperand)),
        ],
        |_, parts| match parts {
            [Fragment::Function(func), Fragment::Expr(arg)] => Ok(Expr::FunctionCall {
                func: *func,
                arg: Box::new(arg.clone()),
            }),
            _ => Err(ParseError::NoPartition { rule: "function" }),
        },
    )
}

/// Unary negation: a leading subtraction symbol rewritten as `0 - x`.
fn negation_rule() -> ChainResolver {
    ChainResolver::new(
        "negative",
        vec![
            Consumer::new(Box::new(TokenRule::filtered(
                TokenKind::Operator,
                |token| token.text == BinaryOp::Subtract.symbol(),
                |_| Ok(Fragment::Operator(BinaryOp::Subtract)),
            ))),
            Consumer::new(Box::new(RegistryOperand)),
        ],
        |_, parts| match parts {
            [Fragment::Operator(op), Fragment::Expr(operand)] => Ok(Expr::Operation {
                op: *op,
                left: Box::new(Expr::Number(0.0)),
                right: Box::new(operand.clone()),
            }),
            _ => Err(ParseError::NoPartition { rule: "negative" }),
        },
    )
}

/// Build a parser wired with the full expression grammar.
pub fn expression_parser() -> Parser {
    let mut parser = Parser::empty();
    parser
        .add(Box::new(multiply_rule()))
        .add(Box::new(number_rule()))
        .add(Box::new(variable_rule()))
        .add(Box::new(ParenRule))
        .add(Box::new(SplitRule))
        .add(Box::new(function_rule()))
        .add(Box::new(negation_rule()));
    parser
}

/// Tokenize and parse `input` into an expression tree.
///
/// # Examples
///
/// ```
/// use seqexpr::parse_expression;
///
/// let expr = parse_expression("2+3*4").unwrap();
/// assert_eq!(expr.render(), "2+3*4");
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    expression_parser().parse(tokenize(input)?)
}

/// Parse `input` and evaluate it against `ctx` (or an empty context).
///
/// # Examples
///
/// ```
/// use seqexpr::interp;
///
/// assert_eq!(interp("2 + 3 * 4", None).unwrap(), 14.0);
/// ```
pub fn interp(input: &str, ctx: Option<&EvalContext>) -> Result<Real, ExprError> {
    let expr = parse_expression(input)?;
    let value = match ctx {
        Some(ctx) => expr.evaluate(ctx)?,
        None => expr.evaluate(&EvalContext::new())?,
    };
    Ok(value)
}
