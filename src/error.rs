//! Error types for expression parsing and evaluation.
//!
//! Parsing and evaluation fail independently, so each stage has its own error
//! enum. [`ParseError`] covers everything from tokenization up to the point a
//! finished tree exists; [`EvalError`] covers evaluation of that tree against
//! a variable context. [`ExprError`] wraps both for callers that go from text
//! straight to a number and only want one error type to match on.

use core::fmt;

use crate::Real;

/// Error produced while turning text or a token sequence into an expression
/// tree.
///
/// All variants are recoverable at the call site: parsing simply fails for
/// that input and no partial tree is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The tokenizer hit a character it cannot classify.
    Tokenizer(String),

    /// A NUMBER token is neither a named constant nor a valid numeric
    /// literal.
    InvalidNumber {
        /// The offending token text.
        text: String,
    },

    /// A FUNCTION token names a function that is not in the builtin table.
    UnknownFunction {
        /// The offending function name.
        name: String,
    },

    /// An OPERATOR token carries a symbol with no operator tag.
    UnknownOperator {
        /// The offending operator symbol.
        symbol: String,
    },

    /// Resolution was attempted on an empty token sequence.
    EmptySequence,

    /// Parentheses in the sequence do not nest properly.
    MalformedNesting,

    /// The operator splitter found no operator outside of parentheses.
    NoTopLevelOperator,

    /// A chained resolver could not partition its input across its
    /// consumers.
    NoPartition {
        /// Identifier of the chain rule that failed.
        rule: &'static str,
    },

    /// Every registered resolver declined the sequence.
    NoRuleMatched {
        /// Textual form of the sequence, for the error message only.
        sequence: String,
    },

    /// Resolution recursed deeper than the registry's depth limit.
    RecursionLimit,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Tokenizer(msg) => write!(f, "Tokenizer error: {}", msg),
            ParseError::InvalidNumber { text } => {
                write!(f, "Invalid number: '{}'", text)
            }
            ParseError::UnknownFunction { name } => {
                write!(f, "Unknown function: '{}'", name)
            }
            ParseError::UnknownOperator { symbol } => {
                write!(f, "Unknown operator: '{}'", symbol)
            }
            ParseError::EmptySequence => write!(f, "Cannot resolve an empty token sequence"),
            ParseError::MalformedNesting => write!(f, "Unbalanced parentheses"),
            ParseError::NoTopLevelOperator => {
                write!(f, "No operator found outside of parentheses")
            }
            ParseError::NoPartition { rule } => {
                write!(f, "Rule '{}' could not partition its input", rule)
            }
            ParseError::NoRuleMatched { sequence } => {
                write!(f, "No rule matched sequence: {}", sequence)
            }
            ParseError::RecursionLimit => write!(f, "Resolution recursion limit exceeded"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error produced while evaluating a finished expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A variable in the tree is absent from the evaluation context.
    UnknownVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// A division had a zero divisor.
    DivideByZero,

    /// A builtin function was applied to an argument outside its domain,
    /// e.g. `sqrt(-1)` or `ln(0)`.
    FunctionDomain {
        /// Name of the function.
        name: &'static str,
        /// The out-of-domain argument.
        argument: Real,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownVariable { name } => {
                write!(f, "Variable is not defined: '{}'", name)
            }
            EvalError::DivideByZero => write!(f, "Division by zero"),
            EvalError::FunctionDomain { name, argument } => {
                write!(f, "Argument {} is outside the domain of '{}'", argument, name)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Combined error type for the text-to-value entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// The input failed to parse.
    Parse(ParseError),
    /// The parsed tree failed to evaluate.
    Eval(EvalError),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Parse(err) => write!(f, "{}", err),
            ExprError::Eval(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<ParseError> for ExprError {
    fn from(err: ParseError) -> ExprError {
        ExprError::Parse(err)
    }
}

impl From<EvalError> for ExprError {
    fn from(err: EvalError) -> ExprError {
        ExprError::Eval(err)
    }
}
