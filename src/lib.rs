#![doc = r#"
# seqexpr

A resolver-based math expression parser and evaluator.

seqexpr parses a tokenized mathematical expression into an evaluable tree and
evaluates that tree against a variable-binding context. The parser is a
registry of composable token-sequence resolvers: each grammar rule decides
whether a sub-sequence is its business and, if so, what it resolves to.
Composite rules (implicit multiplication, function application, unary
negation) are built on a generic backtracking chain resolver with
memoization, which keeps the search polynomial instead of exponential.

## Quick start

```rust
use seqexpr::interp;

// Operator precedence and parentheses.
assert_eq!(interp("2 + 3 * 4", None).unwrap(), 14.0);
assert_eq!(interp("(2 + 3) * 4", None).unwrap(), 20.0);

// Builtin functions and constants.
let v = interp("sin(pi / 2)", None).unwrap();
assert!((v - 1.0).abs() < 1e-9);
```

## Variables and implicit multiplication

```rust
use seqexpr::{interp, EvalContext};

let mut ctx = EvalContext::new();
ctx.set_variable("x", 5.0);

// Juxtaposition multiplies: 2x is 2*x.
assert_eq!(interp("2x + 1", Some(&ctx)).unwrap(), 11.0);
```

## Working with the tree

```rust
use seqexpr::parse_expression;

let expr = parse_expression("2 + 3 * 4").unwrap();
assert_eq!(expr.render(), "2+3*4");
assert_eq!(expr.children().len(), 2);
```

## Grammar notes

Operators are `+ - * / ^` with conventional precedence (`^` binds tightest).
Among operators of equal precedence the parser groups to the right, so
`1-2-3` evaluates as `1-(2-3)`; this follows from the splitter's partition
rule and is deliberate. Function application takes a single
operand (`sin(x)`, `sqrt 9` via juxtaposed tokens), unary minus is rewritten
to `0 - x`, and the constants `pi`, `e`, and `tau` are recognized wherever a
number is.

Parsing and evaluation are single-threaded, synchronous, and free of I/O.
A [`Parser`](registry::Parser) instance carries its memoization caches with
it; build one per parsing session or reuse it serially.
"#]

pub mod ast;
pub mod cache;
pub mod chain;
pub mod context;
pub mod engine;
pub mod error;
pub mod functions;
pub mod lexer;
pub mod registry;
pub mod resolver;
pub mod structural;
pub mod token;

pub use ast::{BinaryOp, Expr, MathFunction};
pub use context::{EvalContext, VariableLookup};
pub use engine::{expression_parser, interp, parse_expression};
pub use error::{EvalError, ExprError, ParseError};
pub use lexer::{tokenize, Lexer};
pub use registry::Parser;
pub use token::{Token, TokenKind, TokenSeq};

/// Floating-point type used for all values. 64-bit is the default; enable
/// the `f32` feature to switch to 32-bit.
#[cfg(feature = "f32")]
pub type Real = f32;

#[cfg(not(feature = "f32"))]
pub type Real = f64;

pub mod constants {
    use super::Real;

    #[cfg(feature = "f32")]
    pub const PI: Real = core::f32::consts::PI;
    #[cfg(feature = "f32")]
    pub const E: Real = core::f32::consts::E;
    #[cfg(feature = "f32")]
    pub const TAU: Real = core::f32::consts::TAU;
    #[cfg(feature = "f32")]
    pub const TEST_PRECISION: Real = 1e-6;

    #[cfg(not(feature = "f32"))]
    pub const PI: Real = core::f64::consts::PI;
    #[cfg(not(feature = "f32"))]
    pub const E: Real = core::f64::consts::E;
    #[cfg(not(feature = "f32"))]
    pub const TAU: Real = core::f64::consts::TAU;
    #[cfg(not(feature = "f32"))]
    pub const TEST_PRECISION: Real = 1e-10;
}

/// Assert that two floating point values are approximately equal, within an
/// optional epsilon (defaults to [`constants::TEST_PRECISION`]).
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val: $crate::Real = $left;
        let right_val: $crate::Real = $right;
        let eps: $crate::Real = $epsilon;
        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes.
        } else {
            assert!(
                (left_val - right_val).abs() < eps,
                "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
                left_val,
                right_val,
                eps
            );
        }
    }};
}
